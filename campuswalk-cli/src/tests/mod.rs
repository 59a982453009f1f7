//! Shared test harness modules for the Campuswalk CLI.

use super::*;

mod helpers;
mod route_steps;
