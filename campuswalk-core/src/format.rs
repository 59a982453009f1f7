//! Human-readable rendering of distances and durations.

/// Render a distance in metres.
///
/// Distances under one kilometre are shown as whole metres; longer ones in
/// kilometres with two decimals.
///
/// # Examples
/// ```
/// use campuswalk_core::format_distance;
///
/// assert_eq!(format_distance(84.4), "84 m");
/// assert_eq!(format_distance(1_234.0), "1.23 km");
/// ```
pub fn format_distance(distance_m: f64) -> String {
    if distance_m < 1_000.0 {
        format!("{} m", distance_m.round())
    } else {
        format!("{:.2} km", distance_m / 1_000.0)
    }
}

/// Render a whole-minute duration.
///
/// # Examples
/// ```
/// use campuswalk_core::format_minutes;
///
/// assert_eq!(format_minutes(0), "< 1 min");
/// assert_eq!(format_minutes(12), "12 min");
/// assert_eq!(format_minutes(75), "1h 15m");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    match minutes {
        0 => "< 1 min".to_owned(),
        1..=59 => format!("{minutes} min"),
        _ => format!("{}h {}m", minutes / 60, minutes % 60),
    }
}
