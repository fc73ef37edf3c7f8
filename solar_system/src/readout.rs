//! Text readouts for the on-screen overlay

/// Format a distance in meters as whole kilometers with thousands separators,
/// e.g. `149,600,000km`
pub fn format_distance_km(meters: f64) -> String {
    let km = (meters / 1000.0).round();
    if !km.is_finite() {
        return "-km".to_string();
    }
    format!("{}km", group_thousands(km as i64))
}

/// Insert a comma between every group of three digits
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
        assert_eq!(group_thousands(100_000), "100,000");
    }

    #[test]
    fn distances_are_rounded_to_kilometers() {
        assert_eq!(format_distance_km(1.496e11), "149,600,000km");
        assert_eq!(format_distance_km(1499.0), "1km");
        assert_eq!(format_distance_km(1500.0), "2km");
        assert_eq!(format_distance_km(0.0), "0km");
        assert_eq!(format_distance_km(f64::NAN), "-km");
    }
}
