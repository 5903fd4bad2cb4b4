//! Small shared helpers.

/// Round to two decimal places.
///
/// All user-facing seconds values (interval bounds, durations, aggregate
/// times) follow this convention.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(9.984), 9.98);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(-1.234), -1.23);
    }
}
