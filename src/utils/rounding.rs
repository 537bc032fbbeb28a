//! Display precision for metric bundles
//!
//! Yard and count metrics round to the nearest integer, rates and per-game
//! values to one decimal place. Halves round away from zero.

/// Round a yard or count metric to the nearest integer
pub fn round_count(value: f64) -> i64 {
    value.round() as i64
}

/// Round a rate or per-game metric to one decimal place
pub fn round_rate(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(12.4), 12);
        assert_eq!(round_count(12.5), 13);
        assert_eq!(round_count(-5.0), -5);
        assert_eq!(round_count(-2.5), -3);
    }

    #[test]
    fn test_round_rate() {
        assert_eq!(round_rate(66.666), 66.7);
        assert_eq!(round_rate(50.0), 50.0);
        assert_eq!(round_rate(4.25), 4.3);
    }
}
