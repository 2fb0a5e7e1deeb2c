//! Display rounding
//!
//! Ledger state is always kept at full precision. Figures are rounded only when
//! they are published (snapshots, reports, CLI output), through these helpers.

/// Round a money or percent figure to 2 decimals, half-up.
///
/// Computed as `floor((x + 0.005) * 100) / 100`; the 0.005 bias makes values
/// sitting on a half-cent boundary round up instead of being truncated.
pub fn round_display(value: f64) -> f64 {
    ((value + 0.005) * 100.0).floor() / 100.0
}

/// Round pseudo-asset unit counts to 2 decimals (nearest)
pub fn round_units(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_display_half_up() {
        assert_eq!(round_display(1.234), 1.23);
        assert_eq!(round_display(1.236), 1.24);
        assert_eq!(round_display(3600.0), 3600.0);
        assert_eq!(round_display(0.0), 0.0);
    }

    #[test]
    fn test_round_units() {
        assert_eq!(round_units(7.6923), 7.69);
        assert_eq!(round_units(0.004), 0.0);
    }
}
