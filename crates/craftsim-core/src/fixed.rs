use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits. Material
/// quantities are stored in this form so items compare and hash exactly.
pub type Fixed64 = I32F32;

/// Convert an f64 to Fixed64. `None` for NaN, infinities, and values outside
/// the Q32.32 range.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display and ratios.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Multiply a value by a machine factor and round to the nearest integer,
/// ties to even.
#[inline]
pub fn scale_value(value: u64, factor: f64) -> u64 {
    (value as f64 * factor).round_ties_even() as u64
}

/// Half of a material quantity.
#[inline]
pub fn halve(materials: Fixed64) -> Fixed64 {
    materials / Fixed64::from_num(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_value_rounds_to_nearest() {
        assert_eq!(scale_value(20, 1.2), 24);
        assert_eq!(scale_value(48, 1.2), 58);
        assert_eq!(scale_value(10, 0.8), 8);
    }

    #[test]
    fn scale_value_ties_go_to_even() {
        // 2 * 1.25 and 6 * 1.25 land exactly on .5
        assert_eq!(scale_value(2, 1.25), 2);
        assert_eq!(scale_value(6, 1.25), 8);
        assert_eq!(scale_value(5, 0.5), 2);
        assert_eq!(scale_value(7, 0.5), 4);
    }

    #[test]
    fn halve_is_exact_for_binary_fractions() {
        let one = f64_to_fixed64(1.0).unwrap();
        assert_eq!(fixed64_to_f64(halve(one)), 0.5);
        assert_eq!(fixed64_to_f64(halve(halve(one))), 0.25);
    }

    #[test]
    fn f64_to_fixed64_rejects_out_of_range() {
        assert_eq!(f64_to_fixed64(2_000_000_000.0), Some(Fixed64::from_num(2_000_000_000)));
        assert_eq!(f64_to_fixed64(4_000_000_000.0), None);
        assert_eq!(f64_to_fixed64(f64::NAN), None);
        assert_eq!(f64_to_fixed64(f64::INFINITY), None);
    }
}
