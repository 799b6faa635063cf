//! Whole-percent rounding shared by every ratio on the dashboard.

/// `round(part / whole * 100)` with halves rounded toward positive infinity.
///
/// A non-positive `whole` yields `0` instead of dividing.
pub fn percent(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    let scaled = i128::from(part) * 200 + i128::from(whole);
    let denominator = i128::from(whole) * 2;
    // whole > 0, so euclidean division is floor division here.
    let rounded = scaled.div_euclid(denominator);
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Non-negative variant for counts.
pub fn rate(part: usize, whole: usize) -> u32 {
    let part = i64::try_from(part).unwrap_or(i64::MAX);
    let whole = i64::try_from(whole).unwrap_or(i64::MAX);
    u32::try_from(percent(part, whole).max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator() {
        assert_eq!(percent(5, 0), 0);
        assert_eq!(rate(0, 0), 0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(-1, 8), -12);
        assert_eq!(percent(-5, 200), -2);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn exact_ratios() {
        assert_eq!(rate(4, 10), 40);
        assert_eq!(rate(2, 5), 40);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(-3, 3), -100);
        assert_eq!(rate(57, 200), 29);
    }
}
