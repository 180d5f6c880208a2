//! Quantity input handling.

/// Lowest quantity the product page spinner allows.
pub const DEFAULT_MIN_QUANTITY: u32 = 1;

/// Highest quantity the product page spinner allows.
pub const DEFAULT_MAX_QUANTITY: u32 = 10;

/// Coerce a requested quantity to a valid line quantity. Anything below one
/// becomes one.
pub fn coerce_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .unwrap_or(1)
}

/// Parse a quantity typed into an input box.
///
/// Reads the leading integer, so `"3 items"` is 3. Non-numeric and
/// non-positive input becomes 1.
pub fn parse_quantity(input: &str) -> u32 {
    let input = input.trim();
    let digits_end = input
        .char_indices()
        .find(|(idx, c)| !(c.is_ascii_digit() || (*idx == 0 && matches!(c, '-' | '+'))))
        .map_or(input.len(), |(idx, _)| idx);

    input
        .get(..digits_end)
        .and_then(|digits| digits.parse::<i64>().ok())
        .map_or(1, coerce_quantity)
}

/// Keep a quantity within the spinner's bounds.
pub fn clamp_quantity(quantity: i64, min: u32, max: u32) -> u32 {
    let clamped = quantity.clamp(i64::from(min), i64::from(max.max(min)));

    u32::try_from(clamped).unwrap_or(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_turns_non_positive_into_one() {
        assert_eq!(coerce_quantity(0), 1);
        assert_eq!(coerce_quantity(-4), 1);
        assert_eq!(coerce_quantity(3), 3);
    }

    #[test]
    fn parse_reads_leading_integer() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 7 items"), 7);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("-2"), 1);
        assert_eq!(parse_quantity("0"), 1);
    }

    #[test]
    fn clamp_respects_bounds() {
        assert_eq!(
            clamp_quantity(12, DEFAULT_MIN_QUANTITY, DEFAULT_MAX_QUANTITY),
            10
        );
        assert_eq!(
            clamp_quantity(0, DEFAULT_MIN_QUANTITY, DEFAULT_MAX_QUANTITY),
            1
        );
        assert_eq!(
            clamp_quantity(5, DEFAULT_MIN_QUANTITY, DEFAULT_MAX_QUANTITY),
            5
        );
    }
}
