//! Sequential voucher numbering.
//!
//! Numbers have the shape `PREFIX-NNNN` (e.g. `ING-0042`), sequential per
//! (tenant, voucher type). The sequence itself is issued by the store from an
//! atomic per-(tenant, type) counter; this module owns the pure formatting
//! and parsing. A sequence with no prior voucher starts at 1.

use super::types::VoucherType;

/// Formats a voucher number from its type and sequence value.
///
/// Sequence values beyond 9999 simply widen the number.
#[must_use]
pub fn format_number(voucher_type: VoucherType, sequence: i64) -> String {
    format!("{}-{:04}", voucher_type.prefix(), sequence)
}

/// Parses a voucher number into its prefix and sequence value.
///
/// Returns `None` when the text does not follow the `PREFIX-NNNN` shape.
#[must_use]
pub fn parse_number(number: &str) -> Option<(&str, i64)> {
    let (prefix, digits) = number.split_once('-')?;
    if prefix.is_empty() || digits.is_empty() {
        return None;
    }
    let sequence = digits.parse::<i64>().ok()?;
    Some((prefix, sequence))
}

/// Returns the sequence value following the given last-issued number.
///
/// `None` (no voucher of this type yet) starts the sequence at 1; an
/// unparseable number also restarts at 1 rather than guessing.
#[must_use]
pub fn next_number(last: Option<&str>) -> i64 {
    match last.and_then(parse_number) {
        Some((_, sequence)) => sequence + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VoucherType::Income, 1, "ING-0001")]
    #[case(VoucherType::Expense, 42, "EGR-0042")]
    #[case(VoucherType::Note, 9999, "NOT-9999")]
    #[case(VoucherType::Opening, 10000, "APE-10000")]
    #[case(VoucherType::Closing, 7, "CIE-0007")]
    fn test_format_number(
        #[case] voucher_type: VoucherType,
        #[case] sequence: i64,
        #[case] expected: &str,
    ) {
        assert_eq!(format_number(voucher_type, sequence), expected);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("ING-0042"), Some(("ING", 42)));
        assert_eq!(parse_number("EGR-10000"), Some(("EGR", 10000)));
        assert_eq!(parse_number("SINGUION"), None);
        assert_eq!(parse_number("ING-"), None);
        assert_eq!(parse_number("-0042"), None);
        assert_eq!(parse_number("ING-abc"), None);
    }

    #[test]
    fn test_next_number_starts_at_one() {
        assert_eq!(next_number(None), 1);
    }

    #[test]
    fn test_next_number_increments() {
        assert_eq!(next_number(Some("ING-0041")), 42);
        assert_eq!(next_number(Some("EGR-9999")), 10000);
    }

    #[test]
    fn test_next_number_restarts_on_garbage() {
        assert_eq!(next_number(Some("not a number")), 1);
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for sequence in [1, 99, 9999, 123_456] {
            let formatted = format_number(VoucherType::Income, sequence);
            assert_eq!(parse_number(&formatted), Some(("ING", sequence)));
        }
    }
}
