//! Voucher entry domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{CostCenterId, EntryId, ThirdPartyId, VoucherId};

/// A single posting line of a voucher.
///
/// Entries reference their owning voucher by id rather than holding a back
/// reference; the voucher lifecycle is the only writer of an entry set.
/// Exactly one of `debit` / `credit` is non-zero for a valid entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// The voucher this entry belongs to.
    pub voucher_id: VoucherId,
    /// 1-based display order within the voucher.
    pub line_number: i32,
    /// The (level-4) account code this entry posts to.
    pub account_code: String,
    /// Optional third party.
    pub third_party_id: Option<ThirdPartyId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional withholding base.
    pub base_value: Option<Decimal>,
    /// Optional tax amount.
    pub tax_value: Option<Decimal>,
}

impl Entry {
    /// Returns true if this is a debit line.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.debit > Decimal::ZERO
    }

    /// Returns true if this is a credit line.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.credit > Decimal::ZERO
    }

    /// Returns the net amount of the line (debit - credit).
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_entry(debit: Decimal, credit: Decimal) -> Entry {
        Entry {
            id: EntryId::new(),
            voucher_id: VoucherId::new(),
            line_number: 1,
            account_code: "130505".to_string(),
            third_party_id: None,
            cost_center_id: None,
            description: None,
            debit,
            credit,
            base_value: None,
            tax_value: None,
        }
    }

    #[test]
    fn test_debit_entry() {
        let entry = make_entry(dec!(100), Decimal::ZERO);
        assert!(entry.is_debit());
        assert!(!entry.is_credit());
        assert_eq!(entry.net_amount(), dec!(100));
    }

    #[test]
    fn test_credit_entry() {
        let entry = make_entry(Decimal::ZERO, dec!(100));
        assert!(!entry.is_debit());
        assert!(entry.is_credit());
        assert_eq!(entry.net_amount(), dec!(-100));
    }
}
