//! Aggregation input and output types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{ThirdPartyId, VoucherId};

use crate::voucher::VoucherType;

/// One posting line of a POSTED voucher, as the aggregation engine sees it.
///
/// This is a denormalized read model: the voucher header fields the reports
/// need (date, number, type) travel with each line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedEntry {
    /// The owning voucher's id. UUID v7, so id order is insertion order.
    pub voucher_id: VoucherId,
    /// The owning voucher's number (e.g. "ING-0042").
    pub voucher_number: String,
    /// The owning voucher's type.
    pub voucher_type: VoucherType,
    /// The voucher date.
    pub date: NaiveDate,
    /// Line number within the voucher.
    pub line_number: i32,
    /// The account this line posts to.
    pub account_code: String,
    /// Line description.
    pub description: Option<String>,
    /// Third party, if any.
    pub third_party_id: Option<ThirdPartyId>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Gross debit and credit sums over a set of entries, not netted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Sum of debit amounts.
    pub debit: Decimal,
    /// Sum of credit amounts.
    pub credit: Decimal,
}

impl Movement {
    /// Returns true if there was no movement at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Adds one entry's amounts to the movement.
    pub fn add(&mut self, debit: Decimal, credit: Decimal) {
        self.debit += debit;
        self.credit += credit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_movement_zero() {
        let mut movement = Movement::default();
        assert!(movement.is_zero());

        movement.add(dec!(10), dec!(0));
        assert!(!movement.is_zero());
        assert_eq!(movement.debit, dec!(10));
        assert_eq!(movement.credit, dec!(0));
    }
}
