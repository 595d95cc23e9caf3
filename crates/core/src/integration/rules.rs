//! Posting rules: business event to account code.
//!
//! Different tenants number their charts differently, so the mapping is an
//! injected, per-tenant table rather than constants in the builders. The
//! demo default follows the Colombian PUC.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::IntegrationError;

/// A business event the integration adapter knows how to post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingEvent {
    /// Customer receivable (invoice total).
    AccountsReceivable,
    /// Sales revenue (invoice subtotal).
    SalesRevenue,
    /// VAT collected on sales.
    VatPayable,
    /// Supplier payable (purchase total).
    SuppliersPayable,
    /// Services / purchases expense (purchase subtotal).
    ServiceExpense,
    /// Gross payroll expense.
    PayrollExpense,
    /// Net salaries payable.
    SalariesPayable,
    /// Payroll withholdings payable.
    PayrollWithholdings,
}

/// Per-tenant mapping from posting events to account codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingRules {
    accounts: HashMap<PostingEvent, String>,
}

impl PostingRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo rule set over the Colombian PUC.
    #[must_use]
    pub fn colombian_demo() -> Self {
        let mut rules = Self::new();
        rules.set(PostingEvent::AccountsReceivable, "130505");
        rules.set(PostingEvent::SalesRevenue, "413501");
        rules.set(PostingEvent::VatPayable, "240801");
        rules.set(PostingEvent::SuppliersPayable, "220505");
        rules.set(PostingEvent::ServiceExpense, "513501");
        rules.set(PostingEvent::PayrollExpense, "510501");
        rules.set(PostingEvent::SalariesPayable, "250501");
        rules.set(PostingEvent::PayrollWithholdings, "237005");
        rules
    }

    /// Sets the account code for an event.
    pub fn set(&mut self, event: PostingEvent, account_code: impl Into<String>) {
        self.accounts.insert(event, account_code.into());
    }

    /// Looks up the account code for an event.
    ///
    /// # Errors
    ///
    /// Returns `MissingRule` when the event has no configured account.
    pub fn account_for(&self, event: PostingEvent) -> Result<&str, IntegrationError> {
        self.accounts
            .get(&event)
            .map(String::as_str)
            .ok_or(IntegrationError::MissingRule(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_rules_cover_all_events() {
        let rules = PostingRules::colombian_demo();
        for event in [
            PostingEvent::AccountsReceivable,
            PostingEvent::SalesRevenue,
            PostingEvent::VatPayable,
            PostingEvent::SuppliersPayable,
            PostingEvent::ServiceExpense,
            PostingEvent::PayrollExpense,
            PostingEvent::SalariesPayable,
            PostingEvent::PayrollWithholdings,
        ] {
            assert!(rules.account_for(event).is_ok(), "missing rule for {event:?}");
        }
    }

    #[test]
    fn test_demo_rule_codes() {
        let rules = PostingRules::colombian_demo();
        assert_eq!(rules.account_for(PostingEvent::AccountsReceivable).unwrap(), "130505");
        assert_eq!(rules.account_for(PostingEvent::SalesRevenue).unwrap(), "413501");
        assert_eq!(rules.account_for(PostingEvent::VatPayable).unwrap(), "240801");
    }

    #[test]
    fn test_missing_rule() {
        let rules = PostingRules::new();
        assert!(matches!(
            rules.account_for(PostingEvent::SalesRevenue),
            Err(IntegrationError::MissingRule(PostingEvent::SalesRevenue))
        ));
    }

    #[test]
    fn test_tenant_override() {
        let mut rules = PostingRules::colombian_demo();
        rules.set(PostingEvent::SalesRevenue, "414005");
        assert_eq!(rules.account_for(PostingEvent::SalesRevenue).unwrap(), "414005");
    }
}
