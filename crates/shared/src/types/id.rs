//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `VoucherId` where a
//! `TenantId` is expected. IDs are UUID v7, so their byte order is creation
//! order; the ledger's deterministic (date, voucher id) entry ordering
//! depends on this.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(TenantId, "Unique identifier for a tenant.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(VoucherId, "Unique identifier for an accounting voucher.");
typed_id!(EntryId, "Unique identifier for a voucher entry.");
typed_id!(ThirdPartyId, "Unique identifier for a third party (contact).");
typed_id!(CostCenterId, "Unique identifier for a cost center.");
typed_id!(FiscalPeriodId, "Unique identifier for a fiscal period.");
typed_id!(SourceDocumentId, "Unique identifier for an integration source document link.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = VoucherId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_display_roundtrip() {
        let id = TenantId::new();
        let parsed = TenantId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }

    #[test]
    fn test_ids_order_by_uuid_bytes() {
        let first = VoucherId::from_uuid(Uuid::from_u128(1));
        let second = VoucherId::from_uuid(Uuid::from_u128(2));
        assert!(first < second);
    }
}
