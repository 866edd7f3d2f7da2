//! Domain model for the broadcast back office.
//!
//! Content assets, license grants, and broadcast slots carry the data the
//! schedule engine validates and transitions. All references between
//! entities are typed ids resolved through the repository; no entity holds
//! a lazily loaded neighbor.

pub mod content;
pub mod slot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use content::{ContentAsset, DistributorContact, LicenseGrant};
pub use slot::{BroadcastSlot, SlotStatus};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Identifier of a content asset.
    AssetId
);
entity_id!(
    /// Identifier of a license grant (rights holder record).
    GrantId
);
entity_id!(
    /// Identifier of a broadcast slot.
    SlotId
);
entity_id!(
    /// Identifier of a distributor contact.
    ContactId
);
entity_id!(
    /// Identifier of a role.
    RoleId
);
entity_id!(
    /// Identifier of an actor.
    ActorId
);
