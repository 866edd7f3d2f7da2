//! Named permission bits and the set type that combines them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One named permission bit on a role.
///
/// Capabilities are independent booleans; none implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Create, edit, and delete actors.
    ManageUsers,
    /// Create and edit roles and their capability sets.
    ManageRoles,
    CreateLicenseGrants,
    EditLicenseGrants,
    DeleteLicenseGrants,
    CreateAssets,
    /// Edit title, age rating, duration, file path.
    EditAssetBasicInfo,
    /// Edit purchase date, expiration, remaining showings.
    EditAssetRightsInfo,
    DeleteAssets,
    ManageDistributorContacts,
    /// Add, edit, and delete broadcast slots; mark them aired manually.
    ManageSchedule,
    ViewContent,
    ViewSchedule,
    ViewContacts,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 14] = [
        Capability::ManageUsers,
        Capability::ManageRoles,
        Capability::CreateLicenseGrants,
        Capability::EditLicenseGrants,
        Capability::DeleteLicenseGrants,
        Capability::CreateAssets,
        Capability::EditAssetBasicInfo,
        Capability::EditAssetRightsInfo,
        Capability::DeleteAssets,
        Capability::ManageDistributorContacts,
        Capability::ManageSchedule,
        Capability::ViewContent,
        Capability::ViewSchedule,
        Capability::ViewContacts,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ManageUsers => "ManageUsers",
            Capability::ManageRoles => "ManageRoles",
            Capability::CreateLicenseGrants => "CreateLicenseGrants",
            Capability::EditLicenseGrants => "EditLicenseGrants",
            Capability::DeleteLicenseGrants => "DeleteLicenseGrants",
            Capability::CreateAssets => "CreateAssets",
            Capability::EditAssetBasicInfo => "EditAssetBasicInfo",
            Capability::EditAssetRightsInfo => "EditAssetRightsInfo",
            Capability::DeleteAssets => "DeleteAssets",
            Capability::ManageDistributorContacts => "ManageDistributorContacts",
            Capability::ManageSchedule => "ManageSchedule",
            Capability::ViewContent => "ViewContent",
            Capability::ViewSchedule => "ViewSchedule",
            Capability::ViewContacts => "ViewContacts",
        };
        write!(f, "{name}")
    }
}

/// A role's capability set, stored as a bitmask.
///
/// Derived predicates are computed here and nowhere else, so every caller
/// consults the same combination logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySet(u16);

impl CapabilitySet {
    /// The empty set: every check fails.
    pub fn none() -> Self {
        Self(0)
    }

    /// The full set, as held by an administrator role.
    pub fn all() -> Self {
        Self::of(&Capability::ALL)
    }

    /// Builds a set from the listed capabilities.
    pub fn of(capabilities: &[Capability]) -> Self {
        let mut set = Self::none();
        for capability in capabilities {
            set = set.with(*capability);
        }
        set
    }

    /// Returns the set with one more capability granted.
    #[must_use]
    pub fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Returns the set with one capability revoked.
    #[must_use]
    pub fn without(self, capability: Capability) -> Self {
        Self(self.0 & !capability.bit())
    }

    /// Whether the set carries the given capability.
    pub fn allows(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Derived: may edit any asset information, basic or rights.
    pub fn can_edit_any_asset_info(self) -> bool {
        self.allows(Capability::EditAssetBasicInfo) || self.allows(Capability::EditAssetRightsInfo)
    }

    /// Derived: has administrative access (user or role management).
    pub fn has_admin_access(self) -> bool {
        self.allows(Capability::ManageUsers) || self.allows(Capability::ManageRoles)
    }

    /// Capabilities present in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.allows(*c))
    }
}
