//! Capability-based permission model and the session it gates.
//!
//! Every mutating engine operation is gated by a named capability on the
//! acting principal's role. Combination logic lives on [`CapabilitySet`] in
//! one place; call sites never re-derive it.

pub mod capability;
pub mod session;

use serde::{Deserialize, Serialize};

pub use capability::{Capability, CapabilitySet};
pub use session::SessionContext;

use crate::model::{ActorId, RoleId};

/// A named set of capabilities assignable to actors.
///
/// Roles are flat: there is no hierarchy or inheritance between them, each
/// carries its own explicit capability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Unique role name.
    pub name: String,
    pub description: String,
    pub capabilities: CapabilitySet,
}

impl Role {
    /// Whether this role carries the given capability.
    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.allows(capability)
    }
}

/// An authenticated principal with exactly one role.
///
/// Credential checking happens in the login collaborator; by the time an
/// `Actor` reaches this crate it is authenticated and its role is fully
/// populated. Engine operations take the actor explicitly instead of
/// consulting ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub login: String,
    pub role: Role,
}

impl Actor {
    /// Whether this actor's role carries the given capability.
    pub fn allows(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }
}
