//! The authenticated session held by an interactive caller.

use parking_lot::RwLock;

use super::{Actor, Capability};

/// Holds the one authenticated actor for the lifetime of a work session.
///
/// Bound on successful login, cleared on logout, never persisted. The
/// context is an owned value the caller threads through its own layers;
/// engine operations still take an explicit [`Actor`] so a multi-actor
/// service can bypass the session entirely.
///
/// Capability lookups fail closed: with no actor bound, every check is
/// false.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: RwLock<Option<Actor>>,
}

impl SessionContext {
    /// Creates an empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an authenticated actor, replacing any prior binding.
    pub fn bind(&self, actor: Actor) {
        *self.current.write() = Some(actor);
    }

    /// Clears the session on logout.
    pub fn unbind(&self) {
        *self.current.write() = None;
    }

    /// The currently bound actor, if any.
    pub fn current_actor(&self) -> Option<Actor> {
        self.current.read().clone()
    }

    /// Whether the bound actor's role carries the capability. False when
    /// no actor is bound.
    pub fn allows(&self, capability: Capability) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|actor| actor.allows(capability))
    }

    /// Derived predicate, see [`CapabilitySet::can_edit_any_asset_info`].
    ///
    /// [`CapabilitySet::can_edit_any_asset_info`]: super::CapabilitySet::can_edit_any_asset_info
    pub fn can_edit_any_asset_info(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|actor| actor.role.capabilities.can_edit_any_asset_info())
    }

    /// Derived predicate, see [`CapabilitySet::has_admin_access`].
    ///
    /// [`CapabilitySet::has_admin_access`]: super::CapabilitySet::has_admin_access
    pub fn has_admin_access(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|actor| actor.role.capabilities.has_admin_access())
    }
}
