//! Integration tests for Airwave
//!
//! These tests drive the schedule engine end to end through its actor
//! handle, the way a UI or API collaborator would: authenticated actors,
//! a shared repository, and an injectable clock.

#[path = "integration/scheduling_lifecycle.rs"]
mod scheduling_lifecycle;

#[path = "integration/permissions.rs"]
mod permissions;

#[path = "integration/common/mod.rs"]
mod common;
