//! Capability checks consumed by the editor.
//!
//! The editor never interprets roles; it only asks a [`PermissionPolicy`]
//! whether the current role may view, edit or delete.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque role name handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role(pub String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability predicates gating the editor's mutation entry points.
pub trait PermissionPolicy: Send + Sync {
    fn can_view(&self, role: &Role) -> bool;
    fn can_edit(&self, role: &Role) -> bool;
    fn can_delete(&self, role: &Role) -> bool;
}

/// Grants everything to every role.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAccess;

impl PermissionPolicy for FullAccess {
    fn can_view(&self, _role: &Role) -> bool {
        true
    }

    fn can_edit(&self, _role: &Role) -> bool {
        true
    }

    fn can_delete(&self, _role: &Role) -> bool {
        true
    }
}

/// Grants viewing only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl PermissionPolicy for ReadOnly {
    fn can_view(&self, _role: &Role) -> bool {
        true
    }

    fn can_edit(&self, _role: &Role) -> bool {
        false
    }

    fn can_delete(&self, _role: &Role) -> bool {
        false
    }
}

/// Explicit role lists, as loaded from the back office's permission table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePermissions {
    view: HashSet<String>,
    edit: HashSet<String>,
    delete: HashSet<String>,
}

impl RolePermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_view(mut self, role: &str) -> Self {
        self.view.insert(role.to_string());
        self
    }

    /// Editing implies viewing.
    pub fn allow_edit(mut self, role: &str) -> Self {
        self.view.insert(role.to_string());
        self.edit.insert(role.to_string());
        self
    }

    /// Deleting implies editing.
    pub fn allow_delete(mut self, role: &str) -> Self {
        self.view.insert(role.to_string());
        self.edit.insert(role.to_string());
        self.delete.insert(role.to_string());
        self
    }
}

impl PermissionPolicy for RolePermissions {
    fn can_view(&self, role: &Role) -> bool {
        self.view.contains(role.as_str())
    }

    fn can_edit(&self, role: &Role) -> bool {
        self.edit.contains(role.as_str())
    }

    fn can_delete(&self, role: &Role) -> bool {
        self.delete.contains(role.as_str())
    }
}
