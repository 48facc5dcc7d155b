//! Interfaces to the subsystems the editor depends on but does not own:
//! permission checks and floor-plan persistence.

mod permissions;
mod repository;

pub use permissions::{FullAccess, PermissionPolicy, ReadOnly, Role, RolePermissions};
pub use repository::{FloorPlanRepository, InMemoryRepository};
