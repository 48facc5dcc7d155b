//! # TableKit Core
//!
//! Core types, traits, and utilities for TableKit.
//! Provides the floor-plan data model, the error taxonomy, user-facing
//! notifications and the collaborator interfaces (permissions, persistence)
//! consumed by the designer.

pub mod collaborators;
pub mod data;
pub mod error;
pub mod notification;

pub use collaborators::{
    FloorPlanRepository, FullAccess, InMemoryRepository, PermissionPolicy, ReadOnly, Role,
    RolePermissions,
};

pub use data::{
    new_entity_id, Bounds, CapacityStatus, CustomizedFields, EntityId, EntityKind, EntityRef,
    FloorPlan, Obstacle, ObstacleCategory, ObstaclePreset, ObstacleShape, ObstacleUpdate,
    PerimeterParams, PerimeterShape, PerimeterUpdate, Point, Property, PropertyValue, Size, Table,
    TableShape, TableStatus, TableUpdate, DEFAULT_CAPACITY_LIMIT, DEFAULT_TABLE_CAPACITY,
    DEFAULT_TABLE_COLOR, DEFAULT_TABLE_SIZE,
};

pub use error::{Error, ImportError, PersistenceError, Result};

pub use notification::{MessageLevel, Notification, NotificationCenter};
