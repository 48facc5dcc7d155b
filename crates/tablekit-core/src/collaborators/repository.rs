//! Persistence boundary
//!
//! The editor hands whole plans to a [`FloorPlanRepository`] and never
//! waits on it before accepting further edits. Transport details live behind
//! the trait.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::data::FloorPlan;
use crate::error::PersistenceError;

/// Remote or local storage of floor plans
#[async_trait]
pub trait FloorPlanRepository: Send + Sync {
    /// Fetch every stored plan
    async fn load_floor_plans(&self) -> Result<Vec<FloorPlan>, PersistenceError>;

    /// Store a plan and return the stored version
    async fn save_floor_plan(&self, plan: &FloorPlan) -> Result<FloorPlan, PersistenceError>;

    /// Delete a plan by id
    async fn delete_floor_plan(&self, id: &str) -> Result<(), PersistenceError>;
}

/// Process-local repository used for demos and tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    plans: RwLock<Vec<FloorPlan>>,
    offline: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(plans: Vec<FloorPlan>) -> Self {
        Self {
            plans: RwLock::new(plans),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate an unreachable backend: every call fails while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<FloorPlan> {
        self.plans.read().iter().find(|p| p.id == id).cloned()
    }

    fn check_online(&self) -> Result<(), PersistenceError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(PersistenceError::Unavailable(
                "in-memory repository is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FloorPlanRepository for InMemoryRepository {
    async fn load_floor_plans(&self) -> Result<Vec<FloorPlan>, PersistenceError> {
        self.check_online()?;
        Ok(self.plans.read().clone())
    }

    async fn save_floor_plan(&self, plan: &FloorPlan) -> Result<FloorPlan, PersistenceError> {
        self.check_online()?;
        if plan.name.trim().is_empty() {
            return Err(PersistenceError::SaveRejected {
                reason: "floor plan name is empty".to_string(),
            });
        }

        let mut stored = plan.clone();
        stored.updated_at = Utc::now();

        let mut plans = self.plans.write();
        match plans.iter_mut().find(|p| p.id == stored.id) {
            Some(existing) => *existing = stored.clone(),
            None => plans.push(stored.clone()),
        }
        tracing::debug!("Stored floor plan {} ({})", stored.id, stored.name);
        Ok(stored)
    }

    async fn delete_floor_plan(&self, id: &str) -> Result<(), PersistenceError> {
        self.check_online()?;
        let mut plans = self.plans.write();
        let before = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() == before {
            return Err(PersistenceError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
