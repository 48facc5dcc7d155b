use std::sync::Arc;

use tablekit_core::{FloorPlan, FloorPlanRepository, InMemoryRepository, PersistenceError};

#[tokio::test]
async fn test_repository_behind_trait_object() {
    let repository: Arc<dyn FloorPlanRepository> = Arc::new(InMemoryRepository::new());
    let plan = FloorPlan::new("Salle");

    let stored = repository.save_floor_plan(&plan).await.expect("save");
    assert_eq!(stored.id, plan.id);
    assert!(stored.updated_at >= plan.updated_at);

    let plans = repository.load_floor_plans().await.expect("load");
    assert_eq!(plans.len(), 1);

    repository.delete_floor_plan(&plan.id).await.expect("delete");
    assert!(repository.load_floor_plans().await.expect("load").is_empty());
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let repository = InMemoryRepository::new();
    let plan = FloorPlan::new("  ");
    assert!(matches!(
        repository.save_floor_plan(&plan).await,
        Err(PersistenceError::SaveRejected { .. })
    ));
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_concurrent_saves() {
    let repository = Arc::new(InMemoryRepository::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let repository = Arc::clone(&repository);
        handles.push(tokio::spawn(async move {
            let plan = FloorPlan::new(format!("Salle {}", i));
            repository.save_floor_plan(&plan).await
        }));
    }
    for handle in handles {
        handle.await.expect("join").expect("save");
    }
    assert_eq!(repository.len(), 8);
}
