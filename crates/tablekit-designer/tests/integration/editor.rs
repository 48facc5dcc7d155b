use std::sync::Arc;

use tablekit_core::{
    EntityRef, Error, FloorPlan, FullAccess, ImportError, InMemoryRepository, MessageLevel,
    ObstacleCategory, ObstacleUpdate, PerimeterUpdate, PermissionPolicy, Point, ReadOnly, Role,
    RolePermissions, Table, TableUpdate,
};
use tablekit_designer::canvas::{InteractionOutcome, Transform};
use tablekit_designer::tools::ToolMode;
use tablekit_designer::FloorPlanEditor;
use tablekit_settings::Config;
use tempfile::TempDir;

fn editor(permissions: Arc<dyn PermissionPolicy>, role: &str) -> FloorPlanEditor {
    let mut editor = FloorPlanEditor::new(
        &Config::default(),
        permissions,
        Role::from(role),
        Arc::new(InMemoryRepository::new()),
    );
    editor
        .canvas
        .store_mut()
        .add_floor_plan(FloorPlan::new("Salle"));
    editor
}

fn full_editor() -> FloorPlanEditor {
    editor(Arc::new(FullAccess), "admin")
}

fn room() -> PerimeterUpdate {
    PerimeterUpdate::custom(vec![
        Point::new(50.0, 50.0),
        Point::new(550.0, 50.0),
        Point::new(550.0, 450.0),
        Point::new(50.0, 450.0),
    ])
}

fn last_level(editor: &FloorPlanEditor) -> Option<MessageLevel> {
    editor.notifications().latest().map(|n| n.level)
}

#[test]
fn test_read_only_role_cannot_mutate() {
    let mut editor = editor(Arc::new(ReadOnly), "waiter");
    let result = editor.add_table(Table::new("T1", 4, Point::new(100.0, 100.0)));

    assert!(matches!(result, Err(Error::PermissionDenied { .. })));
    assert_eq!(last_level(&editor), Some(MessageLevel::Warning));
    assert!(editor.current_plan().expect("plan").tables.is_empty());

    editor.set_tool(ToolMode::AddTable);
    assert!(editor.click(Point::new(300.0, 300.0)).is_err());
    assert!(editor.drag_start(EntityRef::table("x"), Point::default()).is_err());
    assert!(editor.export_json().is_ok());
}

#[test]
fn test_viewing_is_enough_to_select() {
    let mut editor = editor(Arc::new(ReadOnly), "waiter");
    let table = Table::new("T1", 4, Point::new(100.0, 100.0));
    let id = table.id.clone();
    editor.canvas.store_mut().add_table(table);

    let outcome = editor.click(Point::new(100.0, 100.0)).expect("click");
    assert_eq!(outcome, InteractionOutcome::Selected(EntityRef::table(id)));
    assert_eq!(editor.selected_table().map(|t| t.label.as_str()), Some("T1"));
}

#[test]
fn test_role_without_view_cannot_select() {
    let mut editor = editor(Arc::new(RolePermissions::new().allow_view("waiter")), "guest");
    assert!(matches!(
        editor.select(EntityRef::table("anything")),
        Err(Error::PermissionDenied { .. })
    ));
    assert!(editor.switch_floor_plan("plan-x").is_err());
}

#[test]
fn test_delete_needs_delete_capability() {
    let permissions = RolePermissions::new().allow_edit("manager");
    let mut editor = editor(Arc::new(permissions), "manager");
    let id = editor
        .add_table(Table::new("T1", 4, Point::new(100.0, 100.0)))
        .expect("add")
        .expect("created");

    assert!(matches!(
        editor.delete_table(&id),
        Err(Error::PermissionDenied { .. })
    ));
    assert!(editor.current_plan().and_then(|p| p.table(&id)).is_some());

    // The delete key is an editing gesture
    editor.select(EntityRef::table(id.clone())).expect("select");
    let outcome = editor.delete_key().expect("delete key");
    assert_eq!(outcome, InteractionOutcome::Deleted(EntityRef::table(id)));
}

#[test]
fn test_creation_outside_perimeter_warns() {
    let mut editor = full_editor();
    editor.set_perimeter(room()).expect("perimeter");
    editor.set_tool(ToolMode::AddTable);

    let outcome = editor.click(Point::new(10.0, 10.0)).expect("click");
    assert!(outcome.is_rejection());
    let latest = editor.notifications().latest().expect("notification");
    assert_eq!(latest.level, MessageLevel::Warning);
    assert!(latest.message.contains("perimeter"));

    let outcome = editor.click(Point::new(300.0, 300.0)).expect("click");
    assert!(matches!(outcome, InteractionOutcome::Created(_)));
    assert_eq!(editor.canvas.mode(), ToolMode::Select);
}

#[test]
fn test_rejected_drag_warns_and_keeps_position() {
    let mut editor = full_editor();
    editor.set_perimeter(room()).expect("perimeter");
    let id = editor
        .add_table(Table::new("T1", 4, Point::new(200.0, 200.0)))
        .expect("add")
        .expect("created");
    let entity = EntityRef::table(id.clone());
    let before = editor.notifications().len();

    editor
        .drag_start(entity.clone(), Point::new(200.0, 200.0))
        .expect("drag");
    editor.drag_move(Point::new(100.0, 100.0));
    let outcome = editor.drag_end(Point::new(700.0, 500.0));

    assert!(matches!(outcome, InteractionOutcome::DragRejected { .. }));
    assert_eq!(editor.notifications().len(), before + 1);
    assert_eq!(last_level(&editor), Some(MessageLevel::Warning));
    assert_eq!(
        editor.current_plan().and_then(|p| p.table(&id)).map(|t| t.center()),
        Some(Point::new(200.0, 200.0))
    );
}

#[test]
fn test_capacity_overrun_is_advisory() {
    let mut editor = full_editor();
    editor.update_capacity_limit(6).expect("limit");
    assert!(editor.notifications().is_empty());

    editor
        .add_table(Table::new("T1", 4, Point::new(100.0, 100.0)))
        .expect("add");
    assert!(editor.notifications().is_empty());

    let second = editor
        .add_table(Table::new("T2", 4, Point::new(300.0, 100.0)))
        .expect("add");
    assert!(second.is_some());
    let latest = editor.notifications().latest().expect("warning");
    assert_eq!(latest.level, MessageLevel::Warning);
    assert!(latest.message.starts_with("Capacity exceeded"));
    assert_eq!(editor.current_plan().map(|p| p.tables.len()), Some(2));

    // Raising a table's capacity re-checks the limit
    editor.notifications_mut().drain();
    let id = editor.current_plan().expect("plan").tables[0].id.clone();
    editor
        .update_table(
            &id,
            TableUpdate {
                capacity: Some(6),
                ..Default::default()
            },
        )
        .expect("update");
    assert_eq!(last_level(&editor), Some(MessageLevel::Warning));
}

#[test]
fn test_import_errors_notify_and_change_nothing() {
    let mut editor = full_editor();
    let plans_before = editor.plans().len();

    let err = editor.import_json(r#"{"tables": []}"#).expect_err("missing name");
    assert!(matches!(err, Error::Import(ImportError::MissingName)));
    let latest = editor.notifications().latest().expect("notification");
    assert_eq!(latest.level, MessageLevel::Error);
    assert!(latest.message.starts_with("Import failed"));

    assert!(editor.import_json("not json").is_err());
    assert_eq!(editor.plans().len(), plans_before);
}

#[test]
fn test_import_clashing_id_gets_fresh_id() {
    let mut editor = full_editor();
    let original = editor.current_plan().expect("plan").id.clone();
    let json = editor.export_json().expect("export");

    let imported = editor.import_json(&json).expect("import");
    assert_ne!(imported, original);
    assert_eq!(editor.plans().len(), 2);
    assert_eq!(editor.current_plan().map(|p| p.id.clone()), Some(imported));
    assert_eq!(last_level(&editor), Some(MessageLevel::Success));
}

#[test]
fn test_selected_entity_updates() {
    let mut editor = full_editor();
    assert_eq!(
        editor.update_selected_table(TableUpdate::size(80.0, 80.0)).ok(),
        Some(false)
    );

    let id = editor
        .add_obstacle_of(ObstacleCategory::Mur, Point::new(200.0, 200.0))
        .expect("add")
        .expect("created");
    editor.select(EntityRef::obstacle(id)).expect("select");
    let changed = editor
        .update_selected_obstacle(ObstacleUpdate {
            color: Some("#000000".to_string()),
            ..Default::default()
        })
        .expect("update");
    assert!(changed);

    let obstacle = editor.selected_obstacle().expect("selected");
    assert_eq!(obstacle.color, "#000000");
    assert!(obstacle.customized.color);
    assert!(editor.selected_table().is_none());
}

#[test]
fn test_duplicate_key_selects_copy() {
    let mut editor = full_editor();
    let id = editor
        .add_obstacle_of(ObstacleCategory::Poteau, Point::new(200.0, 200.0))
        .expect("add")
        .expect("created");
    editor.select(EntityRef::obstacle(id.clone())).expect("select");

    let outcome = editor.duplicate_key().expect("duplicate");
    let InteractionOutcome::Duplicated(copy) = outcome else {
        panic!("expected a duplicate, got {:?}", outcome);
    };
    assert_ne!(copy.id, id);
    assert_eq!(editor.selected_obstacle().map(|o| o.center()), Some(Point::new(220.0, 220.0)));
    assert_eq!(editor.current_plan().map(|p| p.obstacles.len()), Some(2));
}

#[test]
fn test_perimeter_drawing_notifies_on_close() {
    let mut editor = full_editor();
    editor.set_tool(ToolMode::DrawPerimeter);
    for p in [(100.0, 100.0), (500.0, 100.0), (500.0, 400.0), (100.0, 400.0)] {
        editor.click(p.into()).expect("click");
    }
    let outcome = editor.click(Point::new(110.0, 105.0)).expect("close");
    assert_eq!(outcome, InteractionOutcome::PerimeterClosed(4));

    let latest = editor.notifications().latest().expect("notification");
    assert_eq!(latest.message, "Perimeter closed with 4 points");
    assert_eq!(editor.scene().perimeter.len(), 4);
}

#[test]
fn test_transform_and_undo() {
    let mut editor = full_editor();
    let id = editor
        .add_table(Table::new("T1", 4, Point::new(200.0, 200.0)))
        .expect("add")
        .expect("created");
    let entity = EntityRef::table(id.clone());

    let mut transform = Transform::scale(1.5, 1.5).with_rotation(90.0);
    editor.transform_end(&entity, &mut transform).expect("transform");
    assert_eq!(
        editor.current_plan().and_then(|p| p.table(&id)).map(|t| t.width),
        Some(90.0)
    );

    assert!(editor.undo().expect("undo"));
    assert_eq!(
        editor.current_plan().and_then(|p| p.table(&id)).map(|t| t.width),
        Some(60.0)
    );
    assert!(editor.redo().expect("redo"));
    assert_eq!(
        editor.current_plan().and_then(|p| p.table(&id)).map(|t| t.rotation),
        Some(90.0)
    );
}

#[test]
fn test_rename_rejects_empty_name() {
    let mut editor = full_editor();
    assert_eq!(editor.rename_floor_plan("   ", None).ok(), Some(false));
    assert_eq!(last_level(&editor), Some(MessageLevel::Warning));
    assert_eq!(editor.current_plan().map(|p| p.name.as_str()), Some("Salle"));

    assert!(editor
        .rename_floor_plan("Grande salle", Some("Rez-de-chaussee".to_string()))
        .expect("rename"));
    let plan = editor.current_plan().expect("plan");
    assert_eq!(plan.name, "Grande salle");
    assert_eq!(plan.description, "Rez-de-chaussee");
}

#[test]
fn test_tool_names() {
    let mut editor = full_editor();
    assert!(editor.set_tool_by_name("drag"));
    assert_eq!(editor.canvas.mode(), ToolMode::Pan);
    assert!(!editor.set_tool_by_name("spray"));
    editor.begin_add_obstacle(ObstacleCategory::Bar);
    assert_eq!(editor.canvas.mode(), ToolMode::AddObstacle);
    assert_eq!(editor.escape(), InteractionOutcome::Cancelled);
    assert_eq!(editor.canvas.mode(), ToolMode::Select);
}

#[test]
fn test_exports() {
    let mut editor = full_editor();
    editor
        .add_table(Table::new("T1", 4, Point::new(100.0, 100.0)))
        .expect("add");

    let csv = editor.export_csv().expect("csv");
    assert_eq!(csv.lines().count(), 2);
    let svg = editor.export_svg().expect("svg");
    assert!(svg.contains(">T1</text>"));

    let mut empty = FloorPlanEditor::new(
        &Config::default(),
        Arc::new(FullAccess),
        Role::from("admin"),
        Arc::new(InMemoryRepository::new()),
    );
    assert!(matches!(empty.export_json(), Err(Error::NoCurrentPlan)));
}

#[test]
fn test_file_save_and_open() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("salle.json");

    let mut editor = full_editor();
    editor
        .add_table(Table::new("T1", 4, Point::new(100.0, 100.0)))
        .expect("add");
    editor.save_to_file(&path).expect("save");
    assert_eq!(editor.current_file_path(), Some(&path));

    let mut other = full_editor();
    let id = other.load_from_file(&path).expect("open");
    assert_eq!(other.current_plan().map(|p| p.id.clone()), Some(id));
    assert_eq!(other.current_plan().map(|p| p.tables.len()), Some(1));

    assert!(other.load_from_file(dir.path().join("missing.json")).is_err());
    assert_eq!(last_level(&other), Some(MessageLevel::Error));
}
