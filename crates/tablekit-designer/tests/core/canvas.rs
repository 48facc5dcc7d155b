use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tablekit_core::{
    EntityKind, EntityRef, FloorPlan, Obstacle, ObstacleCategory, PerimeterParams,
    PerimeterShape, PerimeterUpdate, Point, Table, TableShape,
};
use tablekit_designer::canvas::{Canvas, DragEndEvent, InteractionOutcome, Transform};
use tablekit_designer::tools::ToolMode;
use tablekit_settings::{CanvasSettings, EditorSettings};

fn room() -> Vec<Point> {
    vec![
        Point::new(50.0, 50.0),
        Point::new(550.0, 50.0),
        Point::new(550.0, 450.0),
        Point::new(50.0, 450.0),
    ]
}

fn canvas_with_plan() -> Canvas {
    let mut canvas = Canvas::default();
    canvas.store_mut().add_floor_plan(FloorPlan::new("Salle"));
    canvas
}

fn canvas_with_room() -> Canvas {
    let mut canvas = canvas_with_plan();
    canvas
        .store_mut()
        .set_perimeter(PerimeterUpdate::custom(room()));
    canvas
}

fn place_table(canvas: &mut Canvas, at: Point) -> EntityRef {
    match canvas.place_table(Table::new("T1", 4, at)) {
        InteractionOutcome::Created(entity) => entity,
        other => panic!("table not created: {:?}", other),
    }
}

#[test]
fn test_add_table_respects_perimeter() {
    let mut canvas = canvas_with_room();
    canvas.set_mode(ToolMode::AddTable);

    let outcome = canvas.click(Point::new(10.0, 10.0));
    assert_eq!(outcome, InteractionOutcome::OutsidePerimeter(Point::new(10.0, 10.0)));
    assert!(outcome.is_rejection());
    assert_eq!(canvas.current_plan().map(|p| p.tables.len()), Some(0));
    assert_eq!(canvas.mode(), ToolMode::AddTable);

    let outcome = canvas.click(Point::new(300.0, 300.0));
    assert!(matches!(outcome, InteractionOutcome::Created(ref e) if e.kind == EntityKind::Table));
    assert_eq!(canvas.current_plan().map(|p| p.tables.len()), Some(1));
    assert_eq!(canvas.mode(), ToolMode::Select);

    let table = &canvas.current_plan().expect("plan").tables[0];
    assert_eq!(table.label, "T1");
    assert_eq!(table.center(), Point::new(300.0, 300.0));
}

#[test]
fn test_add_obstacle_uses_active_category() {
    let mut canvas = canvas_with_plan();
    canvas.tools_mut().begin_add_obstacle(ObstacleCategory::Mur);
    let outcome = canvas.click(Point::new(120.0, 80.0));
    assert!(matches!(outcome, InteractionOutcome::Created(_)));

    let obstacle = &canvas.current_plan().expect("plan").obstacles[0];
    assert_eq!(obstacle.category, ObstacleCategory::Mur);
    assert_eq!(obstacle.color, "#8B4513");
    assert_eq!((obstacle.width, obstacle.height), (100.0, 20.0));
    assert_eq!(canvas.mode(), ToolMode::Select);
}

#[test]
fn test_click_on_table_during_add_obstacle_selects_it() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.set_mode(ToolMode::AddObstacle);

    let outcome = canvas.click(Point::new(205.0, 195.0));
    assert_eq!(outcome, InteractionOutcome::Selected(t1.clone()));
    assert_eq!(canvas.mode(), ToolMode::Select);
    assert_eq!(canvas.selection(), Some(&t1));
    assert!(canvas.current_plan().expect("plan").obstacles.is_empty());
}

#[test]
fn test_stage_click_clears_selection() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.select_entity(t1);

    assert_eq!(canvas.click(Point::new(700.0, 500.0)), InteractionOutcome::SelectionCleared);
    assert_eq!(canvas.selection(), None);
    assert_eq!(canvas.stage_click(), InteractionOutcome::Ignored);
}

#[test]
fn test_select_unknown_entity_is_ignored() {
    let mut canvas = canvas_with_plan();
    assert_eq!(
        canvas.select_entity(EntityRef::table("table-gone")),
        InteractionOutcome::Ignored
    );
}

#[test]
fn test_draw_perimeter_by_clicks() {
    let mut canvas = canvas_with_plan();
    canvas.set_mode(ToolMode::DrawPerimeter);

    assert_eq!(canvas.click(Point::new(100.0, 100.0)), InteractionOutcome::PerimeterPoint(1));
    assert_eq!(canvas.click(Point::new(400.0, 100.0)), InteractionOutcome::PerimeterPoint(2));
    assert_eq!(canvas.click(Point::new(400.0, 400.0)), InteractionOutcome::PerimeterPoint(3));
    assert_eq!(canvas.scene().pending_perimeter.len(), 3);
    assert_eq!(canvas.click(Point::new(105.0, 98.0)), InteractionOutcome::PerimeterClosed(3));

    let plan = canvas.current_plan().expect("plan");
    assert_eq!(plan.perimeter.len(), 3);
    assert_eq!(plan.perimeter_shape, PerimeterShape::Custom);
    assert_eq!(canvas.mode(), ToolMode::Select);
    assert!(canvas.scene().pending_perimeter.is_empty());
}

#[test]
fn test_perimeter_click_on_table_adds_vertex() {
    let mut canvas = canvas_with_plan();
    place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.set_mode(ToolMode::DrawPerimeter);
    assert_eq!(canvas.click(Point::new(200.0, 200.0)), InteractionOutcome::PerimeterPoint(1));
}

#[test]
fn test_generated_perimeter() {
    let mut canvas = canvas_with_plan();
    let outcome = canvas.apply_perimeter_shape(
        PerimeterShape::Polygon,
        PerimeterParams::polygon(200.0, 8),
        Point::new(400.0, 300.0),
    );
    assert_eq!(outcome, InteractionOutcome::PerimeterClosed(8));
    assert_eq!(
        canvas.apply_perimeter_shape(
            PerimeterShape::Custom,
            PerimeterParams::default(),
            Point::default()
        ),
        InteractionOutcome::Ignored
    );
    assert_eq!(canvas.current_plan().map(|p| p.perimeter.len()), Some(8));
}

#[test]
fn test_drag_inside_perimeter_commits_and_calls_back() {
    let mut canvas = canvas_with_room();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));

    let events: Arc<Mutex<Vec<DragEndEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    canvas.set_on_drag_end(Box::new(move |event| {
        sink.lock().expect("lock").push(event.clone());
    }));

    assert_eq!(
        canvas.drag_start(t1.clone(), Point::new(200.0, 200.0)),
        InteractionOutcome::DragStarted(t1.clone())
    );
    let outcome = canvas.drag_end(Point::new(300.0, 320.0));
    assert_eq!(
        outcome,
        InteractionOutcome::Moved {
            entity: t1.clone(),
            position: Point::new(300.0, 320.0)
        }
    );

    let table = canvas.store().table(&t1.id).expect("table");
    assert_eq!(table.center(), Point::new(300.0, 320.0));

    let events = events.lock().expect("lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].from, Point::new(200.0, 200.0));
    assert_eq!(events[0].to, Point::new(300.0, 320.0));
}

#[test]
fn test_drag_outside_perimeter_is_rejected() {
    let mut canvas = canvas_with_room();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    let revision = canvas.store().revision();

    canvas.drag_start(t1.clone(), Point::new(200.0, 200.0));
    let outcome = canvas.drag_end(Point::new(20.0, 20.0));
    assert!(matches!(outcome, InteractionOutcome::DragRejected { .. }));
    assert_eq!(canvas.store().revision(), revision);
    assert_eq!(
        canvas.store().table(&t1.id).map(|t| t.center()),
        Some(Point::new(200.0, 200.0))
    );
    assert!(canvas.drag_state().is_none());
}

#[test]
fn test_drag_requires_editable_and_drag_mode() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));

    canvas.set_drag_mode(false);
    assert_eq!(canvas.drag_start(t1.clone(), Point::new(200.0, 200.0)), InteractionOutcome::Ignored);

    canvas.set_drag_mode(true);
    canvas.set_editable(false);
    assert_eq!(canvas.drag_start(t1.clone(), Point::new(200.0, 200.0)), InteractionOutcome::Ignored);

    canvas.set_editable(true);
    assert!(matches!(
        canvas.drag_start(t1, Point::new(200.0, 200.0)),
        InteractionOutcome::DragStarted(_)
    ));
}

#[test]
fn test_drag_moves_are_throttled() {
    let editor = EditorSettings {
        drag_throttle_ms: 50,
        ..Default::default()
    };
    let mut canvas = Canvas::new(&editor, CanvasSettings::default());
    canvas.store_mut().add_floor_plan(FloorPlan::new("Salle"));
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.drag_start(t1, Point::new(200.0, 200.0));

    let start = Instant::now();
    assert!(matches!(
        canvas.drag_move_at(Point::new(210.0, 200.0), start),
        InteractionOutcome::DragMoved { .. }
    ));
    assert_eq!(
        canvas.drag_move_at(Point::new(220.0, 200.0), start + Duration::from_millis(10)),
        InteractionOutcome::Ignored
    );
    assert!(matches!(
        canvas.drag_move_at(Point::new(230.0, 200.0), start + Duration::from_millis(60)),
        InteractionOutcome::DragMoved { .. }
    ));
    assert_eq!(
        canvas.drag_state().map(|d| d.position),
        Some(Point::new(230.0, 200.0))
    );

    // Live moves never touch the store
    let plan = canvas.current_plan().expect("plan");
    assert_eq!(plan.tables[0].center(), Point::new(200.0, 200.0));
}

#[test]
fn test_transform_end_applies_and_resets_scale() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));

    let mut transform = Transform::scale(2.0, 0.5).with_rotation(-45.0);
    let outcome = canvas.transform_end(&t1, &mut transform);
    assert_eq!(outcome, InteractionOutcome::Transformed(t1.clone()));
    assert!(transform.is_identity_scale());

    let table = canvas.store().table(&t1.id).expect("table");
    assert_eq!(table.width, 120.0);
    assert_eq!(table.height, 30.0);
    assert_eq!(table.rotation, 315.0);

    // Applying the reset transform again changes nothing
    let revision = canvas.store().revision();
    canvas.transform_end(&t1, &mut transform.with_rotation(315.0));
    assert_eq!(canvas.store().revision(), revision);
}

#[test]
fn test_transform_end_minimum_size() {
    let mut canvas = canvas_with_plan();
    let obstacle = Obstacle::from_category(ObstacleCategory::Porte, Point::new(300.0, 300.0));
    let entity = EntityRef::obstacle(obstacle.id.clone());
    canvas.place_obstacle(obstacle);

    let mut transform = Transform::scale(0.01, f64::NAN);
    canvas.transform_end(&entity, &mut transform);
    let obstacle = canvas.store().obstacle(&entity.id).expect("obstacle");
    assert_eq!(obstacle.width, 10.0);
    assert_eq!(obstacle.height, 10.0);
}

#[test]
fn test_delete_selected() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    assert_eq!(canvas.delete_selected(), InteractionOutcome::Ignored);

    canvas.select_entity(t1.clone());
    assert_eq!(canvas.delete_selected(), InteractionOutcome::Deleted(t1));
    assert_eq!(canvas.selection(), None);
    assert!(canvas.current_plan().expect("plan").tables.is_empty());
}

#[test]
fn test_duplicate_selected_obstacle() {
    let mut canvas = canvas_with_plan();
    let obstacle = Obstacle::from_category(ObstacleCategory::Mobilier, Point::new(300.0, 300.0));
    let original = EntityRef::obstacle(obstacle.id.clone());
    canvas.place_obstacle(obstacle);
    canvas.select_entity(original.clone());

    let copy = match canvas.duplicate_selected() {
        InteractionOutcome::Duplicated(entity) => entity,
        other => panic!("not duplicated: {:?}", other),
    };
    assert_ne!(copy, original);
    assert_eq!(canvas.selection(), Some(&copy));
    assert_eq!(
        canvas.store().obstacle(&copy.id).map(|o| o.center()),
        Some(Point::new(320.0, 320.0))
    );
}

#[test]
fn test_undo_drops_stale_selection() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.select_entity(t1);
    assert!(canvas.undo());
    assert_eq!(canvas.selection(), None);
}

#[test]
fn test_hit_test_rotated_and_circle_tables() {
    let mut canvas = canvas_with_plan();
    let round = Table::new("R", 2, Point::new(100.0, 100.0)).with_shape(TableShape::Circle);
    let round_id = round.id.clone();
    canvas.place_table(round);

    // Corner of the bounding box is outside the circle
    assert_eq!(canvas.hit_test(Point::new(128.0, 128.0)), None);
    assert_eq!(
        canvas.hit_test(Point::new(100.0, 125.0)),
        Some(EntityRef::table(round_id))
    );

    let mut long = Table::new("L", 8, Point::new(400.0, 300.0)).with_size(200.0, 40.0);
    long.rotation = 90.0;
    let long_id = long.id.clone();
    canvas.place_table(long);
    assert_eq!(
        canvas.hit_test(Point::new(400.0, 380.0)),
        Some(EntityRef::table(long_id))
    );
    assert_eq!(canvas.hit_test(Point::new(480.0, 300.0)), None);
}

#[test]
fn test_scene_marks_selection_and_capacity() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.select_entity(t1.clone());

    let scene = canvas.scene();
    assert_eq!(scene.tables.len(), 1);
    assert!(scene.tables[0].selected);
    assert_eq!(scene.selected, Some(t1));
    assert_eq!(scene.capacity.map(|c| c.total), Some(4));
    assert_eq!((scene.width, scene.height), (800.0, 600.0));
}

#[test]
fn test_containment_checks_are_memoized() {
    let mut canvas = canvas_with_room();
    assert!(canvas.inside_perimeter(Point::new(300.0, 300.0)));
    assert!(canvas.inside_perimeter(Point::new(300.0, 300.0)));
    assert_eq!(canvas.containment_stats(), (1, 1));
}

#[test]
fn test_escape_cancels_drag() {
    let mut canvas = canvas_with_plan();
    let t1 = place_table(&mut canvas, Point::new(200.0, 200.0));
    canvas.drag_start(t1, Point::new(200.0, 200.0));
    assert_eq!(canvas.cancel(), InteractionOutcome::Cancelled);
    assert!(canvas.drag_state().is_none());
    assert_eq!(canvas.drag_end(Point::new(300.0, 300.0)), InteractionOutcome::Ignored);
}
