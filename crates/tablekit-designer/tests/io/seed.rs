use tablekit_core::{PerimeterShape, Point, TableShape, TableStatus};
use tablekit_designer::geometry::point_in_polygon;
use tablekit_designer::seed::{default_perimeter, transform_seed, SeedData};
use tablekit_settings::CanvasSettings;

const SEED_JSON: &str = r#"{
    "rooms": [
        {"id": "salon", "name": "Salon", "capacityLimit": 12},
        {"id": "cave", "name": "Cave voutee", "description": "Sous-sol"}
    ],
    "tables": [
        {"id": "10", "roomId": "salon", "number": "10", "capacity": 4, "status": "reserved"},
        {"id": "11", "roomId": "salon", "number": "11", "capacity": 2,
         "shape": "circle", "x": 300.0, "y": 320.0, "width": 50.0, "height": 50.0},
        {"id": "12", "roomId": "grenier", "number": "12", "capacity": 8}
    ]
}"#;

#[test]
fn test_one_plan_per_room() {
    let data = SeedData::from_json(SEED_JSON).expect("seed");
    let plans = transform_seed(&data, &CanvasSettings::default());

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].id, "plan-salon");
    assert_eq!(plans[0].capacity_limit, 12);
    assert_eq!(plans[1].id, "plan-cave");
    assert_eq!(plans[1].description, "Sous-sol");
    assert_eq!(plans[1].capacity_limit, 50);
}

#[test]
fn test_tables_of_unknown_rooms_are_skipped() {
    let data = SeedData::from_json(SEED_JSON).expect("seed");
    let plans = transform_seed(&data, &CanvasSettings::default());
    let total: usize = plans.iter().map(|p| p.tables.len()).sum();
    assert_eq!(total, 2);
    assert!(plans[1].tables.is_empty());
}

#[test]
fn test_table_records_are_mapped() {
    let data = SeedData::from_json(SEED_JSON).expect("seed");
    let plans = transform_seed(&data, &CanvasSettings::default());
    let salon = &plans[0];

    let reserved = salon.table("table-10").expect("table 10");
    assert_eq!(reserved.label, "T10");
    assert_eq!(reserved.capacity, 4);
    assert_eq!(reserved.color, TableStatus::Reserved.default_color());
    assert!(point_in_polygon(reserved.center(), &salon.perimeter));

    let placed = salon.table("table-11").expect("table 11");
    assert_eq!(placed.shape, TableShape::Circle);
    assert_eq!(placed.center(), Point::new(300.0, 320.0));
    assert_eq!((placed.width, placed.height), (50.0, 50.0));
}

#[test]
fn test_default_perimeters() {
    assert_eq!(default_perimeter("terrasse").0, PerimeterShape::Rectangle);
    assert_eq!(default_perimeter("Jardin").0, PerimeterShape::Circle);
    let (shape, params) = default_perimeter("salon");
    assert_eq!(shape, PerimeterShape::Polygon);
    assert_eq!(params.sides, Some(6));
    let (shape, params) = default_perimeter("anything");
    assert_eq!(shape, PerimeterShape::Rectangle);
    assert_eq!((params.width, params.height), (Some(700.0), Some(500.0)));
}

#[test]
fn test_demo_seed_places_every_table_inside() {
    let plans = transform_seed(&SeedData::demo(), &CanvasSettings::default());
    assert_eq!(plans.len(), 2);
    for plan in &plans {
        assert!(plan.has_perimeter());
        for table in &plan.tables {
            assert!(
                point_in_polygon(table.center(), &plan.perimeter),
                "{} outside {}",
                table.label,
                plan.name
            );
        }
    }
    assert_eq!(plans[0].tables.len(), 4);
    assert_eq!(plans[0].total_capacity(), 16);

    // Grid slots are distinct
    let centers: Vec<Point> = plans[0].tables.iter().map(|t| t.center()).collect();
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_invalid_seed_json_is_an_error() {
    assert!(SeedData::from_json("{\"tables\": []}").is_err());
}
