use proptest::prelude::*;
use tablekit_core::{PerimeterParams, PerimeterShape, Point};
use tablekit_designer::geometry::{
    clamp_dimensions, clamp_position, coerce_dimension, generate_regular_polygon_points,
    point_in_polygon, polygon_bounds, polygon_centroid, shape_contains, ContainmentCache,
    HitShape, CIRCLE_SEGMENTS,
};

fn room() -> Vec<Point> {
    vec![
        Point::new(50.0, 50.0),
        Point::new(550.0, 50.0),
        Point::new(550.0, 450.0),
        Point::new(50.0, 450.0),
    ]
}

#[test]
fn test_empty_polygon_contains_everything() {
    assert!(point_in_polygon(Point::new(-1e9, 1e9), &[]));
    assert!(point_in_polygon(Point::new(0.0, 0.0), &[]));
    // Fewer than three points is not a closed polygon
    assert!(point_in_polygon(
        Point::new(1000.0, 1000.0),
        &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
    ));
}

#[test]
fn test_canonical_containment() {
    let polygon = room();
    let centroid = polygon_centroid(&polygon).expect("centroid");
    assert!(point_in_polygon(centroid, &polygon));
    assert!(!point_in_polygon(Point::new(10.0, 10.0), &polygon));
    assert!(point_in_polygon(Point::new(300.0, 300.0), &polygon));
    assert!(!point_in_polygon(Point::new(5000.0, -5000.0), &polygon));
}

#[test]
fn test_vertex_result_is_stable() {
    let polygon = room();
    let first = point_in_polygon(polygon[0], &polygon);
    for _ in 0..10 {
        assert_eq!(point_in_polygon(polygon[0], &polygon), first);
    }
}

#[test]
fn test_concave_polygon() {
    // L-shaped room
    let polygon = vec![
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 200.0),
        Point::new(0.0, 200.0),
    ];
    assert!(point_in_polygon(Point::new(50.0, 150.0), &polygon));
    assert!(point_in_polygon(Point::new(150.0, 50.0), &polygon));
    assert!(!point_in_polygon(Point::new(150.0, 150.0), &polygon));
}

#[test]
fn test_clamp_dimensions_edge_cases() {
    let size = clamp_dimensions(f64::NAN, -5.0, 20.0, 1000.0);
    assert_eq!((size.width, size.height), (20.0, 20.0));

    let size = clamp_dimensions(f64::INFINITY, 5000.0, 20.0, 1000.0);
    assert_eq!((size.width, size.height), (20.0, 1000.0));

    let size = clamp_dimensions(80.0, 40.0, 10.0, 1000.0);
    assert_eq!((size.width, size.height), (80.0, 40.0));

    assert_eq!(coerce_dimension(None, 10.0), 10.0);
    assert_eq!(coerce_dimension(Some(f64::NAN), 10.0), 10.0);
    assert_eq!(coerce_dimension(Some(42.0), 10.0), 42.0);
}

#[test]
fn test_clamp_position_stays_on_canvas() {
    assert_eq!(
        clamp_position(Point::new(-10.0, 900.0), 800.0, 600.0),
        Point::new(0.0, 600.0)
    );
    assert_eq!(
        clamp_position(Point::new(f64::NAN, 20.0), 800.0, 600.0),
        Point::new(0.0, 20.0)
    );
}

#[test]
fn test_generated_perimeters() {
    let center = Point::new(400.0, 300.0);

    let circle = generate_regular_polygon_points(
        PerimeterShape::Circle,
        &PerimeterParams::circle(100.0),
        center,
    );
    assert_eq!(circle.len(), CIRCLE_SEGMENTS);
    assert!(circle
        .iter()
        .all(|p| (p.distance_to(&center) - 100.0).abs() < 1e-9));

    let triangle =
        generate_regular_polygon_points(PerimeterShape::Triangle, &PerimeterParams::default(), center);
    assert_eq!(triangle.len(), 3);

    let hexagon = generate_regular_polygon_points(
        PerimeterShape::Polygon,
        &PerimeterParams::polygon(150.0, 6),
        center,
    );
    assert_eq!(hexagon.len(), 6);

    let degenerate = generate_regular_polygon_points(
        PerimeterShape::Polygon,
        &PerimeterParams::polygon(150.0, 1),
        center,
    );
    assert_eq!(degenerate.len(), 3);

    let rectangle = generate_regular_polygon_points(
        PerimeterShape::Rectangle,
        &PerimeterParams::rectangle(200.0, 100.0),
        center,
    );
    let bounds = polygon_bounds(&rectangle).expect("bounds");
    assert_eq!(rectangle.len(), 4);
    assert_eq!(bounds.width(), 200.0);
    assert_eq!(bounds.height(), 100.0);
    assert_eq!(bounds.center(), center);

    assert!(generate_regular_polygon_points(
        PerimeterShape::Custom,
        &PerimeterParams::default(),
        center
    )
    .is_empty());
}

#[test]
fn test_invalid_params_fall_back_to_defaults() {
    let params = PerimeterParams {
        radius: Some(f64::NAN),
        ..Default::default()
    };
    let points = generate_regular_polygon_points(PerimeterShape::Circle, &params, Point::default());
    assert_eq!(points.len(), CIRCLE_SEGMENTS);
    assert!(points.iter().all(Point::is_finite));
}

#[test]
fn test_shape_contains_ellipse_and_triangle() {
    let center = Point::new(0.0, 0.0);
    assert!(shape_contains(HitShape::Ellipse, center, 40.0, 20.0, 0.0, Point::new(19.0, 0.0), 0.0));
    assert!(!shape_contains(HitShape::Ellipse, center, 40.0, 20.0, 0.0, Point::new(19.0, 9.0), 0.0));
    assert!(shape_contains(HitShape::Triangle, center, 40.0, 40.0, 0.0, Point::new(0.0, 10.0), 0.0));
    assert!(!shape_contains(HitShape::Triangle, center, 40.0, 40.0, 0.0, Point::new(-18.0, -18.0), 0.0));
}

#[test]
fn test_cache_matches_direct_computation() {
    let polygon = room();
    let mut cache = ContainmentCache::new(8);
    let probes = [
        Point::new(10.0, 10.0),
        Point::new(300.0, 300.0),
        Point::new(549.0, 449.0),
        Point::new(600.0, 200.0),
    ];
    for _ in 0..3 {
        for p in probes {
            assert_eq!(cache.contains(p, &polygon), point_in_polygon(p, &polygon));
        }
    }
    assert_eq!(cache.stats(), (8, 4));
    assert!(cache.len() <= 8);

    cache.clear();
    assert!(cache.is_empty());
}

fn any_dimension() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1e6..1e6f64,
    ]
}

proptest! {
    #[test]
    fn prop_clamp_invariant(width in any_dimension(), height in any_dimension(), min in 1.0..100.0f64) {
        let size = clamp_dimensions(width, height, min, 1000.0);
        prop_assert!(size.width >= min && size.width <= 1000.0);
        prop_assert!(size.height >= min && size.height <= 1000.0);
    }

    #[test]
    fn prop_point_in_polygon_is_deterministic(x in -1000.0..1000.0f64, y in -1000.0..1000.0f64) {
        let polygon = room();
        let p = Point::new(x, y);
        prop_assert_eq!(point_in_polygon(p, &polygon), point_in_polygon(p, &polygon));
        let inside_box = x > 50.0 && x < 550.0 && y > 50.0 && y < 450.0;
        let outside_box = !(50.0..=550.0).contains(&x) || !(50.0..=450.0).contains(&y);
        if inside_box {
            prop_assert!(point_in_polygon(p, &polygon));
        }
        if outside_box {
            prop_assert!(!point_in_polygon(p, &polygon));
        }
    }
}
