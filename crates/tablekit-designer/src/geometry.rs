//! Geometry utilities for the floor-plan editor.
//!
//! Pure functions over canvas pixel space. None of them panic: invalid
//! numeric input degrades to a safe default (zero, the minimum size, or
//! "point considered inside").

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use tablekit_core::{Bounds, PerimeterParams, PerimeterShape, Point, Size};

/// Number of segments used to approximate a circular perimeter.
pub const CIRCLE_SEGMENTS: usize = 36;

const DEFAULT_PERIMETER_WIDTH: f64 = 400.0;
const DEFAULT_PERIMETER_HEIGHT: f64 = 300.0;
const DEFAULT_PERIMETER_RADIUS: f64 = 200.0;
const DEFAULT_POLYGON_SIDES: u32 = 6;

/// Ray-casting containment test.
///
/// A polygon with fewer than three points does not restrict anything, so
/// the result is `true`. Points exactly on an edge or vertex get whatever the
/// crossing count yields; the answer is deterministic for a given input.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 || !point.is_finite() {
        return true;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Coerces a possibly missing or non-numeric dimension to `min`.
pub fn coerce_dimension(value: Option<f64>, min: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => min,
    }
}

/// Coerces non-finite input to `min`, then clamps both sides into `[min, max]`.
pub fn clamp_dimensions(width: f64, height: f64, min: f64, max: f64) -> Size {
    let min = if min.is_finite() && min > 0.0 { min } else { 1.0 };
    let max = if max.is_finite() { max.max(min) } else { f64::MAX };
    let clamp = |v: f64| coerce_dimension(Some(v), min).clamp(min, max);
    Size::new(clamp(width), clamp(height))
}

/// Keeps a center point inside a `width` x `height` scene.
pub fn clamp_position(point: Point, width: f64, height: f64) -> Point {
    let bound = |v: f64, limit: f64| {
        let v = if v.is_finite() { v } else { 0.0 };
        if limit.is_finite() && limit > 0.0 {
            v.clamp(0.0, limit)
        } else {
            v.max(0.0)
        }
    };
    Point::new(bound(point.x, width), bound(point.y, height))
}

/// Normalizes degrees into `[0, 360)`; missing or non-finite input becomes 0.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Generates the vertices of a predefined perimeter shape around `center`.
///
/// `Custom` has no generator and yields an empty list.
pub fn generate_regular_polygon_points(
    shape: PerimeterShape,
    params: &PerimeterParams,
    center: Point,
) -> Vec<Point> {
    let center = if center.is_finite() {
        center
    } else {
        Point::default()
    };
    let positive = |v: Option<f64>, default: f64| match v {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    };

    match shape {
        PerimeterShape::Custom => Vec::new(),
        PerimeterShape::Rectangle => {
            let hw = positive(params.width, DEFAULT_PERIMETER_WIDTH) / 2.0;
            let hh = positive(params.height, DEFAULT_PERIMETER_HEIGHT) / 2.0;
            vec![
                Point::new(center.x - hw, center.y - hh),
                Point::new(center.x + hw, center.y - hh),
                Point::new(center.x + hw, center.y + hh),
                Point::new(center.x - hw, center.y + hh),
            ]
        }
        PerimeterShape::Circle => {
            let radius = positive(params.radius, DEFAULT_PERIMETER_RADIUS);
            ring(center, radius, CIRCLE_SEGMENTS, 0.0)
        }
        PerimeterShape::Triangle => {
            let radius = positive(params.radius, DEFAULT_PERIMETER_RADIUS);
            ring(center, radius, 3, -PI / 2.0)
        }
        PerimeterShape::Polygon => {
            let radius = positive(params.radius, DEFAULT_PERIMETER_RADIUS);
            let sides = params.sides.unwrap_or(DEFAULT_POLYGON_SIDES).max(3);
            ring(center, radius, sides as usize, -PI / 2.0)
        }
    }
}

fn ring(center: Point, radius: f64, count: usize, start_angle: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let theta = start_angle + 2.0 * PI * (i as f64) / (count as f64);
            Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect()
}

/// Axis-aligned bounds of a point list.
pub fn polygon_bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        bounds.min_x = bounds.min_x.min(p.x);
        bounds.min_y = bounds.min_y.min(p.y);
        bounds.max_x = bounds.max_x.max(p.x);
        bounds.max_y = bounds.max_y.max(p.y);
    }
    Some(bounds)
}

/// Vertex average; lies inside any convex polygon.
pub fn polygon_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Outline used for hit testing a placed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitShape {
    Rectangle,
    Ellipse,
    /// Isosceles triangle, apex at the top of the bounding box
    Triangle,
}

/// Whether `point` hits a `width` x `height` shape centered at `center` and
/// rotated by `rotation` degrees around it.
pub fn shape_contains(
    shape: HitShape,
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
    point: Point,
    tolerance: f64,
) -> bool {
    let local = to_local(point, center, rotation);
    let tolerance = if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 };
    let hw = width / 2.0 + tolerance;
    let hh = height / 2.0 + tolerance;
    if hw <= 0.0 || hh <= 0.0 {
        return false;
    }

    match shape {
        HitShape::Rectangle => local.x.abs() <= hw && local.y.abs() <= hh,
        HitShape::Ellipse => {
            let nx = local.x / hw;
            let ny = local.y / hh;
            nx * nx + ny * ny <= 1.0
        }
        HitShape::Triangle => {
            let triangle = triangle_vertices(Point::default(), hw * 2.0, hh * 2.0);
            point_in_polygon(local, &triangle)
        }
    }
}

/// Vertices of the isosceles triangle inscribed in a centered box.
pub fn triangle_vertices(center: Point, width: f64, height: f64) -> [Point; 3] {
    [
        Point::new(center.x, center.y - height / 2.0),
        Point::new(center.x + width / 2.0, center.y + height / 2.0),
        Point::new(center.x - width / 2.0, center.y + height / 2.0),
    ]
}

fn to_local(point: Point, center: Point, rotation: f64) -> Point {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let angle = -normalize_rotation(rotation).to_radians();
    let (sin, cos) = angle.sin_cos();
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ContainmentKey {
    polygon: u64,
    x: u64,
    y: u64,
}

/// Bounded memo of [`point_in_polygon`] results.
///
/// Entries are evicted oldest-first once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct ContainmentCache {
    capacity: usize,
    entries: HashMap<ContainmentKey, bool>,
    order: VecDeque<ContainmentKey>,
    hits: u64,
    misses: u64,
}

impl ContainmentCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn contains(&mut self, point: Point, polygon: &[Point]) -> bool {
        if polygon.len() < 3 {
            return true;
        }

        let key = ContainmentKey {
            polygon: fingerprint(polygon),
            x: point.x.to_bits(),
            y: point.y.to_bits(),
        };
        if let Some(&inside) = self.entries.get(&key) {
            self.hits += 1;
            return inside;
        }

        self.misses += 1;
        let inside = point_in_polygon(point, polygon);
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, inside);
        self.order.push_back(key);
        inside
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation or the last clear.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

fn fingerprint(polygon: &[Point]) -> u64 {
    let mut hasher = DefaultHasher::new();
    polygon.len().hash(&mut hasher);
    for p in polygon {
        p.x.to_bits().hash(&mut hasher);
        p.y.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
