//! Seed transform: external room and table records to floor plans.
//!
//! Each room becomes one plan with a default perimeter picked from the room
//! id. Tables are colored by service status; tables without coordinates are
//! laid out on a grid inside the room perimeter.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tablekit_core::{
    FloorPlan, PerimeterParams, PerimeterShape, Point, Table, TableShape, TableStatus,
    DEFAULT_TABLE_SIZE,
};
use tablekit_settings::CanvasSettings;

use crate::geometry::{
    generate_regular_polygon_points, point_in_polygon, polygon_bounds, polygon_centroid,
};

/// Spacing of the auto-layout grid.
pub const GRID_SPACING: f64 = 100.0;

/// A room as delivered by the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity_limit: Option<u32>,
}

/// A table as delivered by the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    pub id: String,
    pub room_id: String,
    pub number: String,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub shape: Option<TableShape>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Rooms and tables in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub tables: Vec<TableRecord>,
}

impl SeedData {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse seed data")
    }

    /// Small restaurant used by the demo binary.
    pub fn demo() -> Self {
        let room = |id: &str, name: &str, limit: u32| RoomRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            capacity_limit: Some(limit),
        };
        let table = |id: &str, room: &str, number: &str, capacity: u32, status: TableStatus| {
            TableRecord {
                id: id.to_string(),
                room_id: room.to_string(),
                number: number.to_string(),
                capacity,
                status,
                shape: None,
                x: None,
                y: None,
                width: None,
                height: None,
            }
        };

        Self {
            rooms: vec![
                room("salle", "Salle principale", 40),
                room("terrasse", "Terrasse", 24),
            ],
            tables: vec![
                table("1", "salle", "1", 4, TableStatus::Free),
                table("2", "salle", "2", 4, TableStatus::Occupied),
                table("3", "salle", "3", 6, TableStatus::Reserved),
                table("4", "salle", "4", 2, TableStatus::Free),
                TableRecord {
                    shape: Some(TableShape::Circle),
                    ..table("5", "terrasse", "5", 2, TableStatus::Free)
                },
                TableRecord {
                    shape: Some(TableShape::Circle),
                    ..table("6", "terrasse", "6", 2, TableStatus::Occupied)
                },
            ],
        }
    }
}

/// Perimeter shape and parameters used for a room id.
pub fn default_perimeter(room_id: &str) -> (PerimeterShape, PerimeterParams) {
    match room_id.trim().to_ascii_lowercase().as_str() {
        "terrasse" => (PerimeterShape::Rectangle, PerimeterParams::rectangle(600.0, 300.0)),
        "bar" => (PerimeterShape::Rectangle, PerimeterParams::rectangle(400.0, 300.0)),
        "salon" => (PerimeterShape::Polygon, PerimeterParams::polygon(250.0, 6)),
        "jardin" => (PerimeterShape::Circle, PerimeterParams::circle(250.0)),
        _ => (PerimeterShape::Rectangle, PerimeterParams::rectangle(700.0, 500.0)),
    }
}

/// Builds one plan per room.
///
/// Tables referring to an unknown room are skipped with a warning.
pub fn transform_seed(data: &SeedData, canvas: &CanvasSettings) -> Vec<FloorPlan> {
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);

    for table in &data.tables {
        if !data.rooms.iter().any(|r| r.id == table.room_id) {
            tracing::warn!(
                "Skipping table {} of unknown room {}",
                table.id,
                table.room_id
            );
        }
    }

    data.rooms
        .iter()
        .map(|room| {
            let mut plan = FloorPlan::new(room.name.clone());
            plan.id = format!("plan-{}", room.id);
            plan.description = room.description.clone().unwrap_or_default();
            if let Some(limit) = room.capacity_limit {
                plan.capacity_limit = limit;
            }

            let (shape, params) = default_perimeter(&room.id);
            plan.perimeter = generate_regular_polygon_points(shape, &params, center);
            plan.perimeter_shape = shape;
            plan.perimeter_params = params;

            let records: Vec<_> = data.tables.iter().filter(|t| t.room_id == room.id).collect();
            let mut slots = grid_slots(&plan.perimeter).into_iter();
            let fallback = polygon_centroid(&plan.perimeter).unwrap_or(center);

            plan.tables = records
                .into_iter()
                .map(|record| {
                    let position = match (record.x, record.y) {
                        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Point::new(x, y),
                        _ => slots.next().unwrap_or(fallback),
                    };
                    table_from_record(record, position)
                })
                .collect();

            tracing::debug!("Seeded plan {} with {} tables", plan.id, plan.tables.len());
            plan
        })
        .collect()
}

fn table_from_record(record: &TableRecord, position: Point) -> Table {
    let mut table = Table::new(format!("T{}", record.number), record.capacity, position)
        .with_shape(record.shape.unwrap_or_default())
        .with_color(record.status.default_color())
        .with_size(
            record.width.unwrap_or(DEFAULT_TABLE_SIZE),
            record.height.unwrap_or(DEFAULT_TABLE_SIZE),
        );
    table.id = format!("table-{}", record.id);
    table
}

/// Grid points inside `perimeter`, row by row, starting half a cell in.
fn grid_slots(perimeter: &[Point]) -> Vec<Point> {
    let Some(bounds) = polygon_bounds(perimeter) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut y = bounds.min_y + GRID_SPACING / 2.0;
    while y < bounds.max_y {
        let mut x = bounds.min_x + GRID_SPACING / 2.0;
        while x < bounds.max_x {
            let point = Point::new(x, y);
            if point_in_polygon(point, perimeter) {
                slots.push(point);
            }
            x += GRID_SPACING;
        }
        y += GRID_SPACING;
    }
    slots
}
