//! Obstacles: walls, pillars, doors and other fixed, non-seating elements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{new_entity_id, EntityId, Point};

/// Outline of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleShape {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

impl fmt::Display for ObstacleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
            Self::Triangle => write!(f, "triangle"),
        }
    }
}

impl FromStr for ObstacleShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            other => Err(format!("unknown obstacle shape '{}'", other)),
        }
    }
}

/// Kind of fixed element. Drives the default shape, size and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleCategory {
    Mur,
    Poteau,
    Porte,
    Escalier,
    Bar,
    Cuisine,
    Toilettes,
    Decoration,
    Mobilier,
    Technique,
    #[default]
    Autre,
}

/// Default appearance for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePreset {
    pub shape: ObstacleShape,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

impl ObstacleCategory {
    pub const ALL: [ObstacleCategory; 11] = [
        Self::Mur,
        Self::Poteau,
        Self::Porte,
        Self::Escalier,
        Self::Bar,
        Self::Cuisine,
        Self::Toilettes,
        Self::Decoration,
        Self::Mobilier,
        Self::Technique,
        Self::Autre,
    ];

    pub fn preset(&self) -> ObstaclePreset {
        use ObstacleShape::*;
        let (shape, width, height, color) = match self {
            Self::Mur => (Rectangle, 100.0, 20.0, "#8B4513"),
            Self::Poteau => (Circle, 30.0, 30.0, "#696969"),
            Self::Porte => (Rectangle, 80.0, 10.0, "#D2691E"),
            Self::Escalier => (Rectangle, 100.0, 60.0, "#A9A9A9"),
            Self::Bar => (Rectangle, 200.0, 60.0, "#8B0000"),
            Self::Cuisine => (Rectangle, 150.0, 100.0, "#FF8C00"),
            Self::Toilettes => (Rectangle, 80.0, 80.0, "#4682B4"),
            Self::Decoration => (Circle, 40.0, 40.0, "#228B22"),
            Self::Mobilier => (Rectangle, 60.0, 40.0, "#DEB887"),
            Self::Technique => (Rectangle, 50.0, 50.0, "#708090"),
            Self::Autre => (Rectangle, 50.0, 50.0, "#808080"),
        };
        ObstaclePreset {
            shape,
            width,
            height,
            color,
        }
    }

    /// Human-readable name shown in the editor.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mur => "Mur",
            Self::Poteau => "Poteau",
            Self::Porte => "Porte",
            Self::Escalier => "Escalier",
            Self::Bar => "Bar",
            Self::Cuisine => "Cuisine",
            Self::Toilettes => "Toilettes",
            Self::Decoration => "Décoration",
            Self::Mobilier => "Mobilier",
            Self::Technique => "Technique",
            Self::Autre => "Autre",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Mur => "mur",
            Self::Poteau => "poteau",
            Self::Porte => "porte",
            Self::Escalier => "escalier",
            Self::Bar => "bar",
            Self::Cuisine => "cuisine",
            Self::Toilettes => "toilettes",
            Self::Decoration => "decoration",
            Self::Mobilier => "mobilier",
            Self::Technique => "technique",
            Self::Autre => "autre",
        }
    }
}

impl fmt::Display for ObstacleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ObstacleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|c| c.key() == key)
            .copied()
            .ok_or_else(|| format!("unknown obstacle category '{}'", s))
    }
}

/// Fields the user changed by hand since creation. Category changes leave
/// these alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizedFields {
    pub shape: bool,
    pub size: bool,
    pub color: bool,
}

impl CustomizedFields {
    pub fn is_empty(&self) -> bool {
        !(self.shape || self.size || self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "obstacle", rename_all = "camelCase")]
pub struct Obstacle {
    pub id: EntityId,
    #[serde(default)]
    pub category: ObstacleCategory,
    #[serde(default)]
    pub shape: ObstacleShape,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "CustomizedFields::is_empty")]
    pub customized: CustomizedFields,
}

impl Obstacle {
    /// Creates an obstacle of `category` at `center` with the category preset.
    pub fn from_category(category: ObstacleCategory, center: Point) -> Self {
        let preset = category.preset();
        let now = Utc::now();
        Self {
            id: new_entity_id("obstacle"),
            category,
            shape: preset.shape,
            color: preset.color.to_string(),
            x: center.x,
            y: center.y,
            width: preset.width,
            height: preset.height,
            rotation: 0.0,
            name: Some(category.label().to_string()),
            description: None,
            created_at: now,
            updated_at: now,
            customized: CustomizedFields::default(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Display name, falling back to the category label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.category.label())
    }

    /// Switches category, re-applying preset values to fields the user never
    /// customized.
    pub fn set_category(&mut self, category: ObstacleCategory) {
        self.category = category;
        let preset = category.preset();
        if !self.customized.shape {
            self.shape = preset.shape;
        }
        if !self.customized.size {
            self.width = preset.width;
            self.height = preset.height;
        }
        if !self.customized.color {
            self.color = preset.color.to_string();
        }
    }

    /// Copy with a fresh id, shifted by `(offset, offset)` and a "(copie)" name.
    pub fn duplicate(&self, offset: f64) -> Self {
        let now = Utc::now();
        let name = format!("{} (copie)", self.display_name());
        Self {
            id: new_entity_id("obstacle"),
            x: self.x + offset,
            y: self.y + offset,
            name: Some(name),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Assigns one named property. `id` and unknown names are ignored, as are
    /// values of the wrong kind. Returns whether anything changed.
    pub fn apply_property(&mut self, property: &Property) -> bool {
        use PropertyValue::*;
        match (property.name.as_str(), &property.value) {
            ("name", String(v)) => self.name = Some(v.clone()),
            ("description", String(v)) => self.description = Some(v.clone()),
            ("color", String(v)) => {
                self.color = v.clone();
                self.customized.color = true;
            }
            ("category", String(v)) => match v.parse() {
                Ok(category) if category != self.category => self.set_category(category),
                Ok(_) => {}
                Err(_) => return false,
            },
            ("shape", String(v)) => match v.parse() {
                Ok(shape) => {
                    self.shape = shape;
                    self.customized.shape = true;
                }
                Err(_) => return false,
            },
            ("x", Number(v)) => self.x = *v,
            ("y", Number(v)) => self.y = *v,
            ("width", Number(v)) => {
                self.width = *v;
                self.customized.size = true;
            }
            ("height", Number(v)) => {
                self.height = *v;
                self.customized.size = true;
            }
            ("rotation", Number(v)) => self.rotation = *v,
            _ => return false,
        }
        true
    }
}

/// A single named property change coming from a property editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Number(value),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::String(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    String(String),
    Bool(bool),
}

/// Partial update of an obstacle; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleUpdate {
    pub category: Option<ObstacleCategory>,
    pub shape: Option<ObstacleShape>,
    pub color: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ObstacleUpdate {
    pub fn position(point: Point) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
            ..Default::default()
        }
    }

    /// Merges the present fields into `obstacle`. A category change applies
    /// presets first so explicit values in the same update win.
    pub fn apply_to(&self, obstacle: &mut Obstacle) {
        if let Some(category) = self.category {
            if category != obstacle.category {
                obstacle.set_category(category);
            }
        }
        if let Some(shape) = self.shape {
            obstacle.shape = shape;
            obstacle.customized.shape = true;
        }
        if let Some(color) = &self.color {
            obstacle.color = color.clone();
            obstacle.customized.color = true;
        }
        if let Some(x) = self.x {
            obstacle.x = x;
        }
        if let Some(y) = self.y {
            obstacle.y = y;
        }
        if let Some(width) = self.width {
            obstacle.width = width;
            obstacle.customized.size = true;
        }
        if let Some(height) = self.height {
            obstacle.height = height;
            obstacle.customized.size = true;
        }
        if let Some(rotation) = self.rotation {
            obstacle.rotation = rotation;
        }
        if let Some(name) = &self.name {
            obstacle.name = Some(name.clone());
        }
        if let Some(description) = &self.description {
            obstacle.description = Some(description.clone());
        }
    }
}
