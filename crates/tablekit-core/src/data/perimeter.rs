//! Room perimeter description.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Point;

/// How a perimeter was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerimeterShape {
    /// Freehand point list built by sequential clicks
    #[default]
    Custom,
    Rectangle,
    Circle,
    Triangle,
    /// Regular n-gon, see [`PerimeterParams::sides`]
    Polygon,
}

impl fmt::Display for PerimeterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Custom => "custom",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Polygon => "polygon",
        };
        f.write_str(s)
    }
}

impl FromStr for PerimeterShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            "polygon" => Ok(Self::Polygon),
            other => Err(format!("unknown perimeter shape '{}'", other)),
        }
    }
}

/// Numeric parameters of a predefined perimeter shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerimeterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,
}

impl PerimeterParams {
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn circle(radius: f64) -> Self {
        Self {
            radius: Some(radius),
            ..Default::default()
        }
    }

    pub fn polygon(radius: f64, sides: u32) -> Self {
        Self {
            radius: Some(radius),
            sides: Some(sides),
            ..Default::default()
        }
    }

    /// Drops non-finite or non-positive lengths so stored params always
    /// compare equal to themselves.
    pub fn sanitized(self) -> Self {
        let length = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);
        Self {
            width: length(self.width),
            height: length(self.height),
            radius: length(self.radius),
            sides: self.sides,
        }
    }
}

/// Full replacement payload for a plan's perimeter fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterUpdate {
    pub perimeter: Vec<Point>,
    pub perimeter_shape: PerimeterShape,
    #[serde(default)]
    pub perimeter_params: Option<PerimeterParams>,
}

impl PerimeterUpdate {
    pub fn custom(points: Vec<Point>) -> Self {
        Self {
            perimeter: points,
            perimeter_shape: PerimeterShape::Custom,
            perimeter_params: None,
        }
    }
}
