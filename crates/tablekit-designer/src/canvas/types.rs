//! Canvas type definitions: DragState, Transform, DragEndEvent, InteractionOutcome.

use std::time::Instant;

use tablekit_core::{EntityRef, Point};

/// Live drag of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub entity: EntityRef,
    /// Center of the entity when the drag started
    pub origin: Point,
    /// Last pointer position seen
    pub position: Point,
    pub(crate) last_emit: Option<Instant>,
}

/// Transform-handle state of the selected entity.
///
/// Scale factors are applied to the stored size when the transform ends and
/// then reset to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees as reported by the handle
    pub rotation: f64,
    /// New center, when the handle moved the entity
    pub position: Option<Point>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            position: None,
        }
    }
}

impl Transform {
    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_identity_scale(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0
    }
}

/// Payload of the drag-end callback, sent after a committed move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEndEvent {
    pub entity: EntityRef,
    pub from: Point,
    pub to: Point,
}

/// External hook invoked after every committed drag.
pub type DragEndCallback = Box<dyn FnMut(&DragEndEvent) + Send>;

/// What a gesture did, reported back to the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing happened
    Ignored,
    Selected(EntityRef),
    SelectionCleared,
    Created(EntityRef),
    /// A creation click fell outside the perimeter
    OutsidePerimeter(Point),
    /// A perimeter vertex was recorded; holds the pending count
    PerimeterPoint(usize),
    /// The perimeter was committed; holds its vertex count
    PerimeterClosed(usize),
    DragStarted(EntityRef),
    /// Throttled live position for redraws; nothing is committed
    DragMoved { entity: EntityRef, position: Point },
    Moved { entity: EntityRef, position: Point },
    /// Drag ended outside the perimeter; the entity stays where it was
    DragRejected { entity: EntityRef, position: Point },
    Transformed(EntityRef),
    Deleted(EntityRef),
    Duplicated(EntityRef),
    /// Escape cleared a pending perimeter, tool or selection
    Cancelled,
}

impl InteractionOutcome {
    /// Whether the store was mutated.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Created(_)
                | Self::PerimeterClosed(_)
                | Self::Moved { .. }
                | Self::Transformed(_)
                | Self::Deleted(_)
                | Self::Duplicated(_)
        )
    }

    /// Whether the gesture was refused by a placement constraint.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::OutsidePerimeter(_) | Self::DragRejected { .. })
    }
}
