//! SVG export of a floor plan
//! Features:
//! - Perimeter as a closed outline
//! - One shape primitive per obstacle and table, rotated around its center
//! - Centered text label on every entity
//!
//! Obstacles are emitted before tables so tables draw on top, matching the
//! canvas.

use std::fmt::Write;

use tablekit_core::{FloorPlan, ObstacleShape, Point, TableShape};

use crate::geometry::{normalize_rotation, triangle_vertices};

const PERIMETER_STROKE: &str = "#333333";
const ENTITY_STROKE: &str = "#222222";
const LABEL_FONT_SIZE: f64 = 12.0;

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rotate_attr(rotation: f64, center: Point) -> String {
    let rotation = normalize_rotation(rotation);
    if rotation == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({} {} {})""#,
            rotation,
            num(center.x),
            num(center.y)
        )
    }
}

/// Render a primitive for a `width` x `height` shape centered on `center`
fn render_shape(
    kind: ShapeKind,
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
    fill: &str,
) -> String {
    let (cx, cy) = (num(center.x), num(center.y));
    let transform = rotate_attr(rotation, center);
    let fill = escape_xml(fill);
    match kind {
        ShapeKind::Rectangle => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"{}/>"#,
            cx - width / 2.0,
            cy - height / 2.0,
            width,
            height,
            fill,
            ENTITY_STROKE,
            transform
        ),
        ShapeKind::Ellipse => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}"{}/>"#,
            cx,
            cy,
            width / 2.0,
            height / 2.0,
            fill,
            ENTITY_STROKE,
            transform
        ),
        ShapeKind::Triangle => format!(
            r#"<polygon points="{}" fill="{}" stroke="{}"{}/>"#,
            points_attr(&triangle_vertices(Point::new(cx, cy), width, height)),
            fill,
            ENTITY_STROKE,
            transform
        ),
    }
}

fn render_label(center: Point, text: &str) -> String {
    format!(
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        num(center.x),
        num(center.y),
        LABEL_FONT_SIZE,
        escape_xml(text)
    )
}

#[derive(Clone, Copy)]
enum ShapeKind {
    Rectangle,
    Ellipse,
    Triangle,
}

/// Render a whole plan as a standalone SVG document of `width` x `height`
pub fn render_plan_svg(plan: &FloorPlan, width: f64, height: f64) -> String {
    let width = num(width).max(1.0);
    let height = num(height).max(1.0);
    let background = plan.background_color.as_deref().unwrap_or("#FFFFFF");

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(svg, "<title>{}</title>", escape_xml(&plan.name));
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        escape_xml(background)
    );

    if plan.has_perimeter() {
        let _ = writeln!(
            svg,
            r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points_attr(&plan.perimeter),
            PERIMETER_STROKE
        );
    }

    for obstacle in plan.obstacles.iter().filter(|o| o.width > 0.0 && o.height > 0.0) {
        let kind = match obstacle.shape {
            ObstacleShape::Rectangle => ShapeKind::Rectangle,
            ObstacleShape::Circle => ShapeKind::Ellipse,
            ObstacleShape::Triangle => ShapeKind::Triangle,
        };
        let center = obstacle.center();
        let _ = writeln!(
            svg,
            r#"<g id="{}">{}{}</g>"#,
            escape_xml(&obstacle.id),
            render_shape(
                kind,
                center,
                obstacle.width,
                obstacle.height,
                obstacle.rotation,
                &obstacle.color
            ),
            render_label(center, obstacle.display_name())
        );
    }

    for table in plan.tables.iter().filter(|t| t.width > 0.0 && t.height > 0.0) {
        let kind = match table.shape {
            TableShape::Rectangle => ShapeKind::Rectangle,
            TableShape::Circle => ShapeKind::Ellipse,
        };
        let center = table.center();
        let _ = writeln!(
            svg,
            r#"<g id="{}">{}{}</g>"#,
            escape_xml(&table.id),
            render_shape(kind, center, table.width, table.height, table.rotation, &table.color),
            render_label(center, &table.label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}
