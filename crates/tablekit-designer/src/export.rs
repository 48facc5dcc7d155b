//! CSV export of a plan's tables.

use tablekit_core::FloorPlan;

/// Column order of the table export.
pub const CSV_HEADER: &str = "id,label,capacity,shape,x,y,width,height,color";

/// One header line plus one line per table, `\n` separated.
///
/// Fields containing a comma, quote or line break are quoted with inner
/// quotes doubled.
pub fn export_tables_csv(plan: &FloorPlan) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for table in &plan.tables {
        let row = [
            escape_field(&table.id),
            escape_field(&table.label),
            table.capacity.to_string(),
            table.shape.to_string(),
            format_number(table.x),
            format_number(table.y),
            format_number(table.width),
            format_number(table.height),
            escape_field(&table.color),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// Whole numbers print without a fraction.
fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
