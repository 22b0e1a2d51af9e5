use crate::layout::LayoutPlan;
use crate::model::Week;

use super::svg::{Anchor, TextStyle, push_text};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Rows 1, 3 and 5 carry a label; the others stay blank to avoid crowding.
const WEEKDAY_LABELS: [(usize, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

const MONTH_FONT_SIZE: f32 = 10.0;
const WEEKDAY_FONT_SIZE: f32 = 9.0;

/// Week columns where a new month run starts, with the month's short name.
///
/// Runs are keyed on year and month together, so a January following a January a year
/// earlier (data spanning more than twelve months, or gaps) still starts a new label.
pub fn month_label_positions(weeks: &[Week]) -> Vec<(usize, &'static str)> {
    let mut labels = Vec::new();
    let mut current = None;
    for (idx, week) in weeks.iter().enumerate() {
        let key = week.month_key();
        if current != Some(key) {
            labels.push((idx, MONTH_NAMES[(key.1 - 1) as usize]));
            current = Some(key);
        }
    }
    labels
}

pub fn render_month_labels(out: &mut String, weeks: &[Week], plan: &LayoutPlan, y: f32, color: &str) {
    let style = TextStyle::new(MONTH_FONT_SIZE, color);
    for (week_idx, name) in month_label_positions(weeks) {
        push_text(out, name, plan.column_x(week_idx), y, &style);
    }
}

pub fn render_weekday_labels(out: &mut String, plan: &LayoutPlan, x: f32, color: &str) {
    let style = TextStyle::new(WEEKDAY_FONT_SIZE, color)
        .anchor(Anchor::End)
        .middle();
    for (row, name) in WEEKDAY_LABELS {
        let (_, row_y) = plan.cell_origin(0, row);
        push_text(out, name, x, row_y + plan.cell_size / 2.0, &style);
    }
}
