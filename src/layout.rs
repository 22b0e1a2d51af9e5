//! Canvas geometry for one render.
//!
//! All toggles that move sections around are resolved here, once, into a [`LayoutPlan`].
//! Renderers only read coordinates from the plan and never recompute offsets themselves.
//!
//! Sections stack top to bottom: title, month labels, grid, legend. The weekday labels share
//! the grid's vertical band and sit in a column to its left. Every section owns a fixed
//! height, so switching a section off only moves the sections below it.

use serde::Serialize;

use crate::model::DAYS_PER_WEEK;
use crate::options::RenderOptions;

pub const PADDING: f32 = 20.0;
pub const WEEKDAY_LABEL_WIDTH: f32 = 30.0;
pub const MONTH_LABEL_HEIGHT: f32 = 20.0;
pub const TITLE_HEIGHT: f32 = 30.0;
pub const LEGEND_HEIGHT: f32 = 40.0;

/// Baseline of the title text below the top of its band.
const TITLE_BASELINE: f32 = 20.0;
/// Baseline of the month labels below the top of their band.
const MONTH_LABEL_BASELINE: f32 = 15.0;
/// Weekday labels are right-aligned this far into their column.
const WEEKDAY_LABEL_INSET: f32 = 25.0;
/// Gap between the last grid row origin and the legend row.
const LEGEND_GAP: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub width: f32,
    pub height: f32,
    pub grid_x: f32,
    pub grid_y: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub cell_size: f32,
    pub cell_pitch: f32,
    pub title_y: Option<f32>,
    pub month_labels_y: Option<f32>,
    pub weekday_labels_x: Option<f32>,
    pub legend_y: Option<f32>,
}

impl LayoutPlan {
    /// Top-left corner of the cell for `week` and weekday `row`.
    pub fn cell_origin(&self, week: usize, row: usize) -> (f32, f32) {
        (
            self.grid_x + week as f32 * self.cell_pitch,
            self.grid_y + row as f32 * self.cell_pitch,
        )
    }

    /// X coordinate of the column for `week`, shared by cells and month labels.
    pub fn column_x(&self, week: usize) -> f32 {
        self.grid_x + week as f32 * self.cell_pitch
    }
}

pub fn compute_layout(weeks: usize, options: &RenderOptions) -> LayoutPlan {
    let pitch = options.cell_pitch();
    // Negative for an empty calendar; the canvas width below absorbs it.
    let grid_width = weeks as f32 * pitch - options.cell_spacing;
    let grid_height = DAYS_PER_WEEK as f32 * pitch - options.cell_spacing;

    let weekday_label_width = if options.show_weekday_labels {
        WEEKDAY_LABEL_WIDTH
    } else {
        0.0
    };
    let month_label_height = if options.show_month_labels {
        MONTH_LABEL_HEIGHT
    } else {
        0.0
    };
    let title_height = if options.hide_title { 0.0 } else { TITLE_HEIGHT };
    let legend_height = if options.show_legend {
        LEGEND_HEIGHT
    } else {
        0.0
    };

    // Never narrower than the padding, even with no weeks and no weekday labels.
    let width = (weekday_label_width + grid_width + PADDING * 2.0).max(PADDING * 2.0);
    let height =
        title_height + month_label_height + grid_height + legend_height + PADDING * 2.0;

    let mut cursor = PADDING;
    let title_y = (!options.hide_title).then(|| cursor + TITLE_BASELINE);
    cursor += title_height;
    let month_labels_y = options
        .show_month_labels
        .then(|| cursor + MONTH_LABEL_BASELINE);
    cursor += month_label_height;
    let grid_y = cursor;

    LayoutPlan {
        width,
        height,
        grid_x: PADDING + weekday_label_width,
        grid_y,
        grid_width,
        grid_height,
        cell_size: options.cell_size,
        cell_pitch: pitch,
        title_y,
        month_labels_y,
        weekday_labels_x: options
            .show_weekday_labels
            .then_some(PADDING + WEEKDAY_LABEL_INSET),
        legend_y: options
            .show_legend
            .then(|| grid_y + DAYS_PER_WEEK as f32 * pitch + LEGEND_GAP),
    }
}
