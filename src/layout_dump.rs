use crate::layout::{LayoutPlan, compute_layout};
use crate::model::{ActivityCalendar, ContributionLevel};
use crate::options::RenderOptions;
use crate::render::month_label_positions;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub plan: LayoutPlan,
    pub cells: Vec<CellDump>,
    pub month_labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub date: NaiveDate,
    pub week: usize,
    pub weekday: u8,
    pub x: f32,
    pub y: f32,
    pub count: u32,
    pub level: ContributionLevel,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub week: usize,
    pub x: f32,
    pub y: f32,
}

impl LayoutDump {
    pub fn from_calendar(calendar: &ActivityCalendar, options: &RenderOptions) -> Self {
        let plan = compute_layout(calendar.weeks.len(), options);

        let cells = calendar
            .weeks
            .iter()
            .enumerate()
            .flat_map(|(week_idx, week)| {
                week.days.iter().map(move |day| {
                    let (x, y) = plan.cell_origin(week_idx, usize::from(day.weekday));
                    CellDump {
                        date: day.date,
                        week: week_idx,
                        weekday: day.weekday,
                        x,
                        y,
                        count: day.count,
                        level: day.level,
                    }
                })
            })
            .collect();

        let month_labels = match plan.month_labels_y {
            Some(y) => month_label_positions(&calendar.weeks)
                .into_iter()
                .map(|(week, text)| LabelDump {
                    text: text.to_string(),
                    week,
                    x: plan.column_x(week),
                    y,
                })
                .collect(),
            None => Vec::new(),
        };

        LayoutDump {
            plan,
            cells,
            month_labels,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    calendar: &ActivityCalendar,
    options: &RenderOptions,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_calendar(calendar, options);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
