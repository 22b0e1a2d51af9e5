mod animation;
mod grid;
mod labels;
mod legend;
mod svg;

use std::path::Path;

use anyhow::Result;

#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::layout::compute_layout;
use crate::model::ActivityCalendar;
use crate::options::RenderOptions;
use crate::theme::Palette;

pub use grid::tooltip;
pub use labels::month_label_positions;
pub use legend::format_count;
pub use svg::escape_xml;

const RESPONSIVE_STYLE: &str = "width: 100%; height: auto; max-width: 100%; display: block;";
const FONT_STACK: &str = "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;";

/// Renders `calendar` with the built-in palette for `options.theme`.
pub fn render_svg(
    calendar: &ActivityCalendar,
    username: &str,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let palette = Palette::for_theme(options.theme);
    render_svg_with_palette(calendar, username, options, &palette)
}

/// Renders `calendar` with an explicit palette, e.g. one carrying config overrides.
///
/// Input is validated up front; on error nothing is rendered.
pub fn render_svg_with_palette(
    calendar: &ActivityCalendar,
    username: &str,
    options: &RenderOptions,
    palette: &Palette,
) -> Result<String, RenderError> {
    let checked = options
        .validate()
        .map_err(RenderError::from)
        .and_then(|()| calendar.validate().map_err(RenderError::from));
    if let Err(err) = checked {
        tracing::warn!(error = %err, "rejecting contribution grid render");
        return Err(err);
    }

    let plan = compute_layout(calendar.weeks.len(), options);
    tracing::debug!(
        weeks = calendar.weeks.len(),
        width = plan.width,
        height = plan.height,
        "computed contribution grid layout"
    );

    let mut body = String::new();
    animation::render_styles(&mut body, options.enable_animations);

    if let Some(y) = plan.title_y {
        let style = svg::TextStyle::new(16.0, &palette.foreground).weight(600);
        svg::push_text(&mut body, &options.title_text(username), crate::layout::PADDING, y, &style);
    }
    if let Some(y) = plan.month_labels_y {
        labels::render_month_labels(&mut body, &calendar.weeks, &plan, y, &palette.muted_foreground);
    }
    if let Some(x) = plan.weekday_labels_x {
        labels::render_weekday_labels(&mut body, &plan, x, &palette.muted_foreground);
    }
    grid::render_cells(
        &mut body,
        &calendar.weeks,
        &plan,
        options.corner_radius,
        palette,
        options.enable_animations,
    );
    if let Some(y) = plan.legend_y {
        legend::render_legend(&mut body, calendar.total_count, plan.grid_x, y, plan.width, palette);
    }
    if options.show_border {
        svg::push_rect(
            &mut body,
            (0.0, 0.0, plan.width, plan.height),
            "none",
            Some((&palette.border, options.border_width)),
            Some(options.border_radius),
        );
    }

    let mut doc = String::with_capacity(body.len() + 512);
    doc.push_str(&format!(
        "<svg preserveAspectRatio=\"xMidYMid meet\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\" style=\"{RESPONSIVE_STYLE} {FONT_STACK}\">",
        plan.width, plan.height
    ));
    if palette.has_background() {
        svg::push_rect(
            &mut doc,
            (0.0, 0.0, plan.width, plan.height),
            &palette.background,
            None,
            None,
        );
    }
    doc.push_str(&body);
    doc.push_str("</svg>");
    Ok(doc)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = render_cfg.font_family.clone();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.scale.max(0.1);
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, DataError};
    use crate::model::ContributionLevel::*;
    use crate::model::fixtures::{week, weeks_from};

    fn scenario() -> ActivityCalendar {
        ActivityCalendar {
            total_count: 5,
            weeks: vec![week(
                "2024-01-07",
                [0, 1, 0, 3, 0, 0, 1],
                [None, FirstQuartile, None, ThirdQuartile, None, None, FirstQuartile],
            )],
        }
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_svg(&scenario(), "octocat", &RenderOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 81 225\""));
        assert!(svg.contains(">octocat&apos;s contributions</text>"));
        assert!(svg.contains(">5 contributions in the last year</text>"));
        assert_eq!(svg.matches("class=\"contribution-cell").count(), 7);
        assert_eq!(svg.matches("font-size=\"10\"").count(), 1);
        let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
        let month_labels: usize = months.iter().map(|m| svg.matches(&format!(">{m}</text>")).count()).sum();
        assert_eq!(month_labels, 1);
        let weekdays = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let weekday_labels: usize =
            weekdays.iter().map(|d| svg.matches(&format!(">{d}</text>")).count()).sum();
        assert_eq!(weekday_labels, 3);
    }

    #[test]
    fn empty_calendar_uses_width_formula() {
        let svg = render_svg(&ActivityCalendar::default(), "octocat", &RenderOptions::default()).unwrap();
        assert!(svg.contains("viewBox=\"0 0 67 225\""));
        assert!(!svg.contains("class=\"contribution-cell"));
    }

    #[test]
    fn fixed_section_order() {
        let options = RenderOptions {
            show_border: true,
            ..RenderOptions::default()
        };
        let svg = render_svg(&scenario(), "octocat", &options).unwrap();
        let style = svg.find("<style>").unwrap();
        let title = svg.find("contributions</text>").unwrap();
        let month = svg.find(">Jan</text>").unwrap();
        let weekday = svg.find(">Mon</text>").unwrap();
        let cell = svg.find("id=\"cell-0-0\"").unwrap();
        let legend = svg.find(">Less</text>").unwrap();
        let border = svg.find("fill=\"none\"").unwrap();
        assert!(style < title && title < month && month < weekday);
        assert!(weekday < cell && cell < legend && legend < border);
        assert!(svg[border..].starts_with("fill=\"none\" stroke=\"#d0d7de\" stroke-width=\"1\" rx=\"6\"/></svg>"));
    }

    #[test]
    fn border_only_adds_trailing_rect() {
        let calendar = ActivityCalendar {
            total_count: 0,
            weeks: weeks_from("2024-01-07", 10),
        };
        let plain = render_svg(&calendar, "a", &RenderOptions::default()).unwrap();
        let bordered = render_svg(
            &calendar,
            "a",
            &RenderOptions {
                show_border: true,
                ..RenderOptions::default()
            },
        )
        .unwrap();
        let plain_body = plain.strip_suffix("</svg>").unwrap();
        assert!(bordered.starts_with(plain_body));
        assert_eq!(
            &bordered[plain_body.len()..],
            "<rect x=\"0\" y=\"0\" width=\"207\" height=\"225\" fill=\"none\" stroke=\"#d0d7de\" stroke-width=\"1\" rx=\"6\"/></svg>"
        );
    }

    #[test]
    fn rejects_bad_geometry_and_data() {
        let bad_size = RenderOptions {
            cell_size: 0.0,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_svg(&scenario(), "a", &bad_size),
            Err(RenderError::Configuration(ConfigurationError::NonPositiveCellSize(0.0)))
        );

        let mut calendar = scenario();
        calendar.weeks[0].days.truncate(5);
        assert_eq!(
            render_svg(&calendar, "a", &RenderOptions::default()),
            Err(RenderError::Data(DataError::IncompleteWeek { week: 0, days: 5 }))
        );
    }

    #[test]
    fn palette_overrides_flow_through() {
        let mut palette = Palette::dark();
        palette.levels[3] = "#ff00ff".to_string();
        palette.background = "none".to_string();
        let svg =
            render_svg_with_palette(&scenario(), "a", &RenderOptions::default(), &palette).unwrap();
        assert!(svg.contains("fill=\"#ff00ff\""));
        assert!(!svg.contains("fill=\"none\""));
    }
}
