use crate::layout::LayoutPlan;
use crate::model::{Day, Week};
use crate::theme::Palette;

use super::svg::escape_xml;

/// Delay added per diagonal step so the reveal sweeps from the top-left corner.
const DELAY_PER_STEP_MS: usize = 18;

/// Tooltip shown on hover, e.g. `1 contribution on Mon Jan 08 2024`.
pub fn tooltip(day: &Day) -> String {
    let noun = if day.count == 1 {
        "contribution"
    } else {
        "contributions"
    };
    format!("{} {noun} on {}", day.count, day.date.format("%a %b %d %Y"))
}

pub fn render_cells(
    out: &mut String,
    weeks: &[Week],
    plan: &LayoutPlan,
    corner_radius: f32,
    palette: &Palette,
    enable_animations: bool,
) {
    for (week_idx, week) in weeks.iter().enumerate() {
        for day in &week.days {
            let row = usize::from(day.weekday);
            let (x, y) = plan.cell_origin(week_idx, row);
            let class = if day.level.is_high() {
                "contribution-cell high-contribution"
            } else {
                "contribution-cell"
            };
            out.push_str(&format!(
                "<rect id=\"cell-{week_idx}-{row}\" class=\"{class}\" x=\"{x}\" y=\"{y}\" width=\"{size}\" height=\"{size}\" fill=\"{fill}\" rx=\"{corner_radius}\"",
                size = plan.cell_size,
                fill = escape_xml(palette.level_color(day.level)),
            ));
            if enable_animations {
                let delay = (week_idx + row) * DELAY_PER_STEP_MS;
                out.push_str(&format!(" style=\"animation-delay: {delay}ms;\""));
            }
            out.push_str(&format!("><title>{}</title></rect>", escape_xml(&tooltip(day))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::model::ContributionLevel::*;
    use crate::model::fixtures::week;
    use crate::options::RenderOptions;

    fn one_week() -> Vec<Week> {
        vec![week(
            "2024-01-07",
            [0, 1, 0, 3, 0, 0, 12],
            [None, FirstQuartile, None, ThirdQuartile, None, None, FourthQuartile],
        )]
    }

    fn render(weeks: &[Week], animate: bool) -> String {
        let options = RenderOptions::default();
        let plan = compute_layout(weeks.len(), &options);
        let mut out = String::new();
        render_cells(&mut out, weeks, &plan, 2.0, &Palette::light(), animate);
        out
    }

    #[test]
    fn pluralizes_tooltip() {
        let weeks = one_week();
        assert_eq!(tooltip(&weeks[0].days[1]), "1 contribution on Mon Jan 08 2024");
        assert_eq!(tooltip(&weeks[0].days[0]), "0 contributions on Sun Jan 07 2024");
        assert_eq!(tooltip(&weeks[0].days[3]), "3 contributions on Wed Jan 10 2024");
    }

    #[test]
    fn one_cell_per_day_with_level_colors() {
        let out = render(&one_week(), true);
        assert_eq!(out.matches("<rect ").count(), 7);
        assert!(out.contains("id=\"cell-0-1\""));
        assert!(out.contains("fill=\"#9be9a8\""));
        assert!(out.contains("fill=\"#216e39\""));
        assert_eq!(out.matches("high-contribution").count(), 2);
    }

    #[test]
    fn delay_follows_diagonal() {
        let weeks = vec![week("2024-01-07", [0; 7], [None; 7]), week("2024-01-14", [0; 7], [None; 7])];
        let out = render(&weeks, true);
        assert!(out.contains("id=\"cell-0-0\" class=\"contribution-cell\" x=\"50\" y=\"70\""));
        assert!(out.contains("animation-delay: 0ms;"));
        // week 1, row 6 -> 7 steps
        assert!(out.contains("animation-delay: 126ms;"));
    }

    #[test]
    fn no_delay_when_static() {
        let out = render(&one_week(), false);
        assert!(!out.contains("animation-delay"));
        assert!(!out.contains("style="));
    }
}
