use crate::model::ContributionLevel;
use crate::theme::Palette;

use super::svg::{Anchor, TextStyle, push_rect, push_text};

const SWATCH_SIZE: f32 = 10.0;
const SWATCH_SPACING: f32 = 2.0;
const SWATCH_RADIUS: f32 = 2.0;
/// Room reserved for the "Less" caption left of the swatches.
const LESS_WIDTH: f32 = 30.0;
/// Room reserved for the "More" caption right of the swatches.
const MORE_WIDTH: f32 = 40.0;
const MORE_GAP: f32 = 10.0;
/// Distance between the scale's right edge and the canvas's right edge.
pub const RIGHT_INSET: f32 = 20.0;

/// Abbreviates large totals: `999`, `1.0K`, `12.3K`, `4.5M`, `1.2B`.
pub fn format_count(count: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000, "K"), (1_000_000, "M"), (1_000_000_000, "B")];
    if count < 1_000 {
        return count.to_string();
    }
    let mut formatted = String::new();
    for (scale, suffix) in UNITS {
        let value = count as f64 / scale as f64;
        formatted = format!("{value:.1}{suffix}");
        // `999_950` rounds to `1000.0K`; carry into the next unit instead.
        if format!("{value:.1}").parse::<f64>().unwrap_or(value) < 1000.0 {
            break;
        }
    }
    formatted
}

/// Left edge of the legend block for a canvas of `canvas_width`.
pub fn scale_start_x(canvas_width: f32) -> f32 {
    let levels = ContributionLevel::ALL.len() as f32;
    let scale_width = levels * (SWATCH_SIZE + SWATCH_SPACING) - SWATCH_SPACING;
    canvas_width - RIGHT_INSET - (LESS_WIDTH + scale_width + MORE_WIDTH)
}

pub fn render_legend(
    out: &mut String,
    total_count: u32,
    caption_x: f32,
    y: f32,
    canvas_width: f32,
    palette: &Palette,
) {
    let caption = TextStyle::new(11.0, &palette.muted_foreground).middle();
    let small = TextStyle::new(9.0, &palette.muted_foreground).middle();
    let row_y = y + SWATCH_SIZE / 2.0;

    push_text(
        out,
        &format!("{} contributions in the last year", format_count(u64::from(total_count))),
        caption_x,
        row_y,
        &caption,
    );

    let start_x = scale_start_x(canvas_width);
    push_text(out, "Less", start_x, row_y, &small.anchor(Anchor::End));

    let swatches_x = start_x + LESS_WIDTH;
    let mut x = swatches_x;
    for level in ContributionLevel::ALL {
        push_rect(
            out,
            (x, row_y - SWATCH_SIZE / 2.0, SWATCH_SIZE, SWATCH_SIZE),
            palette.level_color(level),
            None,
            Some(SWATCH_RADIUS),
        );
        x += SWATCH_SIZE + SWATCH_SPACING;
    }
    // `x` ran one spacing past the last swatch.
    let more_x = x - SWATCH_SPACING + MORE_GAP;
    push_text(out, "More", more_x, row_y, &small);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(5), "5");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.0K");
        assert_eq!(format_count(1260), "1.3K");
        assert_eq!(format_count(2_500_000), "2.5M");
        assert_eq!(format_count(3_000_000_000), "3.0B");
    }

    #[test]
    fn rounding_carries_into_the_next_unit() {
        assert_eq!(format_count(999_949), "999.9K");
        assert_eq!(format_count(999_950), "1.0M");
        assert_eq!(format_count(999_999_999), "1.0B");
        assert_eq!(format_count(5_000_000_000_000), "5000.0B");
    }

    #[test]
    fn scale_is_pinned_to_the_right_edge() {
        // 5 swatches span 58, plus 30 + 40 of captions.
        assert_eq!(scale_start_x(800.0), 800.0 - 20.0 - 128.0);
        assert_eq!(
            scale_start_x(1000.0) - scale_start_x(800.0),
            200.0,
            "moves with the canvas, not the grid"
        );
    }

    #[test]
    fn caption_and_scale() {
        let mut out = String::new();
        render_legend(&mut out, 5, 50.0, 188.0, 800.0, &Palette::light());
        assert!(out.contains(">5 contributions in the last year</text>"));
        assert!(out.contains("x=\"50\" y=\"193\""));
        assert_eq!(out.matches("<rect").count(), 5);
        let less = out.find(">Less<").unwrap();
        let more = out.find(">More<").unwrap();
        assert!(less < more);
        // first swatch right after the "Less" column
        assert!(out.contains("<rect x=\"682\" y=\"188\" width=\"10\" height=\"10\" fill=\"#ebedf0\" rx=\"2\"/>"));
        assert!(out.contains("x=\"750\" y=\"193\""));
    }
}
