use crate::config::{Config, load_config};
use crate::layout_dump::write_layout_dump;
use crate::model::ContributionData;
use crate::options::RenderOptions;
use crate::render::{render_svg_with_palette, write_output_svg};
use crate::request::is_valid_username;
use crate::stats::{ContributionStats, MonthlyTotal, monthly_totals};
use crate::theme::{Palette, ThemeName};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contrib-svg",
    version,
    about = "Render a contribution calendar (JSON) to a themed SVG heatmap"
)]
pub struct Args {
    /// Calendar JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5): theme, themeVariables, options, render
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Username for the default title; overrides the one in the input document
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Theme (unknown names fall back to light)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Title text replacing "<name>'s contributions"
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Year shown in the default title
    #[arg(long = "year")]
    pub year: Option<i32>,

    #[arg(long = "cell-size")]
    pub cell_size: Option<f32>,

    #[arg(long = "cell-spacing", allow_negative_numbers = true)]
    pub cell_spacing: Option<f32>,

    #[arg(long = "hide-title")]
    pub hide_title: bool,

    #[arg(long = "show-border")]
    pub show_border: bool,

    #[arg(long = "no-legend")]
    pub no_legend: bool,

    #[arg(long = "no-month-labels")]
    pub no_month_labels: bool,

    #[arg(long = "no-weekday-labels")]
    pub no_weekday_labels: bool,

    #[arg(long = "no-animations")]
    pub no_animations: bool,

    /// PNG scale factor
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f32>,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Write contribution statistics as JSON
    #[arg(long = "stats")]
    pub stats: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    username: String,
    stats: ContributionStats,
    months: Vec<MonthlyTotal>,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let base_config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let data = ContributionData::from_json(&input)?;

    let username = args.username.clone().unwrap_or_else(|| data.username.clone());
    if !username.is_empty() && !is_valid_username(&username) {
        tracing::warn!(username = %username, "username does not look like a valid account name");
    }

    let mut config = apply_args(base_config, &args);
    if config.options.display_name.is_none() {
        config.options.display_name = data.name.clone();
    }
    if config.options.year.is_none() {
        config.options.year = data.year();
    }

    ensure_title_subject(&config.options, &username)?;

    let svg = render_svg_with_palette(&data.calendar, &username, &config.options, &config.palette)?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &data.calendar, &config.options)?;
    }
    if let Some(path) = args.stats.as_deref() {
        let report = StatsReport {
            username: username.clone(),
            stats: ContributionStats::from_days(data.calendar.days()),
            months: monthly_totals(data.calendar.days()),
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line flags override the config file.
fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(theme) = args.theme.as_deref() {
        let theme = ThemeName::from_token(theme);
        if theme != config.options.theme {
            config.palette = Palette::for_theme(theme);
        }
        config.options.theme = theme;
    }
    if let Some(title) = &args.title {
        config.options.title = Some(title.clone());
    }
    if let Some(year) = args.year {
        config.options.year = Some(year);
    }
    if let Some(size) = args.cell_size {
        config.options.cell_size = size;
    }
    if let Some(spacing) = args.cell_spacing {
        config.options.cell_spacing = spacing;
    }
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }
    config.options.hide_title |= args.hide_title;
    config.options.show_border |= args.show_border;
    config.options.show_legend &= !args.no_legend;
    config.options.show_month_labels &= !args.no_month_labels;
    config.options.show_weekday_labels &= !args.no_weekday_labels;
    config.options.enable_animations &= !args.no_animations;
    config
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

/// A default title needs someone to name.
fn ensure_title_subject(options: &RenderOptions, username: &str) -> Result<()> {
    let has_name = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
    if options.hide_title
        || has_name(options.title.as_deref())
        || has_name(options.display_name.as_deref())
        || !username.trim().is_empty()
    {
        return Ok(());
    }
    Err(anyhow::anyhow!(
        "Input has no username; pass --username, --title or --hide-title"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "contrib-svg",
            "--theme",
            "dark",
            "--cell-size",
            "9",
            "--cell-spacing",
            "-1",
            "--no-legend",
            "--show-border",
            "--no-animations",
        ]);
        let config = apply_args(Config::default(), &args);
        assert_eq!(config.options.theme, ThemeName::Dark);
        assert_eq!(config.palette, Palette::dark());
        assert_eq!(config.options.cell_size, 9.0);
        assert_eq!(config.options.cell_spacing, -1.0);
        assert!(!config.options.show_legend);
        assert!(config.options.show_border);
        assert!(!config.options.enable_animations);
        assert!(config.options.show_month_labels);
    }

    #[test]
    fn same_theme_keeps_palette_overrides() {
        let mut config = Config::default();
        config.palette.border = "#abcdef".to_string();
        let args = Args::parse_from(["contrib-svg", "--theme", "light"]);
        let config = apply_args(config, &args);
        assert_eq!(config.palette.border, "#abcdef");
    }

    #[test]
    fn default_title_needs_a_name() {
        let options = RenderOptions::default();
        assert!(ensure_title_subject(&options, "").is_err());
        assert!(ensure_title_subject(&options, "  ").is_err());
        assert!(ensure_title_subject(&options, "octocat").is_ok());

        let named = RenderOptions {
            display_name: Some("The Octocat".to_string()),
            ..RenderOptions::default()
        };
        assert!(ensure_title_subject(&named, "").is_ok());

        let titled = RenderOptions {
            title: Some("Activity".to_string()),
            ..RenderOptions::default()
        };
        assert!(ensure_title_subject(&titled, "").is_ok());

        let hidden = RenderOptions {
            hide_title: true,
            ..RenderOptions::default()
        };
        assert!(ensure_title_subject(&hidden, "").is_ok());
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
