use crate::options::RenderOptions;
use crate::theme::{Palette, ThemeName};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster scale factor for PNG output.
    pub scale: f32,
    /// Fallback font family handed to the rasterizer.
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            font_family: "Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub palette: Palette,
    pub options: RenderOptions,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    foreground: Option<String>,
    muted_foreground: Option<String>,
    border: Option<String>,
    levels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
    font_family: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    options: Option<RenderOptions>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(options) = parsed.options {
        config.options = options;
    }
    // A top-level theme wins over one nested in the options block.
    if let Some(theme_name) = parsed.theme.as_deref() {
        config.options.theme = ThemeName::from_token(theme_name);
    }
    config.palette = Palette::for_theme(config.options.theme);

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.palette, vars)?;
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
        if let Some(v) = render.font_family {
            config.render.font_family = v;
        }
    }

    Ok(config)
}

fn apply_theme_variables(palette: &mut Palette, vars: ThemeVariables) -> anyhow::Result<()> {
    if let Some(v) = vars.background {
        palette.background = v;
    }
    if let Some(v) = vars.foreground {
        palette.foreground = v;
    }
    if let Some(v) = vars.muted_foreground {
        palette.muted_foreground = v;
    }
    if let Some(v) = vars.border {
        palette.border = v;
    }
    if let Some(levels) = vars.levels {
        let count = levels.len();
        palette.levels = levels.try_into().map_err(|_| {
            anyhow::anyhow!("themeVariables.levels needs exactly 5 colors, got {count}")
        })?;
    }
    Ok(())
}
