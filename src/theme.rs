use serde::{Deserialize, Serialize};

use crate::model::ContributionLevel;

/// Built-in theme identifiers. Anything unrecognized resolves to `Light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl From<String> for ThemeName {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
    pub muted_foreground: String,
    pub border: String,
    /// Intensity scale indexed by `ContributionLevel::index`, none through highest.
    pub levels: [String; 5],
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#0d1117".to_string(),
            muted_foreground: "#656d76".to_string(),
            border: "#d0d7de".to_string(),
            levels: [
                "#ebedf0".to_string(),
                "#9be9a8".to_string(),
                "#40c463".to_string(),
                "#30a14e".to_string(),
                "#216e39".to_string(),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#0d1117".to_string(),
            foreground: "#f0f6fc".to_string(),
            muted_foreground: "#8b949e".to_string(),
            border: "#30363d".to_string(),
            levels: [
                "#161b22".to_string(),
                "#0e4429".to_string(),
                "#006d32".to_string(),
                "#26a641".to_string(),
                "#39d353".to_string(),
            ],
        }
    }

    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    /// Resolves a free-form identifier, e.g. straight from a query string.
    pub fn resolve(identifier: &str) -> Self {
        Self::for_theme(ThemeName::from_token(identifier))
    }

    pub fn level_color(&self, level: ContributionLevel) -> &str {
        &self.levels[level.index()]
    }

    /// Whether the document should carry a background fill at all.
    pub fn has_background(&self) -> bool {
        let bg = self.background.trim();
        !(bg.is_empty() || bg.eq_ignore_ascii_case("none") || bg.eq_ignore_ascii_case("transparent"))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_is_light() {
        assert_eq!(Palette::resolve("solarized"), Palette::light());
        assert_eq!(Palette::resolve(" DARK "), Palette::dark());
        let parsed: ThemeName = serde_json::from_str("\"neon\"").unwrap();
        assert_eq!(parsed, ThemeName::Light);
    }

    #[test]
    fn levels_map_in_order() {
        let palette = Palette::dark();
        let colors: Vec<&str> = ContributionLevel::ALL
            .iter()
            .map(|level| palette.level_color(*level))
            .collect();
        assert_eq!(colors, ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"]);
    }

    #[test]
    fn transparent_background_is_skipped() {
        let mut palette = Palette::light();
        assert!(palette.has_background());
        palette.background = "transparent".to_string();
        assert!(!palette.has_background());
    }
}
