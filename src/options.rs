use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::theme::ThemeName;

/// Per-render switches. Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub theme: ThemeName,
    pub cell_size: f32,
    pub cell_spacing: f32,
    pub corner_radius: f32,
    pub show_month_labels: bool,
    pub show_weekday_labels: bool,
    pub show_legend: bool,
    pub show_border: bool,
    pub border_width: f32,
    pub border_radius: f32,
    pub hide_title: bool,
    pub title: Option<String>,
    pub enable_animations: bool,
    pub display_name: Option<String>,
    pub year: Option<i32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: ThemeName::Light,
            cell_size: 11.0,
            cell_spacing: 3.0,
            corner_radius: 2.0,
            show_month_labels: true,
            show_weekday_labels: true,
            show_legend: true,
            show_border: false,
            border_width: 1.0,
            border_radius: 6.0,
            hide_title: false,
            title: None,
            enable_animations: true,
            display_name: None,
            year: None,
        }
    }
}

impl RenderOptions {
    /// Distance between the origins of two neighbouring cells.
    pub fn cell_pitch(&self) -> f32 {
        self.cell_size + self.cell_spacing
    }

    /// Rejects geometry that cannot be laid out. NaN counts as invalid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.cell_size > 0.0) || !self.cell_size.is_finite() {
            return Err(ConfigurationError::NonPositiveCellSize(self.cell_size));
        }
        if !(self.cell_spacing >= 0.0) || !self.cell_spacing.is_finite() {
            return Err(ConfigurationError::NegativeCellSpacing(self.cell_spacing));
        }
        Ok(())
    }

    /// Heading shown above the grid when the title is not hidden.
    pub fn title_text(&self, username: &str) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        let who = self
            .display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(username);
        match self.year {
            Some(year) => format!("{who}'s contributions in {year}"),
            None => format!("{who}'s contributions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"theme": "dark", "showBorder": true, "cellSize": 9}"#)
                .unwrap();
        assert_eq!(options.theme, ThemeName::Dark);
        assert!(options.show_border);
        assert_eq!(options.cell_size, 9.0);
        assert_eq!(options.cell_spacing, 3.0);
        assert!(options.enable_animations);
    }

    #[test]
    fn geometry_validation() {
        let mut options = RenderOptions::default();
        assert!(options.validate().is_ok());
        options.cell_size = 0.0;
        assert_eq!(
            options.validate(),
            Err(ConfigurationError::NonPositiveCellSize(0.0))
        );
        options.cell_size = f32::NAN;
        assert!(options.validate().is_err());
        options.cell_size = 10.0;
        options.cell_spacing = -1.0;
        assert_eq!(
            options.validate(),
            Err(ConfigurationError::NegativeCellSpacing(-1.0))
        );
        options.cell_spacing = 0.0;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn title_fallbacks() {
        let mut options = RenderOptions::default();
        assert_eq!(options.title_text("octocat"), "octocat's contributions");
        options.display_name = Some("Mona".to_string());
        options.year = Some(2024);
        assert_eq!(options.title_text("octocat"), "Mona's contributions in 2024");
        options.title = Some("Custom".to_string());
        assert_eq!(options.title_text("octocat"), "Custom");
    }
}
