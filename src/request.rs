//! Mapping from a query string to a render request.
//!
//! Nothing here touches the network; an HTTP layer hands over the decoded pairs and gets back
//! either a [`ContributionRequest`] or a client-facing [`RequestError`].

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::options::RenderOptions;
use crate::theme::ThemeName;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    // Alphanumerics and single inner hyphens, at most 39 characters.
    Regex::new(r"(?i)^[a-z\d](?:[a-z\d]|-[a-z\d]){0,38}$").expect("username pattern compiles")
});

const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid year: {0}")]
    InvalidYear(String),
}

pub fn is_valid_username(username: &str) -> bool {
    username.len() <= MAX_USERNAME_LEN && USERNAME_RE.is_match(username)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRequest {
    pub username: String,
    pub year: Option<i32>,
    pub options: RenderOptions,
}

impl ContributionRequest {
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
        };

        let username = get("username")
            .filter(|v| !v.is_empty())
            .or_else(|| get("u"))
            .unwrap_or_default();
        if !is_valid_username(username) {
            return Err(RequestError::InvalidUsername);
        }

        let year = match get("year").filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| RequestError::InvalidYear(raw.to_string()))?,
            ),
            None => None,
        };

        let defaults = RenderOptions::default();
        let flag = |key: &str, default: bool| get(key).map_or(default, |v| v == "true");
        // Non-numeric or zero values keep the default.
        let number = |key: &str, default: f32| {
            get(key)
                .and_then(|v| v.trim().parse::<f32>().ok())
                .filter(|v| *v != 0.0 && v.is_finite())
                .unwrap_or(default)
        };

        let options = RenderOptions {
            theme: get("theme").map_or(ThemeName::Light, ThemeName::from_token),
            cell_size: number("cell_size", defaults.cell_size),
            cell_spacing: get("cell_spacing")
                .and_then(|v| v.trim().parse::<f32>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(defaults.cell_spacing),
            corner_radius: number("corner_radius", defaults.corner_radius),
            show_month_labels: flag("show_month_labels", defaults.show_month_labels),
            show_weekday_labels: flag("show_weekday_labels", defaults.show_weekday_labels),
            show_legend: flag("show_legend", defaults.show_legend),
            show_border: flag("show_border", defaults.show_border),
            border_width: number("border_width", defaults.border_width),
            border_radius: number("border_radius", defaults.border_radius),
            hide_title: flag("hide_title", defaults.hide_title),
            title: get("title").filter(|v| !v.is_empty()).map(str::to_string),
            enable_animations: flag("enable_animations", defaults.enable_animations),
            display_name: None,
            year,
        };

        Ok(Self {
            username: username.to_string(),
            year,
            options,
        })
    }
}
