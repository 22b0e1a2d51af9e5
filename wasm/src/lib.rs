use contrib_svg::{ContributionData, RenderOptions, render_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options accepted from JavaScript: every render option plus an optional username override.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarRenderOptions {
    username: Option<String>,
    #[serde(flatten)]
    render: RenderOptions,
}

fn render_document(data_json: &str, options: CalendarRenderOptions) -> Result<String, String> {
    let data = ContributionData::from_json(data_json).map_err(|error| error.to_string())?;
    let mut render = options.render;
    if render.display_name.is_none() {
        render.display_name = data.name.clone();
    }
    if render.year.is_none() {
        render.year = data.year();
    }
    let username = options.username.unwrap_or(data.username);
    render_svg(&data.calendar, &username, &render).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn render_contributions_svg(
    data_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<CalendarRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        CalendarRenderOptions::default()
    };

    render_document(data_json, options).map_err(|error| JsValue::from_str(&error))
}
