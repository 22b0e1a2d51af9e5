#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod options;
#[cfg(feature = "rate-limit")]
pub mod rate_limit;
pub mod render;
pub mod request;
pub mod stats;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use error::{ConfigurationError, DataError, RenderError};
pub use layout::{LayoutPlan, compute_layout};
pub use model::{ActivityCalendar, ContributionData, ContributionLevel, Day, Week};
pub use options::RenderOptions;
pub use render::{render_svg, render_svg_with_palette};
pub use theme::{Palette, ThemeName};
