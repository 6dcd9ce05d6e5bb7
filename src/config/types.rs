//! Configuration type definitions.

use super::enums::{ColorSpec, OffsetSnap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Selection outline appearance.
///
/// The outline is drawn as a dashed stroke over a dark underlay so it stays
/// visible on both light and dark images.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Outline stroke width in pixels (valid range: 0.5 - 10.0)
    #[serde(default = "default_outline_width")]
    pub outline_width: f64,

    /// Length of each dash and gap in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_dash_length")]
    pub dash_length: f64,

    /// Dash color - a named color or an RGB array like `[255, 255, 255]`
    #[serde(default = "default_outline_color")]
    pub outline_color: ColorSpec,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            outline_width: default_outline_width(),
            dash_length: default_dash_length(),
            outline_color: default_outline_color(),
        }
    }
}

/// Settings for compositing the floating pixels back onto their layer.
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct CommitConfig {
    /// How fractional drag offsets land on the pixel grid ("truncate" or "round")
    #[serde(default)]
    pub offset_snap: OffsetSnap,
}

/// Output rendering settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Background painted under all layers when flattening; "none" keeps transparency
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_outline_width() -> f64 {
    1.0
}

fn default_dash_length() -> f64 {
    4.0
}

fn default_outline_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("none".to_string())
}
