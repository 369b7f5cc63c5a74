use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LoupeError, Result};
use crate::geometry::is_positive;
use crate::scale::ZoomMode;

/// Where the magnified view is placed relative to the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomPosition {
    #[default]
    Right,
    Left,
    Top,
    Bottom,
    /// Drawn over the source image itself.
    #[serde(alias = "overlay")]
    Original,
}

impl ZoomPosition {
    pub const ALL: &[Self] = &[
        Self::Right,
        Self::Left,
        Self::Top,
        Self::Bottom,
        Self::Original,
    ];
}

impl fmt::Display for ZoomPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => write!(f, "right"),
            Self::Left => write!(f, "left"),
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Original => write!(f, "original"),
        }
    }
}

/// Pixel gap between the source image and the magnified view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub vertical: f64,
    #[serde(default)]
    pub horizontal: f64,
}

/// User-facing widget options.
///
/// Field names serialize in camelCase (`zoomWidth`, `zoomPosition`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomOptions {
    /// Display width of the source image. Resolved at load time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Display height of the source image. Resolved at load time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Fixed width of the magnified view. Ignored when `scale` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_width: Option<f64>,
    /// Magnification relative to the display size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// URL of the image to zoom. When set the container's children are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default)]
    pub offset: Offset,
    /// Name of an alternate region the magnified view is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_container: Option<String>,
    /// Extra style declarations for the magnified view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_style: Option<String>,
    /// Extra style declarations for the lens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_lens_style: Option<String>,
    #[serde(default)]
    pub zoom_position: ZoomPosition,
}

impl ZoomOptions {
    /// Options for a source displayed `width` pixels wide.
    pub fn with_width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    /// Reject zoom parameters that can never produce a usable view.
    pub fn validate(&self) -> Result<()> {
        if let Some(scale) = self.scale {
            if !is_positive(scale) {
                return Err(LoupeError::InvalidOption {
                    name: "scale",
                    value: scale,
                });
            }
        }
        if let Some(zoom_width) = self.zoom_width {
            if !is_positive(zoom_width) {
                return Err(LoupeError::InvalidOption {
                    name: "zoomWidth",
                    value: zoom_width,
                });
            }
        }
        Ok(())
    }

    /// Zoom mode implied by the options: `scale` wins over `zoomWidth`,
    /// and auto-fit applies when neither is given.
    pub fn zoom_mode(&self) -> ZoomMode {
        if let Some(factor) = self.scale.filter(|s| is_positive(*s)) {
            ZoomMode::Scale(factor)
        } else if let Some(px) = self.zoom_width.filter(|w| is_positive(*w)) {
            ZoomMode::FixedWidth(px)
        } else {
            ZoomMode::AutoFit
        }
    }

    /// Configured display width, if usable.
    pub fn display_width(&self) -> Option<f64> {
        self.width.filter(|w| is_positive(*w))
    }

    /// Configured display height, if usable.
    pub fn display_height(&self) -> Option<f64> {
        self.height.filter(|h| is_positive(*h))
    }
}
