use loupe_core::config::{Offset, ZoomOptions, ZoomPosition};
use loupe_core::scale::ZoomMode;

use super::choices::ZoomModeChoice;

/// Zoom options as editable UI fields.
pub struct ConfigState {
    // Source display size; `None` resolves from the image.
    pub width: Option<f64>,
    pub height: Option<f64>,

    // Magnified view
    pub mode: ZoomModeChoice,
    pub scale: f64,
    pub zoom_width: f64,
    pub position: ZoomPosition,
    pub offset_vertical: f64,
    pub offset_horizontal: f64,

    // Sources and containers; empty means unset.
    pub img: String,
    pub zoom_container: String,

    // Extra style declarations
    pub zoom_style: String,
    pub zoom_lens_style: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            width: Some(400.0),
            height: None,

            mode: ZoomModeChoice::default(),
            scale: 1.5,
            zoom_width: 500.0,
            position: ZoomPosition::default(),
            offset_vertical: 0.0,
            offset_horizontal: 10.0,

            img: String::new(),
            zoom_container: String::new(),

            zoom_style: String::new(),
            zoom_lens_style: String::new(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl ConfigState {
    pub fn to_options(&self) -> ZoomOptions {
        let (scale, zoom_width) = match self.mode {
            ZoomModeChoice::Scale => (Some(self.scale), None),
            ZoomModeChoice::FixedWidth => (None, Some(self.zoom_width)),
            ZoomModeChoice::AutoFit => (None, None),
        };
        ZoomOptions {
            width: self.width,
            height: self.height,
            zoom_width,
            scale,
            img: non_empty(&self.img),
            offset: Offset {
                vertical: self.offset_vertical,
                horizontal: self.offset_horizontal,
            },
            zoom_container: non_empty(&self.zoom_container),
            zoom_style: non_empty(&self.zoom_style),
            zoom_lens_style: non_empty(&self.zoom_lens_style),
            zoom_position: self.position,
        }
    }

    /// Load fields from imported options. Values the options leave out
    /// keep their current setting where the UI needs one.
    pub fn apply_options(&mut self, options: &ZoomOptions) {
        self.width = options.width;
        self.height = options.height;
        match options.zoom_mode() {
            ZoomMode::Scale(factor) => {
                self.mode = ZoomModeChoice::Scale;
                self.scale = factor;
            }
            ZoomMode::FixedWidth(px) => {
                self.mode = ZoomModeChoice::FixedWidth;
                self.zoom_width = px;
            }
            ZoomMode::AutoFit => self.mode = ZoomModeChoice::AutoFit,
        }
        self.position = options.zoom_position;
        self.offset_vertical = options.offset.vertical;
        self.offset_horizontal = options.offset.horizontal;
        self.img = options.img.clone().unwrap_or_default();
        self.zoom_container = options.zoom_container.clone().unwrap_or_default();
        self.zoom_style = options.zoom_style.clone().unwrap_or_default();
        self.zoom_lens_style = options.zoom_lens_style.clone().unwrap_or_default();
    }
}
