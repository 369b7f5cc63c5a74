use std::fmt;

use crate::geometry::{is_positive, ScaleFactors, Size};

/// How the size of the magnified view is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomMode {
    /// Magnified view is the display size times this factor.
    Scale(f64),
    /// Magnified view has this width and the display height.
    FixedWidth(f64),
    /// Magnified view keeps whatever box its container gives it.
    AutoFit,
}

impl ZoomMode {
    /// Auto-fit needs the magnified view measured on the surface first.
    pub fn needs_measurement(&self) -> bool {
        matches!(self, Self::AutoFit)
    }
}

impl fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(factor) => write!(f, "Scale (x{factor})"),
            Self::FixedWidth(px) => write!(f, "Fixed Width ({px}px)"),
            Self::AutoFit => write!(f, "Auto Fit"),
        }
    }
}

/// Everything derived from one image load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomMetrics {
    pub scale: ScaleFactors,
    pub lens: Size,
    pub magnified: Size,
}

/// Ratio of natural to display size on each axis.
///
/// Returns `None` while either size has a zero, negative or non-finite
/// extent, which is how an image that has not finished loading looks.
pub fn scale_factors(natural: Size, display: Size) -> Option<ScaleFactors> {
    if !natural.is_positive() || !display.is_positive() {
        return None;
    }
    Some(ScaleFactors {
        x: natural.width / display.width,
        y: natural.height / display.height,
    })
}

/// Size of the magnified view for `mode`.
///
/// For auto-fit, `measured` is the box the surface rendered for the view.
/// An unusable measurement falls back to the display size.
pub fn magnified_size(mode: ZoomMode, display: Size, measured: Option<Size>) -> Size {
    match mode {
        ZoomMode::Scale(factor) => Size::new(display.width * factor, display.height * factor),
        ZoomMode::FixedWidth(px) => Size::new(px, display.height),
        ZoomMode::AutoFit => measured.filter(Size::is_positive).unwrap_or(display),
    }
}

/// Scale, lens and magnified view size for one load.
///
/// Pure: the same inputs always give the same metrics.
pub fn compute_metrics(
    natural: Size,
    display: Size,
    mode: ZoomMode,
    measured: Option<Size>,
) -> Option<ZoomMetrics> {
    let scale = scale_factors(natural, display)?;
    let magnified = magnified_size(mode, display, measured);

    let lens = match mode {
        ZoomMode::Scale(factor) => Size::new(
            display.width / (natural.width / (display.width * factor)),
            display.height / (natural.height / (display.height * factor)),
        ),
        ZoomMode::FixedWidth(px) => Size::new(px / scale.x, display.height / scale.y),
        ZoomMode::AutoFit => Size::new(magnified.width / scale.x, magnified.height / scale.y),
    };

    if !is_positive(lens.width) || !is_positive(lens.height) {
        return None;
    }

    Some(ZoomMetrics {
        scale,
        lens,
        magnified,
    })
}
