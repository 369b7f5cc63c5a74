use std::fmt;

/// Zoom mode selector (no associated data, just the discriminant).
#[derive(Clone, Copy, PartialEq, Default)]
pub enum ZoomModeChoice {
    Scale,
    #[default]
    FixedWidth,
    AutoFit,
}

impl ZoomModeChoice {
    pub const ALL: &[Self] = &[Self::Scale, Self::FixedWidth, Self::AutoFit];
}

impl fmt::Display for ZoomModeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale => write!(f, "Scale"),
            Self::FixedWidth => write!(f, "Fixed Width"),
            Self::AutoFit => write!(f, "Auto Fit"),
        }
    }
}
