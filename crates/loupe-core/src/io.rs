use std::path::Path;

use crate::error::Result;
use crate::geometry::Size;

/// Intrinsic pixel size of an image file, read from its header only.
pub fn natural_size(path: &Path) -> Result<Size> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(Size::new(width as f64, height as f64))
}
