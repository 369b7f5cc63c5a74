use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoupeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Container element is not attached to the surface")]
    MissingContainer,

    #[error("No source image: container has no image child and no `img` URL was given")]
    MissingSourceImage,

    #[error("Zoom container `{0}` could not be resolved")]
    MissingZoomContainer(String),

    #[error("Invalid option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("Presentation error: {0}")]
    Presentation(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, LoupeError>;
