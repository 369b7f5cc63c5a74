use std::path::PathBuf;

use loupe_core::config::ZoomOptions;
use loupe_core::geometry::Size;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode the image behind `url` (a file path).
    DecodeImage { url: String },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageDecoded {
        url: String,
        natural: Size,
        image: egui::ColorImage,
    },
    /// Options read from a TOML file picked in the menu.
    ConfigImported {
        path: PathBuf,
        options: ZoomOptions,
    },
    /// A file picked through File > Open.
    FileOpened { path: PathBuf },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
