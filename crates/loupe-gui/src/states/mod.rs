mod choices;
mod config;
mod ui;

pub use choices::ZoomModeChoice;
pub use config::ConfigState;
pub use ui::UIState;
