pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod io;
pub mod placement;
pub mod scale;
pub mod style;
pub mod surface;
