pub mod controls;
pub mod menu_bar;
pub mod status;
pub mod viewport;

mod helpers;

pub(crate) use helpers::{enum_combo, section_header};
