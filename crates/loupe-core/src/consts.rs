/// Style declarations every lens starts with. User overrides are appended
/// after these, so they win on conflicting properties.
pub const DEFAULT_LENS_STYLE: &str = "position: absolute; background: white; opacity: 0.4; pointer-events: none;";

/// Style declarations every magnified view starts with.
pub const DEFAULT_MAGNIFIED_STYLE: &str = "position: absolute; background-repeat: no-repeat;";
