use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use loupe_core::config::{ZoomOptions, ZoomPosition};
use loupe_core::controller::ImageZoom;
use loupe_core::geometry::{Point, Size};
use loupe_core::headless::HeadlessSurface;
use loupe_core::io::natural_size;
use loupe_core::surface::ZoomEvent;
use tracing::debug;

use crate::summary;

#[derive(Clone, ValueEnum)]
pub enum PositionArg {
    Right,
    Left,
    Top,
    Bottom,
    Original,
}

impl From<PositionArg> for ZoomPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Right => ZoomPosition::Right,
            PositionArg::Left => ZoomPosition::Left,
            PositionArg::Top => ZoomPosition::Top,
            PositionArg::Bottom => ZoomPosition::Bottom,
            PositionArg::Original => ZoomPosition::Original,
        }
    }
}

#[derive(Args)]
pub struct TraceArgs {
    /// Source image file
    #[arg(long)]
    pub image: PathBuf,

    /// Zoom options file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page position of the container, as x,y
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    pub origin: Point,

    /// Pointer positions in viewport coordinates, as x,y
    #[arg(long, value_parser = parse_point, num_args = 1.., required = true)]
    pub pointer: Vec<Point>,

    /// Display width of the source
    #[arg(long)]
    pub width: Option<f64>,

    /// Display height of the source
    #[arg(long)]
    pub height: Option<f64>,

    /// Magnification relative to the display size
    #[arg(long)]
    pub scale: Option<f64>,

    /// Fixed width of the magnified view
    #[arg(long)]
    pub zoom_width: Option<f64>,

    /// Placement of the magnified view
    #[arg(long, value_enum)]
    pub position: Option<PositionArg>,
}

pub fn run(args: &TraceArgs) -> Result<()> {
    let options = build_options(args)?;
    let natural = natural_size(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;

    let container_size = Size::new(
        options.display_width().unwrap_or(natural.width),
        options.display_height().unwrap_or(natural.height),
    );
    let url = args.image.display().to_string();

    let mut surface = HeadlessSurface::new();
    let container = surface.add_region(None, "container", args.origin, container_size);
    surface.register_resource(&url, natural);
    let image = surface.add_image(container, &url, None);

    let mut zoom = ImageZoom::attach(surface, container, options)?;
    if zoom.surface_mut().finish_loading(image) {
        zoom.handle_event(ZoomEvent::ImageLoaded);
    }

    let info = zoom.instance_info();
    let geometry = info
        .geometry
        .context("Image has no usable extent; nothing to trace")?;
    summary::print_session_summary(&args.image, &info.options, &geometry);

    zoom.handle_event(ZoomEvent::PointerEnter);
    summary::print_trace_header();
    for (index, &client) in args.pointer.iter().enumerate() {
        zoom.handle_event(ZoomEvent::PointerMove { client });
        let info = zoom.instance_info();
        match (info.lens_origin, info.background_offset) {
            (Some(lens), Some(offset)) => summary::print_trace_row(index, client, lens, offset),
            _ => debug!(x = client.x, y = client.y, "Pointer produced no lens update"),
        }
    }

    zoom.handle_event(ZoomEvent::PointerLeave);
    zoom.kill();
    println!();

    Ok(())
}

fn build_options(args: &TraceArgs) -> Result<ZoomOptions> {
    let mut options: ZoomOptions = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid zoom options")?
    } else {
        ZoomOptions::default()
    };

    if args.width.is_some() {
        options.width = args.width;
    }
    if args.height.is_some() {
        options.height = args.height;
    }
    if args.scale.is_some() {
        options.scale = args.scale;
    }
    if args.zoom_width.is_some() {
        options.zoom_width = args.zoom_width;
    }
    if let Some(ref position) = args.position {
        options.zoom_position = position.clone().into();
    }
    // The image is supplied by the host region, not fetched by URL.
    options.img = None;
    options.zoom_container = None;

    Ok(options)
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Point::new(x, y))
}
