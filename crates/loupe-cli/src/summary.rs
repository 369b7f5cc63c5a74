use std::path::Path;

use console::Style;
use loupe_core::config::ZoomOptions;
use loupe_core::controller::LoadedGeometry;
use loupe_core::geometry::{Point, Size};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn size(s: Size) -> String {
    format!("{}x{}", s.width, s.height)
}

fn point(p: Point) -> String {
    format!("({}, {})", p.x, p.y)
}

pub fn print_session_summary(image: &Path, options: &ZoomOptions, geometry: &LoadedGeometry) {
    let s = Styles::new();
    let metrics = &geometry.metrics;

    println!();
    println!("  {}", s.title.apply_to("Loupe Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(image.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(options.zoom_mode())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Position"),
        s.method.apply_to(options.zoom_position)
    );
    println!();

    println!("  {}", s.header.apply_to("Geometry"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Natural"),
        s.value.apply_to(size(geometry.natural))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Display"),
        s.value.apply_to(size(geometry.display))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value
            .apply_to(format!("{:.3} x {:.3}", metrics.scale.x, metrics.scale.y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Lens"),
        s.value.apply_to(size(metrics.lens))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Magnified"),
        s.value.apply_to(size(metrics.magnified))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("View at"),
        s.value.apply_to(point(geometry.magnified_origin))
    );
    println!();
}

pub fn print_trace_header() {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Pointer Trace"));
    println!(
        "    {:<6}{:<22}{:<22}{}",
        s.label.apply_to("#"),
        s.label.apply_to("Pointer"),
        s.label.apply_to("Lens"),
        s.label.apply_to("Background")
    );
}

pub fn print_trace_row(index: usize, client: Point, lens: Point, offset: Point) {
    let s = Styles::new();
    println!(
        "    {:<6}{:<22}{:<22}{}",
        s.label.apply_to(index + 1),
        s.value.apply_to(point(client)),
        s.value.apply_to(point(lens)),
        s.method.apply_to(point(offset))
    );
}
