use std::sync::mpsc;

use anyhow::{Context, Result};
use loupe_core::geometry::Size;
use tracing::{info, warn};

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the decoder thread. Every result is followed by a repaint request
/// so the UI picks it up without waiting for input.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let result = match cmd {
                WorkerCommand::DecodeImage { url } => match decode(&url) {
                    Ok((natural, image)) => {
                        info!(
                            url = %url,
                            width = natural.width,
                            height = natural.height,
                            "Image decoded"
                        );
                        WorkerResult::ImageDecoded {
                            url,
                            natural,
                            image,
                        }
                    }
                    Err(e) => {
                        warn!(url = %url, "Decode failed: {e:#}");
                        WorkerResult::Error {
                            message: format!("{e:#}"),
                        }
                    }
                },
            };
            if result_tx.send(result).is_err() {
                break;
            }
            ctx.request_repaint();
        }
    });

    cmd_tx
}

fn decode(url: &str) -> Result<(Size, egui::ColorImage)> {
    let image = image::open(url)
        .with_context(|| format!("Failed to decode {url}"))?
        .to_rgba8();
    let natural = Size::new(image.width() as f64, image.height() as f64);
    Ok((natural, rgba_to_color_image(&image)))
}
