use std::path::Path;

use anyhow::Context;

use renderer::Renderer;
use shared::{sky::CubeSampler, PhysicalParams};

use crate::cli::Args;

/// Renders one full-resolution frame headlessly and writes it as an image.
pub fn save(
    args: &Args,
    params: PhysicalParams,
    sky: Box<dyn CubeSampler>,
    output: &Path,
) -> anyhow::Result<()> {
    firestorm::profile_fn!(save);

    let camera = args.orbit(&params).camera();
    let mut renderer = Renderer::create(sky, params, (args.width, args.height), camera);
    let image = renderer
        .snapshot(args.time)
        .context("Failed to render snapshot")?;

    image
        .save(output)
        .with_context(|| format!("Unable to write snapshot to {}", output.display()))?;
    log::info!(
        "Saved {}x{} frame at t={}s to {}",
        image.width(),
        image.height(),
        args.time,
        output.display()
    );
    Ok(())
}
