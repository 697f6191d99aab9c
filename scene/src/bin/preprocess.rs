use std::{env, path::Path};

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dirname = env::args()
        .nth(1)
        .context("No cubemap directory provided")?;
    let dirpath = Path::new(&dirname);

    let cubemap = scene::faces::load_dir(dirpath)
        .with_context(|| format!("Unable to load cubemap faces from {}", dirpath.display()))?;

    scene::io::save(&cubemap, dirpath.with_extension(scene::io::FILE_EXTENSION))
        .context("Failed to save packed sky")?;

    Ok(())
}
