mod app;
mod cli;
mod data;
mod input;
mod snapshot;

use anyhow::Context;
use clap::Parser;
use winit::event_loop::EventLoop;

use app::App;
use cli::Args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.params().context("Invalid black hole parameters")?;
    log::info!(
        "Black hole M={} Rs={}, disk {}..{} thickness {}",
        params.mass(),
        params.schwarzschild_radius(),
        params.inner_radius(),
        params.outer_radius(),
        params.thickness()
    );
    let sky = args.sky()?;

    if let Some(output) = &args.output {
        return snapshot::save(&args, params, sky, output);
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let window = App::window_builder(&args)
        .build(&event_loop)
        .context("Failed to create window")?;
    App::new(window, &args, params, sky)?.run(event_loop)
}
