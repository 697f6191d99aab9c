use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use shared::{glam::Vec3, sky::CubeSampler, ParamsError, PhysicalParams};

use crate::data::orbit_controller::OrbitController;

/// Real-time Schwarzschild black hole with a lensed accretion disk.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Window pixels per rendered pixel in interactive mode
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: u32,

    /// Black hole mass in geometric units
    #[arg(long)]
    pub mass: Option<f32>,

    /// Disk inner edge in Schwarzschild radii
    #[arg(long)]
    pub disk_inner: Option<f32>,

    /// Disk outer edge in Schwarzschild radii
    #[arg(long)]
    pub disk_outer: Option<f32>,

    /// Disk half-thickness
    #[arg(long)]
    pub disk_thickness: Option<f32>,

    /// Directory of six face images or a packed `.bhsky` file
    #[arg(long, default_value = "skybox")]
    pub sky: PathBuf,

    /// Render against a black sky instead of loading one
    #[arg(long, conflicts_with = "sky")]
    pub no_sky: bool,

    /// Render a single frame to this PNG and exit
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Animation time in seconds for `--output`, start offset otherwise
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Initial camera distance from the hole
    #[arg(long, default_value_t = 10.0)]
    pub distance: f32,

    /// Initial orbit yaw in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub yaw: f32,

    /// Initial orbit pitch in degrees
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub pitch: f32,
}

impl Args {
    pub fn params(&self) -> Result<PhysicalParams, ParamsError> {
        let defaults = PhysicalParams::default();
        let mass = self.mass.unwrap_or(defaults.mass());
        let rs = defaults.schwarzschild_radius();

        PhysicalParams::with_relative_disk(
            mass,
            self.disk_inner.unwrap_or(defaults.inner_radius() / rs),
            self.disk_outer.unwrap_or(defaults.outer_radius() / rs),
            self.disk_thickness.unwrap_or(defaults.thickness()),
        )
    }

    pub fn sky(&self) -> anyhow::Result<Box<dyn CubeSampler>> {
        if self.no_sky {
            log::info!("Rendering without a sky");
            return Ok(Box::new(lensing::background::Uniform(Vec3::ZERO)));
        }

        let cubemap = scene::io::open(&self.sky)
            .with_context(|| format!("Unable to load sky from {}", self.sky.display()))?;
        Ok(Box::new(cubemap))
    }

    pub fn orbit(&self, params: &PhysicalParams) -> OrbitController {
        OrbitController::new(
            params.mass(),
            self.distance,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
        )
    }
}
