use core::ops::ControlFlow;

use shared::glam::Vec3;

pub mod conf {
    pub const EMISSION_SCALE: f32 = 10.0;
    pub const OPACITY_SCALE: f32 = 0.1;
    pub const OPAQUE_BELOW: f32 = 0.01;
    pub const GAMMA: f32 = 2.2;
}

/// Front-to-back accumulation of disk light along a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accumulator {
    pub light: Vec3,
    /// Fraction of the background still visible, in `[0, 1]`.
    pub transparency: f32,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            light: Vec3::ZERO,
            transparency: 1.0,
        }
    }
}

impl Accumulator {
    /// Adds one step's worth of emitted light and attenuates what lies behind it.
    ///
    /// Breaks once the ray is effectively opaque.
    pub fn absorb(&mut self, step_color: Vec3) -> ControlFlow<()> {
        self.light += step_color * self.transparency;

        let mean = step_color.dot(Vec3::splat(1.0 / 3.0));
        let opacity = (mean * conf::OPACITY_SCALE).clamp(0.0, 1.0);
        self.transparency *= 1.0 - opacity;

        if self.transparency < conf::OPAQUE_BELOW {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Blends the tone-mapped disk over a display-encoded `background` and
    /// returns display-encoded color.
    pub fn resolve(&self, background: Vec3) -> Vec3 {
        let background_linear = background.powf(conf::GAMMA);
        let disk_linear = aces(self.light);
        background_linear
            .lerp(disk_linear, 1.0 - self.transparency)
            .powf(conf::GAMMA.recip())
    }
}

/// ACES filmic fit, component-wise into `[0, 1]`.
pub fn aces(x: Vec3) -> Vec3 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;
    ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(Vec3::ZERO, Vec3::ONE)
}
