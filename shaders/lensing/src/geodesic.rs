use core::ops::ControlFlow;

use shared::{glam::Vec3, PhysicalParams};

pub mod conf {
    pub const DT: f32 = 0.08;
    pub const MAX_STEPS: u32 = 450;
    pub const BOUNDARY: f32 = 50.0;
    pub const DEFLECTION: f32 = 1.5;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub position: Vec3,
    /// Not unit length once the field has acted on it.
    pub velocity: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Fell inside the Schwarzschild radius.
    Horizon,
    /// Left the integration sphere.
    Boundary,
    /// Ran out of steps without resolving, shaded like [`Termination::Boundary`].
    StepBudget,
    /// The per-step observer asked to stop.
    Opaque,
}

#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub ray: Ray,
    pub termination: Termination,
    pub steps: u32,
}

/// Central pull used in place of the photon geodesic equation.
///
/// `-1.5 Rs p / |p|^4`, an empirical fit for the look of the deflection.
pub fn acceleration(rs: f32, position: Vec3) -> Vec3 {
    let r = position.length();
    -conf::DEFLECTION * rs * position / (r * r * r * r)
}

impl Ray {
    pub const fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            velocity: direction,
        }
    }

    /// One semi-implicit Euler step: velocity first, then position with the new velocity.
    pub fn advance(&mut self, rs: f32) {
        self.velocity += conf::DT * acceleration(rs, self.position);
        self.position += conf::DT * self.velocity;
    }
}

/// Marches a ray from `origin` until it is captured, escapes, runs out of steps
/// or `observe` breaks.
///
/// `observe` sees the ray at every step that has not yet terminated, before the
/// ray is advanced.
pub fn trace(
    params: &PhysicalParams,
    origin: Vec3,
    direction: Vec3,
    mut observe: impl FnMut(&Ray) -> ControlFlow<()>,
) -> Outcome {
    let rs = params.schwarzschild_radius();
    let mut ray = Ray::new(origin, direction);

    for steps in 0..conf::MAX_STEPS {
        let r = ray.position.length();
        let termination = if r < rs {
            Some(Termination::Horizon)
        } else if r > conf::BOUNDARY {
            Some(Termination::Boundary)
        } else if observe(&ray).is_break() {
            Some(Termination::Opaque)
        } else {
            None
        };

        if let Some(termination) = termination {
            return Outcome {
                ray,
                termination,
                steps,
            };
        }

        ray.advance(rs);
    }

    Outcome {
        ray,
        termination: Termination::StepBudget,
        steps: conf::MAX_STEPS,
    }
}

impl Outcome {
    pub const fn captured(&self) -> bool {
        matches!(self.termination, Termination::Horizon)
    }
}
