use thiserror::Error;

mod conf {
    pub const MASS: f32 = 0.5;
    pub const INNER_RADIUS_RS: f32 = 1.500_001;
    pub const OUTER_RADIUS_RS: f32 = 10.0;
    pub const THICKNESS: f32 = 0.3;

    pub const PHOTON_SPHERE_RS: f32 = 1.5;
}

/// Black hole and accretion disk description, fixed for the lifetime of a scene.
///
/// Only constructible through [`PhysicalParams::new`] (or [`Default`]), so a value
/// always satisfies `Rs > 0`, `inner > 1.5 Rs`, `outer > inner` and `thickness > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParams {
    mass: f32,
    inner_radius: f32,
    outer_radius: f32,
    thickness: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("black hole mass must be positive, got {0}")]
    Mass(f32),
    #[error("disk inner radius {inner} must lie outside the photon sphere at {photon_sphere}")]
    InnerRadius { inner: f32, photon_sphere: f32 },
    #[error("disk outer radius {outer} must exceed the inner radius {inner}")]
    OuterRadius { inner: f32, outer: f32 },
    #[error("disk thickness must be positive, got {0}")]
    Thickness(f32),
}

impl PhysicalParams {
    pub fn new(
        mass: f32,
        inner_radius: f32,
        outer_radius: f32,
        thickness: f32,
    ) -> Result<Self, ParamsError> {
        // negated comparisons so that NaN is rejected too
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ParamsError::Mass(mass));
        }

        let photon_sphere = conf::PHOTON_SPHERE_RS * 2.0 * mass;
        if !(inner_radius > photon_sphere) {
            return Err(ParamsError::InnerRadius {
                inner: inner_radius,
                photon_sphere,
            });
        }
        if !(outer_radius > inner_radius) {
            return Err(ParamsError::OuterRadius {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if !(thickness > 0.0) {
            return Err(ParamsError::Thickness(thickness));
        }

        Ok(Self {
            mass,
            inner_radius,
            outer_radius,
            thickness,
        })
    }

    /// Same as [`PhysicalParams::new`] with the disk radii given in units of `Rs`.
    pub fn with_relative_disk(
        mass: f32,
        inner_radius_rs: f32,
        outer_radius_rs: f32,
        thickness: f32,
    ) -> Result<Self, ParamsError> {
        let rs = 2.0 * mass;
        Self::new(mass, inner_radius_rs * rs, outer_radius_rs * rs, thickness)
    }

    pub const fn mass(&self) -> f32 {
        self.mass
    }

    pub fn schwarzschild_radius(&self) -> f32 {
        2.0 * self.mass
    }

    pub const fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub const fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub const fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl Default for PhysicalParams {
    fn default() -> Self {
        let rs = 2.0 * conf::MASS;
        Self {
            mass: conf::MASS,
            inner_radius: conf::INNER_RADIUS_RS * rs,
            outer_radius: conf::OUTER_RADIUS_RS * rs,
            thickness: conf::THICKNESS,
        }
    }
}
