use shared::{
    glam::{vec3, Vec3},
    sky::CubeSampler,
};

/// Sky seen along a world-space `direction`.
///
/// The cube faces are authored with `z` pointing the other way, hence the flip.
pub fn sky_color<S: CubeSampler + ?Sized>(sky: &S, direction: Vec3) -> Vec3 {
    sky.sample(vec3(direction.x, direction.y, -direction.z))
}

/// Same display-encoded color in every direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform(pub Vec3);

impl CubeSampler for Uniform {
    fn sample(&self, _: Vec3) -> Vec3 {
        self.0
    }
}
