use glam::Vec3;

/// Read-only cube texture lookup.
///
/// Implementations return display-encoded RGB (not linear) for a lookup vector
/// given in the texture's own face convention. Shared by every worker of a frame.
pub trait CubeSampler: Sync {
    fn sample(&self, direction: Vec3) -> Vec3;
}

impl<T: CubeSampler + ?Sized> CubeSampler for &T {
    fn sample(&self, direction: Vec3) -> Vec3 {
        (**self).sample(direction)
    }
}

impl<T: CubeSampler + ?Sized> CubeSampler for Box<T> {
    fn sample(&self, direction: Vec3) -> Vec3 {
        (**self).sample(direction)
    }
}
