use shared::glam::{vec2, Vec2};

use crate::math::fract;

mod conf {
    pub const OCTAVES: usize = 4;
    pub const HASH_DIRECTION: [f32; 2] = [12.9898, 78.233];
    pub const HASH_SCALE: f32 = 43_758.547;
}

/// Lattice hash in the unit interval.
pub fn random(st: Vec2) -> f32 {
    fract(st.dot(Vec2::from_array(conf::HASH_DIRECTION)).sin() * conf::HASH_SCALE)
}

/// Value noise, smoothly interpolated between the four surrounding lattice hashes.
pub fn noise(st: Vec2) -> f32 {
    let i = st.floor();
    let f = st - i;

    let a = random(i);
    let b = random(i + vec2(1.0, 0.0));
    let c = random(i + vec2(0.0, 1.0));
    let d = random(i + vec2(1.0, 1.0));

    let u = f * f * (3.0 - 2.0 * f);
    (b - a).mul_add(u.x, a) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.y * u.x
}

/// Fractal sum of [`noise`] octaves, doubling frequency and halving amplitude.
pub fn fbm(mut st: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..conf::OCTAVES {
        value += amplitude * noise(st);
        st *= 2.0;
        amplitude *= 0.5;
    }
    value
}
