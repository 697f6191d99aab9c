/// Hermite interpolation between two edges, matching the shading-language builtin.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// `x - floor(x)`, which (unlike [`f32::fract`]) is never negative.
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}
