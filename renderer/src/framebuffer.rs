use glam::{UVec2, Vec3};

/// One RGBA8 texel of the presented frame.
pub type Pixel = [u8; 4];

pub fn byte_len(resolution: UVec2) -> usize {
    resolution.x as usize * resolution.y as usize * size_of::<Pixel>()
}

/// Quantizes a display-encoded color to an opaque pixel.
pub fn encode(color: Vec3) -> Pixel {
    let [r, g, b] = (color.clamp(Vec3::ZERO, Vec3::ONE) * f32::from(u8::MAX))
        .round()
        .to_array()
        .map(|c| c as u8);
    [r, g, b, u8::MAX]
}
