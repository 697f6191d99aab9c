use shared::{
    glam::{vec2, vec3, Vec3, Vec3Swizzles},
    PhysicalParams,
};

use crate::{math::smoothstep, noise::fbm};

mod conf {
    pub const FLOW_SPEED: f32 = 0.2;
    pub const NOISE_SCALE: f32 = 0.3;
    pub const WARP_DRIFT: [f32; 2] = [0.1, 0.08];
    pub const WARP_STRENGTH: f32 = 0.5;
    pub const FILAMENT_SHARPNESS: f32 = 2.5;

    pub const ORBITAL_SPEED: f32 = 0.35;
    pub const REDSHIFT: f32 = 1.5;
    pub const BEAMING_EXPONENT: f32 = 10.0;

    pub const BRIGHT_BLUE: f32 = 25.0;
    pub const DARK_BLUE: f32 = 20.0;
    pub const TINT_EDGES: (f32, f32) = (0.4, 1.6);
}

/// Whether `position` lies in the slab that the compositor samples.
pub fn contains(params: &PhysicalParams, position: Vec3) -> bool {
    let r = position.xz().length();
    position.y.abs() < params.thickness()
        && r >= params.inner_radius()
        && r < params.outer_radius()
}

/// Emitted radiance of the disk at `position` seen along `direction`.
///
/// Zero outside the annulus or outside the vertical falloff, otherwise
/// non-negative and unbounded.
pub fn radiance(params: &PhysicalParams, time: f32, position: Vec3, direction: Vec3) -> Vec3 {
    let r = position.xz().length();
    if r < params.inner_radius() || r > params.outer_radius() {
        return Vec3::ZERO;
    }

    let vertical_falloff = 1.0 - smoothstep(0.0, params.thickness(), position.y.abs());
    if vertical_falloff <= 0.0 {
        return Vec3::ZERO;
    }

    let turbulence = turbulence(position, r, time);

    let temperature = (1.0 - smoothstep(params.inner_radius(), params.outer_radius(), r)).powi(2);

    let (speed, velocity) = orbital_velocity(position, r);
    let redshift = gravitational_redshift(params.schwarzschild_radius(), r);
    let doppler = doppler_factor(speed, velocity, direction);

    let base_color = tint(temperature, doppler) * turbulence;
    base_color * doppler.powf(conf::BEAMING_EXPONENT) * redshift * vertical_falloff
}

/// Domain-warped fbm over the co-rotating azimuth, sharpened into filaments.
fn turbulence(position: Vec3, r: f32, time: f32) -> f32 {
    // inner radii wind faster
    let phi = position.z.atan2(position.x) + time * conf::FLOW_SPEED / (r * 0.5);
    let base = vec2(phi.cos(), phi.sin()) * r * conf::NOISE_SCALE;

    let [drift_x, drift_y] = conf::WARP_DRIFT;
    let warp = vec2(
        fbm(base + vec2(time * drift_x, 0.0)),
        fbm(base + vec2(0.0, time * drift_y)),
    );

    fbm(base + warp * conf::WARP_STRENGTH).powf(conf::FILAMENT_SHARPNESS)
}

/// Keplerian-like speed and the prograde tangential velocity at radius `r`.
fn orbital_velocity(position: Vec3, r: f32) -> (f32, Vec3) {
    let speed = conf::ORBITAL_SPEED * r.powf(-0.5);
    let tangent = vec3(-position.z, 0.0, position.x).normalize();
    (speed, speed * tangent)
}

fn gravitational_redshift(rs: f32, r: f32) -> f32 {
    (1.0 - conf::REDSHIFT * rs / r).sqrt()
}

fn doppler_factor(speed: f32, velocity: Vec3, direction: Vec3) -> f32 {
    (1.0 - speed * speed).sqrt() / (1.0 - velocity.dot(direction))
}

fn tint(temperature: f32, doppler: f32) -> Vec3 {
    let bright = vec3(temperature, temperature, temperature * conf::BRIGHT_BLUE);
    let dark = vec3(temperature, temperature, temperature * conf::DARK_BLUE);
    let (low, high) = conf::TINT_EDGES;
    dark.lerp(bright, smoothstep(low, high, doppler))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TIME: f32 = 0.0;

    #[test]
    fn zero_inside_inner_edge() {
        let params = PhysicalParams::default();
        let p = vec3(params.inner_radius() * 0.99, 0.0, 0.0);
        assert_eq!(radiance(&params, TIME, p, Vec3::NEG_Z), Vec3::ZERO);
    }

    #[test]
    fn zero_at_and_beyond_outer_edge() {
        let params = PhysicalParams::default();
        for r in [params.outer_radius(), params.outer_radius() * 1.01] {
            let p = vec3(0.0, 0.0, r);
            assert_eq!(radiance(&params, TIME, p, Vec3::X), Vec3::ZERO);
        }
    }

    #[test]
    fn zero_outside_thickness() {
        let params = PhysicalParams::default();
        for y in [params.thickness(), -params.thickness(), 2.0 * params.thickness()] {
            let p = vec3(4.0, y, 0.0);
            assert_eq!(radiance(&params, TIME, p, Vec3::Z), Vec3::ZERO);
        }
    }

    #[test]
    fn non_negative_inside_disk() {
        let params = PhysicalParams::default();
        for i in 0..64 {
            let angle = i as f32 * 0.37;
            let r = 1.6 + (i as f32 * 0.13) % 8.0;
            let p = vec3(r * angle.cos(), 0.05, r * angle.sin());
            let c = radiance(&params, 1.5, p, vec3(angle.sin(), -0.1, angle.cos()).normalize());
            assert!(c.min_element() >= 0.0, "{c} at {p}");
        }
    }

    #[test]
    fn contains_uses_half_open_annulus() {
        let params = PhysicalParams::default();
        assert!(contains(&params, vec3(params.inner_radius(), 0.0, 0.0)));
        assert!(!contains(&params, vec3(params.outer_radius(), 0.0, 0.0)));
        assert!(!contains(&params, vec3(4.0, params.thickness(), 0.0)));
        assert!(contains(&params, vec3(4.0, params.thickness() * 0.5, 0.0)));
    }

    #[test]
    fn approaching_side_is_beamed_brighter() {
        let params = PhysicalParams::default();
        let position = vec3(3.0, 0.0, 1.0);
        let r = position.xz().length();
        let (speed, velocity) = orbital_velocity(position, r);
        let tangent = velocity.normalize();

        let approaching = radiance(&params, TIME, position, tangent);
        let receding = radiance(&params, TIME, position, -tangent);
        assert!(receding.z > 0.0);
        assert!(approaching.z > receding.z);

        let d_approaching = doppler_factor(speed, velocity, tangent);
        let d_receding = doppler_factor(speed, velocity, -tangent);
        let mix = |d: f32| {
            let (low, high) = conf::TINT_EDGES;
            let t = smoothstep(low, high, d);
            conf::DARK_BLUE + (conf::BRIGHT_BLUE - conf::DARK_BLUE) * t
        };
        let expected = mix(d_approaching) / mix(d_receding)
            * (d_approaching / d_receding).powf(conf::BEAMING_EXPONENT);

        assert_relative_eq!(approaching.z / receding.z, expected, max_relative = 1e-4);
    }

    #[test]
    fn redshift_dims_towards_inner_edge() {
        assert!(gravitational_redshift(1.0, 1.6) < gravitational_redshift(1.0, 6.0));
        assert_relative_eq!(gravitational_redshift(1.0, 3.0), 0.5_f32.sqrt());
    }
}
