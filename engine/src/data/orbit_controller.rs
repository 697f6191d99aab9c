use glam::{vec3, Vec2, Vec3};

use shared::inputs;

mod conf {
    pub const ROTATE_SPEED: f32 = 5e-3;
    pub const ZOOM_STEP: f32 = 0.5;
    pub const MIN_DISTANCE_MASSES: f32 = 5.0;
    pub const MAX_DISTANCE: f32 = 50.0;
    pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
}

/// Camera orbiting the origin on a sphere, always looking at the hole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitController {
    distance: f32,
    yaw: f32,
    pitch: f32,
    min_distance: f32,
}

impl OrbitController {
    /// Angles in radians. `distance` is kept within `[5 M, 50]` so the camera
    /// always starts well outside the horizon.
    pub fn new(mass: f32, distance: f32, yaw: f32, pitch: f32) -> Self {
        let mut controller = Self {
            distance,
            yaw,
            pitch: pitch.clamp(-conf::PITCH_LIMIT, conf::PITCH_LIMIT),
            min_distance: conf::MIN_DISTANCE_MASSES * mass,
        };
        controller.distance = controller.clamp_distance(distance);
        controller
    }

    /// Drag in window pixels: right turns the orbit, down lowers the camera.
    pub fn rotate(&mut self, mouse_delta: Vec2) {
        self.yaw += mouse_delta.x * conf::ROTATE_SPEED;
        self.pitch = (self.pitch - mouse_delta.y * conf::ROTATE_SPEED)
            .clamp(-conf::PITCH_LIMIT, conf::PITCH_LIMIT);
    }

    /// Positive `lines` move closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = self.clamp_distance(lines.mul_add(-conf::ZOOM_STEP, self.distance));
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn camera(&self) -> inputs::Camera {
        inputs::Camera::looking_at(self.position(), Vec3::ZERO)
    }

    #[cfg(test)]
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    #[cfg(test)]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    // not `clamp`, which panics for masses that push the floor past the ceiling
    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.min(conf::MAX_DISTANCE).max(self.min_distance)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use glam::vec2;

    use super::*;

    #[test]
    fn default_orbit_sits_above_the_disk() {
        let orbit = OrbitController::new(0.5, 10.0, 0.0, 10_f32.to_radians());
        let position = orbit.position();

        assert_abs_diff_eq!(position.x, 0.0);
        assert_abs_diff_eq!(position.y, 10.0 * 10_f32.to_radians().sin(), epsilon = 1e-5);
        assert_abs_diff_eq!(position.length(), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn distance_is_clamped_between_five_masses_and_fifty() {
        let mut orbit = OrbitController::new(0.5, 10.0, 0.0, 0.0);
        orbit.zoom(100.0);
        assert_abs_diff_eq!(orbit.distance(), 2.5);
        orbit.zoom(-1000.0);
        assert_abs_diff_eq!(orbit.distance(), 50.0);

        assert_abs_diff_eq!(OrbitController::new(2.0, 1.0, 0.0, 0.0).distance(), 10.0);
    }

    #[test]
    fn scroll_steps_half_a_unit_per_line() {
        let mut orbit = OrbitController::new(0.5, 10.0, 0.0, 0.0);
        orbit.zoom(2.0);
        assert_abs_diff_eq!(orbit.distance(), 9.0);
    }

    #[test]
    fn pitch_stops_short_of_the_poles() {
        let mut orbit = OrbitController::new(0.5, 10.0, 0.0, 0.0);
        orbit.rotate(vec2(0.0, -1e5));
        assert_abs_diff_eq!(orbit.pitch(), conf::PITCH_LIMIT);

        let camera = orbit.camera();
        assert_abs_diff_eq!(camera.forward.dot(camera.up), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.right.length(), 1.0, epsilon = 1e-4);

        orbit.rotate(vec2(0.0, 1e5));
        assert_abs_diff_eq!(orbit.pitch(), -conf::PITCH_LIMIT);
    }

    #[test]
    fn horizontal_drag_turns_around_the_vertical_axis() {
        let mut orbit = OrbitController::new(0.5, 10.0, 0.0, 0.0);
        let height = orbit.position().y;
        orbit.rotate(vec2(FRAC_PI_2 / conf::ROTATE_SPEED, 0.0));

        let position = orbit.position();
        assert_abs_diff_eq!(position.y, height, epsilon = 1e-5);
        assert_abs_diff_eq!(position.x, 10.0, epsilon = 1e-4);
    }
}
