use std::collections::HashSet;

use winit::event::{ElementState, MouseButton, MouseScrollDelta};

mod conf {
    pub const PIXELS_PER_LINE: f32 = 40.0;
}

#[derive(Default)]
pub struct State {
    buttons: HashSet<MouseButton>,
    mouse_delta: glam::Vec2,
    scroll_lines: f32,
}

impl State {
    pub fn handle_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => self.buttons.insert(button),
            ElementState::Released => self.buttons.remove(&button),
        };
    }

    /// Motion only counts as a drag while the left button is held.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.button_pressed(MouseButton::Left) {
            self.mouse_delta += glam::DVec2::from(delta).as_vec2();
        }
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_lines += match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / conf::PIXELS_PER_LINE,
        };
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Drag accumulated since the last call.
    pub fn mouse_delta(&mut self) -> glam::Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Scroll lines accumulated since the last call.
    pub fn scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_lines)
    }
}
