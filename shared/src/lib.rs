pub mod inputs;
pub mod params;
pub mod sky;

pub use glam;

pub use params::{ParamsError, PhysicalParams};
