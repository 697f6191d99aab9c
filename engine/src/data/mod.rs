pub mod orbit_controller;
