#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod animation_tests;
pub mod app_tests;
pub mod bag_tests;
pub mod grid_tests;
pub mod layout_tests;
pub mod particles_tests;
pub mod time_tests;
