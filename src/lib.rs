pub mod config;
pub mod domain;
pub mod math;
pub mod render;
