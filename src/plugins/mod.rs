pub mod camera;
pub mod controls;
pub mod generator;
pub mod simulation;
pub mod visualization;
