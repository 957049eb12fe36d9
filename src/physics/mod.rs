//! Bodies, the force law and the fixed-step integration loop

pub mod body;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod simulation;
pub mod system;
pub mod trail;
