//! Camera plugin - Self-contained plugin pattern
//!
//! Spawns the 2D camera and drives the simulation's [`ViewTransform`]:
//! dragging with the left mouse button pans, the wheel zooms about the
//! cursor. The Bevy camera itself never moves; all panning and zooming lives
//! in the view transform so the physics state is untouched.

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use crate::view::ViewTransform;
use bevy::input::mouse::{AccumulatedMouseMotion, MouseWheel};
use bevy::window::PrimaryWindow;

/// Plugin that handles camera setup and control
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
        app.add_systems(
            Update,
            (pan_with_mouse, zoom_with_wheel).in_set(SimulationSet::Camera),
        );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Main Camera"),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Camera2d,
    ));
}

fn pan_with_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut simulation: ResMut<Simulation>,
) {
    if buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
        simulation.view.pan(motion.delta);
    }
}

fn zoom_with_wheel(
    mut wheel: EventReader<MouseWheel>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut simulation: ResMut<Simulation>,
) {
    let Some(cursor) = window.cursor_position() else {
        wheel.clear();
        return;
    };

    for event in wheel.read() {
        apply_scroll(&mut simulation.view, cursor, event.y);
    }
}

/// One zoom step per scroll event, in the direction of `scroll`
pub fn apply_scroll(view: &mut ViewTransform, cursor: Vec2, scroll: f32) {
    if scroll > 0.0 {
        view.zoom_in_at(cursor);
    } else if scroll < 0.0 {
        view.zoom_out_at(cursor);
    }
}
