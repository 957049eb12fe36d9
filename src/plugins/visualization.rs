//! Visualization plugin - Self-contained plugin pattern
//!
//! Draws the projected system every frame with gizmos (body markers and
//! trails) and keeps one [`Text2d`] label per body. Responds to the trail
//! and label toggles.

use crate::physics::body::{BodyColor, BodyId};
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use crate::view::ProjectedBody;
use bevy::sprite::Anchor;
use bevy::window::PrimaryWindow;

const TRAIL_ALPHA: f32 = 0.5;
const LABEL_OFFSET_PX: f32 = 4.0;

/// Plugin that renders bodies, trails and labels
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplaySettings>()
            .init_resource::<FrameProjection>();

        app.add_systems(
            Update,
            (
                handle_visualization_commands.in_set(SimulationSet::Commands),
                (project_frame, (draw_bodies, sync_labels))
                    .chain()
                    .in_set(SimulationSet::Render),
            ),
        );
    }
}

/// This frame's screen-space bodies, shared by the drawing systems
#[derive(Resource, Default, Deref)]
pub struct FrameProjection(pub Vec<ProjectedBody>);

/// Label attached to the body with this id
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLabel(pub BodyId);

/// Handles SimulationCommand events for visualization features
fn handle_visualization_commands(
    mut commands: EventReader<SimulationCommand>,
    mut settings: ResMut<DisplaySettings>,
) {
    for command in commands.read() {
        match command {
            SimulationCommand::ToggleTrails => {
                settings.show_trails = !settings.show_trails;
                info!(
                    "Trails {}",
                    if settings.show_trails { "enabled" } else { "disabled" }
                );
            }
            SimulationCommand::ToggleLabels => {
                settings.show_labels = !settings.show_labels;
                info!(
                    "Labels {}",
                    if settings.show_labels { "enabled" } else { "disabled" }
                );
            }
            _ => {} // Ignore other commands
        }
    }
}

/// Maps view-space pixels (origin top-left, y down) to 2D world coordinates
/// of a camera centred on the origin (y up)
pub fn screen_to_world_2d(screen: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(screen.x - window_size.x / 2.0, window_size.y / 2.0 - screen.y)
}

fn body_color(color: BodyColor) -> Color {
    Color::srgb_u8(color.r, color.g, color.b)
}

fn project_frame(
    simulation: Res<Simulation>,
    settings: Res<DisplaySettings>,
    mut projection: ResMut<FrameProjection>,
) {
    projection.0 = simulation.draw(&settings.projection_options());
}

fn draw_bodies(
    mut gizmos: Gizmos,
    projection: Res<FrameProjection>,
    window: Single<&Window, With<PrimaryWindow>>,
) {
    let window_size = window.size();

    for body in projection.iter() {
        let color = body_color(body.color);

        if body.trail.len() > 1 {
            gizmos.linestrip_2d(
                body.trail
                    .iter()
                    .map(|point| screen_to_world_2d(*point, window_size)),
                color.with_alpha(TRAIL_ALPHA),
            );
        }

        gizmos.circle_2d(
            screen_to_world_2d(body.center, window_size),
            body.marker_radius,
            color,
        );
    }
}

fn label_translation(body: &ProjectedBody, window_size: Vec2) -> Vec3 {
    let anchor = body.center + Vec2::new(body.marker_radius + LABEL_OFFSET_PX, 0.0);
    screen_to_world_2d(anchor, window_size).extend(1.0)
}

/// Spawns, moves and despawns labels so there is exactly one per body
fn sync_labels(
    mut commands: Commands,
    projection: Res<FrameProjection>,
    settings: Res<DisplaySettings>,
    config: Res<SimulationConfig>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut labels: Query<(Entity, &BodyLabel, &mut Text2d, &mut Transform, &mut Visibility)>,
) {
    let window_size = window.size();
    let bodies = &projection.0;
    let mut labelled = vec![false; bodies.len()];

    for (entity, label, mut text, mut transform, mut visibility) in &mut labels {
        let Some(body) = bodies.get(label.0.index()) else {
            commands.entity(entity).despawn();
            continue;
        };

        labelled[label.0.index()] = true;
        if text.0 != body.name {
            text.0.clone_from(&body.name);
        }
        transform.translation = label_translation(body, window_size);
        *visibility = if settings.show_labels {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    for (body, _) in bodies.iter().zip(labelled).filter(|(_, labelled)| !labelled) {
        commands.spawn((
            BodyLabel(body.id),
            Text2d::new(body.name.clone()),
            TextFont {
                font_size: config.rendering.label_font_size,
                ..default()
            },
            TextColor(Color::WHITE),
            Anchor::CenterLeft,
            Transform::from_translation(label_translation(body, window_size)),
            if settings.show_labels {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            },
        ));
    }
}
