//! World-to-screen mapping and projection of the system for drawing
//!
//! Screen space here is window pixels with the origin at the top-left corner
//! and y growing downwards, the same convention as the window cursor
//! position. Nothing in this module writes back into the physics state.

use crate::physics::body::{BodyColor, BodyId};
use crate::physics::math::{AU, Scalar, Vector};
use crate::physics::system::StarSystem;
use bevy::math::Vec2;

/// Pixels per astronomical unit at the default zoom
pub const DEFAULT_PIXELS_PER_AU: Scalar = 120.0;

/// Multiplicative zoom applied per scroll notch
pub const ZOOM_STEP: Scalar = 1.1;

/// Marker radius used for the star, pixels
pub const STAR_MARKER_RADIUS: f32 = 15.0;

/// `screen = world * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Pixels per metre
    pub scale: Scalar,
    /// Screen position of the world origin, pixels
    pub offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_AU / AU, Vec2::ZERO)
    }
}

impl ViewTransform {
    pub fn new(scale: Scalar, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// View with the world origin at the centre of a `width` × `height` window
    pub fn centered(pixels_per_au: Scalar, width: f32, height: f32) -> Self {
        Self::new(pixels_per_au / AU, Vec2::new(width / 2.0, height / 2.0))
    }

    pub fn world_to_screen(&self, world: Vector) -> Vec2 {
        (world * self.scale).as_vec2() + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vector {
        (screen - self.offset).as_dvec2() / self.scale
    }

    /// Translates the view by a mouse delta in pixels
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiplies the scale by `factor`, keeping the world point under
    /// `cursor` at the same screen position
    pub fn zoom_at(&mut self, cursor: Vec2, factor: Scalar) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }

        let new_scale = self.scale * factor;
        if !(new_scale.is_finite() && new_scale > 0.0) {
            return;
        }

        let ratio = (new_scale / self.scale) as f32;
        self.offset = cursor - (cursor - self.offset) * ratio;
        self.scale = new_scale;
    }

    pub fn zoom_in_at(&mut self, cursor: Vec2) {
        self.zoom_at(cursor, ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, cursor: Vec2) {
        self.zoom_at(cursor, 1.0 / ZOOM_STEP);
    }
}

/// Inflation applied to a satellite's offset from its primary so that its
/// orbit spans at least `desired_pixels` on screen
pub fn exaggeration_factor(orbit_radius: Scalar, scale: Scalar, desired_pixels: Scalar) -> Scalar {
    let projected = orbit_radius * scale;
    if projected > 0.0 {
        (desired_pixels / projected).max(1.0)
    } else {
        1.0
    }
}

/// Marker size for a body of physical radius `radius` metres
pub fn marker_radius(radius: Scalar, is_star: bool) -> f32 {
    if is_star {
        return STAR_MARKER_RADIUS;
    }
    if radius <= 0.0 {
        return 1.0;
    }

    (libm::log(radius) - 8.0).max(1.0) as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionOptions {
    /// Target on-screen orbit radius for satellites of moving primaries
    pub satellite_orbit_pixels: Scalar,
    pub include_trails: bool,
    /// Use every n-th trail sample (1 = all)
    pub trail_stride: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            satellite_orbit_pixels: 15.0,
            include_trails: true,
            trail_stride: 1,
        }
    }
}

/// Screen-space description of one body, ready to be drawn
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedBody {
    pub id: BodyId,
    pub name: String,
    pub center: Vec2,
    pub marker_radius: f32,
    pub color: BodyColor,
    pub is_star: bool,
    pub trail: Vec<Vec2>,
}

/// Projects every body and its trail into screen space.
///
/// Satellites of moving primaries are drawn around their primary's screen
/// position with their offset (and relative trail) scaled by the
/// exaggeration factor; everything else maps straight through the view.
pub fn project(
    system: &StarSystem,
    view: &ViewTransform,
    options: &ProjectionOptions,
) -> Vec<ProjectedBody> {
    let stride = options.trail_stride.max(1);

    system
        .iter()
        .map(|(id, body)| {
            let satellite_of = system
                .moving_primary_of(id)
                .and_then(|primary| system.get(primary));

            let (center, trail) = match satellite_of {
                Some(primary) => {
                    let factor = exaggeration_factor(
                        body.orbit_radius,
                        view.scale,
                        options.satellite_orbit_pixels,
                    );
                    let anchor = view.world_to_screen(primary.position);
                    let to_screen =
                        |offset: Vector| anchor + (offset * view.scale * factor).as_vec2();

                    let trail = if options.include_trails {
                        body.trail.iter().step_by(stride).map(|p| to_screen(*p)).collect()
                    } else {
                        Vec::new()
                    };

                    (to_screen(body.position - primary.position), trail)
                }
                None => {
                    let trail = if options.include_trails {
                        body.trail
                            .iter()
                            .step_by(stride)
                            .map(|p| view.world_to_screen(*p))
                            .collect()
                    } else {
                        Vec::new()
                    };

                    (view.world_to_screen(body.position), trail)
                }
            };

            ProjectedBody {
                id,
                name: body.name.clone(),
                center,
                marker_radius: marker_radius(body.radius, body.is_fixed),
                color: body.color,
                is_star: body.is_fixed,
                trail,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::Body;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-2, "{a:?} != {b:?}");
    }

    #[test]
    fn test_world_to_screen_round_trip() {
        let view = ViewTransform::centered(DEFAULT_PIXELS_PER_AU, 1000.0, 1000.0);

        assert_close(view.world_to_screen(Vector::ZERO), Vec2::new(500.0, 500.0));
        assert_close(view.world_to_screen(Vector::new(AU, 0.0)), Vec2::new(620.0, 500.0));

        let world = view.screen_to_world(Vec2::new(620.0, 380.0));
        assert!((world - Vector::new(AU, -AU)).length() < AU * 1e-6);
    }

    #[test]
    fn test_pan_translates_offset() {
        let mut view = ViewTransform::centered(DEFAULT_PIXELS_PER_AU, 1000.0, 1000.0);
        view.pan(Vec2::new(10.0, -5.0));

        assert_eq!(view.offset, Vec2::new(510.0, 495.0));
        assert_close(view.world_to_screen(Vector::ZERO), Vec2::new(510.0, 495.0));
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor_fixed() {
        let mut view = ViewTransform::centered(DEFAULT_PIXELS_PER_AU, 1000.0, 1000.0);
        let cursor = Vec2::new(730.0, 210.0);
        let world_under_cursor = view.screen_to_world(cursor);

        view.zoom_in_at(cursor);
        assert!((view.scale * AU - DEFAULT_PIXELS_PER_AU * ZOOM_STEP).abs() < 1e-9);
        assert_close(view.world_to_screen(world_under_cursor), cursor);

        view.zoom_out_at(cursor);
        view.zoom_out_at(cursor);
        assert_close(view.world_to_screen(world_under_cursor), cursor);
    }

    #[test]
    fn test_zoom_rejects_degenerate_factors() {
        let mut view = ViewTransform::default();
        let before = view;

        view.zoom_at(Vec2::ZERO, 0.0);
        view.zoom_at(Vec2::ZERO, -2.0);
        view.zoom_at(Vec2::ZERO, Scalar::NAN);

        assert_eq!(view, before);
    }

    #[test]
    fn test_exaggeration_factor() {
        let scale = DEFAULT_PIXELS_PER_AU / AU;
        // A moon 400,000 km out is well under a pixel at the default zoom
        let factor = exaggeration_factor(4.0e8, scale, 15.0);
        assert!((4.0e8 * scale * factor - 15.0).abs() < 1e-9);

        // Zoomed far enough in, no exaggeration is needed
        assert_eq!(exaggeration_factor(4.0e8, 1.0e-6, 15.0), 1.0);
        assert_eq!(exaggeration_factor(0.0, scale, 15.0), 1.0);
    }

    #[test]
    fn test_marker_radius() {
        assert_eq!(marker_radius(7.0e8, true), STAR_MARKER_RADIUS);
        assert_eq!(marker_radius(10.0, false), 1.0);
        assert!((marker_radius(6.4e6, false) - (libm::log(6.4e6) - 8.0) as f32).abs() < 1e-6);
    }

    #[test]
    fn test_projection_draws_moon_around_planet_without_touching_physics() {
        let mut system = StarSystem::new();
        let sun = system
            .add(Body::new("Sun", Vector::ZERO, 7.0e8, 2.0e30).fixed())
            .unwrap();
        let planet = system
            .add(Body::new("Planet-1", Vector::new(AU, 0.0), 6.0e6, 6.0e24).with_primary(sun))
            .unwrap();
        let mut moon = Body::new("Moon-1-1", Vector::new(AU + 4.0e8, 0.0), 1.7e6, 7.0e22)
            .with_primary(planet);
        moon.orbit_radius = 4.0e8;
        moon.trail.push(Vector::new(4.0e8, 0.0));
        let moon = system.add(moon).unwrap();

        let view = ViewTransform::centered(DEFAULT_PIXELS_PER_AU, 1000.0, 1000.0);
        let projected = project(&system, &view, &ProjectionOptions::default());

        assert_eq!(projected.len(), 3);
        assert!(projected[0].is_star);
        assert_close(projected[1].center, Vec2::new(620.0, 500.0));
        assert_close(projected[2].center, Vec2::new(635.0, 500.0));
        assert_close(projected[2].trail[0], Vec2::new(635.0, 500.0));

        let physics_moon = system.get(moon).unwrap();
        assert_eq!(physics_moon.position, Vector::new(AU + 4.0e8, 0.0));
        assert_eq!(physics_moon.orbit_radius, 4.0e8);
    }

    #[test]
    fn test_projection_trail_stride_and_toggle() {
        let mut system = StarSystem::new();
        let mut body = Body::new("Rogue", Vector::ZERO, 1.0e6, 1.0e20);
        for i in 0..10 {
            body.trail.push(Vector::new(i as f64 * AU, 0.0));
        }
        system.add(body);

        let view = ViewTransform::default();
        let options = ProjectionOptions {
            trail_stride: 3,
            ..Default::default()
        };
        assert_eq!(project(&system, &view, &options)[0].trail.len(), 4);

        let options = ProjectionOptions {
            include_trails: false,
            ..Default::default()
        };
        assert!(project(&system, &view, &options)[0].trail.is_empty());
    }
}
