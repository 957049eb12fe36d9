//! Random star systems with circular-orbit launch speeds
//!
//! The output is a list of catalog rows: one star at the origin, planets
//! strung out along +x, and moons whose positions are offsets from their
//! planet.

use crate::catalog::CatalogRow;
use crate::config::GeneratorConfig;
use crate::physics::body::BodyColor;
use crate::physics::math::{AU, METRES_PER_KILOMETRE, Scalar, circular_orbit_speed};
use rand::Rng;

/// Uniform sample from `[min, max)`, or `min` when the range is empty
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: Scalar, max: Scalar) -> Scalar {
    if max > min { rng.random_range(min..max) } else { min }
}

fn count<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    if max > min { rng.random_range(min..=max) } else { min }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R, min_channel: u8) -> BodyColor {
    BodyColor::new(
        rng.random_range(min_channel..=u8::MAX),
        rng.random_range(min_channel..=u8::MAX),
        rng.random_range(min_channel..=u8::MAX),
    )
}

/// Launch speed in km/s for a circular orbit of `distance_m` metres
fn orbit_speed_km_s(config: &GeneratorConfig, primary_mass: Scalar, distance_m: Scalar) -> Scalar {
    circular_orbit_speed(config.gravitational_constant, primary_mass, distance_m) / METRES_PER_KILOMETRE
}

/// Generates one star system.
///
/// Planets are named `Planet-<i>` and moons `Moon-<i>-<j>`, both 1-based.
pub fn generate_system<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Vec<CatalogRow> {
    let [r, g, b] = config.star_color;
    let star_mass = uniform(rng, config.min_star_mass, config.max_star_mass);
    let star = CatalogRow {
        name: config.star_name.clone(),
        x: 0.0,
        y: 0.0,
        radius_km: uniform(rng, config.min_star_radius_km, config.max_star_radius_km),
        color: BodyColor::new(r, g, b),
        mass: star_mass,
        speed_km_s: 0.0,
        primary: None,
    };

    let planet_count = count(rng, config.min_planets, config.max_planets);
    let mut rows = Vec::with_capacity(1 + planet_count * (1 + config.max_moons));
    rows.push(star);

    let mut distance_au = config.first_planet_distance_au;
    for i in 1..=planet_count {
        distance_au += uniform(rng, config.min_planet_spacing_au, config.max_planet_spacing_au);

        let planet_name = format!("Planet-{i}");
        let planet_radius_km =
            uniform(rng, config.min_planet_radius_km, config.max_planet_radius_km);
        let planet_mass = uniform(rng, config.min_planet_mass, config.max_planet_mass);

        rows.push(CatalogRow {
            name: planet_name.clone(),
            x: distance_au,
            y: 0.0,
            radius_km: planet_radius_km,
            color: random_color(rng, config.min_color_channel),
            mass: planet_mass,
            speed_km_s: orbit_speed_km_s(config, star_mass, distance_au * AU),
            primary: Some(config.star_name.clone()),
        });

        if !rng.random_bool(config.moon_probability.clamp(0.0, 1.0)) {
            continue;
        }

        let moon_count = count(rng, config.min_moons, config.max_moons);
        let mut moon_distance_km = config.first_moon_distance_km;
        for j in 1..=moon_count {
            moon_distance_km += uniform(rng, config.min_moon_spacing_km, config.max_moon_spacing_km);

            let radius_km = uniform(
                rng,
                config.min_moon_radius_km,
                planet_radius_km * config.max_moon_radius_fraction,
            );
            let mass = uniform(
                rng,
                config.min_moon_mass,
                planet_mass * config.max_moon_mass_fraction,
            );
            let distance_m = moon_distance_km * METRES_PER_KILOMETRE;

            rows.push(CatalogRow {
                name: format!("Moon-{i}-{j}"),
                x: distance_m / AU,
                y: 0.0,
                radius_km,
                color: random_color(rng, config.min_color_channel),
                mass,
                speed_km_s: orbit_speed_km_s(config, planet_mass, distance_m),
                primary: Some(planet_name.clone()),
            });
        }
    }

    rows
}
