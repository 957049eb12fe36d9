//! Turns catalog rows into a [`StarSystem`] with absolute positions and
//! velocities.
//!
//! Rows are resolved in layers: root bodies first, then every body whose
//! primary was resolved in an earlier layer, and so on until nothing more
//! can be placed. Row order in the file does not matter.

use super::{CatalogError, CatalogRow};
use crate::physics::body::{Body, BodyId};
use crate::physics::math::{AU, METRES_PER_KILOMETRE, Vector, counter_clockwise_tangent};
use crate::physics::system::StarSystem;
use crate::physics::trail::{DEFAULT_MAX_TRAIL_POINTS, Trail};
use bevy::log::{debug, warn};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Drop bodies whose primary chain cannot be resolved instead of
    /// re-homing them around the star
    pub strict_primaries: bool,
    pub trail_max_points: usize,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            strict_primaries: false,
            trail_max_points: DEFAULT_MAX_TRAIL_POINTS,
        }
    }
}

/// Everything the bootstrap had to work around
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `(body, primary)` pairs naming a primary that is not in the catalog
    pub missing_primaries: Vec<(String, String)>,
    /// Bodies whose primary chain loops back on itself
    pub cycles: Vec<String>,
    /// Bodies left out of the system (strict mode only)
    pub dropped: Vec<String>,
    /// Names that appeared more than once; the later rows were ignored
    pub duplicates: Vec<String>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.missing_primaries.is_empty()
            && self.cycles.is_empty()
            && self.dropped.is_empty()
            && self.duplicates.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Bootstrap {
    pub system: StarSystem,
    pub report: BootstrapReport,
}

/// Builds a system from catalog rows.
///
/// An empty catalog yields an empty system. A non-empty catalog with no root
/// row has nothing to anchor it and fails with [`CatalogError::NoStar`].
pub fn bootstrap(rows: &[CatalogRow], options: &BootstrapOptions) -> Result<Bootstrap, CatalogError> {
    let mut report = BootstrapReport::default();

    let mut seen = HashSet::new();
    let mut unique: Vec<&CatalogRow> = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(row.name.as_str()) {
            unique.push(row);
        } else {
            warn!("Duplicate body name {:?} in catalog, ignoring later row", row.name);
            report.duplicates.push(row.name.clone());
        }
    }

    if unique.is_empty() {
        return Ok(Bootstrap {
            system: StarSystem::new(),
            report,
        });
    }

    let star_row = unique
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_root())
        .fold(None::<(usize, &CatalogRow)>, |best, (index, row)| match best {
            Some((_, heaviest)) if heaviest.mass >= row.mass => best,
            _ => Some((index, *row)),
        })
        .map(|(index, _)| index)
        .ok_or(CatalogError::NoStar)?;

    let mut resolver = Resolver {
        rows: &unique,
        star_row,
        options,
        system: StarSystem::new(),
        resolved: HashMap::new(),
        rehomed: HashSet::new(),
    };

    resolver.resolve_layers();

    let pending = resolver.pending();
    if !pending.is_empty() {
        let names: HashSet<&str> = unique.iter().map(|row| row.name.as_str()).collect();
        let mut stuck = Vec::new();

        for &index in &pending {
            let row = unique[index];
            let Some(primary) = row.primary_name() else {
                continue;
            };

            if !names.contains(primary) {
                warn!("Body {:?} orbits unknown primary {:?}", row.name, primary);
                report
                    .missing_primaries
                    .push((row.name.clone(), primary.to_string()));
                stuck.push(index);
            } else if resolver.is_on_cycle(index) {
                warn!("Body {:?} is part of a primary cycle", row.name);
                report.cycles.push(row.name.clone());
                stuck.push(index);
            }
        }

        if options.strict_primaries {
            for index in pending {
                let name = &unique[index].name;
                warn!("Dropping body {:?}: primary chain cannot be resolved", name);
                report.dropped.push(name.clone());
            }
        } else {
            for index in stuck {
                warn!(
                    "Placing body {:?} around the star at its absolute coordinates",
                    unique[index].name
                );
                resolver.rehomed.insert(index);
            }
            resolver.resolve_layers();
        }
    }

    debug!(
        "Bootstrapped {} of {} catalog bodies",
        resolver.system.len(),
        unique.len()
    );

    Ok(Bootstrap {
        system: resolver.system,
        report,
    })
}

struct Resolver<'a> {
    rows: &'a [&'a CatalogRow],
    star_row: usize,
    options: &'a BootstrapOptions,
    system: StarSystem,
    /// Row index to the body it became
    resolved: HashMap<usize, BodyId>,
    /// Rows placed as if they orbited the star
    rehomed: HashSet<usize>,
}

impl Resolver<'_> {
    fn pending(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|index| !self.resolved.contains_key(index))
            .collect()
    }

    fn row_index(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.name == name)
    }

    /// Row index of the primary this row hangs from, once that primary is
    /// placed. Rehomed rows hang from the star.
    fn ready_primary(&self, index: usize) -> Option<Option<usize>> {
        if index == self.star_row {
            return Some(None);
        }
        if self.rehomed.contains(&index) {
            return self
                .resolved
                .contains_key(&self.star_row)
                .then_some(Some(self.star_row));
        }

        match self.rows[index].primary_name() {
            None => Some(None),
            Some(name) => {
                let primary = self.row_index(name)?;
                self.resolved.contains_key(&primary).then_some(Some(primary))
            }
        }
    }

    fn resolve_layers(&mut self) {
        loop {
            let layer: Vec<(usize, Option<usize>)> = self
                .pending()
                .into_iter()
                .filter_map(|index| self.ready_primary(index).map(|primary| (index, primary)))
                .collect();

            if layer.is_empty() {
                break;
            }

            for (index, primary) in layer {
                self.place(index, primary);
            }
        }
    }

    fn place(&mut self, index: usize, primary: Option<usize>) {
        let row = self.rows[index];
        let offset = Vector::new(row.x, row.y) * AU;
        let speed = row.speed_km_s * METRES_PER_KILOMETRE;
        let trail = Trail::new(self.options.trail_max_points);

        let mut body = Body::new(
            row.name.clone(),
            offset,
            row.radius_km * METRES_PER_KILOMETRE,
            row.mass,
        )
        .with_color(row.color)
        .with_trail(trail);

        if index == self.star_row {
            body = body.fixed();
        } else {
            let primary_body = primary
                .and_then(|primary| self.resolved.get(&primary))
                .and_then(|&id| self.system.get(id).map(|body| (id, body)));

            body = match primary_body {
                Some((id, anchor)) if !anchor.is_fixed => {
                    let mut body = body
                        .with_velocity(anchor.velocity + counter_clockwise_tangent(offset) * speed)
                        .with_primary(id);
                    body.position = anchor.position + offset;
                    body.orbit_radius = offset.length();
                    body
                }
                Some((id, anchor)) => {
                    let orbit_radius = (offset - anchor.position).length();
                    let mut body = body.with_velocity(Vector::new(0.0, speed)).with_primary(id);
                    body.orbit_radius = orbit_radius;
                    body
                }
                None => body.with_velocity(Vector::new(0.0, speed)),
            };
        }

        if let Some(id) = self.system.add(body) {
            self.resolved.insert(index, id);
        }
    }

    /// Whether following primaries from `index` through unresolved rows
    /// returns to `index`
    fn is_on_cycle(&self, index: usize) -> bool {
        let mut visited = HashSet::new();
        let mut current = index;

        loop {
            let Some(next) = self.rows[current]
                .primary_name()
                .and_then(|name| self.row_index(name))
            else {
                return false;
            };

            if next == index {
                return true;
            }
            if self.resolved.contains_key(&next) || !visited.insert(next) {
                return false;
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyColor;
    use crate::physics::math::Scalar;

    fn row(name: &str, x: Scalar, y: Scalar, mass: Scalar, speed: Scalar, primary: Option<&str>) -> CatalogRow {
        CatalogRow {
            name: name.to_string(),
            x,
            y,
            radius_km: 1000.0,
            color: BodyColor::new(100, 150, 200),
            mass,
            speed_km_s: speed,
            primary: primary.map(str::to_string),
        }
    }

    fn sun() -> CatalogRow {
        row("Sun", 0.0, 0.0, 2.0e30, 0.0, None)
    }

    #[test]
    fn test_moon_listed_before_planet() {
        let rows = vec![
            row("Moon-1-1", 0.00257, 0.0, 7.0e22, 1.022, Some("Planet-1")),
            row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun")),
            sun(),
        ];

        let Bootstrap { system, report } = bootstrap(&rows, &BootstrapOptions::default()).unwrap();
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(system.len(), 3);

        let planet = system.by_name("Planet-1").unwrap();
        assert_eq!(planet.position, Vector::new(AU, 0.0));
        assert_eq!(planet.velocity, Vector::new(0.0, 29_780.0));

        let moon = system.by_name("Moon-1-1").unwrap();
        assert!((moon.position - Vector::new(AU + 0.00257 * AU, 0.0)).length() < 1e-3);
        assert!((moon.velocity - Vector::new(0.0, 29_780.0 + 1_022.0)).length() < 1e-9);
        assert!((moon.orbit_radius - 0.00257 * AU).abs() < 1e-3);
        assert_eq!(moon.primary, system.id_of("Planet-1"));
    }

    #[test]
    fn test_resolution_order_is_roots_then_depth() {
        let rows = vec![
            row("Moon-1-1", 0.0, 0.002, 1.0e20, 1.0, Some("Planet-1")),
            row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun")),
            sun(),
        ];

        let system = bootstrap(&rows, &BootstrapOptions::default()).unwrap().system;
        let names: Vec<&str> = system.iter().map(|(_, body)| body.name.as_str()).collect();
        assert_eq!(names, vec!["Sun", "Planet-1", "Moon-1-1"]);

        // Offset along +y gives a tangent along -x
        let moon = system.by_name("Moon-1-1").unwrap();
        assert!((moon.velocity - Vector::new(-1000.0, 29_780.0)).length() < 1e-9);
    }

    #[test]
    fn test_heaviest_root_is_the_star() {
        let rows = vec![
            row("Rogue", 5.0, 5.0, 1.0e25, 3.0, None),
            sun(),
            row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun")),
        ];

        let system = bootstrap(&rows, &BootstrapOptions::default()).unwrap().system;
        let star = system.get(system.star().unwrap()).unwrap();
        assert_eq!(star.name, "Sun");
        assert!(star.is_fixed);
        assert_eq!(star.velocity, Vector::ZERO);

        let rogue = system.by_name("Rogue").unwrap();
        assert!(!rogue.is_fixed);
        assert_eq!(rogue.primary, None);
        assert_eq!(rogue.velocity, Vector::new(0.0, 3000.0));
    }

    #[test]
    fn test_star_orbiter_positions_are_absolute() {
        let mut star = sun();
        star.x = 0.5;
        let rows = vec![star, row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun"))];

        let system = bootstrap(&rows, &BootstrapOptions::default()).unwrap().system;
        let planet = system.by_name("Planet-1").unwrap();
        assert_eq!(planet.position, Vector::new(AU, 0.0));
        assert!((planet.orbit_radius - 0.5 * AU).abs() < 1e-3);
    }

    #[test]
    fn test_missing_primary_lenient_rehomes_around_star() {
        let rows = vec![
            sun(),
            row("Lost", 2.0, 0.0, 1.0e22, 20.0, Some("Nowhere")),
            row("Lost-Moon", 0.001, 0.0, 1.0e18, 0.5, Some("Lost")),
        ];

        let Bootstrap { system, report } = bootstrap(&rows, &BootstrapOptions::default()).unwrap();
        assert_eq!(
            report.missing_primaries,
            vec![("Lost".to_string(), "Nowhere".to_string())]
        );
        assert!(report.dropped.is_empty());
        assert_eq!(system.len(), 3);

        let lost = system.by_name("Lost").unwrap();
        assert_eq!(lost.position, Vector::new(2.0 * AU, 0.0));
        assert_eq!(lost.velocity, Vector::new(0.0, 20_000.0));
        assert_eq!(lost.primary, system.star());

        let moon = system.by_name("Lost-Moon").unwrap();
        assert!((moon.position - Vector::new(2.001 * AU, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_missing_primary_strict_drops_dependents() {
        let rows = vec![
            sun(),
            row("Lost", 2.0, 0.0, 1.0e22, 20.0, Some("Nowhere")),
            row("Lost-Moon", 0.001, 0.0, 1.0e18, 0.5, Some("Lost")),
            row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun")),
        ];
        let options = BootstrapOptions {
            strict_primaries: true,
            ..Default::default()
        };

        let Bootstrap { system, report } = bootstrap(&rows, &options).unwrap();
        assert_eq!(system.len(), 2);
        assert!(system.by_name("Lost").is_none());
        assert!(system.by_name("Lost-Moon").is_none());
        assert_eq!(report.dropped, vec!["Lost".to_string(), "Lost-Moon".to_string()]);
    }

    #[test]
    fn test_primary_cycle_is_reported_and_broken() {
        let rows = vec![
            sun(),
            row("A", 1.0, 0.0, 1.0e22, 10.0, Some("B")),
            row("B", 2.0, 0.0, 1.0e22, 10.0, Some("A")),
            row("C", 0.01, 0.0, 1.0e18, 1.0, Some("A")),
        ];

        let Bootstrap { system, report } = bootstrap(&rows, &BootstrapOptions::default()).unwrap();
        assert_eq!(report.cycles, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(system.len(), 4);
        assert_eq!(system.by_name("A").unwrap().position, Vector::new(AU, 0.0));
        assert_eq!(system.by_name("C").unwrap().primary, system.id_of("A"));

        let strict = BootstrapOptions {
            strict_primaries: true,
            ..Default::default()
        };
        let Bootstrap { system, report } = bootstrap(&rows, &strict).unwrap();
        assert_eq!(system.len(), 1);
        assert_eq!(report.dropped.len(), 3);
    }

    #[test]
    fn test_duplicate_names_keep_first_row() {
        let rows = vec![
            sun(),
            row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun")),
            row("Planet-1", 3.0, 0.0, 6.0e24, 17.0, Some("Sun")),
        ];

        let Bootstrap { system, report } = bootstrap(&rows, &BootstrapOptions::default()).unwrap();
        assert_eq!(report.duplicates, vec!["Planet-1".to_string()]);
        assert_eq!(system.len(), 2);
        assert_eq!(system.by_name("Planet-1").unwrap().position, Vector::new(AU, 0.0));
    }

    #[test]
    fn test_empty_and_starless_catalogs() {
        let empty = bootstrap(&[], &BootstrapOptions::default()).unwrap();
        assert!(empty.system.is_empty());
        assert!(empty.report.is_clean());

        let rows = vec![row("Planet-1", 1.0, 0.0, 6.0e24, 29.78, Some("Sun"))];
        assert!(matches!(
            bootstrap(&rows, &BootstrapOptions::default()),
            Err(CatalogError::NoStar)
        ));
    }

    #[test]
    fn test_star_naming_itself_as_primary_is_the_star() {
        let rows = vec![
            row("Sol", 0.0, 0.0, 2.0e30, 0.0, Some("Sol")),
            row("Terra", 1.0, 0.0, 6.0e24, 29.78, Some("Sol")),
        ];

        let Bootstrap { system, report } = bootstrap(&rows, &BootstrapOptions::default()).unwrap();

        assert!(report.is_clean(), "{report:?}");
        let star = system.get(system.star().unwrap()).unwrap();
        assert_eq!(star.name, "Sol");
        assert!(star.is_fixed);
        assert_eq!(star.velocity, Vector::ZERO);

        let terra = system.by_name("Terra").unwrap();
        assert_eq!(terra.primary, system.star());
        assert_eq!(terra.position, Vector::new(AU, 0.0));
        assert!((terra.velocity.y - 29_780.0).abs() < 1e-6);
    }

    #[test]
    fn test_units_and_trail_cap_carried_over() {
        let rows = vec![sun()];
        let options = BootstrapOptions {
            trail_max_points: 64,
            ..Default::default()
        };

        let system = bootstrap(&rows, &options).unwrap().system;
        let star = system.by_name("Sun").unwrap();
        assert_eq!(star.radius, 1.0e6);
        assert_eq!(star.color, BodyColor::new(100, 150, 200));
        assert_eq!(star.trail.max_points(), 64);
    }
}
