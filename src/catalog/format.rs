use super::{CatalogRow, NO_PRIMARY, ParsedCatalog, RowError, RowErrorKind, primary_from_column};
use crate::physics::body::BodyColor;
use crate::physics::math::Scalar;
use std::fmt::Write;

pub const CATALOG_HEADER: &str = "# Name          X(AU)           Y(AU)           Radius(km)    Color(R,G,B)   Mass(kg)       Speed(km/s)     Primary";

const COLUMN_COUNT: usize = 8;

/// Formats one row with fixed-width, left-aligned columns.
///
/// Positions keep nine decimals so moon offsets (thousandths of an AU)
/// survive the round trip.
pub fn format_row(row: &CatalogRow) -> String {
    format!(
        "{:<15} {:<15.9} {:<15.9} {:<13.1} {:<14} {:<14.4e} {:<15.6} {}",
        row.name,
        row.x,
        row.y,
        row.radius_km,
        row.color.to_string(),
        row.mass,
        row.speed_km_s,
        row.primary.as_deref().unwrap_or(NO_PRIMARY),
    )
}

pub fn format_catalog(rows: &[CatalogRow]) -> String {
    let mut out = String::with_capacity((rows.len() + 1) * 128);
    out.push_str(CATALOG_HEADER);
    out.push('\n');

    for row in rows {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", format_row(row));
    }

    out
}

/// Parses a single data line. `line` is the 1-based line number used in errors.
pub fn parse_row(text: &str, line: usize) -> Result<CatalogRow, RowError> {
    let columns: Vec<&str> = text.split_whitespace().collect();
    if columns.len() != COLUMN_COUNT {
        return Err(RowError {
            line,
            kind: RowErrorKind::ColumnCount(columns.len()),
        });
    }

    let number = |column: &'static str, value: &str| -> Result<Scalar, RowError> {
        value
            .parse::<Scalar>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .ok_or_else(|| RowError {
                line,
                kind: RowErrorKind::Number {
                    column,
                    value: value.to_string(),
                },
            })
    };

    let positive = |column: &'static str, value: &str| -> Result<Scalar, RowError> {
        let parsed = number(column, value)?;
        if parsed > 0.0 {
            Ok(parsed)
        } else {
            Err(RowError {
                line,
                kind: RowErrorKind::NotPositive {
                    column,
                    value: parsed,
                },
            })
        }
    };

    let name = columns[0];
    Ok(CatalogRow {
        name: name.to_string(),
        x: number("x", columns[1])?,
        y: number("y", columns[2])?,
        radius_km: positive("radius", columns[3])?,
        color: parse_color(columns[4]).ok_or_else(|| RowError {
            line,
            kind: RowErrorKind::Color(columns[4].to_string()),
        })?,
        mass: positive("mass", columns[5])?,
        speed_km_s: number("speed", columns[6])?,
        primary: primary_from_column(columns[7]).filter(|primary| primary != name),
    })
}

/// Parses every non-comment, non-blank line, collecting rejects instead of
/// stopping at the first bad row
pub fn parse_catalog(text: &str) -> ParsedCatalog {
    let mut parsed = ParsedCatalog::default();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_row(trimmed, index + 1) {
            Ok(row) => parsed.rows.push(row),
            Err(error) => parsed.rejected.push(error),
        }
    }

    parsed
}

fn parse_color(value: &str) -> Option<BodyColor> {
    let mut channels = value.split(',').map(|channel| channel.trim().parse::<u8>());

    let color = BodyColor::new(
        channels.next()?.ok()?,
        channels.next()?.ok()?,
        channels.next()?.ok()?,
    );

    channels.next().is_none().then_some(color)
}
