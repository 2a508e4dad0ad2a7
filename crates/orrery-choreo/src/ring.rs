//! Ring configuration and orbital geometry
//!
//! A ring is a circular formation hosting a fixed number of particles. The
//! whole ring tumbles as a rigid body and sweeps a secondary orbit, so the
//! assembled structure never sits still.

use orrery_core::{OrreryError, Result, Vec3};
use std::f32::consts::TAU;

/// Static configuration for one ring, immutable after load
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Ring radius in world units
    pub radius: f32,
    /// Rotation about local X, radians
    pub tilt: f32,
    /// Rotation about Y, radians
    pub rotation: f32,
    /// Particles hosted on this ring
    pub particle_count: usize,
    /// Self-spin rate, rad/s
    pub rotation_speed: f32,
    /// Radius of the secondary orbit the ring center sweeps
    pub orbital_radius: f32,
    /// Sweep rate of the secondary orbit, rad/s
    pub orbital_speed: f32,
    /// Shear of the orbit plane (Z tilted into Y), radians
    pub orbital_tilt: f32,
    /// +1.0 or -1.0
    pub orbital_direction: f32,
}

impl Default for Ring {
    fn default() -> Self {
        Self {
            radius: 3.0,
            tilt: 0.0,
            rotation: 0.0,
            particle_count: 30,
            rotation_speed: 0.3,
            orbital_radius: 0.5,
            orbital_speed: 0.2,
            orbital_tilt: 0.3,
            orbital_direction: 1.0,
        }
    }
}

impl Ring {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0) {
            return Err(OrreryError::ValueOutOfRange {
                field: "radius".into(),
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: self.radius as f64,
            });
        }
        if self.particle_count < 1 {
            return Err(OrreryError::InvalidRingConfig(
                "particle_count must be >= 1".into(),
            ));
        }
        if self.orbital_direction != 1.0 && self.orbital_direction != -1.0 {
            return Err(OrreryError::InvalidRingConfig(format!(
                "orbital_direction must be +1 or -1, got {}",
                self.orbital_direction
            )));
        }
        Ok(())
    }

    /// Parse a Ring from a TOML table, tolerant-defaulting field by field
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut ring = Self::default();

        if let Some(v) = table.get("radius") {
            ring.radius = toml_f32(v, ring.radius);
        }
        if let Some(v) = table.get("tilt") {
            ring.tilt = toml_f32(v, ring.tilt);
        }
        if let Some(v) = table.get("rotation") {
            ring.rotation = toml_f32(v, ring.rotation);
        }
        if let Some(v) = table.get("particle_count") {
            let n = v.as_integer().unwrap_or(ring.particle_count as i64);
            ring.particle_count = n.max(1) as usize;
        }
        if let Some(v) = table.get("rotation_speed") {
            ring.rotation_speed = toml_f32(v, ring.rotation_speed);
        }
        if let Some(v) = table.get("orbital_radius") {
            ring.orbital_radius = toml_f32(v, ring.orbital_radius);
        }
        if let Some(v) = table.get("orbital_speed") {
            ring.orbital_speed = toml_f32(v, ring.orbital_speed);
        }
        if let Some(v) = table.get("orbital_tilt") {
            ring.orbital_tilt = toml_f32(v, ring.orbital_tilt);
        }
        if let Some(v) = table.get("orbital_direction") {
            let d = toml_f32(v, ring.orbital_direction);
            ring.orbital_direction = if d < 0.0 { -1.0 } else { 1.0 };
        }
        ring
    }

    /// Parse a `[[ring]]` array-of-tables document into a validated ring table
    pub fn table_from_toml(source: &str) -> Result<Vec<Ring>> {
        let doc: toml::Value = source
            .parse()
            .map_err(|e: toml::de::Error| OrreryError::TomlParseError(e.to_string()))?;
        let Some(entries) = doc.get("ring").and_then(|v| v.as_array()) else {
            return Err(OrreryError::EmptyRingTable);
        };
        let mut rings = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(table) = entry.as_table() {
                let ring = Ring::from_toml(table);
                ring.validate()?;
                rings.push(ring);
            }
        }
        if rings.is_empty() {
            return Err(OrreryError::EmptyRingTable);
        }
        Ok(rings)
    }
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// Built-in desktop ring table: four interleaved rings, 130 particles
pub fn desktop_rings() -> Vec<Ring> {
    vec![
        Ring {
            radius: 2.6,
            tilt: 0.45,
            rotation: 0.0,
            particle_count: 30,
            rotation_speed: 0.32,
            orbital_radius: 0.4,
            orbital_speed: 0.18,
            orbital_tilt: 0.35,
            orbital_direction: 1.0,
        },
        Ring {
            radius: 3.2,
            tilt: -0.7,
            rotation: 0.9,
            particle_count: 32,
            rotation_speed: 0.26,
            orbital_radius: 0.55,
            orbital_speed: 0.14,
            orbital_tilt: 0.25,
            orbital_direction: -1.0,
        },
        Ring {
            radius: 3.8,
            tilt: 1.1,
            rotation: 2.0,
            particle_count: 33,
            rotation_speed: 0.22,
            orbital_radius: 0.5,
            orbital_speed: 0.21,
            orbital_tilt: 0.45,
            orbital_direction: 1.0,
        },
        Ring {
            radius: 4.4,
            tilt: -0.35,
            rotation: 2.8,
            particle_count: 35,
            rotation_speed: 0.18,
            orbital_radius: 0.65,
            orbital_speed: 0.11,
            orbital_tilt: 0.3,
            orbital_direction: -1.0,
        },
    ]
}

/// Built-in mobile ring table: two rings, 50 particles
pub fn mobile_rings() -> Vec<Ring> {
    vec![
        Ring {
            radius: 2.4,
            tilt: 0.5,
            rotation: 0.0,
            particle_count: 25,
            rotation_speed: 0.3,
            orbital_radius: 0.35,
            orbital_speed: 0.16,
            orbital_tilt: 0.3,
            orbital_direction: 1.0,
        },
        Ring {
            radius: 3.3,
            tilt: -0.8,
            rotation: 1.4,
            particle_count: 25,
            rotation_speed: 0.22,
            orbital_radius: 0.5,
            orbital_speed: 0.12,
            orbital_tilt: 0.4,
            orbital_direction: -1.0,
        },
    ]
}

/// Evenly spaced initial angle for slot `i` of `count`
pub fn slot_angle(i: usize, count: usize) -> f32 {
    TAU * i as f32 / count.max(1) as f32
}

/// Point on the ring at `angle`: circle in the XZ plane, tilted about X,
/// then rotated about Y. The order is load-bearing.
pub fn position_on_ring(ring: &Ring, angle: f32) -> Vec3 {
    Vec3::new(angle.cos() * ring.radius, 0.0, angle.sin() * ring.radius)
        .rotated_x(ring.tilt)
        .rotated_y(ring.rotation)
}

/// Offset of the ring center along its secondary orbit at `time`.
/// The orbit is a circle in XZ whose Z component is sheared into Y by
/// `orbital_tilt` (a shear, not a rotation: Z keeps its full extent).
pub fn orbital_offset(ring: &Ring, time: f32) -> Vec3 {
    let sweep = ring.orbital_speed * ring.orbital_direction * time;
    let x = sweep.cos() * ring.orbital_radius;
    let z = sweep.sin() * ring.orbital_radius;
    Vec3::new(x, z * ring.orbital_tilt.sin(), z)
}
