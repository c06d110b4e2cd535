//! Columnar data structures representing the particle population.
// Move unit test into own file
#[cfg(test)]
#[path = "./particle_test.rs"]
mod particle_test;

use crate::errors::*;
use crate::Float;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Stable particle identifier, unique within a run.
pub type ParticleId = u64;

/// Index aligned columns of all live particles.
///
/// Horizontal coordinates are grid relative, `z` is the depth in meters,
/// positive downwards with the surface at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Particles {
    pub x: Array1<Float>,
    pub y: Array1<Float>,
    pub z: Array1<Float>,
    pub pid: Array1<ParticleId>,
    /// Further per-particle quantities (temperature, age, ...). Never touched
    /// by the integrator.
    #[serde(default)]
    pub scalars: BTreeMap<String, Array1<Float>>,
}

fn check_len(name: &str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        bail!(ErrorKind::ColumnLength(name.to_string(), expected, got));
    }
    Ok(())
}

impl Particles {
    /// Returns a population from its coordinate columns. All columns must
    /// have the same length.
    pub fn from_columns(
        x: Vec<Float>,
        y: Vec<Float>,
        z: Vec<Float>,
        pid: Vec<ParticleId>,
    ) -> Result<Particles> {
        let n = pid.len();
        check_len("x", n, x.len())?;
        check_len("y", n, y.len())?;
        check_len("z", n, z.len())?;

        Ok(Particles {
            x: Array1::from(x),
            y: Array1::from(y),
            z: Array1::from(z),
            pid: Array1::from(pid),
            scalars: BTreeMap::new(),
        })
    }

    /// Attaches an additional scalar column.
    pub fn with_scalar(mut self, name: &str, values: Vec<Float>) -> Result<Particles> {
        check_len(name, self.len(), values.len())?;
        self.scalars.insert(name.to_string(), Array1::from(values));
        Ok(self)
    }

    /// Returns the scalar column `name`, if attached.
    pub fn scalar(&self, name: &str) -> Option<&Array1<Float>> {
        self.scalars.get(name)
    }

    /// Maps the development stage in column `column` to a row of a table
    /// with `stages` rows: stage `s` uses row `floor(s) - 1`, clamped to the
    /// table. Without the column every particle uses the first row.
    pub fn stage_indices(&self, column: &str, stages: usize) -> Array1<usize> {
        let last = stages.saturating_sub(1) as i64;
        match self.scalar(column) {
            Some(stage) => stage.mapv(|s| (s as i64).saturating_sub(1).max(0).min(last) as usize),
            None => Array1::zeros(self.len()),
        }
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.pid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pid.is_empty()
    }
}

/// Identifiers and horizontal positions of the particles as of the end of
/// the previous timestep.
///
/// The cache is replaced as a whole after every timestep, so particles that
/// left the population are dropped implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionCache {
    pub pid: Array1<ParticleId>,
    pub x: Array1<Float>,
    pub y: Array1<Float>,
}

impl PositionCache {
    /// Returns a cache that knows no particles yet.
    pub fn empty() -> PositionCache {
        PositionCache::default()
    }

    /// Snapshot of the current identifiers and horizontal positions.
    pub fn from_particles(p: &Particles) -> PositionCache {
        PositionCache {
            pid: p.pid.clone(),
            x: p.x.clone(),
            y: p.y.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.pid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pid.is_empty()
    }

    /// Maps identifiers to their row in the cache. A duplicated identifier
    /// resolves to its last row.
    pub fn index(&self) -> HashMap<ParticleId, usize> {
        self.pid.iter().enumerate().map(|(i, &id)| (id, i)).collect()
    }
}
