//! This module handles the configuration of the vertical transport.
//!
//! The keys mirror the host's IBM section, e.g. in TOML:
//!
//! ```toml
//! dt = 600
//! vertical_mixing = "mixed_layer"   # or a number in m^2/s
//! vertdiff_dt = 60
//! land_collision = "reposition"
//! ```
//!
//! Developing organisms can mix and swim depending on their stage:
//!
//! ```toml
//! dt = 600
//! vertical_mixing = [0.01, 0.01]    # one diffusivity per stage
//! stage_column = "stage"
//!
//! [diel_migration]
//! speed = [0.001, 0.002]
//! depth_day = [20, 20]
//! depth_night = [0, 0]
//! ```

use crate::errors::*;
use crate::Float;
use serde::{Deserialize, Serialize};

const DEFAULT_VERTICAL_MIXING: VerticalMixing = VerticalMixing::Constant(0.);
const DEFAULT_LAND_COLLISION: LandCollision = LandCollision::Reposition;
const DEFAULT_STAGE_COLUMN: &str = "stage";

/// Vertical diffusivity, either depth independent or a named profile
/// sampled from the forcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerticalMixing {
    /// diffusivity in m²/s
    Constant(Float),
    Profile(String),
    /// one diffusivity in m²/s per development stage
    Staged(Vec<Float>),
}

/// Swimming towards a preferred depth that depends on whether the sun is
/// above the horizon.
///
/// Every parameter has one entry per development stage. A particle in stage
/// `s` uses the entry `floor(s) - 1`, clamped to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DielMigration {
    /// swimming speed in m/s
    pub speed: Vec<Float>,
    /// preferred depth in meters during the day
    pub depth_day: Vec<Float>,
    /// preferred depth in meters during the night
    pub depth_night: Vec<Float>,
}

impl DielMigration {
    /// Number of stages in the table
    pub fn stages(&self) -> usize {
        self.speed.len()
    }

    /// Checks that all parameters are complete and not negative.
    pub fn check(&self) -> Result<()> {
        if self.speed.is_empty() {
            bail!("Diel migration needs parameters for at least one stage.");
        }

        for (name, values) in &[
            ("depth_day", &self.depth_day),
            ("depth_night", &self.depth_night),
        ] {
            if values.len() != self.stages() {
                bail!(ErrorKind::StageCount(
                    name.to_string(),
                    self.stages(),
                    values.len()
                ));
            }
        }

        let params = self.speed.iter().chain(&self.depth_day).chain(&self.depth_night);
        for v in params {
            if !(v.is_finite() && *v >= 0.) {
                bail!("Diel migration parameters must be finite and not negative, got {}.", v);
            }
        }

        Ok(())
    }
}

/// What to do with particles that seem to be stuck on land.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandCollision {
    /// move them randomly within their grid cell
    Reposition,
    None,
}

/// Holds the settings of a run. Immutable once the integrator is set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// timestep in seconds
    pub dt: Float,
    #[serde(default = "default_vertical_mixing")]
    pub vertical_mixing: VerticalMixing,
    /// Sub-step of the vertical diffusion in seconds. Defaults to `dt`.
    #[serde(default)]
    pub vertdiff_dt: Option<Float>,
    #[serde(default = "default_land_collision")]
    pub land_collision: LandCollision,
    /// Seed of the integrator's random number generator. Drawn from entropy
    /// if missing.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Name of the scalar column holding the development stage. Particles
    /// without it are treated as being in the first stage.
    #[serde(default = "default_stage_column")]
    pub stage_column: String,
    #[serde(default)]
    pub diel_migration: Option<DielMigration>,
}

fn default_vertical_mixing() -> VerticalMixing {
    DEFAULT_VERTICAL_MIXING
}

fn default_land_collision() -> LandCollision {
    DEFAULT_LAND_COLLISION
}

fn default_stage_column() -> String {
    DEFAULT_STAGE_COLUMN.to_string()
}

fn check_diffusivity(d: Float) -> Result<()> {
    if !(d.is_finite() && d >= 0.) {
        bail!(ErrorKind::NegativeDiffusivity(d));
    }
    Ok(())
}

impl Settings {
    /// Settings with timestep `dt` and defaults otherwise.
    pub fn new(dt: Float) -> Settings {
        Settings {
            dt,
            vertical_mixing: DEFAULT_VERTICAL_MIXING,
            vertdiff_dt: None,
            land_collision: DEFAULT_LAND_COLLISION,
            seed: None,
            stage_column: default_stage_column(),
            diel_migration: None,
        }
    }

    /// Parses and checks settings given as TOML.
    pub fn from_toml_str(s: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(s).chain_err(|| "Unable to parse settings.")?;

        settings.check()?;

        Ok(settings)
    }

    /// Checks the settings for sanity.
    pub fn check(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.) {
            bail!(ErrorKind::InvalidTimestep(self.dt));
        }

        if let Some(ddt) = self.vertdiff_dt {
            if !(ddt.is_finite() && ddt > 0.) {
                bail!(ErrorKind::InvalidTimestep(ddt));
            }
        }

        match self.vertical_mixing {
            VerticalMixing::Constant(d) => check_diffusivity(d)?,
            VerticalMixing::Staged(ref d) => {
                if d.is_empty() {
                    bail!("Staged vertical mixing needs at least one stage.");
                }
                for &d in d {
                    check_diffusivity(d)?;
                }
            }
            VerticalMixing::Profile(_) => (),
        }

        if let Some(ref migration) = self.diel_migration {
            migration.check()?;
        }

        Ok(())
    }

    /// Effective length of a vertical diffusion sub-step, never longer than
    /// the timestep.
    pub fn substep(&self) -> Float {
        match self.vertdiff_dt {
            Some(ddt) => ddt.min(self.dt),
            None => self.dt,
        }
    }
}
