//! One timestep of vertical transport for the whole population.


pub mod advection;
pub mod diffusion;
pub mod migration;
pub mod reflection;
pub mod reposition;

use self::advection::advect;
use self::diffusion::{diffuse_constant, diffuse_ito, diffuse_staged};
use self::migration::migrate;
use self::reposition::reposition;
use crate::errors::*;
use crate::forcing::Forcing;
use crate::grid::Grid;
use crate::particle::{Particles, PositionCache};
use crate::settings::{LandCollision, Settings, VerticalMixing};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Summary of a timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// number of particles processed
    pub particles: usize,
    /// number of diffusion steps
    pub substeps: usize,
    /// number of particles repositioned off land
    pub grounded: usize,
    /// number of migrating particles that see the sun
    pub daylight: usize,
}

/// Advances `particles` by one timestep starting at `time`.
///
/// Advection, diffusion and diel migration are each followed by a reflection
/// at surface and seabed. Migration only happens if `settings` configure it.
/// With `LandCollision::Reposition`, grounded particles are moved within
/// their cell and `cache` is replaced by the positions at the end of the
/// step; otherwise `cache` is left alone.
///
/// `settings` are expected to be checked, see `VerticalIntegrator::new`.
pub fn advance<G, F, R>(
    settings: &Settings,
    time: DateTime<Utc>,
    particles: &mut Particles,
    grid: &G,
    forcing: &F,
    cache: &mut PositionCache,
    rng: &mut R,
) -> StepReport
where
    G: Grid + ?Sized,
    F: Forcing + ?Sized,
    R: Rng + ?Sized,
{
    let dt = settings.dt;

    advect(particles, grid, forcing, dt);

    let substeps = match settings.vertical_mixing {
        VerticalMixing::Constant(d) => {
            diffuse_constant(particles, grid, d, dt, rng);
            1
        }
        VerticalMixing::Profile(ref name) => {
            diffuse_ito(particles, grid, forcing, name, dt, settings.substep(), rng)
        }
        VerticalMixing::Staged(ref table) => {
            let stage = particles.stage_indices(&settings.stage_column, table.len());
            let d = stage.mapv(|s| table[s]);
            diffuse_staged(particles, grid, d.view(), dt, rng);
            1
        }
    };

    let daylight = match settings.diel_migration {
        Some(ref migration) => {
            migrate(particles, grid, &time, migration, &settings.stage_column, dt)
        }
        None => 0,
    };

    let grounded = match settings.land_collision {
        LandCollision::Reposition => reposition(particles, cache, rng),
        LandCollision::None => 0,
    };

    let report = StepReport {
        particles: particles.len(),
        substeps,
        grounded,
        daylight,
    };
    debug!("{:?}", report);

    report
}

/// Integrator state that persists between timesteps: the checked settings,
/// the position cache of the land collision detection and the random number
/// generator.
#[derive(Debug, Clone)]
pub struct VerticalIntegrator {
    settings: Settings,
    cache: PositionCache,
    rng: Pcg64Mcg,
}

impl VerticalIntegrator {
    /// Checks `settings`, also against the profiles `forcing` provides.
    pub fn new<F: Forcing + ?Sized>(settings: Settings, forcing: &F) -> Result<VerticalIntegrator> {
        settings.check()?;

        match settings.vertical_mixing {
            VerticalMixing::Profile(ref name) => {
                if !forcing.has_profile(name) {
                    bail!(ErrorKind::UnknownProfile(name.clone()));
                }
                info!(
                    "Vertical diffusion with profile '{}', sub-step {} s.",
                    name,
                    settings.substep()
                );
            }
            VerticalMixing::Constant(d) => {
                if settings.vertdiff_dt.is_some() {
                    warn!("`vertdiff_dt` has no effect with constant vertical mixing.");
                }
                info!("Vertical diffusion with constant diffusivity {} m^2/s.", d);
            }
            VerticalMixing::Staged(ref d) => {
                if settings.vertdiff_dt.is_some() {
                    warn!("`vertdiff_dt` has no effect with staged vertical mixing.");
                }
                info!(
                    "Vertical diffusion by stage ('{}'): {:?} m^2/s.",
                    settings.stage_column, d
                );
            }
        }

        if let Some(ref migration) = settings.diel_migration {
            info!(
                "Diel migration by stage ('{}'), speed {:?} m/s, day depth {:?} m, night depth {:?} m.",
                settings.stage_column, migration.speed, migration.depth_day, migration.depth_night
            );
        }

        if let Some(ddt) = settings.vertdiff_dt {
            if ddt > settings.dt {
                warn!(
                    "Vertical diffusion step ({} s) exceeds the timestep ({} s), using {} s.",
                    ddt, settings.dt, settings.dt
                );
            }
        }

        info!("Land collision policy: {:?}.", settings.land_collision);

        let rng = match settings.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };

        Ok(VerticalIntegrator {
            settings,
            cache: PositionCache::empty(),
            rng,
        })
    }

    /// Continues with a position cache from an earlier run.
    pub fn with_cache(mut self, cache: PositionCache) -> VerticalIntegrator {
        self.cache = cache;
        self
    }

    /// Does one timestep starting at `time`.
    pub fn update<G, F>(
        &mut self,
        time: DateTime<Utc>,
        particles: &mut Particles,
        grid: &G,
        forcing: &F,
    ) -> StepReport
    where
        G: Grid + ?Sized,
        F: Forcing + ?Sized,
    {
        advance(
            &self.settings,
            time,
            particles,
            grid,
            forcing,
            &mut self.cache,
            &mut self.rng,
        )
    }

    /// The checked settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Positions at the end of the last timestep, for resuming a run.
    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }
}
