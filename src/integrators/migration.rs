//! Diel vertical migration of swimming organisms.

use super::reflection::reflect_particles;
use crate::grid::Grid;
use crate::particle::Particles;
use crate::settings::DielMigration;
use crate::sun::sun_height;
use crate::Float;
use chrono::{DateTime, Utc};
use ndarray::Zip;

/// Direction to swim from `z` towards `preferred`, positive downwards.
#[inline]
fn swim_direction(z: Float, preferred: Float) -> Float {
    if z > preferred {
        -1.
    } else if z < preferred {
        1.
    } else {
        0.
    }
}

/// Lets every particle swim for `dt` towards its preferred depth, which is
/// the day depth of its stage if the sun is above the horizon at its
/// position and the night depth otherwise. Particles may pass their
/// preferred depth within a step. Returns the number of particles in
/// daylight.
pub fn migrate<G: Grid + ?Sized>(
    particles: &mut Particles,
    grid: &G,
    time: &DateTime<Utc>,
    migration: &DielMigration,
    stage_column: &str,
    dt: Float,
) -> usize {
    let (lon, lat) = grid.lonlat(particles.x.view(), particles.y.view());
    let height = sun_height(time, lon.view(), lat.view());
    let stage = particles.stage_indices(stage_column, migration.stages());

    let mut daylight = 0;
    Zip::from(&mut particles.z)
        .and(&height)
        .and(&stage)
        .for_each(|z, &h, &s| {
            let preferred = if h > 0. {
                daylight += 1;
                migration.depth_day[s]
            } else {
                migration.depth_night[s]
            };
            *z += dt * migration.speed[s] * swim_direction(*z, preferred);
        });

    reflect_particles(particles, grid);

    daylight
}
