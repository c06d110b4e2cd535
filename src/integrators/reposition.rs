//! Repositioning of particles stranded on land.
//!
//! The horizontal transport of the host leaves a particle exactly where it
//! was when the particle is pushed onto land, where the forcing vanishes.
//! A particle whose horizontal position is bitwise unchanged since the
//! previous timestep is therefore taken to be grounded and gets a new
//! random position within its grid cell.

use crate::consts::HALF_CELL;
use crate::particle::{Particles, PositionCache};
use crate::random::unit_samples;
use rand::Rng;

/// Returns the rows of all particles whose horizontal position equals the
/// cached one. Particles unknown to the cache are never grounded.
#[allow(clippy::float_cmp)]
pub fn grounded(cache: &PositionCache, particles: &Particles) -> Vec<usize> {
    let index = cache.index();

    particles
        .pid
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let j = *index.get(id)?;
            let stuck = cache.x[j] == particles.x[i] && cache.y[j] == particles.y[i];
            if stuck {
                Some(i)
            } else {
                None
            }
        })
        .collect()
}

/// Moves every grounded particle to a uniformly random position in its
/// cell and refreshes `cache` with the resulting positions. Only horizontal
/// coordinates are touched. Returns the number of repositioned particles.
pub fn reposition<R: Rng + ?Sized>(
    particles: &mut Particles,
    cache: &mut PositionCache,
    rng: &mut R,
) -> usize {
    let rows = grounded(cache, particles);
    let ox = unit_samples(rng, rows.len());
    let oy = unit_samples(rng, rows.len());

    for ((&i, &dx), &dy) in rows.iter().zip(ox.iter()).zip(oy.iter()) {
        particles.x[i] = particles.x[i].round_ties_even() - HALF_CELL + dx;
        particles.y[i] = particles.y[i].round_ties_even() - HALF_CELL + dy;
    }

    *cache = PositionCache::from_particles(particles);

    rows.len()
}
