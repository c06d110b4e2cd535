//! Vertical diffusion as a random walk with reflecting boundaries.
//!
//! A diffusivity `D` translates into a displacement `sqrt(2 D) dW`, where
//! `dW` is a zero mean increment with variance `dt`. For a depth dependent
//! `D(z)` the naive Euler-Maruyama step lacks the drift `dD/dz` and
//! particles pile up where the diffusivity is low. The Itô backward scheme
//! (LaBolle et al., 2000) recovers the drift by evaluating the diffusivity
//! at a provisional position reached with the same increment:
//!
//! ```text
//! Z1 = reflect(Z + sqrt(2 D(Z)) dW)
//! Z  = reflect(Z + sqrt(2 D(Z1)) dW)
//! ```
//!
//! The provisional `Z1` is mirrored at the surface before it is tested
//! against the seabed, the final depth goes through the shared
//! `reflect`.

// Move unit test into own file
#[cfg(test)]
#[path = "./diffusion_test.rs"]
mod diffusion_test;

use super::reflection::{reflect, reflect_depth_surface_first, reflect_particles};
use crate::forcing::Forcing;
use crate::grid::Grid;
use crate::particle::Particles;
use crate::random::UniformIncrement;
use crate::Float;
use log::trace;
use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

/// Iterator over the lengths of the diffusion sub-steps within one
/// timestep. All steps are `ddt` long, except for the last one, which is
/// shortened to end exactly at `dt`.
#[derive(Debug, Clone, Copy)]
pub struct SubSteps {
    dt: Float,
    ddt: Float,
    elapsed: Float,
    count: u32,
}

impl SubSteps {
    /// A non-positive `ddt` means a single step over `dt`.
    pub fn new(dt: Float, ddt: Float) -> SubSteps {
        SubSteps {
            dt,
            ddt: if ddt > 0. { ddt } else { dt },
            elapsed: 0.,
            count: 0,
        }
    }
}

impl Iterator for SubSteps {
    type Item = Float;

    fn next(&mut self) -> Option<Float> {
        // also terminates for NaN
        if !(self.elapsed < self.dt) {
            return None;
        }

        self.count += 1;
        let old = self.elapsed;
        // multiply instead of accumulating to avoid a spurious tiny last step
        self.elapsed = (self.count as Float * self.ddt).min(self.dt);

        Some(self.elapsed - old)
    }
}

/// Random walk with a depth independent diffusivity `d` over `dt`.
pub fn diffuse_constant<G, R>(particles: &mut Particles, grid: &G, d: Float, dt: Float, rng: &mut R)
where
    G: Grid + ?Sized,
    R: Rng + ?Sized,
{
    let dw = UniformIncrement::new().sample(rng, particles.len(), dt);
    particles.z.scaled_add((2. * d).sqrt(), &dw);

    reflect_particles(particles, grid);
}

/// Random walk where every particle has its own depth independent
/// diffusivity, e.g. one per development stage.
pub fn diffuse_staged<G, R>(
    particles: &mut Particles,
    grid: &G,
    d: ArrayView1<Float>,
    dt: Float,
    rng: &mut R,
) where
    G: Grid + ?Sized,
    R: Rng + ?Sized,
{
    let dw = UniformIncrement::new().sample(rng, particles.len(), dt);
    Zip::from(&mut particles.z)
        .and(d)
        .and(&dw)
        .for_each(|z, &d, &w| *z += (2. * d).sqrt() * w);

    reflect_particles(particles, grid);
}

/// Itô backward random walk with the diffusivity profile `profile`, split
/// into sub-steps of at most `ddt`. Returns the number of sub-steps taken.
pub fn diffuse_ito<G, F, R>(
    particles: &mut Particles,
    grid: &G,
    forcing: &F,
    profile: &str,
    dt: Float,
    ddt: Float,
    rng: &mut R,
) -> usize
where
    G: Grid + ?Sized,
    F: Forcing + ?Sized,
    R: Rng + ?Sized,
{
    let increment = UniformIncrement::new();
    let n = particles.len();

    // horizontal positions do not change during diffusion
    let seabed = grid.sample_depth(particles.x.view(), particles.y.view());
    let mut provisional: Array1<Float> = Array1::zeros(n);
    let mut substeps = 0;

    for step in SubSteps::new(dt, ddt) {
        let dw = increment.sample(rng, n, step);
        let x = particles.x.view();
        let y = particles.y.view();

        let d1 = forcing.vertical_diffusivity(x, y, particles.z.view(), profile);
        Zip::from(&mut provisional)
            .and(&particles.z)
            .and(&d1)
            .and(&dw)
            .and(&seabed)
            .for_each(|z1, &z, &d, &w, &h| {
                *z1 = reflect_depth_surface_first(z + (2. * d).sqrt() * w, h)
            });

        let d2 = forcing.vertical_diffusivity(x, y, provisional.view(), profile);
        Zip::from(&mut particles.z)
            .and(&d2)
            .and(&dw)
            .for_each(|z, &d, &w| *z += (2. * d).sqrt() * w);

        reflect(particles.z.view_mut(), seabed.view());

        substeps += 1;
        trace!("Diffusion sub-step {} of {} s", substeps, step);
    }

    substeps
}
