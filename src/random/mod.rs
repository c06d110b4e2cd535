//! Random samples consumed by the integrator.
use crate::consts::UNIFORM_INV_VARIANCE;
use crate::Float;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Draws uniform stochastic differentials.
///
/// A sample `U(-1, 1) * sqrt(3 dt)` has zero mean and variance `dt`, like
/// the increment of a Wiener process, but is bounded by `sqrt(3 dt)`.
#[derive(Debug, Clone)]
pub struct UniformIncrement {
    range: Uniform<Float>,
}

impl UniformIncrement {
    pub fn new() -> UniformIncrement {
        UniformIncrement {
            range: Uniform::new(-1., 1.),
        }
    }

    /// Returns `n` independent increments for a step of length `dt`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize, dt: Float) -> Array1<Float> {
        let scale = (UNIFORM_INV_VARIANCE * dt).sqrt();
        Array1::from_shape_fn(n, |_| self.range.sample(rng) * scale)
    }
}

impl Default for UniformIncrement {
    fn default() -> UniformIncrement {
        UniformIncrement::new()
    }
}

/// Returns `n` samples uniformly distributed on `[0, 1)`.
pub fn unit_samples<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Array1<Float> {
    Array1::from_shape_fn(n, |_| rng.gen::<Float>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::mean_var;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn increment_bounds_and_moments() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let dt = 4.;
        let dw = UniformIncrement::new().sample(&mut rng, 100_000, dt);
        let bound = (3. * dt).sqrt();

        assert_eq!(dw.len(), 100_000);
        assert!(dw.iter().all(|w| -bound <= *w && *w < bound));

        let (mean, var) = mean_var(dw.as_slice().unwrap());
        assert!(mean.abs() < 0.05, "mean: {}", mean);
        assert!((var - dt).abs() < 0.05 * dt, "var: {}", var);
    }

    #[test]
    fn zero_step_gives_zero_increment() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let dw = UniformIncrement::new().sample(&mut rng, 10, 0.);
        assert!(dw.iter().all(|w| *w == 0.));
    }

    #[test]
    fn unit_samples_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let u = unit_samples(&mut rng, 1000);
        assert!(u.iter().all(|u| 0. <= *u && *u < 1.));
        assert!(unit_samples(&mut rng, 0).is_empty());
    }
}
