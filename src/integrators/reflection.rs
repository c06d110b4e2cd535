//! Reflecting boundaries at the surface and at the seabed.

use crate::grid::Grid;
use crate::particle::Particles;
use crate::Float;
use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Mirrors a depth `z` at the surface and at the seabed `h`.
///
/// Whether `z` lies below the seabed is decided before the surface mirror,
/// so a depth above the surface is only ever mirrored at the surface. Each
/// mirror is applied once. Depths in `[-h, 2h]` end up in `[0, h]`, larger
/// excursions stay out of bounds.
#[inline]
pub fn reflect_depth(z: Float, h: Float) -> Float {
    let below_seabed = z > h;
    let z = if z < 0. { -z } else { z };

    if below_seabed {
        h - (z - h)
    } else {
        z
    }
}

/// Mirrors a depth `z` at the surface first and then tests the result
/// against the seabed `h`. Depths in `[-2h, 2h]` end up in `[0, h]`.
///
/// Used for the provisional depth of the Itô backward step.
#[inline]
pub fn reflect_depth_surface_first(z: Float, h: Float) -> Float {
    let z = if z < 0. { -z } else { z };

    if z > h {
        h - (z - h)
    } else {
        z
    }
}

/// Applies `reflect_depth` to a whole population in place.
pub fn reflect(z: ArrayViewMut1<Float>, seabed: ArrayView1<Float>) {
    Zip::from(z)
        .and(seabed)
        .for_each(|z, &h| *z = reflect_depth(*z, h));
}

/// Samples the local seabed depth and reflects all particles.
pub fn reflect_particles<G: Grid + ?Sized>(particles: &mut Particles, grid: &G) {
    let h = grid.sample_depth(particles.x.view(), particles.y.view());
    reflect(particles.z.view_mut(), h.view());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FlatGrid;
    use ndarray::{arr1, Array1};
    use quickcheck::{quickcheck, TestResult};

    /// Maps `t` onto `[lo, hi)` of the water column depth `h`.
    fn within(h: Float, t: Float, lo: Float, hi: Float) -> Float {
        h * (lo + (hi - lo) * t.abs().fract())
    }

    #[test]
    fn reflect_scenario() {
        let mut z = arr1(&[-2., 5., 15.]);
        let h = arr1(&[10., 10., 10.]);

        reflect(z.view_mut(), h.view());

        assert_eq!(z.to_vec(), vec![2., 5., 5.]);
    }

    #[test]
    fn reflect_single_mirror() {
        assert_eq!(reflect_depth(-3., 10.), 3.);
        assert_eq!(reflect_depth(13., 10.), 7.);
        assert_eq!(reflect_depth(0., 10.), 0.);
        assert_eq!(reflect_depth(10., 10.), 10.);
        assert_eq!(reflect_depth(20., 10.), 0.);
        assert_eq!(reflect_depth(-10., 10.), 10.);
    }

    #[test]
    fn reflect_seabed_is_tested_before_surface() {
        // above the surface means not below the seabed
        assert_eq!(reflect_depth(-14., 10.), 14.);
        assert_eq!(reflect_depth(-20., 10.), 20.);

        assert_eq!(reflect_depth_surface_first(-14., 10.), 6.);
        assert_eq!(reflect_depth_surface_first(-20., 10.), 0.);
        assert_eq!(reflect_depth_surface_first(-3., 10.), 3.);
        assert_eq!(reflect_depth_surface_first(13., 10.), 7.);
    }

    #[test]
    fn reflect_overshoot_is_not_iterated() {
        // Excursions beyond the mirrored range are mirrored once and left
        // out of bounds.
        assert_eq!(reflect_depth(25., 10.), -5.);
        assert_eq!(reflect_depth(50., 10.), -30.);
        assert_eq!(reflect_depth(-31., 10.), 31.);
        assert_eq!(reflect_depth(1e9, 10.), -999_999_980.);

        assert_eq!(reflect_depth_surface_first(-31., 10.), -11.);
        assert_eq!(reflect_depth_surface_first(25., 10.), -5.);
    }

    #[test]
    fn reflect_zero_depth() {
        assert_eq!(reflect_depth(0., 0.), 0.);
        assert_eq!(reflect_depth(-0.3, 0.), 0.3);
        assert_eq!(reflect_depth_surface_first(0., 0.), 0.);
    }

    #[test]
    fn reflect_empty() {
        let mut z: Array1<Float> = Array1::zeros(0);
        reflect(z.view_mut(), Array1::zeros(0).view());
        assert!(z.is_empty());

        let mut p = Particles::default();
        reflect_particles(&mut p, &FlatGrid::new(10.));
        assert!(p.is_empty());
    }

    #[test]
    fn reflect_uses_grid_depth() {
        let mut p = Particles::from_columns(vec![0., 1.], vec![0., 1.], vec![-1., 23.], vec![1, 2])
            .unwrap();

        reflect_particles(&mut p, &FlatGrid::new(20.));

        assert_eq!(p.z.to_vec(), vec![1., 17.]);
        assert_eq!(p.x.to_vec(), vec![0., 1.]);
    }

    quickcheck! {
        fn reflect_stays_in_water_column(t: Float, h: Float) -> TestResult {
            let h = h.abs();
            let z = within(h, t, -1., 3.);
            if !z.is_finite() || !t.is_finite() {
                return TestResult::discard();
            }

            let r = reflect_depth(z.min(2. * h), h);
            TestResult::from_bool(0. <= r && r <= h)
        }

        fn reflect_surface_first_stays_in_water_column(t: Float, h: Float) -> TestResult {
            let h = h.abs();
            let z = within(h, t, -2., 4.);
            if !z.is_finite() || !t.is_finite() {
                return TestResult::discard();
            }

            let r = reflect_depth_surface_first(z.max(-2. * h).min(2. * h), h);
            TestResult::from_bool(0. <= r && r <= h)
        }

        fn reflect_in_bounds_is_noop(z: Float, h: Float) -> TestResult {
            if !z.is_finite() || !h.is_finite() || z < 0. || z > h {
                return TestResult::discard();
            }

            TestResult::from_bool(reflect_depth(z, h) == z)
        }

        fn reflect_is_idempotent(t: Float, h: Float) -> TestResult {
            let h = h.abs();
            let z = within(h, t, -1., 3.);
            if !z.is_finite() || !t.is_finite() {
                return TestResult::discard();
            }

            let once = reflect_depth(z.min(2. * h), h);
            TestResult::from_bool(reflect_depth(once, h) == once)
        }
    }
}
