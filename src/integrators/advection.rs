//! Vertical advection by the sampled vertical velocity.

use super::reflection::reflect_particles;
use crate::forcing::Forcing;
use crate::grid::Grid;
use crate::particle::Particles;
use crate::Float;

/// Moves every particle by `w * dt` and reflects it back into the water
/// column.
pub fn advect<G, F>(particles: &mut Particles, grid: &G, forcing: &F, dt: Float)
where
    G: Grid + ?Sized,
    F: Forcing + ?Sized,
{
    let w = forcing.vertical_velocity(particles.x.view(), particles.y.view(), particles.z.view());
    particles.z.scaled_add(dt, &w);

    reflect_particles(particles, grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcing::AnalyticForcing;
    use crate::grid::FlatGrid;

    fn particles(z: Vec<Float>) -> Particles {
        let n = z.len();
        Particles::from_columns(vec![0.; n], vec![0.; n], z, (0..n as u64).collect()).unwrap()
    }

    #[test]
    fn advect_sinking() {
        let mut p = particles(vec![0., 5., 9.]);
        advect(&mut p, &FlatGrid::new(10.), &AnalyticForcing::new(0.01), 100.);

        // reaching the seabed exactly is not a reflection
        assert_eq!(p.z.to_vec(), vec![1., 6., 10.]);
    }

    #[test]
    fn advect_rising_reflects_at_surface() {
        let mut p = particles(vec![0.5, 5.]);
        advect(&mut p, &FlatGrid::new(10.), &AnalyticForcing::new(-0.01), 100.);

        assert_eq!(p.z.to_vec(), vec![0.5, 4.]);
    }

    #[test]
    fn advect_leaves_horizontal_position() {
        let mut p = Particles::from_columns(vec![1.5], vec![2.5], vec![3.], vec![4]).unwrap();
        advect(&mut p, &FlatGrid::new(10.), &AnalyticForcing::new(0.001), 60.);

        assert_eq!(p.x[0], 1.5);
        assert_eq!(p.y[0], 2.5);
        assert_eq!(p.pid[0], 4);
    }

    #[test]
    fn advect_empty() {
        let mut p = Particles::default();
        advect(&mut p, &FlatGrid::new(10.), &AnalyticForcing::new(1.), 60.);
        assert!(p.is_empty());
    }
}
