//! This crate advances the depth of a population of Lagrangian particles
//! through one timestep of an ocean model. The vertical transport of every
//! particle is the sum of advection by the sampled vertical velocity and a
//! random walk modelling turbulent mixing. The random walk uses either a
//! constant diffusivity or a depth dependent profile, in which case the
//! Itô backward scheme of LaBolle et al. (2000) removes the spurious drift
//! towards regions of low diffusivity. Surface and seabed act as reflecting
//! boundaries. Particles that stop moving horizontally are considered
//! stranded on land and get repositioned within their grid cell. Organisms
//! with a development stage can in addition mix with a stage dependent
//! diffusivity and swim towards a preferred depth that differs between day
//! and night.
//!
//! The host model owns grid, forcing and particle state. The crate only
//! needs the capabilities described by the [`Grid`](grid::Grid) and
//! [`Forcing`](forcing::Forcing) traits.

#[macro_use]
extern crate error_chain;

pub mod consts;
pub mod forcing;
pub mod grid;
pub mod integrators;
pub mod particle;
pub mod random;
pub mod settings;
pub mod sun;

#[cfg(test)]
mod test_helper;

pub use crate::integrators::{advance, StepReport, VerticalIntegrator};
pub use crate::particle::{Particles, PositionCache};
pub use crate::settings::{DielMigration, LandCollision, Settings, VerticalMixing};

#[cfg(feature = "single")]
pub type Float = f32;
#[cfg(not(feature = "single"))]
pub type Float = f64;

pub mod errors {
    use crate::Float;

    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain! {
        foreign_links {
            TOMLError(::toml::de::Error);
        }

        errors {
            InvalidTimestep(t: Float) {
                description("invalid timestep")
                display("Timestep must be finite and bigger than 0, got {}", t)
            }
            NegativeDiffusivity(d: Float) {
                description("negative diffusivity")
                display("Vertical mixing must not be negative, got {}", d)
            }
            ColumnLength(column: String, expected: usize, got: usize) {
                description("particle columns differ in length")
                display("Column '{}' has {} entries, expected {}", column, got, expected)
            }
            StageCount(parameter: String, expected: usize, got: usize) {
                description("stage parameters differ in length")
                display("Stage parameter '{}' has {} entries, expected {}", parameter, got, expected)
            }
            UnknownProfile(name: String) {
                description("unknown diffusivity profile")
                display("Forcing does not provide a diffusivity profile named '{}'", name)
            }
        }
    }
}
