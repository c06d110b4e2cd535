//! Forcing service interface and an analytic forcing.
use crate::Float;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capabilities the integrator needs from the host forcing. All samples are
/// taken at the instant of the current timestep and are aligned with the
/// given coordinates.
pub trait Forcing {
    /// Vertical velocity in m/s, positive downwards.
    fn vertical_velocity(
        &self,
        x: ArrayView1<Float>,
        y: ArrayView1<Float>,
        z: ArrayView1<Float>,
    ) -> Array1<Float>;

    /// Vertical diffusivity in m²/s of the profile `profile`.
    fn vertical_diffusivity(
        &self,
        x: ArrayView1<Float>,
        y: ArrayView1<Float>,
        z: ArrayView1<Float>,
        profile: &str,
    ) -> Array1<Float>;

    /// Whether `vertical_diffusivity` knows the profile `name`.
    fn has_profile(&self, name: &str) -> bool;
}

/// Diffusivity as a function of depth only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffusivityProfile {
    Constant {
        value: Float,
    },
    /// `surface + gradient * z`, never below 0
    Linear {
        surface: Float,
        gradient: Float,
    },
    /// Vanishes at the surface and at `depth`, reaches `peak` at
    /// `depth / 2`.
    Parabolic {
        peak: Float,
        depth: Float,
    },
}

impl DiffusivityProfile {
    /// Diffusivity in m²/s at depth `z`.
    pub fn at(&self, z: Float) -> Float {
        match *self {
            DiffusivityProfile::Constant { value } => value,
            DiffusivityProfile::Linear { surface, gradient } => (surface + gradient * z).max(0.),
            DiffusivityProfile::Parabolic { peak, depth } => {
                (4. * peak * z * (depth - z) / (depth * depth)).max(0.)
            }
        }
    }
}

/// Forcing with a uniform vertical velocity and a set of named analytic
/// diffusivity profiles.
///
/// An unknown profile name samples as zero diffusivity. Integrators check
/// profile names when they are set up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticForcing {
    #[serde(default)]
    pub vertical_velocity: Float,
    #[serde(default)]
    pub profiles: BTreeMap<String, DiffusivityProfile>,
}

impl AnalyticForcing {
    pub fn new(vertical_velocity: Float) -> AnalyticForcing {
        AnalyticForcing {
            vertical_velocity,
            profiles: BTreeMap::new(),
        }
    }

    pub fn with_profile(mut self, name: &str, profile: DiffusivityProfile) -> AnalyticForcing {
        self.profiles.insert(name.to_string(), profile);
        self
    }
}

impl Forcing for AnalyticForcing {
    fn vertical_velocity(
        &self,
        x: ArrayView1<Float>,
        _y: ArrayView1<Float>,
        _z: ArrayView1<Float>,
    ) -> Array1<Float> {
        Array1::from_elem(x.len(), self.vertical_velocity)
    }

    fn vertical_diffusivity(
        &self,
        _x: ArrayView1<Float>,
        _y: ArrayView1<Float>,
        z: ArrayView1<Float>,
        profile: &str,
    ) -> Array1<Float> {
        match self.profiles.get(profile) {
            Some(p) => z.mapv(|z| p.at(z)),
            None => Array1::zeros(z.len()),
        }
    }

    fn has_profile(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }
}
