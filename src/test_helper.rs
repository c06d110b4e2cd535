use crate::Float;
#[cfg(feature = "single")]
use std::f32::{EPSILON, MAX};
#[cfg(not(feature = "single"))]
use std::f64::{EPSILON, MAX};

pub fn equal_floats(a: Float, b: Float) -> bool {
    if a == 0. && b == 0. {
        return true;
    }

    let diff = (a - b).abs();

    if a == 0. || b == 0. {
        return diff < EPSILON;
    }

    diff / (a.abs() + b.abs()).min(MAX) < EPSILON
}

/// Sample mean and (biased) sample variance.
pub fn mean_var(v: &[Float]) -> (Float, Float) {
    let n = v.len() as Float;
    let mean = v.iter().sum::<Float>() / n;
    let var = v.iter().map(|x| (x - mean) * (x - mean)).sum::<Float>() / n;
    (mean, var)
}
