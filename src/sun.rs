//! Elevation of the sun above the horizon.
//!
//! Simplified astronomical model: the declination follows a fit over the
//! day of year, the true solar time is taken as `15° * hour + lon`, which
//! is correct at the spring equinox to within about 3° (12 min). Leap days
//! are not accounted for.
use crate::Float;
use chrono::{DateTime, Datelike, Timelike, Utc};
use ndarray::{Array1, ArrayView1, Zip};

const RAD_PER_DEG: Float = std::f64::consts::PI as Float / 180.;

// fit of the declination over the day of year
const A0: Float = 0.3979;
const A1: Float = 0.9856 * RAD_PER_DEG;
const A2: Float = 1.9171 * RAD_PER_DEG;
const A3: Float = 0.98112;

/// Sine of the declination of the sun on day `yday` of the year.
pub fn sin_declination(yday: u32) -> Float {
    let yday = yday as Float;
    A0 * (A1 * (yday - 80.) + A2 * ((A1 * yday).sin() - A3)).sin()
}

/// Returns the elevation of the sun in degrees at `time` for every position
/// `(lon, lat)` in degrees. Only the full UTC hour of `time` is used.
pub fn sun_height(
    time: &DateTime<Utc>,
    lon: ArrayView1<Float>,
    lat: ArrayView1<Float>,
) -> Array1<Float> {
    let sindelta = sin_declination(time.ordinal());
    let cosdelta = (1. - sindelta * sindelta).sqrt();
    let hours = time.hour() as Float;

    let mut height = Array1::zeros(lon.len());
    Zip::from(&mut height)
        .and(lon)
        .and(lat)
        .for_each(|height, &lon, &lat| {
            let phi = lat * RAD_PER_DEG;
            let solar_time = (hours * 15. + lon) * RAD_PER_DEG;
            let sinheight = sindelta * phi.sin() - cosdelta * phi.cos() * solar_time.cos();
            *height = sinheight.max(-1.).min(1.).asin() / RAD_PER_DEG;
        });

    height
}
