//! Grid service interface and two simple grids.
//!
//! Horizontal coordinates are grid relative: integer values are cell
//! centers, the cell `(i, j)` covers `[i - 0.5, i + 0.5) x [j - 0.5, j + 0.5)`.
use crate::errors::*;
use crate::Float;
use ndarray::{Array1, Array2, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// Capabilities the integrator needs from the host grid.
pub trait Grid {
    /// Returns the local seabed depth (positive, meters) at each horizontal
    /// position.
    fn sample_depth(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> Array1<Float>;

    /// Transforms grid coordinates into geographic `(lon, lat)`.
    fn lonlat(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> (Array1<Float>, Array1<Float>);
}

/// Affine map from grid coordinates to longitude and latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoTransform {
    /// longitude of the center of cell (0, 0)
    pub lon0: Float,
    /// latitude of the center of cell (0, 0)
    pub lat0: Float,
    pub dlon: Float,
    pub dlat: Float,
}

impl GeoTransform {
    /// Grid coordinates are taken to be geographic coordinates.
    pub fn identity() -> GeoTransform {
        GeoTransform {
            lon0: 0.,
            lat0: 0.,
            dlon: 1.,
            dlat: 1.,
        }
    }

    fn apply(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> (Array1<Float>, Array1<Float>) {
        let lon = x.mapv(|x| self.lon0 + x * self.dlon);
        let lat = y.mapv(|y| self.lat0 + y * self.dlat);
        (lon, lat)
    }
}

impl Default for GeoTransform {
    fn default() -> GeoTransform {
        GeoTransform::identity()
    }
}

/// Horizontally unbounded grid with the same depth everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGrid {
    pub depth: Float,
    pub transform: GeoTransform,
}

impl FlatGrid {
    pub fn new(depth: Float) -> FlatGrid {
        FlatGrid {
            depth,
            transform: GeoTransform::identity(),
        }
    }
}

impl Grid for FlatGrid {
    fn sample_depth(&self, x: ArrayView1<Float>, _y: ArrayView1<Float>) -> Array1<Float> {
        Array1::from_elem(x.len(), self.depth)
    }

    fn lonlat(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> (Array1<Float>, Array1<Float>) {
        self.transform.apply(x, y)
    }
}

/// Gridded bathymetry, sampled at the cell containing a position.
///
/// `depth` is indexed as `[j, i]` (row = y). Positions outside the grid use
/// the nearest edge cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BathymetryGrid {
    depth: Array2<Float>,
    pub transform: GeoTransform,
}

impl BathymetryGrid {
    pub fn new(depth: Array2<Float>, transform: GeoTransform) -> Result<BathymetryGrid> {
        if depth.is_empty() {
            bail!("Bathymetry must contain at least one cell.");
        }

        if depth.iter().any(|h| !h.is_finite() || *h < 0.) {
            bail!("Bathymetry must be finite and not negative.");
        }

        Ok(BathymetryGrid { depth, transform })
    }

    /// Number of cells in (x, y)
    pub fn dim(&self) -> (usize, usize) {
        let (ny, nx) = self.depth.dim();
        (nx, ny)
    }

    /// Depth of the cell in column `i` and row `j`
    pub fn depth_at_cell(&self, i: usize, j: usize) -> Float {
        self.depth[[j, i]]
    }
}

fn cell_index(c: Float, n: usize) -> usize {
    // NaN casts to 0
    c.round_ties_even().max(0.).min((n - 1) as Float) as usize
}

impl Grid for BathymetryGrid {
    fn sample_depth(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> Array1<Float> {
        let (nx, ny) = self.dim();
        let mut h = Array1::zeros(x.len());

        Zip::from(&mut h).and(&x).and(&y).for_each(|h, &x, &y| {
            *h = self.depth[[cell_index(y, ny), cell_index(x, nx)]];
        });

        h
    }

    fn lonlat(&self, x: ArrayView1<Float>, y: ArrayView1<Float>) -> (Array1<Float>, Array1<Float>) {
        self.transform.apply(x, y)
    }
}
