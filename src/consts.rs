use crate::Float;

/// Inverse variance of a uniform distribution on `[-1, 1)`. Scaling such a
/// sample by `sqrt(UNIFORM_INV_VARIANCE * dt)` yields an increment with
/// variance `dt`.
pub const UNIFORM_INV_VARIANCE: Float = 3.;

/// Distance between a grid cell center and the cell edge, in grid units.
pub const HALF_CELL: Float = 0.5;
