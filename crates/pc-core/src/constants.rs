use crate::pole::PlateId;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;

/// SLERP near-parallel threshold
pub const SLERP_THRESHOLD: f64 = 0.9995;

/// Tolerance in Ma for treating a query time as an exact sample hit
pub const TIME_EPSILON: f64 = 1e-6;

/// Present day, in millions of years ago
pub const PRESENT_DAY: f64 = 0.0;

/// Conventional anchor plate id (the absolute reference frame)
pub const DEFAULT_ANCHOR_PLATE: PlateId = 0;

/// Default reconstruction-tree cache capacity
pub const DEFAULT_CACHE_SIZE: usize = 1;
