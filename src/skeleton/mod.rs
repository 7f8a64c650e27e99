//! Skeletonization of binarized ridge grids.
//!
//! Thinning runs Hilditch, then hit-and-miss, then both again. Each pass is a
//! sequential fixed-point iteration that mutates the grid while sweeping, so
//! the sweep order is part of the result and passes are never parallelized.

mod hilditch;
mod hit_miss;

pub use hilditch::{hilditch, ConditionSet};
pub use hit_miss::{hit_and_miss, StructuringPattern};

use crate::image::Grid;
use crate::trace::{trace_event, trace_span};

/// Default cap on sweeps per pass. Every productive sweep deletes at least one
/// pixel, so real inputs stop far below it.
pub const DEFAULT_MAX_SWEEPS: usize = 10_000;

/// 8-neighbourhood as `(dx, dy)`, clockwise from `(-1, +1)`.
pub(crate) const RING: [(isize, isize); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
];

/// Counters reported by a single thinning pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Sweeps run, including the final unproductive one.
    pub sweeps: usize,
    /// Pixels deleted across all sweeps.
    pub deleted: usize,
}

/// Thins `grid` with the default sweep cap and returns the skeleton.
pub fn thin(grid: &Grid<bool>) -> Grid<bool> {
    thin_with_limit(grid, DEFAULT_MAX_SWEEPS)
}

/// Thins a copy of `grid`, capping each pass at `max_sweeps` sweeps.
pub fn thin_with_limit(grid: &Grid<bool>, max_sweeps: usize) -> Grid<bool> {
    let _span = trace_span!("thin", foreground = grid.count_foreground()).entered();

    let mut skeleton = grid.clone();
    let mut deleted = 0usize;
    for _ in 0..2 {
        deleted += hilditch(&mut skeleton, max_sweeps).deleted;
        deleted += hit_and_miss(&mut skeleton, max_sweeps).deleted;
    }

    trace_event!(
        "thinned",
        deleted = deleted,
        remaining = skeleton.count_foreground()
    );
    skeleton
}
