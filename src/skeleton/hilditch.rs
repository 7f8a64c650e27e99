//! Hilditch thinning pass.

use super::{PassStats, RING};
use crate::image::Grid;
use crate::trace::{trace_event, trace_span, trace_warn};

/// The two mirrored connectivity tests Hilditch alternates between.
///
/// The pass flips to the other set after every candidate that reaches this
/// stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionSet {
    /// Keeps the pixel if offsets (0,+1), (+1,0), (+1,-1) or
    /// (+1,0), (+1,-1), (-1,0) are all set.
    A,
    /// Keeps the pixel if offsets (0,+1), (+1,-1), (-1,0) or
    /// (0,+1), (+1,0), (-1,0) are all set.
    APrime,
}

impl ConditionSet {
    /// Returns the other condition set.
    pub fn toggled(self) -> Self {
        match self {
            ConditionSet::A => ConditionSet::APrime,
            ConditionSet::APrime => ConditionSet::A,
        }
    }

    fn allows_deletion(self, grid: &Grid<bool>, x: usize, y: usize) -> bool {
        let p = |dx, dy| grid.offset(x, y, dx, dy);
        match self {
            ConditionSet::A => {
                !(p(0, 1) && p(1, 0) && p(1, -1)) && !(p(1, 0) && p(1, -1) && p(-1, 0))
            }
            ConditionSet::APrime => {
                !(p(0, 1) && p(1, -1) && p(-1, 0)) && !(p(0, 1) && p(1, 0) && p(-1, 0))
            }
        }
    }
}

fn neighbour_count(grid: &Grid<bool>, x: usize, y: usize) -> usize {
    RING.iter()
        .filter(|&&(dx, dy)| grid.offset(x, y, dx, dy))
        .count()
}

/// Counts 0 -> 1 transitions walking the ring clockwise, wrapping around.
fn transitions(grid: &Grid<bool>, x: usize, y: usize) -> usize {
    let mut count = 0;
    for k in 0..RING.len() {
        let (ax, ay) = RING[k];
        let (bx, by) = RING[(k + 1) % RING.len()];
        if !grid.offset(x, y, ax, ay) && grid.offset(x, y, bx, by) {
            count += 1;
        }
    }
    count
}

/// Runs Hilditch sweeps in place until one sweep deletes nothing.
///
/// Sweeps go column by column (x outer, y inner) over `2..w-1 x 2..h-1`.
/// Deletions are visible to later pixels of the same sweep. The condition
/// set starts at [`ConditionSet::A`] and is toggled per evaluated candidate,
/// carrying over from one sweep to the next.
pub fn hilditch(grid: &mut Grid<bool>, max_sweeps: usize) -> PassStats {
    let _span = trace_span!("hilditch").entered();

    let width = grid.width();
    let height = grid.height();
    let mut condition = ConditionSet::A;
    let mut stats = PassStats::default();

    loop {
        if stats.sweeps >= max_sweeps {
            trace_warn!("hilditch_sweep_cap", sweeps = stats.sweeps);
            break;
        }
        stats.sweeps += 1;
        let mut changed = false;

        for x in 2..width.saturating_sub(1) {
            for y in 2..height.saturating_sub(1) {
                if !grid.at(x, y) {
                    continue;
                }
                let neighbours = neighbour_count(grid, x, y);
                if !(2..=6).contains(&neighbours) {
                    continue;
                }
                if transitions(grid, x, y) != 1 {
                    continue;
                }
                if condition.allows_deletion(grid, x, y) {
                    grid.put(x, y, false);
                    stats.deleted += 1;
                    changed = true;
                }
                condition = condition.toggled();
            }
        }

        if !changed {
            break;
        }
    }

    trace_event!("hilditch_done", sweeps = stats.sweeps, deleted = stats.deleted);
    stats
}
