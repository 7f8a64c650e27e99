//! Hit-and-miss thinning pass with eight fixed 3x3 structuring patterns.

use super::PassStats;
use crate::image::Grid;
use crate::trace::{trace_event, trace_span, trace_warn};

/// Structuring patterns, tried in this order. Offsets are `(dx, dy)` with `y`
/// growing downwards; unlisted cells are "don't care".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuringPattern {
    /// `111 / X.X / 000`
    TopRow,
    /// `000 / X.X / 111`
    BottomRow,
    /// `1X0` on every row.
    LeftColumn,
    /// `0X1` on every row.
    RightColumn,
    /// `X1X / 1.0 / X00`
    TopLeftCorner,
    /// `X00 / 1.0 / X1X`
    BottomLeftCorner,
    /// `00X / 0.1 / X1X`
    BottomRightCorner,
    /// `X1X / 0.1 / 00X`
    TopRightCorner,
}

impl StructuringPattern {
    /// All patterns in evaluation order.
    pub const ALL: [StructuringPattern; 8] = [
        StructuringPattern::TopRow,
        StructuringPattern::BottomRow,
        StructuringPattern::LeftColumn,
        StructuringPattern::RightColumn,
        StructuringPattern::TopLeftCorner,
        StructuringPattern::BottomLeftCorner,
        StructuringPattern::BottomRightCorner,
        StructuringPattern::TopRightCorner,
    ];

    /// Offsets that must be foreground.
    pub fn hits(self) -> &'static [(isize, isize)] {
        match self {
            StructuringPattern::TopRow => &[(-1, -1), (0, -1), (1, -1)],
            StructuringPattern::BottomRow => &[(-1, 1), (0, 1), (1, 1)],
            StructuringPattern::LeftColumn => &[(-1, 0), (-1, -1), (-1, 1)],
            StructuringPattern::RightColumn => &[(1, 0), (1, -1), (1, 1)],
            StructuringPattern::TopLeftCorner => &[(-1, 0), (0, -1)],
            StructuringPattern::BottomLeftCorner => &[(-1, 0), (0, 1)],
            StructuringPattern::BottomRightCorner => &[(0, 1), (1, 0)],
            StructuringPattern::TopRightCorner => &[(0, -1), (1, 0)],
        }
    }

    /// Offsets that must be background.
    pub fn misses(self) -> &'static [(isize, isize)] {
        match self {
            StructuringPattern::TopRow => &[(-1, 1), (0, 1), (1, 1)],
            StructuringPattern::BottomRow => &[(-1, -1), (0, -1), (1, -1)],
            StructuringPattern::LeftColumn => &[(1, 0), (1, 1), (1, -1)],
            StructuringPattern::RightColumn => &[(-1, 0), (-1, 1), (-1, -1)],
            StructuringPattern::TopLeftCorner => &[(0, 1), (1, 1), (1, 0)],
            StructuringPattern::BottomLeftCorner => &[(0, -1), (1, -1), (1, 0)],
            StructuringPattern::BottomRightCorner => &[(-1, 0), (-1, -1), (0, -1)],
            StructuringPattern::TopRightCorner => &[(-1, 0), (-1, 1), (0, 1)],
        }
    }

    /// Tests the pattern centred on `(x, y)`; the caller keeps the 3x3 window
    /// inside the grid.
    pub fn matches(self, grid: &Grid<bool>, x: usize, y: usize) -> bool {
        self.hits()
            .iter()
            .all(|&(dx, dy)| grid.offset(x, y, dx, dy))
            && !self
                .misses()
                .iter()
                .any(|&(dx, dy)| grid.offset(x, y, dx, dy))
    }
}

/// Runs hit-and-miss sweeps in place until one sweep deletes nothing.
///
/// Sweeps go column by column over the interior `1..w-1 x 1..h-1`; the first
/// matching pattern deletes the centre pixel immediately.
pub fn hit_and_miss(grid: &mut Grid<bool>, max_sweeps: usize) -> PassStats {
    let _span = trace_span!("hit_and_miss").entered();

    let width = grid.width();
    let height = grid.height();
    let mut stats = PassStats::default();

    loop {
        if stats.sweeps >= max_sweeps {
            trace_warn!("hit_and_miss_sweep_cap", sweeps = stats.sweeps);
            break;
        }
        stats.sweeps += 1;
        let mut deleted = 0usize;

        for x in 1..width.saturating_sub(1) {
            for y in 1..height.saturating_sub(1) {
                if !grid.at(x, y) {
                    continue;
                }
                if StructuringPattern::ALL
                    .iter()
                    .any(|pattern| pattern.matches(grid, x, y))
                {
                    grid.put(x, y, false);
                    deleted += 1;
                }
            }
        }

        stats.deleted += deleted;
        if deleted == 0 {
            break;
        }
    }

    trace_event!(
        "hit_and_miss_done",
        sweeps = stats.sweeps,
        deleted = stats.deleted
    );
    stats
}
