//! Core-point localization on a skeleton.
//!
//! The core is taken as the pixel where the ridge slope flips from falling to
//! rising with the largest combined magnitude, scanning rows top to bottom.
//! It anchors every minutia position in a template.

use crate::image::Grid;
use crate::trace::{trace_event, trace_span};

/// Default inset from every edge, in pixels.
pub const DEFAULT_CORE_MARGIN: usize = 50;

/// Integer pixel coordinate. The default `(0, 0)` doubles as "no core found".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Locates the core with [`DEFAULT_CORE_MARGIN`].
pub fn find_core(skeleton: &Grid<bool>) -> Point {
    find_core_with_margin(skeleton, DEFAULT_CORE_MARGIN)
}

/// Locates the core, scanning `margin..=len - margin` on both axes.
///
/// For each skeleton pixel with exactly two ring neighbours the slope between
/// them is `dy / dx` in integer arithmetic (neighbours found column-major, so
/// `dx >= 0`; vertical pairs are skipped). A negative slope followed by a
/// positive one is a candidate; it wins when both the combined magnitude and
/// the column distance from the previous observation beat the best so far.
/// A candidate ends the scan of its row. Returns `Point::default()` when no
/// candidate qualifies, including for grids smaller than twice the margin.
pub fn find_core_with_margin(skeleton: &Grid<bool>, margin: usize) -> Point {
    let _span = trace_span!("find_core", margin = margin).entered();

    let width = skeleton.width();
    let height = skeleton.height();
    let start = margin.max(1);
    let x_end = width.saturating_sub(margin).min(width.saturating_sub(2));
    let y_end = height.saturating_sub(margin).min(height.saturating_sub(2));

    let mut core = Point::default();
    let mut best_change = 0i32;
    let mut best_dist = 0i32;
    let mut prev_slope = 0i32;
    let mut prev_x = 0i32;

    if start > x_end || start > y_end {
        trace_event!("core_skipped", width = width, height = height);
        return core;
    }

    for y in start..=y_end {
        for x in start..=x_end {
            if !skeleton.at(x, y) {
                continue;
            }
            let Some(((x1, y1), (x2, y2))) = two_neighbours(skeleton, x, y) else {
                continue;
            };
            let run = x2 - x1;
            if run <= 0 {
                continue;
            }
            let slope = (y2 - y1) / run;
            let col = x as i32;
            if slope > 0 && prev_slope < 0 {
                let change = slope.abs() + prev_slope.abs();
                let dist = col - prev_x;
                if best_change < change && best_dist < dist {
                    best_change = change;
                    best_dist = dist;
                    core = Point::new(col, y as i32);
                }
                break;
            }
            prev_slope = slope;
            prev_x = col;
        }
    }

    trace_event!("core", x = core.x, y = core.y, change = best_change);
    core
}

/// Returns the ring neighbours of `(x, y)` when there are exactly two,
/// in column-major discovery order.
fn two_neighbours(skeleton: &Grid<bool>, x: usize, y: usize) -> Option<((i32, i32), (i32, i32))> {
    let mut found = [(0i32, 0i32); 2];
    let mut count = 0usize;
    for dx in -1isize..=1 {
        for dy in -1isize..=1 {
            if (dx, dy) == (0, 0) || !skeleton.offset(x, y, dx, dy) {
                continue;
            }
            if count < 2 {
                found[count] = (x as i32 + dx as i32, y as i32 + dy as i32);
            }
            count += 1;
        }
    }
    (count == 2).then_some((found[0], found[1]))
}
