//! Minutiae extraction from a thinned skeleton.

use super::{minutiae_for_capacity, Direction, Minutia, MinutiaKind, Template, DEFAULT_CAPACITY};
use crate::image::Grid;
use crate::origin::Point;
use crate::trace::{trace_event, trace_span};

/// Default inset of the extraction scan, in pixels.
pub const DEFAULT_SCAN_MARGIN: usize = 5;
/// Default per-axis distance below which a same-kind candidate is a duplicate.
pub const DEFAULT_DEDUP_TOLERANCE: i32 = 4;

/// Tunables for [`extract_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractParams {
    /// Rows and columns skipped at every edge.
    pub scan_margin: usize,
    /// Duplicate radius on each axis (exclusive).
    pub dedup_tolerance: i32,
    /// Template capacity in scalar slots.
    pub capacity: usize,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            scan_margin: DEFAULT_SCAN_MARGIN,
            dedup_tolerance: DEFAULT_DEDUP_TOLERANCE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Extracts minutiae with [`ExtractParams::default`].
pub fn extract(skeleton: &Grid<bool>, origin: Point) -> Template {
    extract_with(skeleton, origin, &ExtractParams::default())
}

/// Scans `skeleton` row by row and records endings and bifurcations relative
/// to `origin`.
///
/// The first skeleton pixel of each row is never classified. Instead, the
/// last recorded minutia is dropped if it sits exactly on the previously
/// visited skeleton pixel; this removes the artifact left where a ridge
/// crosses from one scan row into the next. Candidates on the origin's row or column are skipped, as are
/// candidates closer than `dedup_tolerance` on both axes to an already
/// recorded minutia of the same kind. Scanning stops once the template is at
/// capacity.
pub fn extract_with(skeleton: &Grid<bool>, origin: Point, params: &ExtractParams) -> Template {
    let _span = trace_span!("extract_minutiae", origin_x = origin.x, origin_y = origin.y).entered();

    let mut template = Template::empty(origin);
    let max_minutiae = minutiae_for_capacity(params.capacity);
    // Keep the 3x3 window inside the grid whatever the margin.
    let margin = params.scan_margin.max(1);
    let x_end = skeleton.width().saturating_sub(margin);
    let y_end = skeleton.height().saturating_sub(margin);
    let mut prev_visited: Option<(usize, usize)> = None;
    let mut suppressed = 0usize;

    'rows: for y in margin..y_end {
        let mut first_in_row = true;
        for x in margin..x_end {
            if template.len() >= max_minutiae {
                break 'rows;
            }
            if !skeleton.at(x, y) {
                continue;
            }

            if first_in_row {
                first_in_row = false;
                if let (Some(last), Some(prev)) = (template.last(), prev_visited) {
                    let last_abs = (last.x + origin.x, last.y + origin.y);
                    if last_abs == (prev.0 as i32, prev.1 as i32) {
                        template.pop();
                        suppressed += 1;
                    }
                }
                // The row's leading pixel is the print's edge.
                prev_visited = Some((x, y));
                continue;
            }

            if let Some(minutia) = classify(skeleton, x, y, origin) {
                if !is_duplicate(&template, &minutia, params.dedup_tolerance) {
                    template.push(minutia);
                }
            }
            prev_visited = Some((x, y));
        }
    }

    trace_event!(
        "minutiae",
        count = template.len(),
        slots = template.count(),
        suppressed = suppressed
    );
    template
}

/// Classifies the skeleton pixel at `(x, y)`, or `None` for ridge interiors,
/// isolated pixels and pixels on the origin's axes.
fn classify(skeleton: &Grid<bool>, x: usize, y: usize, origin: Point) -> Option<Minutia> {
    let neighbours = ring_count(skeleton, x, y);
    let kind = match neighbours {
        1 => MinutiaKind::RidgeEnding,
        n if n >= 3 => MinutiaKind::Bifurcation,
        _ => return None,
    };

    let rel_x = x as i32 - origin.x;
    let rel_y = y as i32 - origin.y;
    if rel_x == 0 || rel_y == 0 {
        return None;
    }

    let direction = match kind {
        MinutiaKind::RidgeEnding => Direction::PRIORITY
            .iter()
            .find(|&&(_, (dx, dy))| skeleton.offset(x, y, dx, dy))
            .map(|&(dir, _)| dir),
        MinutiaKind::Bifurcation => None,
    };
    Some(Minutia::at(rel_x, rel_y, kind, direction))
}

fn ring_count(skeleton: &Grid<bool>, x: usize, y: usize) -> usize {
    let mut count = 0;
    for dx in -1isize..=1 {
        for dy in -1isize..=1 {
            if (dx, dy) != (0, 0) && skeleton.offset(x, y, dx, dy) {
                count += 1;
            }
        }
    }
    count
}

fn is_duplicate(template: &Template, candidate: &Minutia, tolerance: i32) -> bool {
    template.of_kind(candidate.kind).any(|m| {
        (m.x - candidate.x).abs() < tolerance && (m.y - candidate.y).abs() < tolerance
    })
}
