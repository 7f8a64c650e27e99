//! Per-rotation correspondence counting.
//!
//! Each rotation is an independent greedy assignment; the parallel path
//! evaluates them concurrently and hands the counts back in rotation order.

use crate::minutiae::Template;
use crate::search::MatchConfig;
use crate::util::math::rotate_polar;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Matched count for one trial rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RotationCount {
    pub(crate) rotation_deg: i32,
    pub(crate) matches: usize,
}

/// Rotations tried by the matcher, in evaluation order.
pub(crate) fn rotations(cfg: &MatchConfig) -> impl Iterator<Item = i32> + Clone {
    let max = i32::from(cfg.max_rotation_deg);
    -max..=max
}

/// Greedily pairs minutiae of `a` with minutiae of `b` rotated by `rotation_deg`.
///
/// Each `a` minutia takes the first unused `b` minutia of the same kind whose
/// rotated position is closer than `max_distance` on both axes.
pub(crate) fn count_matches(a: &Template, b: &Template, rotation_deg: i32, max_distance: u32) -> usize {
    let limit = i64::from(max_distance);
    let mut used = vec![false; b.len()];
    let mut matches = 0usize;

    for ma in a.minutiae() {
        for (slot, mb) in used.iter_mut().zip(b.minutiae()) {
            if *slot || mb.kind != ma.kind {
                continue;
            }
            let (rx, ry) = rotate_polar(mb.radius, mb.angle, rotation_deg);
            let dx = i64::from(ma.x) - rx as i64;
            let dy = i64::from(ma.y) - ry as i64;
            if dx.abs() < limit && dy.abs() < limit {
                *slot = true;
                matches += 1;
                break;
            }
        }
    }
    matches
}

/// Counts for every rotation, evaluated across the rayon pool and returned in
/// rotation order.
#[cfg(feature = "rayon")]
pub(crate) fn count_all_par(a: &Template, b: &Template, cfg: &MatchConfig) -> Vec<RotationCount> {
    let angles: Vec<i32> = rotations(cfg).collect();
    angles
        .into_par_iter()
        .map(|rotation_deg| RotationCount {
            rotation_deg,
            matches: count_matches(a, b, rotation_deg, cfg.max_distance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{count_matches, rotations};
    use crate::minutiae::{Direction, Minutia, Template};
    use crate::origin::Point;
    use crate::search::MatchConfig;

    #[test]
    fn rotation_range_is_symmetric() {
        let cfg = MatchConfig::default();
        let all: Vec<i32> = rotations(&cfg).collect();
        assert_eq!(all.len(), 21);
        assert_eq!(all.first(), Some(&-10));
        assert_eq!(all.last(), Some(&10));
    }

    #[test]
    fn kinds_never_pair() {
        let a = Template::new(Point::default(), vec![Minutia::bifurcation(20, 20)]);
        let b = Template::new(
            Point::default(),
            vec![Minutia::ending(20, 20, Direction::East)],
        );
        assert_eq!(count_matches(&a, &b, 0, 10), 0);
        assert_eq!(count_matches(&a, &a, 0, 10), 1);
    }

    #[test]
    fn each_candidate_is_used_once() {
        let a = Template::new(
            Point::default(),
            vec![Minutia::bifurcation(30, 30), Minutia::bifurcation(31, 31)],
        );
        let b = Template::new(Point::default(), vec![Minutia::bifurcation(30, 30)]);
        assert_eq!(count_matches(&a, &b, 0, 10), 1);
    }

    #[test]
    fn distance_bound_is_exclusive() {
        let a = Template::new(Point::default(), vec![Minutia::bifurcation(40, 20)]);
        let near = Template::new(Point::default(), vec![Minutia::bifurcation(31, 20)]);
        let far = Template::new(Point::default(), vec![Minutia::bifurcation(30, 20)]);
        assert_eq!(count_matches(&a, &near, 0, 10), 1);
        assert_eq!(count_matches(&a, &far, 0, 10), 0);
    }
}
