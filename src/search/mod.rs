//! Rotation-tolerant template matching.
//!
//! The matcher tries every whole-degree rotation in `±max_rotation_deg`,
//! counts greedy same-kind correspondences between the two templates and
//! reports the best count as a percentage of the first template's minutiae.
//! The assignment is first-fit rather than optimal, so `score(a, b)` and
//! `score(b, a)` may differ.

pub(crate) mod rotation;

use crate::minutiae::Template;
use crate::trace::{trace_event, trace_span};
use rotation::RotationCount;

/// Default acceptance threshold, in percent.
pub const DEFAULT_THRESHOLD: u8 = 65;

/// Configuration for [`Matcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Percentage at which fast mode stops searching.
    pub threshold: u8,
    /// Return the first rotation that reaches `threshold`.
    pub fast: bool,
    /// Largest trial rotation in degrees, applied in both directions.
    pub max_rotation_deg: u16,
    /// Per-axis distance (exclusive, in pixels) for a correspondence.
    pub max_distance: u32,
    /// Evaluate rotations in parallel when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fast: false,
            max_rotation_deg: 10,
            max_distance: 10,
            parallel: false,
        }
    }
}

/// Result of comparing two templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Truncated percentage of `a`'s minutiae that found a partner.
    pub score: u8,
    /// Rotation applied to `b` that produced `score`.
    pub rotation_deg: i32,
    /// Correspondences found at `rotation_deg`.
    pub matches: usize,
    /// Minutiae in `a`.
    pub minutiae: usize,
}

/// Template matcher.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Similarity of `a` to `b` in `0..=100`.
    pub fn score(&self, a: &Template, b: &Template) -> u8 {
        self.evaluate(a, b).score
    }

    /// Compares `a` to `b` and reports the winning rotation.
    ///
    /// An `a` without minutiae scores 0. In fast mode the first rotation, in
    /// ascending order, whose percentage reaches the threshold is returned;
    /// otherwise the first rotation with the highest count wins.
    pub fn evaluate(&self, a: &Template, b: &Template) -> MatchOutcome {
        let _span = trace_span!(
            "match_templates",
            a = a.len(),
            b = b.len(),
            fast = self.cfg.fast
        )
        .entered();

        let minutiae = a.len();
        if minutiae == 0 {
            trace_event!("match_skipped", minutiae = 0usize);
            return MatchOutcome::default();
        }

        #[cfg(feature = "rayon")]
        let outcome = if self.cfg.parallel {
            self.evaluate_par(a, b)
        } else {
            self.evaluate_seq(a, b)
        };
        #[cfg(not(feature = "rayon"))]
        let outcome = self.evaluate_seq(a, b);

        trace_event!(
            "match_score",
            score = outcome.score,
            rotation = outcome.rotation_deg,
            matches = outcome.matches
        );
        outcome
    }

    fn evaluate_seq(&self, a: &Template, b: &Template) -> MatchOutcome {
        let mut best: Option<RotationCount> = None;
        for rotation_deg in rotation::rotations(&self.cfg) {
            let count = RotationCount {
                rotation_deg,
                matches: rotation::count_matches(a, b, rotation_deg, self.cfg.max_distance),
            };
            if self.cfg.fast && self.reaches_threshold(count.matches, a.len()) {
                return outcome(count, a.len());
            }
            if best.map_or(true, |prev| count.matches > prev.matches) {
                best = Some(count);
            }
        }
        best.map(|count| outcome(count, a.len()))
            .unwrap_or_default()
    }

    #[cfg(feature = "rayon")]
    fn evaluate_par(&self, a: &Template, b: &Template) -> MatchOutcome {
        self.reduce(&rotation::count_all_par(a, b, &self.cfg), a.len())
    }

    /// Picks the outcome from counts listed in rotation order.
    #[cfg(feature = "rayon")]
    fn reduce(&self, counts: &[RotationCount], minutiae: usize) -> MatchOutcome {
        if self.cfg.fast {
            if let Some(&hit) = counts
                .iter()
                .find(|c| self.reaches_threshold(c.matches, minutiae))
            {
                return outcome(hit, minutiae);
            }
        }
        let mut best: Option<RotationCount> = None;
        for &count in counts {
            if best.map_or(true, |prev| count.matches > prev.matches) {
                best = Some(count);
            }
        }
        best.map(|count| outcome(count, minutiae))
            .unwrap_or_default()
    }

    fn reaches_threshold(&self, matches: usize, minutiae: usize) -> bool {
        percentage(matches, minutiae) >= f64::from(self.cfg.threshold)
    }
}

/// Scores `a` against `b` with the default distance and rotation range.
pub fn score(a: &Template, b: &Template, threshold: u8, fast: bool) -> u8 {
    Matcher::new()
        .with_config(MatchConfig {
            threshold,
            fast,
            ..MatchConfig::default()
        })
        .score(a, b)
}

fn percentage(matches: usize, minutiae: usize) -> f64 {
    matches as f64 / minutiae as f64 * 100.0
}

fn outcome(count: RotationCount, minutiae: usize) -> MatchOutcome {
    MatchOutcome {
        score: percentage(count.matches, minutiae) as u8,
        rotation_deg: count.rotation_deg,
        matches: count.matches,
        minutiae,
    }
}
