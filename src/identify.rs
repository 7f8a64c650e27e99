//! Verification (1:1) and identification (1:N) over a template store.

use crate::minutiae::Template;
use crate::search::{MatchOutcome, Matcher};
use crate::store::TemplateStore;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::MinutiaeResult;

/// Outcome of comparing two stored prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// Both templates were found and matched.
    Scored(MatchOutcome),
    /// A template is missing, so no score exists.
    CannotCompare {
        /// Names without a stored template.
        missing: Vec<String>,
    },
    /// A stored template could not be decoded.
    Unreadable {
        name: String,
        /// The decode error, as text.
        reason: String,
    },
}

impl Comparison {
    /// Score in `0..=100`; 0 when the comparison could not be made.
    pub fn score(&self) -> u8 {
        match self {
            Comparison::Scored(outcome) => outcome.score,
            Comparison::CannotCompare { .. } | Comparison::Unreadable { .. } => 0,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Comparison::Scored(_))
    }
}

/// One candidate's result in a [`rank`] listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranked {
    pub name: String,
    pub comparison: Comparison,
}

enum Slot {
    Found(Template),
    Missing,
    Unreadable(String),
}

/// Loads `name`, keeping decode failures as data. I/O failures stay errors.
fn fetch<S: TemplateStore + ?Sized>(store: &S, name: &str) -> MinutiaeResult<Slot> {
    match store.load(name) {
        Ok(Some(template)) => Ok(Slot::Found(template)),
        Ok(None) => Ok(Slot::Missing),
        Err(err) if err.is_malformed_template() => {
            trace_warn!("unreadable_template", reason = %err);
            Ok(Slot::Unreadable(err.to_string()))
        }
        Err(err) => Err(err),
    }
}

/// An unreadable template wins over a missing one; the probe is reported
/// before the candidate.
fn judge(
    (probe, probe_slot): (&str, &Slot),
    (candidate, candidate_slot): (&str, &Slot),
    matcher: &Matcher,
) -> Comparison {
    match (probe_slot, candidate_slot) {
        (Slot::Found(a), Slot::Found(b)) => Comparison::Scored(matcher.evaluate(a, b)),
        (Slot::Unreadable(reason), _) => Comparison::Unreadable {
            name: probe.to_owned(),
            reason: reason.clone(),
        },
        (_, Slot::Unreadable(reason)) => Comparison::Unreadable {
            name: candidate.to_owned(),
            reason: reason.clone(),
        },
        _ => {
            let missing: Vec<String> = [(probe, probe_slot), (candidate, candidate_slot)]
                .into_iter()
                .filter(|(_, slot)| matches!(slot, Slot::Missing))
                .map(|(name, _)| name.to_owned())
                .collect();
            trace_warn!("cannot_compare", missing = missing.len());
            Comparison::CannotCompare { missing }
        }
    }
}

/// Matches the probe's template against the candidate's.
///
/// Missing templates produce [`Comparison::CannotCompare`] and corrupt ones
/// [`Comparison::Unreadable`]; only store I/O failures are errors.
pub fn compare<S: TemplateStore + ?Sized>(
    store: &S,
    probe: &str,
    candidate: &str,
    matcher: &Matcher,
) -> MinutiaeResult<Comparison> {
    let probe_slot = fetch(store, probe)?;
    let candidate_slot = fetch(store, candidate)?;
    Ok(judge(
        (probe, &probe_slot),
        (candidate, &candidate_slot),
        matcher,
    ))
}

/// Scores `probe` against every other stored print, best first.
///
/// Ties keep the store's name order. The probe itself is excluded. A corrupt
/// candidate is listed as [`Comparison::Unreadable`] without affecting the
/// others.
pub fn rank<S: TemplateStore + ?Sized>(
    store: &S,
    probe: &str,
    matcher: &Matcher,
) -> MinutiaeResult<Vec<Ranked>> {
    let _span = trace_span!("rank").entered();

    let probe_slot = fetch(store, probe)?;
    let mut ranked = Vec::new();
    for name in store.names()? {
        if name == probe {
            continue;
        }
        let candidate_slot = fetch(store, &name)?;
        let comparison = judge((probe, &probe_slot), (&name, &candidate_slot), matcher);
        ranked.push(Ranked { name, comparison });
    }
    ranked.sort_by(|x, y| y.comparison.score().cmp(&x.comparison.score()));

    trace_event!("ranked", candidates = ranked.len());
    Ok(ranked)
}
