//! Aggregates shown on the programme overview and quality pages.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::evaluation::Evaluation;
use crate::domain::module::Module;
use crate::domain::programme::{Programme, ProgrammeStatus};

/// Share of `part` in `whole` as a percentage rounded to one decimal.
///
/// An empty `whole` yields `0.0`.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !part.is_finite() || !whole.is_finite() {
        return 0.0;
    }
    round1(part / whole * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProgrammeStats {
    pub by_status: BTreeMap<ProgrammeStatus, usize>,
    pub active: usize,
    pub total: usize,
    pub hours_planned: u64,
    pub hours_done: u64,
    /// Done hours over planned hours, in percent.
    pub completion: f64,
}

impl ProgrammeStats {
    pub fn compute(programmes: &[Programme], modules: &[Module]) -> Self {
        let mut by_status = BTreeMap::new();
        for programme in programmes {
            *by_status.entry(programme.status).or_insert(0) += 1;
        }
        let active = programmes.iter().filter(|p| p.status.is_active()).count();

        let hours_planned: u64 = modules.iter().map(|m| u64::from(m.hours_planned)).sum();
        let hours_done: u64 = modules
            .iter()
            .map(|m| u64::from(m.hours_done.min(m.hours_planned)))
            .sum();

        Self {
            by_status,
            active,
            total: programmes.len(),
            hours_planned,
            hours_done,
            completion: percentage(hours_done as f64, hours_planned as f64),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QualitySummary {
    /// Evaluations with a rating from 1 to 5; others are left out.
    pub evaluations: usize,
    /// Mean rating rounded to one decimal; `0.0` without evaluations.
    pub average_rating: f64,
    /// Number of evaluations per rating, 1 to 5.
    pub distribution: BTreeMap<u8, usize>,
    pub modules_evaluated: usize,
    /// Evaluated modules over all modules, in percent.
    pub coverage: f64,
}

impl QualitySummary {
    pub fn compute(evaluations: &[Evaluation], modules: &[Module]) -> Self {
        let mut distribution: BTreeMap<u8, usize> = (1..=5).map(|rating| (rating, 0)).collect();
        let mut rated = Vec::with_capacity(evaluations.len());
        let mut valid = Vec::with_capacity(evaluations.len());
        for evaluation in evaluations {
            if !(1..=5).contains(&evaluation.rating) {
                log::warn!(
                    "Skipping evaluation {} with out-of-range rating {}",
                    evaluation.id,
                    evaluation.rating
                );
                continue;
            }
            *distribution.entry(evaluation.rating).or_insert(0) += 1;
            rated.push(f64::from(evaluation.rating));
            valid.push(evaluation);
        }

        let average_rating = if rated.is_empty() {
            0.0
        } else {
            round1(rated.iter().sum::<f64>() / rated.len() as f64)
        };

        let known = modules.iter().map(|m| m.id).collect::<HashSet<_>>();
        let modules_evaluated = valid
            .iter()
            .map(|e| e.module_id)
            .filter(|id| known.contains(id))
            .collect::<HashSet<_>>()
            .len();

        Self {
            evaluations: valid.len(),
            average_rating,
            distribution,
            modules_evaluated,
            coverage: percentage(modules_evaluated as f64, modules.len() as f64),
        }
    }
}
