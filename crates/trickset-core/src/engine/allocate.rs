//! Shares one card pool between every participating trick.
//!
//! Each trick first receives the same number of sets, the smallest fair
//! target across all of them. Leftover cards are then handed out one set at a
//! time in list order until no trick can take another.

use crate::engine::sets::{self, total_cards};
use crate::model::requirement::Requirement;
use crate::model::trick::Trick;
use serde::{Serialize, Serializer};
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickResult {
    pub name: String,
    pub sets: u32,
    pub cards_used: u32,
    pub requirements: Vec<Requirement>,
}

/// Results keyed by trick name in first-seen order, plus the unallocated
/// remainder of the pool. Serializes `per_trick` as an object keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AllocationResult {
    #[serde(serialize_with = "by_name")]
    pub per_trick: Vec<TrickResult>,
    pub leftover_cards: u32,
}

impl AllocationResult {
    fn empty(total: u32) -> Self {
        Self {
            per_trick: Vec::new(),
            leftover_cards: total,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrickResult> {
        self.per_trick.iter().find(|result| result.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.per_trick.is_empty()
    }

    pub fn total_sets(&self) -> u32 {
        self.per_trick.iter().map(|result| result.sets).sum()
    }

    pub fn total_cards_used(&self) -> u32 {
        self.per_trick.iter().map(|result| result.cards_used).sum()
    }

    /// Later entries replace earlier ones with the same name but keep the
    /// earlier position.
    fn insert(&mut self, result: TrickResult) {
        match self.per_trick.iter_mut().find(|r| r.name == result.name) {
            Some(slot) => *slot = result,
            None => self.per_trick.push(result),
        }
    }
}

fn by_name<S: Serializer>(results: &[TrickResult], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(results.iter().map(|result| (&result.name, result)))
}

/// Stateless entry point; see [`distribute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocator;

impl Allocator {
    pub fn distribute(&self, num_decks: u32, tricks: &[Trick]) -> AllocationResult {
        distribute(num_decks, tricks)
    }
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    trick: &'a Trick,
    cards_per_set: u32,
    max_sets: u32,
    sets: u32,
}

fn eligible(num_decks: u32, tricks: &[Trick]) -> Vec<Candidate<'_>> {
    tricks
        .iter()
        .filter(|trick| trick.participates())
        .filter_map(|trick| {
            let max_sets = sets::compute(num_decks, &trick.requirements).sets;
            (max_sets > 0).then(|| Candidate {
                trick,
                cards_per_set: trick.cards_per_set(),
                max_sets,
                sets: 0,
            })
        })
        .collect()
}

fn min_target(total: u32, candidates: &[Candidate<'_>]) -> u32 {
    let count = candidates.len() as u32;
    let baseline_share = total.checked_div(count).unwrap_or(0);
    candidates
        .iter()
        .map(|c| {
            let fair = baseline_share.checked_div(c.cards_per_set).unwrap_or(0);
            fair.min(c.max_sets)
        })
        .min()
        .unwrap_or(0)
}

/// The uniform set count every eligible trick starts from, or `None` when no
/// trick is eligible.
pub fn fair_baseline(num_decks: u32, tricks: &[Trick]) -> Option<u32> {
    let candidates = eligible(num_decks, tricks);
    if candidates.is_empty() {
        return None;
    }
    Some(min_target(total_cards(num_decks), &candidates))
}

/// Distribute `num_decks * 52` cards across the active tricks.
///
/// Inactive tricks, tricks without requirements and tricks that cannot be
/// built even once are left out of the result. Names are expected to be
/// unique; a repeated name overwrites the earlier entry.
pub fn distribute(num_decks: u32, tricks: &[Trick]) -> AllocationResult {
    let total = total_cards(num_decks);
    let mut candidates = eligible(num_decks, tricks);

    if candidates.is_empty() {
        event!(
            target: "trickset_core::allocate",
            Level::DEBUG,
            num_decks,
            total,
            "no eligible tricks"
        );
        return AllocationResult::empty(total);
    }

    let baseline = min_target(total, &candidates);
    let mut available = total;
    for candidate in candidates.iter_mut() {
        candidate.sets = baseline;
        available -= baseline * candidate.cards_per_set;
    }

    event!(
        target: "trickset_core::allocate",
        Level::DEBUG,
        num_decks,
        eligible = candidates.len(),
        baseline,
        available,
        "fair baseline assigned"
    );

    let mut passes = 0u32;
    loop {
        let mut added = false;
        for candidate in candidates.iter_mut() {
            if candidate.sets < candidate.max_sets && available >= candidate.cards_per_set {
                candidate.sets += 1;
                available -= candidate.cards_per_set;
                added = true;
            }
        }
        if !added {
            break;
        }
        passes += 1;
    }

    event!(
        target: "trickset_core::allocate",
        Level::DEBUG,
        passes,
        leftover = available,
        "top-up finished"
    );

    let mut result = AllocationResult::empty(available);
    for candidate in candidates {
        if result.get(&candidate.trick.name).is_some() {
            tracing::warn!(
                target: "trickset_core::allocate",
                name = %candidate.trick.name,
                "duplicate trick name; later entry replaces earlier result"
            );
        }
        result.insert(TrickResult {
            name: candidate.trick.name.clone(),
            sets: candidate.sets,
            cards_used: candidate.sets * candidate.cards_per_set,
            requirements: candidate.trick.requirements.clone(),
        });
    }
    result
}
