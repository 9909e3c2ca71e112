use crate::engine::allocate::{self, AllocationResult};
use crate::engine::sets::{self, SetCount};
use crate::model::card::{format_cards, format_grouped};
use crate::model::trick::Trick;
use serde::Serialize;
use std::fmt;

/// Example faces never show more than one suit's worth of cards.
const EXAMPLE_LIMIT: u32 = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndividualResult {
    pub name: String,
    #[serde(flatten)]
    pub count: SetCount,
}

/// Everything the calculate action shows: each trick on its own, then the
/// shared allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub num_decks: u32,
    pub individual: Vec<IndividualResult>,
    pub allocation: AllocationResult,
}

impl Report {
    pub fn build(num_decks: u32, tricks: &[Trick]) -> Self {
        let individual = tricks
            .iter()
            .filter(|trick| trick.participates())
            .map(|trick| IndividualResult {
                name: trick.name.clone(),
                count: sets::compute(num_decks, &trick.requirements),
            })
            .collect();
        Self {
            num_decks,
            individual,
            allocation: allocate::distribute(num_decks, tricks),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn example_faces(count: u32) -> Vec<usize> {
    (0..count.min(EXAMPLE_LIMIT) as usize).collect()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INDIVIDUAL CALCULATIONS")?;
        for entry in &self.individual {
            writeln!(f, "{}:", entry.name)?;
            writeln!(f, "Possible Sets: {}", entry.count.sets)?;
            writeln!(f, "Remaining Cards: {}", entry.count.remaining)?;
        }

        writeln!(f)?;
        writeln!(f, "OPTIMAL COMBINATION OF ALL TRICKSETS")?;
        let allocation = &self.allocation;
        if allocation.is_empty() {
            return writeln!(f, "No possible combinations found.");
        }

        for entry in &allocation.per_trick {
            writeln!(f, "{}", entry.name)?;
            writeln!(f, "Possible Sets: {}", entry.sets)?;
            writeln!(f, "Cards Used: {}", entry.cards_used)?;
            writeln!(f, "Requirements (example cards):")?;
            for req in entry.requirements.iter().filter(|req| req.is_identical()) {
                writeln!(f, "{} identical cards", req.count)?;
                writeln!(f, "{}", format_cards(&example_faces(req.count)))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "SUMMARY")?;
        writeln!(f, "Total Number of Sets: {}", allocation.total_sets())?;
        writeln!(f, "Total Cards Used: {}", allocation.total_cards_used())?;
        writeln!(f, "Remaining Cards: {}", allocation.leftover_cards)?;
        if allocation.leftover_cards > 0 {
            writeln!(f)?;
            writeln!(f, "Example remaining cards:")?;
            writeln!(
                f,
                "{}",
                format_grouped(&example_faces(allocation.leftover_cards))
            )?;
        }
        Ok(())
    }
}
