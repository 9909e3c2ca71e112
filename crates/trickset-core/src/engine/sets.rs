//! Per-trick capacity: how many complete sets one trick could build from the
//! whole pool if it had it to itself.

use crate::model::card::FACES_PER_DECK;
use crate::model::requirement::{Requirement, cards_per_set};
use serde::Serialize;

/// Adjacent face-index pairs in the 52-slot space, used by the equal-pair rule.
pub const NUMBER_PAIRS: u32 = (FACES_PER_DECK / 2) as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SetCount {
    pub sets: u32,
    pub remaining: u32,
}

impl From<SetCount> for (u32, u32) {
    fn from(value: SetCount) -> Self {
        (value.sets, value.remaining)
    }
}

/// Largest pool whose card total still fits in a `u32`.
pub const MAX_DECKS: u32 = u32::MAX / FACES_PER_DECK as u32;

/// Cards in a pool of `num_decks` decks.
///
/// # Panics
///
/// Panics when `num_decks` exceeds [`MAX_DECKS`].
pub const fn total_cards(num_decks: u32) -> u32 {
    assert!(num_decks <= MAX_DECKS, "deck count exceeds MAX_DECKS");
    num_decks * FACES_PER_DECK as u32
}

/// Stateless entry point; see [`compute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCalculator;

impl SetCalculator {
    pub fn compute(&self, num_decks: u32, requirements: &[Requirement]) -> SetCount {
        compute(num_decks, requirements)
    }
}

/// Maximum number of complete sets for one requirement bundle and the cards
/// left over afterwards.
///
/// Callers guarantee `1 <= num_decks <= MAX_DECKS` and every `count >= 1`. Only
/// identical requirements draw from the pool; `Any` entries are carried for
/// display. An identical count larger than `num_decks` can never be met
/// because no face has that many copies, so the bundle yields nothing.
///
/// Exactly two identical requirements of equal count `k` use the pair rule:
/// `num_decks / k` sets per number pair times 26 pairs.
pub fn compute(num_decks: u32, requirements: &[Requirement]) -> SetCount {
    let total = total_cards(num_decks);
    let nothing = SetCount {
        sets: 0,
        remaining: total,
    };

    if requirements.is_empty() {
        return nothing;
    }

    let identical: Vec<u32> = requirements
        .iter()
        .filter(|req| req.is_identical())
        .map(|req| req.count)
        .collect();

    if identical.iter().any(|&count| count > num_decks) {
        return nothing;
    }

    let per_set = cards_per_set(requirements);
    if per_set == 0 {
        return nothing;
    }

    let sets = match identical.as_slice() {
        [a, b] if a == b => (num_decks / a) * NUMBER_PAIRS,
        _ => total / per_set,
    };

    SetCount {
        sets,
        remaining: total - sets * per_set,
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_DECKS, SetCalculator, SetCount, compute, total_cards};
    use crate::model::requirement::Requirement;

    #[test]
    fn empty_requirements_leave_whole_pool() {
        for decks in 1..=8 {
            assert_eq!(
                compute(decks, &[]),
                SetCount {
                    sets: 0,
                    remaining: decks * 52
                }
            );
        }
    }

    #[test]
    fn four_of_a_kind_across_six_decks() {
        let result = compute(6, &[Requirement::identical(4)]);
        assert_eq!(<(u32, u32)>::from(result), (78, 0));
    }

    #[test]
    fn identical_count_above_deck_count_is_infeasible() {
        let reqs = [Requirement::identical(2), Requirement::identical(7)];
        assert_eq!(compute(6, &reqs), SetCount { sets: 0, remaining: 312 });
        assert_eq!(
            compute(1, &[Requirement::identical(2), Requirement::any(1)]),
            SetCount { sets: 0, remaining: 52 }
        );
    }

    #[test]
    fn equal_pair_with_too_few_decks_yields_nothing() {
        let reqs = [Requirement::identical(2), Requirement::identical(2)];
        assert_eq!(compute(1, &reqs), SetCount { sets: 0, remaining: 52 });
    }

    #[test]
    fn equal_pair_counts_number_pairs() {
        let reqs = [Requirement::identical(4), Requirement::identical(4)];
        let result = compute(6, &reqs);
        assert_eq!(result.sets, 26);
        assert_eq!(result.remaining, 312 - 26 * 8);
    }

    #[test]
    fn unequal_pair_uses_general_rule() {
        let reqs = [Requirement::identical(2), Requirement::identical(3)];
        assert_eq!(compute(6, &reqs), SetCount { sets: 62, remaining: 2 });
    }

    #[test]
    fn three_equal_identicals_use_general_rule() {
        let reqs = [Requirement::identical(2); 3];
        assert_eq!(compute(2, &reqs), SetCount { sets: 17, remaining: 2 });
    }

    #[test]
    fn any_only_bundles_guard_division() {
        let reqs = [Requirement::any(3), Requirement::any(1)];
        assert_eq!(compute(4, &reqs), SetCount { sets: 0, remaining: 208 });
    }

    #[test]
    fn any_requirements_do_not_consume_cards() {
        let with_any = compute(3, &[Requirement::identical(3), Requirement::any(10)]);
        let without = compute(3, &[Requirement::identical(3)]);
        assert_eq!(with_any, without);
    }

    #[test]
    fn calculator_matches_free_function_and_is_repeatable() {
        let reqs = [Requirement::identical(3), Requirement::any(2)];
        let calc = SetCalculator;
        let first = calc.compute(5, &reqs);
        assert_eq!(first, calc.compute(5, &reqs));
        assert_eq!(first, compute(5, &reqs));
        assert_eq!(first.sets * 3 + first.remaining, total_cards(5));
    }

    #[test]
    fn largest_pool_still_counts_exactly() {
        assert_eq!(MAX_DECKS, 82_595_524);
        let result = compute(MAX_DECKS, &[Requirement::identical(4)]);
        assert_eq!(result.sets, 1_073_741_812);
        assert_eq!(result.remaining, 0);
        assert_eq!(total_cards(MAX_DECKS), 4_294_967_248);
    }

    #[test]
    #[should_panic(expected = "deck count exceeds MAX_DECKS")]
    fn oversized_pool_fails_loudly() {
        compute(MAX_DECKS + 1, &[Requirement::identical(4)]);
    }
}
