// Wrong-answer generation for the multiple-choice quiz.
//
// Distractors are just more draws from the same generator, filtered for
// uniqueness: a candidate is rejected if it equals the correct sequence or
// any already-accepted distractor. Equality is structural — the ordered
// (duration, is_rest) item list — which derived `PartialEq` gives directly.
//
// The loop is budgeted: with a sparse catalog the space of distinct
// sequences can be smaller than the requested count, so after the attempt
// budget the caller gets a shorter list instead of a hang. The correct
// sequence is read-only context and is never modified.

use crate::catalog::{Catalog, RhythmItem};
use crate::generate::generate;
use crate::meter::TimeSignature;
use rand::Rng;

/// Total candidate draws allowed per call.
pub const ATTEMPT_BUDGET: usize = 50;

/// Generate up to `count` sequences for `signature`, all structurally
/// distinct from `correct` and from each other. Returns fewer than `count`
/// when the attempt budget runs out; never errors.
pub fn distractors(
    catalog: &Catalog,
    correct: &[RhythmItem],
    signature: TimeSignature,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<RhythmItem>> {
    let mut wrong: Vec<Vec<RhythmItem>> = Vec::new();
    let mut attempts = 0;
    while wrong.len() < count && attempts < ATTEMPT_BUDGET {
        attempts += 1;
        let candidate = generate(catalog, signature, rng);
        if candidate.as_slice() != correct && !wrong.contains(&candidate) {
            wrong.push(candidate);
        }
    }
    wrong
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Duration, sequence_ticks};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn distractors_for_a_six_eight_measure() {
        // Correct answer: two dotted quarters filling a 6/8 measure.
        let correct = vec![
            RhythmItem::note(Duration::DottedQuarter),
            RhythmItem::note(Duration::DottedQuarter),
        ];
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        let wrong = distractors(&catalog, &correct, TimeSignature::SixEight, 3, &mut rng);

        assert_eq!(wrong.len(), 3);
        for candidate in &wrong {
            assert!((sequence_ticks(candidate) - 3.0).abs() < 1e-9);
            assert_ne!(candidate, &correct);
        }
        assert_ne!(wrong[0], wrong[1]);
        assert_ne!(wrong[0], wrong[2]);
        assert_ne!(wrong[1], wrong[2]);
    }

    #[test]
    fn never_returns_the_correct_sequence_or_a_duplicate() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(12);
        for signature in TimeSignature::ALL {
            for _ in 0..50 {
                let correct = generate(&catalog, signature, &mut rng);
                let wrong = distractors(&catalog, &correct, signature, 3, &mut rng);
                for (i, candidate) in wrong.iter().enumerate() {
                    assert_ne!(candidate, &correct);
                    for other in &wrong[i + 1..] {
                        assert_ne!(candidate, other);
                    }
                }
            }
        }
    }

    #[test]
    fn starved_catalog_returns_a_short_list() {
        // With one motif per bucket, 2/4 admits exactly two distinct
        // sequences — so at most one distractor can exist.
        let mut catalog = Catalog::builtin();
        catalog.one_beat = vec![vec![RhythmItem::note(Duration::Quarter)]];
        catalog.two_beat = vec![vec![RhythmItem::note(Duration::Half)]];
        catalog.validate().expect("still a valid catalog");

        let correct = vec![RhythmItem::note(Duration::Half)];
        let mut rng = StdRng::seed_from_u64(13);
        let wrong = distractors(&catalog, &correct, TimeSignature::TwoFour, 3, &mut rng);
        assert_eq!(wrong.len(), 1);
        assert_eq!(
            wrong[0],
            vec![
                RhythmItem::note(Duration::Quarter),
                RhythmItem::note(Duration::Quarter)
            ]
        );
    }

    #[test]
    fn count_zero_returns_empty_without_drawing() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(14);
        let correct = generate(&catalog, TimeSignature::FourFour, &mut rng);
        let wrong = distractors(&catalog, &correct, TimeSignature::FourFour, 0, &mut rng);
        assert!(wrong.is_empty());
    }
}
