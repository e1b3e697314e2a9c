// Measure generation: weighted layout choice, then uniform motif fills.
//
// Each signature owns a small table of layouts — ordered lists of motif
// buckets whose nominal lengths sum to the measure. A layout is drawn by
// cumulative-weight threshold against a single uniform roll; the weights
// are hand-tuned to favor musically common groupings (whole-measure motifs
// are deliberately rare). Each slot is then filled with a uniform draw from
// its bucket, and the motifs are concatenated in order.
//
// Because every layout's buckets sum to the measure and every motif fills
// its bucket, the result always fills the measure exactly — no runtime
// length checking is needed.
//
// All-rest results are redrawn: a measure of pure silence is not a usable
// quiz answer. The redraw loop is bounded, with a forced-sounding fallback,
// so termination never depends on the weight configuration.

use crate::catalog::{Catalog, MotifBucket, RhythmItem};
use crate::meter::TimeSignature;
use rand::Rng;

/// Redraw cap for all-rest results. Rest-only motifs are a small minority
/// of every bucket, so the loop almost never runs more than once; the cap
/// plus the forced-sounding fallback make termination unconditional.
pub const MAX_ALL_REST_RETRIES: usize = 20;

/// One way to decompose a measure into ordered motif-bucket slots.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Relative draw weight within the signature's table.
    pub weight: f64,
    /// Bucket picks, in measure order.
    pub slots: &'static [MotifBucket],
}

/// The layout table for a signature. Weights sum to 1.
pub fn layouts(signature: TimeSignature) -> &'static [Layout] {
    use MotifBucket::{CompoundBeat, CompoundMeasure, FourBeat, OneBeat, ThreeBeat, TwoBeat};
    match signature {
        TimeSignature::TwoFour => &[
            Layout { weight: 0.2, slots: &[TwoBeat] },
            Layout { weight: 0.8, slots: &[OneBeat, OneBeat] },
        ],
        TimeSignature::ThreeFour => &[
            Layout { weight: 0.1, slots: &[ThreeBeat] },
            Layout { weight: 0.2, slots: &[TwoBeat, OneBeat] },
            Layout { weight: 0.2, slots: &[OneBeat, TwoBeat] },
            Layout { weight: 0.5, slots: &[OneBeat, OneBeat, OneBeat] },
        ],
        TimeSignature::FourFour => &[
            Layout { weight: 0.1, slots: &[FourBeat] },
            Layout { weight: 0.2, slots: &[TwoBeat, TwoBeat] },
            Layout { weight: 0.2, slots: &[TwoBeat, OneBeat, OneBeat] },
            Layout { weight: 0.2, slots: &[OneBeat, OneBeat, TwoBeat] },
            Layout { weight: 0.3, slots: &[OneBeat, OneBeat, OneBeat, OneBeat] },
        ],
        TimeSignature::SixEight => &[
            Layout { weight: 0.1, slots: &[CompoundMeasure] },
            Layout { weight: 0.9, slots: &[CompoundBeat, CompoundBeat] },
        ],
        TimeSignature::NineEight => &[
            Layout { weight: 0.2, slots: &[CompoundMeasure, CompoundBeat] },
            Layout { weight: 0.2, slots: &[CompoundBeat, CompoundMeasure] },
            Layout { weight: 0.6, slots: &[CompoundBeat, CompoundBeat, CompoundBeat] },
        ],
    }
}

/// Pick a layout by cumulative-weight threshold against a uniform roll in
/// [0, 1). The roll is a parameter so tests can force a branch.
pub fn choose_layout(signature: TimeSignature, roll: f64) -> &'static [MotifBucket] {
    let table = layouts(signature);
    let total: f64 = table.iter().map(|layout| layout.weight).sum();
    let target = roll * total;
    let mut cumulative = 0.0;
    for layout in table {
        cumulative += layout.weight;
        if cumulative > target {
            return layout.slots;
        }
    }
    // Roll landed on the cumulative tail (roll ~ 1.0 with weights summing
    // just under it); the last layout takes it.
    table[table.len() - 1].slots
}

/// Generate a sequence that exactly fills the signature's measure.
///
/// All-rest results are redrawn up to [`MAX_ALL_REST_RETRIES`] times; if
/// the cap is ever exhausted, the final attempt draws its first slot from
/// the sounding motifs of its bucket, so the result is never pure silence.
pub fn generate(
    catalog: &Catalog,
    signature: TimeSignature,
    rng: &mut impl Rng,
) -> Vec<RhythmItem> {
    for _ in 0..MAX_ALL_REST_RETRIES {
        let sequence = generate_once(catalog, signature, rng);
        if !sequence.iter().all(|item| item.is_rest) {
            return sequence;
        }
    }

    let slots = choose_layout(signature, rng.random());
    let mut sequence = Vec::new();
    for (slot, &bucket) in slots.iter().enumerate() {
        let motif = if slot == 0 {
            catalog.pick_sounding(bucket, rng)
        } else {
            catalog.pick(bucket, rng)
        };
        sequence.extend_from_slice(motif);
    }
    sequence
}

/// One unchecked draw: choose a layout, fill every slot uniformly.
fn generate_once(
    catalog: &Catalog,
    signature: TimeSignature,
    rng: &mut impl Rng,
) -> Vec<RhythmItem> {
    let slots = choose_layout(signature, rng.random());
    let mut sequence = Vec::new();
    for &bucket in slots {
        sequence.extend_from_slice(catalog.pick(bucket, rng));
    }
    sequence
}
