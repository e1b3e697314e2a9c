// Motif catalog: the fixed building blocks measures are composed from.
//
// A motif is a short sequence of notes and rests with a known total length
// in quarter-beat ticks. Motifs are grouped into buckets by that length and
// by meter class: simple meters (2/4, 3/4, 4/4) draw from the 1/2/3/4-beat
// buckets, compound meters (6/8, 9/8) from the 1.5-tick beat bucket and the
// 3-tick full-group bucket.
//
// Every motif in a bucket totals exactly the bucket's nominal length. For
// the built-in tables this holds by construction (and a test walks the whole
// catalog); JSON-loaded replacements are validated on load.
//
// Ticks are derived from the duration symbol, never stored, so an item can
// not carry an inconsistent length.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Symbolic note duration. Serialized as the renderer token ("q", "8d", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    #[serde(rename = "w")]
    Whole,
    #[serde(rename = "h")]
    Half,
    #[serde(rename = "hd")]
    DottedHalf,
    #[serde(rename = "q")]
    Quarter,
    #[serde(rename = "qd")]
    DottedQuarter,
    #[serde(rename = "8")]
    Eighth,
    #[serde(rename = "8d")]
    DottedEighth,
    #[serde(rename = "16")]
    Sixteenth,
}

impl Duration {
    /// Length in quarter-beat ticks. Dotted values are 1.5x their base.
    pub fn ticks(self) -> f64 {
        match self {
            Duration::Whole => 4.0,
            Duration::Half => 2.0,
            Duration::DottedHalf => 3.0,
            Duration::Quarter => 1.0,
            Duration::DottedQuarter => 1.5,
            Duration::Eighth => 0.5,
            Duration::DottedEighth => 0.75,
            Duration::Sixteenth => 0.25,
        }
    }

    /// Renderer token for this duration.
    pub fn code(self) -> &'static str {
        match self {
            Duration::Whole => "w",
            Duration::Half => "h",
            Duration::DottedHalf => "hd",
            Duration::Quarter => "q",
            Duration::DottedQuarter => "qd",
            Duration::Eighth => "8",
            Duration::DottedEighth => "8d",
            Duration::Sixteenth => "16",
        }
    }
}

/// One atomic note-or-rest event. Immutable value data: created by the
/// catalog, consumed read-only by rendering and playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RhythmItem {
    pub duration: Duration,
    #[serde(default)]
    pub is_rest: bool,
}

impl RhythmItem {
    pub const fn note(duration: Duration) -> Self {
        RhythmItem {
            duration,
            is_rest: false,
        }
    }

    pub const fn rest(duration: Duration) -> Self {
        RhythmItem {
            duration,
            is_rest: true,
        }
    }

    /// Tick length, always consistent with the duration.
    pub fn ticks(self) -> f64 {
        self.duration.ticks()
    }
}

impl fmt::Display for RhythmItem {
    /// Duration code, with an 'r' suffix for rests ("q", "8r").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rest {
            write!(f, "{}r", self.duration.code())
        } else {
            write!(f, "{}", self.duration.code())
        }
    }
}

/// Total tick length of a sequence.
pub fn sequence_ticks(sequence: &[RhythmItem]) -> f64 {
    sequence.iter().map(|item| item.ticks()).sum()
}

/// Compact one-line label for a sequence: "q 8 8r h".
pub fn sequence_label(sequence: &[RhythmItem]) -> String {
    sequence
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The six motif groups, keyed by nominal tick length and meter class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotifBucket {
    /// 1.0 ticks, simple meters.
    OneBeat,
    /// 2.0 ticks, simple meters.
    TwoBeat,
    /// 3.0 ticks, simple meters (3/4, 4/4).
    ThreeBeat,
    /// 4.0 ticks, 4/4 only.
    FourBeat,
    /// 1.5 ticks, one compound beat (6/8, 9/8).
    CompoundBeat,
    /// 3.0 ticks, two compound beats — a full 6/8 measure or two thirds
    /// of 9/8.
    CompoundMeasure,
}

impl MotifBucket {
    pub const ALL: [MotifBucket; 6] = [
        MotifBucket::OneBeat,
        MotifBucket::TwoBeat,
        MotifBucket::ThreeBeat,
        MotifBucket::FourBeat,
        MotifBucket::CompoundBeat,
        MotifBucket::CompoundMeasure,
    ];

    /// Tick length every motif in this bucket must total.
    pub fn nominal_ticks(self) -> f64 {
        match self {
            MotifBucket::OneBeat => 1.0,
            MotifBucket::TwoBeat => 2.0,
            MotifBucket::ThreeBeat => 3.0,
            MotifBucket::FourBeat => 4.0,
            MotifBucket::CompoundBeat => 1.5,
            MotifBucket::CompoundMeasure => 3.0,
        }
    }
}

use Duration::{DottedEighth, DottedHalf, DottedQuarter, Eighth, Half, Quarter, Sixteenth, Whole};

const fn n(duration: Duration) -> RhythmItem {
    RhythmItem::note(duration)
}

const fn r(duration: Duration) -> RhythmItem {
    RhythmItem::rest(duration)
}

/// 1-beat motifs for the simple meters. The quarter note and quarter rest
/// lead the table; generation relies on that ordering for its sounding
/// fallback and tests pin it.
const ONE_BEAT: &[&[RhythmItem]] = &[
    &[n(Quarter)],
    &[r(Quarter)],
    &[n(Eighth), n(Eighth)],
    &[r(Eighth), n(Eighth)],
    &[n(DottedEighth), n(Sixteenth)],
    &[n(Sixteenth), n(Sixteenth), n(Eighth)],
    &[n(Eighth), n(Sixteenth), n(Sixteenth)],
    &[n(Sixteenth), n(Eighth), n(Sixteenth)],
    &[n(Sixteenth), n(Sixteenth), n(Sixteenth), n(Sixteenth)],
];

/// 2-beat motifs for the simple meters.
const TWO_BEAT: &[&[RhythmItem]] = &[
    &[n(Half)],
    &[r(Half)],
    &[n(DottedQuarter), n(Eighth)],
    &[n(Eighth), n(Quarter), n(Eighth)],
];

/// 3-beat motifs for 3/4 and 4/4.
const THREE_BEAT: &[&[RhythmItem]] = &[&[n(DottedHalf)], &[r(DottedHalf)]];

/// 4-beat motifs, 4/4 only.
const FOUR_BEAT: &[&[RhythmItem]] = &[&[n(Whole)], &[r(Whole)]];

/// 1.5-tick motifs for the compound meters: one dotted beat's worth.
const COMPOUND_BEAT: &[&[RhythmItem]] = &[
    &[n(DottedQuarter)],
    &[r(DottedQuarter)],
    &[n(Quarter), n(Eighth)],
    &[n(Eighth), n(Eighth), n(Eighth)],
    &[r(Eighth), n(Eighth), n(Eighth)],
    &[n(Eighth), r(Eighth), n(Eighth)],
    &[n(Eighth), n(Eighth), r(Eighth)],
    &[n(DottedEighth), n(Sixteenth), n(Eighth)],
    &[n(Sixteenth), n(Sixteenth), n(Eighth), n(Eighth)],
    &[n(Eighth), n(Sixteenth), n(Sixteenth), n(Eighth)],
    &[n(Eighth), n(Eighth), n(Sixteenth), n(Sixteenth)],
    &[n(Sixteenth), n(Sixteenth), n(Sixteenth), n(Sixteenth), n(Eighth)],
    &[n(Eighth), n(Sixteenth), n(Sixteenth), n(Sixteenth), n(Sixteenth)],
    &[n(Sixteenth), n(Sixteenth), n(Eighth), n(Sixteenth), n(Sixteenth)],
    &[
        n(Sixteenth),
        n(Sixteenth),
        n(Sixteenth),
        n(Sixteenth),
        n(Sixteenth),
        n(Sixteenth),
    ],
];

/// 3-tick motifs for the compound meters.
const COMPOUND_MEASURE: &[&[RhythmItem]] = &[&[n(DottedHalf)], &[r(DottedHalf)]];

#[allow(dead_code)]
fn bucket_table(bucket: MotifBucket) -> &'static [&'static [RhythmItem]] {
    match bucket {
        MotifBucket::OneBeat => ONE_BEAT,
        MotifBucket::TwoBeat => TWO_BEAT,
        MotifBucket::ThreeBeat => THREE_BEAT,
        MotifBucket::FourBeat => FOUR_BEAT,
        MotifBucket::CompoundBeat => COMPOUND_BEAT,
        MotifBucket::CompoundMeasure => COMPOUND_MEASURE,
    }
}

/// A complete motif catalog: one motif table per bucket.
///
/// `builtin()` is the hand-authored default; a JSON file in the same shape
/// can replace it via `load()`, which validates bucket sums. Generation
/// takes the catalog by reference, so replacing the tables never touches
/// the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub one_beat: Vec<Vec<RhythmItem>>,
    pub two_beat: Vec<Vec<RhythmItem>>,
    pub three_beat: Vec<Vec<RhythmItem>>,
    pub four_beat: Vec<Vec<RhythmItem>>,
    pub compound_beat: Vec<Vec<RhythmItem>>,
    pub compound_measure: Vec<Vec<RhythmItem>>,
}

impl Catalog {
    /// The built-in motif tables.
    pub fn builtin() -> Self {
        let to_vecs = |table: &[&[RhythmItem]]| table.iter().map(|m| m.to_vec()).collect();
        Catalog {
            one_beat: to_vecs(ONE_BEAT),
            two_beat: to_vecs(TWO_BEAT),
            three_beat: to_vecs(THREE_BEAT),
            four_beat: to_vecs(FOUR_BEAT),
            compound_beat: to_vecs(COMPOUND_BEAT),
            compound_measure: to_vecs(COMPOUND_MEASURE),
        }
    }

    /// Load a replacement catalog from JSON and validate it.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&data)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every bucket is non-empty, every motif fills its bucket,
    /// and every bucket has at least one motif that makes a sound.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        for bucket in MotifBucket::ALL {
            let motifs = self.motifs(bucket);
            if motifs.is_empty() {
                return Err(format!("bucket {bucket:?} is empty").into());
            }
            for (i, motif) in motifs.iter().enumerate() {
                let total = sequence_ticks(motif);
                if (total - bucket.nominal_ticks()).abs() > 1e-9 {
                    return Err(format!(
                        "motif {i} in bucket {bucket:?} totals {total} ticks, expected {}",
                        bucket.nominal_ticks()
                    )
                    .into());
                }
            }
            if !motifs.iter().any(|m| m.iter().any(|item| !item.is_rest)) {
                return Err(format!("bucket {bucket:?} has no sounding motif").into());
            }
        }
        Ok(())
    }

    /// The motif table for a bucket.
    pub fn motifs(&self, bucket: MotifBucket) -> &[Vec<RhythmItem>] {
        match bucket {
            MotifBucket::OneBeat => &self.one_beat,
            MotifBucket::TwoBeat => &self.two_beat,
            MotifBucket::ThreeBeat => &self.three_beat,
            MotifBucket::FourBeat => &self.four_beat,
            MotifBucket::CompoundBeat => &self.compound_beat,
            MotifBucket::CompoundMeasure => &self.compound_measure,
        }
    }

    /// Uniform draw from a bucket.
    pub fn pick(&self, bucket: MotifBucket, rng: &mut impl Rng) -> &[RhythmItem] {
        let motifs = self.motifs(bucket);
        &motifs[rng.random_range(0..motifs.len())]
    }

    /// Uniform draw among the bucket's motifs that contain at least one
    /// note. Falls back to a plain draw if the bucket somehow has none
    /// (validated catalogs always have one).
    pub fn pick_sounding(&self, bucket: MotifBucket, rng: &mut impl Rng) -> &[RhythmItem] {
        let motifs = self.motifs(bucket);
        let sounding: Vec<&Vec<RhythmItem>> = motifs
            .iter()
            .filter(|m| m.iter().any(|item| !item.is_rest))
            .collect();
        if sounding.is_empty() {
            return self.pick(bucket, rng);
        }
        sounding[rng.random_range(0..sounding.len())]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}
