// Exercise assembly: one quizzed unit per practice category.
//
// Each exercise type pairs the material to quiz with the learner's answer
// slot. Exercises are built from random draws against the static tables and
// the rhythm engine, then never mutated except to record the answer.
//
// The rhythm exercise is the multiple-choice one: a correct sequence is
// shuffled into its distractors at a random index. Distractor starvation
// (a short list) is tolerated — the choice list just ends up smaller.

use rand::Rng;
use serde::{Deserialize, Serialize};
use solfa_rhythm::catalog::{Catalog, RhythmItem};
use solfa_rhythm::distractor;
use solfa_rhythm::generate;
use solfa_rhythm::meter::TimeSignature;
use solfa_theory::intervals::{self, INTERVALS};
use solfa_theory::keys::{KeyData, MAJOR_KEYS, MINOR_KEYS, MinorVariant, Mode, find_key};
use solfa_theory::note::{Accidental, Letter, Pitch};
use solfa_theory::tempo::Tempo;

/// Practice categories tracked by the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Notes,
    Keys,
    Intervals,
    Rhythm,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Notes,
        Category::Keys,
        Category::Intervals,
        Category::Rhythm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Notes => "notes",
            Category::Keys => "keys",
            Category::Intervals => "intervals",
            Category::Rhythm => "rhythm",
        }
    }
}

/// Wrong alternatives requested per rhythm exercise.
pub const DISTRACTOR_COUNT: usize = 3;

/// One multiple-choice rhythm question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmExercise {
    pub signature: TimeSignature,
    pub tempo: Tempo,
    /// All alternatives in presentation order, the correct one included.
    pub choices: Vec<Vec<RhythmItem>>,
    /// Index of the correct alternative within `choices`.
    pub correct: usize,
    /// The learner's pick, recorded once.
    pub answered: Option<usize>,
}

impl RhythmExercise {
    /// Build a fresh question: generate the correct sequence, draw its
    /// distractors, and insert the correct answer at a uniform random
    /// position.
    pub fn generate(
        catalog: &Catalog,
        signature: TimeSignature,
        tempo: Tempo,
        rng: &mut impl Rng,
    ) -> Self {
        let sequence = generate::generate(catalog, signature, rng);
        let mut choices =
            distractor::distractors(catalog, &sequence, signature, DISTRACTOR_COUNT, rng);
        let correct = rng.random_range(0..=choices.len());
        choices.insert(correct, sequence);
        RhythmExercise {
            signature,
            tempo,
            choices,
            correct,
            answered: None,
        }
    }

    pub fn correct_sequence(&self) -> &[RhythmItem] {
        &self.choices[self.correct]
    }

    pub fn is_answered(&self) -> bool {
        self.answered.is_some()
    }
}

/// Staff clef for the note-reading drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    pub fn label(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }
}

/// Staff pitches shown per note-reading drill.
pub const NOTE_SEQUENCE_LEN: usize = 8;

/// Note-reading drill: name a run of staff pitches one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteExercise {
    pub clef: Clef,
    /// Distinct natural pitches in the clef's reading range.
    pub pitches: Vec<Pitch>,
    /// Position of the next pitch to name.
    pub position: usize,
}

impl NoteExercise {
    /// Draw eight distinct naturals in the clef's two-octave reading range.
    pub fn generate(clef: Clef, rng: &mut impl Rng) -> Self {
        let mut pitches: Vec<Pitch> = Vec::new();
        while pitches.len() < NOTE_SEQUENCE_LEN {
            let letter = Letter::ALL[rng.random_range(0..Letter::ALL.len())];
            let octave: i8 = match clef {
                Clef::Treble => rng.random_range(4..6),
                Clef::Bass => rng.random_range(2..4),
            };
            let pitch = Pitch::new(letter, Accidental::Natural, octave);
            if !pitches.contains(&pitch) {
                pitches.push(pitch);
            }
        }
        NoteExercise {
            clef,
            pitches,
            position: 0,
        }
    }

    /// Name the current pitch; every guess advances. Returns None once the
    /// run is complete.
    pub fn guess(&mut self, letter: Letter) -> Option<bool> {
        let current = self.pitches.get(self.position)?;
        let correct = current.letter == letter;
        self.position += 1;
        Some(correct)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.pitches.len()
    }
}

/// Key-identification drill: name the key from its signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyExercise {
    /// Name of the quizzed key ("Bb", "F#m").
    pub key_name: String,
    /// Which minor form the scale is presented in (Natural for major keys).
    pub variant: MinorVariant,
    pub answered: Option<String>,
}

impl KeyExercise {
    /// Draw a key from the active modes, never repeating `previous` when
    /// another option exists. Returns None when `modes` selects nothing.
    pub fn generate(
        modes: &[Mode],
        include_variants: bool,
        previous: Option<&str>,
        rng: &mut impl Rng,
    ) -> Option<Self> {
        let mut pool: Vec<&KeyData> = Vec::new();
        if modes.contains(&Mode::Major) {
            pool.extend(MAJOR_KEYS.iter());
        }
        if modes.contains(&Mode::Minor) {
            pool.extend(MINOR_KEYS.iter());
        }
        if pool.is_empty() {
            return None;
        }
        if pool.len() > 1 {
            if let Some(previous) = previous {
                pool.retain(|key| key.name != previous);
            }
        }
        let key = pool[rng.random_range(0..pool.len())];
        let variant = if include_variants && key.mode == Mode::Minor {
            MinorVariant::ALL[rng.random_range(0..MinorVariant::ALL.len())]
        } else {
            MinorVariant::Natural
        };
        Some(KeyExercise {
            key_name: key.name.to_string(),
            variant,
            answered: None,
        })
    }

    /// The full table entry for the quizzed key.
    pub fn key(&self) -> Option<&'static KeyData> {
        find_key(&self.key_name)
    }

    /// Answer with a key name; case-insensitive. Returns None if already
    /// answered.
    pub fn guess(&mut self, name: &str) -> Option<bool> {
        if self.answered.is_some() {
            return None;
        }
        let name = name.trim();
        self.answered = Some(name.to_string());
        Some(name.eq_ignore_ascii_case(&self.key_name))
    }
}

/// Interval-hearing drill: identify the interval between two pitches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalExercise {
    /// Index into [`INTERVALS`].
    pub interval: usize,
    /// Chromatic index of the base note (sharp spellings).
    pub base: usize,
    pub base_octave: i8,
    /// The learner's pick, as an index into [`INTERVALS`].
    pub answered: Option<usize>,
}

impl IntervalExercise {
    /// Uniform interval over the table, uniform chromatic base at octave 4.
    pub fn generate(rng: &mut impl Rng) -> Self {
        IntervalExercise {
            interval: rng.random_range(0..INTERVALS.len()),
            base: rng.random_range(0..12),
            base_octave: 4,
            answered: None,
        }
    }

    /// (chromatic index, octave) of the upper note.
    pub fn target(&self) -> (usize, i8) {
        intervals::transpose(self.base, self.base_octave, INTERVALS[self.interval].semitones)
    }

    /// Answer with an index into [`INTERVALS`]. Returns None if already
    /// answered.
    pub fn guess(&mut self, interval_index: usize) -> Option<bool> {
        if self.answered.is_some() {
            return None;
        }
        self.answered = Some(interval_index);
        Some(interval_index == self.interval)
    }
}
