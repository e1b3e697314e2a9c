// Key-signature tables: the keys the trainer quizzes, with their scales,
// triads, and signature accidentals.
//
// The tables are hand-authored constants covering the keys up to four
// sharps/flats in major plus their common relative and parallel minors —
// the range a beginning theory student drills. Scales are spelled with
// octaves so a staff renderer can place them directly.
//
// Minor keys are stored with their natural scale; `minor_scale_variant`
// derives the harmonic (raised 7) and melodic (raised 6 and 7) forms.

use crate::note::{Accidental, Letter, Pitch};
use serde::{Deserialize, Serialize};

/// Major or minor tonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

/// The three forms of the minor scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinorVariant {
    Natural,
    Harmonic,
    Melodic,
}

impl MinorVariant {
    pub const ALL: [MinorVariant; 3] = [
        MinorVariant::Natural,
        MinorVariant::Harmonic,
        MinorVariant::Melodic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MinorVariant::Natural => "natural",
            MinorVariant::Harmonic => "harmonic",
            MinorVariant::Melodic => "melodic",
        }
    }
}

/// One quizzable key: display name, the key signature it is written in,
/// tonality, one-octave scale, and tonic triad.
#[derive(Debug, Clone)]
pub struct KeyData {
    /// Display name ("C", "Bb", "F#m").
    pub name: &'static str,
    /// The key signature the key borrows ("Em" is written with the "G"
    /// signature). Feed this to `signature_accidentals`.
    pub signature: &'static str,
    pub mode: Mode,
    /// Ascending one-octave scale, tonic to tonic.
    pub scale: [Pitch; 8],
    /// Tonic triad in root position.
    pub triad: [Pitch; 3],
}

const fn n(letter: Letter, octave: i8) -> Pitch {
    Pitch::new(letter, Accidental::Natural, octave)
}

const fn s(letter: Letter, octave: i8) -> Pitch {
    Pitch::new(letter, Accidental::Sharp, octave)
}

const fn f(letter: Letter, octave: i8) -> Pitch {
    Pitch::new(letter, Accidental::Flat, octave)
}

use Letter::{A, B, C, D, E, F, G};

/// The major keys in quiz rotation, C through four accidentals either way.
pub const MAJOR_KEYS: &[KeyData] = &[
    KeyData {
        name: "C",
        signature: "C",
        mode: Mode::Major,
        scale: [n(C, 4), n(D, 4), n(E, 4), n(F, 4), n(G, 4), n(A, 4), n(B, 4), n(C, 5)],
        triad: [n(C, 4), n(E, 4), n(G, 4)],
    },
    KeyData {
        name: "G",
        signature: "G",
        mode: Mode::Major,
        scale: [n(G, 3), n(A, 3), n(B, 3), n(C, 4), n(D, 4), n(E, 4), s(F, 4), n(G, 4)],
        triad: [n(G, 3), n(B, 3), n(D, 4)],
    },
    KeyData {
        name: "D",
        signature: "D",
        mode: Mode::Major,
        scale: [n(D, 4), n(E, 4), s(F, 4), n(G, 4), n(A, 4), n(B, 4), s(C, 5), n(D, 5)],
        triad: [n(D, 4), s(F, 4), n(A, 4)],
    },
    KeyData {
        name: "A",
        signature: "A",
        mode: Mode::Major,
        scale: [n(A, 3), n(B, 3), s(C, 4), n(D, 4), n(E, 4), s(F, 4), s(G, 4), n(A, 4)],
        triad: [n(A, 3), s(C, 4), n(E, 4)],
    },
    KeyData {
        name: "E",
        signature: "E",
        mode: Mode::Major,
        scale: [n(E, 4), s(F, 4), s(G, 4), n(A, 4), n(B, 4), s(C, 5), s(D, 5), n(E, 5)],
        triad: [n(E, 4), s(G, 4), n(B, 4)],
    },
    KeyData {
        name: "F",
        signature: "F",
        mode: Mode::Major,
        scale: [n(F, 4), n(G, 4), n(A, 4), f(B, 4), n(C, 5), n(D, 5), n(E, 5), n(F, 5)],
        triad: [n(F, 4), n(A, 4), n(C, 5)],
    },
    KeyData {
        name: "Bb",
        signature: "Bb",
        mode: Mode::Major,
        scale: [f(B, 3), n(C, 4), n(D, 4), f(E, 4), n(F, 4), n(G, 4), n(A, 4), f(B, 4)],
        triad: [f(B, 3), n(D, 4), n(F, 4)],
    },
    KeyData {
        name: "Eb",
        signature: "Eb",
        mode: Mode::Major,
        scale: [f(E, 4), n(F, 4), n(G, 4), f(A, 4), f(B, 4), n(C, 5), n(D, 5), f(E, 5)],
        triad: [f(E, 4), n(G, 4), f(B, 4)],
    },
    KeyData {
        name: "Ab",
        signature: "Ab",
        mode: Mode::Major,
        scale: [f(A, 3), f(B, 3), n(C, 4), f(D, 4), f(E, 4), n(F, 4), n(G, 4), f(A, 4)],
        triad: [f(A, 3), n(C, 4), f(E, 4)],
    },
];

/// The minor keys in quiz rotation, stored in natural-minor spelling.
pub const MINOR_KEYS: &[KeyData] = &[
    KeyData {
        name: "Am",
        signature: "C",
        mode: Mode::Minor,
        scale: [n(A, 3), n(B, 3), n(C, 4), n(D, 4), n(E, 4), n(F, 4), n(G, 4), n(A, 4)],
        triad: [n(A, 3), n(C, 4), n(E, 4)],
    },
    KeyData {
        name: "Em",
        signature: "G",
        mode: Mode::Minor,
        scale: [n(E, 4), s(F, 4), n(G, 4), n(A, 4), n(B, 4), n(C, 5), n(D, 5), n(E, 5)],
        triad: [n(E, 4), n(G, 4), n(B, 4)],
    },
    KeyData {
        name: "Bm",
        signature: "D",
        mode: Mode::Minor,
        scale: [n(B, 3), s(C, 4), n(D, 4), n(E, 4), s(F, 4), n(G, 4), n(A, 4), n(B, 4)],
        triad: [n(B, 3), n(D, 4), s(F, 4)],
    },
    KeyData {
        name: "F#m",
        signature: "A",
        mode: Mode::Minor,
        scale: [s(F, 3), s(G, 3), n(A, 3), n(B, 3), s(C, 4), n(D, 4), n(E, 4), s(F, 4)],
        triad: [s(F, 3), n(A, 3), s(C, 4)],
    },
    KeyData {
        name: "Dm",
        signature: "F",
        mode: Mode::Minor,
        scale: [n(D, 4), n(E, 4), n(F, 4), n(G, 4), n(A, 4), f(B, 4), n(C, 5), n(D, 5)],
        triad: [n(D, 4), n(F, 4), n(A, 4)],
    },
    KeyData {
        name: "Gm",
        signature: "Bb",
        mode: Mode::Minor,
        scale: [n(G, 3), n(A, 3), f(B, 3), n(C, 4), n(D, 4), f(E, 4), n(F, 4), n(G, 4)],
        triad: [n(G, 3), f(B, 3), n(D, 4)],
    },
    KeyData {
        name: "Cm",
        signature: "Eb",
        mode: Mode::Minor,
        scale: [n(C, 4), n(D, 4), f(E, 4), n(F, 4), n(G, 4), f(A, 4), f(B, 4), n(C, 5)],
        triad: [n(C, 4), f(E, 4), n(G, 4)],
    },
    KeyData {
        name: "Fm",
        signature: "Ab",
        mode: Mode::Minor,
        scale: [n(F, 3), n(G, 3), f(A, 3), f(B, 3), n(C, 4), f(D, 4), f(E, 4), n(F, 4)],
        triad: [n(F, 3), f(A, 3), n(C, 4)],
    },
];

/// Look up a key by display name in either table.
pub fn find_key(name: &str) -> Option<&'static KeyData> {
    MAJOR_KEYS
        .iter()
        .chain(MINOR_KEYS.iter())
        .find(|k| k.name == name)
}

// Sharps and flats enter a signature in fixed order.
const SHARP_ORDER: [Letter; 7] = [F, C, G, D, A, E, B];
const FLAT_ORDER: [Letter; 7] = [B, E, A, D, G, C, F];

/// Signed accidental count of a key signature: positive = sharps,
/// negative = flats. Unknown names count as zero (C).
pub fn signature_alteration(signature: &str) -> i8 {
    match signature {
        "G" => 1,
        "D" => 2,
        "A" => 3,
        "E" => 4,
        "B" => 5,
        "F#" => 6,
        "C#" => 7,
        "F" => -1,
        "Bb" => -2,
        "Eb" => -3,
        "Ab" => -4,
        "Db" => -5,
        "Gb" => -6,
        "Cb" => -7,
        _ => 0,
    }
}

/// The letters a key signature alters, in signature order, with the
/// alteration applied ("D" -> [(F, Sharp), (C, Sharp)]).
pub fn signature_accidentals(signature: &str) -> Vec<(Letter, Accidental)> {
    let count = signature_alteration(signature);
    if count >= 0 {
        SHARP_ORDER[..count as usize]
            .iter()
            .map(|&letter| (letter, Accidental::Sharp))
            .collect()
    } else {
        FLAT_ORDER[..(-count) as usize]
            .iter()
            .map(|&letter| (letter, Accidental::Flat))
            .collect()
    }
}

/// Derive a minor-scale variant from the stored natural form: harmonic
/// raises degree 7, melodic raises degrees 6 and 7 (ascending form).
pub fn minor_scale_variant(scale: &[Pitch; 8], variant: MinorVariant) -> [Pitch; 8] {
    let mut result = *scale;
    match variant {
        MinorVariant::Natural => {}
        MinorVariant::Harmonic => {
            result[6] = result[6].raised();
        }
        MinorVariant::Melodic => {
            result[5] = result[5].raised();
            result[6] = result[6].raised();
        }
    }
    result
}
