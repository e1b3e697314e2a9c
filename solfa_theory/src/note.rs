// Pitch spelling: letter names, accidentals, and fully spelled pitches.
//
// A `Pitch` is a spelled note (letter + accidental + octave), not a bare
// MIDI number — key exercises care about spelling (F# and Gb are different
// answers even though they sound the same). MIDI numbers and frequencies are
// derived on demand for the audio handoff.
//
// Octaves are scientific pitch notation: C4 is middle C (MIDI 60).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven letter names, in C-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitones above C for the natural letter.
    pub fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }

    /// Parse a single letter name ("C".."B", case-insensitive).
    pub fn parse(input: &str) -> Option<Letter> {
        match input.trim().to_ascii_uppercase().as_str() {
            "C" => Some(Letter::C),
            "D" => Some(Letter::D),
            "E" => Some(Letter::E),
            "F" => Some(Letter::F),
            "G" => Some(Letter::G),
            "A" => Some(Letter::A),
            "B" => Some(Letter::B),
            _ => None,
        }
    }
}

/// Chromatic alteration of a letter. Double alterations only arise from
/// raising an already-sharp scale degree (melodic minor in sharp keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset this accidental applies (-2..=2).
    pub fn offset(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// ASCII suffix as written after a letter name ("", "#", "b", ...).
    pub fn suffix(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

/// A fully spelled pitch: letter, accidental, and octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(letter: Letter, accidental: Accidental, octave: i8) -> Self {
        Pitch {
            letter,
            accidental,
            octave,
        }
    }

    /// MIDI note number (C4 = 60).
    pub fn midi(self) -> u8 {
        let value = (self.octave as i16 + 1) * 12
            + self.letter.semitone() as i16
            + self.accidental.offset() as i16;
        value as u8
    }

    /// Equal-tempered frequency in Hz (A4 = 440).
    pub fn frequency(self) -> f64 {
        frequency(self.midi())
    }

    /// Raise by a chromatic semitone without changing the letter: a flat
    /// resolves to natural (Eb -> E), anything else gains a sharp
    /// (C -> C#, C# -> C##). Used for the harmonic/melodic minor degrees.
    pub fn raised(self) -> Pitch {
        let accidental = match self.accidental {
            Accidental::DoubleFlat => Accidental::Flat,
            Accidental::Flat => Accidental::Natural,
            Accidental::Natural => Accidental::Sharp,
            Accidental::Sharp => Accidental::DoubleSharp,
            // Already at the top of the supported range; leave unchanged.
            Accidental::DoubleSharp => Accidental::DoubleSharp,
        };
        Pitch { accidental, ..self }
    }
}

impl fmt::Display for Pitch {
    /// Renderer key form: "C#/4", "Bb/3".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}",
            self.letter.name(),
            self.accidental.suffix(),
            self.octave
        )
    }
}

/// Equal-tempered frequency of a MIDI note number (A4 = 69 = 440 Hz).
pub fn frequency(midi: u8) -> f64 {
    440.0 * f64::powf(2.0, (midi as f64 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_midi_60() {
        let c4 = Pitch::new(Letter::C, Accidental::Natural, 4);
        assert_eq!(c4.midi(), 60);
    }

    #[test]
    fn accidentals_shift_midi_number() {
        let cs4 = Pitch::new(Letter::C, Accidental::Sharp, 4);
        let db4 = Pitch::new(Letter::D, Accidental::Flat, 4);
        assert_eq!(cs4.midi(), 61);
        assert_eq!(db4.midi(), 61);
        assert_ne!(cs4, db4, "enharmonic pitches stay distinct spellings");
    }

    #[test]
    fn raised_resolves_flats_and_sharpens_the_rest() {
        let eb = Pitch::new(Letter::E, Accidental::Flat, 4);
        assert_eq!(eb.raised().accidental, Accidental::Natural);

        let c = Pitch::new(Letter::C, Accidental::Natural, 4);
        assert_eq!(c.raised().accidental, Accidental::Sharp);

        let cs = Pitch::new(Letter::C, Accidental::Sharp, 5);
        assert_eq!(cs.raised().accidental, Accidental::DoubleSharp);
    }

    #[test]
    fn display_matches_renderer_keys() {
        assert_eq!(
            Pitch::new(Letter::F, Accidental::Sharp, 4).to_string(),
            "F#/4"
        );
        assert_eq!(
            Pitch::new(Letter::B, Accidental::Flat, 3).to_string(),
            "Bb/3"
        );
        assert_eq!(
            Pitch::new(Letter::G, Accidental::Natural, 5).to_string(),
            "G/5"
        );
    }

    #[test]
    fn a4_is_440() {
        let a4 = Pitch::new(Letter::A, Accidental::Natural, 4);
        assert!((a4.frequency() - 440.0).abs() < 1e-9);
    }

    #[test]
    fn letter_parse_accepts_lowercase() {
        assert_eq!(Letter::parse("g"), Some(Letter::G));
        assert_eq!(Letter::parse(" B "), Some(Letter::B));
        assert_eq!(Letter::parse("H"), None);
    }
}
