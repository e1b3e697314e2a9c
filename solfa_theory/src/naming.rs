// Note-naming systems: letter names vs. fixed-do solfège.
//
// The trainer can display every note and key in either system; the toggle
// is pure presentation and never changes what an exercise stores. Solfège
// uses the fixed-do convention (C is always Do) with '#' for sharps and the
// flat sign for flats, matching common European workbook spelling.

use crate::keys::Mode;
use crate::note::{Accidental, Letter};
use serde::{Deserialize, Serialize};

/// Which naming system the display layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingSystem {
    Letters,
    Solfege,
}

/// Fixed-do solfège syllable for a letter.
pub fn solfege(letter: Letter) -> &'static str {
    match letter {
        Letter::C => "Do",
        Letter::D => "Re",
        Letter::E => "Mi",
        Letter::F => "Fa",
        Letter::G => "Sol",
        Letter::A => "La",
        Letter::B => "Si",
    }
}

/// Spell a note in the requested system: "Eb" / "Mi♭", "C#" / "Do#".
pub fn spell(letter: Letter, accidental: Accidental, system: NamingSystem) -> String {
    match system {
        NamingSystem::Letters => format!("{}{}", letter.name(), accidental.suffix()),
        NamingSystem::Solfege => {
            let suffix = match accidental {
                Accidental::DoubleFlat => "♭♭",
                Accidental::Flat => "♭",
                Accidental::Natural => "",
                Accidental::Sharp => "#",
                Accidental::DoubleSharp => "##",
            };
            format!("{}{}", solfege(letter), suffix)
        }
    }
}

/// Display name for a key. Letters keep the table spelling, lowercased for
/// minor ("C", "cm"); solfège spells the tonic and marks minor with "m"
/// ("Do", "Do m").
pub fn key_display(name: &str, mode: Mode, system: NamingSystem) -> String {
    let base = name.trim_end_matches('m');
    match system {
        NamingSystem::Letters => match mode {
            Mode::Major => base.to_string(),
            Mode::Minor => format!("{}m", base.to_lowercase()),
        },
        NamingSystem::Solfege => {
            let spelled = spell_name(base);
            match mode {
                Mode::Major => spelled,
                Mode::Minor => format!("{spelled} m"),
            }
        }
    }
}

/// Respell a letter-system note name ("F#", "Bb") in solfège.
fn spell_name(base: &str) -> String {
    let mut chars = base.chars();
    let letter = chars
        .next()
        .and_then(|c| Letter::parse(&c.to_string()))
        .unwrap_or(Letter::C);
    let accidental = match chars.as_str() {
        "#" => Accidental::Sharp,
        "b" => Accidental::Flat,
        _ => Accidental::Natural,
    };
    spell(letter, accidental, NamingSystem::Solfege)
}
