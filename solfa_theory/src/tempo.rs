// Tempo marks: the named tempos offered by the trainer and the clamping
// rule for custom BPM entry.

use serde::{Deserialize, Serialize};

/// The named tempo marks, slowest first.
pub const TEMPO_NAMES: &[(&str, u16)] = &[
    ("Largo", 45),
    ("Adagio", 60),
    ("Andante", 90),
    ("Moderato", 108),
    ("Allegro", 132),
    ("Presto", 168),
];

/// Label used when a custom BPM matches no named mark.
pub const CUSTOM_TEMPO_NAME: &str = "Custom";

pub const MIN_BPM: u16 = 30;
pub const MAX_BPM: u16 = 300;

/// A tempo selection: a display name plus its BPM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tempo {
    pub name: String,
    pub bpm: u16,
}

impl Tempo {
    /// Look up a named tempo mark.
    pub fn named(name: &str) -> Option<Tempo> {
        TEMPO_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(n, bpm)| Tempo {
                name: n.to_string(),
                bpm,
            })
    }

    /// Build a tempo from a raw BPM: clamp to the supported range, and take
    /// a mark's name when the BPM coincides with one.
    pub fn from_bpm(bpm: u16) -> Tempo {
        let bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        let name = TEMPO_NAMES
            .iter()
            .find(|&&(_, b)| b == bpm)
            .map(|&(n, _)| n)
            .unwrap_or(CUSTOM_TEMPO_NAME);
        Tempo {
            name: name.to_string(),
            bpm,
        }
    }

    /// The default exercise tempo.
    pub fn moderato() -> Tempo {
        Tempo {
            name: "Moderato".to_string(),
            bpm: 108,
        }
    }

    /// Seconds one quarter beat lasts at this tempo.
    pub fn seconds_per_quarter(&self) -> f64 {
        60.0 / self.bpm as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo::moderato()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup() {
        let largo = Tempo::named("Largo").unwrap();
        assert_eq!(largo.bpm, 45);
        assert!(Tempo::named("Prestissimo").is_none());
    }

    #[test]
    fn from_bpm_clamps_and_renames() {
        assert_eq!(Tempo::from_bpm(10).bpm, MIN_BPM);
        assert_eq!(Tempo::from_bpm(999).bpm, MAX_BPM);
        assert_eq!(Tempo::from_bpm(132).name, "Allegro");
        assert_eq!(Tempo::from_bpm(133).name, CUSTOM_TEMPO_NAME);
    }

    #[test]
    fn quarter_length() {
        let moderato = Tempo::moderato();
        assert!((moderato.seconds_per_quarter() - 60.0 / 108.0).abs() < 1e-12);
    }
}
