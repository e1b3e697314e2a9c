// Time signatures: the five meters the trainer supports.
//
// The enumeration is closed by design — everything downstream (layout
// tables, tick totals, beat counts) is total over it, so a signature that
// parsed successfully can never fail later. Compound meters (6/8, 9/8)
// group their beats in dotted units of 1.5 quarter-beat ticks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported meter. Serialized in display form ("2/4", "6/8", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSignature {
    #[serde(rename = "2/4")]
    TwoFour,
    #[serde(rename = "3/4")]
    ThreeFour,
    #[serde(rename = "4/4")]
    FourFour,
    #[serde(rename = "6/8")]
    SixEight,
    #[serde(rename = "9/8")]
    NineEight,
}

impl TimeSignature {
    pub const ALL: [TimeSignature; 5] = [
        TimeSignature::TwoFour,
        TimeSignature::ThreeFour,
        TimeSignature::FourFour,
        TimeSignature::SixEight,
        TimeSignature::NineEight,
    ];

    /// Total measure length in quarter-beat ticks.
    pub fn total_ticks(self) -> f64 {
        match self {
            TimeSignature::TwoFour => 2.0,
            TimeSignature::ThreeFour => 3.0,
            TimeSignature::FourFour => 4.0,
            TimeSignature::SixEight => 3.0,
            TimeSignature::NineEight => 4.5,
        }
    }

    /// Compound meters group beats in dotted units (1.5 ticks per beat).
    pub fn is_compound(self) -> bool {
        matches!(self, TimeSignature::SixEight | TimeSignature::NineEight)
    }

    /// Conducted beats per measure (6/8 is felt in two, 9/8 in three).
    pub fn beats_per_measure(self) -> usize {
        match self {
            TimeSignature::TwoFour => 2,
            TimeSignature::ThreeFour => 3,
            TimeSignature::FourFour => 4,
            TimeSignature::SixEight => 2,
            TimeSignature::NineEight => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSignature::TwoFour => "2/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::FourFour => "4/4",
            TimeSignature::SixEight => "6/8",
            TimeSignature::NineEight => "9/8",
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a signature string outside the supported five.
#[derive(Debug, Clone)]
pub struct ParseTimeSignatureError {
    input: String,
}

impl fmt::Display for ParseTimeSignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported time signature '{}' (expected one of 2/4, 3/4, 4/4, 6/8, 9/8)",
            self.input
        )
    }
}

impl std::error::Error for ParseTimeSignatureError {}

impl FromStr for TimeSignature {
    type Err = ParseTimeSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2/4" => Ok(TimeSignature::TwoFour),
            "3/4" => Ok(TimeSignature::ThreeFour),
            "4/4" => Ok(TimeSignature::FourFour),
            "6/8" => Ok(TimeSignature::SixEight),
            "9/8" => Ok(TimeSignature::NineEight),
            other => Err(ParseTimeSignatureError {
                input: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_totals() {
        let expected = [2.0, 3.0, 4.0, 3.0, 4.5];
        for (signature, total) in TimeSignature::ALL.iter().zip(expected) {
            assert!((signature.total_ticks() - total).abs() < 1e-9);
        }
    }

    #[test]
    fn compound_meters_are_whole_multiples_of_the_dotted_beat() {
        for signature in TimeSignature::ALL {
            if signature.is_compound() {
                let beats = signature.total_ticks() / 1.5;
                assert!((beats - beats.round()).abs() < 1e-9, "{signature}");
                assert_eq!(beats.round() as usize, signature.beats_per_measure());
            }
        }
    }

    #[test]
    fn parse_round_trips_display() {
        for signature in TimeSignature::ALL {
            let parsed: TimeSignature = signature.to_string().parse().unwrap();
            assert_eq!(parsed, signature);
        }
        assert!("5/4".parse::<TimeSignature>().is_err());
    }

    #[test]
    fn serde_uses_display_form() {
        let json = serde_json::to_string(&TimeSignature::SixEight).unwrap();
        assert_eq!(json, "\"6/8\"");
        let back: TimeSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeSignature::SixEight);
    }
}
