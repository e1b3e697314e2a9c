// Shared music-theory data crate.
//
// Provides the static theory vocabulary used by the trainer's exercise
// generators and display layer. No randomness lives here — exercise drawing
// happens in the trainer crate; this crate only answers questions like
// "what is the scale of E minor" or "what does Eb look like in solfège".
//
// Architecture:
// - `note.rs`: Pitch spelling — `Letter`, `Accidental`, `Pitch` — plus MIDI
//   numbers and equal-tempered frequencies for the audio handoff.
// - `naming.rs`: The letters/solfège naming toggle and display helpers.
// - `keys.rs`: Key-signature tables (major and minor, scales, triads,
//   per-signature accidentals) and the minor-scale variants.
// - `intervals.rs`: The quiz interval table and chromatic transposition.
// - `tempo.rs`: Named tempo marks and BPM clamping.
//
// All tables are hand-authored constants, in entry order the exercises rely
// on. Consumers index into them; nothing here is loaded at runtime.

pub mod intervals;
pub mod keys;
pub mod naming;
pub mod note;
pub mod tempo;

// Re-export the types almost every consumer needs.
pub use keys::{KeyData, MinorVariant, Mode};
pub use naming::NamingSystem;
pub use note::{Accidental, Letter, Pitch};
pub use tempo::Tempo;
