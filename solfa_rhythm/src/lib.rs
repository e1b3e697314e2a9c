// Rhythm exercise engine.
//
// Generates one-measure rhythmic sequences for multiple-choice quizzes:
// a measure is composed of hand-authored motifs drawn from a catalog, the
// composition always fills the requested time signature exactly, and wrong
// answers are produced by rejection sampling against the correct sequence.
//
// Architecture:
// - catalog.rs: Duration vocabulary, `RhythmItem`, and the six motif buckets
//   (built-in tables, JSON-overridable)
// - meter.rs: The five supported time signatures and their tick totals
// - generate.rs: Weighted layout choice + uniform motif fills; all-rest
//   redraw policy
// - distractor.rs: Unique wrong-answer generation with an attempt budget
// - midi.rs: Standard MIDI File export of a sequence for playback
//
// The engine is stateless: every entry point takes its inputs (catalog,
// signature, RNG) explicitly and returns an independent result. Generation
// is deterministic given a seeded RNG.

pub mod catalog;
pub mod distractor;
pub mod generate;
pub mod meter;
pub mod midi;

pub use catalog::{Catalog, Duration, MotifBucket, RhythmItem};
pub use distractor::distractors;
pub use generate::generate;
pub use meter::TimeSignature;
