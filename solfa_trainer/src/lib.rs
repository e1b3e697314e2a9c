// Trainer session layer.
//
// Sits between the stateless generation cores (`solfa_rhythm`,
// `solfa_theory`) and whatever front end drives the quiz. Owns everything
// stateful: the exercise history, the answer/review state machine, the
// per-category scoreboard, and the signature/tempo controls.
//
// Architecture:
// - exercise.rs: One quizzed unit per category — rhythm multiple choice,
//   note reading, key identification, interval hearing.
// - session.rs: The `Session` state machine and JSON persistence.
//
// The cores never see session state; the session passes them a catalog and
// an RNG per call. Seeding that RNG makes a whole session reproducible.

pub mod exercise;
pub mod session;

pub use exercise::{Category, RhythmExercise};
pub use session::{ExerciseState, Session};
