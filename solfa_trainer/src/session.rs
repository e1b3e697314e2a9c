// The practice session: answer/review state machine, history, scoring.
//
// All mutable quiz state lives here, behind methods — the generation cores
// stay pure. One exercise is "current" (the cursor); answering it appends
// nothing, it just records the pick and tallies the score. Stepping back
// through history puts the session in read-only review: selection and
// controls lock, only navigation and replay remain.
//
// Reveal mode shows solutions while it is on; an exercise that was ever
// visible in reveal mode does not count toward the score, even if reveal
// was switched off before answering.
//
// Sessions serialize to JSON in full (catalog included), so a saved file
// reproduces the exact quiz state it was written from.

use crate::exercise::{Category, RhythmExercise};
use rand::Rng;
use serde::{Deserialize, Serialize};
use solfa_rhythm::catalog::Catalog;
use solfa_rhythm::meter::TimeSignature;
use solfa_theory::tempo::Tempo;
use std::path::Path;

/// Correct/total tally for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

/// Per-category score tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub notes: Score,
    pub keys: Score,
    pub intervals: Score,
    pub rhythm: Score,
}

impl Scoreboard {
    pub fn get(&self, category: Category) -> Score {
        match category {
            Category::Notes => self.notes,
            Category::Keys => self.keys,
            Category::Intervals => self.intervals,
            Category::Rhythm => self.rhythm,
        }
    }

    fn entry(&mut self, category: Category) -> &mut Score {
        match category {
            Category::Notes => &mut self.notes,
            Category::Keys => &mut self.keys,
            Category::Intervals => &mut self.intervals,
            Category::Rhythm => &mut self.rhythm,
        }
    }
}

/// Lifecycle state of the exercise under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseState {
    /// Choices shown, selection enabled.
    Unanswered,
    /// Selection locked, result revealed.
    Answered,
    /// An older history entry: everything locked except replay.
    ReadOnlyReview,
}

/// One learner's practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub catalog: Catalog,
    /// Signatures exercises are drawn from. Never empty.
    active_signatures: Vec<TimeSignature>,
    /// Tempo applied to newly generated exercises.
    pub tempo: Tempo,
    /// While on, solutions are visible and nothing is scored.
    reveal_mode: bool,
    /// True if reveal mode was on at any point during the current exercise.
    revealed_current: bool,
    history: Vec<RhythmExercise>,
    cursor: usize,
    pub scoreboard: Scoreboard,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Session {
            catalog,
            active_signatures: vec![TimeSignature::FourFour],
            tempo: Tempo::moderato(),
            reveal_mode: false,
            revealed_current: false,
            history: Vec::new(),
            cursor: 0,
            scoreboard: Scoreboard::default(),
        }
    }

    pub fn current(&self) -> Option<&RhythmExercise> {
        self.history.get(self.cursor)
    }

    /// True while the cursor sits on an older history entry.
    pub fn in_review(&self) -> bool {
        !self.history.is_empty() && self.cursor + 1 < self.history.len()
    }

    pub fn state(&self) -> ExerciseState {
        if self.in_review() {
            ExerciseState::ReadOnlyReview
        } else if self.current().is_some_and(|e| e.is_answered()) {
            ExerciseState::Answered
        } else {
            ExerciseState::Unanswered
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_signatures(&self) -> &[TimeSignature] {
        &self.active_signatures
    }

    pub fn reveal_mode(&self) -> bool {
        self.reveal_mode
    }

    /// Append a fresh exercise and move the cursor to it. Any entries ahead
    /// of the cursor are dropped, so generating from mid-review starts a
    /// new forward branch.
    pub fn next_exercise(&mut self, rng: &mut impl Rng) {
        let exercise = self.draw_exercise(rng);
        if !self.history.is_empty() {
            self.history.truncate(self.cursor + 1);
        }
        self.history.push(exercise);
        self.cursor = self.history.len() - 1;
        self.revealed_current = self.reveal_mode;
    }

    /// Replace the current exercise with a fresh one. Allowed only while it
    /// is the latest entry and still unanswered.
    pub fn refresh(&mut self, rng: &mut impl Rng) -> bool {
        if self.in_review() || self.history.is_empty() {
            return false;
        }
        if self.history[self.cursor].is_answered() {
            return false;
        }
        let exercise = self.draw_exercise(rng);
        self.history[self.cursor] = exercise;
        self.revealed_current = self.reveal_mode;
        true
    }

    fn draw_exercise(&self, rng: &mut impl Rng) -> RhythmExercise {
        let signature =
            self.active_signatures[rng.random_range(0..self.active_signatures.len())];
        RhythmExercise::generate(&self.catalog, signature, self.tempo.clone(), rng)
    }

    /// Record the learner's choice on the current exercise. Returns
    /// Some(correct) when the answer was accepted; None when the session is
    /// in review, the exercise is already answered, or the index is out of
    /// range. Scoring is skipped for reveal-tainted exercises.
    pub fn answer(&mut self, choice: usize) -> Option<bool> {
        if self.in_review() {
            return None;
        }
        let scored = !self.revealed_current;
        let exercise = self.history.get_mut(self.cursor)?;
        if exercise.is_answered() || choice >= exercise.choices.len() {
            return None;
        }
        exercise.answered = Some(choice);
        let correct = choice == exercise.correct;
        if scored {
            self.scoreboard.entry(Category::Rhythm).record(correct);
        }
        Some(correct)
    }

    /// Step to the previous history entry.
    pub fn back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step toward the latest history entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Toggle a signature in the draw set; the set never empties. Locked
    /// while the current exercise is answered or under review.
    pub fn toggle_signature(&mut self, signature: TimeSignature) -> bool {
        if self.state() != ExerciseState::Unanswered {
            return false;
        }
        if let Some(position) = self
            .active_signatures
            .iter()
            .position(|&s| s == signature)
        {
            if self.active_signatures.len() == 1 {
                return false;
            }
            self.active_signatures.remove(position);
        } else {
            self.active_signatures.push(signature);
        }
        true
    }

    /// Set the tempo from a BPM value (clamped, renamed when it matches a
    /// mark). The current exercise follows along while it is unanswered.
    /// Locked in review.
    pub fn set_tempo_bpm(&mut self, bpm: u16) -> bool {
        if self.in_review() {
            return false;
        }
        self.tempo = Tempo::from_bpm(bpm);
        if let Some(exercise) = self.history.get_mut(self.cursor) {
            if !exercise.is_answered() {
                exercise.tempo = self.tempo.clone();
            }
        }
        true
    }

    /// Set the tempo by mark name. Unknown names are rejected.
    pub fn set_tempo_named(&mut self, name: &str) -> bool {
        match Tempo::named(name) {
            Some(tempo) => self.set_tempo_bpm(tempo.bpm),
            None => false,
        }
    }

    pub fn set_reveal_mode(&mut self, on: bool) {
        self.reveal_mode = on;
        if on && !self.in_review() {
            self.revealed_current = true;
        }
    }

    /// Record a drill result for a non-rhythm category. Reveal mode
    /// suppresses scoring here too.
    pub fn record_drill(&mut self, category: Category, correct: bool) {
        if !self.reveal_mode {
            self.scoreboard.entry(category).record(correct);
        }
    }

    /// Write the full session as JSON.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a session from JSON, validating the embedded catalog.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&data)?;
        session.catalog.validate()?;
        if session.active_signatures.is_empty() {
            return Err("session has no active signatures".into());
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session_with_exercise(seed: u64) -> (Session, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new(Catalog::builtin());
        session.next_exercise(&mut rng);
        (session, rng)
    }

    #[test]
    fn answering_locks_the_exercise_and_scores_it() {
        let (mut session, _rng) = session_with_exercise(1);
        assert_eq!(session.state(), ExerciseState::Unanswered);

        let correct_index = session.current().unwrap().correct;
        assert_eq!(session.answer(correct_index), Some(true));
        assert_eq!(session.state(), ExerciseState::Answered);
        assert_eq!(session.scoreboard.rhythm.correct, 1);
        assert_eq!(session.scoreboard.rhythm.total, 1);

        // Second answer is rejected and the recorded pick stays.
        assert_eq!(session.answer(0), None);
        assert_eq!(session.current().unwrap().answered, Some(correct_index));
    }

    #[test]
    fn wrong_answers_count_toward_total_only() {
        let (mut session, _rng) = session_with_exercise(2);
        let wrong_index = (session.current().unwrap().correct + 1)
            % session.current().unwrap().choices.len();
        assert_eq!(session.answer(wrong_index), Some(false));
        assert_eq!(session.scoreboard.rhythm.correct, 0);
        assert_eq!(session.scoreboard.rhythm.total, 1);
    }

    #[test]
    fn review_locks_answering_refresh_and_toggles() {
        let (mut session, mut rng) = session_with_exercise(3);
        let first_correct = session.current().unwrap().correct;
        session.answer(first_correct);
        session.next_exercise(&mut rng);

        assert!(session.back());
        assert_eq!(session.state(), ExerciseState::ReadOnlyReview);
        assert_eq!(session.answer(0), None);
        assert!(!session.refresh(&mut rng));
        assert!(!session.toggle_signature(TimeSignature::SixEight));
        assert!(!session.set_tempo_bpm(60));

        assert!(session.forward());
        assert_eq!(session.state(), ExerciseState::Unanswered);
    }

    #[test]
    fn refresh_replaces_only_the_latest_unanswered_exercise() {
        let (mut session, mut rng) = session_with_exercise(4);
        assert!(session.refresh(&mut rng));
        assert_eq!(session.history_len(), 1);

        let correct = session.current().unwrap().correct;
        session.answer(correct);
        assert!(!session.refresh(&mut rng), "answered exercises are fixed");
    }

    #[test]
    fn reveal_mode_suppresses_scoring_even_after_switching_off() {
        let (mut session, _rng) = session_with_exercise(5);
        session.set_reveal_mode(true);
        session.set_reveal_mode(false);
        let correct = session.current().unwrap().correct;
        assert_eq!(session.answer(correct), Some(true));
        assert_eq!(session.scoreboard.rhythm.total, 0);
    }

    #[test]
    fn reveal_mode_clears_on_the_next_exercise() {
        let (mut session, mut rng) = session_with_exercise(6);
        session.set_reveal_mode(true);
        session.set_reveal_mode(false);
        let correct = session.current().unwrap().correct;
        session.answer(correct);

        session.next_exercise(&mut rng);
        let correct = session.current().unwrap().correct;
        session.answer(correct);
        assert_eq!(session.scoreboard.rhythm.total, 1);
    }

    #[test]
    fn signature_set_never_empties() {
        let (mut session, _rng) = session_with_exercise(7);
        assert_eq!(session.active_signatures(), &[TimeSignature::FourFour]);
        assert!(!session.toggle_signature(TimeSignature::FourFour));
        assert!(session.toggle_signature(TimeSignature::NineEight));
        assert!(session.toggle_signature(TimeSignature::FourFour));
        assert_eq!(session.active_signatures(), &[TimeSignature::NineEight]);
    }

    #[test]
    fn tempo_follows_the_current_unanswered_exercise() {
        let (mut session, _rng) = session_with_exercise(8);
        assert!(session.set_tempo_bpm(45));
        assert_eq!(session.tempo.name, "Largo");
        assert_eq!(session.current().unwrap().tempo.bpm, 45);

        assert!(session.set_tempo_named("Presto"));
        assert_eq!(session.current().unwrap().tempo.bpm, 168);
        assert!(!session.set_tempo_named("NoSuchMark"));
    }

    #[test]
    fn exercises_draw_only_from_active_signatures() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new(Catalog::builtin());
        session.toggle_signature(TimeSignature::SixEight);
        session.toggle_signature(TimeSignature::FourFour);
        for _ in 0..20 {
            session.next_exercise(&mut rng);
            assert_eq!(
                session.current().unwrap().signature,
                TimeSignature::SixEight
            );
        }
    }

    #[test]
    fn forward_history_is_dropped_when_generating_from_review() {
        let (mut session, mut rng) = session_with_exercise(10);
        let correct = session.current().unwrap().correct;
        session.answer(correct);
        session.next_exercise(&mut rng);
        session.back();

        session.next_exercise(&mut rng);
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.state(), ExerciseState::Unanswered);
    }

    #[test]
    fn save_and_load_round_trip() {
        let (mut session, _rng) = session_with_exercise(11);
        let correct = session.current().unwrap().correct;
        session.answer(correct);

        let path = std::env::temp_dir().join("solfa_session_roundtrip.json");
        session.save(&path).unwrap();
        let loaded = Session::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.history_len(), session.history_len());
        assert_eq!(loaded.cursor(), session.cursor());
        assert_eq!(loaded.scoreboard, session.scoreboard);
        assert_eq!(
            loaded.current().unwrap().choices,
            session.current().unwrap().choices
        );
    }

    #[test]
    fn same_seed_reproduces_the_same_session() {
        let build = || {
            let mut rng = StdRng::seed_from_u64(77);
            let mut session = Session::new(Catalog::builtin());
            session.toggle_signature(TimeSignature::ThreeFour);
            for _ in 0..10 {
                session.next_exercise(&mut rng);
                let correct = session.current().unwrap().correct;
                session.answer(correct);
            }
            session
        };
        let a = build();
        let b = build();
        assert_eq!(a.history_len(), b.history_len());
        for i in 0..a.history_len() {
            assert_eq!(a.history[i], b.history[i]);
        }
    }
}
