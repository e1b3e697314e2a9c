// Solfa trainer — CLI entry point.
//
// Runs an interactive quiz over stdin in one of the four practice
// categories. Rhythm questions print their choice lists as duration codes
// ("q 8 8r h"); the other categories drill the static theory tables.
//
// Usage:
//   solfa [--category rhythm|notes|keys|intervals] [--questions N]
//     [--seed N] [--signatures 4/4,6/8] [--tempo BPM]
//     [--naming letters|solfege] [--midi-dir DIR] [--save FILE]
//
// With --seed the whole run is reproducible; with --midi-dir every rhythm
// question's correct sequence is written as a .mid file for playback.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use solfa_rhythm::catalog::{Catalog, RhythmItem, sequence_label};
use solfa_rhythm::meter::TimeSignature;
use solfa_rhythm::midi::write_midi;
use solfa_theory::intervals::{CHROMATIC, INTERVALS};
use solfa_theory::keys::{Mode, minor_scale_variant, signature_accidentals};
use solfa_theory::naming::{NamingSystem, solfege};
use solfa_theory::note::Letter;
use solfa_trainer::exercise::{Category, Clef, IntervalExercise, KeyExercise, NoteExercise};
use solfa_trainer::session::Session;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed: Option<u64> = parse_flag(&args, "--seed");
    let questions: usize = parse_flag(&args, "--questions").unwrap_or(10);
    let tempo_bpm: Option<u16> = parse_flag(&args, "--tempo");
    let category_name: String =
        parse_flag(&args, "--category").unwrap_or_else(|| "rhythm".to_string());
    let naming = match parse_flag::<String>(&args, "--naming").as_deref() {
        Some("letters") => NamingSystem::Letters,
        _ => NamingSystem::Solfege,
    };
    let signatures_arg: Option<String> = parse_flag(&args, "--signatures");
    let midi_dir: Option<PathBuf> = parse_flag::<String>(&args, "--midi-dir").map(PathBuf::from);
    let save_path: Option<PathBuf> = parse_flag::<String>(&args, "--save").map(PathBuf::from);

    let mut rng = if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_os_rng()
    };

    let mut session = Session::new(Catalog::builtin());
    if let Some(list) = &signatures_arg {
        apply_signatures(&mut session, list);
    }
    if let Some(bpm) = tempo_bpm {
        session.set_tempo_bpm(bpm);
    }

    println!("=== Solfa Trainer ===");
    println!("Category: {category_name}");
    println!(
        "Signatures: {}",
        session
            .active_signatures()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Tempo: {} (♩={})", session.tempo.name, session.tempo.bpm);
    if let Some(seed) = seed {
        println!("Seed: {seed}");
    }

    if let Some(dir) = &midi_dir {
        if let Err(error) = std::fs::create_dir_all(dir) {
            eprintln!("Could not create {}: {error}", dir.display());
        }
    }

    match category_name.as_str() {
        "rhythm" => run_rhythm(&mut session, &mut rng, questions, midi_dir.as_deref()),
        "notes" => run_notes(&mut session, &mut rng, questions, naming),
        "keys" => run_keys(&mut session, &mut rng, questions),
        "intervals" => run_intervals(&mut session, &mut rng, questions),
        other => {
            eprintln!("Unknown category '{other}' (rhythm, notes, keys, intervals).");
            std::process::exit(1);
        }
    }

    print_scores(&session);

    if let Some(path) = &save_path {
        match session.save(path) {
            Ok(()) => println!("Session saved to {}.", path.display()),
            Err(error) => eprintln!("Could not save session: {error}"),
        }
    }
}

/// Multiple-choice rhythm quiz: pick the notation that matches the measure.
fn run_rhythm(
    session: &mut Session,
    rng: &mut StdRng,
    questions: usize,
    midi_dir: Option<&Path>,
) {
    for number in 1..=questions {
        session.next_exercise(rng);
        let Some(exercise) = session.current() else {
            return;
        };
        let header = format!(
            "Question {number}/{questions}  [{} | {} ♩={}]",
            exercise.signature, exercise.tempo.name, exercise.tempo.bpm
        );
        let labels: Vec<String> = exercise.choices.iter().map(|c| sequence_label(c)).collect();
        let correct_sequence: Vec<RhythmItem> = exercise.correct_sequence().to_vec();
        let bpm = exercise.tempo.bpm;
        let count = labels.len();

        println!();
        println!("{header}");
        for (i, label) in labels.iter().enumerate() {
            println!("  {}) {}", i + 1, label);
        }

        if let Some(dir) = midi_dir {
            let path = dir.join(format!("question-{number}.mid"));
            match write_midi(&correct_sequence, bpm, &path) {
                Ok(()) => println!("  (rhythm written to {})", path.display()),
                Err(error) => eprintln!("  Could not write {}: {error}", path.display()),
            }
        }

        let choice = loop {
            let Some(line) = prompt(&format!("Your answer (1-{count}, q to quit): ")) else {
                return;
            };
            if line.eq_ignore_ascii_case("q") {
                return;
            }
            match line.parse::<usize>() {
                Ok(value) if (1..=count).contains(&value) => break value - 1,
                _ => println!("  Enter a number between 1 and {count}."),
            }
        };

        match session.answer(choice) {
            Some(true) => println!("  Correct!"),
            Some(false) => {
                let correct = session.current().map(|e| e.correct).unwrap_or(0);
                println!("  Wrong — the answer was {}.", correct + 1);
            }
            None => {}
        }
    }
}

/// Naming drill: translate between letter names and solfège.
fn run_notes(session: &mut Session, rng: &mut StdRng, questions: usize, naming: NamingSystem) {
    for number in 1..=questions {
        let clef = if rng.random_bool(0.5) {
            Clef::Treble
        } else {
            Clef::Bass
        };
        let mut exercise = NoteExercise::generate(clef, rng);
        println!();
        println!(
            "Sequence {number}/{questions}  [{} clef, {} notes]",
            clef.label(),
            exercise.pitches.len()
        );

        while let Some(&pitch) = exercise.pitches.get(exercise.position) {
            let question = match naming {
                NamingSystem::Solfege => {
                    format!("  {}/{} — solfège name (q quits): ", pitch.letter.name(), pitch.octave)
                }
                NamingSystem::Letters => {
                    format!("  {}/{} — letter name (q quits): ", solfege(pitch.letter), pitch.octave)
                }
            };
            let Some(line) = prompt(&question) else {
                return;
            };
            if line.eq_ignore_ascii_case("q") {
                return;
            }
            let parsed = match naming {
                NamingSystem::Solfege => parse_solfege(&line),
                NamingSystem::Letters => Letter::parse(&line),
            };
            let Some(letter) = parsed else {
                println!("  Unrecognized note name.");
                continue;
            };
            if let Some(correct) = exercise.guess(letter) {
                session.record_drill(Category::Notes, correct);
                if correct {
                    println!("  Correct!");
                } else {
                    let expected = match naming {
                        NamingSystem::Solfege => solfege(pitch.letter).to_string(),
                        NamingSystem::Letters => pitch.letter.name().to_string(),
                    };
                    println!("  Wrong — that was {expected}.");
                }
            }
        }
    }
}

/// Key-signature drill: name the key from its accidentals.
fn run_keys(session: &mut Session, rng: &mut StdRng, questions: usize) {
    let mut previous: Option<String> = None;
    for number in 1..=questions {
        let Some(mut exercise) =
            KeyExercise::generate(&[Mode::Major, Mode::Minor], true, previous.as_deref(), rng)
        else {
            return;
        };
        let Some(key) = exercise.key() else {
            continue;
        };

        let accidentals = signature_accidentals(key.signature);
        let described = if accidentals.is_empty() {
            "no sharps or flats".to_string()
        } else {
            accidentals
                .iter()
                .map(|(letter, accidental)| format!("{}{}", letter.name(), accidental.suffix()))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mode_label = match key.mode {
            Mode::Major => "major",
            Mode::Minor => "minor",
        };

        println!();
        println!("Key {number}/{questions}: [{described}], {mode_label}");

        let Some(line) = prompt("Which key? (e.g. Bb or F#m, q to quit): ") else {
            return;
        };
        if line.eq_ignore_ascii_case("q") {
            return;
        }
        if let Some(correct) = exercise.guess(&line) {
            session.record_drill(Category::Keys, correct);
            if correct {
                println!("  Correct!");
            } else {
                println!("  Wrong — that was {}.", exercise.key_name);
            }
            let scale = minor_scale_variant(&key.scale, exercise.variant);
            println!(
                "  {} scale: {}",
                exercise.variant.label(),
                scale
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        previous = Some(exercise.key_name.clone());
    }
}

/// Interval drill: name the distance between two pitches.
fn run_intervals(session: &mut Session, rng: &mut StdRng, questions: usize) {
    println!(
        "Answer with an interval label: {}",
        INTERVALS
            .iter()
            .map(|i| i.short)
            .collect::<Vec<_>>()
            .join(", ")
    );
    for number in 1..=questions {
        let mut exercise = IntervalExercise::generate(rng);
        let (target_index, target_octave) = exercise.target();
        println!();
        println!(
            "Interval {number}/{questions}: {}{} -> {}{}",
            CHROMATIC[exercise.base], exercise.base_octave, CHROMATIC[target_index], target_octave
        );

        let guess = loop {
            let Some(line) = prompt("Interval? (q to quit): ") else {
                return;
            };
            if line == "q" {
                return;
            }
            match INTERVALS.iter().position(|i| i.short == line) {
                Some(index) => break index,
                None => println!("  Unknown label (labels are case-sensitive: m3 vs M3)."),
            }
        };

        if let Some(correct) = exercise.guess(guess) {
            session.record_drill(Category::Intervals, correct);
            if correct {
                println!("  Correct!");
            } else {
                let interval = INTERVALS[exercise.interval];
                println!("  Wrong — that was {} ({}).", interval.short, interval.name);
            }
        }
    }
}

fn print_scores(session: &Session) {
    println!();
    println!("=== Scores ===");
    let mut any = false;
    for category in Category::ALL {
        let score = session.scoreboard.get(category);
        if score.total > 0 {
            println!("  {:<10} {} / {}", category.label(), score.correct, score.total);
            any = true;
        }
    }
    if !any {
        println!("  (nothing answered)");
    }
}

/// Replace the session's active signature set with a parsed "4/4,6/8" list.
/// Unparseable entries are reported and skipped; an empty result leaves the
/// default untouched.
fn apply_signatures(session: &mut Session, list: &str) {
    let mut parsed: Vec<TimeSignature> = Vec::new();
    for part in list.split(',') {
        match part.parse::<TimeSignature>() {
            Ok(signature) => {
                if !parsed.contains(&signature) {
                    parsed.push(signature);
                }
            }
            Err(error) => eprintln!("Ignoring signature: {error}"),
        }
    }
    if parsed.is_empty() {
        return;
    }
    for signature in &parsed {
        if !session.active_signatures().contains(signature) {
            session.toggle_signature(*signature);
        }
    }
    for signature in session.active_signatures().to_vec() {
        if !parsed.contains(&signature) {
            session.toggle_signature(signature);
        }
    }
}

/// Solfège syllable to letter, case-insensitive.
fn parse_solfege(input: &str) -> Option<Letter> {
    match input.trim().to_lowercase().as_str() {
        "do" => Some(Letter::C),
        "re" => Some(Letter::D),
        "mi" => Some(Letter::E),
        "fa" => Some(Letter::F),
        "sol" => Some(Letter::G),
        "la" => Some(Letter::A),
        "si" => Some(Letter::B),
        _ => None,
    }
}

/// Print a prompt and read one trimmed line; None on closed stdin.
fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
