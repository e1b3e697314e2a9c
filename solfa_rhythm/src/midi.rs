// MIDI export for rhythm sequences.
//
// Converts a sequence into a Standard MIDI File so an external player can
// sound it. Rhythm exercises carry no pitch content, so every note sounds
// at middle C; rests become gaps. A small articulation gap is left before
// each note's end so repeated notes re-attack audibly instead of merging
// into one long tone.
//
// Uses the `midly` crate. Output is SMF Format 1: a tempo track plus one
// rhythm track.

use crate::catalog::RhythmItem;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Every rhythm event sounds at middle C.
const CLICK_PITCH: u8 = 60;

/// Convert a sequence to MIDI and write it to a file.
pub fn write_midi(
    sequence: &[RhythmItem],
    tempo_bpm: u16,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = sequence_to_smf(sequence, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a sequence to an in-memory SMF.
pub fn sequence_to_smf(sequence: &[RhythmItem], tempo_bpm: u16) -> Smf<'static> {
    let tempo_bpm = tempo_bpm.max(1);
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let mut tempo_track: Track<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / tempo_bpm as u32;
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    // Track 1: the rhythm
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(b"Rhythm")),
    });

    let channel = u4::new(0);
    let mut current_tick: u32 = 0;
    let mut last_event_tick: u32 = 0;

    for item in sequence {
        let length = midi_ticks(item.ticks());
        if !item.is_rest {
            track.push(TrackEvent {
                delta: u28::new(current_tick - last_event_tick),
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn {
                        key: u7::new(CLICK_PITCH),
                        vel: u7::new(80),
                    },
                },
            });
            last_event_tick = current_tick;

            let off_tick = current_tick + length - articulation_gap(item.ticks(), tempo_bpm);
            track.push(TrackEvent {
                delta: u28::new(off_tick - last_event_tick),
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key: u7::new(CLICK_PITCH),
                        vel: u7::new(0),
                    },
                },
            });
            last_event_tick = off_tick;
        }
        current_tick += length;
    }

    // End-of-track lands on the measure boundary so trailing rests count.
    track.push(TrackEvent {
        delta: u28::new(current_tick - last_event_tick),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

/// Quarter-beat ticks to MIDI ticks.
fn midi_ticks(ticks: f64) -> u32 {
    (ticks * TICKS_PER_QUARTER as f64).round() as u32
}

/// Articulation gap before a note's end: min(0.05 s, 10% of the note),
/// converted to MIDI ticks at the given tempo and kept below the note
/// length.
fn articulation_gap(ticks: f64, tempo_bpm: u16) -> u32 {
    let seconds_per_quarter = 60.0 / tempo_bpm as f64;
    let note_seconds = ticks * seconds_per_quarter;
    let gap_seconds = 0.05_f64.min(note_seconds * 0.1);
    let gap = (gap_seconds / seconds_per_quarter * TICKS_PER_QUARTER as f64).round() as u32;
    gap.min(midi_ticks(ticks).saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Duration;

    fn note_on_count(smf: &Smf<'_>) -> usize {
        smf.tracks[1]
            .iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOn { .. },
                        ..
                    }
                )
            })
            .count()
    }

    #[test]
    fn one_note_per_sounding_item() {
        let sequence = [
            RhythmItem::note(Duration::Quarter),
            RhythmItem::rest(Duration::Quarter),
            RhythmItem::note(Duration::Eighth),
            RhythmItem::note(Duration::Eighth),
        ];
        let smf = sequence_to_smf(&sequence, 108);
        assert_eq!(smf.tracks.len(), 2);
        assert_eq!(note_on_count(&smf), 3);
    }

    #[test]
    fn all_rest_sequence_produces_no_notes_but_full_length() {
        let sequence = [RhythmItem::rest(Duration::Whole)];
        let smf = sequence_to_smf(&sequence, 120);
        assert_eq!(note_on_count(&smf), 0);
        // The end-of-track delta spans the whole measure.
        let last = smf.tracks[1].last().unwrap();
        assert_eq!(last.delta.as_int(), 4 * TICKS_PER_QUARTER as u32);
    }

    #[test]
    fn articulation_gap_is_bounded() {
        // At 120 BPM a quarter is 0.5 s; the gap caps at 0.05 s = 48 ticks.
        assert_eq!(articulation_gap(1.0, 120), 48);
        // Very short notes use the 10% rule instead.
        let sixteenth_gap = articulation_gap(0.25, 120);
        assert!(sixteenth_gap < midi_ticks(0.25));
        assert_eq!(sixteenth_gap, 12); // 10% of 120 ticks
    }
}
