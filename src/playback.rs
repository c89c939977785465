//! The computer's turn as an explicit per-tick script.
//!
//! Rather than suspending control flow, the playback of a target sequence is
//! precomputed into a script that the sequencer advances one tick at a time:
//! per element, an onset (highlight + tone) followed by lit and gap
//! countdowns, then a trailing lead-out before the player's turn. The script
//! carries the [`RoundId`] it was built for; the sequencer discards any
//! script whose token no longer matches the current round, so a superseded
//! computer turn can never resume.

use smallvec::SmallVec;

use crate::{RoundId, SquareIndex};

/// What happened during one tick of playback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PlaybackProgress {
    /// A new element starts this tick: light the square and play its tone.
    Onset {
        /// Zero-based position within the target sequence.
        position: usize,
        /// The square to present.
        square: SquareIndex,
    },
    /// Mid-segment; nothing to do this tick.
    Waiting,
    /// The script has run to completion, lead-out included.
    Done,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Segment {
    Lit { remaining: u32 },
    Gap { remaining: u32 },
    LeadOut { remaining: u32 },
    Done,
}

/// A fully scheduled computer turn.
///
/// Each element occupies exactly `highlight + gap` ticks (the onset tick is
/// the first lit tick); the script completes `lead_out` ticks after the last
/// gap. All segment lengths are at least one tick.
#[derive(Debug, Clone)]
pub(crate) struct PlaybackScript {
    round: RoundId,
    squares: SmallVec<[SquareIndex; 4]>,
    cursor: usize,
    segment: Segment,
    highlight_ticks: u32,
    gap_ticks: u32,
    lead_out_ticks: u32,
}

impl PlaybackScript {
    pub(crate) fn new(
        round: RoundId,
        squares: SmallVec<[SquareIndex; 4]>,
        highlight_ticks: u32,
        gap_ticks: u32,
        lead_out_ticks: u32,
    ) -> Self {
        debug_assert!(!squares.is_empty());
        debug_assert!(highlight_ticks >= 1 && gap_ticks >= 1 && lead_out_ticks >= 1);
        Self {
            round,
            squares,
            cursor: 0,
            // The first advance call emits the first onset.
            segment: Segment::Gap { remaining: 0 },
            highlight_ticks,
            gap_ticks,
            lead_out_ticks,
        }
    }

    /// The round token this script was built for.
    pub(crate) fn round(&self) -> RoundId {
        self.round
    }

    /// Advances the script by one tick.
    pub(crate) fn advance(&mut self) -> PlaybackProgress {
        match &mut self.segment {
            Segment::Lit { remaining } => {
                *remaining -= 1;
                if *remaining == 0 {
                    self.segment = Segment::Gap {
                        remaining: self.gap_ticks,
                    };
                }
                PlaybackProgress::Waiting
            }
            Segment::Gap { remaining } => {
                if *remaining > 0 {
                    *remaining -= 1;
                    return PlaybackProgress::Waiting;
                }
                // Gap fully elapsed (or very first tick): start the next
                // element, or the lead-out once all elements are spent.
                if self.cursor == self.squares.len() {
                    // This tick counts as the first lead-out tick.
                    let left = self.lead_out_ticks - 1;
                    if left == 0 {
                        self.segment = Segment::Done;
                        return PlaybackProgress::Done;
                    }
                    self.segment = Segment::LeadOut { remaining: left };
                    return PlaybackProgress::Waiting;
                }
                self.begin_element()
            }
            Segment::LeadOut { remaining } => {
                *remaining -= 1;
                if *remaining == 0 {
                    self.segment = Segment::Done;
                    return PlaybackProgress::Done;
                }
                PlaybackProgress::Waiting
            }
            Segment::Done => PlaybackProgress::Done,
        }
    }

    fn begin_element(&mut self) -> PlaybackProgress {
        let position = self.cursor;
        let square = self.squares[position];
        self.cursor += 1;
        // The onset tick counts as the first lit tick.
        self.segment = if self.highlight_ticks == 1 {
            Segment::Gap {
                remaining: self.gap_ticks,
            }
        } else {
            Segment::Lit {
                remaining: self.highlight_ticks - 1,
            }
        };
        PlaybackProgress::Onset { position, square }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(squares: &[usize], highlight: u32, gap: u32, lead_out: u32) -> PlaybackScript {
        let squares: SmallVec<[SquareIndex; 4]> =
            squares.iter().copied().map(SquareIndex::new).collect();
        PlaybackScript::new(RoundId::new(1), squares, highlight, gap, lead_out)
    }

    /// Runs the script to completion, returning (tick, position, square) for
    /// every onset and the total tick count.
    fn run(mut script: PlaybackScript) -> (Vec<(u32, usize, usize)>, u32) {
        let mut onsets = Vec::new();
        let mut tick = 0;
        loop {
            tick += 1;
            match script.advance() {
                PlaybackProgress::Onset { position, square } => {
                    onsets.push((tick, position, square.as_usize()));
                }
                PlaybackProgress::Waiting => {}
                PlaybackProgress::Done => return (onsets, tick),
            }
            assert!(tick < 10_000, "script never completed");
        }
    }

    #[test]
    fn onsets_fire_at_element_boundaries() {
        // highlight 2, gap 3: elements start at ticks 1, 6, 11.
        let (onsets, _) = run(script(&[0, 1, 2], 2, 3, 4));
        assert_eq!(onsets, vec![(1, 0, 0), (6, 1, 1), (11, 2, 2)]);
    }

    #[test]
    fn total_duration_is_elements_plus_lead_out() {
        let (_, total) = run(script(&[0, 1, 2], 2, 3, 4));
        // 3 * (2 + 3) + 4
        assert_eq!(total, 19);
    }

    #[test]
    fn single_tick_highlight() {
        let (onsets, total) = run(script(&[3, 1], 1, 1, 1));
        assert_eq!(onsets, vec![(1, 0, 3), (3, 1, 1)]);
        assert_eq!(total, 5);
    }

    #[test]
    fn single_element_script() {
        let (onsets, total) = run(script(&[2], 5, 2, 3));
        assert_eq!(onsets, vec![(1, 0, 2)]);
        assert_eq!(total, 10);
    }

    #[test]
    fn done_is_idempotent() {
        let mut s = script(&[0], 1, 1, 1);
        while s.advance() != PlaybackProgress::Done {}
        assert_eq!(s.advance(), PlaybackProgress::Done);
        assert_eq!(s.advance(), PlaybackProgress::Done);
    }

    #[test]
    fn round_token_is_preserved() {
        let s = script(&[0, 1], 2, 2, 2);
        assert_eq!(s.round(), RoundId::new(1));
    }
}
