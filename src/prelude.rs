//! Convenience re-export of the common surface.
//!
//! ```
//! use simon_core::prelude::*;
//! ```

pub use crate::builder::SequencerBuilder;
pub use crate::config::{RulesConfig, TimingConfig};
pub use crate::error::SimonError;
pub use crate::event::{EventDrain, SimonEvent};
pub use crate::frontend::{InputSource, Presenter, SoundPlayer};
pub use crate::sequencer::TurnSequencer;
pub use crate::{Config, Phase, PlayerFault, RoundId, SquareIndex, Tick, TurnLabel};
