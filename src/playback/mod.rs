//! Playback control for a shared speech engine.
//!
//! [`PlaybackController`] owns the engine and serializes commands against it. Each
//! submission gets a new [`Generation`]; the engine reports back through an
//! [`EngineEventAdapter`] bound to that generation, so callbacks from a cancelled
//! utterance cannot disturb the one that replaced it.
//!
//! # States
//!
//! | From | Command / callback | To |
//! |---|---|---|
//! | `Idle` | `speak` with text | `Speaking` (new session) |
//! | `Idle` | `speak` with blank text | `Idle`, [`PlaybackError::Validation`] |
//! | `Speaking` | `speak` | `Idle` (stop) |
//! | `Paused` | `speak` | `Speaking` (resume) |
//! | `Speaking` | `pause` while the engine is speaking | `Paused` |
//! | `Paused` | `pause` / `resume` while the engine is paused | `Speaking` |
//! | any | `stop` | `Idle` |
//! | `Speaking`/`Paused` | `end` callback of the current session | `Idle` |
//! | `Speaking`/`Paused` | `error` callback of the current session | `Idle`, [`PlaybackError::Engine`] |
//! | any | callback of an older session | unchanged |

pub mod controller;
pub mod events;
pub mod params;

pub use controller::{PlaybackController, PlaybackError, PlaybackSession, PlaybackState};
pub use events::{EngineEvent, EngineEventAdapter, EngineEventKind, Generation};
pub use params::{
    ParameterModel, ParameterModelBuilder, ParameterModelBuilderError, PITCH_RANGE, RATE_RANGE,
    VOLUME_RANGE,
};
