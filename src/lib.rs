//! # tts-playback
//!
//! Voice catalog and playback control for a text-to-voice widget driving a shared,
//! callback-based speech engine (for example the browser `speechSynthesis` object or a
//! platform TTS service).
//!
//! ## Features
//!
//! - **Voice catalog**: classify engine voices by gender and region, sort them
//!   deterministically and group them by language
//! - **Default voice policy**: pick an English female voice when one exists
//! - **Playback control**: play/pause/resume/stop state machine that discards stale
//!   engine callbacks through per-utterance generation tokens
//!
//! ## Quick Start
//!
//! ```ignore
//! use tts_playback::{catalog::VoiceCatalogBuilder, playback::{ParameterModel, PlaybackController}};
//!
//! let build = VoiceCatalogBuilder::new().build(&source.list_voices());
//! let params = ParameterModel::new("Hello, world!").with_voice(build.default_selection);
//!
//! let mut controller = PlaybackController::new(engine);
//! controller.speak(&params)?;
//! // ...later, once the engine has called back:
//! controller.process_events()?;
//! ```

pub mod catalog;
pub mod playback;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogBuild, Gender, RawVoice, VoiceCatalog, VoiceCatalogBuilder, VoiceDescriptor};
pub use playback::{
    EngineEventAdapter, Generation, ParameterModel, PlaybackController, PlaybackError,
    PlaybackState,
};
pub use widget::TextToVoice;

/// Opaque reference to one engine voice.
///
/// Engines identify voices by their reported name, so the handle wraps that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceHandle(String);

impl VoiceHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VoiceHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VoiceHandle {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for VoiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of work handed to the engine.
///
/// Built from a [`ParameterModel`] at submission time; later changes to the model or the
/// voice catalog never reach an utterance that was already submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` lets the engine use its own default voice.
    pub voice: Option<VoiceHandle>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// The shared speech-synthesis engine.
///
/// All commands are fire-and-forget: completion is reported later through the
/// [`EngineEventAdapter`] handed over with each submission, if it is reported at all.
pub trait SpeechEngine {
    /// Queue an utterance. The engine reports progress through `callbacks`.
    fn submit(&mut self, utterance: Utterance, callbacks: EngineEventAdapter);

    /// Drop the current and all queued utterances.
    fn cancel_all(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);

    /// True while an utterance is being spoken (including while paused).
    fn is_speaking(&self) -> bool;

    fn is_paused(&self) -> bool;
}

/// Provider of the voices an engine currently offers.
///
/// Platforms often populate their voice list asynchronously, so the first listing may be
/// empty and change notifications may fire any number of times afterwards.
pub trait VoiceSource {
    /// Snapshot of the voices available right now. May be empty.
    fn list_voices(&self) -> Vec<RawVoice>;

    /// Register a callback fired (without payload) whenever the voice list changes.
    fn on_voices_changed(&mut self, callback: Box<dyn FnMut() + Send>);
}

/// Turns a language code (e.g. `"en"`) into a human-readable name.
pub trait LanguageNameResolver {
    /// Display name for `code`, or the code itself when it cannot be resolved.
    fn display_name_for(&self, code: &str) -> String;
}
