//! Test doubles for the engine and voice source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::{EngineEventAdapter, RawVoice, SpeechEngine, Utterance, VoiceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EngineCall {
    Submit,
    CancelAll,
    Pause,
    Resume,
}

/// Engine that records every call and behaves like a single-utterance browser engine:
/// `speaking` stays true while paused.
#[derive(Default)]
pub(crate) struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub submitted: Vec<(Utterance, EngineEventAdapter)>,
    pub speaking: bool,
    pub paused: bool,
    cancelled: Arc<AtomicBool>,
}

/// Observes a [`RecordingEngine`] after it was moved into a controller.
pub(crate) struct EngineProbe {
    cancelled: Arc<AtomicBool>,
}

impl EngineProbe {
    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl RecordingEngine {
    pub fn last_utterance(&self) -> &Utterance {
        &self.submitted.last().expect("an utterance was submitted").0
    }

    pub fn last_callbacks(&self) -> &EngineEventAdapter {
        &self.submitted.last().expect("an utterance was submitted").1
    }

    /// Finish the current utterance the way an engine does: stop speaking, then call back.
    pub fn finish(&mut self) {
        self.speaking = false;
        self.paused = false;
        self.last_callbacks().on_end();
    }

    pub fn probe(&self) -> EngineProbe {
        EngineProbe {
            cancelled: Arc::clone(&self.cancelled),
        }
    }
}

impl SpeechEngine for RecordingEngine {
    fn submit(&mut self, utterance: Utterance, callbacks: EngineEventAdapter) {
        self.calls.push(EngineCall::Submit);
        self.submitted.push((utterance, callbacks));
        self.speaking = true;
        self.paused = false;
    }

    fn cancel_all(&mut self) {
        self.calls.push(EngineCall::CancelAll);
        self.cancelled.store(true, Ordering::SeqCst);
        self.speaking = false;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
        if self.speaking {
            self.paused = true;
        }
    }

    fn resume(&mut self) {
        self.calls.push(EngineCall::Resume);
        self.paused = false;
    }

    fn is_speaking(&self) -> bool {
        self.speaking
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

type ChangeCallback = Box<dyn FnMut() + Send>;

/// Voice source whose list and change notifications are driven by the test.
#[derive(Clone, Default)]
pub(crate) struct ManualVoiceSource {
    voices: Arc<Mutex<Vec<RawVoice>>>,
    callbacks: Arc<Mutex<Vec<ChangeCallback>>>,
}

impl ManualVoiceSource {
    pub fn with_voices(voices: Vec<RawVoice>) -> Self {
        let source = Self::default();
        source.set_voices(voices);
        source
    }

    pub fn set_voices(&self, voices: Vec<RawVoice>) {
        *self.voices.lock().expect("voices lock") = voices;
    }

    /// Replace the voice list and fire every registered change callback.
    pub fn change(&self, voices: Vec<RawVoice>) {
        self.set_voices(voices);
        for callback in self.callbacks.lock().expect("callbacks lock").iter_mut() {
            callback();
        }
    }
}

impl VoiceSource for ManualVoiceSource {
    fn list_voices(&self) -> Vec<RawVoice> {
        self.voices.lock().expect("voices lock").clone()
    }

    fn on_voices_changed(&mut self, callback: Box<dyn FnMut() + Send>) {
        self.callbacks.lock().expect("callbacks lock").push(callback);
    }
}
