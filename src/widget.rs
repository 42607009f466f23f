//! The text-to-voice widget without its presentation layer.

use std::sync::mpsc::{self, Receiver};

use crate::catalog::{VoiceCatalog, VoiceCatalogBuilder};
use crate::playback::{ParameterModel, PlaybackController, PlaybackError, PlaybackState};
use crate::{SpeechEngine, VoiceSource};

/// Wires a voice source, a catalog builder, the current parameters and one playback
/// controller together.
///
/// The catalog is rebuilt whenever the source reports a change, and every rebuild selects
/// the catalog's default voice, replacing any voice chosen with
/// [`select_voice`](Self::select_voice). Rebuilds never touch an utterance that was already
/// submitted.
pub struct TextToVoice<E: SpeechEngine> {
    source: Box<dyn VoiceSource>,
    builder: VoiceCatalogBuilder,
    catalog: VoiceCatalog,
    params: ParameterModel,
    controller: PlaybackController<E>,
    voices_changed: Receiver<()>,
}

impl<E: SpeechEngine> TextToVoice<E> {
    /// Subscribe to `source`, build the initial catalog and select its default voice.
    pub fn new(
        mut source: impl VoiceSource + 'static,
        engine: E,
        builder: VoiceCatalogBuilder,
    ) -> Self {
        let (tx, voices_changed) = mpsc::channel();
        source.on_voices_changed(Box::new(move || {
            if tx.send(()).is_err() {
                log::trace!("Ignoring voices-changed notification: widget dropped");
            }
        }));

        let mut widget = Self {
            source: Box::new(source),
            builder,
            catalog: VoiceCatalog::default(),
            params: ParameterModel::default(),
            controller: PlaybackController::new(engine),
            voices_changed,
        };
        widget.rebuild_catalog();
        widget
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &ParameterModel {
        &self.params
    }

    /// Parameters for the next `speak`. Values are used as given.
    pub fn params_mut(&mut self) -> &mut ParameterModel {
        &mut self.params
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.params.text = text.into();
    }

    /// Select a voice by name, first word of its name, or language tag.
    ///
    /// Returns `false` and keeps the current selection when nothing matches.
    pub fn select_voice(&mut self, query: &str) -> bool {
        match self.catalog.find(query) {
            Some(voice) => {
                log::debug!("Selected voice {}", voice.label);
                self.params.voice = Some(voice.handle.clone());
                true
            }
            None => {
                log::debug!("No voice matches {query:?}");
                false
            }
        }
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.controller
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.current_state()
    }

    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.controller.last_error()
    }

    pub fn speak(&mut self) -> Result<PlaybackState, PlaybackError> {
        self.controller.speak(&self.params)
    }

    pub fn pause(&mut self) -> PlaybackState {
        self.controller.pause()
    }

    pub fn resume(&mut self) -> PlaybackState {
        self.controller.resume()
    }

    pub fn stop(&mut self) -> PlaybackState {
        self.controller.stop()
    }

    /// Handle pending voice-list changes, then pending engine callbacks.
    ///
    /// Any number of queued change notifications result in a single rebuild.
    pub fn poll(&mut self) -> Result<usize, PlaybackError> {
        let mut changed = false;
        while self.voices_changed.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            self.rebuild_catalog();
        }
        self.controller.process_events()
    }

    /// Re-list the source and replace the catalog and the selected voice.
    pub fn rebuild_catalog(&mut self) {
        let build = self.builder.build(&self.source.list_voices());
        if self.params.voice != build.default_selection {
            log::debug!(
                "Voice selection {:?} replaced by default {:?}",
                self.params.voice,
                build.default_selection
            );
        }
        self.catalog = build.catalog;
        self.params.voice = build.default_selection;
    }
}
