use serde::Serialize;

use super::events::{reconcile, Delivery, EngineEventKind, EventMailbox, Generation};
use super::params::ParameterModel;
use crate::{SpeechEngine, Utterance};

/// Reported in place of an empty engine error detail.
const DEFAULT_ENGINE_DETAIL: &str = "Failed to convert text to speech";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("No text to speak: {0}")]
    Validation(String),
    #[error("Speech error in session {generation}: {detail}")]
    Engine {
        generation: Generation,
        detail: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Idle,
    Speaking,
    Paused,
}

/// The utterance currently owning the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub generation: Generation,
    pub utterance: Utterance,
    /// Set once the engine reported that speech actually started.
    pub started: bool,
}

/// Drives one [`SpeechEngine`] through speak/pause/resume/stop.
///
/// Commands return immediately. Engine callbacks are queued by the
/// [`EngineEventAdapter`](super::EngineEventAdapter) bound to each submission and applied,
/// in arrival order, by [`process_events`](Self::process_events) or at the start of the
/// next command. Callbacks from a superseded session are dropped.
///
/// There is no timeout: if the engine never calls back, the controller stays in
/// `Speaking`/`Paused` until the next command.
pub struct PlaybackController<E: SpeechEngine> {
    engine: E,
    state: PlaybackState,
    session: Option<PlaybackSession>,
    last_generation: Generation,
    last_error: Option<PlaybackError>,
    mailbox: EventMailbox,
}

impl<E: SpeechEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: PlaybackState::Idle,
            session: None,
            last_generation: Generation::default(),
            last_error: None,
            mailbox: EventMailbox::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_state(&self) -> PlaybackState {
        self.state
    }

    /// Most recent error, cleared by the next command.
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.session.as_ref().map(|s| s.generation)
    }

    /// Speak toggle.
    ///
    /// - `Idle`: submit a new utterance built from `params`; empty text is rejected
    ///   without touching the engine
    /// - `Speaking`: stop
    /// - `Paused`: resume the paused utterance without resubmitting
    ///
    /// An engine error queued since the last command is returned instead, before any of the
    /// above.
    pub fn speak(&mut self, params: &ParameterModel) -> Result<PlaybackState, PlaybackError> {
        if let Some(error) = self.begin_command() {
            return Err(error);
        }

        match self.state {
            PlaybackState::Idle => {
                if !params.has_text() {
                    let error =
                        PlaybackError::Validation("Please enter some text first".to_string());
                    log::debug!("Rejected speak: {error}");
                    self.last_error = Some(error.clone());
                    return Err(error);
                }
                self.start_session(params.utterance());
            }
            PlaybackState::Speaking => self.cancel(),
            PlaybackState::Paused => {
                self.engine.resume();
                self.transition(PlaybackState::Speaking);
            }
        }
        Ok(self.state)
    }

    /// Pause toggle: pauses active speech, resumes paused speech, no-op when idle.
    pub fn pause(&mut self) -> PlaybackState {
        self.begin_command();

        if self.state != PlaybackState::Idle {
            if self.engine.is_speaking() && !self.engine.is_paused() {
                self.engine.pause();
                self.transition(PlaybackState::Paused);
            } else if self.engine.is_paused() {
                self.engine.resume();
                self.transition(PlaybackState::Speaking);
            }
        }
        self.state
    }

    /// Resume paused speech; no-op unless the engine reports being paused.
    pub fn resume(&mut self) -> PlaybackState {
        self.begin_command();

        if self.state != PlaybackState::Idle && self.engine.is_paused() {
            self.engine.resume();
            self.transition(PlaybackState::Speaking);
        }
        self.state
    }

    /// Cancel everything on the engine and invalidate the current session.
    pub fn stop(&mut self) -> PlaybackState {
        self.begin_command();
        self.cancel();
        self.state
    }

    /// Apply queued engine callbacks in arrival order.
    ///
    /// Returns the number of callbacks that belonged to the current session, or the engine
    /// error if one of them reported a failure. The error is also kept as
    /// [`last_error`](Self::last_error).
    pub fn process_events(&mut self) -> Result<usize, PlaybackError> {
        let mut applied = 0;
        let mut failure = None;

        while let Some(event) = self.mailbox.try_next() {
            let generation = event.generation;
            match reconcile(self.current_generation(), event) {
                Delivery::Stale => {}
                Delivery::Current(kind) => {
                    applied += 1;
                    if let Some(error) = self.apply(generation, kind) {
                        failure = Some(error);
                    }
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(applied),
        }
    }

    /// Clear the previous error and apply queued callbacks.
    ///
    /// Returns the engine error reported by those callbacks; it also stays in `last_error`.
    fn begin_command(&mut self) -> Option<PlaybackError> {
        self.last_error = None;
        self.process_events().err()
    }

    fn start_session(&mut self, utterance: Utterance) {
        let generation = self.last_generation.next();
        self.last_generation = generation;

        log::debug!(
            "Submitting session {generation}: {} chars, voice {:?}, rate {}, pitch {}, volume {}",
            utterance.text.chars().count(),
            utterance.voice.as_ref().map(|v| v.as_str()),
            utterance.rate,
            utterance.pitch,
            utterance.volume
        );

        self.session = Some(PlaybackSession {
            generation,
            utterance: utterance.clone(),
            started: false,
        });
        self.transition(PlaybackState::Speaking);
        self.engine.submit(utterance, self.mailbox.adapter(generation));
    }

    fn cancel(&mut self) {
        self.engine.cancel_all();
        if let Some(session) = self.session.take() {
            log::debug!("Cancelled session {}", session.generation);
        }
        self.transition(PlaybackState::Idle);
    }

    fn apply(&mut self, generation: Generation, kind: EngineEventKind) -> Option<PlaybackError> {
        match kind {
            EngineEventKind::Start => {
                if let Some(session) = self.session.as_mut() {
                    session.started = true;
                }
            }
            EngineEventKind::Pause => self.transition(PlaybackState::Paused),
            EngineEventKind::Resume => self.transition(PlaybackState::Speaking),
            EngineEventKind::End => {
                self.session = None;
                self.transition(PlaybackState::Idle);
            }
            EngineEventKind::Error(detail) => {
                let detail = if detail.trim().is_empty() {
                    DEFAULT_ENGINE_DETAIL.to_string()
                } else {
                    detail
                };
                let error = PlaybackError::Engine { generation, detail };
                log::warn!("{error}");

                self.session = None;
                self.transition(PlaybackState::Idle);
                self.last_error = Some(error.clone());
                return Some(error);
            }
        }
        None
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            log::debug!("Playback {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }
}

impl<E: SpeechEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.engine.cancel_all();
        }
    }
}
