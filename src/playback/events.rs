use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

/// Identifies one playback session.
///
/// Every submission gets a fresh, strictly larger generation. Callbacks carrying an older
/// generation belong to a superseded session and are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    Start,
    End,
    Pause,
    Resume,
    /// Engine failure with whatever detail the engine reported.
    Error(String),
}

/// A callback as received from the engine, tagged with the session it was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub generation: Generation,
    pub kind: EngineEventKind,
}

/// Callback hooks handed to the engine with one submission.
///
/// The adapter is bound to the generation current at submission time and only queues
/// events; the controller applies them when it next processes events. Cloning is cheap and
/// the adapter may be moved to another thread.
#[derive(Debug, Clone)]
pub struct EngineEventAdapter {
    generation: Generation,
    sender: Sender<EngineEvent>,
}

impl EngineEventAdapter {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn on_start(&self) {
        self.send(EngineEventKind::Start);
    }

    pub fn on_end(&self) {
        self.send(EngineEventKind::End);
    }

    pub fn on_pause(&self) {
        self.send(EngineEventKind::Pause);
    }

    pub fn on_resume(&self) {
        self.send(EngineEventKind::Resume);
    }

    pub fn on_error(&self, detail: impl Into<String>) {
        self.send(EngineEventKind::Error(detail.into()));
    }

    fn send(&self, kind: EngineEventKind) {
        let event = EngineEvent {
            generation: self.generation,
            kind,
        };
        // Controller dropped.
        if let Err(mpsc::SendError(event)) = self.sender.send(event) {
            log::trace!("Dropping {:?} for {}: controller closed", event.kind, event.generation);
        }
    }
}

/// Outcome of matching an event against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Delivery {
    Current(EngineEventKind),
    Stale,
}

/// Compare an event's bound generation with the current session's.
///
/// With no current session every event is stale.
pub(crate) fn reconcile(current: Option<Generation>, event: EngineEvent) -> Delivery {
    match current {
        Some(generation) if generation == event.generation => Delivery::Current(event.kind),
        _ => {
            log::trace!(
                "Ignoring stale {:?} from session {} (current {:?})",
                event.kind,
                event.generation,
                current.map(|g| g.value())
            );
            Delivery::Stale
        }
    }
}

/// Queue through which adapters hand events back to their controller.
pub(crate) struct EventMailbox {
    sender: Sender<EngineEvent>,
    receiver: Receiver<EngineEvent>,
}

impl EventMailbox {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub(crate) fn adapter(&self, generation: Generation) -> EngineEventAdapter {
        EngineEventAdapter {
            generation,
            sender: self.sender.clone(),
        }
    }

    /// Next queued event, in arrival order.
    pub(crate) fn try_next(&self) -> Option<EngineEvent> {
        self.receiver.try_recv().ok()
    }
}
