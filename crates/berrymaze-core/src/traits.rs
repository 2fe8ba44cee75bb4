//! Boundary traits for the collaborators that consume the core:
//! event consumers (presentation layer) and the completion recorder
//! (persistence layer).

use crate::event::ExecEvent;

/// Receives execution events in order.
///
/// The callback form of the engine's event stream. Returning `false`
/// tells the engine the consumer has gone away, which stops the run
/// as if it had been cancelled.
pub trait EventSink {
    /// Deliver one event. Returns `false` if the consumer is gone.
    fn emit(&mut self, event: ExecEvent) -> bool;
}

impl EventSink for Vec<ExecEvent> {
    fn emit(&mut self, event: ExecEvent) -> bool {
        self.push(event);
        true
    }
}

impl EventSink for crossbeam_channel::Sender<ExecEvent> {
    fn emit(&mut self, event: ExecEvent) -> bool {
        self.send(event).is_ok()
    }
}

impl<F> EventSink for F
where
    F: FnMut(ExecEvent) -> bool,
{
    fn emit(&mut self, event: ExecEvent) -> bool {
        self(event)
    }
}

/// Facts about a completed level, handed to an external recorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelCompletion {
    /// The level that was completed.
    pub level: u32,
    /// Strawberries held at the end of the winning run.
    pub strawberries: u32,
}

/// External sink for level-completion facts (e.g. a progress store).
///
/// The core writes through this trait and reads nothing back.
pub trait CompletionRecorder {
    /// Record one completion.
    fn record(&mut self, completion: LevelCompletion);
}
