//! Stepwise execution engine for Berrymaze programs.
//!
//! The engine walks an instruction tree against a read-only [`Maze`],
//! emitting one [`ExecEvent`] per discrete step. Two runners drive the
//! same [`Interpreter`]:
//!
//! - [`LockstepRunner`]: on the calling thread, optionally paced
//! - [`RealtimeRunner`]: on a background thread, events over a channel,
//!   cancellable through a [`CancelToken`]
//!
//! [`Maze`]: berrymaze_core::Maze
//! [`ExecEvent`]: berrymaze_core::ExecEvent

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod interpreter;
pub mod lockstep;
pub mod metrics;
pub mod realtime;
pub mod report;
mod run_loop;

pub use cancel::CancelToken;
pub use config::{ConfigError, EngineConfig};
pub use interpreter::{Interpreter, StepOutcome};
pub use lockstep::LockstepRunner;
pub use metrics::RunMetrics;
pub use realtime::{RealtimeRunner, RunHandle};
pub use report::{RunOutcome, RunReport};
