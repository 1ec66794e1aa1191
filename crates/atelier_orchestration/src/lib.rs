//! Long-running and fan-out generation workflows.
//!
//! - [`VideoJobPoller`] drives one video job from submission to a stored
//!   asset as an explicit state machine over injected collaborators.
//! - [`BatchOrchestrator`] runs one prompt list as a parallel, failure
//!   tolerant image batch or a sequential, fail-fast video batch, publishing
//!   progress through a watch channel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod poller;

pub use batch::{BatchOrchestrator, BatchReport};
pub use poller::{JobState, PollSettings, PollSettingsBuilder, VideoJobPoller, VideoJobReport};
