//! The command engine: dispatch, pure state transitions and replies.

pub mod dispatch;
pub mod editor;
pub mod mutate;
pub mod response;
pub mod synth;

pub use dispatch::dispatch;
pub use mutate::{apply, Outcome};
pub use response::Response;
pub use synth::IdStamps;
