#![forbid(unsafe_code)]

//! Test harness for the reaction picker.
//!
//! - [`fakes`]: host collaborators that record every call into a shared log.
//! - [`driver`]: fixed-step frame driver.
//! - [`script`]: JSON gesture scripts replayed against a session.
//! - [`digest`]: stable checksums of committed layout state.

pub mod digest;
pub mod driver;
pub mod fakes;
pub mod script;

pub use digest::layout_digest;
pub use driver::{Drive, FrameDriver};
pub use fakes::{Event, Recorder, RecordingTarget};
pub use script::{GestureScript, ReplayReport, ScriptError, Step};
