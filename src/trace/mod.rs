//! Call tracing: log when a call starts and, if it took measurable time,
//! when it finishes.
//!
//! Lines are labelled with a [`CallOrigin`]. The origin comes either from a
//! caller-maintained [`CallStack`] (the outermost frame whose source matches
//! a prefix) or from an origin captured where the wrapper was built.

mod origin;
mod tracer;

pub use origin::{file_stem, scan_frames, CallOrigin, CallStack, Frame, FrameGuard};
pub use tracer::{Sink, Tracer, MIN_REPORTED_SECS};
