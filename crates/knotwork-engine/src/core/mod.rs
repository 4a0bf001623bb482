//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application
//! driving it. Runtime internals stay behind `FrameCtx`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
