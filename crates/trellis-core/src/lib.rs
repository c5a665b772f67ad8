#![forbid(unsafe_code)]

//! Core: geometry primitives and the logging facade.
//!
//! # Role in Trellis
//! `trellis-core` is the shared vocabulary of the workspace. Layout and the
//! recording surface both speak in [`geometry::Rect`], [`geometry::Point`] and
//! [`geometry::Size`], all measured in `f64` logical units.
//!
//! # Primary responsibilities
//! - **Geometry**: points, sizes and rectangles with edge helpers.
//! - **Logging**: re-exported `tracing` macros and an optional JSON subscriber.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
