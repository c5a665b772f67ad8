#![forbid(unsafe_code)]

//! Render collaborator: a headless recording surface.
//!
//! # Role in Trellis
//! Components attach to a [`surface::SurfaceHandle`] once and later record
//! [`surface::DrawOp`]s against it. The surface keeps a tree of named regions
//! (one per attached component) and an ordered log of draw operations, which
//! is enough to observe attach/render behaviour without a graphics backend.

pub mod surface;

pub use surface::{DrawOp, RegionId, Surface, SurfaceHandle};
