#![forbid(unsafe_code)]

//! Weighted grid layout for nested components.
//!
//! # Role in Trellis
//! `trellis-layout` owns the layout algorithm. A [`GridContainer`] holds
//! children in rows and columns, aggregates their minimum sizes bottom-up,
//! distributes surplus space by per-track [`Weight`]s and hands every child
//! its final rectangle. The container is itself a [`Component`], so grids
//! nest freely.
//!
//! # Primary responsibilities
//! - **Component contract**: [`Component`], with [`Placeholder`] for empty
//!   cells and [`Block`] as a simple leaf.
//! - **Grid store**: sparse placement that keeps the table rectangular.
//! - **Solver**: minimum aggregation, weight inference and proportional
//!   distribution, producing a [`GridLayout`].
//! - **Settings**: serialisable [`GridConfig`] for padding and weights.
//!
//! # How it fits in the system
//! Geometry comes from `trellis-core`; attach and render go through the
//! recording surface in `trellis-render`. Layout itself never draws.

pub mod axis;
pub mod component;
pub mod config;
pub mod error;
pub mod grid;
pub mod grid_layout;
pub mod weight;

pub use axis::Axis;
pub use component::{Block, Component, Placeholder};
pub use config::GridConfig;
pub use error::LayoutError;
pub use grid::{AttachState, GridContainer};
pub use grid_layout::GridLayout;
pub use weight::{Weight, distribute};
