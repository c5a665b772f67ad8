#![forbid(unsafe_code)]

//! The component contract and its two simplest implementations.
//!
//! Anything placed in a grid implements [`Component`]. The grid container
//! implements it as well, which is what lets grids nest.

use std::fmt;

use trellis_core::geometry::{Point, Rect, Size};
use trellis_render::SurfaceHandle;

use crate::error::LayoutError;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Capabilities the layout engine needs from a node.
pub trait Component: fmt::Debug {
    /// Smallest width this component can be laid out at.
    fn min_width(&self) -> f64;

    /// Smallest height this component can be laid out at.
    fn min_height(&self) -> f64;

    fn min_size(&self) -> Size {
        Size::new(self.min_width(), self.min_height())
    }

    /// Replace the authored minimum size.
    ///
    /// Components whose minimum is derived return [`LayoutError::NotSettable`].
    fn set_min_size(&mut self, size: Size) -> Result<(), LayoutError>;

    /// The component gains nothing from extra width.
    fn is_fixed_width(&self) -> bool;

    /// The component gains nothing from extra height.
    fn is_fixed_height(&self) -> bool;

    /// Take the final position and size assigned by the parent.
    fn compute_layout(&mut self, origin: Point, size: Size) -> Result<(), LayoutError>;

    /// Bind the component to its region of a surface. Called at most once.
    fn attach(&mut self, surface: &SurfaceHandle) -> Result<(), LayoutError>;

    /// Whether [`attach`](Self::attach) has already succeeded.
    fn is_attached(&self) -> bool;

    /// Whether [`attach`](Self::attach) would succeed. Containers also ask
    /// their children.
    fn can_attach(&self) -> bool {
        !self.is_attached()
    }

    /// Draw into the attached surface using the last computed layout.
    fn render(&self);
}

/// Stand-in for an empty grid cell: zero-sized and fixed on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholder;

impl Component for Placeholder {
    fn min_width(&self) -> f64 {
        0.0
    }

    fn min_height(&self) -> f64 {
        0.0
    }

    fn set_min_size(&mut self, _size: Size) -> Result<(), LayoutError> {
        Err(LayoutError::NotSettable)
    }

    fn is_fixed_width(&self) -> bool {
        true
    }

    fn is_fixed_height(&self) -> bool {
        true
    }

    fn compute_layout(&mut self, _origin: Point, _size: Size) -> Result<(), LayoutError> {
        Ok(())
    }

    fn attach(&mut self, _surface: &SurfaceHandle) -> Result<(), LayoutError> {
        Ok(())
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn render(&self) {}
}

/// A labelled leaf with an authored minimum size.
///
/// Flexible on both axes unless told otherwise. Rendering records one draw
/// operation covering the last laid-out bounds.
#[derive(Debug, Clone)]
pub struct Block {
    label: String,
    min: Size,
    fixed_width: bool,
    fixed_height: bool,
    bounds: Option<Rect>,
    surface: Option<SurfaceHandle>,
}

impl Block {
    /// Create a flexible block. Negative or non-finite extents clamp to 0.
    #[must_use]
    pub fn new(label: impl Into<String>, min_width: f64, min_height: f64) -> Self {
        Self {
            label: label.into(),
            min: Size::new(sanitize(min_width), sanitize(min_height)),
            fixed_width: false,
            fixed_height: false,
            bounds: None,
            surface: None,
        }
    }

    #[must_use]
    pub fn fixed_width(mut self, fixed: bool) -> Self {
        self.fixed_width = fixed;
        self
    }

    #[must_use]
    pub fn fixed_height(mut self, fixed: bool) -> Self {
        self.fixed_height = fixed;
        self
    }

    /// Fixed on both axes.
    #[must_use]
    pub fn fixed(self) -> Self {
        self.fixed_width(true).fixed_height(true)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bounds from the most recent layout pass.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Region this block was attached to.
    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }
}

#[inline]
fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

impl Component for Block {
    fn min_width(&self) -> f64 {
        self.min.width
    }

    fn min_height(&self) -> f64 {
        self.min.height
    }

    fn set_min_size(&mut self, size: Size) -> Result<(), LayoutError> {
        if !size.is_valid() {
            return Err(LayoutError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        self.min = size;
        Ok(())
    }

    fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    fn is_fixed_height(&self) -> bool {
        self.fixed_height
    }

    fn compute_layout(&mut self, origin: Point, size: Size) -> Result<(), LayoutError> {
        self.bounds = Some(Rect::from_parts(origin, size));
        Ok(())
    }

    fn attach(&mut self, surface: &SurfaceHandle) -> Result<(), LayoutError> {
        if self.surface.is_some() {
            return Err(LayoutError::InvalidMutation { operation: "attach" });
        }
        #[cfg(feature = "tracing")]
        debug!(label = self.label.as_str(), region = surface.region_id(), "block attached");
        self.surface = Some(surface.clone());
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    fn render(&self) {
        if let (Some(surface), Some(bounds)) = (&self.surface, self.bounds) {
            surface.draw(bounds, self.label.as_str());
        }
    }
}
