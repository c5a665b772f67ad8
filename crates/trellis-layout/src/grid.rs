#![forbid(unsafe_code)]

//! Weighted grid container.
//!
//! [`GridContainer`] arranges child components in rows and columns. Layout
//! runs in two passes:
//!
//! 1. **Bottom-up**: each row's minimum height is the largest minimum height
//!    among its cells, each column's minimum width likewise. Children are
//!    queried on every call, so nested grids are always current.
//! 2. **Top-down**: free space (available minus minimum) is split across
//!    tracks by weight, added to the minimums, and every child is laid out at
//!    its cell's position.
//!
//! Unset weights are inferred per track: 0 when every cell in the track is
//! fixed along that axis, 1 otherwise.
//!
//! # Example
//!
//! ```
//! use trellis_core::geometry::Rect;
//! use trellis_layout::{Block, GridContainer};
//!
//! let mut grid = GridContainer::new();
//! grid.place(0, 0, Block::new("a", 10.0, 10.0)).unwrap();
//! grid.place(0, 1, Block::new("b", 20.0, 10.0)).unwrap();
//! grid.place(1, 0, Block::new("c", 10.0, 30.0)).unwrap();
//! grid.place(1, 1, Block::new("d", 20.0, 30.0)).unwrap();
//!
//! let layout = grid.layout(Rect::new(0.0, 0.0, 60.0, 60.0)).unwrap();
//! assert_eq!(layout.col_widths(), &[25.0, 35.0]);
//! assert_eq!(layout.row_heights(), &[20.0, 40.0]);
//! ```
//!
//! # Invariants
//!
//! 1. The cell table is rectangular after every mutation: `rows()` rows of
//!    `cols()` slots, each holding a component or a placeholder.
//! 2. Weight vectors have one entry per row and per column.
//! 3. Dimensions never shrink and occupied cells are never replaced.
//! 4. Once attached, the structure is frozen; weights, padding and child
//!    minimums may still change.
//! 5. A layout that fails its space check touches no child.

use rustc_hash::FxHashMap;
use trellis_core::geometry::{Point, Rect, Size};
use trellis_render::SurfaceHandle;

use crate::axis::Axis;
use crate::component::{Component, Placeholder};
use crate::config::{GridConfig, validate_padding};
use crate::error::LayoutError;
use crate::grid_layout::{GridLayout, Tracks};
use crate::weight::{Weight, distribute, total_extent};

#[cfg(feature = "tracing")]
use tracing::{debug, debug_span, trace, warn};

#[derive(Debug)]
enum Slot {
    Vacant(Placeholder),
    Occupied(Box<dyn Component>),
}

impl Slot {
    #[inline]
    fn vacant() -> Self {
        Self::Vacant(Placeholder)
    }

    #[inline]
    fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant(_))
    }

    #[inline]
    fn component(&self) -> &dyn Component {
        match self {
            Self::Vacant(placeholder) => placeholder,
            Self::Occupied(component) => component.as_ref(),
        }
    }

    #[inline]
    fn component_mut(&mut self) -> &mut (dyn Component + 'static) {
        match self {
            Self::Vacant(placeholder) => placeholder,
            Self::Occupied(component) => component.as_mut(),
        }
    }
}

impl From<Option<Box<dyn Component>>> for Slot {
    fn from(component: Option<Box<dyn Component>>) -> Self {
        component.map_or_else(Self::vacant, Self::Occupied)
    }
}

/// Whether a container has been bound to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachState {
    /// Structure may still change.
    #[default]
    Unattached,
    /// Structure is frozen.
    Attached,
}

/// A grid of components with per-track weights and padding.
#[derive(Debug, Default)]
pub struct GridContainer {
    cells: Vec<Vec<Slot>>,
    row_weights: Vec<Weight>,
    col_weights: Vec<Weight>,
    row_padding: f64,
    col_padding: f64,
    named_areas: FxHashMap<String, (usize, usize)>,
    state: AttachState,
    surface: Option<SurfaceHandle>,
    last_layout: Option<GridLayout>,
}

impl GridContainer {
    /// Create an empty grid.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a possibly jagged table. `None` entries become
    /// placeholders and short rows are padded.
    #[must_use]
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = Option<Box<dyn Component>>>,
    {
        let cells: Vec<Vec<Slot>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Slot::from).collect())
            .collect();
        let num_rows = cells.len();
        let num_cols = cells.iter().map(Vec::len).max().unwrap_or(0);

        let mut grid = Self {
            cells,
            ..Self::default()
        };
        grid.pad(num_rows, num_cols);
        grid
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_weights.len()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.col_weights.len()
    }

    #[inline]
    pub fn state(&self) -> AttachState {
        self.state
    }

    /// `(row_padding, col_padding)`.
    #[inline]
    pub fn padding(&self) -> (f64, f64) {
        (self.row_padding, self.col_padding)
    }

    /// Geometry from the most recent successful [`layout`](Self::layout).
    pub fn last_layout(&self) -> Option<&GridLayout> {
        self.last_layout.as_ref()
    }

    /// Region the grid was attached to.
    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }

    // ── Grid store ─────────────────────────────────────────────────────

    /// Extend the table so it holds at least `rows x cols` cells.
    fn pad(&mut self, rows: usize, cols: usize) {
        let rows = rows.max(self.rows());
        let cols = cols.max(self.cols());

        self.cells.resize_with(rows, Vec::new);
        for row in &mut self.cells {
            row.resize_with(cols, Slot::vacant);
        }
        self.row_weights.resize(rows, Weight::Auto);
        self.col_weights.resize(cols, Weight::Auto);
    }

    fn ensure_unattached(&self, operation: &'static str) -> Result<(), LayoutError> {
        if self.is_attached() {
            #[cfg(feature = "tracing")]
            debug!(operation, "structural mutation rejected after attach");
            return Err(LayoutError::InvalidMutation { operation });
        }
        Ok(())
    }

    /// Grow to at least `rows x cols`. Smaller requests are a no-op.
    pub fn grow_to(&mut self, rows: usize, cols: usize) -> Result<(), LayoutError> {
        self.ensure_unattached("grow")?;
        self.pad(rows, cols);
        Ok(())
    }

    /// Put `component` at `(row, col)`, growing the grid as needed.
    ///
    /// Fails if the grid is attached or the cell is already occupied; in
    /// both cases the grid is left unchanged.
    pub fn place<C>(&mut self, row: usize, col: usize, component: C) -> Result<(), LayoutError>
    where
        C: Component + 'static,
    {
        self.place_boxed(row, col, Box::new(component))
    }

    /// [`place`](Self::place) for an already boxed component.
    pub fn place_boxed(
        &mut self,
        row: usize,
        col: usize,
        component: Box<dyn Component>,
    ) -> Result<(), LayoutError> {
        self.ensure_unattached("place")?;
        if self.is_occupied(row, col) {
            return Err(LayoutError::CellOccupied { row, col });
        }
        let rows = row.checked_add(1).ok_or(LayoutError::IndexOutOfRange {
            axis: Axis::Rows,
            index: row,
            len: self.rows(),
        })?;
        let cols = col.checked_add(1).ok_or(LayoutError::IndexOutOfRange {
            axis: Axis::Columns,
            index: col,
            len: self.cols(),
        })?;
        self.pad(rows, cols);
        self.cells[row][col] = Slot::Occupied(component);
        Ok(())
    }

    /// [`place`](Self::place), and register `name` for
    /// [`GridLayout::area`] lookups. Names are unique; a taken name fails
    /// with [`LayoutError::DuplicateName`].
    pub fn place_named<C>(
        &mut self,
        name: impl Into<String>,
        row: usize,
        col: usize,
        component: C,
    ) -> Result<(), LayoutError>
    where
        C: Component + 'static,
    {
        self.ensure_unattached("place")?;
        let name = name.into();
        if self.named_areas.contains_key(&name) {
            return Err(LayoutError::DuplicateName { name });
        }
        self.place(row, col, component)?;
        self.named_areas.insert(name, (row, col));
        Ok(())
    }

    /// True when `(row, col)` exists and holds a real component.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|slots| slots.get(col))
            .is_some_and(|slot| !slot.is_vacant())
    }

    /// The component at `(row, col)`; `None` for vacant or missing cells.
    pub fn get(&self, row: usize, col: usize) -> Option<&dyn Component> {
        match self.cells.get(row)?.get(col)? {
            Slot::Occupied(component) => Some(component.as_ref()),
            Slot::Vacant(_) => None,
        }
    }

    /// Mutable access to an occupied cell's component.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut (dyn Component + 'static)> {
        match self.cells.get_mut(row)?.get_mut(col)? {
            Slot::Occupied(component) => Some(component.as_mut()),
            Slot::Vacant(_) => None,
        }
    }

    // ── Weights and padding ────────────────────────────────────────────

    fn weights(&self, axis: Axis) -> &[Weight] {
        match axis {
            Axis::Rows => &self.row_weights,
            Axis::Columns => &self.col_weights,
        }
    }

    fn weights_mut(&mut self, axis: Axis) -> &mut [Weight] {
        match axis {
            Axis::Rows => &mut self.row_weights,
            Axis::Columns => &mut self.col_weights,
        }
    }

    fn padding_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Rows => self.row_padding,
            Axis::Columns => self.col_padding,
        }
    }

    /// Set or clear (`Weight::Auto`) the weight of a row.
    pub fn set_row_weight(
        &mut self,
        index: usize,
        weight: impl Into<Weight>,
    ) -> Result<(), LayoutError> {
        self.set_weight(Axis::Rows, index, weight.into())
    }

    /// Set or clear (`Weight::Auto`) the weight of a column.
    pub fn set_column_weight(
        &mut self,
        index: usize,
        weight: impl Into<Weight>,
    ) -> Result<(), LayoutError> {
        self.set_weight(Axis::Columns, index, weight.into())
    }

    fn set_weight(&mut self, axis: Axis, index: usize, weight: Weight) -> Result<(), LayoutError> {
        if let Weight::Explicit(value) = weight {
            Weight::explicit(value).map_err(|weight| LayoutError::InvalidWeight {
                axis,
                index,
                weight,
            })?;
        }
        let len = self.weights(axis).len();
        let slot = self
            .weights_mut(axis)
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { axis, index, len })?;
        *slot = weight;
        Ok(())
    }

    pub fn row_weight(&self, index: usize) -> Option<Weight> {
        self.row_weights.get(index).copied()
    }

    pub fn column_weight(&self, index: usize) -> Option<Weight> {
        self.col_weights.get(index).copied()
    }

    /// Space between rows and between columns.
    pub fn set_padding(&mut self, row_padding: f64, col_padding: f64) -> Result<(), LayoutError> {
        validate_padding(row_padding, col_padding)?;
        self.row_padding = row_padding;
        self.col_padding = col_padding;
        Ok(())
    }

    /// Current padding and weights.
    pub fn config(&self) -> GridConfig {
        GridConfig {
            row_padding: self.row_padding,
            col_padding: self.col_padding,
            row_weights: self.row_weights.clone(),
            col_weights: self.col_weights.clone(),
        }
    }

    /// Apply padding and leading weights from `config`.
    ///
    /// The whole config is checked first; on error nothing is applied.
    pub fn apply_config(&mut self, config: &GridConfig) -> Result<(), LayoutError> {
        config.validate()?;
        for axis in Axis::BOTH {
            let given = config.weights(axis).len();
            let len = self.weights(axis).len();
            if given > len {
                return Err(LayoutError::IndexOutOfRange {
                    axis,
                    index: given - 1,
                    len,
                });
            }
        }

        self.row_padding = config.row_padding;
        self.col_padding = config.col_padding;
        for axis in Axis::BOTH {
            let weights = config.weights(axis);
            self.weights_mut(axis)[..weights.len()].copy_from_slice(weights);
        }
        Ok(())
    }

    // ── Minimum-size aggregation ───────────────────────────────────────

    fn track_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Rows => self.rows(),
            Axis::Columns => self.cols(),
        }
    }

    /// Components of one row or column, in order.
    fn track(&self, axis: Axis, index: usize) -> impl Iterator<Item = &dyn Component> + '_ {
        let len = match axis {
            Axis::Rows => self.cols(),
            Axis::Columns => self.rows(),
        };
        (0..len).map(move |position| {
            let (row, col) = axis.cell(index, position);
            self.cells[row][col].component()
        })
    }

    /// Minimum extent of every track along `axis`: the largest cell minimum
    /// in that track, 0 for a track of placeholders.
    pub fn track_minimums(&self, axis: Axis) -> Vec<f64> {
        (0..self.track_count(axis))
            .map(|index| {
                self.track(axis, index)
                    .map(|component| axis.min_extent(component))
                    .fold(0.0, f64::max)
            })
            .collect()
    }

    pub fn row_minimums(&self) -> Vec<f64> {
        self.track_minimums(Axis::Rows)
    }

    pub fn column_minimums(&self) -> Vec<f64> {
        self.track_minimums(Axis::Columns)
    }

    /// Aggregate minimum along `axis`, padding between tracks included.
    pub fn min_extent(&self, axis: Axis) -> f64 {
        total_extent(&self.track_minimums(axis), self.padding_along(axis))
    }

    /// Effective weight of every track along `axis`.
    pub fn resolved_weights(&self, axis: Axis) -> Vec<f64> {
        self.weights(axis)
            .iter()
            .enumerate()
            .map(|(index, weight)| {
                weight.resolve(|| self.track(axis, index).all(|c| axis.is_fixed(c)))
            })
            .collect()
    }

    // ── Space allocation and dispatch ──────────────────────────────────

    fn allocate(&self, axis: Axis, minimums: Vec<f64>, free: f64) -> Tracks {
        let weights = self.resolved_weights(axis);
        let extents: Vec<f64> = distribute(free, &weights)
            .into_iter()
            .zip(&minimums)
            .map(|(extra, min)| extra + min)
            .collect();

        #[cfg(feature = "tracing")]
        trace!(
            axis = axis.as_str(),
            free,
            weights = ?weights,
            extents = ?extents,
            "tracks allocated"
        );

        Tracks {
            extents,
            minimums,
            padding: self.padding_along(axis),
        }
    }

    /// Solve track geometry for `area` without touching any child.
    ///
    /// Fails with [`LayoutError::InsufficientSpace`] when `area` is smaller
    /// than the aggregate minimum on either axis, or is not a finite,
    /// non-negative size.
    pub fn solve(&self, area: Rect) -> Result<GridLayout, LayoutError> {
        let row_minimums = self.track_minimums(Axis::Rows);
        let col_minimums = self.track_minimums(Axis::Columns);
        let required = Size::new(
            total_extent(&col_minimums, self.col_padding),
            total_extent(&row_minimums, self.row_padding),
        );
        let available = area.size();

        if !available.is_valid() || !available.fits(required) {
            #[cfg(feature = "tracing")]
            warn!(
                required_width = required.width,
                required_height = required.height,
                available_width = available.width,
                available_height = available.height,
                "grid layout rejected: insufficient space"
            );
            return Err(LayoutError::InsufficientSpace {
                required,
                available,
            });
        }

        let rows = self.allocate(
            Axis::Rows,
            row_minimums,
            available.height - required.height,
        );
        let cols = self.allocate(
            Axis::Columns,
            col_minimums,
            available.width - required.width,
        );

        Ok(GridLayout::new(
            area.origin(),
            rows,
            cols,
            self.named_areas.clone(),
        ))
    }

    /// Solve for `area` and lay out every child at its cell.
    ///
    /// Offsets are absolute: cell `(0, 0)` starts at `area`'s origin.
    ///
    /// Children are visited in row-major order. If one fails, the children
    /// before it keep their new bounds and [`last_layout`](Self::last_layout)
    /// is cleared.
    pub fn layout(&mut self, area: Rect) -> Result<&GridLayout, LayoutError> {
        #[cfg(feature = "tracing")]
        let _span = debug_span!(
            "grid_layout",
            rows = self.rows(),
            cols = self.cols(),
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let solved = self.solve(area)?;
        if let Err(err) = self.dispatch(&solved) {
            self.last_layout = None;
            return Err(err);
        }

        let solved: &GridLayout = self.last_layout.insert(solved);
        Ok(solved)
    }

    fn dispatch(&mut self, solved: &GridLayout) -> Result<(), LayoutError> {
        for (row, slots) in self.cells.iter_mut().enumerate() {
            for (col, slot) in slots.iter_mut().enumerate() {
                let cell = solved.cell(row, col);
                slot.component_mut()
                    .compute_layout(cell.origin(), cell.size())?;
            }
        }
        Ok(())
    }
}

impl Component for GridContainer {
    fn min_width(&self) -> f64 {
        self.min_extent(Axis::Columns)
    }

    fn min_height(&self) -> f64 {
        self.min_extent(Axis::Rows)
    }

    fn set_min_size(&mut self, _size: Size) -> Result<(), LayoutError> {
        Err(LayoutError::NotSettable)
    }

    fn is_fixed_width(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|slot| slot.component().is_fixed_width())
    }

    fn is_fixed_height(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|slot| slot.component().is_fixed_height())
    }

    fn compute_layout(&mut self, origin: Point, size: Size) -> Result<(), LayoutError> {
        self.layout(Rect::from_parts(origin, size)).map(|_| ())
    }

    /// Freeze the structure and attach each occupied cell to its own child
    /// region of `surface`, labelled `cell[row,col]`.
    ///
    /// Fails without creating any region when the grid or any descendant is
    /// already attached. The grid only becomes attached once every child has.
    fn attach(&mut self, surface: &SurfaceHandle) -> Result<(), LayoutError> {
        self.ensure_unattached("attach")?;
        if !self.can_attach() {
            #[cfg(feature = "tracing")]
            debug!(operation = "attach", "attach rejected: a child is already attached");
            return Err(LayoutError::InvalidMutation { operation: "attach" });
        }

        for (row, slots) in self.cells.iter_mut().enumerate() {
            for (col, slot) in slots.iter_mut().enumerate() {
                if let Slot::Occupied(child) = slot {
                    child.attach(&surface.region(format!("cell[{row},{col}]")))?;
                }
            }
        }
        self.state = AttachState::Attached;
        self.surface = Some(surface.clone());

        #[cfg(feature = "tracing")]
        debug!(
            region = surface.region_id(),
            rows = self.rows(),
            cols = self.cols(),
            "grid attached"
        );
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.state == AttachState::Attached
    }

    fn can_attach(&self) -> bool {
        !self.is_attached()
            && self
                .cells
                .iter()
                .flatten()
                .all(|slot| slot.component().can_attach())
    }

    fn render(&self) {
        #[cfg(feature = "tracing")]
        let _span = debug_span!("grid_render", rows = self.rows(), cols = self.cols()).entered();

        for slot in self.cells.iter().flatten() {
            slot.component().render();
        }
    }
}
