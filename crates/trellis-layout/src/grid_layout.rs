#![forbid(unsafe_code)]

//! Solved grid geometry.
//!
//! A [`GridLayout`] is the output of one solve: final track extents, their
//! absolute start positions and the padding used between them. Cell and
//! span queries are pure lookups; nothing here calls back into components.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use trellis_core::geometry::{Point, Rect, Size};

use crate::weight::{positions, total_extent};

/// Final row heights, column widths and positions of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    origin: Point,
    row_heights: Vec<f64>,
    col_widths: Vec<f64>,
    row_positions: Vec<f64>,
    col_positions: Vec<f64>,
    row_minimums: Vec<f64>,
    col_minimums: Vec<f64>,
    row_padding: f64,
    col_padding: f64,
    named_areas: FxHashMap<String, (usize, usize)>,
}

/// Per-axis inputs of [`GridLayout::new`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Tracks {
    pub extents: Vec<f64>,
    pub minimums: Vec<f64>,
    pub padding: f64,
}

impl GridLayout {
    pub(crate) fn new(
        origin: Point,
        rows: Tracks,
        cols: Tracks,
        named_areas: FxHashMap<String, (usize, usize)>,
    ) -> Self {
        let row_positions = positions(&rows.extents, origin.y, rows.padding);
        let col_positions = positions(&cols.extents, origin.x, cols.padding);
        Self {
            origin,
            row_heights: rows.extents,
            col_widths: cols.extents,
            row_positions,
            col_positions,
            row_minimums: rows.minimums,
            col_minimums: cols.minimums,
            row_padding: rows.padding,
            col_padding: cols.padding,
            named_areas,
        }
    }

    /// Rectangle of a single cell; empty at the origin when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Rect {
        self.span(row, col, 1, 1)
    }

    /// Rectangle covering `rowspan x colspan` cells starting at `(row, col)`,
    /// padding between the spanned tracks included. Spans are clamped to the
    /// grid.
    pub fn span(&self, row: usize, col: usize, rowspan: usize, colspan: usize) -> Rect {
        if row >= self.row_heights.len() || col >= self.col_widths.len() {
            return Rect::from_parts(self.origin, Size::ZERO);
        }

        let end_row = (row + rowspan.max(1)).min(self.row_heights.len());
        let end_col = (col + colspan.max(1)).min(self.col_widths.len());

        Rect::new(
            self.col_positions[col],
            self.row_positions[row],
            total_extent(&self.col_widths[col..end_col], self.col_padding),
            total_extent(&self.row_heights[row..end_row], self.row_padding),
        )
    }

    /// Rectangle of a named cell, if the name was registered.
    pub fn area(&self, name: &str) -> Option<Rect> {
        self.named_areas
            .get(name)
            .map(|&(row, col)| self.cell(row, col))
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.row_heights.len()
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.col_widths.len()
    }

    /// Height of a row; 0 when out of bounds.
    #[inline]
    pub fn row_height(&self, row: usize) -> f64 {
        self.row_heights.get(row).copied().unwrap_or(0.0)
    }

    /// Width of a column; 0 when out of bounds.
    #[inline]
    pub fn col_width(&self, col: usize) -> f64 {
        self.col_widths.get(col).copied().unwrap_or(0.0)
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    pub fn col_widths(&self) -> &[f64] {
        &self.col_widths
    }

    /// Minimum heights the rows were solved against.
    pub fn row_minimums(&self) -> &[f64] {
        &self.row_minimums
    }

    /// Minimum widths the columns were solved against.
    pub fn col_minimums(&self) -> &[f64] {
        &self.col_minimums
    }

    /// Surplus handed to each row beyond its minimum.
    pub fn row_surplus(&self) -> Vec<f64> {
        surplus(&self.row_heights, &self.row_minimums)
    }

    /// Surplus handed to each column beyond its minimum.
    pub fn col_surplus(&self) -> Vec<f64> {
        surplus(&self.col_widths, &self.col_minimums)
    }

    /// Area covered by all tracks and the padding between them.
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(
            self.origin,
            Size::new(
                total_extent(&self.col_widths, self.col_padding),
                total_extent(&self.row_heights, self.row_padding),
            ),
        )
    }

    /// Iterate over all cells in row-major order, yielding `(row, col, Rect)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        let num_rows = self.num_rows();
        let num_cols = self.num_cols();
        (0..num_rows)
            .flat_map(move |row| (0..num_cols).map(move |col| (row, col, self.cell(row, col))))
    }
}

fn surplus(extents: &[f64], minimums: &[f64]) -> Vec<f64> {
    extents
        .iter()
        .zip(minimums)
        .map(|(extent, min)| extent - min)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(rows: &[f64], cols: &[f64], row_padding: f64, col_padding: f64) -> GridLayout {
        GridLayout::new(
            Point::ZERO,
            Tracks {
                extents: rows.to_vec(),
                minimums: vec![0.0; rows.len()],
                padding: row_padding,
            },
            Tracks {
                extents: cols.to_vec(),
                minimums: vec![0.0; cols.len()],
                padding: col_padding,
            },
            FxHashMap::default(),
        )
    }

    #[test]
    fn cells_without_padding() {
        let l = layout(&[10.0, 10.0], &[20.0, 20.0], 0.0, 0.0);
        assert_eq!(l.cell(0, 0), Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(l.cell(0, 1), Rect::new(20.0, 0.0, 20.0, 10.0));
        assert_eq!(l.cell(1, 0), Rect::new(0.0, 10.0, 20.0, 10.0));
        assert_eq!(l.cell(1, 1), Rect::new(20.0, 10.0, 20.0, 10.0));
    }

    #[test]
    fn cells_with_padding() {
        let l = layout(&[10.0, 10.0], &[20.0, 20.0], 2.0, 5.0);
        assert_eq!(l.cell(0, 1), Rect::new(25.0, 0.0, 20.0, 10.0));
        assert_eq!(l.cell(1, 0), Rect::new(0.0, 12.0, 20.0, 10.0));
        assert_eq!(l.bounds(), Rect::new(0.0, 0.0, 45.0, 22.0));
    }

    #[test]
    fn span_includes_inner_padding() {
        let l = layout(&[3.0], &[2.0, 2.0, 2.0], 0.0, 1.0);
        let span = l.span(0, 0, 1, 3);
        assert_eq!(span.width, 8.0);
        assert_eq!(span.height, 3.0);
    }

    #[test]
    fn span_clamps_to_grid() {
        let l = layout(&[4.0, 6.0], &[8.0, 12.0], 0.0, 0.0);
        assert_eq!(l.span(1, 1, 5, 5), Rect::new(8.0, 4.0, 12.0, 6.0));
        assert_eq!(l.span(0, 0, 0, 0), l.cell(0, 0));
    }

    #[test]
    fn out_of_bounds_is_empty_at_origin() {
        let l = layout(&[10.0], &[20.0], 0.0, 0.0);
        assert_eq!(l.cell(5, 5), Rect::default());
        assert_eq!(l.cell(0, 5), Rect::default());
        assert_eq!(l.row_height(99), 0.0);
        assert_eq!(l.col_width(99), 0.0);
    }

    #[test]
    fn origin_offsets_every_cell() {
        let l = GridLayout::new(
            Point::new(10.0, 5.0),
            Tracks {
                extents: vec![10.0],
                minimums: vec![0.0],
                padding: 0.0,
            },
            Tracks {
                extents: vec![20.0],
                minimums: vec![0.0],
                padding: 0.0,
            },
            FxHashMap::default(),
        );
        assert_eq!(l.cell(0, 0), Rect::new(10.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn iter_cells_is_row_major() {
        let l = layout(&[10.0, 10.0], &[20.0, 20.0], 0.0, 0.0);
        let cells: Vec<_> = l.iter_cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], (0, 1, Rect::new(20.0, 0.0, 20.0, 10.0)));
        assert_eq!(cells[2], (1, 0, Rect::new(0.0, 10.0, 20.0, 10.0)));
    }

    #[test]
    fn named_area_lookup() {
        let mut names = FxHashMap::default();
        names.insert("footer".to_string(), (1, 0));
        let l = GridLayout::new(
            Point::ZERO,
            Tracks {
                extents: vec![5.0, 7.0],
                minimums: vec![5.0, 3.0],
                padding: 1.0,
            },
            Tracks {
                extents: vec![9.0],
                minimums: vec![9.0],
                padding: 0.0,
            },
            names,
        );
        assert_eq!(l.area("footer"), Some(Rect::new(0.0, 6.0, 9.0, 7.0)));
        assert!(l.area("missing").is_none());
        assert_eq!(l.row_surplus(), vec![0.0, 4.0]);
        assert_eq!(l.col_surplus(), vec![0.0]);
    }

    #[test]
    fn serializes_for_inspection() {
        let l = layout(&[10.0], &[20.0], 0.0, 0.0);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["row_heights"], serde_json::json!([10.0]));
        assert_eq!(json["col_positions"], serde_json::json!([0.0]));
        let back: GridLayout = serde_json::from_value(json).unwrap();
        assert_eq!(back, l);
    }
}
