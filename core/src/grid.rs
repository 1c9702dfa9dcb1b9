//! Minimum-cost monotone paths over a rectangular cost grid.
//!
//! A path starts at the top-left cell and ends at the bottom-right cell; each
//! step moves right, down, or diagonally down-right. The cost of a path is the
//! sum of every cell it visits, both endpoints included.
//!
//! # Design
//! The recurrence fills an accumulator table `T` of the grid's shape:
//!
//! ```text
//! T[0][0] = G[0][0]
//! T[i][0] = T[i-1][0] + G[i][0]
//! T[0][j] = T[0][j-1] + G[0][j]
//! T[i][j] = G[i][j] + min(T[i-1][j], T[i][j-1], T[i-1][j-1])
//! ```
//!
//! [`accumulate`] materializes the whole table; [`Grid::min_cost`] keeps only
//! the previous row. Both share `best_predecessor` so they cannot drift.
//! Moves are strictly monotone, so negative costs are fine.
//!
//! Totals are carried as `i128`. A path visits fewer than `rows + cols`
//! cells, so no table entry of an in-memory `i64` grid can overflow it; only
//! the final answer is narrowed back to `i64`.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, InvalidInputReason};

/// A validated, rectangular grid of integer cell costs.
///
/// Cells live in one buffer indexed by `row * cols + col`. Construction
/// rejects an empty grid, an empty first row, and rows whose length differs
/// from the first row's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Grid {
    pub fn new(rows: &[Vec<i64>]) -> Result<Self, InvalidInputError> {
        let first = rows.first().ok_or(InvalidInputReason::Empty)?;
        let cols = first.len();
        if cols == 0 {
            return Err(InvalidInputReason::EmptyFirstRow.into());
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(InvalidInputReason::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                }
                .into());
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[i64]> {
        self.cells.chunks(self.cols).nth(row)
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells.chunks(self.cols).map(<[i64]>::to_vec).collect()
    }

    /// Minimum path cost, evaluated one row at a time in O(cols) space.
    ///
    /// Agrees with `accumulate(self).min_cost()`.
    pub fn min_cost(&self) -> Result<i64, InvalidInputError> {
        let mut above: Vec<i128> = Vec::with_capacity(self.cols);
        let mut current: Vec<i128> = Vec::with_capacity(self.cols);

        for (i, costs) in self.cells.chunks(self.cols).enumerate() {
            current.clear();
            for (j, &cost) in costs.iter().enumerate() {
                let best = best_predecessor(&above, &current, i, j);
                current.push(extend(best, cost));
            }
            std::mem::swap(&mut above, &mut current);
        }

        narrow(above[self.cols - 1], self.rows, self.cols)
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = InvalidInputError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Grid::new(&rows)
    }
}

impl From<Grid> for Vec<Vec<i64>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

/// Minimum cumulative cost to reach every cell from the origin.
///
/// Same shape as the [`Grid`] it was derived from, and owns its own buffer.
/// Entries are `i128`: an intermediate total may exceed `i64` even when the
/// minimum path does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorTable {
    rows: usize,
    cols: usize,
    totals: Vec<i128>,
}

impl AccumulatorTable {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i128> {
        if row < self.rows && col < self.cols {
            Some(self.totals[row * self.cols + col])
        } else {
            None
        }
    }

    /// The bottom-right entry: the minimum path cost over the whole grid.
    pub fn total(&self) -> i128 {
        self.totals[self.rows * self.cols - 1]
    }

    /// [`AccumulatorTable::total`] as an `i64`, or `Overflow` at the
    /// bottom-right cell when it does not fit.
    pub fn min_cost(&self) -> Result<i64, InvalidInputError> {
        narrow(self.total(), self.rows, self.cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<i128>> {
        self.totals.chunks(self.cols).map(<[i128]>::to_vec).collect()
    }
}

/// Fill the full accumulator table for `grid`.
pub fn accumulate(grid: &Grid) -> AccumulatorTable {
    let cols = grid.cols;
    let mut totals: Vec<i128> = Vec::with_capacity(grid.cells.len());

    for (i, costs) in grid.cells.chunks(cols).enumerate() {
        let row_start = i * cols;
        for (j, &cost) in costs.iter().enumerate() {
            let (done, current) = totals.split_at(row_start);
            let above = if i == 0 { &[][..] } else { &done[row_start - cols..] };
            let best = best_predecessor(above, current, i, j);
            totals.push(extend(best, cost));
        }
    }

    AccumulatorTable {
        rows: grid.rows,
        cols,
        totals,
    }
}

/// Minimum path cost over `rows`, validating them as a [`Grid`] first.
///
/// ```
/// let cost = mallkit_core::min_cost_path(&[
///     vec![1, 2, 3],
///     vec![4, 8, 2],
///     vec![1, 5, 3],
/// ])
/// .unwrap();
/// assert_eq!(cost, 8);
/// ```
pub fn min_cost_path(rows: &[Vec<i64>]) -> Result<i64, InvalidInputError> {
    Grid::new(rows)?.min_cost()
}

/// The 3x3 grid the CLI falls back to when no grid file is given.
pub fn sample_grid() -> Grid {
    Grid {
        rows: 3,
        cols: 3,
        cells: vec![1, 2, 3, 4, 8, 2, 1, 5, 3],
    }
}

/// Cheapest finished neighbour of cell (`i`, `j`): above, left, or
/// diagonally up-left. `above` is row `i - 1` (unused when `i == 0`);
/// `current` holds row `i` up to but excluding column `j`.
fn best_predecessor(above: &[i128], current: &[i128], i: usize, j: usize) -> Option<i128> {
    match (i, j) {
        (0, 0) => None,
        (0, _) => Some(current[j - 1]),
        (_, 0) => Some(above[0]),
        _ => Some(above[j].min(current[j - 1]).min(above[j - 1])),
    }
}

fn extend(best: Option<i128>, cost: i64) -> i128 {
    best.unwrap_or(0) + i128::from(cost)
}

fn narrow(total: i128, rows: usize, cols: usize) -> Result<i64, InvalidInputError> {
    i64::try_from(total).map_err(|_| {
        InvalidInputReason::Overflow {
            row: rows - 1,
            col: cols - 1,
        }
        .into()
    })
}
