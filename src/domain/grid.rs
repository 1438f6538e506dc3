/// The playing field: an immutable rectangle of cell symbols.
///
/// ## Invariants
///   - at least one row and one column (`TableSize` is non-zero)
///   - every row has the same length
///
/// The only way to build a `Grid` is `Grid::generate`, so both invariants
/// hold by construction. Every operation borrows `self` and returns a new
/// grid; nothing here mutates a grid in place.

use std::num::NonZeroUsize;

use super::coord::Coordinate;
use super::symbol::Symbol;

/// Rows × columns of a grid. Zero in either dimension is unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableSize {
    row: NonZeroUsize,
    column: NonZeroUsize,
}

impl TableSize {
    pub fn new(row: usize, column: usize) -> Option<Self> {
        Some(TableSize {
            row: NonZeroUsize::new(row)?,
            column: NonZeroUsize::new(column)?,
        })
    }

    pub fn row(self) -> usize {
        self.row.get()
    }

    pub fn column(self) -> usize {
        self.column.get()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: Vec<Vec<Symbol>>,
}

impl Grid {
    /// A `size.row() × size.column()` grid with every cell set to `fill`.
    pub fn generate(size: TableSize, fill: Symbol) -> Self {
        Grid { rows: vec![vec![fill; size.column()]; size.row()] }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self) -> &[Vec<Symbol>] {
        &self.rows
    }

    /// Symbol at `at`, or `None` when out of bounds.
    pub fn lookup(&self, at: Coordinate) -> Option<Symbol> {
        let (row, col) = at.to_index()?;
        self.rows.get(row)?.get(col).copied()
    }

    /// New grid with one cell replaced. Out of bounds is a no-op.
    #[must_use]
    pub fn update_at(&self, at: Coordinate, symbol: Symbol) -> Self {
        let mut next = self.clone();
        next.write(at, symbol);
        next
    }

    /// Writes `symbol` at every coordinate, left to right; later writes win.
    #[must_use]
    pub fn update_by_array(&self, coords: &[Coordinate], symbol: Symbol) -> Self {
        let mut next = self.clone();
        for &at in coords {
            next.write(at, symbol);
        }
        next
    }

    /// Paints the outermost rows and columns with `symbol`. Idempotent.
    #[must_use]
    pub fn add_frame(&self, symbol: Symbol) -> Self {
        let last_row = self.row_count() - 1;
        let last_col = self.column_count() - 1;
        let rows = self.rows.iter().enumerate().map(|(y, row)| {
            row.iter().enumerate().map(|(x, &cell)| {
                if y == 0 || y == last_row || x == 0 || x == last_col { symbol } else { cell }
            }).collect()
        }).collect();
        Grid { rows }
    }

    /// Cell-wise substitution of `original` by `result`.
    #[must_use]
    pub fn replace(&self, original: Symbol, result: Symbol) -> Self {
        let rows = self.rows.iter()
            .map(|row| row.iter().map(|&c| if c == original { result } else { c }).collect())
            .collect();
        Grid { rows }
    }

    /// Every Blank cell in row-major order (row 0 left to right, then row 1, ...).
    /// The order is what the spawn sampler draws from, so it must stay stable.
    pub fn find_blanks(&self) -> Vec<Coordinate> {
        self.rows.iter().enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate()
                    .filter(|(_, c)| c.is_blank())
                    .map(move |(x, _)| Coordinate::new(x as i32, y as i32))
            })
            .collect()
    }

    pub fn count_blanks(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_blank()).count()
    }

    /// Rows concatenated, joined by `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.rows.iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Internal ──

    fn write(&mut self, at: Coordinate, symbol: Symbol) {
        if let Some((row, col)) = at.to_index() {
            if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = symbol;
            }
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Test helper: build a grid from text rows via `generate` + `update_at`.
/// Unknown characters become Blank.
#[cfg(test)]
pub(crate) fn grid_from(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows[0].chars().count();
    let size = TableSize::new(height, width).expect("non-empty rows");
    let mut grid = Grid::generate(size, Symbol::Blank);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let symbol = Symbol::from_char(ch).unwrap_or(Symbol::Blank);
            grid = grid.update_at(Coordinate::new(x as i32, y as i32), symbol);
        }
    }
    grid
}
