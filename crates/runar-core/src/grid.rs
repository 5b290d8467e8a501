use tracing::info;

use crate::diagnostics::LoadError;
use crate::pentimal;
use crate::pointer::{Pointer, Vec2};

/// Decoded program text. Rows may differ in length and never change after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

/// A loaded program: the grid plus its pointers in scan order.
#[derive(Debug, Clone)]
pub struct Program {
    pub grid: Grid,
    pub pointers: Vec<Pointer>,
}

/// Decodes `source` line by line (trailing whitespace dropped) and seeds one
/// pointer per start glyph, scanning row-major.
pub fn load(source: &str) -> Result<Program, LoadError> {
    let grid = Grid::parse(source)?;
    let pointers = grid.spawn_pointers();
    info!(
        rows = grid.row_count(),
        pointers = pointers.len(),
        "loaded program"
    );
    Ok(Program { grid, pointers })
}

impl Grid {
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let rows = source
            .lines()
            .enumerate()
            .map(|(idx, line)| pentimal::decode_line(line.trim_end(), idx + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Grid::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self, LoadError> {
        if rows.is_empty() {
            return Err(LoadError::empty_source());
        }
        Ok(Grid { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, Vec::len)
    }

    pub fn cell(&self, x: i64, y: i64) -> Option<char> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Rows as strings, for the startup listing.
    pub fn render(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn spawn_pointers(&self) -> Vec<Pointer> {
        let mut out = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if let Some(p) = Pointer::spawn(out.len(), x as i64, y as i64, c) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Folds a raw position back onto the sheared torus.
    ///
    /// Leaving through the bottom (top) lands on the first (last) row with `x`
    /// shifted by `+bias.x` (`-bias.x`); leaving through the right (left) end of
    /// a row lands on its first (last) cell with `y` shifted by `+bias.y`
    /// (`-bias.y`). The row-end test uses the `x` the pointer arrived with, not
    /// the column shifted by a vertical exit. A shift can carry the pointer
    /// across another edge, so the rules are reapplied until the position lands
    /// on a cell. `None` means no cell is reachable, e.g. a pointer stuck on an
    /// empty row.
    pub fn wrap(&self, mut x: i64, mut y: i64, bias: Vec2) -> Option<(i64, i64)> {
        for _ in 0..2 * (self.rows.len() + 2) {
            if self.cell(x, y).is_some() {
                return Some((x, y));
            }
            (x, y) = self.wrap_once(x, y, bias);
        }
        None
    }

    fn wrap_once(&self, mut x: i64, mut y: i64, bias: Vec2) -> (i64, i64) {
        let rows = self.rows.len() as i64;
        let arrived_x = x;
        if y >= rows {
            y = 0;
            x += bias.x;
        } else if y < 0 {
            y = rows - 1;
            x -= bias.x;
        }
        let len = self.row_len(y as usize) as i64;
        if arrived_x >= len {
            x = 0;
            y += bias.y;
        } else if arrived_x < 0 {
            x = len - 1;
            y -= bias.y;
        }
        (x, y)
    }
}
