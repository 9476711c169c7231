//! Reveal targets: ordered cells that become visible one at a time.

use super::error::RevealError;

/// A rectangular grid of palette indices, stored row-major.
///
/// Index `0` marks a transparent cell that is never drawn and never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    cells: Vec<u8>,
}

/// One content-bearing grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Palette index, never `0`.
    pub value: u8,
}

impl PixelGrid {
    /// Builds a grid from a fixed-size table. Rectangularity is guaranteed by
    /// the array type.
    #[must_use]
    pub fn from_array<const W: usize, const H: usize>(rows: &[[u8; W]; H]) -> Self {
        Self {
            width: W,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    /// Builds a grid from rows of arbitrary length.
    ///
    /// # Errors
    ///
    /// Returns `RevealError::RaggedGrid` if the rows differ in width and
    /// `RevealError::ZeroWidth` if the rows are empty.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, RevealError> {
        let Some(first) = rows.first() else {
            return Ok(Self {
                width: 0,
                cells: Vec::new(),
            });
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(RevealError::ZeroWidth);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(RevealError::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self { width, cells })
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.cells.len() / self.width
        }
    }

    /// Palette index at the given position, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    /// Number of non-transparent cells.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    /// All content-bearing cells in row-major order.
    pub fn content_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(move |(index, value)| GridCell {
                row: index / width,
                col: index % width,
                value: *value,
            })
    }
}

/// What a reveal target draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealContent {
    /// Typewriter text; every `char` is one cell.
    Text(String),
    /// Pixel art; every non-zero cell is one cell.
    Grid(PixelGrid),
}

/// An ordered set of cells to reveal, with its content-bearing total fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTarget {
    content: RevealContent,
    total: usize,
}

impl RevealTarget {
    /// A typewriter target.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            content: RevealContent::Text(text),
            total,
        }
    }

    /// A pixel-art target.
    #[must_use]
    pub fn grid(grid: PixelGrid) -> Self {
        let total = grid.content_count();
        Self {
            content: RevealContent::Grid(grid),
            total,
        }
    }

    /// Number of content-bearing cells.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The underlying content.
    #[must_use]
    pub fn content(&self) -> &RevealContent {
        &self.content
    }

    /// The first `revealed` characters of a text target; `None` for grids.
    #[must_use]
    pub fn visible_text(&self, revealed: usize) -> Option<&str> {
        let RevealContent::Text(text) = &self.content else {
            return None;
        };
        let end = text
            .char_indices()
            .nth(revealed)
            .map_or(text.len(), |(offset, _)| offset);
        Some(&text[..end])
    }

    /// The first `revealed` content-bearing cells of a grid target, in
    /// row-major order. Empty for text targets.
    pub fn visible_cells(&self, revealed: usize) -> impl Iterator<Item = GridCell> + '_ {
        let cells = match &self.content {
            RevealContent::Grid(grid) => Some(grid.content_cells()),
            RevealContent::Text(_) => None,
        };
        cells.into_iter().flatten().take(revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_target_counts_every_char() {
        let target = RevealTarget::text("sí, tú");

        assert_eq!(target.total(), 6);
    }

    #[test]
    fn test_visible_text_respects_char_boundaries() {
        let target = RevealTarget::text("¿Sabía?");

        assert_eq!(target.visible_text(0), Some(""));
        assert_eq!(target.visible_text(1), Some("¿"));
        assert_eq!(target.visible_text(5), Some("¿Sabí"));
        assert_eq!(target.visible_text(99), Some("¿Sabía?"));
    }

    #[test]
    fn test_grid_target_skips_transparent_cells() {
        let grid = PixelGrid::from_array(&[[0, 1, 0], [2, 0, 3]]);
        let target = RevealTarget::grid(grid);

        assert_eq!(target.total(), 3);
        assert_eq!(target.visible_text(1), None);
    }

    #[test]
    fn test_visible_cells_are_first_k_in_row_major_order() {
        let grid = PixelGrid::from_array(&[[0, 1, 0], [2, 0, 3]]);
        let target = RevealTarget::grid(grid);

        let visible: Vec<GridCell> = target.visible_cells(2).collect();

        assert_eq!(
            visible,
            vec![
                GridCell {
                    row: 0,
                    col: 1,
                    value: 1
                },
                GridCell {
                    row: 1,
                    col: 0,
                    value: 2
                },
            ]
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 1], vec![1]];

        let result = PixelGrid::from_rows(&rows);

        assert_eq!(
            result,
            Err(RevealError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_zero_width_rows() {
        let rows: Vec<Vec<u8>> = vec![vec![], vec![]];

        assert_eq!(PixelGrid::from_rows(&rows), Err(RevealError::ZeroWidth));
    }

    #[test]
    fn test_from_rows_accepts_empty_grid_with_no_content() {
        let rows: Vec<Vec<u8>> = Vec::new();

        let grid = PixelGrid::from_rows(&rows).unwrap();

        assert_eq!(grid.height(), 0);
        assert_eq!(RevealTarget::grid(grid).total(), 0);
    }

    #[test]
    fn test_get_returns_none_out_of_bounds() {
        let grid = PixelGrid::from_array(&[[1, 2], [3, 4]]);

        assert_eq!(grid.get(1, 0), Some(3));
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(2, 0), None);
    }
}
