//! Board layout derived from the terminal size.

/// Size used when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Columns taken by the four vertical bars of the board (`│ │ │ │`).
const BORDER_COLUMNS: usize = 4;

/// Column widths for the three board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub col_widths: [usize; 3],
    pub rows: usize,
}

impl BoardGeometry {
    /// Split the usable width into three columns, handing any remainder to
    /// the leftmost columns one unit each. Every column gets at least
    /// `min_col_width`.
    pub fn compute(term_cols: u16, term_rows: u16, min_col_width: usize) -> Self {
        let min_col_width = min_col_width.max(1);
        let usable = (term_cols as usize)
            .saturating_sub(BORDER_COLUMNS)
            .max(min_col_width * 3);
        let (base, extra) = (usable / 3, usable % 3);
        let mut col_widths = [0; 3];
        for (i, w) in col_widths.iter_mut().enumerate() {
            *w = (base + usize::from(i < extra)).max(min_col_width);
        }
        BoardGeometry {
            col_widths,
            rows: term_rows as usize,
        }
    }

    /// Total width including borders.
    pub fn board_width(&self) -> usize {
        self.col_widths.iter().sum::<usize>() + BORDER_COLUMNS
    }
}
