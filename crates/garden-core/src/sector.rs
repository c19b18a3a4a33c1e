//! Sector layout: fixed-size rectangular tiles of the garden grid.
//!
//! Policies act on one sector at a time. Sectors are `sector_rows x
//! sector_cols` tiles; a sector index decodes to its top-left corner as
//!
//! ```text
//! x_low = (sector mod (rows / sector_rows)) * sector_rows
//! y_low = (sector div (cols / sector_cols)) * sector_cols
//! ```
//!
//! Only when both axes have the same number of tiles does every index decode
//! to a distinct tile; otherwise some indices share a tile. When there are
//! more row tiles than column tiles, indices past `col_tiles * col_tiles`
//! would decode beyond the last column, so [`SectorLayout::count`] stops
//! before them.

use garden_types::GridPos;

/// Errors describing an unusable sector layout or index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectorError {
    /// Sector dimensions must be positive.
    #[error("sector dimensions must be positive (got {rows}x{cols})")]
    ZeroSize {
        /// Requested sector rows.
        rows: usize,
        /// Requested sector columns.
        cols: usize,
    },

    /// A sector does not fit in the garden.
    #[error("{sector_rows}x{sector_cols} sectors do not fit in a {garden_rows}x{garden_cols} garden")]
    LargerThanGarden {
        /// Garden rows.
        garden_rows: usize,
        /// Garden columns.
        garden_cols: usize,
        /// Sector rows.
        sector_rows: usize,
        /// Sector columns.
        sector_cols: usize,
    },

    /// A sector index past the last sector.
    #[error("sector {sector} is out of range (layout has {count} sectors)")]
    OutOfRange {
        /// The offending index.
        sector: usize,
        /// Number of sectors in the layout.
        count: usize,
    },
}

/// Half-open `[low, high)` row and column ranges of one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorBounds {
    /// First row.
    pub x_low: usize,
    /// One past the last row.
    pub x_high: usize,
    /// First column.
    pub y_low: usize,
    /// One past the last column.
    pub y_high: usize,
}

impl SectorBounds {
    /// Middle cell of the sector (rounded towards the top-left).
    pub const fn center(&self) -> GridPos {
        let half_rows = self.x_high.saturating_sub(self.x_low) / 2;
        let half_cols = self.y_high.saturating_sub(self.y_low) / 2;
        GridPos::new(
            self.x_low.saturating_add(half_rows),
            self.y_low.saturating_add(half_cols),
        )
    }

    /// Whether `pos` lies inside the sector.
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row >= self.x_low && pos.row < self.x_high && pos.col >= self.y_low && pos.col < self.y_high
    }
}

/// Garden dimensions together with the sector size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLayout {
    garden_rows: usize,
    garden_cols: usize,
    sector_rows: usize,
    sector_cols: usize,
    row_tiles: usize,
    col_tiles: usize,
}

impl SectorLayout {
    /// Validate a layout.
    ///
    /// # Errors
    ///
    /// Returns [`SectorError::ZeroSize`] for an empty sector and
    /// [`SectorError::LargerThanGarden`] when one sector does not fit.
    pub fn new(
        garden_rows: usize,
        garden_cols: usize,
        sector_rows: usize,
        sector_cols: usize,
    ) -> Result<Self, SectorError> {
        if sector_rows == 0 || sector_cols == 0 {
            return Err(SectorError::ZeroSize {
                rows: sector_rows,
                cols: sector_cols,
            });
        }
        let row_tiles = garden_rows.checked_div(sector_rows).unwrap_or(0);
        let col_tiles = garden_cols.checked_div(sector_cols).unwrap_or(0);
        if row_tiles == 0 || col_tiles == 0 {
            return Err(SectorError::LargerThanGarden {
                garden_rows,
                garden_cols,
                sector_rows,
                sector_cols,
            });
        }
        Ok(Self {
            garden_rows,
            garden_cols,
            sector_rows,
            sector_cols,
            row_tiles,
            col_tiles,
        })
    }

    /// Garden rows.
    pub const fn garden_rows(&self) -> usize {
        self.garden_rows
    }

    /// Garden columns.
    pub const fn garden_cols(&self) -> usize {
        self.garden_cols
    }

    /// Rows per sector.
    pub const fn sector_rows(&self) -> usize {
        self.sector_rows
    }

    /// Columns per sector.
    pub const fn sector_cols(&self) -> usize {
        self.sector_cols
    }

    /// Number of addressable sectors.
    pub fn count(&self) -> usize {
        self.col_tiles
            .saturating_mul(self.row_tiles.min(self.col_tiles))
    }

    /// Row and column ranges of `sector`, clipped to the garden.
    ///
    /// # Errors
    ///
    /// Returns [`SectorError::OutOfRange`] if `sector >= self.count()`.
    pub fn bounds(&self, sector: usize) -> Result<SectorBounds, SectorError> {
        let count = self.count();
        if sector >= count {
            return Err(SectorError::OutOfRange { sector, count });
        }
        let x_tile = sector.checked_rem(self.row_tiles).unwrap_or(0);
        let y_tile = sector.checked_div(self.col_tiles).unwrap_or(0);
        let x_low = x_tile.saturating_mul(self.sector_rows);
        let y_low = y_tile.saturating_mul(self.sector_cols);
        Ok(SectorBounds {
            x_low,
            x_high: x_low.saturating_add(self.sector_rows).min(self.garden_rows),
            y_low,
            y_high: y_low.saturating_add(self.sector_cols).min(self.garden_cols),
        })
    }
}
