//! # Occupancy Grid
//!
//! The 2D wall/open map every generation stage reads and writes.
//!
//! ## Layout
//!
//! Cells are stored flat in row-major order: `index = y * width + x`.
//! Coordinates are signed so neighbor probes may step off the map;
//! anything outside the grid reads as [`Tile::Wall`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::seed::MapRng;

/// State of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Walkable floor.
    #[default]
    Open = 0,
    /// Solid rock.
    Wall = 1,
}

impl Tile {
    /// Returns true for [`Tile::Wall`].
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// The opposite state.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Open => Self::Wall,
            Self::Wall => Self::Open,
        }
    }

    /// ASCII glyph: `#` for wall, `.` for open.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
        }
    }

    /// Parses an ASCII glyph.
    #[inline]
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Open),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }
}

/// Signed tile coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Creates a coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 4-neighborhood offsets.
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// 8-neighborhood offsets, row-major around the center.
pub const SURROUNDING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// =============================================================================
// GRID
// =============================================================================

/// Rectangular wall/open map.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl OccupancyGrid {
    /// Creates a grid with every cell open.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Open)
    }

    /// Creates a grid with every cell set to `tile`.
    #[must_use]
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; width * height],
        }
    }

    /// Builds a grid from ASCII rows (`#` wall, `.` open).
    ///
    /// Row `i` becomes `y = i`. Returns `None` when rows are ragged or
    /// contain any other character.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let before = cells.len();
            for c in row.chars() {
                cells.push(Tile::from_char(c)?);
            }
            if cells.len() - before != width {
                return None;
            }
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// True when the grid has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            // in_bounds guarantees both are non-negative
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// True when `(x, y)` lies on the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// True when `(x, y)` is on the outer ring.
    #[inline]
    #[must_use]
    pub fn is_border(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            && (x == 0 || y == 0 || x as usize == self.width - 1 || y as usize == self.height - 1)
    }

    /// Reads a cell. Out-of-bounds reads return [`Tile::Wall`].
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.cell_index(x, y).map_or(Tile::Wall, |i| self.cells[i])
    }

    /// Reads a cell by coordinate.
    #[inline]
    #[must_use]
    pub fn at(&self, coord: Coord) -> Tile {
        self.get(coord.x, coord.y)
    }

    /// Writes a cell. Returns `false` (and does nothing) when out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.cell_index(x, y) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Fills the grid from `rng`.
    ///
    /// Interior cells become wall when `rng.percent(fill_percent)` hits;
    /// the outer ring is always wall and draws nothing. Cells are visited
    /// row by row so the draw order is fixed.
    pub fn randomize(&mut self, rng: &mut MapRng, fill_percent: u8) {
        for y in 0..self.height {
            for x in 0..self.width {
                let border = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                let tile = if border || rng.percent(fill_percent) {
                    Tile::Wall
                } else {
                    Tile::Open
                };
                self.cells[y * self.width + x] = tile;
            }
        }
    }

    /// Number of walls in the 8 cells around `(x, y)`.
    ///
    /// Cells outside the grid count as wall.
    #[must_use]
    pub fn neighbor_wall_count(&self, x: i32, y: i32) -> u8 {
        let mut count = 0;
        for (dx, dy) in SURROUNDING {
            if self.get(x + dx, y + dy).is_wall() {
                count += 1;
            }
        }
        count
    }

    /// Number of cells equal to `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Sets every in-bounds cell of the inclusive rectangle to `tile`.
    pub fn fill_rect(&mut self, min: Coord, max: Coord, tile: Tile) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set(x, y, tile);
            }
        }
    }

    /// Copy of this grid surrounded by `border` rings of wall.
    #[must_use]
    pub fn with_border(&self, border: usize) -> Self {
        let width = self.width + border * 2;
        let height = self.height + border * 2;
        let mut padded = Self::filled(width, height, Tile::Wall);
        for y in 0..self.height {
            let src = y * self.width;
            let dst = (y + border) * width + border;
            padded.cells[dst..dst + self.width].copy_from_slice(&self.cells[src..src + self.width]);
        }
        padded
    }

    /// Iterates `(coord, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &tile)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let coord = Coord::new((i % width) as i32, (i / width) as i32);
            (coord, tile)
        })
    }

    /// Raw cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for tile in row {
                write!(f, "{}", tile.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
