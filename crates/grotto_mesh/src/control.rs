//! # Control Grid
//!
//! The dual grid marching squares walks over.
//!
//! Every grid cell owns one **corner node** at its center, active when the
//! cell is wall, plus two **midpoint nodes**: half a square to its right
//! (`+x`) and half a square above it (`+z`, which is grid `+y`). Four
//! neighboring corner nodes form a [`ControlSquare`].
//!
//! All nodes share one id space:
//!
//! ```text
//! corner   (x, y)       -> y * width + x
//! midpoint (x, y, axis) -> width * height + (y * width + x) * 2 + axis
//! ```
//!
//! so a flat `Vec` keyed by [`NodeId`] can cache per-node data.
//!
//! The mesh is centered on the origin:
//! `x = -W*s/2 + cx*s + s/2`, `z = -H*s/2 + cy*s + s/2`, `y = 0`.

use grotto_procedural::OccupancyGrid;

/// Direction of a midpoint node from its owning corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Axis {
    /// Half a square along +x.
    X = 0,
    /// Half a square along +z (grid +y).
    Y = 1,
}

/// Index of a node in the shared id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Configuration bit of each square corner.
pub mod bits {
    /// Top-left corner active.
    pub const TOP_LEFT: u8 = 8;
    /// Top-right corner active.
    pub const TOP_RIGHT: u8 = 4;
    /// Bottom-right corner active.
    pub const BOTTOM_RIGHT: u8 = 2;
    /// Bottom-left corner active.
    pub const BOTTOM_LEFT: u8 = 1;
}

/// Four corner nodes, their four edge midpoints and the 4-bit case index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlSquare {
    /// Corner at `(x, y + 1)`.
    pub top_left: NodeId,
    /// Corner at `(x + 1, y + 1)`.
    pub top_right: NodeId,
    /// Corner at `(x + 1, y)`.
    pub bottom_right: NodeId,
    /// Corner at `(x, y)`.
    pub bottom_left: NodeId,
    /// Midpoint between the top corners.
    pub center_top: NodeId,
    /// Midpoint between the right corners.
    pub center_right: NodeId,
    /// Midpoint between the bottom corners.
    pub center_bottom: NodeId,
    /// Midpoint between the left corners.
    pub center_left: NodeId,
    /// Sum of the [`bits`] of every active corner, 0..=15.
    pub configuration: u8,
}

/// Node positions and activity for a whole grid.
#[derive(Clone, Debug)]
pub struct ControlGrid {
    width: usize,
    height: usize,
    square_size: f32,
    active: Vec<bool>,
}

impl ControlGrid {
    /// Builds the control grid of `grid` with cells `square_size` wide.
    #[must_use]
    pub fn new(grid: &OccupancyGrid, square_size: f32) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            square_size,
            active: grid.cells().iter().map(|tile| tile.is_wall()).collect(),
        }
    }

    /// Corner nodes per row.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Corner node rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of node ids (corners and midpoints).
    #[inline]
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.width * self.height * 3
    }

    /// Squares per row.
    #[inline]
    #[must_use]
    pub const fn squares_wide(&self) -> usize {
        self.width.saturating_sub(1)
    }

    /// Square rows.
    #[inline]
    #[must_use]
    pub const fn squares_high(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Id of the corner node of cell `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn corner(&self, x: usize, y: usize) -> NodeId {
        NodeId(y * self.width + x)
    }

    /// Id of the midpoint node owned by cell `(x, y)` along `axis`.
    #[inline]
    #[must_use]
    pub const fn midpoint(&self, x: usize, y: usize, axis: Axis) -> NodeId {
        NodeId(self.width * self.height + (y * self.width + x) * 2 + axis as usize)
    }

    /// True when `node` is a corner whose cell is wall.
    #[inline]
    #[must_use]
    pub fn is_active(&self, node: NodeId) -> bool {
        self.active.get(node.0).copied().unwrap_or(false)
    }

    /// Mesh-space position of any node.
    #[must_use]
    pub fn position(&self, node: NodeId) -> [f32; 3] {
        let cells = self.width * self.height;
        let (cell, offset) = if node.0 < cells {
            (node.0, [0.0, 0.0])
        } else {
            let local = node.0 - cells;
            let half = self.square_size / 2.0;
            let offset = if local % 2 == 0 { [half, 0.0] } else { [0.0, half] };
            (local / 2, offset)
        };
        let [x, z] = self.cell_center(cell % self.width.max(1), cell / self.width.max(1));
        [x + offset[0], 0.0, z + offset[1]]
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell_center(&self, x: usize, y: usize) -> [f32; 2] {
        let s = self.square_size;
        [
            -(self.width as f32) * s / 2.0 + x as f32 * s + s / 2.0,
            -(self.height as f32) * s / 2.0 + y as f32 * s + s / 2.0,
        ]
    }

    /// The square whose bottom-left corner is cell `(x, y)`.
    ///
    /// Valid for `x < squares_wide()` and `y < squares_high()`.
    #[must_use]
    pub fn square(&self, x: usize, y: usize) -> ControlSquare {
        let top_left = self.corner(x, y + 1);
        let top_right = self.corner(x + 1, y + 1);
        let bottom_right = self.corner(x + 1, y);
        let bottom_left = self.corner(x, y);

        let mut configuration = 0;
        for (node, bit) in [
            (top_left, bits::TOP_LEFT),
            (top_right, bits::TOP_RIGHT),
            (bottom_right, bits::BOTTOM_RIGHT),
            (bottom_left, bits::BOTTOM_LEFT),
        ] {
            if self.is_active(node) {
                configuration |= bit;
            }
        }

        ControlSquare {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
            center_top: self.midpoint(x, y + 1, Axis::X),
            center_right: self.midpoint(x + 1, y, Axis::Y),
            center_bottom: self.midpoint(x, y, Axis::X),
            center_left: self.midpoint(x, y, Axis::Y),
            configuration,
        }
    }
}
