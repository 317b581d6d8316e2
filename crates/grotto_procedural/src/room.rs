//! # Room Graph
//!
//! Turns surviving open regions into rooms and carves passages until every
//! room is reachable from the largest one.
//!
//! ## Model
//!
//! Rooms live in an arena (`Vec<Room>`) and refer to each other by index.
//! Connections are symmetric: if `a` lists `b`, `b` lists `a`.
//!
//! ## Algorithm
//!
//! 1. Sort rooms by size, largest first. Room 0 is the main room.
//! 2. Every room without connections links to its closest room.
//! 3. While some room is unreachable from the main room, link the closest
//!    (unreachable, reachable) pair.
//!
//! Distance is the squared Euclidean distance between edge tiles. Ties keep
//! the first pair found in iteration order.
//!
//! ## Cost
//!
//! Each search compares every edge tile of one room with every edge tile of
//! another, so a build is O(rooms² · edge_tiles²) in the worst case. This is
//! by far the slowest generation stage on large maps.

use std::collections::VecDeque;

use crate::grid::{Coord, OccupancyGrid, Tile, SURROUNDING};
use crate::region::Region;

/// Default passage carving radius.
pub const DEFAULT_PASSAGE_RADIUS: u32 = 1;

/// One open area of the cave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Every cell of the room.
    pub tiles: Vec<Coord>,
    /// Cells with at least one wall among their 8 neighbors.
    pub edge_tiles: Vec<Coord>,
    /// Indices of directly connected rooms.
    pub connections: Vec<usize>,
    /// True only for the largest room.
    pub is_main_room: bool,
    /// True once a chain of connections reaches the main room.
    pub is_accessible_from_main_room: bool,
}

impl Room {
    /// Builds a room from an open region of `grid`.
    #[must_use]
    pub fn from_region(region: Region, grid: &OccupancyGrid) -> Self {
        let edge_tiles = region
            .tiles
            .iter()
            .copied()
            .filter(|tile| {
                SURROUNDING
                    .iter()
                    .any(|&(dx, dy)| grid.get(tile.x + dx, tile.y + dy).is_wall())
            })
            .collect();

        Self {
            tiles: region.tiles,
            edge_tiles,
            connections: Vec::new(),
            is_main_room: false,
            is_accessible_from_main_room: false,
        }
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the room has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True when `other` is a direct neighbor.
    #[inline]
    #[must_use]
    pub fn is_connected(&self, other: usize) -> bool {
        self.connections.contains(&other)
    }
}

/// A carved connection between two rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Passage {
    /// The connected room indices.
    pub rooms: (usize, usize),
    /// Edge tile of the first room.
    pub from: Coord,
    /// Edge tile of the second room.
    pub to: Coord,
    /// Squared distance between `from` and `to`.
    pub distance_squared: i64,
    /// Cells changed from wall to open.
    pub tiles: Vec<Coord>,
}

// =============================================================================
// GRAPH
// =============================================================================

/// Rooms plus the passages joining them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    passages: Vec<Passage>,
}

impl RoomGraph {
    /// All rooms, largest first.
    #[inline]
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Every passage in creation order.
    #[inline]
    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Number of rooms.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True for a map without rooms.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// The largest room, if any.
    #[must_use]
    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_main_room)
    }

    /// True when rooms `a` and `b` are directly connected.
    #[must_use]
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.rooms.get(a).is_some_and(|room| room.is_connected(b))
    }

    /// Reachability of each room from the main room over `connections`.
    ///
    /// Computed from the adjacency lists alone, independent of the
    /// `is_accessible_from_main_room` flags.
    #[must_use]
    pub fn reachable_from_main(&self) -> Vec<bool> {
        let mut seen = vec![false; self.rooms.len()];
        let Some(main) = self.rooms.iter().position(|room| room.is_main_room) else {
            return seen;
        };
        seen[main] = true;
        let mut queue = VecDeque::from([main]);
        while let Some(index) = queue.pop_front() {
            for &next in &self.rooms[index].connections {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// True when every room is reachable from the main room.
    #[must_use]
    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from_main().into_iter().all(|reachable| reachable)
    }

    /// Links two rooms and spreads accessibility across the joined component.
    fn link(&mut self, a: usize, b: usize) {
        if a == b || self.rooms[a].is_connected(b) {
            return;
        }
        self.rooms[a].connections.push(b);
        self.rooms[b].connections.push(a);

        if !self.rooms[a].is_accessible_from_main_room && !self.rooms[b].is_accessible_from_main_room {
            return;
        }

        // A reachable component is already fully marked; spread from the other side
        let mut queue = VecDeque::new();
        for index in [a, b] {
            if !self.rooms[index].is_accessible_from_main_room {
                self.rooms[index].is_accessible_from_main_room = true;
                queue.push_back(index);
            }
        }
        while let Some(index) = queue.pop_front() {
            let neighbors = self.rooms[index].connections.clone();
            for next in neighbors {
                if !self.rooms[next].is_accessible_from_main_room {
                    self.rooms[next].is_accessible_from_main_room = true;
                    queue.push_back(next);
                }
            }
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Closest edge-tile pair found by a search.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    a: usize,
    b: usize,
    from: Coord,
    to: Coord,
    distance_squared: i64,
}

/// Builds a [`RoomGraph`] and carves its passages into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomGraphBuilder {
    passage_radius: u32,
}

impl Default for RoomGraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PASSAGE_RADIUS)
    }
}

impl RoomGraphBuilder {
    /// Creates a builder that carves passages of the given radius.
    #[inline]
    #[must_use]
    pub const fn new(passage_radius: u32) -> Self {
        Self { passage_radius }
    }

    /// Configured passage radius.
    #[inline]
    #[must_use]
    pub const fn passage_radius(&self) -> u32 {
        self.passage_radius
    }

    /// Connects `regions` (open regions of `grid`) into one reachable graph.
    ///
    /// Carves every passage into `grid`. No regions yields an empty graph.
    pub fn build(&self, grid: &mut OccupancyGrid, regions: Vec<Region>) -> RoomGraph {
        let mut rooms: Vec<Room> = regions
            .into_iter()
            .filter(|region| region.tile == Tile::Open && !region.is_empty())
            .map(|region| Room::from_region(region, grid))
            .collect();
        // Stable: equal sizes keep scan order
        rooms.sort_by_key(|room| std::cmp::Reverse(room.len()));

        let mut graph = RoomGraph {
            rooms,
            passages: Vec::new(),
        };
        if graph.rooms.is_empty() {
            return graph;
        }
        graph.rooms[0].is_main_room = true;
        graph.rooms[0].is_accessible_from_main_room = true;

        self.connect_isolated(&mut graph, grid);
        self.connect_to_main(&mut graph, grid);

        tracing::debug!(
            rooms = graph.rooms.len(),
            passages = graph.passages.len(),
            "room graph built"
        );
        graph
    }

    /// Every room with no connections links to its closest other room.
    fn connect_isolated(&self, graph: &mut RoomGraph, grid: &mut OccupancyGrid) {
        let count = graph.rooms.len();
        for a in 0..count {
            if !graph.rooms[a].connections.is_empty() {
                continue;
            }
            let mut best = None;
            for b in 0..count {
                closest_pair(&graph.rooms, a, b, &mut best);
            }
            if let Some(candidate) = best {
                self.create_passage(graph, grid, candidate);
            }
        }
    }

    /// Links the closest (unreachable, reachable) pair until none is left.
    fn connect_to_main(&self, graph: &mut RoomGraph, grid: &mut OccupancyGrid) {
        loop {
            let (reachable, unreachable): (Vec<usize>, Vec<usize>) =
                (0..graph.rooms.len()).partition(|&i| graph.rooms[i].is_accessible_from_main_room);
            if unreachable.is_empty() {
                return;
            }

            let mut best = None;
            for &a in &unreachable {
                for &b in &reachable {
                    closest_pair(&graph.rooms, a, b, &mut best);
                }
            }
            match best {
                Some(candidate) => self.create_passage(graph, grid, candidate),
                None => {
                    tracing::warn!(
                        unreachable = unreachable.len(),
                        "rooms left without a reachable neighbor"
                    );
                    return;
                }
            }
        }
    }

    fn create_passage(&self, graph: &mut RoomGraph, grid: &mut OccupancyGrid, candidate: Candidate) {
        graph.link(candidate.a, candidate.b);

        let mut carved = Vec::new();
        for tile in line(candidate.from, candidate.to) {
            self.carve(grid, tile, &mut carved);
        }

        tracing::debug!(
            from = %candidate.from,
            to = %candidate.to,
            distance_squared = candidate.distance_squared,
            carved = carved.len(),
            "carved passage"
        );

        graph.passages.push(Passage {
            rooms: (candidate.a, candidate.b),
            from: candidate.from,
            to: candidate.to,
            distance_squared: candidate.distance_squared,
            tiles: carved,
        });
    }

    /// Opens every non-border cell within the passage radius of `center`.
    fn carve(&self, grid: &mut OccupancyGrid, center: Coord, carved: &mut Vec<Coord>) {
        #[allow(clippy::cast_possible_wrap)]
        let r = self.passage_radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let tile = center.offset(dx, dy);
                if !grid.in_bounds(tile.x, tile.y) || grid.is_border(tile.x, tile.y) {
                    continue;
                }
                if grid.at(tile).is_wall() {
                    grid.set(tile.x, tile.y, Tile::Open);
                    carved.push(tile);
                }
            }
        }
    }
}

/// Updates `best` with the closest edge-tile pair between rooms `a` and `b`.
///
/// Skips identical or already connected rooms. Only a strictly smaller
/// distance replaces an existing candidate.
fn closest_pair(rooms: &[Room], a: usize, b: usize, best: &mut Option<Candidate>) {
    if a == b || rooms[a].is_connected(b) {
        return;
    }
    for &from in &rooms[a].edge_tiles {
        for &to in &rooms[b].edge_tiles {
            let distance_squared = from.distance_squared(to);
            if !matches!(best, Some(current) if current.distance_squared <= distance_squared) {
                *best = Some(Candidate {
                    a,
                    b,
                    from,
                    to,
                    distance_squared,
                });
            }
        }
    }
}

/// 4-connected digital line from `from` to `to`, both ends included.
///
/// Walks the longer axis one cell at a time and accumulates the shorter
/// axis gradient; whenever it overflows, the cell before the diagonal
/// step is emitted too so consecutive cells always share an edge.
#[must_use]
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let (mut longest, mut shortest) = (dx.abs(), dy.abs());
    let (mut step, mut gradient_step) = (dx.signum(), dy.signum());
    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        std::mem::swap(&mut step, &mut gradient_step);
    }

    let mut x = from.x;
    let mut y = from.y;
    let mut tiles = Vec::with_capacity((longest + shortest + 1).unsigned_abs() as usize);
    tiles.push(Coord::new(x, y));

    let mut accumulation = longest / 2;
    for _ in 0..longest {
        if inverted {
            y += step;
        } else {
            x += step;
        }
        accumulation += shortest;
        if accumulation >= longest {
            tiles.push(Coord::new(x, y));
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
        tiles.push(Coord::new(x, y));
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionExtractor;

    fn rooms_grid(width: usize, height: usize, spans: &[(i32, i32)]) -> OccupancyGrid {
        let mut grid = OccupancyGrid::filled(width, height, Tile::Wall);
        for &(min_x, max_x) in spans {
            grid.fill_rect(Coord::new(min_x, 2), Coord::new(max_x, 6), Tile::Open);
        }
        grid
    }

    fn build(grid: &mut OccupancyGrid, radius: u32) -> RoomGraph {
        let regions = RegionExtractor::regions_of(grid, Tile::Open);
        RoomGraphBuilder::new(radius).build(grid, regions)
    }

    #[test]
    fn test_two_rooms_one_passage() {
        let mut grid = rooms_grid(30, 10, &[(2, 6), (17, 21)]);
        let graph = build(&mut grid, 1);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.passages().len(), 1);
        assert!(graph.rooms().iter().all(|r| r.is_accessible_from_main_room));
        assert!(graph.is_fully_connected());
        assert!(graph.is_connected(0, 1));
        assert!(graph.is_connected(1, 0));

        let passage = &graph.passages()[0];
        // Five pairs tie at 121; the first edge tile in discovery order wins
        assert_eq!(passage.distance_squared, 121);
        assert_eq!(passage.from, Coord::new(6, 2));
        assert_eq!(passage.to, Coord::new(17, 2));
        assert!(!passage.tiles.is_empty());

        // The carved grid now holds a single open area
        assert_eq!(RegionExtractor::regions_of(&grid, Tile::Open).len(), 1);
    }

    #[test]
    fn test_link_twice_is_noop() {
        let mut grid = rooms_grid(30, 10, &[(2, 6), (17, 21)]);
        let mut graph = build(&mut grid, 1);
        assert_eq!(graph.rooms()[0].connections, vec![1]);

        graph.link(0, 1);
        graph.link(1, 0);
        graph.link(1, 1);
        assert_eq!(graph.rooms()[0].connections.len(), 1);
        assert_eq!(graph.rooms()[1].connections.len(), 1);
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_clusters_are_joined_to_main() {
        // Two close pairs, far from each other; the first room is largest
        let mut grid = rooms_grid(40, 10, &[(2, 7), (10, 14), (25, 29), (32, 36)]);
        let graph = build(&mut grid, 1);

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.rooms()[0].len(), 30);
        assert!(graph.rooms()[0].is_main_room);
        assert_eq!(graph.main_room().map(Room::len), Some(30));

        // Phase one pairs (0,1) and (2,3), phase two bridges 2 to 1
        let pairs: Vec<(usize, usize)> = graph.passages().iter().map(|p| p.rooms).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3), (2, 1)]);
        assert!(graph.rooms().iter().all(|r| r.is_accessible_from_main_room));
        assert!(graph.is_fully_connected());
        assert_eq!(RegionExtractor::regions_of(&grid, Tile::Open).len(), 1);
    }

    #[test]
    fn test_connections_are_symmetric() {
        let mut grid = rooms_grid(40, 10, &[(2, 7), (10, 14), (25, 29), (32, 36)]);
        let graph = build(&mut grid, 0);
        for (i, room) in graph.rooms().iter().enumerate() {
            for &j in &room.connections {
                assert!(graph.rooms()[j].is_connected(i), "{i} -> {j} not mirrored");
            }
        }
    }

    #[test]
    fn test_no_rooms_is_empty_graph() {
        let mut grid = OccupancyGrid::filled(10, 10, Tile::Wall);
        let graph = build(&mut grid, 1);
        assert!(graph.is_empty());
        assert!(graph.passages().is_empty());
        assert!(graph.main_room().is_none());
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_single_room_needs_no_passage() {
        let mut grid = rooms_grid(12, 10, &[(2, 8)]);
        let before = grid.clone();
        let graph = build(&mut grid, 1);
        assert_eq!(graph.len(), 1);
        assert!(graph.passages().is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_edge_tiles_use_diagonals() {
        let mut grid = OccupancyGrid::filled(7, 7, Tile::Wall);
        grid.fill_rect(Coord::new(1, 1), Coord::new(5, 5), Tile::Open);
        let region = RegionExtractor::region_at(&grid, Coord::new(3, 3));
        let room = Room::from_region(region, &grid);
        // 5x5 room: only the 3x3 core has no wall neighbor
        assert_eq!(room.edge_tiles.len(), 16);
        assert!(!room.edge_tiles.contains(&Coord::new(3, 3)));
    }

    #[test]
    fn test_carving_never_touches_border() {
        let mut grid = OccupancyGrid::filled(20, 5, Tile::Wall);
        grid.fill_rect(Coord::new(1, 1), Coord::new(3, 1), Tile::Open);
        grid.fill_rect(Coord::new(15, 1), Coord::new(18, 1), Tile::Open);
        let _graph = build(&mut grid, 3);
        for x in 0..20 {
            assert_eq!(grid.get(x, 0), Tile::Wall);
            assert_eq!(grid.get(x, 4), Tile::Wall);
        }
        assert_eq!(grid.get(0, 1), Tile::Wall);
        assert_eq!(grid.get(19, 1), Tile::Wall);
    }

    #[test]
    fn test_line_is_four_connected() {
        let cases = [
            (Coord::new(0, 0), Coord::new(5, 2)),
            (Coord::new(3, 9), Coord::new(0, 0)),
            (Coord::new(-2, 4), Coord::new(4, -2)),
            (Coord::new(1, 1), Coord::new(1, 1)),
        ];
        for (from, to) in cases {
            let tiles = line(from, to);
            assert_eq!(tiles.first(), Some(&from));
            assert_eq!(tiles.last(), Some(&to));
            for pair in tiles.windows(2) {
                assert_eq!(pair[0].distance_squared(pair[1]), 1, "gap in {from} -> {to}");
            }
        }
    }

    #[test]
    fn test_horizontal_line() {
        let tiles = line(Coord::new(2, 3), Coord::new(5, 3));
        assert_eq!(
            tiles,
            vec![
                Coord::new(2, 3),
                Coord::new(3, 3),
                Coord::new(4, 3),
                Coord::new(5, 3)
            ]
        );
    }
}
