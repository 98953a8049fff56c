//! # Union-Find Maze Carver
//!
//! Builds a perfect maze (carved cells form a spanning tree, exactly one
//! path between any two of them) with the randomized-Kruskal scheme:
//! lattice cells sit on even coordinates, candidate walls between them on
//! odd coordinates, and a wall is removable only while its two endpoint
//! cells belong to different disjoint sets.
//!
//! The grid carries a one-cell wall border. Reads outside the array return
//! [`MazeCell::Wall`] and writes outside are dropped, so the carving and
//! query loops need no boundary branches.

use std::collections::HashSet;

use rand::Rng;

use crate::disjoint::DisjointSets;
use crate::error::{GenError, GenResult};

/// Width of the wall border around the maze proper.
pub const MAZE_MARGIN: i32 = 1;

/// One cell of the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MazeCell {
    /// Open floor.
    Empty = 0,
    /// Solid wall.
    Wall = 1,
    /// Reserved agent spawn marker.
    Start = 2,
    /// Placed goal object.
    Goal = 3,
}

/// A removable-wall candidate between two lattice cells, in maze coordinates.
#[derive(Clone, Copy, Debug)]
struct WallCandidate {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

/// A carved cell tracked for object placement.
#[derive(Clone, Copy, Debug)]
struct FreeCell {
    x: i32,
    y: i32,
    /// Consumed by a placement (or reserved) and no longer eligible.
    taken: bool,
}

/// Perfect-maze generator over a padded cell grid.
///
/// Construct with [`generate`](Self::generate) or
/// [`generate_without_dead_ends`](Self::generate_without_dead_ends), then
/// query cells with [`get`](Self::get) and drop objects onto carved floor
/// with [`place_object`](Self::place_object).
pub struct MazeGenerator {
    maze_width: i32,
    maze_height: i32,
    array_width: i32,
    array_height: i32,
    /// Padded grid, column-major.
    grid: Vec<MazeCell>,
    /// Disjoint-set forest over lattice cells, by `y + maze_height * x`.
    sets: DisjointSets,
    /// Carved cells in discovery order, for placement draws.
    free_cells: Vec<FreeCell>,
    /// Dedup guard for `free_cells`.
    free_seen: HashSet<(i32, i32)>,
    /// Accepted wall removals (spanning-tree edges).
    connections: usize,
}

impl MazeGenerator {
    /// Carves a perfect maze of the given dimensions.
    ///
    /// Dimensions must be odd and at least 3: the candidate enumeration
    /// pairs even-coordinate lattice cells two steps apart, which only
    /// tiles an odd-sized grid.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidDimensions`] for even or too-small dimensions.
    pub fn generate<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> GenResult<Self> {
        let mut maze = Self::allocate(width, height)?;
        maze.carve(rng);

        tracing::debug!(
            "maze carved: {}x{}, {} connections, {} free cells",
            width,
            height,
            maze.connections,
            maze.free_cells.len()
        );

        Ok(maze)
    }

    /// Carves a perfect maze, then knocks one wall off every dead end.
    ///
    /// The relaxation intentionally breaks the spanning-tree property to
    /// cut down single-exit corridors: every empty cell with exactly one
    /// empty 4-neighbor and at least one wall 4-neighbor loses one
    /// uniformly chosen adjacent wall. Runs as a post-process; the
    /// disjoint-set state is not consulted again.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidDimensions`] for even or too-small dimensions.
    pub fn generate_without_dead_ends<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        rng: &mut R,
    ) -> GenResult<Self> {
        let mut maze = Self::generate(width, height, rng)?;
        maze.relax_dead_ends(rng);
        Ok(maze)
    }

    /// Returns the maze width (without border padding).
    #[inline]
    #[must_use]
    pub const fn maze_width(&self) -> i32 {
        self.maze_width
    }

    /// Returns the maze height (without border padding).
    #[inline]
    #[must_use]
    pub const fn maze_height(&self) -> i32 {
        self.maze_height
    }

    /// Returns the padded array width.
    #[inline]
    #[must_use]
    pub const fn array_width(&self) -> i32 {
        self.array_width
    }

    /// Returns the padded array height.
    #[inline]
    #[must_use]
    pub const fn array_height(&self) -> i32 {
        self.array_height
    }

    /// Returns the number of accepted wall removals.
    ///
    /// Directly after [`generate`](Self::generate) this is one less than the
    /// number of lattice cells: the spanning-tree edge count.
    #[inline]
    #[must_use]
    pub const fn connections(&self) -> usize {
        self.connections
    }

    /// Returns the number of distinct carved cells.
    #[inline]
    #[must_use]
    pub fn carved_cells(&self) -> usize {
        self.free_cells.len()
    }

    /// Reads a cell in padded array coordinates.
    ///
    /// Out of bounds reads as [`MazeCell::Wall`]; border logic relies on it.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> MazeCell {
        if x < 0 || y < 0 || x >= self.array_width || y >= self.array_height {
            return MazeCell::Wall;
        }
        self.grid[self.index(x, y)]
    }

    /// Writes a cell in padded array coordinates.
    ///
    /// Out-of-bounds writes are silently dropped; border padding relies on
    /// never being written through this path.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: MazeCell) {
        if x < 0 || y < 0 || x >= self.array_width || y >= self.array_height {
            return;
        }
        let idx = self.index(x, y);
        self.grid[idx] = cell;
    }

    /// Places an object on a uniformly drawn carved cell.
    ///
    /// The chosen cell is tagged in the grid, removed from future
    /// eligibility, and returned in maze coordinates. The carve origin
    /// `(0, 0)` is reserved for the agent spawn and never drawn.
    ///
    /// # Errors
    ///
    /// [`GenError::NoFreeCell`] when every carved cell is consumed.
    pub fn place_object<R: Rng + ?Sized>(
        &mut self,
        tag: MazeCell,
        rng: &mut R,
    ) -> GenResult<(i32, i32)> {
        let eligible = self
            .free_cells
            .iter()
            .filter(|cell| !cell.taken && !Self::is_origin(cell))
            .count();
        if eligible == 0 {
            return Err(GenError::NoFreeCell);
        }

        loop {
            let i = rng.gen_range(0..self.free_cells.len());
            let cell = self.free_cells[i];
            if cell.taken || Self::is_origin(&cell) {
                continue;
            }

            self.free_cells[i].taken = true;
            self.set(cell.x + MAZE_MARGIN, cell.y + MAZE_MARGIN, tag);
            return Ok((cell.x, cell.y));
        }
    }

    // =========================================================================
    // Carving
    // =========================================================================

    fn allocate(width: i32, height: i32) -> GenResult<Self> {
        if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
            return Err(GenError::InvalidDimensions { width, height });
        }

        let array_width = width + 2 * MAZE_MARGIN;
        let array_height = height + 2 * MAZE_MARGIN;

        let mut maze = Self {
            maze_width: width,
            maze_height: height,
            array_width,
            array_height,
            grid: vec![MazeCell::Wall; (array_width * array_height) as usize],
            sets: DisjointSets::new((width * height) as usize),
            free_cells: Vec::new(),
            free_seen: HashSet::new(),
            connections: 0,
        };

        // Carve the origin corner; it anchors the spanning tree.
        maze.set(MAZE_MARGIN, MAZE_MARGIN, MazeCell::Empty);

        Ok(maze)
    }

    fn carve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut walls = self.wall_candidates();

        while !walls.is_empty() {
            let n = rng.gen_range(0..walls.len());
            let wall = walls.swap_remove(n);

            let cell_a = self.lattice_index(wall.x1, wall.y1);
            let cell_b = self.lattice_index(wall.x2, wall.y2);

            let mid_x = (wall.x1 + wall.x2) / 2;
            let mid_y = (wall.y1 + wall.y2) / 2;

            // Removable only while the midpoint is still a wall and the
            // endpoints live in different sets; that keeps the carved
            // subgraph a forest at every step.
            let midpoint_solid =
                self.get(mid_x + MAZE_MARGIN, mid_y + MAZE_MARGIN) == MazeCell::Wall;

            if midpoint_solid && self.sets.union(cell_a, cell_b) {
                self.set_free_cell(wall.x1, wall.y1);
                self.set_free_cell(mid_x, mid_y);
                self.set_free_cell(wall.x2, wall.y2);
                self.connections += 1;
            }
        }
    }

    /// Enumerates every removable wall between lattice-cell pairs.
    fn wall_candidates(&self) -> Vec<WallCandidate> {
        let mut walls = Vec::new();

        for i in (1..self.maze_width).step_by(2) {
            for j in (0..self.maze_height).step_by(2) {
                if i < self.maze_width - 1 {
                    walls.push(WallCandidate {
                        x1: i - 1,
                        y1: j,
                        x2: i + 1,
                        y2: j,
                    });
                }
            }
        }

        for i in (0..self.maze_width).step_by(2) {
            for j in (1..self.maze_height).step_by(2) {
                if j < self.maze_height - 1 {
                    walls.push(WallCandidate {
                        x1: i,
                        y1: j - 1,
                        x2: i,
                        y2: j + 1,
                    });
                }
            }
        }

        walls
    }

    fn relax_dead_ends<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for x in 0..self.array_width {
            for y in 0..self.array_height {
                if self.get(x, y) != MazeCell::Empty {
                    continue;
                }

                let neighbors = Self::four_neighbors(x, y);
                let empty_count = neighbors
                    .iter()
                    .filter(|&&(nx, ny)| self.in_array(nx, ny) && self.get(nx, ny) == MazeCell::Empty)
                    .count();

                if empty_count != 1 {
                    continue;
                }

                let walls: Vec<(i32, i32)> = neighbors
                    .iter()
                    .copied()
                    .filter(|&(nx, ny)| self.in_array(nx, ny) && self.get(nx, ny) == MazeCell::Wall)
                    .collect();

                if !walls.is_empty() {
                    let (wx, wy) = walls[rng.gen_range(0..walls.len())];
                    self.set(wx, wy, MazeCell::Empty);
                }
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Column-major index into the padded grid.
    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y + self.array_height * x) as usize
    }

    /// Disjoint-set element for a lattice cell, in maze coordinates.
    #[inline]
    fn lattice_index(&self, x: i32, y: i32) -> usize {
        (y + self.maze_height * x) as usize
    }

    #[inline]
    fn in_array(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.array_width && y < self.array_height
    }

    #[inline]
    fn is_origin(cell: &FreeCell) -> bool {
        cell.x == 0 && cell.y == 0
    }

    /// Von Neumann neighborhood, maze-carver visit order.
    #[inline]
    const fn four_neighbors(x: i32, y: i32) -> [(i32, i32); 4] {
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
    }

    /// Marks a maze-coordinate cell carved and tracks it for placement.
    fn set_free_cell(&mut self, x: i32, y: i32) {
        self.set(x + MAZE_MARGIN, y + MAZE_MARGIN, MazeCell::Empty);

        if self.free_seen.insert((x, y)) {
            self.free_cells.push(FreeCell { x, y, taken: false });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::LevelSeed;
    use std::collections::VecDeque;

    /// All carved (non-wall) positions in array coordinates.
    fn carved_positions(maze: &MazeGenerator) -> Vec<(i32, i32)> {
        let mut carved = Vec::new();
        for x in 0..maze.array_width() {
            for y in 0..maze.array_height() {
                if maze.get(x, y) != MazeCell::Wall {
                    carved.push((x, y));
                }
            }
        }
        carved
    }

    /// Flood fill over carved cells from the carve origin.
    fn reachable_from_origin(maze: &MazeGenerator) -> usize {
        let start = (MAZE_MARGIN, MAZE_MARGIN);
        let mut seen = std::collections::HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some((x, y)) = queue.pop_front() {
            for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                if maze.get(nx, ny) != MazeCell::Wall && seen.insert((nx, ny)) {
                    queue.push_back((nx, ny));
                }
            }
        }

        seen.len()
    }

    /// Number of 4-adjacent carved pairs (undirected).
    fn carved_edges(maze: &MazeGenerator) -> usize {
        let mut edges = 0;
        for x in 0..maze.array_width() {
            for y in 0..maze.array_height() {
                if maze.get(x, y) == MazeCell::Wall {
                    continue;
                }
                if maze.get(x + 1, y) != MazeCell::Wall {
                    edges += 1;
                }
                if maze.get(x, y + 1) != MazeCell::Wall {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let mut rng = LevelSeed::new(1).rng();
        assert!(matches!(
            MazeGenerator::generate(4, 5, &mut rng),
            Err(GenError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            MazeGenerator::generate(5, 1, &mut rng),
            Err(GenError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_same_seed_carves_identical_maze() {
        let maze_a = MazeGenerator::generate(15, 15, &mut LevelSeed::new(42).rng()).unwrap();
        let maze_b = MazeGenerator::generate(15, 15, &mut LevelSeed::new(42).rng()).unwrap();

        assert_eq!(carved_positions(&maze_a), carved_positions(&maze_b));
        assert_eq!(maze_a.connections(), maze_b.connections());
        assert_eq!(maze_a.carved_cells(), maze_b.carved_cells());
    }

    #[test]
    fn test_generate_produces_perfect_maze() {
        for seed in [3u64, 42, 1234] {
            let maze = MazeGenerator::generate(9, 9, &mut LevelSeed::new(seed).rng()).unwrap();

            // Spanning tree over the 5x5 lattice: 24 accepted removals.
            assert_eq!(maze.connections(), 24);

            let carved = carved_positions(&maze);
            // Connected: flood fill reaches every carved cell.
            assert_eq!(reachable_from_origin(&maze), carved.len());
            // Acyclic: a connected graph is a tree iff edges = nodes - 1.
            assert_eq!(carved_edges(&maze), carved.len() - 1);
            // Free-cell tracking saw every carved cell exactly once.
            assert_eq!(maze.carved_cells(), carved.len());
        }
    }

    #[test]
    fn test_five_by_five_seed_42() {
        let carve = || {
            let mut rng = LevelSeed::new(42).rng();
            let mut maze = MazeGenerator::generate(5, 5, &mut rng).unwrap();
            let goal = maze.place_object(MazeCell::Goal, &mut rng).unwrap();
            (carved_positions(&maze), maze.connections(), goal)
        };

        let (carved, connections, goal) = carve();
        // 3x3 lattice cells, spanning tree: 8 accepted removals, so
        // 9 + 8 carved grid cells in total.
        assert_eq!(connections, 8);
        assert_eq!(carved.len(), 17);

        // Same seed, same wall-removal order, same grid and placement.
        assert_eq!(carve(), (carved, connections, goal));
    }

    #[test]
    fn test_out_of_bounds_reads_are_wall() {
        let maze = MazeGenerator::generate(5, 5, &mut LevelSeed::new(0).rng()).unwrap();
        assert_eq!(maze.get(-1, 0), MazeCell::Wall);
        assert_eq!(maze.get(0, -1), MazeCell::Wall);
        assert_eq!(maze.get(maze.array_width(), 0), MazeCell::Wall);
        assert_eq!(maze.get(0, maze.array_height()), MazeCell::Wall);
    }

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut maze = MazeGenerator::generate(5, 5, &mut LevelSeed::new(0).rng()).unwrap();
        maze.set(-1, 2, MazeCell::Empty);
        maze.set(2, maze.array_height(), MazeCell::Empty);
        // Nothing to observe beyond "does not panic"; reads still walls.
        assert_eq!(maze.get(-1, 2), MazeCell::Wall);
    }

    #[test]
    fn test_relaxation_removes_dead_ends() {
        let seed = LevelSeed::new(77);
        let base = MazeGenerator::generate(9, 9, &mut seed.rng()).unwrap();
        let relaxed =
            MazeGenerator::generate_without_dead_ends(9, 9, &mut seed.rng()).unwrap();

        // Same seed, so the carving pass is identical and positions are
        // comparable one-to-one.
        for x in 0..base.array_width() {
            for y in 0..base.array_height() {
                if base.get(x, y) != MazeCell::Empty {
                    continue;
                }

                let empty_before = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                    .iter()
                    .filter(|&&(nx, ny)| base.get(nx, ny) == MazeCell::Empty)
                    .count();
                let had_wall = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                    .iter()
                    .any(|&(nx, ny)| {
                        nx >= 0
                            && ny >= 0
                            && nx < base.array_width()
                            && ny < base.array_height()
                            && base.get(nx, ny) == MazeCell::Wall
                    });

                if empty_before == 1 && had_wall {
                    let empty_after = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                        .iter()
                        .filter(|&&(nx, ny)| relaxed.get(nx, ny) == MazeCell::Empty)
                        .count();
                    assert!(
                        empty_after >= 2,
                        "dead end at ({x}, {y}) survived relaxation"
                    );
                }
            }
        }
    }

    #[test]
    fn test_place_object_tags_a_carved_cell() {
        let mut rng = LevelSeed::new(9).rng();
        let mut maze = MazeGenerator::generate(7, 7, &mut rng).unwrap();

        let (x, y) = maze.place_object(MazeCell::Goal, &mut rng).unwrap();
        assert_ne!((x, y), (0, 0));
        assert_eq!(maze.get(x + MAZE_MARGIN, y + MAZE_MARGIN), MazeCell::Goal);

        // A second placement never reuses the cell.
        let (x2, y2) = maze.place_object(MazeCell::Goal, &mut rng).unwrap();
        assert_ne!((x, y), (x2, y2));
    }

    #[test]
    fn test_place_object_exhaustion_is_reported() {
        let mut rng = LevelSeed::new(5).rng();
        let mut maze = MazeGenerator::generate(3, 3, &mut rng).unwrap();

        // A 3x3 maze carves 7 cells; the origin is reserved.
        let placeable = maze.carved_cells() - 1;
        for _ in 0..placeable {
            maze.place_object(MazeCell::Goal, &mut rng).unwrap();
        }
        assert_eq!(
            maze.place_object(MazeCell::Goal, &mut rng),
            Err(GenError::NoFreeCell)
        );
    }

    #[test]
    fn test_placement_is_deterministic() {
        let run = |seed: u64| {
            let mut rng = LevelSeed::new(seed).rng();
            let mut maze = MazeGenerator::generate(11, 11, &mut rng).unwrap();
            maze.place_object(MazeCell::Goal, &mut rng).unwrap()
        };

        assert_eq!(run(1000), run(1000));
    }
}
