//! # Cellular-Automata Room Generator
//!
//! Produces organic cave-like rooms: seed the grid with random walls, run a
//! few Moore-neighborhood majority steps, then flood-fill to find connected
//! open regions. Connectivity is never maintained incrementally; every
//! query re-walks the grid, which is cheap at these sizes and immune to
//! stale bookkeeping.
//!
//! Rooms and paths are 4-connected. Dilation is deliberately 8-connected:
//! it exists to widen corridors visually, and diagonal growth fills the
//! staircase corners a 4-connected pass would leave.

use std::collections::{BTreeSet, HashMap, VecDeque};

use rand::Rng;

use crate::error::{GenError, GenResult};

/// One cell of the room grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoomCell {
    /// Open floor.
    Space = 0,
    /// Solid wall.
    Wall = 1,
}

/// A connected open region: the cell indices reachable from one seed.
///
/// Ordered so iteration is deterministic; episode reproducibility depends
/// on consumers walking rooms in a stable order.
pub type Room = BTreeSet<usize>;

/// Cave generator over a 0/1 grid of arbitrary aspect.
pub struct RoomGenerator {
    grid_width: i32,
    grid_height: i32,
    /// Column-major cell array.
    grid: Vec<RoomCell>,
}

impl RoomGenerator {
    /// Majority threshold for the automaton step: a cell becomes wall when
    /// at least this many of the 9 cells in its Moore neighborhood
    /// (including itself) are walls.
    const WALL_THRESHOLD: usize = 5;

    /// Creates an all-open grid.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidDimensions`] for non-positive dimensions.
    pub fn new(grid_width: i32, grid_height: i32) -> GenResult<Self> {
        if grid_width <= 0 || grid_height <= 0 {
            return Err(GenError::InvalidDimensions {
                width: grid_width,
                height: grid_height,
            });
        }

        Ok(Self {
            grid_width,
            grid_height,
            grid: vec![RoomCell::Space; (grid_width * grid_height) as usize],
        })
    }

    /// Returns the grid width.
    #[inline]
    #[must_use]
    pub const fn grid_width(&self) -> i32 {
        self.grid_width
    }

    /// Returns the grid height.
    #[inline]
    #[must_use]
    pub const fn grid_height(&self) -> i32 {
        self.grid_height
    }

    /// Returns the total cell count.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Column-major index of an in-bounds position.
    #[inline]
    #[must_use]
    pub const fn index(&self, x: i32, y: i32) -> usize {
        (y + self.grid_height * x) as usize
    }

    /// Position of a cell index.
    #[inline]
    #[must_use]
    pub const fn position(&self, index: usize) -> (i32, i32) {
        let index = index as i32;
        (index / self.grid_height, index % self.grid_height)
    }

    /// Reads a cell. Out of bounds reads as [`RoomCell::Wall`].
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> RoomCell {
        if x < 0 || y < 0 || x >= self.grid_width || y >= self.grid_height {
            return RoomCell::Wall;
        }
        self.grid[self.index(x, y)]
    }

    /// Writes a cell. Out-of-bounds writes are silently dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: RoomCell) {
        if x < 0 || y < 0 || x >= self.grid_width || y >= self.grid_height {
            return;
        }
        let idx = self.index(x, y);
        self.grid[idx] = cell;
    }

    /// Randomizes the grid: each cell independently becomes a wall with the
    /// given probability.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R, wall_probability: f32) {
        for cell in &mut self.grid {
            *cell = if rng.gen::<f32>() < wall_probability {
                RoomCell::Wall
            } else {
                RoomCell::Space
            };
        }
    }

    /// Runs one cellular-automaton generation.
    ///
    /// Double-buffered: every cell is decided from the previous generation,
    /// never from a half-updated grid. Updating in place would corrupt the
    /// neighbor counts of cells not yet visited.
    pub fn step(&mut self) {
        let mut next = vec![RoomCell::Space; self.grid.len()];

        for (i, slot) in next.iter_mut().enumerate() {
            if self.count_neighbors(i, RoomCell::Wall) >= Self::WALL_THRESHOLD {
                *slot = RoomCell::Wall;
            }
        }

        self.grid = next;
    }

    /// Counts cells of the given kind in the 3x3 Moore neighborhood of a
    /// cell, the cell itself included. Out-of-bounds cells count as walls.
    #[must_use]
    pub fn count_neighbors(&self, index: usize, kind: RoomCell) -> usize {
        let (x, y) = self.position(index);

        let mut n = 0;
        for i in -1..=1 {
            for j in -1..=1 {
                if self.get(x + i, y + j) == kind {
                    n += 1;
                }
            }
        }
        n
    }

    /// Flood-fills the connected open region containing `seed`.
    ///
    /// 4-connected BFS over [`RoomCell::Space`] cells. Returns an empty
    /// room when the seed is a wall or out of range; a lone open cell is a
    /// room of one.
    #[must_use]
    pub fn flood_room(&self, seed: usize) -> Room {
        let mut room = Room::new();
        if seed >= self.grid.len() || self.grid[seed] != RoomCell::Space {
            return room;
        }

        let mut queue = VecDeque::new();
        room.insert(seed);
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            let (x, y) = self.position(current);

            for (nx, ny) in Self::four_neighbors(x, y) {
                if self.get(nx, ny) != RoomCell::Space {
                    continue;
                }
                let next = self.index(nx, ny);
                if room.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        room
    }

    /// Finds the largest connected open region in the grid.
    ///
    /// Enumerates rooms in cell-index order, skipping cells already claimed
    /// by an earlier room; ties keep the first room found.
    ///
    /// # Errors
    ///
    /// [`GenError::NoRoomFound`] when the grid has no open cell.
    pub fn largest_room(&self) -> GenResult<Room> {
        let mut claimed: Vec<bool> = vec![false; self.grid.len()];
        let mut best = Room::new();

        for i in 0..self.grid.len() {
            if self.grid[i] != RoomCell::Space || claimed[i] {
                continue;
            }

            let room = self.flood_room(i);
            for &cell in &room {
                claimed[cell] = true;
            }

            if room.len() > best.len() {
                best = room;
            }
        }

        if best.is_empty() {
            return Err(GenError::NoRoomFound);
        }

        tracing::trace!("best room holds {} of {} cells", best.len(), self.grid.len());

        Ok(best)
    }

    /// Finds a shortest 4-connected path between two open cells.
    ///
    /// Breadth-first search with parent pointers; the returned path runs
    /// from `src` to `dst` inclusive, consecutive cells 4-adjacent.
    ///
    /// # Errors
    ///
    /// [`GenError::NoPathFound`] when either endpoint is a wall or the
    /// search frontier empties before reaching `dst`.
    pub fn shortest_path(&self, src: usize, dst: usize) -> GenResult<Vec<usize>> {
        let not_found = GenError::NoPathFound { src, dst };

        if src >= self.grid.len()
            || dst >= self.grid.len()
            || self.grid[src] != RoomCell::Space
            || self.grid[dst] != RoomCell::Space
        {
            return Err(not_found);
        }

        if src == dst {
            return Ok(vec![src]);
        }

        let mut parents: HashMap<usize, usize> = HashMap::new();
        let mut covered: BTreeSet<usize> = BTreeSet::new();
        let mut queue = VecDeque::new();
        covered.insert(src);
        queue.push_back(src);

        'search: while let Some(current) = queue.pop_front() {
            let (x, y) = self.position(current);

            for (nx, ny) in Self::four_neighbors(x, y) {
                if self.get(nx, ny) != RoomCell::Space {
                    continue;
                }
                let next = self.index(nx, ny);
                if covered.insert(next) {
                    parents.insert(next, current);
                    if next == dst {
                        break 'search;
                    }
                    queue.push_back(next);
                }
            }
        }

        if !parents.contains_key(&dst) {
            return Err(not_found);
        }

        let mut path = vec![dst];
        let mut current = dst;
        while let Some(&parent) = parents.get(&current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();

        Ok(path)
    }

    /// Grows a region outward by exactly `layers` rings.
    ///
    /// Each ring absorbs every open cell in the Moore (8-connected)
    /// neighborhood of the previous ring. Wall cells are never absorbed, so
    /// dilation widens corridors without knocking through rock.
    pub fn dilate(&self, room: &mut Room, layers: usize) {
        let mut frontier: Vec<usize> = room.iter().copied().collect();

        for _ in 0..layers {
            let mut next = Vec::new();

            for &current in &frontier {
                let (x, y) = self.position(current);
                if self.get(x, y) != RoomCell::Space {
                    continue;
                }

                for i in -1..=1 {
                    for j in -1..=1 {
                        if i == 0 && j == 0 {
                            continue;
                        }
                        let (nx, ny) = (x + i, y + j);
                        if self.get(nx, ny) != RoomCell::Space {
                            continue;
                        }
                        let neighbor = self.index(nx, ny);
                        if room.insert(neighbor) {
                            next.push(neighbor);
                        }
                    }
                }
            }

            frontier = next;
        }
    }

    /// Von Neumann neighborhood in scan order.
    #[inline]
    const fn four_neighbors(x: i32, y: i32) -> [(i32, i32); 4] {
        [(x - 1, y), (x, y - 1), (x, y + 1), (x + 1, y)]
    }
}
