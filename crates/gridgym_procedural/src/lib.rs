//! # GRIDGYM Procedural Generation
//!
//! Deterministic level generation for the GRIDGYM environments.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed always produces the same level
//! 2. **Caller-owned randomness**: every generator takes `&mut impl Rng`;
//!    nothing here seeds or owns a generator
//! 3. **Fallible by contract**: an unsatisfiable level (no room, no path,
//!    no free cell) is a typed error the caller can retry with a new seed
//! 4. **Bounds are sentinels**: out-of-bounds reads are walls, out-of-bounds
//!    writes are ignored; border padding relies on both
//!
//! ## Core Components
//!
//! - [`MazeGenerator`]: randomized-Kruskal perfect mazes over union-find
//! - [`RoomGenerator`]: cellular-automata caves, flood-fill rooms, BFS paths
//! - [`LevelSeed`]: seed newtype with sub-seed derivation
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridgym_procedural::{LevelSeed, MazeGenerator, MazeCell};
//!
//! let mut rng = LevelSeed::new(42).rng();
//! let mut maze = MazeGenerator::generate(15, 15, &mut rng)?;
//! let goal = maze.place_object(MazeCell::Goal, &mut rng)?;
//! ```

pub mod disjoint;
pub mod error;
pub mod maze;
pub mod room;
pub mod seed;

pub use disjoint::DisjointSets;
pub use error::{GenError, GenResult};
pub use maze::{MazeCell, MazeGenerator, MAZE_MARGIN};
pub use room::{Room, RoomCell, RoomGenerator};
pub use seed::LevelSeed;
