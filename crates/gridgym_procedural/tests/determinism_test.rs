//! # Determinism Tests
//!
//! The reproducibility contract: a seed fixes the sequence of random draws,
//! and the sequence of draws fixes the level. Two independent runs from one
//! seed must agree bit for bit on every grid and every placement.

use gridgym_procedural::{
    LevelSeed, MazeCell, MazeGenerator, RoomGenerator, MAZE_MARGIN,
};

fn maze_snapshot(maze: &MazeGenerator) -> Vec<MazeCell> {
    let mut cells = Vec::new();
    for x in 0..maze.array_width() {
        for y in 0..maze.array_height() {
            cells.push(maze.get(x, y));
        }
    }
    cells
}

#[test]
fn maze_generation_replays_bit_identical() {
    for seed in [0u64, 42, 0xDEAD_BEEF, u64::MAX] {
        let run = |seed: u64| {
            let mut rng = LevelSeed::new(seed).rng();
            let mut maze = MazeGenerator::generate(15, 15, &mut rng).unwrap();
            let goal = maze.place_object(MazeCell::Goal, &mut rng).unwrap();
            (maze_snapshot(&maze), goal, maze.connections())
        };

        assert_eq!(run(seed), run(seed), "seed {seed} diverged");
    }
}

#[test]
fn dead_end_relaxation_replays_bit_identical() {
    let run = || {
        let mut rng = LevelSeed::new(7).rng();
        let maze = MazeGenerator::generate_without_dead_ends(11, 11, &mut rng).unwrap();
        maze_snapshot(&maze)
    };

    assert_eq!(run(), run());
}

#[test]
fn different_seeds_usually_differ() {
    let grid_for = |seed: u64| {
        let mut rng = LevelSeed::new(seed).rng();
        maze_snapshot(&MazeGenerator::generate(15, 15, &mut rng).unwrap())
    };

    // Not a tautology, but 15x15 has far too many spanning trees for two
    // chosen seeds to collide.
    assert_ne!(grid_for(1), grid_for(2));
}

#[test]
fn cave_pipeline_replays_bit_identical() {
    let run = |seed: u64| {
        let mut rng = LevelSeed::new(seed).rng();
        let mut rooms = RoomGenerator::new(30, 30).unwrap();
        rooms.seed_random(&mut rng, 0.5);
        for _ in 0..2 {
            rooms.step();
        }

        // Feasibility depends on the seed; determinism must not.
        let Ok(best) = rooms.largest_room() else {
            return None;
        };
        let cells: Vec<usize> = best.iter().copied().collect();
        let path = rooms
            .shortest_path(cells[0], *cells.last().unwrap())
            .expect("endpoints share a room");

        let mut wide: gridgym_procedural::Room = path.iter().copied().collect();
        rooms.dilate(&mut wide, 4);

        Some((cells, path, wide.into_iter().collect::<Vec<_>>()))
    };

    for seed in [7u64, 1234, 999_999] {
        assert_eq!(run(seed), run(seed), "seed {seed} diverged");
    }
}

#[test]
fn cave_seeding_is_feasible_for_common_seeds() {
    // The automaton should leave a usable room for virtually every seed;
    // demand at least one across a small sample so the pipeline test above
    // is not vacuously passing on the None branch.
    let feasible = (0u64..10).any(|seed| {
        let mut rng = LevelSeed::new(seed).rng();
        let mut rooms = RoomGenerator::new(30, 30).unwrap();
        rooms.seed_random(&mut rng, 0.5);
        rooms.step();
        rooms.step();
        rooms.largest_room().is_ok()
    });

    assert!(feasible, "no seed in 0..10 produced any open room");
}

#[test]
fn perfect_maze_invariant_holds_across_seeds() {
    for seed in 0u64..20 {
        let mut rng = LevelSeed::new(seed).rng();
        let maze = MazeGenerator::generate(13, 13, &mut rng).unwrap();

        // 7x7 lattice cells, spanning tree has 48 edges.
        assert_eq!(maze.connections(), 48);

        // Flood fill from the carve origin reaches every carved cell.
        let mut seen = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        seen.insert((MAZE_MARGIN, MAZE_MARGIN));
        queue.push_back((MAZE_MARGIN, MAZE_MARGIN));
        while let Some((x, y)) = queue.pop_front() {
            for next in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                if maze.get(next.0, next.1) != MazeCell::Wall && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        assert_eq!(seen.len(), maze.carved_cells(), "seed {seed} disconnected");
    }
}
