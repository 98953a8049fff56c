//! # Level Assembly
//!
//! Where generators meet the ECS: each builder runs one generation
//! pipeline, copies the result into a [`Tilemap`] and spawns the goal,
//! agent and hazard entities at generator-selected cells.
//!
//! Tile coordinates grow downward while world coordinates grow upward, so
//! every spawn flips y against the map height.

use rand::Rng;

use gridgym_core::{Coordinator, Entity};
use gridgym_procedural::{GenError, MazeCell, MazeGenerator, Room, RoomGenerator, MAZE_MARGIN};

use crate::components::{Agent, Collision, Dynamics, Goal, Hazard, Rect, Sprite, Transform, Vec2};
use crate::config::{DistributionMode, LevelConfig};
use crate::error::LevelResult;
use crate::tilemap::{TileId, Tilemap};

/// Texture catalog ids resolved by the embedding renderer.
pub mod textures {
    /// Maze goal object.
    pub const GOAL_CHEESE: u32 = 1;
    /// Cavern goal object.
    pub const GOAL_SHIP: u32 = 2;
    /// Cavern obstacle.
    pub const HAZARD_ROCK: u32 = 3;
}

/// Reward granted for reaching a goal.
const GOAL_REWARD: f32 = 10.0;

/// Hazards spawned per 80 open cells.
const HAZARDS_PER_CHUNK: usize = 3;

/// One assembled level: the tile map plus the entities placed into it.
pub struct Level {
    /// Tile grid for rendering, collision and observations.
    pub tilemap: Tilemap,
    /// The player entity.
    pub agent: Entity,
    /// The goal entity.
    pub goal: Entity,
    /// Agent spawn tile.
    pub agent_cell: (i32, i32),
    /// Goal tile.
    pub goal_cell: (i32, i32),
}

/// World-space center of a tile, y flipped to world orientation.
fn tile_center(tilemap: &Tilemap, (x, y): (i32, i32)) -> Vec2 {
    Vec2::new(
        x as f32 + 0.5,
        (tilemap.height() - 1 - y) as f32 + 0.5,
    )
}

/// Builds a maze level: a centered perfect maze with one goal, the agent
/// starting in the carve-origin corner.
///
/// # Errors
///
/// Generation errors propagate for the caller's retry policy; ECS errors
/// indicate broken wiring and do not.
pub fn build_maze_level<R: Rng + ?Sized>(
    world: &mut Coordinator,
    cfg: &LevelConfig,
    rng: &mut R,
) -> LevelResult<Level> {
    let world_dim = cfg.maze_world_dim();
    let mut tilemap = Tilemap::filled(world_dim, world_dim, TileId::Wall);

    // Odd maze dimension between 3 and the world size, centered by margin.
    let n = rng.gen_range(0..=((world_dim - 1) / 2 - 1));
    let maze_dim = n * 2 + 3;
    let margin = (world_dim - maze_dim) / 2;

    let mut maze = MazeGenerator::generate(maze_dim, maze_dim, rng)?;
    let (goal_x, goal_y) = maze.place_object(MazeCell::Goal, rng)?;

    for i in 0..maze_dim {
        for j in 0..maze_dim {
            let cell = maze.get(i + MAZE_MARGIN, j + MAZE_MARGIN);
            let tile = if cell == MazeCell::Wall {
                TileId::Wall
            } else {
                TileId::Empty
            };
            tilemap.set(i + margin, j + margin, tile);
        }
    }

    let goal_cell = (goal_x + margin, goal_y + margin);
    let agent_cell = (margin, margin);

    let goal = world.create_entity()?;
    world.add_component(
        goal,
        Transform {
            position: tile_center(&tilemap, goal_cell),
            ..Transform::default()
        },
    )?;
    world.add_component(
        goal,
        Sprite {
            offset: Vec2::new(-0.48, -0.5),
            scale: 0.95,
            z: 1.0,
            texture: textures::GOAL_CHEESE,
            ..Sprite::default()
        },
    )?;
    world.add_component(goal, Goal {
        reward: GOAL_REWARD,
    })?;
    world.add_component(goal, Collision::default())?;

    let agent = world.create_entity()?;
    world.add_component(
        agent,
        Transform {
            position: tile_center(&tilemap, agent_cell),
            ..Transform::default()
        },
    )?;
    world.add_component(agent, Collision::default())?;
    world.add_component(agent, Agent::default())?;

    Ok(Level {
        tilemap,
        agent,
        goal,
        agent_cell,
        goal_cell,
    })
}

/// Builds a cavern level: cellular-automata caves, goal and agent drawn
/// from the largest room, a dilated corridor carved along the shortest path
/// between them, and hazards scattered over the remaining floor.
///
/// # Errors
///
/// Generation errors propagate for the caller's retry policy; ECS errors
/// indicate broken wiring and do not.
pub fn build_cavern_level<R: Rng + ?Sized>(
    world: &mut Coordinator,
    cfg: &LevelConfig,
    rng: &mut R,
) -> LevelResult<Level> {
    let world_dim = cfg.cavern_world_dim();

    let mut rooms = RoomGenerator::new(world_dim, world_dim)?;
    rooms.seed_random(rng, cfg.wall_probability);
    for _ in 0..cfg.ca_iterations {
        rooms.step();
    }

    let best = rooms.largest_room()?;
    if best.len() < 2 {
        return Err(GenError::RoomTooSmall {
            size: best.len(),
            need: 2,
        }
        .into());
    }

    let mut tilemap = Tilemap::filled(world_dim, world_dim, TileId::Wall);
    for x in 0..world_dim {
        for y in 0..world_dim {
            if rooms.get(x, y) == gridgym_procedural::RoomCell::Space {
                tilemap.set(x, y, TileId::Empty);
            }
        }
    }

    // Goal and agent cells from the best room; rooms iterate in index
    // order, so the draw is reproducible.
    let free: Vec<usize> = best.iter().copied().collect();
    let goal_i = rng.gen_range(0..free.len());
    let mut agent_i = rng.gen_range(0..free.len());
    if agent_i == goal_i {
        agent_i = (agent_i + 1) % free.len();
    }
    let goal_index = free[goal_i];
    let agent_index = free[agent_i];

    let path = rooms.shortest_path(agent_index, goal_index)?;

    // Outside memory mode the level is pruned down to a corridor around
    // the guide path; memory mode keeps the whole cave.
    if cfg.mode != DistributionMode::Memory {
        let mut wide: Room = path.iter().copied().collect();
        rooms.dilate(&mut wide, cfg.corridor_radius as usize);

        for x in 0..world_dim {
            for y in 0..world_dim {
                tilemap.set(x, y, TileId::Wall);
            }
        }
        for &cell in &wide {
            let (x, y) = rooms.position(cell);
            tilemap.set(x, y, TileId::Empty);
        }
    }

    for &cell in &path {
        let (x, y) = rooms.position(cell);
        tilemap.set(x, y, TileId::Marker);
    }

    let goal_cell = rooms.position(goal_index);
    let agent_cell = rooms.position(agent_index);

    let goal = world.create_entity()?;
    world.add_component(
        goal,
        Transform {
            position: tile_center(&tilemap, goal_cell),
            ..Transform::default()
        },
    )?;
    world.add_component(
        goal,
        Sprite {
            offset: Vec2::new(-0.4, -0.4),
            scale: 0.8,
            z: 1.0,
            texture: textures::GOAL_SHIP,
            ..Sprite::default()
        },
    )?;
    world.add_component(goal, Goal {
        reward: GOAL_REWARD,
    })?;
    world.add_component(goal, Collision {
        bounds: Rect::new(-0.4, -0.4, 0.8, 0.8),
    })?;

    let agent = world.create_entity()?;
    world.add_component(
        agent,
        Transform {
            position: Vec2::new(
                agent_cell.0 as f32 + 0.5,
                (world_dim - 1 - agent_cell.1) as f32,
            ),
            ..Transform::default()
        },
    )?;
    world.add_component(agent, Collision {
        bounds: Rect::new(-0.4, -0.4, 0.8, 0.8),
    })?;
    world.add_component(agent, Dynamics::default())?;
    world.add_component(agent, Agent::default())?;

    // Hazard scatter over the floor left open outside the marked path.
    let mut open = Vec::new();
    for x in 0..world_dim {
        for y in 0..world_dim {
            if tilemap.get(x, y) == TileId::Empty {
                open.push((x, y));
            }
        }
    }

    let num_hazards = HAZARDS_PER_CHUNK * (open.len() / 80);
    for _ in 0..num_hazards {
        let (x, y) = open[rng.gen_range(0..open.len())];

        let hazard = world.create_entity()?;
        world.add_component(
            hazard,
            Transform {
                position: tile_center(&tilemap, (x, y)),
                ..Transform::default()
            },
        )?;
        world.add_component(
            hazard,
            Sprite {
                offset: Vec2::new(-0.4, -0.4),
                scale: 0.8,
                z: 1.0,
                texture: textures::HAZARD_ROCK,
                ..Sprite::default()
            },
        )?;
        world.add_component(hazard, Hazard { damage: 1.0 })?;
        world.add_component(hazard, Collision {
            bounds: Rect::new(-0.4, -0.4, 0.8, 0.8),
        })?;
    }

    Ok(Level {
        tilemap,
        agent,
        goal,
        agent_cell,
        goal_cell,
    })
}
