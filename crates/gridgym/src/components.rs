//! # Common Components
//!
//! The data records shared by the whole game family. All of them are plain
//! `Pod` structs: fixed layout, no heap payload, bitwise copyable. Textures
//! are referenced by catalog id because asset loading belongs to the
//! embedding runtime.

use bytemuck::{Pod, Zeroable};
use gridgym_core::Component;

/// 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle: origin plus extent, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the no-tint default.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// World placement of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// Position in world units.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Component for Transform {
    const KIND: u8 = 0;
}

/// Collision extents relative to the transform.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Collision {
    /// Bounding rectangle, centered by convention at (-0.5, -0.5).
    pub bounds: Rect,
}

impl Default for Collision {
    fn default() -> Self {
        Self {
            bounds: Rect::new(-0.5, -0.5, 1.0, 1.0),
        }
    }
}

impl Component for Collision {
    const KIND: u8 = 1;
}

/// Velocity state for entities the physics step moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Dynamics {
    /// Velocity in world units per step.
    pub velocity: Vec2,
}

impl Component for Dynamics {
    const KIND: u8 = 2;
}

/// Drawable sprite attached to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Sprite {
    /// Offset relative to the transform.
    pub offset: Vec2,
    /// Rotation relative to the transform, in radians.
    pub rotation: f32,
    /// Scale relative to the transform.
    pub scale: f32,
    /// Draw-order depth; higher draws later.
    pub z: f32,
    /// Texture catalog id resolved by the embedding renderer.
    pub texture: u32,
    /// Tint color.
    pub tint: Rgba8,
    /// Bit flags, see [`Sprite::FLIP_X`].
    pub flags: u32,
}

impl Sprite {
    /// Flag bit: mirror horizontally.
    pub const FLIP_X: u32 = 1;
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            offset: Vec2::default(),
            rotation: 0.0,
            scale: 1.0,
            z: 0.0,
            texture: 0,
            tint: Rgba8::WHITE,
            flags: 0,
        }
    }
}

impl Component for Sprite {
    const KIND: u8 = 3;
}

/// Marks an entity as the episode goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Goal {
    /// Reward granted when the agent reaches it.
    pub reward: f32,
}

impl Component for Goal {
    const KIND: u8 = 4;
}

/// Marks an entity as hazardous to touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Hazard {
    /// Damage dealt on contact.
    pub damage: f32,
}

impl Component for Hazard {
    const KIND: u8 = 5;
}

/// Marks the player-controlled entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Agent {
    /// Last action delivered by the training loop.
    pub action: i32,
}

impl Component for Agent {
    const KIND: u8 = 6;
}
