//! # Component Contract
//!
//! Components are pure data records with no behavior. Each component type
//! claims one kind index at compile time; that index is its bit in the
//! entity [`Signature`](super::Signature) and its slot in the component
//! registry, so no runtime type hashing is involved.

use bytemuck::{Pod, Zeroable};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: bitwise copyable, no heap payload
/// - `Pod` / `Zeroable`: plain old data with a fixed layout
/// - `Default`: constructible for placeholder slots
///
/// `KIND` must be unique across all component types registered with one
/// coordinator and below
/// [`MAX_COMPONENT_KINDS`](super::MAX_COMPONENT_KINDS); registration
/// enforces both.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Transform {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Transform {
///     const KIND: u8 = 0;
/// }
/// ```
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Unique kind index for this component type.
    const KIND: u8;
}
