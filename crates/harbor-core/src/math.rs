//! Vector types used for layout parameters.
//!
//! Re-exports the `glam` types Harbor needs so that downstream crates do not
//! have to depend on `glam` directly.
//!
//! ```
//! use harbor_core::math::Vec2;
//!
//! let padding = Vec2::splat(5.0) * 2.0;
//! assert_eq!(padding, Vec2::new(10.0, 10.0));
//! ```

pub use glam::{Vec2, vec2};
