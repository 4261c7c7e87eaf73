//! # furrow_physics - Collision Queries
//!
//! Discrete AABB overlap tests against static, instanced obstacles. There is
//! no dynamics: agents propose a move, the query layer vetoes or clips it.
//!
//! # Architecture
//!
//! ```text
//! placement file ──► Vec<Mat4> ──► InstancedObstacle ──► ObstacleSet
//!                                    (world AABBs)          │
//!                       agent prospective AABB ────────────►│ query_blocked
//!                                                           ▼
//!                                                      bool / slide delta
//! ```
//!
//! # Example
//!
//! ```ignore
//! use furrow_physics::prelude::*;
//!
//! let posts = load_placements("Save/fence_matrix.txt")?;
//! let obstacles = ObstacleSet::new().with(InstancedObstacle::new("fence", post_box, posts));
//!
//! let next = hitbox.transform(&next_world_matrix);
//! if !obstacles.query_blocked(&next) {
//!     position = next_position;
//! }
//! ```

pub mod error;
pub mod obstacle;
pub mod placement;
pub mod query;

pub mod prelude {
    //! Common imports for collision queries
    pub use crate::error::{PlacementError, Result};
    pub use crate::obstacle::{InstancedObstacle, Obstacle};
    pub use crate::placement::{
        fence_rectangle, load_placements, parse_placements, save_placements, write_placements,
        FenceLayout,
    };
    pub use crate::query::ObstacleSet;
}

pub use prelude::*;
