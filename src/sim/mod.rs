//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Fixed sub-steps per frame only
//! - Injected, seedable RNG only
//! - No rendering or file-system dependencies

pub mod collision;
pub mod geometry;
pub mod policy;
pub mod reflect;
pub mod return_path;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, crosses_boundary, sprite_boundary_collision};
pub use geometry::{Boundary, sprite_center, sprite_origin};
pub use policy::{center_alignment, should_return};
pub use reflect::{mirror_velocity, reflect_off_boundary};
pub use return_path::ReturnPath;
pub use state::{Phase, PositionLog, SimState, Termination, Trajectory};
pub use tick::Simulator;
