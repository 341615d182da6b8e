//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only (owned by the engine)
//! - Time only through the injected [`Clock`](crate::clock::Clock)
//! - No rendering, input or platform dependencies

pub mod engine;
pub mod placement;
pub mod state;
pub mod tick;

pub use engine::{Game, GameSnapshot, alerts_needed_for_level};
pub use placement::LevelLayout;
pub use state::{Board, CollisionKind, Direction, GameEvent, GamePhase, Position};
