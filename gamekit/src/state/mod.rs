//! Game state plumbing.
//!
//! ## Module Structure
//!
//! - `ecs`: entity registry, component stores, systems
//! - `events`: named publish/subscribe
//! - `fsm`: named-state transitions
//! - `storage`: typed save/load over the host store
//! - `input`: polled keyboard/pointer/gamepad state
//! - `dialogue`: dialogue queue and bounded in-game log

pub mod ecs;
pub mod events;
pub mod fsm;
pub mod storage;
pub mod input;
pub mod dialogue;

pub use ecs::{Entity, World};
pub use events::EventBus;
pub use fsm::Fsm;
pub use storage::Storage;
pub use input::{GamepadState, InputEvent, InputState, Mouse};
pub use dialogue::{Dialogue, Logger};
