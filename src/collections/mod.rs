//! Collections backing the graph element stores.

pub mod slot_arena;

pub use slot_arena::{SlotArena, SlotKey};
