//! Built-in work handlers.

pub mod inventory;

pub use inventory::InventoryHandler;
