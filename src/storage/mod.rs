//! Persistent storage module

pub mod slot;

pub use slot::UploadSlot;
