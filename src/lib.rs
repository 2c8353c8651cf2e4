//! Grid Skirmish - deterministic tactical battle simulator

pub mod battle;
pub mod core;
