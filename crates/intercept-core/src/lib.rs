//! Core types and definitions for the intercept simulation.
//!
//! This crate defines the vocabulary shared by the engine and its drivers:
//! bodies, guidance constants, configuration, commands, events and the
//! per-tick snapshot. It performs no simulation and no I/O.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod profile;
pub mod state;
pub mod types;
