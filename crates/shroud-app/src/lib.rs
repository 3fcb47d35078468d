//! Headless host for the Shroud entity filter.
//!
//! Drives a scripted scene on a fixed-timestep clock: events are published
//! once per simulation tick, the draw predicate is consulted every frame.

pub mod game_loop;
pub mod platform;
pub mod render;
pub mod scene;
