//! Live kyudo scoreboard for serpentine-wired LED panel chains.
//!
//! A [`cycle::UpdateCycle`] fetches the tournament feed, lays each
//! participant's arrows out through a [`layout::LayoutTable`], maps the
//! logical grid onto the chains through a [`wiring::WiringConfig`] and swaps
//! the finished frame onto a [`display::Display`].

pub mod config;
pub mod cycle;
pub mod display;
pub mod error;
pub mod feed;
pub mod frame;
pub mod icons;
pub mod layout;
pub mod render;
pub mod renderer;
pub mod scoreboard;
pub mod snapshot;
pub mod wiring;

pub use error::{Error, Result};
