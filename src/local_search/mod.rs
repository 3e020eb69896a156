//! Local search drivers.
//!
//! - **Hill Climbing**: repeatedly applies the move chosen by an
//!   [`Exploration`](crate::neighborhood::Exploration) while it strictly
//!   improves, and stops at a local optimum.
//! - **Random Descent**: like hill climbing, but keeps going for a number of
//!   non-improving steps, taking random sideways moves across plateaus.
//!
//! Both drivers stop early on their time budget or iteration cap and never
//! return a solution worse than the one they started from.
//!
//! # References
//!
//! - Hoos, H. & Stützle, T. (2004), *Stochastic Local Search: Foundations
//!   and Applications*, ch. 1-2

mod config;
mod runner;

pub use config::{LocalSearchConfig, LocalSearchMethod};
pub use runner::{LocalSearchResult, LocalSearchRunner};
