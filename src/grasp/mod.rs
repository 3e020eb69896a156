//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! A multi-start metaheuristic. Each iteration builds a solution with a
//! randomized greedy construction (restricted candidate list controlled by
//! `alpha`), refines it with local search, and keeps the best result seen.
//!
//! # References
//!
//! - Feo, T. & Resende, M. (1995), "Greedy Randomized Adaptive Search
//!   Procedures", *Journal of Global Optimization* 6, 109-133

mod config;
mod runner;

pub use config::GraspConfig;
pub use runner::{GraspResult, GraspRunner};
