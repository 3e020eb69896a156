//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening moves are accepted with probability
//! `exp(delta / T)`, which shrinks as the temperature cools, so the search
//! can leave local optima early and settles later.
//!
//! The starting temperature is either fixed or found by preheating: the
//! temperature is raised geometrically until a target share of random moves
//! around the initial solution would be accepted.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, InitialTemperature, SaConfig};
pub use runner::{acceptance_probability, SaResult, SaRunner};
