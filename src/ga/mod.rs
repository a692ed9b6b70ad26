//! Genetic algorithm engine for guillotine layouts.
//!
//! The engine evolves a population of [`Genotype`]s against one immutable
//! [`CutSpec`]: every individual is decoded into a [`LayoutTree`], scored
//! (area, or height when the sheet width is capped), ranked, and bred into
//! the next generation with elitism, tournament selection, crossover, and
//! mutation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: parameters, builder, and validation
//! - [`RankedPopulation`]: population sorted ascending by fitness
//! - [`TournamentSelector`]: rank-biased parent selection
//! - [`GeneticAlgorithm`]: the evolution loop, fixed-generation or
//!   wall-clock-bounded
//! - [`GaResult`]: best layout, fitness history, generations executed
//!
//! [`Genotype`]: crate::genotype::Genotype
//! [`CutSpec`]: crate::board::CutSpec
//! [`LayoutTree`]: crate::layout::LayoutTree

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GeneticAlgorithm};
pub use selection::{RankedPopulation, TournamentSelector};
