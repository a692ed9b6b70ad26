//! Guillotine cutting layout optimization.
//!
//! Given a list of rectangular boards, this crate searches for a compact
//! guillotine layout: a binary tree of horizontal and vertical joins whose
//! root bounding box wastes as little sheet as possible. The search is a
//! genetic algorithm over pairwise-join genotypes.
//!
//! # Pipeline
//!
//! - [`board`]: boards, order expansion, and the immutable [`CutSpec`]
//! - [`genotype`]: weighted-join genotypes, crossover, and mutation
//! - [`layout`]: union-find decoding of a genotype into a [`LayoutTree`]
//! - [`ga`]: the evolutionary engine, fixed-generation or time-bounded
//! - [`render`]: absolute placements on the final sheet
//! - [`solver`]: the one-call [`solve`] entry point with waste reporting
//!
//! # Example
//!
//! ```
//! use guillotine::board::{Board, CutSpec};
//! use guillotine::ga::GaConfig;
//! use guillotine::solver::solve;
//!
//! let spec = CutSpec::new(
//!     vec![Board::new(2, 3), Board::new(2, 3), Board::new(4, 3)],
//!     0,
//! );
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_generations(50)
//!     .with_seed(42);
//! let solution = solve(&spec, &config).unwrap();
//! assert_eq!(solution.placements.len(), 3);
//! assert!(solution.sheet.area() >= spec.total_area());
//! ```
//!
//! When a maximum sheet width is given (`max_width > 0`), the decoder
//! repairs layouts to fit it and the fitness switches from area to height.
//!
//! [`CutSpec`]: board::CutSpec
//! [`LayoutTree`]: layout::LayoutTree
//! [`solve`]: solver::solve

pub mod board;
pub mod error;
pub mod ga;
pub mod genotype;
pub mod layout;
pub mod render;
pub mod solver;

mod random;

pub use board::{Board, BoardOrder, CutSpec};
pub use error::{Error, Result};
pub use solver::{solve, Solution};
