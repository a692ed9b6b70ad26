//! One-call solving: validate, evolve, render, report waste.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CutSpec};
use crate::error::Result;
use crate::ga::{GaConfig, GeneticAlgorithm};
use crate::render::{render, Placement};

/// A solved layout with its waste accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Absolute placements, aligned by board index.
    pub placements: Vec<Placement>,

    /// The enclosing sheet. For a width-capped request the width is the
    /// configured cap.
    pub sheet: Board,

    /// Sheet area minus the summed board areas.
    pub waste: u64,

    /// Waste as a percentage of the total ordered board area.
    pub waste_percent: f64,

    /// Generations the run executed (may be fewer than configured under a
    /// wall-clock budget).
    pub generations: usize,

    /// Best fitness at the end of each generation.
    pub fitness_history: Vec<u64>,
}

/// Runs the genetic algorithm on a cut request and renders the winner.
///
/// Honors `config.time_limit` when set; otherwise runs the configured
/// number of generations.
pub fn solve(spec: &CutSpec, config: &GaConfig) -> Result<Solution> {
    let ga = GeneticAlgorithm::new(spec, config.clone())?;
    let result = match config.time_limit {
        Some(limit) => ga.run_bounded(limit),
        None => ga.run(),
    };
    let rendering = render(&result.layout);
    let total_area = spec.total_area();
    let waste = rendering.sheet.area().saturating_sub(total_area);
    let waste_percent = if total_area == 0 {
        0.0
    } else {
        100.0 * waste as f64 / total_area as f64
    };
    Ok(Solution {
        placements: rendering.placements,
        sheet: rendering.sheet,
        waste,
        waste_percent,
        generations: result.generations,
        fitness_history: result.fitness_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn spec(boards: &[(u32, u32)], max_width: u32) -> CutSpec {
        CutSpec::new(
            boards.iter().map(|&(w, h)| Board::new(w, h)).collect(),
            max_width,
        )
    }

    #[test]
    fn test_solve_reports_consistent_waste() {
        let spec = spec(&[(2, 3), (2, 3), (2, 3), (2, 3)], 0);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(40)
            .with_seed(42);
        let solution = solve(&spec, &config).unwrap();
        assert_eq!(solution.placements.len(), 4);
        assert_eq!(solution.generations, 40);
        assert_eq!(
            solution.waste,
            solution.sheet.area() - spec.total_area()
        );
        let expected_pct = 100.0 * solution.waste as f64 / spec.total_area() as f64;
        assert!((solution.waste_percent - expected_pct).abs() < 1e-9);
    }

    #[test]
    fn test_waste_percent_uses_total_board_area() {
        // Best layout for these two boards is the 5x6 side-by-side sheet:
        // waste 4 over 26 ordered area, not over the 30 sheet area.
        let spec = spec(&[(1, 6), (4, 5)], 0);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(40)
            .with_seed(42);
        let solution = solve(&spec, &config).unwrap();
        assert_eq!(solution.sheet.area(), 30);
        assert_eq!(solution.waste, 4);
        assert!((solution.waste_percent - 100.0 * 4.0 / 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_is_reproducible_with_seed() {
        let spec = spec(&[(1, 2), (3, 4), (5, 6), (2, 2)], 0);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(20)
            .with_seed(9);
        let a = solve(&spec, &config).unwrap();
        let b = solve(&spec, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_solve_respects_width_cap() {
        let spec = spec(&[(3, 2), (6, 2), (2, 5), (4, 3)], 6);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(30)
            .with_seed(3);
        let solution = solve(&spec, &config).unwrap();
        assert_eq!(solution.sheet.width, 6);
        for p in &solution.placements {
            assert!(p.x + p.width <= 6);
        }
    }

    #[test]
    fn test_solve_with_time_limit_stops_early() {
        let spec = spec(
            &[
                (1, 2),
                (3, 4),
                (5, 6),
                (2, 2),
                (4, 1),
                (2, 7),
                (3, 1),
                (6, 2),
                (1, 5),
                (4, 4),
            ],
            0,
        );
        let config = GaConfig::default()
            .with_population_size(50)
            .with_generations(10_000)
            .with_time_limit(Duration::from_millis(5))
            .with_seed(5);
        let solution = solve(&spec, &config).unwrap();
        assert!(solution.generations >= 1);
        assert!(solution.generations < 10_000);
        assert_eq!(solution.fitness_history.len(), solution.generations);
    }

    #[test]
    fn test_solve_rejects_invalid_config() {
        let spec = spec(&[(1, 1), (2, 2)], 0);
        assert!(solve(&spec, &GaConfig::default().with_selection_p(1.0)).is_err());
    }

    #[test]
    fn test_solution_serializes() {
        let spec = spec(&[(2, 3), (2, 3)], 0);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(5)
            .with_seed(1);
        let solution = solve(&spec, &config).unwrap();
        let json = serde_json::to_string(&solution).unwrap();
        let back: Solution = serde_json::from_str(&json).unwrap();
        assert_eq!(solution, back);
    }
}
