//! The GA evolutionary loop.
//!
//! [`GeneticAlgorithm`] orchestrates the full process: random population →
//! decode-and-score → rank → elitist breeding with tournament selection,
//! crossover, and mutation → repeat, bounded by a generation count or a
//! wall-clock budget.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use super::config::GaConfig;
use super::selection::{RankedPopulation, TournamentSelector};
use crate::board::CutSpec;
use crate::error::Result;
use crate::genotype::{CompoundMutator, Genotype, Mutator};
use crate::layout::{FitnessKind, LayoutTree};
use crate::random::create_rng;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<'a> {
    /// The best individual's decoded layout.
    pub layout: LayoutTree<'a>,

    /// Fitness of the best individual (area, or height when width-capped).
    pub best_fitness: u64,

    /// Generations actually executed; the initial random population counts
    /// as the first.
    pub generations: usize,

    /// Best fitness at the end of each generation.
    pub fitness_history: Vec<u64>,
}

/// The evolution engine, bound to one spec.
///
/// Construction validates the configuration; a constructed engine cannot
/// fail at run time. The fitness function is chosen from the spec: height
/// once the sheet width is capped, area otherwise.
#[derive(Debug)]
pub struct GeneticAlgorithm<'a> {
    spec: &'a CutSpec,
    config: GaConfig,
    fitness: FitnessKind,
    mutator: CompoundMutator,
}

impl<'a> GeneticAlgorithm<'a> {
    /// Builds an engine for a spec, validating the configuration.
    pub fn new(spec: &'a CutSpec, config: GaConfig) -> Result<Self> {
        config.validate(spec.len())?;
        let mutator =
            CompoundMutator::from_means(config.weight_mutate_mean, config.config_mutate_mean)?;
        Ok(Self {
            spec,
            fitness: FitnessKind::for_spec(spec),
            config,
            mutator,
        })
    }

    /// Runs for the configured number of generations.
    pub fn run(&self) -> GaResult<'a> {
        let mut rng = self.make_rng();
        let mut ranked = self.evaluate(self.random_population(&mut rng));
        let mut history = vec![ranked.best().1];
        for _ in 1..self.config.generations {
            ranked = self.evaluate(self.next_generation(&ranked, &mut rng));
            history.push(ranked.best().1);
        }
        self.finish(&ranked, self.config.generations, history)
    }

    /// Runs until the configured generation count or a wall-clock budget,
    /// whichever comes first.
    ///
    /// The budget is a non-blocking poll between generations: after each
    /// generation the average per-generation cost so far is extrapolated,
    /// and the run stops if one more generation would likely overshoot.
    /// A generation in progress always completes.
    pub fn run_bounded(&self, limit: Duration) -> GaResult<'a> {
        let start = Instant::now();
        let mut rng = self.make_rng();
        let mut ranked = self.evaluate(self.random_population(&mut rng));
        let mut history = vec![ranked.best().1];
        for generation in 1..self.config.generations {
            let g = generation as u128;
            if start.elapsed().as_nanos() * (g + 1) / g > limit.as_nanos() {
                return self.finish(&ranked, generation, history);
            }
            ranked = self.evaluate(self.next_generation(&ranked, &mut rng));
            history.push(ranked.best().1);
        }
        self.finish(&ranked, self.config.generations, history)
    }

    /// Decodes and scores a population, producing its ranking.
    pub fn evaluate(&self, pop: Vec<Genotype>) -> RankedPopulation {
        let score = |genotype: &Genotype| {
            self.fitness
                .score(&LayoutTree::decode(self.spec, genotype))
        };
        let fitnesses: Vec<u64> = if self.config.parallel {
            pop.par_iter().map(score).collect()
        } else {
            pop.iter().map(score).collect()
        };
        RankedPopulation::new(pop, fitnesses)
    }

    fn make_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        }
    }

    fn random_population<R: Rng>(&self, rng: &mut R) -> Vec<Genotype> {
        let nboards = self.spec.len() as u16;
        (0..self.config.population_size)
            .map(|_| Genotype::random(nboards, rng))
            .collect()
    }

    /// Breeds the next generation: elites are copied unchanged, the rest
    /// is filled pairwise from tournament-selected parents. When a single
    /// slot remains, the extra second child is discarded.
    fn next_generation<R: Rng>(&self, ranked: &RankedPopulation, rng: &mut R) -> Vec<Genotype> {
        let psize = self.config.population_size;
        let mut next: Vec<Genotype> = ranked.genotypes()[..self.config.elite_size].to_vec();
        let mut selector =
            TournamentSelector::new(ranked, self.config.tournament_size, self.config.selection_p);
        while next.len() < psize {
            let p1 = selector.next(rng);
            let p2 = selector.next(rng);
            let (mut c1, mut c2) = self.config.crossover.breed(p1, p2, rng);
            self.mutator.mutate(&mut c1, rng);
            self.mutator.mutate(&mut c2, rng);
            next.push(c1);
            if next.len() < psize {
                next.push(c2);
            }
        }
        next
    }

    fn finish(
        &self,
        ranked: &RankedPopulation,
        generations: usize,
        fitness_history: Vec<u64>,
    ) -> GaResult<'a> {
        let (best, best_fitness) = ranked.best();
        GaResult {
            layout: LayoutTree::decode(self.spec, best),
            best_fitness,
            generations,
            fitness_history,
        }
    }
}
