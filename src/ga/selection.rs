//! Ranked populations and tournament selection.

use rand::Rng;

use crate::genotype::Genotype;

/// A population paired with its fitness values, sorted ascending by
/// fitness (lower is better).
///
/// The sort is stable, so individuals with equal fitness keep their prior
/// relative order — ranking is deterministic for a deterministic
/// evaluation.
#[derive(Debug, Clone)]
pub struct RankedPopulation {
    pop: Vec<Genotype>,
    fitnesses: Vec<u64>,
}

impl RankedPopulation {
    /// Ranks a population by its parallel fitness vector.
    ///
    /// # Panics
    /// Panics if the vectors disagree in length or are empty.
    pub fn new(pop: Vec<Genotype>, fitnesses: Vec<u64>) -> Self {
        assert_eq!(pop.len(), fitnesses.len(), "one fitness per genotype");
        assert!(!pop.is_empty(), "cannot rank an empty population");

        let mut paired: Vec<(u64, Genotype)> = fitnesses.into_iter().zip(pop).collect();
        paired.sort_by_key(|pair| pair.0);
        let (fitnesses, pop) = paired.into_iter().unzip();
        Self { pop, fitnesses }
    }

    pub fn len(&self) -> usize {
        self.pop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pop.is_empty()
    }

    /// The genotype at rank `i` (0 = best).
    pub fn genotype(&self, i: usize) -> &Genotype {
        &self.pop[i]
    }

    /// The fitness at rank `i`.
    pub fn fitness(&self, i: usize) -> u64 {
        self.fitnesses[i]
    }

    /// All genotypes, best first.
    pub fn genotypes(&self) -> &[Genotype] {
        &self.pop
    }

    /// All fitness values, ascending.
    pub fn fitnesses(&self) -> &[u64] {
        &self.fitnesses
    }

    /// The best individual and its fitness.
    pub fn best(&self) -> (&Genotype, u64) {
        (&self.pop[0], self.fitnesses[0])
    }
}

/// Tournament selection over a ranked population.
///
/// Each call draws `size` candidates uniformly at random with replacement,
/// sorts their fitness values ascending, and picks the candidate at the
/// rank produced by a truncated geometric draw: scan ranks 0..size, accept
/// a rank when a uniform sample exceeds `p`, restart the scan if a full
/// pass accepts none. The restart terminates with probability 1 only for
/// `p < 1`, which [`GaConfig::validate`](super::GaConfig::validate)
/// guarantees.
#[derive(Debug)]
pub struct TournamentSelector<'p> {
    ranked: &'p RankedPopulation,
    size: usize,
    p: f64,
    candidates: Vec<(usize, u64)>,
}

impl<'p> TournamentSelector<'p> {
    /// # Panics
    /// Panics on a zero tournament size or `p` outside [0, 1).
    pub fn new(ranked: &'p RankedPopulation, size: usize, p: f64) -> Self {
        assert!(size >= 1, "tournament size must be at least 1");
        assert!(
            (0.0..1.0).contains(&p),
            "selection probability must be in [0, 1)"
        );
        Self {
            ranked,
            size,
            p,
            candidates: Vec::with_capacity(size),
        }
    }

    /// Selects the next parent.
    pub fn next<R: Rng>(&mut self, rng: &mut R) -> &'p Genotype {
        self.candidates.clear();
        for _ in 0..self.size {
            let ix = rng.random_range(0..self.ranked.len());
            self.candidates.push((ix, self.ranked.fitness(ix)));
        }
        self.candidates.sort_by_key(|candidate| candidate.1);
        let rank = self.winner_rank(rng);
        self.ranked.genotype(self.candidates[rank].0)
    }

    /// Truncated/retried geometric rank draw.
    fn winner_rank<R: Rng>(&self, rng: &mut R) -> usize {
        loop {
            for rank in 0..self.size {
                if rng.random::<f64>() > self.p {
                    return rank;
                }
            }
        }
    }
}
