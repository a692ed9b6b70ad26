//! Chromosome representation and genetic operators.
//!
//! A [`Genotype`] holds one [`WeightedJoin`] gene for every unordered pair of
//! board indices, enumerated in a canonical order shared by every genotype of
//! the same spec. Only weights and join configurations vary between
//! individuals; the pair layout is fixed, which is what makes positional
//! crossover meaningful.
//!
//! # Operators
//!
//! - [`Crossover`]: uniform, one-point and two-point recombination
//! - [`WeightMutator`] / [`ConfigMutator`] / [`CompoundMutator`]: in-place
//!   gene replacement, count drawn from |Normal(mean, stddev)|

use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Orientation of a join: children side by side, or stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// How two components are merged: the join direction plus a rotation flag
/// for each side.
///
/// Rotation flags are requests, not guarantees — the decoder only honors
/// them the first time a leaf is joined, and may override them to satisfy
/// the sheet width cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub direction: Direction,
    pub i_rotated: bool,
    pub j_rotated: bool,
}

impl Join {
    /// A join in the given direction with both sides unrotated.
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            i_rotated: false,
            j_rotated: false,
        }
    }

    /// Side-by-side join, no rotations.
    pub const fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Stacked join, no rotations.
    pub const fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Marks the first component as rotated.
    pub const fn with_i_rotated(mut self) -> Self {
        self.i_rotated = true;
        self
    }

    /// Marks the second component as rotated.
    pub const fn with_j_rotated(mut self) -> Self {
        self.j_rotated = true;
        self
    }

    /// Uniformly random 3-flag configuration.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            direction: if rng.random_bool(0.5) {
                Direction::Vertical
            } else {
                Direction::Horizontal
            },
            i_rotated: rng.random_bool(0.5),
            j_rotated: rng.random_bool(0.5),
        }
    }
}

/// One gene: a board pair, its join configuration, and the weight that
/// determines its processing priority during decoding (ascending).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedJoin {
    pub i: u16,
    pub j: u16,
    pub weight: f32,
    pub join: Join,
}

/// An ordered collection of weighted joins, one per unordered board pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Genotype {
    genes: Vec<WeightedJoin>,
}

impl Genotype {
    /// Number of genes for `nboards` boards: n·(n−1)/2.
    pub fn pair_count(nboards: u16) -> usize {
        let n = nboards as usize;
        n * n.saturating_sub(1) / 2
    }

    /// A random genotype: canonical pair order (i < j, lexicographic),
    /// uniform weights in [0, 1) and uniform join configurations.
    pub fn random<R: Rng>(nboards: u16, rng: &mut R) -> Self {
        let mut genes = Vec::with_capacity(Self::pair_count(nboards));
        for i in 0..nboards {
            for j in (i + 1)..nboards {
                genes.push(WeightedJoin {
                    i,
                    j,
                    weight: rng.random::<f32>(),
                    join: Join::random(rng),
                });
            }
        }
        Self { genes }
    }

    /// Builds a genotype from explicit genes. Intended for tests and
    /// deterministic replay; decoding expects the full canonical pair set.
    pub fn from_genes(genes: Vec<WeightedJoin>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[WeightedJoin] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Recombination strategy over two equal-length genotypes.
///
/// All three strategies splice whole genes, so a child's gene at position k
/// carries the same `(i, j)` pair as both parents' gene at position k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crossover {
    /// Per-position fair coin flip: heads copies straight through, tails
    /// swaps the gene between children.
    Uniform,
    /// One random cut index; children are complementary prefix/suffix
    /// splices.
    OnePoint,
    /// Two random indices (order-normalized); children swap the middle
    /// segment.
    TwoPoint,
}

impl Crossover {
    /// Produces two children from two parents.
    ///
    /// # Panics
    /// Panics if the parents have different lengths — that is a programming
    /// error, not a recoverable condition.
    pub fn breed<R: Rng>(
        &self,
        p1: &Genotype,
        p2: &Genotype,
        rng: &mut R,
    ) -> (Genotype, Genotype) {
        assert_eq!(
            p1.len(),
            p2.len(),
            "parent genotypes must have equal length"
        );
        match self {
            Crossover::Uniform => uniform(p1, p2, rng),
            Crossover::OnePoint => one_point(p1, p2, rng),
            Crossover::TwoPoint => two_point(p1, p2, rng),
        }
    }
}

impl FromStr for Crossover {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(Crossover::Uniform),
            "onepoint" => Ok(Crossover::OnePoint),
            "twopoint" => Ok(Crossover::TwoPoint),
            other => Err(Error::UnknownCrossover(other.to_string())),
        }
    }
}

fn uniform<R: Rng>(p1: &Genotype, p2: &Genotype, rng: &mut R) -> (Genotype, Genotype) {
    let n = p1.len();
    let mut c1 = Vec::with_capacity(n);
    let mut c2 = Vec::with_capacity(n);
    for k in 0..n {
        if rng.random_bool(0.5) {
            c1.push(p2.genes[k]);
            c2.push(p1.genes[k]);
        } else {
            c1.push(p1.genes[k]);
            c2.push(p2.genes[k]);
        }
    }
    (Genotype { genes: c1 }, Genotype { genes: c2 })
}

fn one_point<R: Rng>(p1: &Genotype, p2: &Genotype, rng: &mut R) -> (Genotype, Genotype) {
    let n = p1.len();
    let cut = rng.random_range(0..n);
    let mut c1 = p1.genes[..cut].to_vec();
    c1.extend_from_slice(&p2.genes[cut..]);
    let mut c2 = p2.genes[..cut].to_vec();
    c2.extend_from_slice(&p1.genes[cut..]);
    (Genotype { genes: c1 }, Genotype { genes: c2 })
}

fn two_point<R: Rng>(p1: &Genotype, p2: &Genotype, rng: &mut R) -> (Genotype, Genotype) {
    let n = p1.len();
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut c1 = p1.genes[..lo].to_vec();
    c1.extend_from_slice(&p2.genes[lo..hi]);
    c1.extend_from_slice(&p1.genes[hi..]);

    let mut c2 = p2.genes[..lo].to_vec();
    c2.extend_from_slice(&p1.genes[lo..hi]);
    c2.extend_from_slice(&p2.genes[hi..]);

    (Genotype { genes: c1 }, Genotype { genes: c2 })
}

// ============================================================================
// Mutation
// ============================================================================

/// In-place genotype mutation.
pub trait Mutator {
    fn mutate<R: Rng>(&self, genotype: &mut Genotype, rng: &mut R);
}

/// Draws |Normal(mean, stddev)| truncated toward zero.
///
/// Gene positions are then sampled with replacement, so the realized number
/// of distinct mutated genes is at most the drawn count.
fn draw_count<R: Rng>(normal: &Normal<f64>, rng: &mut R) -> usize {
    normal.sample(rng).abs() as usize
}

fn normal(name: &'static str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() || mean < 0.0 {
        return Err(Error::ParamOutOfRange { name, value: mean });
    }
    Normal::new(mean, std_dev).map_err(|_| Error::ParamOutOfRange {
        name,
        value: std_dev,
    })
}

/// Replaces randomly chosen genes' weights with fresh uniform values.
#[derive(Debug, Clone, Copy)]
pub struct WeightMutator {
    normal: Normal<f64>,
}

impl WeightMutator {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        Ok(Self {
            normal: normal("weight mutation", mean, std_dev)?,
        })
    }
}

impl Mutator for WeightMutator {
    fn mutate<R: Rng>(&self, genotype: &mut Genotype, rng: &mut R) {
        if genotype.is_empty() {
            return;
        }
        for _ in 0..draw_count(&self.normal, rng) {
            let ix = rng.random_range(0..genotype.genes.len());
            genotype.genes[ix].weight = rng.random::<f32>();
        }
    }
}

/// Replaces randomly chosen genes' join configurations.
#[derive(Debug, Clone, Copy)]
pub struct ConfigMutator {
    normal: Normal<f64>,
}

impl ConfigMutator {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        Ok(Self {
            normal: normal("config mutation", mean, std_dev)?,
        })
    }
}

impl Mutator for ConfigMutator {
    fn mutate<R: Rng>(&self, genotype: &mut Genotype, rng: &mut R) {
        if genotype.is_empty() {
            return;
        }
        for _ in 0..draw_count(&self.normal, rng) {
            let ix = rng.random_range(0..genotype.genes.len());
            genotype.genes[ix].join = Join::random(rng);
        }
    }
}

/// Weight mutation followed by config mutation, each with its own
/// mean/stddev.
#[derive(Debug, Clone, Copy)]
pub struct CompoundMutator {
    pub weight: WeightMutator,
    pub config: ConfigMutator,
}

impl CompoundMutator {
    pub fn new(weight: WeightMutator, config: ConfigMutator) -> Self {
        Self { weight, config }
    }

    /// Builds both mutators from their means, with stddev = mean / 5.
    pub fn from_means(weight_mean: f64, config_mean: f64) -> Result<Self> {
        Ok(Self {
            weight: WeightMutator::new(weight_mean, weight_mean / 5.0)?,
            config: ConfigMutator::new(config_mean, config_mean / 5.0)?,
        })
    }
}

impl Mutator for CompoundMutator {
    fn mutate<R: Rng>(&self, genotype: &mut Genotype, rng: &mut R) {
        self.weight.mutate(genotype, rng);
        self.config.mutate(genotype, rng);
    }
}

// ============================================================================
// Tests
// ============================================================================
