//! Layout trees: the genotype → phenotype decoder.
//!
//! A [`LayoutTree`] is the concrete guillotine layout decoded from one
//! [`Genotype`] against one [`CutSpec`]. It is an arena, not a pointer graph:
//! leaves live in `picks` (one per board, same index as the spec) and internal
//! nodes in `stacks` (exactly n−1 after a full decode), addressed through a
//! shared *mixed* index space — `0..n-1` are leaves, `n..2n-2` are nodes.
//!
//! Construction is Kruskal-style over the complete board-pair graph: genes
//! are processed in ascending weight order, and a gene whose two boards
//! already belong to the same component is skipped. Union-find with
//! path compression keeps component lookups cheap. Each union allocates the
//! next internal node and memoizes its bounding box bottom-up, so the root's
//! box is available the moment decoding finishes.
//!
//! Two constraint repairs run during construction when the spec carries a
//! width cap:
//!
//! 1. **First-pick rotation repair** — the first time a leaf is joined, a
//!    requested orientation whose width exceeds the cap is flipped. A leaf's
//!    orientation is permanent after its first union.
//! 2. **Horizontal overflow repair** — a horizontal join whose combined width
//!    exceeds the cap is rebuilt as a vertical join (stacking makes width the
//!    max, not the sum, of the children, so it can never overflow).

use serde::{Deserialize, Serialize};

use crate::board::{Board, CutSpec};
use crate::genotype::{Direction, Genotype, Join};

/// Leaf state: the owning internal node (if any) and the resolved
/// orientation. Rotation, once fixed at the first union, is permanent.
#[derive(Debug, Clone, Copy, Default)]
struct Pick {
    parent: Option<usize>,
    rotated: bool,
}

/// Internal node: two children in the mixed index space, an optional parent
/// node, and the join direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StackNode {
    pub(crate) left: usize,
    pub(crate) right: usize,
    parent: Option<usize>,
    pub(crate) direction: Direction,
}

/// A decoded layout: the phenotype of one genotype.
#[derive(Debug, Clone)]
pub struct LayoutTree<'a> {
    spec: &'a CutSpec,
    picks: Vec<Pick>,
    stacks: Vec<StackNode>,
    /// Memoized bounding box per internal node, filled bottom-up.
    areas: Vec<Board>,
}

impl<'a> LayoutTree<'a> {
    /// An empty tree over the spec's boards, ready for unions.
    pub fn new(spec: &'a CutSpec) -> Self {
        let n = spec.len();
        Self {
            spec,
            picks: vec![Pick::default(); n],
            stacks: Vec::with_capacity(n.saturating_sub(1)),
            areas: Vec::with_capacity(n.saturating_sub(1)),
        }
    }

    /// Decodes a genotype into its layout.
    ///
    /// Genes are processed by ascending weight (ties keep their original
    /// order) until n−1 unions have occurred. A genotype holding the full
    /// canonical pair set always spans: the pair graph is complete, so
    /// enough non-redundant edges exist.
    pub fn decode(spec: &'a CutSpec, genotype: &Genotype) -> LayoutTree<'a> {
        let mut genes = genotype.genes().to_vec();
        genes.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut tree = LayoutTree::new(spec);
        let mut remaining = spec.len().saturating_sub(1);
        for gene in &genes {
            if remaining == 0 {
                break;
            }
            if tree.take(gene.i as usize, gene.j as usize, gene.join) {
                remaining -= 1;
            }
        }
        debug_assert_eq!(remaining, 0, "genotype did not span all boards");
        tree
    }

    /// Joins the components of boards `i` and `j` unless they are already
    /// connected. Returns whether a union happened.
    ///
    /// The join's rotation flags are requests: they only apply to a leaf's
    /// first union, after width-cap repair. A horizontal join that would
    /// overflow the cap is rebuilt vertically.
    pub(crate) fn take(&mut self, i: usize, j: usize, join: Join) -> bool {
        let root_i = self.leaf_root(i);
        let root_j = self.leaf_root(j);
        if root_i == root_j {
            return false;
        }
        let join = self.repair_rotations(i, j, join);

        let k = self.stacks.len();
        self.stacks.push(StackNode {
            left: root_i,
            right: root_j,
            parent: None,
            direction: join.direction,
        });
        self.set_child(root_i, k, join.i_rotated);
        self.set_child(root_j, k, join.j_rotated);
        self.areas.push(self.stack_box(k));

        let max_width = self.spec.max_width();
        if max_width > 0
            && join.direction == Direction::Horizontal
            && self.areas[k].width > max_width
        {
            self.stacks[k].direction = Direction::Vertical;
            self.areas[k] = self.stack_box(k);
        }
        true
    }

    /// Number of leaf boards.
    pub fn nboards(&self) -> usize {
        self.picks.len()
    }

    /// Number of internal nodes created so far.
    pub fn node_count(&self) -> usize {
        self.stacks.len()
    }

    /// The root's bounding box: the final sheet.
    pub fn root_box(&self) -> Board {
        match self.areas.last() {
            Some(b) => *b,
            None if self.nboards() == 1 => self.component_box(0),
            None => Board::default(),
        }
    }

    /// Sheet area of the decoded layout.
    pub fn area(&self) -> u64 {
        self.root_box().area()
    }

    /// Sheet height of the decoded layout.
    pub fn height(&self) -> u32 {
        self.root_box().height
    }

    /// Whether leaf `i` is used in its rotated orientation.
    pub fn leaf_rotated(&self, i: usize) -> bool {
        self.picks[i].rotated
    }

    /// The spec this tree was decoded against.
    pub fn spec(&self) -> &'a CutSpec {
        self.spec
    }

    pub(crate) fn stack(&self, k: usize) -> StackNode {
        self.stacks[k]
    }

    /// Bounding box of a component in the mixed index space: an oriented
    /// board for leaves, the memoized area for internal nodes.
    pub(crate) fn component_box(&self, ix: usize) -> Board {
        let n = self.nboards();
        if ix < n {
            let board = self.spec.board(ix);
            if self.picks[ix].rotated {
                board.rotated()
            } else {
                board
            }
        } else {
            self.areas[ix - n]
        }
    }

    /// Root of leaf `i`'s component, as a mixed index. Compresses the
    /// leaf's parent pointer on the way.
    fn leaf_root(&mut self, i: usize) -> usize {
        match self.picks[i].parent {
            None => i,
            Some(p) => {
                let root = self.node_root(p);
                self.picks[i].parent = Some(root);
                self.nboards() + root
            }
        }
    }

    /// Root of node `k`'s component, as a node index. Every node visited
    /// gets its parent pointer rewritten to the discovered root.
    fn node_root(&mut self, k: usize) -> usize {
        match self.stacks[k].parent {
            None => k,
            Some(p) => {
                let root = self.node_root(p);
                self.stacks[k].parent = Some(root);
                root
            }
        }
    }

    /// Attaches a component (mixed index) to node `parent`. The rotation
    /// flag only lands on leaves — that is, on a leaf's first union.
    fn set_child(&mut self, ix: usize, parent: usize, rotated: bool) {
        let n = self.nboards();
        if ix < n {
            self.picks[ix].parent = Some(parent);
            self.picks[ix].rotated = rotated;
        } else {
            self.stacks[ix - n].parent = Some(parent);
        }
    }

    /// Width-cap repair of both rotation requests, against the *leaf*
    /// boards named by the gene. Harmless for already-picked leaves, whose
    /// roots are nodes and ignore rotation flags.
    fn repair_rotations(&self, i: usize, j: usize, join: Join) -> Join {
        Join {
            direction: join.direction,
            i_rotated: self.clamp_rotation(i, join.i_rotated),
            j_rotated: self.clamp_rotation(j, join.j_rotated),
        }
    }

    /// Flips a requested orientation if it would exceed the width cap.
    fn clamp_rotation(&self, leaf: usize, rotated: bool) -> bool {
        let max_width = self.spec.max_width();
        if max_width == 0 {
            return rotated;
        }
        let mut board = self.spec.board(leaf);
        if rotated {
            board = board.rotated();
        }
        if board.width > max_width {
            !rotated
        } else {
            rotated
        }
    }

    /// Bounding box of node `k` from its children, per its direction.
    fn stack_box(&self, k: usize) -> Board {
        let node = self.stacks[k];
        let first = self.component_box(node.left);
        let second = self.component_box(node.right);
        match node.direction {
            Direction::Horizontal => first.hstack(second),
            Direction::Vertical => first.vstack(second),
        }
    }
}

/// What a layout is scored on.
///
/// Area when the sheet is unconstrained; height once the width is capped,
/// because height is then the only dimension left to minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessKind {
    Area,
    Height,
}

impl FitnessKind {
    /// Scores a decoded layout. Lower is better.
    pub fn score(&self, tree: &LayoutTree<'_>) -> u64 {
        match self {
            FitnessKind::Area => tree.area(),
            FitnessKind::Height => tree.height() as u64,
        }
    }

    /// The fitness appropriate for a spec: height when width-capped.
    pub fn for_spec(spec: &CutSpec) -> FitnessKind {
        if spec.max_width() > 0 {
            FitnessKind::Height
        } else {
            FitnessKind::Area
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn spec(boards: &[(u32, u32)], max_width: u32) -> CutSpec {
        CutSpec::new(
            boards.iter().map(|&(w, h)| Board::new(w, h)).collect(),
            max_width,
        )
    }

    #[test]
    fn test_two_boards_horizontal() {
        let spec = spec(&[(1, 6), (4, 5)], 0);
        let mut lt = LayoutTree::new(&spec);
        assert!(lt.take(0, 1, Join::horizontal()));
        assert_eq!(lt.area(), 30);
    }

    #[test]
    fn test_three_boards() {
        let spec = spec(&[(1, 6), (4, 5), (5, 2)], 0);
        let mut lt = LayoutTree::new(&spec);
        assert!(lt.take(0, 1, Join::horizontal()));
        assert!(lt.take(0, 2, Join::vertical()));
        assert_eq!(lt.area(), 40);
    }

    #[test]
    fn test_bigger_tree() {
        let spec = spec(
            &[
                (1, 2),
                (2, 2),
                (1, 5),
                (3, 1),
                (2, 7),
                (4, 2),
                (5, 3),
                (2, 6),
            ],
            0,
        );
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 5, Join::horizontal());
        lt.take(1, 5, Join::horizontal().with_i_rotated());
        lt.take(2, 3, Join::vertical().with_j_rotated());
        lt.take(4, 5, Join::horizontal());
        lt.take(6, 7, Join::vertical().with_i_rotated().with_j_rotated());
        lt.take(6, 3, Join::vertical());
        lt.take(3, 5, Join::horizontal());
        assert_eq!(lt.node_count(), 7);
        assert_eq!(lt.area(), 225);
    }

    #[test]
    fn test_redundant_union_is_skipped() {
        let spec = spec(&[(1, 6), (4, 5), (5, 2)], 0);
        let mut lt = LayoutTree::new(&spec);
        assert!(lt.take(0, 1, Join::horizontal()));
        assert!(!lt.take(1, 0, Join::vertical()));
        assert_eq!(lt.node_count(), 1);
        assert!(lt.take(2, 1, Join::vertical()));
        assert!(!lt.take(0, 2, Join::horizontal()));
        assert_eq!(lt.node_count(), 2);
    }

    #[test]
    fn test_find_is_idempotent_and_compresses() {
        let spec = spec(&[(1, 1), (2, 2), (3, 3), (4, 4)], 0);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal());
        lt.take(2, 3, Join::horizontal());
        lt.take(0, 2, Join::vertical());

        let first = lt.leaf_root(3);
        // After compression, the leaf points straight at the root node.
        let compressed_parent = lt.picks[3].parent;
        let second = lt.leaf_root(3);
        assert_eq!(first, second);
        assert_eq!(lt.picks[3].parent, compressed_parent);
        assert_eq!(compressed_parent, Some(first - lt.nboards()));
    }

    #[test]
    fn test_first_pick_rotation_is_permanent() {
        let spec = spec(&[(2, 3), (1, 1), (1, 2)], 0);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal().with_i_rotated());
        assert!(lt.leaf_rotated(0));
        // A later gene asking for the opposite orientation is ignored:
        // leaf 0's root is a node now, and nodes carry no rotation.
        lt.take(0, 2, Join::vertical());
        assert!(lt.leaf_rotated(0));
    }

    #[test]
    fn test_max_width_forces_leaf_rotation() {
        let spec = spec(&[(10, 3), (2, 2)], 5);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal());
        assert!(lt.leaf_rotated(0), "10-wide board must be rotated under cap 5");
        assert_eq!(lt.component_box(0), Board::new(3, 10));
    }

    #[test]
    fn test_max_width_keeps_valid_requested_rotation() {
        // Rotated the board is 3 wide, which fits; the request stands.
        let spec = spec(&[(10, 3), (2, 2)], 5);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::vertical().with_i_rotated());
        assert!(lt.leaf_rotated(0));
    }

    #[test]
    fn test_max_width_rebuilds_horizontal_join_as_vertical() {
        let spec = spec(&[(3, 2), (3, 4)], 5);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal());
        // 3 + 3 = 6 overflows the cap; the node is rebuilt vertically.
        assert_eq!(lt.stack(0).direction, Direction::Vertical);
        assert_eq!(lt.root_box(), Board::new(3, 6));
    }

    #[test]
    fn test_unconstrained_horizontal_join_is_kept() {
        let spec = spec(&[(3, 2), (3, 4)], 0);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal());
        assert_eq!(lt.stack(0).direction, Direction::Horizontal);
        assert_eq!(lt.root_box(), Board::new(6, 4));
    }

    #[test]
    fn test_decode_two_boards() {
        let spec = spec(&[(1, 6), (4, 5)], 0);
        let mut rng = create_rng(42);
        let genotype = Genotype::random(2, &mut rng);
        let lt = LayoutTree::decode(&spec, &genotype);
        assert_eq!(lt.node_count(), 1);
        // The only possible areas are a 5x6 hstack or a 4x11-ish vstack,
        // depending on the random join; both contain all board area.
        assert!(lt.area() >= spec.total_area());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let spec = spec(&[(1, 2), (3, 4), (5, 6), (7, 8), (2, 2)], 0);
        let a = LayoutTree::decode(&spec, &Genotype::random(5, &mut create_rng(9)));
        let b = LayoutTree::decode(&spec, &Genotype::random(5, &mut create_rng(9)));
        assert_eq!(a.area(), b.area());
        assert_eq!(a.root_box(), b.root_box());
    }

    #[test]
    fn test_fitness_kinds() {
        let spec = spec(&[(1, 6), (4, 5)], 0);
        let mut lt = LayoutTree::new(&spec);
        lt.take(0, 1, Join::horizontal());
        assert_eq!(FitnessKind::Area.score(&lt), 30);
        assert_eq!(FitnessKind::Height.score(&lt), 6);
    }

    #[test]
    fn test_fitness_for_spec() {
        assert_eq!(
            FitnessKind::for_spec(&spec(&[(1, 1), (2, 2)], 0)),
            FitnessKind::Area
        );
        assert_eq!(
            FitnessKind::for_spec(&spec(&[(1, 1), (2, 2)], 10)),
            FitnessKind::Height
        );
    }

    fn random_spec(seed: u64, n: usize, max_width: u32) -> CutSpec {
        let mut rng = create_rng(seed);
        use rand::Rng;
        CutSpec::new(
            (0..n)
                .map(|_| Board::new(rng.random_range(1..20), rng.random_range(1..20)))
                .collect(),
            max_width,
        )
    }

    proptest! {
        #[test]
        fn prop_decode_spans_all_boards(seed in any::<u64>(), n in 2usize..12) {
            let spec = random_spec(seed, n, 0);
            let genotype = Genotype::random(n as u16, &mut create_rng(seed ^ 0x9e37));
            let mut lt = LayoutTree::decode(&spec, &genotype);
            prop_assert_eq!(lt.node_count(), n - 1);
            let root = lt.leaf_root(0);
            for i in 1..n {
                prop_assert_eq!(lt.leaf_root(i), root);
            }
            prop_assert!(lt.area() >= spec.total_area());
        }

        #[test]
        fn prop_width_cap_holds_for_rotatable_leaves(
            seed in any::<u64>(),
            n in 2usize..10,
        ) {
            // Heights stay below the cap, so every board has at least one
            // orientation within it, even when its width overshoots.
            let max_width = 19u32;
            let mut rng = create_rng(seed);
            use rand::Rng;
            let spec = CutSpec::new(
                (0..n)
                    .map(|_| Board::new(rng.random_range(1..40), rng.random_range(1..=19)))
                    .collect(),
                max_width,
            );
            let genotype = Genotype::random(n as u16, &mut create_rng(seed ^ 0x51f));
            let lt = LayoutTree::decode(&spec, &genotype);
            prop_assert!(lt.root_box().width <= max_width);
            for i in 0..n {
                prop_assert!(lt.component_box(i).width <= max_width);
            }
        }
    }
}
