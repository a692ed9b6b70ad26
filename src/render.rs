//! Layout rendering: from a decoded tree to absolute placements.
//!
//! A post-order-consistent walk from the root assigns each leaf an absolute
//! offset: an internal node lays out its left child at the current offset,
//! advances by the left child's height (vertical join) or width (horizontal
//! join), then lays out its right child.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::genotype::Direction;
use crate::layout::LayoutTree;

/// One board's absolute position and oriented dimensions, aligned by the
/// original board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

/// The rendered layout: placements plus the sheet they live on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendering {
    pub placements: Vec<Placement>,
    pub sheet: Board,
}

/// Renders a decoded layout into absolute placements.
///
/// The sheet is the root's memoized box, except that a width-capped spec
/// reports the configured cap as the sheet width.
pub fn render(tree: &LayoutTree<'_>) -> Rendering {
    let n = tree.nboards();
    let mut placements: Vec<Placement> = (0..n)
        .map(|i| {
            let oriented = tree.component_box(i);
            Placement {
                x: 0,
                y: 0,
                width: oriented.width,
                height: oriented.height,
                rotated: tree.leaf_rotated(i),
            }
        })
        .collect();

    if n > 1 {
        place(tree, 2 * n - 2, Board::new(0, 0), &mut placements);
    }

    let root = tree.root_box();
    let width = match tree.spec().max_width() {
        0 => root.width,
        cap => cap,
    };
    Rendering {
        placements,
        sheet: Board::new(width, root.height),
    }
}

/// Recursive offset assignment over the mixed index space.
fn place(tree: &LayoutTree<'_>, ix: usize, offset: Board, placements: &mut [Placement]) {
    let n = tree.nboards();
    if ix < n {
        placements[ix].x = offset.width;
        placements[ix].y = offset.height;
        return;
    }
    let node = tree.stack(ix - n);
    place(tree, node.left, offset, placements);
    let left_box = tree.component_box(node.left);
    let next = match node.direction {
        Direction::Vertical => Board::new(offset.width, offset.height + left_box.height),
        Direction::Horizontal => Board::new(offset.width + left_box.width, offset.height),
    };
    place(tree, node.right, next, placements);
}
