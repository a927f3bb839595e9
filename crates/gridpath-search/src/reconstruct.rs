//! Path reconstruction from predecessor links.

use gridpath_core::Point;

use crate::astar::{NO_PARENT, Node};

/// Walk the predecessor chain from `goal` back to the node whose parent is
/// the sentinel (the start), then reverse so the path reads start→end.
///
/// The chain is a tree by construction — each relaxation overwrites a single
/// parent index — so the walk always terminates. The result is non-empty
/// whenever the goal was reached, and `len() - 1` equals the number of
/// moves; a start-equals-goal walk yields the single start cell.
pub(crate) fn walk(nodes: &[Node], width: usize, goal: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut ci = goal;
    while ci != NO_PARENT {
        path.push(Point::new((ci % width) as i32, (ci / width) as i32));
        ci = nodes[ci].parent;
    }
    path.reverse();
    path
}
