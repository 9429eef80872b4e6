//! Marker element search.
//!
//! The marker is the first element with the marker tag in a depth-first,
//! pre-order walk of `<body>`. Climbing back from the marker to `<body>`,
//! every level reports the children that do not lead to the marker; those
//! are the nodes the pruner detaches.

use crate::dom::{self, Document, NodeRef};
use crate::error::Result;

/// Result of a successful marker search.
///
/// Holds node handles into the searched document; nothing is detached until
/// the match is handed to [`crate::prune::prune`].
pub struct MarkerMatch<'a> {
    /// The marker element itself.
    pub marker: NodeRef<'a>,

    /// Ancestors from `<body>` (first) down to the marker's parent (last).
    pub path: Vec<NodeRef<'a>>,

    /// Nodes off the path, deepest level first, in child order within a level.
    pub removable: Vec<NodeRef<'a>>,
}

impl MarkerMatch<'_> {
    /// Depth of the marker below `<body>` (1 for a direct child).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Children of `level` other than `keep`, in child order.
///
/// This is the removal list of one ancestor level. It includes siblings on
/// both sides of the kept child, text and comment nodes as well as elements.
#[must_use]
pub fn siblings_off_path<'a>(level: &NodeRef<'a>, keep: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    level
        .children()
        .into_iter()
        .filter(|child| child.id != keep.id)
        .collect()
}

/// Find the first `tag` element below `body`.
///
/// Returns `None` when the subtree holds no such element; the tree is only
/// read, never modified.
#[must_use]
pub fn locate<'a>(body: &NodeRef<'a>, tag: &str) -> Option<MarkerMatch<'a>> {
    let marker = first_marker(body, tag)?;

    let mut path = Vec::new();
    let mut removable = Vec::new();
    let mut child = marker;
    while child.id != body.id {
        let level = child.parent()?;
        removable.extend(siblings_off_path(&level, &child));
        path.push(level);
        child = level;
    }
    path.reverse();

    Some(MarkerMatch {
        marker,
        path,
        removable,
    })
}

/// Check whether the document has a `tag` element anywhere below `<body>`.
pub fn has_marker(doc: &Document, tag: &str) -> Result<bool> {
    let body = dom::body(doc)?;
    Ok(first_marker(&body, tag).is_some())
}

/// Pre-order walk below `root` on an explicit stack, so nesting depth is
/// bounded by the heap rather than the thread stack.
fn first_marker<'a>(root: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    let mut pending: Vec<NodeRef<'a>> = root.children().into_iter().rev().collect();
    while let Some(node) = pending.pop() {
        if dom::is_element_named(&node, tag) {
            return Some(node);
        }
        pending.extend(node.children().into_iter().rev());
    }
    None
}
