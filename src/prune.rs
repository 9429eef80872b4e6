//! Sibling pruning.
//!
//! Detaches everything under `<body>` that is neither on the path to the
//! marker nor inside the marker. Removal lists are complete before the first
//! node is detached, so no child sequence is modified while it is walked.

use crate::dom::{self, Document, NodeRef};
use crate::error::{Error, Result};
use crate::locate::{self, MarkerMatch};

/// Detach every node of `found.removable` from the tree.
///
/// `body` must be the element the match was located from. Returns the number
/// of nodes detached; a second call with a fresh match on the same tree
/// detaches nothing.
pub fn prune(body: &NodeRef, found: &MarkerMatch) -> Result<usize> {
    if found.path.first().map(|n| n.id) != Some(body.id) {
        return Err(Error::Structure(
            "marker match was not located from this <body>".to_string(),
        ));
    }

    for node in &found.removable {
        node.remove_from_parent();
    }
    Ok(found.removable.len())
}

/// Locate the `marker_tag` element in `doc` and prune around it.
///
/// Leaves the document untouched and returns [`Error::MarkerNotFound`] when
/// there is no marker.
pub fn shrink_document(doc: &Document, marker_tag: &str) -> Result<usize> {
    let body = dom::body(doc)?;
    let found = locate::locate(&body, marker_tag).ok_or_else(|| Error::MarkerNotFound {
        marker: marker_tag.to_string(),
    })?;
    let removed = prune(&body, &found)?;
    log::debug!(
        "removed {removed} nodes around <{marker_tag}> at depth {}",
        found.depth()
    );
    Ok(removed)
}
