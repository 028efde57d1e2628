#![forbid(unsafe_code)]

//! Document structure errors.

use crate::document::NodeId;

/// Structural misuse of the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The handle is stale or was never issued by this document.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Appending `child` under `parent` would make a node its own ancestor.
    #[error("appending {child} under {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
    /// The body is the root and cannot be removed.
    #[error("the document body cannot be removed")]
    RootRemoval,
}

pub type Result<T> = std::result::Result<T, DomError>;
