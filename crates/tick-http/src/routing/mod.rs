//! The hierarchical routing namespace.
//!
//! Resources live in a tree of owned nodes: a [`Router`] owns a set of
//! [`Host`] roots (virtual hosts, matched case-insensitively), each host
//! owns a tree of [`Directory`] nodes (path segments, matched
//! case-insensitively), and directories own [`Content`] leaves (resource
//! names, matched case-sensitively). The case asymmetry between directory
//! segments and leaf names is deliberate and load-bearing: `/Images/logo`
//! and `/images/logo` are the same resource, `/images/LOGO` is not.
//!
//! Every name comparison is accelerated by a checksum pre-filter (see
//! [`crate::checksum`]) and confirmed by a full string comparison.
//!
//! Lookups are always top-down from a root, so nodes need no parent or
//! sibling links; destroying a node drops its whole subtree.

mod content;
pub use content::Content;
pub use content::Handler;

mod directory;
pub use directory::Directory;

mod host;
pub use host::Host;

mod router;
pub use router::GLOBAL_NAMESPACE;
pub use router::Router;
