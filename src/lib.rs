//! Hierarchical list data source: a forest of expandable nodes projected
//! into a flat, ordered row sequence for list-shaped UIs.
//!
//! This crate is the model half of a tree widget:
//! - [`TreeSource`] owns the forest and exposes structural edits
//!   (append/insert/delete) and expansion state changes;
//! - [`TreeSource::reload`] projects the forest into
//!   [`TreeSource::items`], the depth-first sequence of currently visible
//!   rows ([`FlattenedNode`] entries carrying a node handle and its depth).
//!
//! Edits never touch `items` directly. Batch any number of mutations and
//! expansion changes, then call `reload()` once: the visible sequence and
//! the value→node lookup index are recomputed in a single pass over the
//! forest. Two consecutive snapshots of `items` are suitable for diffing by
//! a row-animation layer; the crate itself computes no diffs and renders
//! nothing.
//!
//! Values must be unique across the forest (they key the lookup index).
//! Mutations that reference a value the forest does not hold are silent
//! no-ops; the `try_*` variants report them instead.
//!
//! # Quick Example
//!
//! ```
//! use otty_ui_tree_source::TreeSource;
//!
//! let mut source = TreeSource::new();
//! source.append(["workspace", "scratch"], None);
//! source.append(["src", "README.md"], Some(&"workspace"));
//!
//! // Nodes start collapsed: only the roots are visible.
//! source.reload();
//! assert_eq!(source.items().len(), 2);
//!
//! source.toggle_expand(&"workspace");
//! source.reload();
//!
//! let rows: Vec<&str> = source
//!     .items()
//!     .iter()
//!     .map(|row| *source.node(row.id).unwrap().value())
//!     .collect();
//! assert_eq!(rows, ["workspace", "src", "README.md", "scratch"]);
//! ```

mod arena;
mod error;
mod flatten;
mod source;

pub use arena::{Node, NodeId};
pub use error::{Result, TreeSourceError};
pub use flatten::FlattenedNode;
pub use source::TreeSource;
