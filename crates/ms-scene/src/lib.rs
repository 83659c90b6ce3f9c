//! Scene graph for the midistage visualizer.
//!
//! A flat arena of transform nodes with parent/child attachment and a
//! binary render-cull flag. The stage mutates node transforms and cull
//! state every frame; the render collaborator walks the tree and skips
//! drawing (never simulating) culled subtrees.
//!
//! Nodes are addressed by [`NodeKey`]. The arena physically stores every
//! node, but ownership is logical: whoever spawned a node holds its key
//! and is the only writer of its transform.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod graph;
mod node;

pub use graph::SceneGraph;
pub use node::{CullHint, NodeKey, SceneNode};
