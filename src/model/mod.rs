//! # Navigation Graph Model
//!
//! Pages are nodes, observed clicks are directed weighted edges.
//!
//! Design rule: this module is pure data. No I/O, no metric computation;
//! everything derived (distances, centrality, clustering) lives in the
//! engines that read a frozen [`NavGraph`].

pub mod node;
pub mod edge;
pub mod graph;

pub use node::NodeId;
pub use edge::{Edge, EdgeRecord};
pub use graph::{GraphBuilder, NavGraph, Neighbors};
