//! Genes and gene families
//!
//! A gene is either an extant gene of a sequenced species or a HOG, a
//! hierarchical family node whose subtree ends in extant genes.

mod node;

pub use node::{Gene, GeneError, GeneKind};
