//! Genomes — extant and ancestral
//!
//! A genome owns an ordered list of genes and is bound to one node of the
//! species tree. Ancestral genomes additionally map each of their HOGs to
//! the extant genes it subtends.

mod base;
mod extant;
mod ancestral;
mod summary;

pub use base::{Genome, GenomeCore, GenomeError, GenomeId, Result};
pub use extant::ExtantGenome;
pub use ancestral::{AncestralClustering, AncestralGenome, NAME_SEPARATOR};
pub use summary::{GenomeKind, GenomeSummary};
