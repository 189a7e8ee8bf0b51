//! HAM core — extant and ancestral genomes over a species tree
//!
//! Genomes own their genes and are bound to one taxon each. Ancestral
//! genomes map every hierarchical orthologous group (HOG) they hold to the
//! extant genes it subtends, computing that clustering once on demand.

pub mod gene;
pub mod genome;
pub mod taxonomy;

pub use gene::{Gene, GeneError, GeneKind};
pub use genome::{
    AncestralClustering, AncestralGenome, ExtantGenome, Genome, GenomeError, GenomeId,
    GenomeKind, GenomeSummary,
};
pub use taxonomy::{TaxonRef, Taxonomy, TaxonomyError};
