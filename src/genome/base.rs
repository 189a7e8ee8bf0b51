//! Genome — shared state and behaviour of extant and ancestral genomes
//!
//! Both variants embed a [`GenomeCore`] and implement [`Genome`], which
//! provides gene attachment and taxon binding once for both. Each variant
//! only has to say which kind of gene it holds and how it counts them.

use crate::gene::{Gene, GeneError, GeneKind};
use crate::taxonomy::TaxonRef;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Identity of a genome instance, used as the gene → genome back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomeId(Uuid);

impl GenomeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GenomeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Genome-related errors
#[derive(Debug, thiserror::Error)]
pub enum GenomeError {
    /// Argument lacks the capability the operation requires
    #[error("expected {expected}, got {actual}")]
    Type {
        expected: &'static str,
        actual: String,
    },

    /// Violation of an evolutionary modelling invariant
    #[error("Evolutionary concept conflict: {0}")]
    ConceptConflict(String),

    #[error(transparent)]
    Gene(#[from] GeneError),
}

pub type Result<T> = std::result::Result<T, GenomeError>;

/// State common to every genome
#[derive(Debug, Default)]
pub struct GenomeCore {
    id: GenomeId,
    genes: Vec<Rc<Gene>>,
    taxon: Option<TaxonRef>,
}

impl GenomeCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> GenomeId {
        self.id
    }

    pub fn genes(&self) -> &[Rc<Gene>] {
        &self.genes
    }

    pub fn taxon(&self) -> Option<&TaxonRef> {
        self.taxon.as_ref()
    }
}

pub trait Genome: fmt::Display {
    fn core(&self) -> &GenomeCore;

    fn core_mut(&mut self) -> &mut GenomeCore;

    /// Kind of gene this genome is made of
    fn gene_kind(&self) -> GeneKind;

    fn name(&self) -> Option<&str>;

    /// Number of genes, counted the way the variant defines
    fn get_number_genes(&self) -> usize;

    fn id(&self) -> GenomeId {
        self.core().id()
    }

    fn genes(&self) -> &[Rc<Gene>] {
        self.core().genes()
    }

    fn taxon(&self) -> Option<&TaxonRef> {
        self.core().taxon()
    }

    /// Append `gene` and point its back-reference at this genome.
    ///
    /// Nothing is mutated when the gene is rejected.
    fn add_gene(&mut self, gene: Rc<Gene>) -> Result<()> {
        let expected = self.gene_kind();
        if gene.kind() != expected {
            return Err(GenomeError::Type {
                expected: expected.type_name(),
                actual: gene.kind().type_name().to_string(),
            });
        }
        let id = self.id();
        if let Some(owner) = gene.genome().filter(|owner| *owner != id) {
            warn!("Gene {} already belongs to genome {}", gene.id(), owner);
            return Err(GenomeError::ConceptConflict(format!(
                "gene {} already belongs to genome {}",
                gene.id(),
                owner
            )));
        }

        gene.set_genome(id);
        debug!("Attached {} to genome {}", gene, self);
        self.core_mut().genes.push(gene);
        Ok(())
    }

    /// Bind this genome to its taxon; a genome has exactly one.
    fn set_taxon(&mut self, taxon: &TaxonRef) -> Result<()> {
        if !taxon.is_live() {
            return Err(GenomeError::Type {
                expected: "TaxonNode",
                actual: "detached taxon reference".to_string(),
            });
        }
        if let Some(bound) = self.taxon() {
            if bound.same_node(taxon) {
                return Ok(());
            }
            warn!(
                "Genome {} is bound to {:?}, refusing {:?}",
                self,
                bound.name(),
                taxon.name()
            );
            return Err(GenomeError::ConceptConflict(
                "only one taxon can refer to one genome".to_string(),
            ));
        }

        debug!("Bound genome {} to taxon {:?}", self, taxon.name());
        self.core_mut().taxon = Some(taxon.clone());
        Ok(())
    }
}
