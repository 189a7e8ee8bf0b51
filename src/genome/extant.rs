//! ExtantGenome — a sequenced species, identified by name and NCBI taxid

use super::base::{Genome, GenomeCore};
use super::summary::{GenomeKind, GenomeSummary};
use crate::gene::GeneKind;
use std::fmt;

#[derive(Debug)]
pub struct ExtantGenome {
    core: GenomeCore,
    /// Unique across the genome universe; the registry enforces that
    pub name: String,
    pub taxid: u64,
}

impl ExtantGenome {
    pub fn new(name: impl Into<String>, taxid: u64) -> Self {
        Self {
            core: GenomeCore::new(),
            name: name.into(),
            taxid,
        }
    }

    /// Gene count, optionally leaving out singletons
    pub fn get_number_genes_with(&self, singleton: bool) -> usize {
        if singleton {
            self.core.genes().len()
        } else {
            self.core
                .genes()
                .iter()
                .filter(|g| !g.is_singleton())
                .count()
        }
    }

    pub fn summary(&self) -> GenomeSummary {
        GenomeSummary::new(self, GenomeKind::Extant)
            .with_taxid(self.taxid)
            .with_non_singleton_count(self.get_number_genes_with(false))
    }
}

impl Genome for ExtantGenome {
    fn core(&self) -> &GenomeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GenomeCore {
        &mut self.core
    }

    fn gene_kind(&self) -> GeneKind {
        GeneKind::Extant
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn get_number_genes(&self) -> usize {
        self.get_number_genes_with(true)
    }
}

impl fmt::Display for ExtantGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
