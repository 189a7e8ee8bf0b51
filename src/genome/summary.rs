//! Serializable snapshot of a genome, for reports and the CLI

use super::base::Genome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenomeKind {
    Extant,
    Ancestral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeSummary {
    pub name: String,
    pub kind: GenomeKind,
    /// NCBI taxid, extant genomes only
    pub taxid: Option<u64>,
    /// Name of the bound taxon, if any and still alive
    pub taxon: Option<String>,
    pub gene_count: usize,
    /// Extant genomes only; ancestral genomes have no singletons
    pub non_singleton_count: Option<usize>,
    pub generated_at: DateTime<Utc>,
}

impl GenomeSummary {
    pub(crate) fn new<G: Genome + ?Sized>(genome: &G, kind: GenomeKind) -> Self {
        Self {
            name: genome.to_string(),
            kind,
            taxid: None,
            taxon: genome.taxon().and_then(|t| t.name()),
            gene_count: genome.get_number_genes(),
            non_singleton_count: None,
            generated_at: Utc::now(),
        }
    }

    pub(crate) fn with_taxid(mut self, taxid: u64) -> Self {
        self.taxid = Some(taxid);
        self
    }

    pub(crate) fn with_non_singleton_count(mut self, count: usize) -> Self {
        self.non_singleton_count = Some(count);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
