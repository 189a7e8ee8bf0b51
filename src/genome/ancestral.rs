//! AncestralGenome — a reconstructed genome whose genes are HOGs
//!
//! Besides the shared genome behaviour it carries the ancestral clustering:
//! every HOG of the genome mapped to the extant genes it subtends. The
//! clustering is computed on first request and kept for the lifetime of the
//! genome. It is never invalidated, so callers must finish attaching genes
//! before asking for it; genes added afterwards do not show up.

use super::base::{Genome, GenomeCore, Result};
use super::summary::{GenomeKind, GenomeSummary};
use crate::gene::{Gene, GeneKind};
use log::info;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Separator used when an ancestral name is built from its descendants
pub const NAME_SEPARATOR: &str = "/";

/// HOG → descendant extant genes, in gene attachment order.
///
/// HOGs are keyed by identity: two distinct HOGs sharing an id get two
/// entries. The entries hold a strong handle on every key, so a key
/// address stays valid and unique for the lifetime of the clustering.
#[derive(Debug, Default)]
pub struct AncestralClustering {
    entries: Vec<(Rc<Gene>, Vec<Rc<Gene>>)>,
    index: HashMap<*const Gene, usize>,
}

impl AncestralClustering {
    fn insert(&mut self, hog: Rc<Gene>, descendants: Vec<Rc<Gene>>) {
        let key = Rc::as_ptr(&hog);
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos] = (hog, descendants),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((hog, descendants));
            }
        }
    }

    /// Extant genes under `hog`, if it is one of this genome's HOGs
    pub fn get(&self, hog: &Gene) -> Option<&[Rc<Gene>]> {
        self.index
            .get(&(hog as *const Gene))
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// First HOG with this id, in attachment order
    pub fn get_by_id(&self, hog_id: &str) -> Option<&[Rc<Gene>]> {
        self.entries
            .iter()
            .find(|(hog, _)| hog.id() == hog_id)
            .map(|(_, d)| d.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<Gene>, &[Rc<Gene>])> {
        self.entries.iter().map(|(h, d)| (h, d.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of descendant list lengths over all HOGs
    pub fn total_descendants(&self) -> usize {
        self.entries.iter().map(|(_, d)| d.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct AncestralGenome {
    core: GenomeCore,
    name: Option<String>,
    clustering: OnceCell<AncestralClustering>,
}

impl AncestralGenome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Name built from descendant genome names, for ancestors the species
    /// tree leaves unlabelled
    pub fn derive_name<I, S>(descendant_names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        descendant_names
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(NAME_SEPARATOR)
    }

    /// Lazy getter of the ancestral clustering.
    ///
    /// An error from a HOG's descendant query is returned as is and leaves
    /// the clustering uncomputed.
    pub fn get_ancestral_clustering(&self) -> Result<&AncestralClustering> {
        if let Some(clustering) = self.clustering.get() {
            return Ok(clustering);
        }

        let mut clustering = AncestralClustering::default();
        for hog in self.core.genes() {
            let descendants = hog.get_all_descendant_genes()?;
            clustering.insert(Rc::clone(hog), descendants);
        }
        info!(
            "Computed ancestral clustering of {}: {} HOGs, {} extant genes",
            self,
            clustering.len(),
            clustering.total_descendants()
        );
        Ok(self.clustering.get_or_init(move || clustering))
    }

    /// The clustering if it has already been computed
    pub fn ancestral_clustering(&self) -> Option<&AncestralClustering> {
        self.clustering.get()
    }

    pub fn summary(&self) -> GenomeSummary {
        GenomeSummary::new(self, GenomeKind::Ancestral)
    }
}

impl Genome for AncestralGenome {
    fn core(&self) -> &GenomeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GenomeCore {
        &mut self.core
    }

    fn gene_kind(&self) -> GeneKind {
        GeneKind::Hog
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_number_genes(&self) -> usize {
        self.core.genes().len()
    }
}

impl fmt::Display for AncestralGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{ExtantGenome, GenomeError};
    use crate::gene::GeneError;

    fn ids(genes: &[Rc<Gene>]) -> Vec<&str> {
        genes.iter().map(|g| g.id()).collect()
    }

    #[test]
    fn test_empty_genome() {
        let genome = AncestralGenome::new();
        assert_eq!(genome.get_number_genes(), 0);
        assert!(genome.get_ancestral_clustering().unwrap().is_empty());
        assert_eq!(genome.to_string(), "");
    }

    #[test]
    fn test_clustering_maps_hogs_to_descendants() {
        let mut extant = ExtantGenome::new("HUMAN", 9606);
        let (e1, e2, e3) = (Gene::extant("e1"), Gene::extant("e2"), Gene::extant("e3"));
        for g in [&e1, &e2, &e3] {
            extant.add_gene(Rc::clone(g)).unwrap();
        }
        let h1 = Gene::hog("h1");
        let h2 = Gene::hog("h2");
        h1.add_child(&e1).unwrap();
        h1.add_child(&e2).unwrap();
        h2.add_child(&e3).unwrap();

        let mut genome = AncestralGenome::new();
        genome.add_gene(Rc::clone(&h1)).unwrap();
        genome.add_gene(Rc::clone(&h2)).unwrap();
        assert_eq!(genome.get_number_genes(), 2);
        assert!(genome.ancestral_clustering().is_none());

        let clustering = genome.get_ancestral_clustering().unwrap();
        assert_eq!(clustering.len(), 2);
        assert_eq!(ids(clustering.get(&h1).unwrap()), vec!["e1", "e2"]);
        assert_eq!(ids(clustering.get(&h2).unwrap()), vec!["e3"]);
        let order: Vec<&str> = clustering.iter().map(|(h, _)| h.id()).collect();
        assert_eq!(order, vec!["h1", "h2"]);
        assert_eq!(clustering.total_descendants(), 3);
    }

    #[test]
    fn test_clustering_is_cached_and_not_invalidated() {
        let h1 = Gene::hog("h1");
        let e1 = Gene::extant("e1");
        h1.add_child(&e1).unwrap();

        let mut genome = AncestralGenome::new();
        genome.add_gene(h1).unwrap();
        let first: *const AncestralClustering = genome.get_ancestral_clustering().unwrap();

        genome.add_gene(Gene::hog("h3")).unwrap();
        let second = genome.get_ancestral_clustering().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.len(), 1);
        assert!(second.get_by_id("h3").is_none());
        assert_eq!(genome.get_number_genes(), 2);
    }

    #[test]
    fn test_nested_families_expand_recursively() {
        let root = Gene::hog("HOG:1");
        let sub = Gene::hog("HOG:1.1");
        let (a, b, c) = (Gene::extant("a"), Gene::extant("b"), Gene::extant("c"));
        sub.add_child(&a).unwrap();
        sub.add_child(&b).unwrap();
        root.add_child(&sub).unwrap();
        root.add_child(&c).unwrap();

        let mut genome = AncestralGenome::new();
        genome.add_gene(Rc::clone(&root)).unwrap();
        let clustering = genome.get_ancestral_clustering().unwrap();
        assert_eq!(ids(clustering.get(&root).unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_descendant_error_propagates_and_leaves_cache_empty() {
        let hog = Gene::hog("HOG:broken");
        {
            let transient = Gene::extant("gone");
            hog.add_child(&transient).unwrap();
        }
        let mut genome = AncestralGenome::new();
        genome.add_gene(hog).unwrap();
        let err = genome.get_ancestral_clustering().unwrap_err();
        assert!(matches!(err, GenomeError::Gene(GeneError::DanglingChild { .. })));
        assert!(genome.ancestral_clustering().is_none());
    }

    #[test]
    fn test_extant_gene_is_type_error() {
        let mut genome = AncestralGenome::new();
        let err = genome.add_gene(Gene::extant("e1")).unwrap_err();
        assert!(matches!(err, GenomeError::Type { expected: "HOG", .. }));
        assert_eq!(genome.get_number_genes(), 0);
    }

    #[test]
    fn test_same_id_hogs_keep_separate_entries() {
        let h1 = Gene::hog("HOG:x");
        let h2 = Gene::hog("HOG:x");
        let (e1, e2) = (Gene::extant("e1"), Gene::extant("e2"));
        h1.add_child(&e1).unwrap();
        h2.add_child(&e2).unwrap();

        let mut genome = AncestralGenome::new();
        genome.add_gene(Rc::clone(&h1)).unwrap();
        genome.add_gene(Rc::clone(&h2)).unwrap();
        let clustering = genome.get_ancestral_clustering().unwrap();
        assert_eq!(genome.get_number_genes(), 2);
        assert_eq!(clustering.len(), 2);
        assert_eq!(ids(clustering.get(&h1).unwrap()), vec!["e1"]);
        assert_eq!(ids(clustering.get(&h2).unwrap()), vec!["e2"]);
        assert_eq!(ids(clustering.get_by_id("HOG:x").unwrap()), vec!["e1"]);

        let unrelated = Gene::hog("HOG:x");
        assert!(clustering.get(&unrelated).is_none());
    }

    #[test]
    fn test_naming() {
        let derived = AncestralGenome::derive_name(["HUMAN", "PANTR"]);
        assert_eq!(derived, "HUMAN/PANTR");
        let mut genome = AncestralGenome::new();
        assert!(genome.name().is_none());
        genome.set_name(derived);
        assert_eq!(genome.name(), Some("HUMAN/PANTR"));
        assert_eq!(genome.summary().name, "HUMAN/PANTR");
        assert_eq!(genome.summary().kind, GenomeKind::Ancestral);
    }
}
