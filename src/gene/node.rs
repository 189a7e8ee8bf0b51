//! Gene — extant genes and hierarchical orthologous groups (HOGs)
//!
//! Genes are created as `Rc<Gene>` and handed to exactly one genome, which
//! keeps the only strong handle. Family-tree links (child → parent and
//! HOG → children) are `Weak`, so a HOG never keeps a descendant alive.

use crate::genome::GenomeId;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// What a gene is able to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneKind {
    /// A gene of a sequenced species
    Extant,
    /// A gene family node that subtends extant genes
    Hog,
}

impl GeneKind {
    pub fn type_name(self) -> &'static str {
        match self {
            GeneKind::Extant => "ExtantGene",
            GeneKind::Hog => "HOG",
        }
    }
}

/// Errors raised by gene family queries and construction
#[derive(Debug, thiserror::Error)]
pub enum GeneError {
    #[error("HOG {parent} links to a descendant gene that no longer exists")]
    DanglingChild { parent: String },

    #[error("Only a HOG can have children, {0} is an extant gene")]
    NotAFamily(String),

    #[error("Gene {child} already has parent {parent}")]
    AlreadyHasParent { child: String, parent: String },

    #[error("Adding {child} under {parent} would create a cycle")]
    Cycle { parent: String, child: String },
}

#[derive(Debug)]
pub struct Gene {
    id: String,
    kind: GeneKind,
    genome: Cell<Option<GenomeId>>,
    parent: RefCell<Weak<Gene>>,
    children: RefCell<Vec<Weak<Gene>>>,
}

impl Gene {
    fn new(id: impl Into<String>, kind: GeneKind) -> Rc<Self> {
        Rc::new(Self {
            id: id.into(),
            kind,
            genome: Cell::new(None),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn extant(id: impl Into<String>) -> Rc<Self> {
        Self::new(id, GeneKind::Extant)
    }

    pub fn hog(id: impl Into<String>) -> Rc<Self> {
        Self::new(id, GeneKind::Hog)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> GeneKind {
        self.kind
    }

    pub fn is_hog(&self) -> bool {
        self.kind == GeneKind::Hog
    }

    /// Owning genome, once attached
    pub fn genome(&self) -> Option<GenomeId> {
        self.genome.get()
    }

    /// Only written by `Genome::add_gene`
    pub(crate) fn set_genome(&self, genome: GenomeId) {
        self.genome.set(Some(genome));
    }

    pub fn parent(&self) -> Option<Rc<Gene>> {
        self.parent.borrow().upgrade()
    }

    /// Live children, in insertion order
    pub fn children(&self) -> Vec<Rc<Gene>> {
        self.children
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Link `child` under this HOG.
    ///
    /// The link does not keep `child` alive. Attach the child to a genome
    /// (or hold it elsewhere) before the caller's handle goes out of scope,
    /// or descendant queries on this HOG fail with `DanglingChild`.
    pub fn add_child(self: &Rc<Self>, child: &Rc<Gene>) -> Result<(), GeneError> {
        if !self.is_hog() {
            return Err(GeneError::NotAFamily(self.id.clone()));
        }
        if let Some(existing) = child.parent() {
            return Err(GeneError::AlreadyHasParent {
                child: child.id.clone(),
                parent: existing.id.clone(),
            });
        }
        let mut ancestor = Some(Rc::clone(self));
        while let Some(node) = ancestor {
            if Rc::ptr_eq(&node, child) {
                return Err(GeneError::Cycle {
                    parent: self.id.clone(),
                    child: child.id.clone(),
                });
            }
            ancestor = node.parent();
        }

        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(Rc::downgrade(child));
        Ok(())
    }

    /// An extant gene with no parent HOG has no orthology partner
    pub fn is_singleton(&self) -> bool {
        self.kind == GeneKind::Extant && self.parent().is_none()
    }

    /// Every extant gene in the subtree rooted here, depth-first in child order.
    ///
    /// An extant gene yields itself.
    pub fn get_all_descendant_genes(self: &Rc<Self>) -> Result<Vec<Rc<Gene>>, GeneError> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out)?;
        Ok(out)
    }

    fn collect_descendants(self: &Rc<Self>, out: &mut Vec<Rc<Gene>>) -> Result<(), GeneError> {
        match self.kind {
            GeneKind::Extant => out.push(Rc::clone(self)),
            GeneKind::Hog => {
                for link in self.children.borrow().iter() {
                    let child = link.upgrade().ok_or_else(|| GeneError::DanglingChild {
                        parent: self.id.clone(),
                    })?;
                    child.collect_descendants(out)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.type_name(), self.id)
    }
}
