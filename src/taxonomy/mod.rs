//! Taxonomy — the species tree genomes are bound to
//!
//! A thin tree that owns its nodes and hands out non-owning [`TaxonRef`]
//! handles. Genomes only need two things from it: whether a handle still
//! points at a live node, and whether two handles point at the same node.

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// A node of the taxonomy tree
#[derive(Debug)]
pub struct TaxonNode {
    name: String,
    parent: Weak<TaxonNode>,
    children: RefCell<Vec<Rc<TaxonNode>>>,
}

impl TaxonNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<Rc<TaxonNode>> {
        self.parent.upgrade()
    }

    pub fn children(&self) -> Vec<Rc<TaxonNode>> {
        self.children.borrow().clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.borrow().is_empty()
    }
}

/// Non-owning handle on a taxonomy node.
///
/// Equality is node identity, not name equality: two handles are equal
/// only if they point at the same node of the same tree.
#[derive(Debug, Clone)]
pub struct TaxonRef(Weak<TaxonNode>);

impl TaxonRef {
    fn new(node: &Rc<TaxonNode>) -> Self {
        Self(Rc::downgrade(node))
    }

    /// The node, if the owning taxonomy is still alive
    pub fn upgrade(&self) -> Option<Rc<TaxonNode>> {
        self.0.upgrade()
    }

    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn same_node(&self, other: &TaxonRef) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }

    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|n| n.name.clone())
    }
}

impl PartialEq for TaxonRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for TaxonRef {}

/// Taxonomy errors
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Taxon name already used in this taxonomy: {0}")]
    DuplicateName(String),

    #[error("Parent taxon does not belong to this taxonomy")]
    UnknownParent,
}

/// Owner of every node of one species tree
#[derive(Debug)]
pub struct Taxonomy {
    root: Rc<TaxonNode>,
    by_name: HashMap<String, Rc<TaxonNode>>,
}

impl Taxonomy {
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Rc::new(TaxonNode {
            name: root_name.into(),
            parent: Weak::new(),
            children: RefCell::new(Vec::new()),
        });
        let mut by_name = HashMap::new();
        by_name.insert(root.name.clone(), Rc::clone(&root));
        Self { root, by_name }
    }

    pub fn root(&self) -> TaxonRef {
        TaxonRef::new(&self.root)
    }

    /// Attach a new named node under `parent`
    pub fn add_child(
        &mut self,
        parent: &TaxonRef,
        name: impl Into<String>,
    ) -> Result<TaxonRef, TaxonomyError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TaxonomyError::DuplicateName(name));
        }
        let parent_node = parent
            .upgrade()
            .filter(|p| {
                self.by_name
                    .get(&p.name)
                    .is_some_and(|owned| Rc::ptr_eq(owned, p))
            })
            .ok_or(TaxonomyError::UnknownParent)?;

        let child = Rc::new(TaxonNode {
            name: name.clone(),
            parent: Rc::downgrade(&parent_node),
            children: RefCell::new(Vec::new()),
        });
        parent_node.children.borrow_mut().push(Rc::clone(&child));
        debug!("Added taxon '{}' under '{}'", name, parent_node.name);
        let handle = TaxonRef::new(&child);
        self.by_name.insert(name, child);
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<TaxonRef> {
        self.by_name.get(name).map(TaxonRef::new)
    }

    /// Leaves in depth-first, child order
    pub fn leaves(&self) -> Vec<TaxonRef> {
        let mut out = Vec::new();
        let mut stack = vec![Rc::clone(&self.root)];
        while let Some(node) = stack.pop() {
            let children = node.children.borrow();
            if children.is_empty() {
                out.push(TaxonRef::new(&node));
            } else {
                stack.extend(children.iter().rev().cloned());
            }
        }
        out
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.by_name.len()
    }
}
