//! Supertype and subtype queries over a linked model.

use std::collections::HashSet;

use crate::model::{ClassPointer, Model};

/// Hierarchy walks over one model.
///
/// All walks are cycle-safe and stop quietly at classes the model does not
/// contain; a partial model answers for the part it holds.
pub struct Hierarchy<'a> {
    model: &'a Model,
}

impl<'a> Hierarchy<'a> {
    /// Creates hierarchy queries over the given model.
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Hierarchy { model }
    }

    /// The super-class chain starting at the direct super class of `class`,
    /// root last.
    #[must_use]
    pub fn super_chain(&self, class: &ClassPointer) -> Vec<ClassPointer> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = class.clone();
        loop {
            if !seen.insert(current.clone()) {
                break;
            }
            let Ok(model) = self.model.get_class(&current) else {
                break;
            };
            match model.super_class() {
                Some(super_class) => {
                    current = super_class.pointer.clone();
                    chain.push(current.clone());
                }
                None => break,
            }
        }
        chain
    }

    /// Whether `class` extends `ancestor`, directly or transitively. A class
    /// does not extend itself.
    #[must_use]
    pub fn does_extend(&self, class: &ClassPointer, ancestor: &ClassPointer) -> bool {
        self.super_chain(class).contains(ancestor)
    }

    /// Whether `class` implements `interface`, directly or through any super
    /// class or transitive superinterface.
    #[must_use]
    pub fn does_implement(&self, class: &ClassPointer, interface: &ClassPointer) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![class.clone()];
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Ok(model) = self.model.get_class(&current) else {
                continue;
            };
            for implemented in model.interfaces() {
                if &implemented.pointer == interface {
                    return true;
                }
                pending.push(implemented.pointer.clone());
            }
            if let Some(super_class) = model.super_class() {
                pending.push(super_class.pointer.clone());
            }
        }
        false
    }
}
