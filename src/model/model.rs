//! The immutable model snapshot and its builder.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{
    ClassModel, ClassPointer, FieldModel, FieldPointer, GenericModel, GenericOwner, GenericPointer,
    MethodModel, MethodPointer,
};
use crate::{Error, LinkError, Result};

/// An immutable collection of linked classes, keyed by binary name.
///
/// A model never changes after construction; growing a world means linking a
/// new batch against an existing model and receiving a new one. Snapshots are
/// `Send + Sync` and share class data through [`Arc`], so cloning a model is
/// cheap and older snapshots stay usable.
///
/// All pointer lookups go through a model. A pointer created against one
/// snapshot resolves in any other snapshot that still contains an entity of
/// the same identity.
#[derive(Clone, Debug, Default)]
pub struct Model {
    classes: HashMap<String, Arc<ClassModel>>,
}

impl Model {
    /// An empty model.
    #[must_use]
    pub fn empty() -> Self {
        Model::default()
    }

    /// Starts building a model from scratch.
    #[must_use]
    pub fn builder() -> ModelBuilder {
        ModelBuilder {
            classes: HashMap::new(),
        }
    }

    /// Starts a builder pre-populated with this model's classes.
    #[must_use]
    pub fn to_builder(&self) -> ModelBuilder {
        ModelBuilder {
            classes: self.classes.clone(),
        }
    }

    /// Resolves a class pointer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClassPointer`] when no class of that name is present.
    pub fn get_class(&self, pointer: &ClassPointer) -> Result<&ClassModel> {
        self.classes
            .get(pointer.binary_name())
            .map(Arc::as_ref)
            .ok_or_else(|| Error::InvalidClassPointer(pointer.clone()))
    }

    /// Resolves a method pointer to its declared method.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClassPointer`] when the declaring class is absent,
    /// [`Error::InvalidMethodPointer`] when the class has no such method.
    pub fn get_method(&self, pointer: &MethodPointer) -> Result<&MethodModel> {
        self.get_class(pointer.class())?
            .find_method(pointer.name(), pointer.descriptor())
            .ok_or_else(|| Error::InvalidMethodPointer(pointer.clone()))
    }

    /// Resolves a field pointer to its declared field.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClassPointer`] when the declaring class is absent,
    /// [`Error::InvalidFieldPointer`] when the class has no such field.
    pub fn get_field(&self, pointer: &FieldPointer) -> Result<&FieldModel> {
        self.get_class(pointer.class())?
            .find_field(pointer.name(), pointer.descriptor())
            .ok_or_else(|| Error::InvalidFieldPointer(pointer.clone()))
    }

    /// Resolves a generic pointer to its type-parameter declaration.
    ///
    /// # Errors
    ///
    /// An owner-lookup failure when the declaring class or method is absent,
    /// [`Error::InvalidGenericPointer`] when the owner declares no parameter
    /// of that name.
    pub fn get_generic(&self, pointer: &GenericPointer) -> Result<&GenericModel> {
        let found = match pointer.owner() {
            GenericOwner::Class(class) => self.get_class(class)?.find_generic(pointer.name()),
            GenericOwner::Method(method) => self
                .get_method(method)?
                .generics
                .iter()
                .find(|generic| generic.name == pointer.name()),
        };
        found.ok_or_else(|| Error::InvalidGenericPointer(pointer.clone()))
    }

    /// A pointer to the class of the given binary name, if present.
    #[must_use]
    pub fn class_pointer(&self, name: &str) -> Option<ClassPointer> {
        self.classes.get(name).map(|class| class.pointer().clone())
    }

    /// Whether a class of the given binary name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Iterates over all classes, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values().map(Arc::as_ref)
    }

    /// The shared handle of a class, for holding beyond the model's lifetime.
    #[must_use]
    pub fn shared_class(&self, pointer: &ClassPointer) -> Option<Arc<ClassModel>> {
        self.classes.get(pointer.binary_name()).cloned()
    }

    /// The number of classes in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the model holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Accumulates classes into a new [`Model`], rejecting duplicates.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    classes: HashMap<String, Arc<ClassModel>>,
}

impl ModelBuilder {
    /// Adds a class to the model under construction.
    ///
    /// # Errors
    ///
    /// [`LinkError::DuplicateClass`] when a class of the same binary name is
    /// already present.
    pub fn add_class(&mut self, class: ClassModel) -> std::result::Result<(), LinkError> {
        self.add_shared(Arc::new(class))
    }

    /// Adds an already-shared class handle.
    ///
    /// # Errors
    ///
    /// [`LinkError::DuplicateClass`] when a class of the same binary name is
    /// already present.
    pub fn add_shared(&mut self, class: Arc<ClassModel>) -> std::result::Result<(), LinkError> {
        let name = class.binary_name().to_string();
        if let Some(existing) = self.classes.get(&name) {
            return Err(LinkError::DuplicateClass {
                name,
                load_source: class.source().clone(),
                existing_source: existing.source().clone(),
            });
        }
        self.classes.insert(name, class);
        Ok(())
    }

    /// Whether a class of the given binary name is already present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Finalizes the snapshot.
    #[must_use]
    pub fn build(self) -> Model {
        Model {
            classes: self.classes,
        }
    }
}
