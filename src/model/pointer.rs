//! Persistent, name-keyed references into a model.
//!
//! Pointers identify entities by name rather than by position, so they stay
//! valid across model snapshots: a [`ClassPointer`] created against one
//! [`crate::model::Model`] resolves in any later model that still contains a
//! class of that binary name. They are cheap to clone and hash, and never hold
//! the entity itself.

use std::fmt;
use std::sync::Arc;

use crate::model::ObjectPath;

/// A reference to a class by its binary name.
///
/// # Example
///
/// ```rust
/// use classlink::model::ClassPointer;
///
/// let ptr = ClassPointer::of("java/util/Map");
/// assert_eq!(ptr.binary_name(), "java/util/Map");
/// assert_eq!(ptr.path().last(), Some("Map"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassPointer {
    name: Arc<str>,
}

impl ClassPointer {
    /// Creates a pointer to the class with the given binary name.
    pub fn of(name: impl AsRef<str>) -> Self {
        ClassPointer {
            name: Arc::from(name.as_ref()),
        }
    }

    /// The binary name this pointer resolves by.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        &self.name
    }

    /// The binary name as a segmented path.
    #[must_use]
    pub fn path(&self) -> ObjectPath {
        ObjectPath::from_binary_name(&self.name)
    }

    /// A pointer to a member of this class.
    #[must_use]
    pub fn method(&self, name: impl AsRef<str>, descriptor: impl AsRef<str>) -> MethodPointer {
        MethodPointer {
            class: self.clone(),
            name: Arc::from(name.as_ref()),
            descriptor: Arc::from(descriptor.as_ref()),
        }
    }

    /// A pointer to a field of this class.
    #[must_use]
    pub fn field(&self, name: impl AsRef<str>, descriptor: impl AsRef<str>) -> FieldPointer {
        FieldPointer {
            class: self.clone(),
            name: Arc::from(name.as_ref()),
            descriptor: Arc::from(descriptor.as_ref()),
        }
    }
}

impl fmt::Display for ClassPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class '{}'", self.name)
    }
}

/// A reference to a method by declaring class, name and descriptor.
///
/// The triple is the JVMS identity of a method; two models holding a method
/// of the same triple yield equal pointers.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodPointer {
    class: ClassPointer,
    name: Arc<str>,
    descriptor: Arc<str>,
}

impl MethodPointer {
    /// Creates a pointer from its three identity components.
    pub fn of(class: ClassPointer, name: impl AsRef<str>, descriptor: impl AsRef<str>) -> Self {
        MethodPointer {
            class,
            name: Arc::from(name.as_ref()),
            descriptor: Arc::from(descriptor.as_ref()),
        }
    }

    /// The declaring class.
    #[must_use]
    pub fn class(&self) -> &ClassPointer {
        &self.class
    }

    /// The method name (`<init>` and `<clinit>` included).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method descriptor, for example `(ILjava/lang/String;)V`.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

impl fmt::Display for MethodPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "method '{}.{}{}'",
            self.class.binary_name(),
            self.name,
            self.descriptor
        )
    }
}

/// A reference to a field by declaring class, name and descriptor.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FieldPointer {
    class: ClassPointer,
    name: Arc<str>,
    descriptor: Arc<str>,
}

impl FieldPointer {
    /// Creates a pointer from its three identity components.
    pub fn of(class: ClassPointer, name: impl AsRef<str>, descriptor: impl AsRef<str>) -> Self {
        FieldPointer {
            class,
            name: Arc::from(name.as_ref()),
            descriptor: Arc::from(descriptor.as_ref()),
        }
    }

    /// The declaring class.
    #[must_use]
    pub fn class(&self) -> &ClassPointer {
        &self.class
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field descriptor, for example `Ljava/lang/String;`.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

impl fmt::Display for FieldPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}.{}' of type '{}'",
            self.class.binary_name(),
            self.name,
            self.descriptor
        )
    }
}

/// The entity a type parameter is declared on.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GenericOwner {
    /// A type parameter of a class declaration.
    Class(ClassPointer),
    /// A type parameter of a method declaration.
    Method(MethodPointer),
}

impl fmt::Display for GenericOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericOwner::Class(class) => write!(f, "{class}"),
            GenericOwner::Method(method) => write!(f, "{method}"),
        }
    }
}

/// A reference to a type parameter by owner and name.
///
/// Type-parameter names are unique within their owner, so the pair is a
/// stable identity.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GenericPointer {
    owner: GenericOwner,
    name: Arc<str>,
}

impl GenericPointer {
    /// Creates a pointer from owner and parameter name.
    pub fn of(owner: GenericOwner, name: impl AsRef<str>) -> Self {
        GenericPointer {
            owner,
            name: Arc::from(name.as_ref()),
        }
    }

    /// The declaring class or method.
    #[must_use]
    pub fn owner(&self) -> &GenericOwner {
        &self.owner
    }

    /// The type-parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for GenericPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type parameter '{}' of {}", self.name, self.owner)
    }
}

/// An opaque label for where a class was loaded from.
///
/// The model never interprets the label; it only carries it into error
/// messages and duplicate reports so users can tell colliding inputs apart.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LoadSource {
    label: Arc<str>,
}

impl LoadSource {
    /// Creates a source label from any descriptive string, typically a jar
    /// path or directory.
    pub fn of(label: impl AsRef<str>) -> Self {
        LoadSource {
            label: Arc::from(label.as_ref()),
        }
    }

    /// An unknown source, for synthetic or programmatically built classes.
    #[must_use]
    pub fn unknown() -> Self {
        LoadSource::of("<unknown>")
    }

    /// The label text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
