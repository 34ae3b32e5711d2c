//! The unlinked staging representation between decoding and linking.
//!
//! A byte decoder produces one write-once [`RawClass`] per class file. Raw
//! classes hold nothing but strings and flags; [`UnlinkedClass::from_raw`]
//! digests the inner-class table and parses the class signature, and an
//! [`UnlinkedBatch`] collects the result under duplicate checking. The batch
//! is the complete name universe the linker resolves against.

use std::collections::HashMap;

use crate::model::{AccessFlags, ConstantValue, LoadSource};
use crate::signature::{self, ClassSignature};
use crate::LinkError;

/// One entry of the raw inner-class table, as decoded from the `InnerClasses`
/// attribute.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawInnerClass {
    /// Binary name of the inner class the entry describes.
    pub name: String,
    /// Binary name of the enclosing class; absent for local and anonymous
    /// classes.
    pub outer_name: Option<String>,
    /// Simple name of the inner class; absent for anonymous classes.
    pub inner_name: Option<String>,
    /// Source-level modifier flags of the nested declaration.
    pub flags: AccessFlags,
}

/// An undigested annotation use, holding names instead of pointers.
#[derive(Clone, PartialEq, Debug)]
pub struct RawAnnotation {
    /// Whether the annotation is retained for runtime reflection.
    pub runtime_visible: bool,
    /// Binary name of the annotation interface.
    pub class_name: String,
    /// Named element values.
    pub values: Vec<(String, RawAnnotationValue)>,
}

/// An undigested annotation element value.
#[derive(Clone, PartialEq, Debug)]
pub enum RawAnnotationValue {
    /// An `int`-family constant.
    Int(i32),
    /// A `long` constant.
    Long(i64),
    /// A `float` constant.
    Float(f32),
    /// A `double` constant.
    Double(f64),
    /// A `String` constant.
    String(String),
    /// A class literal, carried as a field descriptor.
    Class(String),
    /// An enum constant.
    Enum {
        /// Binary name of the enum class.
        class_name: String,
        /// The constant's name.
        constant: String,
    },
    /// An array of element values.
    Array(Vec<RawAnnotationValue>),
    /// A nested annotation.
    Nested(RawAnnotation),
}

/// A decoded field, prior to linking.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldStub {
    /// The field name.
    pub name: String,
    /// The field's modifier flags.
    pub flags: AccessFlags,
    /// The erased field descriptor.
    pub descriptor: String,
    /// The raw generic signature, when one was recorded.
    pub signature: Option<String>,
    /// The compile-time constant, when one was recorded.
    pub constant: Option<ConstantValue>,
    /// Undigested annotations.
    pub annotations: Vec<RawAnnotation>,
    /// Position among the record components of the declaring class, or
    /// `None` when the field is not a record component.
    pub record_component: Option<usize>,
}

/// A decoded method, prior to linking.
#[derive(Clone, PartialEq, Debug)]
pub struct MethodStub {
    /// The method name.
    pub name: String,
    /// The method's modifier flags.
    pub flags: AccessFlags,
    /// The erased method descriptor.
    pub descriptor: String,
    /// The raw generic signature, when one was recorded.
    pub signature: Option<String>,
    /// Declared exception binary names.
    pub exceptions: Vec<String>,
    /// Decoded parameter names, `None` when the class file carried none.
    pub parameter_names: Option<Vec<String>>,
    /// Whether the method carries bytecode.
    pub has_body: bool,
    /// The annotation-element default value, when one was recorded.
    pub annotation_default: Option<RawAnnotationValue>,
    /// Undigested annotations.
    pub annotations: Vec<RawAnnotation>,
}

/// The complete decoder output for one class file.
///
/// This is the contract an external byte decoder fills in: names are plain
/// strings, nothing is resolved, and optional attributes stay optional. Any
/// bytecode-reading library can produce it.
#[derive(Clone, PartialEq, Debug)]
pub struct RawClass {
    /// The binary class name.
    pub name: String,
    /// The packed class-file version, `minor << 16 | major`.
    pub version: u32,
    /// Class-level modifier flags.
    pub flags: AccessFlags,
    /// Binary name of the super class; absent only for `java/lang/Object`
    /// and module descriptors.
    pub super_name: Option<String>,
    /// Binary names of the direct superinterfaces.
    pub interfaces: Vec<String>,
    /// The raw generic class signature, when one was recorded.
    pub signature: Option<String>,
    /// The compiled source file name, when recorded.
    pub source_file: Option<String>,
    /// Binary name of the enclosing class, for local and anonymous classes.
    pub outer_method_class: Option<String>,
    /// Name of the enclosing method, when the class sits in a method body.
    pub outer_method_name: Option<String>,
    /// Descriptor of the enclosing method.
    pub outer_method_descriptor: Option<String>,
    /// The raw inner-class table.
    pub inner_classes: Vec<RawInnerClass>,
    /// Binary name of the claimed nest host.
    pub nest_host: Option<String>,
    /// Binary names of the hosted nest members.
    pub nest_members: Vec<String>,
    /// Binary names of the permitted subclasses; `None` when not sealed.
    pub permitted_subclasses: Option<Vec<String>>,
    /// Undigested class-level annotations.
    pub annotations: Vec<RawAnnotation>,
    /// Decoded fields.
    pub fields: Vec<FieldStub>,
    /// Decoded methods.
    pub methods: Vec<MethodStub>,
    /// Where the class was loaded from.
    pub source: LoadSource,
}

/// A class with its signature parsed and its inner-class table digested,
/// ready for linking.
#[derive(Clone, Debug)]
pub struct UnlinkedClass {
    /// The binary class name.
    pub name: String,
    /// The packed class-file version.
    pub version: u32,
    /// Class-level modifier flags.
    pub flags: AccessFlags,
    /// Binary name of the super class.
    pub super_name: Option<String>,
    /// Binary names of the direct superinterfaces.
    pub interfaces: Vec<String>,
    /// The parsed generic class signature.
    pub signature: Option<ClassSignature>,
    /// The compiled source file name.
    pub source_file: Option<String>,
    /// Binary name of the enclosing class of a local or anonymous class.
    pub outer_method_class: Option<String>,
    /// Name of the enclosing method.
    pub outer_method_name: Option<String>,
    /// Descriptor of the enclosing method.
    pub outer_method_descriptor: Option<String>,
    /// This class's own simple name inside its outer class, when nested.
    pub inner_name: Option<String>,
    /// Source-level flags of the nested declaration.
    pub inner_flags: AccessFlags,
    /// Binary name of the outer class, when nested as a member.
    pub outer_class: Option<String>,
    /// Simple name to binary name of the classes nested directly in this one.
    pub nested_inner_classes: HashMap<String, String>,
    /// Binary name of the claimed nest host.
    pub nest_host: Option<String>,
    /// Binary names of the hosted nest members.
    pub nest_members: Vec<String>,
    /// Binary names of the permitted subclasses.
    pub permitted_subclasses: Option<Vec<String>>,
    /// Undigested class-level annotations.
    pub annotations: Vec<RawAnnotation>,
    /// Decoded fields.
    pub fields: Vec<FieldStub>,
    /// Decoded methods.
    pub methods: Vec<MethodStub>,
    /// Where the class was loaded from.
    pub source: LoadSource,
}

impl UnlinkedClass {
    /// Digests a raw class: parses the generic signature and folds the
    /// inner-class table per JVMS 4.7.6 into this class's own nesting record
    /// plus the simple-name map of its direct member classes.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidSignature`] when the class signature does not
    /// parse, [`LinkError::MalformedNestedEntry`] when an inner-class table
    /// entry violates the 4.7.6 shape rules.
    pub fn from_raw(raw: RawClass) -> Result<UnlinkedClass, LinkError> {
        let signature = match &raw.signature {
            Some(text) => Some(signature::parse_class_signature(text)?),
            None => None,
        };

        let mut inner_name = None;
        let mut inner_flags = AccessFlags::empty();
        let mut outer_class = None;
        let mut nested_inner_classes = HashMap::new();

        for entry in &raw.inner_classes {
            if entry.name.is_empty() {
                return Err(LinkError::MalformedNestedEntry {
                    load_source: raw.source.clone(),
                    message: "missing name for inner class".to_string(),
                });
            }
            if entry.name == raw.name {
                // The entry describing this class itself.
                match (&entry.outer_name, &entry.inner_name) {
                    (None, None) => {} // anonymous class, nothing recorded
                    (None, Some(simple)) => {
                        // local class
                        inner_name = Some(simple.clone());
                        inner_flags = entry.flags;
                    }
                    (Some(_), None) => {
                        // 4.7.6: outer_class_info_index must be zero when
                        // inner_name_index is zero
                        return Err(LinkError::MalformedNestedEntry {
                            load_source: raw.source.clone(),
                            message: format!(
                                "missing inner name for nested class: {}",
                                entry.name
                            ),
                        });
                    }
                    (Some(outer), Some(simple)) => {
                        outer_class = Some(outer.clone());
                        inner_name = Some(simple.clone());
                        inner_flags = entry.flags;
                    }
                }
            } else if entry.outer_name.as_deref() == Some(raw.name.as_str()) {
                let Some(simple) = &entry.inner_name else {
                    return Err(LinkError::MalformedNestedEntry {
                        load_source: raw.source.clone(),
                        message: format!("missing inner name for nested class: {}", entry.name),
                    });
                };
                nested_inner_classes.insert(simple.clone(), entry.name.clone());
            }
        }

        Ok(UnlinkedClass {
            name: raw.name,
            version: raw.version,
            flags: raw.flags,
            super_name: raw.super_name,
            interfaces: raw.interfaces,
            signature,
            source_file: raw.source_file,
            outer_method_class: raw.outer_method_class,
            outer_method_name: raw.outer_method_name,
            outer_method_descriptor: raw.outer_method_descriptor,
            inner_name,
            inner_flags,
            outer_class,
            nested_inner_classes,
            nest_host: raw.nest_host,
            nest_members: raw.nest_members,
            permitted_subclasses: raw.permitted_subclasses,
            annotations: raw.annotations,
            fields: raw.fields,
            methods: raw.methods,
            source: raw.source,
        })
    }
}

/// Whether a binary name denotes a module or package marker pseudo-class,
/// which carries no linkable content and is skipped rather than loaded.
#[must_use]
pub fn is_marker_class(name: &str) -> bool {
    let simple = name.rsplit('/').next().unwrap_or(name);
    simple == "module-info" || simple == "package-info"
}

/// The complete, duplicate-checked set of unlinked classes of one load.
///
/// Linking resolves names against the whole batch at once, so the batch must
/// be fully collected before [`crate::loader::Linker::link`] runs.
#[derive(Debug, Default)]
pub struct UnlinkedBatch {
    classes: HashMap<String, UnlinkedClass>,
}

impl UnlinkedBatch {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        UnlinkedBatch::default()
    }

    /// Digests and adds one raw class. Module and package markers are
    /// silently skipped.
    ///
    /// # Errors
    ///
    /// [`LinkError::DuplicateClass`] when the batch already holds a class of
    /// the same binary name, plus any [`UnlinkedClass::from_raw`] failure.
    pub fn add_raw(&mut self, raw: RawClass) -> Result<(), LinkError> {
        if is_marker_class(&raw.name) {
            return Ok(());
        }
        let unlinked = UnlinkedClass::from_raw(raw)?;
        if let Some(existing) = self.classes.get(&unlinked.name) {
            return Err(LinkError::DuplicateClass {
                name: unlinked.name.clone(),
                load_source: unlinked.source.clone(),
                existing_source: existing.source.clone(),
            });
        }
        self.classes.insert(unlinked.name.clone(), unlinked);
        Ok(())
    }

    /// Looks up a batch member by binary name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnlinkedClass> {
        self.classes.get(name)
    }

    /// Whether the batch holds a class of the given binary name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Iterates over the batch members, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &UnlinkedClass> {
        self.classes.values()
    }

    /// The number of classes in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> RawClass {
        RawClass {
            name: name.to_string(),
            version: u32::from(crate::model::flags::LATEST_VERSION),
            flags: AccessFlags::PUBLIC,
            super_name: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            signature: None,
            source_file: None,
            outer_method_class: None,
            outer_method_name: None,
            outer_method_descriptor: None,
            inner_classes: Vec::new(),
            nest_host: None,
            nest_members: Vec::new(),
            permitted_subclasses: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            source: LoadSource::of("test.jar"),
        }
    }

    #[test]
    fn test_marker_classes_skipped() {
        assert!(is_marker_class("module-info"));
        assert!(is_marker_class("com/example/package-info"));
        assert!(!is_marker_class("com/example/Widget"));

        let mut batch = UnlinkedBatch::new();
        batch.add_raw(raw("module-info")).unwrap();
        batch.add_raw(raw("com/example/package-info")).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut batch = UnlinkedBatch::new();
        batch.add_raw(raw("com/example/Widget")).unwrap();
        let result = batch.add_raw(raw("com/example/Widget"));
        assert!(matches!(result, Err(LinkError::DuplicateClass { .. })));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_inner_table_digestion() {
        let mut outer = raw("com/example/Outer");
        outer.inner_classes = vec![
            RawInnerClass {
                name: "com/example/Outer$Inner".to_string(),
                outer_name: Some("com/example/Outer".to_string()),
                inner_name: Some("Inner".to_string()),
                flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
            },
            RawInnerClass {
                name: "com/example/Unrelated$Other".to_string(),
                outer_name: Some("com/example/Unrelated".to_string()),
                inner_name: Some("Other".to_string()),
                flags: AccessFlags::PUBLIC,
            },
        ];
        let unlinked = UnlinkedClass::from_raw(outer).unwrap();
        assert_eq!(
            unlinked.nested_inner_classes.get("Inner").map(String::as_str),
            Some("com/example/Outer$Inner")
        );
        assert!(!unlinked.nested_inner_classes.contains_key("Other"));
        assert!(unlinked.inner_name.is_none());
    }

    #[test]
    fn test_own_nesting_recorded() {
        let mut inner = raw("com/example/Outer$Inner");
        inner.inner_classes = vec![RawInnerClass {
            name: "com/example/Outer$Inner".to_string(),
            outer_name: Some("com/example/Outer".to_string()),
            inner_name: Some("Inner".to_string()),
            flags: AccessFlags::PRIVATE,
        }];
        let unlinked = UnlinkedClass::from_raw(inner).unwrap();
        assert_eq!(unlinked.inner_name.as_deref(), Some("Inner"));
        assert_eq!(unlinked.outer_class.as_deref(), Some("com/example/Outer"));
        assert!(unlinked.inner_flags.is_private());
    }

    #[test]
    fn test_anonymous_class_entry() {
        let mut anon = raw("com/example/Outer$1");
        anon.inner_classes = vec![RawInnerClass {
            name: "com/example/Outer$1".to_string(),
            outer_name: None,
            inner_name: None,
            flags: AccessFlags::empty(),
        }];
        let unlinked = UnlinkedClass::from_raw(anon).unwrap();
        assert!(unlinked.inner_name.is_none());
        assert!(unlinked.outer_class.is_none());
    }

    #[test]
    fn test_outer_without_inner_name_rejected() {
        let mut bad = raw("com/example/Outer$Inner");
        bad.inner_classes = vec![RawInnerClass {
            name: "com/example/Outer$Inner".to_string(),
            outer_name: Some("com/example/Outer".to_string()),
            inner_name: None,
            flags: AccessFlags::empty(),
        }];
        assert!(matches!(
            UnlinkedClass::from_raw(bad),
            Err(LinkError::MalformedNestedEntry { .. })
        ));
    }

    #[test]
    fn test_bad_signature_rejected() {
        let mut bad = raw("com/example/Widget");
        bad.signature = Some("<E:>".to_string());
        assert!(matches!(
            UnlinkedClass::from_raw(bad),
            Err(LinkError::InvalidSignature { .. })
        ));
    }
}
