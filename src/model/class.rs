//! Class snapshots and their builder.

use crate::model::flags::{self, AccessFlags};
use crate::model::{
    Annotation, ClassPointer, ClassType, FieldModel, GenericModel, LoadSource, MethodPointer,
    MethodModel, ObjectPath,
};
use crate::FormatError;

/// The enclosing context of a local or anonymous class.
#[derive(Clone, PartialEq, Debug)]
pub struct EnclosingInfo {
    /// The immediately enclosing class.
    pub class: ClassPointer,
    /// The enclosing method, absent when the class sits in an initializer or
    /// field initializer rather than a method body.
    pub method: Option<MethodPointer>,
}

/// One entry of a class's recorded member classes: a class nested directly
/// inside this one.
#[derive(Clone, PartialEq, Debug)]
pub struct InnerClassModel {
    /// The simple (unqualified) name of the nested class.
    pub name: String,
    /// The nested class itself.
    pub pointer: ClassPointer,
    /// The source-level modifier flags of the nested declaration.
    pub flags: AccessFlags,
}

/// The recorded nesting of a class that is itself nested.
#[derive(Clone, PartialEq, Debug)]
pub struct NestingInfo {
    /// The immediately enclosing class, when one was recorded. Absent for
    /// some anonymous and local classes.
    pub outer: Option<ClassPointer>,
    /// The simple name of this class inside its outer class. Absent for
    /// anonymous classes.
    pub inner_name: Option<String>,
    /// The source-level modifier flags of the nested declaration.
    pub flags: AccessFlags,
}

/// An immutable snapshot of one linked class.
///
/// All reference-valued parts are pointers or pointer-carrying types, never
/// direct links to other snapshots; resolution happens through the owning
/// [`crate::model::Model`].
#[derive(Clone, PartialEq, Debug)]
pub struct ClassModel {
    pointer: ClassPointer,
    path: ObjectPath,
    version: u32,
    flags: AccessFlags,
    super_class: Option<ClassType>,
    interfaces: Vec<ClassType>,
    generics: Vec<GenericModel>,
    fields: Vec<FieldModel>,
    methods: Vec<MethodModel>,
    inner_classes: Vec<InnerClassModel>,
    nesting: Option<NestingInfo>,
    enclosing: Option<EnclosingInfo>,
    nest_host: Option<ClassPointer>,
    nest_members: Vec<ClassPointer>,
    permitted_subclasses: Option<Vec<ClassPointer>>,
    annotations: Vec<Annotation>,
    source_file: Option<String>,
    source: LoadSource,
}

impl ClassModel {
    /// Starts building a class with the given binary name.
    #[must_use]
    pub fn builder(name: impl AsRef<str>) -> ClassModelBuilder {
        ClassModelBuilder::new(name)
    }

    /// The persistent pointer identifying this class.
    #[must_use]
    pub fn pointer(&self) -> &ClassPointer {
        &self.pointer
    }

    /// The binary name.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        self.pointer.binary_name()
    }

    /// The binary name in segmented form.
    #[must_use]
    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    /// The packed class-file version, `minor << 16 | major`.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The class-file major version.
    #[must_use]
    pub fn major_version(&self) -> u16 {
        flags::major_version(self.version)
    }

    /// The class-level modifier flags.
    #[must_use]
    pub fn flags(&self) -> AccessFlags {
        self.flags
    }

    /// The direct super class, `None` only for `java/lang/Object`.
    #[must_use]
    pub fn super_class(&self) -> Option<&ClassType> {
        self.super_class.as_ref()
    }

    /// The direct superinterfaces, in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[ClassType] {
        &self.interfaces
    }

    /// Type parameters declared on the class.
    #[must_use]
    pub fn generics(&self) -> &[GenericModel] {
        &self.generics
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    /// Declared methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodModel] {
        &self.methods
    }

    /// Classes nested directly inside this one.
    #[must_use]
    pub fn inner_classes(&self) -> &[InnerClassModel] {
        &self.inner_classes
    }

    /// Nesting of this class inside an outer class, when recorded.
    #[must_use]
    pub fn nesting(&self) -> Option<&NestingInfo> {
        self.nesting.as_ref()
    }

    /// The enclosing class and method, when this is a local or anonymous
    /// class.
    #[must_use]
    pub fn enclosing(&self) -> Option<&EnclosingInfo> {
        self.enclosing.as_ref()
    }

    /// The recorded nest host, when this class claims membership in another
    /// class's nest.
    #[must_use]
    pub fn nest_host(&self) -> Option<&ClassPointer> {
        self.nest_host.as_ref()
    }

    /// The recorded nest members, when this class hosts a nest.
    #[must_use]
    pub fn nest_members(&self) -> &[ClassPointer] {
        &self.nest_members
    }

    /// The permitted direct subclasses. `Some` exactly when the class is
    /// sealed; an empty list seals the class shut.
    #[must_use]
    pub fn permitted_subclasses(&self) -> Option<&[ClassPointer]> {
        self.permitted_subclasses.as_deref()
    }

    /// Annotations applied to the class.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The compiled source file name, when one was recorded.
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// Where this class was loaded from.
    #[must_use]
    pub fn source(&self) -> &LoadSource {
        &self.source
    }

    /// Whether the class is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.is_interface()
    }

    /// Whether the class is sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.permitted_subclasses.is_some()
    }

    /// The package part of the binary name, empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        match self.binary_name().rfind('/') {
            Some(index) => &self.binary_name()[..index],
            None => "",
        }
    }

    /// Looks up a declared field by name and erased descriptor.
    #[must_use]
    pub fn find_field(&self, name: &str, descriptor: &str) -> Option<&FieldModel> {
        self.fields
            .iter()
            .find(|field| field.name == name && field.descriptor() == descriptor)
    }

    /// Looks up a declared method by name and erased descriptor.
    #[must_use]
    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&MethodModel> {
        self.methods
            .iter()
            .find(|method| method.name == name && method.descriptor() == descriptor)
    }

    /// Looks up a declared type parameter by name.
    #[must_use]
    pub fn find_generic(&self, name: &str) -> Option<&GenericModel> {
        self.generics.iter().find(|generic| generic.name == name)
    }
}

/// Fluent builder for [`ClassModel`].
///
/// Unset parts fall back to the defaults a compiler would have produced: the
/// latest supported class-file version, a `java/lang/Object` super class
/// (except for `java/lang/Object` itself), and an unknown load source.
///
/// # Example
///
/// ```rust
/// use classlink::model::{AccessFlags, ClassModel};
///
/// let class = ClassModel::builder("com/example/Widget")
///     .flags(AccessFlags::PUBLIC)
///     .build()
///     .unwrap();
/// assert_eq!(class.super_class().unwrap().pointer.binary_name(), "java/lang/Object");
/// ```
#[derive(Debug)]
pub struct ClassModelBuilder {
    name: String,
    version: Option<u32>,
    flags: AccessFlags,
    super_class: Option<ClassType>,
    interfaces: Vec<ClassType>,
    generics: Vec<GenericModel>,
    fields: Vec<FieldModel>,
    methods: Vec<MethodModel>,
    inner_classes: Vec<InnerClassModel>,
    nesting: Option<NestingInfo>,
    enclosing: Option<EnclosingInfo>,
    nest_host: Option<ClassPointer>,
    nest_members: Vec<ClassPointer>,
    permitted_subclasses: Option<Vec<ClassPointer>>,
    annotations: Vec<Annotation>,
    source_file: Option<String>,
    source: Option<LoadSource>,
}

impl ClassModelBuilder {
    fn new(name: impl AsRef<str>) -> Self {
        ClassModelBuilder {
            name: name.as_ref().to_string(),
            version: None,
            flags: AccessFlags::empty(),
            super_class: None,
            interfaces: Vec::new(),
            generics: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
            nesting: None,
            enclosing: None,
            nest_host: None,
            nest_members: Vec::new(),
            permitted_subclasses: None,
            annotations: Vec::new(),
            source_file: None,
            source: None,
        }
    }

    /// Sets the packed class-file version.
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the class-level modifier flags.
    #[must_use]
    pub fn flags(mut self, flags: AccessFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the direct super class.
    #[must_use]
    pub fn super_class(mut self, super_class: ClassType) -> Self {
        self.super_class = Some(super_class);
        self
    }

    /// Adds a direct superinterface.
    #[must_use]
    pub fn interface(mut self, interface: ClassType) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Sets the class's type parameters.
    #[must_use]
    pub fn generics(mut self, generics: Vec<GenericModel>) -> Self {
        self.generics = generics;
        self
    }

    /// Adds a declared field.
    #[must_use]
    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a declared method.
    #[must_use]
    pub fn method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a directly nested class record.
    #[must_use]
    pub fn inner_class(mut self, inner: InnerClassModel) -> Self {
        self.inner_classes.push(inner);
        self
    }

    /// Records this class as nested inside an outer class.
    #[must_use]
    pub fn nesting(mut self, nesting: NestingInfo) -> Self {
        self.nesting = Some(nesting);
        self
    }

    /// Records the enclosing context of a local or anonymous class.
    #[must_use]
    pub fn enclosing(mut self, enclosing: EnclosingInfo) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    /// Records the nest host this class claims.
    #[must_use]
    pub fn nest_host(mut self, host: ClassPointer) -> Self {
        self.nest_host = Some(host);
        self
    }

    /// Sets the nest members this class hosts.
    #[must_use]
    pub fn nest_members(mut self, members: Vec<ClassPointer>) -> Self {
        self.nest_members = members;
        self
    }

    /// Seals the class to the given permitted subclasses.
    #[must_use]
    pub fn permitted_subclasses(mut self, permitted: Vec<ClassPointer>) -> Self {
        self.permitted_subclasses = Some(permitted);
        self
    }

    /// Adds a class-level annotation.
    #[must_use]
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Records the compiled source file name.
    #[must_use]
    pub fn source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Records where the class was loaded from.
    #[must_use]
    pub fn source(mut self, source: LoadSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Finalizes the snapshot, applying defaults for unset parts.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidClassName`] when the name is empty or
    /// contains an empty segment.
    pub fn build(self) -> Result<ClassModel, FormatError> {
        if self.name.is_empty() || self.name.split('/').any(str::is_empty) {
            return Err(FormatError::InvalidClassName { name: self.name });
        }
        let super_class = match self.super_class {
            Some(super_class) => Some(super_class),
            None if self.name == "java/lang/Object" => None,
            None => Some(ClassType::object()),
        };
        let pointer = ClassPointer::of(&self.name);
        Ok(ClassModel {
            path: pointer.path(),
            pointer,
            version: self
                .version
                .unwrap_or_else(|| u32::from(flags::LATEST_VERSION)),
            flags: self.flags,
            super_class,
            interfaces: self.interfaces,
            generics: self.generics,
            fields: self.fields,
            methods: self.methods,
            inner_classes: self.inner_classes,
            nesting: self.nesting,
            enclosing: self.enclosing,
            nest_host: self.nest_host,
            nest_members: self.nest_members,
            permitted_subclasses: self.permitted_subclasses,
            annotations: self.annotations,
            source_file: self.source_file,
            source: self.source.unwrap_or_else(LoadSource::unknown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let class = ClassModel::builder("com/example/Widget").build().unwrap();
        assert_eq!(class.binary_name(), "com/example/Widget");
        assert_eq!(class.major_version(), flags::LATEST_VERSION);
        assert_eq!(
            class.super_class().unwrap().pointer.binary_name(),
            "java/lang/Object"
        );
        assert_eq!(class.source().label(), "<unknown>");
        assert!(!class.is_sealed());
    }

    #[test]
    fn test_object_has_no_super() {
        let object = ClassModel::builder("java/lang/Object").build().unwrap();
        assert!(object.super_class().is_none());
    }

    #[test]
    fn test_invalid_names_rejected() {
        assert!(ClassModel::builder("").build().is_err());
        assert!(ClassModel::builder("com//Widget").build().is_err());
        assert!(ClassModel::builder("com/example/").build().is_err());
    }

    #[test]
    fn test_package_extraction() {
        let class = ClassModel::builder("com/example/Widget").build().unwrap();
        assert_eq!(class.package(), "com/example");
        let top = ClassModel::builder("Widget").build().unwrap();
        assert_eq!(top.package(), "");
    }

    #[test]
    fn test_sealing() {
        let sealed = ClassModel::builder("com/example/Shape")
            .permitted_subclasses(vec![ClassPointer::of("com/example/Circle")])
            .build()
            .unwrap();
        assert!(sealed.is_sealed());
        assert_eq!(sealed.permitted_subclasses().unwrap().len(), 1);

        let shut = ClassModel::builder("com/example/Closed")
            .permitted_subclasses(Vec::new())
            .build()
            .unwrap();
        assert!(shut.is_sealed());
        assert!(shut.permitted_subclasses().unwrap().is_empty());
    }
}
