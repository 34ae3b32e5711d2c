//! Turning an unlinked batch into a linked model.

use tracing::warn;

use crate::loader::{FieldStub, MethodStub, RawAnnotation, RawAnnotationValue, UnlinkedBatch, UnlinkedClass};
use crate::model::{
    Annotation, AnnotationEntry, AnnotationValue, ClassModel, ClassPointer, ClassType,
    EnclosingInfo, GenericArgument, GenericModel, GenericOwner, GenericPointer, InnerClassModel,
    LoadSource, MethodPointer, Model, NestingInfo, Primitive, Type,
};
use crate::signature::{
    self, ClassTypeSignature, ReferenceSignature, ReturnType, ThrowsSignature, TypeArgument,
    TypeParameter, TypeSignature,
};
use crate::verify::is_valid_method_descriptor;
use crate::{Error, FormatError, LinkError, Result};

/// Links unlinked batches against a base model.
///
/// Name resolution consults the batch being linked first, then the base
/// model; class-level references (super class, interfaces, outer class, nest
/// host and members, permitted subclasses, enclosing class) must resolve in
/// one of the two. Member-level type references (field types, parameters,
/// return types, exceptions, annotations) are turned into pointers without an
/// existence check, since a model rarely contains the whole runtime library.
///
/// # Example
///
/// ```rust,ignore
/// let batch = classlink::loader::decode_all(entries, decode)?;
/// let linked = classlink::loader::Linker::new(&base).link(&batch)?;
/// ```
pub struct Linker<'a> {
    base: &'a Model,
}

impl<'a> Linker<'a> {
    /// Creates a linker resolving against the given base model.
    #[must_use]
    pub fn new(base: &'a Model) -> Self {
        Linker { base }
    }

    /// Links every class of the batch.
    ///
    /// The returned model holds only the newly linked classes; merge it with
    /// the base through [`Model::to_builder`] when a combined snapshot is
    /// needed. Classes within the batch may reference each other freely,
    /// forward references included, because resolution is by name.
    ///
    /// # Errors
    ///
    /// Any [`LinkError`] for duplicate names and unresolvable references, and
    /// [`FormatError::InvalidDescriptor`] for member descriptors that do not
    /// parse.
    pub fn link(&self, batch: &UnlinkedBatch) -> Result<Model> {
        let instance = LinkInstance {
            base: self.base,
            batch,
        };
        let mut builder = Model::builder();
        for unlinked in batch.classes() {
            builder.add_class(instance.generate(unlinked)?)?;
        }
        Ok(builder.build())
    }
}

/// One linking run over a fixed batch and base.
struct LinkInstance<'a> {
    base: &'a Model,
    batch: &'a UnlinkedBatch,
}

/// The type parameters visible at a use site, used to resolve `T<name>;`
/// variables. Method parameters shadow class parameters of the same name.
struct GenericScope<'s> {
    class_owner: GenericOwner,
    class_parameters: &'s [TypeParameter],
    method: Option<(GenericOwner, &'s [TypeParameter])>,
}

impl GenericScope<'_> {
    fn resolve(&self, name: &str) -> GenericPointer {
        if let Some((owner, parameters)) = &self.method {
            if parameters.iter().any(|parameter| parameter.name == name) {
                return GenericPointer::of(owner.clone(), name);
            }
        }
        // Variables the class does not declare also land here; the pointer
        // then fails resolution instead of aborting the link.
        GenericPointer::of(self.class_owner.clone(), name)
    }

    fn parameter(&self, name: &str) -> Option<&TypeParameter> {
        if let Some((_, parameters)) = &self.method {
            if let Some(parameter) = parameters.iter().find(|p| p.name == name) {
                return Some(parameter);
            }
        }
        self.class_parameters.iter().find(|p| p.name == name)
    }
}

impl LinkInstance<'_> {
    fn generate(&self, un: &UnlinkedClass) -> Result<ClassModel> {
        self.check_duplicate(un)?;

        let class_pointer = ClassPointer::of(&un.name);
        let class_owner = GenericOwner::Class(class_pointer.clone());

        let type_parameters: &[TypeParameter] = un
            .signature
            .as_ref()
            .map_or(&[], |signature| signature.type_parameters.as_slice());
        let class_scope = GenericScope {
            class_owner: class_owner.clone(),
            class_parameters: type_parameters,
            method: None,
        };
        let generics = self.generics(un, type_parameters, &class_owner, &class_scope)?;

        let super_class = self.super_type(un, &class_scope)?;
        let interfaces = self.interface_types(un, &class_scope)?;

        let mut builder = ClassModel::builder(&un.name)
            .version(un.version)
            .flags(un.flags)
            .generics(generics)
            .source(un.source.clone());
        if let Some(super_class) = super_class {
            builder = builder.super_class(super_class);
        }
        for interface in interfaces {
            builder = builder.interface(interface);
        }
        if let Some(source_file) = &un.source_file {
            builder = builder.source_file(source_file.clone());
        }

        if let Some(inner_name) = &un.inner_name {
            let outer = match &un.outer_class {
                Some(outer) => Some(self.resolve(outer, &un.source)?),
                None => None,
            };
            builder = builder.nesting(NestingInfo {
                outer,
                inner_name: Some(inner_name.clone()),
                flags: un.inner_flags,
            });
        }

        if let Some(enclosing) = self.enclosing(un)? {
            builder = builder.enclosing(enclosing);
        }

        for (simple, binary) in &un.nested_inner_classes {
            let pointer = self.resolve(binary, &un.source)?;
            let flags = self
                .batch
                .get(binary)
                .map(|inner| inner.inner_flags)
                .unwrap_or_default();
            builder = builder.inner_class(InnerClassModel {
                name: simple.clone(),
                pointer,
                flags,
            });
        }

        if let Some(host) = &un.nest_host {
            builder = builder.nest_host(self.resolve(host, &un.source)?);
        }
        let members = self.resolve_all(&un.nest_members, &un.source)?;
        builder = builder.nest_members(members);
        if let Some(permitted) = &un.permitted_subclasses {
            builder = builder.permitted_subclasses(self.resolve_all(permitted, &un.source)?);
        }

        for raw in &un.annotations {
            builder = builder.annotation(self.annotation(un, raw, &class_pointer)?);
        }
        for stub in &un.fields {
            builder = builder.field(self.field(un, stub, &class_pointer, &class_scope)?);
        }
        for stub in &un.methods {
            builder = builder.method(self.method(un, stub, &class_pointer, &class_scope)?);
        }

        Ok(builder.build()?)
    }

    fn check_duplicate(&self, un: &UnlinkedClass) -> std::result::Result<(), LinkError> {
        if let Some(pointer) = self.base.class_pointer(&un.name) {
            let existing_source = self
                .base
                .get_class(&pointer)
                .map(|class| class.source().clone())
                .unwrap_or_else(|_| LoadSource::unknown());
            return Err(LinkError::DuplicateClass {
                name: un.name.clone(),
                load_source: un.source.clone(),
                existing_source,
            });
        }
        Ok(())
    }

    /// Resolves a binary name against the batch, then the base model.
    fn resolve(
        &self,
        name: &str,
        referrer: &LoadSource,
    ) -> std::result::Result<ClassPointer, LinkError> {
        if name.is_empty() {
            return Err(LinkError::MalformedReference {
                load_source: referrer.clone(),
                name: name.to_string(),
                message: "class name cannot be empty".to_string(),
            });
        }
        if self.batch.contains(name) {
            return Ok(ClassPointer::of(name));
        }
        self.base
            .class_pointer(name)
            .ok_or_else(|| LinkError::UnresolvedReference {
                name: name.to_string(),
                referrer: referrer.clone(),
            })
    }

    fn resolve_all(
        &self,
        names: &[String],
        referrer: &LoadSource,
    ) -> std::result::Result<Vec<ClassPointer>, LinkError> {
        names
            .iter()
            .map(|name| self.resolve(name, referrer))
            .collect()
    }

    fn enclosing(&self, un: &UnlinkedClass) -> Result<Option<EnclosingInfo>> {
        let Some(outer_class) = &un.outer_method_class else {
            return Ok(None);
        };
        let class = self.resolve(outer_class, &un.source)?;
        let method = match (&un.outer_method_name, &un.outer_method_descriptor) {
            (Some(name), Some(descriptor)) => {
                if !is_valid_method_descriptor(descriptor) {
                    return Err(LinkError::MalformedReference {
                        load_source: un.source.clone(),
                        name: format!("{name}{descriptor}"),
                        message: "enclosing method descriptor is not well-formed".to_string(),
                    }
                    .into());
                }
                Some(MethodPointer::of(class.clone(), name, descriptor))
            }
            (Some(name), None) => {
                return Err(LinkError::MalformedReference {
                    load_source: un.source.clone(),
                    name: name.clone(),
                    message: "enclosing method has a name but no descriptor".to_string(),
                }
                .into());
            }
            _ => None,
        };
        Ok(Some(EnclosingInfo { class, method }))
    }

    fn super_type(&self, un: &UnlinkedClass, scope: &GenericScope<'_>) -> Result<Option<ClassType>> {
        match (&un.signature, &un.super_name) {
            (Some(signature), _) => {
                Ok(Some(self.class_type(un, &signature.super_class, scope, true)?))
            }
            (None, Some(super_name)) => Ok(Some(ClassType::raw(
                self.resolve(super_name, &un.source)?,
            ))),
            (None, None) => Ok(None),
        }
    }

    fn interface_types(&self, un: &UnlinkedClass, scope: &GenericScope<'_>) -> Result<Vec<ClassType>> {
        match &un.signature {
            Some(signature) => {
                if signature.interfaces.len() != un.interfaces.len() {
                    warn!(
                        class = %un.name,
                        signature_count = signature.interfaces.len(),
                        raw_count = un.interfaces.len(),
                        "interface count mismatch, using the signature list"
                    );
                }
                signature
                    .interfaces
                    .iter()
                    .map(|interface| self.class_type(un, interface, scope, true))
                    .collect()
            }
            None => un
                .interfaces
                .iter()
                .map(|name| Ok(ClassType::raw(self.resolve(name, &un.source)?)))
                .collect(),
        }
    }

    /// Resolves a class type signature, walking any `.Inner` suffix through
    /// the inner-class records of each step's outer class. In strict mode
    /// (class-level references) every step must resolve; otherwise unknown
    /// steps fall back to the conventional `Outer$Inner` spelling.
    fn class_type(
        &self,
        un: &UnlinkedClass,
        signature: &ClassTypeSignature,
        scope: &GenericScope<'_>,
        strict: bool,
    ) -> Result<ClassType> {
        let mut current = signature.path.binary_name();
        if strict {
            self.resolve(&current, &un.source)?;
        }

        for simple in &signature.suffix {
            let next = self.inner_binary_name(&current, &simple.name);
            match next {
                Some(next) => current = next,
                None if strict => {
                    return Err(LinkError::UnresolvedReference {
                        name: format!("{}.{}", current, simple.name),
                        referrer: un.source.clone(),
                    }
                    .into());
                }
                None => current = format!("{}${}", current, simple.name),
            }
        }

        let arguments = signature
            .suffix
            .last()
            .map_or(&signature.arguments, |simple| &simple.arguments);
        let arguments = arguments
            .iter()
            .map(|argument| self.type_argument(un, argument, scope))
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassType {
            pointer: ClassPointer::of(current),
            arguments,
        })
    }

    /// The binary name of `outer`'s member class with the given simple name,
    /// from the batch's digested map or a linked class's inner records.
    fn inner_binary_name(&self, outer: &str, simple: &str) -> Option<String> {
        if let Some(unlinked) = self.batch.get(outer) {
            return unlinked.nested_inner_classes.get(simple).cloned();
        }
        let pointer = self.base.class_pointer(outer)?;
        let class = self.base.get_class(&pointer).ok()?;
        class
            .inner_classes()
            .iter()
            .find(|inner| inner.name == simple)
            .map(|inner| inner.pointer.binary_name().to_string())
    }

    fn type_argument(
        &self,
        un: &UnlinkedClass,
        argument: &TypeArgument,
        scope: &GenericScope<'_>,
    ) -> Result<GenericArgument> {
        Ok(match argument {
            TypeArgument::Wildcard => GenericArgument::Wildcard,
            TypeArgument::Invariant(reference) => {
                GenericArgument::Invariant(self.reference_type(un, reference, scope)?)
            }
            TypeArgument::Covariant(reference) => {
                GenericArgument::Covariant(self.reference_type(un, reference, scope)?)
            }
            TypeArgument::Contravariant(reference) => {
                GenericArgument::Contravariant(self.reference_type(un, reference, scope)?)
            }
        })
    }

    fn reference_type(
        &self,
        un: &UnlinkedClass,
        reference: &ReferenceSignature,
        scope: &GenericScope<'_>,
    ) -> Result<Type> {
        Ok(match reference {
            ReferenceSignature::Class(class) => {
                Type::Class(self.class_type(un, class, scope, false)?)
            }
            ReferenceSignature::Array(component) => {
                Type::Array(Box::new(self.signature_type(un, component, scope)?))
            }
            ReferenceSignature::TypeVariable(name) => self.variable_type(scope, name),
        })
    }

    /// A use of the named type parameter, with its erasure resolved through
    /// the scope. The erased descriptor of a variable is the descriptor of
    /// its leftmost bound, so the derived member descriptor stays equal to
    /// the one in the class file.
    fn variable_type(&self, scope: &GenericScope<'_>, name: &str) -> Type {
        Type::Variable {
            pointer: scope.resolve(name),
            erasure: Box::new(self.variable_erasure(scope, name, 0)),
        }
    }

    fn variable_erasure(&self, scope: &GenericScope<'_>, name: &str, depth: usize) -> Type {
        // Cyclic variable bounds are illegal; cut the walk off.
        if depth > 64 {
            return Type::object();
        }
        let Some(parameter) = scope.parameter(name) else {
            return Type::object();
        };
        let bound = parameter
            .class_bound
            .as_ref()
            .or_else(|| parameter.interface_bounds.first());
        match bound {
            Some(reference) => self.erased_reference(scope, reference, depth),
            None => Type::object(),
        }
    }

    fn erased_reference(
        &self,
        scope: &GenericScope<'_>,
        reference: &ReferenceSignature,
        depth: usize,
    ) -> Type {
        match reference {
            ReferenceSignature::Class(class) => Type::Class(ClassType::raw(ClassPointer::of(
                self.erased_class_name(class),
            ))),
            ReferenceSignature::Array(component) => {
                Type::Array(Box::new(match component.as_ref() {
                    TypeSignature::Base(primitive) => Type::Primitive(*primitive),
                    TypeSignature::Reference(reference) => {
                        self.erased_reference(scope, reference, depth)
                    }
                }))
            }
            ReferenceSignature::TypeVariable(other) => {
                self.variable_erasure(scope, other, depth + 1)
            }
        }
    }

    /// The binary name a class type signature erases to, walking its `.Inner`
    /// suffix the same way [`Self::class_type`] does.
    fn erased_class_name(&self, signature: &ClassTypeSignature) -> String {
        let mut current = signature.path.binary_name();
        for simple in &signature.suffix {
            current = self
                .inner_binary_name(&current, &simple.name)
                .unwrap_or_else(|| format!("{}${}", current, simple.name));
        }
        current
    }

    fn signature_type(
        &self,
        un: &UnlinkedClass,
        ty: &TypeSignature,
        scope: &GenericScope<'_>,
    ) -> Result<Type> {
        Ok(match ty {
            TypeSignature::Base(primitive) => Type::Primitive(*primitive),
            TypeSignature::Reference(reference) => self.reference_type(un, reference, scope)?,
        })
    }

    fn generics(
        &self,
        un: &UnlinkedClass,
        parameters: &[TypeParameter],
        owner: &GenericOwner,
        scope: &GenericScope<'_>,
    ) -> Result<Vec<GenericModel>> {
        parameters
            .iter()
            .map(|parameter| {
                let class_bound = match &parameter.class_bound {
                    Some(bound) => Some(self.reference_type(un, bound, scope)?),
                    // An absent class bound means java/lang/Object.
                    None => Some(Type::object()),
                };
                let interface_bounds = parameter
                    .interface_bounds
                    .iter()
                    .map(|bound| self.reference_type(un, bound, scope))
                    .collect::<Result<Vec<_>>>()?;
                Ok(GenericModel {
                    name: parameter.name.clone(),
                    class_bound,
                    interface_bounds,
                    owner: owner.clone(),
                })
            })
            .collect()
    }

    fn field(
        &self,
        un: &UnlinkedClass,
        stub: &FieldStub,
        class: &ClassPointer,
        class_scope: &GenericScope<'_>,
    ) -> Result<crate::model::FieldModel> {
        let ty = match &stub.signature {
            Some(text) => {
                let parsed = signature::parse_field_signature(text)?;
                self.reference_type(un, &parsed.ty, class_scope)?
            }
            None => field_descriptor_type(&stub.descriptor, class)?,
        };
        let annotations = stub
            .annotations
            .iter()
            .map(|raw| self.annotation(un, raw, class))
            .collect::<Result<Vec<_>>>()?;
        Ok(crate::model::FieldModel {
            name: stub.name.clone(),
            flags: stub.flags,
            ty,
            constant: stub.constant.clone(),
            annotations,
            record_component: stub.record_component,
            owner: class.clone(),
        })
    }

    fn method(
        &self,
        un: &UnlinkedClass,
        stub: &MethodStub,
        class: &ClassPointer,
        class_scope: &GenericScope<'_>,
    ) -> Result<crate::model::MethodModel> {
        let pointer = MethodPointer::of(class.clone(), &stub.name, &stub.descriptor);
        let owner = GenericOwner::Method(pointer);

        let parsed = match &stub.signature {
            Some(text) => Some(signature::parse_method_signature(text)?),
            None => None,
        };
        let method_parameters: &[TypeParameter] = parsed
            .as_ref()
            .map_or(&[], |signature| signature.type_parameters.as_slice());
        let scope = GenericScope {
            class_owner: class_scope.class_owner.clone(),
            class_parameters: class_scope.class_parameters,
            method: Some((owner.clone(), method_parameters)),
        };

        let generics = match &parsed {
            Some(signature) => self.generics(un, &signature.type_parameters, &owner, &scope)?,
            None => Vec::new(),
        };

        let (parameter_types, return_type) = match &parsed {
            Some(signature) => {
                let parameters = signature
                    .parameters
                    .iter()
                    .map(|parameter| self.signature_type(un, parameter, &scope))
                    .collect::<Result<Vec<_>>>()?;
                let return_type = match &signature.return_type {
                    ReturnType::Void => Type::Void,
                    ReturnType::Type(ty) => self.signature_type(un, ty, &scope)?,
                };
                (parameters, return_type)
            }
            None => method_descriptor_types(&stub.descriptor, class)?,
        };

        let parameter_names = match &stub.parameter_names {
            Some(names) => names.clone(),
            None => (0..parameter_types.len())
                .map(|index| format!("arg{index}"))
                .collect(),
        };

        let exceptions = match &parsed {
            Some(signature) if !signature.throws.is_empty() => signature
                .throws
                .iter()
                .map(|throws| match throws {
                    ThrowsSignature::Class(class_signature) => Ok(Type::Class(
                        self.class_type(un, class_signature, &scope, false)?,
                    )),
                    ThrowsSignature::TypeVariable(name) => {
                        Ok(self.variable_type(&scope, name))
                    }
                })
                .collect::<Result<Vec<_>>>()?,
            _ => stub
                .exceptions
                .iter()
                .map(|name| Type::Class(ClassType::raw(ClassPointer::of(name))))
                .collect(),
        };

        let annotation_default = match &stub.annotation_default {
            Some(value) => Some(self.annotation_value(un, value, class)?),
            None => None,
        };
        let annotations = stub
            .annotations
            .iter()
            .map(|raw| self.annotation(un, raw, class))
            .collect::<Result<Vec<_>>>()?;

        Ok(crate::model::MethodModel {
            name: stub.name.clone(),
            flags: stub.flags,
            return_type,
            parameter_types,
            parameter_names,
            generics,
            exceptions,
            has_body: stub.has_body,
            annotation_default,
            annotations,
            owner: class.clone(),
        })
    }

    fn annotation(
        &self,
        un: &UnlinkedClass,
        raw: &RawAnnotation,
        class: &ClassPointer,
    ) -> Result<Annotation> {
        if raw.class_name.is_empty() {
            return Err(LinkError::MalformedReference {
                load_source: un.source.clone(),
                name: raw.class_name.clone(),
                message: "annotation class name cannot be empty".to_string(),
            }
            .into());
        }
        let values = raw
            .values
            .iter()
            .map(|(name, value)| {
                Ok(AnnotationEntry {
                    name: name.clone(),
                    value: self.annotation_value(un, value, class)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Annotation {
            runtime_visible: raw.runtime_visible,
            class: ClassPointer::of(&raw.class_name),
            values,
        })
    }

    fn annotation_value(
        &self,
        un: &UnlinkedClass,
        value: &RawAnnotationValue,
        class: &ClassPointer,
    ) -> Result<AnnotationValue> {
        Ok(match value {
            RawAnnotationValue::Int(value) => AnnotationValue::Int(*value),
            RawAnnotationValue::Long(value) => AnnotationValue::Long(*value),
            RawAnnotationValue::Float(value) => AnnotationValue::Float(*value),
            RawAnnotationValue::Double(value) => AnnotationValue::Double(*value),
            RawAnnotationValue::String(value) => AnnotationValue::String(value.clone()),
            RawAnnotationValue::Class(descriptor) => {
                AnnotationValue::Class(field_descriptor_type(descriptor, class)?)
            }
            RawAnnotationValue::Enum {
                class_name,
                constant,
            } => AnnotationValue::Enum {
                class: ClassPointer::of(class_name),
                constant: constant.clone(),
            },
            RawAnnotationValue::Array(values) => AnnotationValue::Array(
                values
                    .iter()
                    .map(|value| self.annotation_value(un, value, class))
                    .collect::<Result<Vec<_>>>()?,
            ),
            RawAnnotationValue::Nested(nested) => {
                AnnotationValue::Nested(self.annotation(un, nested, class)?)
            }
        })
    }
}

/// Parses an erased field descriptor into a [`Type`].
fn field_descriptor_type(descriptor: &str, class: &ClassPointer) -> Result<Type> {
    let mut cursor = DescriptorCursor {
        descriptor,
        index: 0,
        class,
    };
    let ty = cursor.field_type()?;
    if cursor.index != descriptor.len() {
        return Err(cursor.invalid());
    }
    Ok(ty)
}

/// Parses an erased method descriptor into parameter types and return type.
fn method_descriptor_types(descriptor: &str, class: &ClassPointer) -> Result<(Vec<Type>, Type)> {
    let mut cursor = DescriptorCursor {
        descriptor,
        index: 0,
        class,
    };
    if cursor.peek() != Some(b'(') {
        return Err(cursor.invalid());
    }
    cursor.index += 1;
    let mut parameters = Vec::new();
    while cursor.peek() != Some(b')') {
        if cursor.peek().is_none() {
            return Err(cursor.invalid());
        }
        parameters.push(cursor.field_type()?);
    }
    cursor.index += 1;
    let return_type = if cursor.peek() == Some(b'V') {
        cursor.index += 1;
        Type::Void
    } else {
        cursor.field_type()?
    };
    if cursor.index != descriptor.len() {
        return Err(cursor.invalid());
    }
    Ok((parameters, return_type))
}

struct DescriptorCursor<'a> {
    descriptor: &'a str,
    index: usize,
    class: &'a ClassPointer,
}

impl DescriptorCursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.descriptor.as_bytes().get(self.index).copied()
    }

    fn invalid(&self) -> Error {
        FormatError::InvalidDescriptor {
            class: self.class.clone(),
            descriptor: self.descriptor.to_string(),
        }
        .into()
    }

    fn field_type(&mut self) -> Result<Type> {
        match self.peek() {
            Some(b'[') => {
                self.index += 1;
                Ok(Type::Array(Box::new(self.field_type()?)))
            }
            Some(b'L') => {
                self.index += 1;
                let start = self.index;
                while let Some(byte) = self.peek() {
                    if byte == b';' {
                        break;
                    }
                    self.index += 1;
                }
                if self.peek() != Some(b';') || self.index == start {
                    return Err(self.invalid());
                }
                let name = &self.descriptor[start..self.index];
                self.index += 1;
                Ok(Type::Class(ClassType::raw(ClassPointer::of(name))))
            }
            Some(byte) => match Primitive::from_descriptor_char(byte as char) {
                Some(primitive) => {
                    self.index += 1;
                    Ok(Type::Primitive(primitive))
                }
                None => Err(self.invalid()),
            },
            None => Err(self.invalid()),
        }
    }
}
