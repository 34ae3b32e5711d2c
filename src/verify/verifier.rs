//! The per-class structural verifier.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::flags::{self, AccessFlags};
use crate::model::{
    Annotation, ClassModel, ClassType, FieldModel, GenericModel, MethodModel, Model, Type,
};
use crate::verify::access::{is_binary_name, is_method_name, is_unqualified_name, Accessors};
use crate::{Error, FormatError, Result, VerifyError};

/// Verifies every class of the model, stopping at the first failure.
///
/// # Errors
///
/// The first verification failure of any class, in unspecified class order.
pub fn verify_model(model: &Model) -> Result<()> {
    let verifier = Verifier::new(model);
    for class in model.classes() {
        verifier.verify_class(class)?;
    }
    Ok(())
}

/// Verifies every class of the model and collects one failure per failing
/// class instead of stopping at the first.
#[must_use]
pub fn verify_all(model: &Model) -> Vec<Error> {
    let verifier = Verifier::new(model);
    model
        .classes()
        .filter_map(|class| verifier.verify_class(class).err())
        .collect()
}

/// A one-pass, fail-fast checker of class-file legality rules.
///
/// The verifier is stateless across classes; only the model it resolves
/// against is shared. Each check raises a typed failure naming the offending
/// entity, and the first failure aborts verification of that class.
///
/// Types referencing classes the model does not contain are tolerated: a
/// model rarely holds the entire runtime library, so accessibility is judged
/// only for classes present. Class-level references (super class,
/// interfaces) were resolved strictly at link time and must be present.
pub struct Verifier<'a> {
    model: &'a Model,
    accessors: Accessors<'a>,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier over the given model.
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Verifier {
            model,
            accessors: Accessors::new(model),
        }
    }

    /// Runs every check against one class.
    ///
    /// # Errors
    ///
    /// The first [`FormatError`] or [`VerifyError`] the class violates, or a
    /// pointer-lookup failure when a strictly linked reference is missing
    /// from the model.
    pub fn verify_class(&self, class: &ClassModel) -> Result<()> {
        self.check_pointer_round_trip(class)?;
        self.check_version(class)?;
        self.check_class_name(class)?;
        self.check_class_flags(class)?;
        self.check_generics(class, class.generics())?;
        self.check_hierarchy(class)?;
        self.check_inner_classes(class)?;
        self.check_annotations(class.annotations())?;
        self.check_nest(class);
        self.check_fields(class)?;
        self.check_methods(class)?;
        Ok(())
    }

    fn check_pointer_round_trip(&self, class: &ClassModel) -> Result<()> {
        let resolved = self.model.get_class(class.pointer())?;
        if resolved != class {
            return Err(VerifyError::PointerMismatch {
                pointer: class.pointer().clone(),
                message: "the model resolves the pointer to a different snapshot".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn check_version(&self, class: &ClassModel) -> Result<()> {
        let major = class.major_version();
        if !(flags::OLDEST_VERSION..=flags::LATEST_VERSION).contains(&major) {
            return Err(FormatError::UnsupportedVersion {
                class: class.pointer().clone(),
                major,
            }
            .into());
        }
        Ok(())
    }

    fn check_class_name(&self, class: &ClassModel) -> Result<()> {
        if !is_binary_name(class.binary_name()) {
            return Err(FormatError::InvalidClassName {
                name: class.binary_name().to_string(),
            }
            .into());
        }
        if class.path().binary_name() != class.binary_name() {
            return Err(FormatError::PathMismatch {
                class: class.pointer().clone(),
                path: class.path().clone(),
            }
            .into());
        }
        Ok(())
    }

    fn check_class_flags(&self, class: &ClassModel) -> Result<()> {
        let class_flags = class.flags();
        if class_flags.unknown_bits() != 0 {
            warn!(class = %class.binary_name(), bits = format_args!("{:#x}", class_flags.unknown_bits()),
                "ignoring unknown class access-flag bits");
        }

        let invalid = |message: &str| -> Error {
            FormatError::InvalidClassFlags {
                class: class.pointer().clone(),
                flags: class_flags,
                message: message.to_string(),
            }
            .into()
        };

        if class_flags.is_interface() {
            if !class_flags.is_abstract() {
                return Err(invalid("an interface must be abstract"));
            }
            if class_flags.is_final() {
                return Err(invalid("an interface cannot be final"));
            }
            if class_flags.is_enum() {
                return Err(invalid("an interface cannot be an enum"));
            }
        } else if class_flags.is_annotation() {
            return Err(invalid("only an interface can be an annotation"));
        }
        if class_flags.is_final() && class_flags.is_abstract() {
            return Err(invalid("a class cannot be both final and abstract"));
        }
        if class_flags.is_final() && class.permitted_subclasses().is_some_and(|p| !p.is_empty()) {
            return Err(invalid("a final class cannot permit subclasses"));
        }
        Ok(())
    }

    fn check_generics(&self, class: &ClassModel, generics: &[GenericModel]) -> Result<()> {
        let mut names = HashSet::new();
        for generic in generics {
            let invalid = |message: String| -> Error {
                VerifyError::InvalidGenericBound {
                    parameter: generic.pointer(),
                    message,
                }
                .into()
            };
            if !is_unqualified_name(&generic.name) || generic.name.contains(['<', '>', ':']) {
                return Err(invalid(format!(
                    "'{}' is not a valid type parameter name",
                    generic.name
                )));
            }
            if !names.insert(generic.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate type parameter name '{}'",
                    generic.name
                )));
            }
            for bound in generic.bounds() {
                if bound.contains_void() {
                    return Err(invalid("a bound cannot involve void".to_string()));
                }
                self.check_type_access(class, bound, "type parameter bound")?;
            }
        }
        Ok(())
    }

    fn check_hierarchy(&self, class: &ClassModel) -> Result<()> {
        let super_class = match class.super_class() {
            Some(super_class) => super_class,
            None => {
                if class.binary_name() == "java/lang/Object" {
                    return Ok(());
                }
                return Err(FormatError::MissingSuperClass {
                    class: class.pointer().clone(),
                }
                .into());
            }
        };

        let super_model = self.model.get_class(&super_class.pointer)?;
        if class.is_interface() && super_model.binary_name() != "java/lang/Object" {
            return Err(VerifyError::InterfaceSuperClass {
                class: class.pointer().clone(),
                super_class: super_class.pointer.clone(),
            }
            .into());
        }
        if super_model.is_interface() && !class.is_interface() {
            return Err(VerifyError::SuperClassIsInterface {
                class: class.pointer().clone(),
                super_class: super_class.pointer.clone(),
            }
            .into());
        }
        if super_model.flags().is_final() {
            return Err(VerifyError::FinalSuperClass {
                class: class.pointer().clone(),
                super_class: super_class.pointer.clone(),
            }
            .into());
        }
        self.check_sealing(class, super_model)?;
        self.check_supertype_access(class, super_class, "super class")?;

        for interface in class.interfaces() {
            let interface_model = self.model.get_class(&interface.pointer)?;
            if !interface_model.is_interface() {
                return Err(FormatError::InvalidInterface {
                    class: class.pointer().clone(),
                    interface: interface.pointer.clone(),
                }
                .into());
            }
            self.check_sealing(class, interface_model)?;
            self.check_supertype_access(class, interface, "interface")?;
        }
        Ok(())
    }

    /// 5.3.5: a sealed supertype admits only its permitted subclasses, and
    /// only when they are public or share its package.
    fn check_sealing(&self, class: &ClassModel, super_model: &ClassModel) -> Result<()> {
        let Some(permitted) = super_model.permitted_subclasses() else {
            return Ok(());
        };
        let violation = || -> Error {
            VerifyError::SealedViolation {
                class: class.pointer().clone(),
                super_class: super_model.pointer().clone(),
            }
            .into()
        };
        if !class.flags().is_public() && !self.accessors.same_package(super_model, class) {
            return Err(violation());
        }
        if !permitted.contains(class.pointer()) {
            return Err(violation());
        }
        Ok(())
    }

    fn check_supertype_access(
        &self,
        class: &ClassModel,
        supertype: &ClassType,
        context: &str,
    ) -> Result<()> {
        self.check_type_access(class, &Type::Class(supertype.clone()), context)
    }

    /// Every class the type mentions, generic arguments included, must be
    /// usable from `class`. Classes absent from the model are skipped.
    fn check_type_access(&self, class: &ClassModel, ty: &Type, context: &str) -> Result<()> {
        for pointer in ty.class_pointers() {
            let Ok(target) = self.model.get_class(&pointer) else {
                debug!(class = %class.binary_name(), target = %pointer.binary_name(),
                    "referenced class is not in the model, skipping access check");
                continue;
            };
            if !self.accessors.can_use_type(class, target) {
                return Err(VerifyError::InaccessibleType {
                    class: class.pointer().clone(),
                    target: pointer,
                    context: context.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_inner_classes(&self, class: &ClassModel) -> Result<()> {
        for inner in class.inner_classes() {
            let Ok(target) = self.model.get_class(&inner.pointer) else {
                debug!(class = %class.binary_name(), inner = %inner.pointer.binary_name(),
                    "recorded inner class is not in the model, skipping consistency check");
                continue;
            };
            let consistent = target
                .nesting()
                .is_some_and(|nesting| nesting.inner_name.as_deref() == Some(inner.name.as_str()));
            if !consistent {
                return Err(VerifyError::InnerClassMismatch {
                    class: class.pointer().clone(),
                    inner_name: inner.name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_annotations(&self, annotations: &[Annotation]) -> Result<()> {
        for annotation in annotations {
            if !is_binary_name(annotation.class.binary_name()) {
                return Err(FormatError::InvalidClassName {
                    name: annotation.class.binary_name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Nest-host inconsistencies are tolerated by the runtime, so they only
    /// warn (from inside the nest-host fallback) and never fail.
    fn check_nest(&self, class: &ClassModel) {
        if class.nest_host().is_some() {
            let _ = self.accessors.nest_host(class);
        }
    }

    fn check_fields(&self, class: &ClassModel) -> Result<()> {
        let mut seen = HashSet::new();
        for field in class.fields() {
            self.check_field(class, field)?;
            if !seen.insert((field.name.clone(), field.descriptor())) {
                return Err(FormatError::DuplicateField {
                    field: field.pointer(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_field(&self, class: &ClassModel, field: &FieldModel) -> Result<()> {
        if &field.owner != class.pointer() {
            return Err(VerifyError::PointerMismatch {
                pointer: field.owner.clone(),
                message: format!(
                    "field '{}' declares an owner other than its class",
                    field.name
                ),
            }
            .into());
        }
        if !is_unqualified_name(&field.name) {
            return Err(FormatError::InvalidMemberName {
                class: class.pointer().clone(),
                name: field.name.clone(),
            }
            .into());
        }

        let field_flags = field.flags;
        if field_flags.unknown_bits() != 0 {
            warn!(field = %field.pointer(), bits = format_args!("{:#x}", field_flags.unknown_bits()),
                "ignoring unknown field access-flag bits");
        }
        let invalid = |message: &str| -> Error {
            FormatError::InvalidFieldFlags {
                field: field.pointer(),
                flags: field_flags,
                message: message.to_string(),
            }
            .into()
        };

        if class.is_interface() {
            if !field_flags.is_public() || !field_flags.is_static() || !field_flags.is_final() {
                return Err(invalid("an interface field must be public, static and final"));
            }
            if field_flags.has_any(
                AccessFlags::PRIVATE
                    | AccessFlags::PROTECTED
                    | AccessFlags::VOLATILE
                    | AccessFlags::TRANSIENT
                    | AccessFlags::ENUM,
            ) {
                return Err(invalid(
                    "an interface field cannot be private, protected, volatile, transient or enum",
                ));
            }
        } else {
            self.check_visibility_exclusion(field_flags).map_err(invalid)?;
            if field_flags.is_volatile() && field_flags.is_final() {
                return Err(invalid("a field cannot be both volatile and final"));
            }
        }

        if field.ty.contains_void() {
            return Err(VerifyError::VoidType {
                class: class.pointer().clone(),
                context: format!("type of field '{}'", field.name),
            }
            .into());
        }
        self.check_type_access(class, &field.ty, "field type")?;
        self.check_annotations(&field.annotations)?;
        Ok(())
    }

    /// At most one of public, private and protected.
    fn check_visibility_exclusion(
        &self,
        member_flags: AccessFlags,
    ) -> std::result::Result<(), &'static str> {
        let count = [
            member_flags.is_public(),
            member_flags.is_private(),
            member_flags.is_protected(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if count > 1 {
            return Err("public, private and protected are mutually exclusive");
        }
        Ok(())
    }

    fn check_methods(&self, class: &ClassModel) -> Result<()> {
        let mut seen = HashSet::new();
        for method in class.methods() {
            self.check_method(class, method)?;
            if !seen.insert((method.name.clone(), method.descriptor())) {
                return Err(FormatError::DuplicateMethod {
                    method: method.pointer(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_method(&self, class: &ClassModel, method: &MethodModel) -> Result<()> {
        if &method.owner != class.pointer() {
            return Err(VerifyError::PointerMismatch {
                pointer: method.owner.clone(),
                message: format!(
                    "method '{}' declares an owner other than its class",
                    method.name
                ),
            }
            .into());
        }
        if !method.is_initializer() && !is_method_name(&method.name) {
            return Err(FormatError::InvalidMemberName {
                class: class.pointer().clone(),
                name: method.name.clone(),
            }
            .into());
        }

        self.check_method_flags(class, method)?;

        let needs_body = !method.flags.is_abstract() && !method.flags.is_native();
        if method.has_body != needs_body {
            return Err(FormatError::MethodBodyMismatch {
                method: method.pointer(),
                has_body: method.has_body,
            }
            .into());
        }

        self.check_initializer(class, method)?;
        self.check_generics(class, &method.generics)?;
        self.check_parameter_names(method)?;

        for (index, parameter) in method.parameter_types.iter().enumerate() {
            if parameter.contains_void() {
                return Err(VerifyError::VoidType {
                    class: class.pointer().clone(),
                    context: format!("parameter {} of method '{}'", index, method.name),
                }
                .into());
            }
            self.check_type_access(class, parameter, "method parameter")?;
        }
        match &method.return_type {
            Type::Void => {}
            ty if ty.contains_void() => {
                return Err(VerifyError::VoidType {
                    class: class.pointer().clone(),
                    context: format!("return type of method '{}'", method.name),
                }
                .into());
            }
            ty => self.check_type_access(class, ty, "method return type")?,
        }
        for exception in &method.exceptions {
            self.check_type_access(class, exception, "throws clause")?;
        }

        if self.accessors.overrides_final_method(method) {
            return Err(VerifyError::FinalMethodOverride {
                method: method.pointer(),
            }
            .into());
        }

        self.check_annotations(&method.annotations)?;
        Ok(())
    }

    fn check_method_flags(&self, class: &ClassModel, method: &MethodModel) -> Result<()> {
        let method_flags = method.flags;
        if method_flags.unknown_bits() != 0 {
            warn!(method = %method.pointer(), bits = format_args!("{:#x}", method_flags.unknown_bits()),
                "ignoring unknown method access-flag bits");
        }
        let invalid = |message: &str| -> Error {
            FormatError::InvalidMethodFlags {
                method: method.pointer(),
                flags: method_flags,
                message: message.to_string(),
            }
            .into()
        };

        self.check_visibility_exclusion(method_flags).map_err(invalid)?;

        if class.is_interface() {
            if method_flags.has_any(
                AccessFlags::PROTECTED
                    | AccessFlags::FINAL
                    | AccessFlags::SYNCHRONIZED
                    | AccessFlags::NATIVE,
            ) {
                return Err(invalid(
                    "an interface method cannot be protected, final, synchronized or native",
                ));
            }
            if method_flags.is_package_private() {
                return Err(invalid("an interface method must be public or private"));
            }
        }
        if method_flags.is_abstract()
            && method_flags.has_any(
                AccessFlags::PRIVATE
                    | AccessFlags::STATIC
                    | AccessFlags::FINAL
                    | AccessFlags::SYNCHRONIZED
                    | AccessFlags::NATIVE,
            )
        {
            return Err(invalid(
                "an abstract method cannot be private, static, final, synchronized or native",
            ));
        }
        Ok(())
    }

    fn check_initializer(&self, class: &ClassModel, method: &MethodModel) -> Result<()> {
        let malformed = |message: &str| -> Error {
            FormatError::MalformedInitializer {
                method: method.pointer(),
                message: message.to_string(),
            }
            .into()
        };
        match method.name.as_str() {
            "<clinit>" => {
                if !method.flags.is_static() {
                    return Err(malformed("a static initializer must be static"));
                }
                if method.return_type != Type::Void {
                    return Err(malformed("a static initializer must return void"));
                }
                if !method.parameter_types.is_empty() {
                    return Err(malformed("a static initializer takes no parameters"));
                }
            }
            "<init>" => {
                if class.is_interface() {
                    return Err(malformed("an interface cannot declare a constructor"));
                }
                if method.return_type != Type::Void {
                    return Err(malformed("a constructor must return void"));
                }
                let allowed = AccessFlags::PUBLIC
                    | AccessFlags::PRIVATE
                    | AccessFlags::PROTECTED
                    | AccessFlags::VARARGS
                    | AccessFlags::SYNTHETIC;
                if method.flags.bits() & 0xFFFF & !allowed.bits() != 0 {
                    return Err(malformed(
                        "a constructor allows only public, private, protected, varargs and synthetic",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn check_parameter_names(&self, method: &MethodModel) -> Result<()> {
        let invalid = |message: String| -> Error {
            VerifyError::InvalidParameterNames {
                method: method.pointer(),
                message,
            }
            .into()
        };
        if method.parameter_names.len() != method.parameter_types.len() {
            return Err(invalid(format!(
                "{} names for {} parameters",
                method.parameter_names.len(),
                method.parameter_types.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &method.parameter_names {
            if !is_unqualified_name(name) {
                return Err(invalid(format!("'{name}' is not a valid parameter name")));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!("duplicate parameter name '{name}'")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ClassPointer, ClassType, FieldModel, MethodModel, NestingInfo, Primitive,
    };

    fn object() -> ClassModel {
        ClassModel::builder("java/lang/Object")
            .flags(AccessFlags::PUBLIC)
            .build()
            .unwrap()
    }

    fn model_with(classes: Vec<ClassModel>) -> Model {
        let mut builder = Model::builder();
        builder.add_class(object()).unwrap();
        for class in classes {
            builder.add_class(class).unwrap();
        }
        builder.build()
    }

    fn method(owner: &str, name: &str, flags: AccessFlags) -> MethodModel {
        MethodModel {
            name: name.to_string(),
            flags,
            return_type: Type::Void,
            parameter_types: Vec::new(),
            parameter_names: Vec::new(),
            generics: Vec::new(),
            exceptions: Vec::new(),
            has_body: !flags.is_abstract() && !flags.is_native(),
            annotation_default: None,
            annotations: Vec::new(),
            owner: ClassPointer::of(owner),
        }
    }

    fn field(owner: &str, name: &str, flags: AccessFlags, ty: Type) -> FieldModel {
        FieldModel {
            name: name.to_string(),
            flags,
            ty,
            constant: None,
            annotations: Vec::new(),
            record_component: None,
            owner: ClassPointer::of(owner),
        }
    }

    #[test]
    fn test_well_formed_model_passes() {
        let model = model_with(vec![ClassModel::builder("com/example/Widget")
            .flags(AccessFlags::PUBLIC)
            .field(field(
                "com/example/Widget",
                "size",
                AccessFlags::PRIVATE,
                Type::Primitive(Primitive::Int),
            ))
            .method(method(
                "com/example/Widget",
                "<init>",
                AccessFlags::PUBLIC,
            ))
            .method(method("com/example/Widget", "run", AccessFlags::PUBLIC))
            .build()
            .unwrap()]);
        assert!(verify_model(&model).is_ok());
    }

    #[test]
    fn test_final_super_class_rejected() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Locked")
                .flags(AccessFlags::PUBLIC | AccessFlags::FINAL)
                .build()
                .unwrap(),
            ClassModel::builder("pkg/Sub")
                .flags(AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Locked")))
                .build()
                .unwrap(),
        ]);
        let verifier = Verifier::new(&model);
        let sub = model.get_class(&ClassPointer::of("pkg/Sub")).unwrap();
        assert!(matches!(
            verifier.verify_class(sub),
            Err(Error::Verify(VerifyError::FinalSuperClass { .. }))
        ));
    }

    #[test]
    fn test_sealing_enforced() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Shape")
                .flags(AccessFlags::PUBLIC)
                .permitted_subclasses(vec![ClassPointer::of("pkg/Circle")])
                .build()
                .unwrap(),
            ClassModel::builder("pkg/Circle")
                .flags(AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Shape")))
                .build()
                .unwrap(),
            ClassModel::builder("pkg/Square")
                .flags(AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Shape")))
                .build()
                .unwrap(),
        ]);
        let verifier = Verifier::new(&model);
        let circle = model.get_class(&ClassPointer::of("pkg/Circle")).unwrap();
        let square = model.get_class(&ClassPointer::of("pkg/Square")).unwrap();
        assert!(verifier.verify_class(circle).is_ok());
        assert!(matches!(
            verifier.verify_class(square),
            Err(Error::Verify(VerifyError::SealedViolation { .. }))
        ));
    }

    #[test]
    fn test_interface_flag_rules() {
        let model = model_with(vec![ClassModel::builder("pkg/Broken")
            .flags(AccessFlags::PUBLIC | AccessFlags::INTERFACE)
            .build()
            .unwrap()]);
        let verifier = Verifier::new(&model);
        let broken = model.get_class(&ClassPointer::of("pkg/Broken")).unwrap();
        // interface without abstract
        assert!(matches!(
            verifier.verify_class(broken),
            Err(Error::Format(FormatError::InvalidClassFlags { .. }))
        ));
    }

    #[test]
    fn test_interface_super_must_be_object() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Base")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            ClassModel::builder("pkg/Iface")
                .flags(AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Base")))
                .build()
                .unwrap(),
        ]);
        let verifier = Verifier::new(&model);
        let iface = model.get_class(&ClassPointer::of("pkg/Iface")).unwrap();
        assert!(matches!(
            verifier.verify_class(iface),
            Err(Error::Verify(VerifyError::InterfaceSuperClass { .. }))
        ));
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let model = model_with(vec![ClassModel::builder("pkg/Twice")
            .flags(AccessFlags::PUBLIC)
            .method(method("pkg/Twice", "run", AccessFlags::PUBLIC))
            .method(method("pkg/Twice", "run", AccessFlags::PRIVATE))
            .build()
            .unwrap()]);
        let verifier = Verifier::new(&model);
        let twice = model.get_class(&ClassPointer::of("pkg/Twice")).unwrap();
        assert!(matches!(
            verifier.verify_class(twice),
            Err(Error::Format(FormatError::DuplicateMethod { .. }))
        ));
    }

    #[test]
    fn test_void_field_rejected() {
        let model = model_with(vec![ClassModel::builder("pkg/Holder")
            .flags(AccessFlags::PUBLIC)
            .field(field(
                "pkg/Holder",
                "nothing",
                AccessFlags::PRIVATE,
                Type::Array(Box::new(Type::Void)),
            ))
            .build()
            .unwrap()]);
        let verifier = Verifier::new(&model);
        let holder = model.get_class(&ClassPointer::of("pkg/Holder")).unwrap();
        assert!(matches!(
            verifier.verify_class(holder),
            Err(Error::Verify(VerifyError::VoidType { .. }))
        ));
    }

    #[test]
    fn test_final_override_rejected() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Base")
                .flags(AccessFlags::PUBLIC)
                .method(method(
                    "pkg/Base",
                    "run",
                    AccessFlags::PUBLIC | AccessFlags::FINAL,
                ))
                .build()
                .unwrap(),
            ClassModel::builder("pkg/Sub")
                .flags(AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Base")))
                .method(method("pkg/Sub", "run", AccessFlags::PUBLIC))
                .build()
                .unwrap(),
        ]);
        let verifier = Verifier::new(&model);
        let sub = model.get_class(&ClassPointer::of("pkg/Sub")).unwrap();
        assert!(matches!(
            verifier.verify_class(sub),
            Err(Error::Verify(VerifyError::FinalMethodOverride { .. }))
        ));
    }

    #[test]
    fn test_inaccessible_private_nested_type() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Outer$Secret")
                .flags(AccessFlags::PUBLIC)
                .nesting(NestingInfo {
                    outer: Some(ClassPointer::of("pkg/Outer")),
                    inner_name: Some("Secret".to_string()),
                    flags: AccessFlags::PRIVATE,
                })
                .build()
                .unwrap(),
            ClassModel::builder("other/User")
                .flags(AccessFlags::PUBLIC)
                .field(field(
                    "other/User",
                    "secret",
                    AccessFlags::PRIVATE,
                    Type::Class(ClassType::raw(ClassPointer::of("pkg/Outer$Secret"))),
                ))
                .build()
                .unwrap(),
        ]);
        let verifier = Verifier::new(&model);
        let user = model.get_class(&ClassPointer::of("other/User")).unwrap();
        assert!(matches!(
            verifier.verify_class(user),
            Err(Error::Verify(VerifyError::InaccessibleType { .. }))
        ));
    }

    #[test]
    fn test_body_presence_mismatch() {
        let mut bodyless = method("pkg/Gap", "run", AccessFlags::PUBLIC);
        bodyless.has_body = false;
        let model = model_with(vec![ClassModel::builder("pkg/Gap")
            .flags(AccessFlags::PUBLIC)
            .method(bodyless)
            .build()
            .unwrap()]);
        let verifier = Verifier::new(&model);
        let gap = model.get_class(&ClassPointer::of("pkg/Gap")).unwrap();
        assert!(matches!(
            verifier.verify_class(gap),
            Err(Error::Format(FormatError::MethodBodyMismatch { .. }))
        ));
    }

    #[test]
    fn test_verify_all_collects_per_class() {
        let model = model_with(vec![
            ClassModel::builder("pkg/Good")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            ClassModel::builder("pkg/BadOne")
                .flags(AccessFlags::PUBLIC | AccessFlags::FINAL | AccessFlags::ABSTRACT)
                .build()
                .unwrap(),
            ClassModel::builder("pkg/BadTwo")
                .flags(AccessFlags::PUBLIC | AccessFlags::INTERFACE)
                .build()
                .unwrap(),
        ]);
        assert!(verify_model(&model).is_err());
        assert_eq!(verify_all(&model).len(), 2);
    }
}
