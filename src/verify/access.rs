//! Access-control, nestmate and override predicates (JVMS 5.4.4, 5.4.5,
//! 4.10.1.5).
//!
//! All predicates resolve through a shared [`Model`]. Classes the model does
//! not contain terminate walks quietly; the verifier only judges what it can
//! see.

use tracing::warn;

use crate::model::{AccessFlags, ClassModel, ClassPointer, MethodModel, Model};
use crate::verify::Hierarchy;

/// Whether a name is a well-formed binary class name: one or more
/// unqualified names joined by `/`.
#[must_use]
pub fn is_binary_name(name: &str) -> bool {
    !name.is_empty() && name.split('/').all(is_unqualified_name)
}

/// Whether a name is a well-formed unqualified name: non-empty and free of
/// `.`, `;`, `[` and `/`.
#[must_use]
pub fn is_unqualified_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['.', ';', '[', '/'])
}

/// Whether a name is a well-formed method name: an unqualified name that
/// additionally avoids `<` and `>`, which are reserved for the initializer
/// names.
#[must_use]
pub fn is_method_name(name: &str) -> bool {
    is_unqualified_name(name) && !name.contains(['<', '>'])
}

/// The package prefix of a binary name, empty for the default package.
#[must_use]
pub fn package_of(binary_name: &str) -> &str {
    match binary_name.rfind('/') {
        Some(index) => &binary_name[..index],
        None => "",
    }
}

/// Access-control predicates evaluated against one model.
///
/// Super-chain walks go through [`Hierarchy`].
pub struct Accessors<'a> {
    model: &'a Model,
    hierarchy: Hierarchy<'a>,
}

impl<'a> Accessors<'a> {
    /// Creates the predicate set over the given model.
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Accessors {
            model,
            hierarchy: Hierarchy::new(model),
        }
    }

    /// The model the predicates resolve through.
    #[must_use]
    pub fn model(&self) -> &Model {
        self.model
    }

    /// Whether two classes live in the same package.
    #[must_use]
    pub fn same_package(&self, a: &ClassModel, b: &ClassModel) -> bool {
        package_of(a.binary_name()) == package_of(b.binary_name())
    }

    /// 5.4.4: whether class `d` can access class `c`.
    #[must_use]
    pub fn can_access_class(&self, d: &ClassModel, c: &ClassModel) -> bool {
        c.flags().is_public() || self.same_package(d, c)
    }

    /// Whether class `d` can use class `c` as a type. On top of the 5.4.4
    /// class rule, a class recorded as a `private` nested declaration is
    /// usable only by its nestmates.
    #[must_use]
    pub fn can_use_type(&self, d: &ClassModel, c: &ClassModel) -> bool {
        if !self.can_access_class(d, c) {
            return false;
        }
        match c.nesting() {
            Some(nesting) if nesting.flags.is_private() => self.is_nestmate(d, c),
            _ => true,
        }
    }

    /// 5.4.4: whether class `d` can access a member with flags `member_flags`
    /// declared in `declaring`.
    #[must_use]
    pub fn can_access_member(
        &self,
        d: &ClassModel,
        declaring: &ClassModel,
        member_flags: AccessFlags,
    ) -> bool {
        if !self.can_access_class(d, declaring) {
            return false;
        }
        if member_flags.is_public() {
            return true;
        }
        if member_flags.is_protected() && self.is_subclass_or_self(d, declaring) {
            return true;
        }
        if (member_flags.is_protected() || member_flags.is_package_private())
            && self.same_package(d, declaring)
        {
            return true;
        }
        if member_flags.is_private() {
            return self.is_nestmate(d, declaring);
        }
        false
    }

    /// 5.4.4 nestmate test: whether `c` and `d` belong to the same nest.
    #[must_use]
    pub fn is_nestmate(&self, d: &ClassModel, c: &ClassModel) -> bool {
        if d.pointer() == c.pointer() {
            return true;
        }
        self.nest_host(d) == self.nest_host(c)
    }

    /// The effective nest host of a class.
    ///
    /// A declared host counts only when it lives in the same package and
    /// lists the class among its nest members; an inconsistent declaration is
    /// tolerated with a warning, and the class falls back to hosting itself.
    #[must_use]
    pub fn nest_host(&self, m: &ClassModel) -> ClassPointer {
        let Some(declared) = m.nest_host() else {
            return m.pointer().clone();
        };
        let Ok(host) = self.model.get_class(declared) else {
            warn!(class = %m.binary_name(), host = %declared.binary_name(),
                "declared nest host is not in the model");
            return m.pointer().clone();
        };
        if !self.same_package(m, host) {
            warn!(class = %m.binary_name(), host = %host.binary_name(),
                "declared nest host is in a different package");
            return m.pointer().clone();
        }
        if !host.nest_members().contains(m.pointer()) {
            warn!(class = %m.binary_name(), host = %host.binary_name(),
                "declared nest host does not list the class as a member");
            return m.pointer().clone();
        }
        host.pointer().clone()
    }

    /// Whether `d` is `c` or one of its subclasses.
    #[must_use]
    pub fn is_subclass_or_self(&self, d: &ClassModel, c: &ClassModel) -> bool {
        d.pointer() == c.pointer() || self.hierarchy.does_extend(d.pointer(), c.pointer())
    }

    /// 5.4.5: whether `m_c`, declared in a subclass, can override `m_a`,
    /// declared in an ancestor.
    #[must_use]
    pub fn can_override(&self, m_c: &MethodModel, m_a: &MethodModel) -> bool {
        if m_c.name != m_a.name || m_c.descriptor() != m_a.descriptor() {
            return false;
        }
        if m_c.flags.is_private() {
            return false;
        }
        if m_a.flags.is_public() || m_a.flags.is_protected() {
            return true;
        }
        if !m_a.flags.is_package_private() {
            return false;
        }
        let (Ok(c), Ok(a)) = (
            self.model.get_class(&m_c.owner),
            self.model.get_class(&m_a.owner),
        ) else {
            return false;
        };
        self.same_package(c, a)
    }

    /// 4.10.1.5: whether the method overrides a `final` method declared in an
    /// ancestor class.
    ///
    /// Private and static methods never override. The walk skips past
    /// same-signature ancestor members that are themselves private or static,
    /// and stops at the first selectable match: final there is a violation,
    /// non-final is a legal override.
    #[must_use]
    pub fn overrides_final_method(&self, method: &MethodModel) -> bool {
        if method.flags.is_private() || method.flags.is_static() {
            return false;
        }
        let descriptor = method.descriptor();

        for pointer in self.hierarchy.super_chain(&method.owner) {
            let Ok(ancestor) = self.model.get_class(&pointer) else {
                break;
            };
            if let Some(candidate) = ancestor.find_method(&method.name, &descriptor) {
                if candidate.flags.is_private() || candidate.flags.is_static() {
                    continue;
                }
                return candidate.flags.is_final();
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassType, Model, Type};

    fn method(owner: &str, name: &str, flags: AccessFlags) -> MethodModel {
        MethodModel {
            name: name.to_string(),
            flags,
            return_type: Type::Void,
            parameter_types: Vec::new(),
            parameter_names: Vec::new(),
            generics: Vec::new(),
            exceptions: Vec::new(),
            has_body: !flags.is_abstract(),
            annotation_default: None,
            annotations: Vec::new(),
            owner: ClassPointer::of(owner),
        }
    }

    fn model_with(classes: Vec<ClassModel>) -> Model {
        let mut builder = Model::builder();
        for class in classes {
            builder.add_class(class).unwrap();
        }
        builder.build()
    }

    fn class(name: &str, flags: AccessFlags) -> crate::model::ClassModelBuilder {
        ClassModel::builder(name).flags(flags)
    }

    #[test]
    fn test_name_predicates() {
        assert!(is_binary_name("java/lang/Object"));
        assert!(is_binary_name("Single"));
        assert!(!is_binary_name(""));
        assert!(!is_binary_name("java//lang"));
        assert!(!is_binary_name("java.lang.Object"));
        assert!(is_unqualified_name("value"));
        assert!(!is_unqualified_name("a;b"));
        assert!(is_method_name("toString"));
        assert!(!is_method_name("<init>"));
    }

    #[test]
    fn test_package_access() {
        let model = model_with(vec![
            ClassModel::builder("java/lang/Object")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            class("pkg/Hidden", AccessFlags::empty()).build().unwrap(),
            class("pkg/Friend", AccessFlags::empty()).build().unwrap(),
            class("other/Stranger", AccessFlags::PUBLIC).build().unwrap(),
        ]);
        let accessors = Accessors::new(&model);
        let hidden = model.get_class(&ClassPointer::of("pkg/Hidden")).unwrap();
        let friend = model.get_class(&ClassPointer::of("pkg/Friend")).unwrap();
        let stranger = model.get_class(&ClassPointer::of("other/Stranger")).unwrap();

        assert!(accessors.can_access_class(friend, hidden));
        assert!(!accessors.can_access_class(stranger, hidden));
        assert!(accessors.can_access_class(hidden, stranger));
    }

    #[test]
    fn test_member_access_rules() {
        let model = model_with(vec![
            ClassModel::builder("java/lang/Object")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            class("pkg/Base", AccessFlags::PUBLIC).build().unwrap(),
            class("pkg/Peer", AccessFlags::PUBLIC).build().unwrap(),
            class("other/Sub", AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Base")))
                .build()
                .unwrap(),
            class("other/Unrelated", AccessFlags::PUBLIC).build().unwrap(),
        ]);
        let accessors = Accessors::new(&model);
        let base = model.get_class(&ClassPointer::of("pkg/Base")).unwrap();
        let peer = model.get_class(&ClassPointer::of("pkg/Peer")).unwrap();
        let sub = model.get_class(&ClassPointer::of("other/Sub")).unwrap();
        let unrelated = model.get_class(&ClassPointer::of("other/Unrelated")).unwrap();

        // protected: subclass or same package
        assert!(accessors.can_access_member(sub, base, AccessFlags::PROTECTED));
        assert!(accessors.can_access_member(peer, base, AccessFlags::PROTECTED));
        assert!(!accessors.can_access_member(unrelated, base, AccessFlags::PROTECTED));

        // package-private: same package only
        assert!(accessors.can_access_member(peer, base, AccessFlags::empty()));
        assert!(!accessors.can_access_member(sub, base, AccessFlags::empty()));

        // private: nestmates only
        assert!(!accessors.can_access_member(peer, base, AccessFlags::PRIVATE));
        assert!(accessors.can_access_member(base, base, AccessFlags::PRIVATE));
    }

    #[test]
    fn test_nest_host_fallback() {
        let model = model_with(vec![
            ClassModel::builder("java/lang/Object")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            class("pkg/Host", AccessFlags::PUBLIC)
                .nest_members(vec![ClassPointer::of("pkg/Member")])
                .build()
                .unwrap(),
            class("pkg/Member", AccessFlags::PUBLIC)
                .nest_host(ClassPointer::of("pkg/Host"))
                .build()
                .unwrap(),
            class("pkg/Impostor", AccessFlags::PUBLIC)
                .nest_host(ClassPointer::of("pkg/Host"))
                .build()
                .unwrap(),
        ]);
        let accessors = Accessors::new(&model);
        let host = model.get_class(&ClassPointer::of("pkg/Host")).unwrap();
        let member = model.get_class(&ClassPointer::of("pkg/Member")).unwrap();
        let impostor = model.get_class(&ClassPointer::of("pkg/Impostor")).unwrap();

        assert_eq!(accessors.nest_host(member), *host.pointer());
        // not listed by the host, falls back to itself
        assert_eq!(accessors.nest_host(impostor), *impostor.pointer());
        assert!(accessors.is_nestmate(member, host));
        assert!(!accessors.is_nestmate(impostor, host));
    }

    #[test]
    fn test_override_eligibility() {
        let model = model_with(vec![
            ClassModel::builder("java/lang/Object")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            class("pkg/Base", AccessFlags::PUBLIC).build().unwrap(),
            class("pkg/Sub", AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Base")))
                .build()
                .unwrap(),
            class("other/Far", AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Base")))
                .build()
                .unwrap(),
        ]);
        let accessors = Accessors::new(&model);

        let base_public = method("pkg/Base", "run", AccessFlags::PUBLIC);
        let base_package = method("pkg/Base", "run", AccessFlags::empty());
        let sub = method("pkg/Sub", "run", AccessFlags::PUBLIC);
        let sub_private = method("pkg/Sub", "run", AccessFlags::PRIVATE);
        let far = method("other/Far", "run", AccessFlags::PUBLIC);

        assert!(accessors.can_override(&sub, &base_public));
        assert!(!accessors.can_override(&sub_private, &base_public));
        // package-private member, same package only
        assert!(accessors.can_override(&sub, &base_package));
        assert!(!accessors.can_override(&far, &base_package));
    }

    #[test]
    fn test_final_override_walk() {
        let model = model_with(vec![
            ClassModel::builder("java/lang/Object")
                .flags(AccessFlags::PUBLIC)
                .build()
                .unwrap(),
            class("pkg/Root", AccessFlags::PUBLIC)
                .method(method("pkg/Root", "run", AccessFlags::PUBLIC | AccessFlags::FINAL))
                .build()
                .unwrap(),
            // declares a private method of the same signature; the walk must
            // skip past it and still find the final root method
            class("pkg/Mid", AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Root")))
                .method(method("pkg/Mid", "run", AccessFlags::PRIVATE))
                .build()
                .unwrap(),
            class("pkg/Leaf", AccessFlags::PUBLIC)
                .super_class(ClassType::raw(ClassPointer::of("pkg/Mid")))
                .build()
                .unwrap(),
        ]);
        let accessors = Accessors::new(&model);

        let leaf_method = method("pkg/Leaf", "run", AccessFlags::PUBLIC);
        assert!(accessors.overrides_final_method(&leaf_method));

        let leaf_static = method("pkg/Leaf", "run", AccessFlags::PUBLIC | AccessFlags::STATIC);
        assert!(!accessors.overrides_final_method(&leaf_static));

        let other = method("pkg/Leaf", "walk", AccessFlags::PUBLIC);
        assert!(!accessors.overrides_final_method(&other));
    }
}
