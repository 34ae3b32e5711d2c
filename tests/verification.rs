//! Full-pipeline verification: raw classes are linked and the resulting
//! model is checked against the class-file legality rules.

use classlink::loader::{decode_all, Linker, MethodStub, RawClass, RawInnerClass};
use classlink::model::{AccessFlags, ClassPointer, LoadSource, Model};
use classlink::verify::{verify_all, verify_model, Verifier};
use classlink::{Error, FormatError, VerifyError};

fn raw(name: &str) -> RawClass {
    RawClass {
        name: name.to_string(),
        version: u32::from(classlink::model::flags::JAVA_17),
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
        source: LoadSource::of("app.jar"),
    }
}

fn object_raw() -> RawClass {
    let mut object = raw("java/lang/Object");
    object.super_name = None;
    object
}

fn method(name: &str, descriptor: &str, flags: AccessFlags) -> MethodStub {
    MethodStub {
        name: name.to_string(),
        flags,
        descriptor: descriptor.to_string(),
        signature: None,
        exceptions: Vec::new(),
        parameter_names: None,
        has_body: !flags.contains(AccessFlags::ABSTRACT) && !flags.contains(AccessFlags::NATIVE),
        annotation_default: None,
        annotations: Vec::new(),
    }
}

fn link(raw_classes: Vec<RawClass>) -> classlink::Result<Model> {
    let batch = decode_all(raw_classes, Ok)?;
    Linker::new(&Model::empty()).link(&batch)
}

#[test]
fn test_plain_hierarchy_verifies() {
    let mut animal = raw("zoo/Animal");
    animal
        .methods
        .push(method("speak", "()V", AccessFlags::PUBLIC));
    let mut dog = raw("zoo/Dog");
    dog.super_name = Some("zoo/Animal".to_string());
    dog.methods
        .push(method("speak", "()V", AccessFlags::PUBLIC));
    let model = link(vec![object_raw(), animal, dog]).unwrap();
    assert!(verify_model(&model).is_ok());
}

#[test]
fn test_final_override_detected_through_pipeline() {
    let mut animal = raw("zoo/Animal");
    animal.methods.push(method(
        "speak",
        "()V",
        AccessFlags::PUBLIC | AccessFlags::FINAL,
    ));
    let mut dog = raw("zoo/Dog");
    dog.super_name = Some("zoo/Animal".to_string());
    dog.methods
        .push(method("speak", "()V", AccessFlags::PUBLIC));
    let model = link(vec![object_raw(), animal, dog]).unwrap();
    assert!(matches!(
        verify_model(&model),
        Err(Error::Verify(VerifyError::FinalMethodOverride { .. }))
    ));
}

#[test]
fn test_sealed_hierarchy_through_pipeline() {
    let mut shape = raw("geo/Shape");
    shape.permitted_subclasses = Some(vec!["geo/Circle".to_string()]);
    let mut circle = raw("geo/Circle");
    circle.super_name = Some("geo/Shape".to_string());
    let mut square = raw("geo/Square");
    square.super_name = Some("geo/Shape".to_string());

    let legal = link(vec![object_raw(), shape.clone(), circle]).unwrap();
    assert!(verify_model(&legal).is_ok());

    let illegal = link(vec![object_raw(), shape, square]).unwrap();
    assert!(matches!(
        verify_model(&illegal),
        Err(Error::Verify(VerifyError::SealedViolation { .. }))
    ));
}

#[test]
fn test_private_nested_type_usable_by_nestmates_only() {
    let entry = RawInnerClass {
        name: "app/Outer$Secret".to_string(),
        outer_name: Some("app/Outer".to_string()),
        inner_name: Some("Secret".to_string()),
        flags: AccessFlags::PRIVATE,
    };
    let mut outer = raw("app/Outer");
    outer.inner_classes = vec![entry.clone()];
    outer.nest_members = vec!["app/Outer$Secret".to_string()];
    let mut secret = raw("app/Outer$Secret");
    secret.inner_classes = vec![entry];
    secret.nest_host = Some("app/Outer".to_string());
    // a nestmate holding a field of the private nested type is fine
    let mut outer_with_field = outer.clone();
    outer_with_field.fields.push(classlink::loader::FieldStub {
        name: "secret".to_string(),
        flags: AccessFlags::PRIVATE,
        descriptor: "Lapp/Outer$Secret;".to_string(),
        signature: None,
        constant: None,
        annotations: Vec::new(),
        record_component: None,
    });

    let model = link(vec![object_raw(), outer_with_field, secret.clone()]).unwrap();
    assert!(verify_model(&model).is_ok());

    // an outsider holding the same field is not
    let mut outsider = raw("other/User");
    outsider.fields.push(classlink::loader::FieldStub {
        name: "secret".to_string(),
        flags: AccessFlags::PRIVATE,
        descriptor: "Lapp/Outer$Secret;".to_string(),
        signature: None,
        constant: None,
        annotations: Vec::new(),
        record_component: None,
    });
    let model = link(vec![object_raw(), outer, secret, outsider]).unwrap();
    let verifier = Verifier::new(&model);
    let user = model.get_class(&ClassPointer::of("other/User")).unwrap();
    assert!(matches!(
        verifier.verify_class(user),
        Err(Error::Verify(VerifyError::InaccessibleType { .. }))
    ));
}

#[test]
fn test_unsupported_version_rejected() {
    let mut relic = raw("old/Relic");
    relic.version = 44; // predates Java 1.1
    let model = link(vec![object_raw(), relic]).unwrap();
    assert!(matches!(
        verify_model(&model),
        Err(Error::Format(FormatError::UnsupportedVersion { major: 44, .. }))
    ));
}

#[test]
fn test_inner_class_mismatch_detected() {
    // Outer records "Inner" but the linked class calls itself "Renamed"
    let mut outer = raw("app/Outer");
    outer.inner_classes = vec![RawInnerClass {
        name: "app/Outer$Inner".to_string(),
        outer_name: Some("app/Outer".to_string()),
        inner_name: Some("Inner".to_string()),
        flags: AccessFlags::PUBLIC,
    }];
    let mut inner = raw("app/Outer$Inner");
    inner.inner_classes = vec![RawInnerClass {
        name: "app/Outer$Inner".to_string(),
        outer_name: Some("app/Outer".to_string()),
        inner_name: Some("Renamed".to_string()),
        flags: AccessFlags::PUBLIC,
    }];
    let model = link(vec![object_raw(), outer, inner]).unwrap();
    let verifier = Verifier::new(&model);
    let outer = model.get_class(&ClassPointer::of("app/Outer")).unwrap();
    assert!(matches!(
        verifier.verify_class(outer),
        Err(Error::Verify(VerifyError::InnerClassMismatch { .. }))
    ));
}

#[test]
fn test_interface_members_checked() {
    let mut iface = raw("app/Service");
    iface.flags = AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT;
    iface.methods.push(method(
        "run",
        "()V",
        AccessFlags::PUBLIC | AccessFlags::ABSTRACT,
    ));
    let model = link(vec![object_raw(), iface.clone()]).unwrap();
    assert!(verify_model(&model).is_ok());

    // a protected interface method is illegal
    let mut broken = iface;
    broken.name = "app/Broken".to_string();
    broken.methods.push(method(
        "stop",
        "()V",
        AccessFlags::PROTECTED | AccessFlags::ABSTRACT,
    ));
    let model = link(vec![object_raw(), broken]).unwrap();
    assert!(matches!(
        verify_model(&model),
        Err(Error::Format(FormatError::InvalidMethodFlags { .. }))
    ));
}

#[test]
fn test_bounded_overloads_stay_distinct() {
    // erased descriptors differ, so these are legal overloads and must not
    // collapse into a duplicate pair
    let mut printer = raw("app/Printer");
    printer
        .methods
        .push(method("print", "(Ljava/lang/Object;)V", AccessFlags::PUBLIC));
    let mut bounded = method("print", "(Ljava/lang/Number;)V", AccessFlags::PUBLIC);
    bounded.signature = Some("<T:Ljava/lang/Number;>(TT;)V".to_string());
    printer.methods.push(bounded);
    let model = link(vec![object_raw(), printer]).unwrap();
    assert!(verify_model(&model).is_ok());
}

#[test]
fn test_verification_is_idempotent() {
    let mut animal = raw("zoo/Animal");
    animal
        .methods
        .push(method("speak", "()V", AccessFlags::PUBLIC));
    let model = link(vec![object_raw(), animal]).unwrap();
    assert!(verify_model(&model).is_ok());
    assert!(verify_model(&model).is_ok());
}

#[test]
fn test_verify_all_reports_every_failing_class() {
    let mut relic = raw("old/Relic");
    relic.version = 1;
    let mut sealed_shut = raw("app/Shut");
    sealed_shut.flags = AccessFlags::PUBLIC | AccessFlags::FINAL;
    sealed_shut.permitted_subclasses = Some(vec!["app/Shut".to_string()]);
    let model = link(vec![object_raw(), raw("app/Fine"), relic, sealed_shut]).unwrap();
    let failures = verify_all(&model);
    assert_eq!(failures.len(), 2);
}
