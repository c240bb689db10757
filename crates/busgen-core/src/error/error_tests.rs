#![allow(non_snake_case)]

use super::*;

#[test]
fn ResolveError___no_interface___names_expression_and_interface() {
    let err = ResolveError::NoInterface {
        expression: "org.Missing".to_string(),
        interface: "org.Missing".to_string(),
    };

    assert_eq!(
        err.to_string(),
        "annotation target `org.Missing`: no interface org.Missing"
    );
}

#[test]
fn ResolveError___no_method_arg___displays_all_fields() {
    let err = ResolveError::NoMethodArg {
        expression: "org.X.Foo.Do()[nope]".to_string(),
        interface: "org.X.Foo".to_string(),
        method: "Do".to_string(),
        arg: "nope".to_string(),
    };

    let msg = err.to_string();
    assert!(msg.contains("`org.X.Foo.Do()[nope]`"));
    assert!(msg.contains("no arg nope on method Do on interface org.X.Foo"));
}

#[test]
fn ResolveError___expression___returned_for_every_variant() {
    let err = ResolveError::NoSignal {
        expression: "org.X.Foo::Gone".to_string(),
        interface: "org.X.Foo".to_string(),
        signal: "Gone".to_string(),
    };

    assert_eq!(err.expression(), "org.X.Foo::Gone");
}

#[test]
fn CodegenError___resolve___is_transparent() {
    let err: CodegenError = ResolveError::NoProperty {
        expression: "org.X.Foo:Bar".to_string(),
        interface: "org.X.Foo".to_string(),
        property: "Bar".to_string(),
    }
    .into();

    assert_eq!(
        err.to_string(),
        "annotation target `org.X.Foo:Bar`: no property Bar on interface org.X.Foo"
    );
}

#[test]
fn CodegenError___read___includes_path_and_cause() {
    let err = CodegenError::Read {
        path: PathBuf::from("/nonexistent/iface.xml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };

    let msg = err.to_string();
    assert!(msg.contains("/nonexistent/iface.xml"));
    assert!(msg.contains("file not found"));
    assert!(err.is_input_error());
    assert!(!err.is_emission_error());
}

#[test]
fn CodegenError___write___is_emission_error() {
    let err = CodegenError::Write {
        path: PathBuf::from("out/gen.h"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(err.is_emission_error());
    assert!(!err.is_input_error());
}

#[test]
fn CodegenError___from_toml_error___becomes_config_error() {
    let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();

    let err: CodegenError = toml_err.into();

    assert!(matches!(err, CodegenError::Config(_)));
}
