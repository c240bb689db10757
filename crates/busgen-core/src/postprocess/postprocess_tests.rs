#![allow(non_snake_case)]

use super::*;
use crate::model::{Annotation, Method, Property, PropertyAccess, Signal};

fn frobber() -> Interface {
    Interface::new("org.project.Bar.Frobber")
        .with_method(
            Method::new("HelloWorld")
                .with_in_arg(Arg::new("greeting", "s"))
                .with_in_arg(Arg::anonymous("as"))
                .with_out_arg(Arg::anonymous("a{sv}")),
        )
        .with_signal(Signal::new("TestSignal").with_arg(Arg::anonymous("i")))
        .with_property(Property::new("FinallyNormalName", "s", PropertyAccess::ReadWrite))
}

#[test]
fn process_interface___strips_prefix_and_applies_namespace() {
    let mut iface = frobber();

    process_interface(&mut iface, "org.project.", "Foo");

    assert_eq!(iface.naming.name_without_prefix, "Bar.Frobber");
    assert_eq!(iface.naming.camel_name, "FooBarFrobber");
    assert_eq!(iface.naming.name_lower, "foo_bar_frobber");
    assert_eq!(iface.naming.name_upper, "BAR_FROBBER");
    assert_eq!(iface.naming.ns_lower, "foo_");
    assert_eq!(iface.naming.ns_upper, "FOO_");
}

#[test]
fn process_interface___no_namespace___leaves_namespace_empty() {
    let mut iface = frobber();

    process_interface(&mut iface, "org.project.", "");

    assert_eq!(iface.naming.camel_name, "BarFrobber");
    assert_eq!(iface.naming.name_lower, "bar_frobber");
    assert!(iface.naming.ns_lower.is_empty());
    assert!(iface.naming.ns_upper.is_empty());
}

#[test]
fn process_interface___name_equal_to_prefix___processed_with_empty_names() {
    let mut iface = Interface::new("org.project.");

    process_interface(&mut iface, "org.project.", "");

    assert!(iface.naming.processed);
    assert!(iface.naming.name_without_prefix.is_empty());
    assert!(iface.naming.camel_name.is_empty());
}

#[test]
fn process_interface___prefix_not_matching___keeps_full_name() {
    let mut iface = frobber();

    process_interface(&mut iface, "com.other.", "");

    assert_eq!(iface.naming.name_without_prefix, "org.project.Bar.Frobber");
}

#[test]
fn process_interface___underscore_namespace___used_verbatim() {
    let mut iface = frobber();

    process_interface(&mut iface, "org.project.", "my_app");

    assert_eq!(iface.naming.camel_name, "myappBarFrobber");
    assert_eq!(iface.naming.ns_lower, "my_app_");
    assert_eq!(iface.naming.ns_upper, "MY_APP_");
}

#[test]
fn process_interface___c_name_annotation___overrides_name() {
    let mut iface = frobber().with_annotation(Annotation::new(C_NAME, "Gadget"));

    process_interface(&mut iface, "org.project.", "Foo");

    assert_eq!(iface.naming.camel_name, "FooGadget");
    assert_eq!(iface.naming.name_lower, "foo_gadget");
}

#[test]
fn process_interface___ugly_case_c_name___used_verbatim() {
    let mut iface = frobber().with_annotation(Annotation::new(C_NAME, "my_gadget"));

    process_interface(&mut iface, "org.project.", "Foo");

    assert_eq!(iface.naming.camel_name, "Foomygadget");
    assert_eq!(iface.naming.name_lower, "foo_my_gadget");
    assert_eq!(iface.naming.name_upper, "MY_GADGET");
}

#[test]
fn process_interface___later_annotation___wins() {
    let mut iface = frobber().with_annotation(Annotation::new(C_NAME, "FromXml"));
    iface.annotate(Annotation::new(C_NAME, "FromCommandLine"));

    process_interface(&mut iface, "", "");

    assert_eq!(iface.naming.camel_name, "FromCommandLine");
}

#[test]
fn process_interface___members_get_lower_and_hyphen_names() {
    let mut iface = frobber();

    process_interface(&mut iface, "org.project.", "Foo");

    assert_eq!(iface.methods[0].naming.name_lower, "hello_world");
    assert_eq!(iface.methods[0].naming.name_hyphen, "hello-world");
    assert_eq!(iface.signals[0].naming.name_lower, "test_signal");
    assert_eq!(iface.properties[0].naming.name_hyphen, "finally-normal-name");
}

#[test]
fn process_interface___member_c_name___overrides() {
    let mut iface = frobber();
    iface.methods[0].annotate(Annotation::new(C_NAME, "SayHello"));

    process_interface(&mut iface, "", "");

    assert_eq!(iface.methods[0].naming.name_lower, "say_hello");
}

#[test]
fn process_interface___anonymous_args___numbered_across_in_and_out() {
    let mut iface = frobber();

    process_interface(&mut iface, "", "");

    let method = &iface.methods[0];
    assert_eq!(method.in_args[0].c_name, "greeting");
    assert_eq!(method.in_args[1].c_name, "arg_1");
    assert_eq!(method.out_args[0].c_name, "arg_2");
    assert_eq!(iface.signals[0].args[0].c_name, "arg_0");
}

#[test]
fn process_interface___args_and_properties_get_c_types() {
    let mut iface = frobber();

    process_interface(&mut iface, "", "");

    let method = &iface.methods[0];
    assert_eq!(method.in_args[0].ctype.ctype_in, "const gchar *");
    assert_eq!(method.in_args[1].ctype.ctype_in, "const gchar *const *");
    assert!(method.out_args[0].ctype.gvariant);
    assert_eq!(iface.properties[0].ctype.ctype_out, "gchar **");
}

#[test]
fn process_interface___force_gvariant___on_arg() {
    let mut iface = frobber();
    iface.methods[0].in_args[0].annotate(Annotation::new(FORCE_GVARIANT, "true"));

    process_interface(&mut iface, "", "");

    assert_eq!(iface.methods[0].in_args[0].ctype.ctype_in, "GVariant *");
}

#[test]
fn process_interface___deprecated_interface___marks_members() {
    let mut iface = frobber().with_annotation(Annotation::new(DEPRECATED, "true"));

    process_interface(&mut iface, "", "");

    assert!(iface.naming.deprecated);
    assert!(iface.methods[0].naming.deprecated);
    assert!(iface.properties[0].naming.deprecated);
}

#[test]
fn process_interface___deprecated_false___not_deprecated() {
    let mut iface = frobber();
    iface.signals[0].annotate(Annotation::new(DEPRECATED, "false"));

    process_interface(&mut iface, "", "");

    assert!(!iface.signals[0].naming.deprecated);
}

#[test]
fn process_interface___since_inherited_from_interface() {
    let mut iface = frobber().with_annotation(Annotation::new(SINCE, "2.30"));
    iface.methods[0].annotate(Annotation::new(SINCE, "2.32"));

    process_interface(&mut iface, "", "");

    assert_eq!(iface.naming.since, "2.30");
    assert_eq!(iface.methods[0].naming.since, "2.32");
    assert_eq!(iface.signals[0].naming.since, "2.30");
}

#[test]
fn process_interface___doc_string___copied() {
    let mut iface = frobber().with_annotation(Annotation::new(DOC_STRING, "Frobs things."));

    process_interface(&mut iface, "", "");

    assert_eq!(iface.naming.doc_string, "Frobs things.");
    assert!(iface.methods[0].naming.doc_string.is_empty());
}

#[test]
fn process_interface___twice___same_result() {
    let mut first = frobber();
    let mut second = frobber();

    process_interface(&mut first, "org.project.", "Foo");
    process_interface(&mut second, "org.project.", "Foo");
    process_interface(&mut second, "org.project.", "Foo");

    assert_eq!(first, second);
}
