//! Name normalization after annotations are applied
//!
//! Fills the derived naming fields of every node from its D-Bus name, the
//! configured interface prefix and C namespace, and a handful of well-known
//! annotations. Annotation lookups are first-match, so command-line
//! annotations override the ones in the introspection data.

use crate::model::{Annotated, Arg, Interface, InterfaceNaming, MemberNaming};
use crate::naming::{camel_case_to_uscore, is_ugly_case, strip_dots, to_hyphen};
use crate::signature::CType;
use tracing::debug;

/// Overrides the name used to derive C identifiers
pub const C_NAME: &str = "org.gtk.GDBus.C.Name";
/// Marks a node deprecated when set to `true`
pub const DEPRECATED: &str = "org.freedesktop.DBus.Deprecated";
/// Version the node first appeared in
pub const SINCE: &str = "org.gtk.GDBus.Since";
/// Documentation text for the node
pub const DOC_STRING: &str = "org.gtk.GDBus.DocString";
/// Pass an arg or property as `GVariant` regardless of its signature
pub const FORCE_GVARIANT: &str = "org.gtk.GDBus.C.ForceGVariant";

/// C namespace in its three spellings
struct Namespace {
    camel: String,
    upper: String,
    lower: String,
}

impl Namespace {
    fn new(c_namespace: &str) -> Self {
        if c_namespace.is_empty() {
            return Self {
                camel: String::new(),
                upper: String::new(),
                lower: String::new(),
            };
        }

        if is_ugly_case(c_namespace) {
            Self {
                camel: c_namespace.replace('_', ""),
                upper: format!("{}_", c_namespace.to_uppercase()),
                lower: format!("{}_", c_namespace.to_lowercase()),
            }
        } else {
            let uscore = camel_case_to_uscore(c_namespace);
            Self {
                camel: c_namespace.to_string(),
                upper: format!("{}_", uscore.to_uppercase()),
                lower: format!("{}_", uscore.to_lowercase()),
            }
        }
    }
}

/// Derive C names and documentation fields for an interface and all its members.
///
/// Never fails: nodes without usable annotations get names derived from
/// their D-Bus names.
pub fn process_interface(iface: &mut Interface, interface_prefix: &str, c_namespace: &str) {
    let ns = Namespace::new(c_namespace);
    iface.naming = interface_naming(iface, interface_prefix, &ns);

    let parent = iface.naming.clone();

    for method in &mut iface.methods {
        method.naming = member_naming(&method.name, &*method, &parent);
        let in_count = method.in_args.len();
        for (n, arg) in method.in_args.iter_mut().enumerate() {
            process_arg(arg, n);
        }
        for (n, arg) in method.out_args.iter_mut().enumerate() {
            process_arg(arg, in_count + n);
        }
    }

    for signal in &mut iface.signals {
        signal.naming = member_naming(&signal.name, &*signal, &parent);
        for (n, arg) in signal.args.iter_mut().enumerate() {
            process_arg(arg, n);
        }
    }

    for property in &mut iface.properties {
        property.naming = member_naming(&property.name, &*property, &parent);
        let force = property.lookup_annotation(FORCE_GVARIANT).is_some();
        property.ctype = CType::from_signature(&property.signature, force);
    }

    debug!(
        interface = %iface.name,
        camel_name = %iface.naming.camel_name,
        name_lower = %iface.naming.name_lower,
        "post-processed interface"
    );
}

fn interface_naming(iface: &Interface, interface_prefix: &str, ns: &Namespace) -> InterfaceNaming {
    let mut naming = InterfaceNaming {
        processed: true,
        ns_lower: ns.lower.clone(),
        ns_upper: ns.upper.clone(),
        deprecated: iface.lookup_annotation(DEPRECATED) == Some("true"),
        since: iface.lookup_annotation(SINCE).unwrap_or_default().to_string(),
        doc_string: iface.lookup_annotation(DOC_STRING).unwrap_or_default().to_string(),
        ..InterfaceNaming::default()
    };

    match iface.lookup_annotation(C_NAME) {
        Some(overridden) if is_ugly_case(overridden) => {
            let name = overridden.replace('_', "");
            naming.camel_name = format!("{}{}", ns.camel, name);
            naming.name_without_prefix = name;
            naming.name_lower = format!("{}{}", ns.lower, overridden.to_lowercase());
            naming.name_upper = overridden.to_uppercase();
        }
        overridden => {
            let name = overridden.unwrap_or_else(|| {
                iface
                    .name
                    .strip_prefix(interface_prefix)
                    .unwrap_or(iface.name.as_str())
            });
            let stripped = strip_dots(name);
            let uscore = camel_case_to_uscore(&stripped);

            naming.name_without_prefix = name.to_string();
            naming.camel_name = strip_dots(&format!("{}.{}", ns.camel, stripped));
            naming.name_lower = format!("{}{}", ns.lower, uscore);
            naming.name_upper = uscore.to_uppercase();
        }
    }

    naming
}

fn member_naming(name: &str, node: &dyn Annotated, parent: &InterfaceNaming) -> MemberNaming {
    let name_lower = match node.lookup_annotation(C_NAME) {
        Some(overridden) if is_ugly_case(overridden) => overridden.to_lowercase(),
        overridden => camel_case_to_uscore(overridden.unwrap_or(name))
            .to_lowercase()
            .replace('-', "_"),
    };

    let since = match node.lookup_annotation(SINCE) {
        Some(since) => since.to_string(),
        None => parent.since.clone(),
    };

    MemberNaming {
        name_hyphen: to_hyphen(&name_lower),
        name_lower,
        deprecated: parent.deprecated || node.lookup_annotation(DEPRECATED) == Some("true"),
        since,
        doc_string: node
            .lookup_annotation(DOC_STRING)
            .unwrap_or_default()
            .to_string(),
    }
}

fn process_arg(arg: &mut Arg, position: usize) {
    arg.c_name = match &arg.name {
        Some(name) => name.clone(),
        None => format!("arg_{position}"),
    };
    let force = arg.lookup_annotation(FORCE_GVARIANT).is_some();
    arg.ctype = CType::from_signature(&arg.signature, force);
}

#[cfg(test)]
#[path = "postprocess/postprocess_tests.rs"]
mod postprocess_tests;
