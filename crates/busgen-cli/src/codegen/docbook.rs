//! DocBook reference pages, one `refentry` per interface

use super::{post_processed, write_artifact};
use busgen_core::{
    Arg, CodegenError, CodegenResult, Emitter, GeneratorConfig, Interface, MemberNaming,
    PropertyAccess,
};
use quick_xml::escape::escape;
use tracing::debug;

const DOCTYPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE refentry PUBLIC "-//OASIS//DTD DocBook XML V4.1.2//EN"
               "http://www.oasis-open.org/docbook/xml/4.1.2/docbookx.dtd" [
]>
"#;

/// Writes `OUTBASE-<interface>.xml` from `--generate-docbook OUTBASE`
#[derive(Debug, Default, Clone, Copy)]
pub struct DocbookEmitter;

impl DocbookEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Render the reference page for one interface.
    pub fn render(&self, iface: &Interface) -> String {
        let name = escape(&iface.name);
        let mut out = String::new();

        out.push_str(DOCTYPE);
        out.push_str(&format!("<refentry id=\"gdbus-{name}\">\n"));
        out.push_str("  <refmeta>\n");
        out.push_str(&format!(
            "    <refentrytitle role=\"top_of_page\" id=\"gdbus-interface-{name}.top_of_page\">{name}</refentrytitle>\n"
        ));
        out.push_str("  </refmeta>\n");
        out.push_str("  <refnamediv>\n");
        out.push_str(&format!("    <refname>{name}</refname>\n"));
        out.push_str(&format!(
            "    <refpurpose>{}</refpurpose>\n",
            escape(first_sentence(&iface.naming.doc_string))
        ));
        out.push_str("  </refnamediv>\n");

        synopses(&mut out, iface);
        description(&mut out, iface);
        details(&mut out, iface);

        out.push_str("</refentry>\n");
        out
    }
}

impl Emitter for DocbookEmitter {
    fn name(&self) -> &'static str {
        "docbook"
    }

    fn emit(&self, interfaces: &[Interface], config: &GeneratorConfig) -> CodegenResult<()> {
        for iface in post_processed(interfaces, self.name()) {
            let path = config
                .docbook_path(&iface.name)
                .ok_or_else(|| CodegenError::Emit {
                    emitter: self.name().to_string(),
                    message: "no output base configured for DocBook".to_string(),
                })?;

            debug!(interface = %iface.name, "rendering DocBook page");
            write_artifact(&path, &self.render(iface))?;
        }
        Ok(())
    }
}

fn first_sentence(doc: &str) -> &str {
    let doc = doc.trim();
    match doc.find(". ") {
        Some(end) => &doc[..=end],
        None => doc,
    }
}

fn access_word(access: PropertyAccess) -> &'static str {
    match access {
        PropertyAccess::Read => "readable",
        PropertyAccess::Write => "writable",
        PropertyAccess::ReadWrite => "readwrite",
    }
}

fn arg_list(args: &[(&str, &Arg)]) -> String {
    args.iter()
        .map(|(direction, arg)| {
            let entry = format!("{} {}", escape(&arg.signature), escape(&arg.c_name));
            if direction.is_empty() {
                entry
            } else {
                format!("{direction} {entry}")
            }
        })
        .collect::<Vec<_>>()
        .join(",\n          ")
}

fn method_args(method: &busgen_core::Method) -> String {
    let args: Vec<(&str, &Arg)> = method
        .in_args
        .iter()
        .map(|a| ("IN ", a))
        .chain(method.out_args.iter().map(|a| ("OUT", a)))
        .collect();
    arg_list(&args)
}

fn signal_args(signal: &busgen_core::Signal) -> String {
    let args: Vec<(&str, &Arg)> = signal.args.iter().map(|a| ("", a)).collect();
    arg_list(&args)
}

fn synopses(out: &mut String, iface: &Interface) {
    let name = escape(&iface.name);

    if !iface.methods.is_empty() {
        out.push_str("  <refsynopsisdiv role=\"synopsis\">\n");
        out.push_str("    <title role=\"synopsis.title\">Methods</title>\n");
        out.push_str("    <synopsis>\n");
        for method in &iface.methods {
            let m = escape(&method.name);
            out.push_str(&format!(
                "<link linkend=\"gdbus-method-{name}.{m}\">{m}</link> ({});\n",
                method_args(method)
            ));
        }
        out.push_str("    </synopsis>\n");
        out.push_str("  </refsynopsisdiv>\n");
    }

    if !iface.signals.is_empty() {
        out.push_str("  <refsect1 role=\"signal_proto\">\n");
        out.push_str("    <title role=\"signal_proto.title\">Signals</title>\n");
        out.push_str("    <synopsis>\n");
        for signal in &iface.signals {
            let s = escape(&signal.name);
            out.push_str(&format!(
                "<link linkend=\"gdbus-signal-{name}.{s}\">{s}</link> ({});\n",
                signal_args(signal)
            ));
        }
        out.push_str("    </synopsis>\n");
        out.push_str("  </refsect1>\n");
    }

    if !iface.properties.is_empty() {
        out.push_str("  <refsect1 role=\"properties\">\n");
        out.push_str("    <title role=\"properties.title\">Properties</title>\n");
        out.push_str("    <synopsis>\n");
        for property in &iface.properties {
            let p = escape(&property.name);
            out.push_str(&format!(
                "<link linkend=\"gdbus-property-{name}.{p}\">{p}</link>  {}  {}\n",
                access_word(property.access),
                escape(&property.signature)
            ));
        }
        out.push_str("    </synopsis>\n");
        out.push_str("  </refsect1>\n");
    }
}

fn description(out: &mut String, iface: &Interface) {
    let name = escape(&iface.name);
    let naming = &iface.naming;

    out.push_str(&format!("  <refsect1 role=\"desc\" id=\"gdbus-interface-{name}\">\n"));
    out.push_str("    <title role=\"desc.title\">Description</title>\n");
    if !naming.doc_string.is_empty() {
        out.push_str(&format!("    <para>{}</para>\n", escape(&naming.doc_string)));
    }
    if !naming.since.is_empty() {
        out.push_str(&format!(
            "    <para role=\"since\">Since {}</para>\n",
            escape(&naming.since)
        ));
    }
    if naming.deprecated {
        out.push_str(&format!(
            "    <warning><para>The {name} interface is deprecated.</para></warning>\n"
        ));
    }
    out.push_str("  </refsect1>\n");
}

/// Doc text, since and deprecation paragraphs shared by every member kind
fn member_notes(out: &mut String, naming: &MemberNaming, what: &str) {
    if !naming.doc_string.is_empty() {
        out.push_str(&format!("      <para>{}</para>\n", escape(&naming.doc_string)));
    }
    if !naming.since.is_empty() {
        out.push_str(&format!(
            "      <para role=\"since\">Since {}</para>\n",
            escape(&naming.since)
        ));
    }
    if naming.deprecated {
        out.push_str(&format!(
            "      <warning><para>The {what} is deprecated.</para></warning>\n"
        ));
    }
}

fn details(out: &mut String, iface: &Interface) {
    if iface.methods.is_empty() && iface.signals.is_empty() && iface.properties.is_empty() {
        return;
    }

    let name = escape(&iface.name);
    out.push_str("  <refsect1 role=\"details\">\n");
    out.push_str("    <title role=\"details.title\">Details</title>\n");

    for method in &iface.methods {
        let m = escape(&method.name);
        out.push_str(&format!(
            "    <refsect2 role=\"method\" id=\"gdbus-method-{name}.{m}\">\n"
        ));
        out.push_str(&format!("      <title>The {m}() method</title>\n"));
        out.push_str(&format!(
            "      <programlisting>\n{m} ({});\n      </programlisting>\n",
            method_args(method)
        ));
        member_notes(out, &method.naming, &format!("{m}() method"));
        out.push_str("    </refsect2>\n");
    }

    for signal in &iface.signals {
        let s = escape(&signal.name);
        out.push_str(&format!(
            "    <refsect2 role=\"signal\" id=\"gdbus-signal-{name}.{s}\">\n"
        ));
        out.push_str(&format!("      <title>The \"{s}\" signal</title>\n"));
        out.push_str(&format!(
            "      <programlisting>\n{s} ({});\n      </programlisting>\n",
            signal_args(signal)
        ));
        member_notes(out, &signal.naming, &format!("\"{s}\" signal"));
        out.push_str("    </refsect2>\n");
    }

    for property in &iface.properties {
        let p = escape(&property.name);
        out.push_str(&format!(
            "    <refsect2 role=\"property\" id=\"gdbus-property-{name}.{p}\">\n"
        ));
        out.push_str(&format!("      <title>The \"{p}\" property</title>\n"));
        out.push_str(&format!(
            "      <programlisting>\n{p}  {}  {}\n      </programlisting>\n",
            access_word(property.access),
            escape(&property.signature)
        ));
        member_notes(out, &property.naming, &format!("\"{p}\" property"));
        out.push_str("    </refsect2>\n");
    }

    out.push_str("  </refsect1>\n");
}
