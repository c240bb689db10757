//! C header and source generation
//!
//! The header declares the GObject type macros and the call, complete,
//! emit and property accessor functions for each interface. The source holds
//! the static `GDBus*Info` introspection tables and the `*_interface_info()`
//! accessors returning them.

use super::{post_processed, write_artifact};
use busgen_core::{
    Annotation, Arg, CodegenError, CodegenResult, Emitter, GeneratorConfig, Interface,
    PropertyAccess,
};
use std::path::Path;
use tracing::debug;

const FILE_BANNER: &str = "/*\n * Generated by busgen from D-Bus introspection data.\n *\n * DO NOT EDIT - regenerate instead.\n */\n\n";

const SECTION_RULE: &str =
    "/* ------------------------------------------------------------------------ */\n";

/// Writes `OUTBASE.h` and `OUTBASE.c` from `--generate-c-code OUTBASE`
#[derive(Debug, Default, Clone, Copy)]
pub struct CCodeEmitter;

impl CCodeEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Render the header text.
    ///
    /// `header_name` is the header's file name, used for the include guard.
    pub fn render_header(
        &self,
        interfaces: &[&Interface],
        config: &GeneratorConfig,
        header_name: &str,
    ) -> String {
        let guard = include_guard(header_name);
        let mut out = String::new();

        out.push_str(FILE_BANNER);
        out.push_str(&format!("#ifndef {guard}\n"));
        out.push_str(&format!("#define {guard}\n\n"));
        out.push_str("#include <gio/gio.h>\n\n");
        out.push_str("#ifdef __cplusplus\n");
        out.push_str("extern \"C\" {\n");
        out.push_str("#endif\n\n");

        for iface in interfaces {
            header_declarations(&mut out, iface);
        }

        if config.c_generate_object_manager {
            out.push_str(SECTION_RULE);
            out.push_str("/* Object manager support */\n\n");
            out.push_str(&format!(
                "GType {}object_manager_client_get_proxy_type (\n    GDBusObjectManagerClient *manager,\n    const gchar *object_path,\n    const gchar *interface_name,\n    gpointer user_data);\n\n",
                namespace_lower(interfaces)
            ));
        }

        out.push_str("#ifdef __cplusplus\n");
        out.push_str("}\n");
        out.push_str("#endif\n\n");
        out.push_str(&format!("#endif /* {guard} */\n"));

        out
    }

    /// Render the source text that `#include`s `header_name`.
    pub fn render_source(
        &self,
        interfaces: &[&Interface],
        config: &GeneratorConfig,
        header_name: &str,
    ) -> String {
        let mut out = String::new();

        out.push_str(FILE_BANNER);
        out.push_str("#ifdef HAVE_CONFIG_H\n");
        out.push_str("#  include \"config.h\"\n");
        out.push_str("#endif\n\n");
        out.push_str(&format!("#include \"{header_name}\"\n\n"));
        out.push_str("#include <string.h>\n\n");

        for iface in interfaces {
            source_definitions(&mut out, iface);
        }

        if config.c_generate_object_manager {
            object_manager_definition(&mut out, interfaces);
        }

        out
    }
}

impl Emitter for CCodeEmitter {
    fn name(&self) -> &'static str {
        "c"
    }

    fn emit(&self, interfaces: &[Interface], config: &GeneratorConfig) -> CodegenResult<()> {
        let (Some(header_path), Some(source_path)) = (config.c_header_path(), config.c_source_path())
        else {
            return Err(CodegenError::Emit {
                emitter: self.name().to_string(),
                message: "no output base configured for C code".to_string(),
            });
        };

        let header_name = file_name(&header_path);
        let interfaces = post_processed(interfaces, self.name());
        debug!(interfaces = interfaces.len(), header = %header_name, "rendering C code");

        let header = self.render_header(&interfaces, config, &header_name);
        let source = self.render_source(&interfaces, config, &header_name);

        write_artifact(&header_path, &header)?;
        write_artifact(&source_path, &source)?;
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "generated.h".to_string())
}

/// `foo-generated.h` becomes `__FOO_GENERATED_H__`
fn include_guard(header_name: &str) -> String {
    let body: String = header_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("__{body}__")
}

fn namespace_lower<'a>(interfaces: &[&'a Interface]) -> &'a str {
    interfaces
        .first()
        .map(|i| i.naming.ns_lower.as_str())
        .unwrap_or_default()
}

/// Escape text for a C string literal
fn escape_c(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Join a C type and a name, without a space after a trailing `*`
///
/// Scalar types from the signature table carry a trailing space already.
fn typed(ctype: &str, name: &str) -> String {
    let ctype = ctype.trim_end();
    if ctype.ends_with('*') {
        format!("{ctype}{name}")
    } else {
        format!("{ctype} {name}")
    }
}

fn deprecated_attr(deprecated: bool) -> &'static str {
    if deprecated { " G_GNUC_DEPRECATED" } else { "" }
}

fn prototype(out: &mut String, ret: &str, name: &str, params: &[String], deprecated: bool) {
    out.push_str(&typed(ret, name));
    out.push_str(" (\n    ");
    out.push_str(&params.join(",\n    "));
    out.push_str(&format!("){};\n\n", deprecated_attr(deprecated)));
}

// ============================================================================
// Header
// ============================================================================

fn header_declarations(out: &mut String, iface: &Interface) {
    let n = &iface.naming;
    let camel = &n.camel_name;
    let lower = &n.name_lower;
    let type_macro = format!("{}TYPE_{}", n.ns_upper, n.name_upper);
    let dep = deprecated_attr(n.deprecated);
    let object = format!("{camel} *object");
    let proxy = format!("{camel} *proxy");

    out.push_str(SECTION_RULE);
    out.push_str(&format!("/* Declarations for {} */\n\n", iface.name));

    out.push_str(&format!("#define {type_macro} ({lower}_get_type ())\n"));
    out.push_str(&format!(
        "#define {}{}(o) (G_TYPE_CHECK_INSTANCE_CAST ((o), {type_macro}, {camel}))\n",
        n.ns_upper, n.name_upper
    ));
    out.push_str(&format!(
        "#define {}IS_{}(o) (G_TYPE_CHECK_INSTANCE_TYPE ((o), {type_macro}))\n\n",
        n.ns_upper, n.name_upper
    ));

    for suffix in ["", "Iface", "Proxy", "Skeleton"] {
        out.push_str(&format!("typedef struct _{camel}{suffix} {camel}{suffix};\n"));
    }
    out.push('\n');

    out.push_str(&format!("GType {lower}_get_type (void) G_GNUC_CONST{dep};\n"));
    out.push_str(&format!("GType {lower}_proxy_get_type (void) G_GNUC_CONST{dep};\n"));
    out.push_str(&format!("GType {lower}_skeleton_get_type (void) G_GNUC_CONST{dep};\n"));
    out.push_str(&format!("#define {type_macro}_PROXY ({lower}_proxy_get_type ())\n"));
    out.push_str(&format!("#define {type_macro}_SKELETON ({lower}_skeleton_get_type ())\n\n"));

    out.push_str(&format!("GDBusInterfaceInfo *{lower}_interface_info (void){dep};\n\n"));

    if !iface.methods.is_empty() {
        out.push_str("/* D-Bus method calls: */\n");
        for method in &iface.methods {
            let name = format!("{lower}_call_{}", method.naming.name_lower);
            let deprecated = method.naming.deprecated;
            let in_params = params(&method.in_args, "arg_", |a| &a.ctype.ctype_in);
            let out_params = params(&method.out_args, "out_", |a| &a.ctype.ctype_out);

            let mut call = vec![proxy.clone()];
            call.extend(in_params.iter().cloned());
            call.extend(async_params());
            prototype(out, "void", &name, &call, deprecated);

            let mut finish = vec![proxy.clone()];
            finish.extend(out_params.iter().cloned());
            finish.push("GAsyncResult *res".to_string());
            finish.push("GError **error".to_string());
            prototype(out, "gboolean", &format!("{name}_finish"), &finish, deprecated);

            let mut sync = vec![proxy.clone()];
            sync.extend(in_params);
            sync.extend(out_params);
            sync.push("GCancellable *cancellable".to_string());
            sync.push("GError **error".to_string());
            prototype(out, "gboolean", &format!("{name}_sync"), &sync, deprecated);
        }

        out.push_str("/* D-Bus method call completion functions: */\n");
        for method in &iface.methods {
            let mut complete = vec![object.clone(), "GDBusMethodInvocation *invocation".to_string()];
            complete.extend(params(&method.out_args, "", |a| &a.ctype.ctype_in));
            prototype(
                out,
                "void",
                &format!("{lower}_complete_{}", method.naming.name_lower),
                &complete,
                method.naming.deprecated,
            );
        }
    }

    if !iface.signals.is_empty() {
        out.push_str("/* D-Bus signal emissions functions: */\n");
        for signal in &iface.signals {
            let mut emit = vec![object.clone()];
            emit.extend(params(&signal.args, "arg_", |a| &a.ctype.ctype_in));
            prototype(
                out,
                "void",
                &format!("{lower}_emit_{}", signal.naming.name_lower),
                &emit,
                signal.naming.deprecated,
            );
        }
    }

    if !iface.properties.is_empty() {
        out.push_str("/* D-Bus property accessors: */\n");
        for property in &iface.properties {
            let prop = &property.naming.name_lower;
            let ctype = &property.ctype.ctype_in;
            prototype(
                out,
                ctype,
                &format!("{lower}_get_{prop}"),
                std::slice::from_ref(&object),
                property.naming.deprecated,
            );
            prototype(
                out,
                "void",
                &format!("{lower}_set_{prop}"),
                &[object.clone(), typed(ctype, "value")],
                property.naming.deprecated,
            );
        }
    }

    out.push('\n');
}

fn params<F>(args: &[Arg], prefix: &str, ctype: F) -> Vec<String>
where
    F: Fn(&Arg) -> &String,
{
    args.iter()
        .map(|a| typed(ctype(a), &format!("{prefix}{}", a.c_name)))
        .collect()
}

fn async_params() -> [String; 3] {
    [
        "GCancellable *cancellable".to_string(),
        "GAsyncReadyCallback callback".to_string(),
        "gpointer user_data".to_string(),
    ]
}

// ============================================================================
// Source
// ============================================================================

fn source_definitions(out: &mut String, iface: &Interface) {
    let lower = &iface.naming.name_lower;
    let prefix = format!("_{lower}");

    out.push_str(SECTION_RULE);
    out.push_str(&format!("/* Definitions for {} */\n\n", iface.name));

    let mut method_entries = Vec::new();
    for method in &iface.methods {
        let info = format!("{prefix}_method_info_{}", method.naming.name_lower);
        let in_args = arg_table(out, &info, "IN_ARG", &method.in_args);
        let out_args = arg_table(out, &info, "OUT_ARG", &method.out_args);
        let annotations = annotation_table(out, &info, &method.annotations);
        out.push_str(&format!(
            "static const GDBusMethodInfo {info} =\n{{\n  -1,\n  (gchar *) \"{}\",\n  {in_args},\n  {out_args},\n  {annotations}\n}};\n\n",
            escape_c(&method.name)
        ));
        method_entries.push(info);
    }
    let methods = pointer_table(
        out,
        "GDBusMethodInfo",
        &format!("{prefix}_method_info_pointers"),
        &method_entries,
    );

    let mut signal_entries = Vec::new();
    for signal in &iface.signals {
        let info = format!("{prefix}_signal_info_{}", signal.naming.name_lower);
        let args = arg_table(out, &info, "ARG", &signal.args);
        let annotations = annotation_table(out, &info, &signal.annotations);
        out.push_str(&format!(
            "static const GDBusSignalInfo {info} =\n{{\n  -1,\n  (gchar *) \"{}\",\n  {args},\n  {annotations}\n}};\n\n",
            escape_c(&signal.name)
        ));
        signal_entries.push(info);
    }
    let signals = pointer_table(
        out,
        "GDBusSignalInfo",
        &format!("{prefix}_signal_info_pointers"),
        &signal_entries,
    );

    let mut property_entries = Vec::new();
    for property in &iface.properties {
        let info = format!("{prefix}_property_info_{}", property.naming.name_lower);
        let annotations = annotation_table(out, &info, &property.annotations);
        out.push_str(&format!(
            "static const GDBusPropertyInfo {info} =\n{{\n  -1,\n  (gchar *) \"{}\",\n  (gchar *) \"{}\",\n  {},\n  {annotations}\n}};\n\n",
            escape_c(&property.name),
            escape_c(&property.signature),
            property_flags(property.access)
        ));
        property_entries.push(info);
    }
    let properties = pointer_table(
        out,
        "GDBusPropertyInfo",
        &format!("{prefix}_property_info_pointers"),
        &property_entries,
    );

    let annotations = annotation_table(out, &prefix, &iface.annotations);
    out.push_str(&format!(
        "static const GDBusInterfaceInfo {prefix}_interface_info =\n{{\n  -1,\n  (gchar *) \"{}\",\n  {methods},\n  {signals},\n  {properties},\n  {annotations}\n}};\n\n",
        escape_c(&iface.name)
    ));

    out.push_str("GDBusInterfaceInfo *\n");
    out.push_str(&format!("{lower}_interface_info (void)\n"));
    out.push_str("{\n");
    out.push_str(&format!("  return (GDBusInterfaceInfo *) &{prefix}_interface_info;\n"));
    out.push_str("}\n\n");
}

fn property_flags(access: PropertyAccess) -> &'static str {
    match access {
        PropertyAccess::Read => "G_DBUS_PROPERTY_INFO_FLAGS_READABLE",
        PropertyAccess::Write => "G_DBUS_PROPERTY_INFO_FLAGS_WRITABLE",
        PropertyAccess::ReadWrite => {
            "G_DBUS_PROPERTY_INFO_FLAGS_READABLE | G_DBUS_PROPERTY_INFO_FLAGS_WRITABLE"
        }
    }
}

/// Write a NULL-terminated pointer array; returns the expression referring to it
fn pointer_table(out: &mut String, ty: &str, table: &str, entries: &[String]) -> String {
    if entries.is_empty() {
        return "NULL".to_string();
    }

    out.push_str(&format!("static const {ty} * const {table}[] =\n{{\n"));
    for entry in entries {
        out.push_str(&format!("  &{entry},\n"));
    }
    out.push_str("  NULL\n};\n\n");

    format!("({ty} **) &{table}")
}

fn arg_table(out: &mut String, owner: &str, kind: &str, args: &[Arg]) -> String {
    let mut entries = Vec::new();
    for arg in args {
        let info = format!("{owner}_{kind}_{}", arg.c_name);
        let annotations = annotation_table(out, &info, &arg.annotations);
        out.push_str(&format!(
            "static const GDBusArgInfo {info} =\n{{\n  -1,\n  (gchar *) \"{}\",\n  (gchar *) \"{}\",\n  {annotations}\n}};\n\n",
            escape_c(&arg.c_name),
            escape_c(&arg.signature)
        ));
        entries.push(info);
    }
    pointer_table(out, "GDBusArgInfo", &format!("{owner}_{kind}_pointers"), &entries)
}

fn annotation_table(out: &mut String, owner: &str, annotations: &[Annotation]) -> String {
    let mut entries = Vec::new();
    for (n, annotation) in annotations.iter().enumerate() {
        let info = format!("{owner}_annotation_info_{n}");
        out.push_str(&format!(
            "static const GDBusAnnotationInfo {info} =\n{{\n  -1,\n  (gchar *) \"{}\",\n  (gchar *) \"{}\",\n  NULL\n}};\n\n",
            escape_c(&annotation.key),
            escape_c(&annotation.value)
        ));
        entries.push(info);
    }
    pointer_table(
        out,
        "GDBusAnnotationInfo",
        &format!("{owner}_annotation_info_pointers"),
        &entries,
    )
}

fn object_manager_definition(out: &mut String, interfaces: &[&Interface]) {
    let ns = namespace_lower(interfaces);

    out.push_str(SECTION_RULE);
    out.push_str("/* Object manager support */\n\n");
    out.push_str("GType\n");
    out.push_str(&format!("{ns}object_manager_client_get_proxy_type (\n"));
    out.push_str("    GDBusObjectManagerClient *manager G_GNUC_UNUSED,\n");
    out.push_str("    const gchar *object_path G_GNUC_UNUSED,\n");
    out.push_str("    const gchar *interface_name,\n");
    out.push_str("    gpointer user_data G_GNUC_UNUSED)\n");
    out.push_str("{\n");
    out.push_str("  static gsize once_init_value = 0;\n");
    out.push_str("  static GHashTable *lookup_hash;\n");
    out.push_str("  GType ret;\n\n");
    out.push_str("  if (interface_name == NULL)\n");
    out.push_str("    return G_TYPE_DBUS_OBJECT_PROXY;\n");
    out.push_str("  if (g_once_init_enter (&once_init_value))\n");
    out.push_str("    {\n");
    out.push_str("      lookup_hash = g_hash_table_new (g_str_hash, g_str_equal);\n");
    for iface in interfaces {
        let n = &iface.naming;
        out.push_str(&format!(
            "      g_hash_table_insert (lookup_hash, (gpointer) \"{}\", GSIZE_TO_POINTER ({}TYPE_{}_PROXY));\n",
            escape_c(&iface.name),
            n.ns_upper,
            n.name_upper
        ));
    }
    out.push_str("      g_once_init_leave (&once_init_value, 1);\n");
    out.push_str("    }\n");
    out.push_str("  ret = (GType) GPOINTER_TO_SIZE (g_hash_table_lookup (lookup_hash, interface_name));\n");
    out.push_str("  if (ret == (GType) 0)\n");
    out.push_str("    ret = G_TYPE_DBUS_PROXY;\n");
    out.push_str("  return ret;\n");
    out.push_str("}\n");
}
