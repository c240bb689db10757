//! Integration tests for end-to-end generation.
//!
//! Drives the library pipeline and the `busgen` binary against introspection
//! XML written to a temporary directory.

#![allow(non_snake_case)]

use busgen_cli::generate;
use busgen_core::{Annotated, AnnotationSpec, CodegenError, GeneratorConfig, PostProcessScope};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const FOO_BAR_XML: &str = r#"<node>
  <interface name="org.X.Foo">
    <method name="Do">
      <arg name="value" type="s" direction="in"/>
    </method>
    <signal name="Done">
      <arg name="status" type="u"/>
    </signal>
    <property name="Level" type="i" access="read"/>
  </interface>
  <interface name="org.X.Bar">
    <method name="Do">
      <arg name="value" type="s" direction="in"/>
    </method>
  </interface>
</node>
"#;

const BAZ_XML: &str = r#"<node>
  <interface name="org.X.Baz">
    <method name="Reset"/>
  </interface>
</node>
"#;

/// Helper to write a fixture into the temp dir.
fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn c_config(dir: &TempDir) -> GeneratorConfig {
    GeneratorConfig {
        interface_prefix: "org.X.".to_string(),
        c_namespace: "My".to_string(),
        generate_c_code: Some(dir.path().join("out/my-generated")),
        generate_docbook: Some(dir.path().join("out/my-doc")),
        ..GeneratorConfig::default()
    }
}

fn output_files(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

fn busgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_busgen"))
}

// =============================================================================
// Library pipeline
// =============================================================================

mod library {
    use super::*;

    #[test]
    fn generate___arg_annotation___lands_on_arg_only() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);

        let pipeline = generate(
            &[&xml],
            &[AnnotationSpec::new(
                "org.X.Foo.Do()[value]",
                "org.gtk.GDBus.C.ForceGVariant",
                "true",
            )],
            GeneratorConfig::default(),
        )
        .unwrap();

        let interfaces = pipeline.interfaces();
        let foo_do = interfaces[0].method("Do").unwrap();
        assert_eq!(foo_do.annotations.len(), 0);
        assert_eq!(foo_do.in_args[0].annotations.len(), 1);
        assert_eq!(
            foo_do.in_args[0].lookup_annotation("org.gtk.GDBus.C.ForceGVariant"),
            Some("true")
        );
        assert_eq!(foo_do.in_args[0].ctype.ctype_in, "GVariant *");
        assert_eq!(interfaces[0].annotation_count(), 1);
        assert_eq!(interfaces[1].annotation_count(), 0);
        assert_eq!(
            interfaces[1].method("Do").unwrap().in_args[0].ctype.ctype_in,
            "const gchar *"
        );
    }

    #[test]
    fn generate___unresolved_target___no_output_written() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);

        let err = generate(
            &[&xml],
            &[AnnotationSpec::new("org.X.Foo::NoSuchSignal", "key", "value")],
            c_config(&dir),
        )
        .unwrap_err();

        assert!(matches!(err, CodegenError::Resolve(_)));
        assert!(err.to_string().contains("org.X.Foo::NoSuchSignal"));
        assert!(output_files(&dir.path().join("out")).is_empty());
    }

    #[test]
    fn generate___c_and_docbook___all_artifacts_written() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);

        generate(&[&xml], &[], c_config(&dir)).unwrap();

        let out = dir.path().join("out");
        let header = fs::read_to_string(out.join("my-generated.h")).unwrap();
        let source = fs::read_to_string(out.join("my-generated.c")).unwrap();
        assert!(header.contains("#define MY_TYPE_FOO (my_foo_get_type ())"));
        assert!(header.contains("void my_foo_call_do ("));
        assert!(header.contains("void my_foo_emit_done ("));
        assert!(header.contains("gint my_foo_get_level ("));
        assert!(header.contains("GDBusInterfaceInfo *my_bar_interface_info (void);"));
        assert!(source.contains("#include \"my-generated.h\""));
        assert!(source.contains("(gchar *) \"org.X.Bar\""));
        assert!(out.join("my-doc-org.X.Foo.xml").exists());
        assert!(out.join("my-doc-org.X.Bar.xml").exists());
        assert_eq!(output_files(&out).len(), 4);
    }

    #[test]
    fn generate___deprecated_annotation___reaches_header() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);

        generate(
            &[&xml],
            &[AnnotationSpec::new(
                "org.X.Foo:Level",
                "org.freedesktop.DBus.Deprecated",
                "true",
            )],
            c_config(&dir),
        )
        .unwrap();

        let header = fs::read_to_string(dir.path().join("out/my-generated.h")).unwrap();
        assert!(header.contains("gint my_foo_get_level (\n    MyFoo *object) G_GNUC_DEPRECATED;"));
        assert!(header.contains("void my_foo_emit_done (\n    MyFoo *object,\n    guint arg_status);"));
    }

    #[test]
    fn generate___multiple_sources___merged_in_order() {
        let dir = TempDir::new().unwrap();
        let foo = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let baz = write_fixture(&dir, "baz.xml", BAZ_XML);

        let pipeline = generate(
            &[&foo, &baz],
            &[AnnotationSpec::new("org.X.Baz.Reset()", "org.gtk.GDBus.Since", "1.4")],
            GeneratorConfig::default(),
        )
        .unwrap();

        let names: Vec<_> = pipeline.interfaces().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["org.X.Foo", "org.X.Bar", "org.X.Baz"]);
        assert_eq!(pipeline.interfaces()[2].methods[0].naming.since, "1.4");
    }

    #[test]
    fn generate___last_source_scope___only_last_file_emitted() {
        let dir = TempDir::new().unwrap();
        let foo = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let baz = write_fixture(&dir, "baz.xml", BAZ_XML);
        let config = GeneratorConfig {
            post_process_scope: PostProcessScope::LastSource,
            ..c_config(&dir)
        };

        generate(&[&foo, &baz], &[], config).unwrap();

        let header = fs::read_to_string(dir.path().join("out/my-generated.h")).unwrap();
        assert!(header.contains("my_baz_get_type"));
        assert!(!header.contains("my_foo_get_type"));
        assert!(dir.path().join("out/my-doc-org.X.Baz.xml").exists());
        assert!(!dir.path().join("out/my-doc-org.X.Foo.xml").exists());
    }

    #[test]
    fn generate___malformed_xml___parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "broken.xml", "<node><interface name=\"a.B\"></node>");

        let err = generate(&[&xml], &[], GeneratorConfig::default()).unwrap_err();

        assert!(matches!(err, CodegenError::Parse { .. }));
        assert!(err.to_string().contains("broken.xml"));
    }

    #[test]
    fn generate___same_input_twice___identical_output() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let header = dir.path().join("out/my-generated.h");

        generate(&[&xml], &[], c_config(&dir)).unwrap();
        let first = fs::read_to_string(&header).unwrap();
        generate(&[&xml], &[], c_config(&dir)).unwrap();
        let second = fs::read_to_string(&header).unwrap();

        assert_eq!(first, second);
    }
}

// =============================================================================
// Binary
// =============================================================================

mod binary {
    use super::*;

    #[test]
    fn busgen___generate_c_code___exit_success() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let outbase = dir.path().join("foo-generated");

        let output = busgen()
            .arg("--interface-prefix")
            .arg("org.X.")
            .arg("--c-namespace")
            .arg("My")
            .arg("--c-generate-object-manager")
            .arg("--generate-c-code")
            .arg(&outbase)
            .arg("--annotate")
            .args(["org.X.Foo.Do()", "org.freedesktop.DBus.Deprecated", "true"])
            .arg(&xml)
            .output()
            .unwrap();

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let header = fs::read_to_string(dir.path().join("foo-generated.h")).unwrap();
        assert!(header.contains("GType my_object_manager_client_get_proxy_type ("));
        assert!(header.contains("GError **error) G_GNUC_DEPRECATED;"));
        assert!(dir.path().join("foo-generated.c").exists());
    }

    #[test]
    fn busgen___unresolved_annotation___exit_failure_without_output() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);

        let output = busgen()
            .arg("--generate-c-code")
            .arg(dir.path().join("foo-generated"))
            .arg("--annotate")
            .args(["org.X.Foo::NoSuchSignal", "key", "value"])
            .arg(&xml)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("org.X.Foo::NoSuchSignal"));
        assert!(!dir.path().join("foo-generated.h").exists());
        assert!(!dir.path().join("foo-generated.c").exists());
    }

    #[test]
    fn busgen___config_file___provides_defaults() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let docbase = dir.path().join("doc");
        let config = write_fixture(
            &dir,
            "busgen.toml",
            &format!(
                "interface_prefix = \"org.X.\"\ngenerate_docbook = {:?}\n",
                docbase.display().to_string()
            ),
        );

        let output = busgen().arg("--config").arg(&config).arg(&xml).output().unwrap();

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        assert!(dir.path().join("doc-org.X.Foo.xml").exists());
        assert!(dir.path().join("doc-org.X.Bar.xml").exists());
    }

    #[test]
    fn busgen___no_object_manager_flag___overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let config = write_fixture(&dir, "busgen.toml", "c_generate_object_manager = true\n");

        let output = busgen()
            .arg("--config")
            .arg(&config)
            .arg("--no-c-generate-object-manager")
            .arg("--generate-c-code")
            .arg(dir.path().join("foo-generated"))
            .arg(&xml)
            .output()
            .unwrap();

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let header = fs::read_to_string(dir.path().join("foo-generated.h")).unwrap();
        assert!(header.contains("_get_type ("));
        assert!(!header.contains("object_manager_client_get_proxy_type"));
    }

    #[test]
    fn busgen___invalid_config_file___exit_failure() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir, "foo.xml", FOO_BAR_XML);
        let config = write_fixture(&dir, "busgen.toml", "no_such_option = true\n");

        let output = busgen().arg("--config").arg(&config).arg(&xml).output().unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid config file"));
    }

    #[test]
    fn busgen___missing_input_file___exit_failure() {
        let dir = TempDir::new().unwrap();

        let output = busgen().arg(dir.path().join("absent.xml")).output().unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("absent.xml"));
    }

    #[test]
    fn busgen___no_files___usage_error() {
        let output = busgen().output().unwrap();

        assert!(!output.status.success());
    }
}
