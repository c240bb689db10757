//! Generator configuration

use crate::error::CodegenResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which interfaces the post-processing stage normalizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostProcessScope {
    /// Every interface from every source
    #[default]
    All,
    /// Only the interfaces from the last source loaded
    LastSource,
}

/// Options shared by the pipeline stages and emitters
///
/// Loaded from `busgen.toml` when one is given, then overridden by
/// command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Prefix stripped from interface names before deriving C and doc names
    pub interface_prefix: String,

    /// Namespace prepended to generated C identifiers
    pub c_namespace: String,

    /// Also generate an object manager client proxy-type function
    pub c_generate_object_manager: bool,

    /// Base path for `<base>.h` and `<base>.c`
    pub generate_c_code: Option<PathBuf>,

    /// Base path for `<base>-<interface>.xml` DocBook files
    pub generate_docbook: Option<PathBuf>,

    pub post_process_scope: PostProcessScope,
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// Empty input yields the defaults.
    pub fn from_toml_str(content: &str) -> CodegenResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Path of the generated C header, if C generation is enabled
    pub fn c_header_path(&self) -> Option<PathBuf> {
        self.generate_c_code
            .as_ref()
            .map(|base| with_suffix(base, ".h"))
    }

    /// Path of the generated C source, if C generation is enabled
    pub fn c_source_path(&self) -> Option<PathBuf> {
        self.generate_c_code
            .as_ref()
            .map(|base| with_suffix(base, ".c"))
    }

    /// Path of the DocBook document for `interface_name`, if enabled
    pub fn docbook_path(&self, interface_name: &str) -> Option<PathBuf> {
        self.generate_docbook
            .as_ref()
            .map(|base| with_suffix(base, &format!("-{interface_name}.xml")))
    }
}

/// Append text to the final path component (`out/gen` + `.h` = `out/gen.h`)
fn with_suffix(base: &std::path::Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
