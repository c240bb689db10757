//! Artifact emitters for the post-processed interface tree.
//!
//! # Supported Emitters
//!
//! - **C**: a GObject-style header and source with `GDBusInterfaceInfo`
//!   tables and the public function prototypes for each interface
//! - **DocBook**: one `refentry` reference page per interface
//!
//! # Architecture
//!
//! ```text
//! introspection XML
//!     ↓
//!  [IntrospectionParser]
//!     ↓
//!  Interface tree ─→ [annotate] ─→ [post-process]
//!     ↓
//!  ├─→ [CCodeEmitter] → OUTBASE.h + OUTBASE.c
//!  └─→ [DocbookEmitter] → OUTBASE-<interface>.xml
//! ```
//!
//! Emitters only read the tree. Each builds its text in memory and writes
//! every file once, so a failed emitter leaves at most its own partial set
//! of files behind.

mod c;
mod docbook;

pub use c::CCodeEmitter;
pub use docbook::DocbookEmitter;

use busgen_core::{CodegenError, CodegenResult, Interface};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Write one generated file, creating missing parent directories.
fn write_artifact(path: &Path, contents: &str) -> CodegenResult<()> {
    let to_write_error = |source: io::Error| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, contents).map_err(to_write_error)?;

    info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Interfaces that went through post-processing.
///
/// With the `last-source` scope, interfaces from earlier sources were never
/// named; they are skipped rather than rendered with empty identifiers.
fn post_processed<'a>(interfaces: &'a [Interface], emitter: &str) -> Vec<&'a Interface> {
    interfaces
        .iter()
        .filter(|iface| {
            let processed = iface.naming.processed;
            if !processed {
                warn!(
                    emitter,
                    interface = %iface.name,
                    "skipping interface without derived names"
                );
            }
            processed
        })
        .collect()
}
