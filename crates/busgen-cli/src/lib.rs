//! busgen-cli - D-Bus introspection XML in, C bindings and DocBook out
//!
//! The binary wires these pieces into a [`busgen_core::Pipeline`]:
//! - [`introspect::IntrospectionParser`] reads introspection XML
//! - [`codegen::CCodeEmitter`] writes the C header and source
//! - [`codegen::DocbookEmitter`] writes one DocBook page per interface
//! - [`logging::init_logging`] installs the stderr subscriber

pub mod codegen;
pub mod introspect;
pub mod logging;

use busgen_core::{AnnotationSpec, CodegenResult, Emitter, GeneratorConfig, Pipeline};
use codegen::{CCodeEmitter, DocbookEmitter};
use introspect::IntrospectionParser;
use std::path::Path;
use tracing::warn;

/// Run a full generation over `sources` with the emitters `config` asks for.
///
/// Returns the finished pipeline so callers can inspect the final tree.
pub fn generate<P: AsRef<Path>>(
    sources: &[P],
    annotations: &[AnnotationSpec],
    config: GeneratorConfig,
) -> CodegenResult<Pipeline> {
    let c_code = CCodeEmitter::new();
    let docbook = DocbookEmitter::new();

    let mut emitters: Vec<&dyn Emitter> = Vec::new();
    if config.generate_c_code.is_some() {
        emitters.push(&c_code);
    }
    if config.generate_docbook.is_some() {
        emitters.push(&docbook);
    }
    if emitters.is_empty() {
        warn!("no output requested; only validating input");
    }

    let mut pipeline = Pipeline::new(config);
    pipeline.run(&IntrospectionParser::new(), sources, annotations, &emitters)?;
    Ok(pipeline)
}
