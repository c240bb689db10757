//! Generation pipeline orchestration
//!
//! ```text
//! sources ─→ [parse + merge] ─→ [annotate] ─→ [post-process] ─→ [emit]* ─→ done
//! ```
//!
//! Each stage runs to completion before the next starts. Any error moves the
//! pipeline to [`PipelineStage::Aborted`]; nothing after the failed stage runs.

use crate::annotate::{AnnotationSpec, apply_annotations};
use crate::config::{GeneratorConfig, PostProcessScope};
use crate::error::{CodegenError, CodegenResult};
use crate::model::Interface;
use crate::postprocess::process_interface;
use crate::stage::PipelineStage;
use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info, warn};

/// Turns one interface description source into interfaces
pub trait InterfaceParser {
    /// Parse every interface in `source`, in document order
    fn parse(&self, source: &Path) -> CodegenResult<Vec<Interface>>;
}

/// Produces one category of generated artifact from the finished tree
pub trait Emitter {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Write artifacts for `interfaces`
    fn emit(&self, interfaces: &[Interface], config: &GeneratorConfig) -> CodegenResult<()>;
}

/// A single generation run
#[derive(Debug)]
pub struct Pipeline {
    config: GeneratorConfig,
    stage: PipelineStage,
    interfaces: Vec<Interface>,
    /// Indices of the interfaces contributed by the last source
    last_source: Range<usize>,
}

impl Pipeline {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            stage: PipelineStage::Idle,
            interfaces: Vec::new(),
            last_source: 0..0,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The merged interface set, in load order
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// Run every stage in order.
    pub fn run<P: AsRef<Path>>(
        &mut self,
        parser: &dyn InterfaceParser,
        sources: &[P],
        annotations: &[AnnotationSpec],
        emitters: &[&dyn Emitter],
    ) -> CodegenResult<()> {
        self.load(parser, sources)?;
        self.annotate(annotations)?;
        self.post_process()?;
        self.emit(emitters)?;
        self.finish()
    }

    /// Parse every source and concatenate the results.
    ///
    /// Interface names are not required to be unique; lookups by name find
    /// the first one loaded.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        parser: &dyn InterfaceParser,
        sources: &[P],
    ) -> CodegenResult<()> {
        self.check_transition(PipelineStage::Loaded)?;

        if sources.is_empty() {
            return self.abort(CodegenError::Config(
                "at least one interface description is required".to_string(),
            ));
        }

        for source in sources {
            let source = source.as_ref();
            let parsed = match parser.parse(source) {
                Ok(parsed) => parsed,
                Err(err) => return self.abort(err),
            };

            debug!(source = %source.display(), count = parsed.len(), "parsed interfaces");

            let start = self.interfaces.len();
            self.interfaces.extend(parsed);
            self.last_source = start..self.interfaces.len();
        }

        let mut seen = HashSet::new();
        for iface in &self.interfaces {
            if !seen.insert(iface.name.as_str()) {
                warn!(
                    interface = %iface.name,
                    "duplicate interface name; only the first definition is addressable"
                );
            }
        }

        info!(
            sources = sources.len(),
            interfaces = self.interfaces.len(),
            "loaded interface descriptions"
        );

        self.set_stage(PipelineStage::Loaded);
        Ok(())
    }

    /// Apply command-line annotations to the merged set.
    pub fn annotate(&mut self, annotations: &[AnnotationSpec]) -> CodegenResult<()> {
        self.check_transition(PipelineStage::Annotated)?;

        if let Err(err) = apply_annotations(&mut self.interfaces, annotations) {
            return self.abort(err.into());
        }

        if !annotations.is_empty() {
            info!(count = annotations.len(), "applied annotations");
        }

        self.set_stage(PipelineStage::Annotated);
        Ok(())
    }

    /// Derive C names for the interfaces selected by the configured scope.
    pub fn post_process(&mut self) -> CodegenResult<()> {
        self.check_transition(PipelineStage::PostProcessed)?;

        let range = match self.config.post_process_scope {
            PostProcessScope::All => 0..self.interfaces.len(),
            PostProcessScope::LastSource => self.last_source.clone(),
        };

        let prefix = &self.config.interface_prefix;
        let namespace = &self.config.c_namespace;
        for iface in &mut self.interfaces[range] {
            process_interface(iface, prefix, namespace);
        }

        self.set_stage(PipelineStage::PostProcessed);
        Ok(())
    }

    /// Run each emitter over the full interface set, stopping at the first failure.
    ///
    /// Artifacts written by earlier emitters are left in place on failure.
    pub fn emit(&mut self, emitters: &[&dyn Emitter]) -> CodegenResult<()> {
        self.check_transition(PipelineStage::Emitted)?;

        for emitter in emitters {
            debug!(emitter = emitter.name(), "running emitter");
            if let Err(err) = emitter.emit(&self.interfaces, &self.config) {
                return self.abort(err);
            }
        }

        self.set_stage(PipelineStage::Emitted);
        Ok(())
    }

    /// Mark the run complete.
    pub fn finish(&mut self) -> CodegenResult<()> {
        self.check_transition(PipelineStage::Done)?;
        self.set_stage(PipelineStage::Done);
        Ok(())
    }

    fn check_transition(&self, target: PipelineStage) -> CodegenResult<()> {
        if self.stage.can_transition_to(target) {
            return Ok(());
        }

        let expected = if self.stage.is_terminal() {
            "a run that has not ended".to_string()
        } else {
            format!("stage that can transition to {target}")
        };
        Err(CodegenError::InvalidStage { expected, actual: self.stage.to_string() })
    }

    fn set_stage(&mut self, stage: PipelineStage) {
        debug!(from = %self.stage, to = %stage, detail = stage.description(), "pipeline stage");
        self.stage = stage;
    }

    fn abort<T>(&mut self, err: CodegenError) -> CodegenResult<T> {
        warn!(stage = %self.stage, error = %err, "aborting run");
        self.set_stage(PipelineStage::Aborted);
        Err(err)
    }
}
