//! busgen-core - Interface tree, annotation targeting, and pipeline orchestration
//!
//! This crate provides the parts of the D-Bus code generator that do not
//! depend on an input format or an output language:
//! - [`Interface`] and friends, the in-memory interface tree
//! - [`Target`] and [`resolve`] for addressing a single node with a target expression
//! - [`apply_annotations`] for attaching command-line annotations
//! - [`process_interface`] for deriving C names
//! - [`Pipeline`] for sequencing parse → annotate → post-process → emit
//!
//! Parsers and emitters plug in through [`InterfaceParser`] and [`Emitter`].

pub mod annotate;
mod config;
mod error;
pub mod model;
pub mod naming;
mod node;
mod pipeline;
pub mod postprocess;
pub mod signature;
mod stage;
pub mod target;

pub use annotate::{AnnotationSpec, apply_annotation, apply_annotations};
pub use config::{GeneratorConfig, PostProcessScope};
pub use error::{CodegenError, CodegenResult, ResolveError};
pub use model::{
    Annotated, Annotation, Arg, Interface, InterfaceNaming, MemberNaming, Method, Property,
    PropertyAccess, Signal,
};
pub use node::{NodeKind, NodeMut};
pub use pipeline::{Emitter, InterfaceParser, Pipeline};
pub use postprocess::process_interface;
pub use signature::CType;
pub use stage::PipelineStage;
pub use target::{Target, resolve, resolve_target};
