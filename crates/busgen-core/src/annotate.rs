//! Applying command-line annotations to the interface tree

use crate::error::ResolveError;
use crate::model::{Annotation, Interface};
use crate::target;
use tracing::debug;

/// One `--annotate WHAT KEY VALUE` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    /// Target expression, see [`crate::target`]
    pub target: String,
    pub key: String,
    pub value: String,
}

impl AnnotationSpec {
    pub fn new(
        target: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Resolve a single triple and prepend its annotation to the target node
pub fn apply_annotation(
    interfaces: &mut [Interface],
    spec: &AnnotationSpec,
) -> Result<(), ResolveError> {
    let mut node = target::resolve(interfaces, &spec.target)?;

    debug!(
        target_expr = %spec.target,
        kind = %node.kind(),
        key = %spec.key,
        "applying annotation"
    );

    node.annotate(Annotation::new(spec.key.clone(), spec.value.clone()));
    Ok(())
}

/// Apply a batch of triples in order, stopping at the first unresolved target.
///
/// Triples applied before the failure stay applied; callers abort the run
/// on error, so the partially annotated tree is never emitted.
pub fn apply_annotations(
    interfaces: &mut [Interface],
    batch: &[AnnotationSpec],
) -> Result<(), ResolveError> {
    batch
        .iter()
        .try_for_each(|spec| apply_annotation(interfaces, spec))
}
