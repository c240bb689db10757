//! Addressable node handles

use crate::model::{Annotated, Annotation, Arg, Interface, Method, Property, Signal};

/// The five kinds of node an annotation can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Interface,
    Method,
    Signal,
    Property,
    Arg,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Interface => write!(f, "interface"),
            NodeKind::Method => write!(f, "method"),
            NodeKind::Signal => write!(f, "signal"),
            NodeKind::Property => write!(f, "property"),
            NodeKind::Arg => write!(f, "arg"),
        }
    }
}

/// Mutable handle to a resolved node
pub enum NodeMut<'a> {
    Interface(&'a mut Interface),
    Method(&'a mut Method),
    Signal(&'a mut Signal),
    Property(&'a mut Property),
    Arg(&'a mut Arg),
}

impl NodeMut<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeMut::Interface(_) => NodeKind::Interface,
            NodeMut::Method(_) => NodeKind::Method,
            NodeMut::Signal(_) => NodeKind::Signal,
            NodeMut::Property(_) => NodeKind::Property,
            NodeMut::Arg(_) => NodeKind::Arg,
        }
    }

    /// Name of the node (anonymous args have none)
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeMut::Interface(i) => Some(&i.name),
            NodeMut::Method(m) => Some(&m.name),
            NodeMut::Signal(s) => Some(&s.name),
            NodeMut::Property(p) => Some(&p.name),
            NodeMut::Arg(a) => a.name.as_deref(),
        }
    }

    fn as_annotated(&mut self) -> &mut dyn Annotated {
        match self {
            NodeMut::Interface(i) => &mut **i,
            NodeMut::Method(m) => &mut **m,
            NodeMut::Signal(s) => &mut **s,
            NodeMut::Property(p) => &mut **p,
            NodeMut::Arg(a) => &mut **a,
        }
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        self.as_annotated().annotations_mut()
    }

    /// Prepend an annotation to the node
    pub fn annotate(&mut self, annotation: Annotation) {
        self.as_annotated().annotate(annotation);
    }
}

impl std::fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMut")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
