//! Interface tree model
//!
//! The parser builds this tree once per run; afterwards the core only
//! prepends annotations and fills the derived naming fields during
//! post-processing.
//!
//! ```text
//! Interface ─┬─ Method ───┬─ in Arg
//!            │            └─ out Arg
//!            ├─ Signal ───── Arg
//!            └─ Property
//! ```
//!
//! Every node carries its own ordered annotation sequence.

use crate::signature::CType;
use serde::Serialize;

/// A key/value metadata pair attached to a single node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Capability shared by every addressable node: it owns an annotation sequence
///
/// New annotations go to the front of the sequence and lookups scan
/// front-to-back, so the most recently applied annotation for a key wins.
pub trait Annotated {
    /// Annotations in lookup order
    fn annotations(&self) -> &[Annotation];

    /// Mutable access to the annotation sequence
    fn annotations_mut(&mut self) -> &mut Vec<Annotation>;

    /// Attach an annotation, taking precedence over existing ones with the same key
    fn annotate(&mut self, annotation: Annotation) {
        self.annotations_mut().insert(0, annotation);
    }

    /// First value stored under `key`, if any
    fn lookup_annotation(&self, key: &str) -> Option<&str> {
        self.annotations()
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

macro_rules! impl_annotated {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Annotated for $ty {
                fn annotations(&self) -> &[Annotation] {
                    &self.annotations
                }

                fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
                    &mut self.annotations
                }
            }
        )*
    };
}

impl_annotated!(Interface, Method, Signal, Property, Arg);

/// Derived names and documentation for an interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceNaming {
    /// Set once post-processing has run on the interface
    pub processed: bool,
    /// Interface name with the configured prefix removed
    pub name_without_prefix: String,
    /// Namespace-qualified CamelCase type name, e.g. `MyAppFrobber`
    pub camel_name: String,
    /// Namespace-qualified snake_case name, e.g. `my_app_frobber`
    pub name_lower: String,
    /// Screaming snake case name without namespace, e.g. `FROBBER`
    pub name_upper: String,
    /// Namespace in snake_case with trailing underscore, or empty
    pub ns_lower: String,
    /// Namespace in screaming snake case with trailing underscore, or empty
    pub ns_upper: String,
    pub deprecated: bool,
    pub since: String,
    pub doc_string: String,
}

/// Derived names and documentation for a method, signal, or property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberNaming {
    pub name_lower: String,
    pub name_hyphen: String,
    pub deprecated: bool,
    pub since: String,
    pub doc_string: String,
}

/// A named D-Bus interface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub name: String,
    pub methods: Vec<Method>,
    pub signals: Vec<Signal>,
    pub properties: Vec<Property>,
    pub annotations: Vec<Annotation>,
    pub naming: InterfaceNaming,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            signals: Vec::new(),
            properties: Vec::new(),
            annotations: Vec::new(),
            naming: InterfaceNaming::default(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// First method named `name`
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.name == name)
    }

    /// First signal named `name`
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub fn signal_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.iter_mut().find(|s| s.name == name)
    }

    /// First property named `name`
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    /// Total number of annotations on this interface and everything below it
    pub fn annotation_count(&self) -> usize {
        let methods: usize = self
            .methods
            .iter()
            .map(|m| {
                m.annotations.len()
                    + m.in_args
                        .iter()
                        .chain(&m.out_args)
                        .map(|a| a.annotations.len())
                        .sum::<usize>()
            })
            .sum();
        let signals: usize = self
            .signals
            .iter()
            .map(|s| s.annotations.len() + s.args.iter().map(|a| a.annotations.len()).sum::<usize>())
            .sum();
        let properties: usize = self.properties.iter().map(|p| p.annotations.len()).sum();

        self.annotations.len() + methods + signals + properties
    }
}

/// A callable operation with input and output arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub in_args: Vec<Arg>,
    pub out_args: Vec<Arg>,
    pub annotations: Vec<Annotation>,
    pub naming: MemberNaming,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_args: Vec::new(),
            out_args: Vec::new(),
            annotations: Vec::new(),
            naming: MemberNaming::default(),
        }
    }

    pub fn with_in_arg(mut self, arg: Arg) -> Self {
        self.in_args.push(arg);
        self
    }

    pub fn with_out_arg(mut self, arg: Arg) -> Self {
        self.out_args.push(arg);
        self
    }

    /// First argument named `name`, searching input arguments before output arguments
    pub fn arg_mut(&mut self, name: &str) -> Option<&mut Arg> {
        self.in_args
            .iter_mut()
            .chain(self.out_args.iter_mut())
            .find(|a| a.name.as_deref() == Some(name))
    }
}

/// An asynchronous notification carrying arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub name: String,
    pub args: Vec<Arg>,
    pub annotations: Vec<Annotation>,
    pub naming: MemberNaming,
}

impl Signal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            annotations: Vec::new(),
            naming: MemberNaming::default(),
        }
    }

    pub fn with_arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn arg_mut(&mut self, name: &str) -> Option<&mut Arg> {
        self.args
            .iter_mut()
            .find(|a| a.name.as_deref() == Some(name))
    }
}

/// Property access mode as declared in introspection data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyAccess {
    Read,
    Write,
    ReadWrite,
}

impl PropertyAccess {
    /// Parse the `access` attribute value (`read`, `write`, `readwrite`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(PropertyAccess::Read),
            "write" => Some(PropertyAccess::Write),
            "readwrite" => Some(PropertyAccess::ReadWrite),
            _ => None,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, PropertyAccess::Read | PropertyAccess::ReadWrite)
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, PropertyAccess::Write | PropertyAccess::ReadWrite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyAccess::Read => "read",
            PropertyAccess::Write => "write",
            PropertyAccess::ReadWrite => "readwrite",
        }
    }
}

impl std::fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed attribute of an interface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub signature: String,
    pub access: PropertyAccess,
    pub annotations: Vec<Annotation>,
    pub naming: MemberNaming,
    pub ctype: CType,
}

impl Property {
    pub fn new(name: impl Into<String>, signature: impl Into<String>, access: PropertyAccess) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            access,
            annotations: Vec::new(),
            naming: MemberNaming::default(),
            ctype: CType::default(),
        }
    }
}

/// A typed argument of a method or signal
///
/// Introspection data may leave arguments unnamed; such arguments cannot be
/// targeted by name and get a positional C name during post-processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name: Option<String>,
    pub signature: String,
    pub annotations: Vec<Annotation>,
    /// Name used in generated code: the argument name, or `arg_<n>` when anonymous
    pub c_name: String,
    pub ctype: CType,
}

impl Arg {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            signature: signature.into(),
            annotations: Vec::new(),
            c_name: String::new(),
            ctype: CType::default(),
        }
    }

    /// An argument without a name
    pub fn anonymous(signature: impl Into<String>) -> Self {
        Self {
            name: None,
            ..Self::new(String::new(), signature)
        }
    }
}
