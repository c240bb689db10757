//! Annotation target expressions
//!
//! A target expression addresses exactly one node of the interface tree:
//!
//! | Expression | Node |
//! |------------|------|
//! | `org.Foo::Changed` | signal `Changed` of `org.Foo` |
//! | `org.Foo::Changed[value]` | arg `value` of that signal |
//! | `org.Foo:Volume` | property `Volume` of `org.Foo` |
//! | `org.Foo.Frob()` | method `Frob` of `org.Foo` |
//! | `org.Foo.Frob()[value]` | arg `value` of that method, in-args first |
//! | `org.Foo` | interface `org.Foo` |
//!
//! Forms are tried in the order above. Matching is exact and the first
//! node with a given name wins.

use crate::error::ResolveError;
use crate::model::Interface;
use crate::node::NodeMut;

/// A parsed target expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Interface {
        interface: String,
    },
    Method {
        interface: String,
        method: String,
        arg: Option<String>,
    },
    Signal {
        interface: String,
        signal: String,
        arg: Option<String>,
    },
    Property {
        interface: String,
        property: String,
    },
}

impl Target {
    /// Parse a target expression.
    ///
    /// Parsing never fails; an expression that names nothing only fails
    /// when resolved against a tree.
    pub fn parse(expression: &str) -> Self {
        if let Some((interface, rest)) = expression.split_once("::") {
            let (signal, arg) = split_arg(rest);
            return Target::Signal {
                interface: interface.to_string(),
                signal: signal.to_string(),
                arg,
            };
        }

        if let Some((interface, property)) = expression.split_once(':') {
            return Target::Property {
                interface: interface.to_string(),
                property: property.to_string(),
            };
        }

        if let Some(pos) = expression.find("()") {
            let combined = &expression[..pos];
            let (interface, method) = match combined.rfind('.') {
                Some(dot) => (&combined[..dot], &combined[dot + 1..]),
                None => ("", combined),
            };
            let (_, arg) = split_arg(expression);
            return Target::Method {
                interface: interface.to_string(),
                method: method.to_string(),
                arg,
            };
        }

        Target::Interface {
            interface: expression.to_string(),
        }
    }

    /// Name of the interface this target lives in
    pub fn interface(&self) -> &str {
        match self {
            Target::Interface { interface }
            | Target::Method { interface, .. }
            | Target::Signal { interface, .. }
            | Target::Property { interface, .. } => interface,
        }
    }
}

/// Split `name[arg]` into `name` and `arg`; a missing `]` takes the rest
fn split_arg(s: &str) -> (&str, Option<String>) {
    match s.split_once('[') {
        Some((name, rest)) => {
            let arg = rest.split_once(']').map_or(rest, |(arg, _)| arg);
            (name, Some(arg.to_string()))
        }
        None => (s, None),
    }
}

/// Resolve a target expression against the run's interfaces.
pub fn resolve<'a>(
    interfaces: &'a mut [Interface],
    expression: &str,
) -> Result<NodeMut<'a>, ResolveError> {
    resolve_target(interfaces, &Target::parse(expression), expression)
}

/// Resolve an already parsed target.
///
/// `expression` is only used to describe failures.
pub fn resolve_target<'a>(
    interfaces: &'a mut [Interface],
    target: &Target,
    expression: &str,
) -> Result<NodeMut<'a>, ResolveError> {
    let iface_name = target.interface();
    let iface = interfaces
        .iter_mut()
        .find(|i| i.name == iface_name)
        .ok_or_else(|| ResolveError::NoInterface {
            expression: expression.to_string(),
            interface: iface_name.to_string(),
        })?;

    match target {
        Target::Interface { .. } => Ok(NodeMut::Interface(iface)),

        Target::Method { method, arg, .. } => {
            let method_obj = iface
                .method_mut(method)
                .ok_or_else(|| ResolveError::NoMethod {
                    expression: expression.to_string(),
                    interface: iface_name.to_string(),
                    method: method.clone(),
                })?;

            match arg {
                None => Ok(NodeMut::Method(method_obj)),
                Some(arg) => method_obj
                    .arg_mut(arg)
                    .map(NodeMut::Arg)
                    .ok_or_else(|| ResolveError::NoMethodArg {
                        expression: expression.to_string(),
                        interface: iface_name.to_string(),
                        method: method.clone(),
                        arg: arg.clone(),
                    }),
            }
        }

        Target::Signal { signal, arg, .. } => {
            let signal_obj = iface
                .signal_mut(signal)
                .ok_or_else(|| ResolveError::NoSignal {
                    expression: expression.to_string(),
                    interface: iface_name.to_string(),
                    signal: signal.clone(),
                })?;

            match arg {
                None => Ok(NodeMut::Signal(signal_obj)),
                Some(arg) => signal_obj
                    .arg_mut(arg)
                    .map(NodeMut::Arg)
                    .ok_or_else(|| ResolveError::NoSignalArg {
                        expression: expression.to_string(),
                        interface: iface_name.to_string(),
                        signal: signal.clone(),
                        arg: arg.clone(),
                    }),
            }
        }

        Target::Property { property, .. } => iface
            .property_mut(property)
            .map(NodeMut::Property)
            .ok_or_else(|| ResolveError::NoProperty {
                expression: expression.to_string(),
                interface: iface_name.to_string(),
                property: property.clone(),
            }),
    }
}
