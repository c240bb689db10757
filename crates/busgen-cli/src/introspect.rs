//! D-Bus introspection XML parser
//!
//! Reads the standard introspection format:
//!
//! ```xml
//! <node>
//!   <interface name="org.example.Frobber">
//!     <method name="HelloWorld">
//!       <arg name="greeting" type="s" direction="in"/>
//!       <arg name="response" type="s" direction="out"/>
//!     </method>
//!     <signal name="Notification">
//!       <arg name="icon_blob" type="ay"/>
//!     </signal>
//!     <property name="Volume" type="d" access="readwrite">
//!       <annotation name="org.gtk.GDBus.Since" value="2.30"/>
//!     </property>
//!   </interface>
//! </node>
//! ```
//!
//! Child `<node>` elements and unknown elements are skipped along with
//! everything inside them.

use busgen_core::{
    Annotation, Arg, CodegenError, CodegenResult, Interface, InterfaceParser, Method, Property,
    PropertyAccess, Signal,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// [`InterfaceParser`] for D-Bus introspection XML files
#[derive(Debug, Default, Clone, Copy)]
pub struct IntrospectionParser;

impl IntrospectionParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse introspection XML already in memory.
    ///
    /// `path` is only used in error messages.
    pub fn parse_str(&self, xml: &str, path: &Path) -> CodegenResult<Vec<Interface>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut document = Document::default();

        loop {
            let step = match reader.read_event() {
                Ok(Event::Start(e)) => document.open(&e),
                Ok(Event::Empty(e)) => document.open(&e).and_then(|()| document.close()),
                Ok(Event::End(_)) => document.close(),
                Ok(Event::Eof) => break,
                Ok(_) => Ok(()),
                Err(err) => Err(err.to_string()),
            };

            if let Err(message) = step {
                return Err(parse_error(
                    path,
                    format!("{message} (at byte {})", reader.buffer_position()),
                ));
            }
        }

        document.finish().map_err(|message| parse_error(path, message))
    }
}

impl InterfaceParser for IntrospectionParser {
    fn parse(&self, source: &Path) -> CodegenResult<Vec<Interface>> {
        let xml = fs::read_to_string(source).map_err(|err| CodegenError::Read {
            path: source.to_path_buf(),
            source: err,
        })?;

        let interfaces = self.parse_str(&xml, source)?;
        debug!(
            path = %source.display(),
            interfaces = interfaces.len(),
            "parsed introspection data"
        );
        Ok(interfaces)
    }
}

fn parse_error(path: &Path, message: String) -> CodegenError {
    CodegenError::Parse {
        path: path.to_path_buf(),
        message,
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    In,
    Out,
}

/// An element being built, waiting for its closing tag
#[derive(Debug)]
enum Frame {
    Node,
    Interface(Interface),
    Method(Method),
    Signal(Signal),
    Property(Property),
    Arg { arg: Arg, direction: Direction },
    Annotation(Annotation),
    Skipped,
}

impl Frame {
    fn annotations_mut(&mut self) -> Option<&mut Vec<Annotation>> {
        match self {
            Frame::Interface(i) => Some(&mut i.annotations),
            Frame::Method(m) => Some(&mut m.annotations),
            Frame::Signal(s) => Some(&mut s.annotations),
            Frame::Property(p) => Some(&mut p.annotations),
            Frame::Arg { arg, .. } => Some(&mut arg.annotations),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Document {
    stack: Vec<Frame>,
    interfaces: Vec<Interface>,
    saw_root: bool,
}

impl Document {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), String> {
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        let attrs = Attributes::read(element, &name)?;

        let frame = match (self.stack.last(), name.as_str()) {
            (None, "node") => {
                self.saw_root = true;
                Frame::Node
            }
            (None, _) => return Err(format!("expected <node> root element, found <{name}>")),
            (Some(Frame::Node), "interface") if self.stack.len() == 1 => {
                Frame::Interface(Interface::new(attrs.required("name")?))
            }
            (Some(Frame::Interface(_)), "method") => {
                Frame::Method(Method::new(attrs.required("name")?))
            }
            (Some(Frame::Interface(_)), "signal") => {
                Frame::Signal(Signal::new(attrs.required("name")?))
            }
            (Some(Frame::Interface(_)), "property") => {
                let access = attrs.required("access")?;
                let access = PropertyAccess::parse(&access)
                    .ok_or_else(|| format!("<property> has unknown access `{access}`"))?;
                Frame::Property(Property::new(
                    attrs.required("name")?,
                    attrs.required("type")?,
                    access,
                ))
            }
            (Some(Frame::Method(_)), "arg") => Frame::Arg {
                arg: attrs.arg()?,
                direction: attrs.direction(Direction::In)?,
            },
            (Some(Frame::Signal(_)), "arg") => match attrs.direction(Direction::Out)? {
                Direction::Out => Frame::Arg {
                    arg: attrs.arg()?,
                    direction: Direction::Out,
                },
                Direction::In => return Err("signal <arg> cannot have direction `in`".to_string()),
            },
            (Some(parent), "annotation") if !matches!(parent, Frame::Node | Frame::Skipped) => {
                Frame::Annotation(Annotation::new(
                    attrs.required("name")?,
                    attrs.required("value")?,
                ))
            }
            _ => Frame::Skipped,
        };

        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self) -> Result<(), String> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| "closing tag without matching opening tag".to_string())?;

        let parent = self.stack.last_mut();
        match (frame, parent) {
            (Frame::Interface(iface), _) => self.interfaces.push(iface),
            (Frame::Method(method), Some(Frame::Interface(iface))) => iface.methods.push(method),
            (Frame::Signal(signal), Some(Frame::Interface(iface))) => iface.signals.push(signal),
            (Frame::Property(property), Some(Frame::Interface(iface))) => {
                iface.properties.push(property)
            }
            (Frame::Arg { arg, direction }, Some(Frame::Method(method))) => match direction {
                Direction::In => method.in_args.push(arg),
                Direction::Out => method.out_args.push(arg),
            },
            (Frame::Arg { arg, .. }, Some(Frame::Signal(signal))) => signal.args.push(arg),
            (Frame::Annotation(annotation), Some(parent)) => {
                if let Some(annotations) = parent.annotations_mut() {
                    annotations.push(annotation);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn finish(self) -> Result<Vec<Interface>, String> {
        if !self.stack.is_empty() {
            return Err("unexpected end of document".to_string());
        }
        if !self.saw_root {
            return Err("document has no <node> element".to_string());
        }
        Ok(self.interfaces)
    }
}

/// Attributes of one element, unescaped
struct Attributes<'a> {
    element: &'a str,
    values: HashMap<String, String>,
}

impl<'a> Attributes<'a> {
    fn read(start: &BytesStart<'_>, element: &'a str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| format!("<{element}>: {err}"))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| format!("<{element}> attribute `{key}`: {err}"))?
                .into_owned();
            values.insert(key, value);
        }
        Ok(Self { element, values })
    }

    fn required(&self, key: &str) -> Result<String, String> {
        self.values.get(key).cloned().ok_or_else(|| {
            format!(
                "<{}> is missing required attribute `{key}`",
                self.element
            )
        })
    }

    fn arg(&self) -> Result<Arg, String> {
        let signature = self.required("type")?;
        Ok(match self.values.get("name") {
            Some(name) => Arg::new(name.as_str(), signature),
            None => Arg::anonymous(signature),
        })
    }

    fn direction(&self, default: Direction) -> Result<Direction, String> {
        match self.values.get("direction").map(String::as_str) {
            None => Ok(default),
            Some("in") => Ok(Direction::In),
            Some("out") => Ok(Direction::Out),
            Some(other) => Err(format!("<arg> has unknown direction `{other}`")),
        }
    }
}
