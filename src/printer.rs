use std::{fmt, io};

use crate::{Version, render};

/// The four renderings a [`Document`] can be turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Html,
    /// Compact, DevSim compatible json for a single device.
    Json,
    FullJson,
}

impl OutputFormat {
    /// Text and html, the formats meant to be read by people.
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Text | Self::Html)
    }

    pub const fn is_tree(self) -> bool {
        matches!(self, Self::Json | Self::FullJson)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    #[default]
    Plain,
    Type,
    Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// A piece of text made of independently decorated segments.
///
/// Human formats may highlight [`Style::Type`] and [`Style::Value`] segments,
/// tree formats only ever see the concatenated text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label {
    segments: Vec<Segment>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, text: impl fmt::Display) -> Self {
        self.push(text, Style::Plain)
    }

    /// Append a segment decorated as a type name.
    pub fn kind(self, text: impl fmt::Display) -> Self {
        self.push(text, Style::Type)
    }

    /// Append a segment decorated as a value.
    pub fn value(self, text: impl fmt::Display) -> Self {
        self.push(text, Style::Value)
    }

    fn push(mut self, text: impl fmt::Display, style: Style) -> Self {
        let text = text.to_string();

        if !text.is_empty() {
            self.segments.push(Segment { text, style });
        }

        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.text.len()).sum()
    }

    fn restyle(mut self, style: Style) -> Self {
        for segment in &mut self.segments {
            segment.style = style;
        }

        self
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new().text(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::new().text(text)
    }
}

impl From<&String> for Label {
    fn from(text: &String) -> Self {
        Self::new().text(text)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }

        Ok(())
    }
}

/// A typed scalar. Renderers decide how each kind is spelled.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f32),
    Str(String),
    /// A number shown in hexadecimal by every format except compact json.
    Hex(u64),
    Enum { raw: i64, name: String },
    Flags { bits: u64, names: Vec<String> },
}

impl Value {
    pub fn hex(value: impl Into<u64>) -> Self {
        Self::Hex(value.into())
    }
}

macro_rules! value_from {
    ($variant:ident($target:ty): $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

value_from!(Bool(bool): bool);
value_from!(Int(i64): i8, i16, i32, i64);
value_from!(UInt(u64): u8, u16, u32, u64);
value_from!(Float(f32): f32);
value_from!(Str(String): String, &str, &String);

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Header,
    SubHeader,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    Increase,
    Decrease,
}

/// An object or array together with its children and presentation hints.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub label: Label,
    pub index: Option<usize>,
    pub expected_len: Option<usize>,
    pub heading: Option<Heading>,
    pub open: bool,
    pub children: Vec<Node>,
}

impl Container {
    /// The first child object whose label reads `label`.
    pub fn object(&self, label: &str) -> Option<&Container> {
        find(&self.children, label, |node| match node {
            Node::Object(container) => Some(container),
            _ => None,
        })
    }

    pub fn array(&self, label: &str) -> Option<&Container> {
        find(&self.children, label, |node| match node {
            Node::Array(container) => Some(container),
            _ => None,
        })
    }

    pub fn entry(&self, key: &str) -> Option<&KeyValue> {
        self.children.iter().find_map(|node| match node {
            Node::Entry(entry) if entry.key == key => Some(entry),
            _ => None,
        })
    }

    /// Children that carry content, skipping newlines and indentation.
    pub fn items(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|node| !node.is_cosmetic())
    }
}

fn find<'a>(
    nodes: &'a [Node],
    label: &str,
    select: impl Fn(&'a Node) -> Option<&'a Container>,
) -> Option<&'a Container> {
    nodes
        .iter()
        .filter_map(select)
        .find(|container| container.label.to_string() == label)
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
    pub width: usize,
    pub annotation: Option<String>,
    pub as_type: bool,
    /// Flag sets start expanded in html.
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Object(Container),
    Array(Container),
    Entry(KeyValue),
    /// A free standing label, printed without a key.
    Text(Label),
    /// An anonymous value, usually an array element.
    Element { value: Value, as_type: bool },
    Newline,
    Indent(Shift),
}

impl Node {
    pub fn is_cosmetic(&self) -> bool {
        matches!(self, Self::Newline | Self::Indent(_))
    }
}

/// Data every renderer may need for its preamble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub api_version: Version,
    pub selected_gpu: usize,
}

/// A finished, balanced document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub format: OutputFormat,
    pub info: DocumentInfo,
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn render(&self, out: &mut impl io::Write) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => render::text::render(self, out),
            OutputFormat::Html => render::html::render(self, out),
            OutputFormat::Json => render::json::render(self, render::json::Flavor::Compact, out),
            OutputFormat::FullJson => render::json::render(self, render::json::Flavor::Full, out),
        }
    }

    pub fn render_to_string(&self) -> String {
        let mut out = Vec::new();

        // writing into a Vec cannot fail
        let _ = self.render(&mut out);

        String::from_utf8_lossy(&out).into_owned()
    }

    pub fn object(&self, label: &str) -> Option<&Container> {
        find(&self.nodes, label, |node| match node {
            Node::Object(container) => Some(container),
            _ => None,
        })
    }

    pub fn array(&self, label: &str) -> Option<&Container> {
        find(&self.nodes, label, |node| match node {
            Node::Array(container) => Some(container),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Object,
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Object => f.write_str("object"),
            Kind::Array => f.write_str("array"),
        }
    }
}

struct Frame {
    kind: Kind,
    container: Container,
}

/// Hints that apply to the next container or entry only.
#[derive(Default)]
struct Pending {
    index: Option<usize>,
    heading: Option<Heading>,
    open: bool,
    title_as_type: bool,
    as_type: bool,
}

/// Records a sequence of structured output calls into a [`Document`].
///
/// Every `*_start` must be matched by the corresponding `*_end` before
/// [`Printer::finish`]; mismatches panic.
pub struct Printer {
    format: OutputFormat,
    info: DocumentInfo,
    root: Vec<Node>,
    stack: Vec<Frame>,
    pending: Pending,
}

impl Printer {
    pub fn new(format: OutputFormat, info: DocumentInfo) -> Self {
        Self {
            format,
            info,
            root: Vec::new(),
            stack: Vec::new(),
            pending: Pending::default(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_element_index(&mut self, index: usize) -> &mut Self {
        self.pending.index = Some(index);
        self
    }

    pub fn set_header(&mut self) -> &mut Self {
        self.pending.heading = Some(Heading::Header);
        self
    }

    pub fn set_sub_header(&mut self) -> &mut Self {
        self.pending.heading = Some(Heading::SubHeader);
        self
    }

    pub fn set_open_details(&mut self) -> &mut Self {
        self.pending.open = true;
        self
    }

    pub fn set_title_as_type(&mut self) -> &mut Self {
        self.pending.title_as_type = true;
        self
    }

    pub fn set_as_type(&mut self) -> &mut Self {
        self.pending.as_type = true;
        self
    }

    pub fn object_start(&mut self, label: impl Into<Label>) {
        self.open(Kind::Object, label.into(), None);
    }

    pub fn object_end(&mut self) {
        self.close(Kind::Object);
    }

    /// Open an array. `expected_len` is only shown, never checked.
    pub fn array_start(&mut self, label: impl Into<Label>, expected_len: usize) {
        self.open(Kind::Array, label.into(), Some(expected_len));
    }

    pub fn array_end(&mut self) {
        self.close(Kind::Array);
    }

    pub fn print_key_value(&mut self, key: &str, value: impl Into<Value>, width: usize) {
        self.print_entry(key, value.into(), width, None);
    }

    /// Like [`Printer::print_key_value`], with a gloss only human formats show.
    pub fn print_key_value_annotated(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        width: usize,
        annotation: impl Into<String>,
    ) {
        self.print_entry(key, value.into(), width, Some(annotation.into()));
    }

    pub fn print_key_string(&mut self, key: &str, value: impl Into<String>, width: usize) {
        self.print_entry(key, Value::Str(value.into()), width, None);
    }

    pub fn print_string(&mut self, label: impl Into<Label>) {
        let mut label = label.into();

        if std::mem::take(&mut self.pending.as_type) {
            label = label.restyle(Style::Type);
        }

        self.push(Node::Text(label));
    }

    pub fn print_element(&mut self, value: impl Into<Value>) {
        let as_type = std::mem::take(&mut self.pending.as_type);

        self.push(Node::Element {
            value: value.into(),
            as_type,
        });
    }

    pub fn indent_increase(&mut self) {
        self.push(Node::Indent(Shift::Increase));
    }

    pub fn indent_decrease(&mut self) {
        self.push(Node::Indent(Shift::Decrease));
    }

    pub fn add_newline(&mut self) {
        self.push(Node::Newline);
    }

    /// Finalize the document.
    ///
    /// # Panics
    /// Panics if any container is still open.
    #[track_caller]
    pub fn finish(self) -> Document {
        if let Some(frame) = self.stack.last() {
            panic!(
                "document finished with {} unclosed container(s), innermost is {} `{}`",
                self.stack.len(),
                frame.kind,
                frame.container.label,
            );
        }

        Document {
            format: self.format,
            info: self.info,
            nodes: self.root,
        }
    }

    fn print_entry(&mut self, key: &str, value: Value, width: usize, annotation: Option<String>) {
        let as_type = std::mem::take(&mut self.pending.as_type);
        let open = std::mem::take(&mut self.pending.open);

        self.push(Node::Entry(KeyValue {
            key: key.to_owned(),
            value,
            width,
            annotation,
            as_type,
            open,
        }));
    }

    fn open(&mut self, kind: Kind, label: Label, expected_len: Option<usize>) {
        let pending = std::mem::take(&mut self.pending);

        let label = match pending.title_as_type {
            true => label.restyle(Style::Type),
            false => label,
        };

        self.stack.push(Frame {
            kind,
            container: Container {
                label,
                index: pending.index,
                expected_len,
                heading: pending.heading,
                open: pending.open,
                children: Vec::new(),
            },
        });
    }

    #[track_caller]
    fn close(&mut self, kind: Kind) {
        let Some(frame) = self.stack.pop() else {
            panic!("{kind}_end called with no open container");
        };

        assert!(
            frame.kind == kind,
            "{kind}_end called while {} `{}` is open",
            frame.kind,
            frame.container.label,
        );

        let node = match kind {
            Kind::Object => Node::Object(frame.container),
            Kind::Array => Node::Array(frame.container),
        };

        self.push(node);
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.container.children.push(node),
            None => self.root.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> Printer {
        Printer::new(OutputFormat::Text, DocumentInfo::default())
    }

    #[test]
    fn balanced_calls_build_a_tree() {
        let mut p = printer();
        p.set_header().object_start("Outer");
        p.print_key_value("a", 1u32, 0);
        p.array_start("list", 2);
        p.print_element(true);
        p.print_element("two");
        p.array_end();
        p.object_end();

        let document = p.finish();
        let outer = document.object("Outer").unwrap();

        assert_eq!(outer.heading, Some(Heading::Header));
        assert_eq!(outer.entry("a").unwrap().value, Value::UInt(1));
        assert_eq!(outer.array("list").unwrap().items().count(), 2);
    }

    #[test]
    #[should_panic(expected = "unclosed container")]
    fn finishing_with_open_container_panics() {
        let mut p = printer();
        p.object_start("Outer");
        p.finish();
    }

    #[test]
    #[should_panic(expected = "no open container")]
    fn unmatched_end_panics() {
        let mut p = printer();
        p.object_end();
    }

    #[test]
    #[should_panic(expected = "array_end called while object")]
    fn mismatched_end_panics() {
        let mut p = printer();
        p.object_start("Outer");
        p.array_end();
    }

    #[test]
    fn modifiers_apply_to_the_next_item_only() {
        let mut p = printer();
        p.set_element_index(3).set_open_details().object_start("First");
        p.object_end();
        p.object_start("Second");
        p.object_end();
        p.set_as_type().print_string("typed");
        p.print_string("plain");

        let document = p.finish();
        let first = document.object("First").unwrap();
        let second = document.object("Second").unwrap();

        assert_eq!((first.index, first.open), (Some(3), true));
        assert_eq!((second.index, second.open), (None, false));

        let styles: Vec<_> = document
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text(label) => Some(label.segments()[0].style),
                _ => None,
            })
            .collect();

        assert_eq!(styles, [Style::Type, Style::Plain]);
    }

    #[test]
    fn label_segments_concatenate() {
        let label = Label::new().kind("GPU").text(" id : ").value(0);

        assert_eq!(label.to_string(), "GPU id : 0");
        assert_eq!(label.len(), 10);
        assert_eq!(label.segments()[2].style, Style::Value);
    }
}
