use std::io::{self, Write};

use super::human_value;
use crate::{Container, Document, Heading, KeyValue, Node, Shift, Value};

pub(crate) fn render(document: &Document, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "==========")?;
    writeln!(out, "VULKANINFO")?;
    writeln!(out, "==========")?;
    writeln!(out)?;
    writeln!(out, "Vulkan Instance Version: {}", document.info.api_version)?;
    writeln!(out)?;
    writeln!(out)?;

    let mut writer = TextWriter { out, indent: 0 };
    writer.nodes(&document.nodes)
}

struct TextWriter<'a, W> {
    out: &'a mut W,
    indent: i32,
}

impl<W: Write> TextWriter<'_, W> {
    fn nodes(&mut self, nodes: &[Node]) -> io::Result<()> {
        for node in nodes {
            self.node(node)?;
        }

        Ok(())
    }

    fn node(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Object(container) => self.container(container, None),
            Node::Array(container) => {
                let count = container
                    .expected_len
                    .unwrap_or_else(|| container.items().count());

                self.container(container, Some(count))
            }
            Node::Entry(entry) => self.entry(entry),
            Node::Text(label) => {
                self.pad()?;
                writeln!(self.out, "{label}")
            }
            Node::Element { value, .. } => {
                self.pad()?;
                writeln!(self.out, "{}", human_value(value))
            }
            Node::Newline => writeln!(self.out),
            Node::Indent(Shift::Increase) => {
                self.indent += 1;
                Ok(())
            }
            Node::Indent(Shift::Decrease) => {
                self.indent -= 1;
                Ok(())
            }
        }
    }

    fn container(&mut self, container: &Container, count: Option<usize>) -> io::Result<()> {
        if container.label.is_empty() && count.is_none() {
            return self.nodes(&container.children);
        }

        let mut title = container.label.to_string();

        if let Some(index) = container.index {
            title.push_str(&format!("[{index}]"));
        }

        self.pad()?;

        match count {
            Some(count) => writeln!(self.out, "{title}: count = {count}")?,
            None => writeln!(self.out, "{title}:")?,
        }

        let underline = match container.heading {
            Some(Heading::Header) => Some('='),
            Some(Heading::SubHeader) => Some('-'),
            None => None,
        };

        if let Some(underline) = underline {
            self.pad()?;
            let line: String = std::iter::repeat_n(underline, title.len() + 1).collect();
            writeln!(self.out, "{line}")?;
        }

        self.indent += 1;
        self.nodes(&container.children)?;
        self.indent -= 1;

        Ok(())
    }

    fn entry(&mut self, entry: &KeyValue) -> io::Result<()> {
        self.pad()?;

        if let Value::Flags { names, .. } = &entry.value {
            if !names.is_empty() {
                writeln!(self.out, "{}: count = {}", entry.key, names.len())?;

                self.indent += 1;
                for name in names {
                    self.pad()?;
                    writeln!(self.out, "{name}")?;
                }
                self.indent -= 1;

                return Ok(());
            }
        }

        write!(
            self.out,
            "{:<width$} = {}",
            entry.key,
            human_value(&entry.value),
            width = entry.width,
        )?;

        if let Some(annotation) = &entry.annotation {
            write!(self.out, " ({annotation})")?;
        }

        writeln!(self.out)
    }

    fn pad(&mut self) -> io::Result<()> {
        for _ in 0..self.indent.max(0) {
            self.out.write_all(b"\t")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{DocumentInfo, OutputFormat, Printer, Value, Version};

    fn printer() -> Printer {
        Printer::new(
            OutputFormat::Text,
            DocumentInfo {
                api_version: Version::new(1, 3, 250),
                selected_gpu: 0,
            },
        )
    }

    fn body(text: &str) -> &str {
        text.split_once("Vulkan Instance Version: 1.3.250\n\n\n")
            .map(|(_, body)| body)
            .unwrap()
    }

    #[test]
    fn preamble_names_instance_version() {
        let text = printer().finish().render_to_string();

        assert!(text.starts_with("==========\nVULKANINFO\n==========\n\n"));
        assert!(text.contains("Vulkan Instance Version: 1.3.250"));
    }

    #[test]
    fn headers_are_underlined_and_keys_padded() {
        let mut p = printer();
        p.set_header().object_start("Memory");
        p.print_key_value("a", 1u32, 6);
        p.print_key_value_annotated("size", 1024u64, 6, "1.00 KiB");
        p.object_end();

        let text = p.finish().render_to_string();

        assert_eq!(
            body(&text),
            "Memory:\n=======\n\ta      = 1\n\tsize   = 1024 (1.00 KiB)\n"
        );
    }

    #[test]
    fn arrays_show_counts_and_indices() {
        let mut p = printer();
        p.array_start("Formats", 1);
        p.set_element_index(0).set_sub_header().object_start("SurfaceFormat");
        p.print_key_value("hex", Value::Hex(255), 0);
        p.object_end();
        p.array_end();

        let text = p.finish().render_to_string();

        assert_eq!(
            body(&text),
            "Formats: count = 1\n\tSurfaceFormat[0]:\n\t-----------------\n\t\thex = 0xff\n"
        );
    }

    #[test]
    fn flag_entries_list_names() {
        let mut p = printer();
        p.print_key_value(
            "flags",
            Value::Flags {
                bits: 3,
                names: vec![String::from("A_BIT"), String::from("B_BIT")],
            },
            0,
        );
        p.print_key_value(
            "empty",
            Value::Flags {
                bits: 0,
                names: Vec::new(),
            },
            0,
        );

        let text = p.finish().render_to_string();

        assert_eq!(body(&text), "flags: count = 2\n\tA_BIT\n\tB_BIT\nempty = None\n");
    }

    #[test]
    fn indentation_nodes_shift_children() {
        let mut p = printer();
        p.object_start("Outer");
        p.indent_decrease();
        p.print_string("flush");
        p.indent_increase();
        p.print_string("nested");
        p.object_end();

        let text = p.finish().render_to_string();

        assert_eq!(body(&text), "Outer:\nflush\n\tnested\n");
    }
}
