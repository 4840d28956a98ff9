use std::io::{self, Write};

use super::human_value;
use crate::{Container, Document, Heading, KeyValue, Label, Node, Style, Value};

const PROLOGUE: &str = "<!doctype html>
<html lang='en'>
\t<head>
\t\t<title>vulkaninfo</title>
\t\t<meta charset='utf-8' />
\t\t<style>
\t\thtml {
\t\t\tbackground-color: #0b1e48;
\t\t\tfont-family: monospace;
\t\t\tfont-size: 14px;
\t\t}
\t\t#wrapper {
\t\t\tbackground-color: rgba(0, 0, 0, 0.7);
\t\t\tborder: 1px solid #446;
\t\t\tcolor: #fff;
\t\t\tmargin: 20px auto;
\t\t\tmax-width: 1100px;
\t\t\tpadding: 20px;
\t\t}
\t\tsummary {
\t\t\tcursor: pointer;
\t\t}
\t\tdetails > details {
\t\t\tmargin-left: 24px;
\t\t}
\t\t.header {
\t\t\tfont-size: 120%;
\t\t\tfont-weight: bold;
\t\t}
\t\t.sub-header {
\t\t\tfont-weight: bold;
\t\t}
\t\t.type {
\t\t\tcolor: #fc0;
\t\t}
\t\t.val {
\t\t\tcolor: #8ad;
\t\t}
\t\t</style>
\t</head>
\t<body>
\t\t<div id='header'>
\t\t\t<h1>vulkaninfo</h1>
\t\t</div>
\t\t<div id='wrapper'>
";

const EPILOGUE: &str = "\t\t</div>
\t</body>
</html>
";

pub(crate) fn render(document: &Document, out: &mut impl Write) -> io::Result<()> {
    out.write_all(PROLOGUE.as_bytes())?;
    writeln!(
        out,
        "\t\t\t<details><summary>Vulkan Instance Version: <span class='val'>{}</span></summary></details>",
        document.info.api_version,
    )?;
    writeln!(out, "\t\t\t<br />")?;

    let mut writer = HtmlWriter { out, depth: 3 };
    writer.nodes(&document.nodes)?;

    writer.out.write_all(EPILOGUE.as_bytes())
}

/// Escape the characters html treats specially in text content.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }

    escaped
}

fn span(class: &str, text: &str) -> String {
    format!("<span class='{class}'>{}</span>", escape(text))
}

fn label_html(label: &Label) -> String {
    label
        .segments()
        .iter()
        .map(|segment| match segment.style {
            Style::Plain => escape(&segment.text),
            Style::Type => span("type", &segment.text),
            Style::Value => span("val", &segment.text),
        })
        .collect()
}

struct HtmlWriter<'a, W> {
    out: &'a mut W,
    depth: usize,
}

impl<W: Write> HtmlWriter<'_, W> {
    fn nodes(&mut self, nodes: &[Node]) -> io::Result<()> {
        for node in nodes {
            self.node(node)?;
        }

        Ok(())
    }

    fn node(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Object(container) => {
                let summary = self.title(container);
                self.container(container, summary)
            }
            Node::Array(container) => {
                let count = container
                    .expected_len
                    .unwrap_or_else(|| container.items().count());
                let summary = format!(
                    "{}: count = {}",
                    self.title(container),
                    span("val", &count.to_string()),
                );

                self.container(container, summary)
            }
            Node::Entry(entry) => self.entry(entry),
            Node::Text(label) => self.leaf(&label_html(label)),
            Node::Element { value, as_type } => {
                let class = if *as_type { "type" } else { "val" };
                self.leaf(&span(class, &human_value(value)))
            }
            Node::Newline | Node::Indent(_) => Ok(()),
        }
    }

    fn title(&self, container: &Container) -> String {
        let mut title = label_html(&container.label);

        if let Some(index) = container.index {
            title.push_str(&format!("[{index}]"));
        }

        title
    }

    fn container(&mut self, container: &Container, summary: String) -> io::Result<()> {
        if container.label.is_empty() && container.expected_len.is_none() {
            return self.nodes(&container.children);
        }

        let open = if container.open { " open" } else { "" };
        let class = match container.heading {
            Some(Heading::Header) => " class='header'",
            Some(Heading::SubHeader) => " class='sub-header'",
            None => "",
        };

        self.pad()?;
        writeln!(self.out, "<details{open}><summary{class}>{summary}</summary>")?;

        self.depth += 1;
        self.nodes(&container.children)?;
        self.depth -= 1;

        self.pad()?;
        writeln!(self.out, "</details>")
    }

    fn entry(&mut self, entry: &KeyValue) -> io::Result<()> {
        let key = escape(&entry.key);

        if let Value::Flags { names, .. } = &entry.value {
            if !names.is_empty() {
                self.pad()?;
                let open = if entry.open { " open" } else { "" };

                writeln!(
                    self.out,
                    "<details{open}><summary>{key}: count = {}</summary>",
                    span("val", &names.len().to_string()),
                )?;

                self.depth += 1;
                for name in names {
                    self.leaf(&span("type", name))?;
                }
                self.depth -= 1;

                self.pad()?;
                return writeln!(self.out, "</details>");
            }
        }

        let class = if entry.as_type { "type" } else { "val" };
        let mut summary = format!("{key} = {}", span(class, &human_value(&entry.value)));

        if let Some(annotation) = &entry.annotation {
            summary.push_str(&format!(" ({})", span("val", annotation)));
        }

        self.leaf(&summary)
    }

    fn leaf(&mut self, summary: &str) -> io::Result<()> {
        self.pad()?;
        writeln!(self.out, "<details><summary>{summary}</summary></details>")
    }

    fn pad(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(b"\t")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentInfo, OutputFormat, Printer};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn page_is_wrapped_and_decorated() {
        let mut p = Printer::new(OutputFormat::Html, DocumentInfo::default());
        p.set_header().object_start(Label::new().text("GPU id : ").value(0).text(" (<gpu>)"));
        p.print_key_value("count", 2u32, 0);
        p.set_as_type().print_string("FORMAT_R8_UNORM");
        p.object_end();

        let html = p.finish().render_to_string();

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains(
            "<details><summary class='header'>GPU id : <span class='val'>0</span> (&lt;gpu&gt;)</summary>"
        ));
        assert!(html.contains("<details><summary>count = <span class='val'>2</span></summary></details>"));
        assert!(html.contains("<span class='type'>FORMAT_R8_UNORM</span>"));
        assert_eq!(html.matches("<details").count(), html.matches("</details>").count());
    }
}
