use std::io::{self, Write};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{Container, Document, KeyValue, Node, Value};

const DEVSIM_SCHEMA: &str = "https://schema.khronos.org/vulkan/devsim_1_0_0.json#";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// DevSim layout: raw numbers, anonymous containers inside arrays.
    Compact,
    /// Names instead of numbers, indexed containers keyed `label[index]`.
    Full,
}

pub(crate) fn render(document: &Document, flavor: Flavor, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &Root { document, flavor })?;
    writeln!(out)
}

struct Root<'a> {
    document: &'a Document,
    flavor: Flavor,
}

impl Serialize for Root<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if self.flavor == Flavor::Compact {
            let info = self.document.info;

            map.serialize_entry("$schema", DEVSIM_SCHEMA)?;
            map.serialize_entry(
                "comments",
                &serde_json::json!({
                    "desc": format!(
                        "JSON configuration file describing GPU {}. Generated using the vulkaninfo program.",
                        info.selected_gpu,
                    ),
                    "vulkanApiVersion": info.api_version.to_string(),
                }),
            )?;
        }

        members(&mut map, &self.document.nodes, self.flavor)?;
        map.end()
    }
}

/// Children of an object, serialized as map entries.
struct Members<'a> {
    nodes: &'a [Node],
    flavor: Flavor,
}

impl Serialize for Members<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        members(&mut map, self.nodes, self.flavor)?;
        map.end()
    }
}

fn members<M: SerializeMap>(map: &mut M, nodes: &[Node], flavor: Flavor) -> Result<(), M::Error> {
    for node in nodes {
        match node {
            Node::Object(container) => {
                map.serialize_entry(&key(container, flavor), &members_of(container, flavor))?
            }
            Node::Array(container) => {
                map.serialize_entry(&key(container, flavor), &items_of(container, flavor))?
            }
            Node::Entry(entry) => {
                map.serialize_entry(&entry.key, &JsonValue(&entry.value, flavor))?
            }
            Node::Text(label) => map.serialize_entry(&label.to_string(), &())?,
            Node::Element { value, .. } => {
                map.serialize_entry(&crate::render::human_value(value), &())?
            }
            Node::Newline | Node::Indent(_) => {}
        }
    }

    Ok(())
}

/// Children of an array, serialized as sequence elements.
struct Items<'a> {
    nodes: &'a [Node],
    flavor: Flavor,
}

impl Serialize for Items<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;

        for node in self.nodes {
            match node {
                Node::Object(container) => {
                    seq.serialize_element(&members_of(container, self.flavor))?
                }
                Node::Array(container) => seq.serialize_element(&items_of(container, self.flavor))?,
                Node::Entry(entry) => seq.serialize_element(&SingleEntry(entry, self.flavor))?,
                Node::Text(label) => seq.serialize_element(&label.to_string())?,
                Node::Element { value, .. } => {
                    seq.serialize_element(&JsonValue(value, self.flavor))?
                }
                Node::Newline | Node::Indent(_) => {}
            }
        }

        seq.end()
    }
}

fn members_of(container: &Container, flavor: Flavor) -> Members<'_> {
    Members {
        nodes: &container.children,
        flavor,
    }
}

fn items_of(container: &Container, flavor: Flavor) -> Items<'_> {
    Items {
        nodes: &container.children,
        flavor,
    }
}

fn key(container: &Container, flavor: Flavor) -> String {
    match (flavor, container.index) {
        (Flavor::Full, Some(index)) => format!("{}[{index}]", container.label),
        _ => container.label.to_string(),
    }
}

/// A keyed entry appearing inside an array, wrapped in its own object.
struct SingleEntry<'a>(&'a KeyValue, Flavor);

impl Serialize for SingleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.key, &JsonValue(&self.0.value, self.1))?;
        map.end()
    }
}

struct JsonValue<'a>(&'a Value, Flavor);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.0, self.1) {
            (Value::Bool(value), _) => serializer.serialize_bool(*value),
            (Value::Int(value), _) => serializer.serialize_i64(*value),
            (Value::UInt(value), _) => serializer.serialize_u64(*value),
            (Value::Float(value), _) => serializer.serialize_f32(*value),
            (Value::Str(value), _) => serializer.serialize_str(value),
            (Value::Hex(value), Flavor::Compact) => serializer.serialize_u64(*value),
            (Value::Hex(value), Flavor::Full) => {
                serializer.collect_str(&format_args!("0x{value:x}"))
            }
            (Value::Enum { raw, .. }, Flavor::Compact) => serializer.serialize_i64(*raw),
            (Value::Enum { name, .. }, Flavor::Full) => serializer.serialize_str(name),
            (Value::Flags { bits, .. }, Flavor::Compact) => serializer.serialize_u64(*bits),
            (Value::Flags { names, .. }, Flavor::Full) => serializer.collect_seq(names),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{DocumentInfo, OutputFormat, Printer, Value, Version};

    fn printer(format: OutputFormat) -> Printer {
        Printer::new(
            format,
            DocumentInfo {
                api_version: Version::new(1, 2, 162),
                selected_gpu: 1,
            },
        )
    }

    fn sample(format: OutputFormat) -> serde_json::Value {
        let mut p = printer(format);
        p.set_header().object_start("VkPhysicalDeviceProperties");
        p.print_key_value("vendorID", Value::Hex(0x10de), 0);
        p.print_key_value(
            "deviceType",
            Value::Enum {
                raw: 2,
                name: String::from("PHYSICAL_DEVICE_TYPE_DISCRETE_GPU"),
            },
            0,
        );
        p.print_key_value(
            "queueFlags",
            Value::Flags {
                bits: 5,
                names: vec![String::from("QUEUE_GRAPHICS_BIT"), String::from("QUEUE_TRANSFER_BIT")],
            },
            0,
        );
        p.print_key_value_annotated("apiVersion", 4202658u32, 0, "1.2.162");
        p.add_newline();
        p.object_end();
        p.array_start("ArrayOfVkQueueFamilyProperties", 2);
        for index in 0..2 {
            p.set_element_index(index).object_start("VkQueueFamilyProperties");
            p.print_key_value("queueCount", 1u32, 0);
            p.object_end();
        }
        p.array_end();

        let text = p.finish().render_to_string();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn compact_json_uses_raw_numbers_and_devsim_header() {
        let value = sample(OutputFormat::Json);

        assert_eq!(value["$schema"], "https://schema.khronos.org/vulkan/devsim_1_0_0.json#");
        assert_eq!(
            value["comments"]["desc"],
            "JSON configuration file describing GPU 1. Generated using the vulkaninfo program."
        );
        assert_eq!(value["comments"]["vulkanApiVersion"], "1.2.162");
        assert_eq!(
            value["VkPhysicalDeviceProperties"],
            json!({
                "vendorID": 0x10de,
                "deviceType": 2,
                "queueFlags": 5,
                "apiVersion": 4202658,
            })
        );
        assert_eq!(
            value["ArrayOfVkQueueFamilyProperties"],
            json!([{ "queueCount": 1 }, { "queueCount": 1 }])
        );
    }

    #[test]
    fn full_json_uses_names() {
        let value = sample(OutputFormat::FullJson);

        assert!(value.get("$schema").is_none());
        assert_eq!(
            value["VkPhysicalDeviceProperties"],
            json!({
                "vendorID": "0x10de",
                "deviceType": "PHYSICAL_DEVICE_TYPE_DISCRETE_GPU",
                "queueFlags": ["QUEUE_GRAPHICS_BIT", "QUEUE_TRANSFER_BIT"],
                "apiVersion": 4202658,
            })
        );
    }

    #[test]
    fn full_json_keys_indexed_objects() {
        let mut p = printer(OutputFormat::FullJson);
        p.object_start("memoryHeaps");
        for index in 0..2 {
            p.set_element_index(index).object_start("memoryHeaps");
            p.print_key_value("size", 1024u64, 0);
            p.object_end();
        }
        p.print_string("No Device Groups Found");
        p.object_end();

        let text = p.finish().render_to_string();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "memoryHeaps": {
                    "memoryHeaps[0]": { "size": 1024 },
                    "memoryHeaps[1]": { "size": 1024 },
                    "No Device Groups Found": null,
                }
            })
        );
    }
}
