//! Reports rendered from hand-built snapshots.

use vulkaninfo::{
    Config, DeviceGroup, DeviceProperties, Document, ExtensionProperties, Format,
    FormatFeatureFlags, FormatProperties, GpuInfo, GroupPresentCapabilities, ImageSupport,
    ImageTiling, LayerExtensions, LayerProperties, MemoryHeap, MemoryHeapFlags, MemoryInfo,
    MemoryPropertyFlags, MemoryType, Node, OutputFormat, QueueFamily, QueueFlags, Report,
    Snapshot, SurfaceInfo, TilingSupport, Version,
};

const GIB: u64 = 1024 * 1024 * 1024;

fn gpu(id: usize, name: &str) -> GpuInfo {
    GpuInfo {
        id,
        properties: DeviceProperties {
            api_version: Version::V1_2.to_vk_version(),
            vendor_id: 0x10de,
            device_name: name.to_owned(),
            ..Default::default()
        },
        extensions: vec![
            ExtensionProperties::new("VK_KHR_swapchain", 70),
            ExtensionProperties::new("VK_KHR_maintenance1", 2),
        ],
        queue_families: vec![QueueFamily {
            index: 0,
            queue_flags: QueueFlags::GRAPHICS | QueueFlags::COMPUTE,
            queue_count: 16,
            ..Default::default()
        }],
        memory: MemoryInfo {
            heaps: vec![MemoryHeap {
                size: 8 * GIB,
                flags: MemoryHeapFlags::DEVICE_LOCAL,
                ..Default::default()
            }],
            types: vec![MemoryType {
                heap_index: 0,
                property_flags: MemoryPropertyFlags::DEVICE_LOCAL,
            }],
            image_support: Vec::new(),
        },
        formats: vec![
            (Format::UNDEFINED, FormatProperties::default()),
            (
                // R8G8B8A8_UNORM
                Format(37),
                FormatProperties {
                    optimal_tiling_features: FormatFeatureFlags::SAMPLED_IMAGE,
                    ..Default::default()
                },
            ),
        ],
        ..Default::default()
    }
}

fn snapshot(gpus: usize) -> Snapshot {
    Snapshot {
        api_version: Version::new(1, 2, 131),
        instance_extensions: vec![
            ExtensionProperties::new("VK_KHR_surface", 25),
            ExtensionProperties::new("VK_EXT_debug_utils", 2),
        ],
        gpus: (0..gpus).map(|id| gpu(id, &format!("Test GPU {id}"))).collect(),
        ..Default::default()
    }
}

fn test_layer() -> LayerExtensions {
    LayerExtensions {
        properties: LayerProperties {
            name: Some(String::from("VK_LAYER_TEST")),
            spec_version: Version::V1_2.to_vk_version(),
            implementation_version: 1,
            description: String::from("test layer"),
        },
        extensions: Vec::new(),
    }
}

fn dump(snapshot: &Snapshot, format: OutputFormat) -> Document {
    let config = Config {
        formats: vec![format],
        ..Default::default()
    };

    Report::new(snapshot, &config).unwrap().dump(format)
}

fn json(snapshot: &Snapshot, format: OutputFormat) -> serde_json::Value {
    let text = dump(snapshot, format).render_to_string();
    serde_json::from_str(&text).expect("output is not valid json")
}

#[test]
fn missing_device_groups_print_a_notice() {
    let snapshot = Snapshot {
        device_groups: Some(Vec::new()),
        ..snapshot(2)
    };

    for format in [OutputFormat::Text, OutputFormat::Html] {
        let document = dump(&snapshot, format);
        let groups = document.object("Groups").unwrap();

        assert_eq!(groups.items().count(), 1);
        assert!(document.object("Device Groups").is_none());

        let text = document.render_to_string();
        assert_eq!(text.matches("No Device Groups Found").count(), 1);
        assert!(!text.contains("Present Capabilities"));
    }
}

#[test]
fn groups_without_device_group_support_print_a_notice() {
    let snapshot = Snapshot {
        device_groups: Some(vec![
            DeviceGroup {
                devices: vec![0, 1],
                subset_allocation: true,
                present: None,
            },
            DeviceGroup {
                devices: vec![1],
                subset_allocation: false,
                present: Some(GroupPresentCapabilities {
                    present_masks: vec![0b1],
                    ..Default::default()
                }),
            },
        ]),
        ..snapshot(2)
    };

    let text = dump(&snapshot, OutputFormat::Text).render_to_string();

    assert_eq!(
        text.matches("Group does not support VK_KHR_device_group, skipping printing present capabilities")
            .count(),
        1
    );
    assert!(text.contains("Test GPU 1 (ID: 0)"));
    assert!(text.contains("Can present images from the following devices: count = 1"));
}

#[test]
fn single_layer_lists_every_device() {
    let snapshot = Snapshot {
        layers: vec![test_layer()],
        ..snapshot(1)
    };

    let document = dump(&snapshot, OutputFormat::Text);
    let layers = document.array("Layers").unwrap();

    let objects: Vec<_> = layers
        .items()
        .filter_map(|node| match node {
            Node::Object(layer) => Some(layer),
            _ => None,
        })
        .collect();

    assert_eq!(objects.len(), 1);

    let layer = objects[0];
    assert!(layer.label.to_string().starts_with("VK_LAYER_TEST (test layer) Vulkan version 1.2.0"));
    assert_eq!(layer.object("Layer Extensions").unwrap().items().count(), 0);

    let devices = layer.array("Devices").unwrap();
    assert_eq!(devices.expected_len, Some(1));
    assert!(devices.entry("GPU id").is_some());
    assert_eq!(devices.object("Layer-Device Extensions").unwrap().items().count(), 0);
}

#[test]
fn compact_json_describes_layers_and_the_selected_device() {
    let snapshot = Snapshot {
        layers: vec![test_layer()],
        ..snapshot(2)
    };

    let value = json(&snapshot, OutputFormat::Json);

    assert_eq!(value["ArrayOfVkLayerProperties"][0]["layerName"], "VK_LAYER_TEST");
    assert_eq!(value["ArrayOfVkLayerProperties"][0]["version"], "1.2.0");
    assert_eq!(value["ArrayOfVkLayerProperties"][0]["implementationVersion"], 1);

    let properties = &value["VkPhysicalDeviceProperties"];
    assert_eq!(properties["deviceName"], "Test GPU 0");
    assert_eq!(properties["vendorID"], 0x10de);
    assert!(properties["VkPhysicalDeviceLimits"].is_object());
    assert!(properties["VkPhysicalDeviceSparseProperties"].is_object());
    assert_eq!(properties["pipelineCacheUUID"].as_array().unwrap().len(), 16);

    assert_eq!(value["ArrayOfVkQueueFamilyProperties"][0]["queueFlags"], 3);
    assert_eq!(value["VkPhysicalDeviceMemoryProperties"]["memoryHeaps"][0]["size"], 8 * GIB);

    let formats = value["ArrayOfVkFormatProperties"].as_array().unwrap();
    assert_eq!(formats.len(), 1);
    assert_eq!(formats[0]["formatID"], 37);
    assert_eq!(formats[0]["optimalTilingFeatures"], 1);
}

#[test]
fn full_json_uses_objects_and_names() {
    let snapshot = Snapshot {
        layers: vec![test_layer()],
        ..snapshot(1)
    };

    let value = json(&snapshot, OutputFormat::FullJson);

    assert_eq!(
        value["Layer Properties"]["VK_LAYER_TEST"]["Devices"]["Test GPU 0"]["GPU id"],
        0
    );

    let gpu = &value["Device Properties and Extensions"]["GPU0"];
    assert_eq!(gpu["VkPhysicalDeviceProperties"]["vendorID"], "0x10de");
    assert_eq!(gpu["Device Extensions"]["VK_KHR_maintenance1"], 2);
    assert!(gpu["VkPhysicalDeviceMemoryProperties"]["memoryHeaps"]["memoryHeaps[0]"].is_object());
    assert_eq!(
        gpu["Format Properties"]["FORMAT_R8G8B8A8_UNORM"]["optimalTiling"],
        serde_json::json!(["FORMAT_FEATURE_SAMPLED_IMAGE_BIT"])
    );
}

#[test]
fn surfaces_are_listed_per_device_before_devices() {
    let backend = "VK_EXT_headless_surface";
    let with_surface = Snapshot {
        surface_backends: vec![String::from(backend)],
        surfaces: vec![SurfaceInfo {
            backend: String::from(backend),
            gpu: 0,
            ..Default::default()
        }],
        ..snapshot(1)
    };

    let text = dump(&with_surface, OutputFormat::Text).render_to_string();

    let surfaces = text.find("Presentable Surfaces:").unwrap();
    let devices = text.find("Device Properties and Extensions:").unwrap();

    assert!(surfaces < devices);
    assert!(text.contains("GPU id : 0 (Test GPU 0):"));
    assert!(text.contains("Surface type = VK_EXT_headless_surface"));

    let without = dump(&snapshot(1), OutputFormat::Text).render_to_string();
    assert!(!without.contains("Presentable Surfaces"));
}

#[test]
fn memory_types_list_every_tiling_without_probe_results() {
    let text = dump(&snapshot(1), OutputFormat::Text).render_to_string();

    assert!(text.contains("usable for: count = 2"));
    assert!(text.contains("IMAGE_TILING_OPTIMAL: None"));
    assert!(text.contains("IMAGE_TILING_LINEAR: None"));

    let mut probed = snapshot(1);
    probed.gpus[0].memory.image_support = vec![TilingSupport {
        tiling: ImageTiling::Linear,
        formats: vec![ImageSupport {
            format: Format(37),
            regular: Some(0b1),
            ..Default::default()
        }],
    }];

    let text = dump(&probed, OutputFormat::Text).render_to_string();

    assert!(text.contains("IMAGE_TILING_OPTIMAL: None"));
    assert!(text.contains("IMAGE_TILING_LINEAR: color images"));
    assert!(text.find("IMAGE_TILING_OPTIMAL").unwrap() < text.find("IMAGE_TILING_LINEAR").unwrap());
}

#[test]
fn out_of_range_gpu_is_rejected() {
    let snapshot = snapshot(1);
    let config = Config {
        formats: vec![OutputFormat::Json],
        selected_gpu: 1,
        show_formats: false,
    };

    let error = Report::new(&snapshot, &config).unwrap_err();

    assert_eq!(
        error.to_string(),
        "The selected gpu (1) is not in the valid range of 0 to 0."
    );
}

#[test]
fn text_sections_follow_report_order() {
    let text = dump(&snapshot(1), OutputFormat::Text).render_to_string();

    let order = [
        "Instance Extensions",
        "Layers: count = 0",
        "Device Properties and Extensions",
        "VkPhysicalDeviceProperties",
        "Device Extensions",
        "VkQueueFamilyProperties",
        "VkPhysicalDeviceMemoryProperties",
        "VkPhysicalDeviceFeatures",
    ];

    let positions: Vec<_> = order.iter().map(|section| text.find(section).unwrap()).collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!text.contains("Format Properties"));
    assert!(text.contains("VK_EXT_debug_utils : extension revision 2"));
    assert!(text.contains("size   = 8589934592 (0x200000000) (8.00 GiB)"));
}

#[test]
fn show_formats_groups_text_formats() {
    let snapshot = snapshot(1);
    let config = Config {
        show_formats: true,
        ..Default::default()
    };

    let text = Report::new(&snapshot, &config)
        .unwrap()
        .dump(OutputFormat::Text)
        .render_to_string();

    assert!(text.contains("Common Format Group[0]:"));
    assert!(text.contains("FORMAT_R8G8B8A8_UNORM"));
    assert!(text.contains("Unsupported Formats: count = 1"));
}

#[test]
fn every_document_is_balanced() {
    let snapshot = Snapshot {
        layers: vec![test_layer()],
        device_groups: Some(Vec::new()),
        ..snapshot(2)
    };

    let config = Config {
        formats: vec![OutputFormat::Html, OutputFormat::Json, OutputFormat::FullJson],
        ..Default::default()
    };

    let documents = Report::new(&snapshot, &config).unwrap().documents();

    assert_eq!(documents.len(), 3);

    let html = documents[0].render_to_string();
    assert_eq!(html.matches("<details").count(), html.matches("</details>").count());

    for document in &documents[1..] {
        let text = document.render_to_string();
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }
}
