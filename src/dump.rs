//! Section order and per format layout of a report.
//!
//! Every section is a free function over a [`Printer`]; the printer's format
//! decides which variant of a section is written. Text, html and full json
//! share one layout, compact json has its own.

use crate::{
    Config, DeviceGroup, Document, DocumentInfo, ExtensionProperties, Format, FormatProperties,
    GpuInfo, GpuSelectionError, ImageTiling, Label, LayerExtensions, OutputFormat,
    PresentSupport, Printer, QueueFamily, Snapshot, Value, Version,
    aggregate::{
        SurfaceGroup, decode_present_masks, describe_size, group_formats, group_surfaces,
        sort_layers, sorted_extensions, usable_for,
    },
    describe::Describe,
    walk_chain,
};

/// A snapshot paired with the choices of one invocation.
#[derive(Clone, Debug)]
pub struct Report<'a> {
    snapshot: &'a Snapshot,
    config: &'a Config,
    selected: &'a GpuInfo,
    layers: Vec<LayerExtensions>,
}

impl<'a> Report<'a> {
    /// Fails when the selected device does not exist, before anything is
    /// printed.
    pub fn new(snapshot: &'a Snapshot, config: &'a Config) -> Result<Self, GpuSelectionError> {
        let selected = snapshot
            .gpus
            .get(config.selected_gpu)
            .ok_or(GpuSelectionError {
                selected: config.selected_gpu,
                gpu_count: snapshot.gpus.len(),
            })?;

        let mut layers = snapshot.layers.clone();
        sort_layers(&mut layers);

        Ok(Self {
            snapshot,
            config,
            selected,
            layers,
        })
    }

    /// One document per requested format, in request order.
    pub fn documents(&self) -> Vec<Document> {
        (self.config.formats.iter())
            .map(|&format| self.dump(format))
            .collect()
    }

    pub fn dump(&self, format: OutputFormat) -> Document {
        tracing::debug!(?format, "Dumping report");

        let mut p = Printer::new(
            format,
            DocumentInfo {
                api_version: self.snapshot.api_version,
                selected_gpu: self.config.selected_gpu,
            },
        );

        if format == OutputFormat::Json {
            self.dump_layers(&mut p);
            self.dump_gpu_json(&mut p, self.selected);

            return p.finish();
        }

        p.set_header();
        dump_extensions(&mut p, "Instance", &self.snapshot.instance_extensions);
        p.add_newline();

        self.dump_layers(&mut p);

        if !self.snapshot.surface_backends.is_empty() {
            self.dump_presentable_surfaces(&mut p);
        }

        if let Some(groups) = &self.snapshot.device_groups {
            self.dump_groups(&mut p, groups);
        }

        p.set_header().object_start("Device Properties and Extensions");
        p.indent_decrease();

        for gpu in &self.snapshot.gpus {
            self.dump_gpu(&mut p, gpu);
        }

        p.indent_increase();
        p.object_end();

        p.finish()
    }

    fn gpu_name(&self, id: usize) -> &str {
        self.snapshot.gpus.get(id).map_or("", GpuInfo::name)
    }

    fn dump_layers(&self, p: &mut Printer) {
        match p.format() {
            OutputFormat::Text | OutputFormat::Html => {
                p.set_header().array_start("Layers", self.layers.len());
                p.indent_decrease();

                for layer in &self.layers {
                    let properties = &layer.properties;

                    p.object_start(
                        Label::new()
                            .kind(properties.name())
                            .text(format!(" ({}) Vulkan version ", properties.description))
                            .value(Version::from_vk_version(properties.spec_version))
                            .text(", layer version ")
                            .value(properties.implementation_version),
                    );

                    dump_extensions(p, "Layer", &layer.extensions);

                    p.array_start("Devices", self.snapshot.gpus.len());
                    for gpu in &self.snapshot.gpus {
                        p.print_key_value_annotated("GPU id", gpu.id, 0, gpu.name());
                        dump_extensions(p, "Layer-Device", gpu.layer_extensions(properties.name()));
                        p.add_newline();
                    }
                    p.array_end();

                    p.object_end();
                }

                p.indent_increase();
                p.array_end();
            }
            OutputFormat::Json => {
                p.array_start("ArrayOfVkLayerProperties", self.layers.len());

                for (i, layer) in self.layers.iter().enumerate() {
                    let properties = &layer.properties;
                    let version = Version::from_vk_version(properties.spec_version);

                    p.set_element_index(i).object_start("layerProperty");
                    p.print_key_string("layerName", properties.name(), 21);
                    p.print_key_string("version", version.to_string(), 21);
                    p.print_key_value(
                        "implementationVersion",
                        properties.implementation_version,
                        21,
                    );
                    p.print_key_string("description", &properties.description, 21);
                    p.object_end();
                }

                p.array_end();
            }
            OutputFormat::FullJson => {
                p.object_start("Layer Properties");

                for layer in &self.layers {
                    let properties = &layer.properties;
                    let version = Version::from_vk_version(properties.spec_version);

                    p.object_start(properties.name());
                    p.print_key_string("layerName", properties.name(), 21);
                    p.print_key_string("version", version.to_string(), 21);
                    p.print_key_value(
                        "implementation version",
                        properties.implementation_version,
                        21,
                    );
                    p.print_key_string("description", &properties.description, 21);

                    dump_extensions(p, "Layer", &layer.extensions);

                    p.object_start("Devices");
                    for gpu in &self.snapshot.gpus {
                        p.object_start(gpu.name());
                        p.print_key_value_annotated("GPU id", gpu.id, 0, gpu.name());
                        dump_extensions(p, "Layer-Device", gpu.layer_extensions(properties.name()));
                        p.object_end();
                    }
                    p.object_end();

                    p.object_end();
                }

                p.object_end();
            }
        }
    }

    fn dump_presentable_surfaces(&self, p: &mut Printer) {
        p.set_header().object_start("Presentable Surfaces");
        p.indent_decrease();

        for group in group_surfaces(&self.snapshot.surfaces) {
            self.dump_surface(p, &group);
        }

        p.indent_increase();
        p.object_end();
        p.add_newline();
    }

    fn dump_surface(&self, p: &mut Printer, group: &SurfaceGroup<'_>) {
        let capabilities = group.capabilities();

        p.object_start(
            Label::new()
                .text("GPU id : ")
                .value(group.gpu)
                .text(format!(" ({})", self.gpu_name(group.gpu))),
        );

        match group.backends.first() {
            Some(backend) if group.backends.len() == 1 => {
                p.set_as_type().print_key_string("Surface type", *backend, 0);
            }
            _ => {
                p.array_start("Surface types", group.backends.len());
                for backend in &group.backends {
                    p.print_string(*backend);
                }
                p.array_end();
            }
        }

        let full_json = p.format() == OutputFormat::FullJson;

        match full_json {
            true => p.object_start("Formats"),
            false => p.array_start("Formats", capabilities.formats.len()),
        }

        for (i, format) in capabilities.formats.iter().enumerate() {
            p.set_element_index(i);
            format.describe(p, "SurfaceFormat");
        }

        match full_json {
            true => p.object_end(),
            false => p.array_end(),
        }

        p.array_start("Present Modes", capabilities.present_modes.len());
        for mode in &capabilities.present_modes {
            p.set_as_type().print_string(mode.name());
        }
        p.array_end();

        p.set_sub_header();
        capabilities.capabilities.describe(p, "VkSurfaceCapabilitiesKHR");

        p.set_sub_header().object_start("VkSurfaceCapabilities2EXT");
        p.print_key_value("supportedSurfaceCounters", capabilities.counters, 0);
        p.object_end();

        if let Some(gpu) = self.snapshot.gpus.get(group.gpu) {
            walk_chain(p, &capabilities.chain, &gpu.chain_context);
        }

        p.object_end();
        p.add_newline();
    }

    fn dump_groups(&self, p: &mut Printer, groups: &[DeviceGroup]) {
        if groups.is_empty() {
            p.set_header().object_start("Groups");
            p.print_element("No Device Groups Found");
            p.object_end();
            p.add_newline();
            return;
        }

        let member = |id: usize, i: usize| {
            Label::new()
                .text(format!("{} (ID: ", self.gpu_name(id)))
                .value(i)
                .text(")")
        };

        p.set_header().object_start("Device Groups");
        p.indent_decrease();

        for (group_id, group) in groups.iter().enumerate() {
            p.object_start(format!("Group {group_id}"));

            p.object_start("Properties");
            p.array_start("physicalDevices", group.devices.len());
            for (i, &id) in group.devices.iter().enumerate() {
                p.print_string(member(id, i));
            }
            p.array_end();
            p.print_key_value("subsetAllocation", group.subset_allocation, 0);
            p.object_end();
            p.add_newline();

            match &group.present {
                None => p.print_element(
                    "Group does not support VK_KHR_device_group, skipping printing present capabilities",
                ),
                Some(present) => {
                    p.object_start("Present Capabilities");

                    let presentable = decode_present_masks(&present.present_masks);

                    for (i, (&id, sources)) in group.devices.iter().zip(&presentable).enumerate() {
                        p.object_start(member(id, i));
                        p.array_start(
                            "Can present images from the following devices",
                            group.devices.len(),
                        );

                        for &j in sources {
                            if let Some(&source) = group.devices.get(j) {
                                p.print_string(member(source, j));
                            }
                        }

                        p.array_end();
                        p.object_end();
                    }

                    p.print_key_value("Present modes", present.modes, 0);
                    p.object_end();
                }
            }

            p.object_end();
            p.add_newline();
        }

        p.indent_increase();
        p.object_end();
        p.add_newline();
    }

    fn dump_gpu(&self, p: &mut Printer, gpu: &GpuInfo) {
        p.object_start(format!("GPU{}", gpu.id));
        p.indent_decrease();

        dump_properties(p, gpu);
        dump_extensions(p, "Device", &gpu.extensions);
        p.add_newline();

        p.set_sub_header().object_start("VkQueueFamilyProperties");
        for family in &gpu.queue_families {
            dump_queue_family(p, family);
        }
        p.object_end();

        dump_memory(p, gpu);
        dump_features(p, gpu);
        dump_tools(p, gpu);

        if p.format() != OutputFormat::Text || self.config.show_formats {
            dump_formats(p, &gpu.formats);
        }

        p.indent_increase();
        p.object_end();
        p.add_newline();
    }

    fn dump_gpu_json(&self, p: &mut Printer, gpu: &GpuInfo) {
        dump_properties(p, gpu);

        p.array_start("ArrayOfVkQueueFamilyProperties", gpu.queue_families.len());
        for family in &gpu.queue_families {
            dump_queue_family(p, family);
        }
        p.array_end();

        dump_memory(p, gpu);
        dump_features(p, gpu);
        dump_formats(p, &gpu.formats);
    }
}

/// `<kind> Extensions`, sorted by name.
fn dump_extensions(p: &mut Printer, kind: &str, extensions: &[ExtensionProperties]) {
    let extensions = sorted_extensions(extensions);
    let width = extensions.iter().map(|ext| ext.name.len()).max().unwrap_or(0);

    p.object_start(format!("{kind} Extensions"));

    for ext in &extensions {
        match p.format().is_human() {
            true => p.print_string(
                Label::new()
                    .kind(&ext.name)
                    .text(format!(
                        "{:pad$} : extension revision ",
                        "",
                        pad = width - ext.name.len()
                    ))
                    .value(ext.spec_version),
            ),
            false => p.print_key_value(&ext.name, ext.spec_version, width),
        }
    }

    p.object_end();
}

fn dump_properties(p: &mut Printer, gpu: &GpuInfo) {
    let properties = &gpu.properties;
    let json = p.format() == OutputFormat::Json;

    p.set_sub_header().object_start("VkPhysicalDeviceProperties");
    p.print_key_value_annotated(
        "apiVersion",
        properties.api_version,
        14,
        properties.api_version().to_string(),
    );
    p.print_key_value_annotated(
        "driverVersion",
        properties.driver_version,
        14,
        format!("0x{:x}", properties.driver_version),
    );
    p.print_key_value("vendorID", Value::hex(properties.vendor_id), 14);
    p.print_key_value("deviceID", Value::hex(properties.device_id), 14);
    p.print_key_value("deviceType", properties.device_kind, 14);
    p.print_key_string("deviceName", &properties.device_name, 14);

    if p.format().is_tree() {
        p.array_start("pipelineCacheUUID", properties.pipeline_cache_uuid.0.len());
        for &byte in &properties.pipeline_cache_uuid.0 {
            p.print_element(u32::from(byte));
        }
        p.array_end();
    }

    p.add_newline();

    // compact json nests limits and sparse properties in the device properties
    if !json {
        p.object_end();
    }

    properties.limits.describe(p, "VkPhysicalDeviceLimits");
    p.add_newline();
    properties.sparse.describe(p, "VkPhysicalDeviceSparseProperties");
    p.add_newline();

    if json {
        p.object_end();
    } else {
        walk_chain(p, &gpu.properties_chain, &gpu.chain_context);
    }

    p.add_newline();
}

fn dump_queue_family(p: &mut Printer, family: &QueueFamily) {
    const WIDTH: usize = 27;

    let format = p.format();

    p.set_header()
        .set_element_index(family.index as usize)
        .object_start("VkQueueFamilyProperties");

    match format.is_tree() {
        true => (family.min_image_transfer_granularity).describe(p, "minImageTransferGranularity"),
        false => p.print_key_string(
            "minImageTransferGranularity",
            family.min_image_transfer_granularity.to_string(),
            WIDTH,
        ),
    }

    p.print_key_value("queueCount", family.queue_count, WIDTH);

    match format {
        OutputFormat::Json => p.print_key_value("queueFlags", family.queue_flags, WIDTH),
        _ => p.print_key_string("queueFlags", family.queue_flags.names().join(" | "), WIDTH),
    }

    p.print_key_value("timestampValidBits", family.timestamp_valid_bits, WIDTH);

    if format != OutputFormat::Json {
        match &family.present {
            PresentSupport::PlatformAgnostic(supported) => {
                p.print_key_string("present support", supported.to_string(), 0);
            }
            PresentSupport::PerSurface(support) => {
                let width = support.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

                p.object_start("present support");
                for (backend, supported) in support {
                    p.print_key_string(backend, supported.to_string(), width);
                }
                p.object_end();
            }
        }
    }

    p.object_end();
    p.add_newline();
}

fn dump_memory(p: &mut Printer, gpu: &GpuInfo) {
    let memory = &gpu.memory;
    let format = p.format();
    let full_json = format == OutputFormat::FullJson;

    p.set_header().object_start("VkPhysicalDeviceMemoryProperties");
    p.indent_decrease();

    match full_json {
        true => p.object_start("memoryHeaps"),
        false => p.array_start("memoryHeaps", memory.heaps.len()),
    }

    for (i, heap) in memory.heaps.iter().enumerate() {
        p.set_element_index(i).object_start("memoryHeaps");

        if format == OutputFormat::Json {
            p.print_key_value("flags", heap.flags, 0);
            p.print_key_value("size", heap.size, 0);
        } else {
            p.print_key_string("size", describe_size(heap.size), 6);
            p.print_key_string("budget", describe_size(heap.budget), 6);
            p.print_key_string("usage", describe_size(heap.usage), 6);
            p.print_key_value("flags", heap.flags, 6);
        }

        p.object_end();
    }

    match full_json {
        true => {
            p.object_end();
            p.object_start("memoryTypes");
        }
        false => {
            p.array_end();
            p.array_start("memoryTypes", memory.types.len());
        }
    }

    for (i, memory_type) in memory.types.iter().enumerate() {
        p.set_element_index(i).object_start("memoryTypes");
        p.print_key_value("heapIndex", memory_type.heap_index, 13);

        if format == OutputFormat::Json {
            p.print_key_value("propertyFlags", memory_type.property_flags, 13);
        } else {
            let flags = memory_type.property_flags;
            p.print_key_value(&format!("propertyFlags = 0x{:x}", flags.bits()), flags, 0);

            p.array_start("usable for", ImageTiling::ALL.len());
            for tiling in ImageTiling::ALL {
                let formats = (memory.image_support.iter())
                    .find(|support| support.tiling == tiling)
                    .map_or(&[][..], |support| support.formats.as_slice());

                p.print_string(usable_for(i, tiling, formats));
            }
            p.array_end();
        }

        p.object_end();
    }

    match full_json {
        true => p.object_end(),
        false => p.array_end(),
    }

    p.indent_increase();
    p.object_end();
    p.add_newline();
}

fn dump_features(p: &mut Printer, gpu: &GpuInfo) {
    p.set_header();
    gpu.features.describe(p, "VkPhysicalDeviceFeatures");
    p.add_newline();

    if p.format() != OutputFormat::Json {
        walk_chain(p, &gpu.features_chain, &gpu.chain_context);
    }
}

fn dump_tools(p: &mut Printer, gpu: &GpuInfo) {
    if gpu.tools.is_empty() {
        return;
    }

    p.set_sub_header().object_start("Tooling Info");
    for tool in &gpu.tools {
        tool.describe(p, &tool.name);
    }
    p.object_end();
}

fn dump_formats(p: &mut Printer, formats: &[(Format, FormatProperties)]) {
    let format = p.format();

    match format {
        OutputFormat::Json => {
            let supported = formats.iter().filter(|(_, props)| props.is_supported()).count();
            p.array_start("ArrayOfVkFormatProperties", supported);
        }
        _ => {
            p.set_header().object_start("Format Properties");
            p.indent_decrease();
        }
    }

    if format == OutputFormat::Text {
        let grouped = group_formats(formats);

        for (i, (properties, members)) in grouped.groups.iter().enumerate() {
            p.set_element_index(i).object_start("Common Format Group");
            p.indent_decrease();

            p.array_start("Formats", members.len());
            for member in members {
                p.set_as_type().print_string(member.name());
            }
            p.array_end();

            dump_format_properties(p, Format::UNDEFINED, properties);

            p.indent_increase();
            p.object_end();
            p.add_newline();
        }

        p.array_start("Unsupported Formats", grouped.unsupported.len());
        for unsupported in &grouped.unsupported {
            p.set_as_type().print_string(unsupported.name());
        }
        p.array_end();
    } else {
        for (id, properties) in formats {
            if format == OutputFormat::Json && !properties.is_supported() {
                continue;
            }

            dump_format_properties(p, *id, properties);
        }
    }

    match format {
        OutputFormat::Json => p.array_end(),
        _ => {
            p.indent_increase();
            p.object_end();
        }
    }

    p.add_newline();
}

fn dump_format_properties(p: &mut Printer, id: Format, properties: &FormatProperties) {
    match p.format() {
        OutputFormat::Text | OutputFormat::Html => {
            match p.format() {
                OutputFormat::Html => p.set_title_as_type().object_start(id.name()),
                _ => p.object_start("Properties"),
            }

            p.set_open_details();
            p.print_key_value("linearTiling", properties.linear_tiling_features, 0);
            p.set_open_details();
            p.print_key_value("optimalTiling", properties.optimal_tiling_features, 0);
            p.set_open_details();
            p.print_key_value("bufferFeatures", properties.buffer_features, 0);
        }
        OutputFormat::Json => {
            p.object_start("");
            p.print_key_value("formatID", id, 0);
            p.print_key_value("linearTilingFeatures", properties.linear_tiling_features, 0);
            p.print_key_value("optimalTilingFeatures", properties.optimal_tiling_features, 0);
            p.print_key_value("bufferFeatures", properties.buffer_features, 0);
        }
        OutputFormat::FullJson => {
            p.object_start(id.name());
            p.print_key_value("linearTiling", properties.linear_tiling_features, 0);
            p.print_key_value("optimalTiling", properties.optimal_tiling_features, 0);
            p.print_key_value("bufferFeatures", properties.buffer_features, 0);
        }
    }

    p.object_end();
}
