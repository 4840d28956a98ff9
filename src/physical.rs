use std::{collections::BTreeMap, ffi, fmt, ptr};

use ash::{ext, khr, vk};

use crate::{
    ChainContext, DeviceFeatures, DeviceLimits, ExtensionChain,
    ExtensionProperties, Extent3d, Format, FormatProperties, Instance, MemoryInfo, QueueFlags,
    ReportError, Requires, SparseProperties, ToolProperties, Uuid, Value, Version,
    describe::{FromVk, string_from_chars},
};
use crate::{
    BufferDeviceAddressFeatures, DepthStencilResolveProperties, DriverProperties,
    HostQueryResetFeatures, IdProperties, Maintenance3Properties, MultiviewFeatures,
    MultiviewProperties, PointClippingProperties, ProtectedMemoryFeatures,
    ProtectedMemoryProperties, PushDescriptorProperties, SamplerYcbcrConversionFeatures,
    ScalarBlockLayoutFeatures, ShaderDrawParametersFeatures, ShaderFloat16Int8Features,
    Storage8BitFeatures, Storage16BitFeatures, SubgroupProperties, TimelineSemaphoreFeatures,
    TimelineSemaphoreProperties, UniformBufferStandardLayoutFeatures, VariablePointersFeatures,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PhysicalDeviceKind {
    #[default]
    Other,
    IntegratedGpu,
    DiscreteGpu,
    VirtualGpu,
    Cpu,
}

impl PhysicalDeviceKind {
    pub fn from_vk(device_type: vk::PhysicalDeviceType) -> Self {
        match device_type {
            vk::PhysicalDeviceType::INTEGRATED_GPU => Self::IntegratedGpu,
            vk::PhysicalDeviceType::DISCRETE_GPU => Self::DiscreteGpu,
            vk::PhysicalDeviceType::VIRTUAL_GPU => Self::VirtualGpu,
            vk::PhysicalDeviceType::CPU => Self::Cpu,
            _ => Self::Other,
        }
    }

    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Other => 0,
            Self::IntegratedGpu => 1,
            Self::DiscreteGpu => 2,
            Self::VirtualGpu => 3,
            Self::Cpu => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Other => "PHYSICAL_DEVICE_TYPE_OTHER",
            Self::IntegratedGpu => "PHYSICAL_DEVICE_TYPE_INTEGRATED_GPU",
            Self::DiscreteGpu => "PHYSICAL_DEVICE_TYPE_DISCRETE_GPU",
            Self::VirtualGpu => "PHYSICAL_DEVICE_TYPE_VIRTUAL_GPU",
            Self::Cpu => "PHYSICAL_DEVICE_TYPE_CPU",
        }
    }
}

impl From<PhysicalDeviceKind> for Value {
    fn from(kind: PhysicalDeviceKind) -> Self {
        Value::Enum {
            raw: i64::from(kind.as_raw()),
            name: kind.name().to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceProperties {
    /// Packed Vulkan version, as reported.
    pub api_version: u32,
    pub driver_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
    pub device_kind: PhysicalDeviceKind,
    pub device_name: String,
    pub pipeline_cache_uuid: Uuid,
    pub limits: DeviceLimits,
    pub sparse: SparseProperties,
}

impl DeviceProperties {
    pub(crate) fn from_vk(raw: &vk::PhysicalDeviceProperties) -> Self {
        Self {
            api_version: raw.api_version,
            driver_version: raw.driver_version,
            vendor_id: raw.vendor_id,
            device_id: raw.device_id,
            device_kind: PhysicalDeviceKind::from_vk(raw.device_type),
            device_name: string_from_chars(&raw.device_name),
            pipeline_cache_uuid: Uuid(raw.pipeline_cache_uuid),
            limits: DeviceLimits::from_vk(&raw.limits),
            sparse: SparseProperties::from_vk(&raw.sparse_properties),
        }
    }

    pub fn api_version(&self) -> Version {
        Version::from_vk_version(self.api_version)
    }
}

/// Whether a queue family can present to the surfaces of each backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentSupport {
    /// Every backend gave the same answer.
    PlatformAgnostic(bool),
    PerSurface(Vec<(String, bool)>),
}

impl Default for PresentSupport {
    fn default() -> Self {
        Self::PlatformAgnostic(false)
    }
}

impl PresentSupport {
    /// Collapse per backend answers into one when they all agree.
    pub fn from_backends(support: Vec<(String, bool)>) -> Self {
        match support.first() {
            None => Self::PlatformAgnostic(false),
            Some(&(_, first)) if support.iter().all(|&(_, s)| s == first) => {
                Self::PlatformAgnostic(first)
            }
            Some(_) => Self::PerSurface(support),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueueFamily {
    pub index: u32,
    pub queue_flags: QueueFlags,
    pub queue_count: u32,
    pub timestamp_valid_bits: u32,
    pub min_image_transfer_granularity: Extent3d,
    pub present: PresentSupport,
}

/// A contiguous range of format identifiers and what makes it meaningful.
#[derive(Clone, Copy, Debug)]
pub struct FormatRange {
    pub first: i32,
    pub last: i32,
    pub requires: &'static [Requires],
}

pub const FORMAT_RANGES: &[FormatRange] = &[
    // core formats up to ASTC_12X12_SRGB_BLOCK
    FormatRange {
        first: 0,
        last: 184,
        requires: &[],
    },
    FormatRange {
        first: 1_000_054_000,
        last: 1_000_054_007,
        requires: &[Requires::device_extensions(&["VK_IMG_format_pvrtc"])],
    },
    FormatRange {
        first: 1_000_066_000,
        last: 1_000_066_013,
        requires: &[Requires::device_extensions(&[
            "VK_EXT_texture_compression_astc_hdr",
        ])],
    },
    FormatRange {
        first: 1_000_156_000,
        last: 1_000_156_033,
        requires: &[
            Requires::api_version(Version::V1_1),
            Requires::device_extensions(&["VK_KHR_sampler_ycbcr_conversion"]),
        ],
    },
];

/// Everything captured about one physical device.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpuInfo {
    pub id: usize,
    pub properties: DeviceProperties,
    pub properties_chain: ExtensionChain,
    pub extensions: Vec<ExtensionProperties>,
    /// Device extensions each layer provides for this device, by layer name.
    pub layer_extensions: BTreeMap<String, Vec<ExtensionProperties>>,
    pub queue_families: Vec<QueueFamily>,
    pub memory: MemoryInfo,
    pub features: DeviceFeatures,
    pub features_chain: ExtensionChain,
    pub tools: Vec<ToolProperties>,
    /// Properties of every format in the supported ranges, in identifier order.
    pub formats: Vec<(Format, FormatProperties)>,
    /// What the chains of this device were captured against.
    pub chain_context: ChainContext,
}

impl GpuInfo {
    pub fn name(&self) -> &str {
        &self.properties.device_name
    }

    pub fn layer_extensions(&self, layer: &str) -> &[ExtensionProperties] {
        self.layer_extensions
            .get(layer)
            .map_or(&[][..], Vec::as_slice)
    }
}

impl fmt::Display for GpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPU{} ({})", self.id, self.name())
    }
}

/// Loader of the `*2` query entry points, core or through the extension.
pub(crate) enum Properties2 {
    Core(ash::Instance),
    Khr(khr::get_physical_device_properties2::Instance),
}

impl Properties2 {
    pub(crate) fn new(instance: &Instance, device_api: Version) -> Option<Self> {
        if instance.api_version() >= Version::V1_1 && device_api >= Version::V1_1 {
            Some(Self::Core(instance.handle().clone()))
        } else if instance.is_extension_enabled("VK_KHR_get_physical_device_properties2") {
            Some(Self::Khr(khr::get_physical_device_properties2::Instance::new(
                instance.entry(),
                instance.handle(),
            )))
        } else {
            None
        }
    }

    unsafe fn properties2(
        &self,
        physical_device: vk::PhysicalDevice,
        properties: &mut vk::PhysicalDeviceProperties2<'_>,
    ) {
        unsafe {
            match self {
                Self::Core(instance) => {
                    instance.get_physical_device_properties2(physical_device, properties)
                }
                Self::Khr(loader) => {
                    loader.get_physical_device_properties2(physical_device, properties)
                }
            }
        }
    }

    unsafe fn features2(
        &self,
        physical_device: vk::PhysicalDevice,
        features: &mut vk::PhysicalDeviceFeatures2<'_>,
    ) {
        unsafe {
            match self {
                Self::Core(instance) => {
                    instance.get_physical_device_features2(physical_device, features)
                }
                Self::Khr(loader) => loader.get_physical_device_features2(physical_device, features),
            }
        }
    }

    pub(crate) unsafe fn memory_properties2(
        &self,
        physical_device: vk::PhysicalDevice,
        properties: &mut vk::PhysicalDeviceMemoryProperties2<'_>,
    ) {
        unsafe {
            match self {
                Self::Core(instance) => {
                    instance.get_physical_device_memory_properties2(physical_device, properties)
                }
                Self::Khr(loader) => {
                    loader.get_physical_device_memory_properties2(physical_device, properties)
                }
            }
        }
    }
}

pub(crate) unsafe fn device_extensions(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
    layer: Option<&str>,
) -> Result<Vec<ExtensionProperties>, ReportError> {
    let layer = layer.map(ffi::CString::new).and_then(Result::ok);
    let layer_ptr = layer.as_ref().map_or(ptr::null(), |name| name.as_ptr());

    let enumerate = instance.handle().fp_v1_0().enumerate_device_extension_properties;

    loop {
        let mut count = 0;
        unsafe { (enumerate)(physical_device, layer_ptr, &mut count, ptr::null_mut()).result()? };

        let mut properties = vec![vk::ExtensionProperties::default(); count as usize];
        let result = unsafe {
            (enumerate)(physical_device, layer_ptr, &mut count, properties.as_mut_ptr())
        };

        match result {
            vk::Result::SUCCESS => {
                properties.truncate(count as usize);
                return Ok(properties.iter().map(ExtensionProperties::from_vk).collect());
            }
            // the list grew between the two calls
            vk::Result::INCOMPLETE => continue,
            error => return Err(error.into()),
        }
    }
}

impl Instance {
    /// Capture every record of one physical device.
    ///
    /// `layers` names the layers whose device extensions are listed,
    /// `present_support` answers, per queue family, which surface backends
    /// the family can present to.
    pub(crate) fn capture_gpu(
        &self,
        id: usize,
        physical_device: vk::PhysicalDevice,
        layers: &[String],
        present_support: impl Fn(u32) -> Vec<(String, bool)>,
    ) -> Result<GpuInfo, ReportError> {
        let raw_properties =
            unsafe { self.handle().get_physical_device_properties(physical_device) };
        let properties = DeviceProperties::from_vk(&raw_properties);

        tracing::debug!(id, name = %properties.device_name, "Capturing physical device");

        let extensions = unsafe { device_extensions(self, physical_device, None)? };

        let mut layer_extensions = BTreeMap::new();
        for layer in layers {
            let extensions =
                unsafe { device_extensions(self, physical_device, Some(layer.as_str())) };

            match extensions {
                Ok(extensions) => {
                    layer_extensions.insert(layer.clone(), extensions);
                }
                Err(error) => {
                    tracing::warn!(%layer, %error, "Failed to enumerate layer device extensions")
                }
            }
        }

        let device_api = properties.api_version();

        let chain_context = ChainContext {
            api_version: self.api_version().min(device_api).without_patch(),
            instance_extensions: self.enabled_extensions().to_vec(),
            device_extensions: extensions.iter().map(|ext| ext.name.clone()).collect(),
        };

        let queue_families = unsafe {
            (self.handle()).get_physical_device_queue_family_properties(physical_device)
        };

        let queue_families = (queue_families.iter().enumerate())
            .map(|(index, family)| QueueFamily {
                index: index as u32,
                queue_flags: QueueFlags::from_vk(&family.queue_flags),
                queue_count: family.queue_count,
                timestamp_valid_bits: family.timestamp_valid_bits,
                min_image_transfer_granularity: Extent3d::from_vk(
                    &family.min_image_transfer_granularity,
                ),
                present: PresentSupport::from_backends(present_support(index as u32)),
            })
            .collect();

        let features = unsafe { self.handle().get_physical_device_features(physical_device) };
        let features = DeviceFeatures::from_vk(&features);

        let properties2 = Properties2::new(self, device_api);

        let (properties_chain, features_chain) = match &properties2 {
            Some(loader) => unsafe {
                (
                    capture_properties_chain(loader, physical_device, &chain_context),
                    capture_features_chain(loader, physical_device, &chain_context),
                )
            },
            None => Default::default(),
        };

        let memory = MemoryInfo::capture(
            self,
            physical_device,
            properties2.as_ref(),
            &chain_context,
            &features,
        )?;

        let tools = self.capture_tools(physical_device, &chain_context, device_api);

        let formats = FORMAT_RANGES
            .iter()
            .filter(|range| chain_context.satisfies(range.requires))
            .flat_map(|range| range.first..=range.last)
            .map(|raw| {
                let properties = unsafe {
                    (self.handle()).get_physical_device_format_properties(
                        physical_device,
                        vk::Format::from_raw(raw),
                    )
                };

                (Format(raw), FormatProperties::from_vk(&properties))
            })
            .collect();

        Ok(GpuInfo {
            id,
            properties,
            properties_chain,
            extensions,
            layer_extensions,
            queue_families,
            memory,
            features,
            features_chain,
            tools,
            formats,
            chain_context,
        })
    }

    fn capture_tools(
        &self,
        physical_device: vk::PhysicalDevice,
        context: &ChainContext,
        device_api: Version,
    ) -> Vec<ToolProperties> {
        let core = self.api_version() >= Version::V1_3 && device_api >= Version::V1_3;
        let extension = context.device_extensions.iter().any(|e| e == "VK_EXT_tooling_info");

        let tools: Result<Vec<ToolProperties>, vk::Result> = if core {
            unsafe {
                (self.handle().get_physical_device_tool_properties_len(physical_device))
                    .and_then(|len| {
                        let mut tools = vec![vk::PhysicalDeviceToolProperties::default(); len];
                        (self.handle())
                            .get_physical_device_tool_properties(physical_device, &mut tools)?;
                        Ok(tools.iter().map(ToolProperties::from_vk).collect())
                    })
            }
        } else if extension {
            let loader = ext::tooling_info::Instance::new(self.entry(), self.handle());

            unsafe {
                (loader.get_physical_device_tool_properties(physical_device))
                    .map(|tools| tools.iter().map(ToolProperties::from_vk).collect())
            }
        } else {
            return Vec::new();
        };

        match tools {
            Ok(tools) => tools,
            Err(error) => {
                tracing::warn!(%error, "Failed to query tooling info");
                Vec::new()
            }
        }
    }
}

unsafe fn capture_properties_chain(
    loader: &Properties2,
    physical_device: vk::PhysicalDevice,
    context: &ChainContext,
) -> ExtensionChain {
    let ((), chain) = query_chain! {
        context,
        vk::PhysicalDeviceProperties2::default(),
        |properties| unsafe { loader.properties2(physical_device, &mut properties) };
        DriverProperties: PhysicalDeviceDriverProperties as driver,
        IdProperties: PhysicalDeviceIDProperties as id,
        Maintenance3Properties: PhysicalDeviceMaintenance3Properties as maintenance3,
        MultiviewProperties: PhysicalDeviceMultiviewProperties as multiview,
        PointClippingProperties: PhysicalDevicePointClippingProperties as point_clipping,
        ProtectedMemoryProperties: PhysicalDeviceProtectedMemoryProperties as protected_memory,
        SubgroupProperties: PhysicalDeviceSubgroupProperties as subgroup,
        PushDescriptorProperties: PhysicalDevicePushDescriptorPropertiesKHR as push_descriptor,
        DepthStencilResolveProperties: PhysicalDeviceDepthStencilResolveProperties as depth_stencil_resolve,
        TimelineSemaphoreProperties: PhysicalDeviceTimelineSemaphoreProperties as timeline_semaphore,
    };

    chain
}

unsafe fn capture_features_chain(
    loader: &Properties2,
    physical_device: vk::PhysicalDevice,
    context: &ChainContext,
) -> ExtensionChain {
    let ((), chain) = query_chain! {
        context,
        vk::PhysicalDeviceFeatures2::default(),
        |features| unsafe { loader.features2(physical_device, &mut features) };
        Storage16BitFeatures: PhysicalDevice16BitStorageFeatures as storage16,
        MultiviewFeatures: PhysicalDeviceMultiviewFeatures as multiview,
        VariablePointersFeatures: PhysicalDeviceVariablePointersFeatures as variable_pointers,
        ProtectedMemoryFeatures: PhysicalDeviceProtectedMemoryFeatures as protected_memory,
        SamplerYcbcrConversionFeatures: PhysicalDeviceSamplerYcbcrConversionFeatures as ycbcr,
        ShaderDrawParametersFeatures: PhysicalDeviceShaderDrawParametersFeatures as draw_parameters,
        Storage8BitFeatures: PhysicalDevice8BitStorageFeatures as storage8,
        ShaderFloat16Int8Features: PhysicalDeviceShaderFloat16Int8Features as float16_int8,
        ScalarBlockLayoutFeatures: PhysicalDeviceScalarBlockLayoutFeatures as scalar_block_layout,
        TimelineSemaphoreFeatures: PhysicalDeviceTimelineSemaphoreFeatures as timeline_semaphore,
        HostQueryResetFeatures: PhysicalDeviceHostQueryResetFeatures as host_query_reset,
        BufferDeviceAddressFeatures: PhysicalDeviceBufferDeviceAddressFeatures as buffer_device_address,
        UniformBufferStandardLayoutFeatures: PhysicalDeviceUniformBufferStandardLayoutFeatures as uniform_buffer_standard_layout,
    };

    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support(answers: &[(&str, bool)]) -> Vec<(String, bool)> {
        answers.iter().map(|&(name, s)| (name.to_owned(), s)).collect()
    }

    #[test]
    fn agreeing_backends_collapse_to_one_answer() {
        assert_eq!(
            PresentSupport::from_backends(support(&[
                ("VK_KHR_xcb_surface", true),
                ("VK_KHR_wayland_surface", true),
            ])),
            PresentSupport::PlatformAgnostic(true)
        );

        assert_eq!(
            PresentSupport::from_backends(Vec::new()),
            PresentSupport::PlatformAgnostic(false)
        );
    }

    #[test]
    fn disagreeing_backends_are_listed() {
        let answers = support(&[("VK_KHR_xcb_surface", true), ("VK_EXT_headless_surface", false)]);

        assert_eq!(
            PresentSupport::from_backends(answers.clone()),
            PresentSupport::PerSurface(answers)
        );
    }

    #[test]
    fn device_kind_values_carry_vulkan_names() {
        assert_eq!(
            Value::from(PhysicalDeviceKind::from_vk(vk::PhysicalDeviceType::DISCRETE_GPU)),
            Value::Enum {
                raw: 2,
                name: String::from("PHYSICAL_DEVICE_TYPE_DISCRETE_GPU"),
            }
        );
    }

    #[test]
    fn device_properties_convert() {
        let mut raw = vk::PhysicalDeviceProperties {
            api_version: vk::make_api_version(0, 1, 2, 131),
            vendor_id: 0x10de,
            device_type: vk::PhysicalDeviceType::INTEGRATED_GPU,
            ..Default::default()
        };
        raw.limits.max_image_dimension2_d = 16384;

        let properties = DeviceProperties::from_vk(&raw);

        assert_eq!(properties.api_version(), Version::new(1, 2, 131));
        assert_eq!(properties.device_kind, PhysicalDeviceKind::IntegratedGpu);
        assert_eq!(properties.limits.max_image_dimension2_d, 16384);
        assert_eq!(properties.device_name, "");
    }

    #[test]
    fn ycbcr_formats_need_a_newer_device() {
        let context = ChainContext {
            api_version: Version::V1_0,
            ..Default::default()
        };

        let ranges: Vec<_> = FORMAT_RANGES
            .iter()
            .filter(|range| context.satisfies(range.requires))
            .map(|range| range.first)
            .collect();

        assert_eq!(ranges, [0]);
    }
}
