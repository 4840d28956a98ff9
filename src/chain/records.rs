use ash::vk;

use super::{ChainMember, Requires};
use crate::{
    ConformanceVersion, DriverId, ImageUsageFlags, Luid, PointClippingBehavior, ResolveModeFlags,
    ShaderStageFlags, SubgroupFeatureFlags, Uuid, Version,
};

macro_rules! chain_records {
    ($($name:ident => $structure_type:ident, $label:literal, [$($requires:expr),* $(,)?];)*) => {
        /// Every record type an [`ExtensionChain`](super::ExtensionChain) can hold.
        #[derive(Clone, Debug, PartialEq)]
        pub enum ChainRecord {
            $( $name($name), )*
            /// A structure this build does not know how to print.
            Unknown(vk::StructureType),
        }

        impl ChainRecord {
            pub fn structure_type(&self) -> vk::StructureType {
                match self {
                    $( Self::$name(_) => vk::StructureType::$structure_type, )*
                    Self::Unknown(structure_type) => *structure_type,
                }
            }
        }

        $(
            impl ChainMember for $name {
                const STRUCTURE_TYPE: vk::StructureType = vk::StructureType::$structure_type;
                const NAME: &'static str = $label;
                const REQUIRES: &'static [Requires] = &[$($requires),*];

                fn from_record(record: &ChainRecord) -> Option<&Self> {
                    match record {
                        ChainRecord::$name(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$name> for ChainRecord {
                fn from(record: $name) -> Self {
                    Self::$name(record)
                }
            }
        )*
    };
}

const fn v1_1() -> Requires {
    Requires::api_version(Version::V1_1)
}

const fn v1_2() -> Requires {
    Requires::api_version(Version::V1_2)
}

chain_records! {
    DriverProperties => PHYSICAL_DEVICE_DRIVER_PROPERTIES,
        "VkPhysicalDeviceDriverPropertiesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_driver_properties"])];
    IdProperties => PHYSICAL_DEVICE_ID_PROPERTIES,
        "VkPhysicalDeviceIDProperties",
        [
            v1_1(),
            Requires::instance_extensions(&["VK_KHR_external_memory_capabilities"]),
            Requires::instance_extensions(&["VK_KHR_external_semaphore_capabilities"]),
            Requires::instance_extensions(&["VK_KHR_external_fence_capabilities"]),
        ];
    Maintenance3Properties => PHYSICAL_DEVICE_MAINTENANCE_3_PROPERTIES,
        "VkPhysicalDeviceMaintenance3Properties",
        [v1_1(), Requires::device_extensions(&["VK_KHR_maintenance3"])];
    MultiviewProperties => PHYSICAL_DEVICE_MULTIVIEW_PROPERTIES,
        "VkPhysicalDeviceMultiviewProperties",
        [v1_1(), Requires::device_extensions(&["VK_KHR_multiview"])];
    PointClippingProperties => PHYSICAL_DEVICE_POINT_CLIPPING_PROPERTIES,
        "VkPhysicalDevicePointClippingProperties",
        [v1_1(), Requires::device_extensions(&["VK_KHR_maintenance2"])];
    ProtectedMemoryProperties => PHYSICAL_DEVICE_PROTECTED_MEMORY_PROPERTIES,
        "VkPhysicalDeviceProtectedMemoryProperties",
        [v1_1()];
    SubgroupProperties => PHYSICAL_DEVICE_SUBGROUP_PROPERTIES,
        "VkPhysicalDeviceSubgroupProperties",
        [v1_1()];
    PushDescriptorProperties => PHYSICAL_DEVICE_PUSH_DESCRIPTOR_PROPERTIES_KHR,
        "VkPhysicalDevicePushDescriptorPropertiesKHR",
        [Requires::device_extensions(&["VK_KHR_push_descriptor"])];
    DepthStencilResolveProperties => PHYSICAL_DEVICE_DEPTH_STENCIL_RESOLVE_PROPERTIES,
        "VkPhysicalDeviceDepthStencilResolvePropertiesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_depth_stencil_resolve"])];
    TimelineSemaphoreProperties => PHYSICAL_DEVICE_TIMELINE_SEMAPHORE_PROPERTIES,
        "VkPhysicalDeviceTimelineSemaphorePropertiesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_timeline_semaphore"])];
    Storage16BitFeatures => PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES,
        "VkPhysicalDevice16BitStorageFeatures",
        [v1_1(), Requires::device_extensions(&["VK_KHR_16bit_storage"])];
    MultiviewFeatures => PHYSICAL_DEVICE_MULTIVIEW_FEATURES,
        "VkPhysicalDeviceMultiviewFeatures",
        [v1_1(), Requires::device_extensions(&["VK_KHR_multiview"])];
    VariablePointersFeatures => PHYSICAL_DEVICE_VARIABLE_POINTERS_FEATURES,
        "VkPhysicalDeviceVariablePointersFeatures",
        [v1_1(), Requires::device_extensions(&["VK_KHR_variable_pointers"])];
    ProtectedMemoryFeatures => PHYSICAL_DEVICE_PROTECTED_MEMORY_FEATURES,
        "VkPhysicalDeviceProtectedMemoryFeatures",
        [v1_1()];
    SamplerYcbcrConversionFeatures => PHYSICAL_DEVICE_SAMPLER_YCBCR_CONVERSION_FEATURES,
        "VkPhysicalDeviceSamplerYcbcrConversionFeatures",
        [v1_1(), Requires::device_extensions(&["VK_KHR_sampler_ycbcr_conversion"])];
    ShaderDrawParametersFeatures => PHYSICAL_DEVICE_SHADER_DRAW_PARAMETERS_FEATURES,
        "VkPhysicalDeviceShaderDrawParametersFeatures",
        [v1_1(), Requires::device_extensions(&["VK_KHR_shader_draw_parameters"])];
    Storage8BitFeatures => PHYSICAL_DEVICE_8BIT_STORAGE_FEATURES,
        "VkPhysicalDevice8BitStorageFeaturesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_8bit_storage"])];
    ShaderFloat16Int8Features => PHYSICAL_DEVICE_SHADER_FLOAT16_INT8_FEATURES,
        "VkPhysicalDeviceShaderFloat16Int8FeaturesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_shader_float16_int8"])];
    ScalarBlockLayoutFeatures => PHYSICAL_DEVICE_SCALAR_BLOCK_LAYOUT_FEATURES,
        "VkPhysicalDeviceScalarBlockLayoutFeaturesEXT",
        [v1_2(), Requires::device_extensions(&["VK_EXT_scalar_block_layout"])];
    TimelineSemaphoreFeatures => PHYSICAL_DEVICE_TIMELINE_SEMAPHORE_FEATURES,
        "VkPhysicalDeviceTimelineSemaphoreFeaturesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_timeline_semaphore"])];
    HostQueryResetFeatures => PHYSICAL_DEVICE_HOST_QUERY_RESET_FEATURES,
        "VkPhysicalDeviceHostQueryResetFeaturesEXT",
        [v1_2(), Requires::device_extensions(&["VK_EXT_host_query_reset"])];
    BufferDeviceAddressFeatures => PHYSICAL_DEVICE_BUFFER_DEVICE_ADDRESS_FEATURES,
        "VkPhysicalDeviceBufferDeviceAddressFeaturesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_buffer_device_address"])];
    UniformBufferStandardLayoutFeatures => PHYSICAL_DEVICE_UNIFORM_BUFFER_STANDARD_LAYOUT_FEATURES,
        "VkPhysicalDeviceUniformBufferStandardLayoutFeaturesKHR",
        [v1_2(), Requires::device_extensions(&["VK_KHR_uniform_buffer_standard_layout"])];
    SharedPresentSurfaceCapabilities => SHARED_PRESENT_SURFACE_CAPABILITIES_KHR,
        "VkSharedPresentSurfaceCapabilitiesKHR",
        [Requires::device_extensions(&["VK_KHR_shared_presentable_image"])];
    SurfaceProtectedCapabilities => SURFACE_PROTECTED_CAPABILITIES_KHR,
        "VkSurfaceProtectedCapabilitiesKHR",
        [Requires::instance_extensions(&["VK_KHR_surface_protected_capabilities"])];
}

capability_record! {
    pub struct DriverProperties: vk::PhysicalDeviceDriverProperties<'_> {
        driver_id: DriverId => "driverID",
        driver_name: String => "driverName",
        driver_info: String => "driverInfo",
        conformance_version: ConformanceVersion => "conformanceVersion",
    }
}

capability_record! {
    pub struct IdProperties: vk::PhysicalDeviceIDProperties<'_> {
        device_uuid: Uuid => "deviceUUID",
        driver_uuid: Uuid => "driverUUID",
        device_luid: Luid => "deviceLUID",
        device_node_mask: u32 => "deviceNodeMask",
        device_luid_valid: bool => "deviceLUIDValid",
    }
}

capability_record! {
    pub struct Maintenance3Properties: vk::PhysicalDeviceMaintenance3Properties<'_> {
        max_per_set_descriptors: u32 => "maxPerSetDescriptors",
        max_memory_allocation_size: u64 => "maxMemoryAllocationSize",
    }
}

capability_record! {
    pub struct MultiviewProperties: vk::PhysicalDeviceMultiviewProperties<'_> {
        max_multiview_view_count: u32 => "maxMultiviewViewCount",
        max_multiview_instance_index: u32 => "maxMultiviewInstanceIndex",
    }
}

capability_record! {
    pub struct PointClippingProperties: vk::PhysicalDevicePointClippingProperties<'_> {
        point_clipping_behavior: PointClippingBehavior => "pointClippingBehavior",
    }
}

capability_record! {
    pub struct ProtectedMemoryProperties: vk::PhysicalDeviceProtectedMemoryProperties<'_> {
        protected_no_fault: bool => "protectedNoFault",
    }
}

capability_record! {
    pub struct SubgroupProperties: vk::PhysicalDeviceSubgroupProperties<'_> {
        subgroup_size: u32 => "subgroupSize",
        supported_stages: ShaderStageFlags => "supportedStages",
        supported_operations: SubgroupFeatureFlags => "supportedOperations",
        quad_operations_in_all_stages: bool => "quadOperationsInAllStages",
    }
}

capability_record! {
    pub struct PushDescriptorProperties: vk::PhysicalDevicePushDescriptorPropertiesKHR<'_> {
        max_push_descriptors: u32 => "maxPushDescriptors",
    }
}

capability_record! {
    pub struct DepthStencilResolveProperties: vk::PhysicalDeviceDepthStencilResolveProperties<'_> {
        supported_depth_resolve_modes: ResolveModeFlags => "supportedDepthResolveModes",
        supported_stencil_resolve_modes: ResolveModeFlags => "supportedStencilResolveModes",
        independent_resolve_none: bool => "independentResolveNone",
        independent_resolve: bool => "independentResolve",
    }
}

capability_record! {
    pub struct TimelineSemaphoreProperties: vk::PhysicalDeviceTimelineSemaphoreProperties<'_> {
        max_timeline_semaphore_value_difference: u64 => "maxTimelineSemaphoreValueDifference",
    }
}

capability_record! {
    pub struct Storage16BitFeatures: vk::PhysicalDevice16BitStorageFeatures<'_> {
        storage_buffer16_bit_access: bool => "storageBuffer16BitAccess",
        uniform_and_storage_buffer16_bit_access: bool => "uniformAndStorageBuffer16BitAccess",
        storage_push_constant16: bool => "storagePushConstant16",
        storage_input_output16: bool => "storageInputOutput16",
    }
}

capability_record! {
    pub struct MultiviewFeatures: vk::PhysicalDeviceMultiviewFeatures<'_> {
        multiview: bool => "multiview",
        multiview_geometry_shader: bool => "multiviewGeometryShader",
        multiview_tessellation_shader: bool => "multiviewTessellationShader",
    }
}

capability_record! {
    pub struct VariablePointersFeatures: vk::PhysicalDeviceVariablePointersFeatures<'_> {
        variable_pointers_storage_buffer: bool => "variablePointersStorageBuffer",
        variable_pointers: bool => "variablePointers",
    }
}

capability_record! {
    pub struct ProtectedMemoryFeatures: vk::PhysicalDeviceProtectedMemoryFeatures<'_> {
        protected_memory: bool => "protectedMemory",
    }
}

capability_record! {
    pub struct SamplerYcbcrConversionFeatures: vk::PhysicalDeviceSamplerYcbcrConversionFeatures<'_> {
        sampler_ycbcr_conversion: bool => "samplerYcbcrConversion",
    }
}

capability_record! {
    pub struct ShaderDrawParametersFeatures: vk::PhysicalDeviceShaderDrawParametersFeatures<'_> {
        shader_draw_parameters: bool => "shaderDrawParameters",
    }
}

capability_record! {
    pub struct Storage8BitFeatures: vk::PhysicalDevice8BitStorageFeatures<'_> {
        storage_buffer8_bit_access: bool => "storageBuffer8BitAccess",
        uniform_and_storage_buffer8_bit_access: bool => "uniformAndStorageBuffer8BitAccess",
        storage_push_constant8: bool => "storagePushConstant8",
    }
}

capability_record! {
    pub struct ShaderFloat16Int8Features: vk::PhysicalDeviceShaderFloat16Int8Features<'_> {
        shader_float16: bool => "shaderFloat16",
        shader_int8: bool => "shaderInt8",
    }
}

capability_record! {
    pub struct ScalarBlockLayoutFeatures: vk::PhysicalDeviceScalarBlockLayoutFeatures<'_> {
        scalar_block_layout: bool => "scalarBlockLayout",
    }
}

capability_record! {
    pub struct TimelineSemaphoreFeatures: vk::PhysicalDeviceTimelineSemaphoreFeatures<'_> {
        timeline_semaphore: bool => "timelineSemaphore",
    }
}

capability_record! {
    pub struct HostQueryResetFeatures: vk::PhysicalDeviceHostQueryResetFeatures<'_> {
        host_query_reset: bool => "hostQueryReset",
    }
}

capability_record! {
    pub struct BufferDeviceAddressFeatures: vk::PhysicalDeviceBufferDeviceAddressFeatures<'_> {
        buffer_device_address: bool => "bufferDeviceAddress",
        buffer_device_address_capture_replay: bool => "bufferDeviceAddressCaptureReplay",
        buffer_device_address_multi_device: bool => "bufferDeviceAddressMultiDevice",
    }
}

capability_record! {
    pub struct UniformBufferStandardLayoutFeatures: vk::PhysicalDeviceUniformBufferStandardLayoutFeatures<'_> {
        uniform_buffer_standard_layout: bool => "uniformBufferStandardLayout",
    }
}

capability_record! {
    pub struct SharedPresentSurfaceCapabilities: vk::SharedPresentSurfaceCapabilitiesKHR<'_> {
        shared_present_supported_usage_flags: ImageUsageFlags => "sharedPresentSupportedUsageFlags",
    }
}

capability_record! {
    pub struct SurfaceProtectedCapabilities: vk::SurfaceProtectedCapabilitiesKHR<'_> {
        supports_protected: bool => "supportsProtected",
    }
}
