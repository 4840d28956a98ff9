use ash::vk;

vk_flags! {
    pub struct QueueFlags: vk::QueueFlags {
        const GRAPHICS       = 0x0000_0001 => "QUEUE_GRAPHICS_BIT";
        const COMPUTE        = 0x0000_0002 => "QUEUE_COMPUTE_BIT";
        const TRANSFER       = 0x0000_0004 => "QUEUE_TRANSFER_BIT";
        const SPARSE_BINDING = 0x0000_0008 => "QUEUE_SPARSE_BINDING_BIT";
        const PROTECTED      = 0x0000_0010 => "QUEUE_PROTECTED_BIT";
        const VIDEO_DECODE   = 0x0000_0020 => "QUEUE_VIDEO_DECODE_BIT_KHR";
        const VIDEO_ENCODE   = 0x0000_0040 => "QUEUE_VIDEO_ENCODE_BIT_KHR";
        const OPTICAL_FLOW   = 0x0000_0100 => "QUEUE_OPTICAL_FLOW_BIT_NV";
    }
}

vk_flags! {
    pub struct MemoryHeapFlags: vk::MemoryHeapFlags {
        const DEVICE_LOCAL   = 0x0000_0001 => "MEMORY_HEAP_DEVICE_LOCAL_BIT";
        const MULTI_INSTANCE = 0x0000_0002 => "MEMORY_HEAP_MULTI_INSTANCE_BIT";
    }
}

vk_flags! {
    pub struct MemoryPropertyFlags: vk::MemoryPropertyFlags {
        const DEVICE_LOCAL     = 0x0000_0001 => "MEMORY_PROPERTY_DEVICE_LOCAL_BIT";
        const HOST_VISIBLE     = 0x0000_0002 => "MEMORY_PROPERTY_HOST_VISIBLE_BIT";
        const HOST_COHERENT    = 0x0000_0004 => "MEMORY_PROPERTY_HOST_COHERENT_BIT";
        const HOST_CACHED      = 0x0000_0008 => "MEMORY_PROPERTY_HOST_CACHED_BIT";
        const LAZILY_ALLOCATED = 0x0000_0010 => "MEMORY_PROPERTY_LAZILY_ALLOCATED_BIT";
        const PROTECTED        = 0x0000_0020 => "MEMORY_PROPERTY_PROTECTED_BIT";
        const DEVICE_COHERENT  = 0x0000_0040 => "MEMORY_PROPERTY_DEVICE_COHERENT_BIT_AMD";
        const DEVICE_UNCACHED  = 0x0000_0080 => "MEMORY_PROPERTY_DEVICE_UNCACHED_BIT_AMD";
        const RDMA_CAPABLE     = 0x0000_0100 => "MEMORY_PROPERTY_RDMA_CAPABLE_BIT_NV";
    }
}

vk_flags! {
    pub struct FormatFeatureFlags: vk::FormatFeatureFlags {
        const SAMPLED_IMAGE               = 0x0000_0001 => "FORMAT_FEATURE_SAMPLED_IMAGE_BIT";
        const STORAGE_IMAGE               = 0x0000_0002 => "FORMAT_FEATURE_STORAGE_IMAGE_BIT";
        const STORAGE_IMAGE_ATOMIC        = 0x0000_0004 => "FORMAT_FEATURE_STORAGE_IMAGE_ATOMIC_BIT";
        const UNIFORM_TEXEL_BUFFER        = 0x0000_0008 => "FORMAT_FEATURE_UNIFORM_TEXEL_BUFFER_BIT";
        const STORAGE_TEXEL_BUFFER        = 0x0000_0010 => "FORMAT_FEATURE_STORAGE_TEXEL_BUFFER_BIT";
        const STORAGE_TEXEL_BUFFER_ATOMIC = 0x0000_0020 => "FORMAT_FEATURE_STORAGE_TEXEL_BUFFER_ATOMIC_BIT";
        const VERTEX_BUFFER               = 0x0000_0040 => "FORMAT_FEATURE_VERTEX_BUFFER_BIT";
        const COLOR_ATTACHMENT            = 0x0000_0080 => "FORMAT_FEATURE_COLOR_ATTACHMENT_BIT";
        const COLOR_ATTACHMENT_BLEND      = 0x0000_0100 => "FORMAT_FEATURE_COLOR_ATTACHMENT_BLEND_BIT";
        const DEPTH_STENCIL_ATTACHMENT    = 0x0000_0200 => "FORMAT_FEATURE_DEPTH_STENCIL_ATTACHMENT_BIT";
        const BLIT_SRC                    = 0x0000_0400 => "FORMAT_FEATURE_BLIT_SRC_BIT";
        const BLIT_DST                    = 0x0000_0800 => "FORMAT_FEATURE_BLIT_DST_BIT";
        const SAMPLED_IMAGE_FILTER_LINEAR = 0x0000_1000 => "FORMAT_FEATURE_SAMPLED_IMAGE_FILTER_LINEAR_BIT";
        const SAMPLED_IMAGE_FILTER_CUBIC  = 0x0000_2000 => "FORMAT_FEATURE_SAMPLED_IMAGE_FILTER_CUBIC_BIT_EXT";
        const TRANSFER_SRC                = 0x0000_4000 => "FORMAT_FEATURE_TRANSFER_SRC_BIT";
        const TRANSFER_DST                = 0x0000_8000 => "FORMAT_FEATURE_TRANSFER_DST_BIT";
        const SAMPLED_IMAGE_FILTER_MINMAX = 0x0001_0000 => "FORMAT_FEATURE_SAMPLED_IMAGE_FILTER_MINMAX_BIT";
        const MIDPOINT_CHROMA_SAMPLES     = 0x0002_0000 => "FORMAT_FEATURE_MIDPOINT_CHROMA_SAMPLES_BIT";
        const YCBCR_LINEAR_FILTER         = 0x0004_0000 => "FORMAT_FEATURE_SAMPLED_IMAGE_YCBCR_CONVERSION_LINEAR_FILTER_BIT";
        const YCBCR_SEPARATE_FILTER       = 0x0008_0000 => "FORMAT_FEATURE_SAMPLED_IMAGE_YCBCR_CONVERSION_SEPARATE_RECONSTRUCTION_FILTER_BIT";
        const YCBCR_EXPLICIT              = 0x0010_0000 => "FORMAT_FEATURE_SAMPLED_IMAGE_YCBCR_CONVERSION_CHROMA_RECONSTRUCTION_EXPLICIT_BIT";
        const YCBCR_EXPLICIT_FORCEABLE    = 0x0020_0000 => "FORMAT_FEATURE_SAMPLED_IMAGE_YCBCR_CONVERSION_CHROMA_RECONSTRUCTION_EXPLICIT_FORCEABLE_BIT";
        const DISJOINT                    = 0x0040_0000 => "FORMAT_FEATURE_DISJOINT_BIT";
        const COSITED_CHROMA_SAMPLES      = 0x0080_0000 => "FORMAT_FEATURE_COSITED_CHROMA_SAMPLES_BIT";
        const FRAGMENT_DENSITY_MAP        = 0x0100_0000 => "FORMAT_FEATURE_FRAGMENT_DENSITY_MAP_BIT_EXT";
    }
}

vk_flags! {
    pub struct SampleCountFlags: vk::SampleCountFlags {
        const TYPE_1  = 0x0000_0001 => "SAMPLE_COUNT_1_BIT";
        const TYPE_2  = 0x0000_0002 => "SAMPLE_COUNT_2_BIT";
        const TYPE_4  = 0x0000_0004 => "SAMPLE_COUNT_4_BIT";
        const TYPE_8  = 0x0000_0008 => "SAMPLE_COUNT_8_BIT";
        const TYPE_16 = 0x0000_0010 => "SAMPLE_COUNT_16_BIT";
        const TYPE_32 = 0x0000_0020 => "SAMPLE_COUNT_32_BIT";
        const TYPE_64 = 0x0000_0040 => "SAMPLE_COUNT_64_BIT";
    }
}

vk_flags! {
    pub struct ImageUsageFlags: vk::ImageUsageFlags {
        const TRANSFER_SRC             = 0x0000_0001 => "IMAGE_USAGE_TRANSFER_SRC_BIT";
        const TRANSFER_DST             = 0x0000_0002 => "IMAGE_USAGE_TRANSFER_DST_BIT";
        const SAMPLED                  = 0x0000_0004 => "IMAGE_USAGE_SAMPLED_BIT";
        const STORAGE                  = 0x0000_0008 => "IMAGE_USAGE_STORAGE_BIT";
        const COLOR_ATTACHMENT         = 0x0000_0010 => "IMAGE_USAGE_COLOR_ATTACHMENT_BIT";
        const DEPTH_STENCIL_ATTACHMENT = 0x0000_0020 => "IMAGE_USAGE_DEPTH_STENCIL_ATTACHMENT_BIT";
        const TRANSIENT_ATTACHMENT     = 0x0000_0040 => "IMAGE_USAGE_TRANSIENT_ATTACHMENT_BIT";
        const INPUT_ATTACHMENT         = 0x0000_0080 => "IMAGE_USAGE_INPUT_ATTACHMENT_BIT";
    }
}

vk_flags! {
    pub struct SurfaceTransformFlags: vk::SurfaceTransformFlagsKHR {
        const IDENTITY                     = 0x0000_0001 => "SURFACE_TRANSFORM_IDENTITY_BIT_KHR";
        const ROTATE_90                    = 0x0000_0002 => "SURFACE_TRANSFORM_ROTATE_90_BIT_KHR";
        const ROTATE_180                   = 0x0000_0004 => "SURFACE_TRANSFORM_ROTATE_180_BIT_KHR";
        const ROTATE_270                   = 0x0000_0008 => "SURFACE_TRANSFORM_ROTATE_270_BIT_KHR";
        const HORIZONTAL_MIRROR            = 0x0000_0010 => "SURFACE_TRANSFORM_HORIZONTAL_MIRROR_BIT_KHR";
        const HORIZONTAL_MIRROR_ROTATE_90  = 0x0000_0020 => "SURFACE_TRANSFORM_HORIZONTAL_MIRROR_ROTATE_90_BIT_KHR";
        const HORIZONTAL_MIRROR_ROTATE_180 = 0x0000_0040 => "SURFACE_TRANSFORM_HORIZONTAL_MIRROR_ROTATE_180_BIT_KHR";
        const HORIZONTAL_MIRROR_ROTATE_270 = 0x0000_0080 => "SURFACE_TRANSFORM_HORIZONTAL_MIRROR_ROTATE_270_BIT_KHR";
        const INHERIT                      = 0x0000_0100 => "SURFACE_TRANSFORM_INHERIT_BIT_KHR";
    }
}

vk_flags! {
    pub struct CompositeAlphaFlags: vk::CompositeAlphaFlagsKHR {
        const OPAQUE          = 0x0000_0001 => "COMPOSITE_ALPHA_OPAQUE_BIT_KHR";
        const PRE_MULTIPLIED  = 0x0000_0002 => "COMPOSITE_ALPHA_PRE_MULTIPLIED_BIT_KHR";
        const POST_MULTIPLIED = 0x0000_0004 => "COMPOSITE_ALPHA_POST_MULTIPLIED_BIT_KHR";
        const INHERIT         = 0x0000_0008 => "COMPOSITE_ALPHA_INHERIT_BIT_KHR";
    }
}

vk_flags! {
    pub struct SurfaceCounterFlags: vk::SurfaceCounterFlagsEXT {
        const VBLANK = 0x0000_0001 => "SURFACE_COUNTER_VBLANK_BIT_EXT";
    }
}

vk_flags! {
    pub struct ShaderStageFlags: vk::ShaderStageFlags {
        const VERTEX                  = 0x0000_0001 => "SHADER_STAGE_VERTEX_BIT";
        const TESSELLATION_CONTROL    = 0x0000_0002 => "SHADER_STAGE_TESSELLATION_CONTROL_BIT";
        const TESSELLATION_EVALUATION = 0x0000_0004 => "SHADER_STAGE_TESSELLATION_EVALUATION_BIT";
        const GEOMETRY                = 0x0000_0008 => "SHADER_STAGE_GEOMETRY_BIT";
        const FRAGMENT                = 0x0000_0010 => "SHADER_STAGE_FRAGMENT_BIT";
        const COMPUTE                 = 0x0000_0020 => "SHADER_STAGE_COMPUTE_BIT";
        const TASK                    = 0x0000_0040 => "SHADER_STAGE_TASK_BIT_EXT";
        const MESH                    = 0x0000_0080 => "SHADER_STAGE_MESH_BIT_EXT";
        const RAYGEN                  = 0x0000_0100 => "SHADER_STAGE_RAYGEN_BIT_KHR";
        const ANY_HIT                 = 0x0000_0200 => "SHADER_STAGE_ANY_HIT_BIT_KHR";
        const CLOSEST_HIT             = 0x0000_0400 => "SHADER_STAGE_CLOSEST_HIT_BIT_KHR";
        const MISS                    = 0x0000_0800 => "SHADER_STAGE_MISS_BIT_KHR";
        const INTERSECTION            = 0x0000_1000 => "SHADER_STAGE_INTERSECTION_BIT_KHR";
        const CALLABLE                = 0x0000_2000 => "SHADER_STAGE_CALLABLE_BIT_KHR";
    }
}

vk_flags! {
    pub struct SubgroupFeatureFlags: vk::SubgroupFeatureFlags {
        const BASIC            = 0x0000_0001 => "SUBGROUP_FEATURE_BASIC_BIT";
        const VOTE             = 0x0000_0002 => "SUBGROUP_FEATURE_VOTE_BIT";
        const ARITHMETIC       = 0x0000_0004 => "SUBGROUP_FEATURE_ARITHMETIC_BIT";
        const BALLOT           = 0x0000_0008 => "SUBGROUP_FEATURE_BALLOT_BIT";
        const SHUFFLE          = 0x0000_0010 => "SUBGROUP_FEATURE_SHUFFLE_BIT";
        const SHUFFLE_RELATIVE = 0x0000_0020 => "SUBGROUP_FEATURE_SHUFFLE_RELATIVE_BIT";
        const CLUSTERED        = 0x0000_0040 => "SUBGROUP_FEATURE_CLUSTERED_BIT";
        const QUAD             = 0x0000_0080 => "SUBGROUP_FEATURE_QUAD_BIT";
        const PARTITIONED      = 0x0000_0100 => "SUBGROUP_FEATURE_PARTITIONED_BIT_NV";
    }
}

vk_flags! {
    pub struct ResolveModeFlags: vk::ResolveModeFlags {
        const SAMPLE_ZERO = 0x0000_0001 => "RESOLVE_MODE_SAMPLE_ZERO_BIT";
        const AVERAGE     = 0x0000_0002 => "RESOLVE_MODE_AVERAGE_BIT";
        const MIN         = 0x0000_0004 => "RESOLVE_MODE_MIN_BIT";
        const MAX         = 0x0000_0008 => "RESOLVE_MODE_MAX_BIT";
    }
}

vk_flags! {
    pub struct DeviceGroupPresentModeFlags: vk::DeviceGroupPresentModeFlagsKHR {
        const LOCAL              = 0x0000_0001 => "DEVICE_GROUP_PRESENT_MODE_LOCAL_BIT_KHR";
        const REMOTE             = 0x0000_0002 => "DEVICE_GROUP_PRESENT_MODE_REMOTE_BIT_KHR";
        const SUM                = 0x0000_0004 => "DEVICE_GROUP_PRESENT_MODE_SUM_BIT_KHR";
        const LOCAL_MULTI_DEVICE = 0x0000_0008 => "DEVICE_GROUP_PRESENT_MODE_LOCAL_MULTI_DEVICE_BIT_KHR";
    }
}

vk_flags! {
    pub struct ToolPurposeFlags: vk::ToolPurposeFlags {
        const VALIDATION          = 0x0000_0001 => "TOOL_PURPOSE_VALIDATION_BIT";
        const PROFILING           = 0x0000_0002 => "TOOL_PURPOSE_PROFILING_BIT";
        const TRACING             = 0x0000_0004 => "TOOL_PURPOSE_TRACING_BIT";
        const ADDITIONAL_FEATURES = 0x0000_0008 => "TOOL_PURPOSE_ADDITIONAL_FEATURES_BIT";
        const MODIFYING_FEATURES  = 0x0000_0010 => "TOOL_PURPOSE_MODIFYING_FEATURES_BIT";
        const DEBUG_REPORTING     = 0x0000_0020 => "TOOL_PURPOSE_DEBUG_REPORTING_BIT_EXT";
        const DEBUG_MARKERS       = 0x0000_0040 => "TOOL_PURPOSE_DEBUG_MARKERS_BIT_EXT";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, describe::FromVk};

    #[test]
    fn names_follow_bit_order() {
        let flags = QueueFlags::TRANSFER | QueueFlags::GRAPHICS;

        assert_eq!(flags.names(), ["QUEUE_GRAPHICS_BIT", "QUEUE_TRANSFER_BIT"]);
        assert!(QueueFlags::empty().names().is_empty());
    }

    #[test]
    fn unknown_bits_are_kept_but_unnamed() {
        let flags = SampleCountFlags::from_vk(&vk::SampleCountFlags::from_raw(0x81));

        assert_eq!(flags.bits(), 0x81);
        assert_eq!(
            Value::from(flags),
            Value::Flags {
                bits: 0x81,
                names: vec![String::from("SAMPLE_COUNT_1_BIT")],
            }
        );
    }
}
