use ash::vk;

use crate::{
    ColorSpace, CompositeAlphaFlags, Extent2d, Format, FormatFeatureFlags, ImageUsageFlags,
    SampleCountFlags, SurfaceTransformFlags, ToolPurposeFlags, describe::string_from_chars,
};

capability_record! {
    /// Implementation limits of a physical device.
    pub struct DeviceLimits: vk::PhysicalDeviceLimits {
        max_image_dimension1_d: u32 => "maxImageDimension1D",
        max_image_dimension2_d: u32 => "maxImageDimension2D",
        max_image_dimension3_d: u32 => "maxImageDimension3D",
        max_image_dimension_cube: u32 => "maxImageDimensionCube",
        max_image_array_layers: u32 => "maxImageArrayLayers",
        max_texel_buffer_elements: u32 => "maxTexelBufferElements",
        max_uniform_buffer_range: u32 => "maxUniformBufferRange",
        max_storage_buffer_range: u32 => "maxStorageBufferRange",
        max_push_constants_size: u32 => "maxPushConstantsSize",
        max_memory_allocation_count: u32 => "maxMemoryAllocationCount",
        max_sampler_allocation_count: u32 => "maxSamplerAllocationCount",
        buffer_image_granularity: u64 => "bufferImageGranularity",
        sparse_address_space_size: u64 => "sparseAddressSpaceSize",
        max_bound_descriptor_sets: u32 => "maxBoundDescriptorSets",
        max_per_stage_descriptor_samplers: u32 => "maxPerStageDescriptorSamplers",
        max_per_stage_descriptor_uniform_buffers: u32 => "maxPerStageDescriptorUniformBuffers",
        max_per_stage_descriptor_storage_buffers: u32 => "maxPerStageDescriptorStorageBuffers",
        max_per_stage_descriptor_sampled_images: u32 => "maxPerStageDescriptorSampledImages",
        max_per_stage_descriptor_storage_images: u32 => "maxPerStageDescriptorStorageImages",
        max_per_stage_descriptor_input_attachments: u32 => "maxPerStageDescriptorInputAttachments",
        max_per_stage_resources: u32 => "maxPerStageResources",
        max_descriptor_set_samplers: u32 => "maxDescriptorSetSamplers",
        max_descriptor_set_uniform_buffers: u32 => "maxDescriptorSetUniformBuffers",
        max_descriptor_set_uniform_buffers_dynamic: u32 => "maxDescriptorSetUniformBuffersDynamic",
        max_descriptor_set_storage_buffers: u32 => "maxDescriptorSetStorageBuffers",
        max_descriptor_set_storage_buffers_dynamic: u32 => "maxDescriptorSetStorageBuffersDynamic",
        max_descriptor_set_sampled_images: u32 => "maxDescriptorSetSampledImages",
        max_descriptor_set_storage_images: u32 => "maxDescriptorSetStorageImages",
        max_descriptor_set_input_attachments: u32 => "maxDescriptorSetInputAttachments",
        max_vertex_input_attributes: u32 => "maxVertexInputAttributes",
        max_vertex_input_bindings: u32 => "maxVertexInputBindings",
        max_vertex_input_attribute_offset: u32 => "maxVertexInputAttributeOffset",
        max_vertex_input_binding_stride: u32 => "maxVertexInputBindingStride",
        max_vertex_output_components: u32 => "maxVertexOutputComponents",
        max_tessellation_generation_level: u32 => "maxTessellationGenerationLevel",
        max_tessellation_patch_size: u32 => "maxTessellationPatchSize",
        max_tessellation_control_per_vertex_input_components: u32 => "maxTessellationControlPerVertexInputComponents",
        max_tessellation_control_per_vertex_output_components: u32 => "maxTessellationControlPerVertexOutputComponents",
        max_tessellation_control_per_patch_output_components: u32 => "maxTessellationControlPerPatchOutputComponents",
        max_tessellation_control_total_output_components: u32 => "maxTessellationControlTotalOutputComponents",
        max_tessellation_evaluation_input_components: u32 => "maxTessellationEvaluationInputComponents",
        max_tessellation_evaluation_output_components: u32 => "maxTessellationEvaluationOutputComponents",
        max_geometry_shader_invocations: u32 => "maxGeometryShaderInvocations",
        max_geometry_input_components: u32 => "maxGeometryInputComponents",
        max_geometry_output_components: u32 => "maxGeometryOutputComponents",
        max_geometry_output_vertices: u32 => "maxGeometryOutputVertices",
        max_geometry_total_output_components: u32 => "maxGeometryTotalOutputComponents",
        max_fragment_input_components: u32 => "maxFragmentInputComponents",
        max_fragment_output_attachments: u32 => "maxFragmentOutputAttachments",
        max_fragment_dual_src_attachments: u32 => "maxFragmentDualSrcAttachments",
        max_fragment_combined_output_resources: u32 => "maxFragmentCombinedOutputResources",
        max_compute_shared_memory_size: u32 => "maxComputeSharedMemorySize",
        max_compute_work_group_count: [u32; 3] => "maxComputeWorkGroupCount",
        max_compute_work_group_invocations: u32 => "maxComputeWorkGroupInvocations",
        max_compute_work_group_size: [u32; 3] => "maxComputeWorkGroupSize",
        sub_pixel_precision_bits: u32 => "subPixelPrecisionBits",
        sub_texel_precision_bits: u32 => "subTexelPrecisionBits",
        mipmap_precision_bits: u32 => "mipmapPrecisionBits",
        max_draw_indexed_index_value: u32 => "maxDrawIndexedIndexValue",
        max_draw_indirect_count: u32 => "maxDrawIndirectCount",
        max_sampler_lod_bias: f32 => "maxSamplerLodBias",
        max_sampler_anisotropy: f32 => "maxSamplerAnisotropy",
        max_viewports: u32 => "maxViewports",
        max_viewport_dimensions: [u32; 2] => "maxViewportDimensions",
        viewport_bounds_range: [f32; 2] => "viewportBoundsRange",
        viewport_sub_pixel_bits: u32 => "viewportSubPixelBits",
        min_memory_map_alignment: usize => "minMemoryMapAlignment",
        min_texel_buffer_offset_alignment: u64 => "minTexelBufferOffsetAlignment",
        min_uniform_buffer_offset_alignment: u64 => "minUniformBufferOffsetAlignment",
        min_storage_buffer_offset_alignment: u64 => "minStorageBufferOffsetAlignment",
        min_texel_offset: i32 => "minTexelOffset",
        max_texel_offset: u32 => "maxTexelOffset",
        min_texel_gather_offset: i32 => "minTexelGatherOffset",
        max_texel_gather_offset: u32 => "maxTexelGatherOffset",
        min_interpolation_offset: f32 => "minInterpolationOffset",
        max_interpolation_offset: f32 => "maxInterpolationOffset",
        sub_pixel_interpolation_offset_bits: u32 => "subPixelInterpolationOffsetBits",
        max_framebuffer_width: u32 => "maxFramebufferWidth",
        max_framebuffer_height: u32 => "maxFramebufferHeight",
        max_framebuffer_layers: u32 => "maxFramebufferLayers",
        framebuffer_color_sample_counts: SampleCountFlags => "framebufferColorSampleCounts",
        framebuffer_depth_sample_counts: SampleCountFlags => "framebufferDepthSampleCounts",
        framebuffer_stencil_sample_counts: SampleCountFlags => "framebufferStencilSampleCounts",
        framebuffer_no_attachments_sample_counts: SampleCountFlags => "framebufferNoAttachmentsSampleCounts",
        max_color_attachments: u32 => "maxColorAttachments",
        sampled_image_color_sample_counts: SampleCountFlags => "sampledImageColorSampleCounts",
        sampled_image_integer_sample_counts: SampleCountFlags => "sampledImageIntegerSampleCounts",
        sampled_image_depth_sample_counts: SampleCountFlags => "sampledImageDepthSampleCounts",
        sampled_image_stencil_sample_counts: SampleCountFlags => "sampledImageStencilSampleCounts",
        storage_image_sample_counts: SampleCountFlags => "storageImageSampleCounts",
        max_sample_mask_words: u32 => "maxSampleMaskWords",
        timestamp_compute_and_graphics: bool => "timestampComputeAndGraphics",
        timestamp_period: f32 => "timestampPeriod",
        max_clip_distances: u32 => "maxClipDistances",
        max_cull_distances: u32 => "maxCullDistances",
        max_combined_clip_and_cull_distances: u32 => "maxCombinedClipAndCullDistances",
        discrete_queue_priorities: u32 => "discreteQueuePriorities",
        point_size_range: [f32; 2] => "pointSizeRange",
        line_width_range: [f32; 2] => "lineWidthRange",
        point_size_granularity: f32 => "pointSizeGranularity",
        line_width_granularity: f32 => "lineWidthGranularity",
        strict_lines: bool => "strictLines",
        standard_sample_locations: bool => "standardSampleLocations",
        optimal_buffer_copy_offset_alignment: u64 => "optimalBufferCopyOffsetAlignment",
        optimal_buffer_copy_row_pitch_alignment: u64 => "optimalBufferCopyRowPitchAlignment",
        non_coherent_atom_size: u64 => "nonCoherentAtomSize",
    }
}

capability_record! {
    pub struct SparseProperties: vk::PhysicalDeviceSparseProperties {
        residency_standard2_d_block_shape: bool => "residencyStandard2DBlockShape",
        residency_standard2_d_multisample_block_shape: bool => "residencyStandard2DMultisampleBlockShape",
        residency_standard3_d_block_shape: bool => "residencyStandard3DBlockShape",
        residency_aligned_mip_size: bool => "residencyAlignedMipSize",
        residency_non_resident_strict: bool => "residencyNonResidentStrict",
    }
}

capability_record! {
    /// The core Vulkan 1.0 feature set.
    pub struct DeviceFeatures: vk::PhysicalDeviceFeatures {
        robust_buffer_access: bool => "robustBufferAccess",
        full_draw_index_uint32: bool => "fullDrawIndexUint32",
        image_cube_array: bool => "imageCubeArray",
        independent_blend: bool => "independentBlend",
        geometry_shader: bool => "geometryShader",
        tessellation_shader: bool => "tessellationShader",
        sample_rate_shading: bool => "sampleRateShading",
        dual_src_blend: bool => "dualSrcBlend",
        logic_op: bool => "logicOp",
        multi_draw_indirect: bool => "multiDrawIndirect",
        draw_indirect_first_instance: bool => "drawIndirectFirstInstance",
        depth_clamp: bool => "depthClamp",
        depth_bias_clamp: bool => "depthBiasClamp",
        fill_mode_non_solid: bool => "fillModeNonSolid",
        depth_bounds: bool => "depthBounds",
        wide_lines: bool => "wideLines",
        large_points: bool => "largePoints",
        alpha_to_one: bool => "alphaToOne",
        multi_viewport: bool => "multiViewport",
        sampler_anisotropy: bool => "samplerAnisotropy",
        texture_compression_etc2: bool => "textureCompressionETC2",
        texture_compression_astc_ldr: bool => "textureCompressionASTC_LDR",
        texture_compression_bc: bool => "textureCompressionBC",
        occlusion_query_precise: bool => "occlusionQueryPrecise",
        pipeline_statistics_query: bool => "pipelineStatisticsQuery",
        vertex_pipeline_stores_and_atomics: bool => "vertexPipelineStoresAndAtomics",
        fragment_stores_and_atomics: bool => "fragmentStoresAndAtomics",
        shader_tessellation_and_geometry_point_size: bool => "shaderTessellationAndGeometryPointSize",
        shader_image_gather_extended: bool => "shaderImageGatherExtended",
        shader_storage_image_extended_formats: bool => "shaderStorageImageExtendedFormats",
        shader_storage_image_multisample: bool => "shaderStorageImageMultisample",
        shader_storage_image_read_without_format: bool => "shaderStorageImageReadWithoutFormat",
        shader_storage_image_write_without_format: bool => "shaderStorageImageWriteWithoutFormat",
        shader_uniform_buffer_array_dynamic_indexing: bool => "shaderUniformBufferArrayDynamicIndexing",
        shader_sampled_image_array_dynamic_indexing: bool => "shaderSampledImageArrayDynamicIndexing",
        shader_storage_buffer_array_dynamic_indexing: bool => "shaderStorageBufferArrayDynamicIndexing",
        shader_storage_image_array_dynamic_indexing: bool => "shaderStorageImageArrayDynamicIndexing",
        shader_clip_distance: bool => "shaderClipDistance",
        shader_cull_distance: bool => "shaderCullDistance",
        shader_float64: bool => "shaderFloat64",
        shader_int64: bool => "shaderInt64",
        shader_int16: bool => "shaderInt16",
        shader_resource_residency: bool => "shaderResourceResidency",
        shader_resource_min_lod: bool => "shaderResourceMinLod",
        sparse_binding: bool => "sparseBinding",
        sparse_residency_buffer: bool => "sparseResidencyBuffer",
        sparse_residency_image2_d: bool => "sparseResidencyImage2D",
        sparse_residency_image3_d: bool => "sparseResidencyImage3D",
        sparse_residency2_samples: bool => "sparseResidency2Samples",
        sparse_residency4_samples: bool => "sparseResidency4Samples",
        sparse_residency8_samples: bool => "sparseResidency8Samples",
        sparse_residency16_samples: bool => "sparseResidency16Samples",
        sparse_residency_aliased: bool => "sparseResidencyAliased",
        variable_multisample_rate: bool => "variableMultisampleRate",
        inherited_queries: bool => "inheritedQueries",
    }
}

capability_record! {
    pub struct FormatProperties: vk::FormatProperties {
        linear_tiling_features: FormatFeatureFlags => "linearTilingFeatures",
        optimal_tiling_features: FormatFeatureFlags => "optimalTilingFeatures",
        buffer_features: FormatFeatureFlags => "bufferFeatures",
    }
}

impl FormatProperties {
    /// Whether any tiling or buffer use supports at least one feature.
    pub fn is_supported(&self) -> bool {
        !(self.linear_tiling_features.is_empty()
            && self.optimal_tiling_features.is_empty()
            && self.buffer_features.is_empty())
    }

    pub(crate) fn sort_key(&self) -> (u32, u32, u32) {
        (
            self.linear_tiling_features.bits(),
            self.optimal_tiling_features.bits(),
            self.buffer_features.bits(),
        )
    }
}

capability_record! {
    pub struct SurfaceFormat: vk::SurfaceFormatKHR {
        format: Format => "format",
        color_space: ColorSpace => "colorSpace",
    }
}

capability_record! {
    pub struct SurfaceCapabilities: vk::SurfaceCapabilitiesKHR {
        min_image_count: u32 => "minImageCount",
        max_image_count: u32 => "maxImageCount",
        current_extent: Extent2d => "currentExtent",
        min_image_extent: Extent2d => "minImageExtent",
        max_image_extent: Extent2d => "maxImageExtent",
        max_image_array_layers: u32 => "maxImageArrayLayers",
        supported_transforms: SurfaceTransformFlags => "supportedTransforms",
        current_transform: SurfaceTransformFlags => "currentTransform",
        supported_composite_alpha: CompositeAlphaFlags => "supportedCompositeAlpha",
        supported_usage_flags: ImageUsageFlags => "supportedUsageFlags",
    }
}

capability_record! {
    /// A tool, such as a validation layer or a profiler, active on a device.
    pub struct ToolProperties: vk::PhysicalDeviceToolProperties<'_> {
        name: String => "name",
        version: String => "version",
        purposes: ToolPurposeFlags => "purposes",
        description: String => "description",
        layer: String => "layer",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtensionProperties {
    pub name: String,
    pub spec_version: u32,
}

impl ExtensionProperties {
    pub fn new(name: impl Into<String>, spec_version: u32) -> Self {
        Self {
            name: name.into(),
            spec_version,
        }
    }

    pub(crate) fn from_vk(raw: &vk::ExtensionProperties) -> Self {
        Self {
            name: string_from_chars(&raw.extension_name),
            spec_version: raw.spec_version,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerProperties {
    /// `None` when the loader reported an empty name.
    pub name: Option<String>,
    pub spec_version: u32,
    pub implementation_version: u32,
    pub description: String,
}

impl LayerProperties {
    pub(crate) fn from_vk(raw: &vk::LayerProperties) -> Self {
        let name = string_from_chars(&raw.layer_name);

        Self {
            name: (!name.is_empty()).then_some(name),
            spec_version: raw.spec_version,
            implementation_version: raw.implementation_version,
            description: string_from_chars(&raw.description),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentInfo, Node, OutputFormat, Printer, describe::Describe};

    #[test]
    fn records_convert_from_raw_structs() {
        let raw = vk::PhysicalDeviceSparseProperties {
            residency_standard2_d_block_shape: vk::TRUE,
            residency_aligned_mip_size: vk::TRUE,
            ..Default::default()
        };

        let sparse = SparseProperties::from_vk(&raw);

        assert!(sparse.residency_standard2_d_block_shape);
        assert!(sparse.residency_aligned_mip_size);
        assert!(!sparse.residency_non_resident_strict);
    }

    #[test]
    fn records_describe_every_field_in_one_object() {
        let mut p = Printer::new(OutputFormat::Text, DocumentInfo::default());
        SparseProperties::default().describe(&mut p, "VkPhysicalDeviceSparseProperties");

        let document = p.finish();
        let object = document.object("VkPhysicalDeviceSparseProperties").unwrap();

        assert_eq!(object.items().count(), 5);
        assert!(object.items().all(|node| matches!(
            node,
            Node::Entry(entry) if entry.width == "residencyStandard2DMultisampleBlockShape".len()
        )));
    }

    #[test]
    fn limits_arrays_become_arrays() {
        let limits = DeviceLimits {
            max_compute_work_group_count: [65535, 65535, 65535],
            ..Default::default()
        };

        let mut p = Printer::new(OutputFormat::Json, DocumentInfo::default());
        limits.describe(&mut p, "VkPhysicalDeviceLimits");

        let document = p.finish();
        let object = document.object("VkPhysicalDeviceLimits").unwrap();
        let array = object.array("maxComputeWorkGroupCount").unwrap();

        assert_eq!(array.expected_len, Some(3));
        assert_eq!(array.items().count(), 3);
    }

    #[test]
    fn unsupported_formats_have_no_features() {
        assert!(!FormatProperties::default().is_supported());
        assert!(
            FormatProperties {
                buffer_features: FormatFeatureFlags::VERTEX_BUFFER,
                ..Default::default()
            }
            .is_supported()
        );
    }

    #[test]
    fn empty_layer_names_are_absent() {
        let layer = LayerProperties::from_vk(&vk::LayerProperties::default());

        assert_eq!(layer.name, None);
        assert_eq!(layer.name(), "");
    }
}
