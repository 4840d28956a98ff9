use std::fmt;

use ash::vk;

use crate::{
    ChainContext, DeviceFeatures, Format, Instance, MemoryHeapFlags, MemoryPropertyFlags,
    ReportError,
    describe::FromVk,
    device::ScratchDeviceDescriptor,
    physical::Properties2,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemoryHeap {
    pub size: u64,
    pub flags: MemoryHeapFlags,
    /// Zero when `VK_EXT_memory_budget` is unavailable.
    pub budget: u64,
    pub usage: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemoryType {
    pub heap_index: u32,
    pub property_flags: MemoryPropertyFlags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageTiling {
    Optimal,
    Linear,
}

impl ImageTiling {
    pub const ALL: [Self; 2] = [Self::Optimal, Self::Linear];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Optimal => "IMAGE_TILING_OPTIMAL",
            Self::Linear => "IMAGE_TILING_LINEAR",
        }
    }

    pub const fn to_vk(self) -> vk::ImageTiling {
        match self {
            Self::Optimal => vk::ImageTiling::OPTIMAL,
            Self::Linear => vk::ImageTiling::LINEAR,
        }
    }
}

impl fmt::Display for ImageTiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Memory types an image of one format can be bound to.
///
/// Each variant is `None` when images of that kind cannot be created at all,
/// otherwise it holds the `memoryTypeBits` the driver reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageSupport {
    pub format: Format,
    pub regular: Option<u32>,
    pub sparse: Option<u32>,
    pub transient: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilingSupport {
    pub tiling: ImageTiling,
    /// The first format is the color format, the rest are depth/stencil.
    pub formats: Vec<ImageSupport>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub heaps: Vec<MemoryHeap>,
    pub types: Vec<MemoryType>,
    /// Image support per tiling, optimal first. A tiling has no formats when
    /// the probing device could not be created.
    pub image_support: Vec<TilingSupport>,
}

/// Formats images are probed with, color first.
pub const PROBED_FORMATS: [vk::Format; 8] = [
    vk::Format::R8G8B8A8_UNORM,
    vk::Format::D16_UNORM,
    vk::Format::X8_D24_UNORM_PACK32,
    vk::Format::D32_SFLOAT,
    vk::Format::S8_UINT,
    vk::Format::D16_UNORM_S8_UINT,
    vk::Format::D24_UNORM_S8_UINT,
    vk::Format::D32_SFLOAT_S8_UINT,
];

impl MemoryInfo {
    pub(crate) fn capture(
        instance: &Instance,
        physical_device: vk::PhysicalDevice,
        properties2: Option<&Properties2>,
        context: &ChainContext,
        features: &DeviceFeatures,
    ) -> Result<Self, ReportError> {
        let raw = unsafe {
            (instance.handle()).get_physical_device_memory_properties(physical_device)
        };

        let mut budget = vk::PhysicalDeviceMemoryBudgetPropertiesEXT::default();

        let has_budget = context.device_extensions.iter().any(|e| e == "VK_EXT_memory_budget");

        if let (Some(loader), true) = (properties2, has_budget) {
            let mut properties =
                vk::PhysicalDeviceMemoryProperties2::default().push_next(&mut budget);
            unsafe { loader.memory_properties2(physical_device, &mut properties) };
        }

        let heaps = (raw.memory_heaps.iter().enumerate())
            .take(raw.memory_heap_count as usize)
            .map(|(i, heap)| MemoryHeap {
                size: heap.size,
                flags: MemoryHeapFlags::from_vk(&heap.flags),
                budget: budget.heap_budget[i],
                usage: budget.heap_usage[i],
            })
            .collect();

        let types = (raw.memory_types.iter())
            .take(raw.memory_type_count as usize)
            .map(|memory_type| MemoryType {
                heap_index: memory_type.heap_index,
                property_flags: MemoryPropertyFlags::from_vk(&memory_type.property_flags),
            })
            .collect();

        let image_support = probe_image_support(instance, physical_device, features);

        Ok(Self {
            heaps,
            types,
            image_support,
        })
    }
}

fn probe_image_support(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
    features: &DeviceFeatures,
) -> Vec<TilingSupport> {
    let sparse = features.sparse_binding && features.sparse_residency_image2_d;

    let enabled_features = vk::PhysicalDeviceFeatures {
        sparse_binding: sparse.into(),
        sparse_residency_image2_d: sparse.into(),
        sparse_residency_aliased: (sparse && features.sparse_residency_aliased).into(),
        ..Default::default()
    };

    let device = instance.create_scratch_device(
        physical_device,
        &ScratchDeviceDescriptor {
            enabled_features,
            ..Default::default()
        },
    );

    let device = match device {
        Ok(device) => device,
        Err(error) => {
            tracing::warn!(%error, "Failed to create a device for image memory type probing");

            return (ImageTiling::ALL.into_iter())
                .map(|tiling| TilingSupport {
                    tiling,
                    formats: Vec::new(),
                })
                .collect();
        }
    };

    let probe = |info: vk::ImageCreateInfo<'_>| -> Result<Option<u32>, ReportError> {
        let supported = unsafe {
            (instance.handle()).get_physical_device_image_format_properties(
                physical_device,
                info.format,
                info.image_type,
                info.tiling,
                info.usage,
                info.flags,
            )
        };

        match supported {
            Ok(_) => Ok(Some(device.image_memory_type_bits(&info)?)),
            Err(vk::Result::ERROR_FORMAT_NOT_SUPPORTED) => Ok(None),
            Err(error) => Err(error.into()),
        }
    };

    let probe_or_skip = |info: vk::ImageCreateInfo<'_>| {
        probe(info).unwrap_or_else(|error| {
            tracing::warn!(
                %error,
                format = ?info.format,
                tiling = ?info.tiling,
                "Image probe failed"
            );
            None
        })
    };

    let mut support = Vec::new();

    for tiling in ImageTiling::ALL {
        let mut formats = Vec::new();

        for (i, &format) in PROBED_FORMATS.iter().enumerate() {
            let usage = match i {
                0 => vk::ImageUsageFlags::COLOR_ATTACHMENT,
                _ => vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT,
            };

            let info = vk::ImageCreateInfo::default()
                .image_type(vk::ImageType::TYPE_2D)
                .format(format)
                .extent(vk::Extent3D {
                    width: 8,
                    height: 8,
                    depth: 1,
                })
                .mip_levels(1)
                .array_layers(1)
                .samples(vk::SampleCountFlags::TYPE_1)
                .tiling(tiling.to_vk())
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE)
                .initial_layout(vk::ImageLayout::UNDEFINED);

            let regular = probe_or_skip(info);

            let sparse = match sparse {
                true => probe_or_skip(info.flags(
                    vk::ImageCreateFlags::SPARSE_BINDING | vk::ImageCreateFlags::SPARSE_RESIDENCY,
                )),
                false => None,
            };

            let transient =
                probe_or_skip(info.usage(usage | vk::ImageUsageFlags::TRANSIENT_ATTACHMENT));

            formats.push(ImageSupport {
                format: Format::from(format),
                regular,
                sparse,
                transient,
            });
        }

        support.push(TilingSupport { tiling, formats });
    }

    support
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilings_are_probed_optimal_first() {
        assert_eq!(ImageTiling::ALL, [ImageTiling::Optimal, ImageTiling::Linear]);
        assert_eq!(ImageTiling::Linear.to_string(), "IMAGE_TILING_LINEAR");
    }

    #[test]
    fn color_format_is_probed_first() {
        assert_eq!(PROBED_FORMATS[0], vk::Format::R8G8B8A8_UNORM);
        assert!(PROBED_FORMATS[1..].iter().all(|&f| f != vk::Format::R8G8B8A8_UNORM));
    }
}
