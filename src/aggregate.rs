//! Sorting, grouping and decoding of captured records ahead of printing.

use std::{cmp::Ordering, collections::BTreeMap, collections::BTreeSet};

use crate::{
    ExtensionProperties, Format, FormatProperties, ImageSupport, ImageTiling, LayerExtensions,
    SurfaceCapabilitySet, SurfaceInfo,
};

/// Extensions ordered by name, comparing bytes.
pub fn sorted_extensions(extensions: &[ExtensionProperties]) -> Vec<ExtensionProperties> {
    let mut sorted = extensions.to_vec();
    sorted.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    sorted
}

/// Sort layers by name. Layers without a name go last, keeping their order.
pub fn sort_layers(layers: &mut [LayerExtensions]) {
    layers.sort_by(|a, b| match (&a.properties.name, &b.properties.name) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Surfaces of one device that reported equal capabilities.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceGroup<'a> {
    /// The first surface of the group, standing in for all of them.
    pub surface: &'a SurfaceInfo,
    pub gpu: usize,
    pub backends: BTreeSet<&'a str>,
}

impl SurfaceGroup<'_> {
    pub fn capabilities(&self) -> &SurfaceCapabilitySet {
        &self.surface.capabilities
    }
}

/// Partition `surfaces` into groups of the same device with equal
/// capabilities, in order of first appearance.
pub fn group_surfaces(surfaces: &[SurfaceInfo]) -> Vec<SurfaceGroup<'_>> {
    let mut groups: Vec<SurfaceGroup<'_>> = Vec::new();

    for surface in surfaces {
        let existing = groups.iter_mut().find(|group| {
            group.gpu == surface.gpu && group.surface.capabilities == surface.capabilities
        });

        match existing {
            Some(group) => {
                group.backends.insert(&surface.backend);
            }
            None => groups.push(SurfaceGroup {
                surface,
                gpu: surface.gpu,
                backends: BTreeSet::from([surface.backend.as_str()]),
            }),
        }
    }

    groups
}

/// For each member `i` of a device group, the members `j` it can present
/// images from, read from bit `j` of `masks[i]`.
pub fn decode_present_masks(masks: &[u32]) -> Vec<Vec<usize>> {
    let len = masks.len().min(u32::BITS as usize);

    masks
        .iter()
        .map(|mask| (0..len).filter(|&j| mask & (1 << j) != 0).collect())
        .collect()
}

/// How images of one format can use one memory type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Usability {
    NonSparseNonTransient,
    NonSparse,
    NonTransient,
    SparseOnly,
    TransientOnly,
    SparseAndTransientOnly,
    /// Usable, with nothing worth qualifying.
    Plain,
}

impl Usability {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::NonSparseNonTransient => "(non-sparse, non-transient)",
            Self::NonSparse => "(non-sparse)",
            Self::NonTransient => "(non-transient)",
            Self::SparseOnly => "(sparse only)",
            Self::TransientOnly => "(transient only)",
            Self::SparseAndTransientOnly => "(sparse and transient only)",
            Self::Plain => "",
        }
    }
}

/// Classify one image kind against memory type `index`, `None` when no kind
/// of image of that format can use it.
pub fn classify(
    index: usize,
    regular: Option<u32>,
    sparse: Option<u32>,
    transient: Option<u32>,
) -> Option<Usability> {
    let bit = 1u32.checked_shl(index as u32)?;
    let fits = |mask: Option<u32>| mask.is_some_and(|mask| mask & bit != 0);

    let (r, s, t) = (fits(regular), fits(sparse), fits(transient));
    let (has_sparse, has_transient) = (sparse.is_some(), transient.is_some());

    if !(r || s || t) {
        return None;
    }

    let usability = if r && !s && !t && has_sparse && has_transient {
        Usability::NonSparseNonTransient
    } else if r && !s && has_sparse {
        Usability::NonSparse
    } else if r && !t && has_transient {
        Usability::NonTransient
    } else if !r && s && !t {
        Usability::SparseOnly
    } else if !r && !s && t {
        Usability::TransientOnly
    } else if !r && s && t {
        Usability::SparseAndTransientOnly
    } else {
        Usability::Plain
    };

    Some(usability)
}

/// The "usable for" line of memory type `index` for one tiling.
///
/// The first probed format stands for color images; the line reads `None`
/// when no probed format fits.
pub fn usable_for(index: usize, tiling: ImageTiling, formats: &[ImageSupport]) -> String {
    let mut uses = Vec::new();

    for (i, image) in formats.iter().enumerate() {
        let Some(usability) = classify(index, image.regular, image.sparse, image.transient) else {
            continue;
        };

        let name = match i {
            0 => String::from("color images"),
            _ => image.format.name(),
        };

        uses.push(format!("{name}{}", usability.suffix()));
    }

    match uses.is_empty() {
        true => format!("{tiling}: None"),
        false => format!("{tiling}: {}", uses.join(", ")),
    }
}

/// Formats sharing identical feature flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatGroups {
    /// Supported formats keyed by their shared properties, in key order.
    pub groups: Vec<(FormatProperties, Vec<Format>)>,
    pub unsupported: Vec<Format>,
}

pub fn group_formats(formats: &[(Format, FormatProperties)]) -> FormatGroups {
    let mut groups: BTreeMap<(u32, u32, u32), (FormatProperties, Vec<Format>)> = BTreeMap::new();
    let mut unsupported = Vec::new();

    for (format, properties) in formats {
        if !properties.is_supported() {
            unsupported.push(*format);
            continue;
        }

        groups
            .entry(properties.sort_key())
            .or_insert_with(|| (properties.clone(), Vec::new()))
            .1
            .push(*format);
    }

    FormatGroups {
        groups: groups.into_values().collect(),
        unsupported,
    }
}

/// `bytes` scaled by powers of 1024, e.g. `8.00 GiB`.
pub fn human_readable_size(bytes: u64) -> String {
    const PREFIXES: [char; 8] = ['K', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y'];

    let mut result = bytes as f64;
    let mut prefix = None;

    while result > 1024.0 && prefix.is_none_or(|p| p < PREFIXES.len() - 1) {
        result /= 1024.0;
        prefix = Some(prefix.map_or(0, |p| p + 1));
    }

    match prefix {
        Some(p) => format!("{result:.2} {}iB", PREFIXES[p]),
        None => format!("{result:.2} B"),
    }
}

/// A byte count with its hexadecimal and human readable spellings.
pub fn describe_size(bytes: u64) -> String {
    format!("{bytes} (0x{bytes:x}) ({})", human_readable_size(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormatFeatureFlags, LayerProperties, PresentMode, TilingSupport};
    use ash::vk;

    fn layer(name: Option<&str>) -> LayerExtensions {
        LayerExtensions {
            properties: LayerProperties {
                name: name.map(str::to_owned),
                ..Default::default()
            },
            extensions: Vec::new(),
        }
    }

    fn surface(backend: &str, gpu: usize, modes: &[vk::PresentModeKHR]) -> SurfaceInfo {
        SurfaceInfo {
            backend: backend.to_owned(),
            gpu,
            capabilities: SurfaceCapabilitySet {
                present_modes: modes.iter().map(|&m| PresentMode::from(m)).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn extensions_sort_by_name() {
        let extensions = [
            ExtensionProperties::new("VK_KHR_surface", 25),
            ExtensionProperties::new("VK_EXT_debug_utils", 2),
            ExtensionProperties::new("VK_KHR_display", 23),
        ];

        let sorted = sorted_extensions(&extensions);
        let names: Vec<_> = sorted.iter().map(|ext| ext.name.as_str()).collect();

        assert_eq!(names, ["VK_EXT_debug_utils", "VK_KHR_display", "VK_KHR_surface"]);
        assert_eq!(sorted_extensions(&sorted), sorted);
    }

    #[test]
    fn unnamed_layers_sort_last() {
        let mut layers = vec![layer(None), layer(Some("VK_LAYER_b")), layer(Some("VK_LAYER_a"))];
        sort_layers(&mut layers);

        let names: Vec<_> = layers.iter().map(|l| l.properties.name.as_deref()).collect();
        assert_eq!(names, [Some("VK_LAYER_a"), Some("VK_LAYER_b"), None]);

        let again = layers.clone();
        sort_layers(&mut layers);
        assert_eq!(layers, again);
    }

    #[test]
    fn equal_surfaces_of_one_device_share_a_group() {
        let fifo = [vk::PresentModeKHR::FIFO];
        let mailbox = [vk::PresentModeKHR::MAILBOX];

        let surfaces = [
            surface("VK_KHR_xcb_surface", 0, &fifo),
            surface("VK_KHR_xcb_surface", 1, &fifo),
            surface("VK_KHR_wayland_surface", 0, &fifo),
            surface("VK_KHR_wayland_surface", 1, &mailbox),
        ];

        let groups = group_surfaces(&surfaces);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].gpu, 0);
        assert_eq!(
            groups[0].backends,
            BTreeSet::from(["VK_KHR_wayland_surface", "VK_KHR_xcb_surface"])
        );
        assert_eq!(groups[1].backends, BTreeSet::from(["VK_KHR_xcb_surface"]));
        assert_eq!(groups[2].backends, BTreeSet::from(["VK_KHR_wayland_surface"]));

        let total: usize = groups.iter().map(|g| g.backends.len()).sum();
        assert_eq!(total, surfaces.len());
    }

    #[test]
    fn surface_groups_ignore_discovery_order() {
        let fifo = [vk::PresentModeKHR::FIFO];
        let mailbox = [vk::PresentModeKHR::MAILBOX];

        let surfaces = vec![
            surface("VK_KHR_xcb_surface", 0, &fifo),
            surface("VK_KHR_xcb_surface", 1, &fifo),
            surface("VK_KHR_wayland_surface", 0, &fifo),
            surface("VK_KHR_wayland_surface", 1, &mailbox),
            surface("VK_EXT_headless_surface", 0, &mailbox),
        ];

        let grouping = |surfaces: &[SurfaceInfo]| {
            let mut groups: Vec<(usize, Vec<String>)> = (group_surfaces(surfaces).into_iter())
                .map(|group| (group.gpu, group.backends.into_iter().map(String::from).collect()))
                .collect();
            groups.sort();
            groups
        };

        let expected = grouping(&surfaces);
        assert_eq!(expected.len(), 4);

        let mut reversed = surfaces.clone();
        reversed.reverse();
        assert_eq!(grouping(&reversed), expected);

        for shift in 1..surfaces.len() {
            let mut rotated = surfaces.clone();
            rotated.rotate_left(shift);
            assert_eq!(grouping(&rotated), expected);
        }
    }

    #[test]
    fn present_masks_decode_to_the_reported_relation() {
        let decoded = decode_present_masks(&[0b01, 0b11]);

        assert_eq!(decoded, [vec![0], vec![0, 1]]);
        assert_eq!(decode_present_masks(&[0]), [Vec::<usize>::new()]);
    }

    #[test]
    fn usability_follows_support_masks() {
        assert_eq!(classify(0, Some(1), Some(0), Some(0)), Some(Usability::NonSparseNonTransient));
        assert_eq!(classify(0, Some(1), Some(0), None), Some(Usability::NonSparse));
        assert_eq!(classify(0, Some(1), None, Some(0)), Some(Usability::NonTransient));
        assert_eq!(classify(0, Some(0), Some(1), Some(0)), Some(Usability::SparseOnly));
        assert_eq!(classify(0, None, None, Some(1)), Some(Usability::TransientOnly));
        assert_eq!(classify(0, Some(0), Some(1), Some(1)), Some(Usability::SparseAndTransientOnly));
        assert_eq!(classify(0, Some(1), Some(1), Some(1)), Some(Usability::Plain));
        assert_eq!(classify(1, Some(1), Some(1), Some(1)), None);
        assert_eq!(classify(40, Some(u32::MAX), None, None), None);
    }

    #[test]
    fn usable_for_names_color_images_and_formats() {
        let support = TilingSupport {
            tiling: ImageTiling::Optimal,
            formats: vec![
                ImageSupport {
                    format: Format::from(vk::Format::R8G8B8A8_UNORM),
                    regular: Some(0b1),
                    ..Default::default()
                },
                ImageSupport {
                    format: Format::from(vk::Format::D16_UNORM),
                    regular: Some(0b1),
                    transient: Some(0b10),
                    ..Default::default()
                },
            ],
        };

        let usable = |index| usable_for(index, support.tiling, &support.formats);

        assert_eq!(
            usable(0),
            "IMAGE_TILING_OPTIMAL: color images, FORMAT_D16_UNORM(non-transient)"
        );
        assert_eq!(usable(1), "IMAGE_TILING_OPTIMAL: FORMAT_D16_UNORM(transient only)");
        assert_eq!(usable(2), "IMAGE_TILING_OPTIMAL: None");
        assert_eq!(usable_for(0, ImageTiling::Linear, &[]), "IMAGE_TILING_LINEAR: None");
    }

    #[test]
    fn formats_group_by_identical_properties() {
        let sampled = FormatProperties {
            optimal_tiling_features: FormatFeatureFlags::SAMPLED_IMAGE,
            ..Default::default()
        };

        let formats = [
            (Format::from(vk::Format::R8_UNORM), sampled.clone()),
            (Format::UNDEFINED, FormatProperties::default()),
            (Format::from(vk::Format::R8G8_UNORM), sampled.clone()),
        ];

        let grouped = group_formats(&formats);

        assert_eq!(grouped.unsupported, [Format::UNDEFINED]);
        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(grouped.groups[0].0, sampled);
        assert_eq!(
            grouped.groups[0].1,
            [Format::from(vk::Format::R8_UNORM), Format::from(vk::Format::R8G8_UNORM)]
        );
    }

    #[test]
    fn sizes_use_binary_prefixes() {
        assert_eq!(human_readable_size(8 * 1024 * 1024 * 1024), "8.00 GiB");
        assert_eq!(human_readable_size(512), "512.00 B");
        assert_eq!(human_readable_size(1024), "1024.00 B");
        assert_eq!(human_readable_size(1536), "1.50 KiB");
        assert_eq!(describe_size(256), "256 (0x100) (256.00 B)");
    }
}
