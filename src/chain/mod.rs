//! Linked lists of extension structures and the walker that prints them.
//!
//! Vulkan reports optional capabilities as a `pNext` chain of structures whose
//! types are only known at run time. A captured chain is stored as an
//! [`ExtensionChain`] of owned [`ChainRecord`]s; [`walk_chain`] prints every
//! record whose structure type is known and whose requirements are met.

mod records;

pub use records::*;

use std::fmt;

use ash::vk;

use crate::{Printer, Version, describe::Describe};

/// Upper bound on the number of records visited in one chain.
pub const MAX_CHAIN_LEN: usize = 256;

/// An owned, singly linked list of extension records.
#[derive(Clone, Default, PartialEq)]
pub struct ExtensionChain {
    head: Option<Box<ChainNode>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChainNode {
    pub record: ChainRecord,
    next: Option<Box<ChainNode>>,
}

impl ChainNode {
    pub fn next(&self) -> Option<&ChainNode> {
        self.next.as_deref()
    }
}

impl ExtensionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl FromIterator<ChainRecord> for ExtensionChain {
    fn from_iter<I: IntoIterator<Item = ChainRecord>>(iter: I) -> Self {
        let records: Vec<_> = iter.into_iter().collect();

        let head = records.into_iter().rev().fold(None, |next, record| {
            Some(Box::new(ChainNode { record, next }))
        });

        Self { head }
    }
}

impl Drop for ExtensionChain {
    fn drop(&mut self) {
        // unlink iteratively, long chains would otherwise recurse once per node
        let mut next = self.head.take();

        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl fmt::Debug for ExtensionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ExtensionChain {
    type Item = &'a ChainRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    next: Option<&'a ChainNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ChainRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        Some(&node.record)
    }
}

/// One way of satisfying a requirement: every listed condition must hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Requires {
    pub api_version: Option<Version>,
    pub instance_extensions: &'static [&'static str],
    pub device_extensions: &'static [&'static str],
}

impl Requires {
    pub const fn api_version(api_version: Version) -> Self {
        Self {
            api_version: Some(api_version),
            instance_extensions: &[],
            device_extensions: &[],
        }
    }

    pub const fn device_extensions(device_extensions: &'static [&'static str]) -> Self {
        Self {
            api_version: None,
            instance_extensions: &[],
            device_extensions,
        }
    }

    pub const fn instance_extensions(instance_extensions: &'static [&'static str]) -> Self {
        Self {
            api_version: None,
            instance_extensions,
            device_extensions: &[],
        }
    }
}

/// What a device or surface makes available, checked against [`Requires`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainContext {
    pub api_version: Version,
    pub instance_extensions: Vec<String>,
    pub device_extensions: Vec<String>,
}

impl ChainContext {
    fn meets(&self, requires: &Requires) -> bool {
        let has = |available: &[String], name: &str| available.iter().any(|ext| ext == name);

        requires
            .api_version
            .is_none_or(|version| self.api_version >= version)
            && (requires.instance_extensions.iter())
                .all(|name| has(&self.instance_extensions, name))
            && (requires.device_extensions.iter()).all(|name| has(&self.device_extensions, name))
    }

    /// Whether any one of `requires_one_of` is met. An empty list always is.
    pub fn satisfies(&self, requires_one_of: &[Requires]) -> bool {
        requires_one_of.is_empty() || requires_one_of.iter().any(|r| self.meets(r))
    }

    pub fn supports<T: ChainMember>(&self) -> bool {
        self.satisfies(T::REQUIRES)
    }
}

/// A record type that can appear in an [`ExtensionChain`].
pub trait ChainMember: Describe + Into<ChainRecord> + Sized {
    const STRUCTURE_TYPE: vk::StructureType;

    /// Name the record is printed under.
    const NAME: &'static str;

    /// Alternatives, any one of which makes the record meaningful.
    const REQUIRES: &'static [Requires];

    fn from_record(record: &ChainRecord) -> Option<&Self>;
}

struct Serializer {
    structure_type: vk::StructureType,
    requires: &'static [Requires],
    serialize: fn(&ChainRecord, &mut Printer),
}

impl Serializer {
    const fn of<T: ChainMember>() -> Self {
        Self {
            structure_type: T::STRUCTURE_TYPE,
            requires: T::REQUIRES,
            serialize: serialize_as::<T>,
        }
    }
}

#[track_caller]
fn serialize_as<T: ChainMember>(record: &ChainRecord, p: &mut Printer) {
    match T::from_record(record) {
        Some(record) => record.describe(p, T::NAME),
        None => panic!(
            "{:?} record dispatched to the {} serializer",
            record.structure_type(),
            T::NAME,
        ),
    }
}

static SERIALIZERS: &[Serializer] = &[
    Serializer::of::<DriverProperties>(),
    Serializer::of::<IdProperties>(),
    Serializer::of::<Maintenance3Properties>(),
    Serializer::of::<MultiviewProperties>(),
    Serializer::of::<PointClippingProperties>(),
    Serializer::of::<ProtectedMemoryProperties>(),
    Serializer::of::<SubgroupProperties>(),
    Serializer::of::<PushDescriptorProperties>(),
    Serializer::of::<DepthStencilResolveProperties>(),
    Serializer::of::<TimelineSemaphoreProperties>(),
    Serializer::of::<Storage16BitFeatures>(),
    Serializer::of::<MultiviewFeatures>(),
    Serializer::of::<VariablePointersFeatures>(),
    Serializer::of::<ProtectedMemoryFeatures>(),
    Serializer::of::<SamplerYcbcrConversionFeatures>(),
    Serializer::of::<ShaderDrawParametersFeatures>(),
    Serializer::of::<Storage8BitFeatures>(),
    Serializer::of::<ShaderFloat16Int8Features>(),
    Serializer::of::<ScalarBlockLayoutFeatures>(),
    Serializer::of::<TimelineSemaphoreFeatures>(),
    Serializer::of::<HostQueryResetFeatures>(),
    Serializer::of::<BufferDeviceAddressFeatures>(),
    Serializer::of::<UniformBufferStandardLayoutFeatures>(),
    Serializer::of::<SharedPresentSurfaceCapabilities>(),
    Serializer::of::<SurfaceProtectedCapabilities>(),
];

fn serializer(structure_type: vk::StructureType) -> Option<&'static Serializer> {
    SERIALIZERS
        .iter()
        .find(|serializer| serializer.structure_type == structure_type)
}

/// Print every known record of `chain` whose requirements `context` meets,
/// in list order, each followed by a blank line.
pub fn walk_chain(p: &mut Printer, chain: &ExtensionChain, context: &ChainContext) {
    let mut visited = 0;

    for record in chain.iter() {
        if visited == MAX_CHAIN_LEN {
            tracing::warn!(limit = MAX_CHAIN_LEN, "Extension chain truncated");
            break;
        }

        visited += 1;

        let structure_type = record.structure_type();

        let Some(serializer) = serializer(structure_type) else {
            tracing::debug!(?structure_type, "Skipping unknown extension structure");
            continue;
        };

        if !context.satisfies(serializer.requires) {
            continue;
        }

        (serializer.serialize)(record, p);
        p.add_newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentInfo, Node, OutputFormat};

    fn context(api_version: Version, device_extensions: &[&str]) -> ChainContext {
        ChainContext {
            api_version,
            instance_extensions: Vec::new(),
            device_extensions: device_extensions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn walk(chain: &ExtensionChain, context: &ChainContext) -> Vec<String> {
        let mut p = Printer::new(OutputFormat::Text, DocumentInfo::default());
        walk_chain(&mut p, chain, context);

        p.finish()
            .nodes
            .into_iter()
            .filter_map(|node| match node {
                Node::Object(container) => Some(container.label.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn chains_keep_insertion_order() {
        let chain: ExtensionChain = [
            ChainRecord::from(MultiviewFeatures::default()),
            ChainRecord::Unknown(vk::StructureType::from_raw(1_000_999_000)),
            ChainRecord::from(ProtectedMemoryFeatures::default()),
        ]
        .into_iter()
        .collect();

        let types: Vec<_> = chain.iter().map(ChainRecord::structure_type).collect();

        assert_eq!(chain.len(), 3);
        assert_eq!(
            types,
            [
                vk::StructureType::PHYSICAL_DEVICE_MULTIVIEW_FEATURES,
                vk::StructureType::from_raw(1_000_999_000),
                vk::StructureType::PHYSICAL_DEVICE_PROTECTED_MEMORY_FEATURES,
            ]
        );
    }

    #[test]
    fn walker_skips_unknown_and_unsupported_records() {
        let chain: ExtensionChain = [
            ChainRecord::from(MultiviewFeatures::default()),
            ChainRecord::Unknown(vk::StructureType::from_raw(1_000_999_000)),
            ChainRecord::from(PushDescriptorProperties::default()),
            ChainRecord::from(TimelineSemaphoreFeatures::default()),
        ]
        .into_iter()
        .collect();

        let printed = walk(&chain, &context(Version::V1_1, &["VK_KHR_timeline_semaphore"]));

        assert_eq!(
            printed,
            [
                "VkPhysicalDeviceMultiviewFeatures",
                "VkPhysicalDeviceTimelineSemaphoreFeaturesKHR",
            ]
        );
    }

    #[test]
    fn api_version_alone_satisfies_promoted_records() {
        let chain: ExtensionChain = [ChainRecord::from(DriverProperties::default())]
            .into_iter()
            .collect();

        assert!(walk(&chain, &context(Version::V1_1, &[])).is_empty());
        assert_eq!(
            walk(&chain, &context(Version::V1_2, &[])),
            ["VkPhysicalDeviceDriverPropertiesKHR"]
        );
    }

    #[test]
    fn empty_chain_prints_nothing() {
        assert!(walk(&ExtensionChain::new(), &ChainContext::default()).is_empty());
    }

    #[test]
    fn walker_stops_at_the_length_bound() {
        let chain: ExtensionChain = std::iter::repeat_with(|| MultiviewFeatures::default().into())
            .take(MAX_CHAIN_LEN + 10)
            .collect();

        assert_eq!(walk(&chain, &context(Version::V1_1, &[])).len(), MAX_CHAIN_LEN);
    }

    #[test]
    fn every_record_type_has_one_serializer() {
        for (i, a) in SERIALIZERS.iter().enumerate() {
            for b in &SERIALIZERS[i + 1..] {
                assert_ne!(a.structure_type, b.structure_type);
            }
        }
    }

    #[test]
    #[should_panic(expected = "dispatched to the")]
    fn wrong_shape_dispatch_panics() {
        let mut p = Printer::new(OutputFormat::Text, DocumentInfo::default());
        let record = ChainRecord::from(MultiviewFeatures::default());

        serialize_as::<DriverProperties>(&record, &mut p);
    }
}
