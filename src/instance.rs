use std::{cmp::Ordering, ffi, fmt, sync::Arc};

use ash::vk;

use crate::{ExtensionProperties, LayerProperties, ReportError};

/// The dynamically loaded Vulkan loader.
pub struct Entry {
    pub(crate) handle: ash::Entry,
}

impl Entry {
    pub fn handle(&self) -> &ash::Entry {
        &self.handle
    }

    /// Load the system Vulkan loader.
    pub fn load() -> Result<Self, ReportError> {
        // SAFETY: the loader is only used through `ash`, which keeps the
        // library alive for as long as the entry exists
        let handle = unsafe { ash::Entry::load()? };

        Ok(Self { handle })
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const V1_0: Self = Self::new(1, 0, 0);
    pub const V1_1: Self = Self::new(1, 1, 0);
    pub const V1_2: Self = Self::new(1, 2, 0);
    pub const V1_3: Self = Self::new(1, 3, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn from_vk_version(version: u32) -> Self {
        let major = (version >> 22) & 0x7F;
        let minor = (version >> 12) & 0x3FF;
        let patch = version & 0xFFF;

        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn to_vk_version(self) -> u32 {
        vk::make_api_version(0, self.major, self.minor, self.patch)
    }

    /// The same version without its patch number.
    pub const fn without_patch(self) -> Self {
        Self::new(self.major, self.minor, 0)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major.cmp(&other.major))
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A layer together with the instance extensions it provides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerExtensions {
    pub properties: LayerProperties,
    pub extensions: Vec<ExtensionProperties>,
}

/// Instance extensions enabled whenever the loader offers them.
const WANTED_INSTANCE_EXTENSIONS: &[&str] = &[
    "VK_KHR_get_physical_device_properties2",
    "VK_KHR_device_group_creation",
    "VK_KHR_external_memory_capabilities",
    "VK_KHR_external_semaphore_capabilities",
    "VK_KHR_external_fence_capabilities",
    "VK_KHR_surface",
    "VK_KHR_get_surface_capabilities2",
    "VK_KHR_surface_protected_capabilities",
    "VK_EXT_display_surface_counter",
    "VK_EXT_headless_surface",
];

impl Entry {
    /// The highest API version the loader supports.
    pub fn instance_version(&self) -> Result<Version, ReportError> {
        let version = unsafe { self.handle.try_enumerate_instance_version()? };
        let version = version.unwrap_or(vk::API_VERSION_1_0);

        Ok(Version::from_vk_version(version))
    }

    /// Instance extensions of the implementation, or of one layer.
    pub fn instance_extensions(
        &self,
        layer: Option<&str>,
    ) -> Result<Vec<ExtensionProperties>, ReportError> {
        let layer = layer.map(ffi::CString::new).and_then(Result::ok);

        let properties = unsafe {
            (self.handle).enumerate_instance_extension_properties(layer.as_deref())?
        };

        Ok(properties.iter().map(ExtensionProperties::from_vk).collect())
    }

    /// Every layer the loader knows about, with its instance extensions.
    pub fn layers(&self) -> Result<Vec<LayerExtensions>, ReportError> {
        let layers = unsafe { self.handle.enumerate_instance_layer_properties()? };

        layers
            .iter()
            .map(LayerProperties::from_vk)
            .map(|properties| {
                let extensions = match &properties.name {
                    Some(name) => self.instance_extensions(Some(name.as_str()))?,
                    None => Vec::new(),
                };

                Ok(LayerExtensions {
                    properties,
                    extensions,
                })
            })
            .collect()
    }

    /// Create an instance at the loader's API version, enabling every
    /// supported extension the report can make use of plus `extra_extensions`.
    pub fn create_instance(&self, extra_extensions: &[String]) -> Result<Instance, ReportError> {
        let api_version = self.instance_version()?;
        let supported = self.instance_extensions(None)?;

        let is_supported = |name: &str| supported.iter().any(|ext| ext.name == name);

        let mut enabled_extensions: Vec<String> = WANTED_INSTANCE_EXTENSIONS
            .iter()
            .map(|name| name.to_string())
            .chain(extra_extensions.iter().cloned())
            .filter(|name| is_supported(name))
            .collect();

        enabled_extensions.sort();
        enabled_extensions.dedup();

        tracing::debug!(
            api_version = %api_version,
            extensions = ?enabled_extensions,
            "Creating instance",
        );

        let app_name = c"vulkaninfo";

        let app_info = vk::ApplicationInfo::default()
            .application_name(app_name)
            .application_version(1)
            .engine_name(app_name)
            .engine_version(1)
            .api_version(api_version.to_vk_version());

        let extension_names: Vec<_> = enabled_extensions
            .iter()
            .cloned()
            .map(ffi::CString::new)
            .filter_map(Result::ok)
            .collect();

        let extension_ptrs: Vec<_> = extension_names.iter().map(|s| s.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs);

        let handle = unsafe { self.handle.create_instance(&create_info, None)? };

        Ok(Instance {
            inner: Arc::new(InstanceInner {
                handle,

                entry: self.handle.clone(),

                api_version,
                enabled_extensions,
            }),
        })
    }
}

#[derive(Clone)]
pub struct Instance {
    pub(crate) inner: Arc<InstanceInner>,
}

impl Instance {
    pub fn handle(&self) -> &ash::Instance {
        &self.inner.handle
    }

    pub fn entry(&self) -> &ash::Entry {
        &self.inner.entry
    }

    pub fn api_version(&self) -> Version {
        self.inner.api_version
    }

    pub fn enabled_extensions(&self) -> &[String] {
        &self.inner.enabled_extensions
    }

    pub fn is_extension_enabled(&self, name: &str) -> bool {
        self.inner.enabled_extensions.iter().any(|ext| ext == name)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("handle", &self.inner.handle.handle())
            .field("api_version", &self.inner.api_version)
            .finish()
    }
}

pub(crate) struct InstanceInner {
    pub(crate) handle: ash::Instance,

    pub(crate) entry: ash::Entry,

    pub(crate) api_version: Version,
    pub(crate) enabled_extensions: Vec<String>,
}

impl Drop for InstanceInner {
    fn drop(&mut self) {
        unsafe {
            tracing::trace!(
                handle = ?self.handle.handle(),
                "Destroying Vulkan instance",
            );

            self.handle.destroy_instance(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_decode_packed_numbers() {
        let version = Version::from_vk_version(vk::make_api_version(0, 1, 2, 189));

        assert_eq!(version, Version::new(1, 2, 189));
        assert_eq!(version.to_string(), "1.2.189");
        assert_eq!(version.without_patch(), Version::V1_2);
        assert_eq!(version.to_vk_version(), vk::make_api_version(0, 1, 2, 189));
    }

    #[test]
    fn versions_order_by_component() {
        assert!(Version::V1_1 < Version::V1_2);
        assert!(Version::new(1, 1, 200) < Version::V1_2);
        assert!(Version::new(1, 2, 1) > Version::V1_2);
    }
}
