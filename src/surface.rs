use std::fmt;

use ash::{ext, khr, vk};

use crate::{
    ChainContext, ExtensionChain, Instance, PresentMode, ReportError,
    SharedPresentSurfaceCapabilities, SurfaceCapabilities, SurfaceCounterFlags, SurfaceFormat,
    SurfaceProtectedCapabilities, describe::FromVk,
};

/// What one surface backend reports for one physical device.
///
/// Two sets are equal only if every member is, present mode and format order
/// included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceCapabilitySet {
    pub formats: Vec<SurfaceFormat>,
    pub present_modes: Vec<PresentMode>,
    pub capabilities: SurfaceCapabilities,
    /// `VkSurfaceCapabilities2EXT::supportedSurfaceCounters`.
    pub counters: SurfaceCounterFlags,
    pub chain: ExtensionChain,
}

/// A [`SurfaceCapabilitySet`] together with where it was discovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceInfo {
    /// Name of the instance extension that created the surface.
    pub backend: String,
    pub gpu: usize,
    pub capabilities: SurfaceCapabilitySet,
}

/// An owned `VkSurfaceKHR`, destroyed before the instance it was created from.
pub struct PresentationSurface {
    pub(crate) handle: vk::SurfaceKHR,
    pub(crate) backend: String,

    loader: khr::surface::Instance,
    instance: Instance,
}

impl PresentationSurface {
    /// Wrap a surface created by `backend`, taking ownership of it.
    ///
    /// # Safety
    /// - `handle` must be a valid surface created from `instance`.
    pub unsafe fn from_raw(instance: &Instance, handle: vk::SurfaceKHR, backend: &str) -> Self {
        Self {
            handle,
            backend: backend.to_owned(),

            loader: khr::surface::Instance::new(instance.entry(), instance.handle()),
            instance: instance.clone(),
        }
    }

    /// Create a surface that is not tied to any window system.
    pub fn headless(instance: &Instance) -> Result<Self, ReportError> {
        let loader = ext::headless_surface::Instance::new(instance.entry(), instance.handle());
        let create_info = vk::HeadlessSurfaceCreateInfoEXT::default();

        unsafe {
            let handle = loader.create_headless_surface(&create_info, None)?;
            Ok(Self::from_raw(instance, handle, "VK_EXT_headless_surface"))
        }
    }

    pub fn handle(&self) -> vk::SurfaceKHR {
        self.handle
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn supports_present(
        &self,
        physical_device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> bool {
        let supported = unsafe {
            self.loader.get_physical_device_surface_support(
                physical_device,
                queue_family_index,
                self.handle,
            )
        };

        supported.unwrap_or_else(|error| {
            tracing::warn!(backend = %self.backend, %error, "Failed to query present support");
            false
        })
    }

    /// Query everything `physical_device` reports for this surface.
    pub(crate) fn capture(
        &self,
        gpu: usize,
        physical_device: vk::PhysicalDevice,
        context: &ChainContext,
    ) -> Result<SurfaceInfo, ReportError> {
        let (formats, present_modes, capabilities) = unsafe {
            (
                (self.loader).get_physical_device_surface_formats(physical_device, self.handle)?,
                (self.loader)
                    .get_physical_device_surface_present_modes(physical_device, self.handle)?,
                (self.loader)
                    .get_physical_device_surface_capabilities(physical_device, self.handle)?,
            )
        };

        let counters = match self.instance.is_extension_enabled("VK_EXT_display_surface_counter") {
            true => self.capture_counters(physical_device)?,
            false => SurfaceCounterFlags::empty(),
        };

        let chain = match self.instance.is_extension_enabled("VK_KHR_get_surface_capabilities2") {
            true => self.capture_chain(physical_device, context)?,
            false => ExtensionChain::new(),
        };

        Ok(SurfaceInfo {
            backend: self.backend.clone(),
            gpu,
            capabilities: SurfaceCapabilitySet {
                formats: formats.iter().map(SurfaceFormat::from_vk).collect(),
                present_modes: present_modes.into_iter().map(PresentMode::from).collect(),
                capabilities: SurfaceCapabilities::from_vk(&capabilities),
                counters,
                chain,
            },
        })
    }

    fn capture_counters(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<SurfaceCounterFlags, ReportError> {
        let loader = ext::display_surface_counter::Instance::new(
            self.instance.entry(),
            self.instance.handle(),
        );

        let mut capabilities = vk::SurfaceCapabilities2EXT::default();

        unsafe {
            (loader.fp().get_physical_device_surface_capabilities2_ext)(
                physical_device,
                self.handle,
                &mut capabilities,
            )
            .result()?
        };

        Ok(SurfaceCounterFlags::from_vk(&capabilities.supported_surface_counters))
    }

    fn capture_chain(
        &self,
        physical_device: vk::PhysicalDevice,
        context: &ChainContext,
    ) -> Result<ExtensionChain, ReportError> {
        let loader = khr::get_surface_capabilities2::Instance::new(
            self.instance.entry(),
            self.instance.handle(),
        );

        let surface_info = vk::PhysicalDeviceSurfaceInfo2KHR::default().surface(self.handle);

        let (result, chain) = query_chain! {
            context,
            vk::SurfaceCapabilities2KHR::default(),
            |capabilities| unsafe {
                loader.get_physical_device_surface_capabilities2(
                    physical_device,
                    &surface_info,
                    &mut capabilities,
                )
            };
            SharedPresentSurfaceCapabilities: SharedPresentSurfaceCapabilitiesKHR as shared_present,
            SurfaceProtectedCapabilities: SurfaceProtectedCapabilitiesKHR as protected,
        };

        result?;

        Ok(chain)
    }
}

impl fmt::Debug for PresentationSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationSurface")
            .field("handle", &self.handle)
            .field("backend", &self.backend)
            .finish()
    }
}

impl Drop for PresentationSurface {
    fn drop(&mut self) {
        unsafe {
            tracing::trace!(handle = ?self.handle, "Destroying surface");
            self.loader.destroy_surface(self.handle, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChainRecord, ColorSpace, Format};

    fn set() -> SurfaceCapabilitySet {
        SurfaceCapabilitySet {
            formats: vec![SurfaceFormat {
                format: Format::from(vk::Format::B8G8R8A8_UNORM),
                color_space: ColorSpace::from(vk::ColorSpaceKHR::SRGB_NONLINEAR),
            }],
            present_modes: vec![
                PresentMode::from(vk::PresentModeKHR::FIFO),
                PresentMode::from(vk::PresentModeKHR::MAILBOX),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn present_mode_order_matters_for_equality() {
        let mut reversed = set();
        reversed.present_modes.reverse();

        assert_eq!(set(), set());
        assert_ne!(set(), reversed);
    }

    #[test]
    fn chains_take_part_in_equality() {
        let mut protected = set();
        protected.chain = [ChainRecord::from(SurfaceProtectedCapabilities {
            supports_protected: true,
        })]
        .into_iter()
        .collect();

        assert_ne!(set(), protected);
    }
}
