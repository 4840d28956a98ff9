use std::{ffi, fmt};

use ash::vk;

use crate::{Instance, ReportError};

/// What a [`ScratchDevice`] is created with.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScratchDeviceDescriptor<'a> {
    pub(crate) enabled_features: vk::PhysicalDeviceFeatures,
    pub(crate) enabled_extensions: &'a [&'a ffi::CStr],
    /// Every member of a device group, when creating a group device.
    pub(crate) group: &'a [vk::PhysicalDevice],
}

/// A short lived logical device with a single queue from family 0, used for
/// queries only a device can answer.
pub(crate) struct ScratchDevice {
    pub(crate) handle: ash::Device,
}

impl fmt::Debug for ScratchDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchDevice")
            .field("handle", &self.handle.handle())
            .finish()
    }
}

impl Instance {
    pub(crate) fn create_scratch_device(
        &self,
        physical_device: vk::PhysicalDevice,
        desc: &ScratchDeviceDescriptor<'_>,
    ) -> Result<ScratchDevice, ReportError> {
        let priorities = [1.0];

        let queue_create_info = vk::DeviceQueueCreateInfo::default()
            .queue_family_index(0)
            .queue_priorities(&priorities);

        let extension_names: Vec<_> = desc.enabled_extensions.iter().map(|s| s.as_ptr()).collect();

        let mut group_info = vk::DeviceGroupDeviceCreateInfo::default().physical_devices(desc.group);

        let mut create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_extension_names(&extension_names)
            .enabled_features(&desc.enabled_features);

        if !desc.group.is_empty() {
            create_info = create_info.push_next(&mut group_info);
        }

        let handle = unsafe { (self.handle()).create_device(physical_device, &create_info, None)? };

        tracing::trace!(handle = ?handle.handle(), "Created scratch device");

        Ok(ScratchDevice { handle })
    }
}

impl ScratchDevice {
    /// `memoryTypeBits` of an image created from `info`.
    pub(crate) fn image_memory_type_bits(
        &self,
        info: &vk::ImageCreateInfo<'_>,
    ) -> Result<u32, ReportError> {
        unsafe {
            let image = self.handle.create_image(info, None)?;
            let requirements = self.handle.get_image_memory_requirements(image);
            self.handle.destroy_image(image, None);

            Ok(requirements.memory_type_bits)
        }
    }
}

impl Drop for ScratchDevice {
    fn drop(&mut self) {
        unsafe {
            let _ = self.handle.device_wait_idle();

            tracing::trace!(
                handle = ?self.handle.handle(),
                "Destroying Vulkan device"
            );

            self.handle.destroy_device(None);
        }
    }
}
