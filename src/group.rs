use ash::{khr, vk};

use crate::{
    DeviceGroupPresentModeFlags, Instance, ReportError, describe::FromVk,
    device::ScratchDeviceDescriptor,
};

/// Which member can present images from which, as reported by a device
/// created over the whole group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupPresentCapabilities {
    /// Bit `j` of entry `i` is set when member `i` can present images from
    /// member `j`.
    pub present_masks: Vec<u32>,
    pub modes: DeviceGroupPresentModeFlags,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceGroup {
    /// Ids of the member devices, in group order.
    pub devices: Vec<usize>,
    pub subset_allocation: bool,
    /// `None` when the group does not support `VK_KHR_device_group`.
    pub present: Option<GroupPresentCapabilities>,
}

impl Instance {
    /// Enumerate device groups, `None` without `VK_KHR_device_group_creation`.
    ///
    /// `physical_devices` maps ids to handles. A group with a member missing
    /// from it is skipped whole.
    pub(crate) fn capture_device_groups(
        &self,
        physical_devices: &[vk::PhysicalDevice],
    ) -> Result<Option<Vec<DeviceGroup>>, ReportError> {
        if !self.is_extension_enabled("VK_KHR_device_group_creation") {
            return Ok(None);
        }

        let loader = khr::device_group_creation::Instance::new(self.entry(), self.handle());

        let raw_groups = unsafe {
            let len = loader.enumerate_physical_device_groups_len()?;
            let mut groups = vec![vk::PhysicalDeviceGroupProperties::default(); len];
            loader.enumerate_physical_device_groups(&mut groups)?;
            groups
        };

        tracing::debug!(count = raw_groups.len(), "Capturing device groups");

        let groups = raw_groups
            .iter()
            .filter_map(|raw| {
                let members = &raw.physical_devices[..raw.physical_device_count as usize];

                let Some(devices) = member_ids(members, physical_devices) else {
                    tracing::warn!(
                        members = members.len(),
                        "Skipping device group with an unenumerated member"
                    );
                    return None;
                };

                let present = match self.capture_group_present(members) {
                    Ok(present) => present,
                    Err(error) => {
                        tracing::warn!(%error, "Failed to query device group present capabilities");
                        None
                    }
                };

                Some(DeviceGroup {
                    devices,
                    subset_allocation: bool::from_vk(&raw.subset_allocation),
                    present,
                })
            })
            .collect();

        Ok(Some(groups))
    }

    fn capture_group_present(
        &self,
        members: &[vk::PhysicalDevice],
    ) -> Result<Option<GroupPresentCapabilities>, ReportError> {
        let Some(&first) = members.first() else {
            return Ok(None);
        };

        if !self.is_extension_enabled("VK_KHR_surface") {
            return Ok(None);
        }

        for &member in members {
            let extensions = unsafe { crate::physical::device_extensions(self, member, None)? };

            if !extensions.iter().any(|ext| ext.name == "VK_KHR_device_group") {
                return Ok(None);
            }
        }

        let device = self.create_scratch_device(
            first,
            &ScratchDeviceDescriptor {
                enabled_extensions: &[khr::device_group::NAME],
                group: members,
                ..Default::default()
            },
        )?;

        let loader = khr::device_group::Device::new(self.handle(), &device.handle);

        let mut capabilities = vk::DeviceGroupPresentCapabilitiesKHR::default();
        unsafe { loader.get_device_group_present_capabilities(&mut capabilities)? };

        Ok(Some(GroupPresentCapabilities {
            present_masks: capabilities.present_mask[..members.len()].to_vec(),
            modes: DeviceGroupPresentModeFlags::from_vk(&capabilities.modes),
        }))
    }
}

/// Ids of `members` in enumeration order, `None` if any member is unknown.
fn member_ids(
    members: &[vk::PhysicalDevice],
    physical_devices: &[vk::PhysicalDevice],
) -> Option<Vec<usize>> {
    (members.iter())
        .map(|member| physical_devices.iter().position(|pd| pd == member))
        .collect()
}

#[cfg(test)]
mod tests {
    use ash::vk::Handle;

    use super::*;

    fn handles(raw: &[u64]) -> Vec<vk::PhysicalDevice> {
        raw.iter().map(|&raw| vk::PhysicalDevice::from_raw(raw)).collect()
    }

    #[test]
    fn members_map_to_enumeration_ids() {
        let enumerated = handles(&[10, 20, 30]);

        assert_eq!(member_ids(&handles(&[30, 10]), &enumerated), Some(vec![2, 0]));
        assert_eq!(member_ids(&[], &enumerated), Some(Vec::new()));
    }

    #[test]
    fn unknown_member_rejects_the_group() {
        let enumerated = handles(&[10, 20]);

        assert_eq!(member_ids(&handles(&[10, 40, 20]), &enumerated), None);
    }
}
