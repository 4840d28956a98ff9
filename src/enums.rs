use ash::vk;

vk_enum! {
    pub struct Format(vk::Format) => "FORMAT_";
}

vk_enum! {
    pub struct ColorSpace(vk::ColorSpaceKHR) => "COLOR_SPACE_", "_KHR";
}

vk_enum! {
    pub struct PresentMode(vk::PresentModeKHR) => "PRESENT_MODE_", "_KHR";
}

vk_enum! {
    pub struct DriverId(vk::DriverId) => "DRIVER_ID_";
}

vk_enum! {
    pub struct PointClippingBehavior(vk::PointClippingBehavior) => "POINT_CLIPPING_BEHAVIOR_";
}

impl Format {
    pub const UNDEFINED: Self = Self(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn names_come_from_vulkan_identifiers() {
        assert_eq!(Format::from(vk::Format::R8G8B8A8_UNORM).name(), "FORMAT_R8G8B8A8_UNORM");
        assert_eq!(
            PresentMode::from(vk::PresentModeKHR::FIFO).name(),
            "PRESENT_MODE_FIFO_KHR"
        );
    }

    #[test]
    fn enum_values_keep_raw_number() {
        let value = Value::from(Format::from(vk::Format::D16_UNORM));

        assert_eq!(
            value,
            Value::Enum {
                raw: 124,
                name: String::from("FORMAT_D16_UNORM"),
            }
        );
    }
}
