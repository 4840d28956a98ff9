use std::fmt;

use ash::vk;

use crate::{
    Printer,
    describe::{Describe, Field, FromVk},
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Extent2d {
    pub width: u32,
    pub height: u32,
}

impl Extent2d {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Extent2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.width, self.height)
    }
}

impl FromVk<vk::Extent2D> for Extent2d {
    fn from_vk(raw: &vk::Extent2D) -> Self {
        Self::new(raw.width, raw.height)
    }
}

impl Describe for Extent2d {
    fn describe(&self, p: &mut Printer, name: &str) {
        p.object_start(name);
        p.print_key_value("width", self.width, 6);
        p.print_key_value("height", self.height, 6);
        p.object_end();
    }
}

impl Field for Extent2d {
    fn describe_field(&self, p: &mut Printer, key: &str, _width: usize) {
        self.describe(p, key);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent3d {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

impl fmt::Display for Extent3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.width, self.height, self.depth)
    }
}

impl FromVk<vk::Extent3D> for Extent3d {
    fn from_vk(raw: &vk::Extent3D) -> Self {
        Self::new(raw.width, raw.height, raw.depth)
    }
}

impl Describe for Extent3d {
    fn describe(&self, p: &mut Printer, name: &str) {
        p.object_start(name);
        p.print_key_value("width", self.width, 6);
        p.print_key_value("height", self.height, 6);
        p.print_key_value("depth", self.depth, 6);
        p.object_end();
    }
}

impl Field for Extent3d {
    fn describe_field(&self, p: &mut Printer, key: &str, _width: usize) {
        self.describe(p, key);
    }
}
