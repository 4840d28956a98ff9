use std::{ffi::c_char, fmt};

use ash::vk;

use crate::{Printer, Value};

/// A record that knows how to print itself as one named object.
pub trait Describe {
    fn describe(&self, p: &mut Printer, name: &str);
}

/// A single member of a record, printed under `key`.
pub trait Field {
    fn describe_field(&self, p: &mut Printer, key: &str, width: usize);
}

/// Conversion from the raw `ash` representation captured from the driver.
pub(crate) trait FromVk<T> {
    fn from_vk(raw: &T) -> Self;
}

impl<T: Copy> FromVk<T> for T {
    fn from_vk(raw: &T) -> Self {
        *raw
    }
}

impl FromVk<vk::Bool32> for bool {
    fn from_vk(raw: &vk::Bool32) -> Self {
        *raw != vk::FALSE
    }
}

impl<const N: usize> FromVk<[c_char; N]> for String {
    fn from_vk(raw: &[c_char; N]) -> Self {
        string_from_chars(raw)
    }
}

/// Read a nul terminated (or full) fixed size C string.
pub(crate) fn string_from_chars(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Width of the widest key, used to align a record's key column.
pub(crate) const fn key_width(keys: &[&str]) -> usize {
    let mut width = 0;
    let mut i = 0;

    while i < keys.len() {
        if keys[i].len() > width {
            width = keys[i].len();
        }

        i += 1;
    }

    width
}

macro_rules! scalar_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                fn describe_field(&self, p: &mut Printer, key: &str, width: usize) {
                    p.print_key_value(key, *self, width);
                }
            }
        )*
    };
}

scalar_field!(bool, u8, u32, u64, usize, i32, i64, f32);

impl Field for String {
    fn describe_field(&self, p: &mut Printer, key: &str, width: usize) {
        p.print_key_string(key, self.as_str(), width);
    }
}

impl<T: Copy + Into<Value>, const N: usize> Field for [T; N] {
    fn describe_field(&self, p: &mut Printer, key: &str, _width: usize) {
        p.array_start(key, N);
        for element in self {
            p.print_element(*element);
        }
        p.array_end();
    }
}

/// A 16 byte universally unique identifier, such as a driver or pipeline
/// cache UUID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Uuid(pub [u8; vk::UUID_SIZE]);

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }

            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl FromVk<[u8; vk::UUID_SIZE]> for Uuid {
    fn from_vk(raw: &[u8; vk::UUID_SIZE]) -> Self {
        Self(*raw)
    }
}

impl Field for Uuid {
    fn describe_field(&self, p: &mut Printer, key: &str, width: usize) {
        if p.format().is_tree() {
            self.0.describe_field(p, key, width);
        } else {
            p.print_key_string(key, self.to_string(), width);
        }
    }
}

/// An 8 byte locally unique identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Luid(pub [u8; vk::LUID_SIZE]);

impl fmt::Display for Luid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i == 4 {
                f.write_str("-")?;
            }

            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl FromVk<[u8; vk::LUID_SIZE]> for Luid {
    fn from_vk(raw: &[u8; vk::LUID_SIZE]) -> Self {
        Self(*raw)
    }
}

impl Field for Luid {
    fn describe_field(&self, p: &mut Printer, key: &str, width: usize) {
        if p.format().is_tree() {
            self.0.describe_field(p, key, width);
        } else {
            p.print_key_string(key, self.to_string(), width);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConformanceVersion {
    pub major: u8,
    pub minor: u8,
    pub subminor: u8,
    pub patch: u8,
}

impl fmt::Display for ConformanceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.subminor, self.patch)
    }
}

impl FromVk<vk::ConformanceVersion> for ConformanceVersion {
    fn from_vk(raw: &vk::ConformanceVersion) -> Self {
        Self {
            major: raw.major,
            minor: raw.minor,
            subminor: raw.subminor,
            patch: raw.patch,
        }
    }
}

impl Field for ConformanceVersion {
    fn describe_field(&self, p: &mut Printer, key: &str, width: usize) {
        if p.format().is_tree() {
            p.object_start(key);
            p.print_key_value("major", self.major, 8);
            p.print_key_value("minor", self.minor, 8);
            p.print_key_value("subminor", self.subminor, 8);
            p.print_key_value("patch", self.patch, 8);
            p.object_end();
        } else {
            p.print_key_string(key, self.to_string(), width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_strings_stop_at_nul() {
        let mut raw = [0 as c_char; 8];
        for (dst, src) in raw.iter_mut().zip(b"GPU") {
            *dst = *src as c_char;
        }

        assert_eq!(String::from_vk(&raw), "GPU");
    }

    #[test]
    fn bool32_converts() {
        assert!(bool::from_vk(&vk::TRUE));
        assert!(!bool::from_vk(&vk::FALSE));
    }

    #[test]
    fn key_width_is_longest_key() {
        const WIDTH: usize = key_width(&["a", "abcd", "ab"]);
        assert_eq!(WIDTH, 4);
        assert_eq!(key_width(&[]), 0);
    }

    #[test]
    fn uuid_display() {
        let uuid = Uuid([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ]);

        assert_eq!(uuid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
    }
}
