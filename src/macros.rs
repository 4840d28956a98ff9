/// Declares a capability record that mirrors a Vulkan struct field by field.
///
/// Every field names the member of the raw `ash` struct it is converted from,
/// and the key it is printed under. The generated type gets a `from_vk`
/// constructor and a [`Describe`](crate::Describe) implementation that prints
/// all fields, in declaration order, inside one object with an aligned key
/// column.
macro_rules! capability_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $raw:ty {
            $( $field:ident: $ty:ty => $key:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            $( pub $field: $ty, )*
        }

        impl $name {
            #[allow(dead_code)]
            pub(crate) fn from_vk(raw: &$raw) -> Self {
                Self {
                    $( $field: crate::describe::FromVk::from_vk(&raw.$field), )*
                }
            }
        }

        impl crate::describe::Describe for $name {
            fn describe(&self, p: &mut crate::Printer, name: &str) {
                const WIDTH: usize = crate::describe::key_width(&[$($key),*]);

                p.object_start(name);
                $( crate::describe::Field::describe_field(&self.$field, p, $key, WIDTH); )*
                p.object_end();
            }
        }
    };
}

/// Declares a set of Vulkan flag bits on top of [`bitflags`].
///
/// Each flag carries the Vulkan name it is printed as, so that renderers can
/// list set bits by name without knowing anything about Vulkan.
macro_rules! vk_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $raw:ty {
            $( const $flag:ident = $value:literal => $label:literal; )*
        }
    ) => {
        bitflags::bitflags! {
            $(#[$meta])*
            #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name: u32 {
                $( const $flag = $value; )*
            }
        }

        impl $name {
            const LABELS: &'static [(Self, &'static str)] = &[$( (Self::$flag, $label), )*];

            /// The Vulkan names of all known bits in `self`, lowest bit first.
            pub fn names(&self) -> Vec<String> {
                Self::LABELS
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, label)| label.to_string())
                    .collect()
            }
        }

        impl From<$name> for crate::Value {
            fn from(flags: $name) -> Self {
                crate::Value::Flags {
                    bits: u64::from(flags.bits()),
                    names: flags.names(),
                }
            }
        }

        impl crate::describe::FromVk<$raw> for $name {
            fn from_vk(raw: &$raw) -> Self {
                Self::from_bits_retain(raw.as_raw())
            }
        }

        impl crate::describe::Field for $name {
            fn describe_field(&self, p: &mut crate::Printer, key: &str, width: usize) {
                p.print_key_value(key, *self, width);
            }
        }
    };
}

/// Declares a newtype over a raw Vulkan enum value.
///
/// Names come from the `Debug` output of the matching `ash` type, so values
/// unknown to this build still print (as their number).
macro_rules! vk_enum {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($raw:ty) => $prefix:literal $(, $suffix:literal)?;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i32);

        impl $name {
            pub fn name(self) -> String {
                format!(concat!($prefix, "{:?}" $(, $suffix)?), <$raw>::from_raw(self.0))
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                Self(raw.as_raw())
            }
        }

        impl From<$name> for crate::Value {
            fn from(value: $name) -> Self {
                crate::Value::Enum {
                    raw: i64::from(value.0),
                    name: value.name(),
                }
            }
        }

        impl crate::describe::FromVk<$raw> for $name {
            fn from_vk(raw: &$raw) -> Self {
                Self(raw.as_raw())
            }
        }

        impl crate::describe::Field for $name {
            fn describe_field(&self, p: &mut crate::Printer, key: &str, width: usize) {
                p.print_key_value(key, *self, width);
            }
        }
    };
}

/// Runs a query over a `pNext` chain holding every listed record the
/// [`ChainContext`](crate::ChainContext) supports.
///
/// Evaluates to the query's result and the filled in records, collected into
/// an [`ExtensionChain`](crate::ExtensionChain) in the order they are listed.
macro_rules! query_chain {
    (
        $context:expr, $root:expr, |$arg:ident| $query:expr;
        $( $record:ident: $raw:ident as $var:ident, )*
    ) => {{
        let context: &crate::ChainContext = $context;
        let mut $arg = $root;

        $( let mut $var = ash::vk::$raw::default(); )*

        $(
            if context.supports::<$record>() {
                $arg = $arg.push_next(&mut $var);
            }
        )*

        let outcome = $query;

        let mut records: Vec<crate::ChainRecord> = Vec::new();

        $(
            if context.supports::<$record>() {
                records.push($record::from_vk(&$var).into());
            }
        )*

        (outcome, records.into_iter().collect::<crate::ExtensionChain>())
    }};
}
