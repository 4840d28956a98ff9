pub(crate) mod html;
pub(crate) mod json;
pub(crate) mod text;

use crate::Value;

/// How a value reads in the human formats.
pub(crate) fn human_value(value: &Value) -> String {
    match value {
        Value::Bool(value) => value.to_string(),
        Value::Int(value) => value.to_string(),
        Value::UInt(value) => value.to_string(),
        Value::Float(value) => format!("{value:.6}"),
        Value::Str(value) => value.clone(),
        Value::Hex(value) => format!("0x{value:x}"),
        Value::Enum { name, .. } => name.clone(),
        Value::Flags { names, .. } if names.is_empty() => String::from("None"),
        Value::Flags { names, .. } => names.join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_values() {
        assert_eq!(human_value(&Value::Float(1.0)), "1.000000");
        assert_eq!(human_value(&Value::Hex(0x10de)), "0x10de");
        assert_eq!(
            human_value(&Value::Flags {
                bits: 0,
                names: Vec::new()
            }),
            "None"
        );
        assert_eq!(
            human_value(&Value::Enum {
                raw: 2,
                name: String::from("PHYSICAL_DEVICE_TYPE_DISCRETE_GPU")
            }),
            "PHYSICAL_DEVICE_TYPE_DISCRETE_GPU"
        );
    }
}
