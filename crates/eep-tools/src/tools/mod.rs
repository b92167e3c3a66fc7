//! Dump tool implementations.
//!
//! - read_dump: decode every field and report checksum validity
//! - verify_checksum: stored vs calculated odometer checksum only
//! - preview_checksum: checksum a new odometer value would get
//! - patch_odometer: write a copy with a new odometer and checksum

pub mod patch_odometer;
pub mod preview_checksum;
pub mod read_dump;
pub mod verify_checksum;

pub use patch_odometer::PatchOdometer;
pub use preview_checksum::PreviewChecksum;
pub use read_dump::ReadDump;
pub use verify_checksum::VerifyChecksum;

use serde_json::Value;

use crate::error::{ToolError, ToolOutcome};
use crate::types::DumpTool;

/// Returns all dump tools as boxed trait objects.
pub fn all_tools() -> Vec<Box<dyn DumpTool>> {
    vec![
        Box::new(ReadDump),
        Box::new(VerifyChecksum),
        Box::new(PreviewChecksum),
        Box::new(PatchOdometer),
    ]
}

/// Required string argument.
pub(crate) fn str_arg<'a>(args: &'a Value, name: &str) -> ToolOutcome<&'a str> {
    args[name]
        .as_str()
        .ok_or_else(|| ToolError::InvalidArgument(format!("missing '{name}' argument")))
}

/// `require_bin_extension`, defaulting to true.
pub(crate) fn require_bin_arg(args: &Value) -> bool {
    args["require_bin_extension"].as_bool().unwrap_or(true)
}

/// The new odometer value in whole units. Negative or fractional input is
/// rejected here, before the codec sees it.
pub(crate) fn odometer_arg(args: &Value) -> ToolOutcome<i64> {
    let value = &args["odometer"];
    match value.as_i64() {
        Some(v) if v >= 0 => Ok(v),
        Some(v) => Err(ToolError::InvalidArgument(format!(
            "odometer must not be negative, got {v}"
        ))),
        None if value.is_null() => Err(ToolError::InvalidArgument(
            "missing 'odometer' argument".into(),
        )),
        None => Err(ToolError::InvalidArgument(format!(
            "odometer must be a whole number, got {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn four_tools_with_unique_names() {
        let tools = all_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn schemas_are_objects() {
        for tool in all_tools() {
            let schema = tool.parameters_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(!tool.description().is_empty());
        }
    }

    #[test]
    fn odometer_arg_rules() {
        assert_eq!(odometer_arg(&json!({"odometer": 0})).unwrap(), 0);
        assert_eq!(odometer_arg(&json!({"odometer": 120000})).unwrap(), 120_000);
        assert!(odometer_arg(&json!({"odometer": -1})).is_err());
        assert!(odometer_arg(&json!({"odometer": 1.5})).is_err());
        assert!(odometer_arg(&json!({"odometer": "abc"})).is_err());
        assert!(odometer_arg(&json!({})).is_err());
    }

    #[test]
    fn require_bin_defaults_on() {
        assert!(require_bin_arg(&json!({})));
        assert!(!require_bin_arg(&json!({"require_bin_extension": false})));
    }

    #[test]
    fn missing_string_arg() {
        let err = str_arg(&json!({}), "path").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: missing 'path' argument");
    }
}
