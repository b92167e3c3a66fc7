//! read_dump: decode every field of a dump and report checksum validity.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ToolError, ToolOutcome};
use crate::source::{DumpSource, load_dump};
use crate::tools::{require_bin_arg, str_arg};
use crate::types::{DumpTool, ToolResult};

pub struct ReadDump;

#[async_trait]
impl DumpTool for ReadDump {
    fn name(&self) -> &str {
        "read_dump"
    }

    fn description(&self) -> &str {
        "Decode odometer, checksum, immobilizer bypass codes and key codes from a 24C16 dump"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the 2048-byte .bin dump"
                },
                "require_bin_extension": {
                    "type": "boolean",
                    "description": "Reject files without a .bin extension",
                    "default": true
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn DumpSource,
    ) -> ToolOutcome<ToolResult> {
        let path = str_arg(&args, "path")?;
        let dump = load_dump(source, path, require_bin_arg(&args)).await?;
        let view = eep_codec::decode_dump(&dump);

        if !view.checksum_valid {
            tracing::warn!(
                path,
                stored = %view.odometer_checksum_hex,
                calculated = %view.calculated_checksum_hex(),
                "checksum mismatch"
            );
        }

        let mut data = serde_json::to_value(&view).map_err(|e| ToolError::Other(e.to_string()))?;
        data["path"] = json!(path);
        data["calculated_checksum_hex"] = json!(view.calculated_checksum_hex());

        let status = if view.checksum_valid {
            "valid"
        } else {
            "MISMATCH"
        };
        let summary = format!(
            "Odometer {} kms, checksum {} ({status})",
            view.odometer, view.odometer_checksum_hex
        );
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
