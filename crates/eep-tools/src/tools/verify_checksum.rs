//! verify_checksum: compare the stored odometer checksum with the
//! recomputed one.

use async_trait::async_trait;
use serde_json::json;

use crate::error::ToolOutcome;
use crate::source::{DumpSource, load_dump};
use crate::tools::{require_bin_arg, str_arg};
use crate::types::{DumpTool, ToolResult};

pub struct VerifyChecksum;

#[async_trait]
impl DumpTool for VerifyChecksum {
    fn name(&self) -> &str {
        "verify_checksum"
    }

    fn description(&self) -> &str {
        "Check the stored odometer checksum of a dump against the recomputed value"
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

        let stored = view.odometer_checksum_hex.clone();
        let calculated = view.calculated_checksum_hex();
        let valid = eep_codec::validate_checksum(view.odometer, view.odometer_checksum, view.seed);

        let summary = if valid {
            format!("Checksum {stored} matches odometer {} kms", view.odometer)
        } else {
            tracing::warn!(path, %stored, %calculated, "checksum mismatch");
            format!("Checksum mismatch: stored {stored}, calculated {calculated}")
        };

        let data = json!({
            "path": path,
            "odometer": view.odometer,
            "stored": stored,
            "calculated": calculated,
            "seed": view.seed,
            "valid": valid,
            "copies_agree": view.copies_agree(),
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
