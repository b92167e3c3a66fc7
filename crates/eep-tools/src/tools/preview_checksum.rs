//! preview_checksum: the checksum a new odometer value would be written
//! with, using the seed bytes of a given dump.

use async_trait::async_trait;
use serde_json::json;

use eep_codec::{DumpSession, format_checksum};

use crate::error::ToolOutcome;
use crate::source::{DumpSource, load_dump};
use crate::tools::{odometer_arg, require_bin_arg, str_arg};
use crate::types::{DumpTool, ToolResult};

pub struct PreviewChecksum;

#[async_trait]
impl DumpTool for PreviewChecksum {
    fn name(&self) -> &str {
        "preview_checksum"
    }

    fn description(&self) -> &str {
        "Compute the checksum for a new odometer value without writing anything"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Dump providing the checksum seed bytes"
                },
                "odometer": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "New odometer value in whole units"
                },
                "require_bin_extension": {
                    "type": "boolean",
                    "default": true
                }
            },
            "required": ["path", "odometer"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn DumpSource,
    ) -> ToolOutcome<ToolResult> {
        let path = str_arg(&args, "path")?;
        let odometer = odometer_arg(&args)?;
        let dump = load_dump(source, path, require_bin_arg(&args)).await?;

        let mut session = DumpSession::new();
        let current = session.load(dump.as_bytes())?.odometer;
        let checksum = format_checksum(session.preview_checksum(odometer)?);

        let data = json!({
            "path": path,
            "current_odometer": current,
            "odometer": odometer,
            "checksum": checksum,
            "seed": session.seed(),
        });
        Ok(ToolResult::success(
            self.name(),
            data,
            format!("Odometer {odometer} kms would be written with checksum {checksum}"),
        ))
    }
}
