//! patch_odometer: write a copy of a dump with a new odometer value and
//! freshly computed checksums at both redundant locations.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use eep_codec::{DumpSession, Field, format_checksum};

use crate::error::{ToolError, ToolOutcome};
use crate::source::{DumpSource, load_dump, validate_dump_path};
use crate::tools::{odometer_arg, require_bin_arg, str_arg};
use crate::types::{DumpTool, ToolResult};

/// Output file name used when no explicit output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "modified.bin";

pub struct PatchOdometer;

#[async_trait]
impl DumpTool for PatchOdometer {
    fn name(&self) -> &str {
        "patch_odometer"
    }

    fn description(&self) -> &str {
        "Write a copy of a dump with a new odometer value and recomputed checksums"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Source dump (never modified unless it is also the output)"
                },
                "odometer": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "New odometer value in whole units"
                },
                "output": {
                    "type": "string",
                    "description": "Output path (default: output_name next to the source)"
                },
                "output_name": {
                    "type": "string",
                    "description": "File name used when output is omitted",
                    "default": DEFAULT_OUTPUT_NAME
                },
                "backup": {
                    "type": "boolean",
                    "description": "Back up the source first when overwriting it in place",
                    "default": true
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
        let require_bin = require_bin_arg(&args);
        let backup = args["backup"].as_bool().unwrap_or(true);
        let output = match args["output"].as_str() {
            Some(output) => output.to_string(),
            None => sibling_path(
                path,
                args["output_name"].as_str().unwrap_or(DEFAULT_OUTPUT_NAME),
            )?,
        };
        validate_dump_path(&output, require_bin)?;

        let dump = load_dump(source, path, require_bin).await?;
        let mut session = DumpSession::new();
        let before = session.load(dump.as_bytes())?.odometer;
        let patched = session.patch(odometer)?;
        let checksum = format_checksum(patched.byte(Field::MileageChecksum));

        let in_place = source.same_file(path, &output).await;
        let backup_path = if in_place && backup {
            let backup_path = backup_path_for(path)?;
            source.write_dump(&backup_path, dump.as_bytes()).await?;
            tracing::info!(path, backup = %backup_path, "original dump backed up");
            Some(backup_path)
        } else {
            if !in_place && source.exists(&output).await {
                tracing::warn!(output = %output, "overwriting existing file");
            }
            None
        };

        source.write_dump(&output, patched.as_bytes()).await?;
        tracing::info!(
            path,
            output = %output,
            before = %before,
            odometer,
            checksum = %checksum,
            "patched dump written"
        );

        let data = json!({
            "path": path,
            "output": output,
            "backup": backup_path,
            "odometer_before": before,
            "odometer": odometer,
            "checksum": checksum,
            "changed_bytes": dump.diff(&patched),
        });
        Ok(ToolResult::success(
            self.name(),
            data,
            format!("Wrote {output}: odometer {before} -> {odometer} kms, checksum {checksum}"),
        ))
    }
}

/// `name` in the same directory as `path`.
fn sibling_path(path: &str, name: &str) -> ToolOutcome<String> {
    let sibling = Path::new(path).with_file_name(name);
    sibling
        .to_str()
        .map(String::from)
        .ok_or_else(|| ToolError::InvalidArgument(format!("non UTF-8 output path for {path}")))
}

/// `<stem>.<UTC timestamp>.bak.bin` next to `path`.
fn backup_path_for(path: &str) -> ToolOutcome<String> {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ToolError::InvalidArgument(format!("no file name in {path}")))?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    sibling_path(path, &format!("{stem}.{stamp}.bak.bin"))
}
