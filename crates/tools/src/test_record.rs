//! Test record persistence — simulates the record database.

use async_trait::async_trait;
use authproof_core::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};
use chrono::Utc;

pub struct SaveTestRecordTool;

#[async_trait]
impl Tool for SaveTestRecordTool {
    fn name(&self) -> &str {
        "save_test_record"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().into(),
            description: "Persist a test verification record for later auditing and \
                          history queries."
                .into(),
            params: vec![
                ParamSpec::required("test_id", ParamKind::String, "Test task id"),
                ParamSpec::required(
                    "operator",
                    ParamKind::String,
                    "Who ran the test (product developer)",
                ),
                ParamSpec::optional("tags", ParamKind::Array, "Tags for categorized lookup"),
            ],
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolResult {
        let test_id = arguments["test_id"].as_str().unwrap_or_default();

        // "TEST-20260830-042" → "REC-20260830-042"
        let suffix = test_id.splitn(2, '-').nth(1).unwrap_or(test_id);

        ToolResult::ok(
            serde_json::json!({
                "record_id": format!("REC-{suffix}"),
                "saved_at": Utc::now().to_rfc3339(),
            }),
            "test record saved",
        )
    }
}
