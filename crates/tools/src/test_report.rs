//! Test report generation — simulates the report service.

use async_trait::async_trait;
use authproof_core::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};
use chrono::{Duration, Utc};

const SUPPORTED_FORMATS: [&str; 3] = ["html", "pdf", "json"];

pub struct GenerateTestReportTool;

#[async_trait]
impl Tool for GenerateTestReportTool {
    fn name(&self) -> &str {
        "generate_test_report"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().into(),
            description: "Generate a detailed acceptance report for a completed \
                          authorization test and return its download link."
                .into(),
            params: vec![
                ParamSpec::required("test_id", ParamKind::String, "Test task id"),
                ParamSpec::optional(
                    "report_format",
                    ParamKind::String,
                    "Report format: html, pdf, or json",
                )
                .with_default(serde_json::json!("html")),
            ],
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolResult {
        let test_id = arguments["test_id"].as_str().unwrap_or_default();
        let format = arguments["report_format"].as_str().unwrap_or("html");

        if !SUPPORTED_FORMATS.contains(&format) {
            return ToolResult::fail(
                format!("unsupported report format '{format}'"),
                "report format must be one of: html, pdf, json",
            );
        }

        // "TEST-20260830-042" → "REPORT-20260830-042"
        let suffix = test_id.splitn(2, '-').nth(1).unwrap_or(test_id);
        let report_id = format!("REPORT-{suffix}");
        let expire_at = (Utc::now() + Duration::days(7)).to_rfc3339();

        ToolResult::ok(
            serde_json::json!({
                "report_id": report_id,
                "download_url": format!("https://auth-system.example.com/reports/{report_id}.{format}"),
                "file_size": 153_600,
                "expire_at": expire_at,
            }),
            "report generated",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_id_derives_from_test_id() {
        let result = GenerateTestReportTool
            .execute(serde_json::json!({"test_id": "TEST-20260830-042"}))
            .await;

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["report_id"], "REPORT-20260830-042");
        assert!(
            data["download_url"]
                .as_str()
                .unwrap()
                .ends_with("REPORT-20260830-042.html")
        );
    }

    #[tokio::test]
    async fn explicit_pdf_format() {
        let result = GenerateTestReportTool
            .execute(serde_json::json!({"test_id": "TEST-20260830-042", "report_format": "pdf"}))
            .await;

        let url = result.data.unwrap()["download_url"].as_str().unwrap().to_string();
        assert!(url.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn unsupported_format_fails() {
        let result = GenerateTestReportTool
            .execute(serde_json::json!({"test_id": "TEST-20260830-042", "report_format": "docx"}))
            .await;

        assert!(!result.success);
        assert!(result.message.contains("html"));
    }
}
