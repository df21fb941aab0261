//! Test history query — simulates the record database's read side.
//!
//! Serves a canned record set filtered by the optional criteria. Fully
//! deterministic: no clock or randomness, so repeated queries are
//! byte-identical.

use async_trait::async_trait;
use authproof_core::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};
use serde::Serialize;

pub struct QueryTestHistoryTool;

#[async_trait]
impl Tool for QueryTestHistoryTool {
    fn name(&self) -> &str {
        "query_test_history"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().into(),
            description: "Query historical test verification records with optional \
                          filters on product, version, operator, and status."
                .into(),
            params: vec![
                ParamSpec::optional("product_name", ParamKind::String, "Product name filter"),
                ParamSpec::optional("version", ParamKind::String, "Product version filter"),
                ParamSpec::optional("operator", ParamKind::String, "Operator filter"),
                ParamSpec::optional(
                    "status",
                    ParamKind::String,
                    "Status filter: success, failed, or all",
                )
                .with_default(serde_json::json!("all")),
                ParamSpec::optional("limit", ParamKind::Integer, "Maximum records to return")
                    .with_default(serde_json::json!(10)),
            ],
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolResult {
        let product_name = arguments["product_name"].as_str();
        let version = arguments["version"].as_str();
        let operator = arguments["operator"].as_str();
        let status = arguments["status"].as_str().unwrap_or("all");
        let limit = arguments["limit"].as_u64().unwrap_or(10) as usize;

        let records: Vec<HistoryRecord> = canned_records()
            .into_iter()
            .filter(|r| product_name.is_none_or(|p| r.product_name == p))
            .filter(|r| version.is_none_or(|v| r.version == v))
            .filter(|r| operator.is_none_or(|o| r.operator == o))
            .filter(|r| status == "all" || r.status == status)
            .collect();

        let total = records.len();
        let limited: Vec<HistoryRecord> = records.into_iter().take(limit).collect();

        ToolResult::ok(
            serde_json::json!({
                "total": total,
                "records": limited,
            }),
            "query succeeded",
        )
    }
}

#[derive(Debug, Clone, Serialize)]
struct HistoryRecord {
    test_id: &'static str,
    product_name: &'static str,
    version: &'static str,
    device_ip: &'static str,
    operator: &'static str,
    status: &'static str,
    created_at: &'static str,
    report_url: &'static str,
}

fn canned_records() -> Vec<HistoryRecord> {
    vec![
        HistoryRecord {
            test_id: "TEST-20260114-001",
            product_name: "Storage System A",
            version: "v2.3.5",
            device_ip: "192.168.1.100",
            operator: "alice",
            status: "success",
            created_at: "2026-01-14T10:00:00Z",
            report_url: "https://auth-system.example.com/reports/REPORT-20260114-001.html",
        },
        HistoryRecord {
            test_id: "TEST-20260113-008",
            product_name: "Storage System A",
            version: "v2.3.5",
            device_ip: "192.168.1.101",
            operator: "bob",
            status: "success",
            created_at: "2026-01-13T16:20:00Z",
            report_url: "https://auth-system.example.com/reports/REPORT-20260113-008.html",
        },
        HistoryRecord {
            test_id: "TEST-20260112-005",
            product_name: "Storage System A",
            version: "v2.3.4",
            device_ip: "192.168.1.102",
            operator: "carol",
            status: "failed",
            created_at: "2026-01-12T09:15:00Z",
            report_url: "https://auth-system.example.com/reports/REPORT-20260112-005.html",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unfiltered_query_returns_all() {
        let result = QueryTestHistoryTool.execute(serde_json::json!({})).await;

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["total"], 3);
        assert_eq!(data["records"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn status_filter_narrows_results() {
        let result = QueryTestHistoryTool
            .execute(serde_json::json!({"status": "failed"}))
            .await;

        let data = result.data.unwrap();
        assert_eq!(data["total"], 1);
        assert_eq!(data["records"][0]["operator"], "carol");
    }

    #[tokio::test]
    async fn version_and_product_filters_compose() {
        let result = QueryTestHistoryTool
            .execute(serde_json::json!({
                "product_name": "Storage System A",
                "version": "v2.3.5",
            }))
            .await;

        assert_eq!(result.data.unwrap()["total"], 2);
    }

    #[tokio::test]
    async fn limit_truncates_but_total_is_unfiltered_count() {
        let result = QueryTestHistoryTool
            .execute(serde_json::json!({"limit": 1}))
            .await;

        let data = result.data.unwrap();
        assert_eq!(data["total"], 3);
        assert_eq!(data["records"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deterministic_results() {
        let r1 = QueryTestHistoryTool.execute(serde_json::json!({})).await;
        let r2 = QueryTestHistoryTool.execute(serde_json::json!({})).await;
        assert_eq!(r1.to_transcript_content(), r2.to_transcript_content());
    }
}
