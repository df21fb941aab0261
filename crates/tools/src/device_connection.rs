//! Device connectivity check — simulates probing the device portal.
//!
//! Two scripted failure cases mirror the downstream behaviors the agent has
//! to narrate: the unreachable address `192.168.1.999` and the password
//! `wrong`. Everything else comes back online with plausible device facts.

use async_trait::async_trait;
use authproof_core::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};

pub struct CheckDeviceConnectionTool;

#[async_trait]
impl Tool for CheckDeviceConnectionTool {
    fn name(&self) -> &str {
        "check_device_connection"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().into(),
            description: "Check whether the target device is online and fetch its basic \
                          facts (product name, version, device id)."
                .into(),
            params: vec![
                ParamSpec::required(
                    "device_ip",
                    ParamKind::String,
                    "Device IP address or host name",
                ),
                ParamSpec::required("username", ParamKind::String, "Device portal username"),
                ParamSpec::required("password", ParamKind::String, "Device portal password"),
            ],
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> ToolResult {
        let device_ip = arguments["device_ip"].as_str().unwrap_or_default();
        let password = arguments["password"].as_str().unwrap_or_default();

        if device_ip == "192.168.1.999" {
            return ToolResult::fail("device unreachable", "connection timed out");
        }

        if password == "wrong" {
            return ToolResult::fail("authentication failed", "wrong username or password");
        }

        let product_name = if device_ip.contains("192.168.1") {
            "Storage System A"
        } else {
            "Storage System B"
        };

        ToolResult::ok(
            serde_json::json!({
                "online": true,
                "product_name": product_name,
                "version": "v2.3.5",
                "device_id": format!("SN{}", device_ip.replace('.', "")),
            }),
            "device connection established",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reachable_device_comes_back_online() {
        let tool = CheckDeviceConnectionTool;
        let result = tool
            .execute(serde_json::json!({
                "device_ip": "192.168.1.100",
                "username": "admin",
                "password": "secret",
            }))
            .await;

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["online"], true);
        assert_eq!(data["product_name"], "Storage System A");
        assert_eq!(data["device_id"], "SN1921681100");
    }

    #[tokio::test]
    async fn other_subnet_maps_to_product_b() {
        let tool = CheckDeviceConnectionTool;
        let result = tool
            .execute(serde_json::json!({
                "device_ip": "172.16.0.5",
                "username": "admin",
                "password": "secret",
            }))
            .await;

        assert_eq!(result.data.unwrap()["product_name"], "Storage System B");
    }

    #[tokio::test]
    async fn unreachable_address_fails() {
        let tool = CheckDeviceConnectionTool;
        let result = tool
            .execute(serde_json::json!({
                "device_ip": "192.168.1.999",
                "username": "admin",
                "password": "secret",
            }))
            .await;

        assert!(!result.success);
        assert!(result.error.is_some());
        assert_eq!(result.message, "connection timed out");
    }

    #[tokio::test]
    async fn wrong_password_fails_authentication() {
        let tool = CheckDeviceConnectionTool;
        let result = tool
            .execute(serde_json::json!({
                "device_ip": "192.168.1.100",
                "username": "admin",
                "password": "wrong",
            }))
            .await;

        assert!(!result.success);
        assert!(result.message.contains("password"));
    }
}
