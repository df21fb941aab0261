//! The five authorization-workflow tools for AuthProof.
//!
//! Each tool simulates its downstream system (device portal, authorization
//! server, report service, record database) with deterministic mock data,
//! so the agent loop can be exercised end-to-end without network access.
//! Only the call contract matters to the loop: one `ToolResult` per
//! invocation, domain failures as `success = false`.

pub mod device_connection;
pub mod test_history;
pub mod test_record;
pub mod test_report;

use authproof_core::tool::{Tool, ToolRegistry};

pub use auth_test::ExecuteAuthTestTool;
pub use device_connection::CheckDeviceConnectionTool;
pub use test_history::QueryTestHistoryTool;
pub use test_record::SaveTestRecordTool;
pub use test_report::GenerateTestReportTool;

/// The fixed, enumerated set of workflow tools.
///
/// Dispatch goes through this enum rather than ad-hoc string lookup: every
/// registered name maps to exactly one variant, and unknown names are a
/// typed `ToolError::Unknown` at the registry boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CheckConnection,
    ExecuteAuthTest,
    GenerateReport,
    SaveRecord,
    QueryHistory,
}

impl ToolKind {
    /// All kinds, in the order they are presented to the model.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::CheckConnection,
        ToolKind::ExecuteAuthTest,
        ToolKind::GenerateReport,
        ToolKind::SaveRecord,
        ToolKind::QueryHistory,
    ];

    /// The wire name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckConnection => "check_device_connection",
            Self::ExecuteAuthTest => "execute_auth_test",
            Self::GenerateReport => "generate_test_report",
            Self::SaveRecord => "save_test_record",
            Self::QueryHistory => "query_test_history",
        }
    }

    /// Map a wire name back to a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    fn build(&self) -> Box<dyn Tool> {
        match self {
            Self::CheckConnection => Box::new(CheckDeviceConnectionTool),
            Self::ExecuteAuthTest => Box::new(ExecuteAuthTestTool),
            Self::GenerateReport => Box::new(GenerateTestReportTool),
            Self::SaveRecord => Box::new(SaveTestRecordTool),
            Self::QueryHistory => Box::new(QueryTestHistoryTool),
        }
    }
}

/// Create the registry with all five workflow tools, in presentation order.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for kind in ToolKind::ALL {
        registry.register(kind.build());
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_all_five_tools() {
        let registry = default_registry();
        assert_eq!(
            registry.names(),
            vec![
                "check_device_connection",
                "execute_auth_test",
                "generate_test_report",
                "save_test_record",
                "query_test_history",
            ]
        );
    }

    #[test]
    fn kind_name_roundtrip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("frobnicate"), None);
    }

    #[test]
    fn specs_match_registered_names() {
        let registry = default_registry();
        for (spec, name) in registry.specs().iter().zip(registry.names()) {
            assert_eq!(spec.name, name);
        }
    }
}
