// crates/testify-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `testify.toml`. The example parses and validates with
//! the current configuration model.

/// Returns a canonical example `testify.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[report]
format = "text"
color = true

[source]
roots = ["."]
max_file_bytes = 4194304

[logging]
sink = "file"
path = "testify-events.jsonl"
"#,
    )
}
