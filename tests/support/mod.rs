use std::fs;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn get_telemetry_docs_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("telemetry-docs")
}

/// Writes `content` under `root`, creating parent directories
pub fn write_source(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Source declaring one span with the given low cardinality keys
pub fn span_declaration(
    type_name: &str,
    identifier: &str,
    name: &str,
    description: &str,
    keys: &[(&str, &str)],
) -> String {
    let keys = keys
        .iter()
        .map(|(key, desc)| {
            format!(
                "KeyDocumentation {{ name: \"{}\", description: \"{}\" }},",
                key, desc
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"use telemetry::{{KeyDocumentation, SpanDocumentation}};

pub struct {type_name};

impl {type_name} {{
    pub const {identifier}: SpanDocumentation = SpanDocumentation {{
        name: "{name}",
        description: "{description}",
        low_cardinality_keys: &[
            {keys}
        ],
        high_cardinality_keys: &[],
        events: &[],
    }};
}}
"#,
        type_name = type_name,
        identifier = identifier,
        name = name,
        description = description,
        keys = keys,
    )
}
