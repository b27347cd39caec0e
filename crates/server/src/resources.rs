//! URI-addressed text resources.

use rmcp::{
    ErrorData as McpError,
    model::{ResourceContents, ResourceTemplate},
};

/// A resource family served under one URI scheme.
struct Template {
    scheme: &'static str,
    placeholder: &'static str,
    name: &'static str,
    description: &'static str,
    render: fn(&str) -> String,
}

const TEMPLATES: &[Template] = &[
    Template {
        scheme: "greeting",
        placeholder: "name",
        name: "greeting",
        description: "Personalized greeting",
        render: |name| format!("Hello, {name}!"),
    },
    Template {
        scheme: "example",
        placeholder: "param",
        name: "example",
        description: "Example resource",
        render: |param| format!("Resource data for {param}"),
    },
];

/// Templates advertised through `resources/templates/list`.
pub fn templates() -> Result<Vec<ResourceTemplate>, McpError> {
    TEMPLATES
        .iter()
        .map(|t| {
            serde_json::from_value(serde_json::json!({
                "uriTemplate": format!("{}://{{{}}}", t.scheme, t.placeholder),
                "name": t.name,
                "description": t.description,
                "mimeType": "text/plain",
            }))
            .map_err(|e| McpError::internal_error(format!("invalid resource template: {e}"), None))
        })
        .collect()
}

/// Resolve a concrete URI such as `greeting://ada` against the templates.
pub fn read(uri: &str) -> Result<ResourceContents, McpError> {
    let (scheme, value) = uri
        .split_once("://")
        .filter(|(_, value)| !value.is_empty())
        .ok_or_else(|| not_found(uri))?;

    let template = TEMPLATES.iter().find(|t| t.scheme == scheme).ok_or_else(|| not_found(uri))?;

    tracing::debug!(uri, "reading resource");

    Ok(ResourceContents::text((template.render)(value), uri))
}

fn not_found(uri: &str) -> McpError {
    McpError::resource_not_found(format!("resource not found: {uri}"), Some(serde_json::json!({ "uri": uri })))
}
