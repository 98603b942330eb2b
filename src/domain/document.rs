//! Request-body schema lookup inside an API document

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media-type substring that marks a JSON request body
pub const DEFAULT_MEDIA_TYPE_FILTER: &str = "json";

/// How the target operation is picked from the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum OperationSelector {
    /// First operation (paths, then methods, in document order) with a JSON body schema
    #[default]
    FirstMatch,
    /// A specific operation, e.g. the one the editor is rendered for
    Operation { path: String, method: String },
}

/// A request-body schema together with where it was found
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodySchema<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub media_type: &'a str,
    pub schema: &'a Value,
}

/// Locate the request-body schema selected by `selector`.
///
/// For each operation only the first media type whose key contains
/// `media_type_filter` is considered; if that entry has no schema the
/// operation is skipped.
pub fn find_request_body_schema<'a>(
    document: &'a Value,
    selector: &OperationSelector,
    media_type_filter: &str,
) -> Option<RequestBodySchema<'a>> {
    let paths = document.get("paths")?.as_object()?;

    match selector {
        OperationSelector::FirstMatch => paths.iter().find_map(|(path, item)| {
            item.as_object()?.iter().find_map(|(method, operation)| {
                let (media_type, schema) = json_body_schema(operation, media_type_filter)?;
                Some(RequestBodySchema {
                    path: path.as_str(),
                    method: method.as_str(),
                    media_type,
                    schema,
                })
            })
        }),
        OperationSelector::Operation { path, method } => {
            let (path, item) = paths.get_key_value(path.as_str())?;
            let (method, operation) = item
                .as_object()?
                .iter()
                .find(|(m, _)| m.eq_ignore_ascii_case(method))?;
            let (media_type, schema) = json_body_schema(operation, media_type_filter)?;
            Some(RequestBodySchema {
                path: path.as_str(),
                method: method.as_str(),
                media_type,
                schema,
            })
        }
    }
}

fn json_body_schema<'a>(operation: &'a Value, media_type_filter: &str) -> Option<(&'a str, &'a Value)> {
    let content = operation
        .as_object()?
        .get("requestBody")?
        .get("content")?
        .as_object()?;
    let (media_type, media) = content
        .iter()
        .find(|(key, _)| key.contains(media_type_filter))?;
    let schema = media.get("schema").filter(|s| !s.is_null())?;
    Some((media_type.as_str(), schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "paths": {
                "/health": {
                    "get": { "responses": {} }
                },
                "/uploads": {
                    "parameters": [],
                    "post": {
                        "requestBody": {
                            "content": {
                                "multipart/form-data": { "schema": { "type": "object" } }
                            }
                        }
                    }
                },
                "/users": {
                    "put": {
                        "requestBody": {
                            "content": {
                                "application/json": { "example": {} },
                                "application/merge-patch+json": { "schema": { "type": "string" } }
                            }
                        }
                    },
                    "post": {
                        "requestBody": {
                            "content": {
                                "text/plain": { "schema": { "type": "string" } },
                                "application/json": { "schema": { "$ref": "#/components/schemas/User" } }
                            }
                        }
                    }
                },
                "/orders": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/vnd.api+json": { "schema": { "type": "object" } }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_first_match_in_document_order() {
        let doc = document();
        let found = find_request_body_schema(&doc, &OperationSelector::FirstMatch, DEFAULT_MEDIA_TYPE_FILTER)
            .expect("schema");

        // PUT is skipped: its first JSON media type carries no schema
        assert_eq!(found.path, "/users");
        assert_eq!(found.method, "post");
        assert_eq!(found.media_type, "application/json");
        assert_eq!(found.schema, &json!({ "$ref": "#/components/schemas/User" }));
    }

    #[test]
    fn test_specific_operation() {
        let doc = document();
        let selector = OperationSelector::Operation {
            path: "/orders".to_string(),
            method: "POST".to_string(),
        };

        let found = find_request_body_schema(&doc, &selector, "json").expect("schema");
        assert_eq!(found.method, "post");
        assert_eq!(found.media_type, "application/vnd.api+json");
    }

    #[test]
    fn test_specific_operation_without_json_body() {
        let doc = document();
        let selector = OperationSelector::Operation {
            path: "/uploads".to_string(),
            method: "post".to_string(),
        };

        assert!(find_request_body_schema(&doc, &selector, "json").is_none());
    }

    #[test]
    fn test_custom_media_type_filter() {
        let doc = document();
        let found = find_request_body_schema(&doc, &OperationSelector::FirstMatch, "form-data").expect("schema");
        assert_eq!(found.path, "/uploads");
    }

    #[test]
    fn test_no_request_body() {
        let doc = json!({
            "paths": {
                "/a": { "get": { "responses": {} } },
                "/b": { "delete": {} }
            }
        });
        assert!(find_request_body_schema(&doc, &OperationSelector::FirstMatch, "json").is_none());
        assert!(find_request_body_schema(&json!({}), &OperationSelector::FirstMatch, "json").is_none());
    }
}
