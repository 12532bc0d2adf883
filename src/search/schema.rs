//! Tantivy schema for crawled pages
//!
//! Three fields per page: `url` is the unique key, stored verbatim and not
//! tokenized; `content` and `title` are stored and tokenized for search.

use tantivy::schema::{Field, STORED, STRING, Schema, TEXT};

/// Names of every field, in declaration order
pub const FIELD_NAMES: [&str; 3] = ["url", "content", "title"];

/// Search schema with resolved field handles
#[derive(Debug, Clone)]
pub struct SearchSchema {
    pub schema: Schema,
    pub url: Field,
    pub content: Field,
    pub title: Field,
}

/// Schema validation errors
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Field '{field}' not found in schema")]
    FieldNotFound { field: String },

    #[error("Field '{field}' configuration error: {details}")]
    FieldConfiguration { field: String, details: String },
}

impl SearchSchema {
    /// Build the page schema
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let url = builder.add_text_field("url", STRING | STORED);
        let content = builder.add_text_field("content", TEXT | STORED);
        let title = builder.add_text_field("title", TEXT | STORED);

        Self {
            schema: builder.build(),
            url,
            content,
            title,
        }
    }

    /// Check that `schema` carries every page field, each stored
    pub fn validate(schema: &Schema) -> Result<(), SchemaError> {
        for field_name in FIELD_NAMES {
            let field = schema
                .get_field(field_name)
                .map_err(|_| SchemaError::FieldNotFound {
                    field: field_name.to_string(),
                })?;
            if !schema.get_field_entry(field).is_stored() {
                return Err(SchemaError::FieldConfiguration {
                    field: field_name.to_string(),
                    details: "Field must be stored for retrieval".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for SearchSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid() {
        let schema = SearchSchema::new();
        assert!(SearchSchema::validate(&schema.schema).is_ok());
        assert_eq!(schema.schema.fields().count(), FIELD_NAMES.len());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut builder = Schema::builder();
        builder.add_text_field("url", STRING | STORED);
        let err = SearchSchema::validate(&builder.build()).unwrap_err();
        assert!(matches!(err, SchemaError::FieldNotFound { field } if field == "content"));
    }
}
