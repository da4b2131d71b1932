// ── Configuration schema – descriptive metadata for a generic settings UI ───

use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Plain value, kept in the settings store.
    Text,
    /// Sensitive value, kept in the secret store and masked in forms.
    Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl ConfigField {
    pub const fn text(key: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            key,
            title,
            description,
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub const fn secret(key: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            key,
            title,
            description,
            kind: FieldKind::Secret,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_secret(&self) -> bool {
        self.kind == FieldKind::Secret
    }
}

/// The ordered list of fields a service recognises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSchema {
    pub title: &'static str,
    pub fields: Vec<ConfigField>,
}

impl ConfigSchema {
    pub fn new(title: &'static str, fields: Vec<ConfigField>) -> Self {
        Self { title, fields }
    }

    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_secret(&self, key: &str) -> bool {
        self.field(key).map(ConfigField::is_secret).unwrap_or(false)
    }

    pub fn required_keys(&self) -> Vec<&'static str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.key).collect()
    }

    /// Field keys in display order.
    pub fn form(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }

    /// Render as a JSON Schema object (`type`, `title`, `properties`, `required`).
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut prop = json!({
                "title": field.title,
                "type": "string",
                "description": field.description,
            });
            if field.is_secret() {
                prop["format"] = json!("password");
            }
            properties.insert(field.key.to_string(), prop);
        }

        json!({
            "type": "object",
            "title": self.title,
            "properties": properties,
            "required": self.required_keys(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigSchema {
        ConfigSchema::new(
            "Sample",
            vec![
                ConfigField::text("host", "Host", "Where to connect").required(),
                ConfigField::secret("token", "Token", "API token"),
            ],
        )
    }

    #[test]
    fn json_schema_shape() {
        let schema = sample().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["title"], "Sample");
        assert_eq!(schema["required"], json!(["host"]));
        assert_eq!(schema["properties"]["host"]["title"], "Host");
        assert!(schema["properties"]["host"].get("format").is_none());
        assert_eq!(schema["properties"]["token"]["format"], "password");
    }

    #[test]
    fn lookup_helpers() {
        let schema = sample();
        assert!(schema.is_secret("token"));
        assert!(!schema.is_secret("host"));
        assert!(!schema.is_secret("unknown"));
        assert_eq!(schema.form(), vec!["host", "token"]);
    }
}
