use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single plugin configuration value.
///
/// The backend stores option values loosely typed; a value is a boolean, a
/// number, a string, or a list of strings depending on the option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Plugin configuration: option name to value. Options the plugin has not
/// set are simply missing from the map.
pub type PluginConfig = BTreeMap<String, ConfigValue>;

/// One author entry from a plugin manifest, either a bare display string or
/// a structured contact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Contact {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

/// The `author`/`authors` manifest fields accept a single entry or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    One(Author),
    Many(Vec<Author>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// Descriptive metadata bundled with a plugin manifest.
///
/// Every field is optional: a missing field means the plugin simply does not
/// declare it. Manifests in the wild use both `description` and `desc`, and
/// both `author` and `authors`, so all four are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<AuthorField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<PluginUrls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depend_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

/// The metadata slot on [`Plugin`] and [`MarketItem`].
///
/// The backend emits either a full [`PluginMeta`] object or the literal
/// string `"None"` as a no-metadata marker. The marker is part of the wire
/// contract and round-trips unchanged instead of being rewritten to null.
/// JSON null and an absent key both surface as `Option::None` on the
/// enclosing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaField {
    Meta(PluginMeta),
    Marker(MetaMarker),
}

/// The literal `"None"` marker the backend uses in place of metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaMarker {
    None,
}

impl MetaField {
    /// Actual metadata, if this slot carries any.
    pub fn as_meta(&self) -> Option<&PluginMeta> {
        match self {
            MetaField::Meta(meta) => Some(meta),
            MetaField::Marker(_) => None,
        }
    }
}

/// An installed or known plugin as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    pub id: String,
    pub title: String,
    pub desc: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Enabled flag.
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<PluginUrls>,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

/// A [`Plugin`] extended with the presentation fields the frontend layers on
/// top: whether the plugin exposes configuration, and its current values.
/// On the wire this is one flat object, not a nested one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginItem {
    #[serde(flatten)]
    pub plugin: Plugin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PluginConfig>,
}

/// A plugin entry from the remote marketplace registry.
///
/// Independent of the installed-plugin set: `full_name` is the
/// registry-qualified identifier used for install operations, and the
/// `installed` flag reflects the marketplace's own view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketItem {
    pub name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub version: String,
    /// Last-update timestamp as the registry reports it, verbatim.
    pub updated: String,
    pub tags: Vec<String>,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaField>,
}

impl MarketItem {
    /// Parse the `updated` string as an RFC 3339 timestamp.
    /// Returns `None` when the registry sent something else.
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated).ok()
    }
}

/// Partial plugin update accepted by the save operation. Absent fields are
/// omitted from the request body and left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PluginConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_plugin() -> serde_json::Value {
        json!({
            "name": "echo",
            "id": "plugin.echo",
            "title": "Echo",
            "desc": "Echoes requests back",
            "version": "1.2.0",
            "status": true,
            "installed": true,
        })
    }

    fn plugin_with_meta(meta: serde_json::Value) -> serde_json::Value {
        let mut value = base_plugin();
        value["meta"] = meta;
        value
    }

    #[test]
    fn meta_object_deserializes() {
        let plugin: Plugin = serde_json::from_value(plugin_with_meta(json!({
            "name": "echo",
            "license": "MIT",
            "depend_services": ["queue"],
        })))
        .unwrap();

        let meta = plugin.meta.as_ref().and_then(MetaField::as_meta).unwrap();
        assert_eq!(meta.name.as_deref(), Some("echo"));
        assert_eq!(meta.license.as_deref(), Some("MIT"));
        assert_eq!(
            meta.depend_services.as_deref(),
            Some(&["queue".to_string()][..])
        );
    }

    #[test]
    fn meta_marker_round_trips() {
        let plugin: Plugin = serde_json::from_value(plugin_with_meta(json!("None"))).unwrap();
        assert_eq!(plugin.meta, Some(MetaField::Marker(MetaMarker::None)));
        assert!(plugin.meta.as_ref().unwrap().as_meta().is_none());

        // The marker must re-serialize as the same literal string.
        let value = serde_json::to_value(&plugin).unwrap();
        assert_eq!(value["meta"], json!("None"));
    }

    #[test]
    fn meta_null_and_absent_are_none() {
        let with_null: Plugin = serde_json::from_value(plugin_with_meta(json!(null))).unwrap();
        assert!(with_null.meta.is_none());

        let without: Plugin = serde_json::from_value(base_plugin()).unwrap();
        assert!(without.meta.is_none());
    }

    #[test]
    fn meta_rejects_other_strings() {
        let result = serde_json::from_value::<Plugin>(plugin_with_meta(json!("nope")));
        assert!(result.is_err());
    }

    #[test]
    fn author_field_accepts_all_shapes() {
        let meta: PluginMeta = serde_json::from_value(json!({
            "author": "ada",
            "authors": [
                "grace",
                {"name": "linus", "email": "linus@example.com"},
                {"email": "anon@example.com"},
            ],
        }))
        .unwrap();

        assert_eq!(
            meta.author,
            Some(AuthorField::One(Author::Text("ada".into())))
        );
        match meta.authors.unwrap() {
            AuthorField::Many(list) => {
                assert_eq!(list.len(), 3);
                assert_eq!(list[0], Author::Text("grace".into()));
                assert_eq!(
                    list[1],
                    Author::Contact {
                        name: Some("linus".into()),
                        email: Some("linus@example.com".into()),
                    }
                );
                assert_eq!(
                    list[2],
                    Author::Contact {
                        name: None,
                        email: Some("anon@example.com".into()),
                    }
                );
            }
            other => panic!("expected list of authors, got {other:?}"),
        }
    }

    #[test]
    fn config_values_keep_their_kind() {
        let config: PluginConfig = serde_json::from_value(json!({
            "enabled": true,
            "threshold": 0.75,
            "label": "primary",
            "hosts": ["a.internal", "b.internal"],
        }))
        .unwrap();

        assert_eq!(config["enabled"], ConfigValue::Bool(true));
        assert_eq!(config["threshold"], ConfigValue::Number(0.75));
        assert_eq!(config["label"], ConfigValue::Text("primary".into()));
        assert_eq!(
            config["hosts"],
            ConfigValue::List(vec!["a.internal".into(), "b.internal".into()])
        );
    }

    #[test]
    fn plugin_item_is_flat_on_the_wire() {
        let item: PluginItem = serde_json::from_value(json!({
            "name": "echo",
            "id": "plugin.echo",
            "title": "Echo",
            "desc": "Echoes requests back",
            "version": "1.2.0",
            "status": false,
            "installed": true,
            "configurable": true,
            "config": {"level": "verbose"},
        }))
        .unwrap();

        assert_eq!(item.plugin.name, "echo");
        assert!(!item.plugin.status);
        assert_eq!(item.configurable, Some(true));
        let config = item.config.as_ref().unwrap();
        assert_eq!(config["level"], ConfigValue::Text("verbose".into()));

        // And back out again: one flat object, no nesting.
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["name"], "echo");
        assert!(value.get("plugin").is_none());
    }

    #[test]
    fn market_item_uses_camel_case_full_name() {
        let item: MarketItem = serde_json::from_value(json!({
            "name": "echo",
            "fullName": "registry/echo",
            "desc": "Echoes requests back",
            "version": "2.0.1",
            "updated": "2025-11-03T09:30:00+00:00",
            "tags": ["utility"],
            "installed": false,
        }))
        .unwrap();

        assert_eq!(item.full_name, "registry/echo");
        assert_eq!(
            item.updated_at().map(|t| t.to_rfc3339()),
            Some("2025-11-03T09:30:00+00:00".to_string())
        );

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["fullName"], "registry/echo");
    }

    #[test]
    fn market_updated_tolerates_junk() {
        let item: MarketItem = serde_json::from_value(json!({
            "name": "echo",
            "fullName": "registry/echo",
            "desc": "d",
            "version": "2.0.1",
            "updated": "3 days ago",
            "tags": [],
            "installed": false,
        }))
        .unwrap();

        assert_eq!(item.updated, "3 days ago");
        assert!(item.updated_at().is_none());
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = PluginPatch {
            name: Some("echo".into()),
            status: Some(true),
            ..PluginPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"name": "echo", "status": true}));
    }
}
