use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Open property bag attached to a resource
///
/// Values are dynamic JSON: string, number, bool, null, object or array.
pub type Properties = Map<String, Value>;

/// Resource entity
///
/// # Invariants
/// - `id` is generated on construction and never supplied by clients
/// - `name` is unique across resources (enforced by the handlers and storage)
///
/// # Example
/// ```
/// use resource_api::domain::resource::{Properties, Resource};
///
/// let resource = Resource::new("widget".to_string(), Properties::new());
/// assert_eq!(resource.name(), "widget");
/// assert!(!resource.id().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    id: String,
    name: String,
    #[serde(default)]
    properties: Properties,
}

impl Resource {
    /// Creates a new resource with a freshly generated id
    pub fn new(name: String, properties: Properties) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// Partial update of a resource
///
/// Only fields that are `Some` are written. A supplied `properties` map
/// replaces the stored map as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn new_resources_get_distinct_ids() {
        let a = Resource::new("a".to_string(), Properties::new());
        let b = Resource::new("a".to_string(), Properties::new());
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn serializes_as_flat_record() {
        let resource = Resource::new(
            "widget".to_string(),
            props(json!({"color": "red", "tags": ["a", 1, null]})),
        );

        let value = serde_json::to_value(&resource).expect("serialize");
        assert_eq!(
            value,
            json!({"id": resource.id(), "name": "widget", "properties": {"color": "red", "tags": ["a", 1, null]}})
        );

        let back: Resource = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, resource);
    }

    #[test]
    fn missing_properties_deserialize_as_empty() {
        let resource: Resource =
            serde_json::from_value(json!({"id": "r-1", "name": "bare"})).expect("deserialize");
        assert!(resource.properties().is_empty());
    }

    #[test]
    fn empty_changes_serialize_to_empty_object() {
        let changes = ResourceChanges::default();
        assert_eq!(serde_json::to_value(&changes).expect("serialize"), json!({}));
    }

    #[test]
    fn property_changes_serialize_under_properties_key() {
        let changes = ResourceChanges {
            properties: Some(props(json!({"x": 1}))),
        };
        assert_eq!(
            serde_json::to_value(&changes).expect("serialize"),
            json!({"properties": {"x": 1}})
        );
    }
}
