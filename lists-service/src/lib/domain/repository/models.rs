use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Schema-less document as exchanged with the store.
pub type JsonDocument = Map<String, Value>;

/// Entity that can be persisted through a [`DocumentRepository`].
///
/// The repository generates identifiers on insert and hands them back via
/// `set_id`; implementors serialize that identifier under [`ID_FIELD`].
///
/// [`DocumentRepository`]: super::service::DocumentRepository
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    fn set_id(&mut self, id: String);
}

/// Equality filter over top-level document fields.
///
/// Values are scalars (string, number, bool or null). An empty filter matches
/// every document in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the document identifier.
    pub fn by_id(id: &str) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    /// Require `field` to equal the scalar `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        debug_assert!(
            !value.is_array() && !value.is_object(),
            "filter values must be scalars"
        );
        self.0.insert(field.into(), value);
        self
    }

    /// Identifier this filter pins, if any.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn matches(&self, document: &JsonDocument) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// Subset of fields to return from a read.
///
/// The identifier is always kept when fields are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection(Option<Vec<String>>);

impl Projection {
    /// Whole documents.
    pub fn all() -> Self {
        Self(None)
    }

    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Some(fields.into_iter().map(Into::into).collect()))
    }

    pub fn apply(&self, mut document: JsonDocument) -> JsonDocument {
        if let Some(fields) = &self.0 {
            document
                .retain(|field, _| field == ID_FIELD || fields.iter().any(|kept| kept == field));
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(value: Value) -> JsonDocument {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_filter_matches_all_fields() {
        let doc = document(json!({ "_id": "1", "userId": "u1", "name": "groceries" }));

        assert!(Filter::new().matches(&doc));
        assert!(Filter::by_id("1").matches(&doc));
        assert!(Filter::by_id("1").eq("userId", "u1").matches(&doc));
        assert!(!Filter::by_id("1").eq("userId", "u2").matches(&doc));
        assert!(!Filter::new().eq("missing", "x").matches(&doc));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "filter values must be scalars")]
    fn test_filter_rejects_array_value() {
        let _ = Filter::new().eq("items", json!([]));
    }

    #[test]
    fn test_filter_id() {
        assert_eq!(Filter::by_id("abc").id(), Some("abc"));
        assert_eq!(Filter::new().eq("userName", "alice").id(), None);
    }

    #[test]
    fn test_projection_keeps_id() {
        let doc = document(json!({ "_id": "1", "name": "groceries", "items": [] }));

        let projected = Projection::fields(["name"]).apply(doc);

        assert_eq!(Value::Object(projected), json!({ "_id": "1", "name": "groceries" }));
    }

    #[test]
    fn test_projection_all() {
        let doc = document(json!({ "_id": "1", "name": "groceries" }));

        assert_eq!(Projection::all().apply(doc.clone()), doc);
    }

    #[test]
    fn test_projection_on_id_only() {
        let doc = document(json!({ "_id": "1", "userName": "alice", "passwordHash": "x" }));

        let projected = Projection::fields([ID_FIELD]).apply(doc);

        assert_eq!(Value::Object(projected), json!({ "_id": "1" }));
    }
}
