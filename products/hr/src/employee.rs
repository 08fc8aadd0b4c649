use platform_store::{
    ID_FIELD,
    bson::{Bson, Document},
    id_to_string,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A directory entry as returned to clients. The store enforces no schema,
/// so everything but `id` may be absent. Unknown fields, and known fields
/// holding a value of another type, ride along untouched in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    /// Normalizes a stored document and reads it into a record. Never fails:
    /// a field whose value does not fit its typed slot is kept in `extra`.
    pub fn from_document(document: Document) -> Self {
        let mut fields = normalize_document(document);
        let mut employee = Employee {
            id: take(&mut fields, "id", string).unwrap_or_default(),
            first_name: take(&mut fields, "firstName", string),
            last_name: take(&mut fields, "lastName", string),
            full_name: take(&mut fields, "full_name", string),
            title: take(&mut fields, "title", string),
            department: take(&mut fields, "department", string),
            email: take(&mut fields, "email", string),
            phone: take(&mut fields, "phone", string),
            office: take(&mut fields, "office", string),
            location: take(&mut fields, "location", string),
            photo_url: take(&mut fields, "photoUrl", string),
            bio: take(&mut fields, "bio", string),
            tags: take(&mut fields, "tags", string_list),
            is_active: take(&mut fields, "isActive", Bson::as_bool),
            extra: Map::new(),
        };
        employee.extra = fields
            .into_iter()
            .map(|(key, value)| (key, plain_json(value)))
            .collect();
        employee
    }
}

/// Removes `key` from `fields` only when `pick` accepts its value.
fn take<T>(fields: &mut Document, key: &str, pick: impl Fn(&Bson) -> Option<T>) -> Option<T> {
    let value = fields.get(key).and_then(pick)?;
    fields.remove(key);
    Some(value)
}

fn string(value: &Bson) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn string_list(value: &Bson) -> Option<Vec<String>> {
    match value {
        Bson::Array(items) => items.iter().map(string).collect(),
        _ => None,
    }
}

/// JSON form of a stored value: identifiers as hex strings, dates as
/// RFC 3339 strings, numbers as numbers. Exotic types fall back to relaxed
/// extended JSON.
fn plain_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::String(text) => Value::String(text),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(at) => Value::String(
            at.try_to_rfc3339_string()
                .unwrap_or_else(|_| at.to_string()),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(plain_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, plain_json(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

/// Moves the store identifier into a string `id` field and drops `_id`.
/// Documents without `_id` keep their `id`, so running this twice is a no-op.
pub fn normalize_document(mut document: Document) -> Document {
    match document.remove(ID_FIELD) {
        Some(raw) => {
            document.insert("id", id_to_string(&raw));
        }
        None => {
            if let Some(id) = document.get("id").filter(|id| !matches!(id, Bson::String(_))) {
                let id = id_to_string(id);
                document.insert("id", id);
            }
        }
    }
    document
}
