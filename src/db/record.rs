use serde_json::{Map, Value};

/// A database node as it comes back from a query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entity {
	/// Database-assigned identifier, only used for diagnostics.
	pub element_id: String,
	/// Type labels in the order the server reports them.
	pub labels: Vec<String>,
	/// Property bag; the application key is `id`.
	pub properties: Map<String, Value>,
}

impl Entity {
	/// The entity type is its first label.
	pub fn primary_label(&self) -> Option<&str> {
		self.labels.first().map(String::as_str)
	}

	/// Application id from the `id` property. Strings are taken as-is and
	/// numbers in their JSON form; anything else counts as missing.
	pub fn id(&self) -> Option<String> {
		match self.properties.get("id")? {
			Value::String(s) => Some(s.clone()),
			Value::Number(n) => Some(n.to_string()),
			_ => None,
		}
	}
}

/// A directed, typed edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relationship {
	/// Database-assigned identifier.
	pub element_id: String,
	/// Relationship type, e.g. `KNOWS`.
	pub rel_type: String,
	/// Property bag.
	pub properties: Map<String, Value>,
}

/// One `(n)-[r]->(m)` row.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRecord {
	/// `n`
	pub source: Entity,
	/// `r`
	pub relationship: Relationship,
	/// `m`
	pub target: Entity,
}
