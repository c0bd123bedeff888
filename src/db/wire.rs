//! JSON shapes of Neo4j's HTTP transactional API, requested with
//! `resultDataContents: ["graph"]`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::record::{Entity, QueryRecord, Relationship};
use crate::error::{GraphError, Result};

#[derive(Debug, Serialize)]
pub(crate) struct TxRequest<'a> {
	pub statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statement<'a> {
	pub statement: &'a str,
	pub result_data_contents: [&'static str; 1],
}

impl<'a> TxRequest<'a> {
	pub fn graph(statement: &'a str) -> Self {
		Self {
			statements: vec![Statement {
				statement,
				result_data_contents: ["graph"],
			}],
		}
	}
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TxResponse {
	#[serde(default)]
	pub results: Vec<StatementResult>,
	#[serde(default)]
	pub errors: Vec<TxError>,
	/// Present while the transaction is still open.
	#[serde(default)]
	pub commit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatementResult {
	#[serde(default)]
	pub data: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultRow {
	#[serde(default)]
	pub graph: Option<RowGraph>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RowGraph {
	#[serde(default)]
	pub nodes: Vec<WireNode>,
	#[serde(default)]
	pub relationships: Vec<WireRelationship>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireNode {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default)]
	pub element_id: Option<String>,
	#[serde(default)]
	pub labels: Vec<String>,
	#[serde(default)]
	pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRelationship {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default)]
	pub element_id: Option<String>,
	#[serde(rename = "type")]
	pub rel_type: String,
	#[serde(deserialize_with = "string_or_number")]
	pub start_node: String,
	#[serde(deserialize_with = "string_or_number")]
	pub end_node: String,
	#[serde(default)]
	pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TxError {
	pub code: String,
	#[serde(default)]
	pub message: String,
}

impl From<TxError> for GraphError {
	fn from(err: TxError) -> Self {
		GraphError::Database {
			code: err.code,
			message: err.message,
		}
	}
}

// Older servers send internal ids as numbers, newer ones as strings.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		other => Err(serde::de::Error::custom(format!(
			"expected string or number id, got {other}"
		))),
	}
}

impl WireNode {
	fn into_entity(self) -> Entity {
		Entity {
			element_id: self.element_id.unwrap_or(self.id),
			labels: self.labels,
			properties: self.properties,
		}
	}
}

impl WireRelationship {
	fn into_relationship(self) -> Relationship {
		Relationship {
			element_id: self.element_id.unwrap_or(self.id),
			rel_type: self.rel_type,
			properties: self.properties,
		}
	}
}

impl RowGraph {
	/// Rebuild the `(n)-[r]->(m)` triple. The row's graph section holds the
	/// distinct nodes of the row (one for a self loop) and its relationship.
	fn into_record(self) -> Result<QueryRecord> {
		let RowGraph {
			nodes,
			mut relationships,
		} = self;
		if relationships.len() != 1 {
			return Err(GraphError::Protocol(format!(
				"expected one relationship per row, got {}",
				relationships.len()
			)));
		}
		let rel = relationships.remove(0);
		let find = |id: &str| {
			nodes
				.iter()
				.find(|n| n.id == id)
				.cloned()
				.ok_or_else(|| GraphError::Protocol(format!("row is missing node {id}")))
		};
		let source = find(&rel.start_node)?.into_entity();
		let target = find(&rel.end_node)?.into_entity();
		Ok(QueryRecord {
			source,
			relationship: rel.into_relationship(),
			target,
		})
	}
}

impl TxResponse {
	/// Records of the first (and only) statement, in server order.
	pub fn into_records(self) -> Result<Vec<QueryRecord>> {
		let Some(result) = self.results.into_iter().next() else {
			return Ok(Vec::new());
		};
		result
			.data
			.into_iter()
			.map(|row| {
				row.graph
					.ok_or_else(|| GraphError::Protocol("row without graph section".into()))?
					.into_record()
			})
			.collect()
	}
}
