use indexmap::{IndexMap, IndexSet};

use super::model::{ColorMap, GraphLink, GraphModel, GraphNode, LoadedGraph};
use crate::db::{Entity, QueryRecord};
use crate::error::{GraphError, Result};

/// Entity id and type (`labels[0]`), or a validation error.
fn identify(entity: &Entity) -> Result<(String, &str)> {
	let node_type = entity
		.primary_label()
		.ok_or_else(|| GraphError::MissingLabel {
			element_id: entity.element_id.clone(),
		})?;
	let id = entity.id().ok_or_else(|| GraphError::MissingId {
		element_id: entity.element_id.clone(),
	})?;
	Ok((id, node_type))
}

/// Fold relationship rows into a deduplicated model plus type colors.
///
/// A node keeps the type it had the first time its id appeared, whether as
/// source or target. Every record yields exactly one link.
pub fn transform(records: &[QueryRecord]) -> Result<LoadedGraph> {
	let mut nodes: IndexMap<String, GraphNode> = IndexMap::new();
	let mut types: IndexSet<&str> = IndexSet::new();
	let mut links = Vec::with_capacity(records.len());

	for record in records {
		let (source_id, source_type) = identify(&record.source)?;
		let (target_id, target_type) = identify(&record.target)?;

		for (id, node_type) in [(&source_id, source_type), (&target_id, target_type)] {
			nodes.entry(id.clone()).or_insert_with(|| GraphNode {
				id: id.clone(),
				node_type: node_type.to_string(),
			});
		}
		types.insert(source_type);
		types.insert(target_type);

		links.push(GraphLink {
			source: source_id,
			target: target_id,
			label: record.relationship.rel_type.clone(),
		});
	}

	Ok(LoadedGraph {
		colors: ColorMap::from_types(types),
		model: GraphModel {
			nodes: nodes.into_values().collect(),
			links,
		},
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use serde_json::{Map, Value, json};

	use super::*;
	use crate::db::Relationship;

	fn entity(id: Value, labels: &[&str]) -> Entity {
		let mut properties = Map::new();
		if !id.is_null() {
			properties.insert("id".into(), id);
		}
		Entity {
			element_id: format!("el-{}", labels.join(":")),
			labels: labels.iter().map(|l| l.to_string()).collect(),
			properties,
		}
	}

	fn record(src: (&str, &str), rel: &str, tgt: (&str, &str)) -> QueryRecord {
		QueryRecord {
			source: entity(json!(src.0), &[src.1]),
			relationship: Relationship {
				rel_type: rel.into(),
				..Default::default()
			},
			target: entity(json!(tgt.0), &[tgt.1]),
		}
	}

	fn node(id: &str, ty: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			node_type: ty.into(),
		}
	}

	fn link(source: &str, target: &str, label: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		}
	}

	#[test]
	fn person_company_scenario() {
		let records = [
			record(("A", "Person"), "KNOWS", ("B", "Person")),
			record(("B", "Person"), "WORKS_AT", ("C", "Company")),
		];
		let graph = transform(&records).unwrap();

		assert_eq!(
			graph.model.nodes,
			vec![node("A", "Person"), node("B", "Person"), node("C", "Company")]
		);
		assert_eq!(
			graph.model.links,
			vec![link("A", "B", "KNOWS"), link("B", "C", "WORKS_AT")]
		);
		assert_eq!(graph.colors.len(), 2);
		assert_eq!(graph.colors.get("Person"), Some("hsl(0, 70%, 50%)"));
		assert_eq!(graph.colors.get("Company"), Some("hsl(120, 70%, 50%)"));
	}

	#[test]
	fn empty_result_is_an_empty_graph() {
		let graph = transform(&[]).unwrap();
		assert!(graph.model.is_empty());
		assert!(graph.colors.is_empty());
	}

	#[test]
	fn first_appearance_fixes_the_type() {
		let mut later = record(("X", "Robot"), "BUILT", ("Y", "Factory"));
		later.source.labels = vec!["Android".into(), "Robot".into()];
		let records = [
			record(("Y", "Factory"), "OWNS", ("X", "Robot")),
			later,
		];
		let graph = transform(&records).unwrap();

		assert_eq!(
			graph.model.nodes,
			vec![node("Y", "Factory"), node("X", "Robot")]
		);
		// the later label still counts as a seen type
		let seen: Vec<_> = graph.colors.iter().map(|(ty, _)| ty).collect();
		assert_eq!(seen, vec!["Factory", "Robot", "Android"]);
	}

	#[test]
	fn parallel_relationships_are_not_merged() {
		let records = [
			record(("A", "P"), "KNOWS", ("B", "P")),
			record(("A", "P"), "KNOWS", ("B", "P")),
			record(("B", "P"), "KNOWS", ("A", "P")),
		];
		let graph = transform(&records).unwrap();
		assert_eq!(graph.model.links.len(), records.len());
		assert_eq!(graph.model.nodes.len(), 2);
	}

	#[test]
	fn node_count_matches_distinct_ids_and_links_resolve() {
		let records = [
			record(("1", "A"), "R", ("2", "B")),
			record(("3", "C"), "R", ("3", "C")),
			record(("2", "B"), "S", ("4", "D")),
			record(("4", "D"), "R", ("1", "A")),
		];
		let graph = transform(&records).unwrap();

		let distinct: HashSet<_> = records
			.iter()
			.flat_map(|r| [r.source.id(), r.target.id()])
			.collect();
		assert_eq!(graph.model.nodes.len(), distinct.len());

		let ids: HashSet<_> = graph.model.nodes.iter().map(|n| n.id.as_str()).collect();
		for l in &graph.model.links {
			assert!(ids.contains(l.source.as_str()));
			assert!(ids.contains(l.target.as_str()));
		}
		// the fourth type wraps back to hue 0
		assert_eq!(graph.colors.get("D"), Some("hsl(0, 70%, 50%)"));
	}

	#[test]
	fn numeric_ids_are_stringified() {
		let mut r = record(("A", "P"), "R", ("B", "P"));
		r.source.properties.insert("id".into(), json!(7));
		let graph = transform(&[r]).unwrap();
		assert_eq!(graph.model.nodes[0].id, "7");
		assert_eq!(graph.model.links[0].source, "7");
	}

	#[test]
	fn unlabelled_entity_is_rejected() {
		let mut r = record(("A", "P"), "R", ("B", "P"));
		r.target.labels.clear();
		r.target.element_id = "4:x:9".into();
		let err = transform(&[r]).unwrap_err();
		assert!(matches!(err, GraphError::MissingLabel { element_id } if element_id == "4:x:9"));
	}

	#[test]
	fn entity_without_id_is_rejected() {
		let mut r = record(("A", "P"), "R", ("B", "P"));
		r.source = entity(Value::Null, &["P"]);
		assert!(matches!(
			transform(&[r]).unwrap_err(),
			GraphError::MissingId { .. }
		));

		let mut r = record(("A", "P"), "R", ("B", "P"));
		r.source.properties.insert("id".into(), json!(true));
		assert!(matches!(
			transform(&[r]).unwrap_err(),
			GraphError::MissingId { .. }
		));
	}
}
