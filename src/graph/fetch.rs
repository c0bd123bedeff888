use log::{error, info, warn};

use super::model::LoadedGraph;
use super::transform::transform;
use crate::db::Session;

/// Every directed relationship with both endpoints.
pub const ALL_RELATIONSHIPS: &str = "MATCH (n)-[r]->(m) RETURN n, r, m";

/// Run [`ALL_RELATIONSHIPS`] on `session` and shape the result.
///
/// The session is closed on every path. Query and validation failures are
/// logged and reported as `None`; callers keep whatever graph they had.
pub async fn fetch_graph<S: Session>(mut session: S) -> Option<LoadedGraph> {
	let outcome = match session.run(ALL_RELATIONSHIPS).await {
		Ok(records) => transform(&records),
		Err(err) => Err(err),
	};

	if let Err(err) = session.close().await {
		warn!("Failed to close Neo4j session: {err}");
	}

	match outcome {
		Ok(graph) => {
			info!(
				"Loaded {} nodes, {} links, {} node types",
				graph.model.nodes.len(),
				graph.model.links.len(),
				graph.colors.len()
			);
			Some(graph)
		}
		Err(err) => {
			error!("Error querying Neo4j: {err}");
			None
		}
	}
}
