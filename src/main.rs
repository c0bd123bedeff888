use leptos::prelude::*;
use neo4j_graph_canvas::config::Neo4jConfig;
use neo4j_graph_canvas::db::Neo4jClient;
use neo4j_graph_canvas::{App, init_logging};

fn main() {
	init_logging();

	let config = Neo4jConfig::from_build_env();
	let client = match Neo4jClient::new(config) {
		Ok(client) => client,
		Err(err) => {
			log::error!("Cannot build Neo4j client: {err}");
			return;
		}
	};
	log::info!("Using Neo4j at {}", client.config().http_url);

	mount_to_body(move || view! { <App client=client /> });
}
