use leptos::prelude::*;

use crate::components::neo4j_graph::Neo4jGraph;

const GRAPH_WIDTH: f64 = 1100.0;
const GRAPH_HEIGHT: f64 = 700.0;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! { <Neo4jGraph width=GRAPH_WIDTH height=GRAPH_HEIGHT /> }
}
