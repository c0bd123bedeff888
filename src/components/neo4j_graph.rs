use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};

use super::force_graph::{ForceGraphCanvas, ForceGraphHandle};
use super::icons::{HomeIcon, ZoomInIcon, ZoomOutIcon};
use crate::db::{Neo4jClient, Session};
use crate::graph::{ColorMap, GraphModel, fetch_graph};

pub const TRANSITION_MS: f64 = 400.0;
pub const ZOOM_IN: f64 = 1.2;
pub const ZOOM_OUT: f64 = 0.8;

async fn load_graph<S: Session>(
	session: S,
	data: RwSignal<GraphModel>,
	colors: RwSignal<ColorMap>,
) {
	let Some(graph) = fetch_graph(session).await else {
		return;
	};
	// the screen may be gone by the time Neo4j answers
	if colors.try_set(graph.colors).is_some() || data.try_set(graph.model).is_some() {
		debug!("Graph screen unmounted before the query finished; result dropped");
	}
}

/// Whole-database graph view with home / zoom controls.
///
/// Expects a [`Neo4jClient`] in context. The query runs once, when the
/// component is created; until it answers (or if it fails) the graph is
/// empty.
#[component]
pub fn Neo4jGraph(width: f64, height: f64) -> impl IntoView {
	let data = RwSignal::new(GraphModel::default());
	let colors = RwSignal::new(ColorMap::default());
	let graph = ForceGraphHandle::new();

	match use_context::<Neo4jClient>() {
		Some(client) => spawn_local(load_graph(client.session(), data, colors)),
		None => error!("No Neo4jClient in context; graph stays empty"),
	}

	let (home, zoom_in, zoom_out) = (graph.clone(), graph.clone(), graph.clone());

	view! {
		<div class="graph-panel">
			<div class="graph-frame">
				<ForceGraphCanvas data=data colors=colors width=width height=height handle=graph />
				<div class="graph-controls">
					<button class="graph-control" on:click=move |_| home.zoom_to_fit(TRANSITION_MS)>
						<HomeIcon />
					</button>
					<button class="graph-control" on:click=move |_| zoom_in.zoom_to(ZOOM_IN, TRANSITION_MS)>
						<ZoomInIcon />
					</button>
					<button class="graph-control" on:click=move |_| zoom_out.zoom_to(ZOOM_OUT, TRANSITION_MS)>
						<ZoomOutIcon />
					</button>
				</div>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::db::mock::{MockSession, knows};

	#[test]
	fn result_lands_in_live_signals() {
		let owner = Owner::new();
		let (data, colors) = owner.with(|| {
			(
				RwSignal::new(GraphModel::default()),
				RwSignal::new(ColorMap::default()),
			)
		});
		let (session, log) = MockSession::returning(vec![knows("A", "B")]);

		block_on(load_graph(session, data, colors));

		assert_eq!(data.get_untracked().nodes.len(), 2);
		assert_eq!(colors.get_untracked().get("Person"), Some("hsl(0, 70%, 50%)"));
		assert!(log.closed.get());
	}

	#[test]
	fn result_after_unmount_is_dropped() {
		let owner = Owner::new();
		let (data, colors) = owner.with(|| {
			(
				RwSignal::new(GraphModel::default()),
				RwSignal::new(ColorMap::default()),
			)
		});
		data.dispose();
		colors.dispose();
		drop(owner);
		let (session, log) = MockSession::returning(vec![knows("A", "B")]);

		block_on(load_graph(session, data, colors));

		assert!(data.try_get_untracked().is_none());
		assert!(log.closed.get());
	}

	#[test]
	fn failed_query_leaves_the_empty_graph() {
		let owner = Owner::new();
		let (data, colors) = owner.with(|| {
			(
				RwSignal::new(GraphModel::default()),
				RwSignal::new(ColorMap::default()),
			)
		});
		let (session, log) = MockSession::failing();

		block_on(load_graph(session, data, colors));

		assert_eq!(data.get_untracked(), GraphModel::default());
		assert!(colors.get_untracked().is_empty());
		assert!(log.closed.get());
	}
}
