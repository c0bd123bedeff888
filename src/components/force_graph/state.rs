use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::camera::{Bounds, CameraTransition, FIT_PADDING, ViewTransform};
use crate::graph::{ColorMap, GraphModel};

/// Categorical palette for link labels and unknown node types.
const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Assigns palette colors to link labels in first-seen order.
#[derive(Default)]
struct AutoColor(HashMap<String, &'static str>);

impl AutoColor {
	fn color_for(&mut self, key: &str) -> String {
		let next = COLORS[self.0.len() % COLORS.len()];
		(*self.0.entry(key.to_string()).or_insert(next)).to_string()
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	camera: Option<CameraTransition>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<NodeInfo, EdgeInfo> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphModel, colors: &ColorMap, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			transform: ViewTransform::centered(width, height),
			camera: None,
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.load(data, colors);
		state
	}

	/// Replace the simulated graph wholesale. The camera stays where it is.
	pub fn load(&mut self, data: &GraphModel, colors: &ColorMap) {
		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::with_capacity(data.links.len());
		let mut link_colors = AutoColor::default();

		for (i, node) in data.nodes.iter().enumerate() {
			let color = colors.get(&node.node_type).unwrap_or(COLORS[0]).to_string();
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.id.clone(),
					color,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				// a spring of zero length has no direction
				if src == tgt {
					continue;
				}
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							label: link.label.clone(),
							color: link_colors.color_for(&link.label),
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Fit every node into the viewport. No-op on an empty graph.
	pub fn zoom_to_fit(&mut self, duration_ms: f64) {
		let mut points = Vec::new();
		self.graph
			.visit_nodes(|node| points.push((node.x() as f64, node.y() as f64)));
		if let Some(bounds) = Bounds::around(points) {
			let target = bounds.fit(self.width, self.height, FIT_PADDING);
			self.animate_to(target, duration_ms);
		}
	}

	/// Scale the view by `factor` about the canvas centre.
	pub fn zoom_to(&mut self, factor: f64, duration_ms: f64) {
		let target = self
			.transform
			.zoomed_at(factor, self.width / 2.0, self.height / 2.0);
		self.animate_to(target, duration_ms);
	}

	/// Wheel zoom about a screen point; takes over from any transition.
	pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64) {
		self.camera = None;
		self.transform = self.transform.zoomed_at(factor, sx, sy);
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.camera = None;
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	#[cfg(test)]
	pub fn camera_target(&self) -> Option<ViewTransform> {
		self.camera.as_ref().map(CameraTransition::target)
	}

	// Later calls replace earlier ones, starting from what is on screen now.
	fn animate_to(&mut self, target: ViewTransform, duration_ms: f64) {
		let mut transition = CameraTransition::new(self.transform, target, duration_ms);
		if duration_ms <= 0.0 {
			self.transform = transition.advance(0.0).0;
			self.camera = None;
		} else {
			self.camera = Some(transition);
		}
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Relationship labels only show on links touching the hovered node.
	pub fn shows_link_label(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> bool {
		self.is_hovered(a) || self.is_hovered(b)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		if let Some(transition) = self.camera.as_mut() {
			let (view, done) = transition.advance(dt as f64);
			self.transform = view;
			if done {
				self.camera = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}
