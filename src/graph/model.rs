use indexmap::IndexMap;

/// Degrees between consecutive type hues. Only three hues exist before the
/// cycle repeats.
pub const HUE_STEP: u32 = 120;

/// A deduplicated database entity, keyed by its `id` property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Application id of the entity; also its label on screen.
	pub id: String,
	/// Primary label at the entity's first appearance.
	pub node_type: String,
}

/// One relationship row. Parallel relationships stay separate links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Relationship type.
	pub label: String,
}

/// Render-ready aggregate handed to the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphModel {
	/// Nodes in first-seen order.
	pub nodes: Vec<GraphNode>,
	/// Links in record order.
	pub links: Vec<GraphLink>,
}

impl GraphModel {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

/// Node type to CSS color, in first-seen type order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorMap(IndexMap<String, String>);

impl ColorMap {
	/// Assign `hsl((k * 120) mod 360, 70%, 50%)` to the k-th type.
	pub fn from_types<I, S>(types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut colors = IndexMap::new();
		for ty in types {
			let ty = ty.into();
			if colors.contains_key(&ty) {
				continue;
			}
			let hue = (colors.len() as u32 * HUE_STEP) % 360;
			colors.insert(ty, format!("hsl({hue}, 70%, 50%)"));
		}
		Self(colors)
	}

	/// Color for a node type, if the type was seen.
	pub fn get(&self, node_type: &str) -> Option<&str> {
		self.0.get(node_type).map(String::as_str)
	}

	/// Number of distinct types.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when no types were seen.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `(type, color)` pairs in assignment order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// What one fetch produces: the model and the colors for its types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedGraph {
	/// Nodes and links.
	pub model: GraphModel,
	/// Per-type colors.
	pub colors: ColorMap,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hues_step_by_120_and_wrap() {
		let colors = ColorMap::from_types(["Person", "Company", "City", "Country"]);
		let assigned: Vec<_> = colors.iter().collect();
		assert_eq!(
			assigned,
			vec![
				("Person", "hsl(0, 70%, 50%)"),
				("Company", "hsl(120, 70%, 50%)"),
				("City", "hsl(240, 70%, 50%)"),
				// fourth type collides with the first
				("Country", "hsl(0, 70%, 50%)"),
			]
		);
	}

	#[test]
	fn repeated_types_keep_first_slot() {
		let colors = ColorMap::from_types(["B", "A", "B", "C"]);
		assert_eq!(colors.len(), 3);
		assert_eq!(colors.get("A"), Some("hsl(120, 70%, 50%)"));
		assert_eq!(colors.get("C"), Some("hsl(240, 70%, 50%)"));
		assert_eq!(colors.get("D"), None);
	}
}
