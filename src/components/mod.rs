pub mod force_graph;
pub mod icons;
pub mod neo4j_graph;
