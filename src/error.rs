//! Errors raised while talking to Neo4j or shaping its results.

use thiserror::Error;

/// Everything that can go wrong between issuing the query and handing a
/// model to the canvas.
#[derive(Error, Debug)]
pub enum GraphError {
	/// Transport failure or a non-success HTTP status.
	#[error("HTTP request to Neo4j failed: {0}")]
	Http(#[from] reqwest::Error),
	/// The configured endpoint could not be turned into a URL.
	#[error("invalid Neo4j endpoint: {0}")]
	Url(#[from] url::ParseError),
	/// Neo4j accepted the request but reported a statement error.
	#[error("Neo4j error {code}: {message}")]
	Database {
		/// Neo4j status code, e.g. `Neo.ClientError.Statement.SyntaxError`.
		code: String,
		/// Human readable description from the server.
		message: String,
	},
	/// The response did not have the shape we asked for.
	#[error("unexpected Neo4j response: {0}")]
	Protocol(String),
	/// An entity came back without any labels, so it has no type.
	#[error("entity {element_id} has no labels")]
	MissingLabel {
		/// Database element id of the offending entity.
		element_id: String,
	},
	/// An entity came back without a string or numeric `id` property.
	#[error("entity {element_id} has no usable `id` property")]
	MissingId {
		/// Database element id of the offending entity.
		element_id: String,
	},
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
