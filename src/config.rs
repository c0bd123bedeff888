//! Connection settings for the Neo4j HTTP endpoint.

use log::warn;
use serde::Deserialize;
use url::Url;

use crate::error::Result;

/// Where and how to reach Neo4j. Fixed once the client is built.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Neo4jConfig {
	/// Base URL of the HTTP API, e.g. `http://localhost:7474`.
	pub http_url: String,
	/// Database name used in the transaction path.
	pub database: String,
	/// Basic auth user.
	pub user: String,
	/// Basic auth password.
	pub password: String,
}

impl Default for Neo4jConfig {
	fn default() -> Self {
		Self {
			http_url: "http://localhost:7474".into(),
			database: "neo4j".into(),
			user: "neo4j".into(),
			password: "Testtest".into(),
		}
	}
}

impl Neo4jConfig {
	/// Defaults overridden by `NEO4J_*` variables present when the crate was
	/// compiled. The browser has no process environment, so this is the only
	/// env-driven source.
	///
	/// `NEO4J_CONFIG` may hold a JSON object as the base; the single-key
	/// variables win over it.
	pub fn from_build_env() -> Self {
		let mut config = match option_env!("NEO4J_CONFIG") {
			Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
				warn!("Ignoring NEO4J_CONFIG: {err}");
				Self::default()
			}),
			None => Self::default(),
		};
		if let Some(url) = option_env!("NEO4J_HTTP_URL") {
			config.http_url = url.into();
		}
		if let Some(database) = option_env!("NEO4J_DATABASE") {
			config.database = database.into();
		}
		if let Some(user) = option_env!("NEO4J_USER") {
			config.user = user.into();
		}
		if let Some(password) = option_env!("NEO4J_PASSWORD") {
			config.password = password.into();
		}
		config
	}

	/// Parse a (possibly partial) JSON object; missing keys keep defaults.
	pub fn from_json(raw: &str) -> serde_json::Result<Self> {
		serde_json::from_str(raw)
	}

	/// Endpoint that opens a new explicit transaction.
	pub fn begin_url(&self) -> Result<Url> {
		let base = format!("{}/", self.http_url.trim_end_matches('/'));
		Ok(Url::parse(&base)?.join(&format!("db/{}/tx", self.database))?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn begin_url_tolerates_trailing_slash() {
		let mut config = Neo4jConfig::default();
		assert_eq!(
			config.begin_url().unwrap().as_str(),
			"http://localhost:7474/db/neo4j/tx"
		);

		config.http_url = "https://graph.internal:7473/".into();
		config.database = "movies".into();
		assert_eq!(
			config.begin_url().unwrap().as_str(),
			"https://graph.internal:7473/db/movies/tx"
		);
	}

	#[test]
	fn begin_url_rejects_garbage() {
		let config = Neo4jConfig {
			http_url: "not a url".into(),
			..Default::default()
		};
		assert!(config.begin_url().is_err());
	}

	#[test]
	fn build_env_falls_back_to_defaults() {
		let overridden = [
			option_env!("NEO4J_CONFIG"),
			option_env!("NEO4J_HTTP_URL"),
			option_env!("NEO4J_DATABASE"),
			option_env!("NEO4J_USER"),
			option_env!("NEO4J_PASSWORD"),
		];
		if overridden.iter().all(Option::is_none) {
			assert_eq!(Neo4jConfig::from_build_env(), Neo4jConfig::default());
		}
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = Neo4jConfig::from_json(r#"{"database": "pipelines"}"#).unwrap();
		assert_eq!(config.database, "pipelines");
		assert_eq!(config.http_url, "http://localhost:7474");
		assert_eq!(config.user, "neo4j");
	}
}
