use std::sync::Arc;

use url::Url;

use super::session::HttpSession;
use crate::config::Neo4jConfig;
use crate::error::Result;

/// Long-lived handle to one Neo4j server. Build it once at startup and
/// share it through context; cloning is cheap.
#[derive(Clone, Debug)]
pub struct Neo4jClient {
	http: reqwest::Client,
	config: Arc<Neo4jConfig>,
	begin_url: Url,
}

impl Neo4jClient {
	/// Validate the endpoint and set up the HTTP client.
	pub fn new(config: Neo4jConfig) -> Result<Self> {
		let begin_url = config.begin_url()?;
		Ok(Self {
			http: reqwest::Client::new(),
			config: Arc::new(config),
			begin_url,
		})
	}

	/// The settings this client was built with.
	pub fn config(&self) -> &Neo4jConfig {
		&self.config
	}

	/// Open a new session. Nothing is sent until the first query.
	pub fn session(&self) -> HttpSession {
		HttpSession::new(
			self.http.clone(),
			self.config.clone(),
			self.begin_url.clone(),
		)
	}
}
