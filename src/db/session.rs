use std::sync::Arc;

use log::debug;
use reqwest::header::ACCEPT;
use url::Url;

use super::record::QueryRecord;
use super::wire::{TxRequest, TxResponse};
use crate::config::Neo4jConfig;
use crate::error::Result;

/// A unit of work against the database. Acquire, `run`, then always `close`.
#[allow(async_fn_in_trait)]
pub trait Session {
	/// Run a parameterless read query and return its rows.
	async fn run(&mut self, query: &str) -> Result<Vec<QueryRecord>>;

	/// Release whatever the session holds on the server.
	async fn close(self) -> Result<()>;
}

/// Session over the HTTP transactional endpoint. The first `run` opens an
/// explicit transaction; `close` discards it.
pub struct HttpSession {
	http: reqwest::Client,
	config: Arc<Neo4jConfig>,
	begin_url: Url,
	transaction: Option<Url>,
}

impl HttpSession {
	pub(crate) fn new(http: reqwest::Client, config: Arc<Neo4jConfig>, begin_url: Url) -> Self {
		Self {
			http,
			config,
			begin_url,
			transaction: None,
		}
	}

	#[cfg(test)]
	pub(crate) fn transaction(&self) -> Option<&Url> {
		self.transaction.as_ref()
	}
}

/// `.../tx/7/commit` -> `.../tx/7`
fn transaction_url(commit: &str) -> Result<Url> {
	Ok(Url::parse(commit.trim_end_matches("/commit"))?)
}

impl Session for HttpSession {
	async fn run(&mut self, query: &str) -> Result<Vec<QueryRecord>> {
		let url = self.transaction.clone().unwrap_or_else(|| self.begin_url.clone());
		let mut response: TxResponse = self
			.http
			.post(url)
			.basic_auth(&self.config.user, Some(&self.config.password))
			.header(ACCEPT, "application/json;charset=UTF-8")
			.json(&TxRequest::graph(query))
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if !response.errors.is_empty() {
			// the server rolls the transaction back on any statement error
			self.transaction = None;
			return Err(response.errors.remove(0).into());
		}
		if let Some(commit) = response.commit.as_deref() {
			self.transaction = Some(transaction_url(commit)?);
		}
		response.into_records()
	}

	async fn close(mut self) -> Result<()> {
		let Some(tx) = self.transaction.take() else {
			return Ok(());
		};
		debug!("Rolling back read transaction {tx}");
		self.http
			.delete(tx)
			.basic_auth(&self.config.user, Some(&self.config.password))
			.header(ACCEPT, "application/json;charset=UTF-8")
			.send()
			.await?
			.error_for_status()?;
		Ok(())
	}
}
