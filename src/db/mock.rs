//! In-memory `Session` for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::json;

use super::record::{Entity, QueryRecord, Relationship};
use super::session::Session;
use crate::error::{GraphError, Result};

/// What a [`MockSession`] saw, kept after the session is consumed.
#[derive(Default)]
pub(crate) struct SessionLog {
	pub closed: Cell<bool>,
	pub queries: RefCell<Vec<String>>,
}

pub(crate) struct MockSession {
	log: Rc<SessionLog>,
	rows: Option<Vec<QueryRecord>>,
	pub fail_close: bool,
}

impl MockSession {
	pub fn returning(rows: Vec<QueryRecord>) -> (Self, Rc<SessionLog>) {
		let log = Rc::new(SessionLog::default());
		let session = Self {
			log: log.clone(),
			rows: Some(rows),
			fail_close: false,
		};
		(session, log)
	}

	/// Every `run` fails as if the database were down.
	pub fn failing() -> (Self, Rc<SessionLog>) {
		let (mut session, log) = Self::returning(Vec::new());
		session.rows = None;
		(session, log)
	}
}

impl Session for MockSession {
	async fn run(&mut self, query: &str) -> Result<Vec<QueryRecord>> {
		self.log.queries.borrow_mut().push(query.to_string());
		self.rows.take().ok_or_else(|| GraphError::Database {
			code: "Neo.TransientError.General.DatabaseUnavailable".into(),
			message: "database is down".into(),
		})
	}

	async fn close(self) -> Result<()> {
		self.log.closed.set(true);
		if self.fail_close {
			return Err(GraphError::Protocol("close refused".into()));
		}
		Ok(())
	}
}

pub(crate) fn entity(id: &str, label: &str) -> Entity {
	let mut properties = serde_json::Map::new();
	properties.insert("id".into(), json!(id));
	Entity {
		element_id: id.into(),
		labels: vec![label.into()],
		properties,
	}
}

/// `(a:Person)-[:KNOWS]->(b:Person)`
pub(crate) fn knows(a: &str, b: &str) -> QueryRecord {
	QueryRecord {
		source: entity(a, "Person"),
		relationship: Relationship {
			rel_type: "KNOWS".into(),
			..Default::default()
		},
		target: entity(b, "Person"),
	}
}
