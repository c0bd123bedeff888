use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::state::ForceGraphState;

/// Imperative camera access to a mounted [`ForceGraphCanvas`].
///
/// Create one in the parent, pass it to the canvas, and keep a clone for
/// controls. Until the canvas has mounted every call is a no-op.
///
/// [`ForceGraphCanvas`]: super::ForceGraphCanvas
#[derive(Clone, Default)]
pub struct ForceGraphHandle {
	state: Rc<RefCell<Option<ForceGraphState>>>,
}

impl ForceGraphHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub(super) fn slot(&self) -> Rc<RefCell<Option<ForceGraphState>>> {
		self.state.clone()
	}

	/// True once the canvas has built its state.
	#[cfg(test)]
	pub fn is_ready(&self) -> bool {
		self.state.try_borrow().map(|s| s.is_some()).unwrap_or(false)
	}

	/// Fit the whole graph into view over `duration_ms`.
	pub fn zoom_to_fit(&self, duration_ms: f64) {
		self.with_state("zoom_to_fit", |s| s.zoom_to_fit(duration_ms));
	}

	/// Scale the current view by `factor` over `duration_ms`.
	pub fn zoom_to(&self, factor: f64, duration_ms: f64) {
		self.with_state("zoom_to", |s| s.zoom_to(factor, duration_ms));
	}

	fn with_state(&self, op: &str, f: impl FnOnce(&mut ForceGraphState)) {
		match self.state.try_borrow_mut() {
			Ok(mut slot) => match slot.as_mut() {
				Some(state) => f(state),
				None => debug!("{op} ignored: graph not mounted yet"),
			},
			Err(_) => debug!("{op} ignored: graph state busy"),
		}
	}
}
