pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;
/// Screen-space margin kept around the graph when fitting.
pub const FIT_PADDING: f64 = 10.0;

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	/// Scale by `factor` keeping screen point `(px, py)` fixed.
	pub fn zoomed_at(&self, factor: f64, px: f64, py: f64) -> Self {
		let k = (self.k * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = k / self.k;
		Self {
			x: px - (px - self.x) * ratio,
			y: py - (py - self.y) * ratio,
			k,
		}
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Axis-aligned box around node positions, in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn around(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Self {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Self {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			})
		})
	}

	/// Transform that centres the box and scales it to fit the viewport.
	pub fn fit(&self, width: f64, height: f64, padding: f64) -> ViewTransform {
		let (bw, bh) = (
			(self.max_x - self.min_x).max(f64::EPSILON),
			(self.max_y - self.min_y).max(f64::EPSILON),
		);
		let (avail_w, avail_h) = (
			(width - 2.0 * padding).max(1.0),
			(height - 2.0 * padding).max(1.0),
		);
		let k = (avail_w / bw).min(avail_h / bh).clamp(MIN_SCALE, MAX_SCALE);
		let (cx, cy) = (
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		);
		ViewTransform {
			x: width / 2.0 - cx * k,
			y: height / 2.0 - cy * k,
			k,
		}
	}
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// An eased move from one transform to another.
#[derive(Clone, Debug)]
pub struct CameraTransition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

impl CameraTransition {
	pub fn new(from: ViewTransform, to: ViewTransform, duration_ms: f64) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration: (duration_ms / 1000.0).max(0.0),
		}
	}

	pub fn target(&self) -> ViewTransform {
		self.to
	}

	/// Advance by `dt` seconds; returns the transform to show and whether the
	/// transition has finished.
	pub fn advance(&mut self, dt: f64) -> (ViewTransform, bool) {
		self.elapsed += dt;
		if self.duration <= 0.0 || self.elapsed >= self.duration {
			return (self.to, true);
		}
		let t = ease_in_out_cubic(self.elapsed / self.duration);
		(self.from.lerp(&self.to, t), false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let view = ViewTransform {
			x: 30.0,
			y: -20.0,
			k: 2.0,
		};
		let zoomed = view.zoomed_at(1.2, 400.0, 300.0);
		assert!(close(zoomed.k, 2.4));
		// graph point under (400, 300) before and after
		let before = ((400.0 - view.x) / view.k, (300.0 - view.y) / view.k);
		let after = ((400.0 - zoomed.x) / zoomed.k, (300.0 - zoomed.y) / zoomed.k);
		assert!(close(before.0, after.0) && close(before.1, after.1));
	}

	#[test]
	fn zoom_is_clamped() {
		let view = ViewTransform::centered(800.0, 600.0);
		assert!(close(view.zoomed_at(100.0, 0.0, 0.0).k, MAX_SCALE));
		assert!(close(view.zoomed_at(0.0001, 0.0, 0.0).k, MIN_SCALE));
	}

	#[test]
	fn fit_centres_and_scales() {
		let bounds = Bounds::around([(-100.0, -50.0), (100.0, 50.0), (0.0, 0.0)]).unwrap();
		let view = bounds.fit(420.0, 420.0, FIT_PADDING);
		// width is the binding side: 400 / 200
		assert!(close(view.k, 2.0));
		assert!(close(view.x, 210.0));
		assert!(close(view.y, 210.0));
	}

	#[test]
	fn fit_single_point_hits_max_scale() {
		let bounds = Bounds::around([(5.0, 5.0)]).unwrap();
		let view = bounds.fit(800.0, 600.0, FIT_PADDING);
		assert!(close(view.k, MAX_SCALE));
		assert!(close(view.x, 400.0 - 5.0 * MAX_SCALE));
	}

	#[test]
	fn no_points_no_bounds() {
		assert!(Bounds::around(std::iter::empty()).is_none());
	}

	#[test]
	fn transition_eases_to_target() {
		let from = ViewTransform::centered(800.0, 600.0);
		let to = from.zoomed_at(1.2, 400.0, 300.0);
		let mut transition = CameraTransition::new(from, to, 400.0);

		let (mid, done) = transition.advance(0.2);
		assert!(!done);
		assert!(mid.k > from.k && mid.k < to.k);

		let (end, done) = transition.advance(0.25);
		assert!(done);
		assert_eq!(end, to);
	}

	#[test]
	fn zero_duration_jumps() {
		let from = ViewTransform::centered(100.0, 100.0);
		let to = from.zoomed_at(0.8, 50.0, 50.0);
		let (view, done) = CameraTransition::new(from, to, 0.0).advance(0.0);
		assert!(done);
		assert_eq!(view, to);
	}
}
