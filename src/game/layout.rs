use std::collections::BTreeMap;

use crate::api::{NodeId, RawPosition};

/// Screen-space position of a node center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug)]
struct Extent {
	min: f64,
	max: f64,
}

impl Extent {
	fn empty() -> Self {
		Self {
			min: f64::INFINITY,
			max: f64::NEG_INFINITY,
		}
	}

	fn include(&mut self, v: f64) {
		self.min = self.min.min(v);
		self.max = self.max.max(v);
	}

	/// Maps `v` onto `[radius, dimension - radius]`.
	///
	/// A flat extent, or a viewport too small to hold a node, centers on the axis.
	fn fit(&self, v: f64, dimension: f64, radius: f64) -> f64 {
		let span = dimension - 2.0 * radius;
		if self.max <= self.min || span <= 0.0 {
			return dimension / 2.0;
		}
		(v - self.min) / (self.max - self.min) * span + radius
	}
}

/// Fits raw backend positions into a `width` x `height` viewport so that
/// circles of `radius` never clip its edges.
pub fn normalize_positions(
	raw: &BTreeMap<NodeId, RawPosition>,
	width: f64,
	height: f64,
	radius: f64,
) -> BTreeMap<NodeId, Point> {
	let (mut xs, mut ys) = (Extent::empty(), Extent::empty());
	for pos in raw.values().filter(|p| p.x.is_finite() && p.y.is_finite()) {
		xs.include(pos.x);
		ys.include(pos.y);
	}

	raw.iter()
		.map(|(id, pos)| {
			let point = Point {
				x: xs.fit(pos.x, width, radius),
				y: ys.fit(pos.y, height, radius),
			};
			(id.clone(), point)
		})
		.collect()
}
