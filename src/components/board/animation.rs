//! Short-lived cosmetic effects advanced by the board's frame loop.

pub const DEFAULT_OUTLINE: Outline = Outline {
	rgb: (0x33, 0x33, 0x33),
	width: 1.5,
};
pub const HINT_OUTLINE: Outline = Outline {
	rgb: (0xFF, 0x57, 0x22),
	width: 4.0,
};
pub const SELECTED_OUTLINE: Outline = Outline {
	rgb: (0x21, 0x21, 0x21),
	width: 4.0,
};

const HINT_PHASE: f64 = 0.3;
const SHAKE_STEP: f64 = 0.05;
const SHAKE_KEYS: [f64; 5] = [0.0, 3.0, -3.0, 3.0, 0.0];
const CONFETTI_PIECES: usize = 100;

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
	pub rgb: (u8, u8, u8),
	pub width: f64,
}

impl Outline {
	pub fn css(&self) -> String {
		let (r, g, b) = self.rgb;
		format!("rgb({r}, {g}, {b})")
	}

	fn lerp(&self, to: &Outline, t: f64) -> Outline {
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Outline {
			rgb: (
				mix(self.rgb.0, to.rgb.0),
				mix(self.rgb.1, to.rgb.1),
				mix(self.rgb.2, to.rgb.2),
			),
			width: self.width + (to.width - self.width) * t,
		}
	}
}

/// Outline pulse on a hinted node: out to the hint style, then back.
#[derive(Clone, Debug)]
pub struct HintFlash {
	pub node: usize,
	elapsed: f64,
}

impl HintFlash {
	pub fn new(node: usize) -> Self {
		Self { node, elapsed: 0.0 }
	}

	pub fn advance(&mut self, dt: f64) {
		self.elapsed += dt;
	}

	pub fn finished(&self, scale: f64) -> bool {
		self.elapsed >= 2.0 * HINT_PHASE * scale
	}

	pub fn outline(&self, scale: f64) -> Outline {
		let phase = HINT_PHASE * scale;
		if self.elapsed < phase {
			DEFAULT_OUTLINE.lerp(&HINT_OUTLINE, ease_in_out_cubic(self.elapsed / phase))
		} else {
			let t = ((self.elapsed - phase) / phase).min(1.0);
			HINT_OUTLINE.lerp(&DEFAULT_OUTLINE, ease_in_out_cubic(t))
		}
	}
}

/// Horizontal wobble on a node whose move was rejected.
#[derive(Clone, Debug)]
pub struct Shake {
	pub node: usize,
	elapsed: f64,
}

impl Shake {
	pub fn new(node: usize) -> Self {
		Self { node, elapsed: 0.0 }
	}

	pub fn advance(&mut self, dt: f64) {
		self.elapsed += dt;
	}

	pub fn finished(&self, scale: f64) -> bool {
		self.elapsed >= SHAKE_STEP * scale * (SHAKE_KEYS.len() - 1) as f64
	}

	/// Current x offset in pixels, interpolated between keyframes.
	pub fn offset(&self, scale: f64) -> f64 {
		let step = SHAKE_STEP * scale;
		let pos = self.elapsed / step;
		let i = pos.floor() as usize;
		if i + 1 >= SHAKE_KEYS.len() {
			return 0.0;
		}
		let t = pos - i as f64;
		SHAKE_KEYS[i] + (SHAKE_KEYS[i + 1] - SHAKE_KEYS[i]) * t
	}
}

#[derive(Clone, Debug)]
pub struct Confetto {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: String,
	start_y: f64,
	end_y: f64,
	duration: f64,
	elapsed: f64,
}

impl Confetto {
	fn advance(&mut self, dt: f64) {
		self.elapsed += dt;
		let t = (self.elapsed / self.duration).min(1.0);
		self.y = self.start_y + (self.end_y - self.start_y) * t;
	}

	fn finished(&self) -> bool {
		self.elapsed >= self.duration
	}
}

/// Deterministic pseudo-random sequence in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
	pub fn new(seed: u64) -> Self {
		Self(seed)
	}

	pub fn next_f64(&mut self) -> f64 {
		self.0 = (self.0 * 9301 + 49297) % 233280;
		self.0 as f64 / 233280.0
	}
}

/// Falling confetti across the full board width, one burst per completion.
#[derive(Clone, Debug, Default)]
pub struct Celebration {
	pub pieces: Vec<Confetto>,
}

impl Celebration {
	pub fn burst(colors: &[String], width: f64, height: f64, scale: f64, rng: &mut Lcg) -> Self {
		if colors.is_empty() {
			return Self::default();
		}
		let pieces = (0..CONFETTI_PIECES)
			.map(|_| {
				let color = colors[(rng.next_f64() * colors.len() as f64) as usize].clone();
				Confetto {
					x: rng.next_f64() * width,
					y: -10.0,
					radius: rng.next_f64() * 8.0 + 2.0,
					color,
					start_y: -10.0,
					end_y: height + 10.0,
					duration: (rng.next_f64() * 2.0 + 1.0) * scale,
					elapsed: 0.0,
				}
			})
			.collect();
		Self { pieces }
	}

	pub fn advance(&mut self, dt: f64) {
		for piece in &mut self.pieces {
			piece.advance(dt);
		}
		self.pieces.retain(|p| !p.finished());
	}

	pub fn is_empty(&self) -> bool {
		self.pieces.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hint_reaches_highlight_then_restores_default() {
		let mut flash = HintFlash::new(0);
		assert_eq!(flash.outline(1.0), DEFAULT_OUTLINE);

		flash.advance(0.3);
		assert_eq!(flash.outline(1.0), HINT_OUTLINE);
		assert!(!flash.finished(1.0));

		flash.advance(0.3);
		assert_eq!(flash.outline(1.0), DEFAULT_OUTLINE);
		assert!(flash.finished(1.0));
	}

	#[test]
	fn slower_speed_stretches_the_hint() {
		let mut flash = HintFlash::new(0);
		flash.advance(0.6);
		assert!(!flash.finished(1.5));
		assert!(flash.finished(1.0));
	}

	#[test]
	fn shake_oscillates_and_settles() {
		let mut shake = Shake::new(2);
		assert_eq!(shake.offset(1.0), 0.0);

		shake.advance(0.05);
		assert!((shake.offset(1.0) - 3.0).abs() < 1e-9);
		shake.advance(0.05);
		assert!((shake.offset(1.0) + 3.0).abs() < 1e-9);
		shake.advance(0.025);
		assert!(shake.offset(1.0).abs() < 1e-9);

		shake.advance(0.1);
		assert!(shake.finished(1.0));
		assert_eq!(shake.offset(1.0), 0.0);
	}

	#[test]
	fn confetti_uses_palette_and_clears_itself() {
		let colors = vec!["#FF5252".to_string(), "#4CAF50".to_string()];
		let mut rng = Lcg::new(7);
		let mut party = Celebration::burst(&colors, 400.0, 300.0, 1.0, &mut rng);

		assert_eq!(party.pieces.len(), CONFETTI_PIECES);
		assert!(party.pieces.iter().all(|p| colors.contains(&p.color)));
		assert!(party.pieces.iter().all(|p| (0.0..400.0).contains(&p.x)));
		assert!(party.pieces.iter().all(|p| (2.0..10.0).contains(&p.radius)));

		party.advance(0.5);
		assert!(party.pieces.iter().all(|p| p.y > -10.0));

		party.advance(3.0);
		assert!(party.is_empty());
	}

	#[test]
	fn no_colors_no_confetti() {
		let party = Celebration::burst(&[], 100.0, 100.0, 1.0, &mut Lcg::new(1));
		assert!(party.is_empty());
	}
}
