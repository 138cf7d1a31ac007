// src/processing/colormap.rs

/// Maps a normalized value in `[0, 1]` to an RGB color.
pub trait Colormap: Send + Sync {
    fn rgb(&self, t: f64) -> [u8; 3];

    fn name(&self) -> &str;
}

/// Piecewise-linear channel description: `(x, value)` anchors with
/// strictly increasing `x` from 0 to 1.
type Segments = &'static [(f64, f64)];

const JET_RED: Segments = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: Segments = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: Segments = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// Number of entries in a lookup-table colormap.
pub const LUT_SIZE: usize = 256;

fn interpolate(segments: Segments, x: f64) -> f64 {
    for pair in segments.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let span = x1 - x0;
            return if span > 0.0 { y0 + (x - x0) / span * (y1 - y0) } else { y1 };
        }
    }
    segments.last().map(|&(_, y)| y).unwrap_or(0.0)
}

/// The classic "jet" gradient: dark blue, blue, cyan, yellow, red, dark red.
///
/// Sampled into a 256 entry table; channel intensities are truncated to
/// bytes so the low end is `(0, 0, 127)` and the high end `(127, 0, 0)`.
pub struct Jet {
    lut: Vec<[u8; 3]>,
}

impl Jet {
    pub fn new() -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| {
                let x = i as f64 / (LUT_SIZE - 1) as f64;
                [
                    (interpolate(JET_RED, x) * 255.0) as u8,
                    (interpolate(JET_GREEN, x) * 255.0) as u8,
                    (interpolate(JET_BLUE, x) * 255.0) as u8,
                ]
            })
            .collect();
        Self { lut }
    }
}

impl Default for Jet {
    fn default() -> Self {
        Self::new()
    }
}

impl Colormap for Jet {
    fn rgb(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let index = ((t * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1);
        self.lut[index]
    }

    fn name(&self) -> &str {
        "jet"
    }
}
