//! Planar rotation helpers shared by the synthesizer and the resampler.

use std::f64::consts::PI;

/// Convert degrees to radians using `deg * PI / 180`.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Fold an angle into `[0, 360)`, so a full turn samples exactly like no turn.
///
/// `sin`/`cos` of `2 * PI` are only approximately `0`/`1`, so without folding
/// a 360 degree rotation could pick a neighbouring source pixel along the
/// edges of the canvas. Folding first makes `rotation + 360 * k` bit-identical.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// A transient point used in rotation math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate about the origin given precomputed `sin` and `cos`.
    pub fn rotate_by(self, sin: f64, cos: f64) -> Self {
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Rotate about the origin by `radians`.
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        self.rotate_by(sin, cos)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when the point lies in `[0, width) x [0, height)`.
    pub fn within(self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.x < width && self.y >= 0.0 && self.y < height
    }

    /// Truncate toward zero to integer pixel coordinates.
    pub fn truncate(self) -> (i64, i64) {
        (self.x as i64, self.y as i64)
    }
}
