//! Toy two-dimensional loss landscapes with closed-form gradients.

use serde::{Deserialize, Serialize};

use crate::utils::Point2;

/// Known global minimum of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMinimum {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SurfaceMinimum {
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Loss surface catalog used by the gradient-descent demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossSurface {
    /// `x² + y²`
    Quadratic,
    /// `100(y - x²)² + (1 - x)²`
    Rosenbrock,
    /// `(x² + y - 11)² + (x + y² - 7)²`
    Himmelblau,
    /// `(1.5 - x + xy)² + (2.25 - x + xy²)² + (2.625 - x + xy³)²`
    Beale,
}

impl LossSurface {
    pub const ALL: [LossSurface; 4] = [
        LossSurface::Quadratic,
        LossSurface::Rosenbrock,
        LossSurface::Himmelblau,
        LossSurface::Beale,
    ];

    /// Square plotting window `[-3, 3]²` shared by every surface.
    pub const DOMAIN: (f64, f64) = (-3.0, 3.0);

    pub fn value(&self, p: Point2) -> f64 {
        let (x, y) = (p.x, p.y);
        match self {
            LossSurface::Quadratic => x * x + y * y,
            LossSurface::Rosenbrock => 100.0 * (y - x * x).powi(2) + (1.0 - x).powi(2),
            LossSurface::Himmelblau => (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2),
            LossSurface::Beale => {
                (1.5 - x + x * y).powi(2)
                    + (2.25 - x + x * y * y).powi(2)
                    + (2.625 - x + x * y * y * y).powi(2)
            }
        }
    }

    /// `(∂f/∂x, ∂f/∂y)` at `p`.
    pub fn gradient(&self, p: Point2) -> Point2 {
        let (x, y) = (p.x, p.y);
        match self {
            LossSurface::Quadratic => Point2::new(2.0 * x, 2.0 * y),
            LossSurface::Rosenbrock => Point2::new(
                -400.0 * x * (y - x * x) - 2.0 * (1.0 - x),
                200.0 * (y - x * x),
            ),
            LossSurface::Himmelblau => {
                let a = x * x + y - 11.0;
                let b = x + y * y - 7.0;
                Point2::new(4.0 * x * a + 2.0 * b, 2.0 * a + 4.0 * y * b)
            }
            LossSurface::Beale => {
                let t1 = 1.5 - x + x * y;
                let t2 = 2.25 - x + x * y * y;
                let t3 = 2.625 - x + x * y * y * y;
                let dx = 2.0 * t1 * (y - 1.0) + 2.0 * t2 * (y * y - 1.0) + 2.0 * t3 * (y * y * y - 1.0);
                let dy = 2.0 * t1 * x + 2.0 * t2 * 2.0 * x * y + 2.0 * t3 * 3.0 * x * y * y;
                Point2::new(dx, dy)
            }
        }
    }

    /// Reported global minimum.
    ///
    /// Himmelblau has four global minima; `(3, 2)` is the one reported.
    pub fn minimum(&self) -> SurfaceMinimum {
        match self {
            LossSurface::Quadratic => SurfaceMinimum {
                x: 0.0,
                y: 0.0,
                value: 0.0,
            },
            LossSurface::Rosenbrock => SurfaceMinimum {
                x: 1.0,
                y: 1.0,
                value: 0.0,
            },
            LossSurface::Himmelblau => SurfaceMinimum {
                x: 3.0,
                y: 2.0,
                value: 0.0,
            },
            LossSurface::Beale => SurfaceMinimum {
                x: 3.0,
                y: 0.5,
                value: 0.0,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LossSurface::Quadratic => "Quadratic Bowl",
            LossSurface::Rosenbrock => "Rosenbrock Function",
            LossSurface::Himmelblau => "Himmelblau Function",
            LossSurface::Beale => "Beale Function",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LossSurface::Quadratic => "Simple convex function with global minimum at origin",
            LossSurface::Rosenbrock => {
                "Challenging banana-shaped valley, tests optimizer robustness"
            }
            LossSurface::Himmelblau => "Multi-modal function with four global minima",
            LossSurface::Beale => "Narrow valley leading to global minimum",
        }
    }

    /// Samples `value` on a `resolution × resolution` lattice over [`Self::DOMAIN`].
    ///
    /// Rows run along y, columns along x. A renderer turns this into contours.
    pub fn sample_grid(&self, resolution: usize) -> Vec<Vec<f64>> {
        let (lo, hi) = Self::DOMAIN;
        let axis = crate::utils::stats::linspace(lo, hi, resolution);
        axis.iter()
            .map(|&y| axis.iter().map(|&x| self.value(Point2::new(x, y))).collect())
            .collect()
    }
}
