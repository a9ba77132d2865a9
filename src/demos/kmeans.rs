//! K-means clustering demonstrator
//!
//! Lloyd's algorithm on 2-D points: assign each point to its nearest
//! centroid, then move each centroid to the mean of its points. A centroid
//! with no points stays where it is.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::KMeansConfig;
use crate::error::{PlaygroundError, Result};
use crate::utils::rng::{jitter, random_in_range, rng_from_option};
use crate::utils::Point2;

/// Blob centres used by [`generate_blobs`].
pub const BLOB_CENTRES: [Point2; 4] = [
    Point2::new(-2.0, -2.0),
    Point2::new(2.0, 2.0),
    Point2::new(-2.0, 2.0),
    Point2::new(2.0, -2.0),
];

const BLOB_SPREAD: f64 = 2.0;

/// Initial centroids are drawn from `[-CENTROID_RANGE, CENTROID_RANGE)²`.
pub const CENTROID_RANGE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub position: Point2,
    /// Index of the assigned centroid; `None` before the first step
    pub cluster: Option<usize>,
    /// Blob the point was generated from
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: Point2,
    /// CSS colour used to draw the cluster
    pub color: String,
}

/// Display colour of the `index`-th cluster.
pub fn cluster_color(index: usize) -> String {
    format!("hsl({}, 70%, 60%)", index * 90)
}

/// `points_per_blob` points around each of the [`BLOB_CENTRES`], jittered by ±1 per axis.
pub fn generate_blobs<R: Rng + ?Sized>(rng: &mut R, points_per_blob: usize) -> Vec<DataPoint> {
    let mut points = Vec::with_capacity(BLOB_CENTRES.len() * points_per_blob);
    for (origin, centre) in BLOB_CENTRES.iter().enumerate() {
        for _ in 0..points_per_blob {
            let x = centre.x + jitter(rng, BLOB_SPREAD);
            let y = centre.y + jitter(rng, BLOB_SPREAD);
            points.push(DataPoint {
                position: Point2::new(x, y),
                cluster: None,
                origin,
            });
        }
    }
    points
}

/// `count` centroids placed uniformly at random in the plotting window.
pub fn random_centroids<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Cluster> {
    (0..count)
        .map(|i| {
            let x = random_in_range(rng, -CENTROID_RANGE, CENTROID_RANGE);
            let y = random_in_range(rng, -CENTROID_RANGE, CENTROID_RANGE);
            Cluster {
                centroid: Point2::new(x, y),
                color: cluster_color(i),
            }
        })
        .collect()
}

/// Index of the centroid nearest to `point`; ties go to the lowest index.
fn nearest(point: Point2, clusters: &[Cluster]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, cluster) in clusters.iter().enumerate() {
        let d = point.distance_squared(&cluster.centroid);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((index, d)),
        }
    }
    best.map(|(index, _)| index)
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansStep {
    pub points: Vec<DataPoint>,
    pub centroids: Vec<Cluster>,
    /// Points whose assignment differs from the input
    pub changed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KMeansOutcome {
    /// No points or no centroids; nothing changed.
    NoData,
    Stepped(KMeansStep),
}

/// One assign-then-recompute iteration. Pure: inputs are not modified.
pub fn kmeans_step(points: &[DataPoint], centroids: &[Cluster]) -> KMeansOutcome {
    if points.is_empty() || centroids.is_empty() {
        return KMeansOutcome::NoData;
    }

    let mut changed = 0;
    let assigned: Vec<DataPoint> = points
        .iter()
        .map(|p| {
            let cluster = nearest(p.position, centroids);
            if cluster != p.cluster {
                changed += 1;
            }
            DataPoint { cluster, ..*p }
        })
        .collect();

    let mut sums = vec![(0.0, 0.0, 0usize); centroids.len()];
    for p in &assigned {
        if let Some(c) = p.cluster {
            sums[c].0 += p.position.x;
            sums[c].1 += p.position.y;
            sums[c].2 += 1;
        }
    }

    let updated = centroids
        .iter()
        .zip(&sums)
        .map(|(cluster, &(sx, sy, n))| {
            if n == 0 {
                cluster.clone()
            } else {
                Cluster {
                    centroid: Point2::new(sx / n as f64, sy / n as f64),
                    color: cluster.color.clone(),
                }
            }
        })
        .collect();

    KMeansOutcome::Stepped(KMeansStep {
        points: assigned,
        centroids: updated,
        changed,
    })
}

/// Sum of squared distances from each assigned point to its centroid.
pub fn inertia(points: &[DataPoint], centroids: &[Cluster]) -> f64 {
    points
        .iter()
        .filter_map(|p| {
            p.cluster
                .and_then(|c| centroids.get(c))
                .map(|cluster| p.position.distance_squared(&cluster.centroid))
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KMeansStatus {
    Idle,
    Running,
    /// An iteration left every assignment unchanged.
    Stable,
    /// Iteration cap reached.
    CapReached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansTick {
    pub status: KMeansStatus,
    pub iteration: usize,
    pub changed: usize,
    pub inertia: f64,
}

/// K-means demo run over generated blob data.
#[derive(Debug)]
pub struct KMeansRun {
    clusters: usize,
    points_per_cluster: usize,
    max_iterations: usize,
    stop_when_stable: bool,
    points: Vec<DataPoint>,
    centroids: Vec<Cluster>,
    iteration: usize,
    status: KMeansStatus,
    rng: StdRng,
}

impl KMeansRun {
    pub fn new(config: &KMeansConfig) -> Result<Self> {
        Self::with_rng(config, rng_from_option(config.seed))
    }

    pub fn with_rng(config: &KMeansConfig, mut rng: StdRng) -> Result<Self> {
        for (name, value) in [
            ("clusters", config.clusters),
            ("max_iterations", config.max_iterations),
        ] {
            if value == 0 {
                return Err(PlaygroundError::InvalidParameter {
                    name,
                    value: 0.0,
                    reason: "must be at least 1",
                });
            }
        }

        let points = generate_blobs(&mut rng, config.points_per_cluster);
        let centroids = random_centroids(&mut rng, config.clusters);
        Ok(Self {
            clusters: config.clusters,
            points_per_cluster: config.points_per_cluster,
            max_iterations: config.max_iterations,
            stop_when_stable: config.stop_when_stable,
            points,
            centroids,
            iteration: 0,
            status: KMeansStatus::Idle,
            rng,
        })
    }

    /// Starts or resumes. Finished runs need a reset first.
    pub fn start(&mut self) {
        if self.status == KMeansStatus::Idle {
            self.status = KMeansStatus::Running;
            debug!("k-means running with {} centroids", self.clusters);
        }
    }

    pub fn stop(&mut self) {
        if self.status == KMeansStatus::Running {
            self.status = KMeansStatus::Idle;
        }
    }

    /// Runs one iteration while running.
    pub fn tick(&mut self) -> KMeansTick {
        if self.status != KMeansStatus::Running {
            return self.snapshot(0);
        }

        let step = match kmeans_step(&self.points, &self.centroids) {
            KMeansOutcome::NoData => {
                warn!("k-means tick skipped: no points");
                return self.snapshot(0);
            }
            KMeansOutcome::Stepped(step) => step,
        };
        self.points = step.points;
        self.centroids = step.centroids;
        self.iteration += 1;

        if self.stop_when_stable && step.changed == 0 {
            self.status = KMeansStatus::Stable;
            info!("k-means stable after {} iterations", self.iteration);
        } else if self.iteration >= self.max_iterations {
            self.status = KMeansStatus::CapReached;
            info!("k-means stopped at the {}-iteration cap", self.iteration);
        }
        self.snapshot(step.changed)
    }

    /// Starts and ticks until the run stops.
    pub fn run_to_completion(&mut self) -> KMeansTick {
        self.start();
        let mut last = self.snapshot(0);
        while self.status == KMeansStatus::Running {
            last = self.tick();
        }
        last
    }

    /// Regenerates points and centroids.
    pub fn reset(&mut self) {
        self.points = generate_blobs(&mut self.rng, self.points_per_cluster);
        self.centroids = random_centroids(&mut self.rng, self.clusters);
        self.iteration = 0;
        self.status = KMeansStatus::Idle;
        debug!("k-means reset");
    }

    fn snapshot(&self, changed: usize) -> KMeansTick {
        KMeansTick {
            status: self.status,
            iteration: self.iteration,
            changed,
            inertia: self.inertia(),
        }
    }

    pub fn inertia(&self) -> f64 {
        inertia(&self.points, &self.centroids)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn centroids(&self) -> &[Cluster] {
        &self.centroids
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn status(&self) -> KMeansStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::seeded_rng;

    fn point(x: f64, y: f64) -> DataPoint {
        DataPoint {
            position: Point2::new(x, y),
            cluster: None,
            origin: 0,
        }
    }

    fn cluster(x: f64, y: f64) -> Cluster {
        Cluster {
            centroid: Point2::new(x, y),
            color: cluster_color(0),
        }
    }

    #[test]
    fn test_generate_blobs() {
        let points = generate_blobs(&mut seeded_rng(4), 25);
        assert_eq!(points.len(), 100);
        for p in &points {
            let centre = BLOB_CENTRES[p.origin];
            assert!((p.position.x - centre.x).abs() <= 1.0);
            assert!((p.position.y - centre.y).abs() <= 1.0);
            assert!(p.cluster.is_none());
        }
    }

    #[test]
    fn test_random_centroids_colors_and_range() {
        let centroids = random_centroids(&mut seeded_rng(4), 4);
        assert_eq!(centroids[1].color, "hsl(90, 70%, 60%)");
        assert_eq!(centroids[3].color, "hsl(270, 70%, 60%)");
        for c in &centroids {
            assert!(c.centroid.x >= -3.0 && c.centroid.x < 3.0);
            assert!(c.centroid.y >= -3.0 && c.centroid.y < 3.0);
        }
    }

    #[test]
    fn test_step_assigns_and_recomputes() {
        let points = vec![point(0.0, 0.0), point(2.0, 0.0), point(10.0, 10.0)];
        let centroids = vec![cluster(1.0, 0.0), cluster(9.0, 9.0)];
        let KMeansOutcome::Stepped(step) = kmeans_step(&points, &centroids) else {
            panic!("expected a step");
        };
        assert_eq!(step.points[0].cluster, Some(0));
        assert_eq!(step.points[2].cluster, Some(1));
        assert_eq!(step.centroids[0].centroid, Point2::new(1.0, 0.0));
        assert_eq!(step.centroids[1].centroid, Point2::new(10.0, 10.0));
        assert_eq!(step.changed, 3);
    }

    #[test]
    fn test_tie_goes_to_first_centroid() {
        let points = vec![point(0.0, 0.0)];
        let centroids = vec![cluster(-1.0, 0.0), cluster(1.0, 0.0)];
        let KMeansOutcome::Stepped(step) = kmeans_step(&points, &centroids) else {
            panic!("expected a step");
        };
        assert_eq!(step.points[0].cluster, Some(0));
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let points = vec![point(0.0, 0.0)];
        let centroids = vec![cluster(0.5, 0.0), cluster(50.0, 50.0)];
        let KMeansOutcome::Stepped(step) = kmeans_step(&points, &centroids) else {
            panic!("expected a step");
        };
        assert_eq!(step.centroids[1], centroids[1]);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(kmeans_step(&[], &[cluster(0.0, 0.0)]), KMeansOutcome::NoData);
        assert_eq!(kmeans_step(&[point(0.0, 0.0)], &[]), KMeansOutcome::NoData);
    }

    #[test]
    fn test_run_respects_cap_without_early_stop() {
        let config = KMeansConfig {
            stop_when_stable: false,
            seed: Some(12),
            ..KMeansConfig::default()
        };
        let mut run = KMeansRun::new(&config).unwrap();
        let tick = run.run_to_completion();
        assert_eq!(tick.status, KMeansStatus::CapReached);
        assert_eq!(run.iteration(), 20);
    }

    #[test]
    fn test_run_stops_when_stable() {
        let config = KMeansConfig {
            seed: Some(12),
            max_iterations: 1000,
            ..KMeansConfig::default()
        };
        let mut run = KMeansRun::new(&config).unwrap();
        let tick = run.run_to_completion();
        assert_eq!(tick.status, KMeansStatus::Stable);
        assert_eq!(tick.changed, 0);
        assert!(run.iteration() < 1000);
    }
}
