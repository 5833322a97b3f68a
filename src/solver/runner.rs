//! Hill-climb execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use super::checkpoint::{Checkpoint, CheckpointWriter};
use super::config::{SearchStrategy, SolverConfig};
use super::verify::{check_tour, InvariantViolation};
use crate::error::Result;
use crate::local_search::{first_improvement, first_improvement_swap};
use crate::models::{Length, Move, PointId};
use crate::tour::{SegmentList, Tour, TourStats};

/// Why a climb stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// No improving 2-opt exchange exists.
    LocalOptimum,
    /// `max_iterations` moves were accepted.
    IterationLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// Cancelled through the flag passed to [`HillClimber::run_with_cancel`].
    Cancelled,
    /// A checkpoint found the tour corrupted.
    InvariantViolation(InvariantViolation),
}

/// Result of a hill-climb run.
#[derive(Debug, Clone, Serialize)]
pub struct HillClimbResult {
    /// Last verified ordering, starting at point 0.
    pub order: Vec<PointId>,

    /// Tour length before the first move.
    pub initial_length: Length,

    /// Length of `order`.
    pub final_length: Length,

    /// Accepted moves.
    pub iterations: usize,

    /// Sum of the improvements of verified moves.
    pub total_improvement: Length,

    /// Checkpoints handed to the writer, final save included.
    pub checkpoints: usize,

    /// Why the climb stopped.
    pub termination: Termination,

    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Drives first-improvement 2-opt to a local optimum.
///
/// Each round asks the configured scan for an improving exchange and applies
/// it to the tour (and to the segment list when scanning segments). Every
/// `checkpoint_period` accepted moves the tour is verified against
/// [`check_tour`]; a verified tour becomes the best-known ordering and is
/// handed to the writer. A failed check stops the climb with
/// [`Termination::InvariantViolation`] and the last verified ordering is
/// returned.
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::DistanceCalculator;
/// use u_twoopt::solver::{HillClimber, MemoryWriter, SolverConfig, Termination};
/// use u_twoopt::tour::Tour;
///
/// let x = [0.0, 0.0, 10.0, 10.0];
/// let y = [0.0, 10.0, 10.0, 0.0];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// let mut tour = Tour::new(calc, &[0, 2, 1, 3]).unwrap();
///
/// let mut writer = MemoryWriter::new();
/// let result = HillClimber::run(&mut tour, &SolverConfig::default(), &mut writer).unwrap();
/// assert_eq!(result.initial_length, 48);
/// assert_eq!(result.final_length, 40);
/// assert_eq!(result.termination, Termination::LocalOptimum);
/// assert!(writer.last().unwrap().is_final);
/// ```
pub struct HillClimber;

impl HillClimber {
    /// Runs the climb to termination.
    pub fn run<W: CheckpointWriter>(
        tour: &mut Tour<'_>,
        config: &SolverConfig,
        writer: &mut W,
    ) -> Result<HillClimbResult> {
        Self::run_with_cancel(tour, config, writer, None)
    }

    /// Runs the climb with an optional cancellation flag, polled once per move.
    ///
    /// Returns an error for an invalid configuration, a structurally invalid
    /// move, or a writer failure. Invariant violations are reported through
    /// [`HillClimbResult::termination`].
    pub fn run_with_cancel<W: CheckpointWriter>(
        tour: &mut Tour<'_>,
        config: &SolverConfig,
        writer: &mut W,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HillClimbResult> {
        config.validate()?;
        let started = Instant::now();
        let time_limit = config.time_limit();

        let stats = TourStats::of(tour);
        info!(
            event = "solve_start",
            points = stats.points,
            length = stats.total,
            shortest_edge = stats.shortest,
            longest_edge = stats.longest,
            mean_edge = stats.mean,
            strategy = ?config.strategy,
            checkpoint_period = config.checkpoint_period,
        );

        let initial_length = stats.total;
        let mut segments = match config.strategy {
            SearchStrategy::SegmentScan => Some(SegmentList::from_tour(tour)),
            SearchStrategy::PointScan => None,
        };

        let mut expected = initial_length;
        let mut iterations = 0usize;
        let mut checkpoints = 0usize;
        let mut best_order = tour.order();
        let mut best_length = initial_length;

        let mut termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                warn!(event = "iteration_limit", iterations);
                break Termination::IterationLimit;
            }
            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                warn!(event = "time_limit", iterations);
                break Termination::TimeLimit;
            }

            let Some(mv) = next_move(tour, segments.as_ref()) else {
                break Termination::LocalOptimum;
            };
            tour.apply_move(&mv)?;
            if let Some(list) = segments.as_mut() {
                list.apply_move(&mv, tour)?;
            }
            expected = expected.saturating_sub(mv.improvement);
            iterations += 1;
            trace!(
                event = "move",
                iteration = iterations,
                improvement = mv.improvement,
                length = expected,
            );

            if iterations % config.checkpoint_period == 0 {
                if let Err(violation) = check_tour(tour, segments.as_ref(), expected) {
                    error!(event = "invariant_violation", iteration = iterations, %violation);
                    break Termination::InvariantViolation(violation);
                }
                best_order = tour.order();
                best_length = expected;
                writer.write(&Checkpoint {
                    iteration: iterations,
                    length: best_length,
                    order: &best_order,
                    is_final: false,
                })?;
                checkpoints += 1;
                debug!(
                    event = "checkpoint",
                    iteration = iterations,
                    length = best_length,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                );
            }
        };

        if !matches!(termination, Termination::InvariantViolation(_)) {
            match check_tour(tour, segments.as_ref(), expected) {
                Ok(()) => {
                    best_order = tour.order();
                    best_length = expected;
                }
                Err(violation) => {
                    error!(event = "invariant_violation", iteration = iterations, %violation);
                    termination = Termination::InvariantViolation(violation);
                }
            }
        }

        let verified = !matches!(termination, Termination::InvariantViolation(_));
        if config.save_final && verified && best_length < initial_length {
            writer.write(&Checkpoint {
                iteration: iterations,
                length: best_length,
                order: &best_order,
                is_final: true,
            })?;
            checkpoints += 1;
        }

        let elapsed = started.elapsed();
        info!(
            event = "solve_end",
            iterations,
            initial_length,
            final_length = best_length,
            termination = ?termination,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        Ok(HillClimbResult {
            order: best_order,
            initial_length,
            final_length: best_length,
            iterations,
            total_improvement: initial_length - best_length,
            checkpoints,
            termination,
            elapsed,
        })
    }
}

/// Next improving exchange from the configured scan, as a [`Move`].
fn next_move(tour: &Tour<'_>, segments: Option<&SegmentList>) -> Option<Move> {
    match segments {
        Some(list) => first_improvement(list, tour.length_map()),
        None => first_improvement_swap(tour).map(|swap| tour.move_for_swap(&swap)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceCalculator;
    use crate::error::Error;
    use crate::solver::{valid_cycle, MemoryWriter, NullWriter};

    static SQUARE_X: [f64; 4] = [0.0, 0.0, 10.0, 10.0];
    static SQUARE_Y: [f64; 4] = [0.0, 10.0, 10.0, 0.0];

    // Eight points on a 30x10 grid, scrambled starts have several crossings.
    static GRID_X: [f64; 8] = [0.0, 10.0, 20.0, 30.0, 30.0, 20.0, 10.0, 0.0];
    static GRID_Y: [f64; 8] = [0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0];

    fn square(initial: &[PointId]) -> Tour<'static> {
        let calc = DistanceCalculator::new(&SQUARE_X, &SQUARE_Y).expect("valid");
        Tour::new(calc, initial).expect("valid")
    }

    fn grid(initial: &[PointId]) -> Tour<'static> {
        let calc = DistanceCalculator::new(&GRID_X, &GRID_Y).expect("valid");
        Tour::new(calc, initial).expect("valid")
    }

    fn is_rotation_or_reflection(order: &[PointId], initial: &[PointId]) -> bool {
        let n = initial.len();
        if order.len() != n {
            return false;
        }
        let doubled: Vec<PointId> = initial.iter().chain(initial).copied().collect();
        let mut reversed: Vec<PointId> = initial.iter().rev().copied().collect();
        reversed.extend_from_within(..);
        (0..n).any(|k| doubled[k..k + n] == *order || reversed[k..k + n] == *order)
    }

    #[test]
    fn test_square_converges_with_both_strategies() {
        for strategy in [SearchStrategy::SegmentScan, SearchStrategy::PointScan] {
            let mut tour = square(&[0, 2, 1, 3]);
            let config = SolverConfig::default().with_strategy(strategy);
            let mut writer = MemoryWriter::new();
            let result = HillClimber::run(&mut tour, &config, &mut writer).expect("run");

            assert_eq!(result.iterations, 1, "{strategy:?}");
            assert_eq!(result.initial_length, 48);
            assert_eq!(result.final_length, 40);
            assert_eq!(result.total_improvement, 8);
            assert_eq!(result.termination, Termination::LocalOptimum);
            assert!(is_rotation_or_reflection(&result.order, &[0, 1, 2, 3]));

            assert_eq!(result.checkpoints, 1);
            let saved = writer.last().expect("final save");
            assert!(saved.is_final);
            assert_eq!(saved.length, 40);
            assert_eq!(saved.order, result.order);
        }
    }

    #[test]
    fn test_convex_tour_is_not_saved() {
        let mut tour = square(&[0, 1, 2, 3]);
        let mut writer = MemoryWriter::new();
        let result =
            HillClimber::run(&mut tour, &SolverConfig::default(), &mut writer).expect("run");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.final_length, 40);
        assert_eq!(result.termination, Termination::LocalOptimum);
        assert_eq!(result.checkpoints, 0);
        assert!(writer.saved.is_empty());
    }

    #[test]
    fn test_checkpoint_every_move() {
        let mut tour = grid(&[0, 5, 2, 7, 4, 1, 6, 3]);
        let config = SolverConfig::default().with_checkpoint_period(1);
        let mut writer = MemoryWriter::new();
        let result = HillClimber::run(&mut tour, &config, &mut writer).expect("run");

        assert!(result.iterations > 1);
        assert_eq!(result.final_length, tour.recompute_length());
        assert_eq!(writer.saved.len(), result.iterations + 1);
        assert_eq!(result.checkpoints, writer.saved.len());

        let periodic = &writer.saved[..result.iterations];
        for (k, pair) in periodic.windows(2).enumerate() {
            assert!(pair[1].length < pair[0].length, "checkpoint {k}");
            assert_eq!(pair[0].iteration + 1, pair[1].iteration);
        }
        assert!(periodic.iter().all(|c| !c.is_final));
        let last = writer.last().expect("final save");
        assert!(last.is_final);
        assert_eq!(last.length, result.final_length);
    }

    #[test]
    fn test_iteration_limit() {
        let mut tour = grid(&[0, 5, 2, 7, 4, 1, 6, 3]);
        let config = SolverConfig::default().with_max_iterations(1);
        let result = HillClimber::run(&mut tour, &config, &mut NullWriter).expect("run");
        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert!(result.final_length < result.initial_length);
        assert_eq!(result.final_length, tour.total_length());
    }

    #[test]
    fn test_cancelled_before_first_move() {
        let mut tour = square(&[0, 2, 1, 3]);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = HillClimber::run_with_cancel(
            &mut tour,
            &SolverConfig::default(),
            &mut NullWriter,
            Some(cancel),
        )
        .expect("run");
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.final_length, 48);
    }

    #[test]
    fn test_invalid_config() {
        let mut tour = square(&[0, 2, 1, 3]);
        let config = SolverConfig::default().with_checkpoint_period(0);
        let err = HillClimber::run(&mut tour, &config, &mut NullWriter).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(tour.total_length(), 48);
    }

    #[test]
    fn test_save_final_disabled() {
        let mut tour = square(&[0, 2, 1, 3]);
        let config = SolverConfig::default().with_save_final(false);
        let mut writer = MemoryWriter::new();
        let result = HillClimber::run(&mut tour, &config, &mut writer).expect("run");
        assert_eq!(result.final_length, 40);
        assert!(writer.saved.is_empty());
    }

    #[test]
    fn test_segment_optimum_is_point_optimum() {
        let mut tour = grid(&[0, 3, 6, 1, 4, 7, 2, 5]);
        let config = SolverConfig::default().with_strategy(SearchStrategy::SegmentScan);
        let result = HillClimber::run(&mut tour, &config, &mut NullWriter).expect("run");
        assert_eq!(result.termination, Termination::LocalOptimum);
        assert!(first_improvement_swap(&tour).is_none());
        assert!(valid_cycle(&tour));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_solve_start_logs_initial_edge_stats() {
        let log = CapturedLog::default();
        let sink = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();

        // Edges 14, 10, 14, 10.
        let mut tour = square(&[0, 2, 1, 3]);
        tracing::subscriber::with_default(subscriber, || {
            HillClimber::run(&mut tour, &SolverConfig::default(), &mut NullWriter).expect("run");
        });

        let output = String::from_utf8(log.0.lock().expect("log buffer").clone()).expect("utf8");
        let start = output
            .lines()
            .find(|l| l.contains("solve_start"))
            .expect("solve_start logged");
        assert!(start.contains("points=4"), "{start}");
        assert!(start.contains("length=48"), "{start}");
        assert!(start.contains("shortest_edge=10"), "{start}");
        assert!(start.contains("longest_edge=14"), "{start}");
        assert!(start.contains("mean_edge=12"), "{start}");
        assert!(output.contains("solve_end"));
    }

    mod proptests {
        use super::*;
        use crate::constructive::random_tour;
        use proptest::prelude::*;

        fn coordinates() -> impl Strategy<Value = Vec<(i32, i32)>> {
            prop::collection::vec((0..1000i32, 0..1000i32), 3..25)
        }

        proptest! {
            #[test]
            fn moves_report_exact_improvement(points in coordinates(), seed in any::<u64>()) {
                let x: Vec<f64> = points.iter().map(|p| p.0 as f64).collect();
                let y: Vec<f64> = points.iter().map(|p| p.1 as f64).collect();
                let initial = random_tour(points.len(), seed);
                let calc = DistanceCalculator::new(&x, &y).expect("valid");
                let mut tour = Tour::new(calc, &initial).expect("valid");
                let mut segments = SegmentList::from_tour(&tour);

                let mut before = tour.recompute_length();
                while let Some(mv) = first_improvement(&segments, tour.length_map()) {
                    tour.apply_move(&mv).expect("valid move");
                    segments.apply_move(&mv, &tour).expect("segments in step");
                    let after = tour.recompute_length();
                    prop_assert!(after < before);
                    prop_assert_eq!(before - after, mv.improvement);
                    prop_assert!(valid_cycle(&tour));
                    prop_assert_eq!(tour.total_length(), after);
                    prop_assert!(segments.is_aligned(&tour));
                    before = after;
                }
                prop_assert!(first_improvement_swap(&tour).is_none());
            }

            #[test]
            fn climb_never_lengthens(
                points in coordinates(),
                seed in any::<u64>(),
                point_scan in any::<bool>(),
            ) {
                let x: Vec<f64> = points.iter().map(|p| p.0 as f64).collect();
                let y: Vec<f64> = points.iter().map(|p| p.1 as f64).collect();
                let initial = random_tour(points.len(), seed);
                let calc = DistanceCalculator::new(&x, &y).expect("valid");
                let mut tour = Tour::new(calc, &initial).expect("valid");
                let strategy = if point_scan {
                    SearchStrategy::PointScan
                } else {
                    SearchStrategy::SegmentScan
                };
                let config = SolverConfig::default()
                    .with_strategy(strategy)
                    .with_checkpoint_period(1);
                let mut writer = MemoryWriter::new();
                let result = HillClimber::run(&mut tour, &config, &mut writer).expect("run");

                prop_assert_eq!(result.termination, Termination::LocalOptimum);
                prop_assert!(result.final_length <= result.initial_length);
                prop_assert_eq!(result.final_length, tour.recompute_length());
                prop_assert_eq!(result.order.len(), points.len());
                prop_assert_eq!(result.order[0], 0);
                for pair in writer.saved.windows(2) {
                    prop_assert!(pair[1].length <= pair[0].length);
                }
            }

            #[test]
            fn order_matches_initial_permutation(n in 3usize..40, seed in any::<u64>()) {
                let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
                let y: Vec<f64> = (0..n).map(|i| ((i * 7) % 11) as f64).collect();
                let initial = random_tour(n, seed);
                let calc = DistanceCalculator::new(&x, &y).expect("valid");
                let tour = Tour::new(calc, &initial).expect("valid");
                prop_assert!(is_rotation_or_reflection(&tour.order(), &initial));
            }
        }
    }
}
