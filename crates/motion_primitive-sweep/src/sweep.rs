//! Sweep orchestration
//!
//! Builds a primitive for every grid candidate and keeps the accepted ones.
//! The parallel variant shards the candidates by start state, fills one
//! store per worker and merges the shards in order, so both variants return
//! the same primitives in the same order.

use motion_primitive::{
    DeclineReason, Outcome, PrimitiveBuilder, PrimitiveConfig, PrimitiveObserver,
    PrimitiveRequest, PrimitiveStore, TracingObserver,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Result;
use crate::grid::{Candidate, SweepGrid};

/// Candidate counts of a sweep
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepSummary {
    /// Candidates evaluated
    pub candidates: usize,
    /// Primitives accepted
    pub accepted: usize,
    /// Declined because the search window held no feasible duration
    pub bracket_lost: usize,
    /// Declined because a stationary joint changed velocity
    pub infinite_acceleration: usize,
    /// Declined because the duration was below the minimum
    pub duration_too_short: usize,
}

impl SweepSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        self.candidates += 1;
        match outcome.decline_reason() {
            None => self.accepted += 1,
            Some(DeclineReason::BracketLost { .. }) => self.bracket_lost += 1,
            Some(DeclineReason::InfiniteAcceleration { .. }) => self.infinite_acceleration += 1,
            Some(DeclineReason::DurationTooShort { .. }) => self.duration_too_short += 1,
        }
    }

    /// Total declined candidates
    pub fn declined(&self) -> usize {
        self.bracket_lost + self.infinite_acceleration + self.duration_too_short
    }

    /// Add the counts of another summary
    pub fn merge(&mut self, other: &SweepSummary) {
        self.candidates += other.candidates;
        self.accepted += other.accepted;
        self.bracket_lost += other.bracket_lost;
        self.infinite_acceleration += other.infinite_acceleration;
        self.duration_too_short += other.duration_too_short;
    }
}

/// Accepted primitives and counts of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub store: PrimitiveStore,
    pub summary: SweepSummary,
}

/// Sweep every candidate of `grid` on the current thread
pub fn run_sweep<O: PrimitiveObserver + ?Sized>(
    grid: &SweepGrid,
    config: &PrimitiveConfig,
    observer: &mut O,
) -> Result<SweepResult> {
    grid.validate()?;
    let builder = PrimitiveBuilder::try_new(*config)?;

    let result = sweep_candidates(
        &builder,
        &grid.candidates(),
        &grid.velocity_limit,
        grid.candidate_count(),
        observer,
    )?;
    info!(
        candidates = result.summary.candidates,
        accepted = result.summary.accepted,
        "sweep finished"
    );
    Ok(result)
}

/// Sweep every candidate of `grid` on up to `jobs` blocking workers
#[async_backtrace::framed]
pub async fn run_sweep_parallel(
    grid: &SweepGrid,
    config: &PrimitiveConfig,
    jobs: usize,
) -> Result<SweepResult> {
    grid.validate()?;
    let builder = PrimitiveBuilder::try_new(*config)?;

    let starts = grid.velocity_states();
    let jobs = jobs.clamp(1, starts.len());
    let shard_size = starts.len().div_ceil(jobs);

    let mut handles = Vec::new();
    for (shard, shard_starts) in starts.chunks(shard_size).enumerate() {
        let candidates = grid.candidates_from(shard_starts);
        let velocity_limit = grid.velocity_limit.clone();
        debug!(shard, candidates = candidates.len(), "spawning sweep worker");
        let handle = tokio::task::spawn_blocking(move || {
            sweep_candidates(
                &builder,
                &candidates,
                &velocity_limit,
                candidates.len(),
                &mut TracingObserver,
            )
        });
        handles.push(handle);
    }

    // Merge in spawn order to keep the sequential ordering
    let mut store = PrimitiveStore::with_capacity(grid.candidate_count());
    let mut summary = SweepSummary::default();
    for handle in handles {
        let shard = handle.await??;
        summary.merge(&shard.summary);
        store.merge(shard.store)?;
    }

    info!(
        candidates = summary.candidates,
        accepted = summary.accepted,
        jobs,
        "parallel sweep finished"
    );
    Ok(SweepResult { store, summary })
}

fn sweep_candidates<O: PrimitiveObserver + ?Sized>(
    builder: &PrimitiveBuilder,
    candidates: &[Candidate],
    velocity_limit: &[f64],
    capacity: usize,
    observer: &mut O,
) -> Result<SweepResult> {
    let mut store = PrimitiveStore::with_capacity(capacity);
    let mut summary = SweepSummary::default();

    for candidate in candidates {
        let request = PrimitiveRequest::new(
            &candidate.displacement,
            &candidate.start_velocity,
            &candidate.end_velocity,
            velocity_limit,
        )?;
        let outcome = builder.build_observed(&request, &mut *observer);
        summary.record(&outcome);
        store.record(outcome)?;
    }

    Ok(SweepResult { store, summary })
}
