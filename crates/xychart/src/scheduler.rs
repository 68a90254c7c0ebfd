//! Drives viewport jobs from an explicit per-frame tick.

use std::collections::VecDeque;

use ahash::HashMap;

use crate::job::{JobAction, JobContext, JobEffects, JobId, JobKind, JobState, ViewportJob};

/// How a newly scheduled job treats jobs that are already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulePolicy {
    /// Cancel running animated and decelerating jobs first.
    #[default]
    CancelPrevious,
    /// Let every job run to completion; later jobs apply on top of earlier ones.
    Concurrent,
}

/// Finished job states kept for [`JobScheduler::state_of`].
const HISTORY_LIMIT: usize = 64;

/// Owns live jobs and steps them against a [`JobContext`].
///
/// Jobs scheduled before the viewport has a content area are held back and
/// released, in order, on the first tick after layout.
#[derive(Debug, Default)]
pub struct JobScheduler {
    policy: SchedulePolicy,
    next_id: JobId,
    pending: VecDeque<ViewportJob>,
    running: Vec<ViewportJob>,
    history: HashMap<JobId, JobState>,
    history_order: VecDeque<JobId>,
}

impl JobScheduler {
    pub fn new(policy: SchedulePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> SchedulePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SchedulePolicy) {
        self.policy = policy;
    }

    /// Schedule a job. Instant jobs run before this returns.
    pub fn schedule(&mut self, action: JobAction, ctx: &mut JobContext<'_>) -> (JobId, JobEffects) {
        self.next_id += 1;
        let job = ViewportJob::new(self.next_id, action);
        let id = job.id();

        if !ctx.viewport.has_content() || !self.pending.is_empty() {
            tracing::debug!(id, kind = ?job.kind(), "Viewport has no content yet, job deferred");
            self.pending.push_back(job);
            return (id, JobEffects::empty());
        }

        (id, self.start(job, ctx))
    }

    fn start(&mut self, mut job: ViewportJob, ctx: &mut JobContext<'_>) -> JobEffects {
        if self.policy == SchedulePolicy::CancelPrevious {
            self.cancel_running();
        }

        tracing::debug!(id = job.id(), kind = ?job.kind(), "Viewport job started");
        match job.kind() {
            JobKind::Instant => {
                let effects = job.step(0.0, ctx);
                self.record(&job);
                effects
            }
            JobKind::Animated | JobKind::Decelerating => {
                self.running.push(job);
                JobEffects::empty()
            }
        }
    }

    /// Advance every running job by `dt` seconds.
    pub fn tick(&mut self, dt: f64, ctx: &mut JobContext<'_>) -> JobEffects {
        puffin::profile_scope!("JobScheduler::tick");

        let mut effects = JobEffects::empty();
        if ctx.viewport.has_content() {
            while let Some(job) = self.pending.pop_front() {
                effects |= self.start(job, ctx);
            }
        }

        for job in &mut self.running {
            effects |= job.step(dt, ctx);
        }

        let mut index = 0;
        while index < self.running.len() {
            if self.running[index].is_finished() {
                let job = self.running.remove(index);
                self.record(&job);
            } else {
                index += 1;
            }
        }

        effects
    }

    /// Cancel a job by id. Returns `false` if it is not live.
    pub fn cancel(&mut self, id: JobId) -> bool {
        if let Some(index) = self.running.iter().position(|job| job.id() == id) {
            let mut job = self.running.remove(index);
            job.cancel();
            self.record(&job);
            return true;
        }
        if let Some(index) = self.pending.iter().position(|job| job.id() == id) {
            if let Some(mut job) = self.pending.remove(index) {
                job.cancel();
                self.record(&job);
                return true;
            }
        }
        false
    }

    /// Cancel every running job; pending jobs stay queued.
    pub fn cancel_running(&mut self) {
        for mut job in std::mem::take(&mut self.running) {
            job.cancel();
            tracing::debug!(id = job.id(), "Viewport job cancelled");
            self.record(&job);
        }
    }

    /// Cancel every live job, pending ones included.
    pub fn cancel_all(&mut self) {
        self.cancel_running();
        for mut job in std::mem::take(&mut self.pending) {
            job.cancel();
            self.record(&job);
        }
    }

    /// Stop inertial panning. Returns `true` if a deceleration was running.
    pub fn stop_deceleration(&mut self) -> bool {
        let ids: Vec<JobId> = self
            .running
            .iter()
            .filter(|job| job.kind() == JobKind::Decelerating)
            .map(|job| job.id())
            .collect();
        for id in &ids {
            self.cancel(*id);
        }
        !ids.is_empty()
    }

    pub fn is_decelerating(&self) -> bool {
        self.running.iter().any(|job| job.kind() == JobKind::Decelerating)
    }

    /// State of a live job, or of a recently finished one.
    pub fn state_of(&self, id: JobId) -> Option<JobState> {
        self.running
            .iter()
            .chain(self.pending.iter())
            .find(|job| job.id() == id)
            .map(|job| job.state())
            .or_else(|| self.history.get(&id).copied())
    }

    pub fn running(&self) -> impl Iterator<Item = &ViewportJob> {
        self.running.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.pending.is_empty()
    }

    fn record(&mut self, job: &ViewportJob) {
        if self.history.insert(job.id(), job.state()).is_none() {
            self.history_order.push_back(job.id());
        }
        while self.history_order.len() > HISTORY_LIMIT {
            if let Some(old) = self.history_order.pop_front() {
                self.history.remove(&old);
            }
        }
    }
}
