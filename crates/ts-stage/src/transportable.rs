//! Persons and containers with their itineraries.

use std::collections::BTreeMap;

use log::{debug, warn};
use ts_core::{DepartProcedure, EdgeId, SimTime, TransportableId, TransportableKind};

use crate::{DrivingStage, ReservationDispatcher, SimNet, Stage, StageError, StageResult, WaitingStage};

// ── TransportableInfo ─────────────────────────────────────────────────────────

/// What a stage needs to know about the entity running it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportableInfo {
    pub id:                   TransportableId,
    pub kind:                 TransportableKind,
    pub depart_procedure:     DepartProcedure,
    pub num_stages:           usize,
    /// Stages from the active one to the end, inclusive.
    pub num_remaining_stages: usize,
}

impl TransportableInfo {
    /// `true` for the stage right after the waiting-for-depart placeholder.
    #[inline]
    pub fn is_first_real_stage(&self) -> bool {
        self.num_remaining_stages + 1 == self.num_stages
    }
}

// ── Transportable ─────────────────────────────────────────────────────────────

/// A person or container working through its plan.
#[derive(Clone, Debug)]
pub struct Transportable {
    pub id:               TransportableId,
    pub kind:             TransportableKind,
    pub depart_procedure: DepartProcedure,
    stages:               Vec<Stage>,
    current:              usize,
    aborted:              bool,
}

impl Transportable {
    /// An entity standing at `pos` on `edge` until it departs; append its
    /// legs with [`add_stage`](Self::add_stage).
    pub fn new(id: impl Into<TransportableId>, kind: TransportableKind, edge: EdgeId, pos: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            depart_procedure: DepartProcedure::Given,
            stages: vec![Stage::Waiting(WaitingStage::for_depart(edge, pos))],
            current: 0,
            aborted: false,
        }
    }

    pub fn with_depart_procedure(mut self, procedure: DepartProcedure) -> Self {
        self.depart_procedure = procedure;
        self
    }

    pub fn add_stage(&mut self, stage: Stage) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[inline]
    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Stages from the active one to the end, inclusive.
    #[inline]
    pub fn num_remaining_stages(&self) -> usize {
        self.stages.len().saturating_sub(self.current)
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        if self.aborted { None } else { self.stages.get(self.current) }
    }

    pub fn current_stage_mut(&mut self) -> Option<&mut Stage> {
        if self.aborted { None } else { self.stages.get_mut(self.current) }
    }

    /// The active stage if it is a ride.
    pub fn current_driving(&self) -> Option<&DrivingStage> {
        self.current_stage().and_then(Stage::as_driving)
    }

    pub fn current_driving_mut(&mut self) -> Option<&mut DrivingStage> {
        self.current_stage_mut().and_then(Stage::as_driving_mut)
    }

    pub fn is_finished(&self) -> bool {
        self.aborted || self.current >= self.stages.len()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    fn info_at(&self, index: usize) -> TransportableInfo {
        TransportableInfo {
            id:                   self.id.clone(),
            kind:                 self.kind,
            depart_procedure:     self.depart_procedure,
            num_stages:           self.stages.len(),
            num_remaining_stages: self.stages.len().saturating_sub(index),
        }
    }

    pub fn info(&self) -> TransportableInfo {
        self.info_at(self.current)
    }

    /// Leave the waiting-for-depart placeholder and start the first leg.
    ///
    /// # Errors
    ///
    /// [`StageError::EmptyPlan`] if no leg follows the placeholder,
    /// [`StageError::AlreadyDeparted`] if called twice, or whatever the
    /// first leg's activation returns.
    pub fn depart<D: ReservationDispatcher>(&mut self, net: &mut SimNet<D>, now: SimTime) -> StageResult<bool> {
        if self.stages.len() < 2 {
            return Err(StageError::EmptyPlan(self.id.clone()));
        }
        if self.current != 0 || self.aborted {
            return Err(StageError::AlreadyDeparted(self.id.clone()));
        }
        self.proceed(net, now)
    }

    /// End the active stage and activate the next one.  Returns `false`
    /// when the plan is complete.
    ///
    /// If the next stage fails to activate, the entity stays on the stage
    /// that just ended.
    pub fn proceed<D: ReservationDispatcher>(&mut self, net: &mut SimNet<D>, now: SimTime) -> StageResult<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        let info = self.info();
        if let Some(msg) = self.stages[self.current].set_arrived(net, &info, now) {
            warn!("{} '{}': {msg}", self.kind, self.id);
        }

        let next = self.current + 1;
        if next >= self.stages.len() {
            self.current = next;
            debug!("{} '{}' completed its plan at {now}", self.kind, self.id);
            return Ok(false);
        }
        let info = self.info_at(next);
        let (done, rest) = self.stages.split_at_mut(next);
        rest[0].proceed(net, &info, now, &done[next - 1])?;
        self.current = next;
        debug!("{} '{}' starts stage {next} ({})", self.kind, self.id, self.stages[next].stage_type());
        Ok(true)
    }

    /// Remove the entity from the simulation, cutting the active stage short.
    pub fn abort<D: ReservationDispatcher>(&mut self, net: &mut SimNet<D>) {
        if self.is_finished() {
            return;
        }
        let info = self.info();
        self.stages[self.current].abort(net, &info);
        self.aborted = true;
        debug!("{} '{}' aborted", self.kind, self.id);
    }
}

// ── TransportableStore ────────────────────────────────────────────────────────

/// All persons and containers, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct TransportableStore {
    entries: BTreeMap<TransportableId, Transportable>,
}

impl TransportableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, t: Transportable) -> StageResult<()> {
        if self.entries.contains_key(&t.id) {
            return Err(StageError::DuplicateTransportable(t.id));
        }
        self.entries.insert(t.id.clone(), t);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: &TransportableId) -> Option<&Transportable> {
        self.entries.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: &TransportableId) -> Option<&mut Transportable> {
        self.entries.get_mut(id)
    }

    /// Look up `id` or fail with [`StageError::UnknownTransportable`].
    pub fn require_mut(&mut self, id: &TransportableId) -> StageResult<&mut Transportable> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| StageError::UnknownTransportable(id.clone()))
    }

    pub fn remove(&mut self, id: &TransportableId) -> Option<Transportable> {
        self.entries.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transportable> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
