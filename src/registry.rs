//! SectorRegistry - the sector state manager
//!
//! Owns one record per catalog sector, applies status transitions and
//! answers statistics and filter queries. Every applied mutation persists
//! the full snapshot through the injected store before returning.

use chrono::{DateTime, Local, NaiveDate, Utc};
use eyre::Result;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domain::{SectorRecord, SectorStatus, Statistics};
use crate::store::SnapshotStore;
use crate::topology::{SectorId, Topology};

/// Outcome of a mutating operation. Precondition failures are values, not
/// errors; `Err` from a registry method means the snapshot write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition was applied and persisted
    Applied,
    /// The triple is not part of the catalog
    NotFound,
    /// The record exists but its current status does not allow the transition
    InvalidState(SectorStatus),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Conjunctive record filter; every supplied field must match
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Keep records checked in on or after this local date
    pub start_date: Option<NaiveDate>,
    /// Keep records checked in on or before this local date (end of day)
    pub end_date: Option<NaiveDate>,
    /// Exact block name
    pub block: Option<String>,
    /// Case-insensitive substring of the sector name
    pub name: Option<String>,
    /// Case-insensitive substring of the executor
    pub executor: Option<String>,
    /// Exact status
    pub status: Option<SectorStatus>,
}

impl RecordFilter {
    fn matches(&self, record: &SectorRecord) -> bool {
        // A record lacking a check-in fails any supplied date bound.
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(checkin) = record.checkin_time else {
                return false;
            };
            let local = checkin.with_timezone(&Local).naive_local();
            if let Some(start) = self.start_date
                && local < start.and_hms_opt(0, 0, 0).unwrap()
            {
                return false;
            }
            if let Some(end) = self.end_date
                && local > end.and_hms_milli_opt(23, 59, 59, 999).unwrap()
            {
                return false;
            }
        }

        if let Some(block) = &self.block
            && record.id.block != *block
        {
            return false;
        }

        if let Some(name) = &self.name
            && !record.id.name.to_lowercase().contains(&name.to_lowercase())
        {
            return false;
        }

        if let Some(executor) = &self.executor {
            match &record.executor {
                Some(value) if value.to_lowercase().contains(&executor.to_lowercase()) => {}
                _ => return false,
            }
        }

        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }

        true
    }
}

/// The sector state manager
pub struct SectorRegistry {
    /// Records in catalog enumeration order
    sectors: Vec<SectorRecord>,
    /// Identity triple to position in `sectors`
    index: HashMap<SectorId, usize>,
    store: Box<dyn SnapshotStore>,
}

impl SectorRegistry {
    /// Materialize one pending record per catalog sector, then overlay any
    /// stored snapshot. Entries whose identity is not in the catalog are
    /// ignored; sectors missing from the snapshot stay pending. A load
    /// failure is logged and the registry starts fresh.
    pub fn new(topology: Topology, store: Box<dyn SnapshotStore>) -> Self {
        let sectors: Vec<SectorRecord> = topology.ids().map(SectorRecord::new).collect();
        let index: HashMap<SectorId, usize> = sectors
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id.clone(), i))
            .collect();

        let mut registry = Self { sectors, index, store };

        match registry.store.load() {
            Ok(Some(snapshot)) => {
                let mut applied = 0;
                for record in snapshot {
                    if let Some(&i) = registry.index.get(&record.id) {
                        registry.sectors[i] = record;
                        applied += 1;
                    } else {
                        debug!(id = %record.id, "Ignoring snapshot entry outside the catalog");
                    }
                }
                info!(applied, total = registry.sectors.len(), "Restored sector state");
            }
            Ok(None) => {
                debug!(total = registry.sectors.len(), "No snapshot found, starting pending");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load snapshot, starting with all sectors pending");
            }
        }

        registry
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.sectors)
    }

    /// Start service on a pending sector
    pub fn checkin(&mut self, id: &SectorId, executor: &str, responsible: &str) -> Result<Transition> {
        self.checkin_at(id, executor, responsible, Utc::now())
    }

    pub(crate) fn checkin_at(
        &mut self,
        id: &SectorId,
        executor: &str,
        responsible: &str,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        let Some(&i) = self.index.get(id) else {
            return Ok(Transition::NotFound);
        };
        let record = &mut self.sectors[i];
        if record.status != SectorStatus::Pending {
            return Ok(Transition::InvalidState(record.status));
        }

        record.status = SectorStatus::InProgress;
        record.checkin_time = Some(now);
        record.executor = Some(executor.to_string());
        record.responsible = Some(responsible.to_string());

        self.persist()?;
        info!(id = %id, executor, "Checked in");
        Ok(Transition::Applied)
    }

    /// Finish service on an in-progress sector
    pub fn checkout(&mut self, id: &SectorId) -> Result<Transition> {
        self.checkout_at(id, Utc::now())
    }

    pub(crate) fn checkout_at(&mut self, id: &SectorId, now: DateTime<Utc>) -> Result<Transition> {
        let Some(&i) = self.index.get(id) else {
            return Ok(Transition::NotFound);
        };
        let record = &mut self.sectors[i];
        if record.status != SectorStatus::InProgress {
            return Ok(Transition::InvalidState(record.status));
        }

        let checkin = record.checkin_time.unwrap_or(now);
        let minutes = round_minutes(checkin, now);
        record.status = SectorStatus::Completed;
        record.checkout_time = Some(now);
        record.duration_minutes = Some(minutes);

        self.persist()?;
        info!(id = %id, minutes, "Checked out");
        Ok(Transition::Applied)
    }

    /// Mark a pending sector completed in a single step, with zero duration
    pub fn complete_directly(
        &mut self,
        id: &SectorId,
        executor: &str,
        responsible: &str,
        photos: Option<Vec<String>>,
    ) -> Result<Transition> {
        self.complete_directly_at(id, executor, responsible, photos, Utc::now())
    }

    pub(crate) fn complete_directly_at(
        &mut self,
        id: &SectorId,
        executor: &str,
        responsible: &str,
        photos: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        let Some(&i) = self.index.get(id) else {
            return Ok(Transition::NotFound);
        };
        let record = &mut self.sectors[i];
        if record.status != SectorStatus::Pending {
            return Ok(Transition::InvalidState(record.status));
        }

        record.status = SectorStatus::Completed;
        record.checkin_time = Some(now);
        record.checkout_time = Some(now);
        record.executor = Some(executor.to_string());
        record.responsible = Some(responsible.to_string());
        record.duration_minutes = Some(0);
        record.photos = photos;

        self.persist()?;
        info!(id = %id, executor, "Completed directly");
        Ok(Transition::Applied)
    }

    /// Restore a sector to its pristine pending shape, whatever its status
    pub fn reset(&mut self, id: &SectorId) -> Result<Transition> {
        let Some(&i) = self.index.get(id) else {
            return Ok(Transition::NotFound);
        };
        self.sectors[i].clear();
        self.persist()?;
        info!(id = %id, "Reset sector");
        Ok(Transition::Applied)
    }

    /// Restore every sector to pending, then persist
    pub fn reset_all(&mut self) -> Result<()> {
        for record in &mut self.sectors {
            record.clear();
        }
        self.persist()?;
        info!(total = self.sectors.len(), "Reset all sectors");
        Ok(())
    }

    /// Look up a single record; `None` if the triple is not in the catalog
    pub fn sector(&self, id: &SectorId) -> Option<&SectorRecord> {
        self.index.get(id).map(|&i| &self.sectors[i])
    }

    /// All records in catalog enumeration order
    pub fn all(&self) -> &[SectorRecord] {
        &self.sectors
    }

    /// Records of one block, in catalog order
    pub fn by_block(&self, block: &str) -> Vec<&SectorRecord> {
        self.sectors.iter().filter(|r| r.id.block == block).collect()
    }

    /// Completion counts over the whole catalog
    pub fn statistics(&self) -> Statistics {
        let total = self.sectors.len();
        let completed = self.count(SectorStatus::Completed);
        let in_progress = self.count(SectorStatus::InProgress);
        let pending = self.count(SectorStatus::Pending);
        let completion_percentage = if total > 0 {
            (completed as f64 * 100.0 / total as f64).round() as u32
        } else {
            0
        };

        Statistics {
            total,
            completed,
            in_progress,
            pending,
            completion_percentage,
        }
    }

    fn count(&self, status: SectorStatus) -> usize {
        self.sectors.iter().filter(|r| r.status == status).count()
    }

    /// Records whose check-in falls on the current local calendar date
    pub fn today(&self) -> Vec<&SectorRecord> {
        let today = Local::now().date_naive();
        self.sectors
            .iter()
            .filter(|r| {
                r.checkin_time
                    .is_some_and(|t| t.with_timezone(&Local).date_naive() == today)
            })
            .collect()
    }

    /// Records matching every supplied filter field, in catalog order
    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&SectorRecord> {
        self.sectors.iter().filter(|r| filter.matches(r)).collect()
    }
}

/// Whole minutes between two instants, rounded to nearest
fn round_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - start).num_milliseconds();
    (ms as f64 / 60_000.0).round() as i64
}
