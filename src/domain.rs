//! Domain types: sector records, status, statistics
//!
//! A SectorRecord is the mutable state of one catalog sector. Identity is
//! fixed at creation; only the status-dependent fields change, and always
//! through the registry's transition operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::topology::SectorId;

/// Upper bound on photos per record, enforced at the presentation boundary.
/// The registry itself stores whatever list it is given.
pub const MAX_PHOTOS: usize = 5;

/// Service status of a sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SectorStatus {
    /// Not yet serviced
    #[default]
    Pending,
    /// Checked in, service underway
    InProgress,
    /// Service finished
    Completed,
}

impl std::fmt::Display for SectorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for SectorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown status: {other} (expected pending, in-progress or completed)")),
        }
    }
}

/// Mutable state of one sector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorRecord {
    /// Identity triple, immutable after creation
    #[serde(flatten)]
    pub id: SectorId,

    /// Current service status
    pub status: SectorStatus,

    /// When service started (set on check-in or direct completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<DateTime<Utc>>,

    /// When service ended (set on check-out or direct completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<DateTime<Utc>>,

    /// Person performing the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,

    /// Person accountable for the sector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,

    /// Whole minutes between check-in and check-out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,

    /// Opaque image references attached at completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl SectorRecord {
    /// Create a pristine pending record for a catalog sector
    pub fn new(id: SectorId) -> Self {
        Self {
            id,
            status: SectorStatus::Pending,
            checkin_time: None,
            checkout_time: None,
            executor: None,
            responsible: None,
            duration_minutes: None,
            photos: None,
        }
    }

    /// Restore the pristine pending shape, keeping identity
    pub fn clear(&mut self) {
        self.status = SectorStatus::Pending;
        self.checkin_time = None;
        self.checkout_time = None;
        self.executor = None;
        self.responsible = None;
        self.duration_minutes = None;
        self.photos = None;
    }

    /// Check whether every status-dependent field is unset
    pub fn is_pristine(&self) -> bool {
        self.status == SectorStatus::Pending
            && self.checkin_time.is_none()
            && self.checkout_time.is_none()
            && self.executor.is_none()
            && self.responsible.is_none()
            && self.duration_minutes.is_none()
            && self.photos.is_none()
    }
}

/// Aggregated completion counts over the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// round(100 * completed / total), 0 when the catalog is empty
    pub completion_percentage: u32,
}
