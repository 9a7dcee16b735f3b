//! SectorStore - pest control tracking for hospital facilities
//!
//! Tracks service completion sector by sector across a fixed facility
//! catalog (block → floor → sector). The registry owns one mutable record
//! per sector, applies status transitions (check-in, check-out, direct
//! completion, reset), answers statistics and filter queries, and persists
//! its full state after every mutation.
//!
//! # Architecture
//!
//! ```text
//! Topology (static catalog)          SnapshotStore (injected)
//!         │                                  │
//!         ▼                                  ▼
//! SectorRegistry ── checkin/checkout/complete/reset ──► snapshot.json
//!         │
//!         ├── statistics / today / filtered queries
//!         └── export::to_csv
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sectorstore::{SectorRegistry, Topology, FileStore, SectorId};
//!
//! let topology = Topology::embedded()?;
//! let store = FileStore::new("/var/lib/sectorstore/snapshot.json");
//! let mut registry = SectorRegistry::new(topology, Box::new(store));
//!
//! let id = SectorId::new("BLOCO A", "1º Pavimento", "UTI");
//! registry.checkin(&id, "João", "Maria")?;
//! registry.checkout(&id)?;
//! println!("{:?}", registry.statistics());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod registry;
pub mod store;
pub mod topology;

pub use domain::{MAX_PHOTOS, SectorRecord, SectorStatus, Statistics};
pub use registry::{RecordFilter, SectorRegistry, Transition};
pub use store::{FileStore, MemoryStore, Snapshot, SnapshotStore};
pub use topology::{SectorId, Topology};

/// Default file name for the durable snapshot blob
pub const SNAPSHOT_FILE: &str = "snapshot.json";
