//! # fuelwatch Core Library
//!
//! Builds fuel status reports for in-game structures and posts them to a
//! chat webhook. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Source**: tabular snapshots (JSON or CSV) of per-structure
//!   time-remaining rows, behind the [`DataSource`] trait
//! - **Report**: sorting, expiry computation, chat markup and chunking
//!   into messages under the platform size limit
//! - **Integrations**: message delivery behind the [`Notifier`] trait
//!   (Discord webhook, in-memory recorder)
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StatusReportBuilder`]: turns snapshot rows into delivered messages
//! - [`Config`]: application configuration management
//! - [`DiscordNotifier`]: webhook delivery

pub mod error;
pub mod integrations;
pub mod report;
pub mod source;
pub mod storage;

pub use error::{ConfigError, CoreError, NotifyError, RecordError, SourceError};
pub use integrations::{DiscordNotifier, Notifier, RecordingNotifier};
pub use report::{RenderedReport, ReportSummary, StatusReportBuilder, StructureRecord};
pub use source::{DataSource, RawRow, SnapshotFile, StaticSource};
pub use storage::Config;
