//! Background jobs for virasat.
//!
//! This crate provides the periodic maintenance work around the catalog:
//!
//! - **Scheduler**: interval-driven job execution on the runtime
//! - **Photo import**: the weekly top-up of site photos from the image
//!   search collaborator

pub mod photo_import;
pub mod scheduler;

pub use photo_import::PhotoImportExecutor;
pub use scheduler::{run_scheduler, JobExecutor, SchedulerConfig};
