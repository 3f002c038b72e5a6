/// DicomSleuth Core: enumeration, tag extraction, dispatch and benchmarking.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, services, tests).
///
/// # Modules
///
/// - [`model`]: tag schema, extracted records, and display helpers.
/// - [`scanner`]: recursive file enumeration using `jwalk`.
/// - [`extract`]: partial DICOM decode of a fixed field set for one file.
/// - [`dispatch`]: sequential, partitioned, and work-stealing extraction strategies.
/// - [`bench`]: benchmark driver that times every strategy over one file list.
/// - [`config`]: serde-backed scan configuration.
/// - [`error`]: error types shared across modules.
pub mod bench;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod model;
pub mod scanner;
