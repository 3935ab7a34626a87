//! # wind_core - ASCE 7 Wind Load Calculation Engine
//!
//! `wind_core` computes design wind pressures and forces per ASCE 7-16 and
//! ASCE 7-22 for buildings and other structures. All inputs and outputs are
//! JSON-serializable so the engine can sit behind a CLI, a form, or another
//! program.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure function from [`WindInput`] to [`WindResult`]
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Traceable**: every factor and coefficient carries its code citation
//! - **Degrades, never panics**: missing optional data gives "not applicable"
//!   sub-results and warnings instead of errors
//!
//! ## Quick Start
//!
//! ```rust
//! use wind_core::{calculate, WindInput};
//!
//! let input = WindInput {
//!     basic_wind_speed: 115.0,
//!     mean_roof_height: 30.0,
//!     ..WindInput::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.factors.qh.value - 28.27).abs() < 0.05);
//! ```
//!
//! ## Modules
//!
//! - [`input`] - input record, validation, and site conditions
//! - [`calculations`] - dispatcher and coefficient generators
//! - [`results`] - result records
//! - [`velocity_pressure`] - Kz, Ke, and qz
//! - [`gust`] - rigid and flexible gust-effect factors
//! - [`factors`] - exposure, risk, enclosure, and directionality tables
//! - [`pressure`] - design pressure combinator and ASD conversion
//! - [`interpolation`] - 1-D and N-axis table lookup
//! - [`references`] - code editions and citations
//! - [`units`] - unit systems and validated value types
//! - [`project`] - project container and settings
//! - [`file_io`] - `.wnd` files with atomic saves and locking
//! - [`errors`] - structured error types

pub mod calculations;
pub mod errors;
pub mod factors;
pub mod file_io;
pub mod gust;
pub mod input;
pub mod interpolation;
pub mod loads;
pub mod pressure;
pub mod project;
pub mod references;
pub mod results;
pub mod units;
pub mod velocity_pressure;

pub use calculations::calculate;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_input, load_project, save_project, FileLock};
pub use input::WindInput;
pub use project::{GlobalSettings, Project, ProjectMetadata, WindCalculation};
pub use results::WindResult;
