//! exhaustive-core: exhaustiveness checking for switches over annotated enums
//!
//! Some languages give a named integer type no compiler-enforced
//! exhaustiveness. This library lets a source comment opt such a type in:
//!
//! ```text
//! //exhaustive-enum
//! type Day int
//! ```
//!
//! Every `switch` over a `Day` value must then either name all of `Day`'s
//! constants or have a `default` clause.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use exhaustive_core::prelude::*;
//!
//! let program = load_program(&paths)?;
//! let report = Checker::new(&program).run();
//! report.write_plain(&mut std::io::stderr(), &base_dir)?;
//! ```
//!
//! # Module Organization
//!
//! - [`program`]: The program graph (syntax, resolved types, constant values)
//!   and snapshot loading
//! - [`annotation`]: Is a named type marked exhaustive?
//! - [`constset`]: Constants declared for a named type
//! - [`switches`]: Per-switch coverage and file traversal
//! - [`report`]: Plain text and JSON rendering
//! - [`checker`]: Fluent builder API for a whole run
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `parallel` (default): Analyze files on the rayon thread pool. Snapshot
//!   loading is parallel regardless of this feature.

pub mod annotation;
pub mod checker;
pub mod config;
pub mod constset;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod program;
pub mod report;
pub mod switches;

// Error types
pub use error::{ExhaustiveError, ExhaustiveResult, IoResultExt};

// Program graph
pub use program::{
    gather_snapshot_files, load_program, load_snapshot, ConstValue, NamedType, Program,
    ProgramGraph, TypeRef, SNAPSHOT_SUFFIX,
};

// Analysis
pub use annotation::{AnnotationResolver, EXHAUSTIVE_MARKER};
pub use constset::{constants_of, Constant};
pub use switches::{
    find_violations, FileFindings, SwitchAnalyzer, SwitchOutcome, SwitchSite, SwitchStats,
    Violation,
};

// Builder API
pub use checker::{CheckReport, Checker};

// Configuration
pub use config::{load_config, ExhaustiveConfig, OutputConfig, CONFIG_FILE};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{format_position, write_json, write_plain, BANNER};
