//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use exhaustive_core::prelude::*;
//! ```

// Program graph
pub use crate::program::{load_program, Program, ProgramGraph};

// Analysis
pub use crate::annotation::AnnotationResolver;
pub use crate::constset::{constants_of, Constant};
pub use crate::switches::{find_violations, SwitchAnalyzer, Violation};

// Builder API
pub use crate::checker::{CheckReport, Checker};

// Errors and configuration
pub use crate::config::{load_config, ExhaustiveConfig};
pub use crate::error::{ExhaustiveError, ExhaustiveResult};
