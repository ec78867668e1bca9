//! Switch exhaustiveness analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │   switch_site.rs    │     │ switch_coverage.rs  │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  Walk files, build  │────▶│  Applicability and  │
//! │  switch sites       │     │  missing constants  │
//! └─────────────────────┘     └──────────┬──────────┘
//!                                        │
//!                   ┌────────────────────┴──────┐
//!                   ▼                           ▼
//!        ┌─────────────────────┐     ┌─────────────────────┐
//!        │    annotation.rs    │     │     constset.rs     │
//!        │  is the type marked │     │  constants of type  │
//!        └─────────────────────┘     └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use exhaustive_core::{AnnotationResolver, SwitchAnalyzer, find_violations};
//!
//! let analyzer = SwitchAnalyzer::new(&program, AnnotationResolver::new(&program));
//! for package in program.initial_packages() {
//!     for file in &package.files {
//!         for v in find_violations(&analyzer, file).violations {
//!             println!("{}:{}: {} missing", v.file, v.position.line, v.missing.len());
//!         }
//!     }
//! }
//! ```

pub mod switch_coverage;
pub mod switch_site;

pub use switch_coverage::{SwitchAnalyzer, SwitchOutcome};
pub use switch_site::{find_violations, FileFindings, SwitchSite, SwitchStats, Violation};
