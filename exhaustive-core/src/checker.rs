//! Builder API for running an exhaustiveness check over a program graph.
//!
//! ```rust,ignore
//! use exhaustive_core::prelude::*;
//!
//! let program = load_program(&[PathBuf::from("build/graph")])?;
//! let report = Checker::new(&program)
//!     .parallel(true)
//!     .ignore_patterns(["generated/*"])
//!     .run();
//!
//! report.write_plain(&mut std::io::stderr(), Path::new("."))?;
//! ```

use std::io::{self, Write};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::annotation::AnnotationResolver;
use crate::program::{ProgramGraph, SourceFile};
use crate::report;
use crate::switches::{find_violations, FileFindings, SwitchAnalyzer, SwitchStats, Violation};

/// Configures and runs one check. Borrows the graph for the run only.
pub struct Checker<'g, G: ProgramGraph + ?Sized> {
    graph: &'g G,

    /// Analyze files on the rayon pool
    parallel: bool,

    /// Cache annotation lookups by type
    memoize: bool,

    /// File path patterns to skip
    ignored_patterns: Vec<String>,
}

impl<'g, G: ProgramGraph + ?Sized> Checker<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            parallel: true,
            memoize: false,
            ignored_patterns: Vec::new(),
        }
    }

    /// Enable or disable parallel per-file analysis. Output is identical
    /// either way.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Enable or disable memoized annotation lookups.
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Add patterns for files to skip (`prefix*`, `*suffix`, or substring).
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Run the analysis over every file of every initial package.
    pub fn run(&self) -> CheckReport {
        let resolver = if self.memoize {
            AnnotationResolver::memoized(self.graph)
        } else {
            AnnotationResolver::new(self.graph)
        };
        let analyzer = SwitchAnalyzer::new(self.graph, resolver);

        let files: Vec<&SourceFile> = self
            .graph
            .initial_packages()
            .into_iter()
            .flat_map(|p| p.files.iter())
            .filter(|f| !self.is_ignored(&f.name))
            .collect();

        let per_file = map_files(&files, self.parallel, |file| find_violations(&analyzer, file));

        let mut report = CheckReport {
            files_analyzed: files.len(),
            ..CheckReport::default()
        };
        for findings in per_file {
            report.stats += findings.stats;
            report.violations.extend(findings.violations);
        }

        info!(
            files = report.files_analyzed,
            switches = report.stats.total_switches,
            applicable = report.stats.applicable,
            unresolved = report.stats.unresolved,
            violations = report.stats.violations,
            "exhaustiveness check complete"
        );
        report
    }

    /// Check if a file path matches any ignored pattern.
    fn is_ignored(&self, name: &str) -> bool {
        for pattern in &self.ignored_patterns {
            if let Some(prefix) = pattern.strip_suffix('*') {
                if name.starts_with(prefix) {
                    return true;
                }
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            } else if name.contains(pattern.as_str()) {
                return true;
            }
        }
        false
    }
}

#[cfg(feature = "parallel")]
fn map_files<F>(files: &[&SourceFile], parallel: bool, f: F) -> Vec<FileFindings>
where
    F: Fn(&SourceFile) -> FileFindings + Sync + Send,
{
    if parallel {
        // Indexed collect keeps file order
        files.par_iter().map(|&file| f(file)).collect()
    } else {
        files.iter().map(|&file| f(file)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_files<F>(files: &[&SourceFile], _parallel: bool, f: F) -> Vec<FileFindings>
where
    F: Fn(&SourceFile) -> FileFindings,
{
    files.iter().map(|&file| f(file)).collect()
}

/// Result of one check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Violations in traversal order (package, file, then source order)
    pub violations: Vec<Violation>,
    pub stats: SwitchStats,
    pub files_analyzed: usize,
}

impl CheckReport {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Plain text report; nothing at all when there are no violations.
    pub fn write_plain<W: Write>(&self, out: &mut W, base: &Path) -> io::Result<()> {
        report::write_plain(out, &self.violations, base)
    }

    pub fn write_json<W: Write>(&self, out: &mut W, base: &Path) -> io::Result<()> {
        report::write_json(out, &self.violations, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Program;

    #[test]
    fn test_ignore_patterns() {
        let program = Program::default();
        let checker = Checker::new(&program).ignore_patterns(["gen/*", "*_test.go", "vendor"]);
        assert!(checker.is_ignored("gen/days.go"));
        assert!(checker.is_ignored("cal/days_test.go"));
        assert!(checker.is_ignored("third_party/vendor/x.go"));
        assert!(!checker.is_ignored("cal/days.go"));
    }

    #[test]
    fn test_empty_program_has_no_violations() {
        let program = Program::default();
        let report = Checker::new(&program).run();
        assert!(!report.has_violations());
        assert_eq!(report.files_analyzed, 0);
        assert_eq!(report.stats, SwitchStats::default());

        let mut out = Vec::new();
        report.write_plain(&mut out, Path::new(".")).unwrap();
        assert!(out.is_empty());
    }
}
