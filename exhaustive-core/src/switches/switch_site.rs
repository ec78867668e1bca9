//! Switch discovery: walks a file and feeds every tagged switch to the
//! [`SwitchAnalyzer`].
//!
//! Switches are visited in source order, outer before nested, so findings of
//! one file come out in a stable order without sorting.

use std::ops::AddAssign;

use serde::Serialize;

use super::switch_coverage::{SwitchAnalyzer, SwitchOutcome};
use crate::constset::Constant;
use crate::program::visit::{self, Visit};
use crate::program::{CaseClause, Position, ProgramGraph, SourceFile, SwitchStmt, TypeRef};

/// A switch statement as seen by the analyzer.
#[derive(Debug, Clone, Copy)]
pub struct SwitchSite<'a> {
    /// File containing the switch
    pub file: &'a str,
    /// Position of the `switch` keyword
    pub position: Position,
    /// Resolved type of the tag expression
    pub discriminant: Option<&'a TypeRef>,
    /// Clauses in source order
    pub clauses: &'a [CaseClause],
}

impl<'a> SwitchSite<'a> {
    pub fn new<G: ProgramGraph + ?Sized>(
        graph: &G,
        file: &'a SourceFile,
        switch: &'a SwitchStmt,
    ) -> Self {
        Self {
            file: &file.name,
            position: switch.span.start,
            discriminant: switch.tag.as_ref().and_then(|tag| graph.type_of(tag)),
            clauses: &switch.clauses,
        }
    }
}

/// A switch over an exhaustive enum that misses constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File containing the switch
    pub file: String,
    /// Position of the switch
    pub position: Position,
    /// Missing constants in constant set order
    pub missing: Vec<Constant>,
}

/// Counters over all visited switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwitchStats {
    /// Every switch statement, tagged or not
    pub total_switches: usize,
    /// Switches over an exhaustive enum
    pub applicable: usize,
    /// Applicable switches accepted through a `default` clause
    pub catch_all: usize,
    /// Applicable switches skipped because a case was unresolvable
    pub unresolved: usize,
    /// Applicable switches that miss at least one constant
    pub violations: usize,
}

impl AddAssign for SwitchStats {
    fn add_assign(&mut self, other: Self) {
        self.total_switches += other.total_switches;
        self.applicable += other.applicable;
        self.catch_all += other.catch_all;
        self.unresolved += other.unresolved;
        self.violations += other.violations;
    }
}

/// Findings for one file.
#[derive(Debug, Clone, Default)]
pub struct FileFindings {
    pub violations: Vec<Violation>,
    pub stats: SwitchStats,
}

struct SwitchCollector<'a, 'g, G: ProgramGraph + ?Sized> {
    analyzer: &'a SwitchAnalyzer<'g, G>,
    file: &'a SourceFile,
    findings: FileFindings,
}

impl<'a, 'g, G: ProgramGraph + ?Sized> SwitchCollector<'a, 'g, G> {
    fn record(&mut self, switch: &'a SwitchStmt) {
        let site = SwitchSite::new(self.analyzer.graph(), self.file, switch);
        let stats = &mut self.findings.stats;

        match self.analyzer.classify(&site) {
            SwitchOutcome::NotApplicable => {}
            SwitchOutcome::Covered => stats.applicable += 1,
            SwitchOutcome::CatchAll => {
                stats.applicable += 1;
                stats.catch_all += 1;
            }
            SwitchOutcome::Unresolved => {
                stats.applicable += 1;
                stats.unresolved += 1;
            }
            SwitchOutcome::Missing(missing) => {
                stats.applicable += 1;
                stats.violations += 1;
                self.findings.violations.push(Violation {
                    file: self.file.name.clone(),
                    position: site.position,
                    missing,
                });
            }
        }
    }
}

impl<'a, 'g, G: ProgramGraph + ?Sized> Visit<'a> for SwitchCollector<'a, 'g, G> {
    fn visit_switch(&mut self, switch: &'a SwitchStmt) {
        self.findings.stats.total_switches += 1;

        if let Some(init) = &switch.init {
            self.visit_stmt(init);
        }
        if let Some(tag) = &switch.tag {
            self.record(switch);
            self.visit_expr(tag);
        }
        for clause in &switch.clauses {
            visit::walk_clause(self, clause);
        }
    }
}

/// Analyzes every switch in `file`.
pub fn find_violations<G: ProgramGraph + ?Sized>(
    analyzer: &SwitchAnalyzer<'_, G>,
    file: &SourceFile,
) -> FileFindings {
    let mut collector = SwitchCollector {
        analyzer,
        file,
        findings: FileFindings::default(),
    };
    collector.visit_file(file);
    collector.findings
}
