use crate::{
    core::{DynamicReference, report::{ConsistencyReport, UsageReport}},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Check(ConsistencyReport),
    Scan(ScanSummary),
    Init(InitSummary),
}

impl CommandSummary {
    /// Problems that make the run fail.
    pub fn problem_count(&self) -> usize {
        match self {
            CommandSummary::Check(report) => report.problem_count(),
            CommandSummary::Scan(summary) => summary.report.problem_count(),
            CommandSummary::Init(summary) => usize::from(!summary.created),
        }
    }
}

#[derive(Debug)]
pub struct ScanSummary {
    pub report: UsageReport,
    /// Issues for the console report, already filtered by `--all`/`--unused`.
    pub issues: Vec<Issue>,
    /// Covered keys left out of `issues`.
    pub hidden_covered: usize,
    /// Printed with `--verbose`.
    pub dynamic: Vec<DynamicReference>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running keycheck commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of problems that should fail the run (exit status 1).
    pub problem_count: usize,
    /// Print the JSON document instead of the console report.
    pub json: bool,
}
