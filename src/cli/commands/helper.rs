use super::{CommandResult, CommandSummary};
use crate::issues::Issue;

pub fn finish(summary: CommandSummary, json: bool) -> CommandResult {
    let problem_count = summary.problem_count();
    CommandResult {
        summary,
        problem_count,
        json,
    }
}

/// Sort issues into report order: file, line, column.
pub fn sorted(mut issues: Vec<Issue>) -> Vec<Issue> {
    issues.sort();
    issues
}
