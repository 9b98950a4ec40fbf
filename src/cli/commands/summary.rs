use super::CommandDefinition;
use crate::challenge::PortfolioSummary;
use crate::cli::{output, CliResult, ShellContext};
use crate::storage::StorageBackend;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "summary",
        "Totals across every challenge and savings over time",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CliResult {
    let challenges = context.storage.list()?;
    let summary = PortfolioSummary::from_challenges(&challenges);

    output::section("Summary");
    output::line(format!("Saved        : {}", context.money(summary.saved)));
    output::line(format!("Goal total   : {}", context.money(summary.target)));
    output::line(format!("Deposits made: {}", summary.paid_deposits));

    if !summary.challenges.is_empty() {
        output::section("By challenge");
        for totals in &summary.challenges {
            output::line(format!(
                "{:<24} {} / {}",
                totals.name,
                context.money(totals.saved),
                context.money(totals.target)
            ));
        }
    }

    output::section("Timeline");
    if summary.timeline.is_empty() {
        output::info("No deposits yet.");
        return Ok(());
    }
    for point in &summary.timeline {
        output::line(format!(
            "{}  +{:<14} {}",
            context.date(point.date),
            context.money(point.deposited),
            context.money(point.cumulative)
        ));
    }
    Ok(())
}
