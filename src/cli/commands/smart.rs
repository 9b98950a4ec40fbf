use chrono::Utc;

use super::{challenge::display_value, required, split_flags, CommandDefinition};
use crate::cli::{output, CliResult, ShellContext};
use crate::storage::StorageBackend;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "smart",
        "Pick the unpaid deposits that best fit the cash you have",
        "smart <name> <amount> [--apply] [--yes]",
        cmd_smart,
    )]
}

fn cmd_smart(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "smart <name> <amount> [--apply] [--yes]";
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, usage)?;
    let amount = required(&args, 1, usage)?;
    let mut challenge = context.storage.load(name)?;

    let selection = challenge.pick_best_deposits(amount);
    output::section(format!("Best combination for `{}`", challenge.name));
    output::line(format!("Total        : {}", context.money(selection.total)));
    if selection.is_empty() {
        output::line("Deposits     : none selected");
        output::warning("No combination found for that amount.");
        return Ok(());
    }
    let values: Vec<String> = selection.values.iter().map(|v| display_value(*v)).collect();
    output::line(format!("Deposits     : {}", values.join(", ")));

    if !flags.apply {
        output::info("Run again with --apply to mark these deposits as paid.");
        return Ok(());
    }
    let prompt = format!(
        "Mark {} deposits ({}) as paid?",
        selection.len(),
        context.money(selection.total)
    );
    if !context.confirm(&prompt, flags.yes)? {
        output::info("Nothing applied.");
        return Ok(());
    }

    let marked = challenge.apply_selection(&selection.indices, Utc::now())?;
    context.storage.save(&challenge)?;
    context.remember(&challenge.name)?;
    output::success(format!(
        "Marked: {} deposits, total {}.",
        marked,
        context.money(selection.total)
    ));
    Ok(())
}
