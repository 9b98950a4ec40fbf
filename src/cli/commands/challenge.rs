use chrono::{Local, NaiveDate, Utc};

use super::{parse_count, required, split_flags, CommandDefinition};
use crate::challenge::{Challenge, ChallengeDetails, ScheduleChange};
use crate::cli::{output, CliError, CliResult, ShellContext};
use crate::errors::ChallengeError;
use crate::storage::StorageBackend;
use crate::utils::paths::slug;

const DEPOSITS_PER_ROW: usize = 10;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "new",
            "Create a challenge with numbered deposits 1..N",
            "new <name> [deposits] [--start YYYY-MM-DD] [--bank b] [--icon i]",
            cmd_new,
        ),
        CommandDefinition::new(
            "edit",
            "Change a challenge's name, bank, icon or start date",
            "edit <name> [--rename n] [--bank b] [--icon i] [--start YYYY-MM-DD]",
            cmd_edit,
        ),
        CommandDefinition::new("list", "List challenges and progress", "list", cmd_list),
        CommandDefinition::new(
            "show",
            "Show a challenge's deposits (defaults to the last one used)",
            "show [name]",
            cmd_show,
        ),
        CommandDefinition::new(
            "mark",
            "Mark one deposit as paid",
            "mark <name> <deposit-number>",
            cmd_mark,
        ),
        CommandDefinition::new(
            "resize",
            "Change the number of deposits",
            "resize <name> <deposits> [--yes]",
            cmd_resize,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a challenge",
            "delete <name> [--yes]",
            cmd_delete,
        ),
    ]
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "new <name> [deposits] [--start YYYY-MM-DD] [--bank b] [--icon i]";
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, usage)?;
    let count = match args.get(1) {
        Some(raw) => parse_count(raw, "deposits")?,
        None => context.config.default_deposit_count,
    };
    let start_date = match flags.start.or_else(|| args.get(2).copied()) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    if context.storage.challenge_path(name).exists() {
        return Err(CliError::Input(format!("challenge `{}` already exists", name)));
    }

    let mut challenge = Challenge::new(name.trim(), start_date, count);
    if let Some(bank) = flags.bank {
        challenge = challenge.with_bank(bank);
    }
    if let Some(icon) = flags.icon {
        challenge = challenge.with_icon(icon);
    }
    context.storage.save(&challenge)?;
    context.remember(&challenge.name)?;
    let progress = challenge.progress();
    output::success(format!(
        "Challenge `{}` created: {} deposits, goal {}.",
        challenge.name,
        progress.total_count,
        context.money(progress.target)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "edit <name> [--rename n] [--bank b] [--icon i] [--start YYYY-MM-DD]";
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, usage)?;
    let details = ChallengeDetails {
        name: flags.rename.map(str::to_string),
        bank: flags.bank.map(str::to_string),
        icon: flags.icon.map(str::to_string),
        start_date: flags.start.map(parse_date).transpose()?,
    };
    if details.is_empty() {
        return Err(CliError::Input(format!("usage: {}", usage)));
    }

    let mut challenge = context.storage.load(name)?;
    let old_name = challenge.name.clone();
    if !challenge.update_details(details)? {
        output::info(format!("`{}` is already up to date.", old_name));
        return Ok(());
    }

    let moved = slug(&challenge.name) != slug(&old_name);
    if moved && context.storage.challenge_path(&challenge.name).exists() {
        return Err(CliError::Input(format!(
            "challenge `{}` already exists",
            challenge.name
        )));
    }
    context.storage.save(&challenge)?;
    if moved {
        context.storage.delete(&old_name)?;
        context.forget(&old_name)?;
    }
    context.remember(&challenge.name)?;
    output::success(format!("Challenge `{}` updated.", challenge.name));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CliResult {
    let challenges = context.storage.list()?;
    if challenges.is_empty() {
        output::info("No challenges yet. Create one with `new <name>`.");
        return Ok(());
    }
    output::section("Challenges");
    for challenge in &challenges {
        let progress = challenge.progress();
        let status = if progress.completed { "  [completed]" } else { "" };
        output::line(format!(
            "{:<24} {:>4}/{:<4} {:>3}%  {} / {}{}",
            challenge.name,
            progress.done_count,
            progress.total_count,
            progress.percent,
            context.money(progress.saved),
            context.money(progress.target),
            status
        ));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let name = match args.first() {
        Some(name) => name.to_string(),
        None => context
            .config
            .last_opened_challenge
            .clone()
            .ok_or_else(|| CliError::Input("usage: show <name>".into()))?,
    };
    let challenge = context.storage.load(&name)?;
    let progress = challenge.progress();

    output::section(&challenge.name);
    output::line(format!("Start        : {}", context.date(challenge.start_date)));
    if let Some(bank) = &challenge.bank {
        output::line(format!("Bank         : {}", bank));
    }
    if let Some(icon) = &challenge.icon {
        output::line(format!("Icon         : {}", icon));
    }
    output::line(format!(
        "Saved        : {} / {} ({}%)",
        context.money(progress.saved),
        context.money(progress.target),
        progress.percent
    ));
    output::line(format!(
        "Deposits     : {} of {}",
        progress.done_count, progress.total_count
    ));
    output::line("");
    for row in challenge.deposits.chunks(DEPOSITS_PER_ROW) {
        let cells: Vec<String> = row
            .iter()
            .map(|slot| {
                let marker = if slot.done { '*' } else { ' ' };
                format!("{:>6}{}", display_value(slot.value), marker)
            })
            .collect();
        output::line(cells.join(""));
    }
    output::line("(* paid)");
    context.remember(&challenge.name)?;
    Ok(())
}

fn cmd_mark(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "mark <name> <deposit-number>";
    let name = required(args, 0, usage)?;
    let number = parse_count(required(args, 1, usage)?, "deposit number")?;
    let mut challenge = context.storage.load(name)?;

    if !challenge.mark_deposit(number - 1, Utc::now())? {
        output::warning(format!("Deposit #{} was already paid.", number));
        return Ok(());
    }
    context.storage.save(&challenge)?;
    context.remember(&challenge.name)?;
    let value = challenge.deposits[number - 1].value;
    output::success(format!(
        "You deposited {} more into `{}`.",
        context.money(value),
        challenge.name
    ));
    Ok(())
}

fn cmd_resize(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "resize <name> <deposits> [--yes]";
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, usage)?;
    let count = parse_count(required(&args, 1, usage)?, "deposits")?;
    let mut challenge = context.storage.load(name)?;

    match challenge.resize(count) {
        ScheduleChange::Unchanged => {
            output::info(format!("`{}` already has {} deposits.", challenge.name, count));
            return Ok(());
        }
        ScheduleChange::Extended { from, to } => {
            output::success(format!(
                "You raised your goal from {} to {} deposits. Keep it up!",
                from, to
            ));
        }
        ScheduleChange::Reduced { from, to } => {
            output::warning(format!(
                "You lowered your goal from {} to {} deposits. Remember what you are saving for.",
                from, to
            ));
            if !context.confirm("Drop the deposits past the new end?", flags.yes)? {
                output::info("Nothing changed.");
                return Ok(());
            }
        }
    }
    context.storage.save(&challenge)?;
    output::success(format!(
        "Goal is now {}.",
        context.money(challenge.progress().target)
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, "delete <name> [--yes]")?;
    if !context.storage.challenge_path(name).exists() {
        return Err(ChallengeError::NotFound(name.to_string()).into());
    }
    if !context.confirm(&format!("Delete challenge `{}`?", name), flags.yes)? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    context.storage.delete(name)?;
    context.forget(name)?;
    output::success(format!("Challenge `{}` deleted.", name));
    Ok(())
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{}` is not a YYYY-MM-DD date", raw)))
}

/// Whole values print without decimals; fractional ones keep two places.
pub(crate) fn display_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
