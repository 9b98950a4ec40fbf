use std::path::Path;

use super::{parse_count, required, split_flags, CommandDefinition};
use crate::cli::{output, CliError, CliResult, ShellContext};
use crate::storage::StorageBackend;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "backups",
            "List saved copies of a challenge, newest first",
            "backups <name>",
            cmd_backups,
        ),
        CommandDefinition::new(
            "restore",
            "Bring back a saved copy listed by `backups`",
            "restore <name> <backup-number> [--yes]",
            cmd_restore,
        ),
    ]
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let name = required(args, 0, "backups <name>")?;
    let backups = context.storage.list_backups(name)?;
    if backups.is_empty() {
        output::warning("No backups found.");
        return Ok(());
    }
    output::section(format!("Backups of `{}`", name));
    for (position, path) in backups.iter().enumerate() {
        output::line(format!("{:>3}. {}", position + 1, file_label(path)));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CliResult {
    let usage = "restore <name> <backup-number> [--yes]";
    let (args, flags) = split_flags(args)?;
    let name = required(&args, 0, usage)?;
    let number = parse_count(required(&args, 1, usage)?, "backup number")?;
    let backups = context.storage.list_backups(name)?;
    let Some(backup) = backups.get(number - 1) else {
        return Err(CliError::Input(format!(
            "backup #{} does not exist ({} available)",
            number,
            backups.len()
        )));
    };

    let prompt = format!("Replace `{}` with {}?", name, file_label(backup));
    if !context.confirm(&prompt, flags.yes)? {
        output::info("Nothing restored.");
        return Ok(());
    }
    let challenge = context.storage.restore_backup(name, backup)?;
    context.remember(&challenge.name)?;
    let progress = challenge.progress();
    output::success(format!(
        "Restored `{}`: {} of {} deposits paid.",
        challenge.name, progress.done_count, progress.total_count
    ));
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
