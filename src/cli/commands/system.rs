use super::{CommandDefinition, CommandRegistry};
use crate::challenge::Challenge;
use crate::cli::{output, CliError, CliResult, ShellContext};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CliResult {
    let build = build_info::current();
    output::section(format!("Challenge Core {}", build.version));
    output::line(format!("  {:<13}: v{}", "Schema", Challenge::schema_version_default()));
    for (label, value) in build.rows() {
        output::line(format!("  {:<13}: {}", label, value));
    }
    #[cfg(feature = "ffi")]
    {
        output::line(format!("  {:<13}: {}", "FFI version", crate::ffi::FFI_VERSION));
    }
    Ok(())
}

fn cmd_help(_context: &mut ShellContext, args: &[&str]) -> CliResult {
    let registry = CommandRegistry::default();
    let Some(name) = args.first().map(|name| name.to_lowercase()) else {
        print_overview(&registry);
        return Ok(());
    };
    match registry.get(&name) {
        Some(command) => {
            output::section(command.name);
            output::line(command.description);
            output::line(format!("usage: {}", command.usage));
            Ok(())
        }
        None => {
            if let Some(suggestion) = registry.suggest(&name) {
                output::info(format!("Suggestion: `{}`?", suggestion));
            }
            Err(CliError::UnknownCommand(name))
        }
    }
}

pub(crate) fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    for command in registry.iter() {
        output::line(format!("  {:<48} {}", command.usage, command.description));
    }
}
