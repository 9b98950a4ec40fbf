use std::collections::HashMap;

use strsim::levenshtein;

pub mod backup;
pub mod challenge;
pub mod config;
pub mod smart;
pub mod summary;
pub mod system;

use crate::cli::{output, CliError, CliResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(challenge::definitions());
    commands.extend(smart::definitions());
    commands.extend(backup::definitions());
    commands.extend(summary::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CliResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    /// Closest known command name, if any is within three edits.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.order
            .iter()
            .map(|name| (levenshtein(name, input), *name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(all_definitions())
    }
}

/// Routes `args[0]` to its handler; no arguments prints the overview.
pub fn dispatch(context: &mut ShellContext, args: &[String]) -> CliResult {
    let registry = CommandRegistry::default();
    let Some((command, rest)) = args.split_first() else {
        system::print_overview(&registry);
        return Ok(());
    };
    let name = command.to_lowercase();
    let name = match name.as_str() {
        "--help" | "-h" => "help",
        "--version" | "-V" => "version",
        other => other,
    };
    let Some(definition) = registry.get(name) else {
        if let Some(suggestion) = registry.suggest(name) {
            output::info(format!("Suggestion: `{}`?", suggestion));
        }
        return Err(CliError::UnknownCommand(command.clone()));
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    tracing::debug!(command = definition.name, args = rest.len(), "dispatching");
    (definition.handler)(context, &rest)
}

/// Switches and options shared by the commands that change data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags<'a> {
    pub apply: bool,
    pub yes: bool,
    pub bank: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub start: Option<&'a str>,
    pub rename: Option<&'a str>,
}

/// Separates `--flag` style switches and `--option <value>` pairs from
/// positional arguments.
pub fn split_flags<'a>(args: &[&'a str]) -> CliResult<(Vec<&'a str>, Flags<'a>)> {
    let mut positional = Vec::new();
    let mut flags = Flags::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        let slot = match arg {
            "--apply" => {
                flags.apply = true;
                continue;
            }
            "--yes" | "-y" => {
                flags.yes = true;
                continue;
            }
            "--bank" => &mut flags.bank,
            "--icon" => &mut flags.icon,
            "--start" => &mut flags.start,
            "--rename" => &mut flags.rename,
            flag if flag.starts_with("--") => {
                return Err(CliError::Input(format!("unknown flag `{}`", flag)));
            }
            value => {
                positional.push(value);
                continue;
            }
        };
        let value = iter
            .next()
            .filter(|value| !value.starts_with("--"))
            .ok_or_else(|| CliError::Input(format!("`{}` needs a value", arg)))?;
        *slot = Some(value);
    }
    Ok((positional, flags))
}

pub(crate) fn required<'a>(args: &[&'a str], index: usize, usage: &str) -> CliResult<&'a str> {
    args.get(index)
        .copied()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CliError::Input(format!("usage: {}", usage)))
}

pub(crate) fn parse_count(raw: &str, what: &str) -> CliResult<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| CliError::Input(format!("{} must be a positive whole number", what)))
}
