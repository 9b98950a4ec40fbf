use super::{parse_count, CommandDefinition};
use crate::cli::{output, CliError, CliResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change preferences",
        "config [set <locale|currency|deposits> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CliResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        output::section("Configuration");
        output::line(format!("locale   : {}", context.config.locale));
        output::line(format!("currency : {}", context.config.currency));
        output::line(format!("deposits : {}", context.config.default_deposit_count));
        output::line(format!(
            "last     : {}",
            context
                .config
                .last_opened_challenge
                .as_deref()
                .unwrap_or("-")
        ));
        output::line(format!("file     : {}", context.config_manager.path().display()));
        return Ok(());
    }

    if !args[0].eq_ignore_ascii_case("set") || args.len() < 3 {
        return Err(CliError::Input(
            "usage: config set <locale|currency|deposits> <value>".into(),
        ));
    }
    let value = args[2].trim();
    match args[1].to_lowercase().as_str() {
        "locale" => context.config.locale = value.to_string(),
        "currency" => context.config.currency = value.to_uppercase(),
        "deposits" => context.config.default_deposit_count = parse_count(value, "deposits")?,
        other => {
            return Err(CliError::Input(format!("unknown configuration key `{}`", other)));
        }
    }
    context.persist_config()?;
    output::success(format!("Updated {} to {}.", args[1], value));
    Ok(())
}
