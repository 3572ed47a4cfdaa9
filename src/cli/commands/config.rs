use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &std::path::Path) -> AppResult<()> {
    if let Commands::Config { print_config: true } = cmd {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", cfg.to_redacted_yaml()?);
    }
    Ok(())
}
