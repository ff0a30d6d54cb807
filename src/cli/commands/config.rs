use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                println!("{}", fs::read_to_string(&path)?);
            } else {
                messages::warning(format!(
                    "No config file at {:?}; showing effective defaults.",
                    path
                ));
                println!(
                    "{}",
                    serde_yaml::to_string(cfg).unwrap_or_else(|_| String::new())
                );
            }
        }

        if *check {
            let findings = cfg.check();
            if findings.is_empty() {
                messages::success("Configuration OK.");
            } else {
                for f in &findings {
                    messages::warning(f);
                }
            }
        }
    }

    Ok(())
}
