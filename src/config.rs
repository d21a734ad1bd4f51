use crate::spin::SpinConfig;
use color_eyre::eyre::{
    Result,
    eyre,
};
use std::path::PathBuf;

pub const DEFAULT_LOG_DIR: &str = ".logs";

pub const USAGE: &str = "Usage: six-chamber [--seed <u64>] [--log-dir <path>] [--no-fps]\n\
     \n\
     Flags:\n\
       --seed <u64>        Seed the bullet draw for a reproducible game\n\
       --log-dir <path>    Directory for the rolling log file (defaults to .logs)\n\
       --no-fps            Hide the frame-rate overlay\n\
     \n\
     Keys: s/Enter start | f/Space fire | r play again | q/Esc quit\n\
     Clicking the button under the cylinder does the same.";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
    pub show_fps: bool,
    pub spin: SpinConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            seed: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            show_fps: true,
            spin: SpinConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CliCommand {
    Run(AppConfig),
    Help,
}

pub fn parse_cli_args<I>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config = AppConfig::default();
    let mut seed: Option<u64> = None;
    let mut log_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let raw = args
                    .next()
                    .ok_or_else(|| eyre!("--seed requires a number argument"))?;
                if seed.is_some() {
                    return Err(eyre!("--seed may only be specified once"));
                }
                let value = raw
                    .parse::<u64>()
                    .map_err(|_| eyre!("--seed expects an unsigned integer, got {raw}"))?;
                seed = Some(value);
            }
            "--log-dir" => {
                let dir = args
                    .next()
                    .ok_or_else(|| eyre!("--log-dir requires a path argument"))?;
                if log_dir.is_some() {
                    return Err(eyre!("--log-dir may only be specified once"));
                }
                log_dir = Some(PathBuf::from(dir));
            }
            "--no-fps" => config.show_fps = false,
            "--help" | "-h" => return Ok(CliCommand::Help),
            other => return Err(eyre!("Unknown argument: {other}")),
        }
    }

    config.seed = seed;
    if let Some(dir) = log_dir {
        config.log_dir = dir;
    }
    Ok(CliCommand::Run(config))
}
