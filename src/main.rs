use color_eyre::eyre::Result;
use six_chamber::{
    config::{
        self,
        CliCommand,
    },
    logging,
};

mod app;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let app_config = match config::parse_cli_args(std::env::args().skip(1))? {
        CliCommand::Help => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        CliCommand::Run(app_config) => app_config,
    };
    logging::init_tracing(&app_config.log_dir)?;
    tracing::info!(seed = ?app_config.seed, "starting six-chamber");
    app::run_app(app_config).await
}
