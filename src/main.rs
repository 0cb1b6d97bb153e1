//! Voice of the City entry point

use std::process::ExitCode;

use clap::Parser;

use voice_of_the_city::cli::{
    app::{load_merged_config, run_server, EXIT_ERROR},
    args::{Cli, Commands, ServeArgs},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_of_the_city::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let serve_args = match cli.command {
        Some(Commands::Config { action }) => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };

    // Merge: defaults < file < env < cli
    let config = load_merged_config(serve_args.to_config()).await;

    run_server(config).await
}
