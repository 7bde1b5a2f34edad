use clap::Parser;
use nepsum::cli::setup::load_config_with_overrides;
use nepsum::cli::{handle_completions, handle_config_init, Cli, Commands, ConfigCommands};
use nepsum::logging::init_tracing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summarize(args) => match load_config_with_overrides(&args.service) {
            Ok(config) => {
                if let Err(e) = init_tracing(&config.logging) {
                    eprintln!("Warning: Failed to initialize logging: {}", e);
                }
                match nepsum::cli::summarize::run_summarize(&args, &config).await {
                    Ok(output) => {
                        println!("{}", output);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        },
        Commands::Session(args) => match load_config_with_overrides(&args.service) {
            Ok(config) => {
                if let Err(e) = init_tracing(&config.logging) {
                    eprintln!("Warning: Failed to initialize logging: {}", e);
                }
                nepsum::cli::session::run_session(&args, &config).await
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
