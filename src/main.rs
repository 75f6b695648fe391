use clap::Parser;
use pinvault::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr so exports on stdout stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinvault=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => pinvault::cli::commands::init::execute(&cli),
        Commands::Password { ref action } => {
            pinvault::cli::commands::password::execute(&cli, action)
        }
        Commands::Note { ref action } => pinvault::cli::commands::note::execute(&cli, action),
        Commands::Search { ref query } => pinvault::cli::commands::search::execute(&cli, query),
        Commands::Export { ref output } => {
            pinvault::cli::commands::export::execute(&cli, output.as_deref())
        }
        Commands::Import { ref file } => pinvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Completions { shell } => pinvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pinvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
