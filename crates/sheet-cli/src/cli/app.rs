use super::*;
pub fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!(command = command_label(&cli.command), "Running command");

    match cli.command {
        Commands::Read(args) => handle_read(args),
        Commands::Token(args) => handle_token(args),
        Commands::Config(args) => handle_config(args),
        Commands::Info => handle_info(),
    }
}

pub(super) fn command_label(command: &Commands) -> &'static str {
    match command {
        Commands::Read(_) => "read",
        Commands::Token(_) => "token",
        Commands::Config(_) => "config",
        Commands::Info => "info",
    }
}
