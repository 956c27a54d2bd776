use super::*;
pub(super) fn handle_config(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Init(args) => handle_init(args),
        ConfigCommands::Show => handle_show(),
    }
}

pub(super) fn handle_init(args: InitArgs) -> anyhow::Result<()> {
    let config_path = default_config_path()?;
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::default().save(&config_path)?;
    println!("Config saved to {}", config_path.display());
    Ok(())
}

pub(super) fn handle_show() -> anyhow::Result<()> {
    let config_path = default_config_path()?;
    let config = AppConfig::load(&config_path)?;
    println!("Config path: {}", config_path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("serialize config")?
    );
    Ok(())
}
