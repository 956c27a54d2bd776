use super::*;
#[derive(Parser)]
#[command(author, version, about)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "Read a cell range from a sheet")]
    Read(ReadArgs),
    #[command(about = "Manage the stored access token")]
    Token(TokenArgs),
    #[command(about = "Manage config")]
    Config(ConfigArgs),
    #[command(about = "Explain document ids, sheet indexes and range syntax")]
    Info,
}

#[derive(Parser)]
pub(super) struct ReadArgs {
    #[arg(long, help = "Spreadsheet document id (from its URL)")]
    pub(super) document: String,
    #[arg(long, default_value_t = 0, help = "Zero-based sheet index")]
    pub(super) sheet: usize,
    #[arg(long, help = "Range suffix appended to the sheet title, e.g. '!A1:C10'")]
    pub(super) range: String,
    #[arg(long, help = "Give up after this many rate-limited retries")]
    pub(super) max_retries: Option<u32>,
    #[arg(long, help = "Keyring account holding the token")]
    pub(super) account: Option<String>,
    #[arg(long, help = "Print rows as JSON")]
    pub(super) json: bool,
}

#[derive(Parser)]
pub(super) struct TokenArgs {
    #[command(subcommand)]
    pub(super) command: TokenCommands,
}

#[derive(clap::Subcommand)]
pub(super) enum TokenCommands {
    #[command(about = "Store an access token, optionally refreshable")]
    Set(SetTokenArgs),
    #[command(about = "Import an authorized-user token.json file")]
    Import(ImportTokenArgs),
    #[command(about = "Show whether a token is stored and when it expires")]
    Show(AccountArgs),
    #[command(about = "Remove the stored token")]
    Delete(AccountArgs),
}

#[derive(Parser)]
pub(super) struct SetTokenArgs {
    #[arg(long)]
    pub(super) access_token: String,
    #[arg(long, requires = "client_id")]
    pub(super) refresh_token: Option<String>,
    #[arg(long, requires = "refresh_token")]
    pub(super) client_id: Option<String>,
    #[arg(long)]
    pub(super) client_secret: Option<String>,
    #[arg(long, help = "Seconds until the access token expires")]
    pub(super) expires_in: Option<i64>,
    #[arg(long)]
    pub(super) token_endpoint: Option<String>,
    #[arg(long)]
    pub(super) account: Option<String>,
}

#[derive(Parser)]
pub(super) struct ImportTokenArgs {
    #[arg(long, help = "Path to token.json; prompted for when omitted")]
    pub(super) path: Option<PathBuf>,
    #[arg(long)]
    pub(super) account: Option<String>,
}

#[derive(Parser)]
pub(super) struct AccountArgs {
    #[arg(long)]
    pub(super) account: Option<String>,
}

#[derive(Parser)]
pub(super) struct ConfigArgs {
    #[command(subcommand)]
    pub(super) command: ConfigCommands,
}

#[derive(clap::Subcommand)]
pub(super) enum ConfigCommands {
    #[command(about = "Write a config file with default values")]
    Init(InitArgs),
    #[command(about = "Print the effective config")]
    Show,
}

#[derive(Parser)]
pub(super) struct InitArgs {
    #[arg(long, help = "Overwrite an existing config file")]
    pub(super) force: bool,
}
