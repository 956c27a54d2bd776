use super::*;

pub(super) const TOKEN_ENV: &str = "SHEET_READER_TOKEN";

const CREDENTIAL_HINT: &str = "no usable access token: run `sheet-cli token import` or \
`sheet-cli token set`, or export SHEET_READER_TOKEN \
(setup guide: https://developers.google.com/sheets/api/quickstart/python)";

/// Adds setup guidance to credential failures.
pub(super) struct GuidedAuth(pub(super) Box<dyn AuthProvider>);

impl AuthProvider for GuidedAuth {
    fn credential(&self) -> anyhow::Result<Credential> {
        self.0.credential().context(CREDENTIAL_HINT)
    }
}

pub(super) fn handle_read(args: ReadArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(&default_config_path()?)?;
    let request = RangeRequest::new(args.document, args.sheet, args.range)?;
    let policy = effective_policy(&config, args.max_retries);
    let account = args.account.unwrap_or_else(|| config.account.clone());

    let client = GoogleSheetsClient::new(resolve_auth(&account), config.api_host.as_deref())?;
    let backoff = BackoffController::new(config.ladder()?);
    let mut reader = ReadOrchestrator::new(client, backoff, policy);

    info!(%request, account = account.as_str(), "Reading range");
    let values = reader
        .read(&request)
        .with_context(|| format!("read {request}"))?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&values).context("serialize values")?
    } else {
        render_rows(&values)
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

pub(super) fn effective_policy(config: &AppConfig, max_retries: Option<u32>) -> RetryPolicy {
    match max_retries {
        Some(max) => RetryPolicy::bounded(max),
        None => config.retry_policy(),
    }
}

fn resolve_auth(account: &str) -> GuidedAuth {
    let inner: Box<dyn AuthProvider> = match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            info!(source = TOKEN_ENV, "Using access token from environment");
            Box::new(StaticToken(token))
        }
        _ => Box::new(KeyringAuth::new(account)),
    };
    GuidedAuth(inner)
}
