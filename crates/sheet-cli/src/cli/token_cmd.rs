use super::*;
pub(super) fn handle_token(args: TokenArgs) -> anyhow::Result<()> {
    match args.command {
        TokenCommands::Set(args) => handle_set_token(args),
        TokenCommands::Import(args) => handle_import_token(args),
        TokenCommands::Show(args) => handle_show_token(args),
        TokenCommands::Delete(args) => handle_delete_token(args),
    }
}

fn account_or_default(account: Option<String>) -> anyhow::Result<String> {
    match account {
        Some(account) => Ok(account),
        None => Ok(AppConfig::load(&default_config_path()?)?.account),
    }
}

pub(super) fn handle_set_token(args: SetTokenArgs) -> anyhow::Result<()> {
    let account = account_or_default(args.account.clone())?;
    match oauth_token_from_args(&args, auth::now_epoch_seconds())? {
        Some(token) => auth::set_oauth_token(&account, token)?,
        None => auth::set_token(&account, &args.access_token)?,
    }
    auth::get_token(&account).context("read token from keyring after write")?;
    println!("Token stored for {account}");
    Ok(())
}

/// Refresh data or an expiry turns the token into a stored OAuth payload; otherwise it is kept raw.
pub(super) fn oauth_token_from_args(
    args: &SetTokenArgs,
    now: i64,
) -> anyhow::Result<Option<OAuthToken>> {
    if args.refresh_token.is_none() && args.expires_in.is_none() {
        return Ok(None);
    }
    let client_id = args.client_id.clone().unwrap_or_default();
    if args.refresh_token.is_some() && client_id.trim().is_empty() {
        anyhow::bail!("--refresh-token needs a non-empty --client-id to refresh the token");
    }
    Ok(Some(OAuthToken {
        access_token: args.access_token.clone(),
        refresh_token: args.refresh_token.clone(),
        expires_at: args.expires_in.map(|secs| now + secs),
        token_endpoint: args
            .token_endpoint
            .clone()
            .unwrap_or_else(|| auth::GOOGLE_TOKEN_ENDPOINT.to_string()),
        client_id,
        client_secret: args.client_secret.clone(),
        scope: None,
    }))
}

pub(super) fn handle_import_token(args: ImportTokenArgs) -> anyhow::Result<()> {
    let account = account_or_default(args.account)?;
    let path = match args.path {
        Some(path) => path,
        None => prompt_token_path()?,
    };
    let token = auth::read_authorized_user_file(&path)?;
    auth::set_oauth_token(&account, token)?;
    auth::get_token(&account).context("read token from keyring after import")?;
    println!("Token imported from {} for {account}", path.display());
    Ok(())
}

pub(super) fn handle_show_token(args: AccountArgs) -> anyhow::Result<()> {
    let account = account_or_default(args.account)?;
    let status = auth::token_status(&account)?;
    println!("Account: {account}");
    println!(
        "{}",
        describe_token_status(&status, auth::now_epoch_seconds())
    );
    Ok(())
}

pub(super) fn handle_delete_token(args: AccountArgs) -> anyhow::Result<()> {
    let account = account_or_default(args.account)?;
    auth::delete_token(&account)?;
    println!("Token removed for {account}");
    Ok(())
}
