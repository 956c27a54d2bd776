use super::*;
pub(in crate::cli) fn prompt_token_path() -> anyhow::Result<PathBuf> {
    print!("Token file path >> ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = input.trim();
    if value.is_empty() {
        anyhow::bail!("no token file path given");
    }
    Ok(PathBuf::from(value))
}
