use super::*;

const USAGE_NOTES: &str = "\
Reads cell ranges from a Google Sheets document.

  --document  the id in the sheet URL: docs.google.com/spreadsheets/d/<id>/edit
  --sheet     sheet position in the tab bar, starting at 0
  --range     suffix appended to the sheet title: '!X#:Y#', where X and Y are
              the first and last column letters and # the first and last rows,
              e.g. '!A1:C10'

Rate-limited reads (HTTP 429) are retried after a cool-down that climbs
when throttling repeats quickly and eases off when it does not.";

pub(super) fn handle_info() -> anyhow::Result<()> {
    println!("{USAGE_NOTES}");
    println!();
    println!("Token scopes required:");
    for scope in auth::SCOPES {
        println!("  - {scope}");
    }
    println!();
    println!(
        "Store a token with `token set` or `token import`, or export {}.",
        read_cmd::TOKEN_ENV
    );
    Ok(())
}
