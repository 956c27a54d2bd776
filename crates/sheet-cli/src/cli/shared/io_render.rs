use super::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One line per row, cells separated by tabs.
pub(in crate::cli) fn render_rows(values: &ValueTable) -> String {
    values
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(in crate::cli) fn epoch_to_label(epoch: i64) -> String {
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()
        .and_then(|timestamp| timestamp.format(&Rfc3339).ok())
        .unwrap_or_else(|| epoch.to_string())
}

pub(in crate::cli) fn describe_token_status(status: &TokenStatus, now: i64) -> String {
    match status {
        TokenStatus::Missing => "No token stored".to_string(),
        TokenStatus::Raw => "Raw access token stored (no expiry or refresh data)".to_string(),
        TokenStatus::OAuth {
            expires_at,
            refreshable,
        } => {
            let expiry = match expires_at {
                Some(at) if *at <= now => format!("expired at {}", epoch_to_label(*at)),
                Some(at) => format!("expires at {}", epoch_to_label(*at)),
                None => "no expiry recorded".to_string(),
            };
            let refresh = if *refreshable {
                "refreshable"
            } else {
                "not refreshable"
            };
            format!("OAuth token stored, {expiry}, {refresh}")
        }
    }
}
