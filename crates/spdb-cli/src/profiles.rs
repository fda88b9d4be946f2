//! Profile command handlers for the CLI.
//!
//! `extract` works fully offline unless `--save` is given; `list` reads
//! from the database.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};

use spdb_core::{Platform, ProfileRecord};

#[derive(Debug)]
pub(crate) struct ExtractOptions {
    pub url: String,
    pub html_file: PathBuf,
    pub save: bool,
    pub compact: bool,
    pub min_html_len: usize,
}

/// Extract a profile from a saved page and print it as JSON.
///
/// With `save`, the record is printed first and then stored, so a database
/// failure still leaves the extraction result on stdout.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the request is invalid, or
/// saving was requested and failed.
pub(crate) async fn run_extract(options: &ExtractOptions) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(&options.html_file)
        .with_context(|| format!("failed to read {}", options.html_file.display()))?;

    tracing::debug!(
        path = %options.html_file.display(),
        html_len = html.len(),
        "captured page read"
    );

    let record = extract_checked(&options.url, &html, options.min_html_len)?;
    println!("{}", render_record(&record, options.compact)?);

    if options.save {
        let pool = crate::connect().await?;
        let outcome = spdb_db::save_profile(&pool, &record)
            .await
            .context("profile extracted but not saved")?;
        tracing::info!(
            platform = %record.platform(),
            profile = record.label(),
            id = outcome.id,
            created = outcome.created,
            "profile saved"
        );
        eprintln!(
            "{} {} profile {} (id {})",
            if outcome.created { "created" } else { "updated" },
            record.platform(),
            record.label(),
            outcome.id
        );
    }

    Ok(())
}

fn extract_checked(url: &str, html: &str, min_html_len: usize) -> anyhow::Result<ProfileRecord> {
    if let Err(e) = spdb_extract::validate_request(Some(url), Some(html), min_html_len) {
        anyhow::bail!("invalid request: {}", e.messages().join("; "));
    }
    Ok(spdb_extract::extract_profile(url, html)?)
}

fn render_record(record: &ProfileRecord, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(record)?
    } else {
        serde_json::to_string_pretty(record)?
    };
    Ok(json)
}

pub(crate) fn detect_label(url: &str) -> &'static str {
    spdb_extract::detect_platform(url).map_or("unsupported", Platform::as_str)
}

/// Print stored profiles for `platform` as a table, newest capture first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(
    pool: &sqlx::PgPool,
    platform: Platform,
    limit: i64,
) -> anyhow::Result<()> {
    let limit = limit.clamp(1, 200);

    match platform {
        Platform::LinkedIn => {
            let rows = spdb_db::list_linkedin_profiles(pool, limit).await?;
            if rows.is_empty() {
                println!("no linkedin profiles stored");
                return Ok(());
            }
            println!(
                "{:<28}{:<12}{:<13}{:<22}HEADLINE",
                "NAME", "FOLLOWERS", "CONNECTIONS", "SCRAPED AT"
            );
            for row in &rows {
                println!(
                    "{:<28}{:<12}{:<13}{:<22}{}",
                    truncate(&row.name, 26),
                    row.follower_count,
                    row.connection_count,
                    fmt_time(row.scraped_at),
                    truncate(&row.headline, 50)
                );
            }
        }
        Platform::Instagram => {
            let rows = spdb_db::list_instagram_profiles(pool, limit).await?;
            if rows.is_empty() {
                println!("no instagram profiles stored");
                return Ok(());
            }
            println!(
                "{:<24}{:<12}{:<12}{:<8}{:<6}{:<22}NAME",
                "USERNAME", "FOLLOWERS", "FOLLOWING", "POSTS", "FLAGS", "SCRAPED AT"
            );
            for row in &rows {
                let flags = format!(
                    "{}{}",
                    if row.is_verified { "V" } else { "-" },
                    if row.is_private { "P" } else { "-" }
                );
                println!(
                    "{:<24}{:<12}{:<12}{:<8}{:<6}{:<22}{}",
                    truncate(&row.username, 22),
                    row.follower_count,
                    row.following_count,
                    row.post_count,
                    flags,
                    fmt_time(row.scraped_at),
                    truncate(&row.display_name, 40)
                );
            }
        }
    }

    Ok(())
}

fn fmt_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Jo Bloggs (@jo) &bull; Instagram photos and videos">
        <meta property="og:description" content="1,234 Followers, 56 Following, 7 Posts - Hello there">
        </head><body></body></html>"#;

    #[test]
    fn extract_checked_returns_record() {
        let record = extract_checked("https://www.instagram.com/jo/", PAGE, 100).unwrap();
        let ProfileRecord::Instagram(profile) = record else {
            panic!("expected instagram record");
        };
        assert_eq!(profile.username, "jo");
        assert_eq!(profile.follower_count, 1_234);
        assert_eq!(profile.post_count, 7);
    }

    #[test]
    fn extract_checked_reports_validation_problems() {
        let err = extract_checked("https://example.com/jo", "<p>x</p>", 100).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid request:"), "{message}");
        assert!(message.contains("too short"), "{message}");
        assert!(message.contains("Unsupported URL"), "{message}");
    }

    #[test]
    fn compact_rendering_is_single_line() {
        let record = extract_checked("https://www.instagram.com/jo/", PAGE, 100).unwrap();
        let compact = render_record(&record, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"platform\":\"instagram\""));
        assert!(render_record(&record, false).unwrap().contains('\n'));
    }

    #[test]
    fn detect_label_names_platform_or_unsupported() {
        assert_eq!(detect_label("https://www.linkedin.com/in/jane/"), "linkedin");
        assert_eq!(detect_label("https://instagram.com/jo"), "instagram");
        assert_eq!(detect_label("https://example.com/"), "unsupported");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }
}
