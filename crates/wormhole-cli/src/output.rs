//! Plain-text rendering of command results.

use std::io::{self, Write};
use wormhole_core::{LinkStats, UrlRecord};

pub fn write_created<W: Write>(out: &mut W, created: &[UrlRecord]) -> io::Result<()> {
    for record in created {
        writeln!(
            out,
            "{} -> {} (expires {})",
            record.short_url, record.original_url, record.expires_at
        )?;
    }
    Ok(())
}

fn status(record: &UrlRecord) -> &'static str {
    if record.expired {
        "expired"
    } else {
        "active"
    }
}

pub fn write_list<W: Write>(out: &mut W, records: &[UrlRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No shortened URLs yet.");
    }

    for record in records {
        writeln!(
            out,
            "{}\t{}\t{} clicks\t{}\t{}\texpires {}",
            record.short_code,
            status(record),
            record.click_count(),
            record.short_url,
            record.original_url,
            record.expires_at
        )?;
    }
    Ok(())
}

pub fn write_stats<W: Write>(
    out: &mut W,
    stats: &LinkStats,
    records: &[UrlRecord],
    with_clicks: bool,
) -> io::Result<()> {
    writeln!(out, "Total URLs: {}", stats.total)?;
    writeln!(out, "Active URLs: {}", stats.active)?;
    writeln!(out, "Expired URLs: {}", stats.expired)?;
    writeln!(out, "Total Clicks: {}", stats.total_clicks)?;

    for record in records {
        writeln!(out)?;
        writeln!(
            out,
            "{} ({}) {} clicks -> {}",
            record.short_code,
            status(record),
            record.click_count(),
            record.original_url
        )?;

        if record.clicks.is_empty() {
            continue;
        }

        let sources = record
            .clicks_by_source()
            .into_iter()
            .map(|(source, count)| format!("{source} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        let locations = record
            .clicks_by_location()
            .into_iter()
            .map(|(location, count)| format!("{location} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "  sources: {sources}")?;
        writeln!(out, "  locations: {locations}")?;

        if with_clicks {
            for click in &record.clicks {
                writeln!(
                    out,
                    "  {}\t{}\t{}\t{}",
                    click.timestamp,
                    click.source,
                    click.location,
                    click.user_agent.as_deref().unwrap_or("N/A")
                )?;
            }
        }
    }
    Ok(())
}
