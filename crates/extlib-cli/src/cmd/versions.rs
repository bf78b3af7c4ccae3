//! Versions command

use anyhow::Result;
use comfy_table::presets::NOTHING;
use comfy_table::{Cell, Color, Table};
use extlib_core::Context;
use extlib_core::catalog::list_releases;
use extlib_core::select::{filter_releases, release_triples};
use extlib_schema::Release;

/// Print releases, newest first.
///
/// With no `tags` every release is listed. Otherwise only releases whose tag
/// equals one of `tags` are listed, together with the platforms they ship.
pub async fn versions(ctx: &Context, tags: &[String]) -> Result<()> {
    let releases = list_releases(ctx.catalog.as_ref(), ctx.reporter.as_ref()).await?;
    let filtered = !tags.is_empty();

    let mut table = Table::new();
    table.load_preset(NOTHING);
    if filtered {
        table.set_header(vec!["RELEASE", "CREATED", "PLATFORMS"]);
    } else {
        table.set_header(vec!["RELEASE", "CREATED"]);
    }

    let shown = filter_releases(&releases, tags);
    if shown.is_empty() {
        ctx.reporter.warning("No matching releases");
        return Ok(());
    }

    for release in shown {
        let mut row = vec![tag_cell(release), Cell::new(release.created_at.format("%Y-%m-%d"))];
        if filtered {
            row.push(Cell::new(release_triples(release).join("\n")));
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}

fn tag_cell(release: &Release) -> Cell {
    let color = if release.is_rolling() {
        Color::Yellow
    } else {
        Color::Cyan
    };
    Cell::new(&release.tag).fg(color)
}
