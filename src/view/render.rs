use crate::view::model::{AlbumView, ArtistView};

const NO_TRACKS: &str = "Tracks not available";

/// Render the artist panel.
pub fn artist_panel(view: &ArtistView) -> String {
    let mut out = String::new();
    let underline = "=".repeat(view.name.chars().count().max(1));
    out.push_str(&format!("{}\n{underline}\n", view.name));
    if !view.bio_text.is_empty() {
        out.push_str(&format!("{}\n", view.bio_text));
    }
    for link in &view.bio_links {
        match &link.href {
            Some(href) => out.push_str(&format!("{} <{href}>\n", link.text)),
            None => out.push_str(&format!("{}\n", link.text)),
        }
    }
    out.push_str("\nReleases\n");
    for (i, album) in view.albums.iter().enumerate() {
        out.push_str(&format!("{:>3}. {album}\n", i + 1));
    }
    out
}

/// Render the album panel: info table followed by the tracklist.
pub fn album_panel(view: &AlbumView) -> String {
    let mut out = String::new();
    if let Some(cover) = &view.cover {
        out.push_str(&format!("Cover    {cover}\n"));
    }
    out.push_str(&format!("Artist   {}\n", view.artist));
    out.push_str(&format!("Album    {}\n", view.name));
    out.push_str(&format!("Release  {}\n", view.release));
    out.push_str("\nTracklist\n");
    out.push_str(&tracklist(view));
    out
}

/// The tracklist table with a total runtime footer.
pub fn tracklist(view: &AlbumView) -> String {
    if view.tracks.is_empty() {
        return format!("{NO_TRACKS}\n");
    }
    let rank_width = view
        .tracks
        .iter()
        .map(|t| t.rank.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    let title_width = view
        .tracks
        .iter()
        .map(|t| t.title.chars().count())
        .chain(["Title".len(), "Total runtime".len().saturating_sub(rank_width + 2)])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:>rank_width$}  {:<title_width$}  Duration\n", "#", "Title"));
    for row in &view.tracks {
        out.push_str(&format!(
            "{:>rank_width$}  {:<title_width$}  {:>8}\n",
            row.rank, row.title, row.duration
        ));
    }
    let label_width = rank_width + 2 + title_width;
    out.push_str(&format!(
        "{:<label_width$}  {:>8}\n",
        "Total runtime", view.total_runtime
    ));
    out
}

/// Message shown in place of a region whose load failed.
pub fn failure(region: &str, reason: &str) -> String {
    format!("Failed to load {region}: {reason}\n")
}
