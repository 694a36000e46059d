//! Plain-text rendering of the list view and the draft.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use client_core::{DraftPhase, ListView};
use shared::domain::{Draft, FormVariant};

const HEADING: &str = "Movie Database";

pub fn render_list(view: &ListView, synced_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::new();
    let _ = write!(out, "{HEADING}");
    if view.is_loading() {
        out.push_str(" (waiting for backend)");
    } else if let Some(synced_at) = synced_at {
        let _ = write!(out, " (synced {})", synced_at.format("%H:%M:%S UTC"));
    }
    out.push('\n');

    if let Some(message) = view.status_message() {
        let _ = writeln!(out, "  {message}");
    }
    let ListView::Movies(cards) = view else {
        return out;
    };

    for card in cards {
        let _ = writeln!(out, "  [{}] {}", card.year_badge, card.title);
        if let Some(description) = &card.description {
            let _ = writeln!(out, "         {description}");
        }
        if let Some(poster_url) = &card.poster_url {
            let _ = writeln!(out, "         poster: {poster_url}");
        }
        if let Some(player_url) = &card.player_url {
            let _ = writeln!(out, "         player: {player_url}");
        }
    }
    out
}

pub fn render_draft(draft: &Draft, phase: DraftPhase, variant: FormVariant) -> String {
    let phase = match phase {
        DraftPhase::Default => "empty",
        DraftPhase::Editing => "editing",
    };
    let streaming_label = match variant {
        FormVariant::Streaming => "tmdbId*",
        FormVariant::Basic => "tmdbId",
    };
    format!(
        "Draft ({phase})\n  title*:      {}\n  description: {}\n  year:        {}\n  {streaming_label:<12} {}\n",
        draft.title, draft.description, draft.year, draft.streaming_id
    )
}
