//! Human-readable board page served on `/ui`.

use std::fmt::Write;

use island_core::{CellKind, GameState};

use crate::identity::PlayerIdentity;

const STYLE: &str = "body{font-family:sans-serif}\
table.board{border-collapse:collapse}\
table.board td{width:24px;height:24px;text-align:center;font-size:12px;border:1px solid #ddd}\
td.wall{background:#555}td.banana{background:#f7d33a}\
td.player{background:#7fb2e5}td.me{background:#e5533d;color:#fff}";

/// Render `state` as a standalone HTML page, highlighting `me`.
pub fn render_board(state: &GameState, me: &PlayerIdentity) -> String {
    let own_id = me.player_id();
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    let _ = write!(html, "<title>{}</title>", escape(me.team_name()));
    let _ = write!(html, "<style>{STYLE}</style></head><body>");
    let _ = write!(html, "<h1>{}</h1>", escape(me.team_name()));
    match own_id {
        Some(id) => {
            let _ = write!(html, "<p>Player #{id}</p>");
        }
        None => html.push_str("<p>Not registered</p>"),
    }

    html.push_str("<table class=\"board\">");
    for row in state.map.rows() {
        html.push_str("<tr>");
        for cell in row {
            let _ = match cell.kind() {
                CellKind::Empty => write!(html, "<td></td>"),
                CellKind::Banana => write!(html, "<td class=\"banana\">&#127820;</td>"),
                CellKind::Wall => write!(html, "<td class=\"wall\"></td>"),
                CellKind::Player(id) if Some(id) == own_id => {
                    write!(html, "<td class=\"player me\">{id}</td>")
                }
                CellKind::Player(id) => write!(html, "<td class=\"player\">{id}</td>"),
            };
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");

    html.push_str("<h2>Players</h2><ul>");
    for player in &state.players {
        let id = player.id.map(|id| id.to_string()).unwrap_or_else(|| "?".into());
        let name = player.name.as_deref().unwrap_or("unknown");
        let _ = write!(html, "<li>#{id} {}", escape(name));
        if let Some(score) = player.score {
            let _ = write!(html, " ({score})");
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></body></html>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
