use crate::{
    types::{AnalysisReport, PlaylistRef},
    utils::{DEFAULT_MAX_PLAYLISTS, escape_html},
};

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Playlist Analyser</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

pub fn index(username: Option<&str>, max_playlists: Option<usize>, owner_only: bool) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/loading\">\n\
         <label>Username <input type=\"text\" name=\"username\" value=\"{username}\" required></label>\n\
         <label>Max playlists <input type=\"number\" name=\"max_playlists\" min=\"1\" value=\"{max}\"></label>\n\
         <label><input type=\"checkbox\" name=\"owner_only\"{checked}> Only playlists owned by the user</label>\n\
         <button type=\"submit\">Load playlists</button>\n</form>",
        username = escape_html(username.unwrap_or_default()),
        max = max_playlists.unwrap_or(DEFAULT_MAX_PLAYLISTS),
        checked = if owner_only { " checked" } else { "" },
    );
    layout("Spotify Playlist Analyser", &body)
}

/// Interstitial page that sends the browser on to `redirect_url` once the
/// background task had a moment to start.
pub fn waiting(message: &str, redirect_url: &str) -> String {
    let body = format!(
        "<meta http-equiv=\"refresh\" content=\"0; url={url}\">\n\
         <p>{message}</p>\n<p><a href=\"{url}\">Continue</a></p>",
        url = escape_html(redirect_url),
        message = escape_html(message),
    );
    layout("Please wait", &body)
}

pub fn playlists(username: &str, playlists: &[PlaylistRef]) -> String {
    let mut body = String::new();

    if playlists.is_empty() {
        body.push_str(&format!(
            "<p>No public playlists found for {}.</p>",
            escape_html(username)
        ));
    } else {
        body.push_str("<form method=\"post\" action=\"/processing\">\n<ul>\n");
        for playlist in playlists {
            body.push_str(&format!(
                "<li><label><input type=\"checkbox\" name=\"{id}\" value=\"{name}\" checked> {name}</label></li>\n",
                id = escape_html(&playlist.id),
                name = escape_html(&playlist.name),
            ));
        }
        body.push_str("</ul>\n<button type=\"submit\">Analyse</button>\n</form>");
    }

    body.push_str("\n<p><a href=\"/\">Choose another user</a></p>");
    layout(&format!("Playlists of {username}"), &body)
}

pub fn analysis(report: &AnalysisReport) -> String {
    let mut body = String::new();

    if report.is_empty() {
        body.push_str("<p>Nothing to report.</p>\n");
    }

    if !report.top_artists.is_empty() {
        body.push_str("<h2>Top artists</h2>\n<table>\n<tr><th>Playlist</th><th>Artists</th><th>Tracks</th></tr>\n");
        for entry in &report.top_artists {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&entry.playlist),
                escape_html(&entry.artists.join(", ")),
                entry.count
            ));
        }
        body.push_str("</table>\n");
    }

    if !report.duplicate_tracks.is_empty() {
        body.push_str("<h2>Duplicate tracks</h2>\n");
        for entry in &report.duplicate_tracks {
            body.push_str(&format!(
                "<h3>{}</h3>\n<table>\n<tr><th>Track</th><th>Artists</th><th>Albums</th><th>Count</th></tr>\n",
                escape_html(&entry.playlist)
            ));
            for group in &entry.duplicates {
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&group.name),
                    escape_html(&group.artists.join(", ")),
                    escape_html(&group.albums.join(", ")),
                    group.count
                ));
            }
            body.push_str("</table>\n");
        }
    }

    body.push_str("<p><a href=\"/playlists\">Back to playlists</a> | <a href=\"/\">Choose another user</a></p>");
    layout("Analysis", &body)
}
