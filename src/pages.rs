//! Server-rendered HTML pages.
//!
//! Pages are plain strings built with `format!`. Every value that comes from
//! the user or from Spotify goes through [`escape_html`] before it is
//! interpolated.

use crate::{
    criteria::{GENRES, Mood, Tempo},
    types::{PlaybackStarted, Playlist, Track},
    utils::escape_html,
};

const STYLE: &str = r#"
body { font-family: -apple-system, system-ui, sans-serif; margin: 0 auto; max-width: 32rem; padding: 1rem; background: #121212; color: #eee; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.15rem; margin-top: 2rem; }
label { display: block; margin: .8rem 0 .3rem; }
select, input[type=text], input[type=url], textarea { width: 100%; box-sizing: border-box; font-size: 1rem; padding: .6rem; border-radius: .4rem; border: 1px solid #444; background: #222; color: #eee; }
input[type=range] { width: 100%; }
button, .button { display: block; width: 100%; margin-top: 1rem; padding: .8rem; font-size: 1.05rem; border: 0; border-radius: 2rem; background: #1db954; color: #000; text-align: center; text-decoration: none; }
.secondary { background: #333; color: #eee; }
.notice { padding: .8rem; border-radius: .4rem; background: #2a2a2a; }
.error { padding: .8rem; border-radius: .4rem; background: #5c1a1a; }
.muted { color: #999; font-size: .9rem; }
code { word-break: break-all; }
ul { padding-left: 1.2rem; }
"#;

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// Login page with the authorization link and the paste form.
pub fn login_page(authorize_url: &str) -> String {
    let body = format!(
        r#"<p>1. Open the Spotify login and approve access.</p>
<a class="button" href="{url}" target="_blank" rel="noopener">Log in with Spotify</a>
<p>2. Spotify sends you to a page showing a code. Copy the full address of that page (or just the code) and paste it here.</p>
<form method="post" action="/auth">
<label for="redirect_url">Redirect URL or code</label>
<textarea id="redirect_url" name="redirect_url" rows="3" required placeholder="https://.../callback?code=..."></textarea>
<button type="submit">Connect</button>
</form>
<p class="muted">On a phone the redirect often opens in another tab or browser; that is fine, just copy its address.</p>"#,
        url = escape_html(authorize_url),
    );
    layout("Mood Player", &body)
}

/// Main page with the criteria form and the playlist tools.
pub fn home_page(user: &str, playlists: &[Playlist], playlist_error: Option<&str>) -> String {
    let moods: String = Mood::ALL
        .iter()
        .map(|m| option(m.as_str(), m.label(), *m == Mood::Any))
        .collect();
    let tempos: String = Tempo::ALL
        .iter()
        .map(|t| option(t.as_str(), t.label(), *t == Tempo::Any))
        .collect();
    let genres: String = std::iter::once(option("any", "Any genre", true))
        .chain(GENRES.iter().map(|g| option(g, g, false)))
        .collect();

    let playlist_section = match playlist_error {
        Some(err) => format!(
            r#"<p class="error">Error loading playlists: {}</p>"#,
            escape_html(err)
        ),
        None if playlists.is_empty() => {
            r#"<p class="notice">No playlists found in your Spotify account.</p>"#.to_string()
        }
        None => playlist_forms(playlists),
    };

    let body = format!(
        r#"<p class="muted">Logged in as {user}</p>
<form method="post" action="/play">
<label for="mood">Mood</label>
<select id="mood" name="mood">{moods}</select>
<label for="energy">Energy <output id="energy_value">50</output>%</label>
<input id="energy" name="energy" type="range" min="0" max="100" value="50" oninput="energy_value.value = this.value">
<label for="genre">Genre</label>
<select id="genre" name="genre">{genres}</select>
<label for="tempo">Tempo</label>
<select id="tempo" name="tempo">{tempos}</select>
<button type="submit">Play something</button>
</form>
{playlist_section}
<form method="post" action="/logout">
<button class="secondary" type="submit">Log out</button>
</form>"#,
        user = escape_html(user),
        moods = moods,
        genres = genres,
        tempos = tempos,
        playlist_section = playlist_section,
    );
    layout("Mood Player", &body)
}

fn playlist_forms(playlists: &[Playlist]) -> String {
    let options: String = playlists
        .iter()
        .map(|p| option(&p.id, &p.name, false))
        .collect();

    format!(
        r#"<h2>Feeling lucky?</h2>
<form method="post" action="/dice">
<label for="dice_playlist">Playlist</label>
<select id="dice_playlist" name="playlist_id">{options}</select>
<button type="submit">Roll the dice 🎲</button>
</form>
<h2>Search a playlist</h2>
<form method="post" action="/playlist/search">
<label for="search_playlist">Playlist</label>
<select id="search_playlist" name="playlist_id">{options}</select>
<label for="artist">Artist contains</label>
<input id="artist" name="artist" type="text">
<label for="album">Album contains</label>
<input id="album" name="album" type="text">
<label for="track">Track contains</label>
<input id="track" name="track" type="text">
<button class="secondary" type="submit">Search</button>
</form>"#,
        options = options,
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// The page Spotify redirects to after login.
///
/// Shows the authorization code exactly as received so it can be copied
/// back into the app on devices where the redirect lands in another browser.
pub fn redirect_page(code: Option<&str>, error: Option<&str>) -> String {
    let body = match (code, error) {
        (Some(code), _) => format!(
            r#"<p>Spotify sent this authorization code:</p>
<p class="notice"><code id="code">{code}</code></p>
<label for="code_copy">Copy it from here if selecting the text above is awkward</label>
<input id="code_copy" type="text" readonly value="{code}" onfocus="this.select()">
<p>Go back to the app and paste either this page's full address or the code.</p>
<a class="button" href="/">Return to the app</a>"#,
            code = escape_html(code),
        ),
        (None, Some(error)) => format!(
            r#"<p class="error">Spotify did not authorize the app: {}</p>
<a class="button" href="/">Return to the app</a>"#,
            escape_html(error)
        ),
        (None, None) => r#"<p class="notice">No authorization code found in this address. Start the login from the app.</p>
<a class="button" href="/">Return to the app</a>"#
            .to_string(),
    };
    layout("Spotify authorization", &body)
}

pub fn now_playing_page(started: &PlaybackStarted, note: Option<&str>) -> String {
    let track = &started.track;
    let body = format!(
        r#"<p class="notice">🎵 <strong>{name}</strong><br>{artists}<br><span class="muted">{album}</span></p>
<p class="muted">Playing on {device}</p>
{note}{links}
<a class="button" href="/">Pick another</a>"#,
        name = escape_html(&track.name),
        artists = escape_html(&track.artist_names()),
        album = escape_html(track.album_name()),
        device = escape_html(&started.device.name),
        note = note
            .map(|n| format!(r#"<p class="muted">{}</p>"#, escape_html(n)))
            .unwrap_or_default(),
        links = track_links(track),
    );
    layout("Now playing", &body)
}

/// A picked track that could not be started, with its preview and Spotify link.
pub fn picked_track_page(track: &Track, notice: &str) -> String {
    let body = format!(
        r#"<p class="notice">🎲 <strong>{name}</strong><br>{artists}<br><span class="muted">{album}</span></p>
<p class="error">{notice}</p>
{links}
<a class="button" href="/">Pick another</a>"#,
        name = escape_html(&track.name),
        artists = escape_html(&track.artist_names()),
        album = escape_html(track.album_name()),
        notice = escape_html(notice),
        links = track_links(track),
    );
    layout("Your pick", &body)
}

fn track_links(track: &Track) -> String {
    let mut links = String::new();
    if let Some(preview) = &track.preview_url {
        links.push_str(&format!(
            r#"<p>30-second preview:</p><audio controls src="{}"></audio>"#,
            escape_html(preview)
        ));
    }
    if let Some(url) = &track.external_urls.spotify {
        links.push_str(&format!(
            r#"<p><a href="{url}">Open in Spotify</a></p>"#,
            url = escape_html(url)
        ));
    }
    links
}

pub fn playlist_matches_page(matches: &[&Track]) -> String {
    let body = if matches.is_empty() {
        r#"<p class="notice">No matches found with the current filters.</p>"#.to_string()
    } else {
        let items: String = matches
            .iter()
            .map(|t| {
                format!(
                    "<li>🎵 {} - {} ({})</li>",
                    escape_html(&t.name),
                    escape_html(&t.artist_names()),
                    escape_html(t.album_name())
                )
            })
            .collect();
        format!("<p>Found {} matches:</p><ul>{}</ul>", matches.len(), items)
    };

    layout(
        "Playlist search",
        &format!(r#"{body}<a class="button" href="/">Back</a>"#),
    )
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<p class="error">{}</p>
<a class="button" href="/">Back</a>"#,
        escape_html(message)
    );
    layout("Something went wrong", &body)
}
