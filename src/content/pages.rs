//! Server-rendered HTML pages.
//!
//! Markup is kept deliberately plain; styling is delivered by the static
//! stylesheet referenced from the layout.

use crate::{
    content::{Post, markdown::render_markdown},
    types::{TopArtists, TopTracks},
    utils::escape_html,
    views::ViewCount,
};

pub const SITE_TITLE: &str = "JS Garden";
pub const SITE_DESCRIPTION: &str =
    "A blog about modern front-end web development, plus what I am listening to.";

fn layout(title: &str, description: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta name="theme-color" content="#262738">
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
<header class="navbar">
<a href="/" class="logo">{site}</a>
<nav><a href="/">Home</a> <a href="/spotify">Spotify</a></nav>
</header>
<main>
{body}
</main>
</body>
</html>
"##,
        title = escape_html(title),
        description = escape_html(description),
        site = SITE_TITLE,
        body = body,
    )
}

fn page_title(title: &str) -> String {
    format!("{title} - {SITE_TITLE}")
}

pub fn index_page(posts: &[Post]) -> String {
    let mut body = String::from("<h1>Blog</h1>\n<ul class=\"posts\">\n");

    for post in posts {
        body.push_str(&format!(
            "<li><a href=\"/blog/{slug}\">{title}</a> <time datetime=\"{date}\">{formatted}</time><p>{summary}</p></li>\n",
            slug = post.slug,
            title = escape_html(&post.meta.title),
            date = escape_html(&post.meta.date),
            formatted = escape_html(&post.formatted_date()),
            summary = escape_html(&post.meta.summary),
        ));
    }

    body.push_str("</ul>");
    layout(SITE_TITLE, SITE_DESCRIPTION, &body)
}

pub fn article_page(post: &Post, views: ViewCount) -> String {
    let tags: String = post
        .meta
        .tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">#{}</span>", escape_html(&tag.to_uppercase())))
        .collect();

    let byline = match &post.meta.author {
        Some(author) => format!("By <b>{}</b>, published ", escape_html(author)),
        None => String::from("Published "),
    };

    let body = format!(
        r#"<article class="prose">
<p class="tags">{tags}</p>
<h1>{title}</h1>
<p class="byline">{byline}<time datetime="{date}">{formatted}</time> · <span class="views">{views}</span></p>
<p class="summary">{summary}</p>
{content}</article>"#,
        tags = tags,
        title = escape_html(&post.meta.title),
        byline = byline,
        date = escape_html(&post.meta.date),
        formatted = escape_html(&post.formatted_date()),
        views = views,
        summary = escape_html(&post.meta.summary),
        content = render_markdown(&post.content),
    );

    layout(&page_title(&post.meta.title), &post.meta.summary, &body)
}

/// The listening dashboard. A section whose data could not be fetched is
/// left out rather than failing the page.
pub fn dashboard_page(tracks: Option<&TopTracks>, artists: Option<&TopArtists>) -> String {
    let mut body = String::from("<h1>My Spotify Dashboard</h1>\n<div class=\"dashboard\">\n");

    if let Some(tracks) = tracks {
        body.push_str("<section class=\"top-tracks\"><h2>Top tracks</h2><ol>\n");
        for (i, track) in tracks.tracks.iter().enumerate() {
            body.push_str(&format!(
                "<li><span class=\"rank\">#{rank}</span><img src=\"{image}\" alt=\"{album}\" width=\"64\" height=\"64\"><a href=\"{url}\">{title}</a><p>{artist}</p></li>\n",
                rank = i + 1,
                image = escape_html(&track.image),
                album = escape_html(&track.album),
                url = escape_html(&track.song_url),
                title = escape_html(&track.title),
                artist = escape_html(&track.artist),
            ));
        }
        body.push_str("</ol></section>\n");
    }

    if let Some(artists) = artists {
        body.push_str("<section class=\"top-artists\"><h2>Top artists</h2><ol>\n");
        for (i, artist) in artists.artists.iter().enumerate() {
            body.push_str(&format!(
                "<li><span class=\"rank\">{rank}</span><a href=\"{link}\">{name}</a><img src=\"{image}\" alt=\"{name}\" width=\"48\" height=\"48\"></li>\n",
                rank = i + 1,
                link = escape_html(&artist.link),
                name = escape_html(&artist.artist),
                image = escape_html(&artist.image),
            ));
        }
        body.push_str("</ol></section>\n");
    }

    body.push_str("</div>");
    layout(
        &page_title("Spotify"),
        "See what I'm currently listening to and my top tracks and artists.",
        &body,
    )
}

pub fn not_found_page() -> String {
    layout(
        &page_title("Not found"),
        SITE_DESCRIPTION,
        "<h1>404</h1><p>This page could not be found.</p>",
    )
}
