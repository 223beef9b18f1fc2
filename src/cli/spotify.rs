use clap::ValueEnum;
use reqwest::Client;
use tabled::Table;

use crate::{
    cli::{load_config, spinner},
    error,
    spotify::SpotifyClient,
    types::{NowPlayingResponse, TopArtistTableRow, TopTrackTableRow},
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopKind {
    Tracks,
    Artists,
}

fn client() -> SpotifyClient {
    SpotifyClient::new(Client::new(), load_config().spotify)
}

pub async fn now_playing(json: bool) {
    let pb = spinner("Fetching currently playing track...");
    let res = client().now_playing().await;
    pb.finish_and_clear();

    let status = match res {
        Ok(status) => status,
        Err(e) => error!("Cannot fetch currently playing track. Err: {}", e),
    };

    if json {
        print_json(&status);
        return;
    }

    match status {
        NowPlayingResponse::Active { status } => {
            println!("♪ {} - {} ({})", status.title, status.artist, status.album);
            println!("  {}", status.song_url);
        }
        NowPlayingResponse::Idle { .. } => println!("Nothing is playing right now."),
    }
}

pub async fn top(kind: TopKind, json: bool) {
    let client = client();

    match kind {
        TopKind::Tracks => {
            let pb = spinner("Fetching top tracks...");
            let res = client.top_tracks().await;
            pb.finish_and_clear();

            let top = match res {
                Ok(top) => top,
                Err(e) => error!("Cannot fetch top tracks. Err: {}", e),
            };
            if json {
                return print_json(&top);
            }

            let rows: Vec<TopTrackTableRow> = top
                .tracks
                .into_iter()
                .enumerate()
                .map(|(i, t)| TopTrackTableRow {
                    rank: i + 1,
                    title: t.title,
                    artist: t.artist,
                    album: t.album,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        TopKind::Artists => {
            let pb = spinner("Fetching top artists...");
            let res = client.top_artists().await;
            pb.finish_and_clear();

            let top = match res {
                Ok(top) => top,
                Err(e) => error!("Cannot fetch top artists. Err: {}", e),
            };
            if json {
                return print_json(&top);
            }

            let rows: Vec<TopArtistTableRow> = top
                .artists
                .into_iter()
                .enumerate()
                .map(|(i, a)| TopArtistTableRow {
                    rank: i + 1,
                    artist: a.artist,
                    link: a.link,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
    }
}

pub async fn profile() {
    let pb = spinner("Fetching profile...");
    let res = client().profile().await;
    pb.finish_and_clear();

    match res {
        Ok(profile) => {
            println!("{} ({} followers)", profile.name, profile.followers);
            println!("{}", profile.link);
        }
        Err(e) => error!("Cannot fetch profile. Err: {}", e),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Cannot serialize response: {}", e),
    }
}
