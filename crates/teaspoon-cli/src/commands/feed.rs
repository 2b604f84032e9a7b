use serde::Serialize;
use teaspoon_core::FeedPost;

use crate::commands::common::{build_client, ResolvedSettings};
use crate::error::CliError;
use crate::ui::page_url;

#[derive(Debug, Serialize)]
pub struct FeedItem {
    pub id: String,
    pub author: String,
    pub note: String,
    pub image_url: Option<String>,
}

pub async fn run_feed(
    limit: usize,
    as_json: bool,
    settings: &ResolvedSettings,
) -> Result<(), CliError> {
    let client = build_client(settings)?;
    tracing::debug!(server_url = %settings.server_url, path = %settings.submit.feed_path, "Fetching feed");
    let posts = client.fetch_feed(&settings.submit.feed_path).await?;
    tracing::debug!(total = posts.len(), limit, "Feed loaded");
    let items = posts
        .iter()
        .take(limit)
        .map(|post| feed_item(post, &settings.server_url))
        .collect::<Vec<_>>();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No posts yet");
    } else {
        for line in format_feed_lines(&items) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn feed_item(post: &FeedPost, server_url: &str) -> FeedItem {
    FeedItem {
        id: post.id.clone(),
        author: post.author.clone(),
        note: post.note.clone(),
        image_url: post.img.as_deref().map(|img| page_url(server_url, img)),
    }
}

pub fn format_feed_lines(items: &[FeedItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let author = if item.author.is_empty() {
                "unknown"
            } else {
                item.author.as_str()
            };
            let note = item.note.replace('\n', " ");
            match &item.image_url {
                Some(url) => format!("{author}: {note} [{url}]"),
                None => format!("{author}: {note}"),
            }
        })
        .collect()
}
