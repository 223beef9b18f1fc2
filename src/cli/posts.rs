use tabled::Table;

use crate::{config, content, error, types::PostTableRow, warning};

/// Lists the posts in the content directory, newest first.
pub async fn posts(tag: Option<String>) {
    let content_dir = config::content_dir_from_env();

    let mut posts = match content::load_posts(&content_dir).await {
        Ok(posts) => posts,
        Err(e) => error!(
            "Cannot read posts from {}. Err: {}",
            content_dir.display(),
            e
        ),
    };

    if let Some(tag) = tag {
        let tag = tag.to_lowercase();
        posts.retain(|p| p.meta.tags.iter().any(|t| t.to_lowercase() == tag));
    }

    if posts.is_empty() {
        warning!("No posts found.");
        return;
    }

    let rows: Vec<PostTableRow> = posts
        .into_iter()
        .map(|p| PostTableRow {
            date: p.meta.date,
            slug: p.slug,
            title: p.meta.title,
            tags: p.meta.tags.join(", "),
        })
        .collect();

    println!("{}", Table::new(rows));
}
