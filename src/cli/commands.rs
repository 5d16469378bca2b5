use std::path::Path;

use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::app::{AppContext, Result};
use crate::domain::FeedItem;

pub async fn show_feed(ctx: &AppContext, pages: u64) -> Result<()> {
    let mut page = ctx.pipeline.load_feed().await?;
    let mut loaded = 1;

    while loaded < pages {
        let Some(next) = page.load_more() else {
            break;
        };
        page = next.await?;
        loaded += 1;
    }

    if page.items.is_empty() {
        println!("No items");
        return Ok(());
    }

    for item in &page.items {
        print_item(item);
    }

    println!(
        "\n{} items in {} page(s){}",
        page.items.len(),
        loaded,
        if page.has_more() { ", more available" } else { "" }
    );

    Ok(())
}

fn print_item(item: &FeedItem) {
    println!("{}  {}", item.id, item.display_description());
    if let Some(location) = &item.location {
        println!("    @ {}", location);
    }
    println!("    {}", item.url);
}

pub async fn show_comments(ctx: &AppContext, image_id: Uuid) -> Result<()> {
    let comments = ctx.pipeline.load_comments(image_id).await?;

    if comments.is_empty() {
        println!("No comments");
        return Ok(());
    }

    for comment in comments {
        println!(
            "{} ({}): {}",
            comment.username,
            comment.created_at.format("%Y-%m-%d %H:%M"),
            comment.message
        );
    }

    Ok(())
}

pub async fn fetch_image(ctx: &AppContext, url: &Url, output: Option<&Path>) -> Result<()> {
    let data = ctx.pipeline.load_image_data(url).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &data)?;
            println!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => println!("Loaded {} bytes from {}", data.len(), url),
    }

    Ok(())
}

pub fn validate_cache(ctx: &AppContext) -> Result<()> {
    ctx.pipeline.validate_cache();
    info!("Feed cache validated");
    println!("Feed cache validated");
    Ok(())
}
