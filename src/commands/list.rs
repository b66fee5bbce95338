//! List posts

use crate::content::loader::{enumerate_posts, load_post};
use crate::content::{PostIndex, PostIndexEntry};
use crate::error::Result;
use crate::helpers::format_date;
use crate::Site;

/// Read every post's front matter, newest first. Nothing is rendered.
pub fn collect(site: &Site) -> Result<Vec<PostIndexEntry>> {
    let mut index = PostIndex::new();
    for source in enumerate_posts(&site.posts_dir)? {
        let document = load_post(&source, site.config.title_from_heading)?;
        index.push(PostIndexEntry::from(&document.metadata));
    }
    Ok(index.freeze())
}

/// Print the post list
pub fn run(site: &Site) -> Result<()> {
    let posts = site.list()?;
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            format_date(post.date, &site.config.date_format),
            post.title,
            post.slug
        );
    }
    Ok(())
}
