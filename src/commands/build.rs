//! Build the static site

use chrono::Datelike;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::content::loader::{enumerate_posts, load_post};
use crate::content::{MarkdownRenderer, PostIndex, PostIndexEntry, RenderedPost};
use crate::error::{Error, Result};
use crate::generator::{post_file_name, IndexPayload, PageRenderer, PostPayload, SiteFields};
use crate::helpers::is_valid_format;
use crate::highlight::SyntaxHighlighter;
use crate::minify::{CSS, HTML, JAVASCRIPT};
use crate::templates::{TemplateSet, INDEX, POST, SCRIPT, STYLESHEET};
use crate::Site;

/// What a finished build produced
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Posts in index order
    pub posts: Vec<PostIndexEntry>,
}

/// Generate the whole site into a fresh output directory
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();
    let config = &site.config;

    // Everything that can be checked up front is, before any output exists
    let highlighter = SyntaxHighlighter::new(&config.highlight)?;
    if !is_valid_format(&config.date_format) {
        return Err(Error::Config(format!(
            "invalid date_format `{}`",
            config.date_format
        )));
    }
    let templates = TemplateSet::load(&site.templates_dir)?;
    let sources = enumerate_posts(&site.posts_dir)?;
    tracing::info!("Found {} posts in {:?}", sources.len(), site.posts_dir);

    create_output_dir(&site.output_dir)?;

    let style_sheet = highlighter.style_sheet();
    let fields = SiteFields {
        site_title: &config.title,
        author: &config.author,
        current_year: chrono::Local::now().year(),
        code_highlight_style: style_sheet.as_str(),
    };
    let markdown = MarkdownRenderer::new(&highlighter);
    let pages = PageRenderer::new(&templates);

    let mut index = PostIndex::new();
    let mut written: HashMap<String, PathBuf> = HashMap::new();

    for source in &sources {
        if let Some(first) = written.get(&source.slug) {
            return Err(Error::DuplicateSlug {
                slug: source.slug.clone(),
                first: first.clone(),
                second: source.path.clone(),
            });
        }

        let document = load_post(source, config.title_from_heading)?;
        let html = markdown
            .render_bytes(&document.body)
            .map_err(|e| Error::Render {
                path: source.path.clone(),
                source: e,
            })?;
        let post = RenderedPost {
            metadata: document.metadata,
            html,
        };

        let dest = site.output_dir.join(post_file_name(&post.metadata.slug));
        let payload = PostPayload::new(
            fields.clone(),
            &post,
            &config.date_format,
            config.highlight.inline_style,
        );
        pages.render(POST, &payload, HTML, &dest)?;

        index.push(PostIndexEntry::from(&post.metadata));
        written.insert(source.slug.clone(), source.path.clone());
    }

    let posts = index.freeze();
    pages.render(
        INDEX,
        &IndexPayload::new(fields.clone(), &posts, &config.date_format),
        HTML,
        &site.output_dir.join(INDEX),
    )?;
    pages.render(STYLESHEET, &fields, CSS, &site.output_dir.join(STYLESHEET))?;
    pages.render(SCRIPT, &fields, JAVASCRIPT, &site.output_dir.join(SCRIPT))?;

    tracing::info!(
        "Generated {} posts into {:?} in {:.2}s",
        posts.len(),
        site.output_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(BuildReport {
        output_dir: site.output_dir.clone(),
        posts,
    })
}

/// Create the output directory, refusing to reuse an existing one
fn create_output_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(Error::OutputExists(dir.to_path_buf()))
        }
        Err(source) => Err(Error::Write {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::error::FrontMatterError;
    use tempfile::TempDir;

    fn site_with_posts(posts: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let site = Site::with_config(dir.path(), SiteConfig::default());
        (dir, site)
    }

    fn post(title: &str, date: &str, body: &str) -> String {
        format!("---\ntitle: \"{}\"\ndate: {}\n---\n{}", title, date, body)
    }

    fn output_files(site: &Site) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&site.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_end_to_end_single_post() {
        let (_dir, site) =
            site_with_posts(&[("hello.md", &post("Hello", "2024-03-01", "# Hello\n\nWorld."))]);

        let report = run(&site).unwrap();
        assert_eq!(report.posts.len(), 1);
        assert_eq!(
            output_files(&site),
            vec!["dark-mode.js", "hello.html", "index.html", "layout.css"]
        );

        let page = fs::read_to_string(site.output_dir.join("hello.html")).unwrap();
        assert!(page.contains("<h1>Hello</h1><hr>"));
        assert!(page.contains("<p>World.</p>"));

        let index = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        assert_eq!(index.matches("hello.html").count(), 1);
        assert!(index.contains("Mar 01, 2024"));
    }

    #[test]
    fn test_index_is_newest_first() {
        let (_dir, site) = site_with_posts(&[
            ("a.md", &post("Alpha", "2024-01-01", "a")),
            ("b.md", &post("Beta", "2024-06-01", "b")),
            ("c.md", &post("Gamma", "2023-12-31", "c")),
        ]);

        let report = run(&site).unwrap();
        let slugs: Vec<&str> = report.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a", "c"]);

        let index = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        let beta = index.find("Beta").unwrap();
        let alpha = index.find("Alpha").unwrap();
        let gamma = index.find("Gamma").unwrap();
        assert!(beta < alpha && alpha < gamma);
    }

    #[test]
    fn test_zero_posts_still_writes_shared_files() {
        let (_dir, site) = site_with_posts(&[]);
        let report = run(&site).unwrap();
        assert!(report.posts.is_empty());
        assert_eq!(
            output_files(&site),
            vec!["dark-mode.js", "index.html", "layout.css"]
        );

        let css = fs::read_to_string(site.output_dir.join("layout.css")).unwrap();
        assert!(css.contains(".highlight"));
        let js = fs::read_to_string(site.output_dir.join("dark-mode.js")).unwrap();
        assert!(js.contains("function toggleDarkMode("));
    }

    #[test]
    fn test_code_blocks_are_highlighted() {
        let body = "# Code\n\n```rust\nfn main() {}\n```\n";
        let (_dir, site) = site_with_posts(&[("code.md", &post("Code", "2024-01-01", body))]);
        run(&site).unwrap();

        let page = fs::read_to_string(site.output_dir.join("code.html")).unwrap();
        assert!(page.contains("class=highlight") || page.contains("class=\"highlight\""));
        assert!(page.contains("hl-"));
    }

    #[test]
    fn test_non_markdown_entries_are_skipped() {
        let (_dir, site) = site_with_posts(&[
            ("hello.md", &post("Hello", "2024-03-01", "Hi")),
            ("notes.txt", "not a post"),
        ]);
        let report = run(&site).unwrap();
        assert_eq!(report.posts.len(), 1);
    }

    #[test]
    fn test_existing_output_dir_is_refused() {
        let (_dir, site) = site_with_posts(&[("hello.md", &post("Hello", "2024-03-01", "Hi"))]);
        fs::create_dir(&site.output_dir).unwrap();
        fs::write(site.output_dir.join("keep.txt"), "x").unwrap();

        assert!(matches!(run(&site), Err(Error::OutputExists(_))));
        assert_eq!(output_files(&site), vec!["keep.txt"]);
    }

    #[test]
    fn test_malformed_post_aborts_build() {
        let (_dir, site) = site_with_posts(&[("bad.md", "no front matter here")]);
        match run(&site) {
            Err(Error::FrontMatter { path, source }) => {
                assert!(path.ends_with("bad.md"));
                assert!(matches!(source, FrontMatterError::Malformed { delimiters: 0 }));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(!site.output_dir.join("index.html").exists());
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let (_dir, site) = site_with_posts(&[
            ("same.md", &post("One", "2024-01-01", "1")),
            ("same.markdown", &post("Two", "2024-01-02", "2")),
        ]);
        match run(&site) {
            Err(Error::DuplicateSlug { slug, .. }) => assert_eq!(slug, "same"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_config_errors_precede_output() {
        let (_dir, mut site) = site_with_posts(&[]);
        site.config.highlight.theme = "no-such-theme".to_string();
        assert!(matches!(run(&site), Err(Error::Config(_))));
        assert!(!site.output_dir.exists());

        site.config.highlight.theme = SiteConfig::default().highlight.theme;
        site.config.date_format = "%Q".to_string();
        assert!(matches!(run(&site), Err(Error::Config(_))));
        assert!(!site.output_dir.exists());
    }

    #[test]
    fn test_template_override() {
        let (dir, site) = site_with_posts(&[]);
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();
        fs::write(
            templates.join(SCRIPT),
            "window.builtIn = {{ CurrentYear }};\n",
        )
        .unwrap();

        run(&site).unwrap();
        let js = fs::read_to_string(site.output_dir.join(SCRIPT)).unwrap();
        assert!(js.contains(&format!("builtIn={}", chrono::Local::now().year())));
        assert!(!js.contains("darkMode"));
    }
}
