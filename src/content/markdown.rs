//! Markdown rendering with title promotion and syntax highlighting

use std::collections::HashMap;

use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};

use crate::error::RenderError;
use crate::helpers::anchor_open;
use crate::highlight::SyntaxHighlighter;

/// Markdown renderer borrowing the build's highlighter
pub struct MarkdownRenderer<'h> {
    highlighter: &'h SyntaxHighlighter,
}

impl<'h> MarkdownRenderer<'h> {
    /// Create a new markdown renderer
    pub fn new(highlighter: &'h SyntaxHighlighter) -> Self {
        Self { highlighter }
    }

    /// Parser extensions enabled for post bodies
    pub fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
    }

    /// Render a post body to HTML
    pub fn render_bytes(&self, body: &[u8]) -> Result<String, RenderError> {
        let markdown = std::str::from_utf8(body)
            .map_err(|e| RenderError::Markdown(format!("body is not valid UTF-8: {}", e)))?;
        self.render(markdown)
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut visitor = Visitor::new(self.highlighter);
        for event in Parser::new_ext(markdown, Self::options()) {
            visitor.visit(event)?;
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, visitor.finish().into_iter());
        Ok(html_output)
    }
}

/// Text of the first level-one heading, if any
pub fn first_heading(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new_ext(markdown, MarkdownRenderer::options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = title.as_mut() {
                    title.push_str(&text);
                }
            }
            _ => {}
        }
    }
    None
}

struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    events: Vec<Event<'a>>,
}

struct PendingCode {
    info: String,
    text: String,
}

/// Rewrites the parser's event stream before default HTML serialization
struct Visitor<'h, 'a> {
    highlighter: &'h SyntaxHighlighter,
    events: Vec<Event<'a>>,
    heading: Option<PendingHeading<'a>>,
    code: Option<PendingCode>,
    ids: HashMap<String, usize>,
}

impl<'h, 'a> Visitor<'h, 'a> {
    fn new(highlighter: &'h SyntaxHighlighter) -> Self {
        Self {
            highlighter,
            events: Vec::new(),
            heading: None,
            code: None,
            ids: HashMap::new(),
        }
    }

    fn visit(&mut self, event: Event<'a>) -> Result<(), RenderError> {
        match event {
            // The H1 is the page's title banner, detached from the body by a rule
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => self.emit(Event::Html("<h1>".into())),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                self.emit(Event::Html("</h1><hr />\n".into()))
            }

            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                self.heading = Some(PendingHeading {
                    level,
                    id,
                    classes,
                    attrs,
                    events: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => self.finish_heading(),

            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(PendingCode {
                    info,
                    text: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = self.code.take() {
                    let html = self.highlighter.highlight(&code.text, &code.info)?;
                    self.emit(Event::Html(html.into()));
                }
            }
            Event::Text(text) if self.code.is_some() => {
                if let Some(code) = self.code.as_mut() {
                    code.text.push_str(&text);
                }
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => {
                let href = if link_type == LinkType::Email {
                    format!("mailto:{}", &*dest_url)
                } else {
                    dest_url.into_string()
                };
                self.emit(Event::InlineHtml(anchor_open(&href, &title).into()));
            }

            other => self.emit(other),
        }
        Ok(())
    }

    fn emit(&mut self, event: Event<'a>) {
        match self.heading.as_mut() {
            Some(heading) => heading.events.push(event),
            None => self.events.push(event),
        }
    }

    /// Flush a buffered heading, giving it an anchor id if it has none
    fn finish_heading(&mut self) {
        let Some(heading) = self.heading.take() else {
            return;
        };

        let id = match heading.id {
            Some(id) => {
                *self.ids.entry(id.to_string()).or_insert(0) += 1;
                id
            }
            None => {
                let text: String = heading
                    .events
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
                        _ => None,
                    })
                    .collect();
                CowStr::from(self.unique_id(&text))
            }
        };

        self.events.push(Event::Start(Tag::Heading {
            level: heading.level,
            id: Some(id),
            classes: heading.classes,
            attrs: heading.attrs,
        }));
        self.events.extend(heading.events);
        self.events.push(Event::End(TagEnd::Heading(heading.level)));
    }

    fn unique_id(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let seen = self.ids.entry(base.clone()).or_insert(0);
        let id = if *seen == 0 {
            base
        } else {
            format!("{}-{}", base, seen)
        };
        *seen += 1;
        id
    }

    fn finish(self) -> Vec<Event<'a>> {
        self.events
    }
}
