//! Lazy tokenisation of source text into scoped spans

use std::collections::VecDeque;

use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;

/// Prefix of every CSS class emitted for a token
pub const CLASS_PREFIX: &str = "hl-";

/// A span of source text and the scope stack it was parsed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Outermost scope first; empty for text outside any scope
    pub scopes: Vec<Scope>,
}

/// Iterator over the tokens of a source text, parsed one line at a time
pub struct Tokens<'a> {
    syntax_set: &'a SyntaxSet,
    lines: LinesWithEndings<'a>,
    state: ParseState,
    stack: ScopeStack,
    pending: VecDeque<Token>,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(syntax_set: &'a SyntaxSet, syntax: &SyntaxReference, source: &'a str) -> Self {
        Self {
            syntax_set,
            lines: LinesWithEndings::from(source),
            state: ParseState::new(syntax),
            stack: ScopeStack::new(),
            pending: VecDeque::new(),
            failed: false,
        }
    }

    fn tokenize_line(&mut self, line: &str) -> Result<(), HighlightError> {
        let ops = self
            .state
            .parse_line(line, self.syntax_set)
            .map_err(|e| HighlightError::Tokenize(e.to_string()))?;

        let mut cursor = 0;
        for (index, op) in ops {
            if index > cursor {
                self.push(&line[cursor..index]);
                cursor = index;
            }
            self.stack
                .apply(&op)
                .map_err(|e| HighlightError::Tokenize(e.to_string()))?;
        }
        if cursor < line.len() {
            self.push(&line[cursor..]);
        }
        Ok(())
    }

    fn push(&mut self, text: &str) {
        self.pending.push_back(Token {
            text: text.to_string(),
            scopes: self.stack.as_slice().to_vec(),
        });
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, HighlightError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.failed {
                return None;
            }
            let line = self.lines.next()?;
            if let Err(e) = self.tokenize_line(line) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

/// Merges runs of adjacent tokens that share a scope stack
pub struct Coalesce<I> {
    inner: I,
    held: Option<Token>,
}

impl<I> Coalesce<I>
where
    I: Iterator<Item = Result<Token, HighlightError>>,
{
    pub fn new(inner: I) -> Self {
        Self { inner, held: None }
    }
}

impl<I> Iterator for Coalesce<I>
where
    I: Iterator<Item = Result<Token, HighlightError>>,
{
    type Item = Result<Token, HighlightError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next() {
                Some(Ok(token)) => match self.held.take() {
                    Some(mut held) if held.scopes == token.scopes => {
                        held.text.push_str(&token.text);
                        self.held = Some(held);
                    }
                    Some(held) => {
                        self.held = Some(token);
                        return Some(Ok(held));
                    }
                    None => self.held = Some(token),
                },
                Some(Err(e)) => return Some(Err(e)),
                None => return self.held.take().map(Ok),
            }
        }
    }
}

/// Class attribute for one scope, e.g. `keyword.control.rust` ->
/// `hl-keyword hl-control hl-rust`, the naming syntect's themed
/// stylesheet uses for `ClassStyle::SpacedPrefixed`
pub fn scope_classes(scope: Scope) -> String {
    scope
        .build_string()
        .split('.')
        .map(|atom| format!("{}{}", CLASS_PREFIX, atom))
        .collect::<Vec<_>>()
        .join(" ")
}
