//! Marker/builder core.
//!
//! Rules talk to the [`Parser`] through markers: `start` opens one,
//! `complete` commits it as a node, `rollback` restores the token position,
//! the diagnostics and the event log to what they were when it was opened.
//! Every marker must be closed exactly once and in LIFO order.

use drop_bomb::DropBomb;
use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};
use crate::parser::config::{Cancellation, ParserConfig};
use crate::parser::event::Event;
use crate::parser::expected::Expected;
use crate::parser::grammar;
use crate::parser::guard::{Entry, RecursionGuard};
use crate::parser::source::Source;
use crate::parser::token_set::TokenSet;
use crate::parser::{EntryPoint, ParseError, ParseStats};
use crate::syntax::SyntaxKind;

/// Everything a finished parse hands to the sink.
pub(crate) struct Output {
    pub(crate) events: Vec<Event>,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) consumed: TextSize,
    pub(crate) stats: ParseStats,
}

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    source: Source<'t, 'src>,
    events: Vec<Event>,
    errors: Vec<ParseError>,
    // Limit diagnostics survive rollback.
    limits: Vec<ParseError>,
    expected: Expected,
    guard: RecursionGuard,
    open: Vec<usize>,
    cancellation: Option<Cancellation>,
    max_depth: usize,
    max_iterations: usize,
    aborted: bool,
    stats: ParseStats,
}

pub(crate) struct Marker {
    pos: usize,
    checkpoint: usize,
    errors_len: usize,
    preceded: Option<usize>,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(
        mut self,
        parser: &mut Parser<'_, '_>,
        kind: SyntaxKind,
    ) -> CompletedMarker {
        self.bomb.defuse();
        parser.close(self.pos);
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::start(kind);
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Undoes everything recorded since this marker was opened.
    pub(crate) fn rollback(mut self, parser: &mut Parser<'_, '_>) {
        self.bomb.defuse();
        parser.close(self.pos);
        parser.events.truncate(self.pos);
        parser.unlink(self.preceded);
        parser.source.reset(self.checkpoint);
        parser.errors.truncate(self.errors_len);
        parser.stats.rollbacks += 1;
    }

    /// Keeps the consumed tokens but produces no node for them.
    pub(crate) fn abandon(mut self, parser: &mut Parser<'_, '_>) {
        self.bomb.defuse();
        parser.close(self.pos);
        if self.pos + 1 == parser.events.len() {
            if let Some(Event::Placeholder) = parser.events.last() {
                parser.events.pop();
                parser.unlink(self.preceded);
            }
        }
    }

    /// Completes the marker as an `Error` node and records `error`.
    pub(crate) fn error(self, parser: &mut Parser<'_, '_>, error: ParseError) -> CompletedMarker {
        parser.errors.push(error);
        self.complete(parser, SyntaxKind::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompletedMarker {
    pos: usize,
}

impl CompletedMarker {
    /// Opens a marker that becomes the parent of this already completed node.
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        let owner = set_forward_parent(&mut parser.events, self.pos, new_pos);
        parser.open.push(new_pos);
        parser.stats.markers += 1;
        Marker {
            pos: new_pos,
            checkpoint: parser.source.position(),
            errors_len: parser.errors.len(),
            preceded: owner,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn kind(self, parser: &Parser<'_, '_>) -> Option<SyntaxKind> {
        match parser.events.get(self.pos) {
            Some(Event::Start { kind, .. }) => Some(*kind),
            _ => None,
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) -> Option<usize> {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(to - current);
                return Some(current);
            }
            _ => return None,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    pub(crate) fn new(
        tokens: &'t [Token],
        text: &'src str,
        config: ParserConfig,
        cancellation: Option<Cancellation>,
    ) -> Self {
        Self {
            source: Source::new(tokens, text),
            events: Vec::new(),
            errors: Vec::new(),
            limits: Vec::new(),
            expected: Expected::default(),
            guard: RecursionGuard::new(config.max_depth),
            open: Vec::new(),
            cancellation,
            max_depth: config.max_depth,
            max_iterations: config.max_iterations,
            aborted: false,
            stats: ParseStats::default(),
        }
    }

    /// Runs one top-level parse from `entry` and returns the event log.
    pub(crate) fn run(mut self, entry: EntryPoint) -> Output {
        self.expected.reset();
        let root = self.start();
        let matched = grammar::entry(&mut self, entry);
        let consumed = self.source.consumed_offset();

        if self.aborted {
            self.wrap_rest(None);
        } else if !matched {
            let error = self.unexpected();
            self.wrap_rest(Some(error));
        } else if !self.at_end() {
            if entry.is_whole_unit() {
                let position = self.position();
                let furthest = self.furthest_failure().max(position);
                let error = ParseError::TrailingInput {
                    range: TextRange::new(
                        self.source.range_at(position).start(),
                        self.source.end_offset(),
                    ),
                    found: self.source.describe_at(furthest),
                    expected: self.expected.names_at(furthest),
                };
                self.wrap_rest(Some(error));
            } else {
                while !self.at_end() {
                    self.bump();
                }
            }
        }
        root.complete(&mut self, entry.root_kind());

        assert!(self.open.is_empty(), "markers left open after parse");
        assert!(self.guard.is_idle(), "recursion guard not empty after parse");
        self.stats.max_depth = self.guard.deepest();

        let mut errors = self.errors;
        errors.append(&mut self.limits);
        Output {
            events: self.events,
            errors,
            consumed,
            stats: self.stats,
        }
    }

    fn wrap_rest(&mut self, error: Option<ParseError>) {
        if error.is_none() && self.at_end() {
            return;
        }
        let m = self.start();
        while !self.at_end() {
            self.bump();
        }
        match error {
            Some(error) => {
                m.error(self, error);
            }
            None => {
                m.complete(self, SyntaxKind::Error);
            }
        }
    }

    fn furthest_failure(&self) -> usize {
        self.expected.position().unwrap_or_else(|| self.position())
    }

    fn unexpected(&self) -> ParseError {
        let position = self.furthest_failure();
        ParseError::Unexpected {
            range: self.source.range_at(position),
            found: self.source.describe_at(position),
            expected: self.expected.names_at(position),
        }
    }

    // =========================================================================
    // Markers
    // =========================================================================

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        self.open.push(pos);
        self.stats.markers += 1;
        Marker {
            pos,
            checkpoint: self.source.position(),
            errors_len: self.errors.len(),
            preceded: None,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    fn close(&mut self, pos: usize) {
        let top = self.open.pop();
        assert_eq!(top, Some(pos), "markers must be closed in LIFO order");
    }

    fn unlink(&mut self, owner: Option<usize>) {
        if let Some(Event::Start { forward_parent, .. }) =
            owner.and_then(|owner| self.events.get_mut(owner))
        {
            *forward_parent = None;
        }
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.source.nth(n)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn position(&self) -> usize {
        self.source.position()
    }

    pub(crate) fn bump(&mut self) {
        if self.at_end() {
            return;
        }
        self.events.push(Event::Token);
        self.source.bump();
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or records it as expected at the current position.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.add_variant(kind.name());
        false
    }

    /// Records `name` as an expected production at the current position.
    pub(crate) fn add_variant(&mut self, name: &'static str) {
        let position = self.position();
        self.expected.record(position, name);
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Runs a named rule under the recursion guard.
    ///
    /// Returns `None` without touching any state if `name` is already active
    /// at the current position, if the nesting limit is reached, or once the
    /// parse has been aborted.
    pub(crate) fn rule<T>(
        &mut self,
        name: &'static str,
        body: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        if self.aborted {
            return None;
        }
        let position = self.position();
        match self.guard.enter(name, position) {
            Entry::Entered => {}
            Entry::Recursive => {
                self.stats.guard_rejections += 1;
                tracing::trace!(rule = name, position, "recursion guard rejected re-entry");
                return None;
            }
            Entry::TooDeep => {
                let offset = self.offset();
                self.abort(ParseError::NestingTooDeep {
                    offset,
                    limit: self.max_depth,
                });
                return None;
            }
        }

        let result = body(self);
        self.guard.exit(name, position);
        debug_assert!(
            result.is_some() || self.position() == position,
            "rule `{name}` failed without restoring its position"
        );
        result
    }

    /// Repeats `item` until it fails or stops consuming input.
    ///
    /// Each pass polls the cancellation flag and counts against the
    /// iteration budget. Returns the number of matched items.
    pub(crate) fn repeat(
        &mut self,
        name: &'static str,
        mut item: impl FnMut(&mut Self) -> bool,
    ) -> usize {
        let mut count = 0;
        while self.tick() {
            let before = self.position();
            if !item(self) {
                break;
            }
            count += 1;
            if self.position() == before {
                tracing::trace!(rule = name, position = before, "empty element, stopping");
                break;
            }
        }
        count
    }

    fn tick(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        self.stats.iterations += 1;
        if self
            .cancellation
            .as_ref()
            .is_some_and(Cancellation::is_cancelled)
        {
            let offset = self.offset();
            self.abort(ParseError::Cancelled { offset });
            return false;
        }
        if self.stats.iterations > self.max_iterations {
            let offset = self.offset();
            self.abort(ParseError::IterationLimit {
                offset,
                limit: self.max_iterations,
            });
            return false;
        }
        true
    }

    fn abort(&mut self, error: ParseError) {
        tracing::warn!(%error, "parse aborted");
        self.limits.push(error);
        self.aborted = true;
    }

    fn offset(&self) -> u32 {
        u32::from(self.source.range_at(self.position()).start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn with_parser<R>(text: &str, f: impl FnOnce(&mut Parser<'_, '_>) -> R) -> R {
        let tokens = lex(text);
        let mut parser = Parser::new(&tokens, text, ParserConfig::default(), None);
        f(&mut parser)
    }

    fn name(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
        if !p.at(TokenKind::Ident) {
            p.add_variant("identifier");
            return None;
        }
        let m = p.start();
        p.bump();
        Some(m.complete(p, SyntaxKind::NameRef))
    }

    // sum := sum '+' name | name, written without any left-recursion rewrite.
    fn naive_sum(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
        p.rule("sum", |p| {
            let m = p.start();
            if naive_sum(p).is_some() && p.eat(TokenKind::Plus) && name(p).is_some() {
                return Some(m.complete(p, SyntaxKind::BinaryExpr));
            }
            m.rollback(p);
            name(p)
        })
    }

    #[test]
    fn test_naive_left_recursion_terminates() {
        with_parser("a + b + c", |p| {
            let result = naive_sum(p);
            assert!(result.is_some());
            assert_eq!(p.position(), 1);
            assert!(p.stats.guard_rejections >= 1);
            assert!(p.guard.is_idle());
        });
    }

    #[test]
    fn test_rollback_restores_position_events_and_errors() {
        with_parser("a b c", |p| {
            let outer = p.start();
            p.bump();
            let events_before = p.events.len();

            let m = p.start();
            p.bump();
            let inner = p.start();
            p.bump();
            inner.error(p, ParseError::Cancelled { offset: 0 });
            assert_eq!(p.errors.len(), 1);
            m.rollback(p);

            assert_eq!(p.position(), 1);
            assert_eq!(p.events.len(), events_before);
            assert!(p.errors.is_empty());
            outer.complete(p, SyntaxKind::ExpressionFragment);
        });
    }

    #[test]
    fn test_rollback_of_preceded_marker_unlinks_parent() {
        with_parser("a +", |p| {
            let lhs = name(p).unwrap();
            let m = lhs.precede(p);
            p.bump();
            assert!(matches!(
                p.events[0],
                Event::Start {
                    forward_parent: Some(_),
                    ..
                }
            ));
            m.rollback(p);
            assert_eq!(p.events[0], Event::start(SyntaxKind::NameRef));
            assert_eq!(p.position(), 1);
        });
    }

    #[test]
    fn test_expect_records_variant() {
        with_parser("(a", |p| {
            p.bump();
            p.bump();
            assert!(!p.expect(TokenKind::RParen));
            assert_eq!(p.expected.names_at(2), vec!["')'"]);
        });
    }

    #[test]
    fn test_repeat_stops_on_empty_element() {
        with_parser("a b", |p| {
            let mut calls = 0;
            let count = p.repeat("nothing", |_| {
                calls += 1;
                true
            });
            assert_eq!(count, 1);
            assert_eq!(calls, 1);
        });
    }

    #[test]
    fn test_repeat_on_empty_input() {
        with_parser("", |p| {
            let count = p.repeat("names", |p| name(p).is_some());
            assert_eq!(count, 0);
            assert!(p.events.is_empty());
        });
    }

    #[test]
    #[should_panic(expected = "LIFO")]
    fn test_out_of_order_close_panics() {
        with_parser("a", |p| {
            let outer = p.start();
            let _inner = p.start();
            outer.complete(p, SyntaxKind::Error);
        });
    }

    #[test]
    #[should_panic(expected = "uncompleted marker")]
    fn test_dropped_marker_panics() {
        with_parser("a", |p| {
            let _marker = p.start();
        });
    }
}
