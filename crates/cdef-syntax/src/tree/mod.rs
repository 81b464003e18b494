//! Flyweight tree.
//!
//! The parser never allocates node objects. After a parse, the event log is
//! normalized once into a [`LightTree`]: the source text, the full token list
//! and one flat preorder buffer of node entries. [`LightNode`] and
//! [`LightToken`] are cheap handles into that buffer; typed wrappers in
//! [`crate::ast`] are built on top of them on demand.
//!
//! Delegating wrapper kinds (see [`SyntaxKind::is_collapsible`]) that end up
//! wrapping exactly one node are kept in the buffer but marked collapsed, and
//! every view skips them.

use std::fmt;
use std::rc::Rc;

use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};
use crate::syntax::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    range: TextRange,
    parent: Option<usize>,
    // One past the last descendant, in preorder.
    end: usize,
    first_token: usize,
    token_end: usize,
    collapsed: bool,
}

#[derive(Debug)]
struct TreeData {
    text: Box<str>,
    tokens: Vec<Token>,
    nodes: Vec<NodeData>,
}

impl TreeData {
    fn child_ids(&self, id: usize) -> ChildIds<'_> {
        ChildIds {
            nodes: &self.nodes,
            next: id + 1,
            end: self.nodes[id].end,
        }
    }

    fn emit_tokens(&self, builder: &mut rowan::GreenNodeBuilder<'_>, cursor: &mut usize, to: usize) {
        while *cursor < to {
            let token = self.tokens[*cursor];
            builder.token(SyntaxKind::from(token.kind).into(), &self.text[token.range]);
            *cursor += 1;
        }
    }
}

struct ChildIds<'a> {
    nodes: &'a [NodeData],
    next: usize,
    end: usize,
}

impl Iterator for ChildIds<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.end {
            let id = self.next;
            let node = &self.nodes[id];
            if node.collapsed {
                self.next = id + 1;
                continue;
            }
            self.next = node.end;
            return Some(id);
        }
        None
    }
}

/// Normalized result of a parse.
#[derive(Clone)]
pub struct LightTree(Rc<TreeData>);

impl LightTree {
    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> LightNode {
        LightNode {
            tree: self.clone(),
            id: 0,
        }
    }

    /// Returns the parsed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Returns every token, trivia included, in document order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.0.tokens
    }

    /// Number of visible (not collapsed) nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.0.nodes.iter().filter(|node| !node.collapsed).count()
    }

    /// Builds the lossless `rowan` tree for this parse.
    ///
    /// Collapsed wrappers are skipped, so the shape matches [`LightNode`]'s view.
    #[must_use]
    pub fn to_syntax(&self) -> SyntaxNode {
        let data = &*self.0;
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut cursor = 0;

        for (id, node) in data.nodes.iter().enumerate() {
            if node.collapsed {
                continue;
            }
            while let Some(&top) = stack.last() {
                if id < data.nodes[top].end {
                    break;
                }
                data.emit_tokens(&mut builder, &mut cursor, data.nodes[top].token_end);
                builder.finish_node();
                stack.pop();
            }
            data.emit_tokens(&mut builder, &mut cursor, node.first_token);
            builder.start_node(node.kind.into());
            stack.push(id);
        }
        while let Some(top) = stack.pop() {
            data.emit_tokens(&mut builder, &mut cursor, data.nodes[top].token_end);
            builder.finish_node();
        }

        SyntaxNode::new_root(builder.finish())
    }
}

impl fmt::Debug for LightTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightTree")
            .field("nodes", &self.0.nodes.len())
            .field("tokens", &self.0.tokens.len())
            .finish()
    }
}

/// Handle to one node of a [`LightTree`].
#[derive(Clone)]
pub struct LightNode {
    tree: LightTree,
    id: usize,
}

impl PartialEq for LightNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree.0, &other.tree.0) && self.id == other.id
    }
}

impl Eq for LightNode {}

impl std::hash::Hash for LightNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.tree.0).hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for LightNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl LightNode {
    fn data(&self) -> &NodeData {
        &self.tree.0.nodes[self.id]
    }

    fn at(&self, id: usize) -> Self {
        Self {
            tree: self.tree.clone(),
            id,
        }
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &LightTree {
        &self.tree
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// Span of the node's significant tokens. The root spans the whole text.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.data().range
    }

    /// Source text covered by [`Self::text_range`].
    #[must_use]
    pub fn text(&self) -> &str {
        &self.tree.0.text[self.text_range()]
    }

    /// Nearest visible ancestor.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Visible child nodes, in document order.
    pub fn children(&self) -> impl Iterator<Item = LightNode> + '_ {
        self.tree.0.child_ids(self.id).map(|id| self.at(id))
    }

    /// Child nodes and directly owned tokens (trivia included), in document order.
    #[must_use]
    pub fn children_with_tokens(&self) -> Vec<LightElement> {
        let data = self.data();
        let mut elements = Vec::new();
        let mut cursor = data.first_token;
        for id in self.tree.0.child_ids(self.id) {
            let child = &self.tree.0.nodes[id];
            elements.extend((cursor..child.first_token).map(|i| LightElement::Token(self.token_at(i))));
            elements.push(LightElement::Node(self.at(id)));
            cursor = child.token_end;
        }
        elements.extend((cursor..data.token_end).map(|i| LightElement::Token(self.token_at(i))));
        elements
    }

    /// This node and every visible node below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = LightNode> + '_ {
        let nodes = &self.tree.0.nodes;
        (self.id..self.data().end)
            .filter(move |&id| !nodes[id].collapsed)
            .map(|id| self.at(id))
    }

    /// Every token under this node, trivia included.
    pub fn tokens(&self) -> impl Iterator<Item = LightToken> + '_ {
        let data = self.data();
        (data.first_token..data.token_end).map(|i| self.token_at(i))
    }

    /// First visible child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// First directly owned token of the given kind.
    #[must_use]
    pub fn first_token_of_kind(&self, kind: TokenKind) -> Option<LightToken> {
        self.children_with_tokens()
            .into_iter()
            .filter_map(LightElement::into_token)
            .find(|token| token.kind() == kind)
    }

    fn token_at(&self, index: usize) -> LightToken {
        LightToken {
            tree: self.tree.clone(),
            index,
        }
    }
}

/// Handle to one token of a [`LightTree`].
#[derive(Clone)]
pub struct LightToken {
    tree: LightTree,
    index: usize,
}

impl LightToken {
    /// The token's kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.tree.0.tokens[self.index].kind
    }

    /// Byte range of the token.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.tree.0.tokens[self.index].range
    }

    /// Token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.tree.0.text[self.text_range()]
    }
}

impl fmt::Debug for LightToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

/// Either a node or a token.
#[derive(Debug, Clone)]
pub enum LightElement {
    /// A child node.
    Node(LightNode),
    /// A directly owned token.
    Token(LightToken),
}

impl LightElement {
    /// Borrows the node, if this is one.
    #[must_use]
    pub fn as_node(&self) -> Option<&LightNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// Borrows the token, if this is one.
    #[must_use]
    pub fn as_token(&self) -> Option<&LightToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }

    /// Returns the node, if this is one.
    #[must_use]
    pub fn into_node(self) -> Option<LightNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// Returns the token, if this is one.
    #[must_use]
    pub fn into_token(self) -> Option<LightToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

/// Incremental construction of a [`LightTree`], driven by the sink.
pub(crate) struct TreeBuilder {
    text: Box<str>,
    tokens: Vec<Token>,
    nodes: Vec<NodeData>,
    stack: Vec<usize>,
    cursor: usize,
}

impl TreeBuilder {
    pub(crate) fn new(text: &str, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
            nodes: Vec::new(),
            stack: Vec::new(),
            cursor: 0,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            range: TextRange::empty(TextSize::from(0)),
            parent: self.stack.last().copied(),
            end: id + 1,
            first_token: self.cursor,
            token_end: self.cursor,
            collapsed: false,
        });
        self.stack.push(id);
    }

    /// Attaches the next token to the innermost open node.
    pub(crate) fn token(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Attaches pending trivia to the innermost open node.
    pub(crate) fn eat_trivia(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        while self
            .tokens
            .get(self.cursor)
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.cursor += 1;
        }
    }

    /// Attaches every remaining token to the innermost open node.
    pub(crate) fn eat_rest(&mut self) {
        self.cursor = self.tokens.len();
    }

    pub(crate) fn finish_node(&mut self) {
        let Some(id) = self.stack.pop() else {
            return;
        };
        let end = self.nodes.len();
        let first = self.nodes[id].first_token;
        let token_end = self.cursor;

        let range = if self.nodes[id].parent.is_none() {
            TextRange::up_to(TextSize::of(&*self.text))
        } else {
            self.significant_range(first, token_end)
        };

        let node = &mut self.nodes[id];
        node.end = end;
        node.token_end = token_end;
        node.range = range;

        if node.kind.is_collapsible() && node.parent.is_some() {
            self.try_collapse(id);
        }
    }

    fn significant_range(&self, first: usize, end: usize) -> TextRange {
        let significant = |i: &usize| !self.tokens[*i].kind.is_trivia();
        let start = (first..end).find(significant);
        let last = (first..end).rev().find(significant);
        match (start, last) {
            (Some(start), Some(last)) => {
                TextRange::new(self.tokens[start].range.start(), self.tokens[last].range.end())
            }
            _ => {
                let offset = self
                    .tokens
                    .get(end)
                    .map_or_else(|| TextSize::of(&*self.text), |token| token.range.start());
                TextRange::empty(offset)
            }
        }
    }

    fn try_collapse(&mut self, id: usize) {
        let view = ChildIds {
            nodes: &self.nodes,
            next: id + 1,
            end: self.nodes[id].end,
        };
        let mut children = view;
        let (Some(child), None) = (children.next(), children.next()) else {
            return;
        };
        let wrapper = &self.nodes[id];
        let inner = &self.nodes[child];
        if inner.first_token != wrapper.first_token || inner.token_end != wrapper.token_end {
            return;
        }
        let parent = wrapper.parent;
        self.nodes[child].parent = parent;
        self.nodes[id].collapsed = true;
    }

    pub(crate) fn finish(self) -> LightTree {
        debug_assert!(self.stack.is_empty(), "unfinished nodes in tree builder");
        let data = TreeData {
            text: self.text,
            tokens: self.tokens,
            nodes: self.nodes,
        };
        LightTree(Rc::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_block, parse_translation_unit};

    #[test]
    fn test_collapsed_wrapper_is_invisible() {
        let parse = parse_translation_unit("int x;");
        let root = parse.root();
        let decl = root.children().next().unwrap();
        assert_eq!(decl.kind(), SyntaxKind::Declaration);
        assert_eq!(decl.parent(), Some(root.clone()));
        assert!(root
            .descendants()
            .all(|node| node.kind() != SyntaxKind::ExternalDeclaration));
        assert_eq!(parse.tree().node_count(), root.descendants().count());
    }

    #[test]
    fn test_leading_trivia_belongs_to_parent() {
        let parse = parse_translation_unit("/* c */ int x;");
        let root = parse.root();
        let elements = root.children_with_tokens();
        let kinds: Vec<_> = elements
            .iter()
            .filter_map(|element| match element {
                LightElement::Token(token) => Some(token.kind()),
                LightElement::Node(_) => None,
            })
            .collect();
        assert_eq!(kinds, vec![TokenKind::BlockComment, TokenKind::Whitespace]);

        let decl = root.children().next().unwrap();
        assert_eq!(decl.text_range(), TextRange::new(8.into(), 14.into()));
        assert_eq!(decl.text(), "int x;");
    }

    #[test]
    fn test_root_spans_whole_text() {
        let parse = parse_block("  { }  ");
        assert_eq!(parse.root().text_range(), TextRange::new(0.into(), 7.into()));
        let block = parse.root().children().next().unwrap();
        assert_eq!(block.text_range(), TextRange::new(2.into(), 5.into()));
    }

    #[test]
    fn test_rowan_export_matches_light_view() {
        let source = "int f(int a) { if (a) return a * 2; return 0; }\n";
        let parse = parse_translation_unit(source);
        let syntax = parse.tree().to_syntax();
        assert_eq!(syntax.text().to_string(), source);

        let light: Vec<_> = parse.root().descendants().map(|n| n.kind()).collect();
        let rowan: Vec<_> = syntax.descendants().map(|n| n.kind()).collect();
        assert_eq!(light, rowan);
    }
}
