//! Typed nodes over the light tree.
//!
//! Wrappers are created on demand, either directly with [`AstNode::cast`] or
//! through the node factory ([`create`]), which dispatches on the node kind.
//! A wrapper computes its child list the first time an accessor needs it and
//! keeps it for later calls.
//!
//! Node families that C grammars describe as alternatives (expressions,
//! statements, external declarations, ...) are sum types: [`Expr`],
//! [`Stmt`], [`ExternalDecl`], [`BlockItem`], [`Initializer`],
//! [`DirectDeclarator`], [`Specifier`].

mod factory;
mod nodes;

pub use factory::{create, AnyNode};
pub use nodes::*;

use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;
use crate::tree::{LightElement, LightNode, LightToken};

/// A typed view of a [`LightNode`].
pub trait AstNode: Sized {
    /// Returns `true` if nodes of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Wraps `node` if its kind matches.
    fn cast(node: LightNode) -> Option<Self>;

    /// The underlying node.
    fn syntax(&self) -> &LightNode;

    /// Source text of the node, without surrounding trivia.
    fn text(&self) -> &str {
        self.syntax().text()
    }

    /// Byte range of the node.
    fn text_range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

/// Node handle plus the lazily computed element list shared by all wrappers.
#[derive(Clone)]
pub(crate) struct NodeCore {
    node: LightNode,
    elements: OnceCell<Vec<LightElement>>,
    children: OnceCell<Vec<LightNode>>,
}

impl NodeCore {
    pub(crate) fn new(node: LightNode) -> Self {
        Self {
            node,
            elements: OnceCell::new(),
            children: OnceCell::new(),
        }
    }

    pub(crate) fn node(&self) -> &LightNode {
        &self.node
    }

    /// Child nodes and directly owned tokens, trivia included.
    pub(crate) fn elements(&self) -> &[LightElement] {
        self.elements.get_or_init(|| self.node.children_with_tokens())
    }

    pub(crate) fn children(&self) -> &[LightNode] {
        self.children.get_or_init(|| {
            self.elements()
                .iter()
                .filter_map(LightElement::as_node)
                .cloned()
                .collect()
        })
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.elements.get().is_some()
    }

    pub(crate) fn child<N: AstNode>(&self) -> Option<N> {
        self.children_of().next()
    }

    pub(crate) fn nth_child<N: AstNode>(&self, n: usize) -> Option<N> {
        self.children_of().nth(n)
    }

    pub(crate) fn children_of<'a, N: AstNode + 'a>(&'a self) -> impl Iterator<Item = N> + 'a {
        self.children()
            .iter()
            .filter(|child| N::can_cast(child.kind()))
            .cloned()
            .filter_map(N::cast)
    }

    /// Directly owned tokens, trivia included.
    pub(crate) fn tokens(&self) -> impl Iterator<Item = &LightToken> + '_ {
        self.elements().iter().filter_map(LightElement::as_token)
    }

    pub(crate) fn token(&self, kind: TokenKind) -> Option<LightToken> {
        self.tokens().find(|token| token.kind() == kind).cloned()
    }

    pub(crate) fn token_text(&self, kind: TokenKind) -> Option<SmolStr> {
        self.token(kind).map(|token| SmolStr::new(token.text()))
    }

    /// First directly owned significant token.
    pub(crate) fn operator(&self) -> Option<LightToken> {
        self.tokens().find(|token| !token.kind().is_trivia()).cloned()
    }
}

impl PartialEq for NodeCore {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for NodeCore {}

impl Hash for NodeCore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for NodeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.node, f)
    }
}
