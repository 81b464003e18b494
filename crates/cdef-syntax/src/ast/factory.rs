//! Node factory: one typed wrapper per node kind.

use super::nodes::*;
use super::{AstNode, NodeCore};
use crate::syntax::SyntaxKind;
use crate::tree::LightNode;

macro_rules! define_any_node {
    ($($name:ident),* $(,)?) => {
        /// A typed wrapper for any node of the tree.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum AnyNode {
            $(
                #[allow(missing_docs)]
                $name($name),
            )*
            /// Recovery node holding unparsed input.
            Error(LightNode),
            /// Wrapper kind kept because it groups several children.
            Other(LightNode),
        }

        /// Creates the typed wrapper matching the kind of `node`.
        ///
        /// The wrapper starts without a child cache; the first accessor call
        /// fills it.
        #[must_use]
        pub fn create(node: LightNode) -> AnyNode {
            match node.kind() {
                $(SyntaxKind::$name => AnyNode::$name($name(NodeCore::new(node))),)*
                SyntaxKind::Error => AnyNode::Error(node),
                _ => AnyNode::Other(node),
            }
        }

        impl AnyNode {
            /// The underlying node.
            #[must_use]
            pub fn syntax(&self) -> &LightNode {
                match self {
                    $(Self::$name(node) => node.syntax(),)*
                    Self::Error(node) | Self::Other(node) => node,
                }
            }
        }
    };
}

super::nodes::for_each_ast_node!(define_any_node);

impl AnyNode {
    /// Kind of the wrapped node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }

    /// The node viewed as an expression, if it is one.
    #[must_use]
    pub fn as_expr(&self) -> Option<Expr> {
        Expr::cast(self.syntax().clone())
    }

    /// The node viewed as a statement, if it is one.
    #[must_use]
    pub fn as_stmt(&self) -> Option<Stmt> {
        Stmt::cast(self.syntax().clone())
    }
}
