//! Syntax kinds and the lossless `rowan` view.
//!
//! [`SyntaxKind`] is the closed set of element types: every token kind
//! followed by every composite node kind produced by the grammar. It is the
//! tag stored in the flyweight tree and the key the node factory dispatches
//! on. The `rowan` aliases at the bottom are used by
//! [`LightTree::to_syntax`](crate::tree::LightTree::to_syntax).

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    (@emit [$($token:ident),*] $($(#[$doc:meta])* $node:ident = $name:literal),* $(,)?) => {
        /// All syntax node and token kinds.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Token variants mirror lexer names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($token,)*
            $($(#[$doc])* $node,)*
        }

        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            $(SyntaxKind::$node,)*
        ];

        impl SyntaxKind {
            fn node_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$node => Some($name),)*
                    _ => None,
                }
            }
        }
    };
    ($($token:ident),* $(,)?) => {
        define_syntax_kind! {
            @emit [$($token),*]

            // =================================================================
            // DEFINITION FILE
            // =================================================================
            /// Root of a definition file: header definitions and code section
            DefinitionFile = "definition file",
            /// `key[.platform] = value`
            Definition = "definition",
            /// `key` or `key.platform`
            DefinitionKey = "definition key",
            /// C declarations after the `---` delimiter
            CodeSection = "code section",

            // =================================================================
            // FRAGMENT ROOTS
            // =================================================================
            /// Root of a C translation unit
            TranslationUnit = "translation unit",
            /// Root of a single-expression parse
            ExpressionFragment = "expression fragment",
            /// Root of a single-block parse
            BlockFragment = "block fragment",

            // =================================================================
            // EXTERNAL DEFINITIONS
            // =================================================================
            /// Delegating wrapper around a function definition or declaration (collapsed)
            ExternalDeclaration = "external declaration",
            /// `int main(void) { ... }`
            FunctionDefinition = "function definition",
            /// Old-style parameter declarations between declarator and body
            DeclarationList = "declaration list",

            // =================================================================
            // DECLARATIONS
            // =================================================================
            /// `specifiers init-declarators? ;`
            Declaration = "declaration",
            /// Sequence of storage classes, type specifiers, qualifiers
            DeclarationSpecifiers = "declaration specifiers",
            /// `typedef`, `extern`, `static`, `_Thread_local`, `auto`, `register`
            StorageClassSpecifier = "storage class specifier",
            /// Builtin type keyword or typedef name
            TypeSpecifier = "type specifier",
            /// `const`, `restrict`, `volatile`, `_Atomic`
            TypeQualifier = "type qualifier",
            /// `inline`, `_Noreturn`
            FunctionSpecifier = "function specifier",
            /// `_Alignas(...)`
            AlignmentSpecifier = "alignment specifier",
            /// `_Atomic(type-name)`
            AtomicTypeSpecifier = "atomic type specifier",
            /// `struct tag { ... }` or `union tag`
            StructOrUnionSpecifier = "struct or union specifier",
            /// `{ member-declarations }`
            StructDeclarationList = "struct declaration list",
            /// One member declaration inside a struct or union
            StructDeclaration = "struct declaration",
            /// Specifiers and qualifiers of a member or type name
            SpecifierQualifierList = "specifier qualifier list",
            /// Comma-separated member declarators
            StructDeclaratorList = "struct declarator list",
            /// Member declarator with optional bit-field width
            StructDeclarator = "struct declarator",
            /// `enum tag { ... }`
            EnumSpecifier = "enum specifier",
            /// Comma-separated enumerators
            EnumeratorList = "enumerator list",
            /// `NAME` or `NAME = constant`
            Enumerator = "enumerator",
            /// Comma-separated init declarators
            InitDeclaratorList = "init declarator list",
            /// `declarator` or `declarator = initializer`
            InitDeclarator = "init declarator",
            /// Optional pointer chain followed by a direct declarator
            Declarator = "declarator",
            /// `*`, `* const`, `**`
            Pointer = "pointer",
            /// Qualifiers following `*` or inside array brackets
            TypeQualifierList = "type qualifier list",
            /// Declared identifier
            NameDeclarator = "declarator name",
            /// `( declarator )`
            ParenDeclarator = "parenthesized declarator",
            /// `direct-declarator [ ... ]`
            ArrayDeclarator = "array declarator",
            /// `direct-declarator ( ... )`
            FunctionDeclarator = "function declarator",
            /// Parameter list with optional `, ...`
            ParameterTypeList = "parameter type list",
            /// Comma-separated parameter declarations
            ParameterList = "parameter list",
            /// One parameter: specifiers and an optional (abstract) declarator
            ParameterDeclaration = "parameter declaration",
            /// Old-style identifier list of a function declarator
            IdentifierList = "identifier list",
            /// Type in casts, `sizeof`, `_Alignas` and `_Generic`
            TypeName = "type name",
            /// Declarator without a name
            AbstractDeclarator = "abstract declarator",
            /// `( abstract-declarator )`
            ParenAbstractDeclarator = "parenthesized abstract declarator",
            /// `[ ... ]` without a name
            ArrayAbstractDeclarator = "abstract array declarator",
            /// `( parameters )` without a name
            FunctionAbstractDeclarator = "abstract function declarator",
            /// Delegating wrapper around an initializer expression (collapsed)
            Initializer = "initializer",
            /// `{ designation? initializer, ... }`
            InitializerList = "initializer list",
            /// `designator... =`
            Designation = "designation",
            /// `[ constant ]` or `. member`
            Designator = "designator",
            /// `_Static_assert(expr, "msg");`
            StaticAssertDeclaration = "static assertion",

            // =================================================================
            // STATEMENTS
            // =================================================================
            /// Delegating wrapper around one statement form (collapsed)
            Statement = "statement",
            /// `{ block-items }`
            CompoundStatement = "compound statement",
            /// `label: statement`
            LabeledStatement = "labeled statement",
            /// `case constant: statement`
            CaseStatement = "case statement",
            /// `default: statement`
            DefaultStatement = "default statement",
            /// `expression? ;`
            ExpressionStatement = "expression statement",
            /// `if (cond) stmt else stmt`
            IfStatement = "if statement",
            /// `else stmt`
            ElseBranch = "else branch",
            /// `switch (expr) stmt`
            SwitchStatement = "switch statement",
            /// `while (cond) stmt`
            WhileStatement = "while statement",
            /// `do stmt while (cond);`
            DoStatement = "do statement",
            /// `for (init; cond; step) stmt`
            ForStatement = "for statement",
            /// `goto label;`
            GotoStatement = "goto statement",
            /// `continue;`
            ContinueStatement = "continue statement",
            /// `break;`
            BreakStatement = "break statement",
            /// `return expr?;`
            ReturnStatement = "return statement",

            // =================================================================
            // EXPRESSIONS
            // =================================================================
            /// Identifier used as an expression
            NameRef = "identifier",
            /// Integer, floating, or character constant
            Literal = "constant",
            /// One or more adjacent string literals
            StringExpr = "string literal",
            /// `( expression )`
            ParenExpr = "parenthesized expression",
            /// `_Generic( expr, assoc, ... )`
            GenericSelection = "generic selection",
            /// Associations of a generic selection
            GenericAssocList = "generic association list",
            /// `type-name: expr` or `default: expr`
            GenericAssociation = "generic association",
            /// `( type-name ) { initializers }`
            CompoundLiteral = "compound literal",
            /// `a[i]`
            IndexExpr = "index expression",
            /// `f(args)`
            CallExpr = "call expression",
            /// Comma-separated call arguments
            ArgumentList = "argument list",
            /// `s.field` or `p->field`
            MemberExpr = "member expression",
            /// `x++` or `x--`
            PostfixExpr = "postfix expression",
            /// `-x`, `!x`, `*p`, `&x`, `++x`
            UnaryExpr = "unary expression",
            /// `sizeof x` or `sizeof(type)`
            SizeofExpr = "sizeof expression",
            /// `_Alignof(type)`
            AlignofExpr = "alignof expression",
            /// `(type) x`
            CastExpr = "cast expression",
            /// `a op b`
            BinaryExpr = "binary expression",
            /// `c ? a : b`
            ConditionalExpr = "conditional expression",
            /// `a = b`, `a += b`
            AssignExpr = "assignment expression",
            /// `a, b`
            CommaExpr = "comma expression",
            /// Delegating wrapper around a constant expression (collapsed)
            ConstantExpr = "constant expression",

            /// Unparseable input
            Error = "error",
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::LineComment
                | Self::BlockComment
                | Self::Directive
                | Self::HeaderComment
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` for delegating wrapper kinds that are elided when they
    /// wrap exactly one node and own no tokens.
    #[must_use]
    pub fn is_collapsible(self) -> bool {
        matches!(
            self,
            Self::ExternalDeclaration | Self::Initializer | Self::Statement | Self::ConstantExpr
        )
    }

    /// Display name used in diagnostics (`')'`, `expression`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.as_token_kind() {
            Some(token) => token.name(),
            None => self.node_name().unwrap_or("node"),
        }
    }

    /// Converts a raw `u16` back into a kind.
    #[must_use]
    pub fn from_raw(raw: u16) -> Option<Self> {
        SYNTAX_KINDS.get(raw as usize).copied()
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }

        impl SyntaxKind {
            /// Returns the token kind this syntax kind mirrors, if any.
            #[must_use]
            pub fn as_token_kind(self) -> Option<TokenKind> {
                match self {
                    $(SyntaxKind::$name => Some(TokenKind::$name),)*
                    _ => None,
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for the `rowan` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CDefLanguage {}

impl rowan::Language for CDefLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0).unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the lossless tree.
pub type SyntaxNode = rowan::SyntaxNode<CDefLanguage>;

/// A syntax token in the lossless tree.
pub type SyntaxToken = rowan::SyntaxToken<CDefLanguage>;

/// A syntax element (either node or token) in the lossless tree.
pub type SyntaxElement = rowan::SyntaxElement<CDefLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwStruct), SyntaxKind::KwStruct);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::Delim), SyntaxKind::Delim);
        assert_eq!(SyntaxKind::Arrow.as_token_kind(), Some(TokenKind::Arrow));
        assert_eq!(SyntaxKind::CallExpr.as_token_kind(), None);
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::Eof.is_token());
        assert!(!SyntaxKind::DefinitionFile.is_token());
        assert!(SyntaxKind::BinaryExpr.is_node());
        assert!(SyntaxKind::Error.is_node());
        assert!(SyntaxKind::ErrorToken.is_token());
        assert_eq!(
            SyntaxKind::from(TokenKind::ErrorToken),
            SyntaxKind::ErrorToken
        );
    }

    #[test]
    fn test_raw_round_trip() {
        for &kind in SYNTAX_KINDS {
            assert_eq!(SyntaxKind::from_raw(kind as u16), Some(kind));
        }
        assert_eq!(SyntaxKind::from_raw(u16::MAX), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SyntaxKind::RParen.name(), "')'");
        assert_eq!(SyntaxKind::Declaration.name(), "declaration");
        assert_eq!(SyntaxKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn test_collapsible_kinds() {
        assert!(SyntaxKind::Statement.is_collapsible());
        assert!(!SyntaxKind::CompoundStatement.is_collapsible());
        assert!(!SyntaxKind::TranslationUnit.is_collapsible());
    }
}
