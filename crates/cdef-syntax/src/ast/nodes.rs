//! Typed node wrappers and their accessors.

#![allow(missing_docs)]

use smol_str::SmolStr;

use super::{AstNode, NodeCore};
use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;
use crate::tree::{LightElement, LightNode, LightToken};

/// Every node kind that has a typed wrapper of the same name.
///
/// Collapsible wrapper kinds never survive tree normalization with a single
/// child, so only `ExternalDeclaration` (an empty `;` declaration) is listed.
macro_rules! for_each_ast_node {
    ($m:ident) => {
        $m! {
            DefinitionFile,
            Definition,
            DefinitionKey,
            CodeSection,
            TranslationUnit,
            ExpressionFragment,
            BlockFragment,
            ExternalDeclaration,
            FunctionDefinition,
            DeclarationList,
            Declaration,
            DeclarationSpecifiers,
            StorageClassSpecifier,
            TypeSpecifier,
            TypeQualifier,
            FunctionSpecifier,
            AlignmentSpecifier,
            AtomicTypeSpecifier,
            StructOrUnionSpecifier,
            StructDeclarationList,
            StructDeclaration,
            SpecifierQualifierList,
            StructDeclaratorList,
            StructDeclarator,
            EnumSpecifier,
            EnumeratorList,
            Enumerator,
            InitDeclaratorList,
            InitDeclarator,
            Declarator,
            Pointer,
            TypeQualifierList,
            NameDeclarator,
            ParenDeclarator,
            ArrayDeclarator,
            FunctionDeclarator,
            ParameterTypeList,
            ParameterList,
            ParameterDeclaration,
            IdentifierList,
            TypeName,
            AbstractDeclarator,
            ParenAbstractDeclarator,
            ArrayAbstractDeclarator,
            FunctionAbstractDeclarator,
            InitializerList,
            Designation,
            Designator,
            StaticAssertDeclaration,
            CompoundStatement,
            LabeledStatement,
            CaseStatement,
            DefaultStatement,
            ExpressionStatement,
            IfStatement,
            ElseBranch,
            SwitchStatement,
            WhileStatement,
            DoStatement,
            ForStatement,
            GotoStatement,
            ContinueStatement,
            BreakStatement,
            ReturnStatement,
            NameRef,
            Literal,
            StringExpr,
            ParenExpr,
            GenericSelection,
            GenericAssocList,
            GenericAssociation,
            CompoundLiteral,
            IndexExpr,
            CallExpr,
            ArgumentList,
            MemberExpr,
            PostfixExpr,
            UnaryExpr,
            SizeofExpr,
            AlignofExpr,
            CastExpr,
            BinaryExpr,
            ConditionalExpr,
            AssignExpr,
            CommaExpr,
        }
    };
}

pub(super) use for_each_ast_node;

macro_rules! define_ast_nodes {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Typed `", stringify!($name), "` node.")]
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(pub(crate) NodeCore);

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$name
                }

                fn cast(node: LightNode) -> Option<Self> {
                    Self::can_cast(node.kind()).then(|| Self(NodeCore::new(node)))
                }

                fn syntax(&self) -> &LightNode {
                    self.0.node()
                }
            }
        )*
    };
}

for_each_ast_node!(define_ast_nodes);

/// Defines a sum type over node wrappers (or other sum types).
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ident)),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("A `", stringify!($ty), "`.")]
                $variant($ty),
            )*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $($ty::can_cast(kind))||*
            }

            fn cast(node: LightNode) -> Option<Self> {
                let kind = node.kind();
                $(
                    if $ty::can_cast(kind) {
                        return $ty::cast(node).map(Self::$variant);
                    }
                )*
                None
            }

            fn syntax(&self) -> &LightNode {
                match self {
                    $(Self::$variant(node) => node.syntax(),)*
                }
            }
        }
    };
}

ast_enum! {
    /// Any expression.
    Expr {
        Name(NameRef),
        Literal(Literal),
        String(StringExpr),
        Paren(ParenExpr),
        Generic(GenericSelection),
        CompoundLiteral(CompoundLiteral),
        Index(IndexExpr),
        Call(CallExpr),
        Member(MemberExpr),
        Postfix(PostfixExpr),
        Unary(UnaryExpr),
        Sizeof(SizeofExpr),
        Alignof(AlignofExpr),
        Cast(CastExpr),
        Binary(BinaryExpr),
        Conditional(ConditionalExpr),
        Assign(AssignExpr),
        Comma(CommaExpr),
    }
}

ast_enum! {
    /// Any statement.
    Stmt {
        Compound(CompoundStatement),
        Labeled(LabeledStatement),
        Case(CaseStatement),
        Default(DefaultStatement),
        Expression(ExpressionStatement),
        If(IfStatement),
        Switch(SwitchStatement),
        While(WhileStatement),
        Do(DoStatement),
        For(ForStatement),
        Goto(GotoStatement),
        Continue(ContinueStatement),
        Break(BreakStatement),
        Return(ReturnStatement),
    }
}

ast_enum! {
    /// Top-level item of a translation unit or code section.
    ExternalDecl {
        Function(FunctionDefinition),
        Declaration(Declaration),
        StaticAssert(StaticAssertDeclaration),
        Empty(ExternalDeclaration),
    }
}

ast_enum! {
    /// Item of a compound statement.
    BlockItem {
        Declaration(Declaration),
        StaticAssert(StaticAssertDeclaration),
        Stmt(Stmt),
    }
}

ast_enum! {
    /// Value of an init declarator, designated initializer or enumerator.
    Initializer {
        Expr(Expr),
        List(InitializerList),
    }
}

ast_enum! {
    /// Innermost part of a declarator.
    DirectDeclarator {
        Name(NameDeclarator),
        Paren(ParenDeclarator),
        Array(ArrayDeclarator),
        Function(FunctionDeclarator),
    }
}

ast_enum! {
    /// Entry of a specifier list.
    Specifier {
        StorageClass(StorageClassSpecifier),
        Type(TypeSpecifier),
        Qualifier(TypeQualifier),
        Function(FunctionSpecifier),
        Alignment(AlignmentSpecifier),
        Atomic(AtomicTypeSpecifier),
        Record(StructOrUnionSpecifier),
        Enum(EnumSpecifier),
    }
}

// ============================================================================
// Definition file
// ============================================================================

impl DefinitionFile {
    /// Header definitions, in order.
    pub fn definitions(&self) -> impl Iterator<Item = Definition> + '_ {
        self.0.children_of()
    }

    /// C declarations after `---`.
    #[must_use]
    pub fn code_section(&self) -> Option<CodeSection> {
        self.0.child()
    }
}

impl Definition {
    /// The key, with its platform suffix.
    #[must_use]
    pub fn key(&self) -> Option<DefinitionKey> {
        self.0.child()
    }

    /// Key name without the platform suffix.
    #[must_use]
    pub fn key_text(&self) -> SmolStr {
        self.key().map(|key| key.name()).unwrap_or_default()
    }

    /// Raw value text; `None` for `key =` with nothing after it.
    #[must_use]
    pub fn value(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Value)
    }
}

impl DefinitionKey {
    /// Key name.
    #[must_use]
    pub fn name(&self) -> SmolStr {
        self.0
            .token_text(TokenKind::KeyKnown)
            .or_else(|| self.0.token_text(TokenKind::KeyUnknown))
            .unwrap_or_default()
    }

    /// Returns `true` if the key is one the interop tool understands.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.0.token(TokenKind::KeyKnown).is_some()
    }

    /// Platform suffix without the leading dot, e.g. `linux`.
    #[must_use]
    pub fn platform(&self) -> Option<SmolStr> {
        let token = self.0.token(TokenKind::Platform)?;
        Some(SmolStr::new(token.text().trim_start_matches('.')))
    }
}

impl CodeSection {
    /// Declarations of the code section.
    pub fn declarations(&self) -> impl Iterator<Item = ExternalDecl> + '_ {
        self.0.children_of()
    }
}

impl TranslationUnit {
    /// Top-level declarations.
    pub fn declarations(&self) -> impl Iterator<Item = ExternalDecl> + '_ {
        self.0.children_of()
    }
}

impl ExpressionFragment {
    /// The parsed expression.
    #[must_use]
    pub fn expr(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl BlockFragment {
    /// The parsed block.
    #[must_use]
    pub fn block(&self) -> Option<CompoundStatement> {
        self.0.child()
    }
}

// ============================================================================
// Declarations
// ============================================================================

impl FunctionDefinition {
    #[must_use]
    pub fn specifiers(&self) -> Option<DeclarationSpecifiers> {
        self.0.child()
    }

    #[must_use]
    pub fn declarator(&self) -> Option<Declarator> {
        self.0.child()
    }

    /// Old-style parameter declarations.
    #[must_use]
    pub fn declaration_list(&self) -> Option<DeclarationList> {
        self.0.child()
    }

    #[must_use]
    pub fn body(&self) -> Option<CompoundStatement> {
        self.0.child()
    }

    /// Name of the defined function.
    #[must_use]
    pub fn name(&self) -> Option<SmolStr> {
        self.declarator()?.name()
    }
}

impl DeclarationList {
    pub fn declarations(&self) -> impl Iterator<Item = Declaration> + '_ {
        self.0.children_of()
    }
}

impl Declaration {
    #[must_use]
    pub fn specifiers(&self) -> Option<DeclarationSpecifiers> {
        self.0.child()
    }

    /// Declared entities; empty for `struct s { ... };`.
    pub fn declarators(&self) -> impl Iterator<Item = InitDeclarator> + '_ {
        self.0
            .child::<InitDeclaratorList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }

    /// Returns `true` for `typedef` declarations.
    #[must_use]
    pub fn is_typedef(&self) -> bool {
        self.specifiers().is_some_and(|specifiers| {
            specifiers.specifiers().any(|specifier| {
                matches!(&specifier, Specifier::StorageClass(s) if s.text() == "typedef")
            })
        })
    }
}

impl DeclarationSpecifiers {
    pub fn specifiers(&self) -> impl Iterator<Item = Specifier> + '_ {
        self.0.children_of()
    }
}

impl SpecifierQualifierList {
    pub fn specifiers(&self) -> impl Iterator<Item = Specifier> + '_ {
        self.0.children_of()
    }
}

impl StructOrUnionSpecifier {
    /// Returns `true` for `union`.
    #[must_use]
    pub fn is_union(&self) -> bool {
        self.0.token(TokenKind::KwUnion).is_some()
    }

    /// Tag name, if any.
    #[must_use]
    pub fn tag(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }

    /// Member declarations; `None` for a reference like `struct tag`.
    #[must_use]
    pub fn members(&self) -> Option<StructDeclarationList> {
        self.0.child()
    }
}

impl StructDeclarationList {
    pub fn declarations(&self) -> impl Iterator<Item = StructDeclaration> + '_ {
        self.0.children_of()
    }
}

impl StructDeclaration {
    #[must_use]
    pub fn specifiers(&self) -> Option<SpecifierQualifierList> {
        self.0.child()
    }

    pub fn declarators(&self) -> impl Iterator<Item = StructDeclarator> + '_ {
        self.0
            .child::<StructDeclaratorList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }
}

impl StructDeclarator {
    /// Member declarator; `None` for an unnamed bit-field.
    #[must_use]
    pub fn declarator(&self) -> Option<Declarator> {
        self.0.child()
    }

    /// Bit-field width.
    #[must_use]
    pub fn width(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl EnumSpecifier {
    /// Tag name, if any.
    #[must_use]
    pub fn tag(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }

    pub fn enumerators(&self) -> impl Iterator<Item = Enumerator> + '_ {
        self.0
            .child::<EnumeratorList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }
}

impl Enumerator {
    #[must_use]
    pub fn name(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }

    /// Explicit value after `=`.
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl InitDeclarator {
    #[must_use]
    pub fn declarator(&self) -> Option<Declarator> {
        self.0.child()
    }

    #[must_use]
    pub fn initializer(&self) -> Option<Initializer> {
        self.0.child()
    }
}

impl Declarator {
    #[must_use]
    pub fn pointer(&self) -> Option<Pointer> {
        self.0.child()
    }

    #[must_use]
    pub fn direct(&self) -> Option<DirectDeclarator> {
        self.0.child()
    }

    /// Declared identifier, found through parentheses and suffixes.
    #[must_use]
    pub fn name(&self) -> Option<SmolStr> {
        let mut current = self.direct()?;
        loop {
            current = match current {
                DirectDeclarator::Name(name) => return Some(name.name()),
                DirectDeclarator::Paren(paren) => paren.declarator()?.direct()?,
                DirectDeclarator::Array(array) => array.inner()?,
                DirectDeclarator::Function(function) => function.inner()?,
            };
        }
    }

    /// Returns `true` if the outermost suffix is a parameter list.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self.direct(), Some(DirectDeclarator::Function(_)))
    }
}

impl Pointer {
    /// Number of `*`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0
            .tokens()
            .filter(|token| token.kind() == TokenKind::Star)
            .count()
    }
}

impl NameDeclarator {
    #[must_use]
    pub fn name(&self) -> SmolStr {
        self.0.token_text(TokenKind::Ident).unwrap_or_default()
    }
}

impl ParenDeclarator {
    #[must_use]
    pub fn declarator(&self) -> Option<Declarator> {
        self.0.child()
    }
}

impl ArrayDeclarator {
    /// Declarator the brackets apply to.
    #[must_use]
    pub fn inner(&self) -> Option<DirectDeclarator> {
        self.0.child()
    }

    /// Size expression; `None` for `[]` and `[*]`.
    #[must_use]
    pub fn size(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl FunctionDeclarator {
    /// Declarator the parameter list applies to.
    #[must_use]
    pub fn inner(&self) -> Option<DirectDeclarator> {
        self.0.child()
    }

    /// Prototype parameters.
    #[must_use]
    pub fn parameters(&self) -> Option<ParameterTypeList> {
        self.0.child()
    }

    /// Old-style parameter names.
    #[must_use]
    pub fn identifiers(&self) -> Option<IdentifierList> {
        self.0.child()
    }
}

impl ParameterTypeList {
    pub fn parameters(&self) -> impl Iterator<Item = ParameterDeclaration> + '_ {
        self.0
            .child::<ParameterList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }

    /// Returns `true` if the list ends with `, ...`.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.0.token(TokenKind::Ellipsis).is_some()
    }
}

impl ParameterDeclaration {
    #[must_use]
    pub fn specifiers(&self) -> Option<DeclarationSpecifiers> {
        self.0.child()
    }

    #[must_use]
    pub fn declarator(&self) -> Option<Declarator> {
        self.0.child()
    }

    #[must_use]
    pub fn abstract_declarator(&self) -> Option<AbstractDeclarator> {
        self.0.child()
    }
}

impl IdentifierList {
    pub fn names(&self) -> impl Iterator<Item = SmolStr> + '_ {
        self.0
            .tokens()
            .filter(|token| token.kind() == TokenKind::Ident)
            .map(|token| SmolStr::new(token.text()))
    }
}

impl TypeName {
    #[must_use]
    pub fn specifiers(&self) -> Option<SpecifierQualifierList> {
        self.0.child()
    }

    #[must_use]
    pub fn abstract_declarator(&self) -> Option<AbstractDeclarator> {
        self.0.child()
    }
}

impl InitializerList {
    /// Initializers in order, each with its designation if present.
    pub fn entries(&self) -> impl Iterator<Item = (Option<Designation>, Initializer)> + '_ {
        let mut designation = None;
        self.0.children().iter().filter_map(move |child| {
            if let Some(found) = Designation::cast(child.clone()) {
                designation = Some(found);
                return None;
            }
            Initializer::cast(child.clone()).map(|value| (designation.take(), value))
        })
    }
}

impl Designation {
    pub fn designators(&self) -> impl Iterator<Item = Designator> + '_ {
        self.0.children_of()
    }
}

impl Designator {
    /// Member name of a `.name` designator.
    #[must_use]
    pub fn field(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }

    /// Index of a `[index]` designator.
    #[must_use]
    pub fn index(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl StaticAssertDeclaration {
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn message(&self) -> Option<StringExpr> {
        self.0.nth_child::<Expr>(1).and_then(|expr| match expr {
            Expr::String(message) => Some(message),
            _ => None,
        })
    }
}

// ============================================================================
// Statements
// ============================================================================

impl CompoundStatement {
    pub fn items(&self) -> impl Iterator<Item = BlockItem> + '_ {
        self.0.children_of()
    }
}

impl LabeledStatement {
    #[must_use]
    pub fn label(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }

    #[must_use]
    pub fn statement(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl CaseStatement {
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn statement(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl DefaultStatement {
    #[must_use]
    pub fn statement(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl ExpressionStatement {
    /// The expression; `None` for an empty statement.
    #[must_use]
    pub fn expr(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl IfStatement {
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn then_branch(&self) -> Option<Stmt> {
        self.0.child()
    }

    #[must_use]
    pub fn else_branch(&self) -> Option<Stmt> {
        self.0.child::<ElseBranch>()?.statement()
    }
}

impl ElseBranch {
    #[must_use]
    pub fn statement(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl SwitchStatement {
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn body(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl WhileStatement {
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn body(&self) -> Option<Stmt> {
        self.0.child()
    }
}

impl DoStatement {
    #[must_use]
    pub fn body(&self) -> Option<Stmt> {
        self.0.child()
    }

    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.0.child()
    }
}

/// First clause of a `for` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForInit {
    /// `for (int i = 0; ...)`
    Declaration(Declaration),
    /// `for (i = 0; ...)`
    Expr(Expr),
}

#[derive(Default)]
struct ForParts {
    init: Option<ForInit>,
    condition: Option<Expr>,
    step: Option<Expr>,
    body: Option<Stmt>,
}

impl ForStatement {
    // Clauses are told apart by the `;` and `)` tokens between them.
    fn parts(&self) -> ForParts {
        let mut parts = ForParts::default();
        let mut clause = 0;
        for element in self.0.elements() {
            match element {
                LightElement::Token(token) => match token.kind() {
                    TokenKind::Semicolon => clause += 1,
                    TokenKind::RParen => clause = 3,
                    _ => {}
                },
                LightElement::Node(node) => match clause {
                    0 => {
                        parts.init = Declaration::cast(node.clone())
                            .map(ForInit::Declaration)
                            .or_else(|| Expr::cast(node.clone()).map(ForInit::Expr));
                        if matches!(parts.init, Some(ForInit::Declaration(_))) {
                            clause = 1;
                        }
                    }
                    1 => parts.condition = Expr::cast(node.clone()),
                    2 => parts.step = Expr::cast(node.clone()),
                    _ => parts.body = Stmt::cast(node.clone()),
                },
            }
        }
        parts
    }

    #[must_use]
    pub fn init(&self) -> Option<ForInit> {
        self.parts().init
    }

    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.parts().condition
    }

    #[must_use]
    pub fn step(&self) -> Option<Expr> {
        self.parts().step
    }

    #[must_use]
    pub fn body(&self) -> Option<Stmt> {
        self.parts().body
    }
}

impl GotoStatement {
    #[must_use]
    pub fn label(&self) -> Option<SmolStr> {
        self.0.token_text(TokenKind::Ident)
    }
}

impl ReturnStatement {
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.child()
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Binary operator of a [`BinaryExpr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Maps an operator token to its operator.
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PipePipe => Self::LogicalOr,
            TokenKind::AmpAmp => Self::LogicalAnd,
            TokenKind::Pipe => Self::BitOr,
            TokenKind::Caret => Self::BitXor,
            TokenKind::Amp => Self::BitAnd,
            TokenKind::EqEq => Self::Eq,
            TokenKind::Neq => Self::Ne,
            TokenKind::Lt => Self::Lt,
            TokenKind::Gt => Self::Gt,
            TokenKind::LtEq => Self::Le,
            TokenKind::GtEq => Self::Ge,
            TokenKind::Shl => Self::Shl,
            TokenKind::Shr => Self::Shr,
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Percent => Self::Rem,
            _ => return None,
        })
    }
}

impl NameRef {
    #[must_use]
    pub fn name(&self) -> SmolStr {
        SmolStr::new(self.text())
    }
}

impl Literal {
    /// The constant token.
    #[must_use]
    pub fn token(&self) -> Option<LightToken> {
        self.0.operator()
    }
}

impl StringExpr {
    /// Each adjacent literal, quotes included.
    pub fn parts(&self) -> impl Iterator<Item = LightToken> + '_ {
        self.0
            .tokens()
            .filter(|token| token.kind() == TokenKind::StringLiteral)
            .cloned()
    }
}

impl ParenExpr {
    #[must_use]
    pub fn expr(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl GenericSelection {
    /// Controlling expression.
    #[must_use]
    pub fn controlling(&self) -> Option<Expr> {
        self.0.child()
    }

    pub fn associations(&self) -> impl Iterator<Item = GenericAssociation> + '_ {
        self.0
            .child::<GenericAssocList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }
}

impl GenericAssociation {
    /// Type of the association; `None` for `default`.
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.child()
    }

    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl CompoundLiteral {
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.child()
    }

    #[must_use]
    pub fn initializers(&self) -> Option<InitializerList> {
        self.0.child()
    }
}

impl IndexExpr {
    #[must_use]
    pub fn base(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn index(&self) -> Option<Expr> {
        self.0.nth_child(1)
    }
}

impl CallExpr {
    #[must_use]
    pub fn callee(&self) -> Option<Expr> {
        self.0.child()
    }

    pub fn arguments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .child::<ArgumentList>()
            .into_iter()
            .flat_map(|list| list.0.children_of().collect::<Vec<_>>())
    }
}

impl MemberExpr {
    #[must_use]
    pub fn base(&self) -> Option<Expr> {
        self.0.child()
    }

    /// Member name.
    #[must_use]
    pub fn member(&self) -> Option<NameRef> {
        // The member always comes after the base.
        self.0.children_of::<NameRef>().last()
    }

    /// Returns `true` for `->`.
    #[must_use]
    pub fn is_arrow(&self) -> bool {
        self.0.token(TokenKind::Arrow).is_some()
    }
}

impl PostfixExpr {
    #[must_use]
    pub fn operand(&self) -> Option<Expr> {
        self.0.child()
    }

    /// `++` or `--`.
    #[must_use]
    pub fn op(&self) -> Option<TokenKind> {
        self.0.operator().map(|token| token.kind())
    }
}

impl UnaryExpr {
    /// Prefix operator token kind.
    #[must_use]
    pub fn op(&self) -> Option<TokenKind> {
        self.0.operator().map(|token| token.kind())
    }

    #[must_use]
    pub fn operand(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl SizeofExpr {
    /// Operand of `sizeof(type)`.
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.child()
    }

    /// Operand of `sizeof expr`.
    #[must_use]
    pub fn operand(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl AlignofExpr {
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.child()
    }
}

impl CastExpr {
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.child()
    }

    #[must_use]
    pub fn operand(&self) -> Option<Expr> {
        self.0.child()
    }
}

impl BinaryExpr {
    #[must_use]
    pub fn lhs(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn rhs(&self) -> Option<Expr> {
        self.0.nth_child(1)
    }

    #[must_use]
    pub fn op(&self) -> Option<BinaryOp> {
        BinaryOp::from_token(self.0.operator()?.kind())
    }
}

impl ConditionalExpr {
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn then_value(&self) -> Option<Expr> {
        self.0.nth_child(1)
    }

    #[must_use]
    pub fn else_value(&self) -> Option<Expr> {
        self.0.nth_child(2)
    }
}

impl AssignExpr {
    #[must_use]
    pub fn target(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.0.nth_child(1)
    }

    /// Assignment operator token kind, `=` or a compound one.
    #[must_use]
    pub fn op(&self) -> Option<TokenKind> {
        self.0.operator().map(|token| token.kind())
    }
}

impl CommaExpr {
    #[must_use]
    pub fn lhs(&self) -> Option<Expr> {
        self.0.child()
    }

    #[must_use]
    pub fn rhs(&self) -> Option<Expr> {
        self.0.nth_child(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_block, parse_expression, parse_translation_unit};

    fn expr(text: &str) -> Expr {
        let parse = parse_expression(text);
        assert!(parse.ok(), "{text}: {:?}", parse.errors());
        ExpressionFragment::cast(parse.root())
            .and_then(|fragment| fragment.expr())
            .unwrap()
    }

    #[test]
    fn test_children_are_cached_on_first_access() {
        let Expr::Binary(binary) = expr("a + b") else {
            panic!("expected a binary expression");
        };
        assert!(!binary.0.is_cached());
        assert_eq!(binary.op(), Some(BinaryOp::Add));
        assert!(binary.0.is_cached());
        assert_eq!(binary.lhs().unwrap().text(), "a");
        assert_eq!(binary.rhs().unwrap().text(), "b");
    }

    #[test]
    fn test_token_accessors_share_the_cache() {
        let parse = parse_translation_unit("int * const *p;");
        let pointer = parse
            .root()
            .descendants()
            .find_map(Pointer::cast)
            .unwrap();
        assert!(!pointer.0.is_cached());
        assert_eq!(pointer.depth(), 2);
        assert!(pointer.0.is_cached());

        let Expr::String(string) = expr("\"a\" \"b\"") else {
            panic!("expected a string expression");
        };
        let parts: Vec<_> = string.parts().map(|token| token.text().to_owned()).collect();
        assert_eq!(parts, ["\"a\"", "\"b\""]);
        assert!(string.0.is_cached());
    }

    #[test]
    fn test_declarator_name_through_parens() {
        let parse = parse_translation_unit("void (*handler)(int sig);");
        let unit = TranslationUnit::cast(parse.root()).unwrap();
        let Some(ExternalDecl::Declaration(declaration)) = unit.declarations().next() else {
            panic!("expected a declaration");
        };
        let declarator = declaration.declarators().next().unwrap().declarator().unwrap();
        assert_eq!(declarator.name().as_deref(), Some("handler"));
        assert!(declarator.is_function());
    }

    #[test]
    fn test_member_name() {
        let Expr::Member(member) = expr("p->next") else {
            panic!("expected a member expression");
        };
        assert!(member.is_arrow());
        assert_eq!(member.member().unwrap().name(), "next");

        let Expr::Member(member) = expr("f().x") else {
            panic!("expected a member expression");
        };
        assert!(!member.is_arrow());
        assert_eq!(member.member().unwrap().name(), "x");
    }

    #[test]
    fn test_for_clauses() {
        let parse = parse_block("{ for (int i = 0; ; i++) go(); for (;;) ; }");
        let block = BlockFragment::cast(parse.root()).unwrap().block().unwrap();
        let loops: Vec<ForStatement> = block
            .items()
            .filter_map(|item| match item {
                BlockItem::Stmt(Stmt::For(stmt)) => Some(stmt),
                _ => None,
            })
            .collect();
        assert_eq!(loops.len(), 2);
        assert!(matches!(loops[0].init(), Some(ForInit::Declaration(_))));
        assert!(loops[0].condition().is_none());
        assert_eq!(loops[0].step().unwrap().text(), "i++");
        assert!(loops[0].body().is_some());
        assert!(loops[1].init().is_none());
        assert!(loops[1].step().is_none());
    }
}
