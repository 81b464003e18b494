//! Declaration parsing.
//!
//! Covers external declarations, declaration specifiers, struct/union/enum
//! specifiers, declarators (concrete and abstract) and initializers.
//!
//! Typedef names are not resolved: an identifier is taken as a type name
//! only where no other type specifier has been seen and the next token
//! cannot continue an expression.

use crate::lexer::TokenKind;
use crate::parser::precedence::{climb, Operator, Table};
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

use super::expressions::{assignment_expression, constant_expression, string_literal};
use super::statements::compound_statement;
use super::{attempt, comma_separated, leaf, node};

const DECLARATOR_SUFFIX: Table = Table {
    operators: &[
        Operator::suffix(TokenKind::LBracket, SyntaxKind::ArrayDeclarator, 0, array_suffix),
        Operator::suffix(
            TokenKind::LParen,
            SyntaxKind::FunctionDeclarator,
            0,
            function_suffix,
        ),
    ],
};

const ABSTRACT_DECLARATOR_SUFFIX: Table = Table {
    operators: &[
        Operator::suffix(
            TokenKind::LBracket,
            SyntaxKind::ArrayAbstractDeclarator,
            0,
            array_suffix,
        ),
        Operator::suffix(
            TokenKind::LParen,
            SyntaxKind::FunctionAbstractDeclarator,
            0,
            abstract_function_suffix,
        ),
    ],
};

/// Where a specifier list appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Specifiers {
    /// Declarations and parameters: storage classes and function specifiers allowed.
    Declaration,
    /// Struct members and type names: only type specifiers and qualifiers.
    SpecifierQualifier,
}

impl Specifiers {
    fn kind(self) -> SyntaxKind {
        match self {
            Self::Declaration => SyntaxKind::DeclarationSpecifiers,
            Self::SpecifierQualifier => SyntaxKind::SpecifierQualifierList,
        }
    }

    fn rule_name(self) -> &'static str {
        match self {
            Self::Declaration => "declaration_specifiers",
            Self::SpecifierQualifier => "specifier_qualifier_list",
        }
    }
}

/// `external_declaration*`
pub(super) fn translation_unit(p: &mut Parser<'_, '_>) {
    p.repeat("translation_unit", |p| external_declaration(p).is_some());
}

fn starts_external_declaration(kind: TokenKind) -> bool {
    kind.can_start_specifiers() || matches!(kind, TokenKind::Semicolon | TokenKind::KwStaticAssert)
}

/// `function_definition | declaration | ';'`
fn external_declaration(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !starts_external_declaration(p.current()) {
        p.add_variant("declaration");
        return None;
    }

    p.rule("external_declaration", |p| {
        node(p, SyntaxKind::ExternalDeclaration, |p| {
            function_definition(p).is_some()
                || declaration(p).is_some()
                || p.eat(TokenKind::Semicolon)
        })
    })
}

/// `declaration_specifiers declarator declaration* compound_statement`
fn function_definition(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("function_definition", |p| {
        node(p, SyntaxKind::FunctionDefinition, |p| {
            if specifiers(p, Specifiers::Declaration).is_none() || declarator(p).is_none() {
                return false;
            }
            if !p.at(TokenKind::LBrace) {
                // K&R parameter declarations.
                let m = p.start();
                if p.repeat("declaration_list", |p| declaration(p).is_some()) > 0 {
                    m.complete(p, SyntaxKind::DeclarationList);
                } else {
                    m.abandon(p);
                }
            }
            compound_statement(p).is_some()
        })
    })
}

/// `declaration_specifiers init_declarator_list? ';' | static_assert_declaration`
pub(super) fn declaration(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if p.at(TokenKind::KwStaticAssert) {
        return static_assert_declaration(p);
    }
    if !p.current().can_start_specifiers() {
        p.add_variant("declaration");
        return None;
    }

    p.rule("declaration", |p| {
        node(p, SyntaxKind::Declaration, |p| {
            if specifiers(p, Specifiers::Declaration).is_none() {
                return false;
            }
            if !p.at(TokenKind::Semicolon) {
                init_declarator_list(p);
            }
            p.expect(TokenKind::Semicolon)
        })
    })
}

/// `_Static_assert '(' constant_expression (',' string)? ')' ';'`
fn static_assert_declaration(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("static_assert_declaration", |p| {
        node(p, SyntaxKind::StaticAssertDeclaration, |p| {
            p.bump();
            if !p.expect(TokenKind::LParen) || constant_expression(p).is_none() {
                return false;
            }
            if p.eat(TokenKind::Comma) {
                if !p.at(TokenKind::StringLiteral) {
                    p.add_variant(TokenKind::StringLiteral.name());
                    return false;
                }
                string_literal(p);
            }
            p.expect(TokenKind::RParen) && p.expect(TokenKind::Semicolon)
        })
    })
}

fn specifiers(p: &mut Parser<'_, '_>, context: Specifiers) -> Option<CompletedMarker> {
    let name = context.rule_name();
    p.rule(name, |p| {
        node(p, context.kind(), |p| {
            let mut seen_type = false;
            let count = p.repeat(name, |p| specifier(p, context, &mut seen_type));
            if count == 0 {
                p.add_variant("type specifier");
            }
            count > 0
        })
    })
}

fn specifier(p: &mut Parser<'_, '_>, context: Specifiers, seen_type: &mut bool) -> bool {
    let current = p.current();
    if context == Specifiers::Declaration {
        if current.is_storage_class() {
            leaf(p, SyntaxKind::StorageClassSpecifier);
            return true;
        }
        if current.is_function_specifier() {
            leaf(p, SyntaxKind::FunctionSpecifier);
            return true;
        }
    }
    if current == TokenKind::KwAlignas {
        return alignment_specifier(p).is_some();
    }
    if current == TokenKind::KwAtomic && p.nth(1) == TokenKind::LParen {
        let matched = atomic_type_specifier(p).is_some();
        *seen_type |= matched;
        return matched;
    }
    if current.is_type_qualifier() {
        leaf(p, SyntaxKind::TypeQualifier);
        return true;
    }
    if current.is_builtin_type() {
        leaf(p, SyntaxKind::TypeSpecifier);
        *seen_type = true;
        return true;
    }

    let matched = match current {
        TokenKind::KwStruct | TokenKind::KwUnion => struct_or_union_specifier(p).is_some(),
        TokenKind::KwEnum => enum_specifier(p).is_some(),
        TokenKind::Ident if !*seen_type && is_typedef_name(p.nth(1)) => {
            leaf(p, SyntaxKind::TypeSpecifier);
            true
        }
        _ => false,
    };
    *seen_type |= matched;
    matched
}

/// Decides whether an identifier followed by `next` names a type.
fn is_typedef_name(next: TokenKind) -> bool {
    next.is_type_qualifier()
        || matches!(
            next,
            TokenKind::Ident | TokenKind::Star | TokenKind::RParen | TokenKind::Comma
        )
}

/// Returns `true` if `kind` can begin a type name.
pub(super) fn starts_type_name(kind: TokenKind) -> bool {
    kind.is_builtin_type()
        || kind.is_type_qualifier()
        || matches!(
            kind,
            TokenKind::KwStruct
                | TokenKind::KwUnion
                | TokenKind::KwEnum
                | TokenKind::KwAlignas
                | TokenKind::Ident
        )
}

/// `_Alignas '(' (type_name | constant_expression) ')'`
fn alignment_specifier(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::AlignmentSpecifier, |p| {
        p.bump();
        p.expect(TokenKind::LParen)
            && (attempt(p, |p| type_name(p).is_some() && p.at(TokenKind::RParen))
                || constant_expression(p).is_some())
            && p.expect(TokenKind::RParen)
    })
}

/// `_Atomic '(' type_name ')'`
fn atomic_type_specifier(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::AtomicTypeSpecifier, |p| {
        p.bump();
        p.expect(TokenKind::LParen) && type_name(p).is_some() && p.expect(TokenKind::RParen)
    })
}

/// `('struct' | 'union') (identifier | identifier? '{' struct_declaration* '}')`
fn struct_or_union_specifier(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("struct_or_union_specifier", |p| {
        node(p, SyntaxKind::StructOrUnionSpecifier, |p| {
            p.bump();
            let tagged = p.eat(TokenKind::Ident);
            if p.at(TokenKind::LBrace) {
                return struct_declaration_list(p).is_some();
            }
            if !tagged {
                p.add_variant(TokenKind::Ident.name());
                p.add_variant(TokenKind::LBrace.name());
            }
            tagged
        })
    })
}

fn struct_declaration_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::StructDeclarationList, |p| {
        p.bump();
        p.repeat("struct_declaration_list", |p| struct_declaration(p).is_some());
        p.expect(TokenKind::RBrace)
    })
}

/// `specifier_qualifier_list struct_declarator_list? ';' | static_assert_declaration`
fn struct_declaration(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if p.at(TokenKind::KwStaticAssert) {
        return static_assert_declaration(p);
    }

    p.rule("struct_declaration", |p| {
        node(p, SyntaxKind::StructDeclaration, |p| {
            if specifiers(p, Specifiers::SpecifierQualifier).is_none() {
                return false;
            }
            if !p.at(TokenKind::Semicolon) {
                node(p, SyntaxKind::StructDeclaratorList, |p| {
                    comma_separated(p, "struct_declarator_list", |p| {
                        struct_declarator(p).is_some()
                    })
                });
            }
            p.expect(TokenKind::Semicolon)
        })
    })
}

/// `declarator (':' constant_expression)? | ':' constant_expression`
fn struct_declarator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::StructDeclarator, |p| {
        let named = declarator(p).is_some();
        if p.eat(TokenKind::Colon) {
            return constant_expression(p).is_some();
        }
        named
    })
}

/// `'enum' (identifier | identifier? '{' enumerator_list '}')`
fn enum_specifier(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("enum_specifier", |p| {
        node(p, SyntaxKind::EnumSpecifier, |p| {
            p.bump();
            let tagged = p.eat(TokenKind::Ident);
            if p.at(TokenKind::LBrace) {
                return enumerator_list(p).is_some();
            }
            if !tagged {
                p.add_variant(TokenKind::Ident.name());
                p.add_variant(TokenKind::LBrace.name());
            }
            tagged
        })
    })
}

/// `'{' (enumerator (',' enumerator)* ','?)? '}'`
fn enumerator_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::EnumeratorList, |p| {
        p.bump();
        if comma_separated(p, "enumerator_list", |p| enumerator(p).is_some()) {
            p.eat(TokenKind::Comma);
        }
        p.expect(TokenKind::RBrace)
    })
}

/// `identifier ('=' constant_expression)?`
fn enumerator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at(TokenKind::Ident) {
        p.add_variant("enumerator");
        return None;
    }
    node(p, SyntaxKind::Enumerator, |p| {
        p.bump();
        !p.eat(TokenKind::Eq) || constant_expression(p).is_some()
    })
}

fn init_declarator_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::InitDeclaratorList, |p| {
        comma_separated(p, "init_declarator_list", |p| init_declarator(p).is_some())
    })
}

/// `declarator ('=' initializer)?`
fn init_declarator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::InitDeclarator, |p| {
        declarator(p).is_some() && (!p.eat(TokenKind::Eq) || initializer(p).is_some())
    })
}

// ============================================================================
// Declarators
// ============================================================================

/// `pointer? direct_declarator`
pub(super) fn declarator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("declarator", |p| {
        node(p, SyntaxKind::Declarator, |p| {
            if p.at(TokenKind::Star) {
                pointer(p);
            }
            climb(p, &DECLARATOR_SUFFIX, -1, declarator_atom).is_some()
        })
    })
}

/// `('*' type_qualifier_list?)+`
fn pointer(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.repeat("pointer", |p| {
        if !p.eat(TokenKind::Star) {
            return false;
        }
        if p.current().is_type_qualifier() {
            type_qualifier_list(p);
        }
        true
    });
    m.complete(p, SyntaxKind::Pointer)
}

fn type_qualifier_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::TypeQualifierList, |p| {
        let count = p.repeat("type_qualifier_list", |p| {
            if p.current().is_type_qualifier() {
                leaf(p, SyntaxKind::TypeQualifier);
                true
            } else {
                false
            }
        });
        count > 0
    })
}

fn declarator_atom(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    match p.current() {
        TokenKind::Ident => Some(leaf(p, SyntaxKind::NameDeclarator)),
        TokenKind::LParen => node(p, SyntaxKind::ParenDeclarator, |p| {
            p.bump();
            declarator(p).is_some() && p.expect(TokenKind::RParen)
        }),
        _ => {
            p.add_variant("declarator");
            None
        }
    }
}

/// `'static'? type_qualifier_list? 'static'? (assignment_expression | '*')? ']'`
fn array_suffix(p: &mut Parser<'_, '_>) -> bool {
    p.eat(TokenKind::KwStatic);
    if p.current().is_type_qualifier() {
        type_qualifier_list(p);
    }
    p.eat(TokenKind::KwStatic);
    if p.at(TokenKind::Star) && p.nth(1) == TokenKind::RBracket {
        p.bump();
    } else if !p.at(TokenKind::RBracket) && assignment_expression(p).is_none() {
        return false;
    }
    p.expect(TokenKind::RBracket)
}

/// `(parameter_type_list | identifier_list)? ')'`
fn function_suffix(p: &mut Parser<'_, '_>) -> bool {
    if p.eat(TokenKind::RParen) {
        return true;
    }
    let matched = identifier_list(p).is_some() || parameter_type_list(p).is_some();
    matched && p.expect(TokenKind::RParen)
}

/// K&R parameter names. Only taken when the list is followed by the
/// function body or by the parameter declarations.
fn identifier_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at(TokenKind::Ident) {
        return None;
    }
    node(p, SyntaxKind::IdentifierList, |p| {
        if !comma_separated(p, "identifier_list", |p| p.eat(TokenKind::Ident))
            || !p.at(TokenKind::RParen)
        {
            return false;
        }
        let next = p.nth(1);
        next == TokenKind::LBrace || (next != TokenKind::Ident && next.can_start_specifiers())
    })
}

/// `parameter_declaration (',' parameter_declaration)* (',' '...')?`
fn parameter_type_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::ParameterTypeList, |p| {
        let params = node(p, SyntaxKind::ParameterList, |p| {
            comma_separated(p, "parameter_list", |p| parameter_declaration(p).is_some())
        });
        if params.is_none() {
            return false;
        }
        if p.at(TokenKind::Comma) && p.nth(1) == TokenKind::Ellipsis {
            p.bump();
            p.bump();
        }
        true
    })
}

/// `declaration_specifiers (declarator | abstract_declarator?)`
fn parameter_declaration(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("parameter_declaration", |p| {
        node(p, SyntaxKind::ParameterDeclaration, |p| {
            if specifiers(p, Specifiers::Declaration).is_none() {
                return false;
            }
            if declarator(p).is_none() {
                abstract_declarator(p);
            }
            true
        })
    })
}

/// `specifier_qualifier_list abstract_declarator?`
pub(super) fn type_name(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("type_name", |p| {
        node(p, SyntaxKind::TypeName, |p| {
            if specifiers(p, Specifiers::SpecifierQualifier).is_none() {
                return false;
            }
            abstract_declarator(p);
            true
        })
    })
}

/// `pointer | pointer? direct_abstract_declarator`
fn abstract_declarator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("abstract_declarator", |p| {
        node(p, SyntaxKind::AbstractDeclarator, |p| {
            let has_pointer = p.at(TokenKind::Star);
            if has_pointer {
                pointer(p);
            }
            climb(p, &ABSTRACT_DECLARATOR_SUFFIX, -1, abstract_declarator_atom).is_some()
                || has_pointer
        })
    })
}

fn abstract_declarator_atom(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    match p.current() {
        TokenKind::LParen => node(p, SyntaxKind::ParenAbstractDeclarator, |p| {
            p.bump();
            abstract_declarator(p).is_some() && p.expect(TokenKind::RParen)
        })
        .or_else(|| {
            node(p, SyntaxKind::FunctionAbstractDeclarator, |p| {
                p.bump();
                abstract_function_suffix(p)
            })
        }),
        TokenKind::LBracket => node(p, SyntaxKind::ArrayAbstractDeclarator, |p| {
            p.bump();
            array_suffix(p)
        }),
        _ => None,
    }
}

/// `parameter_type_list? ')'`
fn abstract_function_suffix(p: &mut Parser<'_, '_>) -> bool {
    if p.eat(TokenKind::RParen) {
        return true;
    }
    parameter_type_list(p).is_some() && p.expect(TokenKind::RParen)
}

// ============================================================================
// Initializers
// ============================================================================

/// `assignment_expression | initializer_list`
pub(super) fn initializer(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("initializer", |p| {
        node(p, SyntaxKind::Initializer, |p| {
            if p.at(TokenKind::LBrace) {
                initializer_list(p).is_some()
            } else {
                assignment_expression(p).is_some()
            }
        })
    })
}

/// `'{' (designation? initializer (',' designation? initializer)* ','?)? '}'`
pub(super) fn initializer_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at(TokenKind::LBrace) {
        p.add_variant(TokenKind::LBrace.name());
        return None;
    }

    p.rule("initializer_list", |p| {
        node(p, SyntaxKind::InitializerList, |p| {
            p.bump();
            if comma_separated(p, "initializer_list", designated_initializer) {
                p.eat(TokenKind::Comma);
            }
            p.expect(TokenKind::RBrace)
        })
    })
}

fn designated_initializer(p: &mut Parser<'_, '_>) -> bool {
    attempt(p, |p| {
        let designated = matches!(p.current(), TokenKind::LBracket | TokenKind::Dot);
        (!designated || designation(p).is_some()) && initializer(p).is_some()
    })
}

/// `designator+ '='`
fn designation(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::Designation, |p| {
        p.repeat("designation", |p| designator(p).is_some()) > 0 && p.expect(TokenKind::Eq)
    })
}

/// `'[' constant_expression ']' | '.' identifier`
fn designator(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    match p.current() {
        TokenKind::LBracket => node(p, SyntaxKind::Designator, |p| {
            p.bump();
            constant_expression(p).is_some() && p.expect(TokenKind::RBracket)
        }),
        TokenKind::Dot => node(p, SyntaxKind::Designator, |p| {
            p.bump();
            p.expect(TokenKind::Ident)
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_translation_unit;
    use crate::syntax::SyntaxKind;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let parse = parse_translation_unit(text);
        assert!(parse.ok(), "{text}: {:?}", parse.errors());
        parse.root().descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_function_definition_vs_declaration() {
        let kinds = kinds("int f(void); int g(void) { return 0; }");
        assert_eq!(
            kinds.iter().filter(|k| **k == SyntaxKind::Declaration).count(),
            1
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == SyntaxKind::FunctionDefinition)
                .count(),
            1
        );
    }

    #[test]
    fn test_typedef_name_heuristic() {
        let kinds = kinds("typedef unsigned int size_t; size_t n;");
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == SyntaxKind::TypeSpecifier)
                .count(),
            3
        );
    }

    #[test]
    fn test_knr_parameters() {
        let kinds = kinds("int add(a, b) int a; int b; { return a + b; }");
        assert!(kinds.contains(&SyntaxKind::IdentifierList));
        assert!(kinds.contains(&SyntaxKind::DeclarationList));
    }

    #[test]
    fn test_abstract_function_pointer_parameter() {
        let kinds = kinds("void sort(int (*)(const void *, const void *));");
        assert!(kinds.contains(&SyntaxKind::ParenAbstractDeclarator));
        assert!(kinds.contains(&SyntaxKind::FunctionAbstractDeclarator));
    }

    #[test]
    fn test_bit_fields_and_anonymous_members() {
        let kinds = kinds("struct flags { unsigned a : 1; unsigned : 3; union { int i; }; };");
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == SyntaxKind::StructDeclarator)
                .count(),
            3
        );
    }
}
