mod common;
use common::*;

use cdef_syntax::ParseError;

const ENTRIES: [EntryPoint; 4] = [
    EntryPoint::DefinitionFile,
    EntryPoint::TranslationUnit,
    EntryPoint::Expression,
    EntryPoint::Block,
];

#[test]
fn test_root_kind_matches_entry() {
    for entry in ENTRIES {
        let parse = SyntaxParser::default().parse("", entry);
        assert_eq!(parse.root().kind(), entry.root_kind());
    }
}

#[test]
fn test_empty_input() {
    let engine = SyntaxParser::default();
    assert!(engine.parse("", EntryPoint::DefinitionFile).ok());
    assert!(engine.parse("", EntryPoint::TranslationUnit).ok());
    assert_eq!(
        messages(&engine.parse("", EntryPoint::Expression)),
        vec!["unexpected end of input, expected expression"]
    );
    assert_eq!(
        messages(&engine.parse("", EntryPoint::Block)),
        vec!["unexpected end of input, expected '{'"]
    );
}

#[test]
fn test_same_rules_behind_every_entry() {
    let engine = SyntaxParser::default();
    let expression = engine.parse("a[i] = f(x) * 2", EntryPoint::Expression);
    let block = engine.parse("{ a[i] = f(x) * 2; }", EntryPoint::Block);
    let unit = engine.parse("void g(void) { a[i] = f(x) * 2; }", EntryPoint::TranslationUnit);
    let file = engine.parse("---\nvoid g(void) { a[i] = f(x) * 2; }", EntryPoint::DefinitionFile);

    let assignment = |parse: &Parse| {
        parse
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::AssignExpr)
            .map(|n| n.text().to_string())
    };
    for parse in [&expression, &block, &unit, &file] {
        assert!(parse.ok(), "{:?}", parse.errors());
        assert_eq!(assignment(parse).as_deref(), Some("a[i] = f(x) * 2"));
    }
}

#[test]
fn test_fragments_keep_trailing_tokens() {
    let engine = SyntaxParser::default();

    let expression = engine.parse("x y", EntryPoint::Expression);
    assert!(expression.ok());
    assert_eq!(expression.consumed(), 1.into());

    let block = engine.parse("{ } }", EntryPoint::Block);
    assert!(block.ok());
    assert_eq!(block.consumed(), 3.into());

    let unit = engine.parse("int x; }", EntryPoint::TranslationUnit);
    assert!(!unit.ok());
}

#[test]
fn test_same_input_as_fragment_and_unit() {
    let engine = SyntaxParser::default();
    let source = "a + b; c";

    let expression = engine.parse(source, EntryPoint::Expression);
    assert!(expression.ok(), "{:?}", expression.errors());
    assert_eq!(expression.consumed(), 5.into());
    assert_eq!(
        expression.root().children().next().map(|n| n.kind()),
        Some(SyntaxKind::BinaryExpr)
    );

    let unit = engine.parse(source, EntryPoint::TranslationUnit);
    assert!(
        matches!(unit.errors(), [ParseError::TrailingInput { .. }]),
        "{:?}",
        unit.errors()
    );
}

#[test]
fn test_block_is_not_a_translation_unit() {
    let parse = SyntaxParser::default().parse("{ }", EntryPoint::TranslationUnit);
    assert_eq!(
        messages(&parse),
        vec!["unconsumed input, unexpected '{', expected declaration"]
    );
}

#[test]
fn test_c_body_is_not_a_definition_header() {
    let parse = SyntaxParser::default().parse("int x;", EntryPoint::DefinitionFile);
    assert!(!parse.ok());
}
