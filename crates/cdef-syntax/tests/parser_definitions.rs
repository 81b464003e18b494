mod common;
use common::*;

use cdef_syntax::ast::{AstNode, DefinitionFile, ExternalDecl};
use cdef_syntax::parse_definitions;

fn file(source: &str) -> DefinitionFile {
    let parse = parse_definitions(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors());
    DefinitionFile::cast(parse.root()).unwrap()
}

#[test]
fn test_header_and_code_section() {
    insta::assert_snapshot!(
        snapshot_definitions("headers = stdio.h\nlinkerOpts.linux = -lm\n---\nint x;\n"),
        @r#"
    DefinitionFile
      Definition
        DefinitionKey
          KeyKnown "headers"
        Separator "="
        Value "stdio.h"
      Definition
        DefinitionKey
          KeyKnown "linkerOpts"
          Platform ".linux"
        Separator "="
        Value "-lm"
      CodeSection
        Delim "---"
        Declaration
          DeclarationSpecifiers
            TypeSpecifier
              KwInt "int"
          InitDeclaratorList
            InitDeclarator
              Declarator
                NameDeclarator
                  Ident "x"
          Semicolon ";"
    "#
    );
}

#[test]
fn test_definition_accessors() {
    let file = file("# generated\nheaders.osx = a.h b.h\nexcludedMacros =\nmyKey = 1\n");
    let definitions: Vec<_> = file.definitions().collect();
    assert_eq!(definitions.len(), 3);

    let key = definitions[0].key().unwrap();
    assert_eq!(key.name(), "headers");
    assert_eq!(key.platform().as_deref(), Some("osx"));
    assert!(key.is_known());
    assert_eq!(definitions[0].value().as_deref(), Some("a.h b.h"));

    assert_eq!(definitions[1].key_text(), "excludedMacros");
    assert_eq!(definitions[1].value(), None);

    assert!(!definitions[2].key().unwrap().is_known());
    assert!(file.code_section().is_none());
}

#[test]
fn test_value_continues_over_escaped_newline() {
    let file = file("compilerOpts = -DA \\\n  -DB\n---\n");
    let value = file.definitions().next().unwrap().value().unwrap();
    assert_eq!(value, "-DA \\\n  -DB");
    assert_eq!(file.code_section().unwrap().declarations().count(), 0);
}

#[test]
fn test_code_section_without_header() {
    let file = file("---\n#include <stdio.h>\n/* types */\ntypedef int handle;\nhandle open_handle(const char *path);\n");
    assert_eq!(file.definitions().count(), 0);
    let decls: Vec<_> = file.code_section().unwrap().declarations().collect();
    assert_eq!(decls.len(), 2);
    assert!(decls
        .iter()
        .all(|decl| matches!(decl, ExternalDecl::Declaration(_))));
}

#[test]
fn test_error_in_code_section_keeps_header() {
    let parse = parse_definitions("headers = a.h\n---\nint x\n");
    assert_eq!(parse.errors().len(), 1);
    let kinds: Vec<_> = parse.root().children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Definition, SyntaxKind::CodeSection, SyntaxKind::Error]
    );
}

#[test]
fn test_definition_without_separator() {
    let parse = parse_definitions("headers\n---\n");
    assert_eq!(
        messages(&parse),
        vec!["unconsumed input, unexpected '---', expected '='"]
    );
}
