mod common;
use common::*;

use cdef_syntax::ast::{AstNode, ExternalDecl, TranslationUnit};
use cdef_syntax::parse_translation_unit;

fn top_level_kinds(source: &str) -> Vec<SyntaxKind> {
    let parse = parse_translation_unit(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors());
    parse.root().children().map(|n| n.kind()).collect()
}

fn unit(source: &str) -> TranslationUnit {
    let parse = parse_translation_unit(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors());
    TranslationUnit::cast(parse.root()).unwrap()
}

// Declarations
#[test]
fn test_declaration_with_initializer_and_pointer() {
    insta::assert_snapshot!(snapshot_unit("int x = 1, *y;"), @r#"
    TranslationUnit
      Declaration
        DeclarationSpecifiers
          TypeSpecifier
            KwInt "int"
        InitDeclaratorList
          InitDeclarator
            Declarator
              NameDeclarator
                Ident "x"
            Eq "="
            Literal
              IntLiteral "1"
          Comma ","
          InitDeclarator
            Declarator
              Pointer
                Star "*"
              NameDeclarator
                Ident "y"
        Semicolon ";"
    "#);
}

#[test]
fn test_function_definition() {
    insta::assert_snapshot!(snapshot_unit("static int add(int a, int b) { return a + b; }"), @r#"
    TranslationUnit
      FunctionDefinition
        DeclarationSpecifiers
          StorageClassSpecifier
            KwStatic "static"
          TypeSpecifier
            KwInt "int"
        Declarator
          FunctionDeclarator
            NameDeclarator
              Ident "add"
            LParen "("
            ParameterTypeList
              ParameterList
                ParameterDeclaration
                  DeclarationSpecifiers
                    TypeSpecifier
                      KwInt "int"
                  Declarator
                    NameDeclarator
                      Ident "a"
                Comma ","
                ParameterDeclaration
                  DeclarationSpecifiers
                    TypeSpecifier
                      KwInt "int"
                  Declarator
                    NameDeclarator
                      Ident "b"
            RParen ")"
        CompoundStatement
          LBrace "{"
          ReturnStatement
            KwReturn "return"
            BinaryExpr
              NameRef
                Ident "a"
              Plus "+"
              NameRef
                Ident "b"
            Semicolon ";"
          RBrace "}"
    "#);
}

#[test]
fn test_prototype_is_a_declaration() {
    assert_eq!(
        top_level_kinds("int f(void); int g(void) { }"),
        vec![SyntaxKind::Declaration, SyntaxKind::FunctionDefinition]
    );
}

#[test]
fn test_empty_declarations_are_kept() {
    assert_eq!(
        top_level_kinds("; int x;"),
        vec![SyntaxKind::ExternalDeclaration, SyntaxKind::Declaration]
    );
}

#[test]
fn test_variadic_prototype() {
    let unit = unit("int printf(const char *fmt, ...);");
    let Some(ExternalDecl::Declaration(decl)) = unit.declarations().next() else {
        panic!("expected a declaration");
    };
    let declarator = decl.declarators().next().unwrap().declarator().unwrap();
    assert_eq!(declarator.name().as_deref(), Some("printf"));
    let Some(cdef_syntax::ast::DirectDeclarator::Function(function)) = declarator.direct() else {
        panic!("expected a function declarator");
    };
    let params = function.parameters().unwrap();
    assert!(params.is_variadic());
    assert_eq!(params.parameters().count(), 1);
}

#[test]
fn test_array_of_function_pointers() {
    let unit = unit("int (*table[4])(void);");
    let Some(ExternalDecl::Declaration(decl)) = unit.declarations().next() else {
        panic!("expected a declaration");
    };
    let declarator = decl.declarators().next().unwrap().declarator().unwrap();
    assert_eq!(declarator.name().as_deref(), Some("table"));
    assert!(declarator.is_function());
}

#[test]
fn test_static_assert() {
    assert_eq!(
        top_level_kinds(r#"_Static_assert(sizeof(int) == 4, "int");"#),
        vec![SyntaxKind::StaticAssertDeclaration]
    );
}

#[test]
fn test_storage_classes_and_qualifiers() {
    let source = "extern const volatile int a; _Thread_local static long b; \
                  inline void f(void); _Noreturn void g(void); \
                  _Alignas(16) char buf[32]; _Atomic(int) counter;";
    assert_eq!(top_level_kinds(source), vec![SyntaxKind::Declaration; 6]);
}

// Typedef names
#[test]
fn test_typedef_name_in_specifiers() {
    let unit = unit("typedef unsigned int uint; uint count; const uint *p;");
    let decls: Vec<_> = unit
        .declarations()
        .map(|decl| match decl {
            ExternalDecl::Declaration(decl) => decl,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(decls.len(), 3);
    assert!(decls[0].is_typedef());
    assert!(!decls[1].is_typedef());
    let names: Vec<_> = decls
        .iter()
        .map(|decl| {
            decl.declarators()
                .next()
                .and_then(|d| d.declarator())
                .and_then(|d| d.name())
                .unwrap()
        })
        .collect();
    assert_eq!(names, vec!["uint", "count", "p"]);
}

// Records and enums
#[test]
fn test_struct_with_bit_field() {
    insta::assert_snapshot!(snapshot_unit("struct point { int x, y; unsigned flags : 3; };"), @r#"
    TranslationUnit
      Declaration
        DeclarationSpecifiers
          StructOrUnionSpecifier
            KwStruct "struct"
            Ident "point"
            StructDeclarationList
              LBrace "{"
              StructDeclaration
                SpecifierQualifierList
                  TypeSpecifier
                    KwInt "int"
                StructDeclaratorList
                  StructDeclarator
                    Declarator
                      NameDeclarator
                        Ident "x"
                  Comma ","
                  StructDeclarator
                    Declarator
                      NameDeclarator
                        Ident "y"
                Semicolon ";"
              StructDeclaration
                SpecifierQualifierList
                  TypeSpecifier
                    KwUnsigned "unsigned"
                StructDeclaratorList
                  StructDeclarator
                    Declarator
                      NameDeclarator
                        Ident "flags"
                    Colon ":"
                    Literal
                      IntLiteral "3"
                Semicolon ";"
              RBrace "}"
        Semicolon ";"
    "#);
}

#[test]
fn test_enum_with_trailing_comma() {
    insta::assert_snapshot!(snapshot_unit("enum color { RED, GREEN = 2, };"), @r#"
    TranslationUnit
      Declaration
        DeclarationSpecifiers
          EnumSpecifier
            KwEnum "enum"
            Ident "color"
            EnumeratorList
              LBrace "{"
              Enumerator
                Ident "RED"
              Comma ","
              Enumerator
                Ident "GREEN"
                Eq "="
                Literal
                  IntLiteral "2"
              Comma ","
              RBrace "}"
        Semicolon ";"
    "#);
}

#[test]
fn test_union_members_through_ast() {
    let unit = unit("union value { int i; double d; struct { char c; } nested; };");
    let Some(ExternalDecl::Declaration(decl)) = unit.declarations().next() else {
        panic!("expected a declaration");
    };
    let Some(cdef_syntax::ast::Specifier::Record(record)) =
        decl.specifiers().unwrap().specifiers().next()
    else {
        panic!("expected a record specifier");
    };
    assert!(record.is_union());
    assert_eq!(record.tag().as_deref(), Some("value"));
    assert_eq!(record.members().unwrap().declarations().count(), 3);
}

// Initializers
#[test]
fn test_designated_initializers() {
    let unit = unit("struct point p = { .x = 1, [2].y = 3, 4, };");
    let Some(ExternalDecl::Declaration(decl)) = unit.declarations().next() else {
        panic!("expected a declaration");
    };
    let Some(cdef_syntax::ast::Initializer::List(list)) =
        decl.declarators().next().unwrap().initializer()
    else {
        panic!("expected an initializer list");
    };
    let entries: Vec<_> = list
        .entries()
        .map(|(designation, value)| {
            (
                designation.map(|d| d.designators().count()),
                value.text().to_string(),
            )
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            (Some(1), "1".to_string()),
            (Some(2), "3".to_string()),
            (None, "4".to_string()),
        ]
    );
}

// Errors
#[test]
fn test_missing_semicolon() {
    insta::assert_snapshot!(snapshot_unit("int x"), @r#"
    TranslationUnit
      Error
        KwInt "int"
        Ident "x"
    ---
    Errors:
      - unconsumed input, unexpected end of input, expected one of declaration, '{', ';'
    "#);
}

#[test]
fn test_prefix_is_kept_before_error() {
    let parse = parse_translation_unit("int a; int b; 42;");
    assert_eq!(parse.errors().len(), 1);
    let kinds: Vec<_> = parse.root().children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Declaration, SyntaxKind::Declaration, SyntaxKind::Error]
    );
    assert_eq!(parse.consumed(), 13.into());
}
