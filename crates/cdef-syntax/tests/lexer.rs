use cdef_syntax::lexer::{lex, lex_definitions, Token};
use expect_test::expect;

fn dump(source: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
        out.push_str(&format!(
            "{:?} {}..{} {:?}\n",
            token.kind,
            u32::from(token.range.start()),
            u32::from(token.range.end()),
            text
        ));
    }
    out
}

#[test]
fn test_directives_and_comments_are_trivia() {
    let source = "#include <stdio.h>\nint f(void); // proto\n";
    expect![[r##"
Directive 0..18 "#include <stdio.h>"
Whitespace 18..19 "\n"
KwInt 19..22 "int"
Whitespace 22..23 " "
Ident 23..24 "f"
LParen 24..25 "("
KwVoid 25..29 "void"
RParen 29..30 ")"
Semicolon 30..31 ";"
Whitespace 31..32 " "
LineComment 32..40 "// proto"
Whitespace 40..41 "\n"
"##]]
    .assert_eq(&dump(source, &lex(source)));
}

#[test]
fn test_definition_file_modes() {
    let source = "headers.osx = a.h \\\n  b.h\n# c\n---\nx\n";
    expect![[r##"
KeyKnown 0..7 "headers"
Platform 7..11 ".osx"
Whitespace 11..12 " "
Separator 12..13 "="
Whitespace 13..14 " "
Value 14..25 "a.h \\\n  b.h"
Whitespace 25..26 "\n"
HeaderComment 26..29 "# c"
Whitespace 29..30 "\n"
Delim 30..33 "---"
Whitespace 33..34 "\n"
Ident 34..35 "x"
Whitespace 35..36 "\n"
"##]]
    .assert_eq(&dump(source, &lex_definitions(source)));
}

#[test]
fn test_unknown_character() {
    let source = "x @ 1u";
    expect![[r##"
Ident 0..1 "x"
Whitespace 1..2 " "
ErrorToken 2..3 "@"
Whitespace 3..4 " "
IntLiteral 4..6 "1u"
"##]]
    .assert_eq(&dump(source, &lex(source)));
}
