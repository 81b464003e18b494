//! Definition file parsing.
//!
//! ```text
//! headers = stdio.h
//! compilerOpts.linux = -DLINUX
//! ---
//! static int answer(void) { return 42; }
//! ```
//!
//! The code section after `---` is parsed by the C rules on the same parser.

use crate::lexer::TokenKind;
use crate::parser::token_set::TokenSet;
use crate::parser::{CompletedMarker, EntryPoint, Parser};
use crate::syntax::SyntaxKind;

use super::node;

const DEFINITION_KEY: TokenSet = TokenSet::new(&[TokenKind::KeyKnown, TokenKind::KeyUnknown]);

/// `definition* ('---' code_section)?`
pub(super) fn definition_file(p: &mut Parser<'_, '_>) -> bool {
    p.repeat("definition_file", |p| definition(p).is_some());
    if p.at(TokenKind::Delim) {
        code_section(p);
    } else {
        p.add_variant(TokenKind::Delim.name());
    }
    true
}

/// `key '=' VALUE?`
fn definition(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at_set(DEFINITION_KEY) {
        p.add_variant("definition key");
        return None;
    }

    p.rule("definition", |p| {
        node(p, SyntaxKind::Definition, |p| {
            definition_key(p);
            if !p.expect(TokenKind::Separator) {
                return false;
            }
            p.eat(TokenKind::Value);
            true
        })
    })
}

/// `(KEY_KNOWN | KEY_UNKNOWN) PLATFORM?`
fn definition_key(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.eat(TokenKind::Platform);
    m.complete(p, SyntaxKind::DefinitionKey)
}

fn code_section(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    super::entry(p, EntryPoint::TranslationUnit);
    m.complete(p, SyntaxKind::CodeSection)
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_definitions;
    use crate::syntax::SyntaxKind;

    #[test]
    fn test_header_only() {
        let parse = parse_definitions("headers = stdio.h\n# comment\nlinkerOpts.osx = -lm\n");
        assert!(parse.ok(), "{:?}", parse.errors());
        let definitions: Vec<_> = parse
            .root()
            .children()
            .filter(|n| n.kind() == SyntaxKind::Definition)
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(definitions, vec!["headers = stdio.h", "linkerOpts.osx = -lm"]);
    }

    #[test]
    fn test_code_section_reuses_c_rules() {
        let parse = parse_definitions("package = demo\n---\nint answer(void) { return 42; }\n");
        assert!(parse.ok(), "{:?}", parse.errors());
        let code = parse
            .root()
            .first_child_of_kind(SyntaxKind::CodeSection)
            .unwrap();
        assert_eq!(
            code.children().map(|n| n.kind()).collect::<Vec<_>>(),
            vec![SyntaxKind::FunctionDefinition]
        );
    }

    #[test]
    fn test_missing_separator_is_trailing_input() {
        let parse = parse_definitions("headers stdio.h\n");
        assert_eq!(parse.errors().len(), 1);
        assert!(parse.errors()[0]
            .to_string()
            .starts_with("unconsumed input, unexpected"));
    }
}
