//! Header-mode tokens.
//!
//! The header of a definition file is a list of `key[.platform] = value`
//! lines followed by an optional `---` delimiter. Values run to the end of
//! the line and are not tokenized by `logos`; see [`scan_value`].

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::{Token, TokenKind};

/// Raw header token, before keys are classified.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Key,

    #[regex(r"\.[A-Za-z0-9_]+")]
    Platform,

    #[token("=")]
    Separator,

    #[token("---")]
    Delim,
}

/// Keys understood by the interop tool.
pub const KNOWN_KEYS: &[&str] = &[
    "headers",
    "headerFilter",
    "modules",
    "compilerOpts",
    "compilerOptions",
    "linkerOpts",
    "excludedFunctions",
    "excludedMacros",
    "staticLibraries",
    "libraryPaths",
    "packageName",
    "package",
    "language",
    "entryPoint",
    "strictEnums",
    "nonStrictEnums",
    "noStringConversion",
    "depends",
    "exportForwardDeclarations",
    "disableDesignatedInitializerChecks",
    "foreignExceptionMode",
    "allowedOverloadsForCFunctions",
    "userSetupHint",
    "excludeDependentModules",
    "excludeSystemLibs",
    "objcClassesIncludingCategories",
];

/// Returns `true` if `key` is one of [`KNOWN_KEYS`].
#[must_use]
pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

impl HeaderToken {
    pub(crate) fn classify(self, text: &str) -> TokenKind {
        match self {
            Self::Whitespace => TokenKind::Whitespace,
            Self::Comment => TokenKind::HeaderComment,
            Self::Key if is_known_key(text) => TokenKind::KeyKnown,
            Self::Key => TokenKind::KeyUnknown,
            Self::Platform => TokenKind::Platform,
            Self::Separator => TokenKind::Separator,
            Self::Delim => TokenKind::Delim,
        }
    }
}

/// Scans a definition value starting right after a separator.
///
/// `rest` is the remaining input and `base` its offset in the source.
/// Returns the produced tokens (leading whitespace, then the value) and the
/// number of bytes they cover. A line whose last non-blank character is `\`
/// continues on the next line. Trailing blanks are left to the caller.
pub(crate) fn scan_value(rest: &str, base: usize) -> (Vec<Token>, usize) {
    let bytes = rest.as_bytes();
    let len = bytes.len();
    let ws = bytes
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();

    let mut end = ws;
    let mut value_end = ws;
    loop {
        let line_start = end;
        while end < len && bytes[end] != b'\n' && bytes[end] != b'\r' {
            end += 1;
        }

        let mut trimmed = end;
        while trimmed > line_start && matches!(bytes[trimmed - 1], b' ' | b'\t') {
            trimmed -= 1;
        }

        if trimmed > line_start && bytes[trimmed - 1] == b'\\' && end < len {
            if bytes[end] == b'\r' {
                end += 1;
            }
            if end < len && bytes[end] == b'\n' {
                end += 1;
            }
            value_end = end;
            continue;
        }

        value_end = value_end.max(trimmed);
        break;
    }

    let mut tokens = Vec::with_capacity(2);
    let at = |offset: usize| TextSize::from(u32::try_from(base + offset).unwrap_or(u32::MAX));
    if ws > 0 {
        tokens.push(Token::new(
            TokenKind::Whitespace,
            TextRange::new(at(0), at(ws)),
        ));
    }
    if value_end > ws {
        tokens.push(Token::new(
            TokenKind::Value,
            TextRange::new(at(ws), at(value_end)),
        ));
    }
    (tokens, value_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(rest: &'a str, tokens: &[Token]) -> Vec<(TokenKind, &'a str)> {
        tokens
            .iter()
            .map(|t| {
                (
                    t.kind,
                    &rest[usize::from(t.range.start())..usize::from(t.range.end())],
                )
            })
            .collect()
    }

    #[test]
    fn test_value_to_end_of_line() {
        let rest = " stdio.h stdlib.h  \nnext = 1";
        let (tokens, consumed) = scan_value(rest, 0);
        assert_eq!(
            texts(rest, &tokens),
            vec![
                (TokenKind::Whitespace, " "),
                (TokenKind::Value, "stdio.h stdlib.h"),
            ]
        );
        assert_eq!(consumed, " stdio.h stdlib.h".len());
    }

    #[test]
    fn test_value_with_continuation() {
        let rest = " -I/usr/include \\\n  -DFOO\nx";
        let (tokens, consumed) = scan_value(rest, 0);
        assert_eq!(
            texts(rest, &tokens),
            vec![
                (TokenKind::Whitespace, " "),
                (TokenKind::Value, "-I/usr/include \\\n  -DFOO"),
            ]
        );
        assert_eq!(&rest[consumed..], "\nx");
    }

    #[test]
    fn test_empty_value() {
        let (tokens, consumed) = scan_value("   \nheaders = a.h", 10);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Whitespace);
        assert_eq!(tokens[0].range, TextRange::new(10.into(), 13.into()));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_known_keys() {
        assert!(is_known_key("headers"));
        assert!(is_known_key("compilerOpts"));
        assert!(!is_known_key("headerz"));
        assert_eq!(HeaderToken::Key.classify("linkerOpts"), TokenKind::KeyKnown);
        assert_eq!(HeaderToken::Key.classify("custom"), TokenKind::KeyUnknown);
    }
}
