#![no_main]

use cdef_syntax::{EntryPoint, ParserConfig, SyntaxParser};
use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 4096;

const ENTRIES: [EntryPoint; 4] = [
    EntryPoint::DefinitionFile,
    EntryPoint::TranslationUnit,
    EntryPoint::Expression,
    EntryPoint::Block,
];

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let entry = ENTRIES[usize::from(data[0]) % ENTRIES.len()];
    let source = decode_source(&data[1..]);
    let parser = SyntaxParser::new(ParserConfig {
        max_depth: 128,
        max_iterations: 100_000,
    });
    let parse = parser.parse(&source, entry);

    assert_eq!(parse.syntax().text().to_string(), source);
    assert_eq!(parse.root().kind(), entry.root_kind());
    assert!(usize::from(parse.consumed()) <= source.len());
    assert_eq!(parse.ok(), parse.errors().is_empty());
    for error in parse.errors() {
        assert!(usize::from(error.range().end()) <= source.len());
    }
    for node in parse.root().descendants() {
        let _ = cdef_syntax::ast::create(node);
    }
});
