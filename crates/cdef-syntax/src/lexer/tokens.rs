//! Token definitions for C interop definition files.
//!
//! The C body of a definition file is lexed directly by the `logos`-derived
//! [`TokenKind`]. Header tokens (keys, values, the `---` delimiter) come from
//! the header-mode lexer in `header.rs` and map onto the unattributed variants
//! below, so both modes share one kind space.

use logos::Logos;

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            lex.bump(i + 2);
            return true;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

/// All token kinds.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments, preprocessor lines)
/// - Header tokens (only produced in header mode)
/// - Punctuation and operators
/// - C keywords
/// - Literals and identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Single-line comment: `// ...`
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: `/* ... */`
    #[token("/*", lex_block_comment)]
    BlockComment,

    /// Preprocessor line: `#include <x.h>`, `#define N 1` (with `\` continuations)
    #[regex(r"#([^\r\n\\]|\\[\s\S])*")]
    Directive,

    /// Header comment line: `# ...` before the delimiter
    HeaderComment,

    // =========================================================================
    // HEADER
    // =========================================================================
    /// A recognized definition key such as `headers` or `compilerOpts`
    KeyKnown,

    /// Any other definition key
    KeyUnknown,

    /// Platform suffix of a key: `.linux`, `.osx`
    Platform,

    /// `=` between a key and its value
    Separator,

    /// The value of a definition, up to the end of the (continued) line
    Value,

    /// `---` separating the header from the C body
    Delim,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `.`
    #[token(".")]
    Dot,

    /// `->`
    #[token("->")]
    Arrow,

    /// `++`
    #[token("++")]
    PlusPlus,

    /// `--`
    #[token("--")]
    MinusMinus,

    /// `&`
    #[token("&")]
    Amp,

    /// `*`
    #[token("*")]
    Star,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `~`
    #[token("~")]
    Tilde,

    /// `!`
    #[token("!")]
    Bang,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `<<`
    #[token("<<")]
    Shl,

    /// `>>`
    #[token(">>")]
    Shr,

    /// `<`
    #[token("<")]
    Lt,

    /// `>`
    #[token(">")]
    Gt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>=`
    #[token(">=")]
    GtEq,

    /// `==`
    #[token("==")]
    EqEq,

    /// `!=`
    #[token("!=")]
    Neq,

    /// `^`
    #[token("^")]
    Caret,

    /// `|`
    #[token("|")]
    Pipe,

    /// `&&`
    #[token("&&")]
    AmpAmp,

    /// `||`
    #[token("||")]
    PipePipe,

    /// `?`
    #[token("?")]
    Question,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `...`
    #[token("...")]
    Ellipsis,

    /// `=`
    #[token("=")]
    Eq,

    /// `*=`
    #[token("*=")]
    StarEq,

    /// `/=`
    #[token("/=")]
    SlashEq,

    /// `%=`
    #[token("%=")]
    PercentEq,

    /// `+=`
    #[token("+=")]
    PlusEq,

    /// `-=`
    #[token("-=")]
    MinusEq,

    /// `<<=`
    #[token("<<=")]
    ShlEq,

    /// `>>=`
    #[token(">>=")]
    ShrEq,

    /// `&=`
    #[token("&=")]
    AmpEq,

    /// `^=`
    #[token("^=")]
    CaretEq,

    /// `|=`
    #[token("|=")]
    PipeEq,

    /// `,`
    #[token(",")]
    Comma,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `auto`
    #[token("auto")]
    KwAuto,

    /// `break`
    #[token("break")]
    KwBreak,

    /// `case`
    #[token("case")]
    KwCase,

    /// `char`
    #[token("char")]
    KwChar,

    /// `const`
    #[token("const")]
    KwConst,

    /// `continue`
    #[token("continue")]
    KwContinue,

    /// `default`
    #[token("default")]
    KwDefault,

    /// `do`
    #[token("do")]
    KwDo,

    /// `double`
    #[token("double")]
    KwDouble,

    /// `else`
    #[token("else")]
    KwElse,

    /// `enum`
    #[token("enum")]
    KwEnum,

    /// `extern`
    #[token("extern")]
    KwExtern,

    /// `float`
    #[token("float")]
    KwFloat,

    /// `for`
    #[token("for")]
    KwFor,

    /// `goto`
    #[token("goto")]
    KwGoto,

    /// `if`
    #[token("if")]
    KwIf,

    /// `inline` (also `__inline`)
    #[token("inline")]
    #[token("__inline")]
    KwInline,

    /// `int`
    #[token("int")]
    KwInt,

    /// `long`
    #[token("long")]
    KwLong,

    /// `register`
    #[token("register")]
    KwRegister,

    /// `restrict` (also `__restrict`)
    #[token("restrict")]
    #[token("__restrict")]
    KwRestrict,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `short`
    #[token("short")]
    KwShort,

    /// `signed`
    #[token("signed")]
    KwSigned,

    /// `sizeof`
    #[token("sizeof")]
    KwSizeof,

    /// `static`
    #[token("static")]
    KwStatic,

    /// `struct`
    #[token("struct")]
    KwStruct,

    /// `switch`
    #[token("switch")]
    KwSwitch,

    /// `typedef`
    #[token("typedef")]
    KwTypedef,

    /// `union`
    #[token("union")]
    KwUnion,

    /// `unsigned`
    #[token("unsigned")]
    KwUnsigned,

    /// `void`
    #[token("void")]
    KwVoid,

    /// `volatile`
    #[token("volatile")]
    KwVolatile,

    /// `while`
    #[token("while")]
    KwWhile,

    /// `_Alignas`
    #[token("_Alignas")]
    KwAlignas,

    /// `_Alignof`
    #[token("_Alignof")]
    KwAlignof,

    /// `_Atomic`
    #[token("_Atomic")]
    KwAtomic,

    /// `_Bool`
    #[token("_Bool")]
    KwBool,

    /// `_Complex`
    #[token("_Complex")]
    KwComplex,

    /// `_Generic`
    #[token("_Generic")]
    KwGeneric,

    /// `_Imaginary`
    #[token("_Imaginary")]
    KwImaginary,

    /// `_Noreturn`
    #[token("_Noreturn")]
    KwNoreturn,

    /// `_Static_assert`
    #[token("_Static_assert")]
    KwStaticAssert,

    /// `_Thread_local`
    #[token("_Thread_local")]
    KwThreadLocal,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Identifier
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// Integer constant: `42`, `0x1F`, `017`, `10UL`
    #[regex(r"(0[xX][0-9a-fA-F]+|[0-9]+)([uU](ll|LL|l|L)?|(ll|LL|l|L)[uU]?)?")]
    IntLiteral,

    /// Floating constant: `1.0`, `.5f`, `1e10`, `2.5e-3L`
    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?[fFlL]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFlL]?")]
    FloatLiteral,

    /// Character constant: `'a'`, `L'\n'`
    #[regex(r"(L|u8|u|U)?'([^'\\\n]|\\.)*'")]
    CharLiteral,

    /// String literal: `"abc"`, `u8"x"`
    #[regex(r#"(L|u8|u|U)?"([^"\\\n]|\\.)*""#)]
    StringLiteral,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognized input
    ErrorToken,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is a trivia token (not significant to the grammar).
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

    /// Returns `true` if this is a C keyword.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::KwAuto as u16) && (self as u16) <= (Self::KwThreadLocal as u16)
    }

    /// Returns `true` for header-mode tokens.
    #[must_use]
    pub fn is_header(self) -> bool {
        matches!(
            self,
            Self::KeyKnown
                | Self::KeyUnknown
                | Self::Platform
                | Self::Separator
                | Self::Value
                | Self::Delim
        )
    }

    /// Returns `true` for storage class specifier keywords.
    #[must_use]
    pub fn is_storage_class(self) -> bool {
        matches!(
            self,
            Self::KwTypedef
                | Self::KwExtern
                | Self::KwStatic
                | Self::KwThreadLocal
                | Self::KwAuto
                | Self::KwRegister
        )
    }

    /// Returns `true` for keywords that are complete type specifiers on their own.
    #[must_use]
    pub fn is_builtin_type(self) -> bool {
        matches!(
            self,
            Self::KwVoid
                | Self::KwChar
                | Self::KwShort
                | Self::KwInt
                | Self::KwLong
                | Self::KwFloat
                | Self::KwDouble
                | Self::KwSigned
                | Self::KwUnsigned
                | Self::KwBool
                | Self::KwComplex
                | Self::KwImaginary
        )
    }

    /// Returns `true` for type qualifier keywords.
    ///
    /// `_Atomic` is only a qualifier when not followed by `(`; callers check that.
    #[must_use]
    pub fn is_type_qualifier(self) -> bool {
        matches!(
            self,
            Self::KwConst | Self::KwRestrict | Self::KwVolatile | Self::KwAtomic
        )
    }

    /// Returns `true` for function specifier keywords.
    #[must_use]
    pub fn is_function_specifier(self) -> bool {
        matches!(self, Self::KwInline | Self::KwNoreturn)
    }

    /// Returns `true` if this token can begin declaration specifiers.
    #[must_use]
    pub fn can_start_specifiers(self) -> bool {
        self.is_storage_class()
            || self.is_builtin_type()
            || self.is_type_qualifier()
            || self.is_function_specifier()
            || matches!(
                self,
                Self::KwStruct | Self::KwUnion | Self::KwEnum | Self::KwAlignas | Self::Ident
            )
    }

    /// Returns `true` for the assignment operators `= *= /= %= += -= <<= >>= &= ^= |=`.
    #[must_use]
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::PlusEq
                | Self::MinusEq
                | Self::ShlEq
                | Self::ShrEq
                | Self::AmpEq
                | Self::CaretEq
                | Self::PipeEq
        )
    }

    /// Returns `true` for the prefix operators that take a cast expression operand.
    #[must_use]
    pub fn is_unary_op(self) -> bool {
        matches!(
            self,
            Self::Amp | Self::Star | Self::Plus | Self::Minus | Self::Tilde | Self::Bang
        )
    }

    /// Returns `true` for literal constants (not strings).
    #[must_use]
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            Self::IntLiteral | Self::FloatLiteral | Self::CharLiteral
        )
    }

    /// Display name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::LineComment | Self::BlockComment | Self::HeaderComment => "comment",
            Self::Directive => "preprocessor directive",
            Self::KeyKnown | Self::KeyUnknown => "definition key",
            Self::Platform => "platform suffix",
            Self::Separator => "'='",
            Self::Value => "definition value",
            Self::Delim => "'---'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Dot => "'.'",
            Self::Arrow => "'->'",
            Self::PlusPlus => "'++'",
            Self::MinusMinus => "'--'",
            Self::Amp => "'&'",
            Self::Star => "'*'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Tilde => "'~'",
            Self::Bang => "'!'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Shl => "'<<'",
            Self::Shr => "'>>'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::LtEq => "'<='",
            Self::GtEq => "'>='",
            Self::EqEq => "'=='",
            Self::Neq => "'!='",
            Self::Caret => "'^'",
            Self::Pipe => "'|'",
            Self::AmpAmp => "'&&'",
            Self::PipePipe => "'||'",
            Self::Question => "'?'",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Ellipsis => "'...'",
            Self::Eq => "'='",
            Self::StarEq => "'*='",
            Self::SlashEq => "'/='",
            Self::PercentEq => "'%='",
            Self::PlusEq => "'+='",
            Self::MinusEq => "'-='",
            Self::ShlEq => "'<<='",
            Self::ShrEq => "'>>='",
            Self::AmpEq => "'&='",
            Self::CaretEq => "'^='",
            Self::PipeEq => "'|='",
            Self::Comma => "','",
            Self::KwAuto => "'auto'",
            Self::KwBreak => "'break'",
            Self::KwCase => "'case'",
            Self::KwChar => "'char'",
            Self::KwConst => "'const'",
            Self::KwContinue => "'continue'",
            Self::KwDefault => "'default'",
            Self::KwDo => "'do'",
            Self::KwDouble => "'double'",
            Self::KwElse => "'else'",
            Self::KwEnum => "'enum'",
            Self::KwExtern => "'extern'",
            Self::KwFloat => "'float'",
            Self::KwFor => "'for'",
            Self::KwGoto => "'goto'",
            Self::KwIf => "'if'",
            Self::KwInline => "'inline'",
            Self::KwInt => "'int'",
            Self::KwLong => "'long'",
            Self::KwRegister => "'register'",
            Self::KwRestrict => "'restrict'",
            Self::KwReturn => "'return'",
            Self::KwShort => "'short'",
            Self::KwSigned => "'signed'",
            Self::KwSizeof => "'sizeof'",
            Self::KwStatic => "'static'",
            Self::KwStruct => "'struct'",
            Self::KwSwitch => "'switch'",
            Self::KwTypedef => "'typedef'",
            Self::KwUnion => "'union'",
            Self::KwUnsigned => "'unsigned'",
            Self::KwVoid => "'void'",
            Self::KwVolatile => "'volatile'",
            Self::KwWhile => "'while'",
            Self::KwAlignas => "'_Alignas'",
            Self::KwAlignof => "'_Alignof'",
            Self::KwAtomic => "'_Atomic'",
            Self::KwBool => "'_Bool'",
            Self::KwComplex => "'_Complex'",
            Self::KwGeneric => "'_Generic'",
            Self::KwImaginary => "'_Imaginary'",
            Self::KwNoreturn => "'_Noreturn'",
            Self::KwStaticAssert => "'_Static_assert'",
            Self::KwThreadLocal => "'_Thread_local'",
            Self::Ident => "identifier",
            Self::IntLiteral => "integer constant",
            Self::FloatLiteral => "floating constant",
            Self::CharLiteral => "character constant",
            Self::StringLiteral => "string literal",
            Self::ErrorToken => "invalid token",
            Self::Eof => "end of input",
        }
    }
}
