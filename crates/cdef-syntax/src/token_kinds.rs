//! Single list of token kind names, shared by the `SyntaxKind` definition and
//! the `TokenKind` conversions so the two enums cannot drift apart.

macro_rules! for_each_token_kind {
    ($m:ident) => {
        $m! {
            Whitespace,
            LineComment,
            BlockComment,
            Directive,
            HeaderComment,
            KeyKnown,
            KeyUnknown,
            Platform,
            Separator,
            Value,
            Delim,
            LParen,
            RParen,
            LBracket,
            RBracket,
            LBrace,
            RBrace,
            Dot,
            Arrow,
            PlusPlus,
            MinusMinus,
            Amp,
            Star,
            Plus,
            Minus,
            Tilde,
            Bang,
            Slash,
            Percent,
            Shl,
            Shr,
            Lt,
            Gt,
            LtEq,
            GtEq,
            EqEq,
            Neq,
            Caret,
            Pipe,
            AmpAmp,
            PipePipe,
            Question,
            Colon,
            Semicolon,
            Ellipsis,
            Eq,
            StarEq,
            SlashEq,
            PercentEq,
            PlusEq,
            MinusEq,
            ShlEq,
            ShrEq,
            AmpEq,
            CaretEq,
            PipeEq,
            Comma,
            KwAuto,
            KwBreak,
            KwCase,
            KwChar,
            KwConst,
            KwContinue,
            KwDefault,
            KwDo,
            KwDouble,
            KwElse,
            KwEnum,
            KwExtern,
            KwFloat,
            KwFor,
            KwGoto,
            KwIf,
            KwInline,
            KwInt,
            KwLong,
            KwRegister,
            KwRestrict,
            KwReturn,
            KwShort,
            KwSigned,
            KwSizeof,
            KwStatic,
            KwStruct,
            KwSwitch,
            KwTypedef,
            KwUnion,
            KwUnsigned,
            KwVoid,
            KwVolatile,
            KwWhile,
            KwAlignas,
            KwAlignof,
            KwAtomic,
            KwBool,
            KwComplex,
            KwGeneric,
            KwImaginary,
            KwNoreturn,
            KwStaticAssert,
            KwThreadLocal,
            Ident,
            IntLiteral,
            FloatLiteral,
            CharLiteral,
            StringLiteral,
            ErrorToken,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
