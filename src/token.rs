use std::fmt::{self, Display};

use phf::phf_map;

pub(crate) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "else" => TokenKind::Else,
    "elsif" => TokenKind::ElseIf,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fn" => TokenKind::Fn,
    "in" => TokenKind::In,
    "if" => TokenKind::If,
    "import" => TokenKind::Import,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
    "end" => TokenKind::End,
};

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, lexeme: S, line: usize) -> Self {
        Token { kind, lexeme: lexeme.into(), literal: None, line }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {} {:?}", self.line, self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, " {}", literal),
            None => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    String(String),
    Number(f64),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Number(n) => write!(f, "{:?}", n),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    LeftParen, RightParen, LeftBrace, RightBrace, LeftSquare, RightSquare,
    Comma, Dot, Ellipsis, Semicolon, Colon, Question,

    Plus, Minus, Star, Slash, Exponent, PlusPlus, MinusMinus,
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,
    BitAnd, BitOr, BitXor,
    And, Or,
    Sign, Sigil,

    String, Number, True, False, Nil,

    Identifier,
    Else, ElseIf, For, Fn, In, If, Import, Print, Return, Var, While, End,

    Indent, Dedent,

    Eof,
}

impl TokenKind {
    /// The canonical upper-case name downstream tooling keys on.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            LeftParen => "LEFT_PAREN",
            RightParen => "RIGHT_PAREN",
            LeftBrace => "LEFT_BRACE",
            RightBrace => "RIGHT_BRACE",
            LeftSquare => "LEFT_SQUARE",
            RightSquare => "RIGHT_SQUARE",
            Comma => "COMMA",
            Dot => "DOT",
            Ellipsis => "ELLIPSIS",
            Semicolon => "SEMICOLON",
            Colon => "COLON",
            Question => "QUESTION",
            Plus => "PLUS",
            Minus => "MINUS",
            Star => "STAR",
            Slash => "SLASH",
            Exponent => "EXPONENT",
            PlusPlus => "PLUS_PLUS",
            MinusMinus => "MINUS_MINUS",
            Bang => "BANG",
            BangEqual => "BANG_EQUAL",
            Equal => "EQUAL",
            EqualEqual => "EQUAL_EQUAL",
            Greater => "GREATER",
            GreaterEqual => "GREATER_EQUAL",
            Less => "LESS",
            LessEqual => "LESS_EQUAL",
            BitAnd => "BIT_AND",
            BitOr => "BIT_OR",
            BitXor => "BIT_XOR",
            And => "AND",
            Or => "OR",
            Sign => "SIGN",
            Sigil => "SIGIL",
            String => "STRING",
            Number => "NUMBER",
            True => "TRUE",
            False => "FALSE",
            Nil => "NIL",
            Identifier => "IDENTIFIER",
            Else => "ELSE",
            ElseIf => "ELSEIF",
            For => "FOR",
            Fn => "FN",
            In => "IN",
            If => "IF",
            Import => "IMPORT",
            Print => "PRINT",
            Return => "RETURN",
            Var => "VAR",
            While => "WHILE",
            End => "END",
            Indent => "INDENT",
            Dedent => "DEDENT",
            Eof => "EOF",
        }
    }

    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS.get(text).copied()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
