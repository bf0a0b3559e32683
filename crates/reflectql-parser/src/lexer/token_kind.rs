/// The kind of a lexed token.
///
/// Only the punctuators used by the executable grammar are recognised; SDL
/// punctuators such as `&` and `|` are unexpected-character errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Bang,
    Dollar,
    LParen,
    RParen,
    Spread,
    Colon,
    Eq,
    At,
    LBracket,
    RBracket,
    LCurly,
    RCurly,
    Name,
    Int,
    Float,
    StringValue,
    Comment,
    Whitespace,
    Comma,
    Eof,
}
