mod token;
mod token_kind;

use crate::Error;
use crate::LimitTracker;
use std::iter::Peekable;
use std::str::Chars;

pub use token::Token;
pub use token_kind::TokenKind;

/// Turns GraphQL source text into a token stream.
///
/// The lexer is an iterator over `Result<Token, Error>`; insignificant
/// tokens (whitespace, commas, comments) are produced so that the parser can
/// decide what to skip.
///
/// ```rust
/// use reflectql_parser::Lexer;
///
/// let query = "
/// {
///     todo(id: \"1\") {
///         title
///     }
/// }
/// ";
/// let (tokens, errors) = Lexer::new(query).lex();
/// assert_eq!(errors.len(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    index: usize,
    finished: bool,
    limit: Option<LimitTracker>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for a GraphQL source text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: 0,
            finished: false,
            limit: None,
        }
    }

    /// Abort lexing with an error after `limit` tokens have been produced.
    ///
    /// Bounds the work an adversarial document can cause before the parser
    /// even runs.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(LimitTracker::new(limit));
        self
    }

    /// Lex the full source text, consuming the lexer.
    pub fn lex(self) -> (Vec<Token>, Vec<Error>) {
        let mut tokens = vec![];
        let mut errors = vec![];

        for item in self {
            match item {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }

        (tokens, errors)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.input.is_empty() {
            let mut eof = Token::new(TokenKind::Eof, String::from("EOF"));
            eof.index = self.index;

            self.finished = true;
            return Some(Ok(eof));
        }

        if let Some(limit) = &mut self.limit {
            limit.consume();
            if limit.limited() {
                self.finished = true;
                return Some(Err(Error::new(
                    "token limit reached, aborting lexing",
                    "",
                    self.index,
                )));
            }
        }

        let mut chars = self.input.chars().peekable();
        match scan_token(&mut chars) {
            Ok((kind, data)) => {
                let mut token = Token::new(kind, data);
                token.index = self.index;

                self.index += token.data.len();
                self.input = &self.input[token.data.len()..];
                Some(Ok(token))
            }
            Err(scan) => {
                let consumed = scan.data.len();
                if consumed == 0 {
                    self.finished = true;
                }
                let error = Error::new(scan.message, scan.data, self.index);

                self.index += consumed;
                self.input = &self.input[consumed..];
                Some(Err(error))
            }
        }
    }
}

type Scan<'a> = Peekable<Chars<'a>>;

/// A failed scan: the message plus exactly the source text that was
/// consumed, so the caller can keep its byte offsets straight.
struct ScanError {
    message: String,
    data: String,
}

impl ScanError {
    fn new(message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
        }
    }
}

fn scan_token(chars: &mut Scan<'_>) -> Result<(TokenKind, String), ScanError> {
    let Some(first) = chars.next() else {
        return Err(ScanError::new("unexpected end of input", ""));
    };

    match first {
        '"' => scan_string(chars),
        '#' => scan_comment(chars),
        '.' => scan_spread(chars),
        c if is_whitespace(c) => scan_whitespace(chars, c),
        c if is_ident_char(c) => scan_name(chars, c),
        c @ '-' => scan_number(chars, c),
        c if is_digit_char(c) => scan_number(chars, c),
        '!' => Ok((TokenKind::Bang, first.into())),
        '$' => Ok((TokenKind::Dollar, first.into())),
        '(' => Ok((TokenKind::LParen, first.into())),
        ')' => Ok((TokenKind::RParen, first.into())),
        ':' => Ok((TokenKind::Colon, first.into())),
        ',' => Ok((TokenKind::Comma, first.into())),
        '=' => Ok((TokenKind::Eq, first.into())),
        '@' => Ok((TokenKind::At, first.into())),
        '[' => Ok((TokenKind::LBracket, first.into())),
        ']' => Ok((TokenKind::RBracket, first.into())),
        '{' => Ok((TokenKind::LCurly, first.into())),
        '}' => Ok((TokenKind::RCurly, first.into())),
        c => Err(ScanError::new("unexpected character", c.to_string())),
    }
}

/// The opening `"` has been consumed. Decides between the empty string,
/// a block string, and an ordinary string.
fn scan_string(chars: &mut Scan<'_>) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::from('"');

    if chars.peek() == Some(&'"') {
        buf.push('"');
        chars.next();
        if chars.peek() == Some(&'"') {
            buf.push('"');
            chars.next();
            return scan_block_string(chars, buf);
        }
        // the empty string
        return Ok((TokenKind::StringValue, buf));
    }

    let mut pending: Option<&'static str> = None;
    let mut was_backslash = false;
    let mut terminated = false;
    for c in chars.by_ref() {
        if was_backslash && !is_escaped_char(c) && c != 'u' && pending.is_none() {
            pending = Some("unexpected escaped character");
        }
        buf.push(c);
        if c == '"' && !was_backslash {
            terminated = true;
            break;
        }
        if is_line_terminator(c) && pending.is_none() {
            pending = Some("unexpected line terminator");
        }
        was_backslash = c == '\\' && !was_backslash;
    }

    if !terminated {
        // the loop ran to the end of input, so the whole tail is in `buf`
        return Err(ScanError::new("unterminated string value", buf));
    }
    if let Some(message) = pending {
        return Err(ScanError::new(message, buf));
    }
    Ok((TokenKind::StringValue, buf))
}

/// `buf` holds the opening `"""`. Runs of three unescaped quotes close the
/// string; `\"""` does not.
fn scan_block_string(chars: &mut Scan<'_>, mut buf: String) -> Result<(TokenKind, String), ScanError> {
    let mut quotes = 0;
    let mut was_backslash = false;
    for c in chars.by_ref() {
        buf.push(c);
        if c == '"' && !was_backslash {
            quotes += 1;
            if quotes == 3 {
                return Ok((TokenKind::StringValue, buf));
            }
        } else {
            quotes = 0;
        }
        was_backslash = c == '\\' && !was_backslash;
    }

    Err(ScanError::new("unterminated block string value", buf))
}

fn scan_comment(chars: &mut Scan<'_>) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::from('#');

    while let Some(&c) = chars.peek() {
        if is_line_terminator(c) {
            break;
        }
        buf.push(c);
        chars.next();
    }

    Ok((TokenKind::Comment, buf))
}

fn scan_spread(chars: &mut Scan<'_>) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::from('.');

    for _ in 0..2 {
        if chars.peek() == Some(&'.') {
            buf.push('.');
            chars.next();
        } else {
            return Err(ScanError::new("unterminated spread operator", buf));
        }
    }

    Ok((TokenKind::Spread, buf))
}

fn scan_whitespace(chars: &mut Scan<'_>, first: char) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::new();
    buf.push(first);

    while let Some(&c) = chars.peek() {
        if !is_whitespace(c) {
            break;
        }
        buf.push(c);
        chars.next();
    }

    Ok((TokenKind::Whitespace, buf))
}

fn scan_name(chars: &mut Scan<'_>, first: char) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::new();
    buf.push(first);

    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) && !is_digit_char(c) {
            break;
        }
        buf.push(c);
        chars.next();
    }

    Ok((TokenKind::Name, buf))
}

fn scan_number(chars: &mut Scan<'_>, first: char) -> Result<(TokenKind, String), ScanError> {
    let mut buf = String::new();
    buf.push(first);

    let mut pending: Option<String> = None;
    let mut has_exponent = false;
    let mut has_fractional = false;
    let mut has_digit = is_digit_char(first);

    while let Some(&c) = chars.peek() {
        match c {
            'e' | 'E' => {
                buf.push(c);
                chars.next();
                if (!has_digit || has_exponent) && pending.is_none() {
                    pending = Some(format!("unexpected character `{c}` in a number"));
                }
                has_exponent = true;
                if let Some(&sign) = chars.peek() {
                    if sign == '+' || sign == '-' {
                        buf.push(sign);
                        chars.next();
                    }
                }
            }
            '.' => {
                buf.push(c);
                chars.next();
                if (!has_digit || has_fractional || has_exponent) && pending.is_none() {
                    pending = Some(String::from("unexpected character `.` in a number"));
                }
                has_fractional = true;
            }
            c if is_digit_char(c) => {
                buf.push(c);
                chars.next();
                has_digit = true;
            }
            _ => break,
        }
    }

    if !has_digit && pending.is_none() {
        pending = Some(String::from("expected a digit in a number"));
    }
    if let Some(message) = pending {
        return Err(ScanError::new(message, buf));
    }

    if has_exponent || has_fractional {
        Ok((TokenKind::Float, buf))
    } else {
        Ok((TokenKind::Int, buf))
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000D}' // \r
        | '\u{0020}' // space
        | '\u{FEFF}' // Unicode BOM
    )
}

fn is_ident_char(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit()
}

// EscapedCharacter :: one of
//     "  \  /  b  f  n  r  t
fn is_escaped_char(c: char) -> bool {
    matches!(c, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(input).lex();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens
            .into_iter()
            .map(|t| t.kind())
            .filter(|k| {
                !matches!(
                    k,
                    TokenKind::Whitespace | TokenKind::Comma | TokenKind::Comment
                )
            })
            .collect()
    }

    #[test]
    fn punctuators_and_names() {
        assert_eq!(
            kinds("{ todo (id: $x) @skip ... }"),
            vec![
                TokenKind::LCurly,
                TokenKind::Name,
                TokenKind::LParen,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Dollar,
                TokenKind::Name,
                TokenKind::RParen,
                TokenKind::At,
                TokenKind::Name,
                TokenKind::Spread,
                TokenKind::RCurly,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn ints_and_floats() {
        assert_eq!(
            kinds("1 -2 3.5 -0.5 1e3 6.0221413e23"),
            vec![
                TokenKind::Int,
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn strings() {
        let (tokens, errors) = Lexer::new(r#""" "a" "\"b\"" """block "quotes" here""""#).lex();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        let strings: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::StringValue)
            .map(|t| t.data())
            .collect();
        assert_eq!(
            strings,
            vec![
                r#""""#,
                r#""a""#,
                r#""\"b\"""#,
                r#""""block "quotes" here""""#,
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        let (_, errors) = Lexer::new(r#"{ f(s: "oops) }"#).lex();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "unterminated string value");
        assert_eq!(errors[0].index(), 7);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let (tokens, errors) = Lexer::new("# a comment\nname").lex();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind(), TokenKind::Comment);
        assert_eq!(tokens[0].data(), "# a comment");
    }

    #[test]
    fn token_limit() {
        let lexer = Lexer::new("{ a a a a a a a a a }").with_limit(5);
        let (tokens, errors) = lexer.lex();
        assert_eq!(tokens.len(), 5);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "token limit reached, aborting lexing");
    }

    #[test]
    fn unterminated_spread() {
        let (_, errors) = Lexer::new("{ ..a }").lex();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "unterminated spread operator");
    }

    #[test]
    fn bare_minus_is_not_a_number() {
        let (_, errors) = Lexer::new("{ f(n: -) }").lex();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "expected a digit in a number");
    }
}
