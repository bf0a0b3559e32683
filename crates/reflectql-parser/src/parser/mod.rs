pub(crate) mod grammar;

use crate::ast;
use crate::Error;
use crate::Lexer;
use crate::Token;
use crate::TokenKind;

/// Parses executable documents into an [`ast::Document`].
///
/// Errors are accumulated rather than returned eagerly; parsing stops at the
/// first structural error and hands back whatever was parsed so far together
/// with every lexer and parser error encountered.
#[derive(Debug)]
pub struct Parser {
    /// Input tokens in *reverse* order, with insignificant tokens
    /// (whitespace, commas, comments) already stripped.
    tokens: Vec<Token>,
    /// The list of errors accumulated so far.
    errors: Vec<Error>,
    /// Set when a structural error makes further parsing pointless.
    bailed: bool,
}

impl Parser {
    /// Create a new instance of a parser given an input string.
    pub fn new(input: &str) -> Self {
        Self::with_lexer(Lexer::new(input))
    }

    /// Create a parser with a cap on the number of lexed tokens.
    pub fn with_token_limit(input: &str, limit: usize) -> Self {
        Self::with_lexer(Lexer::new(input).with_limit(limit))
    }

    fn with_lexer(lexer: Lexer<'_>) -> Self {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for item in lexer {
            match item {
                Ok(token) => {
                    if !matches!(
                        token.kind(),
                        TokenKind::Whitespace | TokenKind::Comma | TokenKind::Comment
                    ) {
                        tokens.push(token);
                    }
                }
                Err(error) => errors.push(error),
            }
        }

        tokens.reverse();

        Self {
            tokens,
            errors,
            bailed: false,
        }
    }

    /// Parse the token stream into a document.
    pub fn parse(mut self) -> (ast::Document, Vec<Error>) {
        let document = grammar::document::document(&mut self);
        (document, self.errors)
    }

    /// Peek at the kind of the next token.
    pub(crate) fn peek(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind())
    }

    /// Peek at the source text of the next token.
    pub(crate) fn peek_data(&self) -> Option<&str> {
        self.tokens.last().map(|token| token.data())
    }

    /// Check if the next token is `kind`.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Check if the next token is the given keyword name.
    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.at(TokenKind::Name) && self.peek_data() == Some(keyword)
    }

    /// Consume the next token.
    pub(crate) fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Consume the next token if it is `kind`, or record an error and bail.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Option<Token> {
        if self.at(kind) {
            self.pop()
        } else {
            self.err(message);
            None
        }
    }

    /// Record a parser error at the current token and stop making progress.
    pub(crate) fn err(&mut self, message: &str) {
        let (data, index) = match self.tokens.last() {
            Some(token) => (token.data(), token.index()),
            None => ("EOF", 0),
        };
        self.errors.push(Error::new(message, data, index));
        self.bailed = true;
    }

    pub(crate) fn bailed(&self) -> bool {
        self.bailed
    }
}
