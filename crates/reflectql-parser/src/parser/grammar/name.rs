use crate::Parser;
use crate::TokenKind;

/// *Name*:
///     [_A-Za-z][_A-Za-z0-9]*
pub(crate) fn name(p: &mut Parser) -> Option<String> {
    let token = p.expect(TokenKind::Name, "expected a name")?;
    Some(token.data().to_string())
}
