use crate::ast::Directive;
use crate::parser::grammar::{name, value};
use crate::Parser;
use crate::TokenKind;

/// *Directives*:
///     Directive*
///
/// *Directive*:
///     **@** Name Arguments?
pub(crate) fn directives(p: &mut Parser) -> Option<Vec<Directive>> {
    let mut directives = Vec::new();

    while p.at(TokenKind::At) {
        p.pop();
        let name = name::name(p)?;
        let arguments = if p.at(TokenKind::LParen) {
            value::arguments(p)?
        } else {
            Default::default()
        };
        directives.push(Directive { name, arguments });
    }

    Some(directives)
}
