use crate::ast::{Type, VariableDefinition};
use crate::parser::grammar::{directive, name, value};
use crate::Parser;
use crate::TokenKind;

/// *VariableDefinitions*:
///     **(** VariableDefinition* **)**
///
/// *VariableDefinition*:
///     Variable **:** Type DefaultValue? Directives?
pub(crate) fn variable_definitions(p: &mut Parser) -> Option<Vec<VariableDefinition>> {
    p.expect(TokenKind::LParen, "expected variable definitions")?;

    let mut definitions = Vec::new();
    loop {
        match p.peek() {
            Some(TokenKind::RParen) => {
                p.pop();
                return Some(definitions);
            }
            Some(TokenKind::Dollar) => {
                p.pop();
                let name = name::name(p)?;
                p.expect(TokenKind::Colon, "expected ':' after a variable name")?;
                let ty = ty(p)?;
                let default_value = if p.at(TokenKind::Eq) {
                    p.pop();
                    Some(value::value(p)?)
                } else {
                    None
                };
                let directives = directive::directives(p)?;
                definitions.push(VariableDefinition {
                    name,
                    ty,
                    default_value,
                    directives,
                });
            }
            _ => {
                p.err("expected a variable definition");
                return None;
            }
        }
    }
}

/// *Type*:
///     NamedType | ListType | NonNullType
pub(crate) fn ty(p: &mut Parser) -> Option<Type> {
    match p.peek() {
        Some(TokenKind::LBracket) => {
            p.pop();
            let inner = ty(p)?;
            p.expect(TokenKind::RBracket, "expected ']' to close a list type")?;
            if p.at(TokenKind::Bang) {
                p.pop();
                Some(Type::NonNullList(Box::new(inner)))
            } else {
                Some(Type::List(Box::new(inner)))
            }
        }
        Some(TokenKind::Name) => {
            let name = name::name(p)?;
            if p.at(TokenKind::Bang) {
                p.pop();
                Some(Type::NonNullNamed(name))
            } else {
                Some(Type::Named(name))
            }
        }
        _ => {
            p.err("expected a type");
            None
        }
    }
}
