use crate::ast::Document;
use crate::parser::grammar::{fragment, operation};
use crate::Parser;
use crate::TokenKind;

/// *Document*:
///     Definition*
///
/// Only executable definitions are accepted: operation definitions (including
/// the selection-set shorthand) and fragment definitions.
pub(crate) fn document(p: &mut Parser) -> Document {
    let mut document = Document::default();

    loop {
        match p.peek() {
            None | Some(TokenKind::Eof) => break,
            Some(TokenKind::LCurly) => match operation::operation_definition(p) {
                Some(op) => document.operations.push(op),
                None => break,
            },
            Some(TokenKind::Name)
                if p.at_keyword("query")
                    || p.at_keyword("mutation")
                    || p.at_keyword("subscription") =>
            {
                match operation::operation_definition(p) {
                    Some(op) => document.operations.push(op),
                    None => break,
                }
            }
            Some(TokenKind::Name) if p.at_keyword("fragment") => {
                match fragment::fragment_definition(p) {
                    Some(fragment) => document.fragments.push(fragment),
                    None => break,
                }
            }
            _ => {
                p.err("expected an operation or a fragment definition");
                break;
            }
        }
        if p.bailed() {
            break;
        }
    }

    document
}
