use crate::ast::{Field, FragmentSpread, InlineFragment, Selection};
use crate::parser::grammar::{directive, fragment, name, value};
use crate::Parser;
use crate::TokenKind;

/// *SelectionSet*:
///     **{** Selection* **}**
///
/// The grammar requires at least one selection; an empty set is accepted here
/// so the executor can report the selection-requirement mismatch with type
/// information the parser does not have.
pub(crate) fn selection_set(p: &mut Parser) -> Option<Vec<Selection>> {
    p.expect(TokenKind::LCurly, "expected a selection set")?;

    let mut selections = Vec::new();
    loop {
        match p.peek() {
            Some(TokenKind::RCurly) => {
                p.pop();
                return Some(selections);
            }
            Some(TokenKind::Spread) => {
                p.pop();
                selections.push(fragment_spread_or_inline_fragment(p)?);
            }
            Some(TokenKind::Name) => selections.push(Selection::Field(field(p)?)),
            _ => {
                p.err("expected a field, a fragment spread or an inline fragment");
                return None;
            }
        }
    }
}

/// *Field*:
///     Alias? Name Arguments? Directives? SelectionSet?
fn field(p: &mut Parser) -> Option<Field> {
    let mut alias = None;
    let mut name = name::name(p)?;

    if p.at(TokenKind::Colon) {
        p.pop();
        alias = Some(name);
        name = name::name(p)?;
    }

    let arguments = if p.at(TokenKind::LParen) {
        value::arguments(p)?
    } else {
        Default::default()
    };

    let directives = directive::directives(p)?;

    let selection_set = if p.at(TokenKind::LCurly) {
        selection_set(p)?
    } else {
        Vec::new()
    };

    Some(Field {
        alias,
        name,
        arguments,
        directives,
        selection_set,
    })
}

/// *FragmentSpread*:
///     **...** FragmentName Directives?
///
/// *InlineFragment*:
///     **...** TypeCondition? Directives? SelectionSet
///
/// The leading spread token has already been consumed.
fn fragment_spread_or_inline_fragment(p: &mut Parser) -> Option<Selection> {
    match p.peek() {
        Some(TokenKind::Name) if p.peek_data() == Some("on") => {
            let type_condition = fragment::type_condition(p)?;
            let directives = directive::directives(p)?;
            let selection_set = selection_set(p)?;
            Some(Selection::InlineFragment(InlineFragment {
                type_condition: Some(type_condition),
                directives,
                selection_set,
            }))
        }
        Some(TokenKind::Name) => {
            let fragment_name = fragment::fragment_name(p)?;
            let directives = directive::directives(p)?;
            Some(Selection::FragmentSpread(FragmentSpread {
                fragment_name,
                directives,
            }))
        }
        Some(TokenKind::LCurly) | Some(TokenKind::At) => {
            let directives = directive::directives(p)?;
            let selection_set = selection_set(p)?;
            Some(Selection::InlineFragment(InlineFragment {
                type_condition: None,
                directives,
                selection_set,
            }))
        }
        _ => {
            p.err("expected a fragment name, a type condition or a selection set");
            None
        }
    }
}
