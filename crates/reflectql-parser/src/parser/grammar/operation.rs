use crate::ast::{Operation, OperationType};
use crate::parser::grammar::{directive, name, selection, variable};
use crate::Parser;
use crate::TokenKind;

/// *OperationDefinition*:
///     OperationType Name? VariableDefinitions? Directives? SelectionSet
///     SelectionSet
pub(crate) fn operation_definition(p: &mut Parser) -> Option<Operation> {
    if p.at(TokenKind::LCurly) {
        // anonymous query shorthand
        return Some(Operation {
            operation_type: OperationType::Query,
            name: None,
            variables: Vec::new(),
            directives: Vec::new(),
            selection_set: selection::selection_set(p)?,
        });
    }

    let operation_type = operation_type(p)?;

    let name = if p.at(TokenKind::Name) {
        Some(name::name(p)?)
    } else {
        None
    };

    let variables = if p.at(TokenKind::LParen) {
        variable::variable_definitions(p)?
    } else {
        Vec::new()
    };

    let directives = directive::directives(p)?;

    Some(Operation {
        operation_type,
        name,
        variables,
        directives,
        selection_set: selection::selection_set(p)?,
    })
}

/// *OperationType*: one of
///     **query**    **mutation**    **subscription**
fn operation_type(p: &mut Parser) -> Option<OperationType> {
    let operation_type = if p.at_keyword("query") {
        OperationType::Query
    } else if p.at_keyword("mutation") {
        OperationType::Mutation
    } else if p.at_keyword("subscription") {
        OperationType::Subscription
    } else {
        p.err("expected either a 'mutation', a 'query', or a 'subscription'");
        return None;
    };
    p.pop();
    Some(operation_type)
}
