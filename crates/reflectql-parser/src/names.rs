//! Document-level name checking.
//!
//! Operation and fragment names must each be unique within one document, and
//! an operation name collides across operation kinds as well. Anonymous
//! operations are given synthetic names of the form `unknown_<kind>_<n>`
//! so callers can target them.

use crate::ast::{Document, Fragment, Operation, OperationType};
use crate::Error;
use crate::Parser;
use indexmap::IndexMap;

/// Parse a source document and check its names in one step.
///
/// On parse errors the returned maps are empty; on name collisions the
/// colliding definitions are dropped and one error per collision is added.
/// The maps are always non-null so callers can iterate without checks.
pub fn parse_query_and_check_names(
    source: &str,
) -> (
    IndexMap<String, Fragment>,
    IndexMap<String, Operation>,
    Vec<Error>,
) {
    let (document, errors) = Parser::new(source).parse();
    if !errors.is_empty() {
        return (IndexMap::new(), IndexMap::new(), errors);
    }
    check_names(document)
}

/// Turn a parsed document into keyed fragment and operation maps,
/// reporting duplicate names.
pub fn check_names(
    document: Document,
) -> (
    IndexMap<String, Fragment>,
    IndexMap<String, Operation>,
    Vec<Error>,
) {
    let mut errors = Vec::new();

    let mut fragments = IndexMap::with_capacity(document.fragments.len());
    for fragment in document.fragments {
        if fragments.contains_key(&fragment.name) {
            errors.push(Error::new(
                format!("another fragment with the name {} already exists", fragment.name),
                fragment.name.clone(),
                0,
            ));
            continue;
        }
        fragments.insert(fragment.name.clone(), fragment);
    }

    let mut unnamed_queries = 0usize;
    let mut unnamed_mutations = 0usize;
    let mut unnamed_subscriptions = 0usize;

    let mut operations = IndexMap::with_capacity(document.operations.len());
    for operation in document.operations {
        let name = match &operation.name {
            Some(name) => name.clone(),
            None => {
                let counter = match operation.operation_type {
                    OperationType::Query => &mut unnamed_queries,
                    OperationType::Mutation => &mut unnamed_mutations,
                    OperationType::Subscription => &mut unnamed_subscriptions,
                };
                *counter += 1;
                format!("unknown_{}_{}", operation.operation_type, counter)
            }
        };
        if operations.contains_key(&name) {
            errors.push(Error::new(
                format!("another operation with the name {} already exists", name),
                name,
                0,
            ));
            continue;
        }
        operations.insert(name, operation);
    }

    (fragments, operations, errors)
}
