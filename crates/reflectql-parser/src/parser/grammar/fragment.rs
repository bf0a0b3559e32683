use crate::ast::Fragment;
use crate::parser::grammar::{directive, name, selection};
use crate::Parser;

/// *FragmentDefinition*:
///     **fragment** FragmentName TypeCondition Directives? SelectionSet
pub(crate) fn fragment_definition(p: &mut Parser) -> Option<Fragment> {
    // the `fragment` keyword
    p.pop();

    let fragment_name = fragment_name(p)?;
    let type_condition = type_condition(p)?;
    let directives = directive::directives(p)?;
    let selection_set = selection::selection_set(p)?;

    Some(Fragment {
        name: fragment_name,
        type_condition,
        directives,
        selection_set,
    })
}

/// *FragmentName*:
///     Name *but not* **on**
pub(crate) fn fragment_name(p: &mut Parser) -> Option<String> {
    if p.peek_data() == Some("on") {
        p.err("fragment name cannot be 'on'");
        return None;
    }
    name::name(p)
}

/// *TypeCondition*:
///     **on** NamedType
pub(crate) fn type_condition(p: &mut Parser) -> Option<String> {
    if p.peek_data() != Some("on") {
        p.err("expected 'on' and a type condition");
        return None;
    }
    p.pop();
    name::name(p)
}
