use expect_test::expect;
use pretty_assertions::assert_eq;
use reflectql::{
    generate_response, impl_object_source, InputType, Obj, OutputType, Registry, RequestCtx,
    Schema, SchemaError, SchemaOptions, SourceValue,
};

#[derive(Clone, Copy, PartialEq)]
enum TodoState {
    Open = 0,
    Done = 1,
}

impl OutputType for TodoState {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.enum_type("TodoState")
    }
}

impl InputType for TodoState {
    fn reflect_input(
        registry: &mut Registry<'_>,
    ) -> Result<reflectql::Input, SchemaError> {
        registry.enum_input("TodoState")
    }
}

#[derive(Clone)]
struct Todo {
    id: String,
    title: String,
    done: bool,
    state: TodoState,
}

impl Todo {
    fn new(id: &str, title: &str, done: bool) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            done,
            state: if done { TodoState::Done } else { TodoState::Open },
        }
    }
}

impl OutputType for Todo {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.object("Todo", |obj| {
            obj.field::<String>("id")?;
            obj.field::<String>("title")?;
            obj.field::<bool>("done")?;
            obj.field::<TodoState>("state")
        })
    }
}

impl_object_source! {
    for Todo as "Todo":

    fn id(&self_) {
        Ok(SourceValue::leaf(self_.id.as_str()))
    }

    fn title(&self_) {
        Ok(SourceValue::leaf(self_.title.as_str()))
    }

    fn done(&self_) {
        Ok(SourceValue::leaf(self_.done))
    }

    fn state(&self_) {
        Ok(SourceValue::enum_value(self_.state as i64))
    }
}

struct TodoQuery {
    todos: Vec<Todo>,
}

impl OutputType for TodoQuery {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.object("TodoQuery", |obj| {
            obj.field::<Vec<Todo>>("todos")?;
            obj.method::<Option<Todo>>("todo", |method| {
                method.record(|record| record.arg::<String>("id"))
            })?;
            obj.method::<Vec<Todo>>("todosByState", |method| {
                method.record(|record| record.arg::<TodoState>("state"))
            })?;
            obj.method::<String>("greeting", |method| {
                method.ambient_ctx();
                Ok(())
            })
        })
    }
}

impl_object_source! {
    for TodoQuery as "TodoQuery":

    fn todos(&self_) {
        Ok(SourceValue::list(
            self_.todos.iter().map(|todo| SourceValue::object(todo)),
        ))
    }

    fn todo(&self_, args) {
        let id = args.get("id").and_then(|value| value.as_str());
        Ok(SourceValue::opt_object(
            self_.todos.iter().find(|todo| Some(todo.id.as_str()) == id),
        ))
    }

    fn todosByState(&self_, args) {
        let state = args.get("state").and_then(|value| value.as_i64()).unwrap_or(-1);
        Ok(SourceValue::list(
            self_
                .todos
                .iter()
                .filter(move |todo| todo.state as i64 == state)
                .map(|todo| SourceValue::object(todo)),
        ))
    }

    fn greeting(&_self, args) {
        let name = args
            .ctx()
            .and_then(|ctx| ctx.values.get("name"))
            .and_then(|value| value.as_str())
            .unwrap_or("world");
        Ok(SourceValue::leaf(format!("hello {name}")))
    }
}

struct TodoMutation;

impl OutputType for TodoMutation {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.object("TodoMutation", |obj| {
            obj.method::<Option<Todo>>("createTodo", |method| {
                method.record(|record| record.arg::<String>("title"))
            })?;
            obj.method::<bool>("fail", |_method| Ok(()))
        })
    }
}

impl_object_source! {
    for TodoMutation as "TodoMutation":

    fn createTodo(&_self, args) {
        let title = args
            .get("title")
            .and_then(|value| value.as_str())
            .unwrap_or_default();
        Ok(SourceValue::object(Todo::new("1", title, false)))
    }

    fn fail(&_self) {
        Err(reflectql::ResolveError::new("the backing store is gone"))
    }
}

fn todo_schema(todos: Vec<Todo>) -> Schema {
    let mut schema = Schema::new();
    schema
        .register_enum("TodoState", [("OPEN", 0), ("DONE", 1)])
        .unwrap();
    schema
        .register(TodoQuery { todos }, TodoMutation, SchemaOptions::default())
        .unwrap();
    schema
}

#[test]
fn empty_list_of_objects() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("{ todos }", "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        generate_response(&data, &errors),
        r#"{"data":{"todos":[]}}"#
    );
}

#[test]
fn nested_selection_over_a_list() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve("{ todos { id done } }", "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        generate_response(&data, &errors),
        r#"{"data":{"todos":[{"id":"1","done":false}]}}"#
    );
}

#[test]
fn aliases_rename_response_keys() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve(r#"{ t: todo(id: "1") { t: title } }"#, "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        generate_response(&data, &errors),
        r#"{"data":{"t":{"t":"a"}}}"#
    );
}

#[test]
fn argument_coercion_failure_nulls_the_field() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("mutation { createTodo(title: 1) }", "");
    assert_eq!(data, r#"{"createTodo":null}"#);
    assert_eq!(errors.len(), 1);
    let message = &errors[0].message;
    assert!(message.contains("expected a string"), "got: {message}");
    assert!(message.contains("property: title"), "got: {message}");
    assert!(message.contains("function: createTodo"), "got: {message}");
}

#[test]
fn fragment_spreads_inline_their_selection() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve(
        "{ todos { ...TodoId } } fragment TodoId on Todo { id }",
        "",
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        generate_response(&data, &errors),
        r#"{"data":{"todos":[{"id":"1"}]}}"#
    );
}

#[test]
fn multiple_operators_require_a_target() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("query A {} query B {}", "");
    assert_eq!(data, "{}");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "multiple operators without target");

    let (data, errors) = schema.resolve("query A {} query B {}", "B");
    assert_eq!(data, "{}");
    assert!(errors.is_empty());

    let (data, errors) = schema.resolve("query A {} query B {}", "C");
    assert_eq!(data, "{}");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("not a valid operator"));
    assert!(errors[0].message.contains("A, B"));
}

#[test]
fn unknown_fields_are_omitted_from_the_object() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve("{ todos { id nope } }", "");
    expect![[r#"{"data":{"todos":[{"id":"1"}]},"errors":[{"message":"field nope does not exist on Todo"}]}"#]]
        .assert_eq(&generate_response(&data, &errors));
}

#[test]
fn selection_requirements_are_enforced() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);

    let (data, errors) = schema.resolve("{ todos { id { x } } }", "");
    assert_eq!(data, r#"{"todos":[{}]}"#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("cannot have a selection"));

    let (data, errors) = schema.resolve(r#"{ todo(id: "1") }"#, "");
    assert_eq!(data, "{}");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("must have a selection"));
}

#[test]
fn unknown_fragments_error_and_resolve_nothing() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve("{ todos { ...Nope } }", "");
    assert_eq!(data, r#"{"todos":[{}]}"#);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "unknown fragment Nope");
}

#[test]
fn mismatched_type_conditions_skip_silently() {
    let schema = todo_schema(vec![Todo::new("1", "a", false)]);
    let (data, errors) = schema.resolve(
        "{ todos { ...Other ... on Other { id } ... on Todo { id } } } \
         fragment Other on Elsewhere { title }",
        "",
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(data, r#"{"todos":[{"id":"1"}]}"#);
}

#[test]
fn enums_serialise_as_their_value_names() {
    let schema = todo_schema(vec![Todo::new("1", "a", false), Todo::new("2", "b", true)]);
    let (data, errors) = schema.resolve("{ todos { state } }", "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(data, r#"{"todos":[{"state":"OPEN"},{"state":"DONE"}]}"#);
}

#[test]
fn enum_literals_coerce_into_arguments() {
    let schema = todo_schema(vec![Todo::new("1", "a", false), Todo::new("2", "b", true)]);
    let (data, errors) = schema.resolve("{ todosByState(state: DONE) { id } }", "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(data, r#"{"todosByState":[{"id":"2"}]}"#);

    let (data, errors) = schema.resolve("{ todosByState(state: NOPE) { id } }", "");
    assert_eq!(data, r#"{"todosByState":null}"#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .message
        .contains("unknown enum value NOPE for enum TodoState"));
}

#[test]
fn method_errors_are_recorded_and_null_the_field() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("mutation { fail }", "");
    assert_eq!(data, r#"{"fail":null}"#);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "the backing store is gone");
}

#[test]
fn ambient_ctx_reaches_methods_that_declare_it() {
    let schema = todo_schema(Vec::new());

    let (data, errors) = schema.resolve("{ greeting }", "");
    assert!(errors.is_empty());
    assert_eq!(data, r#"{"greeting":"hello world"}"#);

    let mut request = RequestCtx::default();
    request
        .values
        .insert(String::from("name"), serde_json::json!("gql"));
    let (data, errors) = schema.resolve_with_ctx("{ greeting }", "", &request);
    assert!(errors.is_empty());
    assert_eq!(data, r#"{"greeting":"hello gql"}"#);
}

#[test]
fn subscriptions_are_rejected() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("subscription { todos }", "");
    assert_eq!(data, "{}");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "subscription is not supported yet");
}

#[test]
fn parse_errors_short_circuit_execution() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("this is not a query", "");
    assert_eq!(data, "{}");
    assert_eq!(errors.len(), 1);
}

#[test]
fn empty_documents_resolve_to_an_empty_object() {
    let schema = todo_schema(Vec::new());
    let (data, errors) = schema.resolve("", "");
    assert_eq!(data, "{}");
    assert!(errors.is_empty());
}

#[test]
fn execution_is_idempotent() {
    let schema = todo_schema(vec![Todo::new("1", "a", false), Todo::new("2", "b", true)]);
    let query = "{ todos { id title done state } }";
    let (first, errors) = schema.resolve(query, "");
    assert!(errors.is_empty());
    let (second, errors) = schema.resolve(query, "");
    assert!(errors.is_empty());
    assert_eq!(first, second);
}

struct EmptyMutation;

impl OutputType for EmptyMutation {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.object("EmptyMutation", |_obj| Ok(()))
    }
}

impl_object_source! {
    for EmptyMutation as "EmptyMutation":
}

struct Node {
    name: String,
    child: Option<Box<Node>>,
}

impl Node {
    fn chain(depth: usize) -> Self {
        let mut node = Node {
            name: format!("n{depth}"),
            child: None,
        };
        for i in (1..depth).rev() {
            node = Node {
                name: format!("n{i}"),
                child: Some(Box::new(node)),
            };
        }
        node
    }
}

impl OutputType for Node {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        registry.object("Node", |obj| {
            obj.field::<String>("name")?;
            obj.field::<Option<Box<Node>>>("child")
        })
    }
}

impl_object_source! {
    for Node as "Node":

    fn name(&self_) {
        Ok(SourceValue::leaf(self_.name.as_str()))
    }

    fn child(&self_) {
        Ok(SourceValue::opt_object(self_.child.as_deref()))
    }
}

#[test]
fn recursive_types_resolve_through_the_type_registry() {
    let mut schema = Schema::new();
    schema
        .register(Node::chain(3), EmptyMutation, SchemaOptions::default())
        .unwrap();

    let (data, errors) = schema.resolve("{ name child { name child { name child } } }", "");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        r#"{"name":"n1","child":{"name":"n2","child":{"name":"n3","child":null}}}"#
    );
}

#[test]
fn max_depth_short_circuits_descent() {
    let mut schema = Schema::new();
    schema
        .register(Node::chain(6), EmptyMutation, SchemaOptions { max_depth: 3 })
        .unwrap();

    let (data, errors) = schema.resolve("{ child { child { child { name } } } }", "");
    assert_eq!(data, r#"{"child":{"child":{"child":null}}}"#);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "reached max depth");
}
