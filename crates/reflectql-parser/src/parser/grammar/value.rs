use crate::ast::Value;
use crate::parser::grammar::name;
use crate::Parser;
use crate::TokenKind;
use indexmap::IndexMap;

/// *Arguments*:
///     **(** Argument* **)**
///
/// *Argument*:
///     Name **:** Value
pub(crate) fn arguments(p: &mut Parser) -> Option<IndexMap<String, Value>> {
    p.expect(TokenKind::LParen, "expected an argument list")?;

    let mut arguments = IndexMap::new();
    loop {
        match p.peek() {
            Some(TokenKind::RParen) => {
                p.pop();
                return Some(arguments);
            }
            Some(TokenKind::Name) => {
                let name = name::name(p)?;
                p.expect(TokenKind::Colon, "expected ':' after an argument name")?;
                let value = value(p)?;
                arguments.insert(name, value);
            }
            _ => {
                p.err("expected an argument name");
                return None;
            }
        }
    }
}

/// *Value*:
///     Variable | IntValue | FloatValue | StringValue | BooleanValue
///     | NullValue | EnumValue | ListValue | ObjectValue
pub(crate) fn value(p: &mut Parser) -> Option<Value> {
    match p.peek() {
        Some(TokenKind::Dollar) => {
            p.pop();
            Some(Value::Variable(name::name(p)?))
        }
        Some(TokenKind::Int) => {
            let token = p.pop()?;
            match token.data().parse::<i64>() {
                Ok(int) => Some(Value::Int(int)),
                Err(_) => {
                    p.err("integer value out of range");
                    None
                }
            }
        }
        Some(TokenKind::Float) => {
            let token = p.pop()?;
            match token.data().parse::<f64>() {
                Ok(float) => Some(Value::Float(float)),
                Err(_) => {
                    p.err("invalid float value");
                    None
                }
            }
        }
        Some(TokenKind::StringValue) => {
            let token = p.pop()?;
            match string_contents(token.data()) {
                Ok(string) => Some(Value::String(string)),
                Err(message) => {
                    p.err(&message);
                    None
                }
            }
        }
        Some(TokenKind::Name) => {
            let token = p.pop()?;
            match token.data() {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                "null" => Some(Value::Null),
                enum_value => Some(Value::Enum(enum_value.to_string())),
            }
        }
        Some(TokenKind::LBracket) => {
            p.pop();
            let mut list = Vec::new();
            loop {
                if p.at(TokenKind::RBracket) {
                    p.pop();
                    return Some(Value::List(list));
                }
                if p.peek().is_none() || p.at(TokenKind::Eof) {
                    p.err("expected ']' to close a list value");
                    return None;
                }
                list.push(value(p)?);
            }
        }
        Some(TokenKind::LCurly) => {
            p.pop();
            let mut object = IndexMap::new();
            loop {
                match p.peek() {
                    Some(TokenKind::RCurly) => {
                        p.pop();
                        return Some(Value::Object(object));
                    }
                    Some(TokenKind::Name) => {
                        let name = name::name(p)?;
                        p.expect(TokenKind::Colon, "expected ':' after an object field name")?;
                        let value = value(p)?;
                        object.insert(name, value);
                    }
                    _ => {
                        p.err("expected an object field name");
                        return None;
                    }
                }
            }
        }
        _ => {
            p.err("expected a value");
            None
        }
    }
}

/// Turn the raw text of a string token into its contents: strips the quote
/// delimiters, resolves escape sequences, and de-indents block strings.
fn string_contents(data: &str) -> Result<String, String> {
    if let Some(inner) = data
        .strip_prefix("\"\"\"")
        .and_then(|rest| rest.strip_suffix("\"\"\""))
    {
        return Ok(block_string_contents(inner));
    }
    let inner = data
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| String::from("malformed string value"))?;

    let mut contents = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            contents.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => contents.push('"'),
            Some('\\') => contents.push('\\'),
            Some('/') => contents.push('/'),
            Some('b') => contents.push('\u{0008}'),
            Some('f') => contents.push('\u{000C}'),
            Some('n') => contents.push('\n'),
            Some('r') => contents.push('\r'),
            Some('t') => contents.push('\t'),
            Some('u') => contents.push(unicode_escape(&mut chars)?),
            _ => return Err(String::from("unexpected escaped character")),
        }
    }
    Ok(contents)
}

/// `\uXXXX`, with surrogate pairs combined into one scalar value.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let first = hex4(chars)?;
    if (0xD800..=0xDBFF).contains(&first) {
        if !(chars.next() == Some('\\') && chars.next() == Some('u')) {
            return Err(String::from("unpaired surrogate in unicode escape"));
        }
        let second = hex4(chars)?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(String::from("unpaired surrogate in unicode escape"));
        }
        let scalar = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
        return char::from_u32(scalar).ok_or_else(|| String::from("invalid unicode escape"));
    }
    char::from_u32(first).ok_or_else(|| String::from("invalid unicode escape"))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| String::from("invalid unicode escape"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// BlockStringValue(): strip leading/trailing blank lines and the common
/// indentation of every line after the first.
fn block_string_contents(inner: &str) -> String {
    let lines: Vec<&str> = inner.split('\n').collect();

    let mut common_indent = usize::MAX;
    for line in lines.iter().skip(1) {
        let indent = line.len() - line.trim_start().len();
        if indent < line.len() {
            common_indent = common_indent.min(indent);
        }
    }

    let mut stripped: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || common_indent == usize::MAX {
                line.to_string()
            } else {
                line.get(common_indent.min(line.len())..)
                    .unwrap_or("")
                    .to_string()
            }
        })
        .collect();

    while stripped.first().is_some_and(|l| l.trim().is_empty()) {
        stripped.remove(0);
    }
    while stripped.last().is_some_and(|l| l.trim().is_empty()) {
        stripped.pop();
    }

    stripped.join("\n").replace("\\\"\"\"", "\"\"\"")
}
