use crate::error::JsonResult;
use crate::value::Value;
use std::fmt::Write;

/// Serializer converts a value tree back to JSON text
///
/// Compact output has no insignificant whitespace at all. With an indent
/// string set, containers break one child per line; empty containers stay
/// `[]` / `{}` either way.
///
/// The output buffer grows through fallible reservation, so running out of
/// memory surfaces as an allocation error rather than an abort.
pub struct Serializer {
    indent_level: usize,
    indent_string: Option<String>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::compact()
    }

    pub fn compact() -> Self {
        Self {
            indent_level: 0,
            indent_string: None,
        }
    }

    pub fn pretty() -> Self {
        Self::with_indent("  ") // 2 spaces
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_level: 0,
            indent_string: Some(indent.to_string()),
        }
    }

    /// Serialize a value to JSON text
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn serialize(&mut self, value: &Value) -> JsonResult<String> {
        let mut output = String::new();
        self.indent_level = 0;
        self.serialize_value(value, &mut output)?;
        Ok(output)
    }

    fn serialize_value(&mut self, value: &Value, output: &mut String) -> JsonResult<()> {
        match value {
            Value::Null => push(output, "null"),
            Value::Bool(true) => push(output, "true"),
            Value::Bool(false) => push(output, "false"),
            Value::Number(n) => {
                // Every printed form fits in 32 bytes
                output.try_reserve(32)?;
                let _ = write!(output, "{}", n);
                Ok(())
            }
            Value::String(s) => serialize_string(s, output),
            Value::Array(elements) => {
                if elements.is_empty() {
                    return push(output, "[]");
                }
                push(output, "[")?;
                self.indent_level += 1;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        push(output, ",")?;
                    }
                    self.write_newline(output)?;
                    self.serialize_value(element, output)?;
                }
                self.indent_level -= 1;
                self.write_newline(output)?;
                push(output, "]")
            }
            Value::Object(members) => {
                if members.is_empty() {
                    return push(output, "{}");
                }
                push(output, "{")?;
                self.indent_level += 1;
                for (i, (key, member)) in members.iter().enumerate() {
                    if i > 0 {
                        push(output, ",")?;
                    }
                    self.write_newline(output)?;
                    serialize_string(key, output)?;
                    push(output, if self.indent_string.is_some() { ": " } else { ":" })?;
                    self.serialize_value(member, output)?;
                }
                self.indent_level -= 1;
                self.write_newline(output)?;
                push(output, "}")
            }
        }
    }

    fn write_newline(&self, output: &mut String) -> JsonResult<()> {
        let Some(indent) = &self.indent_string else {
            return Ok(());
        };
        push(output, "\n")?;
        for _ in 0..self.indent_level {
            push(output, indent)?;
        }
        Ok(())
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn push(output: &mut String, text: &str) -> JsonResult<()> {
    output.try_reserve(text.len())?;
    output.push_str(text);
    Ok(())
}

/// Quote `s`, escaping quotes, backslashes and control characters.
fn serialize_string(s: &str, output: &mut String) -> JsonResult<()> {
    output.try_reserve(s.len() + 2)?;
    output.push('"');
    let mut plain_from = 0;
    for (i, c) in s.char_indices() {
        let escaped = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{8}' => "\\b",
            '\u{c}' => "\\f",
            c if c < ' ' => "",
            _ => continue,
        };
        push(output, &s[plain_from..i])?;
        if escaped.is_empty() {
            output.try_reserve(6)?;
            let _ = write!(output, "\\u{:04x}", c as u32);
        } else {
            push(output, escaped)?;
        }
        plain_from = i + c.len_utf8();
    }
    push(output, &s[plain_from..])?;
    push(output, "\"")
}

/// Serialize a value to compact JSON text
pub fn print(value: &Value) -> JsonResult<String> {
    Serializer::compact().serialize(value)
}

/// Same output as [`print`]; kept for callers that name the compact form.
pub fn print_unformatted(value: &Value) -> JsonResult<String> {
    print(value)
}

/// Serialize a value with two-space indentation
pub fn print_pretty(value: &Value) -> JsonResult<String> {
    Serializer::pretty().serialize(value)
}
