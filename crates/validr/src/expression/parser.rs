//! Hand-written scanner/parser for schema expressions.
//!
//! Works on a `Vec<char>` with a cursor so every error can name the
//! 0-based character offset where it was detected. `&` only separates
//! modifiers at the top level: inside `"..."` or `(...)` it is ordinary
//! input.

use tracing::trace;

use super::{CallDescription, Literal, Modifiers};
use crate::foundation::SchemaError;

/// Characters that end a bareword literal.
const BARE_DELIMITERS: &[char] = &[',', '(', ')', '&', '=', '"', '\''];

/// Parses a schema expression into a [`CallDescription`].
///
/// # Examples
///
/// ```
/// use validr::expression::{Literal, parse_expression};
///
/// let call = parse_expression(r#"int(min=0,max=100)&optional"#).unwrap();
/// assert_eq!(call.name, "int");
/// assert_eq!(call.keywords["max"], Literal::Int(100));
/// assert!(call.modifiers.optional);
/// ```
pub fn parse_expression(text: &str) -> Result<CallDescription, SchemaError> {
    ExpressionParser::new(text).parse()
}

/// Cursor over the characters of one expression.
pub struct ExpressionParser {
    chars: Vec<char>,
    pos: usize,
}

impl ExpressionParser {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Parses the whole input: a call followed by zero or more modifiers.
    pub fn parse(mut self) -> Result<CallDescription, SchemaError> {
        self.skip_whitespace();
        let name = self.expect_identifier("validator name")?;
        let mut call = CallDescription::new(name);

        self.skip_whitespace();
        if self.eat('(') {
            self.parse_arguments(&mut call)?;
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('&') => {
                    self.pos += 1;
                    self.parse_modifier(&mut call.modifiers)?;
                }
                Some(c) => {
                    return Err(self.error_here(format!("unexpected character '{c}'")));
                }
            }
        }

        trace!(name = %call.name, positional = call.positional.len(), keywords = call.keywords.len(), "parsed expression");
        Ok(call)
    }

    // ------------------------------------------------------------------------
    // Call
    // ------------------------------------------------------------------------

    /// Parses `arg ("," arg)* ")"`; the opening parenthesis is consumed.
    fn parse_arguments(&mut self, call: &mut CallDescription) -> Result<(), SchemaError> {
        self.skip_whitespace();
        if self.eat(')') {
            return Ok(());
        }

        loop {
            self.skip_whitespace();
            let start = self.pos;
            if let Some(key) = self.try_keyword() {
                if call.keywords.contains_key(&key) {
                    return Err(SchemaError::syntax(
                        start,
                        format!("duplicate keyword argument '{key}'"),
                    ));
                }
                let literal = self.parse_literal()?;
                call.keywords.insert(key, literal);
            } else {
                if !call.keywords.is_empty() {
                    return Err(SchemaError::syntax(
                        start,
                        "positional argument follows keyword argument",
                    ));
                }
                let literal = self.parse_literal()?;
                call.positional.push(literal);
            }

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(c) => {
                    return Err(self.error_here(format!("expected ',' or ')', found '{c}'")));
                }
                None => return Err(self.error_here("missing closing ')'")),
            }
        }
    }

    /// Consumes `identifier "="` if present, returning the identifier.
    ///
    /// Restores the cursor when the input is not a keyword so the caller
    /// can re-read it as a literal.
    fn try_keyword(&mut self) -> Option<String> {
        let start = self.pos;
        let key = self.identifier()?;
        self.skip_whitespace();
        if self.eat('=') {
            self.skip_whitespace();
            Some(key)
        } else {
            self.pos = start;
            None
        }
    }

    // ------------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------------

    fn parse_modifier(&mut self, modifiers: &mut Modifiers) -> Result<(), SchemaError> {
        self.skip_whitespace();
        let start = self.pos;
        let keyword = self.expect_identifier("modifier")?;
        self.skip_whitespace();

        match keyword.as_str() {
            "optional" => {
                if modifiers.optional {
                    return Err(SchemaError::syntax(start, "duplicate modifier 'optional'"));
                }
                if self.peek() == Some('=') {
                    return Err(self.error_here("modifier 'optional' takes no value"));
                }
                modifiers.optional = true;
            }
            "default" => {
                if modifiers.default.is_some() {
                    return Err(SchemaError::syntax(start, "duplicate modifier 'default'"));
                }
                if !self.eat('=') {
                    return Err(self.error_here("modifier 'default' requires '=<literal>'"));
                }
                self.skip_whitespace();
                modifiers.default = Some(self.parse_literal()?);
            }
            "desc" => {
                if modifiers.desc.is_some() {
                    return Err(SchemaError::syntax(start, "duplicate modifier 'desc'"));
                }
                if !self.eat('=') {
                    return Err(self.error_here("modifier 'desc' requires '=\"...\"'"));
                }
                self.skip_whitespace();
                match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        modifiers.desc = Some(self.parse_quoted(quote)?);
                    }
                    _ => return Err(self.error_here("modifier 'desc' requires a quoted string")),
                }
            }
            other => {
                return Err(SchemaError::syntax(start, format!("unknown modifier '{other}'")));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------------

    fn parse_literal(&mut self) -> Result<Literal, SchemaError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote).map(Literal::Str),
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_whitespace() || BARE_DELIMITERS.contains(&c) {
                        break;
                    }
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.error_here(match self.peek() {
                        Some(c) => format!("expected literal, found '{c}'"),
                        None => "expected literal, found end of input".to_owned(),
                    }));
                }
                let token: String = self.chars[start..self.pos].iter().collect();
                decode_bareword(&token, start)
            }
        }
    }

    /// Parses a quoted string starting at the opening `quote`.
    fn parse_quoted(&mut self, quote: char) -> Result<String, SchemaError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(SchemaError::syntax(start, "unterminated string literal")),
                Some('\\') => match self.bump() {
                    Some(c @ ('"' | '\'' | '\\')) => out.push(c),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err(SchemaError::syntax(start, "unterminated string literal")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Scanning primitives
    // ------------------------------------------------------------------------

    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.pos += 1,
            _ => return None,
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, SchemaError> {
        self.identifier().ok_or_else(|| match self.peek() {
            Some(c) => self.error_here(format!("expected {what}, found '{c}'")),
            None => self.error_here(format!("expected {what}, found end of input")),
        })
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error_here(&self, message: impl Into<String>) -> SchemaError {
        SchemaError::syntax(self.pos, message)
    }
}

/// Decodes an unquoted token: bool, integer, float or plain string.
fn decode_bareword(token: &str, position: usize) -> Result<Literal, SchemaError> {
    match token {
        "true" => return Ok(Literal::Bool(true)),
        "false" => return Ok(Literal::Bool(false)),
        _ => {}
    }

    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return token.parse::<i64>().map(Literal::Int).map_err(|_| {
            SchemaError::syntax(position, format!("integer literal '{token}' out of range"))
        });
    }
    if is_float_token(unsigned) {
        return match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Literal::Float(value)),
            _ => Err(SchemaError::syntax(
                position,
                format!("float literal '{token}' out of range"),
            )),
        };
    }
    Ok(Literal::Str(token.to_owned()))
}

/// `digits [. digits] [e [+-] digits]` with at least one mantissa digit and
/// either a fraction point or an exponent.
fn is_float_token(token: &str) -> bool {
    let (mantissa, exponent) = match token.find(['e', 'E']) {
        Some(i) => (&token[..i], Some(&token[i + 1..])),
        None => (token, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let mantissa_ok = digits(whole)
        && fraction.is_none_or(digits)
        && (whole.len() + fraction.map_or(0, str::len)) > 0;
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && digits(e)
    });

    mantissa_ok && exponent_ok && (fraction.is_some() || exponent.is_some())
}
