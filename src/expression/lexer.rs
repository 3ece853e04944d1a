use crate::expression::error::ExprErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),
    True,
    False,
    Null,
    This,
    New,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Ellipsis,
    Question,
    Colon,

    /// Operator punctuation (arithmetic, comparison, logical, bitwise, assignment, update).
    Op(&'static str),

    Eof,
}

// Longest first: lexing takes the first prefix match.
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "==", "!=", "<=", ">=",
    "&&", "||", "??", "**", "<<", ">>", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "+", "-", "*", "/", "%", "<", ">", "!", "~", "&", "|", "^", "=",
];

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprErrorKind> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while let Some(c) = input[i..].chars().next() {
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        let start = i;

        // Number: [0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)? or .[0-9]+([eE][+-]?[0-9]+)?
        if c.is_ascii_digit() || (c == '.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            if c == '.' {
                i += 1;
            } else {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < bytes.len()
                    && bytes[i] == b'.'
                    && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
                {
                    i += 1;
                }
            }

            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }

            if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
                let e_pos = i;
                i += 1;
                if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
                    i += 1;
                }
                let exp_start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if exp_start == i {
                    return Err(ExprErrorKind::parse(
                        e_pos,
                        "invalid number exponent (expected digits)",
                    ));
                }
            }

            let v: f64 = input[start..i]
                .parse()
                .map_err(|_| ExprErrorKind::parse(start, "invalid number"))?;
            out.push(Token {
                kind: TokenKind::Number(v),
                span: Span { start, end: i },
            });
            continue;
        }

        if is_ident_start(c) {
            i += c.len_utf8();
            while let Some(ch) = input[i..].chars().next() {
                if !is_ident_continue(ch) {
                    break;
                }
                i += ch.len_utf8();
            }
            let kind = match &input[start..i] {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                "this" => TokenKind::This,
                "new" => TokenKind::New,
                s => TokenKind::Ident(s.to_owned()),
            };
            out.push(Token {
                kind,
                span: Span { start, end: i },
            });
            continue;
        }

        if c == '\'' || c == '"' {
            let (s, end) = lex_string(input, start, c)?;
            i = end;
            out.push(Token {
                kind: TokenKind::Str(s),
                span: Span { start, end },
            });
            continue;
        }

        if input[i..].starts_with("...") {
            i += 3;
            out.push(Token {
                kind: TokenKind::Ellipsis,
                span: Span { start, end: i },
            });
            continue;
        }

        if let Some(op) = OPERATORS.iter().find(|op| input[i..].starts_with(**op)) {
            i += op.len();
            out.push(Token {
                kind: TokenKind::Op(*op),
                span: Span { start, end: i },
            });
            continue;
        }

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            _ => {
                return Err(ExprErrorKind::parse(
                    start,
                    format!("unexpected character '{c}'"),
                ));
            }
        };
        i += 1;
        out.push(Token {
            kind,
            span: Span { start, end: i },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });

    Ok(out)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Lex a quoted string starting at `start` (the opening quote). Returns the decoded text and the
/// byte offset just past the closing quote.
fn lex_string(input: &str, start: usize, quote: char) -> Result<(String, usize), ExprErrorKind> {
    let body = start + quote.len_utf8();
    let mut out = String::new();
    let mut chars = input[body..].char_indices();

    while let Some((off, ch)) = chars.next() {
        let pos = body + off;
        if ch == quote {
            return Ok((out, pos + ch.len_utf8()));
        }
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            break;
        };
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'u' => {
                let code: String = chars.by_ref().take(4).map(|(_, h)| h).collect();
                let decoded = u32::from_str_radix(&code, 16)
                    .ok()
                    .filter(|_| code.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| ExprErrorKind::parse(pos, "invalid unicode escape"))?;
                out.push(decoded);
            }
            // `\'`, `\"`, `\\` and unknown escapes stand for the character itself.
            other => out.push(other),
        }
    }

    Err(ExprErrorKind::parse(start, "unterminated string literal"))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
