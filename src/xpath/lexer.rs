use crate::error::{LocatorError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Slash,
    DoubleSlash,
    LBracket,
    RBracket,
    LParen,
    RParen,
    At,
    Comma,
    Pipe,
    Dot,
    DotDot,
    ColonColon,
    Star,
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Literal(String),
    Number(f64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '/' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '/'))) {
                    chars.next();
                    Token::DoubleSlash
                } else {
                    Token::Slash
                }
            }
            '[' => single(&mut chars, Token::LBracket),
            ']' => single(&mut chars, Token::RBracket),
            '(' => single(&mut chars, Token::LParen),
            ')' => single(&mut chars, Token::RParen),
            '@' => single(&mut chars, Token::At),
            ',' => single(&mut chars, Token::Comma),
            '|' => single(&mut chars, Token::Pipe),
            '*' => single(&mut chars, Token::Star),
            '=' => single(&mut chars, Token::Eq),
            '!' => {
                chars.next();
                match chars.next() {
                    Some((_, '=')) => Token::NotEq,
                    _ => return Err(LocatorError::invalid(offset, "expected '=' after '!'")),
                }
            }
            '<' | '>' => {
                chars.next();
                let or_equal = matches!(chars.peek(), Some(&(_, '=')));
                if or_equal {
                    chars.next();
                }
                match (c, or_equal) {
                    ('<', false) => Token::Lt,
                    ('<', true) => Token::Le,
                    ('>', false) => Token::Gt,
                    _ => Token::Ge,
                }
            }
            ':' => {
                chars.next();
                match chars.next() {
                    Some((_, ':')) => Token::ColonColon,
                    _ => return Err(LocatorError::invalid(offset, "unexpected ':'")),
                }
            }
            '"' | '\'' => {
                chars.next();
                let start = offset + 1;
                let mut end = None;
                for (i, ch) in chars.by_ref() {
                    if ch == c {
                        end = Some(i);
                        break;
                    }
                }
                match end {
                    Some(end) => Token::Literal(input[start..end].to_string()),
                    None => return Err(LocatorError::invalid(offset, "unterminated string literal")),
                }
            }
            '.' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '.')) => {
                        chars.next();
                        Token::DotDot
                    }
                    Some(&(_, d)) if d.is_ascii_digit() => number(input, offset, &mut chars)?,
                    _ => Token::Dot,
                }
            }
            d if d.is_ascii_digit() => number(input, offset, &mut chars)?,
            n if is_name_start(n) => {
                let mut end = offset;
                while let Some(&(i, ch)) = chars.peek() {
                    if is_name_char(ch) {
                        end = i + ch.len_utf8();
                        chars.next();
                    } else if ch == ':' {
                        // prefix:local, but not the axis separator
                        let rest = &input[i + 1..];
                        match rest.chars().next() {
                            Some(next) if is_name_start(next) => {
                                chars.next();
                                end = i + 1;
                            }
                            _ => break,
                        }
                    } else {
                        break;
                    }
                }
                Token::Name(input[offset..end].to_string())
            }
            other => {
                return Err(LocatorError::invalid(offset, format!("unexpected character '{}'", other)));
            }
        };

        tokens.push(Spanned { token, offset });
    }

    Ok(tokens)
}

fn single(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, token: Token) -> Token {
    chars.next();
    token
}

fn number(
    input: &str,
    start: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<Token> {
    let mut end = start + 1;
    while let Some(&(i, ch)) = chars.peek() {
        if ch.is_ascii_digit() || ch == '.' {
            end = i + 1;
            chars.next();
        } else {
            break;
        }
    }
    input[start..end]
        .parse::<f64>()
        .map(Token::Number)
        .map_err(|_| LocatorError::invalid(start, format!("malformed number '{}'", &input[start..end])))
}
