use std::{iter::Peekable, str::Chars};
use ydb_adapter_core::{Column, Error, Params, Result, ResultSet, Row, Value, truncate_long};

/// Keywords of the statements that are accepted and produce no rows.
const NO_RESULT_KEYWORDS: [&str; 9] = [
    "ALTER", "CREATE", "DECLARE", "DELETE", "DROP", "INSERT", "REPLACE", "UPDATE", "UPSERT",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(String),
    Text(String, /* utf8: */ bool),
    Param(String),
    Comma,
    Semicolon,
    Minus,
    Other(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Param(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

/// Statement understood by the memory driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `SELECT <literals> [UNION ALL SELECT <literals>]...`, one row per branch.
    Select(Vec<Vec<SelectItem>>),
    /// Accepted without effect, produces no result set.
    NoResult(String),
}

impl Statement {
    /// Parses a script: statements separated by semicolons.
    pub fn parse_script(sql: &str) -> Result<Vec<Statement>> {
        let tokens = tokenize(sql)?;
        let statements = tokens
            .split(|v| *v == Token::Semicolon)
            .filter(|v| !v.is_empty())
            .map(parse_statement)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.context(format!("While parsing:\n{}", truncate_long!(sql))))?;
        if statements.is_empty() {
            return Err(Error::msg("The statement is empty"));
        }
        Ok(statements)
    }

    pub fn evaluate(&self, params: &Params) -> Result<Option<ResultSet>> {
        let Statement::Select(branches) = self else {
            return Ok(None);
        };
        let mut columns: Option<Vec<Column>> = None;
        let mut rows = Vec::with_capacity(branches.len());
        for items in branches {
            let row = items
                .iter()
                .map(|item| match &item.expr {
                    Expr::Literal(value) => Ok(value.clone()),
                    Expr::Param(name) => params
                        .get(name)
                        .cloned()
                        .ok_or_else(|| Error::msg(format!("Parameter `{}` is not declared", name))),
                })
                .collect::<Result<Row>>()?;
            match &columns {
                None => {
                    columns = Some(
                        items
                            .iter()
                            .zip(row.iter())
                            .enumerate()
                            .map(|(i, (item, value))| {
                                Column::new(
                                    item.alias.clone().unwrap_or_else(|| format!("column{}", i)),
                                    value.type_name(),
                                )
                            })
                            .collect(),
                    )
                }
                Some(columns) if columns.len() != row.len() => {
                    return Err(Error::msg(format!(
                        "Every UNION ALL branch must have {} columns, found {}",
                        columns.len(),
                        row.len()
                    )));
                }
                Some(..) => {}
            }
            rows.push(row);
        }
        Ok(Some(ResultSet::new(columns.unwrap_or_default(), rows)))
    }
}

fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let mut result = Vec::new();
    let mut chars = sql.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '-' => {
                chars.next();
                if chars.peek() == Some(&'-') {
                    while chars.next_if(|v| *v != '\n').is_some() {}
                } else {
                    result.push(Token::Minus);
                }
            }
            '\'' | '"' => {
                chars.next();
                let text = take_quoted(&mut chars, c)?;
                let utf8 = chars.next_if(|v| v.eq_ignore_ascii_case(&'u')).is_some();
                result.push(Token::Text(text, utf8));
            }
            '$' => {
                chars.next();
                let name = take_word(&mut chars);
                if name.is_empty() {
                    return Err(Error::msg("Expected a parameter name after `$`"));
                }
                result.push(Token::Param(format!("${}", name)));
            }
            c if c.is_ascii_digit() => {
                let mut number = String::new();
                while let Some(v) = chars.next_if(|v| v.is_ascii_alphanumeric() || *v == '.') {
                    number.push(v);
                }
                result.push(Token::Number(number));
            }
            c if c.is_alphabetic() || c == '_' || c == '`' => {
                if c == '`' {
                    chars.next();
                    result.push(Token::Word(take_quoted(&mut chars, '`')?));
                } else {
                    result.push(Token::Word(take_word(&mut chars)));
                }
            }
            ',' => {
                chars.next();
                result.push(Token::Comma);
            }
            ';' => {
                chars.next();
                result.push(Token::Semicolon);
            }
            _ => {
                chars.next();
                result.push(Token::Other(c));
            }
        }
    }
    Ok(result)
}

fn take_word(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();
    while let Some(v) = chars.next_if(|v| v.is_alphanumeric() || *v == '_') {
        word.push(v);
    }
    word
}

fn take_quoted(chars: &mut Peekable<Chars>, quote: char) -> Result<String> {
    let mut text = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(v) => text.push(v),
                None => break,
            },
            Some(v) if v == quote => return Ok(text),
            Some(v) => text.push(v),
            None => break,
        }
    }
    Err(Error::msg(format!("Unterminated literal starting with {}", quote)))
}

fn is_keyword(token: Option<&Token>, keyword: &str) -> bool {
    matches!(token, Some(Token::Word(v)) if v.eq_ignore_ascii_case(keyword))
}

fn parse_statement(tokens: &[Token]) -> Result<Statement> {
    let Some(Token::Word(keyword)) = tokens.first() else {
        return Err(Error::msg(format!(
            "Expected a statement keyword, found {:?}",
            tokens.first()
        )));
    };
    let keyword = keyword.to_ascii_uppercase();
    if NO_RESULT_KEYWORDS.contains(&keyword.as_str()) {
        return Ok(Statement::NoResult(keyword));
    }
    if keyword != "SELECT" {
        return Err(Error::msg(format!("Unsupported statement `{}`", keyword)));
    }
    let mut branches = Vec::new();
    let mut rest = &tokens[1..];
    loop {
        let end = rest
            .windows(2)
            .position(|v| is_keyword(v.first(), "UNION") && is_keyword(v.get(1), "ALL"))
            .unwrap_or(rest.len());
        branches.push(parse_select_items(&rest[..end])?);
        if end == rest.len() {
            break;
        }
        rest = &rest[end + 2..];
        if !is_keyword(rest.first(), "SELECT") {
            return Err(Error::msg("Expected SELECT after UNION ALL"));
        }
        rest = &rest[1..];
    }
    Ok(Statement::Select(branches))
}

fn parse_select_items(tokens: &[Token]) -> Result<Vec<SelectItem>> {
    if tokens.is_empty() {
        return Err(Error::msg("SELECT without expressions"));
    }
    tokens
        .split(|v| *v == Token::Comma)
        .map(|item| {
            let (expr, rest) = parse_expr(item)?;
            let alias = match rest {
                [] => None,
                [Token::Word(as_keyword), Token::Word(alias)]
                    if as_keyword.eq_ignore_ascii_case("AS") =>
                {
                    Some(alias.clone())
                }
                _ => {
                    return Err(Error::msg(format!(
                        "The memory driver only evaluates literal SELECT statements, unexpected {:?}",
                        rest
                    )));
                }
            };
            Ok(SelectItem { expr, alias })
        })
        .collect()
}

fn parse_expr(tokens: &[Token]) -> Result<(Expr, &[Token])> {
    let (negative, tokens) = match tokens {
        [Token::Minus, rest @ ..] => (true, rest),
        _ => (false, tokens),
    };
    let Some((first, rest)) = tokens.split_first() else {
        return Err(Error::msg("Expected an expression"));
    };
    let expr = match first {
        Token::Number(number) => Expr::Literal(parse_number(number, negative)?),
        _ if negative => return Err(Error::msg("Only numbers can be negated")),
        Token::Text(text, true) => Expr::Literal(Value::Utf8(Some(text.clone()))),
        Token::Text(text, false) => Expr::Literal(Value::Bytes(Some(text.as_bytes().into()))),
        Token::Param(name) => Expr::Param(name.clone()),
        Token::Word(word) if word.eq_ignore_ascii_case("TRUE") => {
            Expr::Literal(Value::Bool(Some(true)))
        }
        Token::Word(word) if word.eq_ignore_ascii_case("FALSE") => {
            Expr::Literal(Value::Bool(Some(false)))
        }
        Token::Word(word) if word.eq_ignore_ascii_case("NULL") => Expr::Literal(Value::Null),
        other => {
            return Err(Error::msg(format!(
                "The memory driver only evaluates literal SELECT statements, unexpected {:?}",
                other
            )));
        }
    };
    Ok((expr, rest))
}

fn parse_number(number: &str, negative: bool) -> Result<Value> {
    let error = || {
        Error::msg(format!(
            "Invalid numeric literal `{}{}`",
            if negative { "-" } else { "" },
            number
        ))
    };
    let split = number
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(number.len());
    let (digits, suffix) = number.split_at(split);
    let suffix = suffix.to_ascii_lowercase();
    if digits.contains('.') {
        let value = digits.parse::<f64>().map_err(|_| error())?;
        let value = if negative { -value } else { value };
        return match suffix.as_str() {
            "" => Ok(Value::Double(Some(value))),
            "f" => Ok(Value::Float(Some(value as f32))),
            _ => Err(error()),
        };
    }
    let magnitude = digits.parse::<i128>().map_err(|_| error())?;
    let value = if negative { -magnitude } else { magnitude };
    Ok(match suffix.as_str() {
        "" => match i32::try_from(value) {
            Ok(v) => Value::Int32(Some(v)),
            Err(..) => Value::Int64(Some(i64::try_from(value).map_err(|_| error())?)),
        },
        "t" => Value::Int8(Some(i8::try_from(value).map_err(|_| error())?)),
        "s" => Value::Int16(Some(i16::try_from(value).map_err(|_| error())?)),
        "l" => Value::Int64(Some(i64::try_from(value).map_err(|_| error())?)),
        "ut" => Value::Uint8(Some(u8::try_from(value).map_err(|_| error())?)),
        "us" => Value::Uint16(Some(u16::try_from(value).map_err(|_| error())?)),
        "u" => Value::Uint32(Some(u32::try_from(value).map_err(|_| error())?)),
        "ul" => Value::Uint64(Some(u64::try_from(value).map_err(|_| error())?)),
        _ => return Err(error()),
    })
}
