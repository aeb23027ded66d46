use std::str::FromStr;

use crate::types::{
    error::{DatabaseError, Result},
    field::FieldDef,
};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create type <name> <numFields> <pkOrdinal> <field> <type> ...`
    CreateType {
        type_name: String,
        declared_field_count: i64,
        primary_key_ordinal: usize,
        fields: Vec<FieldDef>,
    },
    /// `create record <name> <value> ...`
    CreateRecord {
        type_name: String,
        values: Vec<String>,
    },
    /// `delete [record] <name> <key>`
    Delete { type_name: String, key: String },
    /// `search [record] <name> <key>`
    Search { type_name: String, key: String },
}

impl Command {
    /// Parse a whitespace-delimited command line. Blank lines yield `None`.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let err = |details: String| DatabaseError::ParseError {
            line: line_no,
            details,
        };

        let command = match tokens.as_slice() {
            [] => return Ok(None),
            ["create", "type", type_name, count, ordinal, fields @ ..] => {
                let declared_field_count = parse_integer(count, "field count").map_err(err)?;
                let primary_key_ordinal =
                    parse_integer(ordinal, "primary key ordinal").map_err(err)?;
                let fields = FieldDef::from_flat(fields).ok_or_else(|| {
                    err(format!("field '{}' has no type", fields[fields.len() - 1]))
                })?;
                Command::CreateType {
                    type_name: type_name.to_string(),
                    declared_field_count,
                    primary_key_ordinal,
                    fields,
                }
            }
            ["create", "record", type_name, values @ ..] => Command::CreateRecord {
                type_name: type_name.to_string(),
                values: values.iter().map(|v| v.to_string()).collect(),
            },
            ["delete", rest @ ..] => {
                let (type_name, key) = keyed_target(rest).ok_or_else(|| {
                    err("expected: delete [record] <type> <key>".to_string())
                })?;
                Command::Delete { type_name, key }
            }
            ["search", rest @ ..] => {
                let (type_name, key) = keyed_target(rest).ok_or_else(|| {
                    err("expected: search [record] <type> <key>".to_string())
                })?;
                Command::Search { type_name, key }
            }
            ["create", ..] => return Err(err("expected: create type|record ...".to_string())),
            [verb, ..] => return Err(err(format!("unknown operation '{}'", verb))),
        };
        Ok(Some(command))
    }
}

fn parse_integer<T: FromStr>(token: &str, what: &str) -> std::result::Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("{} '{}' is not a valid integer", what, token))
}

/// `<type> <key>` or `record <type> <key>`.
fn keyed_target(tokens: &[&str]) -> Option<(String, String)> {
    match tokens {
        [type_name, key] | ["record", type_name, key] => {
            Some((type_name.to_string(), key.to_string()))
        }
        _ => None,
    }
}
