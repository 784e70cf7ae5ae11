/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{self, ErrorKind};

const STATEMENT_KEY: &str = "statement";

/// Whether a statement allows or denies access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `"Allow"`
    Allow,

    /// `"Deny"`
    Deny,

    /// Any other value, kept verbatim
    Unknown(String),
}

impl Default for Effect {
    fn default() -> Self {
        Effect::Unknown(String::new())
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let effect = String::deserialize(deserializer)?;
        Ok(match effect.as_str() {
            "Allow" => Effect::Allow,
            "Deny" => Effect::Deny,
            _ => Effect::Unknown(effect),
        })
    }
}

/// A single value or a list of values, as allowed by the policy grammar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single value
    One(String),

    /// A list of values
    Many(Vec<String>),
}

impl OneOrMany {
    /// Iterate over the contained values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

/// The principal a statement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Principal {
    /// A bare string, e.g. `"*"`
    Literal(String),

    /// Principal type (`AWS`, `Service`, `CanonicalUser`, ...) to identifiers
    Mapped(BTreeMap<String, OneOrMany>),
}

impl Principal {
    /// True for the literal `"*"` principal.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Principal::Literal(p) if p == "*")
    }
}

/// A statement of a bucket policy.
///
/// Field names are matched case-insensitively, so `"Effect"`, `"effect"` and `"EFFECT"` are
/// all accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub struct PolicyStatement {
    /// Optional statement identifier
    pub sid: Option<String>,

    /// Allow or deny, [`Effect::Unknown`] with an empty value when the statement has none
    #[serde(default)]
    pub effect: Effect,

    /// Who the statement applies to
    pub principal: Option<Principal>,

    /// Who the statement does not apply to
    #[serde(rename = "notprincipal")]
    pub not_principal: Option<Principal>,

    /// Actions covered by the statement
    pub action: Option<OneOrMany>,

    /// Actions excluded from the statement
    #[serde(rename = "notaction")]
    pub not_action: Option<OneOrMany>,

    /// Resources covered by the statement
    pub resource: Option<OneOrMany>,

    /// Resources excluded from the statement
    #[serde(rename = "notresource")]
    pub not_resource: Option<OneOrMany>,

    /// Condition block, left uninterpreted
    pub condition: Option<Value>,
}

impl PolicyStatement {
    /// True when the statement allows access to anyone.
    pub fn is_public(&self) -> bool {
        self.effect == Effect::Allow && self.principal.as_ref().is_some_and(Principal::is_wildcard)
    }
}

/// Parse the statements out of a bucket policy document.
///
/// The document's `Statement` member may hold a single statement or a list of them.
pub fn parse_statements(document: &str) -> Result<Vec<PolicyStatement>, error::Error> {
    let document: Value = serde_json::from_str(document)?;
    let Value::Object(document) = document else {
        return Err(error::Error::new(
            ErrorKind::PolicyInvalid,
            "policy document is not a JSON object",
        ));
    };

    let statements = match lowercase_keys(document).remove(STATEMENT_KEY) {
        Some(Value::Array(statements)) => statements,
        Some(statement @ Value::Object(_)) => vec![statement],
        Some(_) => {
            return Err(error::Error::new(
                ErrorKind::PolicyInvalid,
                "`Statement` must be an object or a list of objects",
            ))
        }
        None => Vec::new(),
    };

    statements.into_iter().map(parse_statement).collect()
}

fn parse_statement(statement: Value) -> Result<PolicyStatement, error::Error> {
    match statement {
        Value::Object(fields) => Ok(serde_json::from_value(Value::Object(lowercase_keys(
            fields,
        )))?),
        _ => Err(error::Error::new(
            ErrorKind::PolicyInvalid,
            "policy statement is not a JSON object",
        )),
    }
}

fn lowercase_keys(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}

#[cfg(test)]
mod test {
    use super::{parse_statements, Effect, OneOrMany, Principal};
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_public_read_policy() {
        let statements = parse_statements(
            r#"{
                "Version": "2012-10-17",
                "Statement": [{
                    "Sid": "PublicRead",
                    "Effect": "Allow",
                    "Principal": "*",
                    "Action": ["s3:GetObject", "s3:GetObjectVersion"],
                    "Resource": "arn:aws:s3:::example-bucket/*"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(1, statements.len());
        let statement = &statements[0];
        assert_eq!(Some("PublicRead"), statement.sid.as_deref());
        assert_eq!(Effect::Allow, statement.effect);
        assert_eq!(Some(Principal::Literal("*".to_owned())), statement.principal);
        assert_eq!(
            vec!["s3:GetObject", "s3:GetObjectVersion"],
            statement.action.as_ref().unwrap().iter().collect::<Vec<_>>()
        );
        assert_eq!(
            Some(OneOrMany::One("arn:aws:s3:::example-bucket/*".to_owned())),
            statement.resource
        );
        assert!(statement.is_public());
    }

    #[test]
    fn test_field_names_are_case_insensitive() {
        let statements = parse_statements(
            r#"{"statement": {"EFFECT": "Deny", "principal": {"AWS": ["arn:aws:iam::111122223333:root"]}, "NotAction": "s3:*"}}"#,
        )
        .unwrap();

        assert_eq!(1, statements.len());
        let statement = &statements[0];
        assert_eq!(Effect::Deny, statement.effect);
        assert_eq!(Some(OneOrMany::One("s3:*".to_owned())), statement.not_action);
        match statement.principal.as_ref().unwrap() {
            Principal::Mapped(principals) => assert_eq!(
                vec!["arn:aws:iam::111122223333:root"],
                principals["AWS"].iter().collect::<Vec<_>>()
            ),
            other => panic!("unexpected principal {other:?}"),
        }
        assert!(!statement.is_public());
    }

    #[test]
    fn test_mapped_wildcard_is_not_literal_wildcard() {
        let statements =
            parse_statements(r#"{"Statement": [{"Effect": "Allow", "Principal": {"AWS": "*"}}]}"#)
                .unwrap();
        assert!(!statements[0].is_public());
    }

    #[test]
    fn test_unknown_effect_is_kept() {
        let statements =
            parse_statements(r#"{"Statement": [{"Effect": "Maybe", "Principal": "*"}]}"#).unwrap();
        assert_eq!(Effect::Unknown("Maybe".to_owned()), statements[0].effect);
        assert!(!statements[0].is_public());
    }

    #[test]
    fn test_missing_effect_is_never_public() {
        let statements = parse_statements(r#"{"Statement": [{"Principal": "*"}]}"#).unwrap();
        assert_eq!(Effect::Unknown(String::new()), statements[0].effect);
        assert!(!statements[0].is_public());
    }

    #[test]
    fn test_document_without_statements() {
        assert!(parse_statements(r#"{"Version": "2012-10-17"}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for document in [
            "not json",
            "[]",
            r#"{"Statement": "nope"}"#,
            r#"{"Statement": ["nope"]}"#,
            r#"{"Statement": [{"Principal": "*"}]}"#,
        ] {
            let err = parse_statements(document).unwrap_err();
            assert_eq!(&ErrorKind::PolicyInvalid, err.kind(), "{document}");
        }
    }
}
