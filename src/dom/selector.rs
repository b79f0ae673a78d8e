//! Minimal CSS selectors: comma-separated lists of compound selectors made of
//! an optional tag, `#id`, `.class`, `[attr]`, `[attr="value"]` and
//! `[attr^="prefix"]`. Combinators are not supported.

use std::str::FromStr;

use crate::dom::Element;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Selector(Vec<Compound>);

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeMatcher {
    name: String,
    operator: Operator,
}

#[derive(Debug, Clone, PartialEq)]
enum Operator {
    Exists,
    Equals(String),
    StartsWith(String),
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        self.0.iter().any(|compound| compound.matches(element))
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        self.tag.as_deref().map_or(true, |tag| tag.eq_ignore_ascii_case(element.tag()))
            && self.id.as_deref().map_or(true, |id| element.get_id() == Some(id))
            && self.classes.iter().all(|class| element.classes.contains(class))
            && self.attributes.iter().all(|matcher| {
                match (element.attribute(&matcher.name), &matcher.operator) {
                    (None, _) => false,
                    (Some(_), Operator::Exists) => true,
                    (Some(actual), Operator::Equals(expected)) => actual == expected,
                    (Some(actual), Operator::StartsWith(prefix)) => actual.starts_with(prefix),
                }
            })
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(selectors: &str) -> Result<Self> {
        let compounds = selectors
            .split(',')
            .map(|compound| {
                Parser::new(compound.trim())
                    .parse_compound()
                    .with_context(|| format!("invalid selector `{}`", selectors))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(compounds))
    }
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let char_ = self.peek()?;
        self.position += char_.len_utf8();
        Some(char_)
    }

    fn expect(&mut self, expected: char) -> Result {
        match self.bump() {
            Some(char_) if char_ == expected => Ok(()),
            Some(char_) => bail!("expected `{}`, found `{}`", expected, char_),
            None => bail!("expected `{}`, found the end", expected),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let start = self.position;
        while matches!(self.peek(), Some(char_) if char_.is_alphanumeric() || char_ == '-' || char_ == '_')
        {
            self.bump();
        }
        if start == self.position {
            bail!("expected an identifier at {}", start);
        }
        Ok(self.input[start..self.position].to_string())
    }

    fn value(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.position;
                while !matches!(self.peek(), Some(char_) if char_ == quote) {
                    self.bump().ok_or_else(|| anyhow!("unterminated string"))?;
                }
                let value = self.input[start..self.position].to_string();
                self.bump();
                Ok(value)
            }
            _ => self.ident(),
        }
    }

    fn parse_compound(mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        if matches!(self.peek(), Some(char_) if char_.is_alphabetic()) {
            compound.tag = Some(self.ident()?);
        }
        while let Some(char_) = self.bump() {
            match char_ {
                '#' => compound.id = Some(self.ident()?),
                '.' => compound.classes.push(self.ident()?),
                '[' => {
                    let name = self.ident()?;
                    let operator = match self.bump() {
                        Some(']') => {
                            compound.attributes.push(AttributeMatcher {
                                name,
                                operator: Operator::Exists,
                            });
                            continue;
                        }
                        Some('=') => Operator::Equals(self.value()?),
                        Some('^') => {
                            self.expect('=')?;
                            Operator::StartsWith(self.value()?)
                        }
                        other => bail!("unsupported attribute operator {:?}", other),
                    };
                    self.expect(']')?;
                    compound.attributes.push(AttributeMatcher { name, operator });
                }
                other => bail!("unsupported selector syntax `{}`", other),
            }
        }
        if compound == Compound::default() {
            bail!("empty selector");
        }
        Ok(compound)
    }
}
