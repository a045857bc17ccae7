//! Distinguished names.
//!
//! A [`Dn`] keeps the string the caller supplied alongside a normalized form
//! used for equality. Parsing follows the RFC 4514 string representation:
//! RDNs separated by `,`, multi-valued RDNs joined with `+`, and `\` escaping
//! special characters.

use crate::error::{DirectoryError, DirectoryResult};
use crate::schema::{MatchingRule, SchemaRegistry};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One `type=value` pair of an RDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ava {
    attribute: String,
    value: String,
    normalized: String,
}

impl Ava {
    /// Attribute type as written by the caller.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Unescaped value as written by the caller.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Normalized `type=value` form.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// A relative distinguished name: one or more AVAs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    avas: Vec<Ava>,
}

impl Rdn {
    pub fn avas(&self) -> &[Ava] {
        &self.avas
    }

    /// Normalized form, AVAs sorted so that `a=1+b=2` equals `b=2+a=1`.
    fn normalized(&self) -> String {
        let mut parts: Vec<&str> = self.avas.iter().map(|ava| ava.normalized()).collect();
        parts.sort_unstable();
        parts.join("+")
    }
}

/// A distinguished name.
///
/// Equality and hashing use the normalized form; [`fmt::Display`] renders the
/// user-provided form.
#[derive(Debug, Clone)]
pub struct Dn {
    up_name: String,
    rdns: Vec<Rdn>,
    normalized: String,
}

impl Dn {
    /// Parse a DN from its string representation.
    ///
    /// An empty or blank string yields the root DN.
    pub fn new(name: &str) -> DirectoryResult<Self> {
        let rdns = parse_rdns(name)?;
        let normalized = join_normalized(&rdns);
        Ok(Self {
            up_name: name.trim().to_string(),
            rdns,
            normalized,
        })
    }

    /// The empty DN naming the root of the tree.
    pub fn root() -> Self {
        Self {
            up_name: String::new(),
            rdns: Vec::new(),
            normalized: String::new(),
        }
    }

    /// The name exactly as supplied.
    pub fn up_name(&self) -> &str {
        &self.up_name
    }

    /// The normalized form used for comparison.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// RDNs from the leaf upward.
    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// The leftmost RDN, absent for the root DN.
    pub fn rdn(&self) -> Option<&Rdn> {
        self.rdns.first()
    }

    pub fn size(&self) -> usize {
        self.rdns.len()
    }

    pub fn is_root(&self) -> bool {
        self.rdns.is_empty()
    }

    /// The DN with its leftmost RDN removed. The root has no parent.
    pub fn parent(&self) -> Option<Dn> {
        if self.is_root() {
            return None;
        }
        let rdns = self.rdns[1..].to_vec();
        let up_name = split_unescaped(&self.up_name, ',')
            .into_iter()
            .skip(1)
            .collect::<Vec<_>>()
            .join(",");
        let normalized = join_normalized(&rdns);
        Some(Self {
            up_name: up_name.trim().to_string(),
            rdns,
            normalized,
        })
    }

    /// Whether this DN lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Dn) -> bool {
        if self.rdns.len() <= ancestor.rdns.len() {
            return false;
        }
        let offset = self.rdns.len() - ancestor.rdns.len();
        self.rdns[offset..]
            .iter()
            .zip(&ancestor.rdns)
            .all(|(a, b)| a.normalized() == b.normalized())
    }

    /// Re-normalize every AVA against the schema: attribute types become OIDs
    /// and values go through their type's equality rule.
    ///
    /// Fails with `NoSuchAttribute` when an RDN names an unknown type.
    pub fn normalize_with(&self, registry: &SchemaRegistry) -> DirectoryResult<Dn> {
        let mut rdns = self.rdns.clone();
        for rdn in &mut rdns {
            for ava in &mut rdn.avas {
                let attribute_type = registry.lookup(&ava.attribute)?;
                let value = attribute_type
                    .equality()
                    .and_then(MatchingRule::from_id)
                    .and_then(|rule| rule.normalize_text(&ava.value).ok())
                    .unwrap_or_else(|| ava.value.clone());
                ava.normalized = format!("{}={}", attribute_type.oid(), escape(&value));
            }
        }
        let normalized = join_normalized(&rdns);
        Ok(Self {
            up_name: self.up_name.clone(),
            rdns,
            normalized,
        })
    }
}

impl Default for Dn {
    fn default() -> Self {
        Self::root()
    }
}

impl PartialEq for Dn {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Dn {}

impl Hash for Dn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.up_name)
    }
}

impl TryFrom<&str> for Dn {
    type Error = DirectoryError;

    fn try_from(value: &str) -> DirectoryResult<Self> {
        Self::new(value)
    }
}

impl std::str::FromStr for Dn {
    type Err = DirectoryError;

    fn from_str(s: &str) -> DirectoryResult<Self> {
        Self::new(s)
    }
}

fn join_normalized(rdns: &[Rdn]) -> String {
    rdns.iter().map(Rdn::normalized).collect::<Vec<_>>().join(",")
}

fn parse_rdns(name: &str) -> DirectoryResult<Vec<Rdn>> {
    if name.trim().is_empty() {
        return Ok(Vec::new());
    }
    if name.trim_end().ends_with('\\') {
        return Err(DirectoryError::invalid_dn(name, "dangling escape"));
    }

    split_unescaped(name, ',')
        .into_iter()
        .map(|rdn| {
            let avas = split_unescaped(rdn, '+')
                .into_iter()
                .map(|ava| parse_ava(name, ava))
                .collect::<DirectoryResult<Vec<_>>>()?;
            Ok(Rdn { avas })
        })
        .collect()
}

fn parse_ava(dn: &str, ava: &str) -> DirectoryResult<Ava> {
    let parts = split_unescaped(ava, '=');
    let (attribute, raw_value) = match parts.split_first() {
        Some((attribute, rest)) if !rest.is_empty() => (attribute.trim(), ava[attribute.len() + 1..].trim()),
        _ => return Err(DirectoryError::invalid_dn(dn, format!("'{}' is not type=value", ava.trim()))),
    };
    if attribute.is_empty() {
        return Err(DirectoryError::invalid_dn(dn, "empty attribute type"));
    }

    let value = unescape(raw_value);
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let normalized = format!(
        "{}={}",
        attribute.to_ascii_lowercase(),
        escape(&collapsed.to_lowercase())
    );
    Ok(Ava {
        attribute: attribute.to_string(),
        value,
        normalized,
    })
}

/// Split on `separator` wherever it is not escaped with a backslash.
fn split_unescaped(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == separator => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ',' | '+' | '=' | '\\' | '"' | '<' | '>' | ';') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
