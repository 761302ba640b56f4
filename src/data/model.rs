use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// AttributeValue – a single cell of an item record
// ---------------------------------------------------------------------------

/// A dynamically-typed attribute value as found in listing exports.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Null => write!(f, "<null>"),
        }
    }
}

impl AttributeValue {
    /// Numeric reading of the value, NaN when there is none.
    ///
    /// Strings are read like a lenient float parse: the longest numeric
    /// prefix after leading whitespace counts (`"120.5 EUR"` is 120.5) and
    /// anything else, including `"$120"`, is NaN.
    pub fn as_f64(&self) -> f64 {
        match self {
            AttributeValue::Float(v) => *v,
            AttributeValue::Integer(i) => *i as f64,
            AttributeValue::String(s) => parse_leading_f64(s),
            AttributeValue::Bool(_) | AttributeValue::Null => f64::NAN,
        }
    }

    /// Text form used for record identifiers.
    pub fn as_id(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            AttributeValue::String(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Longest prefix of `s` (after leading whitespace) that reads as a float.
fn parse_leading_f64(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    // optional exponent, only if followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Item – one record to be ranked
// ---------------------------------------------------------------------------

/// One rankable record: a stable identifier plus its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    /// Attribute columns: name → value (excludes `id`).
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Item {
    pub fn new(id: impl Into<String>, attributes: BTreeMap<String, AttributeValue>) -> Self {
        Item {
            id: id.into(),
            attributes,
        }
    }

    /// Build from a raw record. Records without a usable `id` are rejected.
    pub fn from_record(mut record: BTreeMap<String, AttributeValue>) -> Option<Self> {
        let id = record.remove("id")?.as_id()?;
        Some(Item::new(id, record))
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.attributes.get(attribute)
    }

    /// Numeric value of `attribute`, NaN when missing or non-numeric.
    pub fn numeric(&self, attribute: &str) -> f64 {
        self.get(attribute).map_or(f64::NAN, AttributeValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// ItemList – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded records with the union of their attribute names.
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    pub items: Vec<Item>,
    /// Sorted attribute names seen across all items.
    pub column_names: Vec<String>,
    /// Records dropped for lacking an id.
    pub skipped: usize,
}

impl ItemList {
    /// Keep records that carry an id; count the rest.
    pub fn from_records(records: Vec<BTreeMap<String, AttributeValue>>) -> Self {
        let total = records.len();
        let items: Vec<Item> = records.into_iter().filter_map(Item::from_record).collect();
        let skipped = total - items.len();
        if skipped > 0 {
            log::warn!("Skipped {skipped} of {total} records without an id");
        }

        let column_names: BTreeSet<String> = items
            .iter()
            .flat_map(|it| it.attributes.keys().cloned())
            .collect();

        ItemList {
            items,
            column_names: column_names.into_iter().collect(),
            skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
