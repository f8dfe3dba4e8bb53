// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Generic version ordering.
//!
//! Versions are split into integer, qualifier and list items. Separators
//! are `.` and `-`, and every transition between digits and letters acts
//! like a `-`. Known qualifiers are ordered
//! `alpha < beta < milestone < rc < snapshot < "" < sp`, unknown qualifiers
//! sort after all known ones, lexically.

use std::cmp::Ordering;
use std::fmt;

const QUALIFIERS: &[&str] = &["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Index of the release qualifier (`""`) in [`QUALIFIERS`].
const RELEASE_INDEX: usize = 5;

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits without leading zeros; `"0"` for zero.
    Int(String),
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    }

    fn string(value: &str, followed_by_digit: bool) -> Self {
        let value = if followed_by_digit && value.len() == 1 {
            match value {
                "a" => "alpha",
                "b" => "beta",
                "m" => "milestone",
                other => other,
            }
        } else {
            value
        };

        let value = match value {
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };

        Item::Str(value.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits == "0",
            Item::Str(value) => value.is_empty(),
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compare against another item, `None` standing for a missing item.
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(_), None) => {
                if self.is_null() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(value), None) => {
                comparable_qualifier(value).cmp(&RELEASE_INDEX.to_string())
            }
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(a), Some(Item::Str(b))) => {
                comparable_qualifier(a).cmp(&comparable_qualifier(b))
            }
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => match items.first() {
                Some(first) => first.compare(None),
                None => Ordering::Equal,
            },
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => {
                let len = left.len().max(right.len());
                for i in 0..len {
                    let ordering = match (left.get(i), right.get(i)) {
                        (Some(l), r) => l.compare(r),
                        (None, Some(r)) => r.compare(None).reverse(),
                        (None, None) => Ordering::Equal,
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            }
        }
    }

    fn push(&mut self, item: Item) {
        if let Item::List(items) = self {
            items.push(item);
        }
    }

    /// Trim trailing null items, stopping at the first non-null scalar.
    fn normalize(&mut self) {
        if let Item::List(items) = self {
            for child in items.iter_mut() {
                child.normalize();
            }
            let mut i = items.len();
            while i > 0 {
                i -= 1;
                if items[i].is_null() {
                    items.remove(i);
                } else if !matches!(items[i], Item::List(_)) {
                    break;
                }
            }
        }
    }
}

fn comparable_qualifier(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), qualifier),
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Int(digits) => write!(f, "{}", digits),
            Item::Str(value) => write!(f, "{}", value),
            Item::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        let separator = if matches!(item, Item::List(_)) { '-' } else { '.' };
                        write!(f, "{}", separator)?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// A version with a total order compatible with Maven's generic versions.
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    value: String,
    items: Item,
}

impl ComparableVersion {
    /// Parse a version string. Parsing never fails.
    pub fn new(version: &str) -> Self {
        Self {
            value: version.to_string(),
            items: parse_items(version),
        }
    }

    /// The version as it was given.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Canonical form, equal for versions that compare equal.
    pub fn canonical(&self) -> String {
        self.items.to_string()
    }
}

/// Build the item tree.
///
/// Lists are opened by `-` and by digit/letter transitions and are kept
/// on a path of child indices so the newest list can be reached from the
/// root without shared ownership.
fn parse_items(version: &str) -> Item {
    let version = version.to_lowercase();
    let chars: Vec<char> = version.chars().collect();

    let mut root = Item::List(Vec::new());
    let mut path: Vec<usize> = Vec::new();
    let mut is_digit = false;
    let mut start = 0;

    fn current<'a>(root: &'a mut Item, path: &[usize]) -> &'a mut Item {
        path.iter().fold(root, |node, &index| match node {
            Item::List(items) => &mut items[index],
            other => other,
        })
    }

    fn open_list(root: &mut Item, path: &mut Vec<usize>) {
        let list = current(root, path);
        if let Item::List(items) = list {
            items.push(Item::List(Vec::new()));
            let index = items.len() - 1;
            path.push(index);
        }
    }

    let segment = |from: usize, to: usize| -> String { chars[from..to].iter().collect() };

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '.' | '-' => {
                let item = if i == start {
                    Item::int("0")
                } else if is_digit {
                    Item::int(&segment(start, i))
                } else {
                    Item::string(&segment(start, i), false)
                };
                current(&mut root, &path).push(item);
                start = i + 1;
                if c == '-' {
                    open_list(&mut root, &mut path);
                }
            }
            c if c.is_ascii_digit() => {
                if !is_digit && i > start {
                    current(&mut root, &path).push(Item::string(&segment(start, i), true));
                    start = i;
                    open_list(&mut root, &mut path);
                }
                is_digit = true;
            }
            _ => {
                if is_digit && i > start {
                    current(&mut root, &path).push(Item::int(&segment(start, i)));
                    start = i;
                    open_list(&mut root, &mut path);
                }
                is_digit = false;
            }
        }
    }

    if chars.len() > start {
        let tail = segment(start, chars.len());
        let item = if is_digit {
            Item::int(&tail)
        } else {
            Item::string(&tail, false)
        };
        current(&mut root, &path).push(item);
    }

    root.normalize();
    root
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.items.compare(Some(&other.items))
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
