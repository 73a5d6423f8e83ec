/// A named counter extracted from one matching input line.
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A non-negative decimal count of any size.
///
/// Stored as its digits with leading zeros removed (`"0"` for zero), so a
/// longer digit string is always the larger number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Count {
    digits: String,
}

impl Count {
    /// Parse a string of ASCII digits. Returns `None` if it is empty or has
    /// any other character.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            digits: digits.to_string(),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    /// The count as a u64, if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }
}

impl From<u64> for Count {
    fn from(n: u64) -> Self {
        Self {
            digits: n.to_string(),
        }
    }
}

impl Ord for Count {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Count {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// JSON number when it fits in a u64, otherwise a string of digits.
impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.digits),
        }
    }
}

/// One `(name, count)` pair. Repeated names are kept as separate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub count: Count,
}

impl Record {
    pub fn new(name: impl Into<String>, count: Count) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    #[cfg(test)]
    pub fn of(name: impl Into<String>, count: u64) -> Self {
        Self::new(name, Count::from(count))
    }
}

/// Order by count, then by name (byte-wise).
pub fn compare(a: &Record, b: &Record) -> Ordering {
    a.count
        .cmp(&b.count)
        .then_with(|| a.name.as_str().cmp(b.name.as_str()))
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(digits: &str) -> Count {
        Count::parse(digits).unwrap()
    }

    #[test]
    fn test_compare_by_count_first() {
        let small = Record::of("Zeta", 1);
        let big = Record::of("Alpha", 2);
        assert_eq!(compare(&small, &big), Ordering::Less);
        assert_eq!(compare(&big, &small), Ordering::Greater);
    }

    #[test]
    fn test_compare_ties_broken_by_name() {
        let a = Record::of("GtkButton", 4);
        let b = Record::of("GtkWindow", 4);
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_compare_equal_records() {
        let a = Record::of("GObject", 9);
        assert_eq!(compare(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_name_is_case_sensitive() {
        // Uppercase sorts before lowercase in byte order
        let upper = Record::of("Zed", 1);
        let lower = Record::of("abc", 1);
        assert_eq!(compare(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(Record::of("GtkLabel", 12).to_string(), "GtkLabel: 12");
    }

    #[test]
    fn test_count_parse_strips_leading_zeros() {
        assert_eq!(count("007"), Count::from(7));
        assert_eq!(count("000"), Count::from(0));
        assert!(count("000").is_zero());
        assert_eq!(count("0042").to_string(), "42");
    }

    #[test]
    fn test_count_parse_rejects_non_digits() {
        assert_eq!(Count::parse(""), None);
        assert_eq!(Count::parse("12a"), None);
        assert_eq!(Count::parse("-1"), None);
    }

    #[test]
    fn test_count_ordering_numeric_not_lexical() {
        assert!(count("9") < count("10"));
        assert!(count("100") > count("99"));
        assert!(count("00010") > count("9"));
        assert_eq!(count("12").cmp(&count("012")), Ordering::Equal);
    }

    #[test]
    fn test_count_beyond_u64() {
        let huge = count("99999999999999999999999");
        assert!(huge > Count::from(u64::MAX));
        assert_eq!(huge.as_u64(), None);
        assert_eq!(huge.to_string(), "99999999999999999999999");
        assert_eq!(Count::from(u64::MAX).as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_count_serialize() {
        assert_eq!(serde_json::to_string(&Count::from(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&count("99999999999999999999999")).unwrap(),
            "\"99999999999999999999999\""
        );
    }
}
