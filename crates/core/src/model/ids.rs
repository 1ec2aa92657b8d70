use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when an identifier fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("class id must be between 1 and 12, got {0}")]
    ClassOutOfRange(u32),

    #[error("{kind} id cannot be empty")]
    Empty { kind: &'static str },

    #[error("failed to parse {kind} from {raw:?}")]
    Parse { kind: &'static str, raw: String },
}

/// Grade grouping a learner belongs to (1 to 12).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ClassId(u8);

impl ClassId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    /// Creates a new `ClassId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::ClassOutOfRange` unless `1 <= value <= 12`.
    pub fn new(value: u32) -> Result<Self, IdError> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(IdError::ClassOutOfRange(value)),
        }
    }

    /// Returns the underlying grade number
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for ClassId {
    type Error = IdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassId> for u32 {
    fn from(id: ClassId) -> Self {
        u32::from(id.0)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a non-blank string.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Empty` if the value is blank.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(IdError::Empty { kind: $kind });
                }
                Ok(Self(value))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a subject inside a class (e.g. `"c6-science"`).
    SubjectId,
    "subject"
);
string_id!(
    /// Identifier of a single lesson. Unique across the whole catalog.
    LessonId,
    "lesson"
);
string_id!(
    /// Identifier of a chapter inside a subject.
    ChapterId,
    "chapter"
);

// ─── ClassId formatting ───────────────────────────────────────────────────────

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClassId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let value = raw.parse::<u32>().map_err(|_| IdError::Parse {
            kind: "ClassId",
            raw: raw.to_string(),
        })?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_accepts_grades_one_to_twelve() {
        assert_eq!(ClassId::new(1).unwrap().value(), 1);
        assert_eq!(ClassId::new(12).unwrap().value(), 12);
        assert_eq!(ClassId::new(0), Err(IdError::ClassOutOfRange(0)));
        assert_eq!(ClassId::new(13), Err(IdError::ClassOutOfRange(13)));
        assert_eq!(ClassId::new(300), Err(IdError::ClassOutOfRange(300)));
    }

    #[test]
    fn class_id_from_str() {
        let id: ClassId = " 7 ".parse().unwrap();
        assert_eq!(id.to_string(), "7");
        assert!("seven".parse::<ClassId>().is_err());
    }

    #[test]
    fn lesson_id_rejects_blank() {
        assert!(LessonId::new("   ").is_err());
        assert_eq!(LessonId::new("L1").unwrap().as_str(), "L1");
    }

    #[test]
    fn ids_serialize_as_plain_values() {
        let lesson = LessonId::new("c6-sci-1").unwrap();
        assert_eq!(serde_json::to_string(&lesson).unwrap(), "\"c6-sci-1\"");
        let class: ClassId = serde_json::from_str("6").unwrap();
        assert_eq!(class.value(), 6);
        assert!(serde_json::from_str::<ClassId>("0").is_err());
        assert!(serde_json::from_str::<SubjectId>("\"\"").is_err());
    }

    #[test]
    fn debug_shows_kind() {
        let subject = SubjectId::new("math").unwrap();
        assert_eq!(format!("{subject:?}"), "SubjectId(\"math\")");
    }
}
