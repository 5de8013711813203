use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque storage key, prefixed so rows from different tables never collide.
macro_rules! storage_key {
    ($name:ident, $prefix:expr) => {
        #[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7()))
            }

            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Numeric identifier handed out by a named sequence.
macro_rules! sequence_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

storage_key!(ParentTaskKey, "ptask");
storage_key!(TaskKey, "task");

sequence_id!(ParentId);
sequence_id!(TaskId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_have_prefix() {
        assert!(ParentTaskKey::new().as_str().starts_with("ptask_"));
        assert!(TaskKey::new().as_str().starts_with("task_"));
    }

    #[test]
    fn storage_keys_are_unique() {
        assert_ne!(TaskKey::new(), TaskKey::new());
    }

    #[test]
    fn sequence_id_parses_trimmed_numbers() {
        assert_eq!("42".parse::<TaskId>().unwrap(), TaskId::new(42));
        assert_eq!(" 7 ".parse::<ParentId>().unwrap(), ParentId::new(7));
        assert!("seven".parse::<TaskId>().is_err());
    }

    #[test]
    fn sequence_id_serializes_as_number() {
        let json = serde_json::to_string(&TaskId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
