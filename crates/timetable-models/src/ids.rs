//! Strongly-typed ID newtypes for schedule entities.
//!
//! Every reference table uses a `SERIAL` primary key, so each ID wraps an
//! `i32`. The newtypes keep a `GroupId` from being passed where a `SubjectId`
//! is expected.
//!
//! # Example
//!
//! ```ignore
//! use timetable_models::ids::{GroupId, SubjectId};
//!
//! fn load_group(id: GroupId) { /* ... */ }
//!
//! load_group(GroupId::new(7));      // OK
//! // load_group(SubjectId::new(7)); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Macro to define a strongly-typed integer ID newtype.
///
/// This macro generates a newtype wrapper around `i32` with all necessary
/// trait implementations for database operations, serialization, and API documentation.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = i32)]
        pub struct $name(pub i32);

        impl $name {
            #[inline]
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Get the inner integer value.
            #[inline]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            #[inline]
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            #[inline]
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i32 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i32 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i32 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i32 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i32 as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i32::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for student groups.
    GroupId
);

define_id!(
    /// Strongly-typed ID for specialties.
    SpecialtyId
);

define_id!(
    /// Strongly-typed ID for schedule rows.
    ScheduleId
);

define_id!(
    /// Strongly-typed ID for lesson time slots.
    LessonTimeId
);

define_id!(
    /// Strongly-typed ID for subjects.
    SubjectId
);

define_id!(
    /// Strongly-typed ID for teachers.
    TeacherId
);

define_id!(
    /// Strongly-typed ID for classrooms.
    ClassroomId
);

define_id!(
    /// Strongly-typed ID for buildings.
    BuildingId
);

define_id!(
    /// Strongly-typed ID for weekdays.
    WeekdayId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_into_inner() {
        let id = GroupId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_id_ordering_follows_inner_value() {
        assert!(SubjectId::new(1) < SubjectId::new(2));
    }

    #[test]
    fn test_id_debug() {
        let debug = format!("{:?}", TeacherId::new(7));
        assert_eq!(debug, "TeacherId(7)");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ClassroomId::new(305)), "305");
    }

    #[test]
    fn test_id_from_str() {
        let id: GroupId = "12".parse().unwrap();
        assert_eq!(id, GroupId::new(12));
        assert!("twelve".parse::<GroupId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&GroupId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: GroupId = serde_json::from_str("3").unwrap();
        assert_eq!(id, GroupId::new(3));
    }

    #[test]
    fn test_id_conversion_roundtrip() {
        let id: BuildingId = 9.into();
        let raw: i32 = id.into();
        assert_eq!(raw, 9);
    }
}
