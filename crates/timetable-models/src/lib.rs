//! # Timetable Models
//!
//! Domain models and DTOs for the Timetable API.
//!
//! This crate provides the data structures shared by the server and the CLI:
//! database rows, domain records, response DTOs and query parameters.
//!
//! # Modules
//!
//! - [`groups`]: Student group listing
//! - [`ids`]: Strongly-typed integer IDs
//! - [`schedule`]: Lesson rows, records, group parts and the calendar response
//!
//! # Example
//!
//! ```ignore
//! use timetable_models::{DateRange, GroupPart};
//!
//! for part in GroupPart::ALL {
//!     println!("{:?}", part);
//! }
//! ```

pub mod groups;
pub mod ids;
pub mod schedule;

// Re-export commonly used types at crate root for convenience
pub use groups::GroupDto;

pub use ids::{
    BuildingId, ClassroomId, GroupId, LessonTimeId, ScheduleId, SpecialtyId, SubjectId, TeacherId,
    WeekdayId,
};

pub use schedule::{
    Building, Classroom, DateRange, GroupPart, INVALID_RANGE_MESSAGE, LessonDto, LessonPartDto,
    LessonRecord, LessonRow, LessonTime, ScheduleByDateDto, Teacher,
};
