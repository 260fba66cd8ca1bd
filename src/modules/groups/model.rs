pub use timetable_models::groups::*;
