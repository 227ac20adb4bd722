pub mod approval_code;
pub mod email;
pub mod group;
pub mod password;
pub mod registration_code;
pub mod service_result;
pub mod timetable;
pub mod user;
