pub mod health;
pub mod resume_routes;
pub mod student_routes;
