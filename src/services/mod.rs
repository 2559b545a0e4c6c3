pub mod analysis_service;
pub mod ats_service;
pub mod extractor_service;
pub mod student_service;
