pub mod distribution_service;
pub mod document_service;
pub mod exam_service;
pub mod generation_service;
pub mod prompt_service;
