pub mod exam_handler;
pub mod health_handler;

pub use exam_handler::{
    delete_exam, download_exam_document, generate_exam, get_exam, json_config, list_phases,
    preview_distribution,
};
pub use health_handler::{health_check, health_check_live, health_check_ready};
