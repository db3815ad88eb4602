pub mod app;
pub mod fake;
pub mod opcli;
pub mod r#trait;
