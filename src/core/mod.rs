pub mod composite_id;
pub mod errors;
pub mod models;
pub mod permissions;
