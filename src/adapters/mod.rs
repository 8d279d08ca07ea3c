pub mod api_client;
pub mod health_handler;
pub mod ui_handler;
