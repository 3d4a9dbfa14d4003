pub mod api_client;
pub mod exercise;
pub mod learning;
pub mod mock_content;
pub mod progress;
pub mod validation;
