pub mod body_generator;
pub mod generate_client;
pub mod generate_handler;
pub mod health_handler;
pub mod llm_body;
pub mod random_body;
