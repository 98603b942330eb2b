mod common;
mod generate_test;
mod health_test;
mod plugin_flow_test;
