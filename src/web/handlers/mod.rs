pub mod health_handler;
pub mod skill_handler;
pub mod test_handler;
