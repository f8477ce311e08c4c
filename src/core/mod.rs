pub mod errors;
pub mod movie_manager;
pub mod services;
pub mod utils;
