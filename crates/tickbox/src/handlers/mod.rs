pub mod error;
pub mod health;
pub mod response;
pub mod todos;

pub use error::AppError;
