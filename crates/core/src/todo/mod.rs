mod error;
mod operations;
mod requests;
mod types;

pub use error::TodoError;
pub use operations::{validate_create_request, MIN_DESCRIPTION_LENGTH};
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{NewTodo, Todo};
