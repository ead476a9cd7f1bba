mod delete;
mod health;
mod models;
mod state;
mod uploads;

pub use delete::delete_file;
pub use health::health;
pub use models::{AppState, UploadPolicy};
pub use uploads::{upload_multiple, upload_single};
