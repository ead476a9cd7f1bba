mod form;
mod handler;
mod validator;

pub use handler::{upload_multiple, upload_single};
pub(crate) use validator::{validate_bucket, validate_object_path};
