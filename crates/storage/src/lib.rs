mod adapter;
mod aliases;
mod builder;
mod errors;
mod strategy;

pub mod managed;
pub mod signing;
pub mod strategies;

pub use adapter::{StorageAdapter, UploadResult};
pub use aliases::BucketAliases;
pub use builder::{assemble, build_adapter, build_managed_client};
pub use errors::*;
pub use managed::{ManagedStorageClient, StorageApiClient, UploadOptions};
pub use strategy::{ObjectRef, ObjectWrite, Operation, StorageRequest, StorageStrategy};

#[cfg(feature = "s3")]
pub use managed::S3SdkClient;
