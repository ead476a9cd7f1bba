use crate::StorageError;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Put,
    Remove,
}

/// An object to write. `bucket` is always the physical bucket name.
#[derive(Debug, Clone)]
pub struct ObjectWrite {
    pub bucket: String,
    pub path: String,
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct ObjectRef {
    pub bucket: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub enum StorageRequest {
    Put(ObjectWrite),
    Remove(ObjectRef),
}

impl StorageRequest {
    pub fn operation(&self) -> Operation {
        match self {
            StorageRequest::Put(_) => Operation::Put,
            StorageRequest::Remove(_) => Operation::Remove,
        }
    }

    pub fn bucket(&self) -> &str {
        match self {
            StorageRequest::Put(write) => &write.bucket,
            StorageRequest::Remove(target) => &target.bucket,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            StorageRequest::Put(write) => &write.path,
            StorageRequest::Remove(target) => &target.path,
        }
    }
}

/// One transport able to write and/or delete objects.
///
/// The adapter owns an ordered list of these and tries them one after the
/// other; an implementation performs exactly one network attempt per call.
#[async_trait::async_trait]
pub trait StorageStrategy: Send + Sync {
    /// Short name used in logs and start-up output
    fn name(&self) -> &'static str;

    /// Whether this strategy takes part in chains for `operation`
    fn supports(&self, operation: Operation) -> bool;

    async fn attempt(&self, request: &StorageRequest) -> Result<(), StorageError>;
}
