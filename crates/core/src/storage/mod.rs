pub mod blobs;
pub mod format;
pub mod manager;
pub mod paths;
pub mod shared;
