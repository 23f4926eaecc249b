//! JSON persistence: the document codec and the file-backed store.

pub mod codec;
mod file;

pub use file::JsonFileStore;
