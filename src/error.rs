//! Error types for the SiteWise building assistant.
//!
//! None of these cross the command dispatcher: the session catches them,
//! logs them, and carries on with a safe value.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a blob store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read a stored blob.
    #[error("failed to read '{key}' from '{path}': {source}")]
    Read {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a blob.
    #[error("failed to write '{key}' to '{path}': {source}")]
    Write {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The stored payload does not match the expected shape.
    #[error("stored '{key}' is not valid: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },

    /// Failed to serialize a value before writing it.
    #[error("failed to serialize '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Errors that can occur when reading an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Failed to read the image file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
