//! File API for OpenCode Server.
//!
//! Read files and get file status (git status) in the project directory.

mod types;

use crate::client::Client;
use crate::request::{require, ApiRequest};
use crate::Error;
use std::path::Path;

pub use types::{File, FileReadKind, FileReadResponse, FileStatus};

impl Client {
    /// Reads the file at `path`, relative to the project root.
    ///
    /// `GET /file?path=...`
    pub async fn file_read(
        &self,
        path: &str,
        directory: Option<&Path>,
    ) -> Result<FileReadResponse, Error> {
        let path = require("path", path)?;
        self.send_json(
            ApiRequest::get("/file")
                .query("path", path)
                .with_directory(directory),
        )
        .await
    }

    /// Gets git status of all changed files in the project.
    ///
    /// `GET /file/status`
    pub async fn file_status(&self, directory: Option<&Path>) -> Result<Vec<File>, Error> {
        self.send_json(ApiRequest::get("/file/status").with_directory(directory))
            .await
    }
}
