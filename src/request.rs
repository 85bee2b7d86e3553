//! Request description shared by every API module.
//!
//! API modules build an [`ApiRequest`] (method, path, query, JSON body) and hand it
//! to the client's [`Transport`](crate::transport::Transport). `with_directory`
//! attaches the optional project `directory` query parameter without each module
//! repeating the same pattern.

use crate::Error;
use reqwest::Method;
use serde::Serialize;
use std::path::Path;

/// One HTTP request, independent of how it is executed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the server base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends `directory` as a query parameter when `directory` is `Some` and UTF-8.
    pub fn with_directory(self, directory: Option<&Path>) -> Self {
        match directory.and_then(|p| p.to_str()) {
            Some(dir) => self.query("directory", dir),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// First value of the query parameter `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Fails with [`Error::MissingRequiredParameter`] when a path parameter is empty.
pub(crate) fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, Error> {
    if value.is_empty() {
        return Err(Error::MissingRequiredParameter(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn with_directory_adds_query_only_when_set() {
        let dir = PathBuf::from("/tmp/project");
        let req = ApiRequest::get("/session").with_directory(Some(&dir));
        assert_eq!(req.query_value("directory"), Some("/tmp/project"));

        let req = ApiRequest::get("/session").with_directory(None);
        assert!(req.query.is_empty());
    }

    #[test]
    fn json_body_is_serialized() {
        let req = ApiRequest::post("/session")
            .json(&serde_json::json!({ "title": "t" }))
            .unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body, Some(serde_json::json!({ "title": "t" })));
    }

    #[test]
    fn require_rejects_empty() {
        assert!(matches!(
            require("id", ""),
            Err(Error::MissingRequiredParameter("id"))
        ));
        assert_eq!(require("id", "ses_1").unwrap(), "ses_1");
    }
}
