//! Session API for OpenCode Server.
//!
//! Create sessions, send messages to AI assistants and read the message history.
//! Message history is decoded through the union registry; see [`Message`].

mod message;
mod types;

pub use types::*;

use crate::client::Client;
use crate::request::{require, ApiRequest};
use crate::union::UnionValue;
use crate::Error;
use std::path::Path;
use tracing::debug;

impl Client {
    /// Creates a new session, optionally in the given project directory.
    ///
    /// # Arguments
    ///
    /// * `directory` - Project directory (absolute path). Omit to use server's cwd.
    pub async fn session_create(
        &self,
        directory: Option<&Path>,
        request: &CreateSessionRequest,
    ) -> Result<Session, Error> {
        let req = ApiRequest::post("/session")
            .with_directory(directory)
            .json(request)?;
        self.send_json(req).await
    }

    /// Lists sessions.
    ///
    /// `GET /session`
    pub async fn session_list(&self, directory: Option<&Path>) -> Result<Vec<Session>, Error> {
        self.send_json(ApiRequest::get("/session").with_directory(directory))
            .await
    }

    /// Gets a session by ID.
    ///
    /// `GET /session/{sessionID}`
    pub async fn session_get(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        self.send_json(ApiRequest::get(format!("/session/{}", id)).with_directory(directory))
            .await
    }

    /// Updates session properties (e.g. title).
    ///
    /// `PATCH /session/{sessionID}`
    pub async fn session_update(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &UpdateSessionRequest,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        let req = ApiRequest::patch(format!("/session/{}", id))
            .with_directory(directory)
            .json(request)?;
        self.send_json(req).await
    }

    /// Deletes a session and all associated data.
    ///
    /// `DELETE /session/{sessionID}`
    pub async fn session_delete(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<bool, Error> {
        let id = require("id", session_id)?;
        self.send_json(ApiRequest::delete(format!("/session/{}", id)).with_directory(directory))
            .await
    }

    /// Aborts a running session.
    ///
    /// `POST /session/{sessionID}/abort`
    pub async fn session_abort(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<bool, Error> {
        let id = require("id", session_id)?;
        self.send_json(
            ApiRequest::post(format!("/session/{}/abort", id)).with_directory(directory),
        )
        .await
    }

    /// Sends a message and waits for the assistant's reply.
    ///
    /// `POST /session/{sessionID}/message`. The reply goes through the client's
    /// decoder, so its parts follow the configured registry and mode.
    pub async fn session_chat(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &SendMessageRequest,
    ) -> Result<AssistantMessage, Error> {
        let id = require("id", session_id)?;
        let req = ApiRequest::post(format!("/session/{}/message", id))
            .with_directory(directory)
            .json(request)?;
        let body = self.send(req).await?;
        let decoder = self.decoder();
        let raw = decoder.parse_raw::<Message>(&body)?;
        let reply = message::decode_message_item(decoder, raw)?;
        let role = reply.tag().unwrap_or_default().to_string();
        match reply.into_variant() {
            Message::Assistant(reply) => Ok(reply),
            _ => Err(Error::MalformedPayload {
                union: "Message",
                reason: format!("expected an assistant reply, got role `{}`", role),
            }),
        }
    }

    /// Sends a message to a session (async, returns immediately).
    ///
    /// Uses `POST /session/{id}/prompt_async`; the AI response is processed
    /// in the background. Follow it with [`Client::event_stream`].
    pub async fn session_prompt_async(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &SendMessageRequest,
    ) -> Result<(), Error> {
        let id = require("id", session_id)?;
        let req = ApiRequest::post(format!("/session/{}/prompt_async", id))
            .with_directory(directory)
            .json(request)?;
        self.send(req).await?;
        Ok(())
    }

    /// Analyzes the project and creates an `AGENTS.md` file.
    ///
    /// `POST /session/{sessionID}/init`
    pub async fn session_init(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &ModelSelection,
    ) -> Result<bool, Error> {
        let id = require("id", session_id)?;
        let req = ApiRequest::post(format!("/session/{}/init", id))
            .with_directory(directory)
            .json(request)?;
        self.send_json(req).await
    }

    /// Lists messages in a session.
    ///
    /// `GET /session/{sessionID}/message`. Each item keeps its raw JSON; unknown
    /// roles decode to [`Message::Unknown`] unless the client is strict.
    pub async fn session_messages(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Vec<UnionValue<Message>>, Error> {
        let id = require("id", session_id)?;
        let body = self
            .send(ApiRequest::get(format!("/session/{}/message", id)).with_directory(directory))
            .await?;
        message::decode_message_list(self.decoder(), &body)
    }

    /// Gets a single message.
    ///
    /// `GET /session/{sessionID}/message/{messageID}`
    pub async fn session_message(
        &self,
        session_id: &str,
        message_id: &str,
        directory: Option<&Path>,
    ) -> Result<UnionValue<Message>, Error> {
        let id = require("id", session_id)?;
        let message_id = require("messageID", message_id)?;
        let body = self
            .send(
                ApiRequest::get(format!("/session/{}/message/{}", id, message_id))
                    .with_directory(directory),
            )
            .await?;
        let decoder = self.decoder();
        let raw = decoder.parse_raw::<Message>(&body)?;
        message::decode_message_item(decoder, raw)
    }

    /// Lists child sessions.
    ///
    /// `GET /session/{sessionID}/children`
    pub async fn session_children(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Vec<Session>, Error> {
        let id = require("id", session_id)?;
        self.send_json(
            ApiRequest::get(format!("/session/{}/children", id)).with_directory(directory),
        )
        .await
    }

    /// Shares a session.
    ///
    /// `POST /session/{sessionID}/share`
    pub async fn session_share(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        self.send_json(
            ApiRequest::post(format!("/session/{}/share", id)).with_directory(directory),
        )
        .await
    }

    /// Unshares a session.
    ///
    /// `DELETE /session/{sessionID}/share`
    pub async fn session_unshare(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        self.send_json(
            ApiRequest::delete(format!("/session/{}/share", id)).with_directory(directory),
        )
        .await
    }

    /// Summarizes the session with the given model.
    ///
    /// `POST /session/{sessionID}/summarize`
    pub async fn session_summarize(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &ModelSelection,
    ) -> Result<bool, Error> {
        let id = require("id", session_id)?;
        let req = ApiRequest::post(format!("/session/{}/summarize", id))
            .with_directory(directory)
            .json(request)?;
        self.send_json(req).await
    }

    /// Reverts a message (and optionally a part).
    ///
    /// `POST /session/{sessionID}/revert`
    pub async fn session_revert(
        &self,
        session_id: &str,
        directory: Option<&Path>,
        request: &RevertRequest,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        require("messageID", &request.message_id)?;
        let req = ApiRequest::post(format!("/session/{}/revert", id))
            .with_directory(directory)
            .json(request)?;
        debug!(session_id = id, message_id = %request.message_id, "reverting message");
        self.send_json(req).await
    }

    /// Restores all reverted messages.
    ///
    /// `POST /session/{sessionID}/unrevert`
    pub async fn session_unrevert(
        &self,
        session_id: &str,
        directory: Option<&Path>,
    ) -> Result<Session, Error> {
        let id = require("id", session_id)?;
        self.send_json(
            ApiRequest::post(format!("/session/{}/unrevert", id)).with_directory(directory),
        )
        .await
    }
}
