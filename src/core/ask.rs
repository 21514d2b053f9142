//! Background execution of ask round trips.
//!
//! One tokio task per submitted question; each task reports exactly one
//! completion event over the channel. Events carry the request id they were
//! spawned with so the app can drop completions that arrive after a newer
//! submission superseded them.

use tokio::sync::mpsc;

use crate::api;

#[derive(Debug, Clone)]
pub enum AskEvent {
    Answered { text: String, request_id: u64 },
    Failed { message: String, request_id: u64 },
}

impl AskEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            AskEvent::Answered { request_id, .. } => *request_id,
            AskEvent::Failed { request_id, .. } => *request_id,
        }
    }
}

pub struct AskParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub question: String,
    pub request_id: u64,
}

#[derive(Clone)]
pub struct AskService {
    tx: mpsc::UnboundedSender<AskEvent>,
}

impl AskService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AskEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AskService { tx }, rx)
    }

    /// Run one round trip in the background. The send fails only when the
    /// receiver is gone, i.e. the chat loop already exited.
    pub fn spawn_ask(&self, params: AskParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let AskParams {
                client,
                base_url,
                question,
                request_id,
            } = params;
            let event = match api::post_question(&client, &base_url, &question).await {
                Ok(text) => AskEvent::Answered { text, request_id },
                Err(message) => AskEvent::Failed {
                    message,
                    request_id,
                },
            };
            let _ = tx.send(event);
        });
    }
}
