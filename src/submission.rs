use crate::{
    api::{QueryOutcome, QueryTransport},
    constants::{
        AI_ERROR_ID_PREFIX, AI_NETWORK_ERROR_ID_PREFIX, HTTP_ERROR_PREFIX, NETWORK_ERROR_PREFIX,
    },
    errors::ChatResult,
    models::Message,
    session::ChatSession,
};
use log::{debug, info, warn};

/// A question whose user message is already in the thread and whose reply
/// has not been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    question: String,
    user_message_id: String,
}

impl PendingSubmission {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn user_message_id(&self) -> &str {
        &self.user_message_id
    }

    /// Makes the one network call for this submission and turns whatever
    /// happened into the AI message to append. Never fails.
    pub async fn resolve<T>(self, transport: &T) -> Message
    where
        T: QueryTransport + ?Sized,
    {
        debug!("querying for submission {}", self.user_message_id);
        let reply = reply_from_outcome(transport.query(&self.question).await);
        info!(
            "reply {} ({}) for submission {}",
            reply.id, reply.status, self.user_message_id
        );
        reply
    }
}

/// Validates the input field and, if it holds a question, appends the user
/// message and clears the field.
///
/// Blank or whitespace-only input leaves the session untouched. Otherwise the
/// input is stored and sent exactly as typed; trimming is only for the check.
pub fn begin(session: &mut ChatSession) -> Option<PendingSubmission> {
    if session.input().trim().is_empty() {
        return None;
    }

    let question = session.take_input();
    let user_message_id = session.append(Message::user(question.clone())).to_string();
    info!("submitted question as {}", user_message_id);

    Some(PendingSubmission {
        question,
        user_message_id,
    })
}

/// Runs a whole submission inline: user message, one query, one AI message.
/// Returns whether anything was submitted.
pub async fn submit<T>(session: &mut ChatSession, transport: &T) -> bool
where
    T: QueryTransport + ?Sized,
{
    let Some(pending) = begin(session) else {
        return false;
    };

    let reply = pending.resolve(transport).await;
    session.append(reply);
    true
}

/// Maps a query result to the AI message shown in the thread.
pub fn reply_from_outcome(result: ChatResult<QueryOutcome>) -> Message {
    match result {
        Ok(QueryOutcome::Answered(response)) => Message::ai(
            response.message_id,
            response.interim_text,
            response.status,
            response.video_url,
        ),
        Ok(QueryOutcome::Rejected {
            status_text,
            message,
        }) => {
            let detail = message.unwrap_or(status_text);
            warn!("query rejected: {}", detail);
            Message::ai_error(
                AI_ERROR_ID_PREFIX,
                format!("{}{}", HTTP_ERROR_PREFIX, detail),
            )
        }
        Err(e) => {
            warn!("query failed: {}", e);
            Message::ai_error(
                AI_NETWORK_ERROR_ID_PREFIX,
                format!("{}{}", NETWORK_ERROR_PREFIX, e),
            )
        }
    }
}
