use crate::api::QueryTransport;
use crate::config::ChatConfig;
use crate::log_view::LogView;
use crate::models::{Message, MessageStatus};
use crate::session::ChatSession;
use crate::status_indicator::StatusIndicator;
use crate::submission::PendingSubmission;
use log::info;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Lines moved per PageUp/PageDown.
const SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub session: ChatSession,
    pub course_id: String,
    pub base_url: String,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
    /// Distance from the bottom of the thread; 0 follows new messages.
    pub scroll_from_bottom: u16,
    in_flight: usize,
    last_revision: u64,
    transport: Arc<dyn QueryTransport>,
    reply_tx: UnboundedSender<Message>,
}

impl App {
    pub fn new(
        config: &ChatConfig,
        transport: Arc<dyn QueryTransport>,
        reply_tx: UnboundedSender<Message>,
    ) -> App {
        let mut logs = LogView::new();
        logs.add(format!("Connected to {}", config.base_url));
        logs.add(format!("Course: {}", config.course_id));

        App {
            state: AppState::Chat,
            session: ChatSession::new(),
            course_id: config.course_id.clone(),
            base_url: config.base_url.clone(),
            logs,
            status_indicator: StatusIndicator::new(),
            scroll_from_bottom: 0,
            in_flight: 0,
            last_revision: 0,
            transport,
            reply_tx,
        }
    }

    /// Sends the question on a background task. The reply comes back through
    /// the channel given to [`App::new`] and must be handed to
    /// [`App::apply_reply`].
    pub fn dispatch(&mut self, pending: PendingSubmission) {
        self.in_flight += 1;
        self.logs.add(format!("Sent: {}", truncate(pending.question(), 40)));
        self.refresh_status();

        let transport = Arc::clone(&self.transport);
        let reply_tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = pending.resolve(&*transport).await;
            // The receiver is gone only once the UI has shut down.
            let _ = reply_tx.send(reply);
        });
    }

    pub fn apply_reply(&mut self, reply: Message) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let entry = match reply.status {
            MessageStatus::Error => format!("Failed: {}", truncate(&reply.text, 60)),
            status => format!("Reply {} ({})", reply.id, status),
        };
        self.logs.add(entry);

        self.session.append(reply);
        self.refresh_status();
        self.sync_scroll();
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Snaps back to the newest message whenever the thread grew.
    pub fn sync_scroll(&mut self) {
        let revision = self.session.conversation().revision();
        if revision != self.last_revision {
            self.last_revision = revision;
            self.scroll_from_bottom = 0;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(SCROLL_STEP);
    }

    pub fn on_tick(&mut self) {
        if self.in_flight > 0 {
            self.status_indicator.update_spinner();
        }
    }

    pub fn request_quit(&mut self) {
        info!("quit requested");
        self.state = AppState::QuitConfirm;
    }

    fn refresh_status(&mut self) {
        self.status_indicator.set_thinking(self.in_flight > 0);
        match self.in_flight {
            0 => self.status_indicator.clear_status(),
            1 => self.status_indicator.set_status("Waiting for a reply..."),
            n => self
                .status_indicator
                .set_status(format!("Waiting for {} replies...", n)),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push('…');
    short
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::QueryOutcome;
    use crate::errors::{ChatError, ChatResult};
    use crate::models::{QueryResponse, Sender};
    use async_trait::async_trait;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    /// Answers every question with "echo: <question>", or fails when the
    /// question is "fail".
    pub(crate) struct EchoTransport;

    #[async_trait]
    impl QueryTransport for EchoTransport {
        async fn query(&self, question: &str) -> ChatResult<QueryOutcome> {
            if question == "fail" {
                return Err(ChatError::transport_error("connection refused"));
            }
            Ok(QueryOutcome::Answered(QueryResponse {
                message_id: format!("echo-{}", question),
                interim_text: format!("echo: {}", question),
                status: MessageStatus::TextOnly,
                video_url: None,
            }))
        }
    }

    pub(crate) fn test_app() -> (App, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        let config = ChatConfig::default();
        (App::new(&config, Arc::new(EchoTransport), tx), rx)
    }

    #[tokio::test]
    async fn test_dispatch_and_apply_reply() {
        let (mut app, mut rx) = test_app();
        app.session.set_input("hello");
        let pending = crate::submission::begin(&mut app.session).unwrap();

        app.dispatch(pending);
        assert_eq!(app.in_flight(), 1);
        assert_eq!(app.session.input(), "");

        let reply = rx.recv().await.unwrap();
        app.apply_reply(reply);

        assert_eq!(app.in_flight(), 0);
        let messages = app.session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::Ai);
        assert_eq!(messages[1].text, "echo: hello");
    }

    #[tokio::test]
    async fn test_failed_reply_is_logged() {
        let (mut app, mut rx) = test_app();
        app.session.set_input("fail");
        let pending = crate::submission::begin(&mut app.session).unwrap();
        app.dispatch(pending);

        let reply = rx.recv().await.unwrap();
        app.apply_reply(reply);

        let last = app.session.messages().last().unwrap();
        assert_eq!(last.status, MessageStatus::Error);
        assert_eq!(last.text, "Network error: connection refused");
        assert!(app.logs.entries.back().unwrap().contains("Failed:"));
    }

    #[test]
    fn test_scroll_resets_on_new_message() {
        let (mut app, _rx) = test_app();
        app.scroll_up();
        app.scroll_up();
        assert_eq!(app.scroll_from_bottom, 2 * SCROLL_STEP);

        app.scroll_down();
        assert_eq!(app.scroll_from_bottom, SCROLL_STEP);

        app.session.append(Message::user("new"));
        app.sync_scroll();
        assert_eq!(app.scroll_from_bottom, 0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
