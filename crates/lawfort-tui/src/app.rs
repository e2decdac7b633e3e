//! Application state for the LawFort TUI.

use lawfort_core::catalog::CatalogView;
use lawfort_core::{
    AuthMode, AuthScreen, ContentSource, ConversationEvent, ConversationState, Message,
    PortalPage, Session, SessionEvent, SignupField, SignupStep,
};
use lawfort_protocol::{AwarenessContent, EmergencyHelpline, RecoveryGuide, Role, Sender};
use log::{debug, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::cmp::min;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Law library; the home screen.
    Library,
    /// Legal assistant conversation.
    Chat,
    /// Login and signup forms.
    Auth,
    /// Cyber portal pages.
    Portal,
    /// Lawyer workspace.
    Workspace,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Library,
        View::Chat,
        View::Auth,
        View::Portal,
        View::Workspace,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Library => "Library",
            View::Chat => "Assistant",
            View::Auth => "Account",
            View::Portal => "Cyber Portal",
            View::Workspace => "Workspace",
        }
    }
}

/// Chat roles displayed in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    /// Local status or command output.
    System,
}

/// Single chat entry rendered in the transcript.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
    /// Citation line under an assistant answer.
    pub citation: Option<String>,
    pub color: Option<Color>,
}

impl ChatEntry {
    fn from_message(message: &Message) -> Self {
        let role = match message.sender {
            Sender::User => ChatRole::User,
            Sender::Bot => ChatRole::Assistant,
        };
        let meta = message.meta.as_ref();
        Self {
            role,
            content: message.text.clone(),
            citation: meta.and_then(|meta| {
                let mut parts = Vec::new();
                if let Some(act) = meta.act.as_deref() {
                    parts.push(act.to_string());
                }
                if let Some(section) = meta.section.as_deref() {
                    parts.push(format!("Section {section}"));
                }
                if let Some(confidence) = meta.confidence {
                    parts.push(format!("{confidence}% confidence"));
                }
                (!parts.is_empty()).then(|| parts.join(" | "))
            }),
            color: message.is_error().then(error_color),
        }
    }
}

/// A loaded cyber portal page.
#[derive(Debug, Clone)]
pub enum PortalContent {
    Helpline(PortalPage<EmergencyHelpline>),
    Recovery(PortalPage<RecoveryGuide>),
    Awareness(PortalPage<AwarenessContent>),
}

impl PortalContent {
    pub fn source(&self) -> ContentSource {
        match self {
            PortalContent::Helpline(page) => page.source,
            PortalContent::Recovery(page) => page.source,
            PortalContent::Awareness(page) => page.source,
        }
    }
}

/// Rendered result of a lawyer workspace request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePanel {
    pub title: String,
    pub lines: Vec<String>,
}

impl WorkspacePanel {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }
}

/// Field of the auth screen that typed input is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    LoginContact,
    LoginPassword,
    Signup(SignupField),
    Code,
}

impl AuthFocus {
    pub fn label(self, role: Role) -> &'static str {
        match self {
            AuthFocus::LoginContact => "Email or Mobile",
            AuthFocus::LoginPassword => "Password",
            AuthFocus::Signup(SignupField::Name) => "Full Name",
            AuthFocus::Signup(SignupField::Contact) => "Email or Mobile",
            AuthFocus::Signup(SignupField::Password) => "Password",
            AuthFocus::Signup(SignupField::VerificationId) => {
                role.verification_label().unwrap_or("Verification ID")
            }
            AuthFocus::Code => "Verification Code",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(
            self,
            AuthFocus::LoginPassword | AuthFocus::Signup(SignupField::Password)
        )
    }
}

/// Top-level application state for the TUI.
pub struct App {
    pub view: View,
    /// Signed-in user, if any.
    pub session: Option<Session>,
    /// Backend base URL (shown in header).
    pub base_url: String,
    /// Chat transcript entries.
    pub messages: Vec<ChatEntry>,
    /// Whether the assistant is working on a query.
    pub is_typing: bool,
    /// Current input buffer.
    pub input: String,
    /// Whether to show the slash command palette.
    pub show_slash_commands: bool,
    /// Status line text.
    pub status: String,
    pub catalog: CatalogView,
    pub auth: AuthScreen,
    /// Index into [`App::auth_fields`].
    pub auth_focus: usize,
    /// An auth request is in flight.
    pub auth_busy: bool,
    pub portal: Option<PortalContent>,
    pub workspace: Option<WorkspacePanel>,
    /// A voice clip is being captured.
    pub recording: bool,
    /// Current chat scroll offset.
    pub scroll: u16,
    /// Whether to auto-scroll the chat to the bottom.
    pub auto_scroll: bool,
    /// Maximum scroll offset for the chat view.
    pub chat_max_scroll: u16,
    /// Scroll offset for non-chat views.
    pub view_scroll: u16,
    pub view_max_scroll: u16,
    ticks: u64,
}

impl App {
    pub fn new(base_url: impl Into<String>, session: Option<Session>) -> Self {
        Self {
            view: View::Library,
            session,
            base_url: base_url.into(),
            messages: Vec::new(),
            is_typing: false,
            input: String::new(),
            show_slash_commands: false,
            status: "idle".to_string(),
            catalog: CatalogView::new(),
            auth: AuthScreen::new(),
            auth_focus: 0,
            auth_busy: false,
            portal: None,
            workspace: None,
            recording: false,
            scroll: 0,
            auto_scroll: true,
            chat_max_scroll: 0,
            view_scroll: 0,
            view_max_scroll: 0,
            ticks: 0,
        }
    }

    /// Switch screens and reset the view scroll.
    pub fn set_view(&mut self, view: View) {
        if self.view != view {
            debug!("view changed (view={:?})", view);
            self.view = view;
            self.view_scroll = 0;
            self.view_max_scroll = 0;
        }
    }

    pub fn is_lawyer(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.role == Role::Lawyer)
    }

    /// Load an existing transcript into the chat view.
    pub fn load_messages(&mut self, messages: &[Message]) {
        debug!("loading messages (count={})", messages.len());
        self.messages = messages.iter().map(ChatEntry::from_message).collect();
        self.scroll = 0;
        self.auto_scroll = true;
        self.chat_max_scroll = 0;
    }

    /// Set the status line.
    pub fn push_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Append a system message to the transcript.
    pub fn push_system_message(&mut self, content: String) {
        self.push_system_message_colored(content, system_color());
    }

    /// Append a system message with a custom color.
    pub fn push_system_message_colored(&mut self, content: String, color: Color) {
        self.messages.push(ChatEntry {
            role: ChatRole::System,
            content,
            citation: None,
            color: Some(color),
        });
        self.maybe_enable_auto_scroll();
    }

    /// Append an error notice to the transcript.
    pub fn push_error(&mut self, content: String) {
        self.push_system_message_colored(content, error_color());
    }

    /// Apply a conversation store notification.
    pub fn apply_conversation_event(&mut self, event: ConversationEvent) {
        match event {
            ConversationEvent::MessageAppended(message) => {
                debug!("message appended (id={})", message.id);
                let entry = ChatEntry::from_message(&message);
                if entry.role == ChatRole::User {
                    self.enable_auto_scroll();
                }
                self.messages.push(entry);
                self.maybe_enable_auto_scroll();
            }
            ConversationEvent::TypingChanged(typing) => {
                self.is_typing = typing;
                self.status = if typing { "thinking" } else { "idle" }.to_string();
            }
            ConversationEvent::VisibilityChanged(open) => {
                if open {
                    self.set_view(View::Chat);
                } else if self.view == View::Chat {
                    self.set_view(View::Library);
                }
            }
        }
    }

    /// Replace the transcript with the store's state after missed events.
    pub fn resync_conversation(&mut self, state: ConversationState) {
        self.load_messages(&state.messages);
        self.is_typing = state.is_typing;
        self.status = if state.is_typing { "thinking" } else { "idle" }.to_string();
        if !state.is_open && self.view == View::Chat {
            self.set_view(View::Library);
        }
    }

    /// Apply a session store notification.
    pub fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(session) | SessionEvent::Updated(session) => {
                info!("session active (role={})", session.role.as_str());
                self.session = Some(session);
            }
            SessionEvent::SignedOut => {
                info!("session ended");
                self.session = None;
                self.workspace = None;
                if self.view == View::Workspace {
                    self.set_view(View::Library);
                }
            }
        }
    }

    /// Fields editable in the current auth tab and step.
    pub fn auth_fields(&self) -> Vec<AuthFocus> {
        match (self.auth.mode, self.auth.signup.step()) {
            (AuthMode::Login, _) => vec![AuthFocus::LoginContact, AuthFocus::LoginPassword],
            (AuthMode::Signup, SignupStep::Details) => {
                let mut fields = vec![
                    AuthFocus::Signup(SignupField::Name),
                    AuthFocus::Signup(SignupField::Contact),
                    AuthFocus::Signup(SignupField::Password),
                ];
                if self.auth.signup.draft().role.verification_label().is_some() {
                    fields.push(AuthFocus::Signup(SignupField::VerificationId));
                }
                fields
            }
            (AuthMode::Signup, SignupStep::Verify) => vec![AuthFocus::Code],
        }
    }

    pub fn focused_auth_field(&self) -> Option<AuthFocus> {
        self.auth_fields().get(self.auth_focus).copied()
    }

    /// Current value of an auth field.
    pub fn auth_value(&self, focus: AuthFocus) -> &str {
        match focus {
            AuthFocus::LoginContact => &self.auth.login.contact,
            AuthFocus::LoginPassword => &self.auth.login.password,
            AuthFocus::Signup(field) => self.auth.signup.field(field),
            AuthFocus::Code => self.auth.signup.code(),
        }
    }

    /// Whether the input line holds a secret and should be masked.
    pub fn masks_input(&self) -> bool {
        self.view == View::Auth
            && !self.input.trim_start().starts_with('/')
            && self.focused_auth_field().is_some_and(AuthFocus::is_secret)
    }

    pub fn focus_next(&mut self) {
        let count = self.auth_fields().len().max(1);
        self.auth_focus = (self.auth_focus + 1) % count;
    }

    pub fn focus_previous(&mut self) {
        let count = self.auth_fields().len().max(1);
        self.auth_focus = (self.auth_focus + count - 1) % count;
    }

    /// Move focus to the first empty field of the current form.
    pub fn focus_first_empty(&mut self) {
        let fields = self.auth_fields();
        self.auth_focus = fields
            .iter()
            .position(|field| self.auth_value(*field).is_empty())
            .unwrap_or(0);
    }

    /// Form edits are refused while a submit runs; its result replaces the form.
    pub fn ensure_auth_idle(&self) -> Result<(), String> {
        if self.auth_busy {
            return Err("please wait for the current request to finish".to_string());
        }
        Ok(())
    }

    /// Write typed text into the focused field and advance focus.
    pub fn apply_auth_input(&mut self, text: &str) -> Result<(), String> {
        let Some(focus) = self.focused_auth_field() else {
            return Err("nothing to edit here".to_string());
        };
        match focus {
            AuthFocus::LoginContact => self.auth.login.contact = text.trim().to_string(),
            AuthFocus::LoginPassword => self.auth.login.password = text.to_string(),
            AuthFocus::Signup(field) => self
                .auth
                .signup
                .set_field(field, text)
                .map_err(|err| err.to_string())?,
            AuthFocus::Code => self.auth.signup.set_code(text),
        }
        self.auth.error = None;
        self.focus_next();
        Ok(())
    }

    /// Switch to the given auth tab.
    pub fn open_auth(&mut self, mode: AuthMode) {
        if self.auth.mode != mode {
            self.auth.toggle_mode();
        }
        self.focus_first_empty();
        self.set_view(View::Auth);
    }

    /// Take back the auth form after a background submit.
    pub fn finish_auth(&mut self, screen: AuthScreen, session: Option<Session>) {
        let moved = screen.mode != self.auth.mode || screen.signup.step() != self.auth.signup.step();
        self.auth = screen;
        self.auth_busy = false;
        if moved {
            self.focus_first_empty();
        } else {
            self.auth_focus = min(self.auth_focus, self.auth_fields().len().saturating_sub(1));
        }
        match session {
            Some(session) => {
                self.push_status(format!("signed in as {}", session.name));
                self.session = Some(session);
                self.set_view(View::Library);
            }
            None => self.push_status("idle"),
        }
    }

    pub fn show_portal(&mut self, content: PortalContent) {
        let source = match content.source() {
            ContentSource::Backend => "idle",
            ContentSource::Fallback => "offline content",
        };
        self.portal = Some(content);
        self.push_status(source);
        self.set_view(View::Portal);
        self.view_scroll = 0;
    }

    pub fn show_workspace(&mut self, panel: WorkspacePanel) {
        self.workspace = Some(panel);
        self.push_status("idle");
        self.set_view(View::Workspace);
        self.view_scroll = 0;
    }

    /// Advance the animation clock.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Animated "typing" marker for the assistant.
    pub fn typing_indicator(&self) -> String {
        let dots = (self.ticks % 3) as usize + 1;
        format!("typing{}", ".".repeat(dots))
    }

    /// Scroll the chat view upward by a number of lines.
    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scroll the chat view downward by a number of lines.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = min(self.scroll.saturating_add(lines), self.chat_max_scroll);
        if self.scroll >= self.chat_max_scroll {
            self.auto_scroll = true;
        }
    }

    /// Scroll to the top of the chat view.
    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll = 0;
    }

    /// Enable auto-scrolling to the bottom.
    pub fn enable_auto_scroll(&mut self) {
        self.auto_scroll = true;
        self.scroll = self.chat_max_scroll;
    }

    /// Update scroll bounds after layout changes.
    ///
    /// Snaps to the new bottom only when `auto_scroll` is on or the user was
    /// already at the bottom.
    pub fn update_scroll_bounds(&mut self, max_scroll: u16) {
        let was_at_bottom = self.scroll >= self.chat_max_scroll;
        self.chat_max_scroll = max_scroll;
        if self.auto_scroll || was_at_bottom {
            self.scroll = max_scroll;
            self.auto_scroll = true;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }

    fn maybe_enable_auto_scroll(&mut self) {
        if self.auto_scroll {
            self.scroll = self.chat_max_scroll;
        }
    }

    pub fn view_scroll_up(&mut self, lines: u16) {
        self.view_scroll = self.view_scroll.saturating_sub(lines);
    }

    pub fn view_scroll_down(&mut self, lines: u16) {
        self.view_scroll = min(self.view_scroll.saturating_add(lines), self.view_max_scroll);
    }

    pub fn update_view_scroll_bounds(&mut self, max_scroll: u16) {
        self.view_max_scroll = max_scroll;
        self.view_scroll = self.view_scroll.min(max_scroll);
    }

    /// Render chat messages into styled lines for the UI.
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (idx, entry) in self.messages.iter().enumerate() {
            let (prefix, badge) = match entry.role {
                ChatRole::User => (" you ", Color::Rgb(107, 161, 230)),
                ChatRole::Assistant => (" assistant ", Color::Rgb(212, 175, 55)),
                ChatRole::System => (" system ", Color::Rgb(60, 60, 60)),
            };
            let prefix_style = Style::default()
                .fg(Color::Rgb(10, 10, 10))
                .bg(badge)
                .add_modifier(Modifier::BOLD);
            let content_style = match entry.color {
                Some(color) => Style::default().fg(color),
                None => Style::default().fg(Color::Rgb(238, 238, 238)),
            };

            lines.push(Line::from(vec![Span::styled(prefix, prefix_style)]));
            for line in entry.content.lines() {
                lines.push(Line::from(Span::styled(format!(" {line}"), content_style)));
            }
            if let Some(citation) = &entry.citation {
                lines.push(Line::from(Span::styled(
                    format!(" {citation}"),
                    Style::default()
                        .fg(Color::Rgb(128, 128, 128))
                        .add_modifier(Modifier::ITALIC),
                )));
            }

            if idx + 1 < self.messages.len() {
                lines.push(Line::from(Span::raw("")));
            }
        }

        if self.is_typing {
            lines.push(Line::from(Span::raw("")));
            lines.push(Line::from(Span::styled(
                format!(" {}", self.typing_indicator()),
                Style::default().fg(Color::Rgb(128, 128, 128)),
            )));
        }

        // Trailing padding keeps the last message reachable when wrapped
        // line counting is slightly off.
        lines.push(Line::from(Span::raw("")));

        lines
    }
}

fn system_color() -> Color {
    Color::Rgb(128, 128, 128)
}

fn error_color() -> Color {
    Color::Rgb(255, 110, 110)
}
