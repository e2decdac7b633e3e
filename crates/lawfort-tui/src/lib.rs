//! Library entry point for the LawFort TUI.
//!
//! Provides a reusable [`run`] function that drives the Ratatui terminal UI
//! against a connected [`LawfortClient`].

mod app;
mod client;
mod event;
mod microphone;
mod ui;
mod workspace;

pub use client::LawfortClient;
pub use microphone::FileMicrophone;

use anyhow::anyhow;
use app::{App, PortalContent, View};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use lawfort_core::catalog::category_by_title;
use lawfort_core::{AuthMode, VoiceCapture};
use lawfort_protocol::{
    NewClient, NewInvestigationRecord, NewNote, NewRoadmapStep, NewTimelineEvent, Role,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use workspace::WorkspaceRequest;

type Voice = Option<VoiceCapture<FileMicrophone>>;

/// Cyber portal pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortalPageKind {
    Helpline,
    Recovery,
    Awareness,
}

/// Supported slash commands in the TUI input box.
#[derive(Debug, PartialEq, Eq)]
enum SlashCommand {
    Help,
    Chat,
    Library,
    Search(String),
    /// `None` clears the category filter.
    Category(Option<String>),
    Clear,
    Login,
    Signup,
    Role(Role),
    StartOver,
    Logout,
    Portal(PortalPageKind),
    Workspace(WorkspaceRequest),
    Voice(PathBuf),
    Stop,
    Cancel,
}

/// Launch the LawFort TUI.
///
/// The caller is responsible for initializing logging and connecting the
/// client (which restores any saved session) before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run(client: LawfortClient) -> anyhow::Result<()> {
    let mut app = App::new(client.base_url(), client.current_session());
    app.load_messages(&client.conversation().messages());

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    client.forward_events(tx.clone());
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());

    let mut voice: Voice = None;
    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;
        let event = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
        if handle_app_event(event, &client, &mut app, tx.clone(), &mut voice).await? {
            break;
        }
    }

    if let Some(mut capture) = voice.take() {
        capture.cancel();
    }
    restore_terminal(&mut terminal)?;
    Ok(())
}

/// Dispatch a UI event and return true when the app should exit.
async fn handle_app_event(
    event: AppEvent,
    client: &LawfortClient,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
    voice: &mut Voice,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::Input(key) => return handle_input(key, client, app, sender, voice).await,
        AppEvent::Tick => app.tick(),
        AppEvent::Conversation(event) => app.apply_conversation_event(event),
        AppEvent::ConversationResync(state) => app.resync_conversation(state),
        AppEvent::Session(event) => app.apply_session_event(event),
        AppEvent::AuthFinished(screen, session) => app.finish_auth(*screen, session),
        AppEvent::Portal(content) => app.show_portal(content),
        AppEvent::Workspace(panel) => app.show_workspace(panel),
        AppEvent::VoiceFinished(result) => {
            app.recording = false;
            app.push_status("idle");
            if let Err(message) = result {
                app.push_error(format!("voice query failed: {message}"));
            }
        }
        AppEvent::ActionError(message) => {
            app.push_error(message.clone());
            app.push_status(message);
        }
        AppEvent::Scroll(delta) => {
            let lines = delta.unsigned_abs();
            match (app.view, delta < 0) {
                (View::Chat, true) => app.scroll_up(lines),
                (View::Chat, false) => app.scroll_down(lines),
                (_, true) => app.view_scroll_up(lines),
                (_, false) => app.view_scroll_down(lines),
            }
        }
    }
    Ok(false)
}

/// Handle keyboard input and dispatch actions.
async fn handle_input(
    key: KeyEvent,
    client: &LawfortClient,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
    voice: &mut Voice,
) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }
    if key.code == KeyCode::Esc {
        if app.show_slash_commands {
            app.show_slash_commands = false;
            app.input.clear();
            return Ok(false);
        }
        if app.view == View::Chat {
            client.conversation().toggle();
            return Ok(false);
        }
        if app.view != View::Library {
            app.set_view(View::Library);
            return Ok(false);
        }
        return Ok(true);
    }

    let chat = app.view == View::Chat;
    match key.code {
        KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            open_or_close_chat(client, app);
        }
        KeyCode::Tab if app.view == View::Auth => app.focus_next(),
        KeyCode::BackTab if app.view == View::Auth => app.focus_previous(),
        KeyCode::PageUp if chat => app.scroll_up(5),
        KeyCode::PageDown if chat => app.scroll_down(5),
        KeyCode::Up if chat => app.scroll_up(1),
        KeyCode::Down if chat => app.scroll_down(1),
        KeyCode::Home if chat => app.scroll_to_top(),
        KeyCode::End if chat => app.enable_auto_scroll(),
        KeyCode::PageUp => app.view_scroll_up(5),
        KeyCode::PageDown => app.view_scroll_down(5),
        KeyCode::Up => app.view_scroll_up(1),
        KeyCode::Down => app.view_scroll_down(1),
        KeyCode::Home => app.view_scroll_up(u16::MAX),
        KeyCode::End => app.view_scroll_down(u16::MAX),
        KeyCode::Enter => {
            app.show_slash_commands = false;
            if app.input.trim_start().starts_with('/') {
                let command = std::mem::take(&mut app.input);
                if let Err(err) = handle_slash_command(client, app, sender, voice, command).await
                {
                    app.push_status(err.clone());
                    app.push_error(err);
                }
            } else {
                submit_input(client, app, sender);
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
            app.show_slash_commands = app.input.trim_start().starts_with('/');
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.input.push(ch);
                app.show_slash_commands = app.input.trim_start().starts_with('/');
            }
        }
        _ => {}
    }

    Ok(false)
}

/// Route plain input to whatever the current view does with text.
fn submit_input(client: &LawfortClient, app: &mut App, sender: mpsc::Sender<AppEvent>) {
    match app.view {
        View::Chat => {
            if app.input.trim().is_empty() {
                app.input.clear();
                return;
            }
            let query = std::mem::take(&mut app.input);
            info!("sending text query (query_len={})", query.len());
            spawn_text_query(client.clone(), query);
        }
        View::Library => {
            let term = std::mem::take(&mut app.input);
            debug!("library search (term_len={})", term.trim().len());
            app.catalog.set_search(term.trim());
            app.view_scroll = 0;
        }
        View::Auth => {
            if app.auth_busy {
                app.push_status("please wait");
                return;
            }
            if app.input.is_empty() {
                app.auth_busy = true;
                app.auth.notice = None;
                app.push_status("submitting");
                spawn_auth_submit(client.clone(), app.auth.clone(), sender);
                return;
            }
            let value = std::mem::take(&mut app.input);
            if let Err(err) = app.apply_auth_input(&value) {
                app.auth.error = Some(err);
            }
        }
        View::Portal | View::Workspace => {
            app.input.clear();
            app.push_status("use /chat to ask the assistant");
        }
    }
}

/// Show the assistant, opening the conversation if it is closed.
fn open_or_close_chat(client: &LawfortClient, app: &mut App) {
    let conversation = client.conversation();
    if conversation.is_open() && app.view != View::Chat {
        app.set_view(View::Chat);
    } else {
        conversation.toggle();
    }
}

/// Handle slash commands entered in the input box.
async fn handle_slash_command(
    client: &LawfortClient,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
    voice: &mut Voice,
    input: String,
) -> Result<(), String> {
    let command = parse_slash_command(&input)?;
    let Some(command) = command else {
        return Ok(());
    };
    debug!("handling slash command ({:?})", command);
    match command {
        SlashCommand::Help => app.show_slash_commands = true,
        SlashCommand::Chat => open_or_close_chat(client, app),
        SlashCommand::Library => app.set_view(View::Library),
        SlashCommand::Search(term) => {
            app.catalog.set_search(term);
            app.set_view(View::Library);
        }
        SlashCommand::Category(None) => {
            app.catalog.select_category(None);
            app.set_view(View::Library);
        }
        SlashCommand::Category(Some(name)) => {
            let category =
                category_by_title(&name).ok_or_else(|| format!("unknown category: {name}"))?;
            app.catalog.select_category(Some(category.title.to_string()));
            app.set_view(View::Library);
        }
        SlashCommand::Clear => {
            app.catalog.clear();
            app.set_view(View::Library);
        }
        SlashCommand::Login => {
            app.ensure_auth_idle()?;
            app.open_auth(AuthMode::Login);
        }
        SlashCommand::Signup => {
            app.ensure_auth_idle()?;
            app.open_auth(AuthMode::Signup);
        }
        SlashCommand::Role(role) => {
            app.ensure_auth_idle()?;
            app.auth.signup.set_role(role).map_err(|err| err.to_string())?;
            if app.auth.mode != AuthMode::Signup {
                app.open_auth(AuthMode::Signup);
            }
            app.auth_focus = app.auth_focus.min(app.auth_fields().len().saturating_sub(1));
            app.set_view(View::Auth);
        }
        SlashCommand::StartOver => {
            app.ensure_auth_idle()?;
            if !app.auth.start_over() {
                return Err("signup is already on the details step".to_string());
            }
            app.focus_first_empty();
            app.set_view(View::Auth);
        }
        SlashCommand::Logout => {
            if app.session.is_none() {
                return Err("not signed in".to_string());
            }
            client.sign_out().map_err(|err| err.to_string())?;
            app.push_status("signed out");
        }
        SlashCommand::Portal(kind) => {
            app.push_status("loading");
            spawn_portal(client.clone(), kind, sender);
        }
        SlashCommand::Workspace(request) => {
            if !app.is_lawyer() {
                return Err("the workspace is available to signed-in lawyers".to_string());
            }
            app.push_status(format!("loading {}", request.label()));
            spawn_workspace(client.clone(), request, sender);
        }
        SlashCommand::Voice(path) => {
            if voice.is_some() {
                return Err("already recording; use /stop or /cancel".to_string());
            }
            let mut capture = VoiceCapture::new(FileMicrophone::new(path));
            capture.start().await.map_err(|err| err.to_string())?;
            *voice = Some(capture);
            app.recording = true;
            app.push_status("recording");
        }
        SlashCommand::Stop => {
            let capture = voice.take().ok_or_else(|| "not recording".to_string())?;
            if !client.conversation().is_open() {
                client.conversation().toggle();
            }
            app.push_status("sending voice query");
            spawn_voice_query(client.clone(), capture, sender);
        }
        SlashCommand::Cancel => {
            let mut capture = voice.take().ok_or_else(|| "not recording".to_string())?;
            capture.cancel();
            app.recording = false;
            app.push_status("recording discarded");
        }
    }
    Ok(())
}

/// Parse a slash command from the input line.
fn parse_slash_command(input: &str) -> Result<Option<SlashCommand>, String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(None);
    }
    let body = trimmed.trim_start_matches('/');
    let (command, rest) = match body.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (body, ""),
    };
    if command.is_empty() {
        return Ok(None);
    }
    let command = command.to_lowercase();
    let workspace = |request| Ok(Some(SlashCommand::Workspace(request)));
    match command.as_str() {
        "help" => Ok(Some(SlashCommand::Help)),
        "chat" | "ask" => Ok(Some(SlashCommand::Chat)),
        "library" | "laws" => Ok(Some(SlashCommand::Library)),
        "search" => {
            if rest.is_empty() {
                return Err("usage: /search <term>".to_string());
            }
            Ok(Some(SlashCommand::Search(rest.to_string())))
        }
        "category" => match rest {
            "" | "all" => Ok(Some(SlashCommand::Category(None))),
            name => Ok(Some(SlashCommand::Category(Some(name.to_string())))),
        },
        "clear" => Ok(Some(SlashCommand::Clear)),
        "login" => Ok(Some(SlashCommand::Login)),
        "signup" | "register" => Ok(Some(SlashCommand::Signup)),
        "role" => Role::parse(rest)
            .map(|role| Some(SlashCommand::Role(role)))
            .ok_or_else(|| "usage: /role citizen|police|lawyer".to_string()),
        "startover" => Ok(Some(SlashCommand::StartOver)),
        "logout" => Ok(Some(SlashCommand::Logout)),
        "helpline" => Ok(Some(SlashCommand::Portal(PortalPageKind::Helpline))),
        "recovery" => Ok(Some(SlashCommand::Portal(PortalPageKind::Recovery))),
        "awareness" => Ok(Some(SlashCommand::Portal(PortalPageKind::Awareness))),
        "notes" => workspace(WorkspaceRequest::Notes),
        "records" => workspace(WorkspaceRequest::Records),
        "timeline" => workspace(WorkspaceRequest::Timeline),
        "clients" => workspace(WorkspaceRequest::Clients),
        "roadmap" => workspace(WorkspaceRequest::Roadmap),
        "evidence" => workspace(WorkspaceRequest::Evidence),
        "note" => {
            let [title, content] = fields(rest, "usage: /note <title> | <content>")?;
            workspace(WorkspaceRequest::CreateNote(NewNote { title, content }))
        }
        "record" => {
            let [case_number, title, description] =
                fields(rest, "usage: /record <case number> | <title> | <description>")?;
            workspace(WorkspaceRequest::CreateRecord(NewInvestigationRecord {
                case_number,
                title,
                description,
            }))
        }
        "event" => {
            let [case_number, event_date, description] =
                fields(rest, "usage: /event <case number> | <date> | <description>")?;
            workspace(WorkspaceRequest::AddEvent(NewTimelineEvent {
                case_number,
                event_date,
                description,
            }))
        }
        "client" => {
            let [name, contact, case_details] =
                fields(rest, "usage: /client <name> | <contact> | <case details>")?;
            workspace(WorkspaceRequest::AddClient(NewClient {
                name,
                contact,
                case_details,
            }))
        }
        "step" => {
            let [case_number, stage, milestone] =
                fields(rest, "usage: /step <case number> | <stage> | <milestone>")?;
            workspace(WorkspaceRequest::AddStep(NewRoadmapStep {
                case_number,
                stage,
                milestone,
            }))
        }
        "upload" => {
            if rest.is_empty() {
                return Err("usage: /upload <file>".to_string());
            }
            workspace(WorkspaceRequest::Upload(PathBuf::from(rest)))
        }
        "summary" => workspace(WorkspaceRequest::Summary(rest.to_string())),
        "draft" => {
            let [draft_type, case_details] = fields(rest, "usage: /draft <type> | <details>")?;
            workspace(WorkspaceRequest::Draft {
                draft_type,
                case_details,
            })
        }
        "voice" => {
            if rest.is_empty() {
                return Err("usage: /voice <audio file>".to_string());
            }
            Ok(Some(SlashCommand::Voice(PathBuf::from(rest))))
        }
        "stop" | "send" => Ok(Some(SlashCommand::Stop)),
        "cancel" => Ok(Some(SlashCommand::Cancel)),
        _ => Err(format!("unknown command: {command}")),
    }
}

/// Split `a | b | c` into exactly `N` trimmed fields; the last keeps any
/// further separators.
fn fields<const N: usize>(rest: &str, usage: &str) -> Result<[String; N], String> {
    let parts: Vec<String> = rest
        .splitn(N, '|')
        .map(|part| part.trim().to_string())
        .collect();
    parts.try_into().map_err(|_| usage.to_string())
}

/// Spawn a task to run a text query through the conversation store.
fn spawn_text_query(client: LawfortClient, query: String) {
    tokio::spawn(async move {
        client.conversation().send_text_query(&query).await;
    });
}

/// Spawn a task to submit the auth form and hand it back.
fn spawn_auth_submit(
    client: LawfortClient,
    mut screen: lawfort_core::AuthScreen,
    sender: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        debug!(
            "submitting auth form (mode={:?}, step={:?})",
            screen.mode,
            screen.signup.step()
        );
        let session = screen
            .submit(client.backend().as_ref(), client.sessions())
            .await;
        let _ = sender
            .send(AppEvent::AuthFinished(Box::new(screen), session))
            .await;
    });
}

/// Spawn a task to load a portal page.
fn spawn_portal(client: LawfortClient, kind: PortalPageKind, sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let portal = client.portal();
        let content = match kind {
            PortalPageKind::Helpline => PortalContent::Helpline(portal.emergency_helpline().await),
            PortalPageKind::Recovery => PortalContent::Recovery(portal.recovery_guide().await),
            PortalPageKind::Awareness => PortalContent::Awareness(portal.awareness().await),
        };
        let _ = sender.send(AppEvent::Portal(content)).await;
    });
}

/// Spawn a task to run a lawyer workspace request.
fn spawn_workspace(
    client: LawfortClient,
    request: WorkspaceRequest,
    sender: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let event = match workspace::execute(client.workspace(), request).await {
            Ok(panel) => AppEvent::Workspace(panel),
            Err(err) => {
                warn!("workspace request failed: {err}");
                AppEvent::ActionError(err.to_string())
            }
        };
        let _ = sender.send(event).await;
    });
}

/// Spawn a task to stop recording and send the clip.
fn spawn_voice_query(
    client: LawfortClient,
    mut capture: VoiceCapture<FileMicrophone>,
    sender: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = capture
            .stop_and_send(client.conversation())
            .await
            .map_err(|err| err.to_string());
        let _ = sender.send(AppEvent::VoiceFinished(result)).await;
    });
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        const MOUSE_SCROLL_LINES: i16 = 3;
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    match event {
                        CrosstermEvent::Key(key) => {
                            let _ = sender.send(AppEvent::Input(key)).await;
                        }
                        CrosstermEvent::Mouse(mouse) => {
                            let lines = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                                MOUSE_SCROLL_LINES.saturating_mul(2)
                            } else {
                                MOUSE_SCROLL_LINES
                            };
                            match mouse.kind {
                                MouseEventKind::ScrollUp => {
                                    let _ = sender.send(AppEvent::Scroll(-lines)).await;
                                }
                                MouseEventKind::ScrollDown => {
                                    let _ = sender.send(AppEvent::Scroll(lines)).await;
                                }
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawfort_core::SessionStore;
    use lawfort_test_utils::ScriptedBackend;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn parse(input: &str) -> SlashCommand {
        parse_slash_command(input)
            .expect("parse")
            .expect("command")
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_slash_command("what is phishing?"), Ok(None));
        assert_eq!(parse_slash_command("/"), Ok(None));
    }

    #[test]
    fn search_keeps_the_whole_term() {
        assert_eq!(
            parse("/search  identity theft "),
            SlashCommand::Search("identity theft".to_string())
        );
        assert!(parse_slash_command("/search").is_err());
    }

    #[test]
    fn category_all_clears_the_filter() {
        assert_eq!(parse("/category all"), SlashCommand::Category(None));
        assert_eq!(
            parse("/Category Cyber Terrorism"),
            SlashCommand::Category(Some("Cyber Terrorism".to_string()))
        );
    }

    #[test]
    fn role_accepts_known_names_only() {
        assert_eq!(parse("/role Legal"), SlashCommand::Role(Role::Lawyer));
        assert_eq!(
            parse_slash_command("/role judge"),
            Err("usage: /role citizen|police|lawyer".to_string())
        );
    }

    #[test]
    fn pipe_separated_fields_fill_requests() {
        assert_eq!(
            parse("/note Bail hearing | Bring bank statements | and logs"),
            SlashCommand::Workspace(WorkspaceRequest::CreateNote(NewNote {
                title: "Bail hearing".to_string(),
                content: "Bring bank statements | and logs".to_string(),
            }))
        );
        assert_eq!(
            parse_slash_command("/client Meera | 98200"),
            Err("usage: /client <name> | <contact> | <case details>".to_string())
        );
    }

    #[test]
    fn voice_needs_a_clip() {
        assert_eq!(
            parse("/voice /tmp/question.wav"),
            SlashCommand::Voice(PathBuf::from("/tmp/question.wav"))
        );
        assert!(parse_slash_command("/voice").is_err());
        assert_eq!(parse("/send"), SlashCommand::Stop);
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            parse_slash_command("/teleport"),
            Err("unknown command: teleport".to_string())
        );
    }

    #[tokio::test]
    async fn auth_commands_wait_for_a_running_submit() {
        let client = LawfortClient::with_backend(
            Arc::new(ScriptedBackend::new()),
            "http://localhost:8000",
            SessionStore::in_memory(),
            "Hello!",
        );
        let mut app = App::new(client.base_url(), None);
        app.open_auth(AuthMode::Signup);
        app.auth_busy = true;
        let (tx, _rx) = mpsc::channel(8);
        let mut voice: Voice = None;

        for command in ["/role police", "/startover", "/login"] {
            let result =
                handle_slash_command(&client, &mut app, tx.clone(), &mut voice, command.to_string())
                    .await;
            assert!(result.is_err(), "{command} ran during a submit");
        }

        assert_eq!(app.auth.signup.draft().role, Role::Citizen);
        assert_eq!(app.auth.mode, AuthMode::Signup);
    }
}
