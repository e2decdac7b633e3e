//! Rendering routines for the LawFort TUI.

use crate::app::{App, AuthFocus, PortalContent, View};
use lawfort_core::catalog::{self, BrowseMode};
use lawfort_core::{AuthMode, ContentSource, SignupStep};
use lawfort_protocol::awareness_section_title;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

// ── Theme ──────────────────────────────────────────────────────────────

const PRIMARY: Color = Color::Rgb(212, 175, 55); // gold
const SECONDARY: Color = Color::Rgb(230, 196, 92);
const TEXT: Color = Color::Rgb(238, 238, 238);
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
const BORDER: Color = Color::Rgb(60, 60, 60);
const BORDER_ACTIVE: Color = Color::Rgb(230, 196, 92);
const GREEN: Color = Color::Rgb(120, 220, 140);
const RED: Color = Color::Rgb(255, 110, 110);

const HEADER_HEIGHT: u16 = 8; // 6 inner lines + 2 border lines
const ACCOUNT_WIDGET_WIDTH: u16 = 26;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HERO_ART: [&str; 2] = [
    " █    █▀▀█ █ █ █ █▀▀▀ █▀▀█ █▀▀▄ ▀█▀",
    " █▄▄▄ █▀▀█ ▀▄▀▄▀ █▀▀  █▄▄█ █▀▀▄  █ ",
];

/// Slash commands listed in the palette.
const COMMANDS: [(&str, &str); 25] = [
    ("/chat", "Open or close the assistant"),
    ("/voice <file>", "Start a voice query from a clip"),
    ("/stop  /cancel", "Send or discard the voice query"),
    ("/library", "Browse the law library"),
    ("/search <term>", "Search laws"),
    ("/category <name|all>", "Filter laws by category"),
    ("/clear", "Reset library filters"),
    ("/login  /signup", "Open the account forms"),
    ("/role <role>", "citizen, police or lawyer"),
    ("/startover", "Back to signup details"),
    ("/logout", "Sign out"),
    ("/helpline", "Emergency helplines"),
    ("/recovery", "Recovery steps after an incident"),
    ("/awareness", "Scam awareness guide"),
    ("/notes  /records", "Lawyer notebook and records"),
    ("/timeline  /roadmap", "Case timeline and roadmap"),
    ("/clients  /evidence", "Clients and evidence vault"),
    ("/note <title> | <text>", "Add a note"),
    ("/record <case> | <title> | <text>", "Add an investigation record"),
    ("/event <case> | <date> | <text>", "Add a timeline event"),
    ("/client <name> | <contact> | <case>", "Add a client"),
    ("/step <case> | <stage> | <milestone>", "Add a roadmap step"),
    ("/upload <file>", "Upload evidence"),
    ("/summary <details>", "Generate a case summary"),
    ("/draft <type> | <details>", "Generate a legal draft"),
];

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header bar
            Constraint::Min(0),                // active view
            Constraint::Length(3),             // input
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    match app.view {
        View::Chat => draw_chat(frame, app, root[1]),
        _ => draw_view(frame, app, root[1]),
    }
    if app.show_slash_commands {
        draw_slash_palette(frame, root[1]);
    }
    draw_input(frame, app, root[2]);
    draw_status_bar(frame, app, root[3]);
}

/// Draw the header with the banner, greeting, and view tabs.
fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ACCOUNT_WIDGET_WIDTH),
        ])
        .split(area);

    let left_block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::BOTTOM)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = left_block.inner(cols[0]);
    frame.render_widget(left_block, cols[0]);

    let label_style = Style::default().fg(TEXT_MUTED);
    let value_style = Style::default().fg(TEXT);
    let art_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'_>> = Vec::new();
    for (i, art_line) in HERO_ART.iter().enumerate() {
        if i == HERO_ART.len() - 1 {
            lines.push(Line::from(vec![
                Span::styled(*art_line, art_style),
                Span::styled(format!("  v{VERSION}"), label_style),
            ]));
        } else {
            lines.push(Line::from(Span::styled(*art_line, art_style)));
        }
    }

    let greeting = match &app.session {
        Some(session) => format!("  Welcome, {} ({})", session.name, session.role),
        None => "  Browsing as guest. Use /login or /signup.".to_string(),
    };
    lines.push(Line::from(Span::styled(greeting, value_style)));
    lines.push(Line::from(vec![
        Span::styled("  backend ", label_style),
        Span::styled(app.base_url.as_str(), value_style),
    ]));

    let mut tabs = vec![Span::raw(" ")];
    for view in View::ALL {
        if view == View::Workspace && !app.is_lawyer() {
            continue;
        }
        let style = if view == app.view {
            Style::default()
                .fg(Color::Rgb(10, 10, 10))
                .bg(PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            label_style
        };
        tabs.push(Span::styled(format!(" {} ", view.title()), style));
        tabs.push(Span::raw(" "));
    }
    lines.push(Line::from(tabs));

    frame.render_widget(Paragraph::new(lines), inner);
    draw_account_widget(frame, app, cols[1]);
}

/// Draw the signed-in user's reading stats.
fn draw_account_widget(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::RIGHT | Borders::BOTTOM)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(" Account ", Style::default().fg(TEXT_MUTED)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let label_style = Style::default().fg(TEXT_MUTED);
    let value_style = Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD);
    let lines = match &app.session {
        Some(session) => vec![
            Line::from(Span::styled(
                format!(" {}", session.role),
                Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(" laws read  ", label_style),
                Span::styled(session.stats.laws_read.to_string(), value_style),
            ]),
            Line::from(vec![
                Span::styled(" saved      ", label_style),
                Span::styled(session.stats.saved_items.to_string(), value_style),
            ]),
            Line::from(vec![
                Span::styled(" tests      ", label_style),
                Span::styled(session.stats.tests_taken.to_string(), value_style),
            ]),
        ],
        None => vec![Line::from(Span::styled(" guest", label_style))],
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the chat transcript with border and scrollbar.
fn draw_chat(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let lines = app.render_lines();
    let title = if app.recording {
        " Legal Assistant (recording) "
    } else {
        " Legal Assistant "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(title, Style::default().fg(TEXT_MUTED)));

    let inner = block.inner(area);
    let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
    let content_height = inner.height as usize;

    let total_lines = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width)
        .max(1);
    let max_scroll = total_lines.saturating_sub(content_height) as u16;
    app.update_scroll_bounds(max_scroll);
    let scroll = app.scroll;

    let chat = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(block, area);
    frame.render_widget(
        chat,
        Rect {
            width: content_width,
            ..inner
        },
    );
    draw_scrollbar(frame, inner, total_lines, content_height, scroll);
}

/// Draw a non-chat view with its own scroll state.
fn draw_view(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let (title, lines) = match app.view {
        View::Library => (" Law Library ".to_string(), render_library_lines(app)),
        View::Auth => (" Account ".to_string(), render_auth_lines(app)),
        View::Portal => (" Cyber Portal ".to_string(), render_portal_lines(app)),
        View::Workspace => (
            format!(
                " {} ",
                app.workspace
                    .as_ref()
                    .map_or("Workspace", |panel| panel.title.as_str())
            ),
            render_workspace_lines(app),
        ),
        View::Chat => (String::new(), Vec::new()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(
            title,
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    let content_width = inner.width.saturating_sub(1);
    let content_height = inner.height as usize;

    let total_lines = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width)
        .max(1);
    let max_scroll = total_lines.saturating_sub(content_height) as u16;
    app.update_view_scroll_bounds(max_scroll);
    let scroll = app.view_scroll;

    let view = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(block, area);
    frame.render_widget(
        view,
        Rect {
            width: content_width,
            ..inner
        },
    );
    draw_scrollbar(frame, inner, total_lines, content_height, scroll);
}

fn draw_scrollbar(
    frame: &mut Frame<'_>,
    inner: Rect,
    total_lines: usize,
    content_height: usize,
    scroll: u16,
) {
    if total_lines <= content_height {
        return;
    }
    let mut scrollbar_state = ScrollbarState::default()
        .content_length(total_lines)
        .position(scroll as usize)
        .viewport_content_length(content_height);
    let scrollbar_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: inner.y,
        width: 1,
        height: inner.height,
    };
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(BORDER))
            .thumb_style(Style::default().fg(TEXT_MUTED)),
        scrollbar_area,
        &mut scrollbar_state,
    );
}

/// Draw the input box with border and cursor.
fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = match app.view {
        View::Chat => " Ask a legal question ".to_string(),
        View::Library => " Search laws ".to_string(),
        View::Auth => match (app.auth_busy, app.focused_auth_field()) {
            (true, _) => " Please wait ".to_string(),
            (false, Some(focus)) => format!(" {} ", focus.label(app.auth.signup.draft().role)),
            (false, None) => " Input ".to_string(),
        },
        View::Portal | View::Workspace => " Command ".to_string(),
    };
    let placeholder = match app.view {
        View::Chat => "Type your question...",
        View::Library => "Type a search term...",
        View::Auth => "Type a value, Enter on empty input submits",
        View::Portal | View::Workspace => "Type / for commands",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACTIVE))
        .title(Span::styled(title, Style::default().fg(SECONDARY)));
    let inner = block.inner(area);

    let shown = if app.masks_input() {
        "*".repeat(app.input.chars().count())
    } else {
        app.input.clone()
    };
    let prompt_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);
    let input_text = if app.input.is_empty() {
        Line::from(vec![
            Span::styled(" ", prompt_style),
            Span::styled(placeholder, Style::default().fg(TEXT_MUTED)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" ", prompt_style),
            Span::styled(shown, Style::default().fg(TEXT)),
        ])
    };

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(input_text), inner);
    frame.set_cursor_position((inner.x + 1 + app.input.chars().count() as u16, inner.y));
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = match app.status.as_str() {
        "thinking" | "recording" => PRIMARY,
        "idle" => TEXT_MUTED,
        _ => SECONDARY,
    };

    let mut shortcuts = vec![
        Span::styled(" Ctrl+C", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Ctrl+O", Style::default().fg(TEXT_MUTED)),
        Span::styled(" assistant", Style::default().fg(BORDER)),
        Span::styled("  /", Style::default().fg(TEXT_MUTED)),
        Span::styled(" commands", Style::default().fg(BORDER)),
        Span::styled("  PgUp/PgDn", Style::default().fg(TEXT_MUTED)),
        Span::styled(" scroll", Style::default().fg(BORDER)),
    ];
    if app.view == View::Auth {
        shortcuts.push(Span::styled("  Tab", Style::default().fg(TEXT_MUTED)));
        shortcuts.push(Span::styled(" next field", Style::default().fg(BORDER)));
    }

    let right_text = format!(" {} ", app.status);
    let right_len = right_text.chars().count() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len,
        ..area
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(status_color),
        ))),
        right_area,
    );
}

fn draw_slash_palette(frame: &mut Frame<'_>, area: Rect) {
    let cmd_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(TEXT_MUTED);
    let hint_style = Style::default()
        .fg(TEXT_MUTED)
        .add_modifier(Modifier::ITALIC);

    let width = COMMANDS
        .iter()
        .map(|(command, _)| command.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let mut lines = vec![Line::from(vec![])];
    for (command, description) in COMMANDS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {command:<width$}"), cmd_style),
            Span::styled(description, desc_style),
        ]));
    }
    lines.push(Line::from(vec![]));
    lines.push(Line::from(Span::styled("  Esc to close", hint_style)));

    let height = area.height.min(lines.len() as u16 + 2); // +2 for border
    let palette_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(height),
        width: area.width.saturating_sub(2).min(76),
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY))
        .title(Span::styled(
            " Commands ",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    frame.render_widget(Paragraph::new(lines).block(block), palette_area);
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text.into()),
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
    ))
}

fn body(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text.into()),
        Style::default().fg(TEXT),
    ))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text.into()),
        Style::default().fg(TEXT_MUTED),
    ))
}

fn colored(text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text.into()),
        Style::default().fg(color),
    ))
}

pub(crate) fn render_library_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match app.catalog.mode() {
        BrowseMode::Categories => {
            lines.push(heading("Browse by category"));
            lines.push(muted("Type a term to search, or /category <name> to filter."));
            lines.push(Line::from(""));
            for category in catalog::categories() {
                let count = catalog::filter(catalog::laws(), "", Some(category.title)).len();
                let count_label = match count {
                    0 => String::new(),
                    1 => "  (1 law)".to_string(),
                    n => format!("  ({n} laws)"),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}", category.title), Style::default().fg(TEXT)),
                    Span::styled(count_label, Style::default().fg(TEXT_MUTED)),
                ]));
            }
        }
        BrowseMode::Results => {
            let results = app.catalog.results();
            let mut filters = Vec::new();
            if !app.catalog.search().trim().is_empty() {
                filters.push(format!("search \"{}\"", app.catalog.search().trim()));
            }
            if let Some(category) = app.catalog.category() {
                filters.push(format!("category \"{category}\""));
            }
            lines.push(muted(format!(
                "{} result(s) for {}  (/clear to reset)",
                results.len(),
                filters.join(" and ")
            )));
            lines.push(Line::from(""));
            if results.is_empty() {
                lines.push(body("No laws match your search."));
            }
            for law in results {
                lines.push(heading(law.title));
                lines.push(muted(format!("{} | {}", law.category, law.year)));
                lines.push(body(law.description));
                lines.push(colored(format!("In simple terms: {}", law.simplified), SECONDARY));
                if !law.sections.is_empty() {
                    lines.push(muted(format!("Sections: {}", law.sections.join(", "))));
                }
                if !law.tags.is_empty() {
                    lines.push(muted(format!("Tags: {}", law.tags.join(", "))));
                }
                lines.push(Line::from(""));
            }
        }
    }
    lines
}

fn render_auth_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(session) = &app.session {
        lines.push(colored(
            format!(
                "Signed in as {} ({}). Use /logout to sign out.",
                session.name, session.role
            ),
            GREEN,
        ));
        lines.push(Line::from(""));
    }

    let tab = |mode: AuthMode, label: &'static str| {
        if app.auth.mode == mode {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(Color::Rgb(10, 10, 10))
                    .bg(PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(TEXT_MUTED))
        }
    };
    lines.push(Line::from(vec![
        Span::raw(" "),
        tab(AuthMode::Login, "Login"),
        Span::raw(" "),
        tab(AuthMode::Signup, "Sign Up"),
    ]));
    lines.push(Line::from(""));

    let role = app.auth.signup.draft().role;
    if app.auth.mode == AuthMode::Signup {
        match app.auth.signup.step() {
            SignupStep::Details => {
                lines.push(muted(format!(
                    "Role: {role}  (change with /role citizen|police|lawyer)"
                )));
            }
            SignupStep::Verify => {
                lines.push(body(format!(
                    "Enter the {}-digit code sent to {}",
                    lawfort_core::auth::OTP_LENGTH,
                    app.auth.signup.draft().contact.trim()
                )));
                lines.push(muted("Details are locked. Use /startover to change them."));
            }
        }
        lines.push(Line::from(""));
    }

    let focused = app.focused_auth_field();
    for field in app.auth_fields() {
        let value = app.auth_value(field);
        let shown = if field == AuthFocus::Code {
            code_slots(value)
        } else if field.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let is_focused = Some(field) == focused;
        let marker_style = if is_focused {
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        lines.push(Line::from(vec![
            Span::styled(if is_focused { " > " } else { "   " }, marker_style),
            Span::styled(format!("{:<18}", field.label(role)), marker_style),
            Span::styled(shown, Style::default().fg(TEXT)),
        ]));
    }

    lines.push(Line::from(""));
    if app.auth_busy {
        lines.push(muted("Please wait..."));
    }
    if let Some(notice) = &app.auth.notice {
        lines.push(colored(notice.clone(), GREEN));
    }
    if let Some(error) = &app.auth.error {
        lines.push(colored(error.clone(), RED));
    }
    lines.push(muted(
        "Type a value and press Enter to fill the marked field. Enter on an empty line submits.",
    ));
    lines
}

/// Show entered digits followed by blanks, e.g. `1 2 4 _ _ _`.
fn code_slots(code: &str) -> String {
    let mut slots: Vec<String> = code.chars().map(String::from).collect();
    while slots.len() < lawfort_core::auth::OTP_LENGTH {
        slots.push("_".to_string());
    }
    slots.join(" ")
}

fn render_portal_lines(app: &App) -> Vec<Line<'static>> {
    let Some(content) = &app.portal else {
        return vec![muted("Use /helpline, /recovery, or /awareness.")];
    };
    let mut lines = Vec::new();
    if content.source() == ContentSource::Fallback {
        lines.push(colored(
            "Showing built-in guidance; the server could not be reached.",
            SECONDARY,
        ));
        lines.push(Line::from(""));
    }
    match content {
        PortalContent::Helpline(page) => {
            let helpline = &page.content;
            lines.push(heading(format!(
                "National Cyber Crime Helpline: {}",
                helpline.helpline
            )));
            lines.push(body(helpline.message.clone()));
            if !helpline.regional.is_empty() {
                lines.push(Line::from(""));
                lines.push(heading("Regional helplines"));
                for regional in &helpline.regional {
                    lines.push(body(format!("{}: {}", regional.state, regional.number)));
                }
            }
        }
        PortalContent::Recovery(page) => {
            let guide = &page.content;
            lines.push(heading(guide.title.clone()));
            if !guide.description.is_empty() {
                lines.push(body(guide.description.clone()));
            }
            for section in &guide.sections {
                lines.push(Line::from(""));
                lines.push(heading(section.title.clone()));
                for (idx, step) in section.steps.iter().enumerate() {
                    lines.push(body(format!("{}. {step}", idx + 1)));
                }
            }
        }
        PortalContent::Awareness(page) => {
            let awareness = &page.content;
            lines.push(heading(awareness.title.clone()));
            for (key, items) in awareness.sections() {
                lines.push(Line::from(""));
                lines.push(heading(awareness_section_title(key)));
                for item in items {
                    lines.push(body(format!("- {item}")));
                }
            }
        }
    }
    lines
}

fn render_workspace_lines(app: &App) -> Vec<Line<'static>> {
    match &app.workspace {
        Some(panel) => panel.lines.iter().map(|line| body(line.clone())).collect(),
        None => vec![muted(
            "Use /notes, /records, /timeline, /clients, /roadmap, or /evidence.",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn library_search_lists_matching_laws() {
        let mut app = App::new("http://localhost:8000", None);
        app.catalog.set_search("identity");

        let lines = text(&render_library_lines(&app));

        assert_eq!(lines[0], " 1 result(s) for search \"identity\"  (/clear to reset)");
        assert_eq!(lines[2], " Section 66C - Identity Theft");
    }

    #[test]
    fn library_without_filters_lists_categories() {
        let app = App::new("http://localhost:8000", None);

        let lines = text(&render_library_lines(&app));

        assert_eq!(lines[0], " Browse by category");
        assert_eq!(lines.len(), 3 + catalog::categories().count());
    }

    #[test]
    fn palette_lists_only_known_commands() {
        let words: Vec<&str> = COMMANDS
            .iter()
            .flat_map(|(command, _)| command.split_whitespace())
            .filter(|word| word.starts_with('/'))
            .collect();
        for word in &words {
            if let Err(err) = crate::parse_slash_command(word) {
                assert!(!err.starts_with("unknown command"), "{word}: {err}");
            }
        }
        for command in ["/record", "/event", "/step", "/client", "/note"] {
            assert!(words.contains(&command), "{command} missing from palette");
        }
    }

    #[test]
    fn code_slots_pad_missing_digits() {
        assert_eq!(code_slots("124"), "1 2 4 _ _ _");
        assert_eq!(code_slots(""), "_ _ _ _ _ _");
    }
}
