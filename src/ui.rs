// src/ui.rs
use std::io;

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use unicode_width::UnicodeWidthStr;

use crate::controller::Controller;
use crate::interpret::{
    confidence_color_class, recommendation_set, risk_color_class, risk_description, ColorClass,
};
use crate::presets::EXAMPLES;
use crate::state::{AppState, Focus, HealthSnapshot, LogLevel, SessionState};

fn color_for(class: ColorClass) -> Color {
    match class {
        ColorClass::Danger => Color::Red,
        ColorClass::Warning => Color::Yellow,
        ColorClass::Info => Color::Cyan,
        ColorClass::Success => Color::Green,
        ColorClass::Secondary => Color::DarkGray,
    }
}

pub fn draw_ui<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &AppState,
    controller: &Controller,
) -> io::Result<()> {
    let (session, health) = controller.view();

    terminal.draw(|f| {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // header + API status
                Constraint::Min(16),   // form, result, examples
                Constraint::Length(6), // log pane
                Constraint::Length(1), // key hints
            ])
            .split(f.size());

        draw_header(f, layout[0], state, health);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(layout[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // email body
                Constraint::Length(3), // subject
                Constraint::Length(3), // sender
                Constraint::Min(6),    // verdict
            ])
            .split(body[0]);

        draw_field(
            f,
            left[0],
            "Email Content *",
            &state.form.email_text,
            state.form.focus == Focus::EmailText,
        );
        draw_field(
            f,
            left[1],
            "Subject (optional)",
            &state.form.subject,
            state.form.focus == Focus::Subject,
        );
        draw_field(
            f,
            left[2],
            "Sender (optional)",
            &state.form.sender,
            state.form.focus == Focus::Sender,
        );
        draw_result(f, left[3], session);

        draw_examples(f, body[1], state);
        draw_logs(f, layout[2], state);
        draw_hints(f, layout[3]);
    })?;

    Ok(())
}

/* ---------- header + health badges ---------- */

fn draw_header(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &AppState,
    health: &HealthSnapshot,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let title = Paragraph::new("PHISHSCOPE — Email Phishing Detector")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, cols[0]);

    let mut spans: Vec<Span> = Vec::new();

    match health.timestamp {
        None => {
            spans.push(Span::styled("Checking...", Style::default().fg(Color::DarkGray)));
        }
        Some(at) => {
            if health.is_online {
                spans.push(Span::styled("API Online", Style::default().fg(Color::Green)));
                spans.push(Span::raw("  "));
                if health.model_loaded {
                    spans.push(Span::styled("Model Ready", Style::default().fg(Color::Green)));
                } else {
                    spans.push(Span::styled(
                        "Model Not Loaded",
                        Style::default().fg(Color::Yellow),
                    ));
                }
            } else {
                spans.push(Span::styled("API Offline", Style::default().fg(Color::Red)));
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("check {}", state.config.base_url),
                    Style::default().fg(Color::Yellow),
                ));
            }
            spans.push(Span::styled(
                format!("  (checked {})", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("API Status"));
    f.render_widget(status, cols[1]);
}

/* ---------- form fields ---------- */

fn draw_field(f: &mut ratatui::Frame, area: Rect, title: &str, text: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let field = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(field, area);

    if focused {
        let last_line = text.rsplit('\n').next().unwrap_or("");
        let lines = text.matches('\n').count() as u16;
        let x = area.x + 1 + last_line.width() as u16;
        let y = area.y + 1 + lines;
        if x < area.right() && y < area.bottom() {
            f.set_cursor(x, y);
        }
    }
}

/* ---------- verdict panel ---------- */

fn draw_result(f: &mut ratatui::Frame, area: Rect, session: &SessionState) {
    let lines: Vec<Line> = match session {
        SessionState::Idle => vec![Line::from(Span::styled(
            "Paste email content above and press Ctrl+S to analyze.",
            Style::default().fg(Color::DarkGray),
        ))],

        SessionState::Submitting { .. } => vec![Line::from(Span::styled(
            "Analyzing...",
            Style::default().fg(Color::Cyan),
        ))],

        SessionState::Failed { error, .. } => vec![
            Line::from(Span::styled(
                "Analysis failed",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                error.message.clone(),
                Style::default().fg(Color::Red),
            )),
        ],

        SessionState::Succeeded { outcome, .. } => {
            let p = &outcome.prediction;
            let risk_color = color_for(risk_color_class(p.risk_level));
            let conf_color = color_for(confidence_color_class(p.confidence));

            let mut lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} Email", p.label),
                        Style::default()
                            .fg(risk_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("   "),
                    Span::styled(
                        format!("{} RISK", p.risk_level.as_str()),
                        Style::default()
                            .fg(risk_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("Confidence: "),
                    Span::styled(
                        format!("{:.1}%", p.confidence),
                        Style::default().fg(conf_color),
                    ),
                ]),
            ];

            let description = risk_description(p.risk_level);
            if !description.is_empty() {
                lines.push(Line::from(Span::styled(
                    description,
                    Style::default().fg(risk_color),
                )));
            }

            lines.push(Line::from(Span::styled(
                format!(
                    "Features analyzed: {}   Model: v{}",
                    outcome.metadata.feature_count, outcome.metadata.model_version
                ),
                Style::default().fg(Color::DarkGray),
            )));

            if !outcome.input_data.email_text.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("Analyzed: {}", outcome.input_data.email_text),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Recommendations:",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let advice_color = if p.is_phishing { Color::Red } else { Color::Green };
            for rec in recommendation_set(p.is_phishing) {
                lines.push(Line::from(Span::styled(
                    format!("- {}", rec),
                    Style::default().fg(advice_color),
                )));
            }

            lines
        }
    };

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Verdict"));
    f.render_widget(panel, area);
}

/* ---------- examples ---------- */

fn draw_examples(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let focused = state.form.focus == Focus::Examples;

    let lines: Vec<Line> = EXAMPLES
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            let marker = if ex.phishing { "!" } else { "+" };
            let base = if ex.phishing { Color::Red } else { Color::Green };

            let mut style = Style::default().fg(base);
            let mut prefix = "  ";
            if focused && i == state.form.selected_example {
                style = style.add_modifier(Modifier::REVERSED);
                prefix = "> ";
            }

            Line::from(Span::styled(
                format!("{}{} {} — {}", prefix, marker, ex.title, ex.subject),
                style,
            ))
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Examples (Enter to load)"),
    );
    f.render_widget(list, area);
}

/* ---------- logs + hints ---------- */

fn draw_logs(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let logs: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .rev()
        .map(|l| {
            let color = match l.level {
                LogLevel::Info => Color::White,
                LogLevel::Success => Color::Green,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Error => Color::Red,
            };
            Line::from(Span::styled(&l.text, Style::default().fg(color)))
        })
        .collect();

    let log_view =
        Paragraph::new(logs).block(Block::default().borders(Borders::ALL).title("Activity"));
    f.render_widget(log_view, area);
}

fn draw_hints(f: &mut ratatui::Frame, area: Rect) {
    let hints = Paragraph::new(
        "Tab: switch field   Ctrl+S: analyze   Ctrl+L: clear   Ctrl+R: refresh API   Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, area);
}
