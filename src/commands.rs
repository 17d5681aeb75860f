//! commands.rs
//!
//! Input interpretation layer.
//!
//! Responsibilities:
//! - Translate key events into explicit form/controller actions
//! - Emit informational logs
//!
//! Non-responsibilities:
//! - Request lifecycle logic (session.rs)
//! - Response interpretation (api.rs / interpret.rs)
//! - Rendering (ui.rs)

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::Controller;
use crate::logger::log;
use crate::presets::EXAMPLES;
use crate::state::{AppState, Focus, LogLevel};

pub fn handle_event(state: &mut AppState, controller: &mut Controller, ev: Event) {
    let Event::Key(key) = ev else {
        return;
    };
    if key.kind == KeyEventKind::Release {
        return;
    }

    handle_key(state, controller, key);
}

fn handle_key(state: &mut AppState, controller: &mut Controller, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            state.ui.should_exit = true;
        }
        KeyCode::Char('c') if ctrl => {
            state.ui.should_exit = true;
        }

        KeyCode::Char('s') if ctrl => submit(state, controller),
        KeyCode::Char('l') if ctrl => clear_form(state, controller),
        KeyCode::Char('r') if ctrl => {
            controller.refresh_health();
            log(state, LogLevel::Info, "Refreshing API status...");
        }

        KeyCode::Tab => {
            state.form.focus = state.form.focus.next();
        }
        KeyCode::BackTab => {
            state.form.focus = state.form.focus.prev();
        }

        _ if state.form.focus == Focus::Examples => handle_examples_key(state, key.code),

        KeyCode::Enter => match state.form.focus {
            // multi-line body field
            Focus::EmailText => {
                state.form.email_text.push('\n');
            }
            // single-line fields submit, like an HTML form
            Focus::Subject | Focus::Sender => submit(state, controller),
            Focus::Examples => {}
        },

        KeyCode::Backspace => {
            if let Some(field) = state.form.active_field_mut() {
                field.pop();
            }
        }

        KeyCode::Char(c) if !ctrl => {
            if let Some(field) = state.form.active_field_mut() {
                field.push(c);
            }
        }

        _ => {}
    }
}

fn handle_examples_key(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Up => {
            if state.form.selected_example > 0 {
                state.form.selected_example -= 1;
            }
        }
        KeyCode::Down => {
            if state.form.selected_example + 1 < EXAMPLES.len() {
                state.form.selected_example += 1;
            }
        }
        KeyCode::Enter => {
            let preset = &EXAMPLES[state.form.selected_example];
            state.form.fill(preset);
            state.form.focus = Focus::EmailText;
            log(
                state,
                LogLevel::Info,
                format!("Loaded example: {}", preset.title),
            );
        }
        _ => {}
    }
}

fn submit(state: &mut AppState, controller: &mut Controller) {
    match controller.submit_analysis(state.form.to_input()) {
        Ok(_) => log(state, LogLevel::Info, "Analyzing email..."),
        Err(e) => log(state, LogLevel::Warn, e.message),
    }
}

fn clear_form(state: &mut AppState, controller: &mut Controller) {
    state.form.clear();
    controller.clear();
    log(state, LogLevel::Info, "Form cleared.");
}
