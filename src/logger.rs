use std::time::Instant;

use crate::state::{AppState, LogLevel, LogLine, MAX_LOGS};

pub fn log(state: &mut AppState, level: LogLevel, msg: impl Into<String>) {
    if state.logs.len() >= MAX_LOGS {
        state.logs.pop_front();
    }

    state.logs.push_back(LogLine {
        level,
        text: msg.into(),
        at: Instant::now(),
    });
}
