//! Scripted answers for interactive prompts.
//!
//! When `MOVIE_CORE_TEST_INPUTS` is set, prompts pop their answers from a
//! `|`-separated queue instead of reading the terminal. `<BLANK>` stands for
//! an empty answer.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env, io,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub const TEST_INPUTS_ENV: &str = "MOVIE_CORE_TEST_INPUTS";

struct TextQueue {
    enabled: bool,
    inputs: VecDeque<String>,
}

impl TextQueue {
    fn from_env() -> Self {
        match env::var(TEST_INPUTS_ENV) {
            Ok(raw) => Self {
                enabled: true,
                inputs: parse_text_sequences(&raw),
            },
            Err(_) => Self::new(),
        }
    }

    fn new() -> Self {
        Self {
            enabled: false,
            inputs: VecDeque::new(),
        }
    }
}

static TEXT_INPUTS: Lazy<Mutex<TextQueue>> = Lazy::new(|| Mutex::new(TextQueue::from_env()));

fn queue() -> MutexGuard<'static, TextQueue> {
    TEXT_INPUTS.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_enabled() -> bool {
    queue().enabled
}

/// Returns `Ok(None)` when scripting is off. An exhausted queue is an
/// `UnexpectedEof` error so a script can never block on the terminal.
pub fn next_text_input(label: &str) -> io::Result<Option<String>> {
    let mut guard = queue();
    if !guard.enabled {
        return Ok(None);
    }
    match guard.inputs.pop_front() {
        Some(value) => Ok(Some(value)),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("scripted inputs exhausted before prompt `{label}`"),
        )),
    }
}

fn parse_text_input(token: &str) -> String {
    match token.to_ascii_uppercase().as_str() {
        "<BLANK>" | "<EMPTY>" => String::new(),
        _ => token.to_string(),
    }
}

fn parse_text_sequences(raw: &str) -> VecDeque<String> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_text_input(trimmed))
            }
        })
        .collect()
}

pub fn install_text_inputs(inputs: Vec<String>) {
    let mut guard = queue();
    guard.enabled = true;
    guard.inputs = inputs.iter().map(|input| parse_text_input(input)).collect();
}

pub fn reset_text_inputs() {
    let mut guard = queue();
    guard.enabled = false;
    guard.inputs.clear();
}
