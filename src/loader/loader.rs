use std::fs;

use super::error::LoaderError;
use crate::graph::{StateId, TransitionGraph};

//─────────────────────────────────────────────────────────────────────────────

/// Loads an explicit transition file into a `TransitionGraph`.
pub fn load_graph(file_path: &str) -> Result<TransitionGraph, LoaderError> {
    let file_content =
        fs::read_to_string(file_path).map_err(|e| LoaderError::ReadFile(file_path.into(), e))?;
    parse_graph(file_path, &file_content)
}

/// Parses the content of an explicit transition file.
///
/// `source_name` is only used in error messages.
pub fn parse_graph(source_name: &str, content: &str) -> Result<TransitionGraph, LoaderError> {
    let parse_error = |line: usize, reason: String| LoaderError::Parse {
        path: source_name.to_string(),
        line,
        reason,
    };

    let mut declared_states: Option<usize> = None;
    let mut declared_transitions: Option<(usize, usize)> = None;
    let mut transitions: Vec<(StateId, StateId, f64)> = Vec::new();
    // highest state index seen and the line it appeared on
    let mut highest: Option<(StateId, usize)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [model_type] if transitions.is_empty() => {
                if !model_type.eq_ignore_ascii_case("dtmc") {
                    return Err(parse_error(
                        line_no,
                        format!("unsupported model type '{}', expected 'dtmc'", model_type),
                    ));
                }
            }
            [keyword, value] if keyword.eq_ignore_ascii_case("STATES") => {
                let n = value.parse::<usize>().map_err(|e| {
                    parse_error(line_no, format!("invalid state count '{}': {}", value, e))
                })?;
                declared_states = Some(n);
            }
            [keyword, value] if keyword.eq_ignore_ascii_case("TRANSITIONS") => {
                let m = value.parse::<usize>().map_err(|e| {
                    parse_error(
                        line_no,
                        format!("invalid transition count '{}': {}", value, e),
                    )
                })?;
                declared_transitions = Some((m, line_no));
            }
            [source, destination, probability] => {
                let source = parse_state(source)
                    .map_err(|reason| parse_error(line_no, reason))?;
                let destination = parse_state(destination)
                    .map_err(|reason| parse_error(line_no, reason))?;
                let probability = probability.parse::<f64>().map_err(|e| {
                    parse_error(
                        line_no,
                        format!("invalid probability '{}': {}", probability, e),
                    )
                })?;
                let top = source.max(destination);
                if highest.map_or(true, |(h, _)| top > h) {
                    highest = Some((top, line_no));
                }
                transitions.push((source, destination, probability));
            }
            _ => {
                return Err(parse_error(
                    line_no,
                    format!("expected '<src> <dst> <prob>', found '{}'", line),
                ))
            }
        }
    }

    if let Some((expected, line_no)) = declared_transitions {
        if expected != transitions.len() {
            return Err(parse_error(
                line_no,
                format!(
                    "header declares {} transitions but {} were listed",
                    expected,
                    transitions.len()
                ),
            ));
        }
    }

    let num_states = match (declared_states, highest) {
        (Some(n), _) => n,
        (None, Some((top, line_no))) => top.checked_add(1).ok_or_else(|| {
            parse_error(
                line_no,
                format!("state index {} leaves no room for a state count", top),
            )
        })?,
        (None, None) => 0,
    };
    Ok(TransitionGraph::from_transitions(num_states, transitions)?)
}

fn parse_state(token: &str) -> Result<StateId, String> {
    token
        .parse::<StateId>()
        .map_err(|e| format!("invalid state index '{}': {}", token, e))
}
