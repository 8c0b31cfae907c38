use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use galaxy_core::utils::prelude::Error;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

const EXCERPT_LENGTH: usize = 48;

pub(crate) fn print_loading(text: &str) {
    print_colourful_prefix("Loading", Color::Magenta, text)
}

pub(crate) fn print_loaded(duration: Duration, definitions: usize) {
    print_colourful_prefix(
        "Loaded",
        Color::Green,
        &format!("{definitions} definition(s) in {}", seconds(duration))
    )
}

pub(crate) fn print_evaluating(text: &str) {
    print_colourful_prefix("Evaluating", Color::Cyan, &excerpt(text))
}

pub(crate) fn print_evaluated(duration: Duration, steps: u64) {
    print_colourful_prefix(
        "Evaluated",
        Color::Green,
        &format!("in {} ({steps} steps)", seconds(duration))
    )
}

pub(crate) fn print_interrupted() {
    print_colourful_prefix("Interrupted", Color::Red, "evaluation stopped")
}

pub(crate) fn print_error(err: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    err.pretty(&mut buffer);
    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LENGTH) {
        Some((idx, _)) => format!("{} ...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >12}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
