//! Output formatting for frame reports

use std::io::Write;

use anyhow::Error;
use colored::*;
use serde_json::json;

use crate::error::CliError;
use crate::report::{FrameReport, ReadoutPayload};
use padscan_protocol::{ButtonState, SixAxis};

/// Print error in JSON format
///
/// Goes to stderr so stdout only ever carries frame reports.
pub fn print_error_json(error: &Error) {
    match serde_json::to_string(&error_json(error)) {
        Ok(s) => eprintln!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_json(error: &Error) -> serde_json::Value {
    json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    })
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map_or("Error", CliError::kind)
}

/// One report per line.
pub fn write_frame_json(out: &mut impl Write, report: &FrameReport) -> Result<(), CliError> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_frame_human(out: &mut impl Write, report: &FrameReport) -> Result<(), CliError> {
    writeln!(out, "{} {:5}", "FRAMECNT:".bold(), report.frame)?;
    for port in &report.ports {
        writeln!(out, "{}:", port.port)?;
        for socket in &port.sockets {
            let name = socket.controller.name();
            let name = if socket.controller.is_error() {
                name.red()
            } else {
                name.normal()
            };
            writeln!(out, "  {}: {}", socket.socket, name)?;

            match &socket.readout {
                Some(ReadoutPayload::StdPad(state)) => {
                    writeln!(out, "      {}", buttons_line(&state.buttons))?;
                }
                Some(ReadoutPayload::SixAxis(state)) => {
                    let (top, bottom) = axis_lines(&state.axes);
                    writeln!(out, "      {top}")?;
                    writeln!(out, "      {bottom}")?;
                    writeln!(out, "      {}", buttons_line(&state.buttons))?;
                }
                None => {}
            }
        }
    }
    Ok(())
}

/// Button labels separated by spaces, pressed ones highlighted.
fn buttons_line(buttons: &[ButtonState]) -> String {
    buttons
        .iter()
        .map(|b| {
            let label = b.label.to_string();
            if b.pressed {
                label.reversed().bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn axis_lines(axes: &SixAxis) -> (String, String) {
    (
        format!("X{:+4} TX{:+4} Z{:4}", axes.x, axes.tx, axes.z),
        format!("Y{:+4} TY{:+4} TZ{:4}", axes.y, axes.ty, axes.tz),
    )
}
