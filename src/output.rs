//! Status lines for the command interpreter.
//!
//! # Output Format
//!
//! ```text
//! [OK] Import $a
//! [NOP] Already grayscale $a
//! [ERROR] Token $b not found!
//! -- Invalid command! --
//! ```
//!
//! The `l` command prints one row per handle, in name order:
//!
//! ```text
//! $a grayscale 640x480
//! $b rgb 32x32
//! ```
//!
//! # Architecture
//!
//! Every function here is a pure `format_*` returning `Vec<String>` (or a
//! single `String`). Writing the lines is left to the caller, which keeps
//! the interpreter loop testable against any `Write`.

use crate::netpbm::{ExportError, LoadError};
use crate::shell::{ListingRow, Outcome, ShellError};

const INVALID_COMMAND: &str = "-- Invalid command! --";

fn status(tag: &str, message: impl std::fmt::Display) -> String {
    format!("[{tag}] {message}")
}

fn listing_line(row: &ListingRow) -> String {
    format!(
        "{} {} {}x{}",
        row.handle, row.variant, row.width, row.height
    )
}

/// Lines for a successful command. `q` prints nothing.
pub fn format_outcome(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Done { action, handle } => vec![status("OK", format!("{action} {handle}"))],
        Outcome::NoOp { reason, handle } => vec![status("NOP", format!("{reason} {handle}"))],
        Outcome::Listing(rows) if rows.is_empty() => vec!["(no images)".to_string()],
        Outcome::Listing(rows) => rows.iter().map(listing_line).collect(),
        Outcome::Quit => Vec::new(),
    }
}

/// The single line reported for a failed command.
pub fn format_error(error: &ShellError) -> String {
    match error {
        ShellError::Command(_) => INVALID_COMMAND.to_string(),
        ShellError::Registry(e) => status("ERROR", e),
        ShellError::Load {
            source: LoadError::UnsupportedFormat(_),
            ..
        } => status("ERROR", "Invalid file format"),
        ShellError::Load {
            path,
            source: LoadError::Io(_),
        } => status("ERROR", format!("Unable to open {}", path.display())),
        ShellError::MalformedImage(path) => {
            status("ERROR", format!("Malformed image {}", path.display()))
        }
        ShellError::Export(ExportError::AlreadyExists(_)) => status("ERROR", "File exists"),
        ShellError::Export(ExportError::Io(_)) => status("ERROR", "Unable to create file"),
        ShellError::Transform(e) => status("ERROR", e),
    }
}

/// Lines for whatever one input line produced. Blank lines print nothing.
pub fn format_result(result: &Result<Option<Outcome>, ShellError>) -> Vec<String> {
    match result {
        Ok(Some(outcome)) => format_outcome(outcome),
        Ok(None) => Vec::new(),
        Err(e) => vec![format_error(e)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{TransformError, Variant};
    use crate::registry::RegistryError;
    use crate::shell::{Action, CommandError, NoOpReason};
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn ok_line_names_action_and_handle() {
        let lines = format_outcome(&Outcome::Done {
            action: Action::Rotate,
            handle: "$a".into(),
        });
        assert_eq!(lines, ["[OK] Rotate $a"]);
    }

    #[test]
    fn invert_ok_line() {
        let lines = format_outcome(&Outcome::Done {
            action: Action::Invert,
            handle: "$p".into(),
        });
        assert_eq!(lines, ["[OK] Color Inversion $p"]);
    }

    #[test]
    fn noop_line() {
        let lines = format_outcome(&Outcome::NoOp {
            reason: NoOpReason::AlreadyGrayscale,
            handle: "$a".into(),
        });
        assert_eq!(lines, ["[NOP] Already grayscale $a"]);
    }

    #[test]
    fn listing_rows() {
        let lines = format_outcome(&Outcome::Listing(vec![
            ListingRow {
                handle: "$a".into(),
                variant: Variant::LumaChroma,
                width: 4,
                height: 3,
            },
            ListingRow {
                handle: "$b".into(),
                variant: Variant::Grayscale,
                width: 1,
                height: 1,
            },
        ]));
        assert_eq!(lines, ["$a luma-chroma 4x3", "$b grayscale 1x1"]);
    }

    #[test]
    fn empty_listing() {
        assert_eq!(format_outcome(&Outcome::Listing(vec![])), ["(no images)"]);
    }

    #[test]
    fn quit_and_blank_print_nothing() {
        assert!(format_outcome(&Outcome::Quit).is_empty());
        assert!(format_result(&Ok(None)).is_empty());
    }

    #[test]
    fn registry_errors() {
        let missing = ShellError::Registry(RegistryError::NotFound("$z".into()));
        assert_eq!(format_error(&missing), "[ERROR] Token $z not found!");
        let dup = ShellError::Registry(RegistryError::DuplicateName("$z".into()));
        assert_eq!(format_error(&dup), "[ERROR] Token $z exists");
    }

    #[test]
    fn invalid_command() {
        let err = ShellError::Command(CommandError::Unrecognized("wat".into()));
        assert_eq!(format_error(&err), "-- Invalid command! --");
    }

    #[test]
    fn export_errors() {
        let exists = ShellError::Export(ExportError::AlreadyExists(PathBuf::from("x.ppm")));
        assert_eq!(format_error(&exists), "[ERROR] File exists");
        let io = ShellError::Export(ExportError::Io(io::Error::other("disk full")));
        assert_eq!(format_error(&io), "[ERROR] Unable to create file");
    }

    #[test]
    fn load_errors() {
        let unsupported = ShellError::Load {
            path: "a.bmp".into(),
            source: LoadError::UnsupportedFormat("BM".into()),
        };
        assert_eq!(format_error(&unsupported), "[ERROR] Invalid file format");
        let missing = ShellError::Load {
            path: "gone.ppm".into(),
            source: LoadError::Io(io::Error::from(io::ErrorKind::NotFound)),
        };
        assert_eq!(format_error(&missing), "[ERROR] Unable to open gone.ppm");
        let malformed = ShellError::MalformedImage("bad.pgm".into());
        assert_eq!(format_error(&malformed), "[ERROR] Malformed image bad.pgm");
    }

    #[test]
    fn transform_error_uses_message() {
        let err = ShellError::Transform(TransformError::InvalidFactor(0.0));
        assert!(format_error(&err).starts_with("[ERROR] "));
    }
}
