//! Command interpreter.
//!
//! Reads one command per line, resolves handles through the [`Registry`],
//! and runs the matching image operation. Each executed command produces an
//! [`Outcome`] or a [`ShellError`]; turning those into status lines is the
//! job of [`output`](crate::output).
//!
//! ## Command language
//!
//! ```text
//! i <path> as $h          import a P2/P3 file
//! e $h as <path>          export (never overwrites)
//! r $h clockwise <n>      rotate n quarter turns, negative = counter-clockwise
//! s $h by <factor>        box-filter resize
//! g $h                    convert to grayscale
//! y $h                    convert to luma-chroma
//! c $h                    convert to full colour
//! m $h                    mirror left-right
//! n $h                    invert brightness
//! z $h                    histogram equalization
//! d $h                    delete handle
//! l                       list handles
//! q                       quit
//! ```

use crate::config::{EqualizeConfig, ShellConfig};
use crate::imaging::{Effect, Image, TransformError, Variant};
use crate::netpbm::{self, ExportError, LoadError};
use crate::output;
use crate::registry::{Registry, RegistryError};
use log::{debug, info, warn};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Import { path: PathBuf, handle: String },
    Export { handle: String, path: PathBuf },
    Rotate { handle: String, times: i64 },
    Scale { handle: String, factor: f64 },
    Grayscale { handle: String },
    LumaChroma { handle: String },
    Color { handle: String },
    Mirror { handle: String },
    Invert { handle: String },
    Equalize { handle: String },
    Delete { handle: String },
    List,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("unrecognized command {0:?}")]
    Unrecognized(String),
    #[error("handle {0:?} must start with {1:?}")]
    BadHandle(String, char),
    #[error("not a number: {0:?}")]
    BadNumber(String),
    #[error("line is not valid UTF-8")]
    Encoding,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    ///
    /// Tokens past the ones a command needs are ignored.
    pub fn parse(line: &str, sigil: char) -> Result<Option<Command>, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&keyword) = tokens.first() else {
            return Ok(None);
        };

        let handle = |i: usize| -> Result<String, CommandError> {
            let name = tokens[i];
            if name.starts_with(sigil) && name.len() > sigil.len_utf8() {
                Ok(name.to_string())
            } else {
                Err(CommandError::BadHandle(name.to_string(), sigil))
            }
        };
        let unrecognized = || CommandError::Unrecognized(line.trim().to_string());

        let command = match (keyword, tokens.len()) {
            ("i", n) if n >= 4 && tokens[2] == "as" => Command::Import {
                path: PathBuf::from(tokens[1]),
                handle: handle(3)?,
            },
            ("e", n) if n >= 4 && tokens[2] == "as" => Command::Export {
                handle: handle(1)?,
                path: PathBuf::from(tokens[3]),
            },
            ("r", n) if n >= 4 && tokens[2] == "clockwise" => Command::Rotate {
                handle: handle(1)?,
                times: tokens[3]
                    .parse()
                    .map_err(|_| CommandError::BadNumber(tokens[3].to_string()))?,
            },
            ("s", n) if n >= 4 && tokens[2] == "by" => Command::Scale {
                handle: handle(1)?,
                factor: tokens[3]
                    .parse()
                    .map_err(|_| CommandError::BadNumber(tokens[3].to_string()))?,
            },
            ("g", n) if n >= 2 => Command::Grayscale { handle: handle(1)? },
            ("y", n) if n >= 2 => Command::LumaChroma { handle: handle(1)? },
            ("c", n) if n >= 2 => Command::Color { handle: handle(1)? },
            ("m", n) if n >= 2 => Command::Mirror { handle: handle(1)? },
            ("n", n) if n >= 2 => Command::Invert { handle: handle(1)? },
            ("z", n) if n >= 2 => Command::Equalize { handle: handle(1)? },
            ("d", n) if n >= 2 => Command::Delete { handle: handle(1)? },
            ("l", _) => Command::List,
            ("q", _) => Command::Quit,
            _ => return Err(unrecognized()),
        };
        Ok(Some(command))
    }
}

/// What a successful command did, for the `[OK]` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Import,
    Export,
    Rotate,
    Scale,
    Grayscale,
    LumaChroma,
    Color,
    Mirror,
    Invert,
    Equalize,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Import => "Import",
            Action::Export => "Export",
            Action::Rotate => "Rotate",
            Action::Scale => "Scale",
            Action::Grayscale => "Grayscale",
            Action::LumaChroma => "Luma-chroma",
            Action::Color => "Color",
            Action::Mirror => "Mirror",
            Action::Invert => "Color Inversion",
            Action::Equalize => "Equalize",
            Action::Delete => "Delete",
        })
    }
}

/// Why a command left its image untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    AlreadyGrayscale,
    AlreadyLumaChroma,
    AlreadyColor,
    InversionUndefined,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoOpReason::AlreadyGrayscale => "Already grayscale",
            NoOpReason::AlreadyLumaChroma => "Already luma-chroma",
            NoOpReason::AlreadyColor => "Already color",
            NoOpReason::InversionUndefined => "No inversion for luma-chroma",
        })
    }
}

/// One row of the `l` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub handle: String,
    pub variant: Variant,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done { action: Action, handle: String },
    NoOp { reason: NoOpReason, handle: String },
    Listing(Vec<ListingRow>),
    Quit,
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failed to load {}: {source}", path.display())]
    Load { path: PathBuf, source: LoadError },
    #[error("{} parsed to an empty image", .0.display())]
    MalformedImage(PathBuf),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Interpreter state: configuration plus every live image.
#[derive(Debug, Default)]
pub struct Shell {
    config: ShellConfig,
    registry: Registry,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn sigil(&self) -> char {
        self.config.shell.sigil.chars().next().unwrap_or('$')
    }

    /// Parse and execute one line. Blank lines yield `Ok(None)`.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Outcome>, ShellError> {
        match Command::parse(line, self.sigil())? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, ShellError> {
        debug!("executing {command:?}");
        let done = |action: Action, handle: String| -> Result<Outcome, ShellError> {
            Ok(Outcome::Done { action, handle })
        };
        let noop = |reason: NoOpReason, handle: String| -> Result<Outcome, ShellError> {
            Ok(Outcome::NoOp { reason, handle })
        };

        match command {
            Command::Import { path, handle } => {
                if self.registry.contains(&handle) {
                    return Err(RegistryError::DuplicateName(handle).into());
                }
                let image = netpbm::load_path(&path).map_err(|source| ShellError::Load {
                    path: path.clone(),
                    source,
                })?;
                if image.is_empty() {
                    return Err(ShellError::MalformedImage(path));
                }
                info!(
                    "imported {} as {handle} ({} {}x{})",
                    path.display(),
                    image.variant(),
                    image.width(),
                    image.height()
                );
                self.registry.insert(&handle, image)?;
                done(Action::Import, handle)
            }
            Command::Export { handle, path } => {
                let image = self.registry.get(&handle)?;
                netpbm::export_image(image, &path)?;
                info!("exported {handle} to {}", path.display());
                done(Action::Export, handle)
            }
            Command::Rotate { handle, times } => {
                self.registry.get_mut(&handle)?.rotate(times);
                done(Action::Rotate, handle)
            }
            Command::Scale { handle, factor } => {
                self.registry.get_mut(&handle)?.resize(factor)?;
                done(Action::Scale, handle)
            }
            Command::Grayscale { handle } => {
                if self.registry.get(&handle)?.variant() == Variant::Grayscale {
                    return noop(NoOpReason::AlreadyGrayscale, handle);
                }
                let policy = self.config.grayscale.policy;
                self.registry
                    .replace_with(&handle, |img| img.into_grayscale(policy).into())?;
                done(Action::Grayscale, handle)
            }
            Command::LumaChroma { handle } => {
                if self.registry.get(&handle)?.variant() == Variant::LumaChroma {
                    return noop(NoOpReason::AlreadyLumaChroma, handle);
                }
                self.registry
                    .replace_with(&handle, |img| img.into_luma_chroma().into())?;
                done(Action::LumaChroma, handle)
            }
            Command::Color { handle } => {
                if self.registry.get(&handle)?.variant() == Variant::Rgb {
                    return noop(NoOpReason::AlreadyColor, handle);
                }
                self.registry
                    .replace_with(&handle, |img| img.into_rgb().into())?;
                done(Action::Color, handle)
            }
            Command::Mirror { handle } => {
                self.registry.get_mut(&handle)?.mirror();
                done(Action::Mirror, handle)
            }
            Command::Invert { handle } => match self.registry.get_mut(&handle)?.invert() {
                Effect::Applied => done(Action::Invert, handle),
                Effect::Skipped => noop(NoOpReason::InversionUndefined, handle),
            },
            Command::Equalize { handle } => {
                let rules = self.config.equalize.clone();
                self.registry
                    .replace_with(&handle, |img| equalize_with_promotion(img, &rules))?;
                done(Action::Equalize, handle)
            }
            Command::Delete { handle } => {
                self.registry.remove(&handle)?;
                done(Action::Delete, handle)
            }
            Command::List => Ok(Outcome::Listing(
                self.registry
                    .iter()
                    .map(|(name, img)| ListingRow {
                        handle: name.to_string(),
                        variant: img.variant(),
                        width: img.width(),
                        height: img.height(),
                    })
                    .collect(),
            )),
            Command::Quit => {
                self.registry.clear();
                Ok(Outcome::Quit)
            }
        }
    }

    /// Read commands until `q` or end of input, writing one status block
    /// per command to `out`.
    ///
    /// The prompt is written only when `interactive` is set. A line that is
    /// not UTF-8 is reported as an invalid command. Every image is released
    /// before returning.
    pub fn run(
        &mut self,
        mut input: impl BufRead,
        out: &mut impl Write,
        interactive: bool,
    ) -> io::Result<()> {
        let prompt = self.config.shell.prompt.clone();
        let show_prompt = interactive && !prompt.is_empty();

        if show_prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let result = match std::str::from_utf8(&buf) {
                Ok(line) => self.run_line(line),
                Err(e) => {
                    warn!("skipping input line: {e}");
                    Err(CommandError::Encoding.into())
                }
            };
            for text in output::format_result(&result) {
                writeln!(out, "{text}")?;
            }
            if matches!(result, Ok(Some(Outcome::Quit))) {
                break;
            }
            if show_prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }
        }
        self.registry.clear();
        Ok(())
    }
}

/// Equalize luminance, converting through luma-chroma where needed.
///
/// - RGB → luma-chroma → equalize Y → RGB
/// - Grayscale → (RGB → luma-chroma → equalize Y → RGB → gray) or direct
/// - Luma-chroma is equalized as-is
fn equalize_with_promotion(image: Image, rules: &EqualizeConfig) -> Image {
    match image {
        Image::Rgb(_) => {
            let mut yuv = Image::from(image.into_luma_chroma());
            yuv.equalize();
            yuv.into_rgb().into()
        }
        Image::Grayscale(_) if rules.grayscale_via_luma_chroma => {
            let mut yuv = Image::from(image.into_luma_chroma());
            yuv.equalize();
            yuv.into_grayscale(rules.roundtrip_policy).into()
        }
        mut direct => {
            direct.equalize();
            direct
        }
    }
}
