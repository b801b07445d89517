//! Source resolution: input locator + optional format hint -> readable line stream.
//!
//! All failures here happen before the engine sees a single line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use flate2::read::MultiGzDecoder;
use reqwest::Url;
use tracing::debug;

use crate::error::ValidateError;
use crate::report::Message;
use crate::types::InputFileType;

/// Shortest locator that can hold a scheme and a path ("s://p").
pub const MIN_LOCATOR_LEN: usize = 5;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
  Stdin,
  File(PathBuf),
  Resource(Url),
}

impl fmt::Display for Locator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Stdin => f.write_str("stdin"),
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Resource(url) => f.write_str(url.as_str()),
    }
  }
}

/// Where to read from and how to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
  pub locator: Locator,
  pub format: InputFileType,
}

impl Source {
  /// Map an input URL to a source. An empty URL means piped stdin, which is
  /// plain JSONL unless the hint says gzip.
  pub fn resolve(input_url: &str, hint: Option<InputFileType>) -> Result<Self, ValidateError> {
    if input_url.is_empty() {
      return Ok(Self {
        locator: Locator::Stdin,
        format: hint.unwrap_or(InputFileType::Jsonl),
      });
    }
    check_len(input_url)?;

    let url = Url::parse(input_url).map_err(|e| ValidateError::LocatorParse {
      url: input_url.to_string(),
      reason: e.to_string(),
    })?;

    match url.scheme() {
      "file" => {
        let path = url
          .to_file_path()
          .unwrap_or_else(|_| PathBuf::from(url.path()));
        let format = select_format(url.path(), hint)
          .ok_or_else(|| ValidateError::UnknownFileFormat(path.display().to_string()))?;
        Ok(Self {
          locator: Locator::File(path),
          format,
        })
      }
      "http" | "https" => {
        let format = select_format(url.path(), hint)
          .ok_or_else(|| ValidateError::UnknownResourceFormat(input_url.to_string()))?;
        Ok(Self {
          locator: Locator::Resource(url),
          format,
        })
      }
      other => Err(ValidateError::UnsupportedScheme(other.to_string())),
    }
  }

  pub fn progress_message(&self) -> Message {
    match self.locator {
      Locator::Stdin => Message::ValidatingStdin,
      Locator::File(_) => Message::ValidatingFile(self.format),
      Locator::Resource(_) => Message::ValidatingResource(self.format),
    }
  }

  /// Open the underlying resource and layer gzip decoding on top if needed.
  ///
  /// For gzip input the header is read here, so a body that is not gzip
  /// fails now rather than part way through a scan.
  pub fn open(&self, http_timeout: Option<Duration>) -> Result<Box<dyn BufRead>, ValidateError> {
    let raw: Box<dyn Read> = match &self.locator {
      Locator::Stdin => open_stdin()?,
      Locator::File(path) => {
        debug!(path = %path.display(), "opening file");
        let file = File::open(path).map_err(|source| ValidateError::OpenFile {
          path: path.display().to_string(),
          source,
        })?;
        Box::new(file)
      }
      Locator::Resource(url) => fetch(url, http_timeout)?,
    };

    match self.format {
      InputFileType::Jsonl => Ok(Box::new(BufReader::new(raw))),
      InputFileType::Gz => {
        let mut reader = BufReader::new(MultiGzDecoder::new(raw));
        reader.fill_buf().map_err(|source| ValidateError::GzipRead {
          location: self.locator.to_string(),
          source,
        })?;
        Ok(Box::new(reader))
      }
    }
  }
}

/// Reject a non-empty locator too short to name any source.
pub fn check_len(input_url: &str) -> Result<(), ValidateError> {
  if input_url.len() < MIN_LOCATOR_LEN {
    return Err(ValidateError::LocatorTooShort(input_url.to_string()));
  }
  Ok(())
}

/// The path's own suffix wins; the hint decides only when the suffix is silent
/// or names the other format. JSONL is checked first.
fn select_format(path: &str, hint: Option<InputFileType>) -> Option<InputFileType> {
  if path.ends_with("jsonl") || hint == Some(InputFileType::Jsonl) {
    Some(InputFileType::Jsonl)
  } else if path.ends_with("gz") || hint == Some(InputFileType::Gz) {
    Some(InputFileType::Gz)
  } else {
    None
  }
}

fn open_stdin() -> Result<Box<dyn Read>, ValidateError> {
  let stdin = io::stdin();
  if stdin.is_terminal() {
    return Err(ValidateError::StdinNotPiped);
  }
  debug!("reading piped stdin");
  Ok(Box::new(stdin.lock()))
}

fn fetch(url: &Url, timeout: Option<Duration>) -> Result<Box<dyn Read>, ValidateError> {
  let client = reqwest::blocking::Client::builder()
    .connect_timeout(CONNECT_TIMEOUT)
    .timeout(timeout)
    .build()
    .map_err(|e| ValidateError::fetch(url.as_str(), e))?;
  let response = client
    .get(url.clone())
    .send()
    .and_then(|r| r.error_for_status())
    .map_err(|e| ValidateError::fetch(url.as_str(), e))?;
  debug!(url = %url, status = %response.status(), "fetched resource");
  Ok(Box::new(response))
}
