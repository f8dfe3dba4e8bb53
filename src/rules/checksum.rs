// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rules verifying the checksum of a file.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::RuleError;

use super::builtin::{cache_id_of, Rule};
use super::context::RuleContext;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Md5 => "md5",
            HashType::Sha1 => "sha1",
            HashType::Sha256 => "sha256",
            HashType::Sha384 => "sha384",
            HashType::Sha512 => "sha512",
        }
    }

    /// Lower-case hex digest of `bytes`.
    pub fn digest(&self, bytes: &[u8]) -> String {
        match self {
            HashType::Md5 => format!("{:x}", Md5::digest(bytes)),
            HashType::Sha1 => format!("{:x}", Sha1::digest(bytes)),
            HashType::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            HashType::Sha384 => format!("{:x}", Sha384::digest(bytes)),
            HashType::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }
}

impl std::str::FromStr for HashType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashType::Md5),
            "sha1" => Ok(HashType::Sha1),
            "sha256" => Ok(HashType::Sha256),
            "sha384" => Ok(HashType::Sha384),
            "sha512" => Ok(HashType::Sha512),
            _ => Err(RuleError::Misconfigured(format!(
                "Unsupported hash type: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Line separator text files are normalized to before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Windows,
}

impl LineSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Unix => "\n",
            LineSeparator::Windows => "\r\n",
        }
    }

    /// Rewrite every `\n` or `\r\n` line ending to this separator.
    pub fn normalize(&self, text: &str) -> String {
        let unix = text.replace("\r\n", "\n");
        match self {
            LineSeparator::Unix => unix,
            LineSeparator::Windows => unix.replace('\n', "\r\n"),
        }
    }
}

/// Character encodings text files can be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    UsAscii,
    Iso8859_1,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::UsAscii => "US-ASCII",
            TextEncoding::Iso8859_1 => "ISO-8859-1",
        }
    }

    fn decode(&self, bytes: Vec<u8>) -> Result<String, String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
            TextEncoding::UsAscii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(format!("byte {} is not US-ASCII", pos));
                }
                String::from_utf8(bytes).map_err(|e| e.to_string())
            }
            TextEncoding::Iso8859_1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 | TextEncoding::UsAscii => text.as_bytes().to_vec(),
            // Decoded from single bytes, so every char fits.
            TextEncoding::Iso8859_1 => text.chars().map(|c| c as u32 as u8).collect(),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(TextEncoding::Utf8),
            "US-ASCII" | "ASCII" => Ok(TextEncoding::UsAscii),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(TextEncoding::Iso8859_1),
            _ => Err(RuleError::Misconfigured(format!(
                "Unsupported encoding: {}",
                s
            ))),
        }
    }
}

/// Checks that a file has an expected checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequireFileChecksum {
    /// File to hash, relative to the project base directory.
    pub file: Option<PathBuf>,

    /// Expected checksum, compared case-insensitively.
    pub checksum: Option<String>,

    /// Hash algorithm name.
    #[serde(rename = "type")]
    pub hash_type: Option<String>,

    /// Message used when the checksum does not match.
    pub message: Option<String>,

    /// Message used when the file does not exist.
    pub nonexistent_file_message: Option<String>,
}

impl RequireFileChecksum {
    pub fn new(
        file: impl Into<PathBuf>,
        checksum: impl Into<String>,
        hash_type: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(file.into()),
            checksum: Some(checksum.into()),
            hash_type: Some(hash_type.into()),
            ..Self::default()
        }
    }

    /// Validate settings and the file, hash the bytes produced by `read`,
    /// and compare against the expected checksum.
    fn verify<F>(&self, context: &RuleContext, read: F) -> Result<(), RuleError>
    where
        F: FnOnce(&Path) -> Result<Vec<u8>, RuleError>,
    {
        let file = self
            .file
            .as_deref()
            .ok_or_else(|| RuleError::Misconfigured("Input file unspecified".to_string()))?;
        let hash_type: HashType = self
            .hash_type
            .as_deref()
            .ok_or_else(|| RuleError::Misconfigured("Hash type unspecified".to_string()))?
            .parse()?;
        let expected = self
            .checksum
            .as_deref()
            .ok_or_else(|| RuleError::Misconfigured("Checksum unspecified".to_string()))?;

        let path = context.resolve_path(file);
        if !path.exists() {
            let message = self
                .nonexistent_file_message
                .clone()
                .unwrap_or_else(|| format!("File does not exist: {}", path.display()));
            return Err(RuleError::Violation(message));
        }
        if path.is_dir() {
            return Err(RuleError::Misconfigured(format!(
                "Cannot calculate the checksum of directory: {}",
                path.display()
            )));
        }

        let bytes = read(&path)?;
        let actual = hash_type.digest(&bytes);
        tracing::debug!("{} hash of {} is {}", hash_type, path.display(), actual);

        if actual.eq_ignore_ascii_case(expected.trim()) {
            return Ok(());
        }

        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "{} hash of {} was {} but expected {}",
                hash_type,
                file.display(),
                actual,
                expected
            )
        });
        Err(RuleError::Violation(message))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, RuleError> {
    std::fs::read(path).map_err(|e| {
        RuleError::Misconfigured(format!("Cannot read file {}: {}", path.display(), e))
    })
}

impl Rule for RequireFileChecksum {
    fn name(&self) -> &str {
        "File checksum"
    }

    fn cache_id(&self) -> Option<String> {
        Some(cache_id_of(&format!("{:?}", self)))
    }

    fn execute(&self, context: &RuleContext) -> Result<(), RuleError> {
        self.verify(context, read_file)
    }
}

/// Checks the checksum of a text file after normalizing its line separators,
/// so the result does not depend on how the file was checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequireTextFileChecksum {
    #[serde(flatten)]
    pub checksum: RequireFileChecksum,

    /// Separator every line ending is rewritten to before hashing.
    pub normalize_line_separator_to: LineSeparator,

    /// Encoding of the file; UTF-8 when unset.
    pub encoding: Option<String>,
}

impl RequireTextFileChecksum {
    pub fn new(
        file: impl Into<PathBuf>,
        checksum: impl Into<String>,
        hash_type: impl Into<String>,
    ) -> Self {
        Self {
            checksum: RequireFileChecksum::new(file, checksum, hash_type),
            ..Self::default()
        }
    }

    pub fn with_line_separator(mut self, separator: LineSeparator) -> Self {
        self.normalize_line_separator_to = separator;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// The encoding the file is read in.
    pub fn effective_encoding(&self) -> Result<TextEncoding, RuleError> {
        match &self.encoding {
            Some(name) => name.parse(),
            None => {
                tracing::warn!("File encoding has not been set, using UTF-8");
                Ok(TextEncoding::Utf8)
            }
        }
    }
}

impl Rule for RequireTextFileChecksum {
    fn name(&self) -> &str {
        "Text file checksum"
    }

    fn cache_id(&self) -> Option<String> {
        Some(cache_id_of(&format!("{:?}", self)))
    }

    fn execute(&self, context: &RuleContext) -> Result<(), RuleError> {
        let encoding = self.effective_encoding()?;
        let separator = self.normalize_line_separator_to;

        self.checksum.verify(context, |path| {
            let text = encoding.decode(read_file(path)?).map_err(|e| {
                RuleError::Misconfigured(format!(
                    "Cannot decode {} as {}: {}",
                    path.display(),
                    encoding.name(),
                    e
                ))
            })?;
            Ok(encoding.encode(&separator.normalize(&text)))
        })
    }
}
