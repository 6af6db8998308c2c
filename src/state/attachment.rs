//! File attachments for the document step

use directories::BaseDirs;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound for any single attachment (5 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Named slots a file can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttachmentSlot {
    ProfilePicture,
    SscMarksheet,
    HscMarksheet,
    BirthCertificate,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 4] = [
        Self::ProfilePicture,
        Self::SscMarksheet,
        Self::HscMarksheet,
        Self::BirthCertificate,
    ];

    /// Multipart part name expected by the admissions endpoint
    pub fn part_name(&self) -> &'static str {
        match self {
            Self::ProfilePicture => "profilePicture",
            Self::SscMarksheet => "sscMarksheet",
            Self::HscMarksheet => "hscMarksheet",
            Self::BirthCertificate => "birthCertificate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProfilePicture => "Profile Picture",
            Self::SscMarksheet => "SSC Marksheet",
            Self::HscMarksheet => "HSC Marksheet",
            Self::BirthCertificate => "Birth Certificate",
        }
    }

    /// Lower-case file extensions accepted for this slot
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::ProfilePicture => IMAGE_EXTENSIONS,
            _ => DOCUMENT_EXTENSIONS,
        }
    }
}

/// Reasons a selected file is rejected before it enters the draft
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("No file path entered")]
    EmptyPath,

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{file_name} is {size} bytes; files must be 5 MB or smaller")]
    TooLarge { file_name: String, size: u64 },

    #[error("{file_name} has an unsupported type (allowed: {allowed})")]
    UnsupportedType { file_name: String, allowed: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file accepted into the draft, held in memory until submission
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub slot: AttachmentSlot,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("slot", &self.slot)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    /// Build an attachment from bytes already in memory
    pub fn from_bytes(
        slot: AttachmentSlot,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, AttachmentError> {
        let file_name = file_name.into();
        check_size(&file_name, bytes.len() as u64)?;
        let mime_type = mime_for(slot, &file_name)?;
        Ok(Self {
            slot,
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Load a file from disk for the given slot.
    ///
    /// Type and size are checked before the file is read, so an oversized
    /// file never gets pulled into memory.
    pub fn load(slot: AttachmentSlot, raw_path: &str) -> Result<Self, AttachmentError> {
        let path = expand_home(raw_path.trim()).ok_or(AttachmentError::EmptyPath)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        mime_for(slot, &file_name)?;

        let metadata = std::fs::metadata(&path).map_err(|e| read_error(&path, e))?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotFound(path));
        }
        check_size(&file_name, metadata.len())?;

        let bytes = std::fs::read(&path).map_err(|e| read_error(&path, e))?;
        Self::from_bytes(slot, file_name, bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Human readable size, e.g. "1.2 MB"
    pub fn size_label(&self) -> String {
        let size = self.size();
        if size >= 1024 * 1024 {
            format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
        } else if size >= 1024 {
            format!("{:.0} KB", size as f64 / 1024.0)
        } else {
            format!("{size} B")
        }
    }
}

fn check_size(file_name: &str, size: u64) -> Result<(), AttachmentError> {
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            file_name: file_name.to_string(),
            size,
        });
    }
    Ok(())
}

fn mime_for(slot: AttachmentSlot, file_name: &str) -> Result<&'static str, AttachmentError> {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let allowed = slot.accepted_extensions();
    if !allowed.contains(&extension.as_str()) {
        return Err(AttachmentError::UnsupportedType {
            file_name: file_name.to_string(),
            allowed: allowed.join(", "),
        });
    }

    Ok(match extension.as_str() {
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "image/jpeg",
    })
}

fn read_error(path: &Path, source: io::Error) -> AttachmentError {
    if source.kind() == io::ErrorKind::NotFound {
        AttachmentError::NotFound(path.to_path_buf())
    } else {
        AttachmentError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Resolve a leading `~/` against the user's home directory
fn expand_home(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return Some(dirs.home_dir().join(rest));
        }
    }
    Some(PathBuf::from(raw))
}
