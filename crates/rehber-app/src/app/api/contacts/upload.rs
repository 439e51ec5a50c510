//! Reading and validating an uploaded vCard file.

use thiserror::Error;

use rehber_core::constants::VCARD_EXTENSIONS;

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Media types accepted for raw (non-multipart) uploads without a file name.
const VCARD_MEDIA_TYPES: [&str; 3] = ["text/vcard", "text/x-vcard", "text/directory"];

/// Why an upload was refused before import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("No file provided")]
    MissingFile,
    #[error("Unsupported file type, expected a .vcf or .vcard file")]
    UnsupportedType,
    #[error("File is empty")]
    Empty,
    #[error("File exceeds the maximum size of {limit} bytes")]
    TooLarge { limit: usize },
    #[error("File does not contain a vCard")]
    NotVCard,
    #[error("File could not be read")]
    Unreadable,
}

/// An upload as received, before validation.
#[derive(Debug)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// ## Summary
    /// Checks type, size, emptiness and the presence of vCard markers.
    ///
    /// ## Errors
    /// Returns the first rule the upload breaks.
    pub fn validate(&self, max_bytes: usize) -> Result<(), UploadRejection> {
        if !self.has_vcard_type() {
            return Err(UploadRejection::UnsupportedType);
        }
        if self.bytes.len() > max_bytes {
            return Err(UploadRejection::TooLarge { limit: max_bytes });
        }
        if self.bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(UploadRejection::Empty);
        }
        if !contains_marker(&self.bytes, b"BEGIN:VCARD")
            || !contains_marker(&self.bytes, b"END:VCARD")
        {
            return Err(UploadRejection::NotVCard);
        }
        Ok(())
    }

    fn has_vcard_type(&self) -> bool {
        if let Some(name) = &self.filename {
            let name = name.to_ascii_lowercase();
            return VCARD_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
        }
        self.content_type.as_deref().is_some_and(|content_type| {
            VCARD_MEDIA_TYPES
                .iter()
                .any(|media| content_type.trim().to_ascii_lowercase().starts_with(media))
        })
    }
}

/// Display text of the error raised when a body outgrows its size cap.
const LENGTH_LIMIT_EXCEEDED: &str = "length limit exceeded";

/// Maps a body read failure to a rejection. A capped read that overflowed
/// is `TooLarge`, anything else is `Unreadable`.
fn body_rejection(error: &(dyn std::error::Error + 'static), max_bytes: usize) -> UploadRejection {
    let over_limit = std::iter::successors(Some(error), |error| error.source())
        .any(|error| error.to_string().contains(LENGTH_LIMIT_EXCEEDED));
    if over_limit {
        UploadRejection::TooLarge { limit: max_bytes }
    } else {
        UploadRejection::Unreadable
    }
}

fn contains_marker(bytes: &[u8], marker: &[u8]) -> bool {
    bytes
        .windows(marker.len())
        .any(|window| window.eq_ignore_ascii_case(marker))
}

/// ## Summary
/// Reads the upload from a multipart `file` field or from the raw body.
///
/// A raw body takes its file name from the `filename` query parameter.
///
/// ## Errors
/// Returns `MissingFile` for a multipart request without a `file` part,
/// `TooLarge` when the declared, stored or streamed size exceeds `max_bytes`
/// and `Unreadable` when the body cannot be read.
pub async fn read_upload(
    req: &mut salvo::Request,
    max_bytes: usize,
) -> Result<Upload, UploadRejection> {
    let is_multipart = req
        .content_type()
        .is_some_and(|mime| mime.essence_str() == "multipart/form-data");

    if is_multipart {
        let file = req.file(FILE_FIELD).await.ok_or(UploadRejection::MissingFile)?;
        if file.size() > u64::try_from(max_bytes).unwrap_or(u64::MAX) {
            return Err(UploadRejection::TooLarge { limit: max_bytes });
        }
        let filename = file.name().map(str::to_string);
        let content_type = file.content_type().map(|mime| mime.to_string());
        let path = file.path().clone();

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read uploaded file");
            UploadRejection::Unreadable
        })?;

        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    if req
        .header::<usize>("content-length")
        .is_some_and(|length| length > max_bytes)
    {
        return Err(UploadRejection::TooLarge { limit: max_bytes });
    }

    let filename = req.query::<String>("filename");
    let content_type = req.content_type().map(|mime| mime.to_string());
    let bytes = match req.payload_with_max_size(max_bytes).await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            return Err(body_rejection(&e, max_bytes));
        }
    };

    Ok(Upload {
        filename,
        content_type,
        bytes,
    })
}
