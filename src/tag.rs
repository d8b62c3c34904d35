//! Tag acquisition: scoped reader sessions that yield a tag identifier.
//!
//! A reader is held for exactly one scan. [`ScanSession`] releases it when
//! dropped, so success, a blank tag, and a reader fault all end with the
//! reader released.

use tracing::debug;

use crate::model::TagId;

/// Errors that can occur while acquiring a tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("tag has no identifier")]
    NoId,

    #[error("tag reader fault: {0}")]
    Fault(String),

    #[error("scan cancelled")]
    Cancelled,
}

/// A source of tag identifiers, such as an NFC reader.
pub trait TagReader {
    /// Acquires the reader for one scan.
    fn begin(&mut self) -> Result<(), ScanError>;

    /// Reads the presented tag's raw identifier, if it carries one.
    fn read_id(&mut self) -> Result<Option<String>, ScanError>;

    /// Releases the reader. Called once per scan attempt.
    fn release(&mut self);
}

/// An acquired reader. Released on drop.
pub struct ScanSession<'a, R: TagReader + ?Sized> {
    reader: &'a mut R,
}

impl<'a, R: TagReader + ?Sized> ScanSession<'a, R> {
    /// Acquires `reader`. If acquisition itself fails the reader is
    /// released before the error is returned.
    pub fn begin(reader: &'a mut R) -> Result<Self, ScanError> {
        if let Err(e) = reader.begin() {
            reader.release();
            return Err(e);
        }
        Ok(Self { reader })
    }

    /// Reads one tag identifier. A blank identifier is [`ScanError::NoId`].
    pub fn read(&mut self) -> Result<TagId, ScanError> {
        let raw = self.reader.read_id()?;
        raw.as_deref().and_then(TagId::parse).ok_or(ScanError::NoId)
    }
}

impl<R: TagReader + ?Sized> Drop for ScanSession<'_, R> {
    fn drop(&mut self) {
        self.reader.release();
    }
}

/// Runs one scoped scan on `reader`.
pub fn scan<R: TagReader + ?Sized>(reader: &mut R) -> Result<TagId, ScanError> {
    let mut session = ScanSession::begin(reader)?;
    let tag = session.read()?;
    debug!(%tag, "tag read");
    Ok(tag)
}

/// A reader that yields a configured result instead of talking to hardware.
///
/// The CLI uses it to stand in for the NFC reader: the operator types the
/// tag, or asks for a blank tag, a fault, or a cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedReader {
    presented: Result<Option<String>, ScanError>,
}

impl SimulatedReader {
    pub fn with_tag(id: impl Into<String>) -> Self {
        Self {
            presented: Ok(Some(id.into())),
        }
    }

    /// A tag that carries no identifier.
    pub fn blank() -> Self {
        Self { presented: Ok(None) }
    }

    /// A reader that fails mid-read.
    pub fn faulty(reason: impl Into<String>) -> Self {
        Self {
            presented: Err(ScanError::Fault(reason.into())),
        }
    }

    /// A reader whose session is cancelled before a tag is read.
    pub fn cancelled() -> Self {
        Self {
            presented: Err(ScanError::Cancelled),
        }
    }
}

impl TagReader for SimulatedReader {
    fn begin(&mut self) -> Result<(), ScanError> {
        match &self.presented {
            Err(ScanError::Cancelled) => Err(ScanError::Cancelled),
            _ => Ok(()),
        }
    }

    fn read_id(&mut self) -> Result<Option<String>, ScanError> {
        self.presented.clone()
    }

    fn release(&mut self) {}
}
