//! Run context for dependency injection

use fitsprep_config::Config;
use fitsprep_events::{EventEmitter, EventSender};
use fitsprep_fits::{FitsHeaderReader, HeaderReader};
use fitsprep_platform::{FilesystemOperations, LocalFilesystem};

/// Everything a reorganization run needs besides the session itself
pub struct ReorgContext {
    /// Filesystem all transfers and provisioning go through
    pub fs: Box<dyn FilesystemOperations>,
    /// FITS header source used for validation
    pub reader: Box<dyn HeaderReader>,
    /// Effective configuration after file, environment and CLI merging
    pub config: Config,
    tx: Option<EventSender>,
}

impl EventEmitter for ReorgContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl std::fmt::Debug for ReorgContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorgContext")
            .field("config", &self.config)
            .field("events", &self.tx.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for `ReorgContext`; unset components fall back to the local disk,
/// the on-disk FITS reader and default configuration
#[derive(Default)]
pub struct ReorgContextBuilder {
    fs: Option<Box<dyn FilesystemOperations>>,
    reader: Option<Box<dyn HeaderReader>>,
    config: Option<Config>,
    tx: Option<EventSender>,
}

impl ReorgContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filesystem(mut self, fs: impl FilesystemOperations + 'static) -> Self {
        self.fs = Some(Box::new(fs));
        self
    }

    #[must_use]
    pub fn with_header_reader(mut self, reader: impl HeaderReader + 'static) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn build(self) -> ReorgContext {
        ReorgContext {
            fs: self.fs.unwrap_or_else(|| Box::new(LocalFilesystem::new())),
            reader: self
                .reader
                .unwrap_or_else(|| Box::new(FitsHeaderReader::new())),
            config: self.config.unwrap_or_default(),
            tx: self.tx,
        }
    }
}
