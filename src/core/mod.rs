pub mod tracker;

pub use tracker::{
    ConfirmPrompt, FileDialog, FilePurpose, LedgerObserver, Outcome, Tracker,
    DEFAULT_CSV_FILENAME, DEFAULT_SNAPSHOT_FILENAME,
};
