pub mod signature;
pub mod probe;
pub mod sniff;
pub mod magic;
pub mod decode;
pub mod classify;
pub mod config;
pub mod entry;
pub mod walk;
pub mod listing;

pub use signature::Signature;
pub use probe::{Probe, Sample};
pub use classify::{classify, classify_sample, rules, Rule};
pub use config::{ConfigError, ListingOptions, Platform};
pub use entry::{Entry, EntryOutcome, EntryParser, SkipReason};
pub use walk::{Line, Listing, ReadmeCandidate, WalkError, Walker};
pub use listing::{
    list_archive, list_directory, CommandExtractor, DeferredRender, ExtractError, Extractor,
    ListError, NoRender,
};
