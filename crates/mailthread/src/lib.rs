//! Mailthread - conversation view extraction for AI-assisted replies
//!
//! This crate turns a rendered webmail conversation view into a structured,
//! de-duplicated thread ready to hand to a language-model backend:
//! - Document abstraction over a rendered view (`ThreadView`, `Snapshot`)
//! - Expansion driver for collapsed/trimmed/quoted regions
//! - Container discovery across several known layout variants
//! - Sender/timestamp heuristics and quoted-header parsing
//! - Normalization, near-duplicate removal and transcript assembly
//! - Per-view response cache and request payload shapes
//!
//! The crate never performs network I/O; it produces values that a separate
//! client serializes and sends.

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod payload;
pub mod view;

pub use cache::{CacheKind, ThreadCache, ViewKey};
pub use config::ExtractorSettings;
pub use error::ExtractError;
pub use extract::{
    // Pipeline entry points
    extract_from_snapshot, extract_thread,
    // Individual stages (exposed for callers that drive the view themselves)
    ExpansionReport, QuotedMessage, Split, discover_containers, expand_thread,
    extract_sender_info, receiver_email, split_content,
};
pub use models::{Message, SenderInfo, ThreadDocument};
pub use payload::{AnalyzeThreadRequest, GenerateReplyRequest};
pub use view::{Snapshot, StaticView, ThreadView};
