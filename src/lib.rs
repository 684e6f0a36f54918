//! Layout Shift Trace
//!
//! Computes Cumulative Layout Shift (CLS) across the main frame and every
//! sub-frame of a browser page-load trace.
//!
//! This crate provides the core implementation for the
//! `layout-shift` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! layout-shift compute --trace trace.json --summary
//! ```
//!
//! Library users build the metric on any [`summarizer::TraceSummarizer`]:
//!
//! ```ignore
//! let summarizer = Arc::new(Memoized::new(FrameTreeSummarizer));
//! let cls = Memoized::new(CumulativeLayoutShiftAllFrames::new(summarizer));
//! let result = cls.request(&trace, &AuditContext::default()).await?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod computed;
pub mod output;
pub mod parser;
pub mod summarizer;
pub mod utils;
