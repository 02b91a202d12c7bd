//! Converts OPML subscription lists into the line-oriented `feedlist.txt`
//! read by rssfeedz.
//!
//! The pipeline runs once per invocation:
//!
//! 1. [`input`] expands arguments and wildcard patterns into paths
//! 2. [`feed`] extracts `(url, title)` records from each OPML document
//! 3. [`aggregate`] merges files in order, dropping repeated URLs
//! 4. [`output`] renders and atomically writes the feed list
//!
//! [`pipeline::convert`] drives these steps and reports per-file progress.
//! [`cli`] and [`config`] turn arguments and the optional config file into
//! a [`config::RunConfig`].

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod feed;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod util;
