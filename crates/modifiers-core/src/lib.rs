/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Modifier dispatch and modification aggregation.
 */

//! Modifier dispatch and modification aggregation for render targets.
//!
//! A render target (one page element, identified by a build id) carries a
//! set of modifier configurations. Each configuration is handed to the
//! modifier plugin registered for its type, which answers with a
//! [`ModificationRecord`]: CSS fragments, client-side libraries, settings,
//! attribute deltas, and head links. This crate merges those records into
//! one deterministic output and hands it to an [`AttachmentSink`].
//!
//! # Pipeline
//!
//! ```text
//! entity ──extract──▶ ConfigTree ──dispatch──▶ [ModificationRecord]
//!                                                  │
//!                                              aggregate
//!                                                  ▼
//!                    AttachmentSink ◀──attach── AggregationResult
//! ```
//!
//! [`ModifierPipeline`] wires the stages together; each stage is also
//! usable on its own.

pub mod aggregate;
pub mod attachment;
pub mod attributes;
pub mod css;
pub mod dispatch;
pub mod error;
pub mod modifier;
pub mod options;
pub mod pipeline;
pub mod plugins;
pub mod registry;

pub use aggregate::{AggregationResult, aggregate, link_key};
pub use attachment::{Attachment, AttachmentSink, AttachmentStore, SettingsKind};
pub use attributes::merge_attributes;
pub use css::serialize_css;
pub use dispatch::dispatch;
pub use error::{ModifierError, Result};
pub use modifier::Modifier;
pub use options::ModifiersOptions;
pub use pipeline::ModifierPipeline;
pub use registry::{ModifierFactory, ModifierRegistry};

pub use modifiers_types::ModificationRecord;
