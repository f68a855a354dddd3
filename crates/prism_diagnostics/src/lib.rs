//! Diagnostic construction, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages built from
//! severities, headers, highlighted [`FileRange`](prism_source::FileRange)s,
//! [`Label`]s, free-form [`Color`]izations, and trailing notes. The
//! thread-safe [`DiagnosticSink`] accumulates diagnostics from parallel
//! producers, and [`TerminalRenderer`] lays them out as colorized,
//! multi-line snippets with underlines, gutter brackets, and notes.

#![warn(missing_docs)]

pub mod color;
pub mod diagnostic;
pub mod label;
pub mod render;
pub mod severity;
pub mod sink;
pub mod theme;

pub use color::Color;
pub use diagnostic::{Diagnostic, Header};
pub use label::{Label, LabelStyle};
pub use render::{DiagnosticRenderer, RenderError, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use theme::Theme;
