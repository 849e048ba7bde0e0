//! tacc-util - Core utilities and foundation types.
//!
//! This crate provides the foundational types shared by every pass of the
//! `tacc` compiler front-end: interned identifiers ([`symbol::Symbol`]),
//! source locations ([`span::Span`], [`span::FileId`]), typed indices
//! ([`index_vec::IndexVec`], [`index_vec::Idx`]), and structured diagnostics
//! ([`diagnostic::Handler`], [`diagnostic::Diagnostic`]).

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{define_idx, Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
