// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # classlink
//!
//! An in-memory structural model, linker and verifier for JVM class files.
//!
//! `classlink` turns batches of decoded class files into immutable, linked
//! model snapshots and checks them against the legality rules of the Java
//! Virtual Machine Specification. It deliberately stops below the bytecode
//! level: method bodies are tracked only as present or absent, and the unit
//! of meaning is the class structure, its members, its generic signatures and
//! its place in the hierarchy.
//!
//! ## Features
//!
//! - **Persistent pointers** - classes, fields, methods and type parameters
//!   are referenced by name, so pointers survive relinking and model growth
//! - **Immutable snapshots** - a [`model::Model`] never mutates; linking a
//!   new batch produces a fresh snapshot and old ones stay valid
//! - **Parallel decoding** - [`loader::decode_all`] fans byte-level decoding
//!   out over a worker pool and joins before linking
//! - **Signature-aware types** - generic signatures (JVMS 4.7.9.1) are
//!   parsed into a structured [`model::Type`] vocabulary with erasure back to
//!   descriptors
//! - **Structural verification** - names, versions, modifier combinations,
//!   hierarchy shape, sealing, final overrides and access control, with
//!   nestmate support
//!
//! ## Quick Start
//!
//! Add `classlink` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! classlink = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use classlink::prelude::*;
//!
//! let mut builder = Model::builder();
//! builder.add_class(
//!     ClassModel::builder("java/lang/Object")
//!         .flags(AccessFlags::PUBLIC)
//!         .build()?,
//! )?;
//! let model = builder.build();
//! verify_model(&model)?;
//! # Ok::<(), classlink::Error>(())
//! ```
//!
//! ### Linking a Batch
//!
//! The byte-level decoder is a collaborator, not part of this crate: any
//! `Fn(T) -> Result<RawClass>` works. Decoded classes are collected into an
//! [`loader::UnlinkedBatch`] and linked against a base model:
//!
//! ```rust
//! use classlink::loader::{Linker, RawClass, UnlinkedBatch};
//! use classlink::model::Model;
//!
//! fn link(raw_classes: Vec<RawClass>) -> classlink::Result<Model> {
//!     let mut batch = UnlinkedBatch::new();
//!     for raw in raw_classes {
//!         batch.add_raw(raw)?;
//!     }
//!     let base = Model::empty();
//!     Linker::new(&base).link(&batch)
//! }
//! ```
//!
//! ## Architecture
//!
//! `classlink` is organized into four modules:
//!
//! - [`prelude`] - convenient re-exports of the most commonly used types
//! - [`model`] - immutable class snapshots, the type vocabulary and the
//!   persistent pointer family
//! - [`signature`] - the generic-signature grammar and its parser
//! - [`loader`] - parallel decoding, inner-class digestion and linking
//! - [`verify`] - access control, hierarchy queries and the per-class
//!   verifier
//!
//! ## Standards Compliance
//!
//! The legality rules follow the **Java Virtual Machine Specification**
//! (Java SE 24 edition): binary names and descriptors (4.2, 4.3), generic
//! signatures (4.7.9.1), the inner-class table (4.7.6), final-method
//! overriding (4.10.1.5), access control and nestmates (5.4.4), override
//! eligibility (5.4.5) and sealed-class checking (5.3.5).
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Failures are split by
//! phase: [`LinkError`] for reference resolution, [`FormatError`] for
//! structural class-file violations and [`VerifyError`] for semantic rules
//! that need the whole model.

mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use classlink::prelude::*;
///
/// let model = Model::empty();
/// assert!(model.is_empty());
/// ```
pub mod prelude;

pub mod loader;
pub mod model;
pub mod signature;
pub mod verify;

pub use error::{Error, FormatError, LinkError, VerifyError};

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
