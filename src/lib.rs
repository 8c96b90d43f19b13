// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-animated page background built on wgpu, with a palette switcher.
//!
//! Backdrop draws a slowly rotating particle cloud, four floating polyhedra
//! and a rippling wireframe plane behind page content. A small floating
//! menu lets the user pick one of five color palettes; the choice is
//! persisted and the running animation is recolored in place.
//!
//! # Key entry points
//!
//! - [`engine::Engine`] - owns the scene state and the GPU renderer, and
//!   drives the per-frame loop with suspend/resume
//! - [`scene::SceneState`] - the CPU-side scene with the `advance_frame`,
//!   `apply_palette` and `resize` entry points
//! - [`menu::PaletteMenu`] - the palette switcher model, persisted through a
//!   [`menu::PreferenceStore`]
//! - [`engine::Ready`] - the ready signal the menu uses to reach the engine
//!   once GPU initialization has finished
//! - [`options::Options`] - tunable scene, motion, lighting and material
//!   parameters with TOML preset support
//!
//! # Targets
//!
//! The `web` feature (on `wasm32`) exports a `start()` entry that creates a
//! full-viewport canvas, injects the menu markup and runs the loop from
//! `requestAnimationFrame`. The `viewer` feature opens the same scene in a
//! native winit window.
//!
//! When no GPU adapter is available the engine degrades to a static
//! background color instead of failing; see [`engine::Engine::is_degraded`].

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod menu;
pub mod options;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{Engine, Ready};
pub use error::BackdropError;
pub use menu::PaletteMenu;
pub use options::Options;
pub use palette::{Palette, PaletteId, Rgb};
pub use scene::SceneState;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
