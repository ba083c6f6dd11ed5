//! Rendering core for the live trilateration view.
//!
//! The crate maps an unbounded, data-driven world (scanner stations in meters
//! and a target estimate) onto a fixed-size canvas, reframes that world on
//! every snapshot and draws grid, range circles, scanners and target in a
//! fixed order. It is compiled both natively and to WebAssembly; the host
//! (a browser page or the native viewer) owns polling and resize events and
//! forwards them to [`engine::Engine`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | View state controller and testable [`engine::EngineCore`] |
//! | [`doc`] | Snapshot model and lenient JSON decoding |
//! | [`camera`] | Viewport, canvas geometry and the world ↔ canvas projection |
//! | [`framing`] | Viewport framing policy |
//! | [`render`] | Layered scene rendering onto a [`surface::Surface`] |
//! | [`surface`] | Drawing surface trait and the in-memory [`surface::Recorder`] |
//! | [`web`] | `CanvasRenderingContext2d` surface and the exported `TrilatView` |
//! | [`consts`] | Layout constants, marker sizes and palette |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod framing;
pub mod render;
pub mod surface;
pub mod web;
