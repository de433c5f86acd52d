//! Interactive scene runtime: hit-testable elements, a gesture state machine,
//! and a frame-stepped animation scheduler.
//!
//! The crate never draws and never pumps events. A host feeds pointer events
//! (`press`/`drag`/`release`) and frame ticks (`next_frame`) into an
//! [`engine::Engine`], and reads back [`engine::Engine::render_list`] to draw
//! the visible elements with their visual payload. Everything runs on one
//! thread, synchronously, inside those calls.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Composition root: scene + animations + visuals, fades and scene transitions |
//! | [`scene`] | Element z-stack, hit-testing, pointer dispatch |
//! | [`input`] | Gesture state machine (idle, drag, hover, tap) |
//! | [`gesture`] | Press-handler builders: tap, press-release, hover, anchor-and-snap drag |
//! | [`animation`] | Animation kinds and the controller that steps them |
//! | [`element`] | Scene elements and their ids |
//! | [`visual`] | Per-element visual payload (opacity) |
//! | [`geometry`] | Vectors, rectangles, tolerant float comparisons |
//! | [`random`] | Seeded variates |
//! | [`storage`] | String key/value storage collaborator |
//! | [`config`] | Engine configuration from the environment |
//! | [`consts`] | Shared numeric constants |

pub mod animation;
pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod random;
pub mod scene;
pub mod storage;
pub mod visual;

#[cfg(test)]
mod test_helpers;
