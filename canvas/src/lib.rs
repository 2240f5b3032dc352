//! Interaction core of the diary page editor.
//!
//! Users decorate a notebook page with text, stickers and photos, then drag,
//! resize and stack them. This crate owns everything behind that except the
//! painting: the item model, the document store, the client → page
//! coordinate transform, hit-testing, and the pointer gesture engines for the
//! single-page and two-page spread layouts. It compiles to WebAssembly; the
//! host page forwards DOM events to [`web::DiaryEditor`] and paints what it
//! reports.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Item model and its wire forms |
//! | [`store`] | Immutable document snapshots and the store that swaps them |
//! | [`coords`] | Points, rects, `clamp`, zoom, client → page-local conversion |
//! | [`hit`] | Hit-testing item bodies and corner handles |
//! | [`input`] | Tools, pointer events, gesture state and gesture geometry |
//! | [`single`] | Single-page canvas with live-rect gestures |
//! | [`spread`] | Two-page spread canvas with direct-commit gestures |
//! | [`sticker`] | Sticker tile artwork and shape placeholders |
//! | [`engine`] | Canvas actions and the [`engine::Editor`] that applies them |
//! | [`config`] | JSON-loadable editor tunables |
//! | [`error`] | Error types |
//! | [`web`] | `wasm-bindgen` facade and console logging |
//! | [`consts`] | Shared numeric constants (size limits, zoom range, etc.) |

pub mod config;
pub mod consts;
pub mod coords;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod single;
pub mod spread;
pub mod sticker;
pub mod store;
pub mod web;
