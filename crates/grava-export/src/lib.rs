//! grava-export: serializers for grava output artifacts.
//!
//! DXF documents and the stick-length manifest are built as pure
//! strings; [`write_atomic`] persists them without ever leaving a
//! partial file at the destination.

pub mod dxf;
pub mod manifest;
pub mod write;

pub use dxf::{to_dxf_bands, to_dxf_circles, to_dxf_sticks};
pub use manifest::to_stick_manifest;
pub use write::{ExportError, write_atomic};
