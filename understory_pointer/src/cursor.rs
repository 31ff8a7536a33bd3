// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor visibility over the surface.

/// Cursor style applied to the surface by [`Pointer::hide`](crate::Pointer::hide)
/// and [`Pointer::show`](crate::Pointer::show).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// The host's default cursor.
    #[default]
    Default,
    /// No cursor drawn over the surface.
    Hidden,
}

impl CursorStyle {
    /// CSS `cursor` value for hosts backed by a style sheet.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hidden => "none",
        }
    }
}
