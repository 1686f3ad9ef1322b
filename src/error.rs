// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the tactic board engine.

use thiserror::Error;

/// Errors and refusals reported by [`crate::models::board::TacticBoard`].
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cannot delete the last remaining frame")]
    LastFrame,
    #[error("numbered player stamps need a label")]
    EmptyLabel,
    #[error("the player label has no printable characters")]
    UnrenderableLabel,
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
