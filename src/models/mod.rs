// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Board data model and drawing engine.

pub mod board;
pub mod frame;
pub mod playback;
pub mod stamp;
pub mod tool;
