// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry helpers and the software rasterizer.

pub mod field;
pub mod font;
pub mod geometry;
pub mod raster;
