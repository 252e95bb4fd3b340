// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod info;
mod points;

pub use info::InfoCmd;
pub use points::PointsCmd;
