// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod catalog;
pub mod courses;
pub mod games;
pub mod resources;
pub mod sessions;
pub mod users;
