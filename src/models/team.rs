// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static team list.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A league team. Teams are a fixed dataset shipped with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Team {
    pub id: &'static str,
    pub name: &'static str,
}

/// All teams, in display order.
pub const TEAMS: &[Team] = &[
    Team {
        id: "lg",
        name: "LG Twins",
    },
    Team {
        id: "doosan",
        name: "Doosan Bears",
    },
    Team {
        id: "kiwoom",
        name: "Kiwoom Heroes",
    },
    Team {
        id: "ssg",
        name: "SSG Landers",
    },
    Team {
        id: "kt",
        name: "KT Wiz",
    },
    Team {
        id: "nc",
        name: "NC Dinos",
    },
    Team {
        id: "samsung",
        name: "Samsung Lions",
    },
    Team {
        id: "lotte",
        name: "Lotte Giants",
    },
    Team {
        id: "kia",
        name: "KIA Tigers",
    },
    Team {
        id: "hanwha",
        name: "Hanwha Eagles",
    },
];
