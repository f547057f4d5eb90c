// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static reference data: countries, regions, categories, parking levels.
//!
//! Each enumeration is a table of `(key, label)` pairs. Keys are what gets
//! stored; labels are the German display strings. Clients may submit either.

use crate::error::AppError;
use serde::Serialize;

/// One entry of a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    #[serde(rename = "value")]
    pub key: &'static str,
    pub label: &'static str,
}

const fn entry(key: &'static str, label: &'static str) -> LookupEntry {
    LookupEntry { key, label }
}

/// Bidirectional key/label lookup for one enumeration.
#[derive(Debug)]
pub struct LookupTable {
    /// Request field this table validates (named in `InvalidValue` errors).
    field: &'static str,
    entries: &'static [LookupEntry],
}

impl LookupTable {
    /// Ordered entries, for rendering.
    pub fn entries(&self) -> &'static [LookupEntry] {
        self.entries
    }

    /// Resolve a submitted key or label to its entry.
    ///
    /// Keys match case-insensitively, labels exactly (after trimming).
    pub fn find(&self, raw: &str) -> Option<&'static LookupEntry> {
        let raw = raw.trim();
        self.entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(raw) || e.label == raw)
    }

    /// Normalize a submitted key or label to the canonical key.
    pub fn normalize(&self, raw: &str) -> Result<&'static str, AppError> {
        self.find(raw)
            .map(|e| e.key)
            .ok_or(AppError::InvalidValue(self.field))
    }
}

pub static COUNTRIES: LookupTable = LookupTable {
    field: "country",
    entries: &[
        entry("CH", "Schweiz"),
        entry("DE", "Deutschland"),
        entry("AT", "Österreich"),
    ],
};

/// Regions keyed by ISO 3166-2 code; the prefix names the country.
pub static REGIONS: LookupTable = LookupTable {
    field: "region",
    entries: &[
        // Switzerland (cantons)
        entry("CH-AG", "Aargau"),
        entry("CH-AI", "Appenzell Innerrhoden"),
        entry("CH-AR", "Appenzell Ausserrhoden"),
        entry("CH-BE", "Bern"),
        entry("CH-BL", "Basel-Landschaft"),
        entry("CH-BS", "Basel-Stadt"),
        entry("CH-FR", "Freiburg"),
        entry("CH-GE", "Genf"),
        entry("CH-GL", "Glarus"),
        entry("CH-GR", "Graubünden"),
        entry("CH-JU", "Jura"),
        entry("CH-LU", "Luzern"),
        entry("CH-NE", "Neuenburg"),
        entry("CH-NW", "Nidwalden"),
        entry("CH-OW", "Obwalden"),
        entry("CH-SG", "St. Gallen"),
        entry("CH-SH", "Schaffhausen"),
        entry("CH-SO", "Solothurn"),
        entry("CH-SZ", "Schwyz"),
        entry("CH-TG", "Thurgau"),
        entry("CH-TI", "Tessin"),
        entry("CH-UR", "Uri"),
        entry("CH-VD", "Waadt"),
        entry("CH-VS", "Wallis"),
        entry("CH-ZG", "Zug"),
        entry("CH-ZH", "Zürich"),
        // Germany (Länder)
        entry("DE-BW", "Baden-Württemberg"),
        entry("DE-BY", "Bayern"),
        entry("DE-BE", "Berlin"),
        entry("DE-BB", "Brandenburg"),
        entry("DE-HB", "Bremen"),
        entry("DE-HH", "Hamburg"),
        entry("DE-HE", "Hessen"),
        entry("DE-MV", "Mecklenburg-Vorpommern"),
        entry("DE-NI", "Niedersachsen"),
        entry("DE-NW", "Nordrhein-Westfalen"),
        entry("DE-RP", "Rheinland-Pfalz"),
        entry("DE-SL", "Saarland"),
        entry("DE-SN", "Sachsen"),
        entry("DE-ST", "Sachsen-Anhalt"),
        entry("DE-SH", "Schleswig-Holstein"),
        entry("DE-TH", "Thüringen"),
        // Austria (Bundesländer)
        entry("AT-1", "Burgenland"),
        entry("AT-2", "Kärnten"),
        entry("AT-3", "Niederösterreich"),
        entry("AT-4", "Oberösterreich"),
        entry("AT-5", "Salzburg"),
        entry("AT-6", "Steiermark"),
        entry("AT-7", "Tirol"),
        entry("AT-8", "Vorarlberg"),
        entry("AT-9", "Wien"),
    ],
};

pub static CATEGORIES: LookupTable = LookupTable {
    field: "category",
    entries: &[
        entry("HIKING", "Wanderung"),
        entry("ADVENTURE_PARK", "Erlebnisbad"),
        entry("AMUSEMENT_PARK", "Freizeitpark"),
        entry("PUBLIC_POOL", "Freibad"),
        entry("MUSEUM", "Museum"),
        entry("PLAYGROUND", "Spielplatz"),
        entry("ZOO", "Zoo/Tierpark"),
        entry("RESTAURANT", "Restaurant"),
        entry("VIEWPOINT", "Aussichtspunkt"),
        entry("LAKE", "See/Strand"),
        entry("CASTLE", "Schloss/Burg"),
        entry("CLIMBING", "Klettern"),
        entry("CYCLING", "Velofahren"),
        entry("WINTER_SPORTS", "Wintersport"),
        entry("OTHER", "Andere"),
    ],
};

pub static PARKING_SITUATIONS: LookupTable = LookupTable {
    field: "parking_situation",
    entries: &[
        entry("EXCELLENT", "Ausgezeichnet"),
        entry("GOOD", "Gut"),
        entry("LIMITED", "Begrenzt"),
        entry("POOR", "Schlecht"),
        entry("NONE", "Keine Parkplätze"),
    ],
};

/// Country key a region key belongs to (`"CH-ZH"` → `"CH"`).
pub fn country_of_region(region_key: &str) -> Option<&str> {
    region_key.split_once('-').map(|(country, _)| country)
}

/// Regions of one country, in table order.
pub fn regions_in(country_key: &str) -> Vec<LookupEntry> {
    REGIONS
        .entries()
        .iter()
        .filter(|e| country_of_region(e.key) == Some(country_key))
        .copied()
        .collect()
}
