use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

type ChartRows = HashMap<String, HashMap<String, f64>>;

// Fairy-era 18 type chart. Only non-neutral matchups are listed.
static STANDARD_ROWS: phf::Map<&'static str, &'static [(&'static str, f64)]> = phf_map! {
    "normal" => &[("rock", 0.5), ("steel", 0.5), ("ghost", 0.0)],
    "fire" => &[
        ("fire", 0.5), ("water", 0.5), ("rock", 0.5), ("dragon", 0.5),
        ("grass", 2.0), ("ice", 2.0), ("bug", 2.0), ("steel", 2.0),
    ],
    "water" => &[
        ("water", 0.5), ("grass", 0.5), ("dragon", 0.5),
        ("fire", 2.0), ("ground", 2.0), ("rock", 2.0),
    ],
    "electric" => &[
        ("electric", 0.5), ("grass", 0.5), ("dragon", 0.5),
        ("water", 2.0), ("flying", 2.0), ("ground", 0.0),
    ],
    "grass" => &[
        ("fire", 0.5), ("grass", 0.5), ("poison", 0.5), ("flying", 0.5),
        ("bug", 0.5), ("dragon", 0.5), ("steel", 0.5),
        ("water", 2.0), ("ground", 2.0), ("rock", 2.0),
    ],
    "ice" => &[
        ("fire", 0.5), ("water", 0.5), ("ice", 0.5), ("steel", 0.5),
        ("grass", 2.0), ("ground", 2.0), ("flying", 2.0), ("dragon", 2.0),
    ],
    "fighting" => &[
        ("normal", 2.0), ("ice", 2.0), ("rock", 2.0), ("dark", 2.0), ("steel", 2.0),
        ("poison", 0.5), ("flying", 0.5), ("psychic", 0.5), ("bug", 0.5), ("fairy", 0.5),
        ("ghost", 0.0),
    ],
    "poison" => &[
        ("grass", 2.0), ("fairy", 2.0),
        ("poison", 0.5), ("ground", 0.5), ("rock", 0.5), ("ghost", 0.5),
        ("steel", 0.0),
    ],
    "ground" => &[
        ("fire", 2.0), ("electric", 2.0), ("poison", 2.0), ("rock", 2.0), ("steel", 2.0),
        ("grass", 0.5), ("bug", 0.5),
        ("flying", 0.0),
    ],
    "flying" => &[
        ("grass", 2.0), ("fighting", 2.0), ("bug", 2.0),
        ("electric", 0.5), ("rock", 0.5), ("steel", 0.5),
    ],
    "psychic" => &[
        ("fighting", 2.0), ("poison", 2.0),
        ("psychic", 0.5), ("steel", 0.5),
        ("dark", 0.0),
    ],
    "bug" => &[
        ("grass", 2.0), ("psychic", 2.0), ("dark", 2.0),
        ("fire", 0.5), ("fighting", 0.5), ("poison", 0.5), ("flying", 0.5),
        ("ghost", 0.5), ("steel", 0.5), ("fairy", 0.5),
    ],
    "rock" => &[
        ("fire", 2.0), ("ice", 2.0), ("flying", 2.0), ("bug", 2.0),
        ("fighting", 0.5), ("ground", 0.5), ("steel", 0.5),
    ],
    "ghost" => &[("ghost", 2.0), ("psychic", 2.0), ("dark", 0.5), ("normal", 0.0)],
    "dragon" => &[("dragon", 2.0), ("steel", 0.5), ("fairy", 0.0)],
    "dark" => &[
        ("psychic", 2.0), ("ghost", 2.0),
        ("fighting", 0.5), ("dark", 0.5), ("fairy", 0.5),
    ],
    "steel" => &[
        ("rock", 2.0), ("ice", 2.0), ("fairy", 2.0),
        ("fire", 0.5), ("water", 0.5), ("electric", 0.5), ("steel", 0.5),
    ],
    "fairy" => &[
        ("fighting", 2.0), ("dragon", 2.0), ("dark", 2.0),
        ("fire", 0.5), ("poison", 0.5), ("steel", 0.5),
    ],
};

fn normalize_type(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Attack type -> defender type -> multiplier. Pairs that are not listed are neutral.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChartRows", into = "ChartRows")]
pub struct TypeChart {
    rows: ChartRows,
}

impl From<ChartRows> for TypeChart {
    fn from(rows: ChartRows) -> Self {
        let mut chart = TypeChart::default();
        for (attacking, row) in rows {
            for (defending, multiplier) in row {
                chart.set(&attacking, &defending, multiplier);
            }
        }
        chart
    }
}

impl From<TypeChart> for ChartRows {
    fn from(chart: TypeChart) -> Self {
        chart.rows
    }
}

impl TypeChart {
    pub fn standard() -> Self {
        let mut chart = TypeChart::default();
        for (attacking, row) in STANDARD_ROWS.entries() {
            for (defending, multiplier) in row.iter() {
                chart.set(attacking, defending, *multiplier);
            }
        }
        chart
    }

    /// Inserts or replaces a single matchup.
    pub fn set(&mut self, attacking: &str, defending: &str, multiplier: f64) {
        self.rows
            .entry(normalize_type(attacking))
            .or_default()
            .insert(normalize_type(defending), multiplier);
    }

    /// Case-insensitive single-type lookup.
    pub fn effectiveness(&self, attacking: &str, defending: &str) -> f64 {
        self.rows
            .get(&normalize_type(attacking))
            .and_then(|row| row.get(&normalize_type(defending)))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the single-type lookups against every defender type.
    pub fn against(&self, attacking: &str, defender_types: &[String]) -> f64 {
        defender_types
            .iter()
            .map(|defending| self.effectiveness(attacking, defending))
            .product()
    }
}
