// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trading card catalog records (TCGdex).
//!
//! Only the fields we route on are typed. Everything else rides along in
//! `extra` so the JSON we hand the browser carries every upstream field.

use serde::{Deserialize, Serialize};

type Extra = serde_json::Map<String, serde_json::Value>;

/// Card as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBrief {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Full card detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<SetBrief>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Set as embedded in cards, series, and set lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBrief {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Full set detail, including its card list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serie: Option<SeriesBrief>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardBrief>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesBrief {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Series detail with its sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetBrief>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn reshape<T: Serialize + for<'de> Deserialize<'de>>(upstream: &Value) -> Value {
        let typed: T = serde_json::from_value(upstream.clone()).unwrap();
        let wire = serde_json::to_string(&typed).unwrap();
        serde_json::from_str(&wire).unwrap()
    }

    #[test]
    fn test_card_keeps_every_upstream_field() {
        let upstream = json!({
            "id": "swsh3-136",
            "localId": "136",
            "name": "Furret",
            "image": "https://assets.tcgdex.net/en/swsh/swsh3/136",
            "category": "Pokemon",
            "illustrator": "tetsuya koizumi",
            "rarity": "Uncommon",
            "hp": 110,
            "types": ["Colorless"],
            "evolveFrom": "Sentret",
            "attacks": [{ "cost": ["Colorless"], "name": "Feelin' Fine", "damage": 0 }],
            "set": {
                "id": "swsh3",
                "name": "Darkness Ablaze",
                "logo": "https://assets.tcgdex.net/en/swsh/swsh3/logo",
                "cardCount": { "official": 189, "total": 201 }
            },
            "variants": { "normal": true, "reverse": true, "holo": false },
            "legal": { "standard": false, "expanded": true }
        });

        assert_eq!(reshape::<Card>(&upstream), upstream);
    }

    #[test]
    fn test_set_and_series_keep_every_upstream_field() {
        let set = json!({
            "id": "base1",
            "name": "Base Set",
            "symbol": "https://assets.tcgdex.net/univ/base/base1/symbol",
            "cardCount": { "total": 102, "official": 102 },
            "releaseDate": "1999-01-09",
            "serie": { "id": "base", "name": "Base" },
            "cards": [{ "id": "base1-1", "localId": "1", "name": "Alakazam" }]
        });
        assert_eq!(reshape::<Set>(&set), set);

        let series = json!({
            "id": "base",
            "name": "Base",
            "logo": "https://assets.tcgdex.net/en/base/base1/logo",
            "firstSet": { "id": "base1", "name": "Base Set" },
            "sets": [{ "id": "base1", "name": "Base Set", "cardCount": { "total": 102, "official": 102 } }]
        });
        assert_eq!(reshape::<Series>(&series), series);
    }
}
