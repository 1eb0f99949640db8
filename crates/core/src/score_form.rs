//! Decoding of grading-form field names.
//!
//! The grading form posts one field per item named
//! `scores[<subject_id>][<assignment|project>][<item_id>]`. Decoding turns
//! those names into [`ScoreKey`]s so the score engine never sees the wire
//! format. Fields outside the `scores[...]` namespace (`_csrf`, submit
//! buttons) are ignored; score fields that do not decode are counted as
//! malformed.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::ItemKind;
use crate::scoring::{ScoreBatch, ScoreEntry, ScoreKey};
use crate::types::EntityId;

/// Prefix every score field name starts with.
pub const SCORE_FIELD_PREFIX: &str = "scores[";

static SCORE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^scores\[([^\[\]]+)\]\[([^\[\]]+)\]\[([^\[\]]+)\]$")
        .expect("score field pattern is valid")
});

/// Decode a single field name. Returns `None` when the name is
/// score-shaped but malformed, or when either id or the kind is invalid.
pub fn decode_score_key(name: &str) -> Option<ScoreKey> {
    let caps = SCORE_FIELD.captures(name)?;
    let subject_id = EntityId::parse_str(caps[1].trim()).ok()?;
    let kind = ItemKind::from_str_value(caps[2].trim()).ok()?;
    let item_id = EntityId::parse_str(caps[3].trim()).ok()?;
    Some(ScoreKey {
        subject_id,
        kind,
        item_id,
    })
}

/// Build the field name for `key`, the inverse of [`decode_score_key`].
pub fn score_field_name(key: &ScoreKey) -> String {
    format!(
        "scores[{}][{}][{}]",
        key.subject_id,
        key.kind.as_str(),
        key.item_id
    )
}

/// Decode submitted form fields into an ordered score batch.
pub fn decode_score_fields<I, K, V>(fields: I) -> ScoreBatch
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut batch = ScoreBatch::default();
    for (name, value) in fields {
        let name = name.as_ref();
        if !name.starts_with(SCORE_FIELD_PREFIX) {
            continue;
        }
        match decode_score_key(name) {
            Some(key) => batch.entries.push(ScoreEntry {
                key,
                raw: value.into(),
            }),
            None => {
                tracing::warn!(field = name, "Malformed score field, skipping");
                batch.malformed += 1;
            }
        }
    }
    batch
}
