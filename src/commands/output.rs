//! Shared output helpers

use serde::Serialize;

use recograph_core::error::Result;

/// Print any serializable result as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human rendering of a distance or score
pub fn format_score(score: f64) -> String {
    if score.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.4}", score)
    }
}

/// `(id, score)` rows as `{"id", "score"}` objects
pub fn scored_json<'a>(items: impl IntoIterator<Item = (&'a str, f64)>) -> serde_json::Value {
    serde_json::Value::Array(
        items
            .into_iter()
            .map(|(id, score)| serde_json::json!({ "id": id, "score": score }))
            .collect(),
    )
}

/// Print numbered `id  score` lines
pub fn print_scored<'a>(items: impl IntoIterator<Item = (&'a str, f64)>) {
    for (i, (id, score)) in items.into_iter().enumerate() {
        println!("{:>3}. {}  {}", i + 1, id, format_score(score));
    }
}
