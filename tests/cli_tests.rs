//! Integration tests for the recograph CLI
//!
//! These tests run the binary against a temporary SQLite graph store.

mod support;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use support::{create_graph_store, recograph};

const TRIANGLE: [&str; 6] = ["--edge", "A:B:0.25", "--edge", "A:C:0.5", "--edge", "B:C:0.33"];

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn test_help_flag() {
    recograph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: recograph"))
        .stdout(predicate::str::contains("algo"))
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("marathon"));
}

#[test]
fn test_unknown_subcommand_json_envelope() {
    recograph()
        .args(["--format", "json", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\": \"usage_error\"").or(
            predicate::str::contains("\"type\":\"usage_error\""),
        ));
}

#[test]
fn test_missing_store_is_usage_error() {
    recograph()
        .args(["trending", "movies"])
        .env_remove("RECOGRAPH_DB")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--db"));
}

#[test]
fn test_store_file_missing_is_data_error() {
    let dir = tempdir().unwrap();
    recograph()
        .arg("--db")
        .arg(dir.path().join("absent.db"))
        .args(["trending", "movies"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store unavailable"));
}

// ============================================================================
// Algorithm playground on explicit edges
// ============================================================================

#[test]
fn test_dijkstra_raw_triangle() {
    let output = recograph()
        .args(["--format", "json", "algo", "dijkstra", "A", "--undirected"])
        .args(TRIANGLE)
        .args(["--target", "C"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["distances"]["A"], 0.0);
    assert_eq!(json["distances"]["B"], 0.25);
    assert_eq!(json["distances"]["C"], 0.5);
    assert_eq!(json["path"], serde_json::json!(["A", "C"]));
}

#[test]
fn test_dijkstra_missing_source_is_all_unreachable() {
    let output = recograph()
        .args(["--format", "json", "algo", "dijkstra", "Z"])
        .args(TRIANGLE)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert!(json["distances"]["A"].is_null());
}

#[test]
fn test_kruskal_raw_triangle() {
    let output = recograph()
        .args(["--format", "json", "algo", "kruskal", "--undirected"])
        .args(TRIANGLE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    let edges = json["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["from"], "A");
    assert_eq!(edges[0]["to"], "B");
    assert_eq!(edges[1]["from"], "B");
    assert_eq!(edges[1]["to"], "C");
    let total = json["total_weight"].as_f64().unwrap();
    assert!((total - 0.58).abs() < 1e-9);
}

#[test]
fn test_bfs_human_output() {
    recograph()
        .args(["algo", "bfs", "A"])
        .args(TRIANGLE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("A\n"));
}

#[test]
fn test_dfs_missing_start_is_empty() {
    let output = recograph()
        .args(["--format", "json", "algo", "dfs", "Q"])
        .args(TRIANGLE)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["order"], serde_json::json!([]));
}

#[test]
fn test_prim_isolated_node() {
    let output = recograph()
        .args(["--format", "json", "algo", "prim", "solo", "--node", "solo"])
        .args(TRIANGLE)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["edges"], serde_json::json!([]));
    assert_eq!(json["nodes"], serde_json::json!(["solo"]));
}

#[test]
fn test_bad_edge_is_usage_error() {
    recograph()
        .args(["algo", "bfs", "A", "--edge", "A-B"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FROM:TO:WEIGHT"));
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_rank_sort_descending_stable() {
    let output = recograph()
        .args(["--format", "json", "rank", "sort", "a=2", "b=1", "c=2", "--order", "desc"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
}

#[test]
fn test_rank_top_k() {
    let output = recograph()
        .args(["--format", "json", "rank", "top-k", "-k", "2", "x=1", "y=9", "z=5"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json[0]["id"], "y");
    assert_eq!(json[1]["id"], "z");
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_rank_top_zero_rejected() {
    recograph()
        .args(["rank", "top-k", "-k", "0", "x=1"])
        .assert()
        .code(2);
}

// ============================================================================
// Store-backed commands
// ============================================================================

#[test]
fn test_algo_on_stored_graph() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "algo", "bfs", "Radiohead", "--graph", "bands"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        json_stdout(&output)["order"],
        serde_json::json!(["Radiohead", "Muse", "Coldplay"])
    );
}

#[test]
fn test_unknown_graph_type_falls_back_to_movies() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "algo", "bfs", "m4", "--graph", "podcasts"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["order"], serde_json::json!(["m4", "m5"]));
}

#[test]
fn test_recommend_friends() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "recommend", "friends", "alice", "-k", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json[0]["id"], "bob");
    assert_eq!(json[1]["id"], "carol");
}

#[test]
fn test_recommend_blank_user_is_usage_error() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    recograph()
        .arg("--db")
        .arg(&db)
        .args(["recommend", "songs", " "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("user is required"));
}

#[test]
fn test_recommend_movies_strategies() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    for (strategy, first) in [("nearest", "m3"), ("bfs", "m3"), ("rating", "m4")] {
        let output = recograph()
            .arg("--db")
            .arg(&db)
            .args(["--format", "json", "recommend", "movies", "alice", "--strategy", strategy])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", strategy);
        assert_eq!(json_stdout(&output)[0]["id"], first, "{}", strategy);
    }
}

#[test]
fn test_recommend_songs_prim_backbone() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args([
            "--format", "json", "recommend", "songs", "alice", "-k", "1", "--backbone", "prim",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)[0]["id"], "s3");
}

#[test]
fn test_trending_songs_platform() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    recograph()
        .arg("--db")
        .arg(&db)
        .args(["trending", "songs", "-k", "1", "--platform", "Spotify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s1"));
}

#[test]
fn test_trending_taste_json() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "trending", "taste", "alice", "-k", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["user_genres"]["Drama"], 2);
    assert_eq!(json["shared_genres"], serde_json::json!(["Drama"]));
}

#[test]
fn test_marathon_plan() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args([
            "--format",
            "json",
            "marathon",
            "alice",
            "--minutes",
            "240",
            "--algorithm",
            "branch-and-bound",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["total_duration"], 213);
    assert_eq!(json["algorithm"], "branch-and-bound");
}

#[test]
fn test_marathon_zero_minutes_rejected() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    recograph()
        .arg("--db")
        .arg(&db)
        .args(["marathon", "alice", "--minutes", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let config = dir.path().join("recograph.toml");
    std::fs::write(&config, "[recommend]\nmax_seeds = 0\n").unwrap();

    recograph()
        .arg("--db")
        .arg(&db)
        .arg("--config")
        .arg(&config)
        .args(["recommend", "movies", "alice"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_seeds"));
}

#[test]
fn test_playlist_json() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "playlist", "bob", "-n", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    let ids: Vec<&str> = json["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["s1", "s3"]);
    assert_eq!(json["total_duration"], 440);
}

#[test]
fn test_playlist_repeat_artists() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());

    // Only two artists in bob's history
    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args(["--format", "json", "playlist", "bob", "-n", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(json_stdout(&output).is_null());

    let output = recograph()
        .arg("--db")
        .arg(&db)
        .args([
            "--format",
            "json",
            "playlist",
            "bob",
            "-n",
            "3",
            "--allow-repeat-artists",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["total_duration"], 620);
}

#[test]
fn test_playlist_human_output() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    recograph()
        .arg("--db")
        .arg(&db)
        .args(["playlist", "bob", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. s1  One  A  3:20"))
        .stdout(predicate::str::contains("2. s3  Three  C  4:00"))
        .stdout(predicate::str::contains("2 songs  7:20"));
}

#[test]
fn test_playlist_zero_size_rejected() {
    let dir = tempdir().unwrap();
    let db = create_graph_store(dir.path());
    recograph()
        .arg("--db")
        .arg(&db)
        .args(["playlist", "bob", "-n", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("size"));
}
