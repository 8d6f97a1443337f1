//! Integration tests for the JSON and CSV result exports.

use americano_tournament_web::export::{results_json, standings_csv};
use americano_tournament_web::{
    confirm_match, record_score, start_tournament, Tournament, TournamentConfig,
};

fn tournament_after_two_matches() -> Tournament {
    let names: Vec<String> = ["Alex", "Blake", "Casey", "Drew"].iter().map(|s| s.to_string()).collect();
    let mut t = start_tournament(&names, TournamentConfig::with_courts(1)).unwrap();
    record_score(&mut t, 1, 1, 11).unwrap();
    record_score(&mut t, 1, 2, 9).unwrap();
    confirm_match(&mut t, 1).unwrap();
    record_score(&mut t, 2, 3, 5).unwrap();
    record_score(&mut t, 2, 4, 5).unwrap();
    confirm_match(&mut t, 2).unwrap();
    t
}

#[test]
fn json_export_lists_players_and_matches() {
    let t = tournament_after_two_matches();
    let value: serde_json::Value = serde_json::from_str(&results_json(&t).unwrap()).unwrap();

    assert_eq!(value["tournament"]["players"], 4);
    assert_eq!(value["tournament"]["matches"], 3);
    assert_eq!(value["tournament"]["completed"], false);

    // Alex and Blake 16 pts / 1 win, Casey and Drew 14 pts / 1 loss; ties go by name
    let names: Vec<&str> = value["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alex", "Blake", "Casey", "Drew"]);

    let matches = value["matches"].as_array().unwrap();
    assert_eq!(matches[0]["winner"], "Alex & Blake");
    assert_eq!(matches[0]["score"], "11-9");
    assert_eq!(matches[1]["winner"], "Tie");
    assert!(matches[2]["winner"].is_null());
    assert_eq!(matches[2]["status"], "pending");
}

#[test]
fn csv_export_has_header_and_ranked_rows() {
    let t = tournament_after_two_matches();
    let csv = standings_csv(&t).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "rank,name,points,matches_played,wins,losses");
    assert_eq!(lines[1], "1,Alex,16,2,1,0");
    assert_eq!(lines.len(), 5);
}
