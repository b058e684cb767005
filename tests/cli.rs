use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut c = Command::cargo_bin("midway").unwrap();
    c.arg("--offline");
    c
}

#[test]
fn distance_in_km() {
    cmd()
        .args(["--no-map", "New York", "London"])
        .assert()
        .success()
        .stdout(contains("Distance between 'New York' and 'London': 5570.23 km"));
}

#[test]
fn distance_in_miles_from_coordinates() {
    cmd()
        .args(["--no-map", "--unit", "mi", "0, 0", "0, 1"])
        .assert()
        .success()
        .stdout(contains("69.09 mi"));
}

#[test]
fn name_containing_a_city_is_not_found() {
    cmd()
        .args(["--no-map", "Limassol", "London"])
        .assert()
        .failure()
        .stderr(contains("Location not found: 'Limassol'"));
}

#[test]
fn json_report() {
    cmd()
        .args(["--no-map", "--json", "--unit", "ft", "Oslo", "Stockholm"])
        .assert()
        .success()
        .stdout(contains("\"unit\": \"feet\""))
        .stdout(contains("\"midpoint\""));
}

#[test]
fn unsupported_unit_rejected() {
    cmd()
        .args(["--unit", "furlongs", "London", "Paris"])
        .assert()
        .failure()
        .stderr(contains("Unsupported unit 'furlongs'"));
}

#[test]
fn unknown_place_fails() {
    cmd()
        .args(["--no-map", "London", "xyznowhere"])
        .assert()
        .failure()
        .stderr(contains("Location not found: 'xyznowhere'"));
}

#[test]
fn antipodal_points_fail() {
    cmd()
        .args(["--no-map", "0, 0", "0, 180"])
        .assert()
        .failure()
        .stderr(contains("antipodal"));
}

#[test]
fn writes_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("route.html");
    cmd()
        .args(["--output", path.to_str().unwrap(), "Paris", "Berlin"])
        .assert()
        .success();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("L.polyline"));
    assert!(html.contains("#FF0000"));
}

#[test]
fn interactive_prompts() {
    cmd()
        .arg("--no-map")
        .write_stdin("atlantis\nTokyo\nSydney\nmi\n")
        .assert()
        .success()
        .stderr(contains("Could not find 'atlantis'. Try again."))
        .stdout(contains("Distance between 'Tokyo' and 'Sydney'"))
        .stdout(contains(" mi"));
}
