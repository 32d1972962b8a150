use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const SURFACE_CSV: &str = "Point Number,Northing,Easting,Elevation,Description\n\
                           1,0,0,0,GND\n\
                           2,0,10,10,GND\n\
                           3,10,10,20,GND\n\
                           4,10,0,10,GND\n";

#[test]
fn design_criteria_command() {
    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["design-criteria", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Minimum radius: 1250.000"));
}

#[test]
fn design_criteria_json() {
    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["--json", "design-criteria", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_radius\""))
        .stdout(predicate::str::contains("\"speed\": 60.0"));
}

#[test]
fn unusable_speed_fails() {
    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["design-criteria", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("design speed 200"));
}

#[test]
fn import_points_skips_bad_rows() {
    let file = assert_fs::NamedTempFile::new("points.txt").unwrap();
    file.write_str("1,100.0,200.0,50.0,IP\n2,oops,1,1,BAD\n3,110.0,210.0,51.0,CP\n4 120.0 220.0 52.0 TBM\n")
        .unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["import-points", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 3 points into 'Point Group #1' (1 rows skipped)",
        ))
        .stderr(predicate::str::contains("Skipped line 2"));
}

#[test]
fn import_points_with_name_and_format() {
    let file = assert_fs::NamedTempFile::new("points.txt").unwrap();
    file.write_str("200.0 100.0 50.0\n210.0 110.0 51.0\n").unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "import-points",
            file.path().to_str().unwrap(),
            "--format",
            "ENZ",
            "--name",
            "Topo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 points into 'Topo'"));
}

#[test]
fn surface_samples_elevation() {
    let file = assert_fs::NamedTempFile::new("surface.csv").unwrap();
    file.write_str(SURFACE_CSV).unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "surface",
            file.path().to_str().unwrap(),
            "--at",
            "2.5",
            "5",
            "--at",
            "20",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Surface 'Terrain Item #1': 4 points, 2 triangles"))
        .stdout(predicate::str::contains("Elevation at (2.5, 5): 7.500"))
        .stdout(predicate::str::contains("Elevation at (20, 20): outside surface"));
}

#[test]
fn two_points_cannot_make_a_surface() {
    let file = assert_fs::NamedTempFile::new("surface.csv").unwrap();
    file.write_str("Point Number,Northing,Easting,Elevation,Description\n1,0,0,0,\n2,0,10,10,\n")
        .unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["surface", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 3 points, found 2"));
}

#[test]
fn hull_of_square() {
    let file = assert_fs::NamedTempFile::new("surface.csv").unwrap();
    file.write_str(SURFACE_CSV).unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["hull", file.path().to_str().unwrap(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hull has 4 edges"));
}

#[test]
fn alignment_with_curves_writes_path() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("pis.txt");
    input.write_str("0,0\n1000,0\n1000,1000\n").unwrap();
    let output = dir.child("path.json");

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "alignment",
            input.path().to_str().unwrap(),
            "--speed",
            "30",
            "--curve",
            "circular",
            "--output",
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alignment 'Alignment #1': 4 segments"));

    output.assert(predicate::str::contains("CircularArc"));
    dir.close().unwrap();
}

#[test]
fn alignment_without_speed_is_a_polyline() {
    let input = assert_fs::NamedTempFile::new("pis.txt").unwrap();
    input.write_str("0,0\n1000,0\n1000,1000\n").unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["alignment", input.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 segments, length 2000.000"));
}

#[test]
fn profile_samples_ground() {
    let dir = assert_fs::TempDir::new().unwrap();
    let surface = dir.child("surface.csv");
    surface.write_str(SURFACE_CSV).unwrap();
    let alignment = dir.child("pis.txt");
    alignment.write_str("1,5\n9,5\n").unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "profile",
            alignment.path().to_str().unwrap(),
            surface.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.000,6.000"))
        .stdout(predicate::str::contains("8.000,14.000"));
    dir.close().unwrap();
}

#[test]
fn config_file_is_applied() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("scene.json");
    config.write_str("{\"arc_samples\": 12, \"undo_limit\": 5}").unwrap();
    let input = dir.child("pis.txt");
    input.write_str("0,0\n100,0\n").unwrap();

    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "alignment",
            input.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    let bad = dir.child("bad.json");
    bad.write_str("{\"background\": \"not a color\"}").unwrap();
    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args([
            "--config",
            bad.path().to_str().unwrap(),
            "alignment",
            input.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
    dir.close().unwrap();
}

#[test]
fn missing_input_fails() {
    Command::cargo_bin("civil_cad_cli")
        .unwrap()
        .args(["import-points", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading does-not-exist.txt"));
}
