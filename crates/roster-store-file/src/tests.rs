//! Tests for `FileStore`, and for the roster operations running on top of it.

use std::fs;

use roster_core::{Error as CoreError, Grade, NewStudent, Roster, TableStore};
use tempfile::TempDir;

use crate::{Error, FileStore};

const HEADER_ONLY: &str = "Roll No,Name,Total,Percentage,Grade\n";

fn store_in(dir: &TempDir) -> FileStore {
  FileStore::open(dir.path().join("student_data.csv")).expect("open store")
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[test]
fn open_creates_header_only_file() {
  let dir = TempDir::new().unwrap();
  let store = store_in(&dir);

  assert_eq!(fs::read_to_string(store.path()).unwrap(), HEADER_ONLY);
  let table = store.load().unwrap();
  assert!(table.is_empty());
  assert!(table.subjects.is_empty());
}

#[test]
fn open_creates_missing_directories() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("nested").join("deeper").join("roster.csv");
  let store = FileStore::open(&path).unwrap();
  assert!(store.path().is_file());
}

#[test]
fn initialize_does_not_overwrite_existing_file() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  let existing = "Roll No,Name,Math,Total,Percentage,Grade\n1,Ada,91,91,91.0,A\n";
  fs::write(&path, existing).unwrap();

  let store = FileStore::open(&path).unwrap();
  store.initialize().unwrap();
  assert_eq!(fs::read_to_string(&path).unwrap(), existing);
}

#[test]
fn load_without_file_is_an_empty_table() {
  let dir = TempDir::new().unwrap();
  let store = FileStore::new(dir.path().join("absent.csv"));
  assert!(store.load().unwrap().is_empty());
  assert!(!store.path().exists());
}

#[test]
fn save_of_load_reproduces_the_file() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  let text = "Roll No,Name,Physics,\"Art, Modern\",Total,Percentage,Grade\n\
              007,\"Bond, James\",90,,90,45.0,D\n\
              07,Eve,100,100,200,100.0,A\n";
  fs::write(&path, text).unwrap();

  let store = FileStore::new(&path);
  let first = store.load().unwrap();
  store.save(&first).unwrap();
  let second = store.load().unwrap();

  assert_eq!(first, second);
  assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn save_leaves_no_scratch_file_behind() {
  let dir = TempDir::new().unwrap();
  let store = store_in(&dir);
  store.save(&store.load().unwrap()).unwrap();

  let names: Vec<String> = fs::read_dir(dir.path())
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["student_data.csv"]);
}

#[test]
fn failed_save_keeps_previous_version() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("roster.csv");
  let previous = "Roll No,Name,Math,Total,Percentage,Grade\n1,Ada,80,80,80.0,B\n";
  fs::write(&path, previous).unwrap();

  // A directory squatting on the scratch path makes the write fail.
  fs::create_dir(dir.path().join(".roster.csv.tmp")).unwrap();

  let store = FileStore::new(&path);
  let err = store.save(&Default::default()).unwrap_err();
  assert!(matches!(err, Error::Io { .. }));
  assert_eq!(fs::read_to_string(&path).unwrap(), previous);
}

#[test]
fn failed_save_into_missing_directory_creates_nothing() {
  let dir = TempDir::new().unwrap();
  let store = FileStore::new(dir.path().join("missing-dir").join("roster.csv"));

  let err = store.save(&Default::default()).unwrap_err();
  assert!(matches!(err, Error::Io { .. }));
  assert!(!store.path().exists());
}

#[test]
fn corrupt_file_is_a_format_error() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  fs::write(&path, "Roll No,Name,Math\n1,Ada,lots\n").unwrap();

  let err = FileStore::new(&path).load().unwrap_err();
  assert!(matches!(
    err,
    Error::Format { source: roster_csv::Error::InvalidNumber { line: 2, .. }, .. }
  ));
}

#[test]
fn headers_differing_only_in_case_are_refused() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  let contents = "Roll No,Name,Math,math,Total,Percentage,Grade\n1,Ada,10,90,100,50.0,D\n";
  fs::write(&path, contents).unwrap();

  let err = FileStore::new(&path).load().unwrap_err();
  assert!(matches!(
    err,
    Error::Format { source: roster_csv::Error::DuplicateColumn(_), .. }
  ));
  assert!(matches!(
    Roster::open(FileStore::new(&path)),
    Err(CoreError::Store(_))
  ));
  assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[test]
fn unreadable_path_is_an_io_error() {
  let dir = TempDir::new().unwrap();
  // A directory where the file should be.
  let err = FileStore::new(dir.path()).load().unwrap_err();
  assert!(matches!(err, Error::Io { .. }));
}

// ─── Roster over FileStore ───────────────────────────────────────────────────

#[test]
fn session_survives_a_restart() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");

  {
    let mut roster = Roster::open(FileStore::open(&path).unwrap()).unwrap();
    roster.add_subject("math").unwrap();
    roster
      .add_student(NewStudent::new("1", "Ada").with_mark("Math", "92"))
      .unwrap();
    roster.add_subject("ART").unwrap();
    roster
      .add_student(NewStudent::new("2", "Bob").with_mark("math", "70").with_mark("art", "50"))
      .unwrap();
  }

  assert_eq!(
    fs::read_to_string(&path).unwrap(),
    "Roll No,Name,Math,Art,Total,Percentage,Grade\n\
     1,Ada,92,0,92,46.0,D\n\
     2,Bob,70,50,120,60.0,C\n"
  );

  let mut roster = Roster::open(FileStore::open(&path).unwrap()).unwrap();
  let subjects: Vec<&str> = roster.list_subjects().iter().map(|s| s.as_str()).collect();
  assert_eq!(subjects, ["Math", "Art"]);

  roster.remove_subject("MATH").unwrap();
  assert_eq!(roster.delete_student("1").unwrap(), 1);

  assert_eq!(
    fs::read_to_string(&path).unwrap(),
    "Roll No,Name,Art,Total,Percentage,Grade\n2,Bob,50,50,50.0,D\n"
  );
}

#[test]
fn subject_added_to_empty_roster_is_not_yet_on_disk() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");

  let mut roster = Roster::open(FileStore::open(&path).unwrap()).unwrap();
  roster.add_subject("Math").unwrap();
  assert_eq!(fs::read_to_string(&path).unwrap(), HEADER_ONLY);

  let reopened = Roster::open(FileStore::open(&path).unwrap()).unwrap();
  assert!(reopened.list_subjects().is_empty());
}

#[test]
fn removing_subject_from_empty_roster_rewrites_header() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  fs::write(&path, "Roll No,Name,Math,Art,Total,Percentage,Grade\n").unwrap();

  let mut roster = Roster::open(FileStore::open(&path).unwrap()).unwrap();
  roster.remove_subject("art").unwrap();
  assert_eq!(
    fs::read_to_string(&path).unwrap(),
    "Roll No,Name,Math,Total,Percentage,Grade\n"
  );
}

#[test]
fn storage_failures_surface_as_store_errors() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("student_data.csv");
  fs::write(&path, "Roll No,Name\n\"unterminated\n").unwrap();

  match Roster::open(FileStore::new(&path)) {
    Err(CoreError::Store(source)) => {
      let inner = source.downcast_ref::<Error>().expect("file store error");
      assert!(matches!(inner, Error::Format { .. }));
    }
    Err(other) => panic!("expected a store error, got {other:?}"),
    Ok(_) => panic!("expected a store error"),
  }
}

#[test]
fn grades_read_back_from_disk() {
  let dir = TempDir::new().unwrap();
  let mut roster = Roster::open(store_in(&dir)).unwrap();
  roster.add_student(NewStudent::new("1", "Ada")).unwrap();

  let table = roster.list_records().unwrap();
  assert_eq!(table.records[0].grade, Grade::NotApplicable);
  assert_eq!(table.records[0].percentage, 0.0);
}
