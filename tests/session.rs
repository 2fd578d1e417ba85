//! End-to-end sessions over in-memory input

use std::fs;
use tinyrel::{run_script, Catalog, DbError, Row, SessionConfig, Table};

fn run(script: &str) -> (Catalog, String) {
    run_script(script, SessionConfig::batch()).unwrap()
}

fn run_in(dir: &std::path::Path, script: &str) -> (Catalog, String) {
    run_script(script, SessionConfig::for_testing(dir)).unwrap()
}

#[test]
fn duplicate_insert_prints_one_row() {
    let (catalog, out) = run(
        "CREATE TABLE t (a,b);
         INSERT INTO t VALUES '1','2';
         INSERT INTO t VALUES '1','2';
         SELECT a,b FROM t;",
    );
    assert_eq!(out, "Search results:\n  1 2\n");
    assert_eq!(catalog.table("t").unwrap().len(), 1);
}

#[test]
fn two_table_join() {
    let (_, out) = run(
        "create table R (x);
         insert into R values '1';
         insert into R values '2';
         create table S (y);
         insert into S values '2';
         insert into S values '3';
         select x,y from R,S where x = y;",
    );
    assert_eq!(out, "Search results:\n  2 2\n");
}

#[test]
fn join_result_grouped_by_outer_row() {
    let (_, out) = run(
        "create table R (x);
         insert into R values 'a';
         insert into R values 'b';
         create table S (y);
         insert into S values '1';
         insert into S values '2';
         select x, y from R, S where x != y;",
    );
    assert_eq!(out, "Search results:\n  a 1\n  a 2\n  b 1\n  b 2\n");
}

#[test]
fn join_projection_merges_equal_outputs() {
    let (catalog, _) = run(
        "create table R (x, tag);
         insert into R values '1', 'p';
         insert into R values '1', 'q';
         create table S (y);
         insert into S values '1';
         create table out as select x, y from R, S where x = y;",
    );
    assert_eq!(catalog.table("out").unwrap().len(), 1);
}

#[test]
fn string_ordering_in_conditions() {
    let (_, out) = run(
        "create table n (v);
         insert into n values '9';
         insert into n values '10';
         insert into n values '101';
         select v from n where v > '100';",
    );
    // '9' sorts after '100'; '10' does not.
    assert_eq!(out, "Search results:\n  9\n  101\n");
}

#[test]
fn malformed_statement_does_not_corrupt_catalog() {
    let (catalog, out) = run(
        "create table t (a, b);
         insert into t values '1', '2'
         create table t (z);
         insert into t values '3', '4';
         print t;",
    );
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Error: "));
    assert_eq!(&lines[1..], &["Contents of t:", "  3 4"]);
    assert_eq!(catalog.table("t").unwrap().column_count(), 2);
}

#[test]
fn wrong_arity_insert_is_reported() {
    let (catalog, out) = run(
        "create table t (a, b);
         insert into t values '1';
         insert into t values '1', '2', '3';
         print t;",
    );
    let errors = out.lines().filter(|l| l.starts_with("Error: inserted row has wrong length")).count();
    assert_eq!(errors, 2);
    assert!(catalog.table("t").unwrap().is_empty());
}

#[test]
fn print_missing_table_is_specific() {
    let (_, out) = run("print nothing;");
    assert_eq!(out, "Error: table nothing does not exist\n");
}

#[test]
fn exit_stops_the_session() {
    let (catalog, out) = run("create table a (x); exit; create table b (y);");
    assert!(catalog.contains("a"));
    assert!(!catalog.contains("b"));
    assert_eq!(out, "");

    let (catalog, _) = run("quit; create table b (y);");
    assert!(catalog.is_empty());
}

#[test]
fn keywords_ignore_case_names_do_not() {
    let (catalog, out) = run("Create Table T (A); print t;");
    assert!(catalog.contains("T"));
    assert_eq!(out, "Error: table t does not exist\n");
}

#[test]
fn store_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = run_in(
        dir.path(),
        "create table students (SID, Lastname, Firstname);
         insert into students values '101', 'Knowles', 'Jason';
         insert into students values '102', 'Chan', 'Valerie';
         store students;",
    );
    assert_eq!(out, "Stored students.db\n");
    assert_eq!(
        fs::read_to_string(dir.path().join("students.db")).unwrap(),
        "SID,Lastname,Firstname\n101,Knowles,Jason\n102,Chan,Valerie\n"
    );

    let (catalog, out) = run_in(dir.path(), "load students; select Firstname from students where SID = '102';");
    assert_eq!(out, "Loaded students.db\nSearch results:\n  Valerie\n");
    let students = catalog.table("students").unwrap();
    assert_eq!(students.titles(), &["SID", "Lastname", "Firstname"].map(String::from));
    assert_eq!(students.len(), 2);
}

#[test]
fn load_reports_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.db"), "").unwrap();
    fs::write(dir.path().join("ragged.db"), "a,b\n1,2\n3\n").unwrap();

    let (catalog, out) = run_in(dir.path(), "load empty; load ragged; load missing;");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("Error: ")));
    assert_eq!(lines[2], "Error: could not find missing.db");
    assert!(catalog.is_empty());
}

#[test]
fn load_from_enrolled_fixture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("enrolled.db"),
        "SID,CCN,Grade\n101,21228,B\n101,21105,B+\n102,21231,A-\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("schedule.db"),
        "CCN,Num,Dept\n21228,61A,EECS\n21105,61B,EECS\n21231,1A,English\n",
    )
    .unwrap();

    let (_, out) = run_in(
        dir.path(),
        "load enrolled; load schedule;
         select SID, Num from enrolled, schedule
             where enrolled.CCN = schedule.CCN and Dept = 'EECS';",
    );
    assert_eq!(
        out,
        "Loaded enrolled.db\nLoaded schedule.db\nSearch results:\n  101 61A\n  101 61B\n"
    );
}

#[test]
fn table_model_properties() {
    let titles: Vec<String> = ["c0", "c1", "c2"].map(String::from).to_vec();
    let mut table = Table::new("t", titles.clone()).unwrap();
    assert_eq!(table.column_count(), titles.len());
    for (i, title) in titles.iter().enumerate() {
        assert_eq!(table.column_index(title), Some(i));
    }
    assert_eq!(table.column_index("missing"), None);

    let before = table.len();
    assert!(matches!(
        table.add(Row::from(&["only"][..])),
        Err(DbError::WrongRowLength { .. })
    ));
    assert_eq!(table.len(), before);

    assert!(table.add(Row::from(&["a", "b", "c"][..])).unwrap());
    assert!(!table.add(Row::from(&["a", "b", "c"][..])).unwrap());
    assert!(table.add(Row::from(&["a", "b", "d"][..])).unwrap());
    assert_eq!(table.len(), 2);
}
