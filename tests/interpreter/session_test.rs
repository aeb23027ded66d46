use std::{
    fs,
    io::{self, Write},
};

use archivist::{
    executor::RecordEngine,
    interpreter::{
        run_file,
        session::{Session, SessionSummary},
    },
    sink::{OperationLog, Outcome, OutputSink},
    storage::{codec::StorageFormat, type_store::MemoryTypeStore},
    types::error::DatabaseError,
    utils::mock::TempDatabase,
};

const SCENARIO: &str = "\
create type Student 2 1 id int name str
create record Student 1 Alice
create record Student 1 Bob
search Student 1
delete Student 1
search Student 1
";

fn memory_session() -> Session<MemoryTypeStore, Vec<u8>, Vec<u8>> {
    Session::new(
        RecordEngine::new(MemoryTypeStore::new()),
        OperationLog::new(Vec::new()),
        OutputSink::new(Vec::new()),
    )
}

/// Strip the timestamp column of each log line.
fn log_tail(log: &str) -> Vec<String> {
    log.lines()
        .map(|line| {
            let (timestamp, rest) = line.split_once(", ").unwrap();
            assert!(timestamp.parse::<i64>().is_ok(), "bad timestamp in {:?}", line);
            rest.to_string()
        })
        .collect()
}

#[test]
fn test_end_to_end_scenario() {
    let mut session = memory_session();
    session.run(SCENARIO.as_bytes()).unwrap();
    assert_eq!(
        session.summary(),
        SessionSummary {
            operations: 6,
            successes: 4,
            failures: 2,
            output_lines: 1,
        }
    );

    let (_, log, output) = session.into_parts().unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "1 Alice\n");
    assert_eq!(
        log_tail(&String::from_utf8(log).unwrap()),
        vec![
            "create type Student 2 1 id int name str, success",
            "create record Student 1 Alice, success",
            "create record Student 1 Bob, failure",
            "search Student 1, success",
            "delete Student 1, success",
            "search Student 1, failure",
        ]
    );
}

#[test]
fn test_every_search_hit_is_written_in_order() {
    let mut session = memory_session();
    let input = "\
create type Book 2 2 title str isbn str
create record Book Dune 978
create record Book Emma 979
search record Book 979
search Book 000
search Book 978
";
    session.run(input.as_bytes()).unwrap();
    let (_, _, output) = session.into_parts().unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "Emma 979\nDune 978\n");
}

#[test]
fn test_blank_and_malformed_lines() {
    let mut session = memory_session();

    assert_eq!(session.execute_line(1, "   ").unwrap(), None);
    assert_eq!(
        session.execute_line(2, "create type Student two 1 id int").unwrap(),
        Some(Outcome::Failure)
    );
    assert_eq!(
        session.execute_line(3, "frobnicate Student").unwrap(),
        Some(Outcome::Failure)
    );
    assert_eq!(
        session.execute_line(4, "  create type Student 1 1 id int  ").unwrap(),
        Some(Outcome::Success)
    );

    let (_, log, _) = session.into_parts().unwrap();
    assert_eq!(
        log_tail(&String::from_utf8(log).unwrap()),
        vec![
            "create type Student two 1 id int, failure",
            "frobnicate Student, failure",
            "create type Student 1 1 id int, success",
        ]
    );
}

#[test]
fn test_run_file_writes_sinks_and_store() {
    let temp_db = TempDatabase::with_prefix("run_file");
    let config = temp_db.config();
    let input = temp_db.file("input.txt");
    fs::write(&input, SCENARIO).unwrap();

    let summary = run_file(&config, &input).unwrap();
    assert_eq!(summary.operations, 6);

    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "1 Alice\n");
    assert_eq!(fs::read_to_string(&config.log_path).unwrap().lines().count(), 6);
    assert!(temp_db.file("Student.json").exists());
}

#[test]
fn test_log_appends_and_output_is_rewritten_across_runs() {
    let temp_db = TempDatabase::with_format(StorageFormat::Binary);
    let config = temp_db.config();
    let first = temp_db.file("first.txt");
    let second = temp_db.file("second.txt");
    fs::write(&first, SCENARIO).unwrap();
    fs::write(&second, "create record Student 2 Carol\nsearch Student 2\n").unwrap();

    run_file(&config, &first).unwrap();
    run_file(&config, &second).unwrap();

    // Type state carried over from the first run.
    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "2 Carol\n");
    let log = fs::read_to_string(&config.log_path).unwrap();
    let tail = log_tail(&log);
    assert_eq!(tail.len(), 8);
    assert_eq!(tail[0], "create type Student 2 1 id int name str, success");
    assert_eq!(tail[7], "search Student 2, success");
    assert!(temp_db.file("Student.arc").exists());
}

#[test]
fn test_missing_input_file_is_an_error() {
    let temp_db = TempDatabase::new();
    let result = run_file(&temp_db.config(), temp_db.file("nope.txt"));
    assert!(matches!(result, Err(DatabaseError::Io(_))));
}

#[test]
fn test_corrupted_store_stops_the_run() {
    let temp_db = TempDatabase::new();
    let config = temp_db.config();
    fs::write(temp_db.file("Student.json"), "not json").unwrap();
    let input = temp_db.file("input.txt");
    fs::write(&input, "search Student 1\nsearch Student 2\n").unwrap();

    let result = run_file(&config, &input);
    assert!(matches!(result, Err(DatabaseError::CorruptedSchema { .. })));

    // The faulting line is still logged; nothing after it runs.
    let log = fs::read_to_string(&config.log_path).unwrap();
    assert_eq!(log_tail(&log), vec!["search Student 1, failure"]);
}

#[test]
fn test_overlong_type_name_does_not_stop_the_run() {
    let temp_db = TempDatabase::new();
    let config = temp_db.config();
    let input = temp_db.file("input.txt");
    let script = format!(
        "search {} 1\n\
         create type Student 2 1 id int name str\n\
         create record Student 1 Alice\n\
         search Student 1\n",
        "A".repeat(300)
    );
    fs::write(&input, script).unwrap();

    let summary = run_file(&config, &input).unwrap();
    assert_eq!(summary.operations, 4);
    assert_eq!(summary.failures, 1);

    let log = fs::read_to_string(&config.log_path).unwrap();
    let tail = log_tail(&log);
    assert_eq!(tail.len(), 4);
    assert!(tail[0].ends_with(", failure"));
    assert_eq!(tail[3], "search Student 1, success");
    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "1 Alice\n");
}

#[test]
fn test_path_like_type_name_is_a_rejection() {
    let temp_db = TempDatabase::new();
    fs::write(temp_db.file("somefile"), b"").unwrap();
    let mut session = Session::new(
        temp_db.engine().unwrap(),
        OperationLog::new(Vec::new()),
        OutputSink::new(Vec::new()),
    );

    assert_eq!(
        session.execute_line(1, "search somefile/x 1").unwrap(),
        Some(Outcome::Failure)
    );
    assert_eq!(
        session.execute_line(2, "create record somefile/x 1").unwrap(),
        Some(Outcome::Failure)
    );
    assert_eq!(
        session.execute_line(3, "create type somefile/x 1 1 id int").unwrap(),
        Some(Outcome::Failure)
    );
}

/// Output writer whose every write fails.
struct BrokenOutput;

impl Write for BrokenOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("output device gone"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failed_output_write_is_logged_before_stopping() {
    let mut session = Session::new(
        RecordEngine::new(MemoryTypeStore::new()),
        OperationLog::new(Vec::new()),
        OutputSink::new(BrokenOutput),
    );
    session
        .execute_line(1, "create type Student 2 1 id int name str")
        .unwrap();
    session.execute_line(2, "create record Student 1 Alice").unwrap();

    let result = session.execute_line(3, "search Student 1");
    assert!(matches!(result, Err(DatabaseError::Io(_))));
    assert_eq!(session.summary().failures, 1);
    assert_eq!(session.summary().output_lines, 0);

    let (_, log, _) = session.into_parts().unwrap();
    assert_eq!(
        log_tail(&String::from_utf8(log).unwrap()),
        vec![
            "create type Student 2 1 id int name str, success",
            "create record Student 1 Alice, success",
            "search Student 1, failure",
        ]
    );
}
