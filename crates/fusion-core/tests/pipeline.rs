//! End-to-end runs of the fusion pipeline against temporary folders.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use fusion_core::{
    FusionError, FusionErrorKind, MAX_WARNING_ENTRIES, TRUNCATION_MARKER, run_fusion,
};
use fusion_ingest::read_csv_table;
use fusion_model::{EventSink, FusionConfig, FusionEvent, FusionMode};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<FusionEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<FusionEvent> {
        self.events.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<Vec<String>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FusionEvent::Warning { messages } => Some(messages),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: FusionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn setup() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn concat_skips_broken_files_and_warns() {
    let (input, output) = setup();
    write_file(input.path(), "f1.csv", "id,a\n1,x\n");
    write_file(input.path(), "f2.csv", "");
    write_file(input.path(), "f3.csv", "id,b\n2,y\n");
    write_file(input.path(), "f4.csv", "");
    write_file(input.path(), "f5.csv", "id,a\n3,z\n");

    let out = output.path().join("result.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Concat);
    let sink = RecordingSink::default();

    let outcome = run_fusion(&config, &sink).unwrap();

    assert_eq!(outcome.files_discovered, 5);
    assert_eq!(outcome.files_loaded(), 3);
    assert_eq!(outcome.result.height(), 3);
    assert_eq!(outcome.result.width(), 3);
    assert!(out.exists());

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].len(), 2);
    assert!(warnings[0][0].starts_with("f2.csv: "));
    assert!(warnings[0][1].starts_with("f4.csv: "));
}

#[test]
fn all_files_unreadable_fails_without_output() {
    let (input, output) = setup();
    write_file(input.path(), "a.csv", "");
    write_file(input.path(), "b.csv", "   \n");

    let out = output.path().join("result.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Concat);
    let sink = RecordingSink::default();

    let err = run_fusion(&config, &sink).unwrap_err();

    assert!(matches!(err, FusionError::NoReadableFiles { .. }));
    assert_eq!(err.kind(), FusionErrorKind::Runtime);
    let message = err.to_string();
    assert!(message.starts_with("no files could be read successfully from"));
    assert!(message.contains("a.csv: "));
    assert!(message.contains("b.csv: "));
    assert!(!out.exists());

    let events = sink.events();
    assert!(matches!(events.last(), Some(FusionEvent::Failed { .. })));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, FusionEvent::Completed { .. }))
    );
}

#[test]
fn single_file_output_is_mode_independent() {
    let (input, output) = setup();
    write_file(input.path(), "only.csv", "id,name,score\n1,a,1.5\n2,b,\n3,,2\n");

    let concat_out = output.path().join("concat.csv");
    let merge_out = output.path().join("merge.csv");

    run_fusion(
        &FusionConfig::new(input.path(), &concat_out, FusionMode::Concat),
        &RecordingSink::default(),
    )
    .unwrap();
    run_fusion(
        &FusionConfig::new(input.path(), &merge_out, FusionMode::Merge),
        &RecordingSink::default(),
    )
    .unwrap();

    let concat_bytes = fs::read(&concat_out).unwrap();
    let merge_bytes = fs::read(&merge_out).unwrap();
    assert_eq!(concat_bytes, merge_bytes);
}

#[test]
fn csv_output_reloads_with_same_shape() {
    let (input, output) = setup();
    write_file(input.path(), "a.csv", "id,x\n1,A\n2,B\n");
    write_file(input.path(), "b.csv", "id,y\n2,true\n3,false\n");

    let out = output.path().join("merged.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Merge);
    let outcome = run_fusion(&config, &RecordingSink::default()).unwrap();

    let (reloaded, _) = read_csv_table(&out).unwrap();
    let written: Vec<_> = outcome.result.get_column_names_str();
    let read: Vec<_> = reloaded.get_column_names_str();
    assert_eq!(written, read);
    assert_eq!(written, vec!["id", "x", "y"]);
    assert_eq!(reloaded.height(), outcome.result.height());
    assert_eq!(reloaded.height(), 3);
}

#[test]
fn warning_lists_at_most_ten_failures() {
    let (input, output) = setup();
    for idx in 0..12 {
        write_file(input.path(), &format!("bad{idx:02}.csv"), "");
    }
    write_file(input.path(), "good.csv", "id\n1\n");

    let out = output.path().join("result.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Concat);
    let sink = RecordingSink::default();

    let outcome = run_fusion(&config, &sink).unwrap();
    assert_eq!(outcome.load_errors.len(), 12);

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    let messages = &warnings[0];
    assert_eq!(messages.len(), MAX_WARNING_ENTRIES + 1);
    assert!(messages[0].starts_with("bad00.csv: "));
    assert!(messages[9].starts_with("bad09.csv: "));
    assert_eq!(messages[10], TRUNCATION_MARKER);
}

#[test]
fn missing_input_folder_is_not_found() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("does-not-exist");
    let config = FusionConfig::new(&missing, output.path().join("r.csv"), FusionMode::Concat);
    let sink = RecordingSink::default();

    let err = run_fusion(&config, &sink).unwrap_err();

    assert_eq!(err.kind(), FusionErrorKind::NotFound);
    assert_eq!(
        sink.events(),
        vec![FusionEvent::Failed {
            error: err.to_string()
        }]
    );
}

#[test]
fn folder_without_candidates_is_not_found() {
    let (input, output) = setup();
    write_file(input.path(), "notes.txt", "hello");

    let config = FusionConfig::new(
        input.path(),
        output.path().join("r.csv"),
        FusionMode::Concat,
    );
    let err = run_fusion(&config, &RecordingSink::default()).unwrap_err();
    assert_eq!(err.kind(), FusionErrorKind::NotFound);
}

#[test]
fn merge_without_common_columns_is_runtime_failure() {
    let (input, output) = setup();
    write_file(input.path(), "a.csv", "id,x\n1,A\n");
    write_file(input.path(), "b.csv", "key,y\n1,B\n");

    let out = output.path().join("r.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Merge);
    let err = run_fusion(&config, &RecordingSink::default()).unwrap_err();

    assert_eq!(err.kind(), FusionErrorKind::Runtime);
    assert!(!out.exists());
}

#[test]
fn unwritable_output_is_write_failure() {
    let (input, output) = setup();
    write_file(input.path(), "a.csv", "id\n1\n");

    let out = output.path().join("missing-dir").join("r.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Concat);
    let err = run_fusion(&config, &RecordingSink::default()).unwrap_err();

    assert_eq!(err.kind(), FusionErrorKind::Write);
    assert!(err.to_string().starts_with("an error occurred while writing to"));
}

#[test]
fn events_follow_pipeline_order() {
    let (input, output) = setup();
    write_file(input.path(), "a.csv", "id,v\n1,2\n");
    write_file(input.path(), "b.csv", "");
    write_file(input.path(), "c.csv", "id,v\n3,4\n");

    let out = output.path().join("r.csv");
    let config = FusionConfig::new(input.path(), &out, FusionMode::Concat);
    let sink = RecordingSink::default();
    run_fusion(&config, &sink).unwrap();

    let status = |message: &str| FusionEvent::Status {
        message: message.to_string(),
    };
    let progress = |processed| FusionEvent::Progress {
        processed,
        total: 3,
    };

    let events = sink.events();
    assert_eq!(events.len(), 9);
    assert_eq!(events[0], status("Reading files..."));
    assert_eq!(events[1], progress(1));
    assert_eq!(events[2], progress(2));
    assert_eq!(events[3], progress(3));
    assert!(matches!(&events[4], FusionEvent::Warning { messages } if messages.len() == 1));
    assert_eq!(events[5], status("Reading completed, starting fusion..."));
    assert_eq!(events[6], status("Fusion completed, writing to file..."));
    assert_eq!(events[7], status("Writing completed"));
    assert_eq!(
        events[8],
        FusionEvent::Completed {
            output_path: out.clone()
        }
    );
}
