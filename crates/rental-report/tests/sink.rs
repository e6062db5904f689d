//! Delivering exports to a directory

mod common;

use common::{options, scenario};
use rental_report::prelude::*;
use tempfile::TempDir;

#[test]
fn test_directory_sink_writes_every_format() {
    let dir = TempDir::new().unwrap();
    let mut sink = DirectorySink::new(dir.path().join("exports"));
    assert_eq!(sink.dir(), dir.path().join("exports"));
    let aggregate = scenario();

    for format in ExportFormat::ALL {
        let result =
            export(&ExportRequest::new(&aggregate, format, "rc-001"), &options()).unwrap();
        sink.deliver(&result).unwrap();

        let written = std::fs::read(sink.dir().join(&result.filename)).unwrap();
        assert_eq!(written, result.bytes);
    }
}

#[test]
fn test_sink_as_trait_object() {
    let dir = TempDir::new().unwrap();
    let mut sink: Box<dyn FileSink> = Box::new(DirectorySink::new(dir.path()));

    let result = export_named(&scenario(), "html", "report", &options()).unwrap();
    sink.deliver(&result).unwrap();

    assert!(dir.path().join("report.html").exists());
}
