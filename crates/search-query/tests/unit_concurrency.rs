//! Concurrent reads of one shared query

use std::sync::Arc;
use std::thread;

use search_query::{
    Capabilities, Polarized, Query, QueryConfig, QueryInfo, QueryParser, SyntaxMode,
};

#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    repo: (Vec<String>, Vec<String>),
    lang: (String, String),
    files: usize,
    fields: Vec<String>,
    case_sensitive: bool,
    trace_len: usize,
    capabilities: Capabilities,
}

fn owned(values: Polarized<Vec<&str>>) -> (Vec<String>, Vec<String>) {
    let (affirmed, negated) = values.into_tuple();
    (
        affirmed.into_iter().map(str::to_string).collect(),
        negated.into_iter().map(str::to_string).collect(),
    )
}

fn snapshot(query: &Query) -> Snapshot {
    let lang = query.string_value("lang");
    Snapshot {
        repo: owned(query.regexp_patterns("repo")),
        lang: (lang.affirmed.to_string(), lang.negated.to_string()),
        files: query.values("file").len(),
        fields: query.fields().keys().cloned().collect(),
        case_sensitive: query.is_case_sensitive(),
        trace_len: query.parse_tree().len(),
        capabilities: query.capabilities(),
    }
}

fn assert_concurrent_reads_agree(query: Query) {
    let query = Arc::new(query);
    let expected = snapshot(&query);

    thread::scope(|scope| {
        let handles = (0..8)
            .map(|_| {
                let query = Arc::clone(&query);
                scope.spawn(move || {
                    (0..200)
                        .map(|_| snapshot(&query))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            let snapshots = handle.join().expect("reader thread panicked");
            assert!(snapshots.iter().all(|snapshot| *snapshot == expected));
        }
    });
}

#[test]
fn ordinary_query_reads_are_consistent_across_threads() {
    let parser = QueryParser::code_search(QueryConfig::default());
    let query = parser
        .parse("repo:a -repo:b lang:go -lang:c file:x file:y case:yes needle")
        .expect("parse");
    assert!(query.is_case_sensitive());
    assert_concurrent_reads_agree(query);
}

#[test]
fn boolean_query_reads_are_consistent_across_threads() {
    let parser =
        QueryParser::code_search(QueryConfig::default().with_syntax(SyntaxMode::AndOr));
    let query = parser
        .parse("(repo:a or repo:b) and not lang:go")
        .expect("parse");
    assert_concurrent_reads_agree(query);
}
