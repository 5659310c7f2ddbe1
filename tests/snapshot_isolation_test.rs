use std::sync::Arc;
use std::thread;

use morsel::{Engine, Operator};

#[test]
fn test_searcher_keeps_its_snapshot() -> morsel::Result<()> {
    let engine = Engine::new();
    engine.load_json_array(r#"[{"title": "pizza recipe"}]"#)?;

    let searcher = engine.searcher();
    let query = searcher.parse("pizza", "*", Operator::Or)?;

    engine.load_json_array(r#"[{"title": "pizza oven"}, {"title": "pizza stone"}]"#)?;

    let pinned = searcher.evaluate(&query, 0, None, false)?;
    assert_eq!(pinned.total_hits, 1);
    assert_eq!(searcher.doc_count(), 1);

    let current = engine.searcher().evaluate(&query, 0, None, false)?;
    assert_eq!(current.total_hits, 3);

    Ok(())
}

#[test]
fn test_query_is_reusable_across_snapshots() -> morsel::Result<()> {
    let engine = Engine::new();
    let query = engine.searcher().parse("title:pizza", "*", Operator::And)?;

    assert_eq!(engine.searcher().count(&query), 0);
    engine.load_text_lines("pizza one\npizza two")?;
    assert_eq!(engine.searcher().count(&query), 2);

    Ok(())
}

#[test]
fn test_concurrent_loads_and_searches() -> morsel::Result<()> {
    let engine = Arc::new(Engine::new());
    engine.load_json_array(r#"[{"title": "pizza"}]"#)?;

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..50 {
                let batch = format!(r#"[{{"title": "pizza {i}"}}, {{"title": "pasta {i}"}}]"#);
                engine.load_json_array(&batch).map(|_| ())?;
            }
            Ok::<(), morsel::MorselError>(())
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    let searcher = engine.searcher();
                    let docs = searcher.doc_count();
                    let query = searcher.parse("pizza", "*", Operator::Or)?;
                    let results = searcher.evaluate(&query, 0, None, false)?;
                    // Every batch adds one pizza and one pasta document.
                    assert_eq!(results.total_hits, 1 + (docs - 1) / 2);
                }
                Ok::<(), morsel::MorselError>(())
            })
        })
        .collect();

    writer.join().expect("writer thread panicked")?;
    for reader in readers {
        reader.join().expect("reader thread panicked")?;
    }

    assert_eq!(engine.len(), 101);
    assert_eq!(engine.search_by_query_string("pizza")?.total_hits, 51);

    Ok(())
}
