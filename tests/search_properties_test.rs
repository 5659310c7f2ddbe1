use std::collections::BTreeSet;

use morsel::{DocId, Engine, SearchResults};

const CORPUS: &str = r#"[
    {"title": "Margherita pizza", "body": "tomato mozzarella basil", "tags": ["pizza", "classic"]},
    {"title": "Pasta carbonara", "body": "egg pecorino guanciale pepper", "tags": ["pasta", "classic"]},
    {"title": "Pizza bianca", "body": "no tomato, olive oil and rosemary", "tags": ["pizza"]},
    {"title": "Tomato soup", "body": "tomato tomato basil cream", "tags": ["soup"]},
    {"title": "Pasta al pomodoro", "body": "pasta with tomato and basil", "tags": ["pasta", "tomato"]},
    {"title": "Basil pesto", "body": "basil pine nuts parmesan garlic", "tags": ["sauce"]},
    {"title": "Pizza marinara", "body": "tomato garlic oregano", "tags": ["pizza", "classic", "vegan"]}
]"#;

const QUERIES: &[&str] = &[
    "pizza",
    "tomato basil",
    "title:pasta body:tomato",
    r#"body:"tomato basil""#,
    "classic vegan",
    "tags:pizza garlic",
    "*:basil",
];

fn corpus() -> morsel::Result<Engine> {
    let engine = Engine::new();
    engine.load_json_array(CORPUS)?;
    Ok(engine)
}

fn all(engine: &Engine, query: &str, operator: &str) -> morsel::Result<SearchResults> {
    engine.advanced_search_by_query_string("*", query, operator, 0, 1000, true)
}

fn ids(results: &SearchResults) -> BTreeSet<DocId> {
    results.hits.iter().map(|h| h.id).collect()
}

#[test]
fn test_recall_for_every_indexed_term() -> morsel::Result<()> {
    let engine = corpus()?;
    let stats = engine.stats();

    for doc_id in 1..=stats.document_count as DocId {
        let document = engine.get_document(doc_id).unwrap();
        let title = document.get("title").and_then(|v| v.as_str()).unwrap();
        for word in title.split_whitespace() {
            let results = engine.search_by_query_string(word)?;
            assert!(
                results.ids().contains(&doc_id),
                "document {doc_id} missing for term {word}"
            );
        }
    }

    Ok(())
}

#[test]
fn test_hits_are_totally_ordered() -> morsel::Result<()> {
    let engine = corpus()?;

    for query in QUERIES {
        for operator in ["AND", "OR"] {
            let results = all(&engine, query, operator)?;
            for pair in results.hits.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.score > b.score || (a.score == b.score && a.id < b.id),
                    "{query} {operator}: {} ({}) before {} ({})",
                    a.id,
                    a.score,
                    b.id,
                    b.score
                );
            }
        }
    }

    Ok(())
}

#[test]
fn test_total_hits_independent_of_window() -> morsel::Result<()> {
    let engine = corpus()?;

    for query in QUERIES {
        let full = all(&engine, query, "OR")?;
        for (from, size) in [(0, 0), (0, 1), (1, 2), (3, 100), (50, 5)] {
            let page = engine.advanced_search_by_query_string("*", query, "OR", from, size, false)?;
            assert_eq!(page.total_hits, full.total_hits);
            assert_eq!(page.max_score, full.max_score);

            let expected: Vec<DocId> = full.ids().into_iter().skip(from).take(size).collect();
            assert_eq!(page.ids(), expected);
        }
    }

    Ok(())
}

#[test]
fn test_independent_engines_agree() -> morsel::Result<()> {
    let first = corpus()?;
    let second = corpus()?;

    assert_eq!(first.stats(), second.stats());
    for query in QUERIES {
        for operator in ["AND", "OR"] {
            assert_eq!(all(&first, query, operator)?, all(&second, query, operator)?);
        }
    }

    Ok(())
}

#[test]
fn test_and_subset_of_or_and_each_clause() -> morsel::Result<()> {
    let engine = corpus()?;
    let pairs = [
        ("pizza", "tomato"),
        ("basil", "pasta"),
        ("title:pizza", "tags:classic"),
        ("garlic", "oregano"),
    ];

    for (left, right) in pairs {
        let query = format!("{left} {right}");
        let and = ids(&all(&engine, &query, "AND")?);
        let or = ids(&all(&engine, &query, "OR")?);
        let left_ids = ids(&all(&engine, left, "OR")?);
        let right_ids = ids(&all(&engine, right, "OR")?);

        assert!(and.is_subset(&or));
        assert!(and.is_subset(&left_ids));
        assert!(and.is_subset(&right_ids));
        assert!(left_ids.is_subset(&or));
        assert!(right_ids.is_subset(&or));
        assert_eq!(or, left_ids.union(&right_ids).copied().collect());
        assert_eq!(and, left_ids.intersection(&right_ids).copied().collect());
    }

    Ok(())
}

#[test]
fn test_explanations_sum_to_scores() -> morsel::Result<()> {
    let engine = corpus()?;

    for query in QUERIES {
        for operator in ["AND", "OR"] {
            for hit in all(&engine, query, operator)?.hits {
                let explanation = hit.explanation.expect("explanation requested");
                assert_eq!(explanation.value, hit.score);
                let sum = explanation.details.iter().fold(0.0, |acc, d| acc + d.value);
                assert_eq!(sum, hit.score, "{query} {operator} doc {}", hit.id);
                assert!(explanation.details.iter().all(|d| d.value > 0.0));
            }
        }
    }

    Ok(())
}

#[test]
fn test_more_occurrences_score_higher() -> morsel::Result<()> {
    let engine = Engine::new();
    engine.load_json_array(
        r#"[
            {"body": "tomato sauce with a long list of other ingredients"},
            {"body": "tomato tomato"},
            {"body": "tomato tomato tomato and nothing else at all here"}
        ]"#,
    )?;

    let results = engine.advanced_search_by_query_string("body", "tomato", "OR", 0, 10, false)?;
    assert_eq!(results.ids(), vec![3, 2, 1]);

    Ok(())
}

#[test]
fn test_hit_fields_keep_ingested_order() -> morsel::Result<()> {
    let engine = Engine::new();
    engine.load_json_array(r#"[{"zulu": "pizza", "alpha": 1, "mike": {"b": 2, "a": 1}}]"#)?;

    let hit = &engine.search_by_query_string("pizza")?.hits[0];
    let keys: Vec<&str> = hit.fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
    assert_eq!(
        serde_json::to_string(&hit.fields)?,
        r#"{"zulu":"pizza","alpha":1,"mike":{"b":2,"a":1}}"#
    );

    Ok(())
}
