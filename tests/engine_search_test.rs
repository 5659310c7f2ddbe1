use morsel::{Engine, MorselError, SearchRequest};

const RECIPES: &str = r#"[{"title":"pizza recipe"},{"title":"pasta recipe"}]"#;

fn recipes() -> morsel::Result<Engine> {
    let engine = Engine::new();
    engine.load_json_array(RECIPES)?;
    Ok(engine)
}

#[test]
fn test_simple_search_finds_single_document() -> morsel::Result<()> {
    let engine = recipes()?;

    let results = engine.search_by_query_string("pizza")?;
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.hits[0].fields["title"], "pizza recipe");
    assert!(results.hits[0].explanation.is_none());

    Ok(())
}

#[test]
fn test_advanced_search_or() -> morsel::Result<()> {
    let engine = recipes()?;

    let results =
        engine.advanced_search_by_query_string("title", "pizza pasta", "OR", 0, 10, false)?;
    assert_eq!(results.total_hits, 2);
    assert_eq!(results.hits.len(), 2);

    Ok(())
}

#[test]
fn test_advanced_search_and() -> morsel::Result<()> {
    let engine = recipes()?;

    let results =
        engine.advanced_search_by_query_string("title", "pizza pasta", "AND", 0, 10, false)?;
    assert_eq!(results.total_hits, 0);
    assert!(results.hits.is_empty());

    let results =
        engine.advanced_search_by_query_string("title", "pizza recipe", "and", 0, 10, false)?;
    assert_eq!(results.total_hits, 1);

    Ok(())
}

#[test]
fn test_unknown_operator_means_or() -> morsel::Result<()> {
    let engine = recipes()?;

    let results =
        engine.advanced_search_by_query_string("title", "pizza pasta", "maybe", 0, 10, false)?;
    assert_eq!(results.total_hits, 2);

    Ok(())
}

#[test]
fn test_whitespace_query_is_syntax_error() -> morsel::Result<()> {
    let engine = recipes()?;

    for query in ["", "   ", " \t\n "] {
        assert!(matches!(
            engine.search_by_query_string(query),
            Err(MorselError::QuerySyntaxError(_))
        ));
        assert!(matches!(
            engine.advanced_search_by_query_string("title", query, "OR", 0, 10, true),
            Err(MorselError::QuerySyntaxError(_))
        ));
    }

    Ok(())
}

#[test]
fn test_unterminated_quote_is_syntax_error() -> morsel::Result<()> {
    let engine = recipes()?;
    assert!(matches!(
        engine.search_by_query_string(r#"title:"pizza"#),
        Err(MorselError::QuerySyntaxError(_))
    ));
    Ok(())
}

#[test]
fn test_from_past_end() -> morsel::Result<()> {
    let engine = recipes()?;

    let results =
        engine.advanced_search_by_query_string("title", "recipe", "OR", 100, 10, false)?;
    assert_eq!(results.total_hits, 2);
    assert!(results.hits.is_empty());

    Ok(())
}

#[test]
fn test_size_zero() -> morsel::Result<()> {
    let engine = recipes()?;

    let results = engine.advanced_search_by_query_string("title", "recipe", "OR", 0, 0, false)?;
    assert_eq!(results.total_hits, 2);
    assert!(results.hits.is_empty());
    assert!(results.max_score > 0.0);

    Ok(())
}

#[test]
fn test_empty_engine_matches_nothing() -> morsel::Result<()> {
    let engine = Engine::new();

    let results = engine.search_by_query_string("pizza")?;
    assert_eq!(results.total_hits, 0);
    assert!(results.hits.is_empty());

    let results = engine.advanced_search_by_query_string("title", "pizza", "AND", 0, 10, true)?;
    assert_eq!(results.total_hits, 0);

    Ok(())
}

#[test]
fn test_index_and_query_normalization_agree() -> morsel::Result<()> {
    let engine = Engine::new();
    engine.load_json_array(r#"[{"title": "Pizza NAPOLETANA"}, {"title": "Ｃａｆé Menu"}]"#)?;

    assert_eq!(engine.search_by_query_string("PIZZA")?.total_hits, 1);
    assert_eq!(engine.search_by_query_string("napoletana")?.total_hits, 1);
    assert_eq!(engine.search_by_query_string("café")?.total_hits, 1);
    assert_eq!(engine.search_by_query_string("CAFÉ")?.total_hits, 1);

    Ok(())
}

#[test]
fn test_ids_continue_across_loads() -> morsel::Result<()> {
    let engine = recipes()?;
    assert!(engine.load_json_array("not json").is_err());
    engine.load_json_array(r#"[{"title": "pizza oven"}]"#)?;

    let results = engine.search_by_query_string("pizza")?;
    assert_eq!(results.ids(), vec![1, 3]);
    assert_eq!(engine.stats().document_count, 3);

    Ok(())
}

#[test]
fn test_failed_load_leaves_engine_unchanged() -> morsel::Result<()> {
    let engine = recipes()?;
    let before = engine.stats();

    for input in [
        r#"[{"title": "pizza"}, "not an object"]"#,
        r#"{"title": "pizza"}"#,
        r#"[{"title": "pizza"}"#,
        r#"[{"title": "pizza"}, null]"#,
        "42",
    ] {
        assert!(engine.load_json_array(input).is_err(), "accepted {input}");
    }

    assert_eq!(engine.stats(), before);
    assert_eq!(engine.search_by_query_string("pizza")?.total_hits, 1);

    Ok(())
}

#[test]
fn test_structured_request() -> morsel::Result<()> {
    let engine = recipes()?;

    let request = SearchRequest::builder("recipe")
        .default_field("title")
        .size(1)
        .explain(true)
        .build();
    let results = engine.search(&request)?;
    assert_eq!(results.total_hits, 2);
    assert_eq!(results.ids(), vec![1]);
    assert!(results.hits[0].explanation.is_some());

    Ok(())
}

#[test]
fn test_json_response_shape() -> morsel::Result<()> {
    let engine = Engine::new();
    engine.load_json_array(r#"[{"title": "pizza", "url": "/p", "rank": 1}]"#)?;

    let results = engine.advanced_search_by_query_string("*", "pizza", "OR", 0, 10, true)?;
    let json = serde_json::to_value(&results)?;

    assert_eq!(json["total_hits"], 1);
    let hit = &json["hits"][0];
    assert_eq!(hit["id"], 1);
    assert_eq!(hit["fields"]["title"], "pizza");
    assert!(hit["score"].as_f64().unwrap() > 0.0);
    assert_eq!(hit["explanation"]["description"], "sum of:");

    let keys: Vec<&String> = hit["fields"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["title", "url", "rank"]);

    Ok(())
}
