//! End-to-end index build and search over an in-memory crawl

mod common;

use common::{FakeCrawler, html_page, test_config, test_engine};
use std::time::Duration;
use tantivy::schema::{STORED, STRING, Schema};
use tantivy::{Index, IndexWriter, doc};
use websearch::search::{PageIndexer, SearchError, SearchQuery, SearchSchema, suggest};
use websearch::{CrawlConfig, SearchEngine};

async fn build(engine: &SearchEngine, config: &CrawlConfig, crawler: &mut FakeCrawler) {
    PageIndexer::new(engine.clone(), config)
        .build_index(crawler)
        .await
        .expect("index build succeeds");
}

fn search(engine: &SearchEngine, input: &str) -> Vec<websearch::ResultEntry> {
    engine
        .search(&SearchQuery::parse(input).unwrap())
        .expect("search succeeds")
}

fn animal_site() -> FakeCrawler {
    FakeCrawler::new()
        .page("https://zoo.test/cats", &html_page("Cats", "<p>cats are great</p>"))
        .page("https://zoo.test/dogs", &html_page("Dogs", "<p>dogs are great</p>"))
        .page(
            "https://zoo.test/both",
            &html_page("Both", "<p>cats and dogs, cats and more cats</p>"),
        )
}

#[tokio::test]
async fn test_build_is_idempotent() {
    let (_dir, config, engine) = test_engine();
    assert!(!engine.is_index_built());

    let indexer = PageIndexer::new(engine.clone(), &config);
    let mut crawler = animal_site();
    let first = indexer.build_index(&mut crawler).await.unwrap();
    assert_eq!(first.indexed, 3);
    assert!(!first.already_built);
    assert!(engine.is_index_built());
    assert_eq!(engine.document_count(), 3);

    let mut second_crawler = animal_site();
    let second = indexer.build_index(&mut second_crawler).await.unwrap();
    assert!(second.already_built);
    assert_eq!(second_crawler.crawl_calls, 0);
    assert_eq!(engine.document_count(), 3);
}

#[tokio::test]
async fn test_index_survives_reopen() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;
    drop(engine);

    let reopened = SearchEngine::open_or_create(&config).unwrap();
    assert!(reopened.is_index_built());
    assert_eq!(reopened.stats().num_documents, 3);
    assert_eq!(reopened.document_count(), 3);
    assert_eq!(search(&reopened, "dogs").len(), 2);
}

#[tokio::test]
async fn test_all_terms_are_required() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;

    let results = search(&engine, "cats dogs");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://zoo.test/both");
    // "cats" x3, "dogs" x1 in the body; script text is not page content
    assert_eq!(results[0].occurrence_count, 4);
}

#[tokio::test]
async fn test_results_ranked_by_occurrences() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;

    let results = search(&engine, "cats");
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["https://zoo.test/both", "https://zoo.test/cats"]);
    // The "Cats" title is part of the cleaned page text
    assert_eq!(results[0].occurrence_count, 3);
    assert_eq!(results[1].occurrence_count, 2);
    assert!(results.iter().all(|r| r.occurrence_count > 0));
}

#[tokio::test]
async fn test_matching_is_case_insensitive() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;

    assert_eq!(search(&engine, "DOGS").len(), 2);
}

#[tokio::test]
async fn test_last_occurrence_snippet() {
    let (_dir, config, engine) = test_engine();
    let mut crawler = FakeCrawler::new().page(
        "https://pets.test/",
        "<html><body><p>cats are great. dogs are great too.</p></body></html>",
    );
    build(&engine, &config, &mut crawler).await;

    let results = search(&engine, "great");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].occurrence_count, 2);
    assert_eq!(results[0].context_snippet, "great. dogs are great too.");
    assert_eq!(results[0].title, "No Title");
}

#[tokio::test]
async fn test_same_title_keeps_shortest_url() {
    let (_dir, config, engine) = test_engine();
    let mut crawler = FakeCrawler::new()
        .page("a.com/home", &html_page("Home", "<p>welcome home, welcome</p>"))
        .page("a.com", &html_page("Home", "<p>welcome</p>"));
    build(&engine, &config, &mut crawler).await;

    let results = search(&engine, "welcome");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "a.com");
    assert_eq!(results[0].title, "Home");
}

#[tokio::test]
async fn test_bad_pages_are_skipped() {
    let (_dir, config, engine) = test_engine();
    let mut crawler = animal_site()
        .failing_page("https://zoo.test/broken")
        .empty_page("https://zoo.test/empty")
        .page("https://zoo.test/cats", &html_page("Cats again", "<p>cats</p>"));

    let report = PageIndexer::new(engine.clone(), &config)
        .build_index(&mut crawler)
        .await
        .unwrap();

    assert_eq!(report.indexed, 3);
    assert_eq!(report.skipped, 3);
    assert_eq!(engine.document_count(), 3);
}

#[tokio::test]
async fn test_crawl_failure_commits_nothing() {
    let (_dir, config, engine) = test_engine();
    let mut crawler = animal_site().failing_crawl();

    let err = PageIndexer::new(engine.clone(), &config)
        .build_index(&mut crawler)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Crawl(_)));
    assert!(!engine.is_index_built());
    assert_eq!(engine.document_count(), 0);
}

#[tokio::test]
async fn test_crawl_deadline() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = CrawlConfig::builder()
        .index_dir(dir.path().join("indexdir"))
        .start_url("https://example.com")
        .crawl_timeout_secs(Some(1))
        .build()
        .unwrap();
    let engine = SearchEngine::open_or_create(&config).unwrap();
    let mut crawler = animal_site().slow_crawl(Duration::from_secs(30));

    let err = PageIndexer::new(engine.clone(), &config)
        .build_index(&mut crawler)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::Crawl(websearch::CrawlError::Timeout(1))
    ));
    assert!(!engine.is_index_built());
}

#[tokio::test]
async fn test_unbuilt_index_returns_nothing() {
    let (_dir, _config, engine) = test_engine();
    assert!(!engine.is_index_built());
    assert!(search(&engine, "anything").is_empty());
}

#[tokio::test]
async fn test_unsearchable_term_is_a_parse_error() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;

    let query = SearchQuery::parse("cats --").unwrap();
    let err = engine.search(&query).unwrap_err();
    assert!(matches!(err, SearchError::QueryParsing(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_query_words_are_not_query_syntax() {
    let (_dir, config, engine) = test_engine();
    build(&engine, &config, &mut animal_site()).await;

    // A leading '-' does not exclude: both words are still required
    let results = search(&engine, "cats -dogs");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://zoo.test/both");

    // No field prefixes and no boolean operators
    assert!(search(&engine, "title:Cats").is_empty());
    assert!(search(&engine, "cats OR dogs").is_empty());
}

#[tokio::test]
async fn test_index_with_foreign_schema_is_recreated() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(config.index_dir()).unwrap();

    let mut builder = Schema::builder();
    let url = builder.add_text_field("url", STRING | STORED);
    let old_index = Index::create_in_dir(config.index_dir(), builder.build()).unwrap();
    let mut writer: IndexWriter = old_index.writer_with_num_threads(1, 50_000_000).unwrap();
    writer.add_document(doc!(url => "https://old.test/")).unwrap();
    writer.commit().unwrap();
    drop(writer);
    drop(old_index);

    let engine = SearchEngine::open_or_create(&config).unwrap();
    assert_eq!(engine.document_count(), 0);
    assert!(!engine.is_index_built());
    assert!(SearchSchema::validate(&engine.index().schema()).is_ok());

    build(&engine, &config, &mut animal_site()).await;
    assert_eq!(engine.document_count(), 3);
    assert_eq!(search(&engine, "dogs").len(), 2);
}

#[tokio::test]
async fn test_vocabulary_is_shared_and_refreshed_on_commit() {
    let (_dir, config, engine) = test_engine();
    let observer = engine.clone();
    assert!(observer.vocabulary().is_empty());

    build(&engine, &config, &mut animal_site()).await;

    let vocabulary = observer.vocabulary();
    assert!(vocabulary.contains("cats"));
    assert!(vocabulary.contains("great"));
    // script text is not page content
    assert!(!vocabulary.contains("tracking"));
}

#[tokio::test]
async fn test_spelling_suggestion() {
    let (_dir, config, engine) = test_engine();
    let mut crawler = FakeCrawler::new().page(
        "https://lang.test/",
        "<html><body><p>rust programming language</p></body></html>",
    );
    build(&engine, &config, &mut crawler).await;

    let misspelled = SearchQuery::parse("rusr programing").unwrap();
    assert!(engine.search(&misspelled).unwrap().is_empty());
    assert_eq!(suggest(&engine, &misspelled), "rust programming");

    let correct = SearchQuery::parse("Rust language").unwrap();
    assert_eq!(suggest(&engine, &correct), "");
}

#[tokio::test]
async fn test_suggestion_on_empty_index() {
    let (_dir, _config, engine) = test_engine();
    let query = SearchQuery::parse("anything").unwrap();
    assert_eq!(suggest(&engine, &query), "");
}
