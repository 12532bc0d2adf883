//! Search query execution logic

use std::time::Instant;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, PhraseQuery, Query, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::tokenizer::{TextAnalyzer, TokenStream};
use tantivy::{TantivyDocument, Term};

use super::parsing::SearchQuery;
use crate::search::engine::SearchEngine;
use crate::search::errors::{SearchError, SearchResult};
use crate::search::ranking::finalize;
use crate::search::scanner::scan;
use crate::search::schema::SearchSchema;
use crate::search::types::{Document, ResultEntry};

/// Execute a search: retrieve candidates, count occurrences, rank
pub fn search(
    engine: &SearchEngine,
    query: &SearchQuery,
    limit: usize,
) -> SearchResult<Vec<ResultEntry>> {
    let start = Instant::now();

    let candidates = retrieve(engine, query, limit)?;
    let terms = query.match_terms();

    let entries = candidates
        .into_iter()
        .filter_map(|doc| {
            scan(&doc, &terms).map(|occurrence| ResultEntry {
                occurrence_count: occurrence.count,
                context_snippet: occurrence.snippet,
                url: doc.url,
                title: doc.title,
            })
        })
        .collect();

    let results = finalize(entries);

    tracing::info!(
        query = %query,
        results = results.len(),
        duration_ms = start.elapsed().as_millis(),
        "Search completed"
    );

    Ok(results)
}

/// Retrieve candidate documents containing every query term.
///
/// Results come in the index's relevance order, capped at `limit`. An
/// empty index or a zero limit yields no candidates.
pub fn retrieve(
    engine: &SearchEngine,
    query: &SearchQuery,
    limit: usize,
) -> SearchResult<Vec<Document>> {
    let index_query = build_index_query(engine, query)?;

    let searcher = engine.reader().searcher();
    if limit == 0 || searcher.num_docs() == 0 {
        return Ok(Vec::new());
    }

    let top_docs = searcher
        .search(&index_query, &TopDocs::with_limit(limit))
        .map_err(|e| SearchError::SearchExecution(format!("Failed to execute search query: {e}")))?;

    top_docs
        .into_iter()
        .map(|(_score, doc_address)| {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                SearchError::DocumentNotFound(format!("Failed to retrieve document: {e}"))
            })?;
            Ok(to_document(&doc, engine.schema()))
        })
        .collect()
}

/// Require every query term in the `content` field
///
/// Terms go through the field's own tokenizer and are never read as query
/// syntax. A term yielding one token becomes a term query, one yielding
/// several (`don't`, `e-mail`) a phrase query. A term without any indexable
/// token is a `QueryParsing` error.
pub fn build_index_query(engine: &SearchEngine, query: &SearchQuery) -> SearchResult<BooleanQuery> {
    let field = engine.schema().content;
    let mut analyzer = engine.index().tokenizer_for_field(field)?;

    let clauses = query
        .terms()
        .iter()
        .map(|term| {
            let tokens: Vec<Term> = analyze(&mut analyzer, term)
                .iter()
                .map(|token| Term::from_field_text(field, token))
                .collect();

            let clause: Box<dyn Query> = match tokens.len() {
                0 => {
                    return Err(SearchError::QueryParsing(format!(
                        "Query term '{term}' contains no searchable text"
                    )));
                }
                1 => Box::new(TermQuery::new(tokens[0].clone(), IndexRecordOption::Basic)),
                _ => Box::new(PhraseQuery::new(tokens)),
            };
            Ok((Occur::Must, clause))
        })
        .collect::<SearchResult<Vec<_>>>()?;

    Ok(BooleanQuery::new(clauses))
}

fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while stream.advance() {
        tokens.push(stream.token().text.clone());
    }
    tokens
}

/// Convert a stored Tantivy document back into a `Document`
fn to_document(doc: &TantivyDocument, schema: &SearchSchema) -> Document {
    let text = |field| {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Document {
        url: text(schema.url),
        title: text(schema.title),
        content: text(schema.content),
    }
}
