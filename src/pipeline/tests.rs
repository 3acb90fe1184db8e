use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::nlp::RuleLemmatizer;
use crate::tone::{LexiconToneClassifier, TONE_COLUMNS};
use crate::ORIENTATION_COLUMN;

fn input_table() -> Table {
    let mut table = Table::new([
        "ID",
        "Newspaper",
        "article",
        "sentences",
        "merge_index",
        "Unnamed: 0",
    ]);
    let rows = [
        [
            "1",
            "Politiken",
            "Børn og fædre tager barsel. FOTO: Ritzau",
            "Børn og fædre tager barsel.",
            "a",
            "0",
        ],
        [
            "1",
            "Politiken",
            "Børn og fædre tager barsel. FOTO: Ritzau",
            "Kort.",
            "a",
            "1",
        ],
        [
            "2",
            "Berlingske",
            "Mødre tager orlov /ritzau/",
            "Mødre tager orlov nu",
            "b",
            "2",
        ],
        ["3", "Lokalavisen", "PRIVAT", "Tre ord her", "c", "3"],
        ["4", "Information", "Fædre", "To ord", "d", "4"],
    ];
    for row in rows {
        table
            .push_row(row.iter().map(|s| s.to_string()).collect())
            .unwrap();
    }
    table
}

fn config(dir: &Path, orientation: OrientationSource) -> PipelineConfig {
    let input = dir.join("barsel_sentiment.csv");
    write_table(&input_table(), &input, b';').unwrap();

    let stopwords = dir.join("stopwords.txt");
    std::fs::write(&stopwords, "tager\n").unwrap();

    PipelineConfig {
        input,
        input_delimiter: b';',
        orientation,
        stopwords: Some(stopwords),
        sentences_out: dir.join("out").join("barsel_data.csv"),
        tokens_out: dir.join("out").join("preprocessed_words.csv"),
        output_delimiter: b',',
        columns: ColumnNames::default(),
    }
}

fn lemmatizer() -> RuleLemmatizer {
    RuleLemmatizer::new().with_stemming(false)
}

#[test]
fn test_full_run_by_newspaper() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), OrientationSource::Newspaper);
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();

    let summary = Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .run(&config)
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            loaded_rows: 5,
            short_rows: 2,
            unreferenced_rows: 0,
            sentence_rows: 3,
            token_rows: 5,
            empty_documents: 1,
        }
    );

    let sentences = load_table(&config.sentences_out, b',').unwrap();
    assert_eq!(
        sentences.headers(),
        &["ID", "Newspaper", "article", "sentences", ORIENTATION_COLUMN]
    );
    assert_eq!(
        sentences.column("article").unwrap().collect::<Vec<_>>(),
        vec!["Børn og fædre tager barsel.", "Mødre tager orlov ", ""]
    );
    assert_eq!(
        sentences.column(ORIENTATION_COLUMN).unwrap().collect::<Vec<_>>(),
        vec!["Left-winged", "Right-winged", ""]
    );

    let tokens = load_table(&config.tokens_out, b',').unwrap();
    assert_eq!(
        tokens.headers(),
        &["ID", "Newspaper", ORIENTATION_COLUMN, "tokens", "word"]
    );
    assert_eq!(
        tokens.rows(),
        &[
            vec!["1", "Politiken", "Left-winged", "børn", "barn"],
            vec!["1", "Politiken", "Left-winged", "fædre", "fædre"],
            vec!["1", "Politiken", "Left-winged", "barsel", "barsel"],
            vec!["2", "Berlingske", "Right-winged", "mødre", "mor"],
            vec!["2", "Berlingske", "Right-winged", "orlov", "orlov"],
        ]
    );
}

#[test]
fn test_short_sentence_excluded_from_both_outputs() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), OrientationSource::Newspaper);
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();

    Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .run(&config)
        .unwrap();

    let sentences = load_table(&config.sentences_out, b',').unwrap();
    let tokens = load_table(&config.tokens_out, b',').unwrap();
    assert!(sentences.column("ID").unwrap().all(|id| id != "4"));
    assert!(tokens.column("ID").unwrap().all(|id| id != "4"));
}

#[test]
fn test_reference_join_drops_unmatched_rows() {
    let dir = tempdir().unwrap();
    let reference_path = dir.path().join("data_political1.csv");
    let mut reference = Table::new(["ID", ORIENTATION_COLUMN]);
    reference
        .push_row(vec!["1".into(), "Left-winged".into()])
        .unwrap();
    reference
        .push_row(vec!["3".into(), "Right-winged".into()])
        .unwrap();
    write_table(&reference, &reference_path, b',').unwrap();

    let config = config(
        dir.path(),
        OrientationSource::Reference {
            path: reference_path,
            delimiter: b',',
        },
    );
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();

    let summary = Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .run(&config)
        .unwrap();

    assert_eq!(summary.unreferenced_rows, 1);
    assert_eq!(summary.sentence_rows, 2);
    let sentences = load_table(&config.sentences_out, b',').unwrap();
    assert_eq!(
        sentences.column(ORIENTATION_COLUMN).unwrap().collect::<Vec<_>>(),
        vec!["Left-winged", "Right-winged"]
    );
}

#[test]
fn test_tone_columns_stay_on_sentences_when_articles_are_deduplicated() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), OrientationSource::Newspaper);
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let classifier = LexiconToneClassifier::new();

    Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .with_classifier(&classifier)
        .run(&config)
        .unwrap();

    let sentences = load_table(&config.sentences_out, b',').unwrap();
    let tokens = load_table(&config.tokens_out, b',').unwrap();
    for column in TONE_COLUMNS {
        assert!(sentences.has_column(column));
        assert!(!tokens.has_column(column));
    }
}

#[test]
fn test_tone_columns_follow_each_row_without_article_key() {
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let classifier = LexiconToneClassifier::new();
    let pipeline = Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .with_classifier(&classifier);

    let mut table = input_table();
    table.drop_columns(&["merge_index"]);
    filter_short_sentences(&mut table, "sentences").unwrap();
    pipeline.score_tone(&mut table).unwrap();

    let stopwords = StopwordSet::default();
    let normalizer = TokenNormalizer::new(&lexicon.mapping, &stopwords);
    let tokens = pipeline.tokenize(&table, &normalizer).unwrap().table;

    let scores: Vec<&str> = table.column("positive_prob").unwrap().collect();
    let ids: Vec<&str> = table.column("ID").unwrap().collect();
    let token_ids: Vec<&str> = tokens.column("ID").unwrap().collect();
    let token_scores: Vec<&str> = tokens.column("positive_prob").unwrap().collect();
    assert!(!token_ids.is_empty());
    for (id, score) in token_ids.iter().zip(token_scores) {
        let row = ids.iter().position(|i| i == id).unwrap();
        assert_eq!(score, scores[row]);
    }
}

#[test]
fn test_missing_column_is_fatal() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), OrientationSource::Newspaper);
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let columns = ColumnNames {
        newspaper: "Avis".to_string(),
        ..Default::default()
    };

    let err = Pipeline::new(&lexicon, &lemmatizer, columns)
        .run(&config)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Avis"));
    assert!(!config.sentences_out.exists());
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let mut config = config(dir.path(), OrientationSource::Newspaper);
    config.input = dir.path().join("missing.csv");
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();

    assert!(Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .run(&config)
        .is_err());
}

#[test]
fn test_prepare_controls() {
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let mut table = input_table();

    Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .prepare_controls(&mut table)
        .unwrap();

    assert_eq!(table.len(), 3);
    assert!(!table.has_column("merge_index"));
    assert!(!table.has_column("Unnamed: 0"));
}

#[test]
fn test_prepare_controls_keeps_index_column() {
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let mut table = input_table();
    let index = (0..table.len()).map(|n| n.to_string()).collect();
    table.set_column("index", index).unwrap();

    Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .prepare_controls(&mut table)
        .unwrap();

    assert!(table.has_column("index"));
    assert!(!table.has_column("merge_index"));
    assert!(!table.has_column("Unnamed: 0"));
    assert_eq!(
        table.column(ORIENTATION_COLUMN).unwrap().collect::<Vec<_>>(),
        vec!["Left-winged", "Right-winged", ""]
    );
}

#[test]
fn test_word_frequencies_are_unmapped() {
    let lexicon = Lexicon::default();
    let lemmatizer = lemmatizer();
    let mut table = input_table();

    let counts = Pipeline::new(&lexicon, &lemmatizer, ColumnNames::default())
        .word_frequencies(&mut table)
        .unwrap();

    let words: Vec<&str> = counts.column("word").unwrap().collect();
    assert!(words.contains(&"børn"));
    assert!(words.contains(&"mødre"));
    assert!(words.contains(&"tager"));
    assert!(!words.contains(&"barn"));
    assert!(counts.column("count").unwrap().all(|c| c == "1" || c == "2"));
}
