use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use barsel::lexicon::Lexicon;
use barsel::logging::configure_logging;
use barsel::nlp::{AnnotationLemmatizer, Lemmatizer, RuleLemmatizer};
use barsel::pipeline::{ColumnNames, OrientationSource, Pipeline, PipelineConfig};
use barsel::table::{load_table, write_table};
use barsel::tone::{LexiconToneClassifier, ToneStage};
use barsel::TARGET_PIPELINE;

#[derive(Parser)]
#[command(author, version, about = "Prepare Danish news coverage of parental leave for analysis", long_about = None)]
struct Cli {
    /// Lexicon JSON overriding the built-in markers, newspaper lists and lemma mapping
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, tag and tokenize the article corpus, writing the sentence and token tables
    Run {
        #[arg(short, long, default_value = "data/barsel_sentiment.csv")]
        input: PathBuf,

        #[arg(long, default_value = ";", value_parser = parse_delimiter)]
        input_delimiter: u8,

        /// Reference table with ID and Political_Orientation; without it the
        /// orientation is derived from the newspaper name
        #[arg(short, long)]
        reference: Option<PathBuf>,

        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        reference_delimiter: u8,

        /// Newline-delimited stopword list applied after lemma mapping
        #[arg(short, long)]
        stopwords: Option<PathBuf>,

        #[arg(long, default_value = "data/barsel_data.csv")]
        sentences_out: PathBuf,

        #[arg(long, default_value = "data/preprocessed_words.csv")]
        tokens_out: PathBuf,

        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        output_delimiter: u8,

        /// Score tone for inputs that lack the probability columns
        #[arg(long)]
        classify: bool,

        #[command(flatten)]
        analysis: AnalysisArgs,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Tag the control corpus by newspaper and drop short sentences
    Tag {
        #[arg(short, long, default_value = "data/control_sentiment.csv")]
        input: PathBuf,

        #[arg(long, default_value = ";", value_parser = parse_delimiter)]
        input_delimiter: u8,

        #[arg(short, long, default_value = "data/control_data.csv")]
        output: PathBuf,

        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        output_delimiter: u8,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Add tone and stance probabilities to a sentence table
    Sentiment {
        #[arg(short, long, default_value = "data/barsel_sentences.csv")]
        input: PathBuf,

        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        input_delimiter: u8,

        #[arg(short, long, default_value = "data/barsel_sentiment.csv")]
        output: PathBuf,

        #[arg(long, default_value = ";", value_parser = parse_delimiter)]
        output_delimiter: u8,

        #[arg(long, default_value = "sentences")]
        sentence_column: String,
    },

    /// Count normalized words before mapping and stopwords, for curating the lexicon
    Counts {
        #[arg(short, long, default_value = "data/barsel_sentiment.csv")]
        input: PathBuf,

        #[arg(long, default_value = ";", value_parser = parse_delimiter)]
        input_delimiter: u8,

        #[arg(short, long, default_value = "data/word_counts.csv")]
        output: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

#[derive(Args)]
struct AnalysisArgs {
    /// Token annotations from an external NLP pipeline (doc, lemma, pos, is_stop,
    /// is_alpha); doc is the position of the article after deduplication
    #[arg(long)]
    annotations: Option<PathBuf>,

    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    annotations_delimiter: u8,

    /// Use lowercased surface forms instead of stems with the built-in analyzer
    #[arg(long)]
    no_stemming: bool,
}

impl AnalysisArgs {
    fn lemmatizer(&self) -> Result<Box<dyn Lemmatizer>> {
        Ok(match &self.annotations {
            Some(path) => Box::new(AnnotationLemmatizer::load(path, self.annotations_delimiter)?),
            None => Box::new(RuleLemmatizer::new().with_stemming(!self.no_stemming)),
        })
    }
}

#[derive(Args)]
struct ColumnArgs {
    #[arg(long, default_value = "ID")]
    id_column: String,

    #[arg(long, default_value = "Newspaper")]
    newspaper_column: String,

    #[arg(long, default_value = "article")]
    article_column: String,

    #[arg(long, default_value = "sentences")]
    sentence_column: String,

    /// Rows sharing this value are tokenized once
    #[arg(long, default_value = "merge_index")]
    article_key: String,
}

impl From<ColumnArgs> for ColumnNames {
    fn from(args: ColumnArgs) -> Self {
        ColumnNames {
            id: args.id_column,
            newspaper: args.newspaper_column,
            article: args.article_column,
            sentence: args.sentence_column,
            article_key: args.article_key,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!("delimiter must be a single ASCII character, got '{}'", value)),
            }
        }
    }
}

fn main() -> Result<()> {
    configure_logging();
    let cli = Cli::parse();
    let lexicon = Lexicon::load(cli.lexicon.as_deref())?;

    match cli.command {
        Commands::Run {
            input,
            input_delimiter,
            reference,
            reference_delimiter,
            stopwords,
            sentences_out,
            tokens_out,
            output_delimiter,
            classify,
            analysis,
            columns,
        } => {
            let lemmatizer = analysis.lemmatizer()?;
            let classifier = LexiconToneClassifier::new();
            let columns: ColumnNames = columns.into();

            let config = PipelineConfig {
                input,
                input_delimiter,
                orientation: match reference {
                    Some(path) => OrientationSource::Reference {
                        path,
                        delimiter: reference_delimiter,
                    },
                    None => OrientationSource::Newspaper,
                },
                stopwords,
                sentences_out,
                tokens_out,
                output_delimiter,
                columns: columns.clone(),
            };

            let mut pipeline = Pipeline::new(&lexicon, lemmatizer.as_ref(), columns);
            if classify {
                pipeline = pipeline.with_classifier(&classifier);
            }
            pipeline.run(&config)?;
        }
        Commands::Tag {
            input,
            input_delimiter,
            output,
            output_delimiter,
            columns,
        } => {
            let lemmatizer = RuleLemmatizer::new();
            let mut table = load_table(&input, input_delimiter)?;
            Pipeline::new(&lexicon, &lemmatizer, columns.into()).prepare_controls(&mut table)?;
            write_table(&table, &output, output_delimiter)?;
        }
        Commands::Sentiment {
            input,
            input_delimiter,
            output,
            output_delimiter,
            sentence_column,
        } => {
            let classifier = LexiconToneClassifier::new();
            let mut table = load_table(&input, input_delimiter)?;
            ToneStage::new(&classifier).apply(&mut table, &sentence_column)?;
            write_table(&table, &output, output_delimiter)?;
        }
        Commands::Counts {
            input,
            input_delimiter,
            output,
            analysis,
            columns,
        } => {
            let lemmatizer = analysis.lemmatizer()?;
            let mut table = load_table(&input, input_delimiter)?;
            let counts = Pipeline::new(&lexicon, lemmatizer.as_ref(), columns.into())
                .word_frequencies(&mut table)?;
            info!(target: TARGET_PIPELINE, "{} distinct words", counts.len());
            write_table(&counts, &output, b',')?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("æ").is_err());
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["barsel", "run", "--classify"]).unwrap();
        match cli.command {
            Commands::Run {
                input,
                input_delimiter,
                classify,
                columns,
                ..
            } => {
                assert_eq!(input, PathBuf::from("data/barsel_sentiment.csv"));
                assert_eq!(input_delimiter, b';');
                assert!(classify);
                assert_eq!(columns.article_key, "merge_index");
            }
            _ => panic!("expected run"),
        }
    }
}
