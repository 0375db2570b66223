use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use glotbase_core::config::Config;
use glotbase_core::core::affix::AffixPattern;
use glotbase_core::core::ipa::{contains_ipa, validate_ipa};
use glotbase_core::core::lexicon::Lexicon;
use glotbase_core::core::syntax::{word_order_indicator, ValidationStrategy};
use glotbase_core::core::types::{
    AffixType, Gender, NewAffixRule, NewWord, PartOfSpeech, WordEntry, WordOrder, WordPatch,
};
use glotbase_core::persistence::Storage;
use glotbase_core::{Result, Workspace};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glotbase")]
#[command(about = "Catalog a constructed language: lexicon, affixes and word order")]
struct Cli {
    /// Directory holding the JSON documents
    #[arg(long, global = true, env = "GLOTBASE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage lexicon entries
    #[command(subcommand)]
    Word(WordCommand),
    /// Manage affix rules
    #[command(subcommand)]
    Rule(RuleCommand),
    /// Derive new words from a root, one per rule
    Derive {
        root: String,
        #[arg(long = "rule", required = true)]
        rules: Vec<String>,
        /// Show the derived forms without saving them
        #[arg(long)]
        preview: bool,
    },
    /// Check a sequence of words against a word order
    Validate {
        #[arg(long, default_value = "VSO")]
        order: WordOrder,
        /// Compare the V/S/O order string exactly
        #[arg(long)]
        strict: bool,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Write the lexicon to a timestamped file
    Export {
        format: ExportFormat,
        #[arg(long, env = "GLOTBASE_EXPORT_DIR")]
        out: Option<PathBuf>,
    },
    /// Add every word from a previously exported JSON file
    Import { file: PathBuf },
    /// Overview of the language
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum WordCommand {
    Add {
        romanization: String,
        #[arg(long)]
        pos: PartOfSpeech,
        #[command(flatten)]
        fields: WordFields,
        /// Mark as derived from this root id
        #[arg(long)]
        root: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        romanization: Option<String>,
        #[arg(long)]
        pos: Option<PartOfSpeech>,
        #[command(flatten)]
        fields: WordFields,
    },
    List {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        pos: Option<PartOfSpeech>,
        #[arg(long)]
        roots: bool,
    },
    Show { id: String },
    Delete { id: String },
    Search { query: String },
}

#[derive(Args)]
struct WordFields {
    #[arg(long)]
    native: Option<String>,
    #[arg(long)]
    ipa: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    definition: Option<String>,
    #[arg(long)]
    etymology: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Subcommand)]
enum RuleCommand {
    Add {
        name: String,
        #[arg(long = "type")]
        affix_type: AffixType,
        /// Template with a $ROOT placeholder, e.g. "me-$ROOT"
        #[arg(long)]
        replacement: String,
        #[arg(long, default_value = "$ROOT")]
        pattern: String,
        #[arg(long)]
        pos: Option<PartOfSpeech>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        example: String,
    },
    List,
    Delete { id: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glotbase=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir.clone(), None);
    let mut workspace = Workspace::open(Storage::new(&config.data_dir));

    match run(cli.command, &mut workspace, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, ws: &mut Workspace, config: Config) -> Result<()> {
    match command {
        Command::Word(cmd) => run_word(cmd, ws),
        Command::Rule(cmd) => run_rule(cmd, ws),
        Command::Derive { root, rules, preview } => {
            if preview {
                for p in ws.preview(&root, &rules)? {
                    println!("{}: {} → {}", p.rule.bold(), p.original, p.derived.green());
                }
            } else {
                let added = ws.derive(&root, &rules)?;
                println!("{} Generated {} derived word(s)", "✓".green(), added.len());
                for word in &added {
                    print_word_line(word);
                }
            }
            Ok(())
        }
        Command::Validate { order, strict, words } => {
            let strategy = if strict {
                ValidationStrategy::StrictOrderString
            } else {
                ValidationStrategy::RichSuggestions
            };
            let result = ws.validate(&words, order, strategy)?;
            println!("Pattern: {}", result.pattern.join(" "));
            println!("Target:  {} ({})", order.as_str().bold(), order.description());
            if result.is_valid {
                println!("{}", "valid".green().bold());
            } else {
                println!("{}", "invalid".red().bold());
            }
            for suggestion in result.suggestions.iter().chain(result.message.iter()) {
                println!("  • {}", suggestion);
            }
            Ok(())
        }
        Command::Export { format, out } => {
            let dir = out.unwrap_or(config.export_dir);
            let path = match format {
                ExportFormat::Json => ws.export_json(&dir, Utc::now())?,
                ExportFormat::Csv => ws.export_csv(&dir, Utc::now())?,
            };
            println!("Exported {} words to {}", ws.lexicon().len(), path.display());
            Ok(())
        }
        Command::Import { file } => {
            let before = ws.lexicon().len();
            let added = ws.import_file(&file)?;
            println!(
                "{} Imported {} words (added to the existing {})",
                "✓".green(),
                added.len(),
                before
            );
            Ok(())
        }
        Command::Stats => {
            let stats = ws.stats();
            println!("{}", "Dashboard".bold().underlined());
            println!("Total words:   {}", stats.total_words);
            println!("Root words:    {}", stats.root_words);
            println!("Derived words: {}", stats.derived_words);
            println!("Affix rules:   {}", stats.affix_rules);
            println!("Completion:    {:.0}%", stats.completion_percent);
            if !stats.top_tags.is_empty() {
                println!("\nTop tags:");
                for (tag, count) in &stats.top_tags {
                    println!("  {} ({})", tag, count);
                }
            }
            if !stats.pos_distribution.is_empty() {
                println!("\nParts of speech:");
                for (pos, count) in &stats.pos_distribution {
                    println!("  {}: {}", pos, count);
                }
            }
            if !stats.recent_words.is_empty() {
                println!("\nRecent additions:");
                for word in &stats.recent_words {
                    print_word_line(word);
                }
            }
            Ok(())
        }
    }
}

/// Prints a warning when a pronunciation has no IPA symbols in it.
fn check_ipa(ipa: Option<&str>) {
    if let Some(ipa) = ipa.filter(|i| validate_ipa(i)) {
        if !contains_ipa(ipa) {
            eprintln!("{} '{}' contains no IPA symbols", "warning:".yellow(), ipa);
        }
    }
}

fn run_word(cmd: WordCommand, ws: &mut Workspace) -> Result<()> {
    if let WordCommand::Add { fields, .. } | WordCommand::Update { fields, .. } = &cmd {
        check_ipa(fields.ipa.as_deref());
    }
    match cmd {
        WordCommand::Add { romanization, pos, fields, root } => {
            let mut word = NewWord::root(&romanization, pos);
            word.native_script = fields.native.unwrap_or_default();
            word.ipa = fields.ipa.unwrap_or_default();
            word.gender = fields.gender.unwrap_or_default();
            word.definition = fields.definition.unwrap_or_default();
            word.etymology = fields.etymology.unwrap_or_default();
            word.tags = fields.tags;
            word.is_root = root.is_none();
            word.root_word_id = root;
            let entry = ws.add_word(word)?;
            println!("{} {}", "added".green(), entry.id);
        }
        WordCommand::Update { id, romanization, pos, fields } => {
            let patch = WordPatch {
                native_script: fields.native,
                romanization,
                ipa: fields.ipa,
                part_of_speech: pos,
                etymology: fields.etymology,
                gender: fields.gender,
                definition: fields.definition,
                tags: (!fields.tags.is_empty()).then_some(fields.tags),
                ..WordPatch::default()
            };
            let entry = ws.update_word(&id, patch)?;
            print_word_line(&entry);
        }
        WordCommand::List { tag, pos, roots } => {
            let lexicon = ws.lexicon();
            let words: Vec<&WordEntry> = match (tag, pos) {
                (Some(tag), _) => lexicon.filter_by_tag(&tag),
                (None, Some(pos)) => lexicon.filter_by_pos(pos),
                (None, None) => lexicon.words().iter().collect(),
            };
            for word in words.into_iter().filter(|w| !roots || w.is_root) {
                print_word_line(word);
            }
        }
        WordCommand::Show { id } => match ws.lexicon().get(&id) {
            Some(word) => print_word_detail(word, ws.lexicon()),
            None => return Err(glotbase_core::GlotError::WordNotFound(id)),
        },
        WordCommand::Delete { id } => {
            let word = ws.delete_word(&id)?;
            println!("{} {} ({})", "deleted".red(), word.romanization, word.id);
        }
        WordCommand::Search { query } => {
            for word in ws.lexicon().search(&query) {
                print_word_line(word);
            }
        }
    }
    Ok(())
}

fn run_rule(cmd: RuleCommand, ws: &mut Workspace) -> Result<()> {
    match cmd {
        RuleCommand::Add { name, affix_type, replacement, pattern, pos, description, example } => {
            let rule = NewAffixRule {
                name,
                affix_type,
                pattern,
                replacement,
                resulting_pos: pos,
                description,
                example,
            };
            let rule = ws.add_rule(rule)?;
            println!("{} {}", "added".green(), rule.id);
        }
        RuleCommand::List => {
            for rule in ws.rules().all() {
                let shape = match rule.compiled() {
                    AffixPattern::Prefix(p) => format!("{}-", p),
                    AffixPattern::Suffix(s) => format!("-{}", s),
                    AffixPattern::Infix(i) => format!("<{}>", i),
                    AffixPattern::Circumfix { prefix, suffix } => {
                        format!("{}- -{}", prefix, suffix)
                    }
                };
                let pos = rule.resulting_pos.map(|p| format!(" → {}", p)).unwrap_or_default();
                println!(
                    "{}  {} [{} {}]{}",
                    rule.id.clone().dim(),
                    rule.name.clone().bold(),
                    rule.affix_type,
                    shape,
                    pos
                );
            }
        }
        RuleCommand::Delete { id } => {
            let rule = ws.delete_rule(&id)?;
            println!("{} {}", "deleted".red(), rule.name);
        }
    }
    Ok(())
}

fn print_word_line(word: &WordEntry) {
    let badge = word_order_indicator(word).unwrap_or("");
    println!(
        "{}  {} {} ({}) {}",
        word.id.clone().dim(),
        word.romanization.clone().bold(),
        word.native_script,
        word.part_of_speech,
        badge.cyan()
    );
}

fn print_word_detail(word: &WordEntry, lexicon: &Lexicon) {
    print_word_line(word);
    if !word.ipa.is_empty() {
        println!("  IPA:        /{}/", word.ipa);
    }
    println!("  Gender:     {}", word.gender);
    println!("  Definition: {}", word.definition);
    if !word.etymology.is_empty() {
        println!("  Etymology:  {}", word.etymology);
    }
    if !word.tags.is_empty() {
        println!("  Tags:       {}", word.tags.join(", "));
    }
    if let Some(root) = lexicon.resolve_root(word) {
        println!("  Root:       {} ({})", root.romanization, root.id);
    }
    for derived in lexicon.derived_words(&word.id) {
        println!("  Derived:    {} ({})", derived.romanization, derived.id);
    }
}
