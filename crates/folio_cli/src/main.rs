//! `folio` command-line entry point.
//!
//! # Responsibility
//! - Expose gallery search, thumbnail, contact and site build commands.
//! - Map core outcomes to exit codes; all logic stays in `folio_core`.

mod views;

use clap::{Args, Parser, Subcommand};
use folio_core::{
    build_site, default_log_level, generated_thumb, init_logging, source_for, ContactForm,
    ContactSubmission, Gallery, HtmlListView, HttpRelay, LogTarget, SiteConfig, SubmitOutcome,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use views::{TerminalForm, TextListView};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Portfolio gallery and contact tooling")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Write logs to rotating files in this absolute directory instead of stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// JSON config file; `FOLIO_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the manifest and list projects matching QUERY.
    Search {
        #[arg(default_value = "")]
        query: String,
        /// Print card markup instead of a text list.
        #[arg(long)]
        html: bool,
    },
    /// Print the generated placeholder image URI for TITLE.
    Thumb { title: String },
    /// Submit one contact message.
    Contact(ContactArgs),
    /// Generate project pages and sitemap under ROOT.
    Build {
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Overrides the configured base URL.
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    #[arg(long, default_value = "", hide = true)]
    company: String,
    /// Copy the sender on the mailto message.
    #[arg(long)]
    send_copy: bool,
}

impl From<ContactArgs> for ContactSubmission {
    fn from(args: ContactArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message,
            company: args.company,
            send_copy: args.send_copy,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let target = match &cli.log_dir {
        Some(dir) => LogTarget::Directory(dir.clone()),
        None => LogTarget::Stderr,
    };
    if let Err(err) = init_logging(&level, target) {
        eprintln!("folio: {err}");
        return ExitCode::FAILURE;
    }

    let config = match SiteConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("event=config_load module=cli status=error error={err}");
            eprintln!("folio: {err}");
            return ExitCode::FAILURE;
        }
    };

    run(cli.command, &config)
}

fn run(command: Command, config: &SiteConfig) -> ExitCode {
    match command {
        Command::Search { query, html } => search(config, &query, html),
        Command::Thumb { title } => {
            println!("{}", generated_thumb(&title));
            ExitCode::SUCCESS
        }
        Command::Contact(args) => contact(config, args.into()),
        Command::Build { root, base_url } => {
            let base_url = base_url.unwrap_or_else(|| config.base_url.clone());
            match build_site(&root, &base_url) {
                Ok(report) => {
                    for slug in &report.written {
                        println!("wrote projects/{slug}/index.html");
                    }
                    for title in &report.skipped {
                        println!("skipped (missing slug): {title}");
                    }
                    println!("Done. Generated {} page(s).", report.written.len());
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("folio: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn search(config: &SiteConfig, query: &str, html: bool) -> ExitCode {
    let source = source_for(&config.manifest);
    if html {
        let mut gallery = Gallery::new(HtmlListView::new());
        let loaded = gallery.load(source.as_ref());
        if loaded.is_ok() {
            gallery.on_search_input(query);
        }
        let view = gallery.view();
        println!("<span id=\"count\">{}</span>", view.count_text());
        println!("{}", view.items_html());
        return exit_for(loaded.is_ok());
    }

    let mut gallery = Gallery::new(TextListView::default());
    let loaded = gallery.load(source.as_ref());
    if loaded.is_ok() {
        gallery.on_search_input(query);
    }
    print!("{}", gallery.view().render());
    exit_for(loaded.is_ok())
}

fn contact(config: &SiteConfig, submission: ContactSubmission) -> ExitCode {
    let form = ContactForm::new(config.contact.clone(), HttpRelay::new());
    let mut view = TerminalForm::default();
    let outcome = form.submit(&submission, &mut view);
    print!("{}", view.render());
    exit_for(matches!(
        outcome,
        SubmitOutcome::Sent | SubmitOutcome::MailtoOpened(_)
    ))
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
