#![deny(warnings)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use translator_ui_core::clipboard::Clipboard;
use translator_ui_core::config::{
    resolve_api_base, resolve_request_timeout, AppConfig, Env, StdEnv, ENV_API_URL,
};
use translator_ui_core::language::{Language, UnknownLanguage};
use translator_ui_core::translate::{
    EchoTranslationService, HttpTranslationService, TranslationService,
};
use translator_ui_core::ui::view::{render, render_languages};
use translator_ui_core::ui::{TranslatorApp, UiError};

const HELP: &str = "\
Type text to add it to the input. Commands:
  :translate, :go     translate the input
  :test               run the API self-test
  :swap               swap languages and texts
  :clear              clear input, output and error
  :copy               copy the translation to the clipboard
  :from <language>    set the source language
  :to <language>      set the target language
  :langs              list supported languages
  :status             ping the API
  :show               redraw the form
  :help               this help
  :quit               exit";

#[derive(Parser, Debug)]
#[command(name = "translator-ui")]
#[command(about = "Translate text through a remote translation API")]
struct Args {
    /// Origin of the translation API
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Use the built-in echo service instead of the API
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Translate a single text and print the result
    Translate {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "English")]
        from: Language,
        #[arg(long, default_value = "Malay")]
        to: Language,
    },
    /// Run the API self-test
    Test,
    /// Check that the API is reachable
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(&args, &env)?;

    tracing::info!(
        api_url = %cfg.api_base,
        timeout_ms = cfg.request_timeout.ms,
        offline = args.offline,
        "config loaded"
    );

    let command = args.command.clone();
    if args.offline {
        let app = TranslatorApp::new(EchoTranslationService::new(), clipboard());
        dispatch(app, command, cfg.api_base.display()).await
    } else {
        let service =
            HttpTranslationService::new(&cfg).context("failed to build the http client")?;
        let app = TranslatorApp::new(service, clipboard());
        dispatch(app, command, cfg.api_base.display()).await
    }
}

#[cfg(feature = "system-clipboard")]
fn clipboard() -> impl Clipboard {
    translator_ui_core::clipboard::SystemClipboard
}

#[cfg(not(feature = "system-clipboard"))]
fn clipboard() -> impl Clipboard {
    translator_ui_core::clipboard::NoClipboard
}

async fn dispatch<S, C>(
    mut app: TranslatorApp<S, C>,
    command: Option<Command>,
    api_url: &str,
) -> anyhow::Result<()>
where
    S: TranslationService,
    C: Clipboard,
{
    match command {
        None => run_interactive(&mut app, api_url).await,
        Some(Command::Translate { text, from, to }) => {
            app.set_input_text(text);
            app.set_source_language(from);
            app.set_target_language(to);
            app.submit().await.context("translation failed")?;
            println!("{}", app.state().output_text());
            Ok(())
        }
        Some(Command::Test) => {
            app.run_self_test().await.context("self-test failed")?;
            let s = app.state();
            println!("{} ({})", s.input_text(), s.source_language());
            println!("{} ({})", s.output_text(), s.target_language());
            Ok(())
        }
        Some(Command::Status) => {
            let status = app
                .check_status()
                .await
                .with_context(|| format!("API at {api_url} is not reachable"))?;
            println!("{}", status.message);
            if let Some(docs) = status.docs {
                println!("docs: {api_url}{docs}");
            }
            Ok(())
        }
    }
}

/// One line typed into the interactive session.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Text(String),
    Translate,
    Test,
    Swap,
    Clear,
    Copy,
    From(Result<Language, UnknownLanguage>),
    To(Result<Language, UnknownLanguage>),
    Langs,
    Status,
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let Some(command) = line.strip_prefix(':') else {
        return Line::Text(line.to_owned());
    };

    let (name, arg) = match command.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "translate" | "go" => Line::Translate,
        "test" => Line::Test,
        "swap" => Line::Swap,
        "clear" => Line::Clear,
        "copy" => Line::Copy,
        "from" => Line::From(arg.parse()),
        "to" => Line::To(arg.parse()),
        "langs" => Line::Langs,
        "status" => Line::Status,
        "show" => Line::Show,
        "help" => Line::Help,
        "quit" | "q" | "exit" => Line::Quit,
        other => Line::Unknown(other.to_owned()),
    }
}

async fn run_interactive<S, C>(app: &mut TranslatorApp<S, C>, api_url: &str) -> anyhow::Result<()>
where
    S: TranslationService,
    C: Clipboard,
{
    println!("Text Translation (:help for commands)");
    println!("{}", render(app.state(), api_url));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            Line::Text(text) => {
                app.push_input_line(&text);
                continue;
            }
            Line::Translate => {
                println!("Translating...");
                report(app.submit().await);
            }
            Line::Test => report(app.run_self_test().await),
            Line::Swap => app.swap_languages(),
            Line::Clear => app.clear(),
            Line::Copy => {
                if app.copy_output() {
                    println!("Copied.");
                }
                continue;
            }
            Line::From(Ok(lang)) => app.set_source_language(lang),
            Line::To(Ok(lang)) => app.set_target_language(lang),
            Line::From(Err(e)) | Line::To(Err(e)) => {
                println!("{e}");
                continue;
            }
            Line::Langs => {
                let s = app.state();
                println!("{}", render_languages(s.source_language(), s.target_language()));
                continue;
            }
            Line::Status => {
                match app.check_status().await {
                    Ok(status) => println!("API Status: Ready ({})", status.message),
                    Err(e) => println!("API Status: Unreachable ({e})"),
                }
                continue;
            }
            Line::Show => {}
            Line::Help => {
                println!("{HELP}");
                continue;
            }
            Line::Quit => break,
            Line::Unknown(other) => {
                println!("unknown command `:{other}` (:help for commands)");
                continue;
            }
        }

        println!("{}", render(app.state(), api_url));
    }

    Ok(())
}

fn report(result: Result<(), UiError>) {
    // The message is already part of the rendered form.
    if let Err(e) = result {
        tracing::debug!(error = %e, "action failed");
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<AppConfig> {
    let api_base = resolve_api_base(args.api_url.clone(), env)
        .with_context(|| format!("invalid --api-url or {ENV_API_URL}"))?;
    let request_timeout = resolve_request_timeout(args.timeout_ms, env)?;

    Ok(AppConfig {
        api_base,
        request_timeout,
    })
}
