//! Terminal rendition of the seafood health-facts chat.
//!
//! Shows numbered menus (category, species, section), accepts a number or the
//! option text, and prints the chosen section. `뒤로`/`back` goes up one level,
//! `처음으로`/`home` returns to the category list, `종료`/`quit` exits.

use anyhow::{Context, Result, bail};
use seafood_facts::{
    CatalogSource, DATA_ENV, LoadOutcome, MenuOption, NO_DATA_MESSAGE, NavState, SectionContent,
    SectionKey, Session, pick_option, resolve_data_path,
};
use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    init_tracing();

    let mut session = Session::new();
    let sources = args.sources()?;
    match session
        .load_sources(&sources)
        .context("failed to load the seafood catalog")?
    {
        LoadOutcome::Installed(report) => {
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
        }
        LoadOutcome::Stale => bail!("catalog load was superseded"),
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_menu(&mut out, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        // Sections are printed only right after a successful pick.
        let picked = match input {
            "" => continue,
            "종료" | "quit" | "exit" => break,
            "뒤로" | "back" => {
                session.go_back()?;
                false
            }
            "처음으로" | "home" => {
                session.go_home()?;
                false
            }
            _ => {
                let menu = session.menu()?;
                match pick_option(input, &menu) {
                    Some(option) => match session.choose(option) {
                        Ok(_) => true,
                        Err(err) => {
                            writeln!(out, "{err}")?;
                            false
                        }
                    },
                    None => {
                        writeln!(out, "'{input}'에 해당하는 항목이 없습니다.")?;
                        false
                    }
                }
            }
        };
        if picked && matches!(session.state()?, NavState::AtSection { .. }) {
            render_current(&mut out, &session)?;
        }
        print_menu(&mut out, &session)?;
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_menu(out: &mut impl Write, session: &Session) -> Result<()> {
    let menu = session.menu()?;
    let title = match session.state()? {
        NavState::AtRoot => "카테고리 (번호/텍스트 선택)".to_string(),
        NavState::AtCategory { category } => format!("{category} · 어종 (번호/텍스트 선택)"),
        NavState::AtSpecies { category, species }
        | NavState::AtSection {
            category, species, ..
        } => format!("{category} · {species}"),
    };
    writeln!(out)?;
    writeln!(out, "{title}")?;
    if menu.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
    }
    write_options(out, &menu)?;
    match session.state()? {
        NavState::AtRoot => {}
        NavState::AtCategory { .. } => writeln!(out, "(처음으로)")?,
        _ => writeln!(out, "(뒤로 / 처음으로)")?,
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn write_options(out: &mut impl Write, menu: &[MenuOption]) -> io::Result<()> {
    for (idx, option) in menu.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, option.label)?;
    }
    Ok(())
}

fn render_current(out: &mut impl Write, session: &Session) -> Result<()> {
    let sections = session.current_sections()?;
    if sections.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
        return Ok(());
    }
    for (key, content) in sections {
        render_section(out, &key, content)?;
    }
    Ok(())
}

fn render_section(
    out: &mut impl Write,
    key: &SectionKey,
    content: &SectionContent,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}]", key.display_label())?;
    match content {
        SectionContent::Text(text) => {
            for line in text.lines() {
                writeln!(out, "{line}")?;
            }
        }
        SectionContent::List(items) => {
            for item in items {
                writeln!(out, "• {item}")?;
            }
        }
        SectionContent::Table(rows) => {
            writeln!(out, "영양소 | 수치/설명")?;
            for (label, value) in rows {
                writeln!(out, "{label} | {value}")?;
            }
        }
        SectionContent::Recipe {
            name,
            ingredients,
            steps,
        } => {
            if !name.is_empty() {
                writeln!(out, "{name}")?;
            }
            if !ingredients.is_empty() {
                writeln!(out, "재료")?;
                for item in ingredients {
                    writeln!(out, "• {item}")?;
                }
            }
            if !steps.is_empty() {
                writeln!(out, "만드는 법")?;
                for (idx, step) in steps.iter().enumerate() {
                    writeln!(out, "{}. {step}", idx + 1)?;
                }
            }
        }
    }
    Ok(())
}

struct CliArgs {
    data: Option<PathBuf>,
    no_fallback: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut data: Option<PathBuf> = None;
        let mut no_fallback = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--data" => {
                    if data.is_some() {
                        bail!("--data may only be provided once");
                    }
                    data = Some(PathBuf::from(next_value(&mut args, "--data")?));
                }
                "--no-fallback" => no_fallback = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(CliArgs { data, no_fallback })
    }

    /// Sources to try, in order.
    fn sources(&self) -> Result<Vec<CatalogSource>> {
        let cwd = env::current_dir().context("resolving the working directory")?;
        let mut sources: Vec<CatalogSource> =
            resolve_data_path(self.data.as_deref(), env::var_os(DATA_ENV), &cwd)
                .map(CatalogSource::File)
                .into_iter()
                .collect();
        if !self.no_fallback {
            sources.push(CatalogSource::bundled());
        }
        if sources.is_empty() {
            bail!(
                "no dataset found; pass --data PATH, set {DATA_ENV}, or drop --no-fallback\n{}",
                usage()
            );
        }
        Ok(sources)
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> String {
    format!(
        "Usage: fish-chat [--data PATH] [--no-fallback]\n\
Browse the seafood health-facts catalog interactively. The dataset is read from --data,\n\
then ${DATA_ENV}, then ./health_fish.json or ./docs/health_fish.json, then the bundled sample\n\
(unless --no-fallback). Set RUST_LOG to adjust log verbosity (default: warn).\n"
    )
}
