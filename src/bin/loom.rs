use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "loom", version, about = "Weave a daily textile from your typing rhythm")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Key-value store file (overrides LOOM_STORE).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Directory for downloaded PNGs (overrides LOOM_DOWNLOADS).
    #[arg(long, global = true)]
    downloads: Option<PathBuf>,

    /// Device pixel ratio (overrides LOOM_DPR).
    #[arg(long, global = true)]
    dpr: Option<f64>,

    /// Container width in CSS px (overrides LOOM_WIDTH).
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Command that receives the PNG on stdin (overrides LOOM_CLIPBOARD_CMD).
    #[arg(long, global = true)]
    clipboard_cmd: Option<String>,

    /// Extra font directory; repeatable (adds to LOOM_FONT_DIR).
    #[arg(long, global = true)]
    font_dir: Vec<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Weave text with an explicit rhythm and store it.
    Weave(WeaveArgs),
    /// Feed a JSON keystroke log into the session.
    Replay(ReplayArgs),
    /// Print a day's view and its pattern.
    Show(DayArg),
    /// List the last seven days.
    Days,
    /// Clear a day's draft, rhythm, and stored record.
    Reset(DayArg),
    /// Render the card and copy it, falling back to a download.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct DayArg {
    /// Day to act on (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    day: Option<loom::DayKey>,
}

#[derive(Args, Debug)]
struct WeaveArgs {
    /// Text to weave.
    #[arg(long)]
    text: String,

    /// Inter-keystroke intervals in milliseconds, comma separated.
    #[arg(long, value_delimiter = ',')]
    times: Vec<f64>,

    #[command(flatten)]
    day: DayArg,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Keystroke log: `[{"key": "h", "at_ms": 0.0}, ...]`.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    day: DayArg,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Skip the clipboard and write the PNG file directly.
    #[arg(long)]
    download: bool,

    #[command(flatten)]
    day: DayArg,
}

#[derive(Deserialize, Debug)]
struct KeyEvent {
    key: String,
    at_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let cfg = resolve_config(&cli.global)?;
    let with_fonts = matches!(cli.cmd, Command::Export(_));
    let mut app = mount(&cfg, with_fonts)?;

    match cli.cmd {
        Command::Weave(args) => cmd_weave(&mut app, args),
        Command::Replay(args) => cmd_replay(&mut app, args),
        Command::Show(args) => cmd_show(&mut app, args),
        Command::Days => cmd_days(&app),
        Command::Reset(args) => cmd_reset(&mut app, args),
        Command::Export(args) => cmd_export(&mut app, args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(global: &GlobalArgs) -> anyhow::Result<loom::LoomConfig> {
    let mut cfg = loom::LoomConfig::from_env().context("read LOOM_* environment")?;
    if let Some(p) = &global.store {
        cfg.store_path = p.clone();
    }
    if let Some(p) = &global.downloads {
        cfg.downloads_dir = p.clone();
    }
    if let Some(v) = global.dpr {
        cfg.device_pixel_ratio = v;
    }
    if let Some(v) = global.width {
        cfg.container_width = v;
    }
    if let Some(c) = &global.clipboard_cmd {
        cfg.clipboard_cmd = Some(c.clone());
    }
    cfg.font_dirs.extend(global.font_dir.iter().cloned());
    cfg.validate().context("invalid options")?;
    Ok(cfg)
}

fn mount(cfg: &loom::LoomConfig, with_fonts: bool) -> anyhow::Result<loom::LoomApp> {
    let text = if with_fonts {
        loom::TextRasterizer::new(&cfg.font_dirs)
    } else {
        loom::TextRasterizer::without_fonts()
    };
    Ok(loom::LoomApp::mount(loom::AppParts {
        kv: Box::new(loom::FileKv::new(&cfg.store_path)),
        host: Box::new(loom::EnvHost::from_env()),
        clipboard: cfg.clipboard()?,
        downloads: loom::Downloads::new(&cfg.downloads_dir),
        clock: Box::new(loom::SystemClock),
        text,
        card: cfg.card_opts(),
    }))
}

fn switch_day(app: &mut loom::LoomApp, day: Option<loom::DayKey>) {
    if let Some(day) = day
        && day != app.day()
    {
        app.select_day(day);
    }
}

fn print_pattern_summary(app: &loom::LoomApp) {
    match app.pattern() {
        Some(p) => println!(
            "seed {} ({})  stripe {}  on {}  checksum 0x{:016x}",
            p.seed(),
            p.signature(),
            p.stripe_row(),
            p.on_cells(),
            p.checksum()
        ),
        None => println!("no pattern"),
    }
}

fn cmd_weave(app: &mut loom::LoomApp, args: WeaveArgs) -> anyhow::Result<()> {
    switch_day(app, args.day.day);
    app.set_text(&args.text);
    app.set_rhythm(&args.times);
    app.commit();
    println!("{}", app.view());
    print_pattern_summary(app);
    Ok(())
}

fn cmd_replay(app: &mut loom::LoomApp, args: ReplayArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open keystroke log '{}'", args.in_path.display()))?;
    let events: Vec<KeyEvent> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse keystroke log JSON")?;

    switch_day(app, args.day.day);
    for ev in &events {
        anyhow::ensure!(
            ev.at_ms.is_finite(),
            "keystroke '{}' has a non-finite timestamp",
            ev.key
        );
        app.key(loom::Key::from_name(&ev.key), ev.at_ms);
    }
    eprintln!("replayed {} keystrokes", events.len());
    println!("{}", app.view());
    print_pattern_summary(app);
    Ok(())
}

fn cmd_show(app: &mut loom::LoomApp, args: DayArg) -> anyhow::Result<()> {
    switch_day(app, args.day);
    println!("{}", app.view());
    if let Some(p) = app.pattern() {
        println!();
        print!("{}", p.to_ascii());
    }
    print_pattern_summary(app);
    Ok(())
}

fn cmd_days(app: &loom::LoomApp) -> anyhow::Result<()> {
    for day in app.day().last_days(loom::DAY_STRIP_LEN) {
        let status = match app.peek_day(day) {
            Some(loom::DayRecord {
                pattern: Some(p), ..
            }) => format!("woven   SIG {}", p.signature()),
            Some(_) => "empty".to_string(),
            None => "-".to_string(),
        };
        println!("{day}  {status}");
    }
    Ok(())
}

fn cmd_reset(app: &mut loom::LoomApp, args: DayArg) -> anyhow::Result<()> {
    switch_day(app, args.day);
    app.reset();
    println!("{}", app.view());
    Ok(())
}

fn cmd_export(app: &mut loom::LoomApp, args: ExportArgs) -> anyhow::Result<()> {
    switch_day(app, args.day.day);
    let outcome = if args.download {
        app.download_png()
    } else {
        app.copy_png()
    };
    match outcome {
        loom::ExportOutcome::Copied => eprintln!("copied loom-{}.png to clipboard", app.day()),
        loom::ExportOutcome::Downloaded(path) => eprintln!("wrote {}", path.display()),
        loom::ExportOutcome::Skipped => eprintln!("nothing to export for {}", app.day()),
        loom::ExportOutcome::Failed(reason) => anyhow::bail!("export failed: {reason}"),
    }
    Ok(())
}
