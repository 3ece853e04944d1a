use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sceneplate", version)]
struct Cli {
    /// Log compile and resolve progress to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a template and print its component tree and phases.
    Compile(CompileArgs),
    /// Compile a template, resolve it against data and print one scene per phase.
    Build(BuildArgs),
    /// Evaluate a single expression.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input template JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input template JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Data environment JSON (an object of name -> value).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Template name, used as the scene name prefix.
    #[arg(long, default_value = "scene")]
    name: String,

    /// Print every dynamic attribute substitution to stderr.
    #[arg(long)]
    trace_expressions: bool,

    #[command(flatten)]
    sandbox: SandboxArgs,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Expression source text.
    #[arg(long)]
    expr: String,

    /// Data environment JSON (an object of name -> value).
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(flatten)]
    sandbox: SandboxArgs,
}

#[derive(Args, Debug)]
struct SandboxArgs {
    /// Maximum expression length in bytes.
    #[arg(long)]
    max_len: Option<usize>,

    /// Maximum expression nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum number of expression nodes.
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Fail on member access of undefined/null instead of yielding undefined.
    #[arg(long)]
    strict_members: bool,
}

impl SandboxArgs {
    fn opts(&self) -> sceneplate::EvalOpts {
        let mut opts = sceneplate::EvalOpts::default();
        if let Some(n) = self.max_len {
            opts.max_len = n;
        }
        if let Some(n) = self.max_depth {
            opts.max_depth = n;
        }
        if let Some(n) = self.max_nodes {
            opts.max_nodes = n;
        }
        if self.strict_members {
            opts.null_safe_member = false;
        }
        opts
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Build(args) => cmd_build(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn read_data_json(path: Option<&Path>) -> anyhow::Result<sceneplate::DataEnv> {
    let Some(path) = path else {
        return Ok(sceneplate::DataEnv::new());
    };
    let f = File::open(path).with_context(|| format!("open data '{}'", path.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse data JSON '{}'", path.display()))?;
    sceneplate::DataEnv::from_json(json).map_err(|e| anyhow::anyhow!("data '{}': {e}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let template = sceneplate::Template::from_path(&args.in_path)?;
    let compiled = template
        .compile()
        .with_context(|| format!("compile '{}'", args.in_path.display()))?;
    print_json(&compiled)
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let template = sceneplate::Template::from_path(&args.in_path)?;
    let data = read_data_json(args.data.as_deref())?;
    let opts = args.sandbox.opts();

    let compiled = template
        .compile()
        .with_context(|| format!("compile '{}'", args.in_path.display()))?;
    let resolved = if args.trace_expressions {
        compiled.resolve_observed(&data, &opts, |src, value| {
            let shown = serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"));
            eprintln!("  {src} => {shown}");
        })
    } else {
        compiled.resolve(&data, &opts)
    }
    .with_context(|| format!("resolve '{}'", args.in_path.display()))?;
    let scenes = template.scenes(&args.name, resolved);

    eprintln!("built {} scene(s)", scenes.len());
    print_json(&scenes)
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let data = read_data_json(args.data.as_deref())?;
    let value = sceneplate::eval_expression(&args.expr, &data, &args.sandbox.opts())?;
    print_json(&value)
}
