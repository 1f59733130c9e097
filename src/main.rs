use std::{
    env,
    ffi::OsString,
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::{Command, ExitCode},
    time::Instant,
};

use clap::Parser;
use inkwell::context::Context;
use stellar::{
    compile_source,
    compiler::backend::{run_jit, verify, write_bitcode, write_ir, write_object},
    display_error,
    errors::errors::{Error, ErrorStage},
};
use tracing::{debug, error, info, Level};

const SOURCE_EXTENSION: &str = "st";

/// Compiles and runs Stellar programs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A `.st` file, or a directory searched recursively for them
    path: PathBuf,

    /// Write textual LLVM IR (`.ll`) for each file
    #[arg(long)]
    emit_ir: bool,

    /// Write LLVM bitcode (`.bc`) for each file
    #[arg(long)]
    emit_bc: bool,

    /// Write a native object file (`.o`) for each file
    #[arg(long)]
    emit_obj: bool,

    /// Directory for emitted files, defaults to next to each source
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Compile only, do not run `main`
    #[arg(long)]
    no_run: bool,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run programs inside this process instead of one child per file
    #[arg(long, hide = true)]
    in_process: bool,
}

/// What to do with each compiled file.
#[derive(Debug, Clone)]
struct CompileOptions {
    emit_ir: bool,
    emit_bitcode: bool,
    emit_object: bool,
    out_dir: Option<PathBuf>,
    run: bool,
}

impl CompileOptions {
    fn from_cli(cli: &Cli) -> Self {
        CompileOptions {
            emit_ir: cli.emit_ir,
            emit_bitcode: cli.emit_bc,
            emit_object: cli.emit_obj,
            out_dir: cli.out_dir.clone(),
            run: !cli.no_run,
        }
    }

    /// Flags that recreate these options on a child invocation.
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();

        if self.emit_ir {
            args.push(OsString::from("--emit-ir"));
        }
        if self.emit_bitcode {
            args.push(OsString::from("--emit-bc"));
        }
        if self.emit_object {
            args.push(OsString::from("--emit-obj"));
        }
        if let Some(out_dir) = &self.out_dir {
            args.push(OsString::from("--out-dir"));
            args.push(out_dir.clone().into_os_string());
        }
        if !self.run {
            args.push(OsString::from("--no-run"));
        }

        args
    }

    fn output_path(&self, source: &Path, extension: &str) -> PathBuf {
        let path = source.with_extension(extension);

        match (&self.out_dir, path.file_name()) {
            (Some(out_dir), Some(file_name)) => out_dir.join(file_name),
            _ => path,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Program output owns stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .init();

    let options = CompileOptions::from_cli(&cli);

    if let Some(out_dir) = &options.out_dir {
        if let Err(err) = fs::create_dir_all(out_dir) {
            error!(dir = %out_dir.display(), %err, "failed to create output directory");
            return ExitCode::FAILURE;
        }
    }

    let sources = match collect_sources(&cli.path) {
        Ok(sources) => sources,
        Err(err) => {
            error!(path = %cli.path.display(), %err, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    if sources.is_empty() {
        error!(path = %cli.path.display(), "no .{} files found", SOURCE_EXTENSION);
        return ExitCode::FAILURE;
    }

    // A trap inside a running program kills its process, so each file that
    // will run gets a child of its own
    let isolate = options.run && !cli.in_process;
    let exe = if isolate {
        match env::current_exe() {
            Ok(exe) => Some(exe),
            Err(err) => {
                error!(%err, "failed to locate the stellar executable");
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    let start = Instant::now();
    let mut failed = 0;

    for source in sources.iter() {
        let succeeded = match &exe {
            Some(exe) => compile_file_isolated(exe, source, &options, cli.verbose),
            None => compile_file(source, &options),
        };

        if !succeeded {
            failed += 1;
        }
    }

    info!(files = sources.len(), failed, elapsed = ?start.elapsed(), "done");

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// The file itself, or every `.st` file below a directory in sorted order.
fn collect_sources(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        if !is_source_file(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a stellar file", path.display()),
            ));
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let mut sources = Vec::new();
    let mut pending = vec![path.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry_path = entry?.path();

            if entry_path.is_dir() {
                pending.push(entry_path);
            } else if is_source_file(&entry_path) {
                sources.push(entry_path);
            }
        }
    }

    sources.sort();
    Ok(sources)
}

/// Handles one file in a child `stellar --in-process` and reports how it ended.
///
/// The child renders its own diagnostics; only a child killed by a signal is
/// reported here.
fn compile_file_isolated(exe: &Path, path: &Path, options: &CompileOptions, verbose: u8) -> bool {
    let mut command = Command::new(exe);
    command.arg(path).arg("--in-process").args(options.to_args());
    for _ in 0..verbose {
        command.arg("--verbose");
    }

    let status = match command.status() {
        Ok(status) => status,
        Err(err) => {
            error!(file = %path.display(), %err, "failed to start child process");
            return false;
        }
    };

    if status.success() {
        return true;
    }

    if status.code().is_none() {
        eprintln!("Error: RuntimeTrap (program terminated by {})", status);
        eprintln!("-> {}", path.display());
        error!(file = %path.display(), %status, "program terminated abnormally");
    }

    false
}

/// Compiles, emits and runs one file. Failures are reported and yield `false`.
fn compile_file(path: &Path, options: &CompileOptions) -> bool {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %path.display(), %err, "failed to read source");
            return false;
        }
    };

    match process_file(path, &source, options) {
        Ok(()) => true,
        Err(err) => {
            if err.stage() == ErrorStage::Backend {
                eprintln!("Error: {} ({})", err.get_error_name(), err.get_tip());
                eprintln!("-> {}", path.display());
            } else {
                display_error(&err, &source);
            }
            error!(file = %path.display(), stage = %err.stage(), "compilation failed");
            false
        }
    }
}

fn process_file(path: &Path, source: &str, options: &CompileOptions) -> Result<(), Error> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Each file gets its own context, module and environment
    let context = Context::create();
    let compiler = compile_source(source, &file_name, &context)?;
    verify(&compiler)?;

    if options.emit_ir {
        let output = options.output_path(path, "ll");
        write_ir(&compiler, &output)?;
        debug!(output = %output.display(), "wrote IR");
    }

    if options.emit_bitcode {
        let output = options.output_path(path, "bc");
        write_bitcode(&compiler, &output)?;
        debug!(output = %output.display(), "wrote bitcode");
    }

    if options.emit_object {
        let output = options.output_path(path, "o");
        write_object(&compiler, &output)?;
        debug!(output = %output.display(), "wrote object file");
    }

    if options.run {
        let run_start = Instant::now();
        run_jit(&compiler)?;
        debug!(file = %file_name, elapsed = ?run_start.elapsed(), "ran main");
    }

    Ok(())
}
