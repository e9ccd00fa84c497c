use emerald_lex::{Error, Scanner};
use std::{
    env,
    io::{self, Write},
};

fn main() -> io::Result<()> {
    init_tracing();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt(&mut stdout, &mut stderr)?,
        2 => {
            let had_errors = run_file(args[1].as_str(), &mut stdout, &mut stderr)?;
            if had_errors {
                std::process::exit(65);
            }
        }
        _ => {
            writeln!(stdout, "Usage: emerald-lex [script]")?;
            std::process::exit(64);
        }
    };

    Ok(())
}

/// Logging stays off unless `RUST_LOG` asks for it.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_file(path: &str, out: &mut impl Write, err_out: &mut impl Write) -> io::Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    run(contents.as_str(), out, err_out)
}

fn run_prompt(out: &mut impl Write, err_out: &mut impl Write) -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        run(buffer.as_str(), out, err_out)?;
    }

    Ok(())
}

/// Prints every token, then every diagnostic. Returns whether any were reported.
fn run(source: &str, out: &mut impl Write, err_out: &mut impl Write) -> io::Result<bool> {
    let mut errors: Vec<Error> = Vec::new();
    for token in Scanner::new(source, &mut errors) {
        writeln!(out, "{}", token)?;
    }

    for e in errors.iter() {
        writeln!(err_out, "{}", e)?;
    }

    Ok(!errors.is_empty())
}
