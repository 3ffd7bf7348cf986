#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::{env, fs};

use anyhow::{Context, bail};
use bencore::{Config, config::DEFAULT_MAX_DEPTH};

/// Printing and dropping the decoded value recurse once per level, keep them within
/// the main thread's stack.
const MAX_DUMP_DEPTH: usize = 4096;

fn parse_args(args: &[String]) -> anyhow::Result<(&str, usize)> {
    let (path, max_depth) = match args {
        [_, path] => (path, DEFAULT_MAX_DEPTH),
        [_, flag, depth, path] if flag == "--max-depth" => (
            path,
            depth
                .parse::<usize>()
                .with_context(|| format!("invalid --max-depth value {:?}", depth))?,
        ),
        _ => bail!("usage: bdump [--max-depth N] <path>"),
    };
    if max_depth > MAX_DUMP_DEPTH {
        bail!("--max-depth {} is above the limit of {}", max_depth, MAX_DUMP_DEPTH);
    }
    Ok((path.as_str(), max_depth))
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (path, max_depth) = parse_args(&args)?;

    let data = fs::read(path).with_context(|| format!("reading {}", path))?;

    let config = Config::new().with_max_depth(max_depth);
    let value = bencore::decode_with(&data, &config)
        .with_context(|| format!("decoding {}", path))?;
    println!("{}", value);

    // strict decoding leaves key order as the only way to be non-canonical
    if value.has_sorted_keys() {
        eprintln!("{}: {} bytes, canonical", path, data.len());
    } else {
        eprintln!("{}: {} bytes, dictionary keys out of order", path, data.len());
    }

    Ok(())
}
