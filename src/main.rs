use clap::Parser;
use encbox::transfer::{decode_file, encode_file};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("ENCBOX_VERSION");
const BUILD: &str = env!("ENCBOX_BUILD");
const PROFILE: &str = env!("ENCBOX_PROFILE");
const GIT_HASH: &str = env!("ENCBOX_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "encbox")]
#[command(author, about = "Compressed, layered-cipher single-file encryption container", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Input file
    #[arg(short = 'i', long, required_unless_present = "version")]
    input: Option<PathBuf>,

    /// Passphrase
    #[arg(short = 'k', long, required_unless_present = "version")]
    key: Option<String>,

    /// Encode the input file (the default)
    #[arg(short = 'e', long, conflicts_with = "decode")]
    encode: bool,

    /// Decode an encoded container
    #[arg(short = 'd', long)]
    decode: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("encbox {}", get_version());
        return ExitCode::SUCCESS;
    }

    // required_unless_present guarantees both are set past this point
    let (Some(input), Some(key)) = (cli.input, cli.key) else {
        return ExitCode::FAILURE;
    };

    let verb = if cli.decode { "decoding" } else { "encoding" };
    let shown = input.display().to_string();
    print!("{} {}", verb, shown);
    let _ = std::io::stdout().flush();

    let mut progress = |treated: u64, total: u64| {
        let percent = if total == 0 {
            100.0
        } else {
            treated as f64 * 100.0 / total as f64
        };
        print!("\r{} {}: {:.1} %", verb, shown, percent);
        let _ = std::io::stdout().flush();
    };

    let result = if cli.decode {
        decode_file(&input, key.as_bytes(), &mut progress)
    } else {
        encode_file(&input, key.as_bytes(), &mut progress)
    };

    match result {
        Ok(output) => {
            println!("\rsucceeded {} {} -> {}", verb, shown, output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\rfailed {} {}: {}", verb, shown, e);
            ExitCode::FAILURE
        }
    }
}
