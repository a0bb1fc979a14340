use clap::Parser;
use file_toolbox::core::combine::sample_pdf;
use file_toolbox::domain::ports::Storage;
use file_toolbox::utils::logger::{self, LoggerOptions};
use file_toolbox::utils::validation;
use file_toolbox::LocalStorage;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "make_sample_pdfs")]
#[command(about = "Write small one-page PDFs for trying out `file-toolbox combine`")]
struct Args {
    /// Directory to write the sample files into
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Number of files to create (file1.pdf, file2.pdf, ...)
    #[arg(short, long, default_value_t = 3)]
    count: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(&LoggerOptions {
        verbose: args.verbose,
        ..Default::default()
    });

    validation::validate_path("dir", &args.dir)?;
    validation::validate_range("count", args.count, 1, 100)?;

    let storage = LocalStorage::new(&args.dir);
    for i in 1..=args.count {
        let name = format!("file{}.pdf", i);
        let data = sample_pdf(&format!("This is File {}", i))?;
        storage.write_file(Path::new(&name), &data).await?;
        tracing::debug!("Wrote {} ({} bytes)", name, data.len());
        println!("Created '{}'", args.dir.join(&name).display());
    }

    Ok(())
}
