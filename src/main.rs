//! marksift CLI - compile markdown articles, or search across them.
//!
//! ```text
//! marksift [FILE]                            convert FILE (or stdin) to HTML
//! marksift --query Q [--json] FILE...        search the given articles
//! marksift --namespace NS ...                namespace for figure URLs
//! ```

use std::io::{self, Read, Write};
use std::path::Path;

use marksift::{load_documents, search, FsSource, Options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut query: Option<String> = None;
    let mut json = false;
    let mut namespace = String::new();
    let mut files: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--query" => {
                i += 1;
                query = args.get(i).cloned();
            }
            "--namespace" => {
                i += 1;
                namespace = args.get(i).cloned().unwrap_or_default();
            }
            "--json" => json = true,
            other => files.push(other.to_string()),
        }
        i += 1;
    }

    let options = Options { namespace };

    match query {
        // No query: plain conversion of one file or stdin.
        None => {
            let input = match files.first().map(String::as_str) {
                Some("-") | None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
                Some(file) => std::fs::read_to_string(file)?,
            };
            let html = marksift::to_html_with_options(&input, &options);
            io::stdout().write_all(html.as_bytes())?;
        }
        Some(query) => {
            let mut source = FsSource::new();
            for file in &files {
                let name = Path::new(file)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.clone());
                source.register(name, file);
            }
            let names = source.names().to_vec();
            let documents = load_documents(&source, &names, &options)?;
            let results = search(&documents, &query);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &results)?;
                out.write_all(b"\n")?;
            } else {
                for record in &results.records {
                    writeln!(out, "{}", record.route())?;
                    writeln!(out, "  {}  ({})", record.title, record.href())?;
                    if !record.description.is_empty() {
                        writeln!(out, "  {}", record.description)?;
                    }
                }
                writeln!(out, "Showing {} results", results.total)?;
            }
        }
    }

    Ok(())
}
