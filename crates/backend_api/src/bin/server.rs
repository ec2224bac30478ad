use std::env;
use std::path::Path;
use std::sync::Arc;

use backend_api::run_server;
use extraction::QueryService;
use sheet_source::XlsxSheetSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path = settings_loader::settings_path_from_env();
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let settings = settings_loader::load_settings(&settings_path)?;

    println!("Loyalty Balance API");
    println!("===================");
    println!("Settings: {}", settings_path.display());
    println!("Workbook: {}", settings.workbook_path);
    println!("Listening on: {}:{}", host, port);
    println!();

    // Pre-flight check: the workbook is re-read per query, so a missing file
    // is not fatal here, just loud.
    if !Path::new(&settings.workbook_path).exists() {
        eprintln!(
            "[WARN] workbook not found at: {}",
            settings.workbook_path
        );
        eprintln!("       Continuing; queries will fail until the file exists.");
    }

    let source = Arc::new(XlsxSheetSource::new(&settings.workbook_path));
    let service = Arc::new(QueryService::new(source, settings));

    run_server(service, &host, port).await?;

    Ok(())
}
