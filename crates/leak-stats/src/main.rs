mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use leak_core::settings::Settings;
use leak_core::LeakStatsError;
use leak_data::analysis::analyze_directory;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e.downcast_ref::<LeakStatsError>(), Some(LeakStatsError::Usage(_))) {
                eprintln!("{}", Settings::usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::load()?;

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::debug!("leak-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let input_dir = bootstrap::resolve_from_current_dir(&settings.input_dir)?;
    let output_file = bootstrap::resolve_from_current_dir(&settings.output_file)?;

    tracing::debug!(
        "Input: {}, output: {}, retain only app-name leaks: {}",
        input_dir.display(),
        output_file.display(),
        settings.retain_only_app_name_leaks
    );

    let result = analyze_directory(&input_dir, settings.retain_only_app_name_leaks)?;

    result.statistics.save(&output_file)?;
    tracing::info!("Statistics written to {}", output_file.display());

    result.statistics.print_summary()?;

    Ok(())
}
