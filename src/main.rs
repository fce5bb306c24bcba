// Main CLI entry point for wordfuzz

use std::process::ExitCode;
use std::sync::Arc;

use wordfuzz::cli::{parse_config, FuzzConfig};
use wordfuzz::logging;
use wordfuzz::{
    effective_workers, load_wordlist, Cancellation, Dispatcher, FuzzError, HttpExecutor,
    ReportSink, RunOutcome,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match parse_config(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };
    logging::initialize(config.verbose);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(config: FuzzConfig) -> Result<(), FuzzError> {
    let words = load_wordlist(&config.wordlist)?;
    let executor = HttpExecutor::new()?;
    let sink = Arc::new(ReportSink::stdout());

    let workers = effective_workers(words.len(), config.threads);
    if workers < config.threads {
        sink.notice(&format!(
            "[*] Adjusting to {} threads due to wordlist size...",
            workers
        ));
    }
    sink.notice(&format!(
        "[*] Fuzzing {} with {} words using {} threads...",
        config.url,
        words.len(),
        workers
    ));

    let cancel = Cancellation::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        let sink = Arc::clone(&sink);
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    sink.notice("[!] Interrupted. Cleaning up threads...");
                    cancel.request_cancel();
                }
                Err(e) => log::warn!("could not listen for interrupt: {}", e),
            }
        }
    });

    let mut dispatcher = Dispatcher::new(
        executor,
        Arc::clone(&sink),
        config.request_spec(),
        config.filters.clone(),
        config.threads,
    );
    let summary = dispatcher.run(words, &cancel).await;
    interrupt.abort();

    match summary.outcome {
        RunOutcome::Completed => sink.notice("[*] Fuzzing complete!"),
        RunOutcome::Cancelled => sink.notice("[*] Cleanup complete."),
    }
    log::info!(
        "{}/{} processed by {} workers: {} matches, {} redirects, {} suppressed, {} transport errors",
        summary.processed,
        summary.total,
        summary.workers,
        summary.counts.matches,
        summary.counts.redirects,
        summary.counts.suppressed,
        summary.counts.transport_errors
    );
    Ok(())
}
