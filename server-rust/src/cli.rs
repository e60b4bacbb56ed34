use crate::config::HistoryBackend;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "joke-machine", version, about = "Serve jokes from a hosted language model")]
pub struct Cli {
    /// Port to listen on
    pub port: u16,

    /// Keep history in process memory instead of MongoDB
    #[arg(long)]
    pub in_memory: bool,
}

impl Cli {
    #[must_use]
    pub fn history_backend(&self) -> HistoryBackend {
        if self.in_memory {
            HistoryBackend::InMemory
        } else {
            HistoryBackend::Mongo
        }
    }
}
