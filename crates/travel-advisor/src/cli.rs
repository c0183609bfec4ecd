use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "travel-advisor",
    version,
    about = "Weather-aware 24 hour itinerary for a destination city"
)]
pub(crate) struct Args {
    /// Destination city; prompted for on stdin when omitted.
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, default_value = ".")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value = "travel_assistant.log")]
    pub(crate) log_file: String,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    #[arg(long)]
    pub(crate) model: Option<String>,
    #[arg(long)]
    pub(crate) max_turns: Option<usize>,
}
